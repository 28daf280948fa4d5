use axum::extract::Request;
use axum::http::header::USER_AGENT;
use axum::middleware::Next;
use axum::response::Response;
use tracing::info;

const USER_AGENT_MAX_CHARS: usize = 25;

/// Logs one line per request: method, path, caller and resulting status.
pub async fn access_log(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let user_agent = req
        .headers()
        .get(USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(|ua| cap_at(USER_AGENT_MAX_CHARS, ua))
        .unwrap_or_else(|| "unknown".to_string());

    let response = next.run(req).await;

    info!(
        %method,
        %path,
        user_agent = %user_agent,
        status = response.status().as_u16(),
        "request"
    );
    response
}

fn cap_at(n: usize, s: &str) -> String {
    match s.char_indices().nth(n) {
        Some((idx, _)) => format!("{}...", &s[..idx]),
        None => s.to_string(),
    }
}
