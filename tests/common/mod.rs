use inventory_tracker::{transport, InventoryService};
use std::net::SocketAddr;

/// Serves a fresh in-memory inventory on an ephemeral port and returns its base URL.
pub async fn spawn_server() -> String {
    let state = transport::http::AppState::new(InventoryService::in_memory());
    let app = transport::http::create_app(state);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr: SocketAddr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}
