use crate::domain::item::{Item, ItemDraft};
use crate::infra::config::MAX_BODY_BYTES;
use crate::transport::http::access_log::access_log;
use crate::transport::http::handlers::{health, items};
use crate::transport::http::types::{ApiResponse, AppState};
use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::healthcheck_handler,
        items::new_item_handler,
        items::all_items_handler,
        items::item_handler,
        items::modify_item_handler,
        items::delete_item_handler,
        items::log_item_handler
    ),
    components(schemas(Item, ItemDraft, ApiResponse))
)]
pub struct ApiDoc;

pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::healthcheck_handler))
        .route("/new", post(items::new_item_handler))
        .route("/all", get(items::all_items_handler))
        .route("/item/:barcode", get(items::item_handler))
        .route("/modify", post(items::modify_item_handler))
        .route(
            "/delete/:barcode",
            get(items::delete_item_handler).delete(items::delete_item_handler),
        )
        .route(
            "/log/:barcode",
            post(items::log_item_handler).get(items::log_item_handler),
        )
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .with_state(app_state)
}

/// The router plus Swagger UI, permissive CORS and the access log.
pub fn create_app(app_state: AppState) -> Router {
    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any);
    create_router(app_state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(cors)
        .layer(middleware::from_fn(access_log))
}
