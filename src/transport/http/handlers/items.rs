use crate::domain::item::{Item, ItemDraft};
use crate::transport::http::types::{json_rejection, parse_barcode, ApiError, ApiResponse, AppState};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

const DRAFT_SHAPE: &str = r#"{"name": string, "barcode": integer, "location": string}"#;

#[utoipa::path(
    post,
    path = "/new",
    request_body = ItemDraft,
    responses(
        (status = 201, description = "Item created", body = Item),
        (status = 400, description = "Malformed body or barcode", body = ApiResponse),
        (status = 409, description = "Barcode already exists", body = ApiResponse),
        (status = 413, description = "Body too large", body = ApiResponse)
    )
)]
pub async fn new_item_handler(
    State(state): State<AppState>,
    request: Result<Json<ItemDraft>, JsonRejection>,
) -> Result<(StatusCode, Json<Item>), ApiError> {
    let Json(draft) = request.map_err(|e| json_rejection(e, DRAFT_SHAPE))?;
    let mut service = state.service.lock().await;
    let item = service.create(draft).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

#[utoipa::path(
    get,
    path = "/all",
    responses(
        (status = 200, description = "Every stored item", body = Vec<Item>),
        (status = 500, description = "Storage failure", body = ApiResponse)
    )
)]
pub async fn all_items_handler(State(state): State<AppState>) -> Result<Json<Vec<Item>>, ApiError> {
    let service = state.service.lock().await;
    Ok(Json(service.list().await?))
}

#[utoipa::path(
    get,
    path = "/item/{barcode}",
    params(
        ("barcode" = u64, Path, description = "Item barcode")
    ),
    responses(
        (status = 200, description = "The item", body = Item),
        (status = 400, description = "Barcode is not numeric", body = ApiResponse),
        (status = 404, description = "No such item", body = ApiResponse)
    )
)]
pub async fn item_handler(
    State(state): State<AppState>,
    Path(barcode): Path<String>,
) -> Result<Json<Item>, ApiError> {
    let barcode = parse_barcode(&barcode)?;
    let service = state.service.lock().await;
    Ok(Json(service.get(barcode).await?))
}

#[utoipa::path(
    post,
    path = "/modify",
    request_body = ItemDraft,
    responses(
        (status = 200, description = "Name and location replaced", body = Item),
        (status = 400, description = "Malformed body or barcode", body = ApiResponse),
        (status = 404, description = "No such item", body = ApiResponse),
        (status = 413, description = "Body too large", body = ApiResponse)
    )
)]
pub async fn modify_item_handler(
    State(state): State<AppState>,
    request: Result<Json<ItemDraft>, JsonRejection>,
) -> Result<Json<Item>, ApiError> {
    let Json(draft) = request.map_err(|e| json_rejection(e, DRAFT_SHAPE))?;
    let mut service = state.service.lock().await;
    Ok(Json(service.modify(draft).await?))
}

#[utoipa::path(
    delete,
    path = "/delete/{barcode}",
    params(
        ("barcode" = u64, Path, description = "Item barcode")
    ),
    responses(
        (status = 200, description = "The removed item", body = Item),
        (status = 400, description = "Barcode is not numeric", body = ApiResponse),
        (status = 404, description = "No such item", body = ApiResponse)
    )
)]
pub async fn delete_item_handler(
    State(state): State<AppState>,
    Path(barcode): Path<String>,
) -> Result<Json<Item>, ApiError> {
    let barcode = parse_barcode(&barcode)?;
    let mut service = state.service.lock().await;
    Ok(Json(service.delete(barcode).await?))
}

#[utoipa::path(
    post,
    path = "/log/{barcode}",
    params(
        ("barcode" = u64, Path, description = "Item barcode")
    ),
    responses(
        (status = 200, description = "Item with refreshed last_seen", body = Item),
        (status = 400, description = "Barcode is not numeric", body = ApiResponse),
        (status = 404, description = "No such item", body = ApiResponse)
    )
)]
pub async fn log_item_handler(
    State(state): State<AppState>,
    Path(barcode): Path<String>,
) -> Result<Json<Item>, ApiError> {
    let barcode = parse_barcode(&barcode)?;
    let mut service = state.service.lock().await;
    Ok(Json(service.log(barcode).await?))
}
