use crate::app::inventory_service::InventoryService;
use crate::domain::item::{Barcode, InventoryError};
use crate::infra::config::MAX_BODY_BYTES;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::Value as JsonValue;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;
use utoipa::ToSchema;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<Mutex<InventoryService>>,
}

impl AppState {
    pub fn new(service: InventoryService) -> Self {
        Self {
            service: Arc::new(Mutex::new(service)),
        }
    }
}

/// Envelope for error and health responses. Successful item calls return the bare item JSON.
#[derive(Serialize, Debug, ToSchema)]
pub struct ApiResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Object)]
    pub data: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Inventory(#[from] InventoryError),

    #[error("Request body exceeds {0} bytes")]
    PayloadTooLarge(usize),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Inventory(InventoryError::DuplicateKey(_)) => StatusCode::CONFLICT,
            ApiError::Inventory(InventoryError::NotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::Inventory(InventoryError::InvalidInput(_)) => StatusCode::BAD_REQUEST,
            ApiError::Inventory(InventoryError::Storage(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            ApiError::Inventory(e) => e.code(),
            ApiError::PayloadTooLarge(_) => "PAYLOAD_TOO_LARGE",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("{}", self);
        }
        (
            status,
            Json(ApiResponse {
                success: false,
                data: Some(serde_json::json!({ "code": self.code() })),
                error: Some(self.to_string()),
            }),
        )
            .into_response()
    }
}

/// Turns an axum JSON rejection into the matching `ApiError`.
pub fn json_rejection(err: JsonRejection, expected: &str) -> ApiError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return ApiError::PayloadTooLarge(MAX_BODY_BYTES);
    }
    ApiError::Inventory(InventoryError::InvalidInput(format!(
        "Invalid JSON body: {} (expected: {})",
        err.body_text(),
        expected
    )))
}

/// Barcodes in paths must be plain decimal digits; no sign, no whitespace.
pub fn parse_barcode(raw: &str) -> Result<Barcode, ApiError> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(InventoryError::InvalidInput(format!("barcode {:?} is not numeric", raw)).into());
    }
    raw.parse::<Barcode>().map_err(|_| {
        InventoryError::InvalidInput(format!("barcode {} is out of range", raw)).into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_decimal_barcodes() {
        assert_eq!(parse_barcode("42").unwrap(), 42);
        assert_eq!(parse_barcode("007").unwrap(), 7);
    }

    #[test]
    fn rejects_non_numeric_barcodes() {
        for raw in ["", "abc", "-1", "+1", " 1", "1.5", "99999999999999999999999"] {
            let err = parse_barcode(raw).unwrap_err();
            assert_eq!(err.status(), StatusCode::BAD_REQUEST, "input {:?}", raw);
        }
    }

    #[test]
    fn error_statuses_follow_error_kind() {
        assert_eq!(
            ApiError::from(InventoryError::DuplicateKey(1)).status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ApiError::from(InventoryError::NotFound(1)).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(ApiError::PayloadTooLarge(10).code(), "PAYLOAD_TOO_LARGE");
    }
}
