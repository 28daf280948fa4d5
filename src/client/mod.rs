//! HTTP client for the inventory API, used by the `inventory_cli` binary.

use crate::domain::item::{Barcode, Item, ItemDraft};
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;

pub mod command;
pub mod display;

pub use command::{Command, CommandError, LocationShortcuts};
pub use display::format_item;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Server returned {status}: {message}")]
    Api { status: StatusCode, message: String },
}

impl ClientError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::Api { status, .. } if *status == StatusCode::NOT_FOUND)
    }
}

/// Adds `http://` when the address has no scheme and drops trailing slashes.
pub fn normalize_server_addr(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("http://{}", trimmed)
    }
}

#[derive(Clone)]
pub struct InventoryClient {
    http: reqwest::Client,
    base_url: String,
}

impl InventoryClient {
    pub fn new(server_addr: &str) -> Self {
        Self::with_http(reqwest::Client::new(), server_addr)
    }

    pub fn with_http(http: reqwest::Client, server_addr: &str) -> Self {
        Self {
            http,
            base_url: normalize_server_addr(server_addr),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http.request(method, format!("{}{}", self.base_url, path))
    }

    /// Succeeds when the server answers `/health` with a 2xx status.
    pub async fn health(&self) -> Result<(), ClientError> {
        let res = self.request(Method::GET, "/health").send().await?;
        check(res).await.map(|_| ())
    }

    pub async fn create(&self, draft: &ItemDraft) -> Result<Item, ClientError> {
        let res = self.request(Method::POST, "/new").json(draft).send().await?;
        decode(res).await
    }

    pub async fn modify(&self, draft: &ItemDraft) -> Result<Item, ClientError> {
        let res = self.request(Method::POST, "/modify").json(draft).send().await?;
        decode(res).await
    }

    pub async fn delete(&self, barcode: Barcode) -> Result<Item, ClientError> {
        let res = self
            .request(Method::DELETE, &format!("/delete/{}", barcode))
            .send()
            .await?;
        decode(res).await
    }

    pub async fn log(&self, barcode: Barcode) -> Result<Item, ClientError> {
        let res = self
            .request(Method::POST, &format!("/log/{}", barcode))
            .send()
            .await?;
        decode(res).await
    }

    pub async fn get(&self, barcode: Barcode) -> Result<Item, ClientError> {
        let res = self
            .request(Method::GET, &format!("/item/{}", barcode))
            .send()
            .await?;
        decode(res).await
    }

    pub async fn all(&self) -> Result<Vec<Item>, ClientError> {
        let res = self.request(Method::GET, "/all").send().await?;
        decode(res).await
    }
}

async fn check(res: Response) -> Result<Response, ClientError> {
    let status = res.status();
    if status.is_success() {
        return Ok(res);
    }
    let body = res.text().await.unwrap_or_default();
    let message = serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_string))
        .unwrap_or(body);
    Err(ClientError::Api { status, message })
}

async fn decode<T: DeserializeOwned>(res: Response) -> Result<T, ClientError> {
    Ok(check(res).await?.json::<T>().await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_host_gets_http_scheme() {
        assert_eq!(normalize_server_addr("192.168.1.4:3000\n"), "http://192.168.1.4:3000");
    }

    #[test]
    fn existing_scheme_is_kept() {
        assert_eq!(normalize_server_addr("https://inv.local/"), "https://inv.local");
        assert_eq!(normalize_server_addr("http://localhost:3000"), "http://localhost:3000");
    }

    #[test]
    fn client_uses_normalized_base() {
        let client = InventoryClient::new("localhost:3000/");
        assert_eq!(client.base_url(), "http://localhost:3000");
    }
}
