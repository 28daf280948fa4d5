//! Domain model for tracked inventory items.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub mod error;
pub mod sanitize;

pub use error::InventoryError;
pub use sanitize::sanitize_text;

/// Unique, immutable identifier printed on an item's label.
pub type Barcode = u64;

/// Seconds since the Unix epoch.
pub type Timestamp = i64;

/// A single tracked item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Item {
    pub name: String,
    #[schema(value_type = u64)]
    pub barcode: Barcode,
    pub location: String,
    /// Epoch seconds of the last `log` call, `null` if the item was never logged.
    #[schema(value_type = Option<i64>)]
    pub last_seen: Option<Timestamp>,
}

impl Item {
    /// A freshly created item has never been seen.
    pub fn from_draft(draft: ItemDraft) -> Self {
        Self {
            name: draft.name,
            barcode: draft.barcode,
            location: draft.location,
            last_seen: None,
        }
    }
}

/// Client-supplied fields for `/new` and `/modify`.
///
/// Carries no `last_seen`; only the server sets it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ItemDraft {
    pub name: String,
    #[schema(value_type = u64)]
    pub barcode: Barcode,
    pub location: String,
}

impl ItemDraft {
    pub fn new(name: impl Into<String>, barcode: Barcode, location: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            barcode,
            location: location.into(),
        }
    }

    /// Returns the draft with `name` and `location` passed through [`sanitize_text`].
    pub fn sanitized(self) -> Self {
        Self {
            name: sanitize_text(&self.name),
            barcode: self.barcode,
            location: sanitize_text(&self.location),
        }
    }
}

pub type Result<T> = std::result::Result<T, InventoryError>;

/// Storage contract for items keyed by barcode.
///
/// Implementations must keep barcodes unique and must never partially apply
/// a failed call. The caller serializes access, so `&mut self` methods are
/// never run concurrently.
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// Short backend name used in startup logs.
    fn backend(&self) -> &'static str;

    /// Reachability check for the health endpoint.
    async fn ping(&self) -> Result<()> {
        Ok(())
    }

    /// Inserts a new item. Fails with `DuplicateKey` if the barcode is taken.
    async fn insert(&mut self, item: Item) -> Result<Item>;

    /// Looks up one item.
    async fn fetch(&self, barcode: Barcode) -> Result<Item>;

    /// Snapshot of every stored item.
    async fn fetch_all(&self) -> Result<Vec<Item>>;

    /// Replaces `name` and `location`, leaving `last_seen` untouched.
    async fn update_details(&mut self, draft: ItemDraft) -> Result<Item>;

    /// Sets `last_seen` to `at`.
    async fn touch(&mut self, barcode: Barcode, at: Timestamp) -> Result<Item>;

    /// Removes the item and hands it back.
    async fn remove(&mut self, barcode: Barcode) -> Result<Item>;
}
