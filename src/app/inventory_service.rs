//! The Inventory Service.
//!
//! This module sits between the HTTP layer and the item storage.
//! It is responsible for:
//! 1.  Choosing the storage backend (in-memory or PostgreSQL) at startup.
//! 2.  Sanitizing client-supplied text before it is stored.
//! 3.  Supplying the wall-clock time for `log`.

use crate::domain::item::{Barcode, Item, ItemDraft, ItemRepository, Result, Timestamp};
use crate::infra::config;
use crate::storage::items::{InMemoryItemStore, PostgresItemStore};
use chrono::Utc;
use tracing::{debug, info};

/// Owns the single repository instance of the process.
pub struct InventoryService {
    repo: Box<dyn ItemRepository>,
}

impl InventoryService {
    pub fn new(repo: Box<dyn ItemRepository>) -> Self {
        Self { repo }
    }

    /// Service over a fresh in-memory store.
    pub fn in_memory() -> Self {
        Self::new(Box::new(InMemoryItemStore::new()))
    }

    /// Builds the service from the environment: PostgreSQL when `DATABASE_URL`
    /// is set, in-memory otherwise.
    pub async fn from_env() -> anyhow::Result<Self> {
        dotenv::dotenv().ok();
        let service = match config::database_url() {
            Some(url) => {
                let store =
                    PostgresItemStore::connect(&url, config::database_max_connections()).await?;
                Self::new(Box::new(store))
            }
            None => Self::in_memory(),
        };
        info!(backend = service.backend(), "Inventory storage ready");
        Ok(service)
    }

    pub fn backend(&self) -> &'static str {
        self.repo.backend()
    }

    pub async fn ping(&self) -> Result<()> {
        self.repo.ping().await
    }

    pub async fn create(&mut self, draft: ItemDraft) -> Result<Item> {
        let item = self.repo.insert(Item::from_draft(draft.sanitized())).await?;
        info!(barcode = item.barcode, "Item created");
        Ok(item)
    }

    pub async fn get(&self, barcode: Barcode) -> Result<Item> {
        self.repo.fetch(barcode).await
    }

    pub async fn list(&self) -> Result<Vec<Item>> {
        let items = self.repo.fetch_all().await?;
        debug!(count = items.len(), "Listed items");
        Ok(items)
    }

    pub async fn modify(&mut self, draft: ItemDraft) -> Result<Item> {
        let item = self.repo.update_details(draft.sanitized()).await?;
        info!(barcode = item.barcode, "Item modified");
        Ok(item)
    }

    pub async fn delete(&mut self, barcode: Barcode) -> Result<Item> {
        let item = self.repo.remove(barcode).await?;
        info!(barcode, "Item deleted");
        Ok(item)
    }

    /// Records that the item was just seen.
    pub async fn log(&mut self, barcode: Barcode) -> Result<Item> {
        let item = self.repo.touch(barcode, now()).await?;
        info!(barcode, last_seen = item.last_seen, "Item logged");
        Ok(item)
    }
}

fn now() -> Timestamp {
    Utc::now().timestamp()
}
