pub mod app;
pub mod client;
pub mod domain;
pub mod infra;
pub mod storage;
pub mod transport;

// Convenience re-exports (keeps call-sites clean)
pub use app::inventory_service::InventoryService;
pub use domain::item::{Barcode, InventoryError, Item, ItemDraft, ItemRepository};
pub use storage::items::{InMemoryItemStore, PostgresItemStore};
