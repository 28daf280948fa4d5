//! In-process item store. Contents live as long as the server process.

use crate::domain::item::{Barcode, InventoryError, Item, ItemDraft, ItemRepository, Result, Timestamp};
use async_trait::async_trait;
use indexmap::map::Entry;
use indexmap::IndexMap;

/// Items keyed by barcode, listed in insertion order.
#[derive(Default)]
pub struct InMemoryItemStore {
    items: IndexMap<Barcode, Item>,
}

impl InMemoryItemStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn get_mut(&mut self, barcode: Barcode) -> Result<&mut Item> {
        self.items
            .get_mut(&barcode)
            .ok_or(InventoryError::NotFound(barcode))
    }
}

#[async_trait]
impl ItemRepository for InMemoryItemStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn insert(&mut self, item: Item) -> Result<Item> {
        match self.items.entry(item.barcode) {
            Entry::Occupied(_) => Err(InventoryError::DuplicateKey(item.barcode)),
            Entry::Vacant(slot) => Ok(slot.insert(item).clone()),
        }
    }

    async fn fetch(&self, barcode: Barcode) -> Result<Item> {
        self.items
            .get(&barcode)
            .cloned()
            .ok_or(InventoryError::NotFound(barcode))
    }

    async fn fetch_all(&self) -> Result<Vec<Item>> {
        Ok(self.items.values().cloned().collect())
    }

    async fn update_details(&mut self, draft: ItemDraft) -> Result<Item> {
        let item = self.get_mut(draft.barcode)?;
        item.name = draft.name;
        item.location = draft.location;
        Ok(item.clone())
    }

    async fn touch(&mut self, barcode: Barcode, at: Timestamp) -> Result<Item> {
        let item = self.get_mut(barcode)?;
        item.last_seen = Some(at);
        Ok(item.clone())
    }

    async fn remove(&mut self, barcode: Barcode) -> Result<Item> {
        // shift_remove keeps the remaining items in insertion order
        self.items
            .shift_remove(&barcode)
            .ok_or(InventoryError::NotFound(barcode))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str, barcode: Barcode, location: &str) -> Item {
        Item::from_draft(ItemDraft::new(name, barcode, location))
    }

    #[tokio::test]
    async fn duplicate_insert_keeps_original() {
        let mut store = InMemoryItemStore::new();
        store.insert(item("drill", 7, "shelf")).await.unwrap();

        let err = store.insert(item("saw", 7, "bench")).await.unwrap_err();
        assert!(matches!(err, InventoryError::DuplicateKey(7)));

        let kept = store.fetch(7).await.unwrap();
        assert_eq!(kept.name, "drill");
        assert_eq!(kept.location, "shelf");
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn listing_follows_insertion_order() {
        let mut store = InMemoryItemStore::new();
        for barcode in [30, 10, 20] {
            store.insert(item("x", barcode, "y")).await.unwrap();
        }
        store.remove(10).await.unwrap();
        store.insert(item("x", 10, "y")).await.unwrap();

        let barcodes: Vec<Barcode> = store
            .fetch_all()
            .await
            .unwrap()
            .iter()
            .map(|i| i.barcode)
            .collect();
        assert_eq!(barcodes, vec![30, 20, 10]);
    }

    #[tokio::test]
    async fn removals_keep_remaining_order() {
        let mut store = InMemoryItemStore::new();
        for barcode in 1..=6 {
            store.insert(item("x", barcode, "y")).await.unwrap();
        }
        for barcode in [1, 4, 6] {
            store.remove(barcode).await.unwrap();
        }

        let items = store.fetch_all().await.unwrap();
        let barcodes: Vec<Barcode> = items.iter().map(|i| i.barcode).collect();
        assert_eq!(barcodes, vec![2, 3, 5]);
        assert_eq!(items.len(), store.len());
    }

    #[tokio::test]
    async fn touch_and_update_are_independent() {
        let mut store = InMemoryItemStore::new();
        store.insert(item("a", 1, "b")).await.unwrap();

        store.touch(1, 1_700_000_000).await.unwrap();
        let updated = store
            .update_details(ItemDraft::new("c", 1, "d"))
            .await
            .unwrap();

        assert_eq!(updated.name, "c");
        assert_eq!(updated.location, "d");
        assert_eq!(updated.last_seen, Some(1_700_000_000));
    }

    #[tokio::test]
    async fn missing_barcode_is_not_found_everywhere() {
        let mut store = InMemoryItemStore::new();
        assert!(matches!(store.fetch(5).await, Err(InventoryError::NotFound(5))));
        assert!(matches!(
            store.update_details(ItemDraft::new("a", 5, "b")).await,
            Err(InventoryError::NotFound(5))
        ));
        assert!(matches!(store.touch(5, 0).await, Err(InventoryError::NotFound(5))));
        assert!(matches!(store.remove(5).await, Err(InventoryError::NotFound(5))));
        assert!(store.is_empty());
    }
}
