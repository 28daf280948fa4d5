//! Persistent item store implementation using PostgreSQL.

use crate::domain::item::{Barcode, InventoryError, Item, ItemDraft, ItemRepository, Result, Timestamp};
use async_trait::async_trait;
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};

const ITEM_COLUMNS: &str = "name, barcode, location, last_seen";

/// Item store backed by the `items` table.
#[derive(Clone)]
pub struct PostgresItemStore {
    pool: PgPool,
}

impl PostgresItemStore {
    /// Connects to `database_url` and creates the `items` table if it is missing.
    pub async fn connect(database_url: &str, max_connections: u32) -> anyhow::Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        Self::new_with_pool(pool).await
    }

    pub async fn new_with_pool(pool: PgPool) -> anyhow::Result<Self> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS items (
                barcode BIGINT PRIMARY KEY,
                name TEXT NOT NULL,
                location TEXT NOT NULL,
                last_seen BIGINT NULL
            )",
        )
        .execute(&pool)
        .await?;
        Ok(Self { pool })
    }
}

/// BIGINT is signed, so the upper half of the `u64` range cannot be stored.
fn to_db_barcode(barcode: Barcode) -> Result<i64> {
    i64::try_from(barcode).map_err(|_| {
        InventoryError::InvalidInput(format!(
            "barcode {} exceeds the storable maximum {}",
            barcode,
            i64::MAX
        ))
    })
}

fn row_to_item(row: &PgRow) -> std::result::Result<Item, sqlx::Error> {
    let barcode: i64 = row.try_get("barcode")?;
    Ok(Item {
        name: row.try_get("name")?,
        barcode: Barcode::try_from(barcode).map_err(|e| sqlx::Error::Decode(Box::new(e)))?,
        location: row.try_get("location")?,
        last_seen: row.try_get("last_seen")?,
    })
}

#[async_trait]
impl ItemRepository for PostgresItemStore {
    fn backend(&self) -> &'static str {
        "postgres"
    }

    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn insert(&mut self, item: Item) -> Result<Item> {
        let barcode = to_db_barcode(item.barcode)?;
        let sql = format!(
            "INSERT INTO items ({}) VALUES ($1, $2, $3, $4) RETURNING {}",
            ITEM_COLUMNS, ITEM_COLUMNS
        );
        let row = sqlx::query(&sql)
            .bind(&item.name)
            .bind(barcode)
            .bind(&item.location)
            .bind(item.last_seen)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                    InventoryError::DuplicateKey(item.barcode)
                }
                other => InventoryError::Storage(other),
            })?;
        Ok(row_to_item(&row)?)
    }

    async fn fetch(&self, barcode: Barcode) -> Result<Item> {
        let sql = format!("SELECT {} FROM items WHERE barcode = $1", ITEM_COLUMNS);
        let row = sqlx::query(&sql)
            .bind(to_db_barcode(barcode)?)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(InventoryError::NotFound(barcode))?;
        Ok(row_to_item(&row)?)
    }

    async fn fetch_all(&self) -> Result<Vec<Item>> {
        let sql = format!("SELECT {} FROM items ORDER BY barcode", ITEM_COLUMNS);
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;
        let mut items = Vec::with_capacity(rows.len());
        for row in &rows {
            items.push(row_to_item(row)?);
        }
        Ok(items)
    }

    async fn update_details(&mut self, draft: ItemDraft) -> Result<Item> {
        let sql = format!(
            "UPDATE items SET name = $1, location = $2 WHERE barcode = $3 RETURNING {}",
            ITEM_COLUMNS
        );
        let row = sqlx::query(&sql)
            .bind(&draft.name)
            .bind(&draft.location)
            .bind(to_db_barcode(draft.barcode)?)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(InventoryError::NotFound(draft.barcode))?;
        Ok(row_to_item(&row)?)
    }

    async fn touch(&mut self, barcode: Barcode, at: Timestamp) -> Result<Item> {
        let sql = format!(
            "UPDATE items SET last_seen = $1 WHERE barcode = $2 RETURNING {}",
            ITEM_COLUMNS
        );
        let row = sqlx::query(&sql)
            .bind(at)
            .bind(to_db_barcode(barcode)?)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(InventoryError::NotFound(barcode))?;
        Ok(row_to_item(&row)?)
    }

    async fn remove(&mut self, barcode: Barcode) -> Result<Item> {
        let sql = format!("DELETE FROM items WHERE barcode = $1 RETURNING {}", ITEM_COLUMNS);
        let row = sqlx::query(&sql)
            .bind(to_db_barcode(barcode)?)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(InventoryError::NotFound(barcode))?;
        Ok(row_to_item(&row)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn barcodes_above_bigint_range_are_rejected() {
        assert_eq!(to_db_barcode(42).unwrap(), 42);
        assert_eq!(to_db_barcode(i64::MAX as u64).unwrap(), i64::MAX);
        assert!(matches!(
            to_db_barcode(u64::MAX),
            Err(InventoryError::InvalidInput(_))
        ));
    }
}
