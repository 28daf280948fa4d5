use crate::domain::item::Barcode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum InventoryError {
    #[error("Item with barcode {0} already exists")]
    DuplicateKey(Barcode),

    #[error("Item with barcode {0} not found")]
    NotFound(Barcode),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Storage error: {0}")]
    Storage(#[from] sqlx::Error),
}

impl InventoryError {
    /// Stable machine-readable code placed in error response bodies.
    pub fn code(&self) -> &'static str {
        match self {
            InventoryError::DuplicateKey(_) => "DUPLICATE_KEY",
            InventoryError::NotFound(_) => "NOT_FOUND",
            InventoryError::InvalidInput(_) => "INVALID_INPUT",
            InventoryError::Storage(_) => "STORAGE",
        }
    }
}
