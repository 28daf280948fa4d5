pub mod memory;
pub mod postgres;

pub use memory::InMemoryItemStore;
pub use postgres::PostgresItemStore;
