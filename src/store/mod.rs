//! Key-value persistence for transactions, settings, recurring items and trips
//!
//! Every document is a JSON string stored under a fixed key. A missing key
//! reads as an empty list (or default settings).

mod file;
#[cfg(test)]
mod memory;
mod records;

pub use file::FileStore;
#[cfg(test)]
pub use memory::MemoryStore;
pub use records::*;

use crate::core::{ConfigError, TransactionError, TripError};
use std::path::PathBuf;

pub const TRANSACTIONS_KEY: &str = "transactions";
pub const TAX_SETTINGS_KEY: &str = "tax_settings";
pub const RECURRING_ITEMS_KEY: &str = "recurring_items";
pub const MILEAGE_TRIPS_KEY: &str = "mileage_trips";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid document '{key}': {source}")]
    Json {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Transaction(#[from] TransactionError),
    #[error(transparent)]
    Trip(#[from] TripError),
    #[error("a record with id {0} already exists")]
    DuplicateId(String),
}

/// Minimal string key-value store
pub trait Store {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
    fn delete(&mut self, key: &str) -> Result<(), StoreError>;
}
