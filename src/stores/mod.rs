//! Storage collaborator for the cart. Provides:
//! - The async key-value contract the cart persists through ([`KeyValueStorage`])
//! - An in-process backend ([`MemoryStorage`])
//! - A JSON file backend that survives restarts ([`JsonFileStorage`])
//!
//! Values are opaque strings; the cart owns the encoding.

use async_trait::async_trait;

use crate::Error;

mod json_file;
mod memory;

pub use json_file::JsonFileStorage;
pub use memory::MemoryStorage;

#[async_trait]
pub trait KeyValueStorage: Send + Sync {
    /// Reads the value under `key`, `None` if nothing was ever stored.
    async fn get_item(&self, key: &str) -> Result<Option<String>, Error>;

    /// Stores `value` under `key`, replacing any previous value.
    async fn set_item(&self, key: &str, value: String) -> Result<(), Error>;
}
