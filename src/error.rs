//! Errors for the cart component.
//!
//! Covers:
//! - Usage errors (the cart was requested outside a mounted provider)
//! - Storage collaborator failures (I/O, decode)
//! - Script errors raised by the runner (CSV, invalid operations)
//!
//! Storage failures that happen inside detached persistence tasks are logged
//! and dropped; they never surface through the operations.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("useCart must be used within a CartProvider")]
    OutsideProvider,
    #[error("storage error: {0}")]
    Storage(String),
    #[error("invalid operation: {0}")]
    InvalidOperation(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("csv error: {0}")]
    CsvAsync(#[from] csv_async::Error),
    #[error("task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl Error {
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }
}
