mod cart;
mod csv_utils;
mod dto;
mod error;
mod provider;
mod runner;
mod store;

pub mod config;
pub mod logging;
pub mod stores;

pub use config::{CartConfig, PersistMode};
pub use dto::{CartOperation, CartRow, LineItem, NewLineItem, OperationType};
pub use error::Error;
pub use provider::{CartHandle, CartProvider};
pub use runner::{run, Command};
pub use store::CartStore;
