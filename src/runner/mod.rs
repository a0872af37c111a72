//! The runner drives a mounted cart from a CSV script of operations: it
//! streams the script, applies each row to the cart, waits for the cart's
//! storage writes, and writes the final cart to a writer.
//!
mod async_runner;
mod command;

pub use async_runner::run;
pub use command::Command;
