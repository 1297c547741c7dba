pub mod cli;
pub mod cli_handlers;
pub mod config;
pub mod core;
pub mod db;
pub mod error;
pub mod models;
pub mod server;

pub use error::{CounterError, Result};
pub use models::*;
