//! Application bootstrap
//!
//! Wires the record store, cache service and coordinator together with an
//! explicit lifecycle: construction order, handle injection and shutdown all
//! live here, never inside the coordinator.

mod bootstrap;
mod config;
mod error;

pub use bootstrap::TodoApp;
pub use config::AppConfig;
pub use error::AppError;
