//! Record store abstraction
//!
//! The record store is the authoritative, durable home of todo items. The
//! cache layer holds disposable projections of it; whenever the two disagree,
//! the record store wins.

mod memory;
mod traits;

pub use memory::MemoryRecordStore;
pub use traits::{RecordStore, StoreError};
