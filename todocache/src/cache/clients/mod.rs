//! Domain-specific cache clients.
//!
//! Clients wrap the generic `Cache` with key translation, serialization and
//! the degrade-on-error policy, so callers never touch raw keys or bytes.

mod todo;

pub use todo::{TodoCacheClient, COLLECTION_KEY};
