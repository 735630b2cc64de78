//! Record store trait.
//!
//! The trait is intentionally small: the five operations the coordinator
//! needs, each atomic and immediately consistent for reads issued after it
//! returns. Implementations over an external database plug in here without
//! the coordinator changing.
//!
//! # Dyn Compatibility
//!
//! Like the cache trait, async methods return `Pin<Box<dyn Future>>` so the
//! coordinator can hold an `Arc<dyn RecordStore>` and backends can be swapped
//! at construction time.

use thiserror::Error;

use crate::cache::BoxFuture;
use crate::todo::{Todo, TodoDraft, TodoFields, TodoId};

/// Errors surfaced by the record store.
///
/// Store errors are fatal to the operation that encountered them; the
/// coordinator propagates them unchanged.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store could not be reached or did not respond.
    #[error("record store unavailable: {0}")]
    Unavailable(String),

    /// The store refused the operation (constraint violation, unknown id on
    /// update, and similar).
    #[error("record store rejected operation: {0}")]
    Rejected(String),
}

/// Authoritative storage for todo items.
///
/// Each operation is atomic, and a read issued after a write returns sees
/// that write. Listing order is insertion order, which for the bundled
/// in-memory store coincides with ascending id.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`; a single handle is shared across
/// all concurrent operations.
pub trait RecordStore: Send + Sync {
    /// Persist a new todo, assigning its id and timestamps.
    fn create(&self, draft: TodoDraft) -> BoxFuture<'_, Result<Todo, StoreError>>;

    /// Fetch a todo by id.
    ///
    /// Returns `Ok(None)` when the id is unknown; `Err` is reserved for
    /// store failures.
    fn find_by_id(&self, id: TodoId) -> BoxFuture<'_, Result<Option<Todo>, StoreError>>;

    /// List every todo in insertion order.
    fn list_all(&self) -> BoxFuture<'_, Result<Vec<Todo>, StoreError>>;

    /// Replace a todo's fields and refresh its `updated_at`.
    ///
    /// The caller supplies the full merged field set; partial-update
    /// semantics live in the coordinator. An unknown id is a rejection,
    /// not a silent no-op.
    fn update(&self, id: TodoId, fields: TodoFields) -> BoxFuture<'_, Result<Todo, StoreError>>;

    /// Delete a todo by id.
    ///
    /// Returns `Ok(true)` when a record was removed, `Ok(false)` when the
    /// id was already absent.
    fn delete(&self, id: TodoId) -> BoxFuture<'_, Result<bool, StoreError>>;
}
