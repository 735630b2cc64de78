//! Cache-aside coordinator
//!
//! `TodoCoordinator` mediates every read and write between callers and the
//! two stores. The record store is authoritative; the cache is a best-effort
//! mirror the coordinator populates, patches and invalidates around each
//! operation.
//!
//! # Failure Contract
//!
//! Store errors abort the operation and surface as [`TodoError::Store`],
//! always before any cache mutation. Cache failures never surface: the cache
//! client logs them and the coordinator continues against the store alone.
//!
//! # Consistency
//!
//! Operations are multi-step and not atomic across steps. Two concurrent
//! writers to the same id can leave the cache reflecting the older write
//! until the next refresh (final-writer-wins on the cache; the store
//! serializes conflicting writes per key and stays correct). That window is
//! accepted; existence checks for update/delete always consult the store so
//! a deleted item can never be revived from a stale cache entry.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, warn};

use crate::cache::clients::TodoCacheClient;
use crate::store::{RecordStore, StoreError};
use crate::todo::{Todo, TodoDraft, TodoId, TodoPatch};

/// Errors surfaced by coordinator operations.
///
/// Cache failures never appear here; they are degraded inside the cache
/// client.
#[derive(Debug, Error)]
pub enum TodoError {
    /// The item does not exist in the record store.
    #[error("todo not found: {0}")]
    NotFound(TodoId),

    /// The record store failed; the operation was aborted.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Coordinates the record store and the cache per the cache-aside policy.
///
/// Holds no mutable state of its own; both handles are shared and the
/// coordinator is safe to use from any number of concurrent tasks.
pub struct TodoCoordinator {
    /// Authoritative store.
    store: Arc<dyn RecordStore>,

    /// Best-effort cache client.
    cache: TodoCacheClient,
}

impl TodoCoordinator {
    /// Build a coordinator over injected store and cache handles.
    pub fn new(store: Arc<dyn RecordStore>, cache: TodoCacheClient) -> Self {
        Self { store, cache }
    }

    /// Create a todo.
    ///
    /// The item is persisted first; only a committed item is mirrored into
    /// the cache. The collection entry is refreshed from a full store
    /// re-read rather than patched, so its contents and order always match
    /// the store exactly. If that re-read fails the collection entry is
    /// invalidated instead of left stale.
    pub async fn create(&self, draft: TodoDraft) -> Result<Todo, TodoError> {
        let todo = self.store.create(draft).await?;
        debug!(id = %todo.id, "Todo created");

        self.cache.set_item(&todo).await;
        self.refresh_collection().await;

        Ok(todo)
    }

    /// Fetch a todo by id.
    ///
    /// Lookup order: cached collection (point lookup within it), then the
    /// single-item entry, then the store. A store hit repopulates the
    /// single-item entry.
    pub async fn read_by_id(&self, id: TodoId) -> Result<Todo, TodoError> {
        if let Some(todos) = self.cache.get_list().await {
            if let Some(todo) = todos.into_iter().find(|t| t.id == id) {
                return Ok(todo);
            }
            // The collection entry may predate this item; fall through.
        }

        if let Some(todo) = self.cache.get_item(id).await {
            return Ok(todo);
        }

        let todo = self
            .store
            .find_by_id(id)
            .await?
            .ok_or(TodoError::NotFound(id))?;

        self.cache.set_item(&todo).await;
        Ok(todo)
    }

    /// Fetch every todo in store listing order.
    pub async fn read_all(&self) -> Result<Vec<Todo>, TodoError> {
        if let Some(todos) = self.cache.get_list().await {
            return Ok(todos);
        }

        let todos = self.store.list_all().await?;
        self.cache.set_list(&todos).await;
        Ok(todos)
    }

    /// Apply a partial update to a todo.
    ///
    /// Existence is checked against the store, never the cache: a stale
    /// cache entry must not revive a deleted item. Absent patch fields keep
    /// their previous values. The cached collection is patched in place when
    /// present; when it has diverged (id missing from it) it is invalidated,
    /// and when absent it stays absent until the next full read.
    pub async fn update(&self, id: TodoId, patch: TodoPatch) -> Result<Todo, TodoError> {
        let current = self
            .store
            .find_by_id(id)
            .await?
            .ok_or(TodoError::NotFound(id))?;

        let fields = patch.apply_to(&current);
        let updated = self.store.update(id, fields).await?;
        debug!(id = %id, "Todo updated");

        self.cache.set_item(&updated).await;
        self.patch_collection(&updated).await;

        Ok(updated)
    }

    /// Delete a todo.
    ///
    /// Existence is checked against the store. Both cache projections are
    /// cleaned up: the single-item entry is removed unconditionally, and the
    /// cached collection has the id removed in place; when the id
    /// cannot be located in it, the whole entry is invalidated rather than
    /// left one-too-many.
    pub async fn delete(&self, id: TodoId) -> Result<(), TodoError> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or(TodoError::NotFound(id))?;

        let removed = self.store.delete(id).await?;
        debug!(id = %id, removed, "Todo deleted");

        self.cache.delete_item(id).await;
        self.remove_from_collection(id).await;

        if removed {
            Ok(())
        } else {
            // Lost a race with a concurrent delete; the caches are clean
            // either way.
            Err(TodoError::NotFound(id))
        }
    }

    /// Overwrite the collection entry from a fresh store read, or
    /// invalidate it when the read fails.
    async fn refresh_collection(&self) {
        match self.store.list_all().await {
            Ok(todos) => self.cache.set_list(&todos).await,
            Err(e) => {
                warn!(error = %e, "Collection refresh read failed; invalidating collection cache");
                self.cache.delete_list().await;
            }
        }
    }

    /// Replace the matching item inside the cached collection, if cached.
    async fn patch_collection(&self, updated: &Todo) {
        let Some(mut todos) = self.cache.get_list().await else {
            return;
        };

        match todos.iter_mut().find(|t| t.id == updated.id) {
            Some(slot) => {
                *slot = updated.clone();
                self.cache.set_list(&todos).await;
            }
            None => {
                warn!(id = %updated.id, "Cached collection diverged on update; invalidating");
                self.cache.delete_list().await;
            }
        }
    }

    /// Remove the matching id from the cached collection, if cached.
    async fn remove_from_collection(&self, id: TodoId) {
        let Some(mut todos) = self.cache.get_list().await else {
            return;
        };

        let before = todos.len();
        todos.retain(|t| t.id != id);

        if todos.len() == before {
            warn!(id = %id, "Cached collection diverged on delete; invalidating");
            self.cache.delete_list().await;
        } else {
            self.cache.set_list(&todos).await;
        }
    }
}
