//! In-memory record store.
//!
//! A `BTreeMap` keyed by raw id behind a `tokio::sync::RwLock`, with ids
//! handed out by an atomic counter. Iteration order of the map is ascending
//! id, which is also insertion order, so `list_all` needs no extra
//! bookkeeping to satisfy the ordering contract.
//!
//! This backend is the store of record for the demo binary and for tests;
//! a database-backed implementation would replace it behind the same trait.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;
use tokio::sync::RwLock;

use crate::cache::BoxFuture;
use crate::todo::{Todo, TodoDraft, TodoFields, TodoId};

use super::traits::{RecordStore, StoreError};

/// In-memory implementation of [`RecordStore`].
pub struct MemoryRecordStore {
    /// Records keyed by raw id; ascending key order is insertion order.
    records: RwLock<BTreeMap<u64, Todo>>,

    /// Next id to assign. Starts at 1 so the first created item has id 1.
    next_id: AtomicU64,
}

impl MemoryRecordStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            records: RwLock::new(BTreeMap::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Number of records currently stored.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    /// Whether the store holds no records.
    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

impl Default for MemoryRecordStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordStore for MemoryRecordStore {
    fn create(&self, draft: TodoDraft) -> BoxFuture<'_, Result<Todo, StoreError>> {
        Box::pin(async move {
            let id = self.next_id.fetch_add(1, Ordering::Relaxed);
            let now = Utc::now();
            let (title, description) = draft.into_fields();
            let todo = Todo {
                id: TodoId(id),
                title,
                description,
                created_at: now,
                updated_at: now,
            };

            self.records.write().await.insert(id, todo.clone());
            Ok(todo)
        })
    }

    fn find_by_id(&self, id: TodoId) -> BoxFuture<'_, Result<Option<Todo>, StoreError>> {
        Box::pin(async move { Ok(self.records.read().await.get(&id.0).cloned()) })
    }

    fn list_all(&self) -> BoxFuture<'_, Result<Vec<Todo>, StoreError>> {
        Box::pin(async move { Ok(self.records.read().await.values().cloned().collect()) })
    }

    fn update(&self, id: TodoId, fields: TodoFields) -> BoxFuture<'_, Result<Todo, StoreError>> {
        Box::pin(async move {
            let mut records = self.records.write().await;
            let record = records
                .get_mut(&id.0)
                .ok_or_else(|| StoreError::Rejected(format!("unknown id {id}")))?;

            record.title = fields.title;
            record.description = fields.description;
            record.updated_at = Utc::now();
            Ok(record.clone())
        })
    }

    fn delete(&self, id: TodoId) -> BoxFuture<'_, Result<bool, StoreError>> {
        Box::pin(async move { Ok(self.records.write().await.remove(&id.0).is_some()) })
    }
}
