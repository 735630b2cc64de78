//! Model-based check of the coordinator's read-your-writes behavior.
//!
//! Random operation sequences run against a real coordinator (in-memory
//! store + live cache) and a plain `BTreeMap` model side by side. After
//! every step, reads through the coordinator must agree with the model,
//! whatever mix of cache hits and misses served them.

use std::collections::BTreeMap;
use std::sync::Arc;

use proptest::prelude::*;

use todocache::cache::clients::TodoCacheClient;
use todocache::cache::{CacheConfig, CacheService};
use todocache::coordinator::{TodoCoordinator, TodoError};
use todocache::store::{MemoryRecordStore, RecordStore};
use todocache::todo::{TodoDraft, TodoId, TodoPatch};

#[derive(Debug, Clone)]
enum Op {
    Create { title: String, description: String },
    ReadById { id: u64 },
    ReadAll,
    UpdateTitle { id: u64, title: String },
    UpdateDescription { id: u64, description: String },
    Delete { id: u64 },
}

fn op_strategy() -> impl Strategy<Value = Op> {
    let text = "[a-z]{0,12}";
    let id = 1u64..8;
    prop_oneof![
        (text, text).prop_map(|(title, description)| Op::Create { title, description }),
        id.clone().prop_map(|id| Op::ReadById { id }),
        Just(Op::ReadAll),
        (id.clone(), text).prop_map(|(id, title)| Op::UpdateTitle { id, title }),
        (id.clone(), text)
            .prop_map(|(id, description)| Op::UpdateDescription { id, description }),
        id.prop_map(|id| Op::Delete { id }),
    ]
}

/// Model entry: (title, description).
type Model = BTreeMap<u64, (String, String)>;

async fn run_sequence(ops: Vec<Op>) {
    let service = CacheService::start(CacheConfig::memory(1_000_000, None))
        .await
        .unwrap();
    let client = TodoCacheClient::new(service.cache());
    let store = Arc::new(MemoryRecordStore::new());
    let coordinator = TodoCoordinator::new(store as Arc<dyn RecordStore>, client);

    let mut model: Model = BTreeMap::new();

    for op in ops {
        match op {
            Op::Create { title, description } => {
                let draft = TodoDraft::new(title.clone(), description.clone()).unwrap();
                let created = coordinator.create(draft).await.unwrap();
                model.insert(created.id.0, (title, description));
            }
            Op::ReadById { id } => match coordinator.read_by_id(TodoId(id)).await {
                Ok(todo) => {
                    let expected = model.get(&id).expect("coordinator returned unknown id");
                    assert_eq!((todo.title, todo.description), expected.clone());
                }
                Err(TodoError::NotFound(_)) => {
                    assert!(!model.contains_key(&id), "coordinator lost id {id}");
                }
                Err(e) => panic!("unexpected store error: {e}"),
            },
            Op::ReadAll => {
                let all = coordinator.read_all().await.unwrap();
                let got: Vec<_> = all
                    .into_iter()
                    .map(|t| (t.id.0, (t.title, t.description)))
                    .collect();
                let expected: Vec<_> =
                    model.iter().map(|(id, v)| (*id, v.clone())).collect();
                assert_eq!(got, expected);
            }
            Op::UpdateTitle { id, title } => {
                let patch = TodoPatch::new().with_title(title.clone()).unwrap();
                match coordinator.update(TodoId(id), patch).await {
                    Ok(updated) => {
                        let entry = model.get_mut(&id).expect("updated unknown id");
                        entry.0 = title;
                        assert_eq!(updated.title, entry.0);
                        assert_eq!(updated.description, entry.1);
                    }
                    Err(TodoError::NotFound(_)) => assert!(!model.contains_key(&id)),
                    Err(e) => panic!("unexpected store error: {e}"),
                }
            }
            Op::UpdateDescription { id, description } => {
                let patch = TodoPatch::new().with_description(description.clone()).unwrap();
                match coordinator.update(TodoId(id), patch).await {
                    Ok(updated) => {
                        let entry = model.get_mut(&id).expect("updated unknown id");
                        entry.1 = description;
                        assert_eq!(updated.title, entry.0);
                        assert_eq!(updated.description, entry.1);
                    }
                    Err(TodoError::NotFound(_)) => assert!(!model.contains_key(&id)),
                    Err(e) => panic!("unexpected store error: {e}"),
                }
            }
            Op::Delete { id } => match coordinator.delete(TodoId(id)).await {
                Ok(()) => {
                    assert!(model.remove(&id).is_some(), "deleted unknown id {id}");
                }
                Err(TodoError::NotFound(_)) => assert!(!model.contains_key(&id)),
                Err(e) => panic!("unexpected store error: {e}"),
            },
        }
    }

    // Final sweep: every surviving id reads back, every other id is gone
    for (id, expected) in &model {
        let todo = coordinator.read_by_id(TodoId(*id)).await.unwrap();
        assert_eq!((todo.title, todo.description), expected.clone());
    }

    service.shutdown().await;
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn coordinator_agrees_with_model(ops in proptest::collection::vec(op_strategy(), 1..24)) {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        runtime.block_on(run_sequence(ops));
    }
}
