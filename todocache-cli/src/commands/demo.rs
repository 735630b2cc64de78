//! Scripted CRUD demo.
//!
//! Walks one todo through its full lifecycle and prints what the cache did
//! at each step, finishing with the telemetry counters. With `--cache-off`
//! the same script runs store-only to show that every operation still
//! succeeds.

use tracing::info;

use todocache::app::{AppConfig, TodoApp};
use todocache::{TodoDraft, TodoError, TodoPatch};

use crate::error::CliError;

/// Run the demo session.
pub async fn run(cache_off: bool) -> Result<(), CliError> {
    info!(cache_off, "Starting demo session");

    let config = if cache_off {
        println!("Running with the cache layer disabled (store-only)\n");
        AppConfig::new().with_cache_disabled()
    } else {
        AppConfig::new()
    };

    let app = TodoApp::start(config).await?;
    let todos = app.coordinator();

    let created = todos
        .create(TodoDraft::new("Buy milk", "2%")?)
        .await?;
    println!("create        -> id {} ({:?}, {:?})", created.id, created.title, created.description);

    let read = todos.read_by_id(created.id).await?;
    println!("read_by_id    -> {:?} / {:?}", read.title, read.description);

    let second = todos
        .create(TodoDraft::new("Walk the dog", "before dark")?)
        .await?;
    println!("create        -> id {}", second.id);

    let all = todos.read_all().await?;
    println!("read_all      -> {} items", all.len());

    let updated = todos
        .update(created.id, TodoPatch::new().with_description("whole")?)
        .await?;
    println!("update        -> {:?} / {:?}", updated.title, updated.description);

    todos.delete(created.id).await?;
    println!("delete        -> id {} removed", created.id);

    match todos.read_by_id(created.id).await {
        Err(TodoError::NotFound(id)) => println!("read_by_id    -> id {} not found (as expected)", id),
        Ok(_) => println!("read_by_id    -> unexpectedly found a deleted item!"),
        Err(e) => return Err(e.into()),
    }

    match todos.delete(created.id).await {
        Err(TodoError::NotFound(id)) => println!("delete again  -> id {} not found (as expected)", id),
        Ok(()) => println!("delete again  -> unexpectedly succeeded!"),
        Err(e) => return Err(e.into()),
    }

    let remaining = todos.read_all().await?;
    println!("read_all      -> {} item(s) remaining", remaining.len());

    println!("\ncache telemetry: {}", app.telemetry());

    app.shutdown().await;
    Ok(())
}
