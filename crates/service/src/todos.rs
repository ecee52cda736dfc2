use std::sync::Arc;

use chrono::Utc;
use models::todo::{CreateTodo, Todo, UpdateTodo};
use tokio::sync::Mutex;
use tracing::info;

use crate::errors::ServiceError;
use crate::storage::TodoStore;

/// CRUD rules over the whole-collection store.
///
/// Each operation is one read-modify-write cycle. The cycles are serialized
/// through `write_lock` so concurrent requests inside this process cannot lose
/// each other's updates.
pub struct TodoService {
    store: Arc<dyn TodoStore>,
    write_lock: Mutex<()>,
}

impl TodoService {
    pub fn new(store: Arc<dyn TodoStore>) -> Self {
        Self { store, write_lock: Mutex::new(()) }
    }

    /// Prepare the backing store up front so a bad path fails at startup.
    pub async fn init(&self) -> Result<(), ServiceError> {
        self.store.ensure().await
    }

    /// Whole collection in stored order (newest first).
    pub async fn list(&self) -> Result<Vec<Todo>, ServiceError> {
        let _guard = self.write_lock.lock().await;
        self.store.read_all().await
    }

    pub async fn create(&self, input: CreateTodo) -> Result<Todo, ServiceError> {
        let title = input.validated_title()?;

        let _guard = self.write_lock.lock().await;
        let mut todos = self.store.read_all().await?;
        let mut todo = Todo::new(title, Utc::now());
        todo.id = next_id(todo.id, &todos)?;
        todos.insert(0, todo.clone());
        self.store.write_all(&todos).await?;

        info!(id = todo.id, "todo created");
        Ok(todo)
    }

    pub async fn update(&self, id: i64, input: UpdateTodo) -> Result<Todo, ServiceError> {
        let _guard = self.write_lock.lock().await;
        let mut todos = self.store.read_all().await?;
        let todo = todos
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| ServiceError::not_found("todo"))?;
        input.apply(todo);
        let updated = todo.clone();
        self.store.write_all(&todos).await?;

        info!(id, done = updated.done, "todo updated");
        Ok(updated)
    }

    pub async fn delete(&self, id: i64) -> Result<(), ServiceError> {
        let _guard = self.write_lock.lock().await;
        let todos = self.store.read_all().await?;
        let before = todos.len();
        let next: Vec<Todo> = todos.into_iter().filter(|t| t.id != id).collect();
        if next.len() == before {
            return Err(ServiceError::not_found("todo"));
        }
        self.store.write_all(&next).await?;

        info!(id, "todo deleted");
        Ok(())
    }
}

/// Creation-time millis, bumped past the largest existing id so two creates in
/// the same millisecond still get distinct ids.
fn next_id(candidate: i64, existing: &[Todo]) -> Result<i64, ServiceError> {
    match existing.iter().map(|t| t.id).max() {
        Some(max) if candidate <= max => max.checked_add(1).ok_or(ServiceError::IdExhausted(max)),
        _ => Ok(candidate),
    }
}
