use async_trait::async_trait;
use models::todo::Todo;
use tokio::sync::RwLock;

use super::TodoStore;
use crate::errors::ServiceError;

/// In-process store; nothing survives the process.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Vec<Todo>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_todos(todos: Vec<Todo>) -> Self {
        Self { inner: RwLock::new(todos) }
    }
}

#[async_trait]
impl TodoStore for MemoryStore {
    async fn ensure(&self) -> Result<(), ServiceError> {
        Ok(())
    }

    async fn read_all(&self) -> Result<Vec<Todo>, ServiceError> {
        Ok(self.inner.read().await.clone())
    }

    async fn write_all(&self, todos: &[Todo]) -> Result<(), ServiceError> {
        *self.inner.write().await = todos.to_vec();
        Ok(())
    }
}
