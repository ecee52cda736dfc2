//! Storage abstractions for the todo collection
//!
//! The whole collection is the unit of persistence: every read loads all of it
//! and every write replaces all of it.

pub mod json_file_store;
pub mod memory_store;

use async_trait::async_trait;
use models::todo::Todo;

use crate::errors::ServiceError;

pub use json_file_store::JsonFileStore;
pub use memory_store::MemoryStore;

#[async_trait]
pub trait TodoStore: Send + Sync {
    /// Make sure the backing storage exists and holds a well-formed collection. Idempotent.
    async fn ensure(&self) -> Result<(), ServiceError>;
    /// Load the full collection in stored order.
    async fn read_all(&self) -> Result<Vec<Todo>, ServiceError>;
    /// Replace the full collection.
    async fn write_all(&self, todos: &[Todo]) -> Result<(), ServiceError>;
}
