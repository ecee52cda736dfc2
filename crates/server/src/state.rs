use std::sync::Arc;

use service::todos::TodoService;

#[derive(Clone)]
pub struct AppState {
    pub todos: Arc<TodoService>,
}

impl AppState {
    pub fn new(todos: TodoService) -> Self {
        Self { todos: Arc::new(todos) }
    }
}
