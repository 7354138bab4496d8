//! # Todoflow Testing
//!
//! Testing utilities and helpers for Todoflow reducers.
//!
//! This crate provides:
//! - [`ReducerTest`]: Given/When/Then harness for reducers
//! - [`MockTodoApi`]: Scripted in-memory todo resource with failure injection
//! - [`RecordingFocus`]: Counts input focus requests
//! - Fixtures for building todos
//!
//! ## Example
//!
//! ```ignore
//! use todoflow_testing::{fixtures::todo, MockTodoApi, RecordingFocus};
//!
//! #[tokio::test]
//! async fn delete_failure_keeps_todo() {
//!     let api = MockTodoApi::with_todos(vec![todo(1, "buy milk", true)]);
//!     api.fail_remove(TodoId::new(1));
//!
//!     let store = Store::new(state, ListReducer::new(), env(api.clone()));
//!     store.send(ListAction::Delete { id: TodoId::new(1) }).await.wait().await;
//!
//!     assert_eq!(store.state(|s| s.todos.len()).await, 1);
//! }
//! ```


/// Mock implementations of Environment traits
pub mod mocks;

/// Test data builders
pub mod fixtures {
    use todoflow_core::todo::{OwnerId, Todo, TodoId};

    /// Owner used by fixtures
    pub const TEST_OWNER: OwnerId = OwnerId::new(3628);

    /// Build a persisted todo owned by [`TEST_OWNER`]
    #[must_use]
    pub fn todo(id: u64, title: &str, completed: bool) -> Todo {
        Todo {
            id: TodoId::new(id),
            user_id: TEST_OWNER,
            title: title.to_string(),
            completed,
        }
    }
}

// Re-export commonly used items
pub use mocks::{ApiCall, MockTodoApi, RecordingFocus};
pub use reducer_test::{assertions, ReducerTest};
