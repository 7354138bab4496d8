//! Remote todo resource trait and related types.
//!
//! The `/todos` resource is the single source of truth for todo records. The
//! orchestrator never persists anything itself; it issues these four requests
//! and reconciles the local collection with whatever the server confirms.
//!
//! # Implementations
//!
//! - `HttpTodoApi` (in `todoflow-client` crate): Production implementation over HTTP
//! - `MockTodoApi` (in `todoflow-testing` crate): Scripted in-memory server for tests
//!
//! # Example
//!
//! ```no_run
//! use todoflow_core::api::{ApiError, TodoApi};
//! use todoflow_core::todo::{NewTodo, OwnerId, TodoPatch};
//!
//! async fn example(api: &dyn TodoApi) -> Result<(), ApiError> {
//!     let owner = OwnerId::new(3628);
//!
//!     let created = api.create(NewTodo::new("buy milk", owner)).await?;
//!     let updated = api.update(created.id, TodoPatch::completed(true)).await?;
//!     assert!(updated.completed);
//!
//!     api.remove(created.id).await?;
//!     let remaining = api.list(owner).await?;
//!     println!("{} todos left", remaining.len());
//!     Ok(())
//! }
//! ```

use crate::todo::{NewTodo, OwnerId, Todo, TodoId, TodoPatch};
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

/// Boxed future returned by [`TodoApi`] methods
pub type ApiFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, ApiError>> + Send + 'a>>;

/// Errors that can occur while talking to the todo resource.
///
/// Callers only distinguish success from failure; the variants exist for logs.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The request could not be sent or the connection failed.
    #[error("Request failed: {0}")]
    Request(String),

    /// The server answered with a non-success status.
    #[error("Server responded with status {status}")]
    Status {
        /// HTTP status code
        status: u16,
    },

    /// The response body could not be parsed.
    #[error("Response parsing failed: {0}")]
    Decode(String),
}

/// Todo resource abstraction.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` so they can be shared with effects
/// running on the runtime's worker tasks.
///
/// # Dyn Compatibility
///
/// This trait uses explicit `Pin<Box<dyn Future>>` returns instead of `async fn`
/// to enable trait object usage (`Arc<dyn TodoApi>`). Reducers capture the
/// API in the effects they return.
pub trait TodoApi: Send + Sync {
    /// Fetch every todo belonging to `owner`.
    ///
    /// `GET /todos?userId={owner}`
    fn list(&self, owner: OwnerId) -> ApiFuture<'_, Vec<Todo>>;

    /// Create a todo; the server assigns its id.
    ///
    /// `POST /todos` with `{title, userId, completed: false}`
    fn create(&self, todo: NewTodo) -> ApiFuture<'_, Todo>;

    /// Delete a todo.
    ///
    /// `DELETE /todos/{id}`
    fn remove(&self, id: TodoId) -> ApiFuture<'_, ()>;

    /// Apply a partial update and return the updated record.
    ///
    /// `PATCH /todos/{id}` with `{title?, completed?}`
    fn update(&self, id: TodoId, patch: TodoPatch) -> ApiFuture<'_, Todo>;
}
