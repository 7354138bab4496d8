//! In-memory stand-ins for the environment
//!
//! - [`MockTodoApi`]: Behaves like the `/todos` resource, with per-operation
//!   failure injection, a call log, and a gate for holding requests in flight
//! - [`RecordingFocus`]: Counts input focus requests

#![allow(clippy::unwrap_used)] // Test infrastructure uses unwrap for simplicity
#![allow(clippy::missing_panics_doc)] // Panics only on poisoned locks

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use todoflow_core::api::{ApiError, ApiFuture, TodoApi};
use todoflow_core::environment::InputFocus;
use todoflow_core::todo::{NewTodo, OwnerId, Todo, TodoId, TodoPatch};
use tokio::sync::watch;

/// A request received by [`MockTodoApi`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ApiCall {
    /// `GET /todos?userId=`
    List(OwnerId),
    /// `POST /todos`
    Create(NewTodo),
    /// `DELETE /todos/{id}`
    Remove(TodoId),
    /// `PATCH /todos/{id}`
    Update(TodoId, TodoPatch),
}

#[derive(Debug, Default)]
struct Failures {
    list: bool,
    create: bool,
    remove: HashSet<TodoId>,
    update: HashSet<TodoId>,
}

#[derive(Debug)]
struct ServerState {
    todos: Vec<Todo>,
    next_id: u64,
    failures: Failures,
    calls: Vec<ApiCall>,
}

/// Scripted in-memory todo resource
///
/// Requests are recorded when they arrive and applied when they complete.
/// While [`MockTodoApi::hold`] is in effect, requests wait in flight until
/// [`MockTodoApi::release`] is called.
///
/// # Example
///
/// ```
/// use todoflow_core::api::TodoApi;
/// use todoflow_core::todo::{NewTodo, OwnerId, TodoId};
/// use todoflow_testing::MockTodoApi;
///
/// # tokio_test::block_on(async {
/// let api = MockTodoApi::new();
/// api.fail_remove(TodoId::new(1));
///
/// let created = api.create(NewTodo::new("buy milk", OwnerId::new(7))).await.unwrap();
/// assert_eq!(created.id, TodoId::new(1));
/// assert!(api.remove(created.id).await.is_err());
/// assert_eq!(api.todos().len(), 1);
/// # });
/// ```
#[derive(Clone, Debug)]
pub struct MockTodoApi {
    state: Arc<Mutex<ServerState>>,
    gate: Arc<watch::Sender<bool>>,
}

impl MockTodoApi {
    /// Create an empty resource
    #[must_use]
    pub fn new() -> Self {
        Self::with_todos(Vec::new())
    }

    /// Create a resource that already holds `todos`
    #[must_use]
    pub fn with_todos(todos: Vec<Todo>) -> Self {
        let next_id = todos.iter().map(|t| t.id.get()).max().unwrap_or(0) + 1;
        let (gate, _) = watch::channel(true);

        Self {
            state: Arc::new(Mutex::new(ServerState {
                todos,
                next_id,
                failures: Failures::default(),
                calls: Vec::new(),
            })),
            gate: Arc::new(gate),
        }
    }

    /// Make list requests fail
    pub fn fail_list(&self) {
        self.state.lock().unwrap().failures.list = true;
    }

    /// Make create requests fail
    pub fn fail_create(&self) {
        self.state.lock().unwrap().failures.create = true;
    }

    /// Make delete requests for `id` fail
    pub fn fail_remove(&self, id: TodoId) {
        self.state.lock().unwrap().failures.remove.insert(id);
    }

    /// Make update requests for `id` fail
    pub fn fail_update(&self, id: TodoId) {
        self.state.lock().unwrap().failures.update.insert(id);
    }

    /// Clear every injected failure
    pub fn recover(&self) {
        self.state.lock().unwrap().failures = Failures::default();
    }

    /// Hold subsequent requests in flight until [`MockTodoApi::release`]
    pub fn hold(&self) {
        self.gate.send_replace(false);
    }

    /// Let held requests complete
    pub fn release(&self) {
        self.gate.send_replace(true);
    }

    /// Records currently stored on the "server"
    #[must_use]
    pub fn todos(&self) -> Vec<Todo> {
        self.state.lock().unwrap().todos.clone()
    }

    /// Every request received so far, in arrival order
    #[must_use]
    pub fn calls(&self) -> Vec<ApiCall> {
        self.state.lock().unwrap().calls.clone()
    }

    /// Number of requests received so far
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.state.lock().unwrap().calls.len()
    }

    fn record(&self, call: ApiCall) {
        self.state.lock().unwrap().calls.push(call);
    }

    async fn pass_gate(&self) {
        let mut open = self.gate.subscribe();
        // The sender lives as long as `self`, so this only ends once released
        let _ = open.wait_for(|open| *open).await;
    }
}

impl Default for MockTodoApi {
    fn default() -> Self {
        Self::new()
    }
}

fn server_error() -> ApiError {
    ApiError::Status { status: 500 }
}

fn not_found() -> ApiError {
    ApiError::Status { status: 404 }
}

impl TodoApi for MockTodoApi {
    fn list(&self, owner: OwnerId) -> ApiFuture<'_, Vec<Todo>> {
        self.record(ApiCall::List(owner));
        Box::pin(async move {
            self.pass_gate().await;
            let state = self.state.lock().unwrap();
            if state.failures.list {
                return Err(server_error());
            }
            Ok(state
                .todos
                .iter()
                .filter(|t| t.user_id == owner)
                .cloned()
                .collect())
        })
    }

    fn create(&self, todo: NewTodo) -> ApiFuture<'_, Todo> {
        self.record(ApiCall::Create(todo.clone()));
        Box::pin(async move {
            self.pass_gate().await;
            let mut state = self.state.lock().unwrap();
            if state.failures.create {
                return Err(server_error());
            }
            let created = Todo {
                id: TodoId::new(state.next_id),
                user_id: todo.user_id,
                title: todo.title,
                completed: todo.completed,
            };
            state.next_id += 1;
            state.todos.push(created.clone());
            Ok(created)
        })
    }

    fn remove(&self, id: TodoId) -> ApiFuture<'_, ()> {
        self.record(ApiCall::Remove(id));
        Box::pin(async move {
            self.pass_gate().await;
            let mut state = self.state.lock().unwrap();
            if state.failures.remove.contains(&id) {
                return Err(server_error());
            }
            let before = state.todos.len();
            state.todos.retain(|t| t.id != id);
            if state.todos.len() == before {
                return Err(not_found());
            }
            Ok(())
        })
    }

    fn update(&self, id: TodoId, patch: TodoPatch) -> ApiFuture<'_, Todo> {
        self.record(ApiCall::Update(id, patch.clone()));
        Box::pin(async move {
            self.pass_gate().await;
            let mut state = self.state.lock().unwrap();
            if state.failures.update.contains(&id) {
                return Err(server_error());
            }
            let todo = state
                .todos
                .iter_mut()
                .find(|t| t.id == id)
                .ok_or_else(not_found)?;
            if let Some(title) = patch.title {
                todo.title = title;
            }
            if let Some(completed) = patch.completed {
                todo.completed = completed;
            }
            Ok(todo.clone())
        })
    }
}

/// Focus sink that counts requests
#[derive(Clone, Debug, Default)]
pub struct RecordingFocus {
    requests: Arc<AtomicUsize>,
}

impl RecordingFocus {
    /// Create a sink with no recorded requests
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of focus requests received
    #[must_use]
    pub fn count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}

impl InputFocus for RecordingFocus {
    fn focus_input(&self) {
        self.requests.fetch_add(1, Ordering::SeqCst);
    }
}
