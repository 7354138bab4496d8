//! HTTP implementation of the todo resource.
//!
//! Talks JSON to a REST resource rooted at `{base_url}/todos`:
//!
//! | Operation | Method | Path |
//! |---|---|---|
//! | list | GET | `/todos?userId={id}` |
//! | create | POST | `/todos` |
//! | remove | DELETE | `/todos/{id}` |
//! | update | PATCH | `/todos/{id}` |
//!
//! Any non-success status is a failure; response bodies of failed requests
//! are not inspected.

use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;
use todoflow_core::api::{ApiError, ApiFuture, TodoApi};
use todoflow_core::todo::{NewTodo, OwnerId, Todo, TodoId, TodoPatch};

/// Todo resource client over HTTP
#[derive(Clone, Debug)]
pub struct HttpTodoApi {
    client: Client,
    base_url: String,
}

impl HttpTodoApi {
    /// Create a client for the resource served under `base_url`
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: normalize(base_url.into()),
        }
    }

    /// Create a client whose requests give up after `timeout`
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Request` if the HTTP client cannot be built.
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(request_error)?;

        Ok(Self {
            client,
            base_url: normalize(base_url.into()),
        })
    }

    /// Base URL requests are sent to
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn todos_url(&self) -> String {
        format!("{}/todos", self.base_url)
    }

    fn todo_url(&self, id: TodoId) -> String {
        format!("{}/todos/{id}", self.base_url)
    }

    /// Fetch every todo belonging to `owner`
    ///
    /// # Errors
    ///
    /// Returns errors for network failures, non-success statuses, or parsing failures
    pub async fn fetch_todos(&self, owner: OwnerId) -> Result<Vec<Todo>, ApiError> {
        tracing::debug!(%owner, "GET /todos");
        let response = self
            .client
            .get(format!("{}?userId={owner}", self.todos_url()))
            .send()
            .await
            .map_err(request_error)?;

        decode(response).await
    }

    /// Create a todo and return the server's record
    ///
    /// # Errors
    ///
    /// Returns errors for network failures, non-success statuses, or parsing failures
    pub async fn create_todo(&self, todo: NewTodo) -> Result<Todo, ApiError> {
        tracing::debug!(title = %todo.title, "POST /todos");
        let response = self
            .client
            .post(self.todos_url())
            .json(&todo)
            .send()
            .await
            .map_err(request_error)?;

        decode(response).await
    }

    /// Delete a todo
    ///
    /// # Errors
    ///
    /// Returns errors for network failures or non-success statuses
    pub async fn delete_todo(&self, id: TodoId) -> Result<(), ApiError> {
        tracing::debug!(%id, "DELETE /todos/:id");
        let response = self
            .client
            .delete(self.todo_url(id))
            .send()
            .await
            .map_err(request_error)?;

        ensure_success(response).map(drop)
    }

    /// Apply a partial update and return the updated record
    ///
    /// # Errors
    ///
    /// Returns errors for network failures, non-success statuses, or parsing failures
    pub async fn patch_todo(&self, id: TodoId, patch: TodoPatch) -> Result<Todo, ApiError> {
        tracing::debug!(%id, ?patch, "PATCH /todos/:id");
        let response = self
            .client
            .patch(self.todo_url(id))
            .json(&patch)
            .send()
            .await
            .map_err(request_error)?;

        decode(response).await
    }
}

impl TodoApi for HttpTodoApi {
    fn list(&self, owner: OwnerId) -> ApiFuture<'_, Vec<Todo>> {
        Box::pin(self.fetch_todos(owner))
    }

    fn create(&self, todo: NewTodo) -> ApiFuture<'_, Todo> {
        Box::pin(self.create_todo(todo))
    }

    fn remove(&self, id: TodoId) -> ApiFuture<'_, ()> {
        Box::pin(self.delete_todo(id))
    }

    fn update(&self, id: TodoId, patch: TodoPatch) -> ApiFuture<'_, Todo> {
        Box::pin(self.patch_todo(id, patch))
    }
}

fn normalize(mut base_url: String) -> String {
    while base_url.ends_with('/') {
        base_url.pop();
    }
    base_url
}

#[allow(clippy::needless_pass_by_value)] // used as a map_err adapter
fn request_error(err: reqwest::Error) -> ApiError {
    ApiError::Request(err.to_string())
}

fn ensure_success(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(ApiError::Status {
            status: status.as_u16(),
        })
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    ensure_success(response)?
        .json::<T>()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}
