//! Todo list orchestrator.
//!
//! Keeps a local todo collection consistent with a remote `/todos` resource
//! while giving immediate feedback: a placeholder while a create is in
//! flight, per-item busy markers, and notices that clear themselves.
//!
//! - [`filter`]: Status filter over the collection
//! - [`item`]: Per-item title edit state machine
//! - [`reducer`]: The list orchestrator
//! - [`view`]: Derived, render-ready view of the state
//! - [`config`]: Environment-based configuration
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use todoflow::{ListAction, ListEnvironment, ListReducer, ListState, ListStore};
//! use todoflow_client::HttpTodoApi;
//! use todoflow_core::environment::NoFocus;
//! use todoflow_core::todo::OwnerId;
//!
//! # async fn example() {
//! let env = ListEnvironment::new(
//!     Arc::new(HttpTodoApi::new("http://localhost:3000")),
//!     Arc::new(NoFocus),
//!     OwnerId::new(3628),
//! );
//! let store: ListStore = ListStore::new(ListState::new(), ListReducer::new(), env);
//!
//! // Load, then wait for the request to settle
//! store.send(ListAction::Load).await.wait().await;
//!
//! store.send(ListAction::TitleInputChanged { text: "buy milk".into() }).await;
//! store.send(ListAction::Create).await.wait().await;
//!
//! let view = store.state(ListState::view).await;
//! println!("{}", view.items_left_label);
//! # }
//! ```

pub mod config;
pub mod filter;
pub mod item;
pub mod notice;
pub mod reducer;
pub mod types;
pub mod view;

// Re-export commonly used types
pub use config::{Config, ConfigError};
pub use filter::{filter_todos, FilterStatus};
pub use item::{EditCommit, EditMode, ItemEditor};
pub use notice::Notice;
pub use reducer::{ListEnvironment, ListReducer, NOTICE_TIMER};
pub use types::{ListAction, ListState, ProcessingSet};
pub use view::{ItemView, ListView};

/// Store running the list reducer
pub type ListStore =
    todoflow_runtime::Store<ListState, ListAction, ListEnvironment, ListReducer>;
