//! Todo resource data model.
//!
//! Mirrors the JSON records served by the `/todos` resource. Field names are
//! camelCase on the wire (`userId`).

use serde::{Deserialize, Serialize};

/// Server-assigned todo identifier
///
/// `0` is reserved for the optimistic placeholder shown while a create is in flight.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(u64);

impl TodoId {
    /// Identifier of the not-yet-persisted placeholder
    pub const PLACEHOLDER: Self = Self(0);

    /// Creates a `TodoId` from its raw value
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw value
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }

    /// Whether this is the placeholder id
    #[must_use]
    pub const fn is_placeholder(self) -> bool {
        self.0 == 0
    }
}

impl std::fmt::Display for TodoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Owner identifier scoping which todos are visible and mutable
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OwnerId(u64);

impl OwnerId {
    /// Creates an `OwnerId` from its raw value
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw value
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }

    /// An owner of `0` means "not configured"
    #[must_use]
    pub const fn is_set(self) -> bool {
        self.0 != 0
    }
}

impl std::fmt::Display for OwnerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single todo record
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    /// Unique identifier (placeholder when `0`)
    pub id: TodoId,
    /// Owning user
    pub user_id: OwnerId,
    /// Trimmed, non-empty title
    pub title: String,
    /// Whether the todo is completed
    pub completed: bool,
}

impl Todo {
    /// Creates the optimistic placeholder shown while `title` is being created
    #[must_use]
    pub fn placeholder(title: impl Into<String>, user_id: OwnerId) -> Self {
        Self {
            id: TodoId::PLACEHOLDER,
            user_id,
            title: title.into(),
            completed: false,
        }
    }

    /// Whether this record has not been persisted yet
    #[must_use]
    pub const fn is_placeholder(&self) -> bool {
        self.id.is_placeholder()
    }
}

/// Body of a create request
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTodo {
    /// Title (trimmed on construction)
    pub title: String,
    /// Owning user
    pub user_id: OwnerId,
    /// Always `false` for new todos
    pub completed: bool,
}

impl NewTodo {
    /// Creates a request body, trimming the title
    #[must_use]
    pub fn new(title: &str, user_id: OwnerId) -> Self {
        Self {
            title: title.trim().to_string(),
            user_id,
            completed: false,
        }
    }
}

/// Partial update of a todo
///
/// Absent fields are omitted from the request body.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoPatch {
    /// New title
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// New completion flag
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

impl TodoPatch {
    /// Patch that only changes the title
    #[must_use]
    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            completed: None,
        }
    }

    /// Patch that only changes the completion flag
    #[must_use]
    pub const fn completed(completed: bool) -> Self {
        Self {
            title: None,
            completed: Some(completed),
        }
    }
}
