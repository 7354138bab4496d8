//! Status filtering of the todo collection.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use todoflow_core::todo::Todo;

/// Which todos are visible
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FilterStatus {
    /// Every todo
    #[default]
    All,
    /// Todos that are not completed
    Active,
    /// Completed todos
    Completed,
}

impl FilterStatus {
    /// Every status, in the order the filter links are shown
    pub const ALL: [Self; 3] = [Self::All, Self::Active, Self::Completed];

    /// Whether `todo` passes this filter
    #[must_use]
    pub const fn matches(self, todo: &Todo) -> bool {
        match self {
            Self::All => true,
            Self::Active => !todo.completed,
            Self::Completed => todo.completed,
        }
    }

    /// Anchor fragment that selects this filter
    #[must_use]
    pub const fn fragment(self) -> &'static str {
        match self {
            Self::All => "#/",
            Self::Active => "#/active",
            Self::Completed => "#/completed",
        }
    }

    /// Link label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Active => "Active",
            Self::Completed => "Completed",
        }
    }

    /// Parse an anchor fragment such as `#/active`; anything unknown is `All`
    #[must_use]
    pub fn from_fragment(fragment: &str) -> Self {
        fragment
            .trim_start_matches('#')
            .trim_start_matches('/')
            .parse()
            .unwrap_or_default()
    }
}

impl FromStr for FilterStatus {
    type Err = std::convert::Infallible;

    /// Unrecognized text selects [`FilterStatus::All`]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "active" => Self::Active,
            "completed" => Self::Completed,
            _ => Self::All,
        })
    }
}

impl fmt::Display for FilterStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Todos that pass `status`, in their original order
#[must_use]
pub fn filter_todos(todos: &[Todo], status: FilterStatus) -> Vec<&Todo> {
    todos.iter().filter(|todo| status.matches(todo)).collect()
}
