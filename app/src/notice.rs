//! User-visible notices.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The fixed set of transient notifications shown above the list
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Notice {
    /// The initial list request failed
    LoadFailed,
    /// A create was submitted with a blank title
    TitleEmpty,
    /// A create request failed
    AddFailed,
    /// One or more delete requests failed
    DeleteFailed,
    /// One or more update requests failed
    UpdateFailed,
}

impl Notice {
    /// Text shown to the user
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::LoadFailed => "Unable to load todos",
            Self::TitleEmpty => "Title should not be empty",
            Self::AddFailed => "Unable to add a todo",
            Self::DeleteFailed => "Unable to delete a todo",
            Self::UpdateFailed => "Unable to update a todo",
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}
