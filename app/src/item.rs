//! Per-item title editing.
//!
//! ```text
//! Viewing --begin--> Editing --commit--> Submitting --settle(ok)--> Viewing
//!                       ^                     |
//!                       +----settle(failed)---+
//! ```
//!
//! `cancel` returns to `Viewing` from any state without touching the network.

use serde::{Deserialize, Serialize};

/// Where an item is in its edit lifecycle
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EditMode {
    /// Showing the stored title
    #[default]
    Viewing,
    /// Title field is open and editable
    Editing,
    /// A commit is waiting on the server
    Submitting,
}

/// What a commit asks the list to do
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EditCommit {
    /// The trimmed title matches the stored one; nothing to send
    Unchanged,
    /// The title was emptied; delete the todo
    Delete,
    /// Update the title to the trimmed text
    Rename(String),
}

/// Edit state of a single todo
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemEditor {
    mode: EditMode,
    buffer: String,
}

impl ItemEditor {
    /// Open the title field, seeded with `title`
    #[must_use]
    pub fn begin(title: &str) -> Self {
        Self {
            mode: EditMode::Editing,
            buffer: title.to_string(),
        }
    }

    /// Current mode
    #[must_use]
    pub const fn mode(&self) -> EditMode {
        self.mode
    }

    /// Text in the title field
    #[must_use]
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Whether the title field is shown
    #[must_use]
    pub const fn is_editing(&self) -> bool {
        matches!(self.mode, EditMode::Editing | EditMode::Submitting)
    }

    /// Whether a commit is in flight
    #[must_use]
    pub const fn is_submitting(&self) -> bool {
        matches!(self.mode, EditMode::Submitting)
    }

    /// Replace the field text; ignored unless editing
    pub fn set_buffer(&mut self, text: String) {
        if self.mode == EditMode::Editing {
            self.buffer = text;
        }
    }

    /// Submit the field (enter or blur)
    ///
    /// Returns `None` when there is nothing to commit: the field is closed,
    /// or a previous commit has not settled yet.
    pub fn commit(&mut self, current_title: &str) -> Option<EditCommit> {
        if self.mode != EditMode::Editing {
            return None;
        }

        let trimmed = self.buffer.trim();
        if trimmed == current_title {
            self.mode = EditMode::Viewing;
            return Some(EditCommit::Unchanged);
        }

        let commit = if trimmed.is_empty() {
            EditCommit::Delete
        } else {
            EditCommit::Rename(trimmed.to_string())
        };
        self.mode = EditMode::Submitting;
        Some(commit)
    }

    /// Record the outcome of the committed request
    ///
    /// On failure the field stays open with `original_title` restored.
    /// Does nothing if the edit was cancelled in the meantime.
    pub fn settle(&mut self, succeeded: bool, original_title: &str) {
        if self.mode != EditMode::Submitting {
            return;
        }

        if succeeded {
            self.mode = EditMode::Viewing;
        } else {
            original_title.clone_into(&mut self.buffer);
            self.mode = EditMode::Editing;
        }
    }

    /// Discard changes (escape)
    pub fn cancel(&mut self) {
        self.mode = EditMode::Viewing;
        self.buffer.clear();
    }
}
