//! Domain types for the todo list.

use crate::filter::{filter_todos, FilterStatus};
use crate::item::ItemEditor;
use crate::notice::Notice;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use todoflow_core::todo::{Todo, TodoId};

/// Ids with a request in flight
///
/// Each mark is released individually, so two operations on the same id
/// keep it busy until both have settled.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessingSet {
    counts: HashMap<TodoId, usize>,
}

impl ProcessingSet {
    /// Mark `id` as busy once more
    pub fn mark(&mut self, id: TodoId) {
        *self.counts.entry(id).or_insert(0) += 1;
    }

    /// Mark each of `ids`
    pub fn mark_all<'a>(&mut self, ids: impl IntoIterator<Item = &'a TodoId>) {
        for &id in ids {
            self.mark(id);
        }
    }

    /// Release one mark of `id`; releasing an unmarked id does nothing
    pub fn release(&mut self, id: TodoId) {
        if let Some(count) = self.counts.get_mut(&id) {
            *count -= 1;
            if *count == 0 {
                self.counts.remove(&id);
            }
        }
    }

    /// Release one mark of each of `ids`
    pub fn release_all<'a>(&mut self, ids: impl IntoIterator<Item = &'a TodoId>) {
        for &id in ids {
            self.release(id);
        }
    }

    /// Whether `id` has any request in flight
    #[must_use]
    pub fn contains(&self, id: TodoId) -> bool {
        self.counts.contains_key(&id)
    }

    /// Whether no id is busy
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Number of distinct busy ids
    #[must_use]
    pub fn len(&self) -> usize {
        self.counts.len()
    }
}

/// State of the todo list
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ListState {
    /// Todos as last confirmed by the server, in display order
    pub todos: Vec<Todo>,
    /// Selected status filter
    pub filter: FilterStatus,
    /// Ids with a request in flight
    pub processing: ProcessingSet,
    /// The list request is in flight
    pub loading: bool,
    /// A create request is in flight
    pub creating: bool,
    /// Placeholder shown while creating
    pub temp_todo: Option<Todo>,
    /// Text in the new-todo input
    pub title_input: String,
    /// Visible notification
    pub notice: Option<Notice>,
    /// Items whose title field is open
    pub editors: HashMap<TodoId, ItemEditor>,
}

impl ListState {
    /// Creates an empty list
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a list holding `todos`
    #[must_use]
    pub fn with_todos(todos: Vec<Todo>) -> Self {
        Self {
            todos,
            ..Self::default()
        }
    }

    /// Returns a todo by ID
    #[must_use]
    pub fn get(&self, id: TodoId) -> Option<&Todo> {
        self.todos.iter().find(|t| t.id == id)
    }

    pub(crate) fn get_mut(&mut self, id: TodoId) -> Option<&mut Todo> {
        self.todos.iter_mut().find(|t| t.id == id)
    }

    /// Edit state of `id`, if its title field is open
    #[must_use]
    pub fn editor(&self, id: TodoId) -> Option<&ItemEditor> {
        self.editors.get(&id)
    }

    /// Todos passing the selected filter
    #[must_use]
    pub fn visible(&self) -> Vec<&Todo> {
        filter_todos(&self.todos, self.filter)
    }

    /// Whether the list holds any todo
    #[must_use]
    pub fn has_todos(&self) -> bool {
        !self.todos.is_empty()
    }

    /// Number of todos not yet completed
    #[must_use]
    pub fn items_left(&self) -> usize {
        self.todos.iter().filter(|t| !t.completed).count()
    }

    /// Whether at least one todo is completed
    #[must_use]
    pub fn has_completed(&self) -> bool {
        self.todos.iter().any(|t| t.completed)
    }

    /// Whether the list is non-empty and every todo is completed
    #[must_use]
    pub fn all_completed(&self) -> bool {
        self.has_todos() && self.todos.iter().all(|t| t.completed)
    }

    /// The new-todo input does not accept text or submissions
    #[must_use]
    pub const fn input_disabled(&self) -> bool {
        self.loading || self.creating
    }

    /// Whether `id` renders busy
    #[must_use]
    pub fn is_busy(&self, id: TodoId) -> bool {
        self.loading
            || id.is_placeholder()
            || self.processing.contains(id)
            || self.editor(id).is_some_and(ItemEditor::is_submitting)
    }

    /// Replace the collection, keeping the first record for any repeated id
    pub(crate) fn replace_todos(&mut self, todos: Vec<Todo>) {
        self.todos.clear();
        for todo in todos {
            if self.get(todo.id).is_none() {
                self.todos.push(todo);
            }
        }
        self.editors.retain(|id, _| self.todos.iter().any(|t| t.id == *id));
    }

    /// Append a confirmed record, replacing any existing record with its id
    pub(crate) fn upsert(&mut self, todo: Todo) {
        match self.get_mut(todo.id) {
            Some(existing) => *existing = todo,
            None => self.todos.push(todo),
        }
    }

    /// Drop every todo in `ids` along with its editor
    pub(crate) fn remove_all(&mut self, ids: &[TodoId]) {
        self.todos.retain(|t| !ids.contains(&t.id));
        for id in ids {
            self.editors.remove(id);
        }
    }
}

/// Actions for the todo list
///
/// User intents come first; each request settles with exactly one outcome
/// action fed back by its effect.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ListAction {
    // ========== Loading ==========
    /// Fetch the owner's todos
    Load,
    /// The list request succeeded
    TodosLoaded {
        /// Todos returned by the server
        todos: Vec<Todo>,
    },
    /// The list request failed
    LoadFailed,

    // ========== Creating ==========
    /// The new-todo input changed
    TitleInputChanged {
        /// Current input text
        text: String,
    },
    /// Submit the new-todo input
    Create,
    /// The create request succeeded
    TodoCreated {
        /// Record returned by the server
        todo: Todo,
    },
    /// The create request failed
    CreateFailed,

    // ========== Deleting ==========
    /// Delete one todo
    Delete {
        /// Todo to delete
        id: TodoId,
    },
    /// A delete request succeeded
    Deleted {
        /// Deleted todo
        id: TodoId,
    },
    /// A delete request failed
    DeleteFailed {
        /// Todo that is still stored
        id: TodoId,
    },
    /// Delete every completed todo
    ClearCompleted,
    /// Every delete issued by [`ListAction::ClearCompleted`] has settled
    CompletedCleared {
        /// Deletes that succeeded
        deleted: Vec<TodoId>,
        /// Deletes that failed
        failed: Vec<TodoId>,
    },

    // ========== Toggling ==========
    /// Flip one todo's completion
    Toggle {
        /// Todo to flip
        id: TodoId,
    },
    /// A toggle request succeeded
    Toggled {
        /// Toggled todo
        id: TodoId,
        /// Completion confirmed by the server
        completed: bool,
    },
    /// A toggle request failed
    ToggleFailed {
        /// Todo whose toggle failed
        id: TodoId,
    },
    /// Complete every todo, or reopen them all if all are completed
    ToggleAll,
    /// Every update issued by [`ListAction::ToggleAll`] has settled
    AllToggled {
        /// Records returned by successful updates
        updated: Vec<Todo>,
        /// Updates that failed
        failed: Vec<TodoId>,
    },

    // ========== Editing ==========
    /// Rename one todo
    Edit {
        /// Todo to rename
        id: TodoId,
        /// New title
        title: String,
    },
    /// A rename request succeeded
    Edited {
        /// Renamed todo
        id: TodoId,
        /// Title confirmed by the server
        title: String,
    },
    /// A rename request failed
    EditFailed {
        /// Todo whose rename failed
        id: TodoId,
    },
    /// Open an item's title field (double click)
    BeginEdit {
        /// Todo to edit
        id: TodoId,
    },
    /// An item's title field changed
    EditBufferChanged {
        /// Todo being edited
        id: TodoId,
        /// Current field text
        text: String,
    },
    /// Submit an item's title field (enter or blur)
    CommitEdit {
        /// Todo being edited
        id: TodoId,
    },
    /// Close an item's title field without saving (escape)
    CancelEdit {
        /// Todo being edited
        id: TodoId,
    },

    // ========== View ==========
    /// Select a status filter
    SetFilter {
        /// Filter to apply
        filter: FilterStatus,
    },
    /// Close the notification
    DismissNotice,
    /// The notification timer fired
    NoticeExpired,
}
