//! Render-ready projection of [`ListState`].
//!
//! Nothing here is cached: every call to [`ListState::view`] recomputes the
//! view from the current state.

use crate::filter::FilterStatus;
use crate::types::ListState;
use serde::Serialize;
use todoflow_core::todo::{Todo, TodoId};

/// One row of the list
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ItemView {
    /// Todo id (`0` for the placeholder)
    pub id: TodoId,
    /// Stored title
    pub title: String,
    /// Stored completion
    pub completed: bool,
    /// Controls are disabled and the loader is shown
    pub busy: bool,
    /// Title field text, when the field is open
    pub edit_buffer: Option<String>,
}

/// Everything a rendering surface needs
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ListView {
    /// Visible rows: filtered todos, then the placeholder while creating
    pub items: Vec<ItemView>,
    /// Number of todos not yet completed
    pub items_left: usize,
    /// Footer counter text
    pub items_left_label: String,
    /// The list and footer are shown
    pub has_todos: bool,
    /// "Clear completed" is enabled
    pub has_completed: bool,
    /// The toggle-all control is shown as active
    pub all_completed: bool,
    /// The toggle-all control is shown
    pub toggle_all_visible: bool,
    /// The new-todo input is disabled
    pub input_disabled: bool,
    /// Text in the new-todo input
    pub title_input: String,
    /// Selected filter
    pub filter: FilterStatus,
    /// Notification text
    pub notice: Option<&'static str>,
}

/// Footer counter text
#[must_use]
pub fn items_left_label(count: usize) -> String {
    if count == 1 {
        "1 item left".to_string()
    } else {
        format!("{count} items left")
    }
}

impl ListState {
    /// Derive the view of the current state
    #[must_use]
    pub fn view(&self) -> ListView {
        let mut items: Vec<ItemView> = self.visible().into_iter().map(|t| self.item_view(t)).collect();
        if let Some(temp) = &self.temp_todo {
            items.push(self.item_view(temp));
        }

        let items_left = self.items_left();
        ListView {
            items,
            items_left,
            items_left_label: items_left_label(items_left),
            has_todos: self.has_todos(),
            has_completed: self.has_completed(),
            all_completed: self.all_completed(),
            toggle_all_visible: !self.loading && self.has_todos(),
            input_disabled: self.input_disabled(),
            title_input: self.title_input.clone(),
            filter: self.filter,
            notice: self.notice.map(|n| n.message()),
        }
    }

    fn item_view(&self, todo: &Todo) -> ItemView {
        ItemView {
            id: todo.id,
            title: todo.title.clone(),
            completed: todo.completed,
            busy: self.is_busy(todo.id),
            edit_buffer: self
                .editor(todo.id)
                .filter(|e| e.is_editing())
                .map(|e| e.buffer().to_string()),
        }
    }
}
