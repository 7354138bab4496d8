//! Reducer logic for the todo list.
//!
//! Every request follows the same shape: the intent marks state busy and
//! returns a future that performs the request; the future settles with
//! exactly one outcome action, which reconciles the collection with what the
//! server confirmed and clears the busy markers. Failures never escape as
//! errors. They become outcome actions and notices.

use crate::item::{EditCommit, ItemEditor};
use crate::notice::Notice;
use crate::types::{ListAction, ListState};
use futures::future;
use std::sync::Arc;
use std::time::Duration;
use todoflow_core::api::TodoApi;
use todoflow_core::effect::{Effect, EffectId};
use todoflow_core::environment::InputFocus;
use todoflow_core::todo::{NewTodo, OwnerId, Todo, TodoId, TodoPatch};
use todoflow_core::{async_effect, cancellable, delay, reducer::Reducer, smallvec, SmallVec};

/// Label of the timer that clears the visible notice
pub const NOTICE_TIMER: EffectId = EffectId::new("notice-timer");

/// Default notice lifetime
pub const DEFAULT_NOTICE_TTL: Duration = Duration::from_secs(3);

type Effects = SmallVec<[Effect<ListAction>; 4]>;

/// Environment dependencies for the list reducer
#[derive(Clone)]
pub struct ListEnvironment {
    /// The remote todo resource
    pub api: Arc<dyn TodoApi>,
    /// Where focus requests for the new-todo input go
    pub focus: Arc<dyn InputFocus>,
    /// Whose todos are shown; no request is issued while unset
    pub owner: OwnerId,
    /// How long notices stay visible
    pub notice_ttl: Duration,
}

impl ListEnvironment {
    /// Creates a `ListEnvironment` with the default notice lifetime
    #[must_use]
    pub fn new(api: Arc<dyn TodoApi>, focus: Arc<dyn InputFocus>, owner: OwnerId) -> Self {
        Self {
            api,
            focus,
            owner,
            notice_ttl: DEFAULT_NOTICE_TTL,
        }
    }

    /// Override how long notices stay visible
    #[must_use]
    pub fn with_notice_ttl(mut self, notice_ttl: Duration) -> Self {
        self.notice_ttl = notice_ttl;
        self
    }
}

impl std::fmt::Debug for ListEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListEnvironment")
            .field("owner", &self.owner)
            .field("notice_ttl", &self.notice_ttl)
            .finish_non_exhaustive()
    }
}

/// Reducer for the todo list
#[derive(Clone, Debug)]
pub struct ListReducer;

impl ListReducer {
    /// Creates a new `ListReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Show `notice`, replacing any pending clear with a fresh one
    fn show_notice(state: &mut ListState, notice: Notice, env: &ListEnvironment) -> Effects {
        state.notice = Some(notice);
        smallvec![
            Effect::Cancel(NOTICE_TIMER),
            cancellable! {
                id: NOTICE_TIMER,
                effect: delay! {
                    duration: env.notice_ttl,
                    action: ListAction::NoticeExpired
                }
            },
        ]
    }

    fn clear_notice(state: &mut ListState) -> Effect<ListAction> {
        state.notice = None;
        Effect::Cancel(NOTICE_TIMER)
    }

    fn focus_input(env: &ListEnvironment) -> Effect<ListAction> {
        let focus = Arc::clone(&env.focus);
        async_effect! {
            focus.focus_input();
            None::<ListAction>
        }
    }

    /// Refocus once neither the list nor a create is in flight
    fn refocus_when_idle(state: &ListState, env: &ListEnvironment) -> Option<Effect<ListAction>> {
        (!state.input_disabled()).then(|| Self::focus_input(env))
    }

    /// Whether `action` would issue a request
    const fn issues_request(action: &ListAction) -> bool {
        matches!(
            action,
            ListAction::Load
                | ListAction::Create
                | ListAction::Delete { .. }
                | ListAction::ClearCompleted
                | ListAction::Toggle { .. }
                | ListAction::ToggleAll
                | ListAction::Edit { .. }
                | ListAction::CommitEdit { .. }
        )
    }

    fn load(state: &mut ListState, env: &ListEnvironment) -> Effects {
        if state.loading {
            return SmallVec::new();
        }
        tracing::debug!(owner = %env.owner, "Loading todos");

        state.loading = true;
        let clear = Self::clear_notice(state);

        let api = Arc::clone(&env.api);
        let owner = env.owner;
        smallvec![
            clear,
            async_effect! {
                match api.list(owner).await {
                    Ok(todos) => Some(ListAction::TodosLoaded { todos }),
                    Err(error) => {
                        tracing::warn!(%owner, %error, "Loading todos failed");
                        Some(ListAction::LoadFailed)
                    },
                }
            },
        ]
    }

    fn create(state: &mut ListState, env: &ListEnvironment) -> Effects {
        if state.input_disabled() {
            return SmallVec::new();
        }

        let title = state.title_input.trim().to_string();
        if title.is_empty() {
            let mut effects = Self::show_notice(state, Notice::TitleEmpty, env);
            effects.push(Self::focus_input(env));
            return effects;
        }
        tracing::debug!(%title, "Creating todo");

        let clear = Self::clear_notice(state);
        state.creating = true;
        state.temp_todo = Some(Todo::placeholder(title.as_str(), env.owner));

        let api = Arc::clone(&env.api);
        let request = NewTodo::new(&title, env.owner);
        smallvec![
            clear,
            async_effect! {
                match api.create(request).await {
                    Ok(todo) => Some(ListAction::TodoCreated { todo }),
                    Err(error) => {
                        tracing::warn!(%title, %error, "Creating todo failed");
                        Some(ListAction::CreateFailed)
                    },
                }
            },
        ]
    }

    fn delete(state: &mut ListState, id: TodoId, env: &ListEnvironment) -> Effects {
        if state.get(id).is_none() {
            tracing::debug!(%id, "Ignoring delete of unknown todo");
            return SmallVec::new();
        }
        tracing::debug!(%id, "Deleting todo");

        state.processing.mark(id);
        let api = Arc::clone(&env.api);
        smallvec![async_effect! {
            match api.remove(id).await {
                Ok(()) => Some(ListAction::Deleted { id }),
                Err(error) => {
                    tracing::warn!(%id, %error, "Deleting todo failed");
                    Some(ListAction::DeleteFailed { id })
                },
            }
        }]
    }

    fn clear_completed(state: &mut ListState, env: &ListEnvironment) -> Effects {
        let ids: Vec<TodoId> = state
            .todos
            .iter()
            .filter(|t| t.completed)
            .map(|t| t.id)
            .collect();
        if ids.is_empty() {
            return SmallVec::new();
        }
        tracing::debug!(count = ids.len(), "Clearing completed todos");

        state.processing.mark_all(&ids);
        let api = Arc::clone(&env.api);
        smallvec![async_effect! {
            let outcomes = future::join_all(ids.into_iter().map(|id| {
                let api = Arc::clone(&api);
                async move { (id, api.remove(id).await) }
            }))
            .await;

            let mut deleted = Vec::new();
            let mut failed = Vec::new();
            for (id, outcome) in outcomes {
                match outcome {
                    Ok(()) => deleted.push(id),
                    Err(error) => {
                        tracing::warn!(%id, %error, "Deleting completed todo failed");
                        failed.push(id);
                    },
                }
            }
            Some(ListAction::CompletedCleared { deleted, failed })
        }]
    }

    fn toggle(state: &mut ListState, id: TodoId, env: &ListEnvironment) -> Effects {
        let Some(todo) = state.get(id) else {
            tracing::debug!(%id, "Ignoring toggle of unknown todo");
            return SmallVec::new();
        };
        let patch = TodoPatch::completed(!todo.completed);
        tracing::debug!(%id, ?patch, "Toggling todo");

        state.processing.mark(id);
        let api = Arc::clone(&env.api);
        smallvec![async_effect! {
            match api.update(id, patch).await {
                Ok(todo) => Some(ListAction::Toggled { id, completed: todo.completed }),
                Err(error) => {
                    tracing::warn!(%id, %error, "Toggling todo failed");
                    Some(ListAction::ToggleFailed { id })
                },
            }
        }]
    }

    fn toggle_all(state: &mut ListState, env: &ListEnvironment) -> Effects {
        let target = !state.all_completed();
        let ids: Vec<TodoId> = state
            .todos
            .iter()
            .filter(|t| t.completed != target)
            .map(|t| t.id)
            .collect();
        if ids.is_empty() {
            return SmallVec::new();
        }
        tracing::debug!(count = ids.len(), target, "Toggling all todos");

        state.processing.mark_all(&ids);
        let api = Arc::clone(&env.api);
        smallvec![async_effect! {
            let outcomes = future::join_all(ids.into_iter().map(|id| {
                let api = Arc::clone(&api);
                async move { (id, api.update(id, TodoPatch::completed(target)).await) }
            }))
            .await;

            let mut updated = Vec::new();
            let mut failed = Vec::new();
            for (id, outcome) in outcomes {
                match outcome {
                    Ok(todo) => updated.push(Todo { id, ..todo }),
                    Err(error) => {
                        tracing::warn!(%id, %error, "Toggling todo failed");
                        failed.push(id);
                    },
                }
            }
            Some(ListAction::AllToggled { updated, failed })
        }]
    }

    fn edit(state: &mut ListState, id: TodoId, title: String, env: &ListEnvironment) -> Effects {
        if state.get(id).is_none() {
            tracing::debug!(%id, "Ignoring edit of unknown todo");
            return SmallVec::new();
        }
        tracing::debug!(%id, %title, "Renaming todo");

        state.processing.mark(id);
        let api = Arc::clone(&env.api);
        smallvec![async_effect! {
            match api.update(id, TodoPatch::title(title)).await {
                Ok(todo) => Some(ListAction::Edited { id, title: todo.title }),
                Err(error) => {
                    tracing::warn!(%id, %error, "Renaming todo failed");
                    Some(ListAction::EditFailed { id })
                },
            }
        }]
    }

    fn commit_edit(state: &mut ListState, id: TodoId, env: &ListEnvironment) -> Effects {
        let Some(current) = state.get(id).map(|t| t.title.clone()) else {
            state.editors.remove(&id);
            return SmallVec::new();
        };
        let Some(editor) = state.editors.get_mut(&id) else {
            return SmallVec::new();
        };

        match editor.commit(&current) {
            None => SmallVec::new(),
            Some(EditCommit::Unchanged) => {
                state.editors.remove(&id);
                SmallVec::new()
            },
            Some(EditCommit::Delete) => Self::delete(state, id, env),
            Some(EditCommit::Rename(title)) => Self::edit(state, id, title, env),
        }
    }

    /// Report a settled delete or rename to the item's title field
    fn settle_editor(state: &mut ListState, id: TodoId, succeeded: bool) {
        let original = state.get(id).map(|t| t.title.clone());
        let Some(editor) = state.editors.get_mut(&id) else {
            return;
        };

        match original {
            Some(original) => editor.settle(succeeded, &original),
            None => editor.cancel(),
        }
        if !editor.is_editing() {
            state.editors.remove(&id);
        }
    }
}

impl Default for ListReducer {
    fn default() -> Self {
        Self::new()
    }
}

impl Reducer for ListReducer {
    type State = ListState;
    type Action = ListAction;
    type Environment = ListEnvironment;

    #[allow(clippy::too_many_lines)] // One arm per action
    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        if Self::issues_request(&action) && !env.owner.is_set() {
            tracing::warn!(?action, "No owner configured, request not sent");
            return SmallVec::new();
        }

        match action {
            // ========== Loading ==========
            ListAction::Load => Self::load(state, env),

            ListAction::TodosLoaded { todos } => {
                state.replace_todos(todos);
                state.loading = false;
                Self::refocus_when_idle(state, env).into_iter().collect()
            },

            ListAction::LoadFailed => {
                state.loading = false;
                let mut effects = Self::show_notice(state, Notice::LoadFailed, env);
                effects.extend(Self::refocus_when_idle(state, env));
                effects
            },

            // ========== Creating ==========
            ListAction::TitleInputChanged { text } => {
                if !state.input_disabled() {
                    state.title_input = text;
                }
                SmallVec::new()
            },

            ListAction::Create => Self::create(state, env),

            ListAction::TodoCreated { todo } => {
                state.upsert(todo);
                state.title_input.clear();
                state.temp_todo = None;
                state.creating = false;
                Self::refocus_when_idle(state, env).into_iter().collect()
            },

            ListAction::CreateFailed => {
                state.temp_todo = None;
                state.creating = false;
                let mut effects = Self::show_notice(state, Notice::AddFailed, env);
                effects.extend(Self::refocus_when_idle(state, env));
                effects
            },

            // ========== Deleting ==========
            ListAction::Delete { id } => Self::delete(state, id, env),

            ListAction::Deleted { id } => {
                state.remove_all(&[id]);
                state.processing.release(id);
                smallvec![Self::focus_input(env)]
            },

            ListAction::DeleteFailed { id } => {
                state.processing.release(id);
                Self::settle_editor(state, id, false);
                let mut effects = Self::show_notice(state, Notice::DeleteFailed, env);
                effects.push(Self::focus_input(env));
                effects
            },

            ListAction::ClearCompleted => Self::clear_completed(state, env),

            ListAction::CompletedCleared { deleted, failed } => {
                state.remove_all(&deleted);
                state.processing.release_all(&deleted);
                state.processing.release_all(&failed);

                let mut effects = if failed.is_empty() {
                    SmallVec::new()
                } else {
                    Self::show_notice(state, Notice::DeleteFailed, env)
                };
                effects.push(Self::focus_input(env));
                effects
            },

            // ========== Toggling ==========
            ListAction::Toggle { id } => Self::toggle(state, id, env),

            ListAction::Toggled { id, completed } => {
                if let Some(todo) = state.get_mut(id) {
                    todo.completed = completed;
                }
                state.processing.release(id);
                SmallVec::new()
            },

            ListAction::ToggleFailed { id } => {
                state.processing.release(id);
                Self::show_notice(state, Notice::UpdateFailed, env)
            },

            ListAction::ToggleAll => Self::toggle_all(state, env),

            ListAction::AllToggled { updated, failed } => {
                for confirmed in &updated {
                    if let Some(todo) = state.get_mut(confirmed.id) {
                        todo.completed = confirmed.completed;
                    }
                    state.processing.release(confirmed.id);
                }
                state.processing.release_all(&failed);

                if failed.is_empty() {
                    SmallVec::new()
                } else {
                    Self::show_notice(state, Notice::UpdateFailed, env)
                }
            },

            // ========== Editing ==========
            ListAction::Edit { id, title } => Self::edit(state, id, title, env),

            ListAction::Edited { id, title } => {
                if let Some(todo) = state.get_mut(id) {
                    todo.title = title;
                }
                state.processing.release(id);
                Self::settle_editor(state, id, true);
                SmallVec::new()
            },

            ListAction::EditFailed { id } => {
                state.processing.release(id);
                Self::settle_editor(state, id, false);
                Self::show_notice(state, Notice::UpdateFailed, env)
            },

            ListAction::BeginEdit { id } => {
                // A cancelled commit may still be in flight; its outcome must not
                // settle a newer field
                if state.processing.contains(id) {
                    tracing::debug!(%id, "Ignoring edit of busy todo");
                    return SmallVec::new();
                }
                if let Some(todo) = state.get(id) {
                    let editor = ItemEditor::begin(&todo.title);
                    state.editors.entry(id).or_insert(editor);
                }
                SmallVec::new()
            },

            ListAction::EditBufferChanged { id, text } => {
                if let Some(editor) = state.editors.get_mut(&id) {
                    editor.set_buffer(text);
                }
                SmallVec::new()
            },

            ListAction::CommitEdit { id } => Self::commit_edit(state, id, env),

            ListAction::CancelEdit { id } => {
                state.editors.remove(&id);
                SmallVec::new()
            },

            // ========== View ==========
            ListAction::SetFilter { filter } => {
                state.filter = filter;
                SmallVec::new()
            },

            ListAction::DismissNotice => smallvec![Self::clear_notice(state)],

            ListAction::NoticeExpired => {
                state.notice = None;
                SmallVec::new()
            },
        }
    }
}
