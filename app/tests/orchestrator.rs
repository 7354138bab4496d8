//! End-to-end tests for the list orchestrator running in a Store
//!
//! Requests go to `MockTodoApi`; focus requests are counted by `RecordingFocus`.

#![allow(clippy::unwrap_used)] // Test code can use unwrap

use std::sync::Arc;
use std::time::Duration;
use todoflow::{EditMode, ListAction, ListEnvironment, ListReducer, ListState, ListStore, Notice};
use todoflow_core::api::TodoApi;
use todoflow_core::todo::{NewTodo, OwnerId, Todo, TodoId, TodoPatch};
use todoflow_testing::fixtures::{todo, TEST_OWNER};
use todoflow_testing::{ApiCall, MockTodoApi, RecordingFocus};

struct Harness {
    store: ListStore,
    api: MockTodoApi,
    focus: RecordingFocus,
}

impl Harness {
    /// Server and local list both hold `todos`
    fn with(todos: Vec<Todo>) -> Self {
        Self::for_owner(TEST_OWNER, todos)
    }

    fn for_owner(owner: OwnerId, todos: Vec<Todo>) -> Self {
        let api = MockTodoApi::with_todos(todos.clone());
        let focus = RecordingFocus::new();
        let env = ListEnvironment::new(Arc::new(api.clone()), Arc::new(focus.clone()), owner);
        let store = ListStore::new(ListState::with_todos(todos), ListReducer::new(), env);
        Self { store, api, focus }
    }

    /// Send and wait until the request the action issued has been reconciled
    async fn send(&self, action: ListAction) {
        self.store.send(action).await.wait().await;
    }

    async fn state<T>(&self, f: impl FnOnce(&ListState) -> T) -> T {
        self.store.state(f).await
    }
}

/// Let spawned follow-up effects run without reaching any notice timer
async fn settle() {
    tokio::time::sleep(Duration::from_millis(10)).await;
}

fn id(raw: u64) -> TodoId {
    TodoId::new(raw)
}

// ========== Loading ==========

#[tokio::test(start_paused = true)]
async fn load_replaces_collection_and_focuses_input() {
    let h = Harness::with(vec![]);
    h.api.create(NewTodo::new("buy milk", TEST_OWNER)).await.unwrap();

    h.send(ListAction::Load).await;
    settle().await;

    assert_eq!(h.state(|s| s.todos.clone()).await, vec![todo(1, "buy milk", false)]);
    assert!(!h.state(|s| s.loading).await);
    assert_eq!(h.focus.count(), 1);
}

#[tokio::test(start_paused = true)]
async fn load_failure_notice_clears_after_three_seconds() {
    let h = Harness::with(vec![]);
    h.api.fail_list();

    h.send(ListAction::Load).await;
    assert!(!h.state(|s| s.loading).await);
    assert_eq!(h.state(|s| s.notice).await, Some(Notice::LoadFailed));

    tokio::time::sleep(Duration::from_millis(2990)).await;
    assert_eq!(h.state(|s| s.notice).await, Some(Notice::LoadFailed));

    tokio::time::sleep(Duration::from_millis(20)).await;
    assert_eq!(h.state(|s| s.notice).await, None);
}

#[tokio::test(start_paused = true)]
async fn unset_owner_sends_nothing() {
    let h = Harness::for_owner(OwnerId::default(), vec![todo(1, "buy milk", true)]);

    h.send(ListAction::Load).await;
    h.send(ListAction::ToggleAll).await;
    h.send(ListAction::ClearCompleted).await;
    settle().await;

    assert!(h.api.calls().is_empty());
    assert!(!h.state(|s| s.loading).await);
}

// ========== Creating ==========

#[tokio::test(start_paused = true)]
async fn blank_title_is_rejected_without_request() {
    let h = Harness::with(vec![]);

    h.send(ListAction::TitleInputChanged { text: "   ".into() }).await;
    h.store.send(ListAction::Create).await;
    settle().await;

    assert!(h.api.calls().is_empty());
    assert!(h.state(|s| s.todos.is_empty()).await);
    assert_eq!(h.state(|s| s.notice).await, Some(Notice::TitleEmpty));
    assert_eq!(h.focus.count(), 1);
}

#[tokio::test(start_paused = true)]
async fn create_appends_server_record_and_clears_input() {
    let h = Harness::with(vec![]);

    h.send(ListAction::TitleInputChanged { text: " buy milk ".into() }).await;
    h.send(ListAction::Create).await;
    settle().await;

    assert_eq!(
        h.api.calls(),
        vec![ApiCall::Create(NewTodo::new("buy milk", TEST_OWNER))]
    );
    assert_eq!(h.state(|s| s.todos.clone()).await, vec![todo(1, "buy milk", false)]);
    assert_eq!(h.state(|s| s.title_input.clone()).await, "");
    assert!(h.state(|s| s.temp_todo.is_none() && !s.creating).await);
    assert_eq!(h.focus.count(), 1);
}

#[tokio::test(start_paused = true)]
async fn create_failure_leaves_collection_empty() {
    let h = Harness::with(vec![]);
    h.api.fail_create();

    h.send(ListAction::TitleInputChanged { text: "buy milk".into() }).await;
    h.send(ListAction::Create).await;

    assert!(h.state(|s| s.todos.is_empty()).await);
    assert!(h.state(|s| s.temp_todo.is_none()).await);
    assert_eq!(h.state(|s| s.title_input.clone()).await, "buy milk");
    assert_eq!(h.state(|s| s.notice).await, Some(Notice::AddFailed));
}

#[tokio::test(start_paused = true)]
async fn placeholder_is_shown_while_create_is_in_flight() {
    let h = Harness::with(vec![]);
    h.api.hold();

    h.send(ListAction::TitleInputChanged { text: "buy milk".into() }).await;
    let mut pending = h.store.send(ListAction::Create).await;
    settle().await;

    let view = h.state(ListState::view).await;
    assert_eq!(view.items.len(), 1);
    assert!(view.items[0].id.is_placeholder());
    assert!(view.items[0].busy);
    assert!(view.input_disabled);
    assert_eq!(h.focus.count(), 0);

    h.api.release();
    pending.wait().await;

    let view = h.state(ListState::view).await;
    assert_eq!(view.items.len(), 1);
    assert!(!view.items[0].busy);
    assert!(!view.input_disabled);
}

// ========== Deleting ==========

#[tokio::test(start_paused = true)]
async fn delete_removes_confirmed_todo() {
    let h = Harness::with(vec![todo(1, "buy milk", false), todo(2, "walk dog", false)]);

    h.send(ListAction::Delete { id: id(1) }).await;
    settle().await;

    assert_eq!(h.state(|s| s.todos.clone()).await, vec![todo(2, "walk dog", false)]);
    assert_eq!(h.focus.count(), 1);
}

#[tokio::test(start_paused = true)]
async fn delete_failure_reaches_caller() {
    let h = Harness::with(vec![todo(1, "buy milk", false)]);
    h.api.fail_remove(id(1));

    let outcome = h
        .store
        .send_and_wait_for(
            ListAction::Delete { id: id(1) },
            |a| matches!(a, ListAction::Deleted { .. } | ListAction::DeleteFailed { .. }),
            Duration::from_secs(1),
        )
        .await
        .unwrap();

    assert_eq!(outcome, ListAction::DeleteFailed { id: id(1) });

    // The outcome is observed before it is reduced
    settle().await;
    assert_eq!(h.state(|s| s.todos.len()).await, 1);
    assert_eq!(h.state(|s| s.notice).await, Some(Notice::DeleteFailed));
}

#[tokio::test(start_paused = true)]
async fn clear_completed_keeps_failed_deletes() {
    let h = Harness::with(vec![todo(1, "buy milk", true), todo(2, "walk dog", false)]);
    h.api.fail_remove(id(1));

    h.send(ListAction::ClearCompleted).await;
    settle().await;

    assert_eq!(h.api.calls(), vec![ApiCall::Remove(id(1))]);
    assert_eq!(
        h.state(|s| s.todos.clone()).await,
        vec![todo(1, "buy milk", true), todo(2, "walk dog", false)]
    );
    assert_eq!(h.state(|s| s.notice).await, Some(Notice::DeleteFailed));
    assert!(h.state(|s| s.processing.is_empty()).await);
    assert_eq!(h.focus.count(), 1);
}

#[tokio::test(start_paused = true)]
async fn clear_completed_fans_out_per_item() {
    let h = Harness::with(vec![
        todo(1, "buy milk", true),
        todo(2, "walk dog", false),
        todo(3, "call mom", true),
        todo(4, "pay rent", true),
    ]);
    h.api.fail_remove(id(3));

    h.send(ListAction::ClearCompleted).await;

    let remaining: Vec<u64> = h.state(|s| s.todos.iter().map(|t| t.id.get()).collect()).await;
    assert_eq!(remaining, vec![2, 3]);
    assert_eq!(h.api.call_count(), 3);
    assert!(h.state(|s| s.processing.is_empty()).await);
}

// ========== Toggling ==========

#[tokio::test(start_paused = true)]
async fn toggle_reconciles_from_server() {
    let h = Harness::with(vec![todo(1, "buy milk", false)]);

    h.send(ListAction::Toggle { id: id(1) }).await;

    assert_eq!(
        h.api.calls(),
        vec![ApiCall::Update(id(1), TodoPatch::completed(true))]
    );
    assert!(h.state(|s| s.todos[0].completed).await);
    assert!(h.state(|s| s.processing.is_empty()).await);
}

#[tokio::test(start_paused = true)]
async fn toggle_failure_keeps_old_value() {
    let h = Harness::with(vec![todo(1, "buy milk", false)]);
    h.api.fail_update(id(1));

    h.send(ListAction::Toggle { id: id(1) }).await;

    assert!(!h.state(|s| s.todos[0].completed).await);
    assert_eq!(h.state(|s| s.notice).await, Some(Notice::UpdateFailed));
    assert!(h.state(|s| s.processing.is_empty()).await);
}

#[tokio::test(start_paused = true)]
async fn toggle_all_only_requests_differing_items() {
    let h = Harness::with(vec![todo(1, "buy milk", true), todo(2, "walk dog", false)]);

    h.send(ListAction::ToggleAll).await;

    assert_eq!(
        h.api.calls(),
        vec![ApiCall::Update(id(2), TodoPatch::completed(true))]
    );
    assert!(h.state(|s| s.todos.iter().all(|t| t.completed)).await);
    assert!(h.state(|s| s.processing.is_empty()).await);
}

#[tokio::test(start_paused = true)]
async fn toggle_all_reopens_when_everything_is_completed() {
    let h = Harness::with(vec![todo(1, "buy milk", true), todo(2, "walk dog", true)]);
    h.api.fail_update(id(2));

    h.send(ListAction::ToggleAll).await;

    assert!(!h.state(|s| s.todos[0].completed).await);
    assert!(h.state(|s| s.todos[1].completed).await);
    assert_eq!(h.state(|s| s.notice).await, Some(Notice::UpdateFailed));
    assert!(h.state(|s| s.processing.is_empty()).await);
}

// ========== Editing ==========

async fn open_editor(h: &Harness, raw: u64, text: &str) {
    h.send(ListAction::BeginEdit { id: id(raw) }).await;
    h.send(ListAction::EditBufferChanged {
        id: id(raw),
        text: text.into(),
    })
    .await;
}

#[tokio::test(start_paused = true)]
async fn unchanged_edit_sends_nothing() {
    let h = Harness::with(vec![todo(1, "buy milk", false)]);

    open_editor(&h, 1, "  buy milk ").await;
    h.send(ListAction::CommitEdit { id: id(1) }).await;

    assert!(h.api.calls().is_empty());
    assert!(h.state(|s| s.editor(id(1)).is_none()).await);
}

#[tokio::test(start_paused = true)]
async fn rename_updates_title_and_closes_editor() {
    let h = Harness::with(vec![todo(1, "buy milk", true)]);

    open_editor(&h, 1, " buy oat milk ").await;
    h.send(ListAction::CommitEdit { id: id(1) }).await;

    assert_eq!(
        h.api.calls(),
        vec![ApiCall::Update(id(1), TodoPatch::title("buy oat milk"))]
    );
    assert_eq!(h.state(|s| s.todos.clone()).await, vec![todo(1, "buy oat milk", true)]);
    assert!(h.state(|s| s.editor(id(1)).is_none()).await);
}

#[tokio::test(start_paused = true)]
async fn failed_rename_restores_original_title() {
    let h = Harness::with(vec![todo(1, "buy milk", false)]);
    h.api.fail_update(id(1));

    open_editor(&h, 1, "buy bread").await;
    h.send(ListAction::CommitEdit { id: id(1) }).await;

    let editor = h.state(|s| s.editor(id(1)).cloned()).await.unwrap();
    assert_eq!(editor.mode(), EditMode::Editing);
    assert_eq!(editor.buffer(), "buy milk");
    assert_eq!(h.state(|s| s.todos[0].title.clone()).await, "buy milk");
    assert_eq!(h.state(|s| s.notice).await, Some(Notice::UpdateFailed));
}

#[tokio::test(start_paused = true)]
async fn emptied_title_deletes() {
    let h = Harness::with(vec![todo(1, "buy milk", false)]);

    open_editor(&h, 1, "   ").await;
    h.send(ListAction::CommitEdit { id: id(1) }).await;

    assert_eq!(h.api.calls(), vec![ApiCall::Remove(id(1))]);
    assert!(h.state(|s| s.todos.is_empty() && s.editors.is_empty()).await);
}

#[tokio::test(start_paused = true)]
async fn failed_delete_from_editor_restores_title() {
    let h = Harness::with(vec![todo(1, "buy milk", false)]);
    h.api.fail_remove(id(1));

    open_editor(&h, 1, "").await;
    h.send(ListAction::CommitEdit { id: id(1) }).await;

    let editor = h.state(|s| s.editor(id(1)).cloned()).await.unwrap();
    assert_eq!(editor.mode(), EditMode::Editing);
    assert!(!editor.is_submitting());
    assert_eq!(editor.buffer(), "buy milk");
    assert_eq!(h.state(|s| s.todos.len()).await, 1);
}

#[tokio::test(start_paused = true)]
async fn double_commit_sends_one_request() {
    let h = Harness::with(vec![todo(1, "buy milk", false)]);
    h.api.hold();

    open_editor(&h, 1, "buy bread").await;
    let mut first = h.store.send(ListAction::CommitEdit { id: id(1) }).await;
    // Blur right after submit
    h.send(ListAction::CommitEdit { id: id(1) }).await;

    h.api.release();
    first.wait().await;

    assert_eq!(h.api.call_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn cancel_during_submit_is_local_only() {
    let h = Harness::with(vec![todo(1, "buy milk", false)]);
    h.api.hold();

    open_editor(&h, 1, "buy bread").await;
    let mut pending = h.store.send(ListAction::CommitEdit { id: id(1) }).await;
    h.send(ListAction::CancelEdit { id: id(1) }).await;
    assert!(h.state(|s| s.editor(id(1)).is_none()).await);

    // The request was not cancelled and its result still lands
    h.api.release();
    pending.wait().await;
    assert_eq!(h.state(|s| s.todos[0].title.clone()).await, "buy bread");
    assert!(h.state(|s| s.editor(id(1)).is_none()).await);
}

#[tokio::test(start_paused = true)]
async fn cancelled_commit_does_not_settle_reopened_field() {
    let h = Harness::with(vec![todo(1, "buy milk", false)]);
    h.api.fail_remove(id(1));
    h.api.hold();

    open_editor(&h, 1, "").await;
    let mut pending = h.store.send(ListAction::CommitEdit { id: id(1) }).await;
    h.send(ListAction::CancelEdit { id: id(1) }).await;

    // Reopening and committing again while the delete is in flight
    open_editor(&h, 1, "second").await;
    h.send(ListAction::CommitEdit { id: id(1) }).await;
    assert!(h.state(|s| s.editor(id(1)).is_none()).await);

    h.api.release();
    pending.wait().await;
    settle().await;

    assert_eq!(h.api.calls(), vec![ApiCall::Remove(id(1))]);
    assert!(h.state(|s| s.editor(id(1)).is_none()).await);
    assert_eq!(h.state(|s| s.todos.clone()).await, vec![todo(1, "buy milk", false)]);

    // Once settled the field opens again
    open_editor(&h, 1, "second").await;
    let editor = h.state(|s| s.editor(id(1)).cloned()).await.unwrap();
    assert_eq!(editor.mode(), EditMode::Editing);
    assert_eq!(editor.buffer(), "second");
}

// ========== Processing markers ==========

#[tokio::test(start_paused = true)]
async fn processing_never_outlives_its_operation() {
    let scenarios: Vec<(ListAction, bool)> = vec![
        (ListAction::Delete { id: id(1) }, false),
        (ListAction::Delete { id: id(1) }, true),
        (ListAction::Toggle { id: id(1) }, false),
        (ListAction::Toggle { id: id(1) }, true),
        (ListAction::Edit { id: id(1), title: "buy bread".into() }, false),
        (ListAction::Edit { id: id(1), title: "buy bread".into() }, true),
        (ListAction::ToggleAll, false),
        (ListAction::ToggleAll, true),
        (ListAction::ClearCompleted, false),
        (ListAction::ClearCompleted, true),
    ];

    for (action, fail) in scenarios {
        let h = Harness::with(vec![todo(1, "buy milk", true), todo(2, "walk dog", false)]);
        if fail {
            h.api.fail_remove(id(1));
            h.api.fail_update(id(1));
        }
        h.api.hold();

        let mut pending = h.store.send(action.clone()).await;
        assert!(
            !h.state(|s| s.processing.is_empty()).await,
            "{action:?} should mark an id"
        );

        h.api.release();
        pending.wait().await;
        assert!(
            h.state(|s| s.processing.is_empty()).await,
            "{action:?} (fail: {fail}) leaked a processing marker"
        );
    }
}

#[tokio::test(start_paused = true)]
async fn overlapping_operations_keep_item_busy_until_both_settle() {
    let h = Harness::with(vec![todo(1, "buy milk", false)]);
    h.api.hold();

    let mut toggle = h.store.send(ListAction::Toggle { id: id(1) }).await;
    let mut edit = h
        .store
        .send(ListAction::Edit {
            id: id(1),
            title: "buy bread".into(),
        })
        .await;
    assert!(h.state(|s| s.is_busy(id(1))).await);

    h.api.release();
    toggle.wait().await;
    edit.wait().await;

    assert!(!h.state(|s| s.is_busy(id(1))).await);
    assert_eq!(h.state(|s| s.todos.clone()).await, vec![todo(1, "buy bread", true)]);
}

// ========== Notices ==========

#[tokio::test(start_paused = true)]
async fn newer_notice_is_not_cleared_by_older_timer() {
    let h = Harness::with(vec![todo(1, "buy milk", false)]);
    h.api.fail_update(id(1));

    // Blank title
    h.store.send(ListAction::Create).await;
    settle().await;
    assert_eq!(h.state(|s| s.notice).await, Some(Notice::TitleEmpty));
    tokio::time::sleep(Duration::from_secs(2)).await;

    h.send(ListAction::Toggle { id: id(1) }).await;
    assert_eq!(h.state(|s| s.notice).await, Some(Notice::UpdateFailed));

    // First notice would have expired here
    tokio::time::sleep(Duration::from_millis(1500)).await;
    assert_eq!(h.state(|s| s.notice).await, Some(Notice::UpdateFailed));

    tokio::time::sleep(Duration::from_secs(2)).await;
    assert_eq!(h.state(|s| s.notice).await, None);
}

#[tokio::test(start_paused = true)]
async fn dismissed_notice_timer_does_not_clear_next_notice() {
    let h = Harness::with(vec![todo(1, "buy milk", false)]);
    h.api.fail_update(id(1));

    h.send(ListAction::Toggle { id: id(1) }).await;
    tokio::time::sleep(Duration::from_secs(1)).await;
    h.send(ListAction::DismissNotice).await;
    assert_eq!(h.state(|s| s.notice).await, None);

    h.api.recover();
    h.api.fail_remove(id(1));
    tokio::time::sleep(Duration::from_secs(1)).await;
    h.send(ListAction::Delete { id: id(1) }).await;

    // Past the dismissed notice's original deadline
    tokio::time::sleep(Duration::from_millis(1500)).await;
    assert_eq!(h.state(|s| s.notice).await, Some(Notice::DeleteFailed));
}

#[tokio::test(start_paused = true)]
async fn view_reflects_collection() {
    let h = Harness::with(vec![
        todo(1, "buy milk", true),
        todo(2, "walk dog", false),
        todo(3, "call mom", false),
    ]);

    h.send(ListAction::SetFilter {
        filter: "active".parse().unwrap(),
    })
    .await;
    let view = h.state(ListState::view).await;

    assert_eq!(view.items.len(), 2);
    assert_eq!(view.items_left_label, "2 items left");
    assert!(view.has_completed);
    assert!(!view.all_completed);
    assert!(view.toggle_all_visible);
}
