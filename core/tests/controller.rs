//! Scenario tests for the sync controller against a scripted transport.

mod support;

use std::time::Duration;

use student_core::{
    ApiError, FormFields, HttpMethod, HttpResponse, KeyCommand, ListView, NotificationKind, StudentId,
    SyncError, ValidationError,
};
use support::{controller, roster_json};

fn messages(c: &student_core::SyncController<support::ScriptedTransport>) -> Vec<(NotificationKind, String)> {
    c.notifications().into_iter().map(|n| (n.kind, n.message)).collect()
}

fn get_list() -> (HttpMethod, String) {
    (HttpMethod::Get, "/students".to_string())
}

// ---------------------------------------------------------------------------
// refresh
// ---------------------------------------------------------------------------

#[tokio::test]
async fn refresh_replaces_roster() {
    let c = controller();
    c.transport().reply(200, &roster_json(&[(1, "Ada"), (2, "Bob")]));

    c.refresh().await.unwrap();

    let state = c.state();
    assert_eq!(state.roster().len(), 2);
    assert!(!state.is_loading());
    drop(state);
    assert_eq!(c.transport().requests(), vec![get_list()]);
    assert_eq!(
        messages(&c),
        vec![(NotificationKind::Success, "Students loaded successfully!".to_string())]
    );
}

#[tokio::test]
async fn failed_refresh_keeps_previous_roster() {
    let c = controller();
    c.transport().reply(200, &roster_json(&[(1, "Ada")]));
    c.refresh().await.unwrap();
    let before = c.view();

    c.transport().unreachable();
    let err = c.refresh().await.unwrap_err();
    assert!(matches!(err, SyncError::Api(ApiError::Transport(_))));

    c.transport().reply(503, "maintenance");
    let err = c.refresh().await.unwrap_err();
    assert!(matches!(err, SyncError::Api(ApiError::RequestFailed { status: 503, .. })));

    assert_eq!(c.view(), before);
    let errors: Vec<_> = messages(&c)
        .into_iter()
        .filter(|(kind, _)| *kind == NotificationKind::Error)
        .map(|(_, m)| m)
        .collect();
    assert_eq!(errors.len(), 2);
    assert!(errors[0].starts_with("Failed to load students"));
}

#[tokio::test]
async fn loading_view_while_refresh_in_flight() {
    let c = controller();
    let tx = c.transport().deferred();

    let observe = async {
        tokio::task::yield_now().await;
        let during = c.view().list;
        tx.send(HttpResponse::new(200, "[]")).unwrap();
        during
    };
    let (result, during) = futures::join!(c.refresh(), observe);

    result.unwrap();
    assert_eq!(during, ListView::Loading);
    assert_eq!(c.view().list, ListView::Empty);
}

#[tokio::test]
async fn last_completed_refresh_wins() {
    let c = controller();
    let first = c.transport().deferred();
    let second = c.transport().deferred();

    let release = async {
        tokio::task::yield_now().await;
        second.send(HttpResponse::new(200, roster_json(&[(2, "Second")]))).unwrap();
        tokio::task::yield_now().await;
        tokio::task::yield_now().await;
        first.send(HttpResponse::new(200, roster_json(&[(1, "First")]))).unwrap();
    };
    let (a, b, ()) = futures::join!(c.refresh(), c.refresh(), release);
    a.unwrap();
    b.unwrap();

    let state = c.state();
    assert_eq!(state.roster().len(), 1);
    assert_eq!(state.roster()[0].name, "First");
    assert!(!state.is_loading());
}

// ---------------------------------------------------------------------------
// submit
// ---------------------------------------------------------------------------

#[tokio::test]
async fn invalid_input_never_reaches_the_network() {
    let c = controller();

    let err = c.submit(FormFields::new(" ", "a@b.com", "C")).await.unwrap_err();
    assert!(matches!(err, SyncError::Validation(ValidationError::MissingField(_))));

    let err = c.submit(FormFields::new("A", "a@b", "C")).await.unwrap_err();
    assert!(matches!(err, SyncError::Validation(ValidationError::InvalidEmail)));

    assert!(c.transport().requests().is_empty());
    assert_eq!(
        messages(&c),
        vec![
            (NotificationKind::Error, "Please fill in all fields.".to_string()),
            (NotificationKind::Error, "Please enter a valid email address.".to_string()),
        ]
    );
    assert_eq!(c.state().form(), &FormFields::new("A", "a@b", "C"));
}

#[tokio::test]
async fn create_then_resync() {
    let c = controller();
    c.transport().reply(200, r#"{"id":5,"name":"Ada","email":"ada@uni.edu","course":"Physics"}"#);
    c.transport().reply(200, &roster_json(&[(5, "Ada")]));

    c.submit(FormFields::new(" Ada ", "ada@uni.edu", "Physics")).await.unwrap();

    assert_eq!(
        c.transport().requests(),
        vec![(HttpMethod::Post, "/students".to_string()), get_list()]
    );
    assert_eq!(
        c.transport().bodies()[0],
        Some(serde_json::json!({"name":"Ada","email":"ada@uni.edu","course":"Physics"}))
    );
    let state = c.state();
    assert_eq!(state.form(), &FormFields::default());
    assert_eq!(state.roster()[0].id, StudentId::Number(5));
    drop(state);
    assert_eq!(messages(&c)[0].1, "Student added successfully!");
}

#[tokio::test]
async fn edit_submit_updates_then_clears_intent() {
    let c = controller();
    c.transport().reply(200, &roster_json(&[(1, "Old")]));
    c.refresh().await.unwrap();

    assert!(c.begin_edit(&1.into()));
    assert_eq!(c.state().form().name, "Old");

    c.transport().reply(200, r#"{"id":1,"name":"New","email":"new@uni.edu","course":"Physics"}"#);
    c.transport().reply(200, "[]");
    c.submit(FormFields::new("New", "new@uni.edu", "Physics")).await.unwrap();

    assert_eq!(
        c.transport().requests(),
        vec![get_list(), (HttpMethod::Put, "/students/1".to_string()), get_list()]
    );
    let state = c.state();
    assert!(state.edit_intent().is_none());
    assert!(state.roster().is_empty());
    drop(state);
    assert!(messages(&c)
        .iter()
        .any(|(_, m)| m == "Student updated successfully!"));
}

#[tokio::test]
async fn failed_save_leaves_form_and_intent() {
    let c = controller();
    c.transport().reply(200, &roster_json(&[(1, "Old")]));
    c.refresh().await.unwrap();
    c.begin_edit(&1.into());

    c.transport().reply(500, "boom");
    let typed = FormFields::new("Half typed", "new@uni.edu", "Physics");
    let err = c.submit(typed.clone()).await.unwrap_err();
    assert!(matches!(err, SyncError::Api(ApiError::RequestFailed { status: 500, .. })));

    let state = c.state();
    assert_eq!(state.edit_intent(), Some(&StudentId::Number(1)));
    assert_eq!(state.form(), &typed);
    assert_eq!(state.roster()[0].name, "Old");
    drop(state);
    // No resync after a failed save.
    assert_eq!(c.transport().requests().len(), 2);
    assert_eq!(
        messages(&c).last(),
        Some(&(NotificationKind::Error, "Failed to save student. Please try again.".to_string()))
    );
}

// ---------------------------------------------------------------------------
// edit intent
// ---------------------------------------------------------------------------

#[tokio::test]
async fn begin_edit_unknown_id_is_noop() {
    let c = controller();
    assert!(!c.begin_edit(&9.into()));
    assert!(c.state().edit_intent().is_none());
    assert!(c.notifications().is_empty());
}

#[tokio::test]
async fn begin_edit_supersedes_previous_intent() {
    let c = controller();
    c.transport().reply(200, &roster_json(&[(1, "Ada"), (2, "Bob")]));
    c.refresh().await.unwrap();

    c.begin_edit(&1.into());
    c.begin_edit(&2.into());

    let state = c.state();
    assert_eq!(state.edit_intent(), Some(&StudentId::Number(2)));
    assert_eq!(state.form().name, "Bob");
}

#[tokio::test]
async fn cancel_edit_is_idempotent() {
    let c = controller();
    c.transport().reply(200, &roster_json(&[(1, "Ada")]));
    c.refresh().await.unwrap();
    c.begin_edit(&1.into());

    c.cancel_edit();
    let once = c.state().clone();
    c.cancel_edit();
    assert_eq!(*c.state(), once);
    assert!(once.edit_intent().is_none());
    assert_eq!(once.form(), &FormFields::default());
}

// ---------------------------------------------------------------------------
// delete intent
// ---------------------------------------------------------------------------

#[tokio::test]
async fn request_delete_unknown_id_is_noop() {
    let c = controller();
    c.transport().reply(200, &roster_json(&[(1, "Ada")]));
    c.refresh().await.unwrap();

    assert!(!c.request_delete(&2.into()));
    assert!(c.state().delete_intent().is_none());
    assert!(c.view().modal.is_none());
}

#[tokio::test]
async fn failed_delete_keeps_modal_and_retries_same_id() {
    let c = controller();
    c.transport().reply(200, &roster_json(&[(1, "Ada"), (2, "Bob")]));
    c.refresh().await.unwrap();
    assert!(c.request_delete(&2.into()));
    assert_eq!(c.view().modal.map(|m| m.name), Some("Bob".to_string()));

    c.transport().reply(500, "nope");
    assert!(c.confirm_delete().await.is_err());
    assert_eq!(c.state().delete_intent(), Some(&StudentId::Number(2)));
    assert!(c.view().modal.is_some());

    c.transport().reply(200, "Student deleted with ID: 2");
    c.transport().reply(200, &roster_json(&[(1, "Ada")]));
    c.confirm_delete().await.unwrap();

    assert_eq!(
        c.transport().requests(),
        vec![
            get_list(),
            (HttpMethod::Delete, "/students/2".to_string()),
            (HttpMethod::Delete, "/students/2".to_string()),
            get_list(),
        ]
    );
    assert!(c.state().delete_intent().is_none());
    assert!(c.view().modal.is_none());
    let all = messages(&c);
    assert!(all.contains(&(NotificationKind::Error, "Failed to delete student. Please try again.".to_string())));
    assert!(all.contains(&(NotificationKind::Success, "Student deleted successfully!".to_string())));
}

#[tokio::test]
async fn modal_survives_refresh_that_drops_the_record() {
    let c = controller();
    c.transport().reply(200, &roster_json(&[(1, "Ada"), (2, "Bob")]));
    c.refresh().await.unwrap();
    assert!(c.request_delete(&2.into()));

    c.transport().reply(200, &roster_json(&[(1, "Ada")]));
    c.refresh().await.unwrap();
    let modal = c.view().modal.unwrap();
    assert_eq!(modal.id, StudentId::Number(2));
    assert_eq!(modal.name, "Bob");

    c.transport().reply(200, "Student deleted with ID: 2");
    c.transport().reply(200, &roster_json(&[(1, "Ada")]));
    c.confirm_delete().await.unwrap();
    assert_eq!(c.transport().requests()[2], (HttpMethod::Delete, "/students/2".to_string()));
    assert!(c.view().modal.is_none());
}

#[tokio::test]
async fn confirm_without_intent_does_nothing() {
    let c = controller();
    c.confirm_delete().await.unwrap();
    assert!(c.transport().requests().is_empty());
}

#[tokio::test]
async fn dismiss_modal_is_idempotent() {
    let c = controller();
    c.transport().reply(200, &roster_json(&[(1, "Ada")]));
    c.refresh().await.unwrap();
    c.request_delete(&1.into());

    c.dismiss_delete_modal();
    let once = c.state().clone();
    c.dismiss_delete_modal();
    assert_eq!(*c.state(), once);
    assert!(!once.is_modal_open());
}

// ---------------------------------------------------------------------------
// keyboard, connectivity, periodic refresh
// ---------------------------------------------------------------------------

#[tokio::test]
async fn escape_closes_modal_and_cancels_edit() {
    let c = controller();
    c.transport().reply(200, &roster_json(&[(1, "Ada"), (2, "Bob")]));
    c.refresh().await.unwrap();
    c.begin_edit(&1.into());
    c.request_delete(&2.into());

    assert!(!c.handle_key(KeyCommand::Escape).await);

    let state = c.state();
    assert!(!state.is_modal_open());
    assert!(!state.is_editing());
}

#[tokio::test]
async fn refresh_shortcut_suppresses_default() {
    let c = controller();
    c.transport().reply(200, "[]");
    assert!(c.handle_key(KeyCommand::Refresh).await);
    assert_eq!(c.transport().requests(), vec![get_list()]);
}

#[tokio::test]
async fn connectivity_only_notifies() {
    let c = controller();
    c.connectivity_changed(false);
    c.connectivity_changed(true);
    assert_eq!(
        messages(&c),
        vec![
            (NotificationKind::Error, "You are offline. Some features may not work.".to_string()),
            (NotificationKind::Success, "Connection restored. You can now perform operations.".to_string()),
        ]
    );
    assert!(c.transport().requests().is_empty());
}

#[tokio::test]
async fn periodic_refresh_skips_pending_input() {
    let c = controller();
    c.transport().reply(200, &roster_json(&[(1, "Ada")]));
    assert!(c.auto_refresh_tick().await);

    c.begin_edit(&1.into());
    assert!(!c.auto_refresh_tick().await);
    c.cancel_edit();

    c.request_delete(&1.into());
    assert!(!c.auto_refresh_tick().await);
    c.dismiss_delete_modal();

    c.transport().reply(200, "[]");
    assert!(c.auto_refresh_tick().await);
    assert_eq!(c.transport().requests(), vec![get_list(), get_list()]);
}

#[tokio::test(start_paused = true)]
async fn notifications_expire_after_five_seconds() {
    let c = controller();
    c.connectivity_changed(false);
    tokio::time::advance(Duration::from_secs(4)).await;
    assert_eq!(c.notifications().len(), 1);
    tokio::time::advance(Duration::from_secs(1)).await;
    assert!(c.notifications().is_empty());
}
