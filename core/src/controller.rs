//! Orchestrates load/create/update/delete and keeps local state in step
//! with the server.
//!
//! # Design
//! - State lives in an `Rc<RefCell<StateStore>>` owned here and lent to the
//!   renderer. Borrows are never held across an `.await`, so overlapping
//!   operations on the same single-threaded executor interleave freely.
//! - Every mutation is followed by a full `refresh()`; the server's roster is
//!   authoritative and the local copy is never patched.
//! - Overlapping refreshes are not deduplicated: whichever response arrives
//!   last is the roster that stays.
//! - Each operation reports its own outcome through the notifier before
//!   returning, so callers only need the `Result` for logging.

use std::cell::{Ref, RefCell};
use std::rc::Rc;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::error::{SyncError, ValidationError};
use crate::notify::{Notification, NotificationKind, Notifier};
use crate::state::StateStore;
use crate::transport::{StudentApi, Transport};
use crate::types::{FormFields, StudentId};
use crate::validate::validate_student_input;
use crate::view::{render, ViewDescription};

pub const DEFAULT_AUTO_REFRESH: Duration = Duration::from_secs(30);

const LOADED: &str = "Students loaded successfully!";
const LOAD_FAILED: &str = "Failed to load students. Please check if the backend server is running.";
const MISSING_FIELDS: &str = "Please fill in all fields.";
const INVALID_EMAIL: &str = "Please enter a valid email address.";
const ADDED: &str = "Student added successfully!";
const UPDATED: &str = "Student updated successfully!";
const SAVE_FAILED: &str = "Failed to save student. Please try again.";
const EDITING: &str = "Student loaded for editing. Make your changes and click Update.";
const DELETED: &str = "Student deleted successfully!";
const DELETE_FAILED: &str = "Failed to delete student. Please try again.";
const ONLINE: &str = "Connection restored. You can now perform operations.";
const OFFLINE: &str = "You are offline. Some features may not work.";

/// Keyboard commands the controller understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    /// Close the delete modal and/or cancel the active edit.
    Escape,
    /// The refresh shortcut (Ctrl/Cmd+R).
    Refresh,
}

pub struct SyncController<T> {
    api: StudentApi<T>,
    state: Rc<RefCell<StateStore>>,
    notifier: RefCell<Notifier>,
}

impl<T: Transport> SyncController<T> {
    pub fn new(api: StudentApi<T>) -> Self {
        Self::with_notifier(api, Notifier::default())
    }

    pub fn with_notifier(api: StudentApi<T>, notifier: Notifier) -> Self {
        Self {
            api,
            state: Rc::new(RefCell::new(StateStore::new())),
            notifier: RefCell::new(notifier),
        }
    }

    pub fn transport(&self) -> &T {
        self.api.transport()
    }

    pub fn state(&self) -> Ref<'_, StateStore> {
        self.state.borrow()
    }

    /// Shared handle for renderers that outlive a single borrow.
    pub fn shared_state(&self) -> Rc<RefCell<StateStore>> {
        Rc::clone(&self.state)
    }

    pub fn view(&self) -> ViewDescription {
        render(&self.state.borrow())
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.notifier.borrow_mut().visible()
    }

    fn notify(&self, message: &str, kind: NotificationKind) {
        self.notifier.borrow_mut().notify(message, kind);
    }

    /// Reload the roster. On failure the previous roster stays in place.
    pub async fn refresh(&self) -> Result<(), SyncError> {
        self.state.borrow_mut().begin_load();
        let result = self.api.list().await;

        let mut state = self.state.borrow_mut();
        state.end_load();
        match result {
            Ok(records) => {
                info!(count = records.len(), "roster replaced");
                state.replace_roster(records);
                self.notify(LOADED, NotificationKind::Success);
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "failed to load students");
                self.notify(LOAD_FAILED, NotificationKind::Error);
                Err(err.into())
            }
        }
    }

    /// Validate and save the form: update when an edit is in progress,
    /// create otherwise. A failed save leaves form and edit intent alone.
    pub async fn submit(&self, fields: FormFields) -> Result<(), SyncError> {
        self.state.borrow_mut().set_form(fields.clone());

        let input = match validate_student_input(&fields) {
            Ok(input) => input,
            Err(err) => {
                debug!(error = %err, "rejected form input");
                let message = match err {
                    ValidationError::MissingField(_) => MISSING_FIELDS,
                    ValidationError::InvalidEmail => INVALID_EMAIL,
                };
                self.notify(message, NotificationKind::Error);
                return Err(err.into());
            }
        };

        let editing = self.state.borrow().edit_intent().cloned();
        let saved = match &editing {
            Some(id) => self.api.update(id, &input).await,
            None => self.api.create(&input).await,
        };

        if let Err(err) = saved {
            warn!(error = %err, "failed to save student");
            self.notify(SAVE_FAILED, NotificationKind::Error);
            return Err(err.into());
        }

        {
            let mut state = self.state.borrow_mut();
            // Only unbind the form if nobody rebound it while the save was in flight.
            if state.edit_intent() == editing.as_ref() {
                state.set_edit_intent(None);
                state.reset_form();
            }
        }
        let message = if editing.is_some() { UPDATED } else { ADDED };
        self.notify(message, NotificationKind::Success);

        // Reload failures are reported by `refresh` itself.
        let _ = self.refresh().await;
        Ok(())
    }

    /// Bind the form to `id`. Returns `false` (and changes nothing) when the
    /// roster has no such record.
    pub fn begin_edit(&self, id: &StudentId) -> bool {
        let mut state = self.state.borrow_mut();
        let Some(fields) = state.find(id).map(FormFields::from) else {
            debug!(%id, "edit requested for unknown student");
            return false;
        };
        state.set_edit_intent(Some(id.clone()));
        state.set_form(fields);
        self.notify(EDITING, NotificationKind::Success);
        true
    }

    pub fn cancel_edit(&self) {
        let mut state = self.state.borrow_mut();
        state.set_edit_intent(None);
        state.reset_form();
    }

    /// Open the confirmation modal for `id`. Returns `false` when the roster
    /// has no such record.
    pub fn request_delete(&self, id: &StudentId) -> bool {
        let mut state = self.state.borrow_mut();
        let Some(candidate) = state.find(id).cloned() else {
            debug!(%id, "delete requested for unknown student");
            return false;
        };
        state.set_delete_intent(Some(candidate));
        true
    }

    /// Delete the record bound to the open modal. No-op without a delete
    /// intent. On failure the modal stays open on the same record.
    pub async fn confirm_delete(&self) -> Result<(), SyncError> {
        let Some(id) = self.state.borrow().delete_intent().cloned() else {
            return Ok(());
        };

        match self.api.delete(&id).await {
            Ok(reply) => {
                debug!(%id, %reply, "student deleted");
                let mut state = self.state.borrow_mut();
                if state.delete_intent() == Some(&id) {
                    state.set_delete_intent(None);
                }
            }
            Err(err) => {
                warn!(%id, error = %err, "failed to delete student");
                self.notify(DELETE_FAILED, NotificationKind::Error);
                return Err(err.into());
            }
        }
        self.notify(DELETED, NotificationKind::Success);

        let _ = self.refresh().await;
        Ok(())
    }

    /// Close the modal, whatever closed it. Idempotent.
    pub fn dismiss_delete_modal(&self) {
        self.state.borrow_mut().set_delete_intent(None);
    }

    /// Returns `true` when the platform default for the key is suppressed.
    pub async fn handle_key(&self, key: KeyCommand) -> bool {
        match key {
            KeyCommand::Escape => {
                let (modal_open, editing) = {
                    let state = self.state.borrow();
                    (state.is_modal_open(), state.is_editing())
                };
                if modal_open {
                    self.dismiss_delete_modal();
                }
                if editing {
                    self.cancel_edit();
                }
                false
            }
            KeyCommand::Refresh => {
                let _ = self.refresh().await;
                true
            }
        }
    }

    /// Surface a connectivity transition. Pending operations are unaffected.
    pub fn connectivity_changed(&self, online: bool) {
        if online {
            self.notify(ONLINE, NotificationKind::Success);
        } else {
            self.notify(OFFLINE, NotificationKind::Error);
        }
    }

    /// One periodic refresh. Skipped outright while the user is editing or
    /// the delete modal is open. Returns whether a refresh ran.
    pub async fn auto_refresh_tick(&self) -> bool {
        let busy = {
            let state = self.state.borrow();
            state.is_editing() || state.is_modal_open()
        };
        if busy {
            debug!("skipping periodic refresh while user input is pending");
            return false;
        }
        let _ = self.refresh().await;
        true
    }
}
