//! Client-side state: roster, pending intents, loading and form contents.
//!
//! A plain data holder. It performs no I/O and no validation; only the
//! `SyncController` mutates it, and the view renderer reads it.

use crate::types::{FormFields, Student, StudentId};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct StateStore {
    roster: Vec<Student>,
    edit_intent: Option<StudentId>,
    delete_intent: Option<Student>,
    loads_in_flight: usize,
    form: FormFields,
}

impl StateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the roster wholesale. Never patched incrementally.
    pub fn replace_roster(&mut self, records: Vec<Student>) {
        self.roster = records;
    }

    pub fn set_edit_intent(&mut self, id: Option<StudentId>) {
        self.edit_intent = id;
    }

    /// The record is copied so the modal keeps showing it even if a later
    /// refresh drops it from the roster.
    pub fn set_delete_intent(&mut self, candidate: Option<Student>) {
        self.delete_intent = candidate;
    }

    pub fn set_form(&mut self, form: FormFields) {
        self.form = form;
    }

    pub fn reset_form(&mut self) {
        self.form = FormFields::default();
    }

    pub(crate) fn begin_load(&mut self) {
        self.loads_in_flight += 1;
    }

    pub(crate) fn end_load(&mut self) {
        self.loads_in_flight = self.loads_in_flight.saturating_sub(1);
    }

    pub fn roster(&self) -> &[Student] {
        &self.roster
    }

    pub fn find(&self, id: &StudentId) -> Option<&Student> {
        self.roster.iter().find(|s| &s.id == id)
    }

    /// Look a record up by its id as displayed, whatever JSON shape the
    /// server used for it.
    pub fn find_by_label(&self, label: &str) -> Option<&Student> {
        self.roster.iter().find(|s| s.id.to_string() == label)
    }

    pub fn edit_intent(&self) -> Option<&StudentId> {
        self.edit_intent.as_ref()
    }

    pub fn delete_intent(&self) -> Option<&StudentId> {
        self.delete_intent.as_ref().map(|s| &s.id)
    }

    pub fn delete_candidate(&self) -> Option<&Student> {
        self.delete_intent.as_ref()
    }

    pub fn is_editing(&self) -> bool {
        self.edit_intent.is_some()
    }

    /// The confirmation modal is open exactly while a delete intent exists.
    pub fn is_modal_open(&self) -> bool {
        self.delete_intent.is_some()
    }

    pub fn is_loading(&self) -> bool {
        self.loads_in_flight > 0
    }

    pub fn form(&self) -> &FormFields {
        &self.form
    }
}
