//! Pure mapping from `StateStore` to a declarative view.
//!
//! # Design
//! `render` decides *what* is visible (loading, empty, populated list, form
//! mode, delete modal) and escapes every server-supplied string on the way
//! out, so nothing downstream can mistake record text for markup.
//! `render_html` turns that description into a page with maud; the already
//! escaped strings are inserted as `PreEscaped`. Each entry also carries the
//! unescaped text in `raw` for surfaces that are not HTML.

use maud::{html, Markup, PreEscaped, DOCTYPE};

use crate::notify::{Notification, NotificationKind};
use crate::state::StateStore;
use crate::types::{FormFields, StudentId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewDescription {
    pub list: ListView,
    pub form: FormView,
    pub modal: Option<DeleteModal>,
}

/// Loading overrides both the list and the empty-state regions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListView {
    Loading,
    Empty,
    Populated(Vec<StudentCard>),
}

/// One roster entry; text fields are HTML-escaped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentCard {
    pub id: StudentId,
    pub name: String,
    pub email: String,
    pub course: String,
    pub raw: FormFields,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Update,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormView {
    pub mode: FormMode,
    pub name: String,
    pub email: String,
    pub course: String,
    pub raw: FormFields,
}

impl FormView {
    pub fn submit_label(&self) -> &'static str {
        match self.mode {
            FormMode::Create => "Add Student",
            FormMode::Update => "Update Student",
        }
    }

    pub fn shows_cancel(&self) -> bool {
        self.mode == FormMode::Update
    }
}

/// Confirmation dialog bound to the current delete intent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteModal {
    pub id: StudentId,
    pub name: String,
    pub email: String,
    pub course: String,
    pub raw: FormFields,
}

/// Escape HTML-significant characters for safe inclusion in markup.
pub fn escape_html(text: &str) -> String {
    html! { (text) }.into_string()
}

pub fn render(state: &StateStore) -> ViewDescription {
    let list = if state.is_loading() {
        ListView::Loading
    } else if state.roster().is_empty() {
        ListView::Empty
    } else {
        ListView::Populated(
            state
                .roster()
                .iter()
                .map(|s| StudentCard {
                    id: s.id.clone(),
                    name: escape_html(&s.name),
                    email: escape_html(&s.email),
                    course: escape_html(&s.course),
                    raw: FormFields::from(s),
                })
                .collect(),
        )
    };

    let fields = state.form();
    let form = FormView {
        mode: if state.is_editing() { FormMode::Update } else { FormMode::Create },
        name: escape_html(&fields.name),
        email: escape_html(&fields.email),
        course: escape_html(&fields.course),
        raw: fields.clone(),
    };

    let modal = state.delete_candidate().map(|s| DeleteModal {
        id: s.id.clone(),
        name: escape_html(&s.name),
        email: escape_html(&s.email),
        course: escape_html(&s.course),
        raw: FormFields::from(s),
    });

    ViewDescription { list, form, modal }
}

pub fn render_html(view: &ViewDescription, notifications: &[Notification]) -> Markup {
    html! {
        (DOCTYPE)
        html {
            head { meta charset="utf-8"; title { "Student Management" } }
            body {
                div id="messageContainer" {
                    @for n in notifications {
                        div class=(format!("message message-{}", kind_class(n.kind))) { (n.message) }
                    }
                }
                section class="form-section" {
                    form id="studentForm" {
                        input name="name" value=(PreEscaped(&view.form.name));
                        input name="email" type="email" value=(PreEscaped(&view.form.email));
                        input name="course" value=(PreEscaped(&view.form.course));
                        button type="submit" { (view.form.submit_label()) }
                        @if view.form.shows_cancel() {
                            button id="cancelEdit" type="button" { "Cancel" }
                        }
                    }
                }
                section class="list-section" {
                    @match &view.list {
                        ListView::Loading => div id="loadingSpinner" { "Loading..." },
                        ListView::Empty => div id="noStudents" { "No students found." },
                        ListView::Populated(cards) => div id="studentsList" {
                            @for card in cards {
                                div class="student-card" data-id=(card.id.to_string()) {
                                    div class="student-name" { (PreEscaped(&card.name)) }
                                    div class="student-email" { (PreEscaped(&card.email)) }
                                    div class="student-course" { (PreEscaped(&card.course)) }
                                }
                            }
                        },
                    }
                }
                @if let Some(modal) = &view.modal {
                    div id="deleteModal" class="modal" {
                        p { "Delete this student?" }
                        span id="deleteStudentName" { (PreEscaped(&modal.name)) }
                        span id="deleteStudentEmail" { (PreEscaped(&modal.email)) }
                        span id="deleteStudentCourse" { (PreEscaped(&modal.course)) }
                        button id="confirmDelete" { "Delete" }
                        button id="cancelDelete" { "Cancel" }
                    }
                }
            }
        }
    }
}

fn kind_class(kind: NotificationKind) -> &'static str {
    match kind {
        NotificationKind::Success => "success",
        NotificationKind::Error => "error",
    }
}
