//! Plain-text presentation of a `ViewDescription`. A terminal is not HTML,
//! so the unescaped text is printed.

use std::fmt::Write;

use student_core::view::FormMode;
use student_core::{ListView, Notification, NotificationKind, ViewDescription};

pub fn render_text(view: &ViewDescription, notifications: &[Notification]) -> String {
    let mut out = String::new();

    for n in notifications {
        let tag = match n.kind {
            NotificationKind::Success => "ok",
            NotificationKind::Error => "error",
        };
        let _ = writeln!(out, "[{tag}] {}", n.message);
    }

    let _ = writeln!(out, "== Students ==");
    match &view.list {
        ListView::Loading => out.push_str("  loading...\n"),
        ListView::Empty => out.push_str("  No students found.\n"),
        ListView::Populated(cards) => {
            for card in cards {
                let raw = &card.raw;
                let _ = writeln!(out, "  #{:<6} {}  <{}>  {}", card.id.to_string(), raw.name, raw.email, raw.course);
            }
        }
    }

    let form = &view.form;
    let heading = match form.mode {
        FormMode::Create => "new student",
        FormMode::Update => "editing (cancel to abort)",
    };
    let _ = writeln!(out, "== Form: {heading} ==");
    let _ = writeln!(out, "  name: {}\n  email: {}\n  course: {}", form.raw.name, form.raw.email, form.raw.course);
    let _ = writeln!(out, "  [{}]", form.submit_label());

    if let Some(modal) = &view.modal {
        let _ = writeln!(out, "== Delete this student? (confirm / dismiss) ==");
        let raw = &modal.raw;
        let _ = writeln!(out, "  {}  <{}>  {}", raw.name, raw.email, raw.course);
    }
    out
}
