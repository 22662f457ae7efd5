//! Client core for the student records service.
//!
//! # Overview
//! Validates form input, maps the four REST operations onto plain
//! `HttpRequest`/`HttpResponse` values, and keeps a local roster plus edit
//! and delete intents consistent with the server across asynchronous
//! operations. The host supplies the HTTP round-trip through `Transport` and
//! draws whatever `render` describes.
//!
//! # Design
//! - `StudentClient` is stateless; `StudentApi` adds an injected transport.
//! - `SyncController` owns the `StateStore` and is the only writer.
//! - `render` is pure and escapes all server-supplied text.
//! - Everything runs on one thread; shared state uses `Rc<RefCell<_>>`.

pub mod client;
pub mod controller;
pub mod error;
pub mod http;
pub mod notify;
pub mod state;
pub mod transport;
pub mod types;
pub mod validate;
pub mod view;

pub use client::StudentClient;
pub use controller::{KeyCommand, SyncController, DEFAULT_AUTO_REFRESH};
pub use error::{ApiError, Field, SyncError, ValidationError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use notify::{Notification, NotificationKind, Notifier, DEFAULT_NOTIFICATION_TTL};
pub use state::StateStore;
pub use transport::{StudentApi, Transport};
pub use types::{FormFields, Student, StudentId, StudentInput};
pub use validate::validate_student_input;
pub use view::{render, render_html, ListView, ViewDescription};
