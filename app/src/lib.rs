//! Terminal host for the student records client.
//!
//! Supplies the real HTTP transport (ureq on tokio's blocking pool),
//! configuration, and a line-oriented front-end around
//! `student_core::SyncController`.

pub mod command;
pub mod config;
pub mod display;
pub mod error;
pub mod session;
pub mod transport;

pub use config::Config;
pub use error::{AppError, AppResult};
pub use session::{draw, run_session, SessionOptions};
pub use transport::UreqTransport;
