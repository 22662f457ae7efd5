//! Command-line and environment configuration.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use student_core::{DEFAULT_AUTO_REFRESH, DEFAULT_NOTIFICATION_TTL};

#[derive(Debug, Clone, Parser)]
#[command(name = "students", version, about = "Terminal client for the student records service")]
pub struct Config {
    /// Base URL of the backend; `/students` is appended.
    #[arg(long, env = "STUDENTS_API_URL", default_value = "http://localhost:8081")]
    pub base_url: String,

    /// Seconds between periodic refreshes.
    #[arg(long, env = "STUDENTS_REFRESH_SECS", default_value_t = DEFAULT_AUTO_REFRESH.as_secs(), value_parser = clap::value_parser!(u64).range(1..))]
    pub refresh_secs: u64,

    /// Seconds a notification stays visible.
    #[arg(long, default_value_t = DEFAULT_NOTIFICATION_TTL.as_secs(), value_parser = clap::value_parser!(u64).range(1..))]
    pub notification_secs: u64,

    /// Per-request timeout in seconds.
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout_secs: u64,

    /// Also write an HTML snapshot of the page here after every render.
    #[arg(long)]
    pub html_out: Option<PathBuf>,
}

impl Config {
    pub fn refresh_period(&self) -> Duration {
        Duration::from_secs(self.refresh_secs)
    }

    pub fn notification_ttl(&self) -> Duration {
        Duration::from_secs(self.notification_secs)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
