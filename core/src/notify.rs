//! Transient user-facing messages.
//!
//! Each notification carries its own deadline; expired entries are dropped
//! whenever the channel is read. Time comes from `tokio::time::Instant`, so
//! a paused test clock controls expiry.

use std::time::Duration;

use tokio::time::Instant;

pub const DEFAULT_NOTIFICATION_TTL: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub kind: NotificationKind,
    pub expires_at: Instant,
}

#[derive(Debug)]
pub struct Notifier {
    ttl: Duration,
    entries: Vec<Notification>,
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new(DEFAULT_NOTIFICATION_TTL)
    }
}

impl Notifier {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Vec::new(),
        }
    }

    pub fn notify(&mut self, message: impl Into<String>, kind: NotificationKind) {
        self.entries.push(Notification {
            message: message.into(),
            kind,
            expires_at: Instant::now() + self.ttl,
        });
    }

    /// Unexpired notifications, oldest first.
    pub fn visible(&mut self) -> Vec<Notification> {
        let now = Instant::now();
        self.entries.retain(|n| n.expires_at > now);
        self.entries.clone()
    }
}
