//! Notification entity - A short message about something the store did.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Severity of a notification, used by the presentation layer for styling.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    /// Neutral information
    Info,
    /// A mutation completed
    Success,
    /// Something the user should look at
    Warning,
    /// A mutation failed
    Error,
}

/// A single entry in the notification feed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Sequential id, starting at 1
    pub id: u64,
    /// Human-readable text
    pub message: String,
    /// Severity
    pub kind: NotificationKind,
    /// When the notification was posted
    pub timestamp: NaiveDateTime,
    /// Whether the user has seen it
    pub read: bool,
}
