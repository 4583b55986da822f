//! Bounded notification feed.
//!
//! Keeps the most recent [`MAX_NOTIFICATIONS`] entries; older ones are dropped as new
//! ones arrive. Ids keep increasing even after entries are evicted.

use crate::entities::{Notification, NotificationKind};
use std::collections::VecDeque;

/// How many notifications are retained.
pub const MAX_NOTIFICATIONS: usize = 50;

/// In-memory notification feed owned by the store.
#[derive(Debug, Default)]
pub struct NotificationLog {
    entries: VecDeque<Notification>,
    next_id: u64,
}

impl NotificationLog {
    /// An empty feed.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a notification and returns its id.
    pub fn push(&mut self, message: impl Into<String>, kind: NotificationKind) -> u64 {
        self.next_id += 1;
        self.entries.push_back(Notification {
            id: self.next_id,
            message: message.into(),
            kind,
            timestamp: chrono::Utc::now().naive_utc(),
            read: false,
        });
        while self.entries.len() > MAX_NOTIFICATIONS {
            self.entries.pop_front();
        }
        self.next_id
    }

    /// Copies of the retained notifications, oldest first.
    #[must_use]
    pub fn entries(&self) -> Vec<Notification> {
        self.entries.iter().cloned().collect()
    }

    /// Number of notifications not yet marked read.
    #[must_use]
    pub fn unread_count(&self) -> usize {
        self.entries.iter().filter(|n| !n.read).count()
    }

    /// Marks every retained notification as read.
    pub fn mark_all_read(&mut self) {
        for entry in &mut self.entries {
            entry.read = true;
        }
    }
}
