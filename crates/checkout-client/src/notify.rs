//! Transient user-facing notifications

use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

/// One notification shown to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

/// Queue of pending notifications. The shell drains it after each action.
#[derive(Debug, Default)]
pub struct Notices {
    queue: Vec<Notice>,
}

impl Notices {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn success(&mut self, message: impl Into<String>) {
        let message = message.into();
        info!("notice: {}", message);
        self.queue.push(Notice {
            level: NoticeLevel::Success,
            message,
        });
    }

    pub fn error(&mut self, message: impl Into<String>) {
        let message = message.into();
        warn!("notice: {}", message);
        self.queue.push(Notice {
            level: NoticeLevel::Error,
            message,
        });
    }

    pub fn pending(&self) -> &[Notice] {
        &self.queue
    }

    pub fn last(&self) -> Option<&Notice> {
        self.queue.last()
    }

    pub fn has_errors(&self) -> bool {
        self.queue.iter().any(|n| n.level == NoticeLevel::Error)
    }

    pub fn drain(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.queue)
    }
}
