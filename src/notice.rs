use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    Info,
    Success,
    Warning,
    Error,
}

/// Transient message shown to the user.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
    pub duration_ms: u32,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub posted_at: DateTime<Utc>,
}

impl Notice {
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.posted_at + Duration::milliseconds(self.duration_ms as i64)
    }

    #[inline] pub fn is_expired(&self, now: DateTime<Utc>) -> bool { now >= self.expires_at() }
}

/// Posted notices, oldest first.
#[derive(Clone, Debug, Default)]
pub struct NoticeBoard {
    notices: Vec<Notice>,
}

impl NoticeBoard {
    pub fn new() -> Self { Self::default() }

    pub fn post(&mut self, kind: NoticeKind, message: impl Into<String>, duration_ms: u32, now: DateTime<Utc>) {
        self.notices.push(Notice { kind, message: message.into(), duration_ms, posted_at: now });
    }

    /// Drop expired notices and return the rest.
    pub fn active(&mut self, now: DateTime<Utc>) -> &[Notice] {
        self.notices.retain(|n| !n.is_expired(now));
        &self.notices
    }

    #[inline] pub fn latest(&self) -> Option<&Notice> { self.notices.last() }

    pub fn clear(&mut self) {
        self.notices.clear();
    }
}
