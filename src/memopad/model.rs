//! # Domain Model: Memos and Their Lifecycle
//!
//! A [`Memo`] is a short Markdown note. Its identity is a [`MemoId`], its display time is a
//! preformatted string, and it carries soft-delete state.
//!
//! ## Lifecycle
//!
//! ```text
//!            soft_deleted(now)              purge / expiry sweep
//!   Active ───────────────────▶ Deleted ───────────────────────▶ (gone)
//!     ▲                            │
//!     └──────── restored() ────────┘
//! ```
//!
//! Records are values. Transitions return a new `Memo` built from the old one, and the store
//! swaps the new value in by id. Nothing mutates a stored record through a reference.
//!
//! ## Invariants
//!
//! - `deleted_at.is_some() == is_deleted`
//! - `timestamp` is fixed at construction. Content edits go through [`Memo::with_content`],
//!   which keeps it unless the caller asks for a fresh one.
//! - `id` never changes.

use crate::expiry;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Display format of [`Memo::timestamp`].
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn format_timestamp(at: DateTime<Local>) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

/// Current local time as a memo timestamp.
pub fn now_timestamp() -> String {
    format_timestamp(Local::now())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemoId(i64);

impl MemoId {
    pub fn new(raw: i64) -> Self {
        Self(raw)
    }

    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for MemoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for MemoId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(MemoId)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Memo {
    pub id: MemoId,
    pub content: String,
    pub timestamp: String,
    pub is_deleted: bool,
    pub deleted_at: Option<i64>,
}

impl Memo {
    /// Builds an active memo. `timestamp` defaults to now.
    pub fn new(id: MemoId, content: impl Into<String>, timestamp: Option<String>) -> Self {
        Self {
            id,
            content: content.into(),
            timestamp: timestamp.unwrap_or_else(now_timestamp),
            is_deleted: false,
            deleted_at: None,
        }
    }

    /// Rebuilds a memo from decoded fields. Keeps the `deleted_at` / `is_deleted` pairing
    /// intact: a deleted record without a time stays deleted with no time (it will never
    /// expire), a `deleted_at` on an active record is dropped.
    pub fn from_parts(
        id: MemoId,
        content: String,
        timestamp: String,
        is_deleted: bool,
        deleted_at: Option<i64>,
    ) -> Self {
        Self {
            id,
            content,
            timestamp,
            is_deleted,
            deleted_at: if is_deleted { deleted_at } else { None },
        }
    }

    pub fn soft_deleted(&self, now_ms: i64) -> Self {
        Self {
            is_deleted: true,
            deleted_at: Some(now_ms),
            ..self.clone()
        }
    }

    pub fn restored(&self) -> Self {
        Self {
            is_deleted: false,
            deleted_at: None,
            ..self.clone()
        }
    }

    /// Replacement record for an edit. Same id; the timestamp is regenerated only when
    /// `refresh_timestamp` is set.
    pub fn with_content(&self, content: impl Into<String>, refresh_timestamp: bool) -> Self {
        Self {
            content: content.into(),
            timestamp: if refresh_timestamp {
                now_timestamp()
            } else {
                self.timestamp.clone()
            },
            ..self.clone()
        }
    }

    pub fn is_expired(&self, now_ms: i64) -> bool {
        expiry::is_expired(self.deleted_at, now_ms)
    }

    /// Text used by the Markdown export: content followed by the bracketed timestamp.
    pub fn export_text(&self) -> String {
        if self.content.is_empty() {
            format!("[{}]", self.timestamp)
        } else {
            format!("{}\n[{}]", self.content, self.timestamp)
        }
    }

    /// Single-line preview of at most `max_chars` characters.
    pub fn preview(&self, max_chars: usize) -> String {
        let flat: String = self
            .content
            .chars()
            .map(|c| if c == '\n' { ' ' } else { c })
            .collect();
        if flat.chars().count() > max_chars {
            let head: String = flat.chars().take(max_chars).collect();
            format!("{}...", head)
        } else {
            flat
        }
    }
}

/// The id-less form produced by the codecs. An `id` is present only when the source format
/// carried one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoRecord {
    pub id: Option<MemoId>,
    pub content: String,
    pub timestamp: String,
    pub is_deleted: bool,
    pub deleted_at: Option<i64>,
}

impl MemoRecord {
    pub fn active(content: impl Into<String>, timestamp: impl Into<String>) -> Self {
        Self {
            id: None,
            content: content.into(),
            timestamp: timestamp.into(),
            is_deleted: false,
            deleted_at: None,
        }
    }

    pub fn into_memo(self, id: MemoId) -> Memo {
        Memo::from_parts(
            id,
            self.content,
            self.timestamp,
            self.is_deleted,
            self.deleted_at,
        )
    }
}
