//! Retention policy for soft-deleted memos.
//!
//! A deleted memo becomes eligible for permanent removal once strictly more than
//! [`RETENTION_DAYS`] have elapsed since its deletion. Memos that were never deleted never
//! expire.

use chrono::Utc;

pub const RETENTION_DAYS: i64 = 30;

pub const MILLIS_PER_DAY: i64 = 86_400_000;

/// Retention window in milliseconds.
pub const RETENTION_MILLIS: i64 = RETENTION_DAYS * MILLIS_PER_DAY;

/// Wall clock in epoch milliseconds. Read on every call.
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

pub fn is_expired(deleted_at: Option<i64>, now_ms: i64) -> bool {
    match deleted_at {
        Some(at) => now_ms.saturating_sub(at) > RETENTION_MILLIS,
        None => false,
    }
}

/// Milliseconds left before a memo deleted at `deleted_at` expires. Zero once expired.
pub fn remaining_millis(deleted_at: i64, now_ms: i64) -> i64 {
    deleted_at
        .saturating_add(RETENTION_MILLIS)
        .saturating_sub(now_ms)
        .max(0)
}
