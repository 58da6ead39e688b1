//! # Storage Layer
//!
//! The store owns the authoritative, in-memory list of every memo (active and deleted) and
//! the default-memo pointer. Raw I/O is delegated to a [`backend::StorageBackend`], so the
//! same [`memo_store::MemoStore`] runs against the filesystem in production and against
//! memory in tests.
//!
//! ## Write-Through
//!
//! Every mutation is computed on a copy of the list, encoded with the auto-save codec and
//! written through the backend. Only after the write succeeds does the copy replace the
//! in-memory list. A failed write leaves the store exactly as it was.
//!
//! ## Deletion Lifecycle
//!
//! - **Soft delete**: `is_deleted = true`, `deleted_at = now`. The memo moves to the trash.
//! - **Restore**: flags cleared, memo keeps its place in the list.
//! - **Purge**: removed from the list and from the next auto-save.
//! - **Expiry sweep**: purges every deleted memo past the retention window.
//!
//! The default memo can be neither soft-deleted nor purged.
//!
//! ## Storage Layout
//!
//! ```text
//! <data dir>/
//! ├── auto_save.md    # Every memo, auto-save format (see crate::codec)
//! ├── prefs.json      # {"default_memo_id": <id or -1>}
//! └── config.json     # User configuration
//! ```

use crate::model::MemoId;
use serde::{Deserialize, Serialize};

pub mod backend;
pub mod fs_backend;
pub mod mem_backend;
pub mod memo_store;
pub mod memory;

pub use memo_store::MemoStore;

/// Sentinel for "no default memo" in the preferences file.
pub const UNSET_MEMO_ID: i64 = -1;

fn unset_memo_id() -> i64 {
    UNSET_MEMO_ID
}

/// Key-value settings kept apart from the memo file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default = "unset_memo_id")]
    pub default_memo_id: i64,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            default_memo_id: UNSET_MEMO_ID,
        }
    }
}

impl Preferences {
    pub fn with_default_memo(id: Option<MemoId>) -> Self {
        Self {
            default_memo_id: id.map(|id| id.as_i64()).unwrap_or(UNSET_MEMO_ID),
        }
    }

    pub fn default_memo(&self) -> Option<MemoId> {
        if self.default_memo_id == UNSET_MEMO_ID {
            None
        } else {
            Some(MemoId::new(self.default_memo_id))
        }
    }
}
