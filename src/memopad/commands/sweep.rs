use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::expiry::RETENTION_DAYS;
use crate::store::backend::StorageBackend;
use crate::store::MemoStore;

/// Purges trashed memos older than the retention window.
pub fn run<B: StorageBackend>(store: &mut MemoStore<B>, now_ms: i64) -> Result<CmdResult> {
    let swept = store.sweep_expired(now_ms)?;

    let mut result = CmdResult::default();
    if swept.is_empty() {
        result.add_message(CmdMessage::info("No expired memos."));
    } else {
        result.add_message(CmdMessage::success(format!(
            "Purged {} memo(s) deleted more than {} days ago",
            swept.len(),
            RETENTION_DAYS
        )));
    }
    Ok(result.with_affected_memos(swept))
}
