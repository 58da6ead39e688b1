use crate::commands::{CmdMessage, CmdResult, PREVIEW_CHARS};
use crate::config::TimestampPolicy;
use crate::error::{MemoError, Result};
use crate::index::DisplayIndex;
use crate::store::backend::StorageBackend;
use crate::store::MemoStore;

use super::helpers::memos_by_indexes;

/// Replaces the content of one active memo.
pub fn run<B: StorageBackend>(
    store: &mut MemoStore<B>,
    index: DisplayIndex,
    content: String,
    policy: TimestampPolicy,
) -> Result<CmdResult> {
    let content = content.trim().to_string();
    if content.is_empty() {
        return Err(MemoError::Api("Memo content cannot be empty".to_string()));
    }
    if let DisplayIndex::Deleted(_) = index {
        return Err(MemoError::Api(format!(
            "Memo {} is in the trash. Restore it before editing.",
            index
        )));
    }

    let target = memos_by_indexes(store, &[index])?.remove(0);
    if target.memo.content == content {
        let mut result = CmdResult::default();
        result.add_message(CmdMessage::info(format!("No changes to memo {}", index)));
        return Ok(result);
    }

    let updated = store.update(target.memo.id, content, policy)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Memo updated ({}): {}",
        index,
        updated.preview(PREVIEW_CHARS)
    )));
    Ok(result.with_affected_memos(vec![updated]))
}
