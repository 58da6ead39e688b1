use crate::commands::{CmdMessage, CmdResult, PREVIEW_CHARS};
use crate::error::Result;
use crate::index::DisplayIndex;
use crate::store::backend::StorageBackend;
use crate::store::MemoStore;

use super::helpers::{memos_by_indexes, require_indexes};

/// Moves memos to the trash as one batch. Nothing is deleted if any index is unknown or
/// names the default memo.
pub fn run<B: StorageBackend>(
    store: &mut MemoStore<B>,
    indexes: &[DisplayIndex],
) -> Result<CmdResult> {
    require_indexes(indexes)?;
    let targets = memos_by_indexes(store, indexes)?;

    let ids: Vec<_> = targets.iter().map(|dm| dm.memo.id).collect();
    let deleted = store.soft_delete_batch(&ids)?;

    let mut result = CmdResult::default();
    for (dm, memo) in targets.iter().zip(&deleted) {
        let message = if matches!(dm.index, DisplayIndex::Deleted(_)) {
            CmdMessage::info(format!(
                "Already in trash ({}): {}",
                dm.index,
                memo.preview(PREVIEW_CHARS)
            ))
        } else {
            CmdMessage::success(format!(
                "Memo deleted ({}): {}",
                dm.index,
                memo.preview(PREVIEW_CHARS)
            ))
        };
        result.add_message(message);
    }

    Ok(result.with_affected_memos(deleted))
}
