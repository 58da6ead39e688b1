use crate::commands::{CmdMessage, CmdResult, PREVIEW_CHARS};
use crate::error::Result;
use crate::index::{DisplayIndex, DisplayMemo};
use crate::store::backend::StorageBackend;
use crate::store::MemoStore;

use super::helpers::{indexed_memos, memos_by_indexes};

/// Permanently removes memos. With no indexes, empties the trash.
pub fn run<B: StorageBackend>(
    store: &mut MemoStore<B>,
    indexes: &[DisplayIndex],
) -> Result<CmdResult> {
    let targets: Vec<DisplayMemo> = if indexes.is_empty() {
        indexed_memos(store)
            .into_iter()
            .filter(|dm| matches!(dm.index, DisplayIndex::Deleted(_)))
            .collect()
    } else {
        memos_by_indexes(store, indexes)?
    };

    if targets.is_empty() {
        let mut res = CmdResult::default();
        res.add_message(CmdMessage::info("No memos to purge."));
        return Ok(res);
    }

    let ids: Vec<_> = targets.iter().map(|dm| dm.memo.id).collect();
    let removed = store.purge_batch(&ids)?;

    let mut result = CmdResult::default();
    for (dm, memo) in targets.iter().zip(&removed) {
        result.add_message(CmdMessage::success(format!(
            "Purged: {} {}",
            dm.index,
            memo.preview(PREVIEW_CHARS)
        )));
    }

    Ok(result.with_affected_memos(removed))
}
