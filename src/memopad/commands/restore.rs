use crate::commands::{CmdMessage, CmdResult, PREVIEW_CHARS};
use crate::error::Result;
use crate::index::DisplayIndex;
use crate::store::backend::StorageBackend;
use crate::store::MemoStore;

use super::helpers::{memos_by_indexes, require_indexes};

pub fn run<B: StorageBackend>(
    store: &mut MemoStore<B>,
    indexes: &[DisplayIndex],
) -> Result<CmdResult> {
    require_indexes(indexes)?;
    let targets = memos_by_indexes(store, indexes)?;
    let mut result = CmdResult::default();

    for dm in targets {
        if !dm.memo.is_deleted {
            result.add_message(CmdMessage::info(format!(
                "Memo {} is not in the trash",
                dm.index
            )));
            continue;
        }
        let memo = store.restore(dm.memo.id)?;
        result.add_message(CmdMessage::success(format!(
            "Memo restored ({}): {}",
            dm.index,
            memo.preview(PREVIEW_CHARS)
        )));
        result.affected_memos.push(memo);
    }

    Ok(result)
}
