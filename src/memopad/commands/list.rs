use crate::commands::CmdResult;
use crate::error::Result;
use crate::index::DisplayIndex;
use crate::store::backend::StorageBackend;
use crate::store::MemoStore;

use super::helpers::indexed_memos;

/// Lists active memos, or the trash when `show_deleted` is set.
pub fn run<B: StorageBackend>(store: &MemoStore<B>, show_deleted: bool) -> Result<CmdResult> {
    let listed: Vec<_> = indexed_memos(store)
        .into_iter()
        .filter(|dm| matches!(dm.index, DisplayIndex::Deleted(_)) == show_deleted)
        .collect();

    Ok(CmdResult::default()
        .with_listed_memos(listed)
        .with_default_memo(store.default_memo_id()))
}
