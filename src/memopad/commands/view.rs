use crate::commands::CmdResult;
use crate::error::Result;
use crate::index::DisplayIndex;
use crate::store::backend::StorageBackend;
use crate::store::MemoStore;

use super::helpers::{memos_by_indexes, require_indexes};

pub fn run<B: StorageBackend>(store: &MemoStore<B>, indexes: &[DisplayIndex]) -> Result<CmdResult> {
    require_indexes(indexes)?;
    let memos = memos_by_indexes(store, indexes)?;
    Ok(CmdResult::default()
        .with_listed_memos(memos)
        .with_default_memo(store.default_memo_id()))
}
