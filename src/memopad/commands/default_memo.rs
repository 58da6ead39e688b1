//! Commands for the default memo: the one shown first when memopad starts.
//!
//! Only an active memo can be the default. While a memo is the default it cannot be
//! deleted or purged, so users pick another default (or clear it) first.

use crate::commands::{CmdMessage, CmdResult, PREVIEW_CHARS};
use crate::error::{MemoError, Result};
use crate::index::{DisplayIndex, DisplayMemo};
use crate::store::backend::StorageBackend;
use crate::store::MemoStore;

use super::helpers::{indexed_memos, memos_by_indexes};

pub fn show<B: StorageBackend>(store: &MemoStore<B>) -> Result<CmdResult> {
    let found = current(store);
    let mut result = CmdResult::default().with_default_memo(store.default_memo_id());

    match found {
        Some(dm) => Ok(result.with_listed_memos(vec![dm])),
        None => {
            result.add_message(CmdMessage::info("No default memo is set."));
            Ok(result)
        }
    }
}

pub fn set<B: StorageBackend>(store: &mut MemoStore<B>, index: DisplayIndex) -> Result<CmdResult> {
    if let DisplayIndex::Deleted(_) = index {
        return Err(MemoError::Api(format!(
            "Memo {} is in the trash and cannot be the default memo",
            index
        )));
    }
    let target = memos_by_indexes(store, &[index])?.remove(0);
    let memo = store.set_default(target.memo.id)?;

    let mut result = CmdResult::default().with_default_memo(Some(memo.id));
    result.add_message(CmdMessage::success(format!(
        "Default memo set ({}): {}",
        index,
        memo.preview(PREVIEW_CHARS)
    )));
    Ok(result.with_affected_memos(vec![memo]))
}

pub fn clear<B: StorageBackend>(store: &mut MemoStore<B>) -> Result<CmdResult> {
    store.clear_default()?;
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success("Default memo cleared."));
    Ok(result)
}

fn current<B: StorageBackend>(store: &MemoStore<B>) -> Option<DisplayMemo> {
    let id = store.default_memo()?.id;
    indexed_memos(store)
        .into_iter()
        .find(|dm| dm.memo.id == id)
}
