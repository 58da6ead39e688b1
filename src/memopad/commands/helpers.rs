use crate::error::{MemoError, Result};
use crate::index::{index_memos, DisplayIndex, DisplayMemo};
use crate::store::backend::StorageBackend;
use crate::store::MemoStore;

pub fn indexed_memos<B: StorageBackend>(store: &MemoStore<B>) -> Vec<DisplayMemo> {
    index_memos(store.all_memos())
}

/// Looks up every index against the current listing. Fails on the first index that does not
/// name a memo, before anything is changed.
pub fn memos_by_indexes<B: StorageBackend>(
    store: &MemoStore<B>,
    indexes: &[DisplayIndex],
) -> Result<Vec<DisplayMemo>> {
    let indexed = indexed_memos(store);

    indexes
        .iter()
        .map(|idx| {
            indexed
                .iter()
                .find(|dm| &dm.index == idx)
                .cloned()
                .ok_or_else(|| MemoError::Api(format!("Index {} not found", idx)))
        })
        .collect()
}

pub fn require_indexes(indexes: &[DisplayIndex]) -> Result<()> {
    if indexes.is_empty() {
        return Err(MemoError::Api("No memo index given".to_string()));
    }
    Ok(())
}
