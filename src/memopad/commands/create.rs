use crate::commands::{CmdMessage, CmdResult, PREVIEW_CHARS};
use crate::error::{MemoError, Result};
use crate::store::backend::StorageBackend;
use crate::store::MemoStore;

pub fn run<B: StorageBackend>(store: &mut MemoStore<B>, content: String) -> Result<CmdResult> {
    let content = content.trim().to_string();
    if content.is_empty() {
        return Err(MemoError::Api("Memo content cannot be empty".to_string()));
    }

    let was_default = store.default_memo_id();
    let memo = store.add(content)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Memo created (1): {}",
        memo.preview(PREVIEW_CHARS)
    )));
    if was_default.is_none() && store.default_memo_id() == Some(memo.id) {
        result.add_message(CmdMessage::info("Set as the default memo."));
    }
    Ok(result.with_affected_memos(vec![memo]))
}
