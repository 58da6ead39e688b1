use crate::codec::markdown;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::{MemoError, Result};
use crate::store::backend::StorageBackend;
use crate::store::MemoStore;
use std::fs;
use std::path::Path;

/// Replaces the active memos with the contents of a Markdown export. The trash is kept.
pub fn run<B: StorageBackend>(store: &mut MemoStore<B>, path: &Path) -> Result<CmdResult> {
    if !path.is_file() {
        return Err(MemoError::Api(format!("File not found: {}", path.display())));
    }
    let text = fs::read_to_string(path).map_err(MemoError::Io)?;
    let records = markdown::decode(&text);

    let replaced = store.active_memos().len();
    let had_default = store.default_memo_id().is_some();
    let imported = store.replace_active(records)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Imported {} memo(s) from {}, replacing {}",
        imported.len(),
        path.display(),
        replaced
    )));
    if imported.is_empty() {
        result.add_message(CmdMessage::warning("The file held no memos."));
    }
    if had_default && store.default_memo_id().is_none() {
        result.add_message(CmdMessage::warning(
            "The default memo was replaced and is no longer set.",
        ));
    }
    Ok(result
        .with_affected_memos(imported)
        .with_file_path(path.to_path_buf()))
}
