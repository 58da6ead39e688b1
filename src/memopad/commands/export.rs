use crate::codec::{markdown, MARKDOWN_MIME};
use crate::commands::{CmdMessage, CmdResult};
use crate::error::{MemoError, Result};
use crate::store::backend::StorageBackend;
use crate::store::MemoStore;
use std::fs;
use std::path::Path;
use tracing::info;

/// Writes every active memo to `path` in the Markdown export format.
pub fn run<B: StorageBackend>(store: &MemoStore<B>, path: &Path) -> Result<CmdResult> {
    let memos = store.active_memos();
    let text = markdown::encode(&memos);
    fs::write(path, text).map_err(MemoError::Io)?;
    info!(count = memos.len(), path = %path.display(), mime = MARKDOWN_MIME, "Exported memos");

    let mut result = CmdResult::default();
    if memos.is_empty() {
        result.add_message(CmdMessage::warning(format!(
            "No active memos. Wrote an empty file to {}",
            path.display()
        )));
    } else {
        result.add_message(CmdMessage::success(format!(
            "Exported {} memo(s) to {}",
            memos.len(),
            path.display()
        )));
    }
    Ok(result
        .with_affected_memos(memos)
        .with_file_path(path.to_path_buf()))
}
