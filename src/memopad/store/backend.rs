use super::Preferences;
use crate::error::Result;
use std::path::PathBuf;

/// Abstract interface for raw storage I/O.
/// This trait handles the "how" of storage (filesystem vs memory),
/// while MemoStore handles the "what" (ordering, lifecycle, pointer upkeep).
pub trait StorageBackend {
    // --- Memo File ---

    /// Read the auto-save text.
    /// Returns Ok(None) when nothing has been saved yet.
    fn load_memos(&self) -> Result<Option<String>>;

    /// Replace the auto-save text.
    /// MUST be atomic (e.g. write to tmp then rename) to avoid partial writes.
    fn save_memos(&self, text: &str) -> Result<()>;

    // --- Preferences ---

    /// Load preferences, defaults when none were saved.
    fn load_preferences(&self) -> Result<Preferences>;

    fn save_preferences(&self, prefs: &Preferences) -> Result<()>;

    /// Where the memo file lives. Virtual for in-memory backends.
    fn memos_path(&self) -> PathBuf;
}
