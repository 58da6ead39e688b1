use super::backend::StorageBackend;
use super::Preferences;
use crate::error::{MemoError, Result};
use std::fs;
use std::path::PathBuf;
use uuid::Uuid;

pub const AUTOSAVE_FILE: &str = "auto_save.md";
pub const PREFERENCES_FILE: &str = "prefs.json";

pub struct FsBackend {
    root: PathBuf,
}

impl FsBackend {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(MemoError::Io)?;
        }
        Ok(())
    }

    fn write_atomic(&self, file_name: &str, content: &str) -> Result<()> {
        self.ensure_dir()?;
        let target = self.root.join(file_name);
        let tmp = self.root.join(format!(".{}-{}.tmp", file_name, Uuid::new_v4()));
        fs::write(&tmp, content).map_err(MemoError::Io)?;
        if let Err(e) = fs::rename(&tmp, &target) {
            let _ = fs::remove_file(&tmp);
            return Err(MemoError::Io(e));
        }
        Ok(())
    }
}

impl StorageBackend for FsBackend {
    fn load_memos(&self) -> Result<Option<String>> {
        let path = self.root.join(AUTOSAVE_FILE);
        if !path.exists() {
            return Ok(None);
        }
        let text = fs::read_to_string(path).map_err(MemoError::Io)?;
        Ok(Some(text))
    }

    fn save_memos(&self, text: &str) -> Result<()> {
        self.write_atomic(AUTOSAVE_FILE, text)
    }

    fn load_preferences(&self) -> Result<Preferences> {
        let path = self.root.join(PREFERENCES_FILE);
        if !path.exists() {
            return Ok(Preferences::default());
        }
        let content = fs::read_to_string(path).map_err(MemoError::Io)?;
        let prefs: Preferences =
            serde_json::from_str(&content).map_err(MemoError::Serialization)?;
        Ok(prefs)
    }

    fn save_preferences(&self, prefs: &Preferences) -> Result<()> {
        let content = serde_json::to_string_pretty(prefs).map_err(MemoError::Serialization)?;
        self.write_atomic(PREFERENCES_FILE, &content)
    }

    fn memos_path(&self) -> PathBuf {
        self.root.join(AUTOSAVE_FILE)
    }
}
