use super::backend::StorageBackend;
use super::Preferences;
use crate::error::{MemoError, Result};
use std::cell::{Cell, RefCell};
use std::path::PathBuf;

/// In-memory storage backend for testing.
///
/// Uses `RefCell` for interior mutability since memopad is single-threaded.
/// This avoids the overhead of `RwLock` while still allowing the
/// `StorageBackend` trait to use `&self` for all methods.
#[derive(Default)]
pub struct MemBackend {
    memos: RefCell<Option<String>>,
    preferences: RefCell<Preferences>,
    memo_writes: Cell<usize>,
    simulate_write_error: Cell<bool>,
    simulate_read_error: Cell<bool>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend that already holds an auto-save file.
    pub fn with_autosave(text: impl Into<String>) -> Self {
        let backend = Self::new();
        *backend.memos.borrow_mut() = Some(text.into());
        backend
    }

    pub fn with_preferences(self, prefs: Preferences) -> Self {
        *self.preferences.borrow_mut() = prefs;
        self
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        self.simulate_write_error.set(simulate);
    }

    pub fn set_simulate_read_error(&self, simulate: bool) {
        self.simulate_read_error.set(simulate);
    }

    /// Current auto-save text, as last written.
    pub fn autosave_text(&self) -> Option<String> {
        self.memos.borrow().clone()
    }

    /// Number of successful auto-save writes.
    pub fn memo_writes(&self) -> usize {
        self.memo_writes.get()
    }

    pub fn preferences(&self) -> Preferences {
        *self.preferences.borrow()
    }

    fn check_write(&self) -> Result<()> {
        if self.simulate_write_error.get() {
            return Err(MemoError::Store("Simulated write error".to_string()));
        }
        Ok(())
    }
}

impl StorageBackend for MemBackend {
    fn load_memos(&self) -> Result<Option<String>> {
        if self.simulate_read_error.get() {
            return Err(MemoError::Io(std::io::Error::new(
                std::io::ErrorKind::Other,
                "Simulated read error",
            )));
        }
        Ok(self.memos.borrow().clone())
    }

    fn save_memos(&self, text: &str) -> Result<()> {
        self.check_write()?;
        *self.memos.borrow_mut() = Some(text.to_string());
        self.memo_writes.set(self.memo_writes.get() + 1);
        Ok(())
    }

    fn load_preferences(&self) -> Result<Preferences> {
        Ok(*self.preferences.borrow())
    }

    fn save_preferences(&self, prefs: &Preferences) -> Result<()> {
        self.check_write()?;
        *self.preferences.borrow_mut() = *prefs;
        Ok(())
    }

    fn memos_path(&self) -> PathBuf {
        PathBuf::from("memory://auto_save.md")
    }
}
