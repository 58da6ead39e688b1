//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer. It is the single entry point
//! for every memopad operation, whatever the UI. The list view and the trash view both go
//! through the same `MemoApi` value; there is no global instance.
//!
//! ## Role and Responsibilities
//!
//! The API facade:
//! - **Dispatches** to the appropriate command function
//! - **Normalizes inputs** (index strings such as `3`, `d2` or `1-4` become [`DisplayIndex`])
//! - **Applies configuration** (timestamp policy on edit, export file name)
//! - **Returns structured types** (`Result<CmdResult>`)
//!
//! It does no terminal I/O and holds no business rules; those live in `commands/*.rs` and
//! the store.
//!
//! ## Generic Over StorageBackend
//!
//! `MemoApi<B: StorageBackend>` owns a `MemoStore<B>`:
//! - Production: `MemoApi<FsBackend>`
//! - Testing: `MemoApi<MemBackend>`

use crate::commands;
use crate::config::MemoConfig;
use crate::error::{MemoError, Result};
use crate::expiry::now_millis;
use crate::index::{parse_indexes, DisplayIndex};
use crate::store::backend::StorageBackend;
use crate::store::MemoStore;
use std::path::{Path, PathBuf};

/// The main API facade for memopad operations.
pub struct MemoApi<B: StorageBackend> {
    store: MemoStore<B>,
    paths: commands::MemoPaths,
    config: MemoConfig,
}

impl<B: StorageBackend> MemoApi<B> {
    pub fn new(store: MemoStore<B>, paths: commands::MemoPaths, config: MemoConfig) -> Self {
        Self {
            store,
            paths,
            config,
        }
    }

    /// What a UI does when it opens: purge expired trash, then present the default memo.
    pub fn startup(&mut self) -> Result<commands::CmdResult> {
        let swept = commands::sweep::run(&mut self.store, now_millis())?;
        let mut result = commands::default_memo::show(&self.store)?;
        if !swept.affected_memos.is_empty() {
            let mut messages = swept.messages;
            messages.append(&mut result.messages);
            result.messages = messages;
        }
        Ok(result.with_affected_memos(swept.affected_memos))
    }

    pub fn create_memo(&mut self, content: String) -> Result<commands::CmdResult> {
        commands::create::run(&mut self.store, content)
    }

    pub fn list_memos(&self) -> Result<commands::CmdResult> {
        commands::list::run(&self.store, false)
    }

    pub fn list_trash(&self) -> Result<commands::CmdResult> {
        commands::list::run(&self.store, true)
    }

    pub fn view_memos<I: AsRef<str>>(&self, indexes: &[I]) -> Result<commands::CmdResult> {
        let indexes = parse_index_args(indexes)?;
        commands::view::run(&self.store, &indexes)
    }

    pub fn update_memo(&mut self, index: &str, content: String) -> Result<commands::CmdResult> {
        let index = parse_single_index(index)?;
        commands::update::run(
            &mut self.store,
            index,
            content,
            self.config.edit_timestamp,
        )
    }

    pub fn delete_memos<I: AsRef<str>>(&mut self, indexes: &[I]) -> Result<commands::CmdResult> {
        let indexes = parse_index_args(indexes)?;
        commands::delete::run(&mut self.store, &indexes)
    }

    pub fn restore_memos<I: AsRef<str>>(&mut self, indexes: &[I]) -> Result<commands::CmdResult> {
        let indexes = parse_index_args(indexes)?;
        commands::restore::run(&mut self.store, &indexes)
    }

    /// Purges the given memos, or the whole trash when `indexes` is empty.
    pub fn purge_memos<I: AsRef<str>>(&mut self, indexes: &[I]) -> Result<commands::CmdResult> {
        let indexes = parse_index_args(indexes)?;
        commands::purge::run(&mut self.store, &indexes)
    }

    pub fn sweep_expired(&mut self) -> Result<commands::CmdResult> {
        commands::sweep::run(&mut self.store, now_millis())
    }

    pub fn default_memo(&self) -> Result<commands::CmdResult> {
        commands::default_memo::show(&self.store)
    }

    pub fn set_default_memo(&mut self, index: &str) -> Result<commands::CmdResult> {
        let index = parse_single_index(index)?;
        commands::default_memo::set(&mut self.store, index)
    }

    pub fn clear_default_memo(&mut self) -> Result<commands::CmdResult> {
        commands::default_memo::clear(&mut self.store)
    }

    /// Exports to `path`, or to the configured file name in the current directory.
    pub fn export_memos(&self, path: Option<&Path>) -> Result<commands::CmdResult> {
        let target = path
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(&self.config.export_file_name));
        commands::export::run(&self.store, &target)
    }

    pub fn import_memos(&mut self, path: &Path) -> Result<commands::CmdResult> {
        commands::import::run(&mut self.store, path)
    }

    /// Rewrites the auto-save file. UIs call this when they lose focus or exit.
    pub fn flush(&self) -> Result<()> {
        self.store.flush()
    }

    pub fn config(&mut self, action: ConfigAction) -> Result<commands::CmdResult> {
        let result = commands::config::run(&self.paths, action)?;
        if let Some(config) = &result.config {
            self.config = config.clone();
        }
        Ok(result)
    }

    pub fn paths(&self) -> &commands::MemoPaths {
        &self.paths
    }

    pub fn store(&self) -> &MemoStore<B> {
        &self.store
    }
}

fn parse_index_args<I: AsRef<str>>(inputs: &[I]) -> Result<Vec<DisplayIndex>> {
    let inputs: Vec<String> = inputs.iter().map(|s| s.as_ref().to_string()).collect();
    parse_indexes(&inputs).map_err(MemoError::Api)
}

fn parse_single_index(input: &str) -> Result<DisplayIndex> {
    input.parse().map_err(MemoError::Api)
}

pub use crate::commands::config::ConfigAction;
pub use commands::{CmdMessage, CmdResult, MemoPaths, MessageLevel};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TimestampPolicy;
    use crate::expiry::RETENTION_MILLIS;
    use crate::model::{Memo, MemoId};
    use crate::store::mem_backend::MemBackend;
    use crate::store::memory::InMemoryStore;
    use crate::store::Preferences;
    use tempfile::tempdir;

    fn make_api() -> MemoApi<MemBackend> {
        MemoApi::new(
            InMemoryStore::new(),
            MemoPaths::new(PathBuf::from("/nonexistent/memopad")),
            MemoConfig::default(),
        )
    }

    #[test]
    fn create_then_list() {
        let mut api = make_api();
        api.create_memo("hello".into()).unwrap();
        api.create_memo("world".into()).unwrap();

        let listed = api.list_memos().unwrap();
        assert_eq!(listed.listed_memos.len(), 2);
        assert_eq!(listed.listed_memos[0].memo.content, "world");
    }

    #[test]
    fn delete_accepts_ranges() {
        let mut api = make_api();
        for c in ["default", "a", "b", "c"] {
            api.create_memo(c.into()).unwrap();
        }
        api.delete_memos(&["1-3"]).unwrap();

        assert_eq!(api.list_trash().unwrap().listed_memos.len(), 3);
        assert_eq!(api.list_memos().unwrap().listed_memos.len(), 1);
    }

    #[test]
    fn bad_index_is_an_api_error() {
        let mut api = make_api();
        assert!(matches!(api.delete_memos(&["x1"]), Err(MemoError::Api(_))));
        assert!(matches!(
            api.update_memo("d", "x".into()),
            Err(MemoError::Api(_))
        ));
    }

    #[test]
    fn update_uses_configured_policy() {
        let mut api = MemoApi::new(
            InMemoryStore::new(),
            MemoPaths::new(PathBuf::from("/nonexistent/memopad")),
            MemoConfig {
                edit_timestamp: TimestampPolicy::Refresh,
                ..MemoConfig::default()
            },
        );
        let memo = Memo::new(MemoId::new(1), "old", Some("2000-01-01 00:00:00".into()));
        let text = crate::codec::autosave::encode(&[memo]);
        api.store = MemoStore::open(MemBackend::with_autosave(text)).unwrap();

        let result = api.update_memo("1", "new".into()).unwrap();
        assert_ne!(result.affected_memos[0].timestamp, "2000-01-01 00:00:00");
    }

    #[test]
    fn startup_sweeps_and_shows_default() {
        let now = now_millis();
        let memos = vec![
            Memo::new(MemoId::new(1), "home", None),
            Memo::new(MemoId::new(2), "stale", None).soft_deleted(now - RETENTION_MILLIS - 60_000),
        ];
        let backend = MemBackend::with_autosave(crate::codec::autosave::encode(&memos))
            .with_preferences(Preferences::with_default_memo(Some(MemoId::new(1))));
        let mut api = MemoApi::new(
            MemoStore::open(backend).unwrap(),
            MemoPaths::new(PathBuf::from("/nonexistent/memopad")),
            MemoConfig::default(),
        );

        let result = api.startup().unwrap();
        assert_eq!(result.affected_memos.len(), 1);
        assert_eq!(result.listed_memos[0].memo.content, "home");
        assert!(api.list_trash().unwrap().listed_memos.is_empty());
    }

    #[test]
    fn config_set_applies_to_later_edits() {
        let dir = tempdir().unwrap();
        let mut api = MemoApi::new(
            InMemoryStore::new(),
            MemoPaths::new(dir.path().to_path_buf()),
            MemoConfig::default(),
        );
        api.config(ConfigAction::Set(
            "edit_timestamp".into(),
            "refresh".into(),
        ))
        .unwrap();
        assert_eq!(api.config.edit_timestamp, TimestampPolicy::Refresh);
    }

    #[test]
    fn export_defaults_to_configured_file_name() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("custom.md");
        let mut api = MemoApi::new(
            InMemoryStore::new(),
            MemoPaths::new(dir.path().to_path_buf()),
            MemoConfig {
                export_file_name: path.to_string_lossy().into_owned(),
                ..MemoConfig::default()
            },
        );
        api.create_memo("exported".into()).unwrap();

        let result = api.export_memos(None).unwrap();
        assert_eq!(result.file_path, Some(path.clone()));
        assert!(std::fs::read_to_string(path).unwrap().starts_with("exported\n["));
    }
}
