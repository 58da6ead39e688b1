use crate::config::MemoConfig;
use crate::index::DisplayMemo;
use crate::model::{Memo, MemoId};
use std::path::PathBuf;

pub mod config;
pub mod create;
pub mod default_memo;
pub mod delete;
pub mod export;
pub mod helpers;
pub mod import;
pub mod list;
pub mod purge;
pub mod restore;
pub mod sweep;
pub mod update;
pub mod view;

/// Where memopad keeps its files.
#[derive(Debug, Clone)]
pub struct MemoPaths {
    pub data_dir: PathBuf,
}

impl MemoPaths {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_memos: Vec<Memo>,
    pub listed_memos: Vec<DisplayMemo>,
    /// The default memo at the time the listing was taken, for marking it in output.
    pub default_memo: Option<MemoId>,
    pub file_path: Option<PathBuf>,
    pub config: Option<MemoConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected_memos(mut self, memos: Vec<Memo>) -> Self {
        self.affected_memos = memos;
        self
    }

    pub fn with_listed_memos(mut self, memos: Vec<DisplayMemo>) -> Self {
        self.listed_memos = memos;
        self
    }

    pub fn with_default_memo(mut self, id: Option<MemoId>) -> Self {
        self.default_memo = id;
        self
    }

    pub fn with_file_path(mut self, path: PathBuf) -> Self {
        self.file_path = Some(path);
        self
    }

    pub fn with_config(mut self, config: MemoConfig) -> Self {
        self.config = Some(config);
        self
    }
}

/// Characters of content shown in one-line summaries.
pub const PREVIEW_CHARS: usize = 30;
