use crate::model::MemoId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MemoError {
    #[error("Memo not found: {0}")]
    NotFound(MemoId),

    #[error("The default memo cannot be deleted ({0}). Choose another default first.")]
    ProtectedDefaultMemo(MemoId),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Api Error: {0}")]
    Api(String),
}

pub type Result<T> = std::result::Result<T, MemoError>;
