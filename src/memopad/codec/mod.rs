//! # Persistence Formats
//!
//! Memos are persisted as plain text in two independent formats.
//!
//! ## Auto-save ([`autosave`])
//!
//! Full fidelity, including the trash. Rewritten in full after every mutation.
//!
//! ```text
//! MEMO_START
//! {content}
//! [{timestamp}]
//! DELETED:{true|false}
//! DELETED_AT:{epoch_ms}     <- only for deleted memos
//! ID:{id}
//! MEMO_END
//!                           <- blank line after each record
//! ```
//!
//! ## Markdown export ([`markdown`])
//!
//! Lossy and user facing: active memos only, no deletion metadata, no ids.
//!
//! ```text
//! {content}
//! [{timestamp}]
//!
//! {content}
//! [{timestamp}]
//! ```
//!
//! ## Decoding Is Forgiving
//!
//! Both decoders skip what they cannot make sense of instead of failing the whole load.
//! A damaged record costs that record, never the file.
//!
//! ## Known Limits
//!
//! - Auto-save keeps only non-empty content lines, so blank lines inside a memo collapse.
//! - A content line that is exactly `[...]`, or starts with `DELETED`, is read back as
//!   metadata. `ID:` lines are identity only in the last slot before `MEMO_END`.
//! - The Markdown format splits on blank lines, so a memo containing a blank line comes
//!   back as several memos.

pub mod autosave;
pub mod markdown;

/// MIME type of exported files.
pub const MARKDOWN_MIME: &str = "text/markdown";

/// Suggested export file name.
pub const DEFAULT_EXPORT_FILE_NAME: &str = "memo.md";

pub(crate) fn normalize_newlines(text: &str) -> String {
    text.replace("\r\n", "\n")
}
