//! # Memopad Architecture
//!
//! Memopad is a **UI-agnostic memo library**: short Markdown notes with a soft-delete trash,
//! a 30-day expiry, a default memo shown at launch, and flat-file persistence. The
//! `memopad` binary is one client of it.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, prints results, installs tracing       │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! │  - Normalizes inputs (index strings → DisplayIndex)         │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - One module per user operation, returns CmdResult         │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - MemoStore: ordered memos, default pointer, write-through │
//! │  - StorageBackend: FsBackend (production), MemBackend (test)│
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Codec (codec/) and Model (model.rs, expiry.rs)             │
//! │  - Auto-save and Markdown text formats                      │
//! │  - Memo records, lifecycle transitions, retention rule      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! From `api.rs` inward, code takes Rust arguments and returns `Result<CmdResult>` or plain
//! values. It never writes to stdout/stderr and never exits the process. Diagnostics go
//! through `tracing`; the binary decides where they end up.
//!
//! ## Testing Strategy
//!
//! 1. **Model, codec, store**: unit tests against [`store::memory::InMemoryStore`] and the
//!    fixtures in `store::memory::fixtures`.
//! 2. **Commands**: business rules per operation, also in memory.
//! 3. **API**: dispatch and input parsing.
//! 4. **Binary**: `tests/` drive the real executable against a temporary data directory.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`commands`]: Business logic for each command
//! - [`store`]: Memo store, storage backends, preferences
//! - [`codec`]: Auto-save and Markdown export formats
//! - [`model`]: `Memo`, `MemoId`, `MemoRecord`
//! - [`expiry`]: Trash retention rule
//! - [`index`]: Display indexing (`1`, `d1` notation)
//! - [`config`]: Configuration management
//! - [`error`]: Error types

pub mod api;
pub mod codec;
pub mod commands;
pub mod config;
pub mod error;
pub mod expiry;
pub mod index;
pub mod model;
pub mod store;
