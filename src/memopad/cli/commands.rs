//! # CLI Layer
//!
//! This module is **one possible UI client** for memopad. It stands in for the list screen,
//! the trash screen, the edit dialog and the default-memo chooser of a graphical client.
//!
//! The CLI layer is the **only** place in the codebase that:
//! - Knows about terminal I/O (stdout, stderr, piped stdin)
//! - Uses `std::process::exit`
//! - Handles argument parsing
//! - Installs the tracing subscriber
//!
//! ## Launch
//!
//! Every invocation is an app launch: the store is loaded and expired trash is swept before
//! the command runs. Running with no command is the home screen: the default memo in full,
//! then the memo list.

use super::print::{print_config, print_full_memos, print_memos, print_messages, print_trash};
use super::setup::{init_tracing, Cli, Commands, DefaultAction};
use clap::Parser;
use directories::ProjectDirs;
use memopad::api::{CmdResult, ConfigAction, MemoApi, MemoPaths};
use memopad::config::MemoConfig;
use memopad::error::{MemoError, Result};
use memopad::expiry::now_millis;
use memopad::store::fs_backend::FsBackend;
use memopad::store::MemoStore;
use std::io::{IsTerminal, Read};
use std::path::PathBuf;
use tracing::{debug, info};

/// Overrides the data directory. Used by integration tests and portable setups.
pub const HOME_ENV: &str = "MEMOPAD_HOME";

struct AppContext {
    api: MemoApi<FsBackend>,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut ctx = init_context()?;
    if !matches!(cli.command, None | Some(Commands::Sweep)) {
        let swept = ctx.api.sweep_expired()?;
        if !swept.affected_memos.is_empty() {
            info!(count = swept.affected_memos.len(), "Swept expired memos at launch");
        }
    }

    let outcome = match cli.command {
        Some(Commands::New { text }) => handle_new(&mut ctx, text),
        Some(Commands::List) => handle_list(&ctx),
        Some(Commands::Trash) => handle_trash(&ctx),
        Some(Commands::View { indexes }) => handle_view(&ctx, indexes),
        Some(Commands::Edit { index, text }) => handle_edit(&mut ctx, index, text),
        Some(Commands::Delete { indexes }) => handle_delete(&mut ctx, indexes),
        Some(Commands::Restore { indexes }) => handle_restore(&mut ctx, indexes),
        Some(Commands::Purge { indexes }) => handle_purge(&mut ctx, indexes),
        Some(Commands::Sweep) => handle_sweep(&mut ctx),
        Some(Commands::Default { action }) => handle_default(&mut ctx, action),
        Some(Commands::Export { path }) => handle_export(&ctx, path),
        Some(Commands::Import { path }) => handle_import(&mut ctx, path),
        Some(Commands::Config { key, value }) => handle_config(&mut ctx, key, value),
        None => handle_home(&mut ctx),
    };

    // Leaving the app saves, whatever the command did.
    ctx.api.flush()?;
    outcome
}

fn data_dir() -> Result<PathBuf> {
    if let Some(home) = std::env::var_os(HOME_ENV) {
        return Ok(PathBuf::from(home));
    }
    ProjectDirs::from("com", "memopad", "memopad")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| MemoError::Store("Could not determine a data directory".to_string()))
}

fn init_context() -> Result<AppContext> {
    let data_dir = data_dir()?;
    debug!(path = %data_dir.display(), "Using data directory");

    let config = MemoConfig::load(&data_dir)?;
    let store = MemoStore::open(FsBackend::new(data_dir.clone()))?;
    let api = MemoApi::new(store, MemoPaths::new(data_dir), config);

    Ok(AppContext { api })
}

/// Joins argument words, or reads piped stdin when there are none.
fn read_text(words: Vec<String>) -> Result<String> {
    if !words.is_empty() {
        return Ok(words.join(" "));
    }
    let mut stdin = std::io::stdin();
    if stdin.is_terminal() {
        return Err(MemoError::Api(
            "No memo text given. Pass it as arguments or pipe it in.".to_string(),
        ));
    }
    let mut buffer = String::new();
    stdin.read_to_string(&mut buffer).map_err(MemoError::Io)?;
    Ok(buffer)
}

fn report(result: &CmdResult) {
    print_messages(&result.messages);
}

fn handle_home(ctx: &mut AppContext) -> Result<()> {
    let result = ctx.api.startup()?;
    report(&result);
    if !result.listed_memos.is_empty() {
        print_full_memos(&result.listed_memos, result.default_memo);
        println!();
    }
    handle_list(ctx)
}

fn handle_new(ctx: &mut AppContext, text: Vec<String>) -> Result<()> {
    let content = read_text(text)?;
    let result = ctx.api.create_memo(content)?;
    report(&result);
    Ok(())
}

fn handle_list(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.list_memos()?;
    print_memos(&result.listed_memos, result.default_memo);
    report(&result);
    Ok(())
}

fn handle_trash(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.list_trash()?;
    print_trash(&result.listed_memos, now_millis());
    report(&result);
    Ok(())
}

fn handle_view(ctx: &AppContext, indexes: Vec<String>) -> Result<()> {
    let result = ctx.api.view_memos(&indexes)?;
    print_full_memos(&result.listed_memos, result.default_memo);
    Ok(())
}

fn handle_edit(ctx: &mut AppContext, index: String, text: Vec<String>) -> Result<()> {
    let content = read_text(text)?;
    let result = ctx.api.update_memo(&index, content)?;
    report(&result);
    Ok(())
}

fn handle_delete(ctx: &mut AppContext, indexes: Vec<String>) -> Result<()> {
    let result = ctx.api.delete_memos(&indexes)?;
    report(&result);
    Ok(())
}

fn handle_restore(ctx: &mut AppContext, indexes: Vec<String>) -> Result<()> {
    let result = ctx.api.restore_memos(&indexes)?;
    report(&result);
    Ok(())
}

fn handle_purge(ctx: &mut AppContext, indexes: Vec<String>) -> Result<()> {
    let result = ctx.api.purge_memos(&indexes)?;
    report(&result);
    Ok(())
}

fn handle_sweep(ctx: &mut AppContext) -> Result<()> {
    let result = ctx.api.sweep_expired()?;
    report(&result);
    Ok(())
}

fn handle_default(ctx: &mut AppContext, action: Option<DefaultAction>) -> Result<()> {
    let result = match action {
        None => {
            let result = ctx.api.default_memo()?;
            print_full_memos(&result.listed_memos, result.default_memo);
            result
        }
        Some(DefaultAction::Set { index }) => ctx.api.set_default_memo(&index)?,
        Some(DefaultAction::Clear) => ctx.api.clear_default_memo()?,
    };
    report(&result);
    Ok(())
}

fn handle_export(ctx: &AppContext, path: Option<PathBuf>) -> Result<()> {
    let result = ctx.api.export_memos(path.as_deref())?;
    report(&result);
    Ok(())
}

fn handle_import(ctx: &mut AppContext, path: PathBuf) -> Result<()> {
    let result = ctx.api.import_memos(&path)?;
    report(&result);
    Ok(())
}

fn handle_config(ctx: &mut AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(k), None) => ConfigAction::ShowKey(k),
        (Some(k), Some(v)) => ConfigAction::Set(k, v),
    };
    let show_all = matches!(action, ConfigAction::ShowAll);

    let result = ctx.api.config(action)?;
    if show_all {
        if let Some(config) = &result.config {
            print_config(config);
        }
    }
    report(&result);
    Ok(())
}
