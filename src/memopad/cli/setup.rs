use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Environment variable holding the tracing filter, e.g. `MEMOPAD_LOG=memopad=debug`.
pub const LOG_ENV: &str = "MEMOPAD_LOG";

#[derive(Parser, Debug)]
#[command(name = "memopad", bin_name = "memopad", version)]
#[command(about = "Keep short Markdown memos with a trash and a default memo", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a memo from the arguments or from piped input
    #[command(alias = "n")]
    New {
        /// Memo text (Markdown). Words are joined with spaces.
        text: Vec<String>,
    },

    /// List active memos
    #[command(alias = "ls")]
    List,

    /// List memos in the trash
    Trash,

    /// Print memos in full
    #[command(alias = "v")]
    View {
        /// Indexes such as 1, d2 or 1-3
        #[arg(required = true, num_args = 1..)]
        indexes: Vec<String>,
    },

    /// Replace a memo's text with the arguments or with piped input
    #[command(alias = "e")]
    Edit {
        /// Index of an active memo
        index: String,

        /// New memo text (Markdown)
        text: Vec<String>,
    },

    /// Move memos to the trash
    #[command(alias = "rm")]
    Delete {
        #[arg(required = true, num_args = 1..)]
        indexes: Vec<String>,
    },

    /// Bring memos back from the trash
    Restore {
        #[arg(required = true, num_args = 1..)]
        indexes: Vec<String>,
    },

    /// Permanently remove memos (the whole trash when no index is given)
    Purge {
        indexes: Vec<String>,
    },

    /// Permanently remove memos deleted more than 30 days ago
    Sweep,

    /// Show, set or clear the default memo
    Default {
        #[command(subcommand)]
        action: Option<DefaultAction>,
    },

    /// Write active memos to a Markdown file
    Export {
        /// Output file (defaults to the configured export file name)
        path: Option<PathBuf>,
    },

    /// Replace active memos with the memos in a Markdown file
    Import { path: PathBuf },

    /// Get or set configuration
    Config {
        /// Config key (edit_timestamp, export_file_name)
        key: Option<String>,

        /// Value to set
        value: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum DefaultAction {
    /// Make an active memo the default memo
    Set { index: String },

    /// Unset the default memo
    Clear,
}

/// Installs the stderr subscriber. `MEMOPAD_LOG` wins over `--verbose`.
pub fn init_tracing(verbose: bool) {
    let fallback = if verbose { "memopad=debug" } else { "warn" };
    let env_filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(fallback));

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_target(verbose)
                .with_writer(std::io::stderr),
        )
        .try_init();
}
