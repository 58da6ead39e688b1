use chrono::{Local, NaiveDateTime, TimeZone};
use colored::Colorize;
use memopad::api::{CmdMessage, MessageLevel};
use memopad::config::MemoConfig;
use memopad::expiry::{self, MILLIS_PER_DAY, RETENTION_DAYS};
use memopad::index::{DisplayIndex, DisplayMemo};
use memopad::model::{MemoId, TIMESTAMP_FORMAT};
use std::time::Duration;
use timeago::Formatter;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const LINE_WIDTH: usize = 100;
const TIME_WIDTH: usize = 16;
const DEFAULT_MARKER: &str = "★";

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

pub(super) fn print_full_memos(memos: &[DisplayMemo], default: Option<MemoId>) {
    for (i, dm) in memos.iter().enumerate() {
        if i > 0 {
            println!("\n================================\n");
        }
        let marker = if Some(dm.memo.id) == default {
            format!(" {}", DEFAULT_MARKER)
        } else {
            String::new()
        };
        println!(
            "{} {}{}",
            dm.index.to_string().yellow(),
            dm.memo.timestamp.dimmed(),
            marker.yellow()
        );
        println!("--------------------------------");
        println!("{}", dm.memo.content);
    }
}

pub(super) fn print_memos(memos: &[DisplayMemo], default: Option<MemoId>) {
    if memos.is_empty() {
        println!("No memos yet.");
        return;
    }

    for dm in memos {
        let time = elapsed_since(&dm.memo.timestamp)
            .map(format_time_ago)
            .unwrap_or_else(|| dm.memo.timestamp.clone());
        let marker = if Some(dm.memo.id) == default {
            DEFAULT_MARKER
        } else {
            " "
        };
        print_row(dm, marker, &time);
    }
}

pub(super) fn print_trash(memos: &[DisplayMemo], now_ms: i64) {
    if memos.is_empty() {
        println!("Trash is empty.");
        return;
    }

    for dm in memos {
        let time = match dm.memo.deleted_at {
            Some(at) if expiry::is_expired(Some(at), now_ms) => "expired".to_string(),
            Some(at) => {
                let days = expiry::remaining_millis(at, now_ms) / MILLIS_PER_DAY;
                format!("{}, {}d left", format_time_ago(now_ms.saturating_sub(at)), days)
            }
            None => "no deletion time".to_string(),
        };
        print_row(dm, " ", &time);
    }
    println!(
        "{}",
        format!(
            "Memos in the trash are purged {} days after deletion.",
            RETENTION_DAYS
        )
        .dimmed()
    );
}

pub(super) fn print_config(config: &MemoConfig) {
    for (key, value) in config.entries() {
        println!("{:<18} {}", key.bold(), value);
    }
}

fn print_row(dm: &DisplayMemo, marker: &str, time: &str) {
    let idx_str = format!("{}. ", dm.index);
    let left_prefix = format!("  {} ", marker);
    let time_width = time.width().max(TIME_WIDTH);
    let fixed_width = left_prefix.width() + idx_str.width() + time_width;
    let available = LINE_WIDTH.saturating_sub(fixed_width);

    let preview = truncate_to_width(&dm.memo.preview(available), available);
    let padding = available.saturating_sub(preview.width());

    let idx_colored = match dm.index {
        DisplayIndex::Active(_) => idx_str.normal(),
        DisplayIndex::Deleted(_) => idx_str.red(),
    };

    println!(
        "{}{}{}{}{}",
        left_prefix.yellow(),
        idx_colored,
        preview,
        " ".repeat(padding),
        format!("{:>width$}", time, width = time_width).dimmed()
    );
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    let mut result = String::new();
    let mut current_width = 0;

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }

    result
}

/// Formats an elapsed span in milliseconds, e.g. `3 days ago`.
fn format_time_ago(elapsed_ms: i64) -> String {
    let formatter = Formatter::new();
    let elapsed = Duration::from_millis(elapsed_ms.max(0) as u64);
    formatter.convert(elapsed)
}

/// Milliseconds since a memo timestamp, if it parses.
fn elapsed_since(timestamp: &str) -> Option<i64> {
    let naive = NaiveDateTime::parse_from_str(timestamp, TIMESTAMP_FORMAT).ok()?;
    let at = Local.from_local_datetime(&naive).single()?;
    Some(Local::now().signed_duration_since(at).num_milliseconds())
}
