use super::normalize_newlines;
use crate::model::{now_timestamp, Memo, MemoId, MemoRecord};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, warn};

pub const MEMO_START: &str = "MEMO_START";
pub const MEMO_END: &str = "MEMO_END";
const DELETED_PREFIX: &str = "DELETED:";
const DELETED_AT_PREFIX: &str = "DELETED_AT:";

static TIMESTAMP_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\[([^\]]+)\]$").expect("timestamp pattern is valid"));
static ID_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^ID:(\d+)$").expect("id pattern is valid"));

pub fn encode(memos: &[Memo]) -> String {
    let mut out = String::new();
    for memo in memos {
        out.push_str(MEMO_START);
        out.push('\n');
        out.push_str(&memo.content);
        out.push('\n');
        out.push_str(&format!("[{}]\n", memo.timestamp));
        out.push_str(&format!("{}{}\n", DELETED_PREFIX, memo.is_deleted));
        if let Some(at) = memo.deleted_at {
            out.push_str(&format!("{}{}\n", DELETED_AT_PREFIX, at));
        }
        out.push_str(&format!("ID:{}\n", memo.id));
        out.push_str(MEMO_END);
        out.push_str("\n\n");
    }
    out
}

pub fn decode(text: &str) -> Vec<MemoRecord> {
    let text = normalize_newlines(text);
    let mut records = Vec::new();

    for segment in text.split(MEMO_START) {
        if !segment.contains(MEMO_END) {
            if !segment.trim().is_empty() {
                warn!("Skipping auto-save fragment without {}", MEMO_END);
            }
            continue;
        }
        match decode_record(segment) {
            Some(record) => records.push(record),
            None => debug!("Dropping empty auto-save record"),
        }
    }

    records
}

fn decode_record(segment: &str) -> Option<MemoRecord> {
    let lines: Vec<&str> = segment.trim().lines().collect();
    let end = lines.iter().position(|line| line.trim() == MEMO_END)?;
    if end == 0 {
        return None;
    }

    // The identity line is only ever written last, after the metadata.
    let (body, id) = match ID_LINE.captures(lines[end - 1]) {
        Some(caps) => (&lines[..end - 1], caps[1].parse::<i64>().ok().map(MemoId::new)),
        None => (&lines[..end], None),
    };

    let mut is_deleted = false;
    let mut deleted_at = None;
    let mut timestamp = String::new();
    let mut content_lines = Vec::new();

    for line in body {
        if let Some(value) = line.strip_prefix(DELETED_AT_PREFIX) {
            deleted_at = value.trim().parse::<i64>().ok();
        } else if let Some(value) = line.strip_prefix(DELETED_PREFIX) {
            is_deleted = value.trim().eq_ignore_ascii_case("true");
        } else if let Some(caps) = TIMESTAMP_LINE.captures(line) {
            timestamp = caps[1].to_string();
        } else if !line.starts_with("DELETED") && !line.is_empty() {
            content_lines.push(*line);
        }
    }

    let content = content_lines.join("\n").trim().to_string();
    if content.is_empty() && timestamp.is_empty() {
        return None;
    }
    if timestamp.is_empty() {
        timestamp = now_timestamp();
    }

    Some(MemoRecord {
        id,
        content,
        timestamp,
        is_deleted,
        deleted_at,
    })
}
