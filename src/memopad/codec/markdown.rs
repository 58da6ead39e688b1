use super::normalize_newlines;
use crate::model::{now_timestamp, Memo, MemoRecord};
use once_cell::sync::Lazy;
use regex::Regex;

static BRACKETED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[([^\]]+)\]").expect("bracket pattern is valid"));

/// Writes memos as Markdown sections separated by blank lines.
pub fn encode<'a, I>(memos: I) -> String
where
    I: IntoIterator<Item = &'a Memo>,
{
    let mut out = String::new();
    for memo in memos {
        out.push_str(&memo.export_text());
        out.push_str("\n\n");
    }
    out
}

/// Reads sections back into records, in file order.
///
/// The last line of a section is searched for a `[timestamp]`. A last line that is nothing
/// but the bracket is dropped from the content; otherwise the brackets are cut out of every
/// line. Sections without a bracket get the current time.
pub fn decode(text: &str) -> Vec<MemoRecord> {
    let text = normalize_newlines(text);
    let mut records = Vec::new();

    for section in text.split("\n\n") {
        let section = section.trim();
        if section.is_empty() {
            continue;
        }

        let lines: Vec<&str> = section.lines().collect();
        let last = lines.last().copied().unwrap_or_default();

        let record = match BRACKETED.captures(last) {
            Some(caps) => {
                let whole = caps.get(0).map(|m| m.as_str()).unwrap_or_default();
                let timestamp = caps[1].to_string();
                let content_lines: Vec<String> = if last.trim() == whole {
                    lines[..lines.len() - 1]
                        .iter()
                        .map(|line| line.to_string())
                        .collect()
                } else {
                    lines
                        .iter()
                        .map(|line| BRACKETED.replace_all(line, "").trim().to_string())
                        .collect()
                };
                MemoRecord::active(content_lines.join("\n").trim(), timestamp)
            }
            None => MemoRecord::active(section, now_timestamp()),
        };
        records.push(record);
    }

    records
}
