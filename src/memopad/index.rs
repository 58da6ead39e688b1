//! # Display Indexes
//!
//! Users never see memo ids. Lists show short positional indexes instead:
//!
//! - `1`, `2`, `3`... for active memos, newest first.
//! - `d1`, `d2`... for memos in the trash, in store order.
//!
//! Indexes are assigned fresh from the store's current order every time a command runs, so
//! an index is only meaningful against the listing it came from. Commands resolve indexes to
//! [`MemoId`](crate::model::MemoId)s before touching the store.

use crate::model::Memo;
use std::str::FromStr;

/// A user-facing index for a memo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DisplayIndex {
    Active(usize),
    Deleted(usize),
}

impl std::fmt::Display for DisplayIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DisplayIndex::Active(i) => write!(f, "{}", i),
            DisplayIndex::Deleted(i) => write!(f, "d{}", i),
        }
    }
}

impl FromStr for DisplayIndex {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(rest) = s.strip_prefix('d') {
            if let Ok(n) = rest.parse::<usize>() {
                if n > 0 {
                    return Ok(DisplayIndex::Deleted(n));
                }
            }
        } else if let Ok(n) = s.parse::<usize>() {
            if n > 0 {
                return Ok(DisplayIndex::Active(n));
            }
        }
        Err(format!("Invalid index format: {}", s))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayMemo {
    pub memo: Memo,
    pub index: DisplayIndex,
}

/// Assigns display indexes to the store's memos, keeping store order.
///
/// Active entries come first, then deleted ones.
pub fn index_memos(memos: &[Memo]) -> Vec<DisplayMemo> {
    let active = memos.iter().filter(|m| !m.is_deleted);
    let deleted = memos.iter().filter(|m| m.is_deleted);

    active
        .enumerate()
        .map(|(i, memo)| DisplayMemo {
            memo: memo.clone(),
            index: DisplayIndex::Active(i + 1),
        })
        .chain(deleted.enumerate().map(|(i, memo)| DisplayMemo {
            memo: memo.clone(),
            index: DisplayIndex::Deleted(i + 1),
        }))
        .collect()
}

/// Parses a single index or an inclusive range such as `2-4` or `d1-d3`.
pub fn parse_index_or_range(s: &str) -> Result<Vec<DisplayIndex>, String> {
    let s = s.trim();
    if let Some(dash_pos) = s.find('-') {
        if dash_pos > 0 {
            let start = DisplayIndex::from_str(&s[..dash_pos])?;
            let end = DisplayIndex::from_str(&s[dash_pos + 1..])?;
            return expand_range(start, end);
        }
    }

    DisplayIndex::from_str(s).map(|idx| vec![idx])
}

/// Parses every input, flattening ranges and dropping repeats.
pub fn parse_indexes(inputs: &[String]) -> Result<Vec<DisplayIndex>, String> {
    let mut out: Vec<DisplayIndex> = Vec::new();
    for input in inputs {
        for idx in parse_index_or_range(input)? {
            if !out.contains(&idx) {
                out.push(idx);
            }
        }
    }
    Ok(out)
}

fn expand_range(start: DisplayIndex, end: DisplayIndex) -> Result<Vec<DisplayIndex>, String> {
    match (start, end) {
        (DisplayIndex::Active(s), DisplayIndex::Active(e)) if s <= e => {
            Ok((s..=e).map(DisplayIndex::Active).collect())
        }
        (DisplayIndex::Deleted(s), DisplayIndex::Deleted(e)) if s <= e => {
            Ok((s..=e).map(DisplayIndex::Deleted).collect())
        }
        (DisplayIndex::Active(_), DisplayIndex::Active(_))
        | (DisplayIndex::Deleted(_), DisplayIndex::Deleted(_)) => Err(format!(
            "Invalid range: start ({}) must be <= end ({})",
            start, end
        )),
        _ => Err(format!(
            "Invalid range: cannot mix index types ({} and {})",
            start, end
        )),
    }
}
