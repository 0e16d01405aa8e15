//! Trim list input.
//!
//! Trim lists are authored by hand, usually as JSON:
//!
//! - flat trims: `[3, 22]` or `[[3, 22], [23, 40], [97, 0]]`
//! - chapters with labels: `[[1, 2, "Intro"], [4, "Part A"], [36, 41, "End"]]`
//! - chapters without labels: `[[1, 2], [4], [36, 41]]`
//!
//! Parsing turns these into typed entries and reports shape and type
//! problems with the index of the offending entry. Range logic (bounds,
//! ordering) is checked later by the planners.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::frames::{TrimError, TrimResult};

/// A trim as written by the user; values may be negative (from the end).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawTrim {
    pub start: i64,
    pub end: i64,
}

impl RawTrim {
    pub fn new(start: i64, end: i64) -> Self {
        Self { start, end }
    }
}

impl From<(i64, i64)> for RawTrim {
    fn from((start, end): (i64, i64)) -> Self {
        Self { start, end }
    }
}

/// A single trim or a list of trims.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrimSpec {
    Single(RawTrim),
    List(Vec<RawTrim>),
}

impl TrimSpec {
    /// Build a list spec from `(start, end)` pairs.
    pub fn list(pairs: impl IntoIterator<Item = (i64, i64)>) -> Self {
        Self::List(pairs.into_iter().map(RawTrim::from).collect())
    }

    /// All trims, in order.
    pub fn trims(&self) -> &[RawTrim] {
        match self {
            TrimSpec::Single(trim) => std::slice::from_ref(trim),
            TrimSpec::List(trims) => trims,
        }
    }
}

/// A chapter entry; the end is inclusive when present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChapterEntry {
    /// Explicit first and last frame.
    Bounded {
        start: i64,
        end: i64,
        label: Option<String>,
    },
    /// Runs until the frame before the next chapter, or to the end.
    OpenEnded { start: i64, label: Option<String> },
}

impl ChapterEntry {
    pub fn bounded(start: i64, end: i64, label: Option<&str>) -> Self {
        Self::Bounded {
            start,
            end,
            label: label.map(str::to_string),
        }
    }

    pub fn open(start: i64, label: Option<&str>) -> Self {
        Self::OpenEnded {
            start,
            label: label.map(str::to_string),
        }
    }

    pub fn start(&self) -> i64 {
        match self {
            ChapterEntry::Bounded { start, .. } | ChapterEntry::OpenEnded { start, .. } => *start,
        }
    }

    /// Explicit end, if the entry has one.
    pub fn end(&self) -> Option<i64> {
        match self {
            ChapterEntry::Bounded { end, .. } => Some(*end),
            ChapterEntry::OpenEnded { .. } => None,
        }
    }

    pub fn label(&self) -> Option<&str> {
        match self {
            ChapterEntry::Bounded { label, .. } | ChapterEntry::OpenEnded { label, .. } => {
                label.as_deref()
            }
        }
    }
}

/// Parse a flat trim spec from JSON text.
pub fn parse_trims_str(text: &str) -> TrimResult<TrimSpec> {
    let value: Value = serde_json::from_str(text)?;
    parse_trims(&value)
}

/// Parse a flat trim spec: one `[start, end]` pair or a list of pairs.
pub fn parse_trims(value: &Value) -> TrimResult<TrimSpec> {
    let items = value
        .as_array()
        .ok_or_else(|| TrimError::shape(None, "trims must be a list of pairs"))?;

    if items.is_empty() {
        return Err(TrimError::shape(None, "trims must contain at least one pair"));
    }

    if !items[0].is_array() {
        if items.len() != 2 {
            return Err(TrimError::shape(None, "a single trim must have 2 elements"));
        }
        return Ok(TrimSpec::Single(parse_pair(items, None)?));
    }

    let trims = items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let pair = item
                .as_array()
                .ok_or_else(|| TrimError::shape(Some(i), "is not a pair"))?;
            if pair.len() != 2 {
                return Err(TrimError::shape(Some(i), "needs 2 elements"));
            }
            parse_pair(pair, Some(i))
        })
        .collect::<TrimResult<Vec<_>>>()?;

    Ok(TrimSpec::List(trims))
}

fn parse_pair(pair: &[Value], index: Option<usize>) -> TrimResult<RawTrim> {
    Ok(RawTrim {
        start: int_at(pair, 0, index)?,
        end: int_at(pair, 1, index)?,
    })
}

/// Parse a chapter list from JSON text.
pub fn parse_chapters_str(text: &str, names: bool) -> TrimResult<Vec<ChapterEntry>> {
    let value: Value = serde_json::from_str(text)?;
    parse_chapters(&value, names)
}

/// Parse a chapter list.
///
/// With `names`, entries are `[start, end, label]` or `[start, label]`;
/// without, `[start, end]` or `[start]`. Every entry of a list must follow
/// the same mode.
pub fn parse_chapters(value: &Value, names: bool) -> TrimResult<Vec<ChapterEntry>> {
    let items = value
        .as_array()
        .ok_or_else(|| TrimError::shape(None, "chapters must be a list"))?;

    let full = if names { 3 } else { 2 };

    items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let index = Some(i);
            let fields = item
                .as_array()
                .ok_or_else(|| TrimError::shape(index, "chapters must all be lists"))?;

            if fields.len() > full {
                let message = if names {
                    "must have at most 2 ints and 1 str"
                } else {
                    "must have at most 2 ints"
                };
                return Err(TrimError::shape(index, message));
            }
            if fields.len() < full - 1 {
                let message = if names {
                    "must have at least 2 elements"
                } else {
                    "must have at least 1 element"
                };
                return Err(TrimError::shape(index, message));
            }

            let start = int_at(fields, 0, index)?;
            if fields.len() == full {
                let end = int_at(fields, 1, index)?;
                let label = if names {
                    Some(str_at(fields, 2, index)?)
                } else {
                    None
                };
                Ok(ChapterEntry::Bounded { start, end, label })
            } else {
                let label = if names {
                    Some(str_at(fields, 1, index)?)
                } else {
                    None
                };
                Ok(ChapterEntry::OpenEnded { start, label })
            }
        })
        .collect()
}

fn int_at(fields: &[Value], position: usize, index: Option<usize>) -> TrimResult<i64> {
    fields[position]
        .as_i64()
        .ok_or_else(|| TrimError::wrong_type(index, position, "int"))
}

fn str_at(fields: &[Value], position: usize, index: Option<usize>) -> TrimResult<String> {
    fields[position]
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| TrimError::wrong_type(index, position, "str"))
}
