//! Error types for trim planning.

use thiserror::Error;

/// Errors raised while parsing, resolving or validating trims.
///
/// Every variant carries enough context (entry index, offending values) to
/// point the caller at the entry that needs fixing.
#[derive(Error, Debug)]
pub enum TrimError {
    /// Wrong container shape for a trim entry (not a list, wrong arity).
    #[error("{}{message}", entry_prefix(.index))]
    Shape {
        index: Option<usize>,
        message: String,
    },

    /// An element has the wrong type.
    #[error("{}expected {expected} in pos {position}", entry_prefix(.index))]
    Type {
        index: Option<usize>,
        position: usize,
        expected: &'static str,
    },

    /// A resolved index falls outside `[0, length]`.
    #[error("frame {value} is out of bounds for a sequence of {length} frames")]
    OutOfBounds { value: i64, length: u64 },

    /// A single pair is empty or reversed. `start`/`end` are the resolved
    /// closed-open bounds, as in every other variant.
    #[error("trim {index} [{start}, {end}) is not logical: start must be before end")]
    IllogicalTrim { index: usize, start: u64, end: u64 },

    /// Two pairs are out of order or overlap.
    #[error(
        "trims {} {:?} and {index} {:?} are not logical: trims must be increasing and must not overlap",
        .index - 1, .previous, .next
    )]
    UnorderedTrims {
        index: usize,
        previous: (u64, u64),
        next: (u64, u64),
    },

    /// An open-ended chapter has no following chapter to bound it.
    #[error("chapter {index} has no end frame and no following chapter; the last trim needs an end")]
    MissingSuccessor { index: usize },

    /// Parallel start/end lists differ in length.
    #[error("start and end lists must have the same length ({starts} != {ends})")]
    LengthMismatch { starts: usize, ends: usize },

    /// A timecode was requested before a sequence was bound.
    #[error("a sequence needs to be specified before timecodes can be computed")]
    MissingSequence,

    /// The sequence descriptor itself is unusable.
    #[error("invalid sequence: {0}")]
    InvalidSequence(String),

    /// Textual trim input was not valid JSON.
    #[error("failed to parse trim list: {0}")]
    Json(#[from] serde_json::Error),
}

impl TrimError {
    /// Create a shape error for an entry (or the whole list if `index` is None).
    pub fn shape(index: Option<usize>, message: impl Into<String>) -> Self {
        Self::Shape {
            index,
            message: message.into(),
        }
    }

    /// Create a type error for an element of an entry.
    pub fn wrong_type(index: Option<usize>, position: usize, expected: &'static str) -> Self {
        Self::Type {
            index,
            position,
            expected,
        }
    }
}

fn entry_prefix(index: &Option<usize>) -> String {
    match index {
        Some(i) => format!("trim {}: ", i),
        None => String::new(),
    }
}

/// Result type for trim operations.
pub type TrimResult<T> = Result<T, TrimError>;
