//! Frame index and interval arithmetic.
//!
//! Everything in here works on absolute frame indices of a single sequence:
//!
//! - **Normalization**: resolve negative (end-relative) indices
//! - **Validation**: reject illogical, unordered or overlapping ranges
//! - **Combining**: merge touching ranges into minimal runs
//! - **Compacting**: re-flow ranges into a gap-free timeline starting at 0
//!
//! Ranges are always closed-open (`[start, end)`). Inputs that use inclusive
//! ends, such as chapter lists, are converted with [`FrameRange::inclusive`].

mod error;
mod intervals;
mod normalize;
mod validate;

pub use error::{TrimError, TrimResult};
pub use intervals::{combine, compact, covered_frames};
pub use normalize::{normalize, resolve_end, resolve_start};
pub use validate::{is_ordered, ranges_from_parallel, validate_ordering, validate_parallel};

use serde::{Deserialize, Serialize};

/// An absolute, closed-open frame range `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FrameRange {
    /// First frame in the range.
    pub start: u64,
    /// One past the last frame in the range.
    pub end: u64,
}

impl FrameRange {
    /// Create a range from a start and an exclusive end.
    pub fn new(start: u64, end: u64) -> Self {
        Self { start, end }
    }

    /// Create a range from a first and a last (inclusive) frame.
    pub fn inclusive(first: u64, last: u64) -> Self {
        Self {
            start: first,
            end: last + 1,
        }
    }

    /// Number of frames covered.
    pub fn len(&self) -> u64 {
        self.end.saturating_sub(self.start)
    }

    /// Whether the range covers no frames.
    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Last frame in the range (inclusive end).
    pub fn last(&self) -> u64 {
        self.end.saturating_sub(1)
    }

    /// The range as a `(start, end)` tuple.
    pub fn as_pair(&self) -> (u64, u64) {
        (self.start, self.end)
    }
}

/// Split ranges into parallel start and end lists.
pub fn split_ranges(ranges: &[FrameRange]) -> (Vec<u64>, Vec<u64>) {
    ranges.iter().map(|r| (r.start, r.end)).unzip()
}
