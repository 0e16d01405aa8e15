//! Trim planning.
//!
//! Planners take a hand-written trim list and a sequence descriptor and
//! produce everything the external tools need:
//!
//! - [`TrimPlanner`]: flat keep-ranges and their timecodes
//! - [`ChapterPlanner`]: merged cut list plus chapter timecodes in the
//!   post-cut timeline
//!
//! Planning is pure. Running the cutter or writing chapter files is left to
//! the caller (see [`crate::cutter`] and [`crate::chapters`]).

mod chapters;
mod trim;

pub use chapters::{ChapterPlan, ChapterPlanner};
pub use trim::{TrimPlan, TrimPlanner};

use std::fmt;

use serde::Serialize;

use crate::frames::FrameRange;

/// Non-fatal remarks about a trim list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Advisory {
    /// A list holding a single trim was given; a bare pair does the same.
    SingleEntryList,
    /// The only trim keeps almost the whole sequence.
    NearFullSpan { kept: u64, length: u64 },
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Advisory::SingleEntryList => write!(
                f,
                "a list with a single trim was given; pass the pair on its own instead"
            ),
            Advisory::NearFullSpan { kept, length } => write!(
                f,
                "the only trim keeps {} of {} frames; trimming a near full-length range is unlikely to be intended",
                kept, length
            ),
        }
    }
}

/// Intermediate values of a planning call, collected in debug mode.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PlanTrace {
    /// Raw `(start, end)` values as given; `None` for open-ended chapters.
    pub raw: Vec<(i64, Option<i64>)>,
    /// Resolved absolute ranges.
    pub resolved: Vec<FrameRange>,
    /// Ranges in the post-cut timeline (chapter plans only).
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub compacted: Vec<FrameRange>,
}

impl PlanTrace {
    fn emit(&self, planner: &str) {
        for (i, ((raw_start, raw_end), range)) in self.raw.iter().zip(&self.resolved).enumerate() {
            tracing::debug!(
                "{} trim {}: ({}, {:?}) -> [{}, {})",
                planner,
                i,
                raw_start,
                raw_end,
                range.start,
                range.end
            );
        }
        for (i, range) in self.compacted.iter().enumerate() {
            tracing::debug!(
                "{} chapter {} in output: [{}, {})",
                planner,
                i,
                range.start,
                range.end
            );
        }
    }
}
