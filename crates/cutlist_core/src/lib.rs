//! cutlist core - frame-range trim planning.
//!
//! This crate turns human-authored cut lists (frame pairs that may count from
//! the end of the sequence) into validated absolute ranges, merged cut lists
//! for an external audio cutter, and exact timecodes for the original and the
//! post-cut timeline. It has no UI dependencies and can be used by the CLI or
//! any other front end.

pub mod chapters;
pub mod config;
pub mod cutter;
pub mod frames;
pub mod input;
pub mod logging;
pub mod plan;
pub mod sequence;
pub mod timecode;

pub use frames::{FrameRange, TrimError, TrimResult};
pub use plan::{ChapterPlan, ChapterPlanner, TrimPlan, TrimPlanner};
pub use sequence::{FrameRate, SequenceInfo};

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
