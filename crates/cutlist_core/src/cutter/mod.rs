//! External audio cutting.
//!
//! The planners only compute frame ranges. Turning those ranges into an
//! audio file is done by an external tool behind the [`AudioCutter`] trait;
//! [`FfmpegCutter`] is the implementation used by the CLI.

mod ffmpeg;

pub use ffmpeg::FfmpegCutter;

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::frames::FrameRange;
use crate::sequence::SequenceInfo;

/// Error type for cut operations.
#[derive(Error, Debug)]
pub enum CutError {
    /// Source file not found.
    #[error("Source file not found: {0}")]
    SourceNotFound(PathBuf),

    /// Nothing to keep.
    #[error("No ranges to cut from {0}")]
    NoRanges(PathBuf),

    /// Failed to start the external tool.
    #[error("Failed to run {tool}: {source}")]
    Spawn {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    /// The external tool exited with an error.
    #[error("{tool} failed with exit code {exit_code}: {message}")]
    CommandFailed {
        tool: String,
        exit_code: i32,
        message: String,
    },
}

/// Result type for cut operations.
pub type CutResult<T> = Result<T, CutError>;

/// Everything a cutter needs for one job.
#[derive(Debug, Clone, Copy)]
pub struct CutJob<'a> {
    /// Audio (or media) file to cut.
    pub source: &'a Path,
    /// Absolute source ranges to keep, in output order.
    pub ranges: &'a [FrameRange],
    /// Sequence the ranges refer to.
    pub sequence: &'a SequenceInfo,
    /// File to write the spliced result to.
    pub output: &'a Path,
}

/// Extracts frame ranges from a source and concatenates them in order.
pub trait AudioCutter {
    fn cut(&self, job: &CutJob<'_>) -> CutResult<()>;
}
