//! Sequence descriptor: frame count and rational frame rate.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::frames::{TrimError, TrimResult};

/// A rational frame rate (`num / den` frames per second).
///
/// Both parts are non-zero; deserialization goes through [`FrameRate::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawFrameRate")]
pub struct FrameRate {
    num: u64,
    den: u64,
}

#[derive(Deserialize)]
struct RawFrameRate {
    num: u64,
    den: u64,
}

impl TryFrom<RawFrameRate> for FrameRate {
    type Error = TrimError;

    fn try_from(raw: RawFrameRate) -> Result<Self, Self::Error> {
        Self::new(raw.num, raw.den)
    }
}

impl FrameRate {
    /// Create a frame rate, rejecting a zero numerator or denominator.
    pub fn new(num: u64, den: u64) -> TrimResult<Self> {
        if num == 0 || den == 0 {
            return Err(TrimError::InvalidSequence(format!(
                "frame rate {}/{} must have a non-zero numerator and denominator",
                num, den
            )));
        }
        Ok(Self { num, den })
    }

    pub fn num(&self) -> u64 {
        self.num
    }

    pub fn den(&self) -> u64 {
        self.den
    }
}

impl fmt::Display for FrameRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.num, self.den)
    }
}

impl FromStr for FrameRate {
    type Err = TrimError;

    /// Parse `"24000/1001"` or a plain integer such as `"25"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || TrimError::InvalidSequence(format!("invalid frame rate '{}'", s));

        let (num, den) = match s.trim().split_once('/') {
            Some((num, den)) => (num.trim(), den.trim()),
            None => (s.trim(), "1"),
        };
        let num = num.parse().map_err(|_| invalid())?;
        let den = den.parse().map_err(|_| invalid())?;
        Self::new(num, den)
    }
}

/// Length and frame rate of the sequence being cut.
///
/// This is all the engine needs to know about the source clip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawSequenceInfo")]
pub struct SequenceInfo {
    length: u64,
    fps: FrameRate,
}

#[derive(Deserialize)]
struct RawSequenceInfo {
    length: u64,
    fps: FrameRate,
}

impl TryFrom<RawSequenceInfo> for SequenceInfo {
    type Error = TrimError;

    fn try_from(raw: RawSequenceInfo) -> Result<Self, Self::Error> {
        Self::new(raw.length, raw.fps)
    }
}

impl SequenceInfo {
    /// Create a descriptor, rejecting empty sequences.
    pub fn new(length: u64, fps: FrameRate) -> TrimResult<Self> {
        if length == 0 {
            return Err(TrimError::InvalidSequence(
                "sequence must contain at least one frame".to_string(),
            ));
        }
        Ok(Self { length, fps })
    }

    /// Create a descriptor from a frame count and raw frame rate parts.
    pub fn from_parts(length: u64, fps_num: u64, fps_den: u64) -> TrimResult<Self> {
        Self::new(length, FrameRate::new(fps_num, fps_den)?)
    }

    /// Total number of frames (N).
    pub fn length(&self) -> u64 {
        self.length
    }

    pub fn fps(&self) -> FrameRate {
        self.fps
    }
}
