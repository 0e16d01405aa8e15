//! Frame to timecode conversion.
//!
//! Timecodes are `HH:MM:SS.nnnnnnnnn` strings. Conversion from a frame index
//! goes through exact integer arithmetic on the rational frame rate, so the
//! same frame always yields the same string and long lists of cuts do not
//! accumulate drift.

use crate::frames::{TrimError, TrimResult};
use crate::sequence::{FrameRate, SequenceInfo};

const NS_PER_SEC: u128 = 1_000_000_000;

/// Convert a frame index to nanoseconds, rounded to the nearest nanosecond.
///
/// Results past `u64::MAX` ns (about 584 years) saturate.
pub fn frame_to_ns(frame: u64, fps: FrameRate) -> u64 {
    // u64 * u64 always fits in u128
    let scaled = u128::from(frame) * u128::from(fps.den());
    let num = u128::from(fps.num());

    let whole_secs = scaled / num;
    // remainder < num <= u64::MAX, so these stay far below u128::MAX
    let frac_ns = (2 * (scaled % num) * NS_PER_SEC + num) / (2 * num);

    whole_secs
        .checked_mul(NS_PER_SEC)
        .and_then(|ns| ns.checked_add(frac_ns))
        .and_then(|ns| u64::try_from(ns).ok())
        .unwrap_or(u64::MAX)
}

/// Convert a frame index to a `HH:MM:SS.nnnnnnnnn` timecode.
pub fn frame_to_timecode(frame: u64, fps: FrameRate) -> String {
    format_ns(frame_to_ns(frame, fps))
}

/// Format nanoseconds as `HH:MM:SS.nnnnnnnnn`. Hours are not wrapped at 24.
pub fn format_ns(ns: u64) -> String {
    let total_secs = ns / 1_000_000_000;
    let remaining_ns = ns % 1_000_000_000;

    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;

    format!(
        "{:02}:{:02}:{:02}.{:09}",
        hours, minutes, seconds, remaining_ns
    )
}

/// Format nanoseconds as plain seconds with nanosecond precision (`12.345000000`).
///
/// This is the form ffmpeg filters accept for `start`/`end` options.
pub fn format_seconds(ns: u64) -> String {
    format!("{}.{:09}", ns / 1_000_000_000, ns % 1_000_000_000)
}

/// Parse a timecode (`HH:MM:SS[.fraction]`) to nanoseconds.
///
/// Fractions shorter than nine digits are right-padded, longer ones truncated.
pub fn parse_timecode(time_str: &str) -> Option<u64> {
    let parts: Vec<&str> = time_str.trim().split(':').collect();
    if parts.len() != 3 {
        return None;
    }

    let hours: u64 = parts[0].parse().ok()?;
    let minutes: u64 = parts[1].parse().ok()?;

    let (secs, frac) = match parts[2].split_once('.') {
        Some((secs, frac)) => (secs, frac),
        None => (parts[2], ""),
    };
    let seconds: u64 = secs.parse().ok()?;
    let nanos: u64 = if frac.is_empty() {
        0
    } else {
        if !frac.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
        let padded = format!("{:0<9}", frac);
        padded[..9].parse().ok()?
    };

    hours
        .checked_mul(3600)?
        .checked_add(minutes.checked_mul(60)?)?
        .checked_add(seconds)?
        .checked_mul(1_000_000_000)?
        .checked_add(nanos)
}

/// Timecode formatter bound to an optional sequence.
///
/// Use [`Timecoder::unbound`] when the sequence is not known yet; any attempt
/// to format a frame then fails with [`TrimError::MissingSequence`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Timecoder {
    sequence: Option<SequenceInfo>,
}

impl Timecoder {
    /// Create a formatter bound to a sequence.
    pub fn new(sequence: SequenceInfo) -> Self {
        Self {
            sequence: Some(sequence),
        }
    }

    /// Create a formatter with no sequence bound.
    pub fn unbound() -> Self {
        Self::default()
    }

    /// Bind (or rebind) the sequence.
    pub fn bind(&mut self, sequence: SequenceInfo) {
        self.sequence = Some(sequence);
    }

    /// The bound sequence, if any.
    pub fn sequence(&self) -> Option<&SequenceInfo> {
        self.sequence.as_ref()
    }

    /// Timecode of `frame` under the bound sequence's frame rate.
    pub fn timecode(&self, frame: u64) -> TrimResult<String> {
        let sequence = self.sequence.ok_or(TrimError::MissingSequence)?;
        Ok(frame_to_timecode(frame, sequence.fps()))
    }

    /// Timecodes for a list of frames.
    pub fn timecodes(&self, frames: &[u64]) -> TrimResult<Vec<String>> {
        frames.iter().map(|&f| self.timecode(f)).collect()
    }
}
