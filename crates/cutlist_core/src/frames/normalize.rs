//! Negative index resolution.
//!
//! Trims may count from the end of the sequence: `-10` on a 100 frame
//! sequence is frame 90. End values have one extra rule: `0` means "end of
//! sequence" and resolves to the sequence length, so `(97, 0)` keeps frames
//! 97 through the last frame. A start of `0` is simply the first frame.

use super::error::{TrimError, TrimResult};

/// Resolve a start-like value against a sequence of `length` frames.
pub fn resolve_start(value: i64, length: u64) -> TrimResult<u64> {
    resolve(value, length)
}

/// Resolve an end-like value against a sequence of `length` frames.
///
/// `0` is the end-of-sequence sentinel and resolves to `length`.
pub fn resolve_end(value: i64, length: u64) -> TrimResult<u64> {
    if value == 0 {
        return Ok(length);
    }
    resolve(value, length)
}

fn resolve(value: i64, length: u64) -> TrimResult<u64> {
    let out_of_bounds = || TrimError::OutOfBounds { value, length };

    let resolved = if value < 0 {
        i128::from(length) + i128::from(value)
    } else {
        i128::from(value)
    };

    if resolved < 0 || resolved > i128::from(length) {
        return Err(out_of_bounds());
    }
    u64::try_from(resolved).map_err(|_| out_of_bounds())
}

/// Resolve parallel lists of start and end values to absolute indices.
///
/// Every resolved value must fall within `[0, length]`. No ordering is
/// checked here; see [`validate_ordering`](super::validate_ordering).
pub fn normalize(starts: &[i64], ends: &[i64], length: u64) -> TrimResult<(Vec<u64>, Vec<u64>)> {
    if starts.len() != ends.len() {
        return Err(TrimError::LengthMismatch {
            starts: starts.len(),
            ends: ends.len(),
        });
    }

    let starts = starts
        .iter()
        .map(|&s| resolve_start(s, length))
        .collect::<TrimResult<Vec<_>>>()?;
    let ends = ends
        .iter()
        .map(|&e| resolve_end(e, length))
        .collect::<TrimResult<Vec<_>>>()?;

    Ok((starts, ends))
}
