//! Combining and compacting of ordered ranges.

use super::FrameRange;

/// Merge touching or overlapping ranges into the minimal set of runs.
///
/// Input must be sorted by start. The output covers exactly the same frames,
/// so each run becomes one cut instead of several adjacent ones.
pub fn combine(ranges: &[FrameRange]) -> Vec<FrameRange> {
    let mut merged: Vec<FrameRange> = Vec::with_capacity(ranges.len());

    for &range in ranges {
        match merged.last_mut() {
            Some(current) if range.start <= current.end => {
                current.end = current.end.max(range.end);
            }
            _ => merged.push(range),
        }
    }

    merged
}

/// Re-flow ranges back-to-back from frame 0, preserving each length.
///
/// This maps kept ranges of the source onto their position in the spliced
/// output: the first range starts at 0 and each next one starts where the
/// previous one ends.
pub fn compact(ranges: &[FrameRange]) -> Vec<FrameRange> {
    let mut cursor = 0;
    ranges
        .iter()
        .map(|range| {
            let start = cursor;
            cursor += range.len();
            FrameRange::new(start, cursor)
        })
        .collect()
}

/// Total number of frames covered by the ranges.
pub fn covered_frames(ranges: &[FrameRange]) -> u64 {
    ranges.iter().map(FrameRange::len).sum()
}
