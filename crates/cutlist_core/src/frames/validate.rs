//! Ordering validation for resolved ranges.

use super::error::{TrimError, TrimResult};
use super::FrameRange;

/// Check that every range is logical and the list is strictly ordered.
///
/// A range is logical when `start < end`. Consecutive ranges must have
/// strictly increasing starts and must not overlap (`end[i] <= start[i + 1]`;
/// touching ranges are fine).
pub fn validate_ordering(ranges: &[FrameRange]) -> TrimResult<()> {
    for (index, range) in ranges.iter().enumerate() {
        if range.start >= range.end {
            return Err(TrimError::IllogicalTrim {
                index,
                start: range.start,
                end: range.end,
            });
        }
    }

    for (index, pair) in ranges.windows(2).enumerate() {
        let (prev, next) = (pair[0], pair[1]);
        if prev.start >= next.start || prev.end > next.start {
            return Err(TrimError::UnorderedTrims {
                index: index + 1,
                previous: prev.as_pair(),
                next: next.as_pair(),
            });
        }
    }

    Ok(())
}

/// Zip parallel start and end lists into ranges.
pub fn ranges_from_parallel(starts: &[u64], ends: &[u64]) -> TrimResult<Vec<FrameRange>> {
    if starts.len() != ends.len() {
        return Err(TrimError::LengthMismatch {
            starts: starts.len(),
            ends: ends.len(),
        });
    }
    Ok(starts
        .iter()
        .zip(ends)
        .map(|(&start, &end)| FrameRange::new(start, end))
        .collect())
}

/// [`validate_ordering`] over parallel start and end lists.
pub fn validate_parallel(starts: &[u64], ends: &[u64]) -> TrimResult<()> {
    validate_ordering(&ranges_from_parallel(starts, ends)?)
}

/// Whether parallel start and end lists pass [`validate_parallel`].
pub fn is_ordered(starts: &[u64], ends: &[u64]) -> bool {
    validate_parallel(starts, ends).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordered_lists() {
        assert!(!is_ordered(&[0, 5, 8], &[1, 9, 10]));
        assert!(!is_ordered(&[0, 2, 4], &[0, 3, 5]));
        assert!(is_ordered(&[0, 2, 4], &[1, 3, 5]));
    }

    #[test]
    fn touching_ranges_are_ordered() {
        assert!(is_ordered(&[3, 22], &[22, 40]));
    }

    #[test]
    fn illogical_pair_reports_index() {
        let ranges = [FrameRange::new(1, 10), FrameRange::new(20, 20)];
        assert!(matches!(
            validate_ordering(&ranges),
            Err(TrimError::IllogicalTrim { index: 1, start: 20, end: 20 })
        ));
    }

    #[test]
    fn overlap_reports_both_ranges() {
        let ranges = [FrameRange::new(1, 10), FrameRange::new(2, 5)];
        match validate_ordering(&ranges) {
            Err(TrimError::UnorderedTrims {
                index,
                previous,
                next,
            }) => {
                assert_eq!(index, 1);
                assert_eq!(previous, (1, 10));
                assert_eq!(next, (2, 5));
            }
            other => panic!("expected UnorderedTrims, got {:?}", other),
        }
    }

    #[test]
    fn decreasing_starts_fail() {
        let ranges = [FrameRange::new(9, 11), FrameRange::new(8, 100)];
        assert!(matches!(
            validate_ordering(&ranges),
            Err(TrimError::UnorderedTrims { index: 1, .. })
        ));
    }

    #[test]
    fn mismatched_lists_fail() {
        assert!(matches!(
            validate_parallel(&[1], &[2, 3]),
            Err(TrimError::LengthMismatch { .. })
        ));
    }

    #[test]
    fn empty_list_is_ordered() {
        assert!(validate_ordering(&[]).is_ok());
    }
}
