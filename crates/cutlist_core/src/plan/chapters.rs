//! Chapter trim planning.
//!
//! A chapter list describes the parts of the source to keep, one entry per
//! chapter. Ends are inclusive; an entry without an end runs until the frame
//! before the next chapter (or to the end of the sequence for the last one).
//!
//! The plan has two views of the same chapters:
//! - `cut_s`/`cut_e`: absolute source ranges for the cutter, with chapters
//!   that touch merged into one cut
//! - `chap_s_ts`/`chap_e_ts`: chapter boundaries in the spliced output

use serde::Serialize;

use super::PlanTrace;
use crate::chapters::ChapterMarker;
use crate::config::PlannerSettings;
use crate::frames::{self, FrameRange, TrimError, TrimResult};
use crate::input::ChapterEntry;
use crate::sequence::SequenceInfo;
use crate::timecode::Timecoder;

/// Cut list and post-cut chapter timecodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChapterPlan {
    /// Starts of the merged source ranges to keep.
    pub cut_s: Vec<u64>,
    /// Exclusive ends of the merged source ranges to keep.
    pub cut_e: Vec<u64>,
    /// Chapter starts in the output timeline.
    pub chap_s_ts: Vec<String>,
    /// Chapter ends in the output timeline.
    pub chap_e_ts: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace: Option<PlanTrace>,
}

impl ChapterPlan {
    /// Merged source ranges, ready for the cutter.
    pub fn cut_ranges(&self) -> Vec<FrameRange> {
        self.cut_s
            .iter()
            .zip(&self.cut_e)
            .map(|(&start, &end)| FrameRange::new(start, end))
            .collect()
    }

    /// Chapter start markers for the chapter writer.
    pub fn markers(&self) -> Vec<ChapterMarker> {
        self.chap_s_ts
            .iter()
            .enumerate()
            .map(|(i, timecode)| ChapterMarker {
                timecode: timecode.clone(),
                label: self.labels.as_ref().and_then(|l| l.get(i).cloned()),
            })
            .collect()
    }
}

/// Plans chapter lists against one sequence.
#[derive(Debug, Clone)]
pub struct ChapterPlanner {
    sequence: SequenceInfo,
    names: bool,
    allow_open_last: bool,
    debug: bool,
}

impl ChapterPlanner {
    /// Create a planner expecting labelled chapters.
    pub fn new(sequence: SequenceInfo) -> Self {
        Self {
            sequence,
            names: true,
            allow_open_last: PlannerSettings::default().allow_open_last,
            debug: false,
        }
    }

    /// Apply planner settings from the config file.
    pub fn with_settings(mut self, settings: &PlannerSettings) -> Self {
        self.allow_open_last = settings.allow_open_last;
        self
    }

    /// Whether every entry carries a label.
    pub fn names(mut self, names: bool) -> Self {
        self.names = names;
        self
    }

    /// Whether the last chapter may omit its end.
    pub fn allow_open_last(mut self, allow: bool) -> Self {
        self.allow_open_last = allow;
        self
    }

    /// Collect intermediate values into [`ChapterPlan::trace`].
    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Resolve chapters, merge them into cuts and map them onto the output.
    pub fn plan(&self, entries: &[ChapterEntry]) -> TrimResult<ChapterPlan> {
        if entries.is_empty() {
            return Err(TrimError::shape(None, "chapters must contain at least one entry"));
        }
        self.check_labels(entries)?;

        let ranges = self.resolve(entries)?;
        frames::validate_ordering(&ranges)?;

        let (cut_s, cut_e) = frames::split_ranges(&frames::combine(&ranges));
        let compacted = frames::compact(&ranges);

        let coder = Timecoder::new(self.sequence);
        let chap_s_ts = compacted
            .iter()
            .map(|r| coder.timecode(r.start))
            .collect::<TrimResult<Vec<_>>>()?;
        let chap_e_ts = compacted
            .iter()
            .map(|r| coder.timecode(r.end))
            .collect::<TrimResult<Vec<_>>>()?;

        let labels = self.names.then(|| {
            entries
                .iter()
                .map(|e| e.label().unwrap_or_default().to_string())
                .collect()
        });

        tracing::debug!(
            "Planned {} chapters into {} cuts",
            entries.len(),
            cut_s.len()
        );

        let trace = self.debug.then(|| {
            let trace = PlanTrace {
                raw: entries.iter().map(|e| (e.start(), e.end())).collect(),
                resolved: ranges,
                compacted,
            };
            trace.emit("chapter");
            trace
        });

        Ok(ChapterPlan {
            cut_s,
            cut_e,
            chap_s_ts,
            chap_e_ts,
            labels,
            trace,
        })
    }

    fn check_labels(&self, entries: &[ChapterEntry]) -> TrimResult<()> {
        for (i, entry) in entries.iter().enumerate() {
            match (self.names, entry.label().is_some()) {
                (true, false) => return Err(TrimError::shape(Some(i), "is missing its label")),
                (false, true) => {
                    return Err(TrimError::shape(Some(i), "has a label but names are disabled"))
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Resolve every entry to a closed-open source range.
    ///
    /// An open end only depends on the next start, so one forward pass is
    /// enough. Error fields carry the resolved closed-open bounds.
    fn resolve(&self, entries: &[ChapterEntry]) -> TrimResult<Vec<FrameRange>> {
        let length = self.sequence.length();
        let starts = entries
            .iter()
            .map(|e| frames::resolve_start(e.start(), length))
            .collect::<TrimResult<Vec<_>>>()?;

        let mut ranges = Vec::with_capacity(entries.len());
        for (i, entry) in entries.iter().enumerate() {
            let start = starts[i];
            let end = match entry.end() {
                Some(last) => {
                    let end = resolve_inclusive_end(last, length)?;
                    // inclusive last must come after start
                    if end <= start.saturating_add(1) {
                        return Err(TrimError::IllogicalTrim { index: i, start, end });
                    }
                    end
                }
                None => match starts.get(i + 1) {
                    Some(&next_start) => next_start,
                    None if self.allow_open_last => length,
                    None => return Err(TrimError::MissingSuccessor { index: i }),
                },
            };
            ranges.push(FrameRange::new(start, end));
        }

        // An open entry followed by an earlier start is an ordering problem,
        // not an illogical pair.
        for (i, entry) in entries.iter().enumerate() {
            if entry.end().is_some() || !ranges[i].is_empty() {
                continue;
            }
            if let Some(next) = ranges.get(i + 1) {
                return Err(TrimError::UnorderedTrims {
                    index: i + 1,
                    previous: ranges[i].as_pair(),
                    next: next.as_pair(),
                });
            }
        }

        Ok(ranges)
    }
}

/// Turn an inclusive chapter end into an exclusive one.
///
/// Negative values count from the end (`-1` is the last frame) and `0` means
/// the end of the sequence, as for flat trims.
fn resolve_inclusive_end(last: i64, length: u64) -> TrimResult<u64> {
    if last == 0 {
        return Ok(length);
    }
    frames::resolve_end(last, length)?
        .checked_add(1)
        .filter(|&end| end <= length)
        .ok_or(TrimError::OutOfBounds {
            value: last,
            length,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn planner() -> ChapterPlanner {
        ChapterPlanner::new(SequenceInfo::from_parts(100, 5, 1).unwrap())
    }

    fn bounded() -> Vec<ChapterEntry> {
        [
            (1, 2, "A"),
            (4, 7, "B"),
            (8, 9, "C"),
            (11, 13, "D"),
            (14, 17, "E"),
            (18, 20, "F"),
            (24, 30, "G"),
            (33, 35, "H"),
            (36, 41, "J"),
        ]
        .into_iter()
        .map(|(s, e, l)| ChapterEntry::bounded(s, e, Some(l)))
        .collect()
    }

    fn mixed() -> Vec<ChapterEntry> {
        vec![
            ChapterEntry::bounded(1, 2, Some("A")),
            ChapterEntry::open(4, Some("B")),
            ChapterEntry::bounded(8, 9, Some("C")),
            ChapterEntry::open(11, Some("D")),
            ChapterEntry::open(14, Some("E")),
            ChapterEntry::bounded(18, 20, Some("F")),
            ChapterEntry::bounded(24, 30, Some("G")),
            ChapterEntry::open(33, Some("H")),
            ChapterEntry::bounded(36, 41, Some("J")),
        ]
    }

    #[test]
    fn merges_touching_chapters_into_cuts() {
        for entries in [bounded(), mixed()] {
            let plan = planner().plan(&entries).unwrap();
            assert_eq!(plan.cut_s, vec![1, 4, 11, 24, 33]);
            assert_eq!(plan.cut_e, vec![3, 10, 21, 31, 42]);
        }
    }

    #[test]
    fn chapter_timecodes_follow_output_timeline() {
        let expected = vec![
            "00:00:00.000000000",
            "00:00:00.400000000",
            "00:00:01.200000000",
            "00:00:01.600000000",
            "00:00:02.200000000",
            "00:00:03.000000000",
            "00:00:03.600000000",
            "00:00:05.000000000",
            "00:00:05.600000000",
        ];
        for entries in [bounded(), mixed()] {
            let plan = planner().plan(&entries).unwrap();
            assert_eq!(plan.chap_s_ts, expected);
            assert_eq!(plan.chap_e_ts.last().unwrap(), "00:00:06.800000000");
        }
    }

    #[test]
    fn labels_are_kept_in_order() {
        let plan = planner().plan(&mixed()).unwrap();
        let labels = plan.labels.clone().unwrap();
        assert_eq!(labels.first().unwrap(), "A");
        assert_eq!(labels.last().unwrap(), "J");

        let markers = plan.markers();
        assert_eq!(markers.len(), 9);
        assert_eq!(markers[1].timecode, "00:00:00.400000000");
        assert_eq!(markers[1].label.as_deref(), Some("B"));
    }

    #[test]
    fn open_last_chapter_runs_to_end() {
        let entries = vec![ChapterEntry::bounded(0, 9, None), ChapterEntry::open(50, None)];
        let plan = planner().names(false).plan(&entries).unwrap();
        assert_eq!(plan.cut_s, vec![0, 50]);
        assert_eq!(plan.cut_e, vec![10, 100]);
        assert_eq!(plan.chap_e_ts.last().unwrap(), "00:00:12.000000000");
        assert!(plan.labels.is_none());
        assert!(plan.markers().iter().all(|m| m.label.is_none()));
    }

    #[test]
    fn open_last_chapter_can_be_required_to_end() {
        let entries = vec![ChapterEntry::bounded(9, 10, None), ChapterEntry::open(20, None)];
        let result = planner().names(false).allow_open_last(false).plan(&entries);
        assert!(matches!(result, Err(TrimError::MissingSuccessor { index: 1 })));
    }

    #[test]
    fn decreasing_start_fails() {
        let entries = vec![ChapterEntry::bounded(9, 10, None), ChapterEntry::open(8, None)];
        assert!(matches!(
            planner().names(false).plan(&entries),
            Err(TrimError::UnorderedTrims { index: 1, .. })
        ));
    }

    #[test]
    fn open_chapter_before_earlier_start_is_unordered() {
        let entries = vec![ChapterEntry::open(9, None), ChapterEntry::bounded(8, 10, None)];
        assert!(matches!(
            planner().names(false).plan(&entries),
            Err(TrimError::UnorderedTrims {
                index: 1,
                previous: (9, 8),
                next: (8, 11),
            })
        ));

        let entries = vec![ChapterEntry::open(9, None), ChapterEntry::open(9, None)];
        assert!(matches!(
            planner().names(false).plan(&entries),
            Err(TrimError::UnorderedTrims { index: 1, previous: (9, 9), next: (9, 100) })
        ));
    }

    #[test]
    fn overlapping_inclusive_ends_fail() {
        let entries = vec![ChapterEntry::bounded(1, 5, None), ChapterEntry::bounded(5, 9, None)];
        assert!(matches!(
            planner().names(false).plan(&entries),
            Err(TrimError::UnorderedTrims { index: 1, .. })
        ));
    }

    #[test]
    fn equal_bounds_fail() {
        let entries = vec![ChapterEntry::bounded(1, 5, None), ChapterEntry::bounded(7, 7, None)];
        assert!(matches!(
            planner().names(false).plan(&entries),
            Err(TrimError::IllogicalTrim { index: 1, start: 7, end: 8 })
        ));

        let entries = vec![ChapterEntry::bounded(7, 3, None)];
        assert!(matches!(
            planner().names(false).plan(&entries),
            Err(TrimError::IllogicalTrim { index: 0, start: 7, end: 4 })
        ));
    }

    #[test]
    fn negative_and_sentinel_ends() {
        let entries = vec![ChapterEntry::bounded(-20, -11, None), ChapterEntry::bounded(-10, 0, None)];
        let plan = planner().names(false).plan(&entries).unwrap();
        assert_eq!(plan.cut_s, vec![80]);
        assert_eq!(plan.cut_e, vec![100]);
    }

    #[test]
    fn end_past_last_frame_fails() {
        let entries = vec![ChapterEntry::bounded(90, 100, None)];
        assert!(matches!(
            planner().names(false).plan(&entries),
            Err(TrimError::OutOfBounds { value: 100, .. })
        ));
    }

    #[test]
    fn label_mode_is_enforced() {
        let entries = vec![ChapterEntry::bounded(1, 5, None)];
        assert!(matches!(planner().plan(&entries), Err(TrimError::Shape { index: Some(0), .. })));

        let entries = vec![ChapterEntry::bounded(1, 5, Some("A"))];
        assert!(matches!(
            planner().names(false).plan(&entries),
            Err(TrimError::Shape { index: Some(0), .. })
        ));

        assert!(matches!(planner().plan(&[]), Err(TrimError::Shape { index: None, .. })));
    }

    #[test]
    fn debug_trace_has_compacted_ranges() {
        let plan = planner().debug(true).plan(&mixed()).unwrap();
        let trace = plan.trace.unwrap();
        assert_eq!(trace.raw[1], (4, None));
        assert_eq!(trace.resolved[1], FrameRange::inclusive(4, 7));
        assert_eq!(trace.compacted[1], FrameRange::inclusive(2, 5));
    }
}
