//! Flat trim planning.

use serde::Serialize;

use super::{Advisory, PlanTrace};
use crate::config::PlannerSettings;
use crate::frames::{self, FrameRange, TrimResult};
use crate::input::TrimSpec;
use crate::sequence::SequenceInfo;
use crate::timecode::Timecoder;

/// Keep-segments of a flat trim list.
///
/// `s[i]..e[i]` is the i-th kept range (end exclusive); everything between
/// consecutive ranges is cut.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrimPlan {
    pub s: Vec<u64>,
    pub e: Vec<u64>,
    pub cut_ts_s: Vec<String>,
    pub cut_ts_e: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub advisories: Vec<Advisory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace: Option<PlanTrace>,
}

impl TrimPlan {
    /// Kept ranges, ready for the cutter.
    pub fn ranges(&self) -> Vec<FrameRange> {
        self.s
            .iter()
            .zip(&self.e)
            .map(|(&start, &end)| FrameRange::new(start, end))
            .collect()
    }
}

/// Plans flat trim lists against one sequence.
#[derive(Debug, Clone)]
pub struct TrimPlanner {
    sequence: SequenceInfo,
    debug: bool,
    near_full_span_pct: u8,
}

impl TrimPlanner {
    pub fn new(sequence: SequenceInfo) -> Self {
        Self {
            sequence,
            debug: false,
            near_full_span_pct: PlannerSettings::default().near_full_span_pct,
        }
    }

    /// Apply planner settings from the config file.
    pub fn with_settings(mut self, settings: &PlannerSettings) -> Self {
        self.near_full_span_pct = settings.near_full_span_pct;
        self
    }

    /// Collect intermediate values into [`TrimPlan::trace`].
    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Percentage of the sequence a lone trim must keep to be flagged.
    pub fn near_full_span_pct(mut self, pct: u8) -> Self {
        self.near_full_span_pct = pct;
        self
    }

    /// Resolve, validate and timecode a trim list.
    pub fn plan(&self, spec: &TrimSpec) -> TrimResult<TrimPlan> {
        let trims = spec.trims();
        let raw_starts: Vec<i64> = trims.iter().map(|t| t.start).collect();
        let raw_ends: Vec<i64> = trims.iter().map(|t| t.end).collect();

        let (s, e) = frames::normalize(&raw_starts, &raw_ends, self.sequence.length())?;
        let ranges = frames::ranges_from_parallel(&s, &e)?;
        frames::validate_ordering(&ranges)?;

        let coder = Timecoder::new(self.sequence);
        let cut_ts_s = coder.timecodes(&s)?;
        let cut_ts_e = coder.timecodes(&e)?;

        let advisories = self.advisories(spec, &ranges);
        for advisory in &advisories {
            tracing::warn!("{}", advisory);
        }

        let trace = self.debug.then(|| {
            let trace = PlanTrace {
                raw: trims.iter().map(|t| (t.start, Some(t.end))).collect(),
                resolved: ranges.clone(),
                compacted: Vec::new(),
            };
            trace.emit("trim");
            trace
        });

        Ok(TrimPlan {
            s,
            e,
            cut_ts_s,
            cut_ts_e,
            advisories,
            trace,
        })
    }

    fn advisories(&self, spec: &TrimSpec, ranges: &[FrameRange]) -> Vec<Advisory> {
        let mut advisories = Vec::new();

        if let TrimSpec::List(trims) = spec {
            if trims.len() == 1 {
                advisories.push(Advisory::SingleEntryList);
            }
        }

        if let [only] = ranges {
            let length = self.sequence.length();
            let kept = only.len();
            if u128::from(kept) * 100 >= u128::from(self.near_full_span_pct) * u128::from(length) {
                advisories.push(Advisory::NearFullSpan { kept, length });
            }
        }

        advisories
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frames::TrimError;
    use crate::input::RawTrim;
    use crate::sequence::FrameRate;

    fn planner() -> TrimPlanner {
        TrimPlanner::new(SequenceInfo::from_parts(100, 5, 1).unwrap())
    }

    fn sample() -> TrimSpec {
        TrimSpec::list([(3, 22), (23, 40), (48, 49), (50, -20), (-10, -5), (97, 0)])
    }

    #[test]
    fn resolves_sample_list() {
        let plan = planner().plan(&sample()).unwrap();
        assert_eq!(plan.s, vec![3, 23, 48, 50, 90, 97]);
        assert_eq!(plan.e, vec![22, 40, 49, 80, 95, 100]);
        assert_eq!(
            plan.cut_ts_s,
            vec![
                "00:00:00.600000000",
                "00:00:04.600000000",
                "00:00:09.600000000",
                "00:00:10.000000000",
                "00:00:18.000000000",
                "00:00:19.400000000",
            ]
        );
        assert_eq!(
            plan.cut_ts_e,
            vec![
                "00:00:04.400000000",
                "00:00:08.000000000",
                "00:00:09.800000000",
                "00:00:16.000000000",
                "00:00:19.000000000",
                "00:00:20.000000000",
            ]
        );
        assert!(plan.advisories.is_empty());
        assert!(plan.trace.is_none());
    }

    #[test]
    fn single_pair() {
        let plan = planner()
            .plan(&TrimSpec::Single(RawTrim::new(3, -13)))
            .unwrap();
        assert_eq!(plan.s, vec![3]);
        assert_eq!(plan.e, vec![87]);
        assert_eq!(plan.cut_ts_s, vec!["00:00:00.600000000"]);
        assert_eq!(plan.cut_ts_e, vec!["00:00:17.400000000"]);
        assert!(plan.advisories.is_empty());
    }

    #[test]
    fn illogical_trims_fail() {
        for pair in [(-95, -99), (1, 1)] {
            assert!(matches!(
                planner().plan(&TrimSpec::Single(RawTrim::new(pair.0, pair.1))),
                Err(TrimError::IllogicalTrim { index: 0, .. })
            ));
        }
    }

    #[test]
    fn equal_bounds_fail_anywhere_in_list() {
        let spec = TrimSpec::list([(1, 5), (10, 20), (30, 30)]);
        assert!(matches!(
            planner().plan(&spec),
            Err(TrimError::IllogicalTrim { index: 2, start: 30, end: 30 })
        ));
    }

    #[test]
    fn overlapping_trims_fail() {
        let spec = TrimSpec::list([(1, 10), (2, -95)]);
        assert!(matches!(
            planner().plan(&spec),
            Err(TrimError::UnorderedTrims { index: 1, .. })
        ));
    }

    #[test]
    fn out_of_bounds_fails() {
        let spec = TrimSpec::list([(1, 10), (20, 101)]);
        assert!(matches!(
            planner().plan(&spec),
            Err(TrimError::OutOfBounds { value: 101, length: 100 })
        ));
    }

    #[test]
    fn single_entry_list_is_advised() {
        let plan = planner().debug(true).plan(&TrimSpec::list([(5, 10)])).unwrap();
        assert_eq!(plan.advisories, vec![Advisory::SingleEntryList]);
        assert_eq!(plan.s, vec![5]);
    }

    #[test]
    fn near_full_span_is_advised() {
        let plan = planner().plan(&TrimSpec::Single(RawTrim::new(0, -5))).unwrap();
        assert_eq!(
            plan.advisories,
            vec![Advisory::NearFullSpan { kept: 95, length: 100 }]
        );

        let plan = planner()
            .near_full_span_pct(99)
            .plan(&TrimSpec::Single(RawTrim::new(0, -5)))
            .unwrap();
        assert!(plan.advisories.is_empty());
    }

    #[test]
    fn extreme_rates_plan_without_overflow() {
        let sequence = SequenceInfo::new(u64::MAX, FrameRate::new(1, u64::MAX).unwrap()).unwrap();
        let plan = TrimPlanner::new(sequence)
            .plan(&TrimSpec::Single(RawTrim::new(0, 0)))
            .unwrap();

        assert_eq!(plan.e, vec![u64::MAX]);
        assert_eq!(plan.cut_ts_s, vec!["00:00:00.000000000"]);
        assert_eq!(plan.cut_ts_e, vec!["5124095:34:33.709551615"]);
        assert_eq!(
            plan.advisories,
            vec![Advisory::NearFullSpan { kept: u64::MAX, length: u64::MAX }]
        );
    }

    #[test]
    fn debug_collects_trace() {
        crate::logging::init_test_tracing();
        let plan = planner().debug(true).plan(&sample()).unwrap();
        let trace = plan.trace.unwrap();
        assert_eq!(trace.raw[3], (50, Some(-20)));
        assert_eq!(trace.resolved[3], FrameRange::new(50, 80));
        assert!(trace.compacted.is_empty());
    }

    #[test]
    fn ranges_match_lists() {
        let plan = planner().plan(&sample()).unwrap();
        let ranges = plan.ranges();
        assert_eq!(ranges.len(), 6);
        assert_eq!(ranges[5], FrameRange::new(97, 100));
    }
}
