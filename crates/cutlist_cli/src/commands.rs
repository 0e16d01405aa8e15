//! Subcommand bodies.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use cutlist_core::chapters::{write_chapters, ChapterFormat};
use cutlist_core::config::Settings;
use cutlist_core::cutter::{AudioCutter, CutJob, FfmpegCutter};
use cutlist_core::input::{parse_chapters_str, parse_trims_str};
use cutlist_core::{ChapterPlanner, FrameRange, SequenceInfo, TrimPlanner};

use crate::SequenceArgs;

pub struct ChapterOptions<'a> {
    pub chapters: &'a str,
    pub names: bool,
    pub chapters_out: Option<&'a Path>,
    pub format: Option<ChapterFormat>,
}

/// Plan a flat trim list, optionally cutting the source. Returns the plan JSON.
pub fn trim(settings: &Settings, args: &SequenceArgs, trims: &str) -> Result<String> {
    let sequence = args.sequence()?;
    let spec = parse_trims_str(trims).context("Invalid trims")?;

    let plan = TrimPlanner::new(sequence)
        .with_settings(&settings.planner)
        .debug(args.debug)
        .plan(&spec)
        .context("Failed to plan trims")?;

    cut_if_requested(settings, args, &sequence, &plan.ranges())?;

    serde_json::to_string_pretty(&plan).context("Failed to serialize plan")
}

/// Plan chapters, optionally cutting the source and writing a chapter file.
pub fn chapters(
    settings: &Settings,
    args: &SequenceArgs,
    options: &ChapterOptions<'_>,
) -> Result<String> {
    let sequence = args.sequence()?;
    let entries = parse_chapters_str(options.chapters, options.names).context("Invalid chapters")?;

    let plan = ChapterPlanner::new(sequence)
        .with_settings(&settings.planner)
        .names(options.names)
        .debug(args.debug)
        .plan(&entries)
        .context("Failed to plan chapters")?;

    cut_if_requested(settings, args, &sequence, &plan.cut_ranges())?;

    if let Some(path) = options.chapters_out {
        let format = options.format.unwrap_or(settings.chapters.format);
        let path = chapter_path(path, format);
        write_chapters(format, &settings.chapters.language, &plan.markers(), &path)
            .with_context(|| format!("Failed to write chapters to {}", path.display()))?;
    }

    serde_json::to_string_pretty(&plan).context("Failed to serialize plan")
}

/// Add the format's usual extension when the path has none.
fn chapter_path(path: &Path, format: ChapterFormat) -> PathBuf {
    if path.extension().is_some() {
        path.to_path_buf()
    } else {
        path.with_extension(format.extension())
    }
}

fn cut_if_requested(
    settings: &Settings,
    args: &SequenceArgs,
    sequence: &SequenceInfo,
    ranges: &[FrameRange],
) -> Result<()> {
    let (Some(source), Some(output)) = (&args.source, &args.output) else {
        return Ok(());
    };

    let job = CutJob {
        source,
        ranges,
        sequence,
        output,
    };
    FfmpegCutter::from_settings(&settings.cutter)
        .cut(&job)
        .with_context(|| format!("Failed to cut {}", source.display()))
}
