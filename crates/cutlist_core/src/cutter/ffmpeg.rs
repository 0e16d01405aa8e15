//! ffmpeg command wrapper for audio cutting.
//!
//! All kept ranges are cut and joined in a single ffmpeg pass: each range
//! gets an `atrim` filter (start inclusive, end exclusive) and the pieces
//! are fed into one `concat` filter.

use std::process::Command;

use super::{AudioCutter, CutError, CutJob, CutResult};
use crate::config::CutterSettings;
use crate::frames::FrameRange;
use crate::sequence::FrameRate;
use crate::timecode::{format_seconds, frame_to_ns};

/// Cuts audio by spawning ffmpeg.
#[derive(Debug, Clone)]
pub struct FfmpegCutter {
    /// Program to run.
    pub program: String,
    /// Arguments inserted before the output path (codec options etc.).
    pub extra_args: Vec<String>,
    /// Overwrite an existing output file.
    pub overwrite: bool,
}

impl Default for FfmpegCutter {
    fn default() -> Self {
        Self::from_settings(&CutterSettings::default())
    }
}

impl FfmpegCutter {
    pub fn from_settings(settings: &CutterSettings) -> Self {
        Self {
            program: settings.program.clone(),
            extra_args: settings.extra_args.clone(),
            overwrite: settings.overwrite,
        }
    }

    /// Build the `-filter_complex` graph for the given ranges.
    pub fn filter_graph(ranges: &[FrameRange], fps: FrameRate) -> String {
        let mut filter = String::new();

        for (i, range) in ranges.iter().enumerate() {
            filter.push_str(&format!(
                "[0:a]atrim=start={}:end={},asetpts=PTS-STARTPTS[a{}];",
                format_seconds(frame_to_ns(range.start, fps)),
                format_seconds(frame_to_ns(range.end, fps)),
                i
            ));
        }
        for i in 0..ranges.len() {
            filter.push_str(&format!("[a{}]", i));
        }
        filter.push_str(&format!("concat=n={}:v=0:a=1[out]", ranges.len()));

        filter
    }

    /// Build the full argument list (without the program name).
    pub fn build_args(&self, job: &CutJob<'_>) -> Vec<String> {
        let mut args = Vec::new();
        args.push(if self.overwrite { "-y" } else { "-n" }.to_string());
        args.extend(["-hide_banner", "-nostdin", "-loglevel", "error"].map(String::from));
        args.push("-i".to_string());
        args.push(job.source.display().to_string());
        args.push("-filter_complex".to_string());
        args.push(Self::filter_graph(job.ranges, job.sequence.fps()));
        args.push("-map".to_string());
        args.push("[out]".to_string());
        args.extend(self.extra_args.iter().cloned());
        args.push(job.output.display().to_string());
        args
    }
}

impl AudioCutter for FfmpegCutter {
    fn cut(&self, job: &CutJob<'_>) -> CutResult<()> {
        if !job.source.exists() {
            return Err(CutError::SourceNotFound(job.source.to_path_buf()));
        }
        if job.ranges.is_empty() {
            return Err(CutError::NoRanges(job.source.to_path_buf()));
        }

        let args = self.build_args(job);
        tracing::debug!("Running: {} {}", self.program, args.join(" "));

        let output = Command::new(&self.program)
            .args(&args)
            .output()
            .map_err(|source| CutError::Spawn {
                tool: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(CutError::CommandFailed {
                tool: self.program.clone(),
                exit_code: output.status.code().unwrap_or(-1),
                message: stderr.trim().to_string(),
            });
        }

        tracing::info!(
            "Cut {} ranges from {} to {}",
            job.ranges.len(),
            job.source.display(),
            job.output.display()
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sequence::SequenceInfo;
    use std::path::Path;
    use tempfile::tempdir;

    fn sequence() -> SequenceInfo {
        SequenceInfo::from_parts(100, 5, 1).unwrap()
    }

    #[test]
    fn filter_graph_trims_and_concats() {
        let ranges = [FrameRange::new(3, 22), FrameRange::new(97, 100)];
        let filter = FfmpegCutter::filter_graph(&ranges, sequence().fps());

        assert_eq!(
            filter,
            "[0:a]atrim=start=0.600000000:end=4.400000000,asetpts=PTS-STARTPTS[a0];\
             [0:a]atrim=start=19.400000000:end=20.000000000,asetpts=PTS-STARTPTS[a1];\
             [a0][a1]concat=n=2:v=0:a=1[out]"
        );
    }

    #[test]
    fn build_args_orders_input_and_output() {
        let seq = sequence();
        let ranges = [FrameRange::new(0, 5)];
        let job = CutJob {
            source: Path::new("in.flac"),
            ranges: &ranges,
            sequence: &seq,
            output: Path::new("out.flac"),
        };
        let cutter = FfmpegCutter {
            extra_args: vec!["-c:a".to_string(), "flac".to_string()],
            ..FfmpegCutter::default()
        };

        let args = cutter.build_args(&job);
        assert_eq!(args[0], "-y");
        let input = args.iter().position(|a| a == "-i").unwrap();
        assert_eq!(args[input + 1], "in.flac");
        assert_eq!(&args[args.len() - 3..], ["-c:a", "flac", "out.flac"]);
    }

    #[test]
    fn missing_source_fails_before_spawning() {
        let dir = tempdir().unwrap();
        let seq = sequence();
        let ranges = [FrameRange::new(0, 5)];
        let source = dir.path().join("missing.flac");
        let output = dir.path().join("out.flac");
        let job = CutJob {
            source: &source,
            ranges: &ranges,
            sequence: &seq,
            output: &output,
        };

        assert!(matches!(
            FfmpegCutter::default().cut(&job),
            Err(CutError::SourceNotFound(_))
        ));
    }

    #[test]
    fn empty_ranges_fail() {
        let dir = tempdir().unwrap();
        let seq = sequence();
        let source = dir.path().join("in.flac");
        std::fs::write(&source, b"").unwrap();
        let output = dir.path().join("out.flac");
        let job = CutJob {
            source: &source,
            ranges: &[],
            sequence: &seq,
            output: &output,
        };

        assert!(matches!(
            FfmpegCutter::default().cut(&job),
            Err(CutError::NoRanges(_))
        ));
    }

    #[test]
    fn missing_program_is_spawn_error() {
        let dir = tempdir().unwrap();
        let seq = sequence();
        let ranges = [FrameRange::new(0, 5)];
        let source = dir.path().join("in.flac");
        std::fs::write(&source, b"").unwrap();
        let output = dir.path().join("out.flac");
        let job = CutJob {
            source: &source,
            ranges: &ranges,
            sequence: &seq,
            output: &output,
        };
        let cutter = FfmpegCutter {
            program: "cutlist-test-no-such-program".to_string(),
            ..FfmpegCutter::default()
        };

        assert!(matches!(cutter.cut(&job), Err(CutError::Spawn { .. })));
    }
}
