//! Settings struct with TOML-based sections.
//!
//! Each section maps to a TOML table and can be rewritten on its own.

use serde::{Deserialize, Serialize};

use crate::chapters::ChapterFormat;
use crate::logging::LogLevel;

/// Root settings structure containing all configuration sections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingSettings,

    /// Planner behaviour.
    #[serde(default)]
    pub planner: PlannerSettings,

    /// External audio cutter.
    #[serde(default)]
    pub cutter: CutterSettings,

    /// Chapter file output.
    #[serde(default)]
    pub chapters: ChapterSettings,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Default level when `RUST_LOG` is not set.
    #[serde(default)]
    pub level: LogLevel,
}

/// Planner tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannerSettings {
    /// A single trim keeping at least this percentage of the sequence
    /// raises a near-full-span advisory.
    #[serde(default = "default_near_full_span_pct")]
    pub near_full_span_pct: u8,

    /// Accept an open-ended last chapter (it runs to the end of the sequence).
    #[serde(default = "default_true")]
    pub allow_open_last: bool,
}

fn default_near_full_span_pct() -> u8 {
    90
}

fn default_true() -> bool {
    true
}

impl Default for PlannerSettings {
    fn default() -> Self {
        Self {
            near_full_span_pct: default_near_full_span_pct(),
            allow_open_last: true,
        }
    }
}

/// External cutter invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CutterSettings {
    /// Program to run.
    #[serde(default = "default_program")]
    pub program: String,

    /// Extra arguments placed before the output path.
    #[serde(default)]
    pub extra_args: Vec<String>,

    /// Overwrite existing output files.
    #[serde(default = "default_true")]
    pub overwrite: bool,
}

fn default_program() -> String {
    "ffmpeg".to_string()
}

impl Default for CutterSettings {
    fn default() -> Self {
        Self {
            program: default_program(),
            extra_args: Vec::new(),
            overwrite: true,
        }
    }
}

/// Chapter file output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChapterSettings {
    #[serde(default)]
    pub format: ChapterFormat,

    /// Language written into Matroska chapter names.
    #[serde(default = "default_language")]
    pub language: String,
}

fn default_language() -> String {
    "und".to_string()
}

impl Default for ChapterSettings {
    fn default() -> Self {
        Self {
            format: ChapterFormat::default(),
            language: default_language(),
        }
    }
}

/// Names of config sections for targeted updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigSection {
    Logging,
    Planner,
    Cutter,
    Chapters,
}

impl ConfigSection {
    pub const ALL: [ConfigSection; 4] = [
        ConfigSection::Logging,
        ConfigSection::Planner,
        ConfigSection::Cutter,
        ConfigSection::Chapters,
    ];

    /// Get the TOML table name for this section.
    pub fn table_name(&self) -> &'static str {
        match self {
            ConfigSection::Logging => "logging",
            ConfigSection::Planner => "planner",
            ConfigSection::Cutter => "cutter",
            ConfigSection::Chapters => "chapters",
        }
    }

    /// Comment written above the section in generated files.
    pub fn description(&self) -> &'static str {
        match self {
            ConfigSection::Logging => "Logging configuration",
            ConfigSection::Planner => "Trim planning",
            ConfigSection::Cutter => "External audio cutter",
            ConfigSection::Chapters => "Chapter file output",
        }
    }
}
