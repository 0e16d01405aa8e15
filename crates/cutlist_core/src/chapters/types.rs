//! Chapter marker types and error definitions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One chapter start in the output timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterMarker {
    /// Start timecode (`HH:MM:SS.nnnnnnnnn`).
    pub timecode: String,
    /// Display name; unnamed chapters get a sequential name when written.
    pub label: Option<String>,
}

impl ChapterMarker {
    pub fn new(timecode: impl Into<String>, label: Option<&str>) -> Self {
        Self {
            timecode: timecode.into(),
            label: label.map(str::to_string),
        }
    }

    /// Label, or "Chapter NN" for the 1-based `number`.
    pub fn display_name(&self, number: usize) -> String {
        match &self.label {
            Some(label) if !label.is_empty() => label.clone(),
            _ => format!("Chapter {:02}", number),
        }
    }
}

/// Chapter file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChapterFormat {
    /// Matroska chapter XML.
    #[default]
    Xml,
    /// OGM simple chapter text.
    Ogm,
}

impl ChapterFormat {
    /// Usual file extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            ChapterFormat::Xml => "xml",
            ChapterFormat::Ogm => "txt",
        }
    }
}

impl fmt::Display for ChapterFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChapterFormat::Xml => write!(f, "xml"),
            ChapterFormat::Ogm => write!(f, "ogm"),
        }
    }
}

impl FromStr for ChapterFormat {
    type Err = ChapterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "xml" | "matroska" => Ok(ChapterFormat::Xml),
            "ogm" | "txt" => Ok(ChapterFormat::Ogm),
            other => Err(ChapterError::UnknownFormat(other.to_string())),
        }
    }
}

/// Error types for chapter output.
#[derive(Debug, thiserror::Error)]
pub enum ChapterError {
    /// Marker timecode could not be parsed.
    #[error("Invalid chapter timecode: {0}")]
    InvalidTimecode(String),

    /// Unsupported format name.
    #[error("Unknown chapter format: {0}")]
    UnknownFormat(String),

    /// IO error.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Type alias for chapter operation results.
pub type ChapterResult<T> = Result<T, ChapterError>;
