//! Chapter file output.
//!
//! After a chapter plan is computed, its markers (timecode + label in the
//! post-cut timeline) are written to a chapter file for the muxer.
//!
//! # Formats
//!
//! - **Matroska XML**: `<Chapters>` document for mkvmerge `--chapters`
//! - **OGM text**: `CHAPTER01=HH:MM:SS.mmm` / `CHAPTER01NAME=...` pairs
//!
//! # Usage
//!
//! ```ignore
//! use cutlist_core::chapters::{ChapterFormat, write_chapters};
//!
//! let plan = ChapterPlanner::new(sequence).plan(&entries)?;
//! write_chapters(ChapterFormat::Xml, "eng", &plan.markers(), Path::new("chapters.xml"))?;
//! ```

mod types;
mod writer;

pub use types::{ChapterError, ChapterFormat, ChapterMarker, ChapterResult};
pub use writer::{write_chapters, ChapterWriter, MatroskaXmlWriter, OgmWriter};
