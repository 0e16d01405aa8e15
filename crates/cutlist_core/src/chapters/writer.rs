//! Chapter file writers.

use std::fs;
use std::path::Path;

use super::types::{ChapterError, ChapterFormat, ChapterMarker, ChapterResult};
use crate::timecode::{format_ns, parse_timecode};

/// Renders chapter markers into a chapter file.
pub trait ChapterWriter {
    /// Render markers to the file contents.
    fn render(&self, markers: &[ChapterMarker]) -> ChapterResult<String>;

    /// Render markers and write them to `output_path`.
    fn write(&self, markers: &[ChapterMarker], output_path: &Path) -> ChapterResult<()> {
        let content = self.render(markers)?;

        if let Some(parent) = output_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(output_path, content)?;

        tracing::info!(
            "Wrote {} chapters to {}",
            markers.len(),
            output_path.display()
        );
        Ok(())
    }
}

/// Matroska chapter XML (mkvmerge `--chapters`).
#[derive(Debug, Clone)]
pub struct MatroskaXmlWriter {
    /// ISO 639-2 language written for every chapter name.
    pub language: String,
}

impl Default for MatroskaXmlWriter {
    fn default() -> Self {
        Self {
            language: "und".to_string(),
        }
    }
}

impl MatroskaXmlWriter {
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
        }
    }
}

impl ChapterWriter for MatroskaXmlWriter {
    fn render(&self, markers: &[ChapterMarker]) -> ChapterResult<String> {
        let mut xml = String::new();
        xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        xml.push_str("<!DOCTYPE Chapters SYSTEM \"matroskachapters.dtd\">\n");
        xml.push_str("<Chapters>\n");
        xml.push_str("  <EditionEntry>\n");

        for (i, marker) in markers.iter().enumerate() {
            let start_ns = marker_ns(marker)?;

            xml.push_str("    <ChapterAtom>\n");
            xml.push_str(&format!(
                "      <ChapterTimeStart>{}</ChapterTimeStart>\n",
                format_ns(start_ns)
            ));
            xml.push_str("      <ChapterDisplay>\n");
            xml.push_str(&format!(
                "        <ChapterString>{}</ChapterString>\n",
                escape_xml(&marker.display_name(i + 1))
            ));
            xml.push_str(&format!(
                "        <ChapterLanguage>{}</ChapterLanguage>\n",
                escape_xml(&self.language)
            ));
            xml.push_str("      </ChapterDisplay>\n");
            xml.push_str("    </ChapterAtom>\n");
        }

        xml.push_str("  </EditionEntry>\n");
        xml.push_str("</Chapters>\n");

        Ok(xml)
    }
}

/// OGM simple chapter text.
///
/// OGM timestamps only carry milliseconds; they are rounded to the nearest.
#[derive(Debug, Clone, Copy, Default)]
pub struct OgmWriter;

impl ChapterWriter for OgmWriter {
    fn render(&self, markers: &[ChapterMarker]) -> ChapterResult<String> {
        let mut text = String::new();

        for (i, marker) in markers.iter().enumerate() {
            let number = i + 1;
            let ms = (marker_ns(marker)? + 500_000) / 1_000_000;
            let timestamp = format_ns(ms * 1_000_000);

            text.push_str(&format!("CHAPTER{:02}={}\n", number, &timestamp[..timestamp.len() - 6]));
            text.push_str(&format!(
                "CHAPTER{:02}NAME={}\n",
                number,
                marker.display_name(number)
            ));
        }

        Ok(text)
    }
}

/// Write markers in the given format.
pub fn write_chapters(
    format: ChapterFormat,
    language: &str,
    markers: &[ChapterMarker],
    output_path: &Path,
) -> ChapterResult<()> {
    match format {
        ChapterFormat::Xml => MatroskaXmlWriter::new(language).write(markers, output_path),
        ChapterFormat::Ogm => OgmWriter.write(markers, output_path),
    }
}

fn marker_ns(marker: &ChapterMarker) -> ChapterResult<u64> {
    parse_timecode(&marker.timecode)
        .ok_or_else(|| ChapterError::InvalidTimecode(marker.timecode.clone()))
}

/// Escape special XML characters.
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn markers() -> Vec<ChapterMarker> {
        vec![
            ChapterMarker::new("00:00:00.000000000", Some("Opening")),
            ChapterMarker::new("00:00:01.200000000", Some("Part A & B")),
            ChapterMarker::new("00:01:05.600400000", None),
        ]
    }

    #[test]
    fn xml_contains_markers() {
        let xml = MatroskaXmlWriter::new("eng").render(&markers()).unwrap();

        assert!(xml.contains("<!DOCTYPE Chapters"));
        assert!(xml.contains("<ChapterTimeStart>00:00:00.000000000</ChapterTimeStart>"));
        assert!(xml.contains("<ChapterTimeStart>00:00:01.200000000</ChapterTimeStart>"));
        assert!(xml.contains("<ChapterString>Opening</ChapterString>"));
        assert!(xml.contains("<ChapterString>Part A &amp; B</ChapterString>"));
        assert!(xml.contains("<ChapterString>Chapter 03</ChapterString>"));
        assert!(xml.contains("<ChapterLanguage>eng</ChapterLanguage>"));
        assert_eq!(xml.matches("<ChapterAtom>").count(), 3);
    }

    #[test]
    fn ogm_rounds_to_milliseconds() {
        let text = OgmWriter.render(&markers()).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "CHAPTER01=00:00:00.000");
        assert_eq!(lines[1], "CHAPTER01NAME=Opening");
        assert_eq!(lines[2], "CHAPTER02=00:00:01.200");
        assert_eq!(lines[4], "CHAPTER03=00:01:05.600");
        assert_eq!(lines[5], "CHAPTER03NAME=Chapter 03");
    }

    #[test]
    fn invalid_timecode_is_rejected() {
        let bad = vec![ChapterMarker::new("1.5", None)];
        assert!(matches!(
            OgmWriter.render(&bad),
            Err(ChapterError::InvalidTimecode(_))
        ));
    }

    #[test]
    fn writes_file_and_creates_parent() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out").join("chapters.xml");

        write_chapters(ChapterFormat::Xml, "und", &markers(), &path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("<ChapterLanguage>und</ChapterLanguage>"));
    }

    #[test]
    fn escape_xml_works() {
        assert_eq!(escape_xml("Hello & World"), "Hello &amp; World");
        assert_eq!(escape_xml("<test>"), "&lt;test&gt;");
    }
}
