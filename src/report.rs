//! Serialized outline report.
//!
//! Page indices are zero-based everywhere inside the engine; the report
//! is the single place they become one-based for readers.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::{HeadingLevel, Outline};

/// JSON rendering style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed, for humans
    #[default]
    Pretty,
    /// Single line, for pipelines
    Compact,
}

/// One heading entry as serialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeadingEntry {
    /// Depth label, "H1" through "H4"
    pub level: String,
    /// Normalized heading text
    pub text: String,
    /// One-based page number
    pub page: u32,
}

/// The serialized outline document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlineReport {
    /// Document title, empty string when none was selected
    pub title: String,
    /// Headings in reading order
    pub outline: Vec<HeadingEntry>,
}

impl From<&Outline> for OutlineReport {
    fn from(outline: &Outline) -> Self {
        Self {
            title: outline.title.clone(),
            outline: outline
                .headings
                .iter()
                .map(|h| HeadingEntry {
                    level: h.level.to_string(),
                    text: h.text.clone(),
                    page: h.page + 1,
                })
                .collect(),
        }
    }
}

impl OutlineReport {
    /// Parse a heading level label back into the model type.
    pub fn parse_level(label: &str) -> Option<HeadingLevel> {
        match label {
            "H1" => Some(HeadingLevel::H1),
            "H2" => Some(HeadingLevel::H2),
            "H3" => Some(HeadingLevel::H3),
            "H4" => Some(HeadingLevel::H4),
            _ => None,
        }
    }
}

/// Render an outline as JSON.
pub fn to_json(outline: &Outline, format: JsonFormat) -> Result<String> {
    let report = OutlineReport::from(outline);
    let text = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(&report)?,
        JsonFormat::Compact => serde_json::to_string(&report)?,
    };
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Heading;

    fn sample() -> Outline {
        Outline::new(
            "Network Protocol Handbook",
            vec![
                Heading::new(HeadingLevel::H1, "Introduction", 0),
                Heading::new(HeadingLevel::H2, "Scope and Audience", 0),
                Heading::new(HeadingLevel::H1, "Message Framing", 3),
            ],
        )
    }

    #[test]
    fn test_pages_become_one_based() {
        let report = OutlineReport::from(&sample());
        assert_eq!(report.outline[0].page, 1);
        assert_eq!(report.outline[2].page, 4);
    }

    #[test]
    fn test_levels_render_as_labels() {
        let report = OutlineReport::from(&sample());
        assert_eq!(report.outline[0].level, "H1");
        assert_eq!(report.outline[1].level, "H2");
    }

    #[test]
    fn test_empty_outline_serializes_cleanly() {
        let json = to_json(&Outline::empty(), JsonFormat::Compact).unwrap();
        assert_eq!(json, r#"{"title":"","outline":[]}"#);
    }

    #[test]
    fn test_pretty_and_compact_agree() {
        let outline = sample();
        let pretty = to_json(&outline, JsonFormat::Pretty).unwrap();
        let compact = to_json(&outline, JsonFormat::Compact).unwrap();
        let a: OutlineReport = serde_json::from_str(&pretty).unwrap();
        let b: OutlineReport = serde_json::from_str(&compact).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_parse_level_round_trip() {
        for level in HeadingLevel::all() {
            assert_eq!(
                OutlineReport::parse_level(&level.to_string()),
                Some(level)
            );
        }
        assert_eq!(OutlineReport::parse_level("H9"), None);
    }
}
