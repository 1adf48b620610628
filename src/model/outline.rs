//! Outline artifact types.
//!
//! The [`Outline`] is the final product of every extraction strategy: a
//! document title (possibly empty) plus an ordered heading sequence. Page
//! indices stay zero-based inside the model; the 1-based conversion required
//! by the output contract happens only in [`crate::report`].

use serde::{Deserialize, Serialize};

/// Heading depth, H1 (shallowest) through H4 (deepest).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HeadingLevel {
    /// Top-level heading
    H1,
    /// Second-level heading
    H2,
    /// Third-level heading
    H3,
    /// Fourth-level heading
    H4,
}

impl HeadingLevel {
    /// Numeric depth, 1 through 4.
    pub fn depth(self) -> u8 {
        match self {
            HeadingLevel::H1 => 1,
            HeadingLevel::H2 => 2,
            HeadingLevel::H3 => 3,
            HeadingLevel::H4 => 4,
        }
    }

    /// Level for a numeric depth; values above 4 clamp to H4, 0 is invalid.
    pub fn from_depth(depth: u8) -> Option<HeadingLevel> {
        match depth {
            1 => Some(HeadingLevel::H1),
            2 => Some(HeadingLevel::H2),
            3 => Some(HeadingLevel::H3),
            0 => None,
            _ => Some(HeadingLevel::H4),
        }
    }

    /// All levels in depth order.
    pub fn all() -> [HeadingLevel; 4] {
        [
            HeadingLevel::H1,
            HeadingLevel::H2,
            HeadingLevel::H3,
            HeadingLevel::H4,
        ]
    }
}

impl std::fmt::Display for HeadingLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "H{}", self.depth())
    }
}

/// Per-element label produced by a classifier backend.
///
/// The same label space the outline engine decides with rules: a text element
/// is the document title, a heading at some depth, or body text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ElementLabel {
    /// Document title
    Title,
    /// Heading at the given depth
    Heading(HeadingLevel),
    /// Regular body text
    Body,
}

impl ElementLabel {
    /// The heading level, if this label is a heading.
    pub fn heading_level(self) -> Option<HeadingLevel> {
        match self {
            ElementLabel::Heading(level) => Some(level),
            _ => None,
        }
    }
}

/// One heading in the final outline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Heading {
    /// Assigned depth
    pub level: HeadingLevel,
    /// Normalized heading text
    pub text: String,
    /// Zero-based page index
    pub page: u32,
}

impl Heading {
    /// Create a heading.
    pub fn new(level: HeadingLevel, text: impl Into<String>, page: u32) -> Self {
        Self {
            level,
            text: text.into(),
            page,
        }
    }
}

/// The final outline artifact: title plus ordered heading sequence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Outline {
    /// Document title, empty when no candidate qualified
    pub title: String,
    /// Headings in document reading order
    pub headings: Vec<Heading>,
}

impl Outline {
    /// The outline of a content-free document.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Create an outline.
    pub fn new(title: impl Into<String>, headings: Vec<Heading>) -> Self {
        Self {
            title: title.into(),
            headings,
        }
    }

    /// Whether the outline carries neither title nor headings.
    pub fn is_empty(&self) -> bool {
        self.title.is_empty() && self.headings.is_empty()
    }
}
