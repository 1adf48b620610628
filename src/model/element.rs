//! Positioned text element model.
//!
//! These types are the input contract from the page-text extraction
//! collaborator: an ordered sequence of pages, each carrying merged logical
//! lines with a combined bounding box and OR-combined style flags. The engine
//! never performs extraction itself; it consumes this model and computes
//! layout features (indentation, centering, page position) on demand.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Axis-aligned bounding box in page coordinate units.
///
/// Origin is the top-left corner of the page; `y` grows downward, so `y0` is
/// the top edge of the text line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Left edge
    pub x0: f32,
    /// Top edge
    pub y0: f32,
    /// Right edge
    pub x1: f32,
    /// Bottom edge
    pub y1: f32,
}

impl BoundingBox {
    /// Create a bounding box, validating the corner ordering invariant.
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Result<Self> {
        if x0 > x1 || y0 > y1 {
            return Err(Error::InvalidInput(format!(
                "inverted bounding box: ({x0}, {y0}, {x1}, {y1})"
            )));
        }
        Ok(Self { x0, y0, x1, y1 })
    }

    /// Width of the box.
    pub fn width(&self) -> f32 {
        self.x1 - self.x0
    }

    /// Height of the box.
    pub fn height(&self) -> f32 {
        self.y1 - self.y0
    }

    /// Horizontal center of the box.
    pub fn center_x(&self) -> f32 {
        self.x0 + self.width() / 2.0
    }

    fn is_valid(&self) -> bool {
        self.x0 <= self.x1 && self.y0 <= self.y1
    }
}

/// Style flags for a text element, OR-combined across the styled fragments
/// the extractor merged into one logical line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleFlags {
    /// Any fragment of the line uses a bold face
    #[serde(default)]
    pub bold: bool,
    /// Any fragment of the line uses an italic face
    #[serde(default)]
    pub italic: bool,
}

impl StyleFlags {
    /// Combine with another flag set (set union).
    pub fn union(self, other: StyleFlags) -> StyleFlags {
        StyleFlags {
            bold: self.bold || other.bold,
            italic: self.italic || other.italic,
        }
    }
}

/// One logical line of text with geometry and style.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextElement {
    /// Line text, whitespace-trimmed, never empty
    pub text: String,
    /// Zero-based page index
    pub page: u32,
    /// Combined bounding box of the line
    pub bbox: BoundingBox,
    /// Dominant font size in points
    pub font_size: f32,
    /// OR-combined style flags
    #[serde(default)]
    pub style: StyleFlags,
}

impl TextElement {
    /// Create a text element, enforcing the model invariants: non-empty
    /// trimmed text, valid bounding box, positive font size.
    pub fn new(
        text: impl Into<String>,
        page: u32,
        bbox: BoundingBox,
        font_size: f32,
        style: StyleFlags,
    ) -> Result<Self> {
        let text = text.into().trim().to_string();
        if text.is_empty() {
            return Err(Error::InvalidInput("empty text element".to_string()));
        }
        if font_size <= 0.0 {
            return Err(Error::InvalidInput(format!(
                "non-positive font size: {font_size}"
            )));
        }
        Ok(Self {
            text,
            page,
            bbox,
            font_size,
            style,
        })
    }

    /// Indentation in inches, derived from the left edge.
    pub fn indentation(&self, units_per_inch: f32) -> f32 {
        self.bbox.x0 / units_per_inch
    }

    /// Horizontal centering score in [0, 1]; 1.0 means the line center
    /// coincides with the page center.
    pub fn centering(&self, page_width: f32) -> f32 {
        if page_width <= 0.0 {
            return 0.0;
        }
        let page_center = page_width / 2.0;
        let score = 1.0 - (self.bbox.center_x() - page_center).abs() / page_center;
        score.clamp(0.0, 1.0)
    }

    /// Vertical position on the page in [0, 1]; 0.0 is the top edge.
    pub fn page_position(&self, page_height: f32) -> f32 {
        if page_height <= 0.0 {
            return 0.0;
        }
        (self.bbox.y0 / page_height).clamp(0.0, 1.0)
    }

    /// Number of whitespace-separated words.
    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }

    fn is_valid(&self) -> bool {
        !self.text.trim().is_empty() && self.bbox.is_valid() && self.font_size > 0.0
    }
}

/// All text elements of one page plus the page geometry needed for
/// centering and position normalization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageText {
    /// Zero-based page index
    pub index: u32,
    /// Page width in coordinate units
    pub width: f32,
    /// Page height in coordinate units
    pub height: f32,
    /// Logical lines in extractor order
    #[serde(default)]
    pub elements: Vec<TextElement>,
}

impl PageText {
    /// Create an empty page.
    pub fn new(index: u32, width: f32, height: f32) -> Self {
        Self {
            index,
            width,
            height,
            elements: Vec::new(),
        }
    }

    /// Add an element to the page.
    pub fn push(&mut self, element: TextElement) {
        self.elements.push(element);
    }

    /// Drop elements that violate the model invariants. Deserialized dumps
    /// bypass `TextElement::new`, so this runs once on ingestion.
    pub fn sanitize(&mut self) {
        let before = self.elements.len();
        self.elements.retain(|e| e.is_valid());
        let dropped = before - self.elements.len();
        if dropped > 0 {
            log::warn!("page {}: dropped {} invalid text elements", self.index, dropped);
        }
        for e in &mut self.elements {
            let trimmed = e.text.trim();
            if trimmed.len() != e.text.len() {
                e.text = trimmed.to_string();
            }
        }
    }
}

/// The full positioned-text dump for one document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentText {
    /// Pages in document order
    #[serde(default)]
    pub pages: Vec<PageText>,
}

impl DocumentText {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a page.
    pub fn push_page(&mut self, page: PageText) {
        self.pages.push(page);
    }

    /// Total number of text elements across all pages.
    pub fn element_count(&self) -> usize {
        self.pages.iter().map(|p| p.elements.len()).sum()
    }

    /// Whether the document has no extractable text.
    pub fn is_empty(&self) -> bool {
        self.element_count() == 0
    }

    /// First page, if any.
    pub fn first_page(&self) -> Option<&PageText> {
        self.pages.first()
    }

    /// Sanitize all pages and sort elements into reading order
    /// (top-to-bottom, then left-to-right) within each page.
    pub fn sanitize(&mut self) {
        for page in &mut self.pages {
            page.sanitize();
            page.elements.sort_by(|a, b| {
                a.bbox
                    .y0
                    .total_cmp(&b.bbox.y0)
                    .then(a.bbox.x0.total_cmp(&b.bbox.x0))
            });
        }
    }

    /// Parse a document dump from JSON and sanitize it.
    pub fn from_json(json: &str) -> Result<Self> {
        let mut doc: DocumentText = serde_json::from_str(json)
            .map_err(|e| Error::InvalidInput(format!("malformed document dump: {e}")))?;
        doc.sanitize();
        Ok(doc)
    }
}
