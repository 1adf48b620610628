//! # untoc
//!
//! Document outline inference: given the positioned text elements of a
//! paginated document, recover its title and hierarchical heading
//! structure (H1 through H4) without relying on embedded bookmarks.
//!
//! ## Quick start
//!
//! ```no_run
//! use untoc::{extract_outline, model::DocumentText};
//!
//! # fn main() -> untoc::Result<()> {
//! let json = std::fs::read_to_string("document.json")?;
//! let doc = DocumentText::from_json(&json)?;
//! let outline = extract_outline(&doc)?;
//! println!("{} ({} headings)", outline.title, outline.headings.len());
//! # Ok(())
//! # }
//! ```
//!
//! ## Strategies
//!
//! - `context`: weighted multi-analyzer scoring over numbering, semantic
//!   vocabulary, position, text characteristics, and whitespace context.
//!   Works on documents with uniform font metadata.
//! - `font-size`: clusters font sizes above body text into heading
//!   tiers. Fast, effective when size metadata is discriminative.
//! - `classifier`: defers per-element labelling to a pluggable backend.
//! - `auto`: inspects font statistics and picks between the first two.
//!
//! All coordinates are top-left origin with y growing downward. Page
//! indices are zero-based inside the library and become one-based only
//! in the serialized report.

pub mod batch;
pub mod engine;
pub mod error;
pub mod model;
pub mod report;

pub use engine::{
    build_strategy, AutoStrategy, ClassifierStrategy, ContextStrategy, EngineConfig,
    ExtractionStrategy, FontSizeStrategy, LabelClassifier, StrategyKind,
};
pub use error::{Error, Result};
pub use model::{DocumentText, Heading, HeadingLevel, Outline};
pub use report::{to_json, JsonFormat, OutlineReport};

/// Extract an outline with the default configuration and automatic
/// strategy selection.
pub fn extract_outline(doc: &DocumentText) -> Result<Outline> {
    AutoStrategy::new(&EngineConfig::default()).extract_outline(doc)
}
