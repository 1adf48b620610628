//! Data model for outline inference.
//!
//! This module defines the intermediate representation that bridges the
//! upstream page-text extractor and the outline engine. The model is
//! extractor-agnostic: any collaborator that can produce positioned,
//! merged text lines can feed it.

mod element;
mod outline;

pub use element::{BoundingBox, DocumentText, PageText, StyleFlags, TextElement};
pub use outline::{ElementLabel, Heading, HeadingLevel, Outline};
