//! Outline repair: dedup, normalization, and hierarchy invariants.
//!
//! The repairer is the single producer of the final [`Outline`] and is
//! shared by every extraction strategy. Step order matters: dedup keys are
//! computed on normalized text, normalization rewrites the output text, the
//! length floor applies after normalization, and the no-level-skip walk runs
//! last over the surviving sequence.

use unicode_normalization::UnicodeNormalization;

use crate::model::{Heading, HeadingLevel, Outline};

/// Minimum heading length after normalization.
const MIN_HEADING_CHARS: usize = 3;

/// A level-assigned candidate ready for repair. Strategies convert their
/// internal candidate types into this minimal shape, dropping everything
/// else.
#[derive(Debug, Clone)]
pub struct RepairInput {
    /// Assigned depth
    pub level: HeadingLevel,
    /// Raw heading text
    pub text: String,
    /// Zero-based page index
    pub page: u32,
}

/// Builds the final outline from level-assigned candidates in document
/// order.
pub struct OutlineRepairer;

impl OutlineRepairer {
    /// Repair and assemble the outline. `candidates` must already be in
    /// document reading order; the repairer preserves that order.
    pub fn repair(title: String, candidates: Vec<RepairInput>) -> Outline {
        let mut seen: Vec<String> = Vec::new();
        let mut headings: Vec<Heading> = Vec::new();
        // The walk starts at depth 0, so an outline cannot open deeper
        // than H1.
        let mut prev_depth: u8 = 0;

        for candidate in candidates {
            let text = normalize_whitespace(&candidate.text);
            if text.chars().count() < MIN_HEADING_CHARS {
                continue;
            }

            let key = dedup_key(&text);
            if seen.contains(&key) {
                log::debug!("dropping duplicate heading '{}'", text);
                continue;
            }
            seen.push(key);

            // No-level-skip invariant: deepening by more than one step is
            // clamped; shallower jumps pass through untouched.
            let mut depth = candidate.level.depth();
            if depth > prev_depth + 1 {
                depth = prev_depth + 1;
            }
            prev_depth = depth;

            let level = HeadingLevel::from_depth(depth).unwrap_or(HeadingLevel::H4);
            headings.push(Heading::new(level, text, candidate.page));
        }

        Outline::new(title, headings)
    }
}

/// Collapse internal whitespace runs to single spaces and trim.
fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Case-insensitive, NFKC-folded key for duplicate detection.
fn dedup_key(text: &str) -> String {
    text.nfkc().collect::<String>().to_lowercase()
}
