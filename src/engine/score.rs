//! Multi-signal heading candidate scoring.
//!
//! Each text element is scored by five independent analyzers (numbering,
//! semantic vocabulary, position/indentation, text shape, structural
//! context) whose bounded outputs are linearly combined with fixed weights.
//! The composite is a deterministic weighted sum by contract: the per-signal
//! breakdown must stay explainable, so no analyzer may hide state.

use crate::engine::config::EngineConfig;
use crate::engine::patterns::{NumberingPatterns, PreFilter};
use crate::engine::text_shape::{is_all_caps, is_title_case};
use crate::model::{DocumentText, HeadingLevel, TextElement};

/// Per-analyzer weighted contributions to a candidate's composite score.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SignalBreakdown {
    /// Numbering analyzer contribution
    pub numbering: f32,
    /// Semantic analyzer contribution
    pub semantic: f32,
    /// Position/indentation analyzer contribution
    pub position: f32,
    /// Text-characteristics analyzer contribution
    pub characteristics: f32,
    /// Structural-context analyzer contribution
    pub context: f32,
}

impl SignalBreakdown {
    /// Composite score: the sum of all contributions.
    pub fn total(&self) -> f32 {
        self.numbering + self.semantic + self.position + self.characteristics + self.context
    }
}

/// A text element that passed pre-filtering and scored at or above the
/// acceptance threshold. Carries everything the hierarchy assigner and
/// repairer need; the source element is not retained.
#[derive(Debug, Clone)]
pub struct HeadingCandidate {
    /// Candidate text (trimmed, as extracted)
    pub text: String,
    /// Zero-based page index
    pub page: u32,
    /// Top edge of the source element, for reading order
    pub y: f32,
    /// Indentation in inches
    pub indentation: f32,
    /// Centering score in [0, 1]
    pub centering: f32,
    /// Composite heading-likelihood score
    pub score: f32,
    /// Per-analyzer diagnostics
    pub breakdown: SignalBreakdown,
    /// Assigned level; `None` until the hierarchy assigner runs
    pub level: Option<HeadingLevel>,
}

/// Scores all text elements of a document and yields accepted heading
/// candidates in reading order.
pub struct HeadingScorer {
    config: EngineConfig,
    patterns: NumberingPatterns,
    prefilter: PreFilter,
}

/// One element with its per-page geometry resolved, in reading order.
struct Positioned<'a> {
    element: &'a TextElement,
    page_index: u32,
    indentation: f32,
    centering: f32,
    page_position: f32,
}

impl HeadingScorer {
    /// Build a scorer; regex and vocabulary tables are compiled here once.
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            prefilter: PreFilter::new(&config.boilerplate_phrases),
            patterns: NumberingPatterns::new(),
            config: config.clone(),
        }
    }

    /// The shared numbering pattern table (also used for level overrides).
    pub fn patterns(&self) -> &NumberingPatterns {
        &self.patterns
    }

    /// Whether a composite score clears the acceptance threshold.
    pub fn accepts(&self, score: f32) -> bool {
        score >= self.config.acceptance_threshold
    }

    /// Score every element and return accepted candidates sorted by
    /// (page, vertical position).
    pub fn score_document(&self, doc: &DocumentText) -> Vec<HeadingCandidate> {
        let ordered = self.reading_order(doc);
        if ordered.is_empty() {
            return Vec::new();
        }

        // Indentation census over all elements, for the recurring-tier bonus.
        let indentations: Vec<f32> = ordered.iter().map(|p| p.indentation).collect();

        let mut candidates = Vec::new();
        for (idx, pos) in ordered.iter().enumerate() {
            let text = pos.element.text.as_str();
            if self.prefilter.rejects(text) {
                continue;
            }

            let w = self.config.weights;
            let breakdown = SignalBreakdown {
                numbering: self.patterns.structural_score(text) * w.numbering,
                semantic: self.semantic_score(text) * w.semantic,
                position: self.position_score(pos) * w.position,
                characteristics: self.characteristics_score(pos.element) * w.characteristics,
                context: self.context_score(idx, &ordered, &indentations) * w.context,
            };
            let score = breakdown.total();

            if self.accepts(score) {
                log::debug!(
                    "heading candidate '{}' (page {}): score {:.2} \
                     [num {:.2}, sem {:.2}, pos {:.2}, chr {:.2}, ctx {:.2}]",
                    text,
                    pos.page_index,
                    score,
                    breakdown.numbering,
                    breakdown.semantic,
                    breakdown.position,
                    breakdown.characteristics,
                    breakdown.context,
                );
                candidates.push(HeadingCandidate {
                    text: text.to_string(),
                    page: pos.page_index,
                    y: pos.element.bbox.y0,
                    indentation: pos.indentation,
                    centering: pos.centering,
                    score,
                    breakdown,
                    level: None,
                });
            }
        }

        // Already built in reading order, but the contract is explicit.
        candidates.sort_by(|a, b| a.page.cmp(&b.page).then(a.y.total_cmp(&b.y)));
        candidates
    }

    /// Resolve per-page geometry and flatten into document reading order.
    fn reading_order<'a>(&self, doc: &'a DocumentText) -> Vec<Positioned<'a>> {
        let mut ordered: Vec<Positioned<'a>> = Vec::with_capacity(doc.element_count());
        for page in &doc.pages {
            for element in &page.elements {
                ordered.push(Positioned {
                    element,
                    page_index: page.index,
                    indentation: element.indentation(self.config.units_per_inch),
                    centering: element.centering(page.width),
                    page_position: element.page_position(page.height),
                });
            }
        }
        ordered.sort_by(|a, b| {
            a.page_index
                .cmp(&b.page_index)
                .then(a.element.bbox.y0.total_cmp(&b.element.bbox.y0))
                .then(a.element.bbox.x0.total_cmp(&b.element.bbox.x0))
        });
        ordered
    }

    /// Semantic analyzer: additive containment of structural vocabulary,
    /// capped at 1.0.
    fn semantic_score(&self, text: &str) -> f32 {
        let lower = text.to_lowercase();
        let mut score: f32 = 0.0;
        for marker in &self.config.semantic_markers {
            if lower.contains(marker.as_str()) {
                score += 0.8;
            }
        }
        for word in &self.config.structural_words {
            if lower.contains(word.as_str()) {
                score += 0.5;
            }
        }
        for phrase in &self.config.heading_phrases {
            if lower.contains(phrase.as_str()) {
                score += 0.3;
            }
        }
        score.min(1.0)
    }

    /// Position analyzer: rewards shallow indentation, strong centering, and
    /// top-of-page placement; penalizes deep indentation and bottom-of-page
    /// placement. Never negative.
    fn position_score(&self, pos: &Positioned<'_>) -> f32 {
        let mut score: f32 = 0.0;
        if pos.indentation < 0.5 {
            score += 0.5;
        } else if pos.indentation > 2.0 {
            score -= 0.3;
        }
        if pos.centering > 0.8 {
            score += 0.4;
        }
        if pos.page_position < 0.2 {
            score += 0.3;
        } else if pos.page_position > 0.8 {
            score -= 0.2;
        }
        score.max(0.0)
    }

    /// Text-characteristics analyzer: length, capitalization, punctuation,
    /// styling, word count.
    fn characteristics_score(&self, element: &TextElement) -> f32 {
        let text = element.text.as_str();
        let mut score = 0.0;

        let len = text.chars().count();
        if (5..=100).contains(&len) {
            score += 0.3;
        } else if len > 200 {
            score -= 0.5;
        }

        if is_all_caps(text) {
            score += 0.4;
        } else if is_title_case(text) {
            score += 0.3;
        }

        if !text.ends_with('.') {
            score += 0.2;
        }
        if text.ends_with(':') {
            score += 0.1;
        }

        if element.style.bold {
            score += 0.3;
        }
        if element.style.italic {
            score += 0.1;
        }

        let words = element.word_count();
        if (1..=10).contains(&words) {
            score += 0.2;
        }

        score
    }

    /// Structural-context analyzer: vertical isolation from neighbors on the
    /// same page, plus a bonus for indentation values recurring across the
    /// document (evidence of a heading tier).
    ///
    /// Gap thresholds are raw coordinate units and do not normalize for
    /// document scale; calibrate `gap_before_min`/`gap_after_min` per corpus.
    fn context_score(&self, idx: usize, ordered: &[Positioned<'_>], indentations: &[f32]) -> f32 {
        let mut score: f32 = 0.0;
        let pos = &ordered[idx];

        if idx > 0 {
            let prev = &ordered[idx - 1];
            if prev.page_index == pos.page_index {
                let gap = pos.element.bbox.y0 - prev.element.bbox.y0;
                if gap > self.config.gap_before_min {
                    score += 0.2;
                }
            }
        }
        if idx + 1 < ordered.len() {
            let next = &ordered[idx + 1];
            if next.page_index == pos.page_index {
                let gap = next.element.bbox.y0 - pos.element.bbox.y0;
                if gap > self.config.gap_after_min {
                    score += 0.2;
                }
            }
        }

        let peers = indentations
            .iter()
            .enumerate()
            .filter(|(i, ind)| *i != idx && (**ind - pos.indentation).abs() < 0.1)
            .count();
        if peers >= self.config.tier_support_min {
            score += 0.1;
        }

        score
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BoundingBox, PageText, StyleFlags};

    fn doc_with(lines: Vec<(&str, f32, f32, bool)>) -> DocumentText {
        let mut page = PageText::new(0, 612.0, 792.0);
        for (text, x0, y0, bold) in lines {
            page.push(
                TextElement::new(
                    text,
                    0,
                    BoundingBox::new(x0, y0, x0 + 200.0, y0 + 12.0).unwrap(),
                    12.0,
                    StyleFlags {
                        bold,
                        italic: false,
                    },
                )
                .unwrap(),
            );
        }
        let mut doc = DocumentText::new();
        doc.push_page(page);
        doc
    }

    fn scorer() -> HeadingScorer {
        HeadingScorer::new(&EngineConfig::default())
    }

    #[test]
    fn test_numbered_heading_accepted() {
        let doc = doc_with(vec![
            ("1. Introduction", 36.0, 100.0, true),
            ("This is a long paragraph of ordinary body text that rambles on.", 36.0, 130.0, false),
        ]);
        let candidates = scorer().score_document(&doc);
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].text, "1. Introduction");
        assert!(candidates[0].breakdown.numbering > 0.0);
    }

    #[test]
    fn test_prefiltered_text_never_scored() {
        let doc = doc_with(vec![
            ("Page 3", 36.0, 100.0, true),
            ("www.example.com/intro", 36.0, 130.0, true),
        ]);
        assert!(scorer().score_document(&doc).is_empty());
    }

    #[test]
    fn test_body_text_below_threshold() {
        let doc = doc_with(vec![(
            "the committee reviewed the filing and deferred a decision until spring.",
            90.0,
            500.0,
            false,
        )]);
        assert!(scorer().score_document(&doc).is_empty());
    }

    #[test]
    fn test_bare_semantic_heading_reaches_cap() {
        // "Conclusion" appears in both the marker and phrase tables, so the
        // semantic signal saturates at 1.0 and the line clears the threshold
        // without bold styling or numbering.
        let doc = doc_with(vec![
            (
                "the committee reviewed the filing and deferred a decision until spring.",
                36.0,
                360.0,
                false,
            ),
            ("Conclusion", 36.0, 400.0, false),
            (
                "members were asked to submit written comments before the next meeting.",
                36.0,
                430.0,
                false,
            ),
        ]);
        let candidates = scorer().score_document(&doc);
        assert_eq!(candidates.len(), 1);
        let c = &candidates[0];
        assert_eq!(c.text, "Conclusion");
        assert!((c.breakdown.semantic - 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_threshold_boundary() {
        let s = scorer();
        assert!(!s.accepts(3.9));
        assert!(s.accepts(4.0));
        assert!(s.accepts(4.1));
    }

    #[test]
    fn test_breakdown_total_matches_score() {
        let doc = doc_with(vec![("2.3 Methodology", 36.0, 100.0, true)]);
        let candidates = scorer().score_document(&doc);
        assert_eq!(candidates.len(), 1);
        let c = &candidates[0];
        assert!((c.breakdown.total() - c.score).abs() < 1e-6);
    }

    #[test]
    fn test_candidates_in_reading_order() {
        let mut doc = doc_with(vec![
            ("2. Methods", 36.0, 400.0, true),
            ("1. Introduction", 36.0, 100.0, true),
        ]);
        let mut page2 = PageText::new(1, 612.0, 792.0);
        page2.push(
            TextElement::new(
                "3. Results",
                1,
                BoundingBox::new(36.0, 80.0, 236.0, 92.0).unwrap(),
                12.0,
                StyleFlags {
                    bold: true,
                    italic: false,
                },
            )
            .unwrap(),
        );
        doc.push_page(page2);

        let candidates = scorer().score_document(&doc);
        let texts: Vec<&str> = candidates.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(texts, vec!["1. Introduction", "2. Methods", "3. Results"]);
    }

    #[test]
    fn test_idempotent_scoring() {
        let doc = doc_with(vec![
            ("1. Introduction", 36.0, 100.0, true),
            ("Conclusion", 36.0, 400.0, true),
        ]);
        let s = scorer();
        let first = s.score_document(&doc);
        let second = s.score_document(&doc);
        assert_eq!(first.len(), second.len());
        for (a, b) in first.iter().zip(second.iter()) {
            assert_eq!(a.text, b.text);
            assert_eq!(a.score, b.score);
        }
    }

    #[test]
    fn test_empty_document() {
        assert!(scorer().score_document(&DocumentText::new()).is_empty());
    }
}
