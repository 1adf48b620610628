//! Classifier-backed extraction strategy.
//!
//! Delegates per-element labelling to a pluggable [`LabelClassifier`]
//! backend (typically a sentence-embedding model hosted outside this
//! crate). The strategy itself only handles confidence gating, title
//! selection, and outline repair.

use std::sync::Arc;

use crate::engine::config::EngineConfig;
use crate::engine::repair::{OutlineRepairer, RepairInput};
use crate::engine::title::TitleSelector;
use crate::engine::ExtractionStrategy;
use crate::error::{Error, Result};
use crate::model::{DocumentText, ElementLabel, Outline, TextElement};

/// Relaxed thresholds tried in order when the primary confidence gate
/// yields too few headings.
const FALLBACK_STAGES: [(usize, f32); 2] = [(5, 0.5), (3, 0.3)];

/// Per-element labelling backend.
///
/// Implementations must be thread safe; batch processing calls into the
/// classifier from multiple worker threads.
pub trait LabelClassifier: Send + Sync {
    /// Backend name, for logs and diagnostics.
    fn name(&self) -> &str;

    /// Label one text element, returning the label and a confidence in
    /// `[0.0, 1.0]`.
    fn classify(&self, element: &TextElement) -> Result<(ElementLabel, f32)>;
}

/// Extraction strategy that defers labelling to a classifier backend.
pub struct ClassifierStrategy {
    classifier: Arc<dyn LabelClassifier>,
    title_selector: TitleSelector,
    confidence: f32,
}

struct Labelled {
    label: ElementLabel,
    confidence: f32,
    text: String,
    page: u32,
}

impl ClassifierStrategy {
    pub fn new(config: &EngineConfig, classifier: Arc<dyn LabelClassifier>) -> Self {
        Self {
            title_selector: TitleSelector::new(config),
            confidence: config.classifier_confidence,
            classifier,
        }
    }

    /// Headings at or above the given confidence, in document order.
    fn headings_at(labelled: &[Labelled], threshold: f32) -> Vec<RepairInput> {
        labelled
            .iter()
            .filter(|l| l.confidence >= threshold)
            .filter_map(|l| {
                l.label.heading_level().map(|level| RepairInput {
                    level,
                    text: l.text.clone(),
                    page: l.page,
                })
            })
            .collect()
    }
}

impl ExtractionStrategy for ClassifierStrategy {
    fn name(&self) -> &str {
        "classifier"
    }

    fn extract_outline(&self, doc: &DocumentText) -> Result<Outline> {
        if doc.is_empty() {
            return Ok(Outline::empty());
        }

        let mut labelled: Vec<Labelled> = Vec::new();
        for page in &doc.pages {
            for element in &page.elements {
                let (label, confidence) = self
                    .classifier
                    .classify(element)
                    .map_err(|e| Error::Classifier(format!("{}: {e}", self.classifier.name())))?;
                labelled.push(Labelled {
                    label,
                    confidence,
                    text: element.text.clone(),
                    page: page.index,
                });
            }
        }

        // Best first-page title label wins; positional selection covers
        // documents where the classifier never emits a title.
        let title = labelled
            .iter()
            .filter(|l| l.page == 0 && l.label == ElementLabel::Title && l.confidence >= 0.5)
            .max_by(|a, b| a.confidence.total_cmp(&b.confidence))
            .map(|l| l.text.clone())
            .or_else(|| doc.first_page().map(|p| self.title_selector.select(p)))
            .unwrap_or_default();

        let mut headings = Self::headings_at(&labelled, self.confidence);
        for (min_count, relaxed) in FALLBACK_STAGES {
            if headings.len() >= min_count {
                break;
            }
            log::debug!(
                "{}: {} headings at {:.1}, relaxing gate to {:.1}",
                self.classifier.name(),
                headings.len(),
                self.confidence,
                relaxed
            );
            headings = Self::headings_at(&labelled, relaxed);
        }

        Ok(OutlineRepairer::repair(title, headings))
    }
}
