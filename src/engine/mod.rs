//! Outline extraction strategies.
//!
//! Every strategy consumes a [`DocumentText`] and produces a repaired
//! [`Outline`]. The context-aware strategy is the layout-driven default;
//! the font-size strategy exploits size metadata when it is
//! discriminative; the classifier strategy defers labelling to an
//! external backend. [`AutoStrategy`] picks between the first two based
//! on observed font statistics.

pub mod classifier;
pub mod config;
pub mod font_size;
pub mod level;
pub mod patterns;
pub mod repair;
pub mod score;
pub mod text_shape;
pub mod title;

use std::str::FromStr;
use std::sync::Arc;

pub use classifier::{ClassifierStrategy, LabelClassifier};
pub use config::{EngineConfig, ScoreWeights, TitleWeights};
pub use font_size::{FontSizeStrategy, FontStatistics};
pub use level::LevelAssigner;
pub use repair::{OutlineRepairer, RepairInput};
pub use score::{HeadingCandidate, HeadingScorer, SignalBreakdown};
pub use title::TitleSelector;

use crate::error::{Error, Result};
use crate::model::{DocumentText, Outline};

/// A complete outline extraction pipeline.
pub trait ExtractionStrategy: Send + Sync {
    /// Short strategy name, for logs and reports.
    fn name(&self) -> &str;

    /// Extract the title and heading outline from a document.
    ///
    /// An empty document yields an empty outline, never an error.
    fn extract_outline(&self, doc: &DocumentText) -> Result<Outline>;
}

/// Layout-driven extraction: weighted multi-analyzer scoring followed by
/// tiered level assignment and outline repair.
pub struct ContextStrategy {
    title_selector: TitleSelector,
    scorer: HeadingScorer,
}

impl ContextStrategy {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            title_selector: TitleSelector::new(config),
            scorer: HeadingScorer::new(config),
        }
    }
}

impl ExtractionStrategy for ContextStrategy {
    fn name(&self) -> &str {
        "context"
    }

    fn extract_outline(&self, doc: &DocumentText) -> Result<Outline> {
        if doc.is_empty() {
            return Ok(Outline::empty());
        }

        let title = doc
            .first_page()
            .map(|p| self.title_selector.select(p))
            .unwrap_or_default();

        let candidates = self.scorer.score_document(doc);
        let assigner = LevelAssigner::new(self.scorer.patterns());
        let assigned = assigner.assign(candidates);

        let inputs: Vec<RepairInput> = assigned
            .into_iter()
            .filter_map(|c| {
                c.level.map(|level| RepairInput {
                    level,
                    text: c.text,
                    page: c.page,
                })
            })
            .collect();

        Ok(OutlineRepairer::repair(title, inputs))
    }
}

/// Detects whether font metadata is discriminative and dispatches to the
/// font-size or context-aware strategy accordingly.
pub struct AutoStrategy {
    context: ContextStrategy,
    font_size: FontSizeStrategy,
    uniform_spread: f32,
}

impl AutoStrategy {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            context: ContextStrategy::new(config),
            font_size: FontSizeStrategy::new(config),
            uniform_spread: config.uniform_font_variance,
        }
    }
}

impl ExtractionStrategy for AutoStrategy {
    fn name(&self) -> &str {
        "auto"
    }

    fn extract_outline(&self, doc: &DocumentText) -> Result<Outline> {
        if doc.is_empty() {
            return Ok(Outline::empty());
        }

        let spread = FontStatistics::collect(doc).size_spread();
        if spread < self.uniform_spread {
            log::debug!(
                "font spread {:.2}pt below {:.2}pt, using context strategy",
                spread,
                self.uniform_spread
            );
            self.context.extract_outline(doc)
        } else {
            log::debug!("font spread {:.2}pt, using font-size strategy", spread);
            self.font_size.extract_outline(doc)
        }
    }
}

/// Strategy selector, as accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyKind {
    /// Pick between context and font-size based on font statistics
    Auto,
    /// Layout-driven weighted scoring
    Context,
    /// Font-size hierarchy clustering
    FontSize,
    /// External classifier backend
    Classifier,
}

impl StrategyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StrategyKind::Auto => "auto",
            StrategyKind::Context => "context",
            StrategyKind::FontSize => "font-size",
            StrategyKind::Classifier => "classifier",
        }
    }
}

impl FromStr for StrategyKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(StrategyKind::Auto),
            "context" => Ok(StrategyKind::Context),
            "font-size" | "font_size" | "fontsize" => Ok(StrategyKind::FontSize),
            "classifier" => Ok(StrategyKind::Classifier),
            other => Err(Error::Config(format!(
                "unknown strategy '{}', expected auto, context, font-size, or classifier",
                other
            ))),
        }
    }
}

impl std::fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Instantiate a strategy from its selector.
///
/// The classifier strategy needs a backend; requesting it without one is
/// a configuration error, reported before any document is touched.
pub fn build_strategy(
    kind: StrategyKind,
    config: &EngineConfig,
    classifier: Option<Arc<dyn LabelClassifier>>,
) -> Result<Box<dyn ExtractionStrategy>> {
    match kind {
        StrategyKind::Auto => Ok(Box::new(AutoStrategy::new(config))),
        StrategyKind::Context => Ok(Box::new(ContextStrategy::new(config))),
        StrategyKind::FontSize => Ok(Box::new(FontSizeStrategy::new(config))),
        StrategyKind::Classifier => match classifier {
            Some(backend) => Ok(Box::new(ClassifierStrategy::new(config, backend))),
            None => Err(Error::Config(
                "classifier strategy requires a classifier backend".to_string(),
            )),
        },
    }
}
