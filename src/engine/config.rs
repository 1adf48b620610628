//! Engine configuration.
//!
//! All weights, thresholds, and vocabulary tables live here as explicit
//! immutable values handed to the scorer and selectors at construction time.
//! Nothing in the scoring logic hard-codes a tunable.

/// Fixed linear weights for the five heading signal analyzers.
///
/// The weights are part of the scoring contract: numbering syntax is the
/// strongest signal, semantic vocabulary next, then layout, then text shape
/// and spacing context.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreWeights {
    /// Structured numbering patterns ("1.2", "Chapter 3", "(a)")
    pub numbering: f32,
    /// Structural vocabulary ("introduction", "appendix", "section")
    pub semantic: f32,
    /// Indentation, centering, and vertical page position
    pub position: f32,
    /// Length, capitalization, punctuation, styling, word count
    pub characteristics: f32,
    /// Vertical isolation and recurring indentation tiers
    pub context: f32,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            numbering: 4.0,
            semantic: 3.0,
            position: 2.0,
            characteristics: 1.0,
            context: 1.0,
        }
    }
}

/// Weights for the four title sub-scores. Must sum to 1.0 for the composite
/// to stay in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TitleWeights {
    /// Distance of the line center from the page center, inverted
    pub centering: f32,
    /// Closeness to the top of the title window
    pub position: f32,
    /// Closeness to the optimal title length
    pub length: f32,
    /// ALL-CAPS > Title-Case > mixed
    pub capitalization: f32,
}

impl Default for TitleWeights {
    fn default() -> Self {
        Self {
            centering: 0.3,
            position: 0.3,
            length: 0.2,
            capitalization: 0.2,
        }
    }
}

/// Configuration for the outline inference engine.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Analyzer weights for the composite heading score
    pub weights: ScoreWeights,

    /// Composite score at or above which an element becomes a heading
    /// candidate
    pub acceptance_threshold: f32,

    /// Title sub-score weights
    pub title_weights: TitleWeights,

    /// First-page window for title candidates: elements whose top edge is
    /// within this many units of the page top
    pub title_window: f32,

    /// Title length with the highest length sub-score
    pub optimal_title_len: usize,

    /// Page coordinate units per inch, for indentation normalization
    pub units_per_inch: f32,

    /// Minimum vertical gap (units) to the previous element that counts as
    /// isolation. Raw coordinate heuristic; calibrate per corpus.
    pub gap_before_min: f32,

    /// Minimum vertical gap (units) to the next element that counts as
    /// isolation
    pub gap_after_min: f32,

    /// How many *other* elements must share an indentation value (within
    /// 0.1in) for the recurring-tier bonus
    pub tier_support_min: usize,

    /// Font-size variance (in points) below which font metadata is treated
    /// as non-discriminative and the context strategy is preferred
    pub uniform_font_variance: f32,

    /// Classifier confidence floor for accepting a predicted label
    pub classifier_confidence: f32,

    /// Semantic markers: section-title vocabulary scored at 0.8 each
    pub semantic_markers: Vec<String>,

    /// Generic structural nouns scored at 0.5 each
    pub structural_words: Vec<String>,

    /// Weaker heading phrases scored at 0.3 each
    pub heading_phrases: Vec<String>,

    /// Boilerplate phrases that disqualify an element outright
    pub boilerplate_phrases: Vec<String>,
}

impl EngineConfig {
    /// Create a config with default weights and vocabulary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the heading acceptance threshold.
    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.acceptance_threshold = threshold;
        self
    }

    /// Set the analyzer weights.
    pub fn with_weights(mut self, weights: ScoreWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Set the title window depth in page units.
    pub fn with_title_window(mut self, window: f32) -> Self {
        self.title_window = window;
        self
    }

    /// Set the coordinate scale.
    pub fn with_units_per_inch(mut self, units: f32) -> Self {
        self.units_per_inch = units;
        self
    }

    /// Set the font-size variance cutoff for strategy auto-detection.
    pub fn with_uniform_font_variance(mut self, variance: f32) -> Self {
        self.uniform_font_variance = variance;
        self
    }

    /// Set the classifier confidence floor.
    pub fn with_classifier_confidence(mut self, confidence: f32) -> Self {
        self.classifier_confidence = confidence;
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            weights: ScoreWeights::default(),
            acceptance_threshold: 4.0,
            title_weights: TitleWeights::default(),
            title_window: 200.0,
            optimal_title_len: 50,
            units_per_inch: 72.0,
            gap_before_min: 20.0,
            gap_after_min: 15.0,
            tier_support_min: 3,
            uniform_font_variance: 0.5,
            classifier_confidence: 0.7,
            semantic_markers: to_strings(&[
                "introduction",
                "background",
                "methodology",
                "methods",
                "results",
                "discussion",
                "conclusion",
                "summary",
                "abstract",
                "overview",
                "objectives",
                "scope",
                "requirements",
                "implementation",
                "analysis",
                "recommendations",
                "appendix",
                "references",
                "bibliography",
                "acknowledgments",
                "preface",
                "executive summary",
                "table of contents",
            ]),
            structural_words: to_strings(&[
                "section",
                "chapter",
                "part",
                "article",
                "clause",
                "subsection",
                "paragraph",
                "subparagraph",
                "item",
                "subitem",
                "point",
                "subpoint",
            ]),
            // Overlaps the marker table on purpose: common section titles
            // accumulate 0.8 + 0.3 and reach the 1.0 semantic cap.
            heading_phrases: to_strings(&[
                "overview",
                "summary",
                "introduction",
                "background",
                "conclusion",
                "methodology",
                "results",
                "discussion",
                "analysis",
                "implementation",
                "requirements",
                "specifications",
                "procedures",
                "guidelines",
                "framework",
                "approach",
                "strategy",
                "objectives",
                "goals",
            ]),
            boilerplate_phrases: to_strings(&[
                "lorem ipsum",
                "this page intentionally",
                "copyright",
                "\u{00a9}",
                "all rights reserved",
                "confidential",
                "proprietary",
                "draft",
                "preliminary",
                "revision",
                "version",
            ]),
        }
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
