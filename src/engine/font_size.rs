//! Font-size-clustering extraction strategy.
//!
//! Usable when font metadata is discriminative: the modal font size is body
//! text, distinct larger sizes form the heading tiers. Documents set in a
//! uniform face defeat this strategy; the auto-selector falls back to the
//! context-aware strategy for those.

use std::collections::HashMap;

use crate::engine::config::EngineConfig;
use crate::engine::patterns::{NumberingPatterns, PreFilter};
use crate::engine::repair::{OutlineRepairer, RepairInput};
use crate::engine::text_shape::{is_all_caps, is_title_case};
use crate::engine::ExtractionStrategy;
use crate::error::Result;
use crate::model::{DocumentText, HeadingLevel, Outline, TextElement};

/// Headings must be at least this factor larger than body text.
const HEADING_SIZE_RATIO: f32 = 1.2;

/// Font size statistics for a document, at 0.1pt resolution.
#[derive(Debug, Clone, Default)]
pub struct FontStatistics {
    histogram: HashMap<i32, usize>,
}

impl FontStatistics {
    /// Collect statistics over every element in the document.
    pub fn collect(doc: &DocumentText) -> Self {
        let mut stats = Self::default();
        for page in &doc.pages {
            for element in &page.elements {
                stats.add_size(element.font_size);
            }
        }
        stats
    }

    /// Record one font size observation.
    pub fn add_size(&mut self, size: f32) {
        let key = (size * 10.0).round() as i32;
        *self.histogram.entry(key).or_insert(0) += 1;
    }

    /// Body text size: the most common observed size. Ties break toward the
    /// smaller size for determinism.
    pub fn body_size(&self) -> f32 {
        self.histogram
            .iter()
            .max_by(|(ka, ca), (kb, cb)| ca.cmp(cb).then(kb.cmp(ka)))
            .map(|(k, _)| *k as f32 / 10.0)
            .unwrap_or(12.0)
    }

    /// Population standard deviation of observed sizes, in points. Low
    /// spread means font metadata cannot discriminate heading tiers.
    pub fn size_spread(&self) -> f32 {
        let total: usize = self.histogram.values().sum();
        if total == 0 {
            return 0.0;
        }
        let mean: f32 = self
            .histogram
            .iter()
            .map(|(k, c)| (*k as f32 / 10.0) * *c as f32)
            .sum::<f32>()
            / total as f32;
        let var: f32 = self
            .histogram
            .iter()
            .map(|(k, c)| {
                let d = *k as f32 / 10.0 - mean;
                d * d * *c as f32
            })
            .sum::<f32>()
            / total as f32;
        var.sqrt()
    }

    /// Map the distinct sizes clearly larger than body text to heading
    /// levels, largest size first (H1), at most four tiers.
    pub fn level_map(&self) -> HashMap<i32, HeadingLevel> {
        let body = self.body_size();
        let mut larger: Vec<i32> = self
            .histogram
            .keys()
            .copied()
            .filter(|k| *k as f32 / 10.0 > body * HEADING_SIZE_RATIO)
            .collect();
        larger.sort_unstable_by(|a, b| b.cmp(a));

        let mut map = HashMap::new();
        for (i, key) in larger.into_iter().take(4).enumerate() {
            if let Some(level) = HeadingLevel::from_depth(i as u8 + 1) {
                map.insert(key, level);
            }
        }
        map
    }
}

/// Extraction strategy driven by font-size hierarchy.
pub struct FontSizeStrategy {
    config: EngineConfig,
    patterns: NumberingPatterns,
    prefilter: PreFilter,
}

impl FontSizeStrategy {
    /// Build the strategy from engine configuration.
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            prefilter: PreFilter::new(&config.boilerplate_phrases),
            patterns: NumberingPatterns::new(),
            config: config.clone(),
        }
    }

    /// Decision score for one element whose size maps to a heading tier.
    /// Mirrors the analyzer families of the context strategy but leans on
    /// the size evidence already established.
    fn heading_score(&self, element: &TextElement, body_size: f32) -> i32 {
        let text = element.text.as_str();
        let mut score = 0;
        if element.style.bold {
            score += 3;
        }
        if element.font_size > body_size * HEADING_SIZE_RATIO {
            score += 3;
        }
        if !text.ends_with('.') {
            score += 1;
        }
        if self.has_heading_keyword(text) {
            score += 2;
        }
        if self.patterns.structural_score(text) >= 0.9 {
            score += 4;
        }
        if is_all_caps(text) || is_title_case(text) {
            score += 1;
        }
        score
    }

    fn has_heading_keyword(&self, text: &str) -> bool {
        let lower = text.to_lowercase();
        self.config
            .semantic_markers
            .iter()
            .chain(self.config.structural_words.iter())
            .any(|k| lower.contains(k.as_str()))
    }

    /// Title: the largest-font surviving candidate inside the top window,
    /// then a centered-text fallback among the first elements.
    fn select_title(&self, doc: &DocumentText) -> String {
        let Some(first) = doc.first_page() else {
            return String::new();
        };

        let top: Vec<&TextElement> = first
            .elements
            .iter()
            .filter(|e| e.bbox.y0 <= self.config.title_window * 1.5)
            .collect();
        if let Some(max_size) = top
            .iter()
            .map(|e| e.font_size)
            .max_by(|a, b| a.total_cmp(b))
        {
            for element in &top {
                if element.font_size >= max_size * 0.85 && self.title_worthy(&element.text) {
                    return element.text.clone();
                }
            }
        }

        // Fallback: early, somewhat-centered line of reasonable length.
        for element in first.elements.iter().take(15) {
            let len = element.text.chars().count();
            if element.bbox.x0 > 50.0 && len > 10 && len < 200 && self.title_worthy(&element.text)
            {
                return element.text.clone();
            }
        }
        String::new()
    }

    fn title_worthy(&self, text: &str) -> bool {
        let lower = text.to_lowercase();
        let len = text.chars().count();
        len > 5
            && len < 200
            && !text.chars().all(|c| c.is_ascii_digit())
            && !lower.starts_with("page ")
            && !lower.starts_with("figure ")
            && !lower.starts_with("table ")
            && !lower.ends_with(".pdf")
            && !lower.ends_with(".doc")
            && !lower.ends_with(".docx")
            && !lower.contains("microsoft word")
    }
}

impl ExtractionStrategy for FontSizeStrategy {
    fn name(&self) -> &str {
        "font-size"
    }

    fn extract_outline(&self, doc: &DocumentText) -> Result<Outline> {
        if doc.is_empty() {
            return Ok(Outline::empty());
        }

        let stats = FontStatistics::collect(doc);
        let body_size = stats.body_size();
        let level_map = stats.level_map();
        log::debug!(
            "font stats: body {:.1}pt, spread {:.2}pt, {} heading tiers",
            body_size,
            stats.size_spread(),
            level_map.len()
        );

        let title = self.select_title(doc);

        let mut candidates: Vec<RepairInput> = Vec::new();
        for page in &doc.pages {
            for element in &page.elements {
                let key = (element.font_size * 10.0).round() as i32;
                let Some(level) = level_map.get(&key) else {
                    continue;
                };
                let len = element.text.chars().count();
                if !(3..=150).contains(&len) {
                    continue;
                }
                if self.prefilter.rejects(&element.text) {
                    continue;
                }
                if self.heading_score(element, body_size) >= 4 {
                    candidates.push(RepairInput {
                        level: *level,
                        text: element.text.clone(),
                        page: page.index,
                    });
                }
            }
        }

        Ok(OutlineRepairer::repair(title, candidates))
    }
}
