//! Title selection from first-page candidates.

use regex::Regex;

use crate::engine::config::EngineConfig;
use crate::engine::text_shape::{is_all_caps, is_title_case};
use crate::model::PageText;

/// Scores first-page text elements inside a top-of-page window and selects
/// the best title string. Pure scoring-and-select: identical input always
/// yields the identical title.
pub struct TitleSelector {
    window: f32,
    optimal_len: usize,
    centering_weight: f32,
    position_weight: f32,
    length_weight: f32,
    caps_weight: f32,
    boilerplate_prefix: Regex,
    filename_suffix: Regex,
}

struct TitleCandidate<'a> {
    text: &'a str,
    score: f32,
    y0: f32,
}

impl TitleSelector {
    /// Build a selector from engine configuration.
    pub fn new(config: &EngineConfig) -> Self {
        let w = config.title_weights;
        Self {
            window: config.title_window,
            optimal_len: config.optimal_title_len,
            centering_weight: w.centering,
            position_weight: w.position,
            length_weight: w.length,
            caps_weight: w.capitalization,
            boilerplate_prefix: Regex::new(r"(?i)^(page|figure|table)\s").expect("static pattern"),
            filename_suffix: Regex::new(r"(?i)\.(pdf|docx?|cdr)$").expect("static pattern"),
        }
    }

    /// Select the title from the first page, or an empty string when no
    /// candidate survives the exclusion rules.
    pub fn select(&self, first_page: &PageText) -> String {
        let mut candidates: Vec<TitleCandidate<'_>> = Vec::new();

        for element in &first_page.elements {
            let text = element.text.as_str();
            if self.is_excluded(text) {
                continue;
            }
            if element.bbox.y0 > self.window {
                continue;
            }

            let centering = element.centering(first_page.width);
            let position = 1.0 - (element.bbox.y0 / self.window).clamp(0.0, 1.0);
            let length = self.length_score(text.chars().count());
            let caps = if is_all_caps(text) {
                1.0
            } else if is_title_case(text) {
                0.8
            } else {
                0.5
            };

            let score = centering * self.centering_weight
                + position * self.position_weight
                + length * self.length_weight
                + caps * self.caps_weight;

            candidates.push(TitleCandidate {
                text,
                score,
                y0: element.bbox.y0,
            });
        }

        // Highest score wins; ties go to the top-most candidate.
        candidates.sort_by(|a, b| {
            b.score
                .total_cmp(&a.score)
                .then(a.y0.total_cmp(&b.y0))
        });

        let title = candidates
            .first()
            .map(|c| c.text.to_string())
            .unwrap_or_default();
        if !title.is_empty() {
            log::debug!("selected title: '{}'", title);
        }
        title
    }

    /// Length sub-score, peaked at the optimal length and penalizing
    /// extremes.
    fn length_score(&self, len: usize) -> f32 {
        let delta = (len as f32 - self.optimal_len as f32).abs();
        (1.0 - delta / 100.0).max(0.0)
    }

    fn is_excluded(&self, text: &str) -> bool {
        let len = text.chars().count();
        if len < 5 || len > 200 {
            return true;
        }
        if text.chars().all(|c| c.is_ascii_digit()) {
            return true;
        }
        if self.boilerplate_prefix.is_match(text) {
            return true;
        }
        if self.filename_suffix.is_match(text) {
            return true;
        }
        // Producer-software attribution lines (common in converted documents)
        text.to_lowercase().contains("microsoft word")
    }
}
