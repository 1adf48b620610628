//! Compiled pattern tables for numbering analysis and hard pre-filtering.
//!
//! Patterns are compiled once per scorer construction and shared by the
//! numbering analyzer and the hierarchy assigner so both see the same
//! definition of "structured numbering".

use regex::Regex;

use crate::model::HeadingLevel;

/// Recognizers for structured numbering forms.
pub struct NumberingPatterns {
    // Bare enumerators: "1.", "1.1", "1.1.1", "1.1.1.1"
    dotted: [Regex; 4],
    // Enumerator followed by heading text: "1. Introduction", "1.1 Background"
    dotted_text: [Regex; 4],
    roman: Regex,
    upper_letter: Regex,
    lower_letter: Regex,
    paren_letter: Regex,
    paren_digit: Regex,
    // "chapter 3", "part iv", "section 2", "article ii", ...
    keyword: Regex,
    chapter_or_part: Regex,
    section_alone: Regex,
    partial_dotted: Regex,
}

impl NumberingPatterns {
    /// Compile the pattern set.
    pub fn new() -> Self {
        let re = |p: &str| Regex::new(p).expect("static pattern");
        Self {
            dotted: [
                re(r"^\d+\.$"),
                re(r"^\d+\.\d+$"),
                re(r"^\d+\.\d+\.\d+$"),
                re(r"^\d+\.\d+\.\d+\.\d+$"),
            ],
            dotted_text: [
                re(r"^\d+\.\s+\S"),
                re(r"^\d+\.\d+\s+\S"),
                re(r"^\d+\.\d+\.\d+\s+\S"),
                re(r"^\d+\.\d+\.\d+\.\d+\s+\S"),
            ],
            roman: re(r"(?i)^[ivxlc]+\.$"),
            upper_letter: re(r"^[A-Z]\.$"),
            lower_letter: re(r"^[a-z]\.$"),
            paren_letter: re(r"^\([a-z]\)$"),
            paren_digit: re(r"^\(\d+\)$"),
            keyword: re(
                r"(?i)^(chapter\s+\d+|part\s+[ivxlc]+|section\s+\d+|article\s+[ivxlc]+|title\s+[ivxlc]+|book\s+[ivxlc]+)",
            ),
            chapter_or_part: re(r"(?i)^(chapter|part)\b"),
            section_alone: re(r"(?i)^section\s+\d+"),
            partial_dotted: re(r"\d+\.\d+"),
        }
    }

    /// Numbering analyzer score: 1.0 for an exact structural form (bare
    /// enumerators and keyword prefixes), 0.9 for a single-digit enumerator
    /// leading into heading text, 0.3 for a dotted number occurring anywhere
    /// inside a longer string, 0.0 otherwise.
    pub fn structural_score(&self, text: &str) -> f32 {
        if self.is_exact_form(text) {
            return 1.0;
        }
        if self.dotted_text[0].is_match(text) {
            return 0.9;
        }
        if self.partial_dotted.is_match(text) {
            return 0.3;
        }
        0.0
    }

    /// Hierarchy override: the level fully determined by the numbering form,
    /// if one applies. Always wins over geometric signals.
    pub fn level_override(&self, text: &str) -> Option<HeadingLevel> {
        // Deepest dotted forms first so "1.1.1" is not claimed by "1.1".
        for (i, depth) in [(3usize, 4u8), (2, 3), (1, 2), (0, 1)] {
            if self.dotted[i].is_match(text) || self.dotted_text[i].is_match(text) {
                return HeadingLevel::from_depth(depth);
            }
        }
        if self.roman.is_match(text) {
            return Some(HeadingLevel::H1);
        }
        if self.upper_letter.is_match(text) {
            return Some(HeadingLevel::H2);
        }
        if self.lower_letter.is_match(text) {
            return Some(HeadingLevel::H3);
        }
        if self.chapter_or_part.is_match(text) && self.keyword.is_match(text) {
            return Some(HeadingLevel::H1);
        }
        if self.section_alone.is_match(text) {
            return Some(HeadingLevel::H2);
        }
        None
    }

    fn is_exact_form(&self, text: &str) -> bool {
        self.dotted.iter().any(|p| p.is_match(text))
            || self.roman.is_match(text)
            || self.upper_letter.is_match(text)
            || self.lower_letter.is_match(text)
            || self.paren_letter.is_match(text)
            || self.paren_digit.is_match(text)
            || self.keyword.is_match(text)
    }
}

impl Default for NumberingPatterns {
    fn default() -> Self {
        Self::new()
    }
}

/// Hard rejection rules applied before any scoring.
pub struct PreFilter {
    pure_digits: Regex,
    caption: Regex,
    url_or_email: Regex,
    rule_line: Regex,
    ellipsis: Regex,
    boilerplate: Vec<String>,
}

impl PreFilter {
    /// Build the pre-filter; boilerplate phrases come from configuration.
    pub fn new(boilerplate: &[String]) -> Self {
        let re = |p: &str| Regex::new(p).expect("static pattern");
        Self {
            pure_digits: re(r"^\d+$"),
            caption: re(r"(?i)^(page|figure|table)\s+\d+"),
            url_or_email: re(r"(?i)^(www\.|https?|\w+@\w+\.)"),
            rule_line: re(r"^\s*(-+|=+)\s*$"),
            ellipsis: re(r"^\.\.\."),
            boilerplate: boilerplate.iter().map(|s| s.to_lowercase()).collect(),
        }
    }

    /// Whether the text can never be a heading, regardless of score.
    pub fn rejects(&self, text: &str) -> bool {
        let len = text.chars().count();
        if !(2..=200).contains(&len) {
            return true;
        }
        if self.pure_digits.is_match(text)
            || self.caption.is_match(text)
            || self.url_or_email.is_match(text)
            || self.rule_line.is_match(text)
            || self.ellipsis.is_match(text)
        {
            return true;
        }
        let lower = text.to_lowercase();
        self.boilerplate.iter().any(|p| lower.contains(p))
    }
}
