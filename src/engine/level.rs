//! Hierarchy level assignment.
//!
//! A deterministic three-tier decision table: explicit numbering syntax
//! fully determines the level when present; otherwise the document's
//! distinct indentation values are clustered into tiers; otherwise a
//! positional/semantic fallback applies. Exactly one tier decides each
//! candidate.

use crate::engine::patterns::NumberingPatterns;
use crate::engine::score::HeadingCandidate;
use crate::model::HeadingLevel;

/// Indentation distinctness resolution in inches. Raw extractor coordinates
/// jitter below this scale.
const INDENT_RESOLUTION: f32 = 0.01;

/// Assigns H1..H4 to accepted candidates in document order.
pub struct LevelAssigner<'a> {
    patterns: &'a NumberingPatterns,
}

impl<'a> LevelAssigner<'a> {
    /// Create an assigner sharing the scorer's numbering pattern table.
    pub fn new(patterns: &'a NumberingPatterns) -> Self {
        Self { patterns }
    }

    /// Assign a level to every candidate, consuming and returning the list.
    pub fn assign(&self, mut candidates: Vec<HeadingCandidate>) -> Vec<HeadingCandidate> {
        if candidates.is_empty() {
            return candidates;
        }

        let clusters = indentation_clusters(&candidates);

        for candidate in &mut candidates {
            // Tier 1: numbering-hierarchy override always wins.
            if let Some(level) = self.patterns.level_override(&candidate.text) {
                candidate.level = Some(level);
                continue;
            }

            // Tier 2: indentation clustering, when the document exhibits at
            // least two distinct indentation tiers.
            if clusters.len() >= 2 {
                candidate.level = Some(nearest_cluster_level(&clusters, candidate.indentation));
                continue;
            }

            // Tier 3: positional/semantic fallback.
            candidate.level = Some(fallback_level(candidate));
        }

        candidates
    }
}

/// Distinct indentation values across the accepted candidates, ascending.
/// The first four become the centroids of H1..H4.
fn indentation_clusters(candidates: &[HeadingCandidate]) -> Vec<f32> {
    let mut keys: Vec<i32> = candidates
        .iter()
        .map(|c| (c.indentation / INDENT_RESOLUTION).round() as i32)
        .collect();
    keys.sort_unstable();
    keys.dedup();
    keys.truncate(4);
    keys.into_iter()
        .map(|k| k as f32 * INDENT_RESOLUTION)
        .collect()
}

/// Map an indentation to the level of the nearest cluster centroid.
fn nearest_cluster_level(clusters: &[f32], indentation: f32) -> HeadingLevel {
    let mut best = 0usize;
    let mut best_dist = f32::MAX;
    for (i, centroid) in clusters.iter().enumerate() {
        let dist = (indentation - centroid).abs();
        if dist < best_dist {
            best = i;
            best_dist = dist;
        }
    }
    HeadingLevel::from_depth(best as u8 + 1).unwrap_or(HeadingLevel::H4)
}

fn fallback_level(candidate: &HeadingCandidate) -> HeadingLevel {
    if candidate.centering > 0.8 {
        HeadingLevel::H1
    } else if candidate.indentation < 0.25 {
        HeadingLevel::H1
    } else if candidate.indentation < 0.75 {
        HeadingLevel::H2
    } else {
        HeadingLevel::H3
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::score::SignalBreakdown;

    fn candidate(text: &str, indentation: f32, centering: f32) -> HeadingCandidate {
        HeadingCandidate {
            text: text.to_string(),
            page: 0,
            y: 100.0,
            indentation,
            centering,
            score: 5.0,
            breakdown: SignalBreakdown::default(),
            level: None,
        }
    }

    fn assign(candidates: Vec<HeadingCandidate>) -> Vec<HeadingCandidate> {
        let patterns = NumberingPatterns::new();
        LevelAssigner::new(&patterns).assign(candidates)
    }

    #[test]
    fn test_numbering_override_wins_over_indentation() {
        // Deep indentation would suggest a deeper tier, but the dotted
        // three-part enumerator pins the level to H3.
        let assigned = assign(vec![
            candidate("Overview", 0.0, 0.0),
            candidate("Details", 1.5, 0.0),
            candidate("2.3.1 Data Collection", 1.5, 0.0),
        ]);
        assert_eq!(assigned[2].level, Some(HeadingLevel::H3));
    }

    #[test]
    fn test_indentation_clustering_maps_four_tiers() {
        let assigned = assign(vec![
            candidate("Alpha", 0.0, 0.0),
            candidate("Beta", 0.3, 0.0),
            candidate("Gamma", 0.6, 0.0),
            candidate("Delta", 0.9, 0.0),
        ]);
        let levels: Vec<_> = assigned.iter().map(|c| c.level.unwrap()).collect();
        assert_eq!(
            levels,
            vec![
                HeadingLevel::H1,
                HeadingLevel::H2,
                HeadingLevel::H3,
                HeadingLevel::H4
            ]
        );
    }

    #[test]
    fn test_nearest_cluster_assignment() {
        // "Gamma-ish" sits at 0.58, closest to the 0.6 tier.
        let assigned = assign(vec![
            candidate("Alpha", 0.0, 0.0),
            candidate("Beta", 0.3, 0.0),
            candidate("Gamma", 0.6, 0.0),
            candidate("Gamma-ish", 0.58, 0.0),
        ]);
        assert_eq!(assigned[3].level, Some(HeadingLevel::H3));
    }

    #[test]
    fn test_fallback_when_single_indentation_tier() {
        let assigned = assign(vec![
            candidate("Centered Heading", 1.0, 0.95),
            candidate("Left Heading", 1.0, 0.2),
        ]);
        // Single distinct indentation: clustering inconclusive, fallback
        // applies per candidate.
        assert_eq!(assigned[0].level, Some(HeadingLevel::H1)); // centered
        assert_eq!(assigned[1].level, Some(HeadingLevel::H3)); // 1.0in deep
    }

    #[test]
    fn test_fallback_indentation_bands() {
        let patterns = NumberingPatterns::new();
        let assigner = LevelAssigner::new(&patterns);
        let assigned = assigner.assign(vec![candidate("Solo", 0.1, 0.0)]);
        assert_eq!(assigned[0].level, Some(HeadingLevel::H1));

        let assigned = assigner.assign(vec![candidate("Solo", 0.5, 0.0)]);
        assert_eq!(assigned[0].level, Some(HeadingLevel::H2));
    }

    #[test]
    fn test_every_candidate_gets_a_level() {
        let assigned = assign(vec![
            candidate("1. Intro", 0.0, 0.0),
            candidate("Plain", 0.4, 0.0),
            candidate("A.", 0.8, 0.0),
        ]);
        assert!(assigned.iter().all(|c| c.level.is_some()));
    }

    #[test]
    fn test_deterministic_assignment() {
        let build = || {
            vec![
                candidate("1.1 Background", 0.3, 0.0),
                candidate("Scope", 0.0, 0.0),
            ]
        };
        let a: Vec<_> = assign(build()).iter().map(|c| c.level).collect();
        let b: Vec<_> = assign(build()).iter().map(|c| c.level).collect();
        assert_eq!(a, b);
    }
}
