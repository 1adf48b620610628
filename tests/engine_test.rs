//! End-to-end properties of the extraction pipeline.

use untoc::engine::{HeadingScorer, LevelAssigner, SignalBreakdown};
use untoc::model::{BoundingBox, DocumentText, PageText, StyleFlags, TextElement};
use untoc::{
    extract_outline, to_json, ContextStrategy, EngineConfig, ExtractionStrategy, HeadingLevel,
    JsonFormat,
};

/// (text, page, x0, y0) at 12pt regular.
fn doc_of(lines: &[(&str, u32, f32, f32)]) -> DocumentText {
    let mut doc = DocumentText::new();
    let max_page = lines.iter().map(|l| l.1).max().unwrap_or(0);
    for index in 0..=max_page {
        let mut page = PageText::new(index, 612.0, 792.0);
        for (text, p, x, y) in lines {
            if *p != index {
                continue;
            }
            page.push(
                TextElement::new(
                    *text,
                    index,
                    BoundingBox::new(*x, *y, x + 330.0, y + 12.0).unwrap(),
                    12.0,
                    StyleFlags::default(),
                )
                .unwrap(),
            );
        }
        doc.push_page(page);
    }
    doc
}

fn handbook() -> DocumentText {
    doc_of(&[
        ("Network Protocol Handbook", 0, 130.0, 60.0),
        ("1. Introduction", 0, 72.0, 140.0),
        (
            "This handbook describes the wire formats used by the platform.",
            0,
            72.0,
            170.0,
        ),
        ("1.1 Scope and Audience", 0, 72.0, 240.0),
        (
            "The intended audience is engineers integrating with the platform.",
            0,
            72.0,
            270.0,
        ),
        ("2. Message Framing", 1, 72.0, 80.0),
        (
            "Frames open with a four byte length prefix in network order.",
            1,
            72.0,
            110.0,
        ),
        ("2.1 Header Layout", 1, 72.0, 180.0),
    ])
}

#[test]
fn idempotence_byte_identical_runs() {
    let doc = handbook();
    let strategy = ContextStrategy::new(&EngineConfig::default());
    let first = to_json(&strategy.extract_outline(&doc).unwrap(), JsonFormat::Pretty).unwrap();
    let second = to_json(&strategy.extract_outline(&doc).unwrap(), JsonFormat::Pretty).unwrap();
    assert_eq!(first, second);
}

#[test]
fn no_skip_invariant_holds() {
    // A three-part numbered heading directly after an H1 tempts a depth
    // skip; the output may deepen by at most one level per step.
    let doc = doc_of(&[
        ("Telemetry Field Guide", 0, 150.0, 60.0),
        ("1. Overview", 0, 72.0, 140.0),
        ("2.3.1 Implementation Analysis", 0, 72.0, 220.0),
        ("2. Requirements Summary", 0, 72.0, 300.0),
    ]);
    let outline = ContextStrategy::new(&EngineConfig::default())
        .extract_outline(&doc)
        .unwrap();
    assert!(outline.headings.len() >= 2);
    let mut prev = 0u8;
    for heading in &outline.headings {
        assert!(
            heading.level.depth() <= prev + 1,
            "depth {} follows depth {}",
            heading.level.depth(),
            prev
        );
        prev = heading.level.depth();
    }
}

#[test]
fn headings_are_unique_and_deduplicated() {
    // Same heading under case and whitespace variation appears once,
    // first occurrence's spelling preserved.
    let doc = doc_of(&[
        ("Review Notes", 0, 150.0, 60.0),
        ("Introduction", 0, 20.0, 140.0),
        (
            "Opening remarks about the review process and its participants.",
            0,
            72.0,
            170.0,
        ),
        ("introduction  ", 1, 20.0, 80.0),
    ]);
    let outline = ContextStrategy::new(&EngineConfig::default())
        .extract_outline(&doc)
        .unwrap();
    let intros: Vec<_> = outline
        .headings
        .iter()
        .filter(|h| h.text.eq_ignore_ascii_case("introduction"))
        .collect();
    assert_eq!(intros.len(), 1);
    assert_eq!(intros[0].text, "Introduction");

    for (i, a) in outline.headings.iter().enumerate() {
        for b in &outline.headings[i + 1..] {
            assert_ne!(a.text.to_lowercase(), b.text.to_lowercase());
        }
    }
}

#[test]
fn headings_follow_reading_order() {
    // Elements pushed out of order within a page; output must be
    // non-decreasing in (page, vertical position).
    let doc = doc_of(&[
        ("Network Protocol Handbook", 0, 130.0, 60.0),
        ("2. Message Framing", 0, 72.0, 500.0),
        ("1. Introduction", 0, 72.0, 140.0),
        ("3. Error Handling", 1, 72.0, 80.0),
    ]);
    let outline = ContextStrategy::new(&EngineConfig::default())
        .extract_outline(&doc)
        .unwrap();
    let texts: Vec<&str> = outline.headings.iter().map(|h| h.text.as_str()).collect();
    assert_eq!(
        texts,
        ["1. Introduction", "2. Message Framing", "3. Error Handling"]
    );
    assert!(outline.headings.windows(2).all(|w| w[0].page <= w[1].page));
}

#[test]
fn numbering_override_beats_indentation() {
    use untoc::engine::HeadingCandidate;

    // Whatever the indentation suggests, three-part dotted numbering pins
    // the level to H3.
    let config = EngineConfig::default();
    let scorer = HeadingScorer::new(&config);
    for indentation in [0.0, 0.5, 1.5, 3.0] {
        let candidates = vec![
            HeadingCandidate {
                text: "1. Methods".to_string(),
                page: 0,
                y: 140.0,
                indentation: 1.0,
                centering: 0.5,
                score: 7.0,
                breakdown: SignalBreakdown::default(),
                level: None,
            },
            HeadingCandidate {
                text: "2.3.1 Data Collection".to_string(),
                page: 0,
                y: 220.0,
                indentation,
                centering: 0.5,
                score: 5.0,
                breakdown: SignalBreakdown::default(),
                level: None,
            },
        ];
        let assigned = LevelAssigner::new(scorer.patterns()).assign(candidates);
        assert_eq!(
            assigned[1].level,
            Some(HeadingLevel::H3),
            "at indentation {indentation}"
        );
    }
}

#[test]
fn indentation_clusters_fall_back_to_geometry() {
    use untoc::engine::HeadingCandidate;

    let candidate = |text: &str, indentation: f32| HeadingCandidate {
        text: text.to_string(),
        page: 0,
        y: 100.0 + indentation * 100.0,
        indentation,
        centering: 0.5,
        score: 5.0,
        breakdown: SignalBreakdown::default(),
        level: None,
    };
    let candidates = vec![
        candidate("Alpha Section", 0.0),
        candidate("Beta Section", 0.3),
        candidate("Gamma Section", 0.6),
        candidate("Delta Section", 0.9),
    ];

    let config = EngineConfig::default();
    let scorer = HeadingScorer::new(&config);
    let assigned = LevelAssigner::new(scorer.patterns()).assign(candidates);
    let levels: Vec<_> = assigned.iter().filter_map(|c| c.level).collect();
    assert_eq!(
        levels,
        [
            HeadingLevel::H1,
            HeadingLevel::H2,
            HeadingLevel::H3,
            HeadingLevel::H4
        ]
    );
}

#[test]
fn page_marker_never_selected_as_title() {
    let doc = doc_of(&[
        ("Page 1", 0, 280.0, 20.0),
        ("Annual Sustainability Report", 0, 140.0, 70.0),
        ("1. Emissions Summary", 0, 72.0, 150.0),
    ]);
    let outline = ContextStrategy::new(&EngineConfig::default())
        .extract_outline(&doc)
        .unwrap();
    assert_eq!(outline.title, "Annual Sustainability Report");
}

#[test]
fn empty_document_yields_empty_report() {
    let outline = extract_outline(&DocumentText::new()).unwrap();
    let json = to_json(&outline, JsonFormat::Compact).unwrap();
    assert_eq!(json, r#"{"title":"","outline":[]}"#);
}

#[test]
fn threshold_is_inclusive_at_four() {
    let scorer = HeadingScorer::new(&EngineConfig::default());
    assert!(!scorer.accepts(3.9));
    assert!(scorer.accepts(4.0));
}

#[test]
fn custom_threshold_is_respected() {
    let strict = HeadingScorer::new(&EngineConfig::default().with_threshold(6.0));
    assert!(!strict.accepts(5.5));
    assert!(strict.accepts(6.0));
}

#[test]
fn report_pages_are_one_based() {
    let doc = handbook();
    let outline = ContextStrategy::new(&EngineConfig::default())
        .extract_outline(&doc)
        .unwrap();
    let framing = outline
        .headings
        .iter()
        .find(|h| h.text == "2. Message Framing")
        .expect("heading on the second page");
    assert_eq!(framing.page, 1);

    let json = to_json(&outline, JsonFormat::Compact).unwrap();
    let report: untoc::OutlineReport = serde_json::from_str(&json).unwrap();
    let entry = report
        .outline
        .iter()
        .find(|e| e.text == "2. Message Framing")
        .expect("heading present in report");
    assert_eq!(entry.page, 2);
}
