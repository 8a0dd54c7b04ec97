//! End-to-end integration tests for the visibility engine.
//!
//! These exercise the full pipeline: extraction, analyzer fan-out,
//! aggregation, recommendation merging and the citation override path.

use std::sync::Arc;

use aivis::domain::models::Platform;
use aivis::service::citation::PerplexitySource;
use aivis::{AnalysisOptions, ContentInput, EngineConfig, VisibilityEngine};

fn fast_config() -> EngineConfig {
    EngineConfig {
        query_count: 3,
        inter_query_delay_ms: 0,
        request_timeout_secs: 5,
    }
}

/// Strip the per-run fields so reports from identical inputs compare equal.
fn comparable(report: &aivis::VisibilityReport) -> serde_json::Value {
    let mut value = serde_json::to_value(report).expect("report serializes");
    let obj = value.as_object_mut().unwrap();
    obj.remove("id");
    obj.remove("analyzed_at");
    obj.remove("analysis_duration_ms");
    value
}

#[tokio::test]
async fn analysis_is_deterministic_without_citation_checks() {
    let engine = VisibilityEngine::default();
    let mut input = ContentInput::new(
        "https://acme.io/guide",
        "The Complete Acme Guide",
        "Acme Corp is a logistics company. It ships to 40 countries. \
         According to experts, Acme grew 40% last year.\n\n\
         Key takeaways: speed matters, and Acme Corp optimizes for it.",
    );
    input.raw_html = Some(
        r#"<h1>Guide</h1><h2>Basics</h2>
           <script type="application/ld+json">{"@type":"Article"}</script>"#
            .to_string(),
    );

    let first = engine.analyze(&input, &AnalysisOptions::default()).await;
    let second = engine.analyze(&input, &AnalysisOptions::default()).await;

    assert_eq!(comparable(&first), comparable(&second));
}

#[tokio::test]
async fn acme_scenario_extracts_the_documented_signals() {
    // Minimal input: no HTML, no dates.
    let input = ContentInput::new(
        "https://acme.io",
        "X",
        "Acme Corp is a company. It was founded in 2010. \
         According to experts, Acme grew 40% last year.",
    );

    let engine = VisibilityEngine::default();
    let report = engine.analyze(&input, &AnalysisOptions::default()).await;
    let features = &report.structural_features;

    assert!(features.structure.has_statistics, "40% should count");
    assert!(
        features.structure.has_expert_attribution,
        "'according to' should count"
    );

    let acme = features
        .entities
        .iter()
        .find(|e| e.name == "Acme Corp")
        .expect("Acme Corp extracted");
    assert_eq!(acme.context_quality.raw(), 80.0);

    // No dates: freshness is exactly neutral for every platform.
    for platform in &report.per_platform {
        let freshness = platform
            .factors
            .iter()
            .find(|f| f.name == "Freshness")
            .expect("freshness factor present");
        assert_eq!(freshness.score.raw(), 50.0, "{:?}", platform.platform);
    }
}

#[tokio::test]
async fn scores_stay_in_bounds_for_degenerate_input() {
    let engine = VisibilityEngine::default();

    for text in ["", " ", "a", "!!!!", "\n\n\n"] {
        let input = ContentInput::new("https://acme.io", "", text);
        let report = engine.analyze(&input, &AnalysisOptions::default()).await;

        let combined = report.combined_score.raw();
        assert!((0.0..=100.0).contains(&combined), "combined: {}", combined);
        assert_eq!(combined, combined.round());

        for platform in &report.per_platform {
            let s = platform.score.raw();
            assert!((0.0..=100.0).contains(&s));
            assert_eq!(s, s.round());
            for factor in &platform.factors {
                let f = factor.score.raw();
                assert!((0.0..=100.0).contains(&f), "{}: {}", factor.name, f);
            }
        }
    }
}

#[tokio::test]
async fn entity_extraction_is_bounded_on_huge_documents() {
    let mut text = String::with_capacity(1_000_000);
    for i in 0..500 {
        text.push_str(&format!("Vendor{} offers integrations. ", i));
        // Pad with lowercase filler to reach a six-figure word count.
        for _ in 0..50 {
            text.push_str("the quick brown fox jumps ");
        }
    }

    let input = ContentInput::new("https://acme.io", "Huge", text);
    let engine = VisibilityEngine::default();
    let report = engine.analyze(&input, &AnalysisOptions::default()).await;

    assert!(report.structural_features.entities.len() <= 50);
    assert!(report.structural_features.word_count > 100_000);
}

#[tokio::test]
async fn recommendations_are_deduplicated_and_priority_sorted() {
    // Thin content scores low everywhere, so several analyzers emit the
    // same schema/answer recommendations.
    let input = ContentInput::new("https://acme.io", "T", "Tiny.");
    let engine = VisibilityEngine::default();
    let report = engine.analyze(&input, &AnalysisOptions::default()).await;

    let mut seen = std::collections::HashSet::new();
    for rec in &report.recommendations {
        assert!(
            seen.insert(rec.title.to_lowercase()),
            "duplicate title: {}",
            rec.title
        );
    }
    for pair in report.recommendations.windows(2) {
        assert!(pair[0].priority <= pair[1].priority);
    }
    assert!(!report.recommendations.is_empty());
}

#[tokio::test]
async fn citation_check_against_mock_provider_replaces_heuristic() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/chat/completions")
        .with_status(200)
        .with_body(
            r#"{"citations": ["https://blog.acme.io/post"],
                "choices": [{"message": {"role": "assistant", "content": "Answer."}}]}"#,
        )
        .expect(3)
        .create_async()
        .await;

    let source = PerplexitySource::new("test-key", 5)
        .with_endpoint(format!("{}/chat/completions", server.url()));
    let engine = VisibilityEngine::new(fast_config()).with_sources(vec![Arc::new(source)]);

    let input = ContentInput::new(
        "https://acme.io/guide",
        "Acme Guide",
        "Acme Corp is a logistics company with global coverage.",
    );
    let report = engine.analyze(&input, &AnalysisOptions::default()).await;

    let perplexity = report
        .per_platform
        .iter()
        .find(|p| p.platform == Platform::Perplexity)
        .unwrap();
    assert!(perplexity.is_real_check);
    assert_eq!(perplexity.score.raw(), 100.0);
    let check = perplexity.citation.as_ref().unwrap();
    assert!(check.is_cited);
    assert_eq!(check.queries_tested, 3);
}

#[tokio::test]
async fn provider_failure_keeps_the_whole_analysis_alive() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/chat/completions")
        .with_status(503)
        .with_body("upstream down")
        .create_async()
        .await;

    let source = PerplexitySource::new("test-key", 5)
        .with_endpoint(format!("{}/chat/completions", server.url()));
    let engine = VisibilityEngine::new(fast_config()).with_sources(vec![Arc::new(source)]);

    let input = ContentInput::new(
        "https://acme.io/guide",
        "Acme Guide",
        "Acme Corp is a logistics company with global coverage.",
    );
    let report = engine.analyze(&input, &AnalysisOptions::default()).await;

    // All five analyzers still reported, none as a real check.
    assert_eq!(report.per_platform.len(), 5);
    assert!(report.per_platform.iter().all(|p| !p.is_real_check));
}
