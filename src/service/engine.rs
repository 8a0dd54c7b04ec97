//! VisibilityEngine - orchestrates extraction, analyzers, citation checks
//! and report assembly.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use futures::future::join_all;
use url::Url;

use crate::config::{AnalysisOptions, EngineConfig};
use crate::domain::models::{
    ContentInput, Platform, PlatformScore, Score, VisibilityReport,
};
use crate::error::Result;
use crate::extractor;
use crate::service::analyzer::{self, PlatformAnalyzer};
use crate::service::citation::{CitationChecker, CitationSource};
use crate::service::{aggregator, recommendation};

/// The engine's public entry point. Owns the closed analyzer registry,
/// whatever citation sources the host configured, and the tuning knobs.
///
/// `analyze` is total: with well-typed input it always produces a report,
/// degrading failed citation checks to heuristic scores.
pub struct VisibilityEngine {
    analyzers: Vec<Arc<dyn PlatformAnalyzer>>,
    sources: Vec<Arc<dyn CitationSource>>,
    checker: CitationChecker,
}

impl VisibilityEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            analyzers: analyzer::registry(),
            sources: Vec::new(),
            checker: CitationChecker::new(config),
        }
    }

    /// Attach citation sources. Unconfigured sources are skipped at
    /// analysis time, so hosts can pass their full set unconditionally.
    pub fn with_sources(mut self, sources: Vec<Arc<dyn CitationSource>>) -> Self {
        self.sources = sources;
        self
    }

    /// Analyze one input and produce a fresh report.
    ///
    /// Analyzers fan out concurrently over one immutable feature snapshot;
    /// citation checks run alongside them, sequential per platform but
    /// concurrent across platforms. One platform's citation failure never
    /// aborts another's check.
    pub async fn analyze(&self, input: &ContentInput, options: &AnalysisOptions) -> VisibilityReport {
        let started = Instant::now();
        tracing::info!("[ENGINE] Starting analysis: {}", input.url);

        let features = Arc::new(extractor::extract(input));
        let shared_input = Arc::new(input.clone());
        let requested = requested_platforms(options);

        // Fan out the pure analyzers as worker tasks.
        let mut tasks = Vec::new();
        for analyzer in &self.analyzers {
            if !requested.contains(&analyzer.platform()) {
                continue;
            }
            let analyzer = Arc::clone(analyzer);
            let task_input = Arc::clone(&shared_input);
            let task_features = Arc::clone(&features);
            tasks.push(tokio::spawn(async move {
                analyzer.analyze(&task_input, &task_features)
            }));
        }

        // Real citation checks run concurrently with the analyzers. No
        // domain means nothing to match citations against.
        let domain = host_of(&input.url);
        let citation_futures: Vec<_> = match &domain {
            Some(domain) => self
                .sources
                .iter()
                .filter(|s| s.is_configured() && requested.contains(&s.platform()))
                .map(|source| {
                    let keywords = &features.keywords;
                    async move {
                        let outcome = self
                            .checker
                            .check(source.as_ref(), domain, keywords)
                            .await;
                        (source.platform(), source.name(), outcome)
                    }
                })
                .collect(),
            None => {
                if !self.sources.is_empty() {
                    tracing::warn!(
                        "[ENGINE] No parseable host in {}; skipping citation checks",
                        input.url
                    );
                }
                Vec::new()
            }
        };

        let (analyzer_results, citation_results) =
            tokio::join!(join_all(tasks), join_all(citation_futures));

        let mut per_platform: Vec<PlatformScore> = analyzer_results
            .into_iter()
            .filter_map(|joined| match joined {
                Ok(score) => Some(score),
                Err(e) => {
                    tracing::error!("[ENGINE] Analyzer task failed: {}", e);
                    None
                }
            })
            .collect();

        apply_citation_results(&mut per_platform, citation_results);

        let effective_scores: HashMap<Platform, Score> = per_platform
            .iter()
            .map(|p| (p.platform, p.score))
            .collect();
        let combined_score = aggregator::combine(
            &effective_scores,
            options.weights.as_ref(),
            options.platforms.as_deref(),
        );

        let recommendations = recommendation::merge(
            per_platform
                .iter()
                .flat_map(|p| p.recommendations.iter().cloned()),
        );

        let report = VisibilityReport {
            id: uuid::Uuid::new_v4().to_string(),
            url: input.url.clone(),
            combined_score,
            per_platform,
            structural_features: (*features).clone(),
            recommendations,
            analyzed_at: Utc::now(),
            analysis_duration_ms: started.elapsed().as_millis() as u64,
        };

        tracing::info!(
            "[ENGINE] Complete - combined: {}, platforms: {}, took {}ms",
            report.combined_score,
            report.per_platform.len(),
            report.analysis_duration_ms
        );
        report
    }
}

impl Default for VisibilityEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

/// Requested platforms in request order, deduplicated. `None` means all.
fn requested_platforms(options: &AnalysisOptions) -> Vec<Platform> {
    let mut requested = Vec::new();
    for p in options
        .platforms
        .as_deref()
        .unwrap_or(&Platform::ALL)
    {
        if !requested.contains(p) {
            requested.push(*p);
        }
    }
    requested
}

fn host_of(url: &str) -> Option<String> {
    Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_string))
}

/// A completed real check replaces the heuristic score for its platform
/// slot; a failed check leaves the heuristic in place.
fn apply_citation_results(
    per_platform: &mut [PlatformScore],
    citation_results: Vec<(Platform, &'static str, Result<crate::domain::models::CitationCheckResult>)>,
) {
    for (platform, source_name, outcome) in citation_results {
        match outcome {
            Ok(check) => {
                if let Some(slot) = per_platform.iter_mut().find(|p| p.platform == platform) {
                    tracing::info!(
                        "[ENGINE] {} real check replaces heuristic {} with {}",
                        platform.as_str(),
                        slot.score,
                        check.citation_score()
                    );
                    slot.score = check.citation_score();
                    slot.is_real_check = true;
                    slot.citation = Some(check);
                }
            }
            Err(e) => {
                tracing::warn!(
                    "[ENGINE] Citation check via {} failed for {}; keeping heuristic: {}",
                    source_name,
                    platform.as_str(),
                    e
                );
            }
        }
    }
}
