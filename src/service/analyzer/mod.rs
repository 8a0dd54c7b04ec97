//! Platform analyzers for AI visibility scoring.
//!
//! One analyzer per AI search surface, all built from the shared factor
//! primitives in [`factors`]. Analyzers differ in which signals they weigh,
//! the weights themselves, threshold tuning and recommendation copy -
//! never in the underlying scoring curves.
//!
//! Analyzers are pure CPU over an immutable feature snapshot, so the
//! trait is synchronous and safely callable from any worker.

mod bing;
mod chatgpt;
mod claude;
pub mod factors;
mod google;
mod perplexity;

pub use bing::BingCopilotAnalyzer;
pub use chatgpt::ChatGptAnalyzer;
pub use claude::ClaudeAnalyzer;
pub use google::GoogleAioAnalyzer;
pub use perplexity::PerplexityAnalyzer;

use std::sync::Arc;

use crate::domain::models::{ContentInput, Platform, PlatformScore, ScoreFactor, StructuralFeatures};
use crate::service::recommendation;

/// Canonical factor names. Recommendation templates key off these.
pub mod factor_names {
    pub const ENTITY_DENSITY: &str = "Entity Density";
    pub const ENTITY_CLARITY: &str = "Entity Clarity";
    pub const QUOTABILITY: &str = "Quotability";
    pub const ANSWER_STRUCTURE: &str = "Answer Structure";
    pub const SCHEMA_MARKUP: &str = "Schema Markup";
    pub const FRESHNESS: &str = "Freshness";
    pub const AUTHORITY: &str = "Authority Signals";
    pub const EEAT: &str = "E-E-A-T Signals";
    pub const SEMANTIC_CLARITY: &str = "Semantic Clarity";
    pub const CONTEXT_COMPLETENESS: &str = "Context Completeness";
}

/// Strategy trait for per-platform scoring.
pub trait PlatformAnalyzer: Send + Sync {
    /// The surface this analyzer scores for.
    fn platform(&self) -> Platform;

    /// Score one input against this platform's weighting. Total: never
    /// errors, never panics on degenerate input.
    fn analyze(&self, input: &ContentInput, features: &StructuralFeatures) -> PlatformScore;
}

/// The closed analyzer set, in aggregation order.
pub fn registry() -> Vec<Arc<dyn PlatformAnalyzer>> {
    vec![
        Arc::new(GoogleAioAnalyzer),
        Arc::new(ChatGptAnalyzer),
        Arc::new(PerplexityAnalyzer),
        Arc::new(BingCopilotAnalyzer),
        Arc::new(ClaudeAnalyzer),
    ]
}

/// Assemble a heuristic `PlatformScore` from a factor set: weighted-mean
/// composition plus per-factor recommendations.
pub(crate) fn heuristic_score(platform: Platform, factors_list: Vec<ScoreFactor>) -> PlatformScore {
    let score = factors::weighted_mean(&factors_list);
    let recommendations = recommendation::for_factors(platform, &factors_list);
    PlatformScore {
        platform,
        score,
        factors: factors_list,
        recommendations,
        is_real_check: false,
        citation: None,
    }
}
