//! Perplexity analyzer.
//!
//! Perplexity cites sources inline on every answer, so authority and
//! freshness outweigh structure: well-sourced, recently updated pages win
//! citations even with mediocre formatting.

use crate::domain::models::{ContentInput, Platform, PlatformScore, ScoreFactor, StructuralFeatures};

use super::factor_names::*;
use super::{factors, heuristic_score, PlatformAnalyzer};

pub struct PerplexityAnalyzer;

impl PlatformAnalyzer for PerplexityAnalyzer {
    fn platform(&self) -> Platform {
        Platform::Perplexity
    }

    fn analyze(&self, input: &ContentInput, features: &StructuralFeatures) -> PlatformScore {
        let s = &features.structure;

        let factor_set = vec![
            ScoreFactor::new(
                AUTHORITY,
                factors::authority_score(s),
                0.25,
                "Attribution, credentials and outbound sourcing",
            ),
            ScoreFactor::new(
                QUOTABILITY,
                factors::quotability_score(features, 25.0),
                0.20,
                "Sentences liftable into a cited answer",
            ),
            ScoreFactor::new(
                FRESHNESS,
                factors::freshness_score(input),
                0.20,
                "Days since the content was last updated",
            ),
            ScoreFactor::new(
                ANSWER_STRUCTURE,
                factors::answer_structure_score(s, s.has_direct_answer),
                0.15,
                "Direct answer up front plus answer-shaped sections",
            ),
            ScoreFactor::new(
                ENTITY_DENSITY,
                factors::entity_density_score(features.entities.len(), features.word_count),
                0.10,
                "Named entities per 1000 words within the citable band",
            ),
            ScoreFactor::new(
                SCHEMA_MARKUP,
                factors::schema_score(&features.schema, 25.0, 25.0, 25.0),
                0.10,
                "Structured data presence",
            ),
        ];

        heuristic_score(self.platform(), factor_set)
    }
}
