//! Google AI Overviews analyzer.
//!
//! Heaviest on answer structure, schema and E-E-A-T: AI Overviews builds
//! its summary from pages Google already trusts, and it pulls the answer
//! from the opening of the page.

use crate::domain::models::{ContentInput, Platform, PlatformScore, ScoreFactor, StructuralFeatures};

use super::factor_names::*;
use super::{factors, heuristic_score, PlatformAnalyzer};

/// AI Overviews quotes opening sentences, so the direct-answer test is a
/// first-sentence length check, not a paragraph window.
const MIN_FIRST_SENTENCE_CHARS: usize = 50;

pub struct GoogleAioAnalyzer;

impl PlatformAnalyzer for GoogleAioAnalyzer {
    fn platform(&self) -> Platform {
        Platform::GoogleAiOverviews
    }

    fn analyze(&self, input: &ContentInput, features: &StructuralFeatures) -> PlatformScore {
        let s = &features.structure;
        let direct_answer = s.first_sentence_chars > MIN_FIRST_SENTENCE_CHARS;

        let factor_set = vec![
            ScoreFactor::new(
                ANSWER_STRUCTURE,
                factors::answer_structure_score(s, direct_answer),
                0.25,
                "Opens with a substantial first sentence and answer-shaped sections",
            ),
            ScoreFactor::new(
                SCHEMA_MARKUP,
                factors::schema_score(&features.schema, 30.0, 25.0, 25.0),
                0.20,
                "Structured data Google can read the page's purpose from",
            ),
            ScoreFactor::new(
                EEAT,
                factors::authority_score(s),
                0.20,
                "Experience, expertise, authority and trust signals",
            ),
            ScoreFactor::new(
                ENTITY_DENSITY,
                factors::entity_density_score(features.entities.len(), features.word_count),
                0.15,
                "Named entities per 1000 words within the citable band",
            ),
            ScoreFactor::new(
                QUOTABILITY,
                factors::quotability_score(features, 25.0),
                0.10,
                "Sentences liftable into an AI Overview",
            ),
            ScoreFactor::new(
                FRESHNESS,
                factors::freshness_score(input),
                0.10,
                "Days since the content was last updated",
            ),
        ];

        heuristic_score(self.platform(), factor_set)
    }
}
