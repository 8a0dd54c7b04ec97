//! ChatGPT / SearchGPT analyzer.
//!
//! Quotability-first: SearchGPT answers are stitched from liftable
//! sentences, and retrieval favors entity-dense pages. Long paragraphs are
//! penalized explicitly in the recommendations.

use crate::domain::models::{
    ContentInput, Platform, PlatformScore, Priority, Recommendation, ScoreFactor,
    StructuralFeatures,
};

use super::factor_names::*;
use super::{factors, heuristic_score, PlatformAnalyzer};

const MAX_PARAGRAPH_WORDS: usize = 200;

pub struct ChatGptAnalyzer;

impl PlatformAnalyzer for ChatGptAnalyzer {
    fn platform(&self) -> Platform {
        Platform::ChatGpt
    }

    fn analyze(&self, input: &ContentInput, features: &StructuralFeatures) -> PlatformScore {
        let s = &features.structure;

        let factor_set = vec![
            ScoreFactor::new(
                QUOTABILITY,
                factors::quotability_score(features, 30.0),
                0.25,
                "Self-contained sentences SearchGPT can quote directly",
            ),
            ScoreFactor::new(
                ENTITY_DENSITY,
                factors::entity_density_score(features.entities.len(), features.word_count),
                0.20,
                "Named entities per 1000 words within the citable band",
            ),
            ScoreFactor::new(
                ANSWER_STRUCTURE,
                factors::answer_structure_score(s, s.has_direct_answer),
                0.20,
                "Direct answer up front plus answer-shaped sections",
            ),
            ScoreFactor::new(
                AUTHORITY,
                factors::authority_score(s),
                0.15,
                "Attribution, credentials and outbound sourcing",
            ),
            ScoreFactor::new(
                SCHEMA_MARKUP,
                factors::schema_score(&features.schema, 25.0, 25.0, 25.0),
                0.10,
                "Structured data presence",
            ),
            ScoreFactor::new(
                FRESHNESS,
                factors::freshness_score(input),
                0.10,
                "Days since the content was last updated",
            ),
        ];

        let mut result = heuristic_score(self.platform(), factor_set);

        if s.max_paragraph_words > MAX_PARAGRAPH_WORDS {
            result.recommendations.push(Recommendation {
                priority: Priority::High,
                title: "Shorten Long Paragraphs".to_string(),
                description: format!(
                    "The longest paragraph runs {} words. ChatGPT rarely quotes from \
                     paragraphs over {} words; split them into focused 50-150 word blocks.",
                    s.max_paragraph_words, MAX_PARAGRAPH_WORDS
                ),
                impact_estimate: "+5-10 points".to_string(),
                auto_fixable: false,
                action_code: Some("split_paragraphs".to_string()),
            });
        }

        result
    }
}
