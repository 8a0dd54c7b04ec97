//! Claude-style search analyzer.
//!
//! Scores how well passages stand alone: ambiguous leading pronouns force
//! the model to carry context it may not retrieve, while transition words
//! and defined terms make passages self-interpreting.

use std::sync::OnceLock;

use regex::Regex;

use crate::domain::models::{
    ContentInput, Platform, PlatformScore, Score, ScoreFactor, StructuralFeatures,
};

use super::factor_names::*;
use super::{factors, heuristic_score, PlatformAnalyzer};

const TRANSITION_MARKERS: &[&str] = &[
    "however",
    "therefore",
    "moreover",
    "furthermore",
    "consequently",
    "in addition",
    "for example",
    "as a result",
];

fn ambiguous_opener_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(?i)(?:it|they|this|that|these)\b").unwrap())
}

pub struct ClaudeAnalyzer;

impl ClaudeAnalyzer {
    /// Fraction of sentences opening on an unresolved pronoun pulls the
    /// score down; transition-word density pushes it up.
    fn semantic_clarity(text: &str) -> Score {
        let sentences: Vec<&str> = text
            .split(['.', '!', '?'])
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect();
        if sentences.is_empty() {
            return Score::new(50.0);
        }

        let ambiguous = sentences
            .iter()
            .filter(|s| ambiguous_opener_pattern().is_match(s))
            .count();

        let lower = text.to_lowercase();
        let transitions: usize = TRANSITION_MARKERS
            .iter()
            .map(|m| lower.matches(m).count())
            .sum();

        let mut score = 70.0;
        score -= ambiguous as f64 / sentences.len() as f64 * 40.0;
        score += (transitions as f64 * 5.0).min(30.0);
        Score::new(score)
    }

    /// How much a page stands alone as a reference: defined terms, well
    /// introduced entities, enough depth, an up-front answer.
    fn context_completeness(features: &StructuralFeatures) -> Score {
        let mut score = 0.0;

        if features.structure.has_definitions {
            score += 25.0;
        }
        let avg_entity_quality = if features.entities.is_empty() {
            0.0
        } else {
            features
                .entities
                .iter()
                .map(|e| e.context_quality.raw())
                .sum::<f64>()
                / features.entities.len() as f64
        };
        score += avg_entity_quality * 0.4;
        score += (features.word_count as f64 / 600.0).min(1.0) * 20.0;
        if features.structure.has_direct_answer {
            score += 15.0;
        }

        Score::new(score)
    }
}

impl PlatformAnalyzer for ClaudeAnalyzer {
    fn platform(&self) -> Platform {
        Platform::Claude
    }

    fn analyze(&self, input: &ContentInput, features: &StructuralFeatures) -> PlatformScore {
        let s = &features.structure;

        let factor_set = vec![
            ScoreFactor::new(
                SEMANTIC_CLARITY,
                Self::semantic_clarity(&input.raw_text),
                0.25,
                "Passages interpretable without surrounding context",
            ),
            ScoreFactor::new(
                CONTEXT_COMPLETENESS,
                Self::context_completeness(features),
                0.20,
                "Terms defined and topics covered deeply enough to stand alone",
            ),
            ScoreFactor::new(
                QUOTABILITY,
                factors::quotability_score(features, 30.0),
                0.20,
                "Self-contained sentences quotable into an answer",
            ),
            ScoreFactor::new(
                ANSWER_STRUCTURE,
                factors::answer_structure_score(s, s.has_direct_answer),
                0.15,
                "Direct answer up front plus answer-shaped sections",
            ),
            ScoreFactor::new(
                AUTHORITY,
                factors::authority_score(s),
                0.10,
                "Attribution, credentials and outbound sourcing",
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ambiguous_openers_pull_clarity_down() {
        let ambiguous = "It changed everything. They noticed quickly. This matters.";
        let explicit = "The migration changed everything. The operators noticed quickly.";
        assert!(
            ClaudeAnalyzer::semantic_clarity(ambiguous).raw()
                < ClaudeAnalyzer::semantic_clarity(explicit).raw()
        );
    }

    #[test]
    fn transition_words_push_clarity_up() {
        let flat = "The cache failed. The disk filled. The pager fired.";
        let connected =
            "The cache failed. Consequently, the disk filled. As a result, the pager fired.";
        assert!(
            ClaudeAnalyzer::semantic_clarity(connected).raw()
                > ClaudeAnalyzer::semantic_clarity(flat).raw()
        );
    }

    #[test]
    fn clarity_is_neutral_on_empty_text() {
        assert_eq!(ClaudeAnalyzer::semantic_clarity("").raw(), 50.0);
    }
}
