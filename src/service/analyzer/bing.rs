//! Bing Copilot analyzer.
//!
//! Schema-heaviest of the set: Copilot leans on Bing's structured-data
//! index, and it clips tighter answer windows than the other surfaces.

use crate::domain::models::{
    ContentInput, Platform, PlatformScore, Score, ScoreFactor, StructuralFeatures,
};

use super::factor_names::*;
use super::{factors, heuristic_score, PlatformAnalyzer};

/// Copilot's answer window, tighter than the base 100-500 extractor rule.
const DIRECT_ANSWER_MIN_CHARS: usize = 80;
const DIRECT_ANSWER_MAX_CHARS: usize = 300;

pub struct BingCopilotAnalyzer;

impl BingCopilotAnalyzer {
    /// Entity clarity blends how many entities the page names with how well
    /// it introduces them: density alone rewards keyword stuffing.
    fn entity_clarity(features: &StructuralFeatures) -> Score {
        let density = factors::entity_density_score(features.entities.len(), features.word_count);
        let avg_quality = if features.entities.is_empty() {
            0.0
        } else {
            features
                .entities
                .iter()
                .map(|e| e.context_quality.raw())
                .sum::<f64>()
                / features.entities.len() as f64
        };
        Score::new(density.raw() * 0.6 + avg_quality * 0.4)
    }
}

impl PlatformAnalyzer for BingCopilotAnalyzer {
    fn platform(&self) -> Platform {
        Platform::BingCopilot
    }

    fn analyze(&self, input: &ContentInput, features: &StructuralFeatures) -> PlatformScore {
        let s = &features.structure;
        let direct_answer = (DIRECT_ANSWER_MIN_CHARS..=DIRECT_ANSWER_MAX_CHARS)
            .contains(&s.first_paragraph_chars);

        let factor_set = vec![
            ScoreFactor::new(
                SCHEMA_MARKUP,
                factors::schema_score(&features.schema, 25.0, 35.0, 30.0),
                0.25,
                "Structured data in Bing's index, FAQ markup weighted hardest",
            ),
            ScoreFactor::new(
                ENTITY_CLARITY,
                Self::entity_clarity(features),
                0.20,
                "Entity density blended with how clearly entities are introduced",
            ),
            ScoreFactor::new(
                ANSWER_STRUCTURE,
                factors::answer_structure_score(s, direct_answer),
                0.20,
                "Opening paragraph inside the 80-300 character answer window",
            ),
            ScoreFactor::new(
                QUOTABILITY,
                factors::quotability_score(features, 25.0),
                0.15,
                "Sentences liftable into a Copilot answer",
            ),
            ScoreFactor::new(
                FRESHNESS,
                factors::freshness_score(input),
                0.10,
                "Days since the content was last updated",
            ),
            ScoreFactor::new(
                AUTHORITY,
                factors::authority_score(s),
                0.10,
                "Attribution, credentials and outbound sourcing",
            ),
        ];

        heuristic_score(self.platform(), factor_set)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractor;

    #[test]
    fn answer_window_is_tighter_than_base() {
        // 90 chars: inside Copilot's 80-300 window, below the base 100-char
        // minimum the extractor applies.
        let text = "Copilot answer windows clip at roughly three hundred characters when rendering citations.";
        assert!(text.len() < 100 && text.len() > 80);
        let input = ContentInput::new("https://a.io", "T", text);
        let features = extractor::extract(&input);
        assert!(!features.structure.has_direct_answer);

        let result = BingCopilotAnalyzer.analyze(&input, &features);
        let answer = result
            .factors
            .iter()
            .find(|f| f.name == ANSWER_STRUCTURE)
            .unwrap();
        assert!(answer.score.raw() >= 25.0);
    }

    #[test]
    fn entity_clarity_rewards_defining_context() {
        let defined = "Acme Corp is a logistics company. Acme Corp ships worldwide.";
        let undefined = "Shipping with Acme Corp yesterday went fine.";

        let f_defined = extractor::extract(&ContentInput::new("https://a.io", "T", defined));
        let f_undefined = extractor::extract(&ContentInput::new("https://a.io", "T", undefined));

        let defined_score = BingCopilotAnalyzer::entity_clarity(&f_defined);
        let undefined_score = BingCopilotAnalyzer::entity_clarity(&f_undefined);
        assert!(defined_score.raw() > undefined_score.raw());
    }
}
