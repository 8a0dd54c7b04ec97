//! Shared factor-scoring primitives.
//!
//! Every platform analyzer builds its factor set from these functions;
//! platforms differ in weights, point tables and threshold windows, never
//! in the underlying curves.

use chrono::Utc;

use crate::domain::models::{
    ContentInput, ContentStructure, SchemaPresence, Score, ScoreFactor, StructuralFeatures,
    StructureRating,
};

/// Entity density factor: entities per 1000 words, band-shaped around
/// [5, 15]. Too sparse and too dense both hurt. Breakpoints are tuned
/// values; keep them exact.
pub fn entity_density_score(entity_count: usize, word_count: usize) -> Score {
    if word_count == 0 {
        return Score::new(0.0);
    }
    let density = entity_count as f64 * 1000.0 / word_count as f64;

    let raw = if density < 3.0 {
        density * 23.3
    } else if density < 5.0 {
        70.0 + (density - 3.0) * 15.0
    } else if density <= 15.0 {
        100.0
    } else if density <= 20.0 {
        100.0 - (density - 15.0) * 10.0
    } else {
        50.0 - (density - 20.0) * 5.0
    };

    Score::new(raw)
}

/// Quotability factor. Starts at the documented floor of 30 so content with
/// no extractable snippets still rates, then adds paragraph-band, takeaway
/// and snippet-count bonuses. `long_band_bonus` is the analyzer-specific
/// bonus for the (150, 200] word band.
pub fn quotability_score(features: &StructuralFeatures, long_band_bonus: f64) -> Score {
    let mut score = 30.0;

    let avg = features.structure.avg_paragraph_words;
    if (50..=150).contains(&avg) {
        score += 40.0;
    } else if (30..50).contains(&avg) {
        score += 25.0;
    } else if (151..=200).contains(&avg) {
        score += long_band_bonus;
    }

    if features.structure.has_key_takeaways {
        score += 20.0;
    }
    score += (features.quotable_snippets.len() as f64 * 8.0).min(40.0);

    Score::new(score)
}

/// Answer-structure factor: additive points over the structure flags.
/// `direct_answer` is passed in because platforms apply different
/// first-paragraph windows to the same stats.
pub fn answer_structure_score(structure: &ContentStructure, direct_answer: bool) -> Score {
    let mut score = 0.0;

    if direct_answer {
        score += 25.0;
    }
    if structure.has_key_takeaways {
        score += 15.0;
    }
    if structure.has_faq_section {
        score += 15.0;
    }
    if structure.has_step_by_step {
        score += 10.0;
    }
    if structure.has_statistics {
        score += 10.0;
    }
    if structure.has_definitions {
        score += 10.0;
    }
    score += match structure.heading_hierarchy {
        StructureRating::Good => 10.0,
        StructureRating::Fair => 5.0,
        StructureRating::Poor => 0.0,
    };
    if structure.paragraph_structure == StructureRating::Good {
        score += 5.0;
    }

    Score::new(score)
}

/// Schema factor: additive points per detected type. Point tables vary by
/// platform (Bing weighs FAQ markup hardest).
pub fn schema_score(
    schema: &SchemaPresence,
    article_pts: f64,
    faq_pts: f64,
    howto_pts: f64,
) -> Score {
    let mut score = 0.0;
    if schema.has_article {
        score += article_pts;
    }
    if schema.has_faq_page {
        score += faq_pts;
    }
    if schema.has_how_to {
        score += howto_pts;
    }
    if schema.has_other {
        score += 15.0;
    }
    Score::new(score)
}

/// Freshness step function over days since the content was last touched.
/// Unknown dates rate the neutral 50 - missing metadata is never penalized
/// below neutral.
pub fn freshness_score(input: &ContentInput) -> Score {
    let reference = input.last_modified.or(input.published_at);
    let Some(date) = reference else {
        return Score::new(50.0);
    };

    let days = Utc::now().signed_duration_since(date).num_days();
    let raw = if days <= 30 {
        100.0
    } else if days <= 90 {
        90.0
    } else if days <= 180 {
        75.0
    } else if days <= 365 {
        60.0
    } else if days <= 730 {
        40.0
    } else {
        25.0
    };
    Score::new(raw)
}

/// Authority factor: expert attribution, credentials and outbound sourcing.
pub fn authority_score(structure: &ContentStructure) -> Score {
    let mut score = 0.0;
    if structure.has_expert_attribution {
        score += 35.0;
    }
    if structure.has_credentials {
        score += 25.0;
    }
    if structure.external_link_count > 0 {
        score += 20.0;
    }
    score += (structure.external_link_count as f64 * 4.0).min(20.0);
    Score::new(score)
}

/// Weighted mean over a factor set: `round(sum(s*w) / sum(w))`, 0 when the
/// total weight is 0. Weights need not sum to 1, so an analyzer can add or
/// drop factors without rebalancing the rest.
pub fn weighted_mean(factors: &[ScoreFactor]) -> Score {
    let total_weight: f64 = factors.iter().map(|f| f.weight).sum();
    if total_weight <= 0.0 {
        return Score::new(0.0);
    }
    let weighted_sum: f64 = factors.iter().map(|f| f.score.raw() * f.weight).sum();
    Score::new(weighted_sum / total_weight)
}
