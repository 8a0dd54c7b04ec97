//! Combined-score aggregation across platforms.

use std::collections::HashMap;

use crate::domain::models::{Platform, Score};

/// Combine per-platform scores into one 0-100 score.
///
/// Restricts to `subset` (default: every platform carrying weight),
/// renormalizes the restricted weights to sum to 1, then weighted-sums.
/// Platforms missing from `scores` contribute 0; zero total weight returns
/// 0 rather than erroring - both are documented contract, not failure
/// paths.
pub fn combine(
    scores: &HashMap<Platform, Score>,
    weights: Option<&HashMap<Platform, f64>>,
    subset: Option<&[Platform]>,
) -> Score {
    let weight_of = |platform: Platform| -> f64 {
        weights
            .and_then(|w| w.get(&platform).copied())
            .unwrap_or_else(|| platform.default_weight())
    };

    let platforms: Vec<Platform> = match subset {
        Some(requested) => {
            // Dedup while preserving request order.
            let mut seen = Vec::new();
            for p in requested {
                if !seen.contains(p) {
                    seen.push(*p);
                }
            }
            seen
        }
        None => Platform::ALL
            .iter()
            .copied()
            .filter(|p| weight_of(*p) > 0.0)
            .collect(),
    };

    let total_weight: f64 = platforms.iter().map(|p| weight_of(*p)).sum();
    if total_weight <= 0.0 {
        return Score::new(0.0);
    }

    let combined: f64 = platforms
        .iter()
        .map(|p| {
            let score = scores.get(p).map(|s| s.raw()).unwrap_or(0.0);
            score * (weight_of(*p) / total_weight)
        })
        .sum();

    Score::new(combined)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scores(entries: &[(Platform, f64)]) -> HashMap<Platform, Score> {
        entries.iter().map(|(p, s)| (*p, Score::new(*s))).collect()
    }

    #[test]
    fn default_weights_blend_the_three_weighted_platforms() {
        let s = scores(&[
            (Platform::GoogleAiOverviews, 80.0),
            (Platform::ChatGpt, 60.0),
            (Platform::Perplexity, 40.0),
        ]);
        // 80*0.45 + 60*0.35 + 40*0.20 = 36 + 21 + 8 = 65
        assert_eq!(combine(&s, None, None).raw(), 65.0);
    }

    #[test]
    fn single_platform_subset_ignores_other_weights() {
        let s = scores(&[
            (Platform::GoogleAiOverviews, 80.0),
            (Platform::ChatGpt, 60.0),
        ]);
        let weights: HashMap<Platform, f64> =
            [(Platform::GoogleAiOverviews, 1.0), (Platform::ChatGpt, 1.0)]
                .into_iter()
                .collect();
        let combined = combine(
            &s,
            Some(&weights),
            Some(&[Platform::GoogleAiOverviews]),
        );
        assert_eq!(combined.raw(), 80.0);
    }

    #[test]
    fn missing_platform_entries_contribute_zero() {
        let s = scores(&[(Platform::GoogleAiOverviews, 100.0)]);
        // chatgpt and perplexity missing: 100*0.45 = 45
        assert_eq!(combine(&s, None, None).raw(), 45.0);
    }

    #[test]
    fn zero_total_weight_returns_zero() {
        let s = scores(&[(Platform::BingCopilot, 90.0)]);
        // Bing's default weight is 0.
        let combined = combine(&s, None, Some(&[Platform::BingCopilot]));
        assert_eq!(combined.raw(), 0.0);
    }

    #[test]
    fn duplicate_subset_entries_count_once() {
        let s = scores(&[(Platform::ChatGpt, 70.0)]);
        let combined = combine(
            &s,
            None,
            Some(&[Platform::ChatGpt, Platform::ChatGpt]),
        );
        assert_eq!(combined.raw(), 70.0);
    }

    #[test]
    fn weight_overrides_replace_defaults() {
        let s = scores(&[
            (Platform::GoogleAiOverviews, 100.0),
            (Platform::ChatGpt, 0.0),
        ]);
        let weights: HashMap<Platform, f64> = [
            (Platform::GoogleAiOverviews, 0.5),
            (Platform::ChatGpt, 0.5),
            (Platform::Perplexity, 0.0),
        ]
        .into_iter()
        .collect();
        assert_eq!(combine(&s, Some(&weights), None).raw(), 50.0);
    }
}
