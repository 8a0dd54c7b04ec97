//! Recommendation generation from under-threshold factors.
//!
//! Factor name maps to a canned template; titles are stable across
//! platforms so the report-level merge can deduplicate them, while
//! descriptions carry the platform flavor.

use std::collections::HashMap;

use crate::domain::models::{Platform, Priority, Recommendation, Score, ScoreFactor};

/// Factors scoring below 75 earn a recommendation; the band sets priority.
pub fn priority_for(score: Score) -> Option<Priority> {
    let s = score.raw();
    if s < 40.0 {
        Some(Priority::Critical)
    } else if s < 60.0 {
        Some(Priority::High)
    } else if s < 75.0 {
        Some(Priority::Medium)
    } else {
        None
    }
}

struct Template {
    title: String,
    description: String,
    impact: &'static str,
    auto_fixable: bool,
    action_code: Option<&'static str>,
}

fn template(factor_name: &str, platform: Platform) -> Template {
    let surface = platform.display_name();
    match factor_name {
        "Entity Density" | "Entity Clarity" => Template {
            title: "Increase Entity Coverage".to_string(),
            description: format!(
                "Name the people, products and organizations you discuss instead of \
                 referring to them indirectly. {} resolves content against known \
                 entities before citing it.",
                surface
            ),
            impact: "+10-15 points",
            auto_fixable: false,
            action_code: Some("add_entities"),
        },
        "Quotability" => Template {
            title: "Add Quotable Statements".to_string(),
            description: format!(
                "Write short, self-contained sentences that state one fact, definition \
                 or statistic. {} lifts these verbatim into answers.",
                surface
            ),
            impact: "+8-12 points",
            auto_fixable: false,
            action_code: Some("add_quotable_snippets"),
        },
        "Answer Structure" => Template {
            title: "Lead With a Direct Answer".to_string(),
            description: format!(
                "Open with a paragraph that answers the main question outright, then \
                 add key takeaways and an FAQ section. {} strongly prefers content \
                 it can answer from without synthesis.",
                surface
            ),
            impact: "+10-20 points",
            auto_fixable: false,
            action_code: Some("restructure_answer"),
        },
        "Schema Markup" => Template {
            title: "Add FAQ Schema".to_string(),
            description: format!(
                "Add FAQPage and Article JSON-LD markup. {} reads structured data \
                 to understand what a page answers.",
                surface
            ),
            impact: "+10-15 points",
            auto_fixable: true,
            action_code: Some("inject_schema"),
        },
        "Freshness" => Template {
            title: "Refresh Outdated Content".to_string(),
            description: format!(
                "Update the content and its modified date. {} discounts pages that \
                 look stale when fresher sources exist.",
                surface
            ),
            impact: "+5-10 points",
            auto_fixable: false,
            action_code: Some("refresh_content"),
        },
        "Authority Signals" | "E-E-A-T Signals" => Template {
            title: "Add Expert Attribution".to_string(),
            description: format!(
                "Attribute claims to named experts, cite studies and link primary \
                 sources. {} favors content with verifiable authority.",
                surface
            ),
            impact: "+10-15 points",
            auto_fixable: false,
            action_code: Some("add_attribution"),
        },
        "Semantic Clarity" => Template {
            title: "Replace Ambiguous Openers".to_string(),
            description: format!(
                "Avoid starting sentences with It, This or They; restate the subject \
                 and connect ideas with transition words. {} rewards passages it can \
                 interpret without surrounding context.",
                surface
            ),
            impact: "+8-12 points",
            auto_fixable: false,
            action_code: Some("clarify_pronouns"),
        },
        "Context Completeness" => Template {
            title: "Expand Topical Context".to_string(),
            description: format!(
                "Define terms on first use and cover the surrounding concepts a \
                 reader needs. {} cites pages that stand alone as references.",
                surface
            ),
            impact: "+5-10 points",
            auto_fixable: false,
            action_code: Some("expand_context"),
        },
        // Unknown factor names fall back so new factors never break
        // recommendation generation.
        other => Template {
            title: format!("Improve {}", other),
            description: format!(
                "The {} factor scored low for {}. Review the factor description \
                 and address the gap.",
                other, surface
            ),
            impact: "+5-10 points",
            auto_fixable: false,
            action_code: None,
        },
    }
}

/// One recommendation per under-threshold factor, in factor order.
pub fn for_factors(platform: Platform, factors: &[ScoreFactor]) -> Vec<Recommendation> {
    factors
        .iter()
        .filter_map(|factor| {
            let priority = priority_for(factor.score)?;
            let t = template(&factor.name, platform);
            Some(Recommendation {
                priority,
                title: t.title,
                description: t.description,
                impact_estimate: t.impact.to_string(),
                auto_fixable: t.auto_fixable,
                action_code: t.action_code.map(str::to_string),
            })
        })
        .collect()
}

/// Merge recommendation lists from all analyzers: dedup by lower-cased
/// title keeping the higher-priority instance, then a stable priority sort
/// so equal-priority items keep their original order.
pub fn merge(lists: impl IntoIterator<Item = Recommendation>) -> Vec<Recommendation> {
    let mut merged: Vec<Recommendation> = Vec::new();
    let mut index_by_title: HashMap<String, usize> = HashMap::new();

    for rec in lists {
        let key = rec.title.to_lowercase();
        match index_by_title.get(&key) {
            Some(&i) => {
                if rec.priority < merged[i].priority {
                    merged[i] = rec;
                }
            }
            None => {
                index_by_title.insert(key, merged.len());
                merged.push(rec);
            }
        }
    }

    merged.sort_by_key(|r| r.priority);
    merged
}

/// Flatten per-platform factor sets into one deduplicated, priority-sorted
/// recommendation list.
pub fn build_recommendations(per_platform: &[(Platform, Vec<ScoreFactor>)]) -> Vec<Recommendation> {
    merge(
        per_platform
            .iter()
            .flat_map(|(platform, factors)| for_factors(*platform, factors)),
    )
}
