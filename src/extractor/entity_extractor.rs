//! Approximate named-entity recognition over raw text.
//!
//! Capitalized-phrase matching, deliberately low-fidelity: the scoring
//! pipeline only needs entity density and rough context quality, not a
//! real NER model.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::OnceLock;

use regex::Regex;

use crate::domain::models::{Entity, EntityType, Score};

/// Result cap. Callers must not assume completeness for very long
/// documents.
const MAX_ENTITIES: usize = 50;

/// Single capitalized words that are almost always sentence starters or
/// pronouns, not entities.
const NOISE_WORDS: &[&str] = &[
    "the", "a", "an", "it", "this", "that", "these", "those", "he", "she", "they", "we", "you",
    "i", "in", "on", "at", "for", "to", "from", "with", "but", "and", "or", "if", "when", "while",
    "as", "by", "of", "so", "its", "our", "your", "their", "there", "here", "what", "how", "why",
    "according", "however", "therefore", "also", "after", "before", "during",
];

fn phrase_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\b[A-Z][A-Za-z0-9]*(?:[ ][A-Z][A-Za-z0-9]*)*\b").unwrap()
    })
}

struct Mention {
    display: String,
    count: usize,
}

/// Extract entities from raw text, ranked by mention count descending and
/// capped at [`MAX_ENTITIES`].
pub fn extract_entities(text: &str) -> Vec<Entity> {
    let lower_text = text.to_lowercase();

    // Dedup case-insensitively, keep first-seen casing for display.
    let mut order: Vec<String> = Vec::new();
    let mut mentions: HashMap<String, Mention> = HashMap::new();

    for m in phrase_pattern().find_iter(text) {
        let display = m.as_str().trim();
        let key = display.to_lowercase();

        if display.is_empty() {
            continue;
        }
        if !display.contains(' ') && NOISE_WORDS.contains(&key.as_str()) {
            continue;
        }

        match mentions.entry(key) {
            Entry::Occupied(mut entry) => entry.get_mut().count += 1,
            Entry::Vacant(entry) => {
                order.push(entry.key().clone());
                entry.insert(Mention {
                    display: display.to_string(),
                    count: 1,
                });
            }
        }
    }

    let mut entities: Vec<Entity> = order
        .iter()
        .map(|key| {
            let m = &mentions[key];
            Entity {
                name: m.display.clone(),
                entity_type: infer_type(&m.display),
                mention_count: m.count,
                context_quality: context_quality(key, m.count, &lower_text),
            }
        })
        .collect();

    // Stable sort keeps first-seen order among equal counts.
    entities.sort_by(|a, b| b.mention_count.cmp(&a.mention_count));
    entities.truncate(MAX_ENTITIES);
    entities
}

/// Heuristic keyword matching, defaulting to `Other`. Intentionally
/// string-level; anything smarter belongs in a real NER pass upstream.
fn infer_type(name: &str) -> EntityType {
    let lower = name.to_lowercase();

    let organization = ["inc", "corp", "corporation", "llc", "ltd", "company", "foundation", "university", "institute", "agency"];
    let technology = ["api", "sdk", "framework", "protocol", "engine", "database", "cloud", "ai", "software"];
    let product = ["app", "platform", "suite", "pro", "studio"];
    let location = ["city", "valley", "island", "county", "street", "avenue"];
    let event = ["conference", "summit", "expo", "festival", "awards"];

    let word_matches =
        |words: &[&str]| lower.split_whitespace().any(|w| words.contains(&w));

    if word_matches(&organization) {
        EntityType::Organization
    } else if lower.starts_with("dr ") || lower.starts_with("dr. ") || lower.starts_with("prof ") {
        EntityType::Person
    } else if word_matches(&technology) {
        EntityType::Technology
    } else if word_matches(&product) {
        EntityType::Product
    } else if word_matches(&location) {
        EntityType::Location
    } else if word_matches(&event) {
        EntityType::Event
    } else {
        EntityType::Other
    }
}

/// 80 when the entity appears in a defining phrase, else stepped by raw
/// mention frequency.
fn context_quality(key: &str, count: usize, lower_text: &str) -> Score {
    let defining = [
        format!("{} is", key),
        format!("{}, which", key),
        format!("{} refers", key),
    ];
    if defining.iter().any(|p| lower_text.contains(p.as_str())) {
        return Score::new(80.0);
    }
    if count >= 5 {
        Score::new(70.0)
    } else if count >= 3 {
        Score::new(60.0)
    } else {
        Score::new(50.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_multi_word_entity_with_defining_pattern() {
        let text = "Acme Corp is a company. It was founded in 2010. \
                    According to experts, Acme grew 40% last year.";
        let entities = extract_entities(text);

        let acme = entities
            .iter()
            .find(|e| e.name == "Acme Corp")
            .expect("Acme Corp should be extracted");
        assert_eq!(acme.entity_type, EntityType::Organization);
        assert_eq!(acme.context_quality.raw(), 80.0);
    }

    #[test]
    fn filters_pronoun_noise() {
        let entities = extract_entities("It was big. This changed. They left.");
        assert!(entities.is_empty(), "got: {:?}", entities);
    }

    #[test]
    fn dedup_is_case_insensitive_keeping_first_casing() {
        let entities = extract_entities("GraphQL is neat. GRAPHQL again. GraphQL forever.");
        let gql = entities.iter().find(|e| e.name == "GraphQL").unwrap();
        assert_eq!(gql.mention_count, 3);
    }

    #[test]
    fn caps_at_fifty_entities() {
        let mut text = String::new();
        for i in 0..500 {
            text.push_str(&format!("Widget{} is useful. ", i));
        }
        let entities = extract_entities(&text);
        assert!(entities.len() <= 50);
    }

    #[test]
    fn mention_frequency_steps_context_quality() {
        let text = "Foo shipped. Foo again. Foo thrice. Foo more. Foo once more.";
        let entities = extract_entities(text);
        let foo = entities.iter().find(|e| e.name == "Foo").unwrap();
        assert_eq!(foo.mention_count, 5);
        assert_eq!(foo.context_quality.raw(), 70.0);
    }
}
