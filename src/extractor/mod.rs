//! Structural feature extraction.
//!
//! One pass over a `ContentInput` producing the shared signal set every
//! platform analyzer consumes. Pure, deterministic and total: missing
//! optional fields degrade to neutral defaults, never errors.

pub mod entity_extractor;
pub mod schema_extractor;
pub mod snippet_extractor;
pub mod structure_extractor;

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use crate::domain::models::{ContentInput, StructuralFeatures};

const MAX_KEYWORDS: usize = 5;
const MIN_KEYWORD_LEN: usize = 5;

const KEYWORD_STOPWORDS: &[&str] = &[
    "about", "after", "again", "being", "below", "between", "could", "every", "first", "other",
    "their", "there", "these", "those", "through", "under", "until", "where", "which", "while",
    "would", "should", "because", "before", "during", "against",
];

/// Compute [`StructuralFeatures`] for one input. Called once per analysis;
/// the result fans out read-only to every analyzer.
pub fn extract(input: &ContentInput) -> StructuralFeatures {
    let word_count = input.effective_word_count();

    // Prefer caller-supplied headings; fall back to the raw HTML.
    let headings = if input.headings.is_empty() {
        input
            .raw_html
            .as_deref()
            .map(schema_extractor::extract_headings)
            .unwrap_or_default()
    } else {
        input.headings.clone()
    };

    let external_link_count = input
        .raw_html
        .as_deref()
        .map(|html| schema_extractor::count_external_links(html, &input.url))
        .unwrap_or(0);

    StructuralFeatures {
        entities: entity_extractor::extract_entities(&input.raw_text),
        quotable_snippets: snippet_extractor::extract_snippets(&input.raw_text),
        structure: structure_extractor::analyze_structure(
            &input.raw_text,
            &headings,
            external_link_count,
        ),
        schema: schema_extractor::detect_schema(input.raw_html.as_deref(), &input.schema_blocks),
        word_count,
        keywords: content_keywords(input),
    }
}

/// Top content words, used by the citation checker to build query
/// templates. Title words count triple.
fn content_keywords(input: &ContentInput) -> Vec<String> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    let mut order: Vec<String> = Vec::new();

    let mut bump = |word: &str, by: usize| {
        let cleaned: String = word
            .chars()
            .filter(|c| c.is_alphanumeric())
            .collect::<String>()
            .to_lowercase();
        if cleaned.len() < MIN_KEYWORD_LEN || KEYWORD_STOPWORDS.contains(&cleaned.as_str()) {
            return;
        }
        match counts.entry(cleaned) {
            Entry::Occupied(mut entry) => *entry.get_mut() += by,
            Entry::Vacant(entry) => {
                order.push(entry.key().clone());
                entry.insert(by);
            }
        }
    };

    for word in input.title.split_whitespace() {
        bump(word, 3);
    }
    for word in input.raw_text.split_whitespace() {
        bump(word, 1);
    }

    let mut keywords: Vec<String> = order;
    keywords.sort_by(|a, b| counts[b].cmp(&counts[a]));
    keywords.truncate(MAX_KEYWORDS);
    keywords
}
