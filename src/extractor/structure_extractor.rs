//! Content-structure flags and ordinal structure ratings.

use std::sync::OnceLock;

use regex::Regex;

use crate::domain::models::{ContentStructure, Heading, StructureRating};

use super::snippet_extractor::statistic_pattern;

/// Base direct-answer window in characters. Platform analyzers apply their
/// own narrower windows on top of the raw paragraph stats.
const DIRECT_ANSWER_MIN_CHARS: usize = 100;
const DIRECT_ANSWER_MAX_CHARS: usize = 500;

fn numbered_list_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?m)^\s*\d+\.\s").unwrap())
}

const TAKEAWAY_MARKERS: &[&str] = &["key takeaway", "key points", "tl;dr", "in summary"];
const FAQ_MARKERS: &[&str] = &["faq", "frequently asked"];
const EXPERT_MARKERS: &[&str] = &["according to", "expert", "researcher", "professor", "analyst"];
const CREDENTIAL_MARKERS: &[&str] = &["phd", "ph.d", "m.d.", "certified", "years of experience"];
const DEFINITION_MARKERS: &[&str] = &["is defined as", "refers to", "definition", "means"];

fn contains_any(haystack: &str, markers: &[&str]) -> bool {
    markers.iter().any(|m| haystack.contains(m))
}

/// Compute structure flags and paragraph stats from raw text plus the
/// effective heading list. Pure and total; empty input rates everything
/// `Poor`/false.
pub fn analyze_structure(
    raw_text: &str,
    headings: &[Heading],
    external_link_count: usize,
) -> ContentStructure {
    let lower = raw_text.to_lowercase();

    let paragraphs: Vec<&str> = raw_text
        .split("\n\n")
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();

    let first_paragraph = paragraphs.first().copied().unwrap_or("");
    let first_paragraph_chars = first_paragraph.chars().count();
    let first_sentence_chars = first_paragraph
        .split_inclusive(['.', '!', '?'])
        .next()
        .map(|s| s.trim().chars().count())
        .unwrap_or(0);

    let paragraph_words: Vec<usize> = paragraphs
        .iter()
        .map(|p| p.split_whitespace().count())
        .collect();
    let avg_paragraph_words = if paragraph_words.is_empty() {
        0
    } else {
        paragraph_words.iter().sum::<usize>() / paragraph_words.len()
    };
    let max_paragraph_words = paragraph_words.iter().copied().max().unwrap_or(0);

    ContentStructure {
        has_direct_answer: (DIRECT_ANSWER_MIN_CHARS..=DIRECT_ANSWER_MAX_CHARS)
            .contains(&first_paragraph_chars),
        has_key_takeaways: contains_any(&lower, TAKEAWAY_MARKERS),
        has_faq_section: contains_any(&lower, FAQ_MARKERS),
        has_how_to_section: lower.contains("how to"),
        has_step_by_step: lower.contains("step-by-step")
            || lower.contains("step 1")
            || numbered_list_pattern().is_match(raw_text),
        has_expert_attribution: contains_any(&lower, EXPERT_MARKERS),
        has_credentials: contains_any(&lower, CREDENTIAL_MARKERS),
        has_statistics: statistic_pattern().is_match(&lower),
        has_definitions: contains_any(&lower, DEFINITION_MARKERS),
        heading_hierarchy: rate_headings(headings),
        paragraph_structure: rate_paragraphs(&paragraph_words, avg_paragraph_words),
        first_paragraph_chars,
        first_sentence_chars,
        avg_paragraph_words,
        max_paragraph_words,
        external_link_count,
    }
}

fn rate_headings(headings: &[Heading]) -> StructureRating {
    if headings.is_empty() {
        return StructureRating::Poor;
    }
    let has_subheadings = headings.iter().any(|h| h.level == 2 || h.level == 3);
    if headings.len() >= 4 && has_subheadings {
        StructureRating::Good
    } else if headings.len() >= 2 {
        StructureRating::Fair
    } else {
        StructureRating::Poor
    }
}

fn rate_paragraphs(paragraph_words: &[usize], avg: usize) -> StructureRating {
    if paragraph_words.is_empty() {
        StructureRating::Poor
    } else if avg <= 80 {
        StructureRating::Good
    } else if avg <= 150 {
        StructureRating::Fair
    } else {
        StructureRating::Poor
    }
}
