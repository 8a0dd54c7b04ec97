//! Quotable snippet extraction.
//!
//! Splits text into sentences and keeps the ones an answer engine could
//! lift verbatim, scored by how liftable they are.

use std::sync::OnceLock;

use regex::Regex;

use crate::domain::models::{QuotableSnippet, Score, SnippetKind};

const MAX_SNIPPETS: usize = 20;
const MIN_SNIPPET_SCORE: f64 = 60.0;
const MIN_SENTENCE_CHARS: usize = 20;

pub(crate) fn statistic_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\d+(?:\.\d+)?%|\$\d|\d+\s?(?:million|billion)").unwrap())
}

fn definition_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\b(?:is defined as|refers to|means|is a|is an|is the)\b").unwrap()
    })
}

fn step_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(?:first|second|third|next|then|finally|step)\b|\bstep \d").unwrap()
    })
}

fn digit_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\d").unwrap())
}

const KEY_POINT_MARKERS: &[&str] = &["key", "important", "essential", "critical", "remember"];
const AUTHORITY_MARKERS: &[&str] = &["according to", "expert", "research", "study"];

struct Sentence {
    text: String,
    char_offset: usize,
    terminator: char,
}

/// Split on `. ! ?`, keeping the offset of each sentence start.
fn split_sentences(text: &str) -> Vec<Sentence> {
    let mut sentences = Vec::new();
    let mut start = 0usize;
    let mut buf = String::new();

    for (offset, ch) in text.char_indices() {
        if buf.is_empty() {
            start = offset;
        }
        buf.push(ch);
        if matches!(ch, '.' | '!' | '?') {
            let trimmed = buf.trim();
            if !trimmed.is_empty() {
                sentences.push(Sentence {
                    text: trimmed.to_string(),
                    char_offset: start + (buf.len() - buf.trim_start().len()),
                    terminator: ch,
                });
            }
            buf.clear();
        }
    }
    let trimmed = buf.trim();
    if !trimmed.is_empty() {
        sentences.push(Sentence {
            text: trimmed.to_string(),
            char_offset: start,
            terminator: ' ',
        });
    }
    sentences
}

/// Ordered pattern checks; first match wins.
fn classify(sentence: &Sentence, lower: &str) -> SnippetKind {
    if statistic_pattern().is_match(lower) {
        SnippetKind::Statistic
    } else if definition_pattern().is_match(lower) {
        SnippetKind::Definition
    } else if step_pattern().is_match(lower) {
        SnippetKind::Step
    } else if KEY_POINT_MARKERS.iter().any(|m| lower.contains(m)) {
        SnippetKind::KeyPoint
    } else if sentence.terminator == '?' {
        SnippetKind::Answer
    } else {
        SnippetKind::Fact
    }
}

fn quotability(kind: SnippetKind, word_count: usize, lower: &str) -> Score {
    let mut score = 50.0;

    score += match kind {
        SnippetKind::Statistic | SnippetKind::Definition => 20.0,
        SnippetKind::Step | SnippetKind::KeyPoint => 15.0,
        SnippetKind::Answer => 10.0,
        SnippetKind::Fact => 5.0,
    };

    if (15..=30).contains(&word_count) {
        score += 15.0;
    } else if (10..=40).contains(&word_count) {
        score += 10.0;
    }

    if digit_pattern().is_match(lower) {
        score += 10.0;
    }
    if AUTHORITY_MARKERS.iter().any(|m| lower.contains(m)) {
        score += 10.0;
    }

    Score::new(score)
}

/// Extract quotable snippets in document order, scoring >= 60, capped at 20.
pub fn extract_snippets(text: &str) -> Vec<QuotableSnippet> {
    let mut snippets = Vec::new();

    for sentence in split_sentences(text) {
        if sentence.text.len() < MIN_SENTENCE_CHARS {
            continue;
        }
        let word_count = sentence.text.split_whitespace().count();
        if !(10..=50).contains(&word_count) {
            continue;
        }

        let lower = sentence.text.to_lowercase();
        let kind = classify(&sentence, &lower);
        let score = quotability(kind, word_count, &lower);

        if score.raw() >= MIN_SNIPPET_SCORE {
            snippets.push(QuotableSnippet {
                text: sentence.text,
                kind,
                char_offset: sentence.char_offset,
                quotability: score,
            });
        }
        if snippets.len() >= MAX_SNIPPETS {
            break;
        }
    }

    snippets
}
