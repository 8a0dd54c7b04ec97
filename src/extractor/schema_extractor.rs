//! Structured-data presence detection and HTML fallbacks.
//!
//! Schema detection is deliberately a string scan over the raw HTML, not a
//! JSON-LD parser: the only consumer is presence scoring, never structured
//! extraction.

use std::sync::OnceLock;

use scraper::{Html, Selector};
use url::Url;

use crate::domain::models::{Heading, SchemaPresence};

const ARTICLE_TYPES: &[&str] = &["article", "newsarticle", "blogposting"];
const OTHER_TYPES: &[&str] = &["product", "organization", "person", "breadcrumblist"];

/// Scan raw HTML and any pre-parsed schema blocks for structured-data
/// markers.
pub fn detect_schema(raw_html: Option<&str>, schema_blocks: &[serde_json::Value]) -> SchemaPresence {
    let mut presence = SchemaPresence::default();

    if let Some(html) = raw_html {
        let lower = html.to_lowercase();
        if lower.contains("application/ld+json") {
            // Collapse whitespace so `"@type": "Article"` and the compact
            // form hit the same markers.
            let compact: String = lower.split_whitespace().collect();
            mark_types(&mut presence, |t| compact.contains(&type_marker(t)));
        }
        presence.has_open_graph = lower.contains("property=\"og:") || lower.contains("property='og:");
        presence.has_twitter_card =
            lower.contains("name=\"twitter:") || lower.contains("name='twitter:");
    }

    for block in schema_blocks {
        let block_type = block
            .get("@type")
            .and_then(|t| t.as_str())
            .map(str::to_lowercase);
        if let Some(t) = block_type {
            mark_types(&mut presence, |candidate| candidate == t);
        }
    }

    presence
}

fn type_marker(schema_type: &str) -> String {
    format!("\"@type\":\"{}\"", schema_type)
}

fn mark_types(presence: &mut SchemaPresence, mut matches: impl FnMut(&str) -> bool) {
    if ARTICLE_TYPES.iter().any(|t| matches(t)) {
        presence.has_article = true;
    }
    if matches("faqpage") {
        presence.has_faq_page = true;
    }
    if matches("howto") {
        presence.has_how_to = true;
    }
    if OTHER_TYPES.iter().any(|t| matches(t)) {
        presence.has_other = true;
    }
}

/// Recover headings from raw HTML when the caller did not supply any.
/// Document order is preserved.
pub fn extract_headings(html: &str) -> Vec<Heading> {
    static SELECTOR: OnceLock<Selector> = OnceLock::new();
    let selector = SELECTOR.get_or_init(|| Selector::parse("h1, h2, h3, h4, h5, h6").unwrap());

    Html::parse_document(html)
        .select(selector)
        .filter_map(|el| {
            let level = el.value().name().strip_prefix('h')?.parse::<u8>().ok()?;
            let text = el.text().collect::<String>().trim().to_string();
            if text.is_empty() {
                return None;
            }
            Some(Heading { level, text })
        })
        .collect()
}

/// Count links pointing off the page's host. Unparsable hrefs are skipped.
pub fn count_external_links(html: &str, page_url: &str) -> usize {
    static SELECTOR: OnceLock<Selector> = OnceLock::new();
    let selector = SELECTOR.get_or_init(|| Selector::parse("a[href]").unwrap());

    let Ok(base_url) = Url::parse(page_url) else {
        return 0;
    };

    Html::parse_document(html)
        .select(selector)
        .filter_map(|a| a.value().attr("href"))
        .filter_map(|href| base_url.join(href).ok())
        .filter(|link| {
            matches!(link.scheme(), "http" | "https") && link.host_str() != base_url.host_str()
        })
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn detects_ld_json_types_with_spacing_variants() {
        let html = r#"<script type="application/ld+json">
            {"@context": "https://schema.org", "@type": "FAQPage"}
        </script>
        <script type="application/ld+json">{"@type":"Article"}</script>"#;

        let presence = detect_schema(Some(html), &[]);
        assert!(presence.has_faq_page);
        assert!(presence.has_article);
        assert!(!presence.has_how_to);
        assert!(presence.any());
    }

    #[test]
    fn type_markers_ignored_without_ld_json_script() {
        let html = r#"<p>"@type":"Article" mentioned in prose</p>"#;
        let presence = detect_schema(Some(html), &[]);
        assert!(!presence.has_article);
    }

    #[test]
    fn schema_blocks_checked_directly() {
        let blocks = vec![json!({"@type": "HowTo", "name": "Install"})];
        let presence = detect_schema(None, &blocks);
        assert!(presence.has_how_to);
    }

    #[test]
    fn open_graph_and_twitter_markers() {
        let html = r#"<meta property="og:title" content="x">
                      <meta name="twitter:card" content="summary">"#;
        let presence = detect_schema(Some(html), &[]);
        assert!(presence.has_open_graph);
        assert!(presence.has_twitter_card);
        assert!(!presence.any());
    }

    #[test]
    fn headings_recovered_in_document_order() {
        let html = "<h1>Top</h1><p>x</p><h2>Second</h2><h3>Third</h3>";
        let headings = extract_headings(html);
        assert_eq!(headings.len(), 3);
        assert_eq!(headings[0].level, 1);
        assert_eq!(headings[1].text, "Second");
    }

    #[test]
    fn external_links_counted_against_page_host() {
        let html = r#"<a href="/internal">in</a>
                      <a href="https://other.com/x">out</a>
                      <a href="https://example.com/y">same</a>
                      <a href="mailto:a@b.c">mail</a>"#;
        assert_eq!(count_external_links(html, "https://example.com/post"), 1);
    }
}
