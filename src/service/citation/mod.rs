//! Real citation checking against external AI/search APIs.
//!
//! A citation check measures actual presence, where the analyzers estimate
//! likelihood - the two are never averaged. When a check completes, its
//! score replaces the heuristic score for that platform; when it fails, the
//! platform keeps the heuristic estimate and the failure is logged.

pub mod source;

pub use source::{CitationSource, PerplexitySource, SourceAnswer, WebSearchSource};

use std::time::Duration;

use tokio::time::sleep;
use url::Url;

use crate::config::EngineConfig;
use crate::domain::models::{CitationCheckResult, Confidence};
use crate::error::Result;

const QUERY_TEMPLATES: [&str; 3] = ["what is {}", "how does {} work", "best {} guide"];

/// Normalize a domain for matching: lowercase, strip any scheme/path and a
/// leading `www.`.
pub fn normalize_domain(domain: &str) -> String {
    let lower = domain.trim().to_lowercase();
    let host = if lower.contains("://") {
        Url::parse(&lower)
            .ok()
            .and_then(|u| u.host_str().map(str::to_string))
            .unwrap_or(lower)
    } else {
        lower.split('/').next().unwrap_or("").to_string()
    };
    host.strip_prefix("www.").unwrap_or(&host).to_string()
}

/// Whether a citation URL points at the target domain. A match is the
/// normalized hostname itself or any subdomain of it. Case-insensitive.
pub fn domain_matches(citation_url: &str, target_domain: &str) -> bool {
    let target = normalize_domain(target_domain);
    if target.is_empty() {
        return false;
    }
    let Ok(parsed) = Url::parse(citation_url) else {
        return false;
    };
    let Some(host) = parsed.host_str() else {
        return false;
    };
    let host = host.to_lowercase();
    let host = host.strip_prefix("www.").unwrap_or(&host);

    host == target || host.ends_with(&format!(".{}", target))
}

/// Build up to `count` natural-language queries from content keywords,
/// falling back to a single generic query when no keywords exist.
pub fn build_queries(domain: &str, keywords: &[String], count: usize) -> Vec<String> {
    if keywords.is_empty() || count == 0 {
        return vec![format!("what is {}", normalize_domain(domain))];
    }
    (0..count)
        .map(|i| {
            let keyword = &keywords[i % keywords.len()];
            QUERY_TEMPLATES[i % QUERY_TEMPLATES.len()].replace("{}", keyword)
        })
        .collect()
}

/// Runs template queries against one source and scores how often the
/// target domain was cited.
pub struct CitationChecker {
    config: EngineConfig,
}

impl CitationChecker {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Run the full query set for one platform. Queries are sequential
    /// with a fixed delay - rate-limit compliance toward the provider, not
    /// a correctness requirement. Any query failure propagates so the
    /// engine can fall back to the heuristic score.
    pub async fn check(
        &self,
        source: &dyn CitationSource,
        domain: &str,
        keywords: &[String],
    ) -> Result<CitationCheckResult> {
        let queries = build_queries(domain, keywords, self.config.query_count);
        tracing::info!(
            "[CITATION] {} checking {} with {} queries",
            source.name(),
            domain,
            queries.len()
        );

        let mut queries_with_citation = 0;
        let mut matching_urls: Vec<String> = Vec::new();

        for (i, query) in queries.iter().enumerate() {
            if i > 0 && self.config.inter_query_delay_ms > 0 {
                sleep(Duration::from_millis(self.config.inter_query_delay_ms)).await;
            }

            let answer = source.query(query).await?;
            let mut cited = false;
            for url in answer.citation_urls {
                if domain_matches(&url, domain) {
                    cited = true;
                    if !matching_urls.contains(&url) {
                        matching_urls.push(url);
                    }
                }
            }
            tracing::debug!("[CITATION] query {:?} cited={}", query, cited);
            if cited {
                queries_with_citation += 1;
            }
        }

        let confidence = if queries_with_citation > 2 {
            Confidence::High
        } else if queries_with_citation > 0 {
            Confidence::Medium
        } else {
            Confidence::Low
        };

        Ok(CitationCheckResult {
            platform: source.platform(),
            is_cited: queries_with_citation > 0,
            matching_citation_urls: matching_urls,
            confidence,
            queries_tested: queries.len(),
            queries_with_citation,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::Platform;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn subdomain_matches_target() {
        assert!(domain_matches("https://blog.example.com/post", "example.com"));
        assert!(domain_matches("https://example.com/", "example.com"));
        assert!(domain_matches("https://www.example.com/", "example.com"));
        assert!(domain_matches("https://EXAMPLE.COM/x", "Example.com"));
    }

    #[test]
    fn lookalike_domains_do_not_match() {
        assert!(!domain_matches("https://notexample.com", "example.com"));
        assert!(!domain_matches("https://example.com.evil.io", "example.com"));
        assert!(!domain_matches("not a url", "example.com"));
    }

    #[test]
    fn normalize_strips_scheme_and_www() {
        assert_eq!(normalize_domain("https://www.Example.com/path"), "example.com");
        assert_eq!(normalize_domain("www.example.com"), "example.com");
        assert_eq!(normalize_domain("example.com/about"), "example.com");
    }

    #[test]
    fn query_builder_cycles_templates_and_falls_back() {
        let keywords = vec!["kubernetes".to_string(), "networking".to_string()];
        let queries = build_queries("https://acme.io", &keywords, 3);
        assert_eq!(queries[0], "what is kubernetes");
        assert_eq!(queries[1], "how does networking work");
        assert_eq!(queries[2], "best kubernetes guide");

        let fallback = build_queries("https://www.acme.io", &[], 3);
        assert_eq!(fallback, vec!["what is acme.io".to_string()]);
    }

    struct ScriptedSource {
        answers: Vec<Vec<&'static str>>,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl CitationSource for ScriptedSource {
        fn platform(&self) -> Platform {
            Platform::Perplexity
        }
        fn name(&self) -> &'static str {
            "scripted"
        }
        fn is_configured(&self) -> bool {
            true
        }
        async fn query(&self, _query_text: &str) -> Result<SourceAnswer> {
            let i = self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(SourceAnswer {
                citation_urls: self.answers[i].iter().map(|s| s.to_string()).collect(),
            })
        }
    }

    fn fast_config(query_count: usize) -> EngineConfig {
        EngineConfig {
            query_count,
            inter_query_delay_ms: 0,
            request_timeout_secs: 5,
        }
    }

    #[tokio::test]
    async fn confidence_thresholds_follow_cited_counts() {
        // 3 of 3 queries cited -> high confidence.
        let source = ScriptedSource {
            answers: vec![
                vec!["https://example.com/a"],
                vec!["https://blog.example.com/b"],
                vec!["https://example.com/c", "https://other.io"],
            ],
            calls: AtomicUsize::new(0),
        };
        let checker = CitationChecker::new(fast_config(3));
        let keywords = vec!["example".to_string()];
        let result = checker
            .check(&source, "example.com", &keywords)
            .await
            .unwrap();
        assert!(result.is_cited);
        assert_eq!(result.queries_with_citation, 3);
        assert_eq!(result.confidence, Confidence::High);
        assert_eq!(result.citation_score().raw(), 100.0);

        // 1 of 3 -> medium.
        let source = ScriptedSource {
            answers: vec![vec![], vec!["https://example.com/x"], vec![]],
            calls: AtomicUsize::new(0),
        };
        let result = checker
            .check(&source, "example.com", &keywords)
            .await
            .unwrap();
        assert_eq!(result.confidence, Confidence::Medium);
        assert_eq!(result.citation_score().raw(), 33.0);

        // 0 of 3 -> low.
        let source = ScriptedSource {
            answers: vec![vec!["https://other.io"], vec![], vec![]],
            calls: AtomicUsize::new(0),
        };
        let result = checker
            .check(&source, "example.com", &keywords)
            .await
            .unwrap();
        assert!(!result.is_cited);
        assert_eq!(result.confidence, Confidence::Low);
        assert_eq!(result.citation_score().raw(), 0.0);
    }
}
