//! Citation source clients.
//!
//! Each source wraps one external API that can tell us whether a query's
//! answer cites a domain. Responses are parsed against typed schemas at
//! the boundary; anything that does not fit degrades to
//! `EngineError::MalformedResponse` and, ultimately, to the heuristic
//! score for that platform.

use std::sync::OnceLock;

use async_trait::async_trait;
use regex::Regex;
use rquest::Client;
use serde::Deserialize;
use serde_json::json;

use crate::domain::models::Platform;
use crate::error::{EngineError, Result};
use crate::service::http::{create_client, ClientType};

const PERPLEXITY_ENDPOINT: &str = "https://api.perplexity.ai/chat/completions";

fn url_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"https?://[^\s"'<>)\]]+"#).unwrap())
}

/// URLs one provider answer cited.
#[derive(Debug, Clone, Default)]
pub struct SourceAnswer {
    pub citation_urls: Vec<String>,
}

/// A pluggable external query capability for one platform.
#[async_trait]
pub trait CitationSource: Send + Sync {
    fn platform(&self) -> Platform;

    /// Human-readable name for log lines and provider errors.
    fn name(&self) -> &'static str;

    /// False when the source has no credentials; the engine skips
    /// unconfigured sources instead of erroring.
    fn is_configured(&self) -> bool;

    /// Run one natural-language query and return every URL the answer
    /// cited.
    async fn query(&self, query_text: &str) -> Result<SourceAnswer>;
}

// ============================================================================
// PERPLEXITY (search-capable LLM API)
// ============================================================================

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    citations: Vec<String>,
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: String,
}

/// Perplexity's chat-completions API returns a structured `citations`
/// array alongside the answer text; URLs embedded in the text are picked
/// up as a fallback.
pub struct PerplexitySource {
    api_key: String,
    endpoint: String,
    client: Client,
}

impl PerplexitySource {
    pub fn new(api_key: impl Into<String>, timeout_secs: u64) -> Self {
        Self {
            api_key: api_key.into(),
            endpoint: PERPLEXITY_ENDPOINT.to_string(),
            client: create_client(ClientType::Standard, timeout_secs)
                .expect("Failed to create HTTP client"),
        }
    }

    /// Point the client at a different endpoint (tests, proxies).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

#[async_trait]
impl CitationSource for PerplexitySource {
    fn platform(&self) -> Platform {
        Platform::Perplexity
    }

    fn name(&self) -> &'static str {
        "perplexity"
    }

    fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
    }

    async fn query(&self, query_text: &str) -> Result<SourceAnswer> {
        let body = json!({
            "model": "sonar",
            "messages": [{"role": "user", "content": query_text}],
        });

        let response = self
            .client
            .post(&self.endpoint)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .body(body.to_string())
            .send()
            .await
            .map_err(|e| EngineError::network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(EngineError::provider(
                "perplexity",
                format!("{}: {}", status, error_text),
            ));
        }

        let raw = response
            .text()
            .await
            .map_err(|e| EngineError::network(e.to_string()))?;
        let parsed: ChatCompletionResponse =
            serde_json::from_str(&raw).map_err(|e| EngineError::malformed(e.to_string()))?;

        let mut citation_urls = parsed.citations;
        for choice in &parsed.choices {
            for url in url_pattern().find_iter(&choice.message.content) {
                citation_urls.push(url.as_str().to_string());
            }
        }

        tracing::debug!(
            "[CITATION] perplexity answered with {} citation urls",
            citation_urls.len()
        );
        Ok(SourceAnswer { citation_urls })
    }
}

// ============================================================================
// WEB SEARCH (organic-results API)
// ============================================================================

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    organic_results: Vec<SearchResult>,
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    #[serde(alias = "link")]
    url: String,
}

/// Generic organic-results search API. Used as the free signal for Google
/// AI Overviews presence: pages ranking organically for answer-shaped
/// queries are the ones Overviews draws from.
pub struct WebSearchSource {
    platform: Platform,
    api_key: String,
    endpoint: String,
    client: Client,
}

impl WebSearchSource {
    pub fn new(
        platform: Platform,
        api_key: impl Into<String>,
        endpoint: impl Into<String>,
        timeout_secs: u64,
    ) -> Self {
        Self {
            platform,
            api_key: api_key.into(),
            endpoint: endpoint.into(),
            client: create_client(ClientType::HeavyEmulation, timeout_secs)
                .expect("Failed to create HTTP client"),
        }
    }
}

#[async_trait]
impl CitationSource for WebSearchSource {
    fn platform(&self) -> Platform {
        self.platform
    }

    fn name(&self) -> &'static str {
        "web_search"
    }

    fn is_configured(&self) -> bool {
        !self.api_key.is_empty() && !self.endpoint.is_empty()
    }

    async fn query(&self, query_text: &str) -> Result<SourceAnswer> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("q", query_text), ("api_key", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| EngineError::network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(EngineError::provider(
                "web_search",
                format!("status {}", response.status()),
            ));
        }

        let raw = response
            .text()
            .await
            .map_err(|e| EngineError::network(e.to_string()))?;
        let parsed: SearchResponse =
            serde_json::from_str(&raw).map_err(|e| EngineError::malformed(e.to_string()))?;

        Ok(SourceAnswer {
            citation_urls: parsed.organic_results.into_iter().map(|r| r.url).collect(),
        })
    }
}
