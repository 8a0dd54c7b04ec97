//! Domain entities for visibility analysis - behavior lives WITH data

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ====== Enums ======

/// AI search surfaces this engine can score content for.
///
/// Closed set: adding a platform means adding a variant, an analyzer and a
/// default weight - nothing is discovered at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    GoogleAiOverviews,
    ChatGpt,
    Perplexity,
    BingCopilot,
    Claude,
}

impl Platform {
    pub const ALL: [Platform; 5] = [
        Platform::GoogleAiOverviews,
        Platform::ChatGpt,
        Platform::Perplexity,
        Platform::BingCopilot,
        Platform::Claude,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::GoogleAiOverviews => "google_aio",
            Platform::ChatGpt => "chatgpt",
            Platform::Perplexity => "perplexity",
            Platform::BingCopilot => "bing_copilot",
            Platform::Claude => "claude",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Platform::GoogleAiOverviews => "Google AI Overviews",
            Platform::ChatGpt => "ChatGPT / SearchGPT",
            Platform::Perplexity => "Perplexity",
            Platform::BingCopilot => "Bing Copilot",
            Platform::Claude => "Claude",
        }
    }

    /// Default contribution to the combined score. Bing Copilot and Claude
    /// are tracked but carry no weight: no reliable free citation signal
    /// exists for either, so they only contribute when a caller opts in.
    pub fn default_weight(&self) -> f64 {
        match self {
            Platform::GoogleAiOverviews => 0.45,
            Platform::ChatGpt => 0.35,
            Platform::Perplexity => 0.20,
            Platform::BingCopilot => 0.0,
            Platform::Claude => 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Critical,
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Critical => "critical",
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

impl Confidence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Confidence::High => "high",
            Confidence::Medium => "medium",
            Confidence::Low => "low",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    Person,
    Organization,
    Product,
    Concept,
    Location,
    Event,
    Technology,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SnippetKind {
    Definition,
    Fact,
    Statistic,
    Step,
    Answer,
    KeyPoint,
}

/// Ordinal quality bucket for structural ratings. Missing signals rate
/// `Poor`, never an error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StructureRating {
    #[default]
    Poor,
    Fair,
    Good,
}

impl StructureRating {
    pub fn as_str(&self) -> &'static str {
        match self {
            StructureRating::Poor => "poor",
            StructureRating::Fair => "fair",
            StructureRating::Good => "good",
        }
    }
}

// ====== Score wrapper ======

/// Wrapper type for 0-100 scores. `Score::new` clamps and rounds, so every
/// score in a report is a whole number inside the valid range by
/// construction.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, PartialOrd)]
#[serde(transparent)]
pub struct Score(f64);

impl Score {
    pub fn new(value: f64) -> Self {
        if value.is_nan() {
            return Self(0.0);
        }
        Self(value.clamp(0.0, 100.0).round())
    }

    /// Return the raw rounded value
    pub fn raw(&self) -> f64 {
        self.0
    }

    pub fn as_u8(&self) -> u8 {
        self.0 as u8
    }
}

impl From<f64> for Score {
    fn from(v: f64) -> Self {
        Self::new(v)
    }
}

impl std::fmt::Display for Score {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0 as i64)
    }
}

// ====== Input ======

/// A heading with its level (1-6) and text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Heading {
    pub level: u8,
    pub text: String,
}

/// The unit of analysis. Immutable once constructed; every analyzer reads
/// the same snapshot and nothing in the pipeline mutates it.
///
/// Only `url`, `title` and `raw_text` are required - every other field has
/// a neutral default and analysis degrades gracefully without it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentInput {
    pub url: String,
    pub title: String,
    pub raw_text: String,
    pub raw_html: Option<String>,
    pub meta_description: Option<String>,
    pub headings: Vec<Heading>,
    pub published_at: Option<DateTime<Utc>>,
    pub last_modified: Option<DateTime<Utc>>,
    pub word_count: Option<usize>,
    pub schema_blocks: Vec<serde_json::Value>,
}

impl ContentInput {
    pub fn new(
        url: impl Into<String>,
        title: impl Into<String>,
        raw_text: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
            raw_text: raw_text.into(),
            raw_html: None,
            meta_description: None,
            headings: Vec::new(),
            published_at: None,
            last_modified: None,
            word_count: None,
            schema_blocks: Vec::new(),
        }
    }

    /// Word count: explicit value if provided, else whitespace tokenization.
    pub fn effective_word_count(&self) -> usize {
        self.word_count
            .unwrap_or_else(|| self.raw_text.split_whitespace().count())
    }
}

// ====== Structural features ======

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    pub name: String,
    pub entity_type: EntityType,
    pub mention_count: usize,
    pub context_quality: Score,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuotableSnippet {
    pub text: String,
    pub kind: SnippetKind,
    pub char_offset: usize,
    pub quotability: Score,
}

/// Boolean structure flags plus the numeric paragraph/heading stats that
/// platform analyzers apply their own thresholds to.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContentStructure {
    pub has_direct_answer: bool,
    pub has_key_takeaways: bool,
    pub has_faq_section: bool,
    pub has_how_to_section: bool,
    pub has_step_by_step: bool,
    pub has_expert_attribution: bool,
    pub has_credentials: bool,
    pub has_statistics: bool,
    pub has_definitions: bool,
    pub heading_hierarchy: StructureRating,
    pub paragraph_structure: StructureRating,
    pub first_paragraph_chars: usize,
    pub first_sentence_chars: usize,
    pub avg_paragraph_words: usize,
    pub max_paragraph_words: usize,
    pub external_link_count: usize,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SchemaPresence {
    pub has_article: bool,
    pub has_faq_page: bool,
    pub has_how_to: bool,
    pub has_other: bool,
    pub has_open_graph: bool,
    pub has_twitter_card: bool,
}

impl SchemaPresence {
    pub fn any(&self) -> bool {
        self.has_article || self.has_faq_page || self.has_how_to || self.has_other
    }
}

/// Derived signals computed once per `ContentInput` and consumed read-only
/// by every platform analyzer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructuralFeatures {
    pub entities: Vec<Entity>,
    pub quotable_snippets: Vec<QuotableSnippet>,
    pub structure: ContentStructure,
    pub schema: SchemaPresence,
    pub word_count: usize,
    pub keywords: Vec<String>,
}

// ====== Scoring results ======

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreFactor {
    pub name: String,
    pub score: Score,
    /// Relative weight within one analyzer's factor set. Weights are NOT
    /// required to sum to 1 - composition normalizes by total weight.
    pub weight: f64,
    pub description: String,
}

impl ScoreFactor {
    pub fn new(name: &str, score: Score, weight: f64, description: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            score,
            weight,
            description: description.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    pub priority: Priority,
    pub title: String,
    pub description: String,
    pub impact_estimate: String,
    pub auto_fixable: bool,
    pub action_code: Option<String>,
}

/// Result of real citation checks for one platform.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CitationCheckResult {
    pub platform: Platform,
    pub is_cited: bool,
    pub matching_citation_urls: Vec<String>,
    pub confidence: Confidence,
    pub queries_tested: usize,
    pub queries_with_citation: usize,
}

impl CitationCheckResult {
    /// Fraction of tested queries that cited the domain, on the 0-100 scale.
    /// This is the score that replaces the heuristic estimate when a real
    /// check ran.
    pub fn citation_score(&self) -> Score {
        if self.queries_tested == 0 {
            return Score::new(0.0);
        }
        Score::new(100.0 * self.queries_with_citation as f64 / self.queries_tested as f64)
    }
}

/// One platform's score for one analysis run. Immutable result value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformScore {
    pub platform: Platform,
    pub score: Score,
    pub factors: Vec<ScoreFactor>,
    pub recommendations: Vec<Recommendation>,
    /// True when `score` comes from a real citation check rather than the
    /// heuristic analyzer. The two are never averaged.
    pub is_real_check: bool,
    pub citation: Option<CitationCheckResult>,
}

/// Top-level engine output. Created fresh on every `analyze()` call;
/// persistence is a collaborator's responsibility.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisibilityReport {
    pub id: String,
    pub url: String,
    pub combined_score: Score,
    pub per_platform: Vec<PlatformScore>,
    pub structural_features: StructuralFeatures,
    pub recommendations: Vec<Recommendation>,
    pub analyzed_at: DateTime<Utc>,
    pub analysis_duration_ms: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_clamps_and_rounds() {
        assert_eq!(Score::new(101.7).raw(), 100.0);
        assert_eq!(Score::new(-3.0).raw(), 0.0);
        assert_eq!(Score::new(49.5).raw(), 50.0);
        assert_eq!(Score::new(f64::NAN).raw(), 0.0);
    }

    #[test]
    fn word_count_falls_back_to_tokenization() {
        let input = ContentInput::new("https://a.io", "T", "one two  three");
        assert_eq!(input.effective_word_count(), 3);

        let mut input = ContentInput::new("https://a.io", "T", "one two three");
        input.word_count = Some(500);
        assert_eq!(input.effective_word_count(), 500);
    }

    #[test]
    fn priority_orders_critical_first() {
        let mut v = vec![Priority::Low, Priority::Critical, Priority::Medium];
        v.sort();
        assert_eq!(v[0], Priority::Critical);
        assert_eq!(v[2], Priority::Low);
    }

    #[test]
    fn default_weights_match_product_split() {
        let total: f64 = Platform::ALL.iter().map(|p| p.default_weight()).sum();
        assert!((total - 1.0).abs() < 1e-9);
        assert_eq!(Platform::BingCopilot.default_weight(), 0.0);
    }
}
