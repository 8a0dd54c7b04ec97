use std::collections::HashMap;

use serde::Deserialize;

use crate::domain::models::Platform;

/// Per-call analysis options.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnalysisOptions {
    /// Restrict analysis to these platforms. `None` runs every analyzer.
    /// Duplicates and unknown entries are ignored, not errors.
    pub platforms: Option<Vec<Platform>>,
    /// Override the default aggregation weights for selected platforms.
    pub weights: Option<HashMap<Platform, f64>>,
}

/// Engine-level tuning for the citation checker and outbound HTTP.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    /// Number of template queries issued per citation check.
    pub query_count: usize,
    /// Fixed delay between queries against one provider. Backpressure
    /// against the external API, not a correctness requirement.
    pub inter_query_delay_ms: u64,
    pub request_timeout_secs: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            query_count: 3,
            inter_query_delay_ms: 500,
            request_timeout_secs: 30,
        }
    }
}
