pub mod aggregator;
pub mod analyzer;
pub mod citation;
pub mod engine;
pub mod http;
pub mod recommendation;

pub use analyzer::PlatformAnalyzer;
pub use citation::{CitationChecker, CitationSource, PerplexitySource, WebSearchSource};
pub use engine::VisibilityEngine;
