// src/lib.rs

pub mod config;
pub mod domain;
pub mod error;
pub mod extractor;
pub mod service;

pub use config::{AnalysisOptions, EngineConfig};
pub use domain::models::{
    ContentInput, Platform, PlatformScore, Recommendation, Score, VisibilityReport,
};
pub use error::{EngineError, Result};
pub use service::VisibilityEngine;
