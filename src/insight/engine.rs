//! Insight engine trait and error types

use crate::insight::response::ResponseError;
use crate::insight::types::InsightReport;
use crate::waterfall::WaterfallResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Which insight engine to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineKind {
    /// Offline template engine, fully reproducible
    Deterministic,
    /// External text-generation service fed aggregate statistics
    Delegated,
}

impl EngineKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EngineKind::Deterministic => "deterministic",
            EngineKind::Delegated => "delegated",
        }
    }
}

impl fmt::Display for EngineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Errors that can occur while generating an insight report
#[derive(Debug, Clone, Error)]
pub enum GenerationError {
    /// The external request failed
    #[error("Insight request failed: {message}")]
    RequestFailed { message: String },

    /// Credential missing or rejected by the service
    #[error("Insight authentication failed: {message}")]
    Authentication { message: String },

    /// The request did not complete within the configured deadline
    #[error("Insight request timed out after {seconds} seconds")]
    Timeout { seconds: u64 },

    /// The service reply could not be parsed into a report
    #[error(transparent)]
    MalformedResponse(#[from] ResponseError),

    /// The waterfall contains no signal categories to reason about
    #[error("No signal categories to analyze")]
    EmptyAggregates,
}

/// Strategy interface over the insight engines.
///
/// Both engines consume the same waterfall snapshot and produce the same
/// report shape. Callers must not fall back from one engine to another on
/// failure; a failed delegated run surfaces as an error.
#[async_trait]
pub trait InsightEngine: Send + Sync {
    /// Generates a narrative report from a completed waterfall.
    async fn generate(&self, waterfall: &WaterfallResult)
        -> Result<InsightReport, GenerationError>;

    /// Engine label stamped into produced reports
    fn name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_kind_display() {
        assert_eq!(EngineKind::Deterministic.to_string(), "deterministic");
        assert_eq!(EngineKind::Delegated.to_string(), "delegated");
    }

    #[test]
    fn test_engine_kind_serde_roundtrip() {
        let json = serde_json::to_string(&EngineKind::Delegated).unwrap();
        assert_eq!(json, "\"delegated\"");
        let parsed: EngineKind = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, EngineKind::Delegated);
    }

    #[test]
    fn test_generation_error_display() {
        let err = GenerationError::Timeout { seconds: 30 };
        assert_eq!(
            err.to_string(),
            "Insight request timed out after 30 seconds"
        );

        let err = GenerationError::RequestFailed {
            message: "connection refused".to_string(),
        };
        assert!(err.to_string().contains("connection refused"));

        let err = GenerationError::EmptyAggregates;
        assert!(err.to_string().contains("No signal categories"));
    }
}
