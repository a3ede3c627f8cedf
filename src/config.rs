//! Configuration management for winback
//!
//! This module provides a configuration system that loads settings from
//! environment variables with sensible defaults. Configuration covers the
//! financial model parameters, insight-engine selection, and runtime options.
//!
//! # Environment Variables
//!
//! - `WINBACK_LIFETIME_MONTHS`: Expected customer lifetime in months - default: "9"
//! - `WINBACK_SUCCESS_RATE`: Campaign success rate percentage - default: "5"
//! - `WINBACK_INSIGHT_ENGINE`: Insight engine (deterministic|delegated) - default: "deterministic"
//! - `WINBACK_INSIGHT_MODEL`: Model for the delegated engine - default: "gemini-1.5-flash"
//! - `WINBACK_INSIGHT_TIMEOUT_SECS`: Delegated request timeout - default: "30"
//! - `WINBACK_LOG_LEVEL`: Logging level - default: "info"
//! - `GEMINI_API_KEY`: Credential for the delegated engine - no default
//!
//! The credential is held only for the session and never appears in logs,
//! serialized output, or any artifact.
//!
//! # Example
//!
//! ```no_run
//! use winback::AnalysisConfig;
//!
//! let config = AnalysisConfig::default();
//! config.validate().expect("Invalid configuration");
//! ```

use crate::insight::EngineKind;
use crate::waterfall::{
    FinancialAssumptions, DEFAULT_LIFETIME_MONTHS, DEFAULT_SUCCESS_RATE_PCT,
};
use std::env;
use std::fmt;
use thiserror::Error;

/// Default values for configuration
const DEFAULT_MODEL: &str = "gemini-1.5-flash";
const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Design ranges for the financial model parameters
pub const LIFETIME_MONTHS_RANGE: std::ops::RangeInclusive<u32> = 3..=36;
pub const SUCCESS_RATE_RANGE: std::ops::RangeInclusive<u32> = 1..=50;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration validation failed
    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),

    /// Delegated engine selected without a credential
    #[error("Delegated insight engine requires an API key. Set GEMINI_API_KEY or pass --api-key")]
    MissingCredential,
}

/// Main configuration structure for winback
///
/// Constructed via `Default::default()`, which loads from environment
/// variables with fallback defaults. CLI flags override individual fields
/// after construction.
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    /// Expected customer lifetime in months (design range 3-36)
    pub lifetime_months: u32,

    /// Campaign success rate percentage (design range 1-50)
    pub success_rate_pct: u32,

    /// Insight engine selection
    pub engine: EngineKind,

    /// Model name for the delegated engine
    pub model: String,

    /// Delegated request timeout in seconds
    pub request_timeout_secs: u64,

    /// Session credential for the delegated engine; never logged
    pub api_key: Option<String>,

    /// Logging level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Default for AnalysisConfig {
    /// Creates a new configuration from environment variables with defaults.
    ///
    /// Unparseable numeric values fall back to their defaults rather than
    /// failing; `validate()` catches out-of-range values afterwards.
    fn default() -> Self {
        let lifetime_months = env::var("WINBACK_LIFETIME_MONTHS")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(DEFAULT_LIFETIME_MONTHS);

        let success_rate_pct = env::var("WINBACK_SUCCESS_RATE")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(DEFAULT_SUCCESS_RATE_PCT);

        let engine = env::var("WINBACK_INSIGHT_ENGINE")
            .ok()
            .and_then(|s| match s.to_lowercase().as_str() {
                "deterministic" => Some(EngineKind::Deterministic),
                "delegated" => Some(EngineKind::Delegated),
                _ => None,
            })
            .unwrap_or(EngineKind::Deterministic);

        let model = env::var("WINBACK_INSIGHT_MODEL")
            .ok()
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let request_timeout_secs = env::var("WINBACK_INSIGHT_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS);

        let api_key = env::var("GEMINI_API_KEY").ok().filter(|k| !k.is_empty());

        let log_level = env::var("WINBACK_LOG_LEVEL")
            .unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string())
            .to_lowercase();

        Self {
            lifetime_months,
            success_rate_pct,
            engine,
            model,
            request_timeout_secs,
            api_key,
            log_level,
        }
    }
}

impl AnalysisConfig {
    /// Validates the configuration.
    ///
    /// Checks that the financial parameters sit inside their design ranges,
    /// the timeout is reasonable, the log level is valid, and the delegated
    /// engine has a credential.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if any validation fails
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !LIFETIME_MONTHS_RANGE.contains(&self.lifetime_months) {
            return Err(ConfigError::ValidationFailed(format!(
                "Lifetime months must be between {} and {}, got {}",
                LIFETIME_MONTHS_RANGE.start(),
                LIFETIME_MONTHS_RANGE.end(),
                self.lifetime_months
            )));
        }

        if !SUCCESS_RATE_RANGE.contains(&self.success_rate_pct) {
            return Err(ConfigError::ValidationFailed(format!(
                "Success rate must be between {}% and {}%, got {}%",
                SUCCESS_RATE_RANGE.start(),
                SUCCESS_RATE_RANGE.end(),
                self.success_rate_pct
            )));
        }

        if self.request_timeout_secs == 0 {
            return Err(ConfigError::ValidationFailed(
                "Request timeout must be at least 1 second".to_string(),
            ));
        }
        if self.request_timeout_secs > 600 {
            return Err(ConfigError::ValidationFailed(
                "Request timeout cannot exceed 10 minutes".to_string(),
            ));
        }

        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(ConfigError::ValidationFailed(format!(
                    "Invalid log level: {}. Valid options: trace, debug, info, warn, error",
                    self.log_level
                )))
            }
        }

        if self.engine == EngineKind::Delegated && self.api_key.is_none() {
            return Err(ConfigError::MissingCredential);
        }

        Ok(())
    }

    /// Financial assumptions wired into the waterfall calculator
    pub fn assumptions(&self) -> FinancialAssumptions {
        FinancialAssumptions {
            lifetime_months: self.lifetime_months,
            success_rate_pct: self.success_rate_pct,
        }
    }

    /// Converts configuration to a display map for output formatting.
    ///
    /// The credential is reported only as present or absent.
    pub fn to_display_map(&self) -> std::collections::HashMap<String, String> {
        let mut map = std::collections::HashMap::new();

        map.insert(
            "lifetime_months".to_string(),
            self.lifetime_months.to_string(),
        );
        map.insert(
            "success_rate_pct".to_string(),
            self.success_rate_pct.to_string(),
        );
        map.insert("engine".to_string(), self.engine.to_string());
        map.insert("model".to_string(), self.model.clone());
        map.insert(
            "request_timeout_secs".to_string(),
            self.request_timeout_secs.to_string(),
        );
        map.insert(
            "api_key".to_string(),
            if self.api_key.is_some() { "set" } else { "unset" }.to_string(),
        );
        map.insert("log_level".to_string(), self.log_level.clone());

        map
    }
}

impl fmt::Display for AnalysisConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Winback Configuration:")?;
        writeln!(f, "  Lifetime Months: {}", self.lifetime_months)?;
        writeln!(f, "  Success Rate: {}%", self.success_rate_pct)?;
        writeln!(f, "  Insight Engine: {}", self.engine)?;
        writeln!(f, "  Model: {}", self.model)?;
        writeln!(f, "  Request Timeout: {}s", self.request_timeout_secs)?;
        writeln!(
            f,
            "  API Key: {}",
            if self.api_key.is_some() { "set" } else { "unset" }
        )?;
        writeln!(f, "  Log Level: {}", self.log_level)?;
        Ok(())
    }
}
