//! winback - client-side churn recovery analysis for customer CSV exports
//!
//! This library ingests a raw customer CSV, classifies churn signals from
//! free-text feedback, and rolls the results up into a four-stage financial
//! waterfall (universe, signal, arbitrage, equity). Everything runs locally;
//! the only optional network call is the delegated insight engine, and it
//! receives aggregate statistics only.
//!
//! # Core Concepts
//!
//! - **Signal Classification**: An ordered keyword cascade maps feedback text
//!   to one of six signal categories, each with a recommended win-back play
//! - **Waterfall**: The staged rollup from total customer universe down to
//!   recoverable equity under configurable success-rate assumptions
//! - **Insight Engines**: Pluggable narrative generators (a deterministic
//!   template and a delegated model-backed engine) behind one trait
//!
//! # Example Usage
//!
//! ```ignore
//! use winback::{CustomerAnalyzer, FinancialAssumptions};
//! use std::path::Path;
//!
//! async fn analyze(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
//!     let analyzer = CustomerAnalyzer::new();
//!     let report = analyzer
//!         .analyze_file(path, FinancialAssumptions::default())
//!         .await?;
//!
//!     println!("Customers: {}", report.waterfall.universe.total_rows);
//!     println!(
//!         "Recoverable: ${:.2}",
//!         report.waterfall.equity.total_recoverable
//!     );
//!
//!     Ok(())
//! }
//! ```
//!
//! # Project Structure
//!
//! - [`ingest`]: CSV parsing and header-based schema detection
//! - [`signal`]: Signal taxonomy, keyword cascade, risk scoring
//! - [`pipeline`]: The end-to-end analyzer producing [`AnalysisReport`]
//! - [`waterfall`]: Four-stage financial rollup
//! - [`insight`]: Deterministic and delegated insight engines
//! - [`export`]: PII-safe CSV, strategy document, and audit receipt renderers
//!
//! # Features
//!
//! - Fault-tolerant CSV ingestion with quoted-field support
//! - Heuristic schema detection over arbitrary export headers
//! - Deterministic risk scoring and segmentation
//! - SHA-256 identity hashing for every exported artifact
//! - Aggregate-only prompts for the delegated insight engine

// Public modules
pub mod cli;
pub mod config;
pub mod export;
pub mod ingest;
pub mod insight;
pub mod pipeline;
pub mod progress;
pub mod signal;
pub mod util;
pub mod waterfall;

// Re-export key types for convenient access
pub use config::{AnalysisConfig, ConfigError};
pub use ingest::{parse_csv, DetectedSchema, FieldSlot, ParseError, ParsedCsv, SlotMapping};
pub use insight::{
    DelegatedEngine, DeterministicEngine, EngineKind, GenerationError, InsightClient,
    InsightEngine, InsightReport,
};
pub use pipeline::{hash_identity, AnalysisError, AnalysisReport, ClassifiedRecord, CustomerAnalyzer};
pub use signal::{classify_feedback, Play, SegmentKey, SignalCategory};
pub use util::{init_default, init_from_env, init_logging, LoggingConfig};
pub use waterfall::{compute_waterfall, FinancialAssumptions, WaterfallResult};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
