//! Analysis pipeline orchestration

mod analyzer;
mod record;

pub use analyzer::{AnalysisError, AnalysisReport, CustomerAnalyzer};
pub use record::{hash_identity, ClassifiedRecord};
