//! Per-customer classification result and identity hashing

use crate::signal::{Play, SegmentKey, SignalCategory};
use serde::Serialize;
use sha2::{Digest, Sha256};

/// Per-customer output of the analysis pipeline
///
/// Carries only derived and de-identified values. The raw identity exists
/// solely as the digest produced by [`hash_identity`]; raw feedback is
/// reduced to a category plus matched keywords.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifiedRecord {
    /// SHA-256 hex digest of the normalized identity value
    pub hashed_identity: String,

    pub segment: SegmentKey,

    /// Bounded churn-risk score in [0, 100]
    pub risk_score: u8,

    pub category: SignalCategory,

    /// Recommended intervention; absent for `UNKNOWN`
    pub play: Option<Play>,

    pub inactivity_bucket: &'static str,

    /// Detected account id, or a positional `ACC_{row_index}` fallback
    pub internal_id: String,

    /// Attributed monthly revenue: the parsed cell, or the global average
    /// when the cell is absent or unparseable
    pub revenue: f64,

    pub churned: bool,

    pub at_risk: bool,

    /// Up to three keywords the classifier matched in the feedback
    pub matched_keywords: Vec<String>,
}

/// Hashes an identity value for the PII-safe export.
///
/// The value is trimmed and lower-cased first so case and whitespace
/// variants of one address produce the same digest, keeping downstream
/// joins stable without being reversible.
pub fn hash_identity(raw: &str) -> String {
    let normalized = raw.trim().to_lowercase();
    hex::encode(Sha256::digest(normalized.as_bytes()))
}
