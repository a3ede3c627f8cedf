//! PII-safe artifact rendering
//!
//! Three artifacts, all rendered as plain strings: the PII-safe CSV, the
//! deployment strategy document, and the audit receipt. Rendering is pure;
//! callers pass the generation timestamp, so the same inputs always produce
//! byte-identical output.

mod pii_csv;
mod receipt;
mod strategy;

pub use pii_csv::{render_pii_safe_csv, PII_EXPORT_HEADER};
pub use receipt::{receipt_id, render_receipt};
pub use strategy::render_strategy_document;

/// File name for the PII-safe CSV artifact
pub const PII_EXPORT_FILENAME: &str = "pii-safe-recovery-export.csv";

/// File name for the deployment strategy artifact
pub const STRATEGY_FILENAME: &str = "deployment-strategy.txt";

/// File name for the audit receipt artifact
pub const RECEIPT_FILENAME: &str = "audit-receipt.txt";
