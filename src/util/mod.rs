//! Utility modules for winback
//!
//! Structured logging setup plus the money-formatting helpers shared by the
//! insight engines and artifact writers.

pub mod logging;
mod money;

// Re-export commonly used items
pub use logging::{init_default, init_from_env, init_logging, LoggingConfig};
pub use money::{format_amount, format_grouped};
