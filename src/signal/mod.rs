//! Feedback classification, risk scoring, and segmentation

mod classifier;
mod risk;
mod taxonomy;

pub use classifier::{classify_feedback, Classification};
pub use risk::{
    inactivity_bucket, is_at_risk, is_churned_value, risk_score, segment_for, SegmentKey,
};
pub use taxonomy::{signal_rules, Play, SignalCategory, SignalRule};
