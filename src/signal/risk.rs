//! Churn-risk scoring and segment assignment

use crate::signal::taxonomy::SignalCategory;
use serde::Serialize;
use std::fmt;

/// Mutually exclusive customer segments, highest precedence first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SegmentKey {
    LagRecovery,
    ArCriticalHigh,
    ArMedium,
    ArLow,
    Healthy,
}

impl SegmentKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SegmentKey::LagRecovery => "LAG_RECOVERY",
            SegmentKey::ArCriticalHigh => "AR_CRITICAL_HIGH",
            SegmentKey::ArMedium => "AR_MEDIUM",
            SegmentKey::ArLow => "AR_LOW",
            SegmentKey::Healthy => "HEALTHY",
        }
    }
}

impl fmt::Display for SegmentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Churn-status cell values that mark a customer as churned
const CHURNED_VALUES: [&str; 7] = ["cancelled", "yes", "true", "1", "churned", "inactive", "left"];

/// Feedback longer than this (after trimming) flags a customer as at risk
const AT_RISK_FEEDBACK_CHARS: usize = 10;

/// True when a churn-status cell marks the customer as churned.
pub fn is_churned_value(cell: &str) -> bool {
    let normalized = cell.to_lowercase();
    CHURNED_VALUES.contains(&normalized.trim())
}

/// True when feedback text is substantial enough to flag the customer.
pub fn is_at_risk(feedback: &str) -> bool {
    feedback.trim().chars().count() > AT_RISK_FEEDBACK_CHARS
}

/// Computes the bounded churn-risk score in [0, 100].
///
/// Churned customers score exactly 100 and nothing else can reach it.
/// Otherwise the score starts at zero, adds 40 when feedback is present,
/// adds 30 more for a critical category, and is capped at 95.
pub fn risk_score(churned: bool, has_feedback: bool, category: SignalCategory) -> u8 {
    if churned {
        return 100;
    }

    let mut score: u8 = 0;
    if has_feedback {
        score += 40;
    }
    if category.is_critical() {
        score += 30;
    }

    score.min(95)
}

/// Assigns the segment key for a classified customer.
///
/// Precedence is fixed: churn always wins, then descending risk-score
/// thresholds among at-risk customers, then healthy.
pub fn segment_for(churned: bool, at_risk: bool, score: u8) -> SegmentKey {
    if churned {
        SegmentKey::LagRecovery
    } else if at_risk && score >= 70 {
        SegmentKey::ArCriticalHigh
    } else if at_risk && score >= 40 {
        SegmentKey::ArMedium
    } else if at_risk {
        SegmentKey::ArLow
    } else {
        SegmentKey::Healthy
    }
}

/// Inactivity bucket label carried into the export
pub fn inactivity_bucket(churned: bool) -> &'static str {
    if churned {
        "60-90"
    } else {
        "0-30"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use yare::parameterized;

    #[parameterized(
        cancelled = { "cancelled", true },
        yes = { "yes", true },
        true_str = { "true", true },
        one = { "1", true },
        churned = { "churned", true },
        inactive = { "inactive", true },
        left = { "left", true },
        upper_case = { "CANCELLED", true },
        padded = { "  yes  ", true },
        active = { "active", false },
        no = { "no", false },
        empty = { "", false },
        zero = { "0", false },
    )]
    fn test_churn_value_parsing(cell: &str, expected: bool) {
        assert_eq!(is_churned_value(cell), expected);
    }

    #[parameterized(
        churned_plain = { true, false, SignalCategory::Unknown, 100 },
        churned_with_feedback = { true, true, SignalCategory::BillingComplaint, 100 },
        healthy = { false, false, SignalCategory::Unknown, 0 },
        feedback_only = { false, true, SignalCategory::GeneralRisk, 40 },
        critical_only = { false, false, SignalCategory::TechnicalIssue, 30 },
        feedback_and_critical = { false, true, SignalCategory::BillingComplaint, 70 },
        feedback_non_critical = { false, true, SignalCategory::FeatureGap, 40 },
    )]
    fn test_risk_score(churned: bool, has_feedback: bool, category: SignalCategory, expected: u8) {
        assert_eq!(risk_score(churned, has_feedback, category), expected);
    }

    #[test]
    fn test_score_100_reserved_for_churn() {
        for has_feedback in [false, true] {
            for category in [
                SignalCategory::BillingComplaint,
                SignalCategory::ServiceFriction,
                SignalCategory::TechnicalIssue,
                SignalCategory::GeneralRisk,
            ] {
                let score = risk_score(false, has_feedback, category);
                assert!(score <= 95, "non-churned score {score} exceeds cap");
            }
        }
        assert_eq!(risk_score(true, false, SignalCategory::Unknown), 100);
    }

    #[parameterized(
        churned_wins = { true, true, 100, SegmentKey::LagRecovery },
        churned_without_feedback = { true, false, 100, SegmentKey::LagRecovery },
        critical_high = { false, true, 70, SegmentKey::ArCriticalHigh },
        medium = { false, true, 40, SegmentKey::ArMedium },
        low = { false, true, 39, SegmentKey::ArLow },
        healthy = { false, false, 0, SegmentKey::Healthy },
        score_without_risk_flag = { false, false, 70, SegmentKey::Healthy },
    )]
    fn test_segment_precedence(churned: bool, at_risk: bool, score: u8, expected: SegmentKey) {
        assert_eq!(segment_for(churned, at_risk, score), expected);
    }

    #[test]
    fn test_at_risk_needs_more_than_ten_chars() {
        assert!(!is_at_risk(""));
        assert!(!is_at_risk("short"));
        assert!(!is_at_risk("1234567890"));
        assert!(!is_at_risk("   padded    "));
        assert!(is_at_risk("12345678901"));
        assert!(is_at_risk("billing too expensive"));
    }

    #[test]
    fn test_inactivity_buckets() {
        assert_eq!(inactivity_bucket(true), "60-90");
        assert_eq!(inactivity_bucket(false), "0-30");
    }
}
