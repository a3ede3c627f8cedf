//! The fixed signal taxonomy: categories, plays, and classification rules
//!
//! The cascade is modeled as an explicit ordered list so the priority order is
//! inspectable and testable on its own. Reordering entries changes
//! classification results; the order is a product decision, not an
//! implementation detail.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

/// Closed set of business-risk categories for customer feedback
///
/// Declaration order is the taxonomy order used for tie-breaking in
/// aggregates; keep it aligned with the cascade in [`signal_rules`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SignalCategory {
    BillingComplaint,
    ServiceFriction,
    TechnicalIssue,
    LowEngagement,
    CompetitiveThreat,
    FeatureGap,
    GeneralRisk,
    Unknown,
}

impl SignalCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            SignalCategory::BillingComplaint => "BILLING_COMPLAINT",
            SignalCategory::ServiceFriction => "SERVICE_FRICTION",
            SignalCategory::TechnicalIssue => "TECHNICAL_ISSUE",
            SignalCategory::LowEngagement => "LOW_ENGAGEMENT",
            SignalCategory::CompetitiveThreat => "COMPETITIVE_THREAT",
            SignalCategory::FeatureGap => "FEATURE_GAP",
            SignalCategory::GeneralRisk => "GENERAL_RISK",
            SignalCategory::Unknown => "UNKNOWN",
        }
    }

    /// Critical categories add a severity bonus during risk scoring.
    pub fn is_critical(&self) -> bool {
        matches!(
            self,
            SignalCategory::BillingComplaint
                | SignalCategory::ServiceFriction
                | SignalCategory::TechnicalIssue
        )
    }
}

impl fmt::Display for SignalCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Recommended intervention paired with a signal category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Play {
    #[serde(rename = "WINBACK_20PCT_OFFER")]
    Winback20PctOffer,
    #[serde(rename = "PRIORITY_SUPPORT_NUDGE")]
    PrioritySupportNudge,
    #[serde(rename = "ENGINEERING_ESCALATION")]
    EngineeringEscalation,
    #[serde(rename = "ONBOARDING_REFRESH")]
    OnboardingRefresh,
    #[serde(rename = "RETENTION_CALL")]
    RetentionCall,
    #[serde(rename = "ROADMAP_PREVIEW")]
    RoadmapPreview,
    #[serde(rename = "HEALTH_CHECK_EMAIL")]
    HealthCheckEmail,
}

impl Play {
    pub fn as_str(&self) -> &'static str {
        match self {
            Play::Winback20PctOffer => "WINBACK_20PCT_OFFER",
            Play::PrioritySupportNudge => "PRIORITY_SUPPORT_NUDGE",
            Play::EngineeringEscalation => "ENGINEERING_ESCALATION",
            Play::OnboardingRefresh => "ONBOARDING_REFRESH",
            Play::RetentionCall => "RETENTION_CALL",
            Play::RoadmapPreview => "ROADMAP_PREVIEW",
            Play::HealthCheckEmail => "HEALTH_CHECK_EMAIL",
        }
    }
}

impl fmt::Display for Play {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry in the ordered classification cascade
#[derive(Debug)]
pub struct SignalRule {
    pub category: SignalCategory,
    pub play: Play,
    /// Applied to the lower-cased feedback text
    pub pattern: Regex,
}

/// The classification cascade, highest priority first.
///
/// `GENERAL_RISK` and `UNKNOWN` are not listed; they are the classifier's
/// fallbacks for unmatched and empty text respectively.
pub fn signal_rules() -> &'static [SignalRule] {
    static RULES: OnceLock<Vec<SignalRule>> = OnceLock::new();
    RULES.get_or_init(|| {
        vec![
            rule(
                SignalCategory::BillingComplaint,
                Play::Winback20PctOffer,
                r"price|cost|expensive|billing|payment|charge|refund",
            ),
            rule(
                SignalCategory::ServiceFriction,
                Play::PrioritySupportNudge,
                r"support|help|service|response|slow|wait|bug",
            ),
            rule(
                SignalCategory::TechnicalIssue,
                Play::EngineeringEscalation,
                r"error|broken|crash|fail|glitch|not.*work",
            ),
            rule(
                SignalCategory::LowEngagement,
                Play::OnboardingRefresh,
                r"confused|difficult|hard|complex|learning",
            ),
            rule(
                SignalCategory::CompetitiveThreat,
                Play::RetentionCall,
                r"competitor|alternative|switch|better",
            ),
            rule(
                SignalCategory::FeatureGap,
                Play::RoadmapPreview,
                r"feature|function|capability|missing|need",
            ),
        ]
    })
}

fn rule(category: SignalCategory, play: Play, pattern: &str) -> SignalRule {
    SignalRule {
        category,
        play,
        pattern: Regex::new(pattern).expect("valid regex"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cascade_order_is_fixed() {
        let categories: Vec<SignalCategory> =
            signal_rules().iter().map(|r| r.category).collect();

        assert_eq!(
            categories,
            vec![
                SignalCategory::BillingComplaint,
                SignalCategory::ServiceFriction,
                SignalCategory::TechnicalIssue,
                SignalCategory::LowEngagement,
                SignalCategory::CompetitiveThreat,
                SignalCategory::FeatureGap,
            ]
        );
    }

    #[test]
    fn test_each_rule_pairs_one_play() {
        for rule in signal_rules() {
            match rule.category {
                SignalCategory::BillingComplaint => {
                    assert_eq!(rule.play, Play::Winback20PctOffer)
                }
                SignalCategory::ServiceFriction => {
                    assert_eq!(rule.play, Play::PrioritySupportNudge)
                }
                SignalCategory::TechnicalIssue => {
                    assert_eq!(rule.play, Play::EngineeringEscalation)
                }
                SignalCategory::LowEngagement => assert_eq!(rule.play, Play::OnboardingRefresh),
                SignalCategory::CompetitiveThreat => assert_eq!(rule.play, Play::RetentionCall),
                SignalCategory::FeatureGap => assert_eq!(rule.play, Play::RoadmapPreview),
                other => panic!("unexpected category in cascade: {other}"),
            }
        }
    }

    #[test]
    fn test_critical_categories() {
        assert!(SignalCategory::BillingComplaint.is_critical());
        assert!(SignalCategory::ServiceFriction.is_critical());
        assert!(SignalCategory::TechnicalIssue.is_critical());
        assert!(!SignalCategory::LowEngagement.is_critical());
        assert!(!SignalCategory::GeneralRisk.is_critical());
        assert!(!SignalCategory::Unknown.is_critical());
    }

    #[test]
    fn test_taxonomy_order_for_tie_breaking() {
        assert!(SignalCategory::BillingComplaint < SignalCategory::ServiceFriction);
        assert!(SignalCategory::FeatureGap < SignalCategory::GeneralRisk);
        assert!(SignalCategory::GeneralRisk < SignalCategory::Unknown);
    }

    #[test]
    fn test_serde_names_match_wire_format() {
        let json = serde_json::to_string(&SignalCategory::BillingComplaint).unwrap();
        assert_eq!(json, "\"BILLING_COMPLAINT\"");

        let json = serde_json::to_string(&Play::Winback20PctOffer).unwrap();
        assert_eq!(json, "\"WINBACK_20PCT_OFFER\"");
    }
}
