//! First-match-wins classification of free-text feedback

use crate::signal::taxonomy::{signal_rules, Play, SignalCategory};

/// Outcome of classifying one feedback cell
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub category: SignalCategory,
    /// Absent only for `UNKNOWN` (no feedback to act on)
    pub play: Option<Play>,
    /// Up to the first three pattern matches found in the text
    pub matched_keywords: Vec<String>,
}

/// Classifies a feedback cell into a signal category.
///
/// The cascade in [`signal_rules`] is evaluated top to bottom against the
/// lower-cased text and the first matching rule wins. Empty text maps to
/// `UNKNOWN` with no play; non-empty text matching no rule maps to
/// `GENERAL_RISK` with the default health-check play. Classification never
/// fails: however little the text reveals, a category comes back.
pub fn classify_feedback(text: &str) -> Classification {
    if text.is_empty() {
        return Classification {
            category: SignalCategory::Unknown,
            play: None,
            matched_keywords: Vec::new(),
        };
    }

    let lowered = text.to_lowercase();
    for rule in signal_rules() {
        if rule.pattern.is_match(&lowered) {
            let matched_keywords = rule
                .pattern
                .find_iter(&lowered)
                .take(3)
                .map(|m| m.as_str().to_string())
                .collect();

            return Classification {
                category: rule.category,
                play: Some(rule.play),
                matched_keywords,
            };
        }
    }

    Classification {
        category: SignalCategory::GeneralRisk,
        play: Some(Play::HealthCheckEmail),
        matched_keywords: Vec::new(),
    }
}
