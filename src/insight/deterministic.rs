//! Deterministic template insight engine
//!
//! Fills a fixed narrative template from waterfall aggregates. Runs offline,
//! costs nothing, and always produces the same report for the same input.

use crate::insight::engine::{GenerationError, InsightEngine};
use crate::insight::types::InsightReport;
use crate::util::{format_amount, format_grouped};
use crate::waterfall::WaterfallResult;
use async_trait::async_trait;

/// Label stamped into reports produced by [`DeterministicEngine`]
pub const DETERMINISTIC_ENGINE_LABEL: &str = "Deterministic Template";

/// Template-based engine requiring no network access
#[derive(Debug, Default)]
pub struct DeterministicEngine;

impl DeterministicEngine {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl InsightEngine for DeterministicEngine {
    async fn generate(
        &self,
        waterfall: &WaterfallResult,
    ) -> Result<InsightReport, GenerationError> {
        let top_category = waterfall
            .signal
            .categories
            .first()
            .ok_or(GenerationError::EmptyAggregates)?;

        let universe = &waterfall.universe;
        let signal = &waterfall.signal;
        let total_recovery = waterfall.equity.total_recoverable;

        let executive_summary = format!(
            "Analysis of {} customers reveals {} at-risk accounts and {} churned customers. \
             At a {}% success rate, projected recovery value is ${}.",
            universe.total_rows,
            signal.lead_count,
            signal.lag_count,
            waterfall.assumptions.success_rate_pct,
            format_grouped(total_recovery),
        );

        let recommended_play = top_category
            .play
            .map(|play| play.as_str())
            .unwrap_or("none");

        let key_insights = vec![
            format!(
                "Primary churn driver: {} ({} customers affected)",
                top_category.category, top_category.count
            ),
            format!("Recommended play: {}", recommended_play),
            format!(
                "ARPU: ${}, LTV: ${} ({} months)",
                format_amount(universe.arpu),
                format_amount(universe.ltv),
                waterfall.assumptions.lifetime_months
            ),
            format!(
                "Total addressable recovery: ${}",
                format_grouped(total_recovery)
            ),
        ];

        let strategic_recommendations = vec![
            "Deploy multi-channel win-back campaigns across email, in-app, and paid social"
                .to_string(),
            format!(
                "Focus initial resources on {} segment for highest ROI",
                top_category.category
            ),
            "Implement preventive retention measures for at-risk segment".to_string(),
            "Monitor campaign performance weekly with A/B testing".to_string(),
        ];

        Ok(InsightReport {
            engine: DETERMINISTIC_ENGINE_LABEL.to_string(),
            executive_summary,
            key_insights,
            strategic_recommendations,
        })
    }

    fn name(&self) -> &str {
        DETERMINISTIC_ENGINE_LABEL
    }
}
