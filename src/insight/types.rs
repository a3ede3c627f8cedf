//! Types shared across the insight engines
//!
//! `StatPacket` is the only payload the delegated engine ever transmits.
//! It is built exclusively from waterfall aggregates so that no identity,
//! feedback text, or other row-level value can cross the network boundary.

use crate::util::format_amount;
use crate::waterfall::WaterfallResult;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Narrative report produced by an insight engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightReport {
    /// Label of the engine that produced the report
    pub engine: String,
    /// Two to three sentence summary for leadership
    pub executive_summary: String,
    /// Observations grounded in the aggregate numbers
    pub key_insights: Vec<String>,
    /// Suggested next actions
    pub strategic_recommendations: Vec<String>,
}

/// Aggregate statistics handed to the delegated engine.
///
/// Monetary fields are pre-formatted two-decimal strings so the serialized
/// payload is stable across platforms and never exposes float noise.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatPacket {
    pub total_customers: usize,
    pub arpu: String,
    pub ltv: String,
    pub lifetime_months: u32,
    pub at_risk_count: usize,
    pub churned_count: usize,
    pub success_rate: u32,
    pub category_breakdown: Vec<CategoryStat>,
    pub total_recoverable_equity: String,
}

/// Per-category slice of the stat packet
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryStat {
    pub category: String,
    pub count: usize,
    pub recoverable_equity: String,
}

impl StatPacket {
    /// Builds the packet from a waterfall snapshot. Aggregates only.
    pub fn from_waterfall(waterfall: &WaterfallResult) -> Self {
        Self {
            total_customers: waterfall.universe.total_rows,
            arpu: format_amount(waterfall.universe.arpu),
            ltv: format_amount(waterfall.universe.ltv),
            lifetime_months: waterfall.assumptions.lifetime_months,
            at_risk_count: waterfall.signal.lead_count,
            churned_count: waterfall.signal.lag_count,
            success_rate: waterfall.assumptions.success_rate_pct,
            category_breakdown: waterfall
                .signal
                .categories
                .iter()
                .map(|aggregate| CategoryStat {
                    category: aggregate.category.as_str().to_string(),
                    count: aggregate.count,
                    recoverable_equity: format_amount(aggregate.recoverable_equity),
                })
                .collect(),
            total_recoverable_equity: format_amount(waterfall.equity.total_recoverable),
        }
    }
}

/// Request for the text-generation transport
#[derive(Debug, Clone)]
pub struct TextRequest {
    pub prompt: String,
}

impl TextRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
        }
    }
}

/// Response from the text-generation transport
#[derive(Debug, Clone)]
pub struct TextResponse {
    /// Raw text returned by the service
    pub content: String,
    /// Wall-clock duration of the request
    pub response_time: Duration,
}

impl TextResponse {
    pub fn new(content: impl Into<String>, response_time: Duration) -> Self {
        Self {
            content: content.into(),
            response_time,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::ClassifiedRecord;
    use crate::signal::{Play, SegmentKey, SignalCategory};
    use crate::waterfall::{compute_waterfall, FinancialAssumptions, RevenueBaseline};

    fn record(
        churned: bool,
        at_risk: bool,
        category: SignalCategory,
        revenue: f64,
    ) -> ClassifiedRecord {
        ClassifiedRecord {
            hashed_identity: "0".repeat(64),
            segment: if churned {
                SegmentKey::LagRecovery
            } else {
                SegmentKey::ArMedium
            },
            risk_score: if churned { 100 } else { 70 },
            category,
            play: Some(Play::Winback20PctOffer),
            inactivity_bucket: if churned { "60-90" } else { "0-30" },
            internal_id: "ACC_TEST".to_string(),
            revenue,
            churned,
            at_risk,
            matched_keywords: vec![],
        }
    }

    fn sample_waterfall() -> WaterfallResult {
        let records = vec![
            record(true, false, SignalCategory::BillingComplaint, 120.0),
            record(false, true, SignalCategory::ServiceFriction, 80.0),
        ];
        let baseline = RevenueBaseline {
            rows_read: 2,
            total_mrr: 200.0,
            valid_revenue_count: 2,
        };
        compute_waterfall(&records, baseline, FinancialAssumptions::default())
    }

    #[test]
    fn test_stat_packet_from_waterfall() {
        let packet = StatPacket::from_waterfall(&sample_waterfall());

        assert_eq!(packet.total_customers, 2);
        assert_eq!(packet.arpu, "100.00");
        assert_eq!(packet.ltv, "900.00");
        assert_eq!(packet.lifetime_months, 9);
        assert_eq!(packet.churned_count, 1);
        assert_eq!(packet.at_risk_count, 1);
        assert_eq!(packet.success_rate, 5);
        assert_eq!(packet.category_breakdown.len(), 2);
        assert_eq!(packet.category_breakdown[0].category, "BILLING_COMPLAINT");
    }

    #[test]
    fn test_stat_packet_serializes_camel_case() {
        let packet = StatPacket::from_waterfall(&sample_waterfall());
        let json = serde_json::to_value(&packet).unwrap();

        assert!(json.get("totalCustomers").is_some());
        assert!(json.get("atRiskCount").is_some());
        assert!(json.get("categoryBreakdown").is_some());
        assert!(json.get("totalRecoverableEquity").is_some());
        assert!(json.get("total_customers").is_none());
    }

    #[test]
    fn test_stat_packet_contains_no_row_level_fields() {
        let packet = StatPacket::from_waterfall(&sample_waterfall());
        let json = serde_json::to_string(&packet).unwrap();

        assert!(!json.contains("hashedIdentity"));
        assert!(!json.contains("internalId"));
        assert!(!json.contains("ACC_TEST"));
        assert!(!json.contains("feedback"));
    }

    #[test]
    fn test_insight_report_serde_roundtrip() {
        let report = InsightReport {
            engine: "Deterministic Template".to_string(),
            executive_summary: "Summary.".to_string(),
            key_insights: vec!["one".to_string()],
            strategic_recommendations: vec!["two".to_string()],
        };

        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("executiveSummary"));
        assert!(json.contains("keyInsights"));
        assert!(json.contains("strategicRecommendations"));

        let parsed: InsightReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, report);
    }
}
