//! Output formatting for multiple formats
//!
//! Formatters for JSON, YAML, and human-readable text. The human renderer
//! summarizes the waterfall and insights for terminals; the serialized forms
//! carry the full report for downstream tooling.

use anyhow::{Context, Result};
use serde::Serialize;

use crate::insight::InsightReport;
use crate::ingest::SlotMapping;
use crate::pipeline::AnalysisReport;
use crate::signal::{signal_rules, Play, SignalCategory};
use crate::util::{format_amount, format_grouped};

/// Output format enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// JSON format (machine-readable)
    Json,
    /// YAML format (human-friendly, version-control friendly)
    Yaml,
    /// Human-readable formatted text
    Human,
}

/// One row of the taxonomy listing printed by `plays`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayListing {
    pub category: &'static str,
    pub play: Option<&'static str>,
    /// Keyword matcher; absent for the fallback and empty-feedback rows
    pub keywords: Option<&'static str>,
}

/// Builds the complete taxonomy listing: the keyword cascade, then the
/// general-risk fallback, then the empty-feedback row.
pub fn play_listings() -> Vec<PlayListing> {
    let mut listings: Vec<PlayListing> = signal_rules()
        .iter()
        .map(|rule| PlayListing {
            category: rule.category.as_str(),
            play: Some(rule.play.as_str()),
            keywords: Some(rule.pattern.as_str()),
        })
        .collect();

    listings.push(PlayListing {
        category: SignalCategory::GeneralRisk.as_str(),
        play: Some(Play::HealthCheckEmail.as_str()),
        keywords: None,
    });
    listings.push(PlayListing {
        category: SignalCategory::Unknown.as_str(),
        play: None,
        keywords: None,
    });

    listings
}

/// Output formatter for analysis results
pub struct OutputFormatter {
    format: OutputFormat,
}

impl OutputFormatter {
    /// Creates a new output formatter with the specified format
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Formats a full analysis report, with insights when they were generated
    pub fn format_analysis(
        &self,
        report: &AnalysisReport,
        insights: Option<&InsightReport>,
    ) -> Result<String> {
        match self.format {
            OutputFormat::Json => self.format_analysis_json(report, insights),
            OutputFormat::Yaml => self.format_analysis_yaml(report, insights),
            OutputFormat::Human => Ok(self.format_analysis_human(report, insights)),
        }
    }

    /// Formats the schema preview
    pub fn format_schema(&self, mappings: &[SlotMapping]) -> Result<String> {
        match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(mappings)
                .context("Failed to serialize schema preview to JSON"),
            OutputFormat::Yaml => serde_yaml::to_string(mappings)
                .context("Failed to serialize schema preview to YAML"),
            OutputFormat::Human => Ok(self.format_schema_human(mappings)),
        }
    }

    /// Formats the taxonomy listing
    pub fn format_plays(&self, listings: &[PlayListing]) -> Result<String> {
        match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(listings)
                .context("Failed to serialize play listing to JSON"),
            OutputFormat::Yaml => serde_yaml::to_string(listings)
                .context("Failed to serialize play listing to YAML"),
            OutputFormat::Human => Ok(self.format_plays_human(listings)),
        }
    }

    // JSON formatting methods

    fn format_analysis_json(
        &self,
        report: &AnalysisReport,
        insights: Option<&InsightReport>,
    ) -> Result<String> {
        let output = serde_json::json!({
            "report": report,
            "insights": insights,
        });

        serde_json::to_string_pretty(&output)
            .context("Failed to serialize analysis report to JSON")
    }

    // YAML formatting methods

    fn format_analysis_yaml(
        &self,
        report: &AnalysisReport,
        insights: Option<&InsightReport>,
    ) -> Result<String> {
        let output = serde_json::json!({
            "report": report,
            "insights": insights,
        });

        serde_yaml::to_string(&output).context("Failed to serialize analysis report to YAML")
    }

    // Human-readable formatting methods

    fn format_analysis_human(
        &self,
        report: &AnalysisReport,
        insights: Option<&InsightReport>,
    ) -> String {
        let mut output = String::new();
        let waterfall = &report.waterfall;
        let lifetime = waterfall.assumptions.lifetime_months;
        let success = waterfall.assumptions.success_rate_pct;

        output.push_str("\u{2713} Churn Recovery Analysis\n");
        output.push_str(&"\u{2501}".repeat(42));
        output.push_str("\n\n");

        output.push_str("Universe:\n");
        output.push_str(&format!(
            "\u{251C}\u{2500} Customers:      {}\n",
            waterfall.universe.total_rows
        ));
        output.push_str(&format!(
            "\u{251C}\u{2500} Total MRR:      ${}\n",
            format_amount(waterfall.universe.total_mrr)
        ));
        output.push_str(&format!(
            "\u{251C}\u{2500} ARPU:           ${}\n",
            format_amount(waterfall.universe.arpu)
        ));
        output.push_str(&format!(
            "\u{2514}\u{2500} LTV ({}mo):      ${}\n\n",
            lifetime,
            format_amount(waterfall.universe.ltv)
        ));

        output.push_str("Signal:\n");
        output.push_str(&format!(
            "\u{251C}\u{2500} Churned (LAG):  {}\n",
            waterfall.signal.lag_count
        ));
        output.push_str(&format!(
            "\u{251C}\u{2500} At Risk (LEAD): {}\n",
            waterfall.signal.lead_count
        ));
        output.push_str(&format!(
            "\u{2514}\u{2500} Classified:     {} of {} rows ({} skipped)\n\n",
            report.records_classified, report.rows_read, report.rows_skipped
        ));

        output.push_str("Category Breakdown:\n");
        if waterfall.signal.categories.is_empty() {
            output.push_str("\u{2514}\u{2500} (no flagged customers)\n\n");
        } else {
            let last = waterfall.signal.categories.len() - 1;
            for (i, aggregate) in waterfall.signal.categories.iter().enumerate() {
                let connector = if i == last { "\u{2514}" } else { "\u{251C}" };
                let play = aggregate.play.map(|play| play.as_str()).unwrap_or("none");
                output.push_str(&format!(
                    "{}\u{2500} {}: {} customers ({})\n",
                    connector, aggregate.category, aggregate.count, play
                ));
            }
            output.push('\n');
        }

        output.push_str(&format!("Recovery Model ({}% success):\n", success));
        output.push_str(&format!(
            "\u{251C}\u{2500} LAG Recoveries: {} customers\n",
            waterfall.arbitrage.lag_saved
        ));
        output.push_str(&format!(
            "\u{251C}\u{2500} LEAD Saves:     {} customers\n",
            waterfall.arbitrage.lead_saved
        ));
        output.push_str(&format!(
            "\u{2514}\u{2500} Recoverable:    ${}\n",
            format_grouped(waterfall.equity.total_recoverable)
        ));

        if let Some(insights) = insights {
            output.push_str(&format!("\nInsights ({}):\n", insights.engine));
            output.push_str(&format!("{}\n", insights.executive_summary));

            output.push_str("\nKey Insights:\n");
            for insight in &insights.key_insights {
                output.push_str(&format!("  - {}\n", insight));
            }

            output.push_str("\nStrategic Recommendations:\n");
            for recommendation in &insights.strategic_recommendations {
                output.push_str(&format!("  - {}\n", recommendation));
            }
        }

        output.push_str(&format!("\nProcessed in {}ms\n", report.processing_time_ms));

        output
    }

    fn format_schema_human(&self, mappings: &[SlotMapping]) -> String {
        let mut output = String::new();

        output.push_str("\u{2713} Detected Schema\n");
        output.push_str(&"\u{2501}".repeat(42));
        output.push_str("\n\n");

        let last = mappings.len().saturating_sub(1);
        for (i, mapping) in mappings.iter().enumerate() {
            let connector = if i == last { "\u{2514}" } else { "\u{251C}" };
            let binding = match (&mapping.header, mapping.column) {
                (Some(header), Some(column)) => {
                    format!("\"{}\" (column {})", header, column)
                }
                _ => "(not detected)".to_string(),
            };
            output.push_str(&format!(
                "{}\u{2500} {:<12} {}\n",
                connector, mapping.slot, binding
            ));
        }

        output
    }

    fn format_plays_human(&self, listings: &[PlayListing]) -> String {
        let mut output = String::new();

        output.push_str("\u{2713} Signal Taxonomy\n");
        output.push_str(&"\u{2501}".repeat(42));
        output.push_str("\n\n");

        for (i, listing) in listings.iter().enumerate() {
            output.push_str(&format!("{}. {}\n", i + 1, listing.category));
            output.push_str(&format!(
                "   Play:     {}\n",
                listing.play.unwrap_or("(none)")
            ));
            let keywords = match listing.keywords {
                Some(pattern) => pattern,
                None if listing.play.is_some() => "(fallback for any other feedback)",
                None => "(no feedback text)",
            };
            output.push_str(&format!("   Keywords: {}\n\n", keywords));
        }

        output
    }
}
