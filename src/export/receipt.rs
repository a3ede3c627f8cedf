//! Audit receipt rendering

use crate::util::{format_amount, format_grouped};
use crate::waterfall::WaterfallResult;
use chrono::{DateTime, Utc};

/// Builds the receipt identifier from the generation timestamp.
pub fn receipt_id(generated_at: DateTime<Utc>) -> String {
    format!("COS-{}", generated_at.timestamp_millis())
}

/// Renders the plain-text audit receipt.
pub fn render_receipt(waterfall: &WaterfallResult, generated_at: DateTime<Utc>) -> String {
    let heavy = "═".repeat(66);
    let rule = "─".repeat(67);

    let signal_breakdown = waterfall
        .signal
        .categories
        .iter()
        .map(|aggregate| format!("{}: {} customers", aggregate.category, aggregate.count))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "
{heavy}
                         AUDIT RECEIPT
{heavy}

Receipt ID: {id}
Timestamp: {generated}

SUMMARY METRICS
{rule}
Total Customers Analyzed: {total_rows}
Active Revenue Threats: {lead_count}
Churned Customers: {lag_count}

Total MRR Exposure: ${total_mrr}
Recoverable Equity: ${total_recovery}

SIGNAL BREAKDOWN
{rule}
{signal_breakdown}

COMPLIANCE
{rule}
✓ SHA-256 email hashing
✓ Client-side processing only
✓ PII-safe export generated

{heavy}
",
        id = receipt_id(generated_at),
        generated = generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
        total_rows = waterfall.universe.total_rows,
        lead_count = waterfall.signal.lead_count,
        lag_count = waterfall.signal.lag_count,
        total_mrr = format_amount(waterfall.universe.total_mrr),
        total_recovery = format_grouped(waterfall.equity.total_recoverable),
    )
}
