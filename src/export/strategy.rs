//! Deployment strategy document rendering

use crate::util::{format_amount, format_grouped};
use crate::waterfall::WaterfallResult;
use chrono::{DateTime, Utc};

/// Renders the plain-text deployment strategy document.
///
/// The caller supplies the generation timestamp, so rendering the same
/// waterfall twice with the same timestamp yields identical bytes.
pub fn render_strategy_document(
    waterfall: &WaterfallResult,
    generated_at: DateTime<Utc>,
) -> String {
    let heavy = "═".repeat(66);
    let light = "─".repeat(66);

    let lifetime = waterfall.assumptions.lifetime_months;
    let success = waterfall.assumptions.success_rate_pct;

    let campaign_table = waterfall
        .signal
        .categories
        .iter()
        .enumerate()
        .map(|(idx, aggregate)| {
            format!(
                "{}. {}\n   \
                 Count: {} customers\n   \
                 Play: {}\n   \
                 Saved ({}%): {} customers\n   \
                 Recovery Value: ${}\n   \
                 Monthly MRR: ${}\n",
                idx + 1,
                aggregate.category,
                aggregate.count,
                aggregate.play.map(|play| play.as_str()).unwrap_or("none"),
                success,
                aggregate.saved_customers,
                format_grouped(aggregate.recoverable_equity),
                format_amount(aggregate.monthly_mrr),
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "
{heavy}
                    DEPLOYMENT STRATEGY DOCUMENT
{heavy}

Generated: {generated}
Lifetime Model: {lifetime} months
Success Rate: {success}%

{light}
WATERFALL ANALYSIS
{light}

Stage 1: THE UNIVERSE
└─ Total Customers: {total_rows}
└─ Total MRR Exposure: ${total_mrr}
└─ ARPU: ${arpu}
└─ LTV ({lifetime}mo): ${ltv}

Stage 2: THE SIGNAL
└─ Active Revenue Threats (LEAD): {lead_count}
└─ Churned Customers (LAG): {lag_count}

Stage 3: THE ARBITRAGE
└─ Success Rate Applied: {success}%
└─ LEAD Saves: {lead_saved} customers
└─ LAG Recoveries: {lag_saved} customers

Stage 4: RECOVERABLE EQUITY
└─ LEAD Recovery Value: ${lead_recoverable}
└─ LAG Recovery Value: ${lag_recoverable}
└─ TOTAL RECOVERY POTENTIAL: ${total_recovery}

{light}
CAMPAIGN STRATEGY TABLE
{light}

{campaign_table}

{light}
DEPLOYMENT VECTORS
{light}

✉️  EMAIL: Personalized win-back sequences
📱 IN-APP: Priority support nudges, feature announcements
📢 PAID SOCIAL: Custom audience retargeting (Facebook/Google)

{light}
PII COMPLIANCE
{light}

✓ All emails hashed (SHA-256)
✓ No plaintext PII in export
✓ 100% local processing
✓ Zero server transmission

{heavy}
",
        generated = generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
        total_rows = waterfall.universe.total_rows,
        total_mrr = format_amount(waterfall.universe.total_mrr),
        arpu = format_amount(waterfall.universe.arpu),
        ltv = format_amount(waterfall.universe.ltv),
        lead_count = waterfall.signal.lead_count,
        lag_count = waterfall.signal.lag_count,
        lead_saved = waterfall.arbitrage.lead_saved,
        lag_saved = waterfall.arbitrage.lag_saved,
        lead_recoverable = format_amount(waterfall.equity.lead.recoverable_equity),
        lag_recoverable = format_amount(waterfall.equity.lag.recoverable_equity),
        total_recovery = format_grouped(waterfall.equity.total_recoverable),
    )
}
