//! The four-stage financial waterfall: Universe, Signal, Arbitrage, Equity
//!
//! `compute_waterfall` is a pure function of the classified records, the
//! revenue baseline, and the financial assumptions. It holds no state of its
//! own, so adjusting lifetime or success-rate parameters only re-runs this
//! calculation; the source file is never re-parsed.

use crate::pipeline::ClassifiedRecord;
use crate::signal::{Play, SignalCategory};
use serde::Serialize;

/// Default expected customer lifetime in months
pub const DEFAULT_LIFETIME_MONTHS: u32 = 9;

/// Default campaign success rate percentage
pub const DEFAULT_SUCCESS_RATE_PCT: u32 = 5;

/// User-adjustable assumptions driving the recovery model
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialAssumptions {
    /// Expected customer lifetime in months (design range 3-36)
    pub lifetime_months: u32,

    /// Campaign success rate percentage (design range 1-50)
    pub success_rate_pct: u32,
}

impl Default for FinancialAssumptions {
    fn default() -> Self {
        Self {
            lifetime_months: DEFAULT_LIFETIME_MONTHS,
            success_rate_pct: DEFAULT_SUCCESS_RATE_PCT,
        }
    }
}

/// Universe revenue figures computed over every ingested data row,
/// before identity filtering
#[derive(Debug, Clone, Copy, Default)]
pub struct RevenueBaseline {
    /// Raw data-row count
    pub rows_read: usize,

    /// Sum of all positive parsed revenue cells
    pub total_mrr: f64,

    /// Count of rows with positive parsed revenue
    pub valid_revenue_count: usize,
}

impl RevenueBaseline {
    /// Average revenue per user; zero when no row had positive revenue.
    pub fn arpu(&self) -> f64 {
        if self.valid_revenue_count == 0 {
            0.0
        } else {
            self.total_mrr / self.valid_revenue_count as f64
        }
    }
}

/// Stage 1 totals: the full customer universe
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UniverseTotals {
    pub total_rows: usize,
    pub total_mrr: f64,
    pub valid_revenue_count: usize,
    pub arpu: f64,
    pub ltv: f64,
}

/// Stage 2 totals: flagged signal counts and the category breakdown
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignalTotals {
    /// Churned customers (candidates for win-back)
    pub lag_count: usize,

    /// At-risk, not-yet-churned customers (candidates for retention)
    pub lead_count: usize,

    /// Per-category roll-up, ordered by count descending
    pub categories: Vec<CategoryAggregate>,
}

/// Per-category roll-up over at-risk-or-churned records
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryAggregate {
    pub category: SignalCategory,
    pub play: Option<Play>,
    pub count: usize,

    /// Summed attributed monthly revenue of the category's customers
    pub monthly_mrr: f64,

    pub saved_customers: usize,
    pub recoverable_equity: f64,
}

/// Stage 3 totals: probabilistic recovery counts
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArbitrageTotals {
    pub success_rate_pct: u32,
    pub lag_saved: usize,
    pub lead_saved: usize,
}

/// One side of the stage 4 equity model
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EquityView {
    /// Summed attributed revenue of the view's records
    pub total_exposure: f64,

    pub saved_customers: usize,

    /// `saved_customers` x LTV
    pub recoverable_equity: f64,
}

/// Stage 4 totals: recoverable monetary equity per view
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EquityTotals {
    pub lag: EquityView,
    pub lead: EquityView,
    pub total_recoverable: f64,
}

/// Complete waterfall output
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WaterfallResult {
    pub universe: UniverseTotals,
    pub signal: SignalTotals,
    pub arbitrage: ArbitrageTotals,
    pub equity: EquityTotals,
    pub assumptions: FinancialAssumptions,
}

/// Saved-customer count: floor(count x rate / 100) in integer arithmetic.
fn saved_count(count: usize, success_rate_pct: u32) -> usize {
    count * success_rate_pct as usize / 100
}

/// Rolls classified records up into the four waterfall stages.
///
/// LAG is every churned record; LEAD is every at-risk record that has not
/// churned, so the two views are disjoint and no customer is counted twice.
pub fn compute_waterfall(
    records: &[ClassifiedRecord],
    baseline: RevenueBaseline,
    assumptions: FinancialAssumptions,
) -> WaterfallResult {
    let arpu = baseline.arpu();
    let ltv = arpu * f64::from(assumptions.lifetime_months);

    let universe = UniverseTotals {
        total_rows: baseline.rows_read,
        total_mrr: baseline.total_mrr,
        valid_revenue_count: baseline.valid_revenue_count,
        arpu,
        ltv,
    };

    let mut lag_count = 0;
    let mut lead_count = 0;
    let mut lag_exposure = 0.0;
    let mut lead_exposure = 0.0;

    for record in records {
        if record.churned {
            lag_count += 1;
            lag_exposure += record.revenue;
        } else if record.at_risk {
            lead_count += 1;
            lead_exposure += record.revenue;
        }
    }

    // Category roll-up over at-risk-or-churned records only; healthy
    // customers carry no actionable signal.
    let mut buckets: Vec<CategoryBucket> = Vec::new();
    for record in records.iter().filter(|r| r.at_risk || r.churned) {
        match buckets.iter_mut().find(|b| b.category == record.category) {
            Some(bucket) => {
                bucket.count += 1;
                bucket.revenue += record.revenue;
            }
            None => buckets.push(CategoryBucket {
                category: record.category,
                play: record.play,
                count: 1,
                revenue: record.revenue,
            }),
        }
    }
    buckets.sort_by(|a, b| b.count.cmp(&a.count).then(a.category.cmp(&b.category)));

    let categories = buckets
        .into_iter()
        .map(|bucket| {
            let saved = saved_count(bucket.count, assumptions.success_rate_pct);
            CategoryAggregate {
                category: bucket.category,
                play: bucket.play,
                count: bucket.count,
                monthly_mrr: bucket.revenue,
                saved_customers: saved,
                recoverable_equity: saved as f64 * ltv,
            }
        })
        .collect();

    let lag_saved = saved_count(lag_count, assumptions.success_rate_pct);
    let lead_saved = saved_count(lead_count, assumptions.success_rate_pct);

    let lag = EquityView {
        total_exposure: lag_exposure,
        saved_customers: lag_saved,
        recoverable_equity: lag_saved as f64 * ltv,
    };
    let lead = EquityView {
        total_exposure: lead_exposure,
        saved_customers: lead_saved,
        recoverable_equity: lead_saved as f64 * ltv,
    };

    WaterfallResult {
        universe,
        signal: SignalTotals {
            lag_count,
            lead_count,
            categories,
        },
        arbitrage: ArbitrageTotals {
            success_rate_pct: assumptions.success_rate_pct,
            lag_saved,
            lead_saved,
        },
        equity: EquityTotals {
            lag,
            lead,
            total_recoverable: lag.recoverable_equity + lead.recoverable_equity,
        },
        assumptions,
    }
}

struct CategoryBucket {
    category: SignalCategory,
    play: Option<Play>,
    count: usize,
    revenue: f64,
}
