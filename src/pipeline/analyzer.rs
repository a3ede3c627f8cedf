//! Customer analysis orchestration
//!
//! This module provides the high-level `CustomerAnalyzer` that runs the full
//! pipeline over one uploaded file.
//!
//! # Architecture
//!
//! The analyzer is a thin orchestration layer over pure stages:
//! 1. Tokenizes the file into header + data rows
//! 2. Detects the column schema from the header row
//! 3. Computes the universe revenue baseline over all rows
//! 4. Classifies each row with an identity into a `ClassifiedRecord`
//! 5. Rolls the records up into the financial waterfall
//!
//! Rows without an identity value are dropped, observable only as the delta
//! between `rows_read` and `records_classified`. Progress flows through an
//! injected `ProgressHandler`; the loop yields to the runtime every 50 rows
//! so large files do not starve a cooperative scheduler.

use crate::ingest::{parse_csv, DetectedSchema, ParseError, SlotMapping};
use crate::pipeline::record::{hash_identity, ClassifiedRecord};
use crate::progress::{NoOpHandler, ProgressEvent, ProgressHandler};
use crate::signal::{
    classify_feedback, inactivity_bucket, is_at_risk, is_churned_value, risk_score, segment_for,
};
use crate::waterfall::{
    compute_waterfall, FinancialAssumptions, RevenueBaseline, WaterfallResult,
};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, info};

/// Rows processed between progress checkpoints and runtime yields
const ROWS_PER_CHECKPOINT: usize = 50;

/// Errors that abort an analysis run
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Input file could not be read
    #[error("Cannot read input file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Input could not be tokenized as delimited text
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// No identity column was detected in the header row
    #[error("No identity column detected: the header row needs an email-like column")]
    NoIdentityColumn,
}

impl AnalysisError {
    /// Returns a user-friendly error message with troubleshooting hints
    pub fn help_message(&self) -> String {
        match self {
            AnalysisError::Io { path, source } => {
                format!(
                    "Error: Cannot read input file\nPath: {}\n\n\
                    Help: The file could not be read. Please check:\n\
                    - Does the file exist?\n\
                    - Do you have permission to read it?\n\n\
                    Details: {}",
                    path.display(),
                    source
                )
            }
            AnalysisError::Parse(parse_err) => {
                format!(
                    "Error: Input is not valid CSV\n\n\
                    Help: The file could not be tokenized as delimited text. Try:\n\
                    - Export the data as comma-separated values with a header row\n\
                    - Check for unbalanced quotes\n\n\
                    Details: {}",
                    parse_err
                )
            }
            AnalysisError::NoIdentityColumn => "Error: No identity column detected\n\n\
                Help: The header row needs an email-like column. Recognized names:\n\
                - email, e-mail\n\
                - any header matching \"customer ... email\"\n\n\
                Rename the identity column and re-run."
                .to_string(),
        }
    }
}

/// Complete output of one analysis run
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    /// Per-slot schema mapping summary
    pub schema: Vec<SlotMapping>,

    /// Raw data-row count
    pub rows_read: usize,

    /// Rows that produced a classified record
    pub records_classified: usize,

    /// Rows dropped for lacking an identity value
    pub rows_skipped: usize,

    pub waterfall: WaterfallResult,

    pub processing_time_ms: u64,

    /// Classified records backing the exports; never serialized into
    /// summaries
    #[serde(skip)]
    pub records: Vec<ClassifiedRecord>,
}

impl AnalysisReport {
    /// Re-runs the waterfall under new financial assumptions.
    ///
    /// Classification is untouched and the source file is not re-parsed;
    /// only the monetary model changes. This backs interactive parameter
    /// adjustment.
    pub fn recompute(&mut self, assumptions: FinancialAssumptions) {
        let baseline = RevenueBaseline {
            rows_read: self.waterfall.universe.total_rows,
            total_mrr: self.waterfall.universe.total_mrr,
            valid_revenue_count: self.waterfall.universe.valid_revenue_count,
        };
        self.waterfall = compute_waterfall(&self.records, baseline, assumptions);
    }
}

/// High-level analyzer running the full pipeline over one file
///
/// # Thread Safety
///
/// The analyzer is stateless between runs; each run owns its schema,
/// records, and waterfall. It can be shared across tasks using `Arc`.
pub struct CustomerAnalyzer {
    progress: Arc<dyn ProgressHandler>,
}

impl std::fmt::Debug for CustomerAnalyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CustomerAnalyzer").finish_non_exhaustive()
    }
}

impl Default for CustomerAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl CustomerAnalyzer {
    /// Creates an analyzer that reports no progress.
    pub fn new() -> Self {
        Self {
            progress: Arc::new(NoOpHandler),
        }
    }

    /// Creates an analyzer reporting progress through the given handler.
    pub fn with_progress(progress: Arc<dyn ProgressHandler>) -> Self {
        Self { progress }
    }

    /// Runs the pipeline over a file on disk.
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError` if the file cannot be read, tokenized, or
    /// lacks an identity column. Ingestion failures abort the whole run;
    /// no partial waterfall is produced.
    pub async fn analyze_file(
        &self,
        path: &Path,
        assumptions: FinancialAssumptions,
    ) -> Result<AnalysisReport, AnalysisError> {
        self.progress.on_progress(&ProgressEvent::Started {
            source: path.display().to_string(),
        });

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| {
                self.fail(AnalysisError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            })?;

        match self.run(&content, assumptions).await {
            Ok(report) => Ok(report),
            Err(err) => Err(self.fail(err)),
        }
    }

    /// Runs the pipeline over in-memory content.
    pub async fn analyze_content(
        &self,
        content: &str,
        assumptions: FinancialAssumptions,
    ) -> Result<AnalysisReport, AnalysisError> {
        match self.run(content, assumptions).await {
            Ok(report) => Ok(report),
            Err(err) => Err(self.fail(err)),
        }
    }

    fn fail(&self, err: AnalysisError) -> AnalysisError {
        self.progress.on_progress(&ProgressEvent::Failed {
            error: err.to_string(),
        });
        err
    }

    fn stage(&self, percent: u8, status: &str) {
        self.progress.on_progress(&ProgressEvent::Stage {
            percent,
            status: status.to_string(),
        });
    }

    async fn run(
        &self,
        content: &str,
        assumptions: FinancialAssumptions,
    ) -> Result<AnalysisReport, AnalysisError> {
        let started = Instant::now();

        self.stage(10, "Parsing CSV...");
        let parsed = parse_csv(content)?;
        let rows_read = parsed.rows.len();

        self.stage(20, "Analyzing schema...");
        let schema = DetectedSchema::detect(&parsed.headers);
        debug!(?schema, "Detected column bindings");
        if schema.email.is_none() {
            return Err(AnalysisError::NoIdentityColumn);
        }

        self.stage(30, "Calculating universe metrics...");
        let baseline = revenue_baseline(&parsed.rows, &schema);
        let arpu = baseline.arpu();

        self.stage(40, "Running signal analysis...");
        let mut records: Vec<ClassifiedRecord> = Vec::with_capacity(rows_read);

        for (i, row) in parsed.rows.iter().enumerate() {
            if i % ROWS_PER_CHECKPOINT == 0 {
                // The row loop owns the 40..80 band of the progress range
                let percent = (40 + i * 40 / rows_read.max(1)) as u8;
                self.progress.on_progress(&ProgressEvent::RowsProcessed {
                    processed: i + 1,
                    total: rows_read,
                    percent,
                });
                tokio::task::yield_now().await;
            }

            let Some(identity) = cell(row, schema.email).filter(|v| !v.trim().is_empty())
            else {
                // No identity, no record; visible as rows_skipped
                continue;
            };

            let feedback = cell(row, schema.feedback).unwrap_or("");
            let classification = classify_feedback(feedback);
            let at_risk = is_at_risk(feedback);
            let churned = cell(row, schema.churn_status).is_some_and(is_churned_value);

            let revenue = cell(row, schema.revenue)
                .and_then(parse_revenue)
                .unwrap_or(arpu);

            let score = risk_score(churned, at_risk, classification.category);

            let internal_id = cell(row, schema.account_id)
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
                .unwrap_or_else(|| format!("ACC_{i}"));

            records.push(ClassifiedRecord {
                hashed_identity: hash_identity(identity),
                segment: segment_for(churned, at_risk, score),
                risk_score: score,
                category: classification.category,
                play: classification.play,
                inactivity_bucket: inactivity_bucket(churned),
                internal_id,
                revenue,
                churned,
                at_risk,
                matched_keywords: classification.matched_keywords,
            });
        }

        self.stage(80, "Computing recovery models...");
        let waterfall = compute_waterfall(&records, baseline, assumptions);

        self.stage(95, "Generating PII-safe export...");
        let schema_summary = schema.summary(&parsed.headers);

        let records_classified = records.len();
        let rows_skipped = rows_read - records_classified;
        let elapsed = started.elapsed();

        info!(
            rows_read,
            records_classified,
            rows_skipped,
            processing_time_ms = elapsed.as_millis() as u64,
            "Analysis pipeline complete"
        );
        self.progress.on_progress(&ProgressEvent::Completed {
            records: records_classified,
            total_time: elapsed,
        });

        Ok(AnalysisReport {
            schema: schema_summary,
            rows_read,
            records_classified,
            rows_skipped,
            waterfall,
            processing_time_ms: elapsed.as_millis() as u64,
            records,
        })
    }
}

/// Returns the cell bound to a detected column, if both exist.
fn cell<'a>(row: &'a [String], column: Option<usize>) -> Option<&'a str> {
    column.and_then(|i| row.get(i)).map(String::as_str)
}

/// Parses a revenue cell; non-numeric and non-finite values count as absent.
fn parse_revenue(cell: &str) -> Option<f64> {
    cell.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Universe revenue figures over every data row, before identity filtering.
///
/// Without a detected revenue column the baseline stays zero and ARPU
/// degrades to zero, which downstream stages tolerate.
fn revenue_baseline(rows: &[Vec<String>], schema: &DetectedSchema) -> RevenueBaseline {
    let mut baseline = RevenueBaseline {
        rows_read: rows.len(),
        ..Default::default()
    };

    if schema.revenue.is_some() {
        for row in rows {
            if let Some(value) = cell(row, schema.revenue).and_then(parse_revenue) {
                if value > 0.0 {
                    baseline.total_mrr += value;
                    baseline.valid_revenue_count += 1;
                }
            }
        }
    }

    baseline
}
