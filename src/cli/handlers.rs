//! Command handlers
//!
//! Each handler owns one subcommand end to end and returns the process exit
//! code: 0 on success, 1 for analysis or output failures, 2 for configuration
//! failures. Insight generation is the one soft spot: the analysis has
//! already succeeded by then, so its failures warn and degrade instead of
//! changing the exit code.

use super::commands::{AnalyzeArgs, OutputFormatArg, PlaysArgs, SchemaArgs};
use super::output::{play_listings, OutputFormatter};
use crate::config::AnalysisConfig;
use crate::export::{
    receipt_id, render_pii_safe_csv, render_receipt, render_strategy_document,
    PII_EXPORT_FILENAME, RECEIPT_FILENAME, STRATEGY_FILENAME,
};
use crate::ingest::{parse_csv, DetectedSchema};
use crate::insight::{
    DelegatedEngine, DeterministicEngine, EngineKind, GenAiInsightClient, GenerationError,
    InsightEngine, InsightReport,
};
use crate::pipeline::{AnalysisReport, CustomerAnalyzer};
use crate::progress::{LoggingHandler, NoOpHandler, ProgressHandler, TerminalBarHandler};
use crate::waterfall::WaterfallResult;
use anyhow::{Context, Result};
use chrono::Utc;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Runs the full analysis pipeline for `winback analyze`.
pub async fn handle_analyze(args: &AnalyzeArgs, quiet: bool) -> i32 {
    let mut config = AnalysisConfig::default();
    if let Some(lifetime) = args.lifetime_months {
        config.lifetime_months = lifetime;
    }
    if let Some(rate) = args.success_rate {
        config.success_rate_pct = rate;
    }
    if let Some(engine) = args.engine {
        config.engine = engine.into();
    }
    if let Some(ref model) = args.model {
        config.model = model.clone();
    }
    if let Some(timeout) = args.timeout {
        config.request_timeout_secs = timeout;
    }
    if let Some(ref key) = args.api_key {
        config.api_key = Some(key.clone());
    }

    if let Err(e) = config.validate() {
        eprintln!("Error: {}", e);
        return 2;
    }

    let progress = select_progress_handler(quiet, args.format);
    let analyzer = CustomerAnalyzer::with_progress(progress);

    let report = match analyzer
        .analyze_file(&args.input, config.assumptions())
        .await
    {
        Ok(report) => report,
        Err(e) => {
            eprintln!("{}", e.help_message());
            return 1;
        }
    };

    let insights = if args.no_insights {
        None
    } else {
        match generate_insights(&config, &report.waterfall).await {
            Ok(insight_report) => Some(insight_report),
            Err(GenerationError::EmptyAggregates) => {
                warn!("No flagged customers; skipping insight generation");
                None
            }
            Err(e) => {
                warn!("Insight generation failed: {}", e);
                eprintln!("Warning: insight generation failed: {}", e);
                None
            }
        }
    };

    if let Some(out_dir) = &args.out_dir {
        if let Err(e) = write_artifacts(out_dir, &report).await {
            eprintln!("Error: {:#}", e);
            return 1;
        }
    }

    let formatter = OutputFormatter::new(args.format.into());
    match formatter.format_analysis(&report, insights.as_ref()) {
        Ok(text) => {
            print_result(&text);
            0
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            1
        }
    }
}

/// Runs ingestion and schema detection only, for `winback schema`.
pub async fn handle_schema(args: &SchemaArgs) -> i32 {
    let content = match tokio::fs::read_to_string(&args.input).await {
        Ok(content) => content,
        Err(e) => {
            eprintln!("Error: Cannot read {}: {}", args.input.display(), e);
            return 1;
        }
    };

    let parsed = match parse_csv(&content) {
        Ok(parsed) => parsed,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };

    let schema = DetectedSchema::detect(&parsed.headers);
    let mappings = schema.summary(&parsed.headers);

    let formatter = OutputFormatter::new(args.format.into());
    match formatter.format_schema(&mappings) {
        Ok(text) => {
            print_result(&text);
            0
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            1
        }
    }
}

/// Prints the static signal taxonomy, for `winback plays`.
pub fn handle_plays(args: &PlaysArgs) -> i32 {
    let formatter = OutputFormatter::new(args.format.into());
    match formatter.format_plays(&play_listings()) {
        Ok(text) => {
            print_result(&text);
            0
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            1
        }
    }
}

/// Builds the configured insight engine and runs it against the waterfall.
async fn generate_insights(
    config: &AnalysisConfig,
    waterfall: &WaterfallResult,
) -> std::result::Result<InsightReport, GenerationError> {
    let engine: Box<dyn InsightEngine> = match config.engine {
        EngineKind::Deterministic => Box::new(DeterministicEngine::new()),
        EngineKind::Delegated => {
            let client = Arc::new(GenAiInsightClient::new(
                config.model.clone(),
                Duration::from_secs(config.request_timeout_secs),
                config.api_key.clone(),
            ));
            Box::new(DelegatedEngine::new(client))
        }
    };

    info!(engine = engine.name(), "Generating insights");
    engine.generate(waterfall).await
}

/// Writes the three deliverables into `out_dir`, creating it if needed.
async fn write_artifacts(out_dir: &Path, report: &AnalysisReport) -> Result<()> {
    tokio::fs::create_dir_all(out_dir)
        .await
        .with_context(|| format!("Failed to create {}", out_dir.display()))?;

    // One timestamp shared by all three artifacts, so the receipt id and
    // the document headers agree.
    let generated_at = Utc::now();

    let csv_path = out_dir.join(PII_EXPORT_FILENAME);
    tokio::fs::write(&csv_path, render_pii_safe_csv(&report.records))
        .await
        .with_context(|| format!("Failed to write {}", csv_path.display()))?;
    info!(path = %csv_path.display(), rows = report.records.len(), "Wrote PII-safe export");

    let strategy_path = out_dir.join(STRATEGY_FILENAME);
    tokio::fs::write(
        &strategy_path,
        render_strategy_document(&report.waterfall, generated_at),
    )
    .await
    .with_context(|| format!("Failed to write {}", strategy_path.display()))?;
    info!(path = %strategy_path.display(), "Wrote strategy document");

    let receipt_path = out_dir.join(RECEIPT_FILENAME);
    tokio::fs::write(&receipt_path, render_receipt(&report.waterfall, generated_at))
        .await
        .with_context(|| format!("Failed to write {}", receipt_path.display()))?;
    info!(path = %receipt_path.display(), receipt = %receipt_id(generated_at), "Wrote audit receipt");

    Ok(())
}

/// Interactive runs get the terminal progress bar; quiet runs get nothing;
/// everything else logs checkpoints through tracing.
fn select_progress_handler(quiet: bool, format: OutputFormatArg) -> Arc<dyn ProgressHandler> {
    if quiet {
        Arc::new(NoOpHandler)
    } else if format == OutputFormatArg::Human && atty::is(atty::Stream::Stdout) {
        Arc::new(TerminalBarHandler::new())
    } else {
        Arc::new(LoggingHandler)
    }
}

/// Prints formatted output without doubling the trailing newline.
fn print_result(text: &str) {
    if text.ends_with('\n') {
        print!("{}", text);
    } else {
        println!("{}", text);
    }
}
