//! Logging-based progress handler

use super::{ProgressEvent, ProgressHandler};
use tracing::{debug, info, warn};

/// Handler that logs progress events using tracing
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingHandler;

impl ProgressHandler for LoggingHandler {
    fn on_progress(&self, event: &ProgressEvent) {
        match event {
            ProgressEvent::Started { source } => {
                info!(source = %source, "Starting analysis");
            }
            ProgressEvent::Stage { percent, status } => {
                info!(percent, status = %status, "Stage checkpoint");
            }
            ProgressEvent::RowsProcessed {
                processed,
                total,
                percent,
            } => {
                debug!(processed, total, percent, "Processing rows");
            }
            ProgressEvent::Completed {
                records,
                total_time,
            } => {
                info!(
                    records,
                    total_time_ms = total_time.as_millis(),
                    "Analysis complete"
                );
            }
            ProgressEvent::Failed { error } => {
                warn!(error = %error, "Analysis failed");
            }
        }
    }
}
