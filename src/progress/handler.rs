//! Progress handler trait and events

use std::time::Duration;

/// Events emitted while an analysis run progresses
///
/// These are advisory observability signals; no correctness depends on them.
#[derive(Debug, Clone)]
pub enum ProgressEvent {
    /// Analysis started
    Started { source: String },

    /// A fixed stage checkpoint was reached
    Stage { percent: u8, status: String },

    /// Row-loop checkpoint, reported every 50 rows
    RowsProcessed {
        processed: usize,
        total: usize,
        percent: u8,
    },

    /// Analysis completed successfully
    Completed {
        records: usize,
        total_time: Duration,
    },

    /// Analysis failed
    Failed { error: String },
}

impl ProgressEvent {
    /// Percent position for bar-style renderers
    pub fn percent(&self) -> u8 {
        match self {
            ProgressEvent::Started { .. } => 0,
            ProgressEvent::Stage { percent, .. } => *percent,
            ProgressEvent::RowsProcessed { percent, .. } => *percent,
            ProgressEvent::Completed { .. } => 100,
            ProgressEvent::Failed { .. } => 0,
        }
    }
}

/// Trait for handling progress events during an analysis run
pub trait ProgressHandler: Send + Sync {
    /// Called when a progress event occurs
    fn on_progress(&self, event: &ProgressEvent);
}

/// No-op handler that ignores all events
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpHandler;

impl ProgressHandler for NoOpHandler {
    fn on_progress(&self, _event: &ProgressEvent) {
        // Intentionally empty
    }
}
