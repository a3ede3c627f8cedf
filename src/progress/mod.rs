//! Progress reporting for analysis runs

mod bar;
mod handler;
mod logging;

pub use bar::TerminalBarHandler;
pub use handler::{NoOpHandler, ProgressEvent, ProgressHandler};
pub use logging::LoggingHandler;
