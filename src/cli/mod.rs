pub mod commands;
pub mod handlers;
pub mod output;

pub use commands::{AnalyzeArgs, CliArgs, Commands, PlaysArgs, SchemaArgs};
pub use output::{OutputFormat, OutputFormatter};
