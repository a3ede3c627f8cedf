use super::output::OutputFormat;
use crate::insight::EngineKind;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// PII-safe churn-recovery analysis engine
#[derive(Parser, Debug)]
#[command(
    name = "winback",
    about = "PII-safe churn-recovery analysis for customer CSV exports",
    version,
    author,
    long_about = "winback ingests a customer CSV export, detects the column layout, classifies \
                  each customer's churn signal, computes the four-stage financial waterfall \
                  (universe, signal, arbitrage, equity), and renders PII-safe deliverables. \
                  Narrative insights come from a deterministic template or, optionally, the \
                  Gemini API fed aggregate statistics only."
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, value_name = "LEVEL", help = "Set logging level")]
    pub log_level: Option<String>,

    #[arg(
        long,
        global = true,
        value_enum,
        value_name = "FORMAT",
        help = "Log output format"
    )]
    pub log_format: Option<LogFormatArg>,

    #[arg(
        short = 'v',
        long,
        global = true,
        help = "Increase verbosity (can be used multiple times)"
    )]
    pub verbose: bool,

    #[arg(
        short = 'q',
        long,
        global = true,
        conflicts_with = "verbose",
        help = "Quiet mode - suppress progress and non-error output"
    )]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(
        about = "Analyze a customer CSV export",
        long_about = "Runs the full pipeline: parse, schema detection, signal classification, \
                      risk scoring, and the financial waterfall, then prints the summary and \
                      optionally writes the PII-safe deliverables.\n\n\
                      Examples:\n  \
                      winback analyze customers.csv\n  \
                      winback analyze customers.csv --format json\n  \
                      winback analyze customers.csv --out-dir ./deliverables\n  \
                      winback analyze customers.csv --engine delegated --api-key $GEMINI_API_KEY"
    )]
    Analyze(AnalyzeArgs),

    #[command(
        about = "Show the detected column mapping for a CSV",
        long_about = "Parses only the header row and reports which column each logical field \
                      (email, revenue, feedback, churnStatus, accountId) bound to.\n\n\
                      Examples:\n  \
                      winback schema customers.csv\n  \
                      winback schema customers.csv --format json"
    )]
    Schema(SchemaArgs),

    #[command(
        about = "List signal categories and their recommended plays",
        long_about = "Prints the fixed classification cascade: each signal category, its keyword \
                      matcher, and the play deployed for it.\n\n\
                      Examples:\n  \
                      winback plays\n  \
                      winback plays --format yaml"
    )]
    Plays(PlaysArgs),
}

#[derive(Parser, Debug, Clone)]
pub struct AnalyzeArgs {
    #[arg(value_name = "FILE", help = "Path to the customer CSV export")]
    pub input: PathBuf,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,

    #[arg(
        short = 'o',
        long,
        value_name = "DIR",
        help = "Write the PII-safe CSV, strategy document, and audit receipt into this directory"
    )]
    pub out_dir: Option<PathBuf>,

    #[arg(
        long,
        value_name = "MONTHS",
        help = "Expected customer lifetime in months, 3-36 (default from WINBACK_LIFETIME_MONTHS or 9)"
    )]
    pub lifetime_months: Option<u32>,

    #[arg(
        long,
        value_name = "PERCENT",
        help = "Campaign success rate percentage, 1-50 (default from WINBACK_SUCCESS_RATE or 5)"
    )]
    pub success_rate: Option<u32>,

    #[arg(
        short = 'e',
        long,
        value_enum,
        help = "Insight engine (default from WINBACK_INSIGHT_ENGINE or deterministic)"
    )]
    pub engine: Option<InsightEngineArg>,

    #[arg(
        short = 'm',
        long,
        value_name = "MODEL",
        help = "Model name for the delegated engine"
    )]
    pub model: Option<String>,

    #[arg(
        long,
        value_name = "SECONDS",
        help = "Delegated request timeout in seconds"
    )]
    pub timeout: Option<u64>,

    #[arg(
        long,
        value_name = "KEY",
        help = "API credential for the delegated engine (overrides GEMINI_API_KEY)"
    )]
    pub api_key: Option<String>,

    #[arg(long, help = "Skip narrative insight generation")]
    pub no_insights: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct SchemaArgs {
    #[arg(value_name = "FILE", help = "Path to the customer CSV export")]
    pub input: PathBuf,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,
}

#[derive(Parser, Debug, Clone)]
pub struct PlaysArgs {
    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormatArg {
    Json,
    Yaml,
    Human,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Json => OutputFormat::Json,
            OutputFormatArg::Yaml => OutputFormat::Yaml,
            OutputFormatArg::Human => OutputFormat::Human,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsightEngineArg {
    Deterministic,
    Delegated,
}

impl From<InsightEngineArg> for EngineKind {
    fn from(arg: InsightEngineArg) -> Self {
        match arg {
            InsightEngineArg::Deterministic => EngineKind::Deterministic,
            InsightEngineArg::Delegated => EngineKind::Delegated,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormatArg {
    Text,
    Json,
}
