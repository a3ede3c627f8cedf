//! Narrative insight generation
//!
//! Turns a financial waterfall into a short board-ready narrative. Two
//! engines implement the same strategy trait: a deterministic template
//! engine that works offline, and a delegated engine that sends aggregate
//! statistics (never row-level data) to an external text-generation service.

mod client;
mod delegated;
mod deterministic;
mod engine;
mod genai;
mod mock;
mod response;
mod types;

pub use client::InsightClient;
pub use delegated::DelegatedEngine;
pub use deterministic::{DeterministicEngine, DETERMINISTIC_ENGINE_LABEL};
pub use engine::{EngineKind, GenerationError, InsightEngine};
pub use genai::GenAiInsightClient;
pub use mock::{MockInsightClient, MockReply};
pub use response::{parse_insight_response, ParsedInsights, ResponseError};
pub use types::{CategoryStat, InsightReport, StatPacket, TextRequest, TextResponse};
