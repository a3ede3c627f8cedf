//! Delegated insight engine
//!
//! Builds an aggregate-only stat packet, prompts an external text-generation
//! service, and validates the reply. Failures surface as errors; there is no
//! silent fallback to the deterministic engine.

use crate::insight::client::InsightClient;
use crate::insight::engine::{GenerationError, InsightEngine};
use crate::insight::response::parse_insight_response;
use crate::insight::types::{InsightReport, StatPacket, TextRequest};
use crate::waterfall::WaterfallResult;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info};

/// Engine that delegates narrative generation to an [`InsightClient`]
pub struct DelegatedEngine {
    client: Arc<dyn InsightClient>,
    label: String,
}

impl DelegatedEngine {
    /// Wraps a client; the report label comes from the client's model when
    /// it reports one.
    pub fn new(client: Arc<dyn InsightClient>) -> Self {
        let label = client
            .model_info()
            .unwrap_or_else(|| client.name().to_string());
        Self { client, label }
    }
}

/// Renders the fixed prompt around the serialized stat packet.
fn build_prompt(packet: &StatPacket) -> Result<String, GenerationError> {
    let stats = serde_json::to_string_pretty(packet).map_err(|e| {
        GenerationError::RequestFailed {
            message: format!("Failed to serialize stat packet: {}", e),
        }
    })?;

    Ok(format!(
        "You are a CFO advisor analyzing customer retention data. \
         Provide strategic insights in JSON format.\n\
         \n\
         STATS (NO PII): {stats}\n\
         \n\
         Return ONLY valid JSON:\n\
         {{\n  \
         \"executiveSummary\": \"2-3 sentence high-level summary for the board\",\n  \
         \"keyInsights\": [\"insight1\", \"insight2\", \"insight3\", \"insight4\"],\n  \
         \"strategicRecommendations\": [\"recommendation1\", \"recommendation2\", \"recommendation3\", \"recommendation4\"]\n\
         }}"
    ))
}

#[async_trait]
impl InsightEngine for DelegatedEngine {
    async fn generate(
        &self,
        waterfall: &WaterfallResult,
    ) -> Result<InsightReport, GenerationError> {
        if waterfall.signal.categories.is_empty() {
            return Err(GenerationError::EmptyAggregates);
        }

        let packet = StatPacket::from_waterfall(waterfall);
        let prompt = build_prompt(&packet)?;
        debug!(
            prompt_chars = prompt.len(),
            client = self.client.name(),
            "Requesting delegated insights"
        );

        let response = self.client.complete(TextRequest::new(prompt)).await?;
        info!(
            response_ms = response.response_time.as_millis() as u64,
            "Insight service replied"
        );

        let parsed = parse_insight_response(&response.content)?;

        Ok(InsightReport {
            engine: self.label.clone(),
            executive_summary: parsed.executive_summary,
            key_insights: parsed.key_insights,
            strategic_recommendations: parsed.strategic_recommendations,
        })
    }

    fn name(&self) -> &str {
        &self.label
    }
}

impl std::fmt::Debug for DelegatedEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DelegatedEngine")
            .field("label", &self.label)
            .field("client", &self.client.name())
            .finish()
    }
}
