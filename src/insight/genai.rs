//! GenAI-backed insight client
//!
//! Talks to the Gemini API through the `genai` crate. A session credential,
//! when provided, takes precedence over the `GEMINI_API_KEY` environment
//! variable. The credential lives only inside the auth resolver; it is never
//! stored on the client, logged, or echoed into any artifact.

use crate::insight::client::InsightClient;
use crate::insight::engine::GenerationError;
use crate::insight::types::{TextRequest, TextResponse};
use async_trait::async_trait;
use genai::adapter::AdapterKind;
use genai::chat::{ChatMessage, ChatRequest};
use genai::resolver::{AuthData, ServiceTargetResolver};
use genai::{Client, ModelIden, ServiceTarget};
use std::time::Duration;
use tracing::{debug, error};

const PROVIDER: AdapterKind = AdapterKind::Gemini;
const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Insight client backed by the `genai` crate
pub struct GenAiInsightClient {
    client: Client,
    model: String,
    timeout: Duration,
}

impl GenAiInsightClient {
    /// Creates a new client for the given model.
    pub fn new(model: String, timeout: Duration, api_key: Option<String>) -> Self {
        let model_clone = model.clone();

        let resolver = ServiceTargetResolver::from_resolver_fn(
            move |service_target: ServiceTarget| -> Result<ServiceTarget, genai::resolver::Error> {
                let auth = match &api_key {
                    Some(key) => AuthData::from_single(key.clone()),
                    None => AuthData::from_env(API_KEY_ENV),
                };

                Ok(ServiceTarget {
                    endpoint: service_target.endpoint,
                    auth,
                    model: ModelIden::new(PROVIDER, &model_clone),
                })
            },
        );

        let client = Client::builder()
            .with_service_target_resolver(resolver)
            .build();

        debug!(
            "Creating insight client: provider={}, model={}",
            PROVIDER.as_str(),
            model,
        );

        Self {
            client,
            model,
            timeout,
        }
    }
}

/// Buckets a service error message into an auth failure or a generic one.
fn classify_api_error(message: String) -> GenerationError {
    let lowered = message.to_lowercase();
    let auth_failure = lowered.contains("api key")
        || lowered.contains("api_key")
        || lowered.contains("unauthorized")
        || lowered.contains("permission")
        || lowered.contains("401")
        || lowered.contains("403");

    if auth_failure {
        GenerationError::Authentication { message }
    } else {
        GenerationError::RequestFailed { message }
    }
}

#[async_trait]
impl InsightClient for GenAiInsightClient {
    async fn complete(&self, request: TextRequest) -> Result<TextResponse, GenerationError> {
        let start = std::time::Instant::now();

        let chat_request = ChatRequest::new(vec![ChatMessage::user(request.prompt)]);

        let response = match tokio::time::timeout(
            self.timeout,
            self.client.exec_chat(&self.model, chat_request, None),
        )
        .await
        {
            Ok(Ok(resp)) => resp,
            Ok(Err(e)) => {
                error!("{} API error: {}", PROVIDER.as_str(), e);
                return Err(classify_api_error(format!(
                    "{} request failed: {}",
                    PROVIDER.as_str(),
                    e
                )));
            }
            Err(_) => {
                error!(
                    "{} request timed out after {}s",
                    PROVIDER.as_str(),
                    self.timeout.as_secs()
                );
                return Err(GenerationError::Timeout {
                    seconds: self.timeout.as_secs(),
                });
            }
        };

        let content = response.first_text().unwrap_or_default().to_string();

        Ok(TextResponse::new(content, start.elapsed()))
    }

    fn name(&self) -> &str {
        PROVIDER.as_str()
    }

    fn model_info(&self) -> Option<String> {
        Some(self.model.clone())
    }
}

impl std::fmt::Debug for GenAiInsightClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenAiInsightClient")
            .field("model", &self.model)
            .field("timeout", &self.timeout)
            .finish()
    }
}
