//! Transport seam for the delegated insight engine

use crate::insight::engine::GenerationError;
use crate::insight::types::{TextRequest, TextResponse};
use async_trait::async_trait;

/// Trait for clients that complete a text prompt against some service.
///
/// The delegated engine talks only through this trait, so tests can swap in
/// a queued mock and production can swap providers without touching the
/// engine.
#[async_trait]
pub trait InsightClient: Send + Sync {
    /// Sends a prompt and returns the raw text reply.
    async fn complete(&self, request: TextRequest) -> Result<TextResponse, GenerationError>;

    /// Short client name for logging
    fn name(&self) -> &str;

    /// Model identifier, when the client knows one
    fn model_info(&self) -> Option<String> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    struct EchoClient;

    #[async_trait]
    impl InsightClient for EchoClient {
        async fn complete(&self, request: TextRequest) -> Result<TextResponse, GenerationError> {
            Ok(TextResponse::new(request.prompt, Duration::from_millis(1)))
        }

        fn name(&self) -> &str {
            "echo"
        }
    }

    #[tokio::test]
    async fn test_client_trait_object() {
        let client: Box<dyn InsightClient> = Box::new(EchoClient);
        let response = client
            .complete(TextRequest::new("hello"))
            .await
            .unwrap();

        assert_eq!(response.content, "hello");
        assert_eq!(client.name(), "echo");
        assert!(client.model_info().is_none());
    }
}
