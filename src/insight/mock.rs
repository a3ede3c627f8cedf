//! Mock insight client for tests
//!
//! Serves canned replies from a queue and records every prompt it sees, so
//! tests can assert both engine behavior and what crossed the transport.

use crate::insight::client::InsightClient;
use crate::insight::engine::GenerationError;
use crate::insight::types::{TextRequest, TextResponse};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

/// One canned reply: either text content or an error
#[derive(Debug, Clone)]
pub struct MockReply {
    content: String,
    error: Option<GenerationError>,
}

impl MockReply {
    /// Creates a successful text reply.
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            error: None,
        }
    }

    /// Creates a reply that fails with the given error.
    pub fn error(error: GenerationError) -> Self {
        Self {
            content: String::new(),
            error: Some(error),
        }
    }
}

/// Queued-reply implementation of [`InsightClient`]
pub struct MockInsightClient {
    replies: Mutex<VecDeque<MockReply>>,
    prompts: Mutex<Vec<String>>,
}

impl MockInsightClient {
    pub fn new() -> Self {
        Self {
            replies: Mutex::new(VecDeque::new()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Queues a single reply.
    pub fn add_reply(&self, reply: MockReply) {
        self.replies.lock().unwrap().push_back(reply);
    }

    /// Queues several replies in order.
    pub fn add_replies(&self, replies: Vec<MockReply>) {
        let mut queue = self.replies.lock().unwrap();
        for reply in replies {
            queue.push_back(reply);
        }
    }

    /// Number of replies still queued
    pub fn remaining_replies(&self) -> usize {
        self.replies.lock().unwrap().len()
    }

    /// Every prompt received so far, oldest first
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

impl Default for MockInsightClient {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for MockInsightClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockInsightClient")
            .field("remaining_replies", &self.remaining_replies())
            .field("prompts_seen", &self.prompts.lock().unwrap().len())
            .finish()
    }
}

#[async_trait]
impl InsightClient for MockInsightClient {
    async fn complete(&self, request: TextRequest) -> Result<TextResponse, GenerationError> {
        self.prompts.lock().unwrap().push(request.prompt);

        let reply = self.replies.lock().unwrap().pop_front().ok_or_else(|| {
            GenerationError::RequestFailed {
                message: "MockInsightClient: no more replies in queue".to_string(),
            }
        })?;

        if let Some(error) = reply.error {
            return Err(error);
        }

        Ok(TextResponse::new(reply.content, Duration::from_millis(10)))
    }

    fn name(&self) -> &str {
        "Mock"
    }

    fn model_info(&self) -> Option<String> {
        Some("mock-model".to_string())
    }
}
