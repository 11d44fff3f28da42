// TestDependencies - mock implementations for testing
//
// Provides mock services that can be injected into ServerDeps for tests.
// Mocks are cheaply cloneable; keep a clone to inspect recorded calls after
// handing one to the server.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use sqlx::PgPool;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use super::{BaseAI, BaseCommentSource, ServerDeps};

// =============================================================================
// Mock AI (Generic LLM capabilities)
// =============================================================================

/// Prompt pair captured from a call
#[derive(Debug, Clone)]
pub struct AICall {
    pub system_prompt: String,
    pub user_prompt: String,
    /// Whether a JSON schema was attached
    pub structured: bool,
}

#[derive(Clone)]
pub struct MockAI {
    model: String,
    responses: Arc<Mutex<VecDeque<Result<String, String>>>>,
    calls: Arc<Mutex<Vec<AICall>>>,
}

impl Default for MockAI {
    fn default() -> Self {
        Self::new()
    }
}

impl MockAI {
    pub fn new() -> Self {
        Self {
            model: "mock-model".to_string(),
            responses: Arc::new(Mutex::new(VecDeque::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Add a text response to the queue
    pub fn with_response(self, response: impl Into<String>) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(Ok(response.into()));
        self
    }

    /// Add a JSON response to the queue (will be serialized)
    pub fn with_json_response<T: serde::Serialize>(self, data: &T) -> Self {
        let json = serde_json::to_string(data).expect("Failed to serialize mock response");
        self.with_response(json)
    }

    /// Queue a failure, as if the provider returned an error
    pub fn with_error(self, message: impl Into<String>) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(Err(message.into()));
        self
    }

    /// Get all calls made to the AI
    pub fn calls(&self) -> Vec<AICall> {
        self.calls.lock().unwrap().clone()
    }

    /// Get the last user prompt sent to the AI
    pub fn last_prompt(&self) -> Option<String> {
        self.calls
            .lock()
            .unwrap()
            .last()
            .map(|c| c.user_prompt.clone())
    }

    /// Check if a prompt (system or user) containing the given text was sent
    pub fn was_called_with(&self, text: &str) -> bool {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .any(|c| c.system_prompt.contains(text) || c.user_prompt.contains(text))
    }

    /// Get the number of times the AI was called
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    fn respond(&self, system_prompt: &str, user_prompt: &str, structured: bool) -> Result<String> {
        self.calls.lock().unwrap().push(AICall {
            system_prompt: system_prompt.to_string(),
            user_prompt: user_prompt.to_string(),
            structured,
        });

        match self.responses.lock().unwrap().pop_front() {
            Some(Ok(response)) => Ok(response),
            Some(Err(message)) => Err(anyhow!(message)),
            // Default mock response
            None => Ok("Mock AI response".to_string()),
        }
    }
}

#[async_trait]
impl BaseAI for MockAI {
    fn model_name(&self) -> &str {
        &self.model
    }

    async fn complete(&self, system_prompt: &str, user_prompt: &str) -> Result<String> {
        self.respond(system_prompt, user_prompt, false)
    }

    async fn generate_structured(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        _schema: serde_json::Value,
    ) -> Result<String> {
        self.respond(system_prompt, user_prompt, true)
    }
}

// =============================================================================
// Mock Comment Source
// =============================================================================

#[derive(Clone, Default)]
pub struct MockCommentSource {
    comments: Arc<Mutex<Vec<String>>>,
    error: Arc<Mutex<Option<String>>>,
    calls: Arc<Mutex<Vec<(String, u32)>>>,
}

impl MockCommentSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_comments<I, S>(self, comments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.comments
            .lock()
            .unwrap()
            .extend(comments.into_iter().map(Into::into));
        self
    }

    /// Every fetch fails with this message
    pub fn with_error(self, message: impl Into<String>) -> Self {
        *self.error.lock().unwrap() = Some(message.into());
        self
    }

    /// (video_id, max_results) of every fetch
    pub fn calls(&self) -> Vec<(String, u32)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl BaseCommentSource for MockCommentSource {
    async fn fetch_comment_texts(&self, video_id: &str, max_results: u32) -> Result<Vec<String>> {
        self.calls
            .lock()
            .unwrap()
            .push((video_id.to_string(), max_results));

        if let Some(message) = self.error.lock().unwrap().clone() {
            return Err(anyhow!(message));
        }

        Ok(self
            .comments
            .lock()
            .unwrap()
            .iter()
            .take(max_results as usize)
            .cloned()
            .collect())
    }
}

// =============================================================================
// TestDependencies
// =============================================================================

/// Builder for ServerDeps wired with mocks
pub struct TestDependencies {
    pub sentiment_ai: MockAI,
    pub translation_ai: MockAI,
    pub comment_source: Option<MockCommentSource>,
}

impl Default for TestDependencies {
    fn default() -> Self {
        Self::new()
    }
}

impl TestDependencies {
    pub fn new() -> Self {
        Self {
            sentiment_ai: MockAI::new(),
            translation_ai: MockAI::new(),
            comment_source: None,
        }
    }

    /// Set the mock used for sentiment scoring and chat
    pub fn mock_sentiment_ai(mut self, ai: MockAI) -> Self {
        self.sentiment_ai = ai;
        self
    }

    /// Set the mock used for translation
    pub fn mock_translation_ai(mut self, ai: MockAI) -> Self {
        self.translation_ai = ai;
        self
    }

    /// Set the mock comment feed
    pub fn mock_comment_source(mut self, source: MockCommentSource) -> Self {
        self.comment_source = Some(source);
        self
    }

    /// Build ServerDeps around a database pool
    pub fn into_server_deps(self, db_pool: PgPool) -> ServerDeps {
        ServerDeps::new(
            db_pool,
            Arc::new(self.sentiment_ai),
            Arc::new(self.translation_ai),
            self.comment_source
                .map(|source| Arc::new(source) as Arc<dyn BaseCommentSource>),
        )
    }
}
