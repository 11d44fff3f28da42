// AI implementation over any OpenAI-compatible endpoint
//
// This is the infrastructure implementation of BaseAI. Groq (sentiment, chat)
// and Gemini (translation) are both reached through their OpenAI-compatible
// APIs by pointing the client at a different base URL.
// Business logic (what to prompt for) lives in domain layers.

use anyhow::{Context, Result};
use async_trait::async_trait;
use openai_client::{ChatRequest, Message, OpenAIClient, StructuredMode, StructuredRequest};
use std::time::Duration;

use super::BaseAI;
use crate::config::ModelEndpoint;

/// A single model on an OpenAI-compatible endpoint
#[derive(Clone)]
pub struct HostedModel {
    client: OpenAIClient,
    model: String,
    structured_mode: StructuredMode,
    temperature: f32,
}

impl HostedModel {
    pub fn new(client: OpenAIClient, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
            structured_mode: StructuredMode::default(),
            temperature: 0.7,
        }
    }

    /// Build from endpoint settings with a request timeout
    pub fn from_endpoint(endpoint: &ModelEndpoint, timeout: Duration) -> Result<Self> {
        let client = OpenAIClient::new(endpoint.api_key.clone())
            .with_base_url(endpoint.base_url.clone())
            .with_timeout(timeout)
            .context("Failed to build HTTP client for model endpoint")?;
        Ok(Self::new(client, endpoint.model.clone()))
    }

    /// Providers without strict json_schema support take `JsonObject`
    pub fn with_structured_mode(mut self, mode: StructuredMode) -> Self {
        self.structured_mode = mode;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }
}

#[async_trait]
impl BaseAI for HostedModel {
    fn model_name(&self) -> &str {
        &self.model
    }

    async fn complete(&self, system_prompt: &str, user_prompt: &str) -> Result<String> {
        let request = ChatRequest::new(&self.model)
            .message(Message::system(system_prompt))
            .message(Message::user(user_prompt))
            .temperature(self.temperature);

        tracing::debug!(
            model = %self.model,
            base_url = %self.client.base_url(),
            prompt_length = system_prompt.len() + user_prompt.len(),
            "Calling hosted model"
        );

        let response = self
            .client
            .chat_completion(request)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, model = %self.model, "Hosted model call failed");
                e
            })
            .context("Failed to call hosted model")?;

        Ok(response.content)
    }

    async fn generate_structured(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        schema: serde_json::Value,
    ) -> Result<String> {
        let request = StructuredRequest::new(&self.model, system_prompt, user_prompt, schema)
            .mode(self.structured_mode);

        self.client
            .structured_output(request)
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, model = %self.model, "Structured output call failed");
                e
            })
            .context("Failed to get structured output from hosted model")
    }
}
