// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// Prompts and response validation live in the domain layers.
//
// Naming convention: Base* for trait names (e.g., BaseAI, BaseCommentSource)

use anyhow::Result;
use async_trait::async_trait;

// =============================================================================
// AI Trait (Infrastructure - Generic LLM capabilities)
// =============================================================================

#[async_trait]
pub trait BaseAI: Send + Sync {
    /// Model identifier, recorded alongside stored analyses
    fn model_name(&self) -> &str;

    /// Complete a system + user prompt pair (returns raw text response)
    async fn complete(&self, system_prompt: &str, user_prompt: &str) -> Result<String>;

    /// Generate structured output with a JSON schema
    /// Returns a JSON string; parse and validate in calling code
    async fn generate_structured(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        schema: serde_json::Value,
    ) -> Result<String> {
        // Default implementation embeds the schema in the prompt
        let combined = format!(
            "{}\n\nRespond with valid JSON matching this schema:\n{}",
            system_prompt, schema
        );
        self.complete(&combined, user_prompt).await
    }
}

// =============================================================================
// Comment Source Trait (Infrastructure - third-party comment feeds)
// =============================================================================

#[async_trait]
pub trait BaseCommentSource: Send + Sync {
    /// Fetch up to `max_results` top-level comment texts for a video
    async fn fetch_comment_texts(&self, video_id: &str, max_results: u32) -> Result<Vec<String>>;
}
