//! Answer a chat message grounded in the last week of sentiment data

use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use std::num::NonZeroU32;
use tracing::{debug, error};

use crate::domains::analytics::{aggregate, top_keywords, SampledRecord, SentimentRecord};
use crate::domains::chat::context::{build_analytics_context, TOP_KEYWORDS};
use crate::kernel::ServerDeps;

pub const CONTEXT_WINDOW_DAYS: NonZeroU32 = match NonZeroU32::new(7) {
    Some(days) => days,
    None => unreachable!(),
};
pub const CONTEXT_RECORD_LIMIT: i64 = 100;
pub const DEFAULT_QUESTION: &str = "Hello, give me insights.";

const PERSONA: &str = "You are an AI assistant specialized in social media sentiment analysis. \
You help users understand their sentiment analysis data, provide insights, \
and answer questions about social media comments and trends.";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatReply {
    /// Epoch milliseconds at reply time
    pub id: String,
    pub role: &'static str,
    pub content: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("Failed to load analytics context")]
    Context(#[source] anyhow::Error),
    #[error("Chat model request failed")]
    Model(#[source] anyhow::Error),
}

/// The question to answer: the last non-blank user message
pub fn latest_question(messages: &[ChatMessage]) -> &str {
    messages
        .iter()
        .rev()
        .find(|m| m.role == "user" && !m.content.trim().is_empty())
        .map(|m| m.content.as_str())
        .unwrap_or(DEFAULT_QUESTION)
}

pub async fn respond(messages: &[ChatMessage], deps: &ServerDeps) -> Result<ChatReply, ChatError> {
    let since = Utc::now() - Duration::days(i64::from(CONTEXT_WINDOW_DAYS.get()));
    let samples = SampledRecord::find_recent_with_content(since, CONTEXT_RECORD_LIMIT, &deps.db_pool)
        .await
        .map_err(ChatError::Context)?;

    let records: Vec<SentimentRecord> = samples.iter().map(|s| s.record.clone()).collect();
    let summary = aggregate(&records, CONTEXT_WINDOW_DAYS, None);
    let keywords = top_keywords(&records, TOP_KEYWORDS);
    let context = build_analytics_context(&summary, &keywords, &samples);

    let question = latest_question(messages);
    let prompt = format!(
        "You have access to the following current data:\n{}\nUser question: {}",
        context, question
    );

    debug!(records = records.len(), "Answering chat question");

    let content = deps
        .sentiment_ai
        .complete(PERSONA, &prompt)
        .await
        .map_err(|e| {
            error!(error = %e, "Chat completion failed");
            ChatError::Model(e)
        })?;

    Ok(ChatReply {
        id: Utc::now().timestamp_millis().to_string(),
        role: "assistant",
        content,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(role: &str, content: &str) -> ChatMessage {
        ChatMessage {
            role: role.to_string(),
            content: content.to_string(),
        }
    }

    #[test]
    fn test_latest_question_picks_last_user_message() {
        let messages = vec![
            message("user", "first"),
            message("assistant", "answer"),
            message("user", "What is trending?"),
            message("assistant", "trailing"),
        ];
        assert_eq!(latest_question(&messages), "What is trending?");
    }

    #[test]
    fn test_latest_question_defaults() {
        assert_eq!(latest_question(&[]), DEFAULT_QUESTION);
        assert_eq!(latest_question(&[message("user", "  ")]), DEFAULT_QUESTION);
        assert_eq!(
            latest_question(&[message("assistant", "hi")]),
            DEFAULT_QUESTION
        );
    }
}
