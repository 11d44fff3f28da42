use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Response page of `commentThreads.list`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentThreadList {
    #[serde(default)]
    pub items: Vec<CommentThread>,
    pub next_page_token: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommentThread {
    pub id: String,
    pub snippet: CommentThreadSnippet,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentThreadSnippet {
    pub video_id: Option<String>,
    pub top_level_comment: TopLevelComment,
    #[serde(default)]
    pub total_reply_count: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TopLevelComment {
    pub id: String,
    pub snippet: CommentSnippet,
}

/// A single comment as returned by the API.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentSnippet {
    /// Display text (may contain HTML entities and markup)
    pub text_display: String,
    pub text_original: Option<String>,
    pub author_display_name: Option<String>,
    #[serde(default)]
    pub like_count: u64,
    pub published_at: Option<DateTime<Utc>>,
}

impl CommentThread {
    /// The top-level comment of this thread.
    pub fn comment(&self) -> &CommentSnippet {
        &self.snippet.top_level_comment.snippet
    }
}
