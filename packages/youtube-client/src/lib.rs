//! YouTube Data API v3 client for reading video comments.
//!
//! # Example
//!
//! ```rust,ignore
//! use youtube_client::YoutubeClient;
//!
//! let client = YoutubeClient::new("your-api-key".into());
//!
//! let texts = client.fetch_comment_texts("dQw4w9WgXcQ", 50).await?;
//! for text in &texts {
//!     println!("{}", text);
//! }
//! ```

pub mod error;
pub mod types;

pub use error::{Result, YoutubeError};
pub use types::{CommentSnippet, CommentThread, CommentThreadList};

const BASE_URL: &str = "https://www.googleapis.com/youtube/v3";

/// The API caps `maxResults` for comment threads at 100.
pub const MAX_RESULTS_LIMIT: u32 = 100;

pub struct YoutubeClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl YoutubeClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            base_url: BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Fetch one page of top-level comment threads for a video.
    pub async fn list_comment_threads(
        &self,
        video_id: &str,
        max_results: u32,
    ) -> Result<CommentThreadList> {
        let video_id = video_id.trim();
        if video_id.is_empty() {
            return Err(YoutubeError::InvalidVideoId(video_id.to_string()));
        }

        let max_results = max_results.clamp(1, MAX_RESULTS_LIMIT).to_string();
        let url = format!("{}/commentThreads", self.base_url);
        let resp = self
            .client
            .get(&url)
            .query(&[
                ("part", "snippet"),
                ("videoId", video_id),
                ("maxResults", max_results.as_str()),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            tracing::warn!(video_id, status = status.as_u16(), "YouTube comment fetch failed");
            return Err(YoutubeError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let page: CommentThreadList = resp.json().await?;
        tracing::debug!(video_id, count = page.items.len(), "Fetched YouTube comment threads");
        Ok(page)
    }

    /// Display text of each top-level comment, in API order.
    pub async fn fetch_comment_texts(&self, video_id: &str, max_results: u32) -> Result<Vec<String>> {
        let page = self.list_comment_threads(video_id, max_results).await?;
        Ok(page
            .items
            .into_iter()
            .map(|thread| thread.snippet.top_level_comment.snippet.text_display)
            .collect())
    }
}
