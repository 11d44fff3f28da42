use anyhow::Result;

use crate::common::Page;
use crate::domains::comments::models::{Comment, CommentFilter, CommentWithSentiment};
use crate::kernel::ServerDeps;

/// Newest comments first, each with its analysis when present
pub async fn list_comments(
    filter: &CommentFilter,
    page: Page,
    deps: &ServerDeps,
) -> Result<Vec<CommentWithSentiment>> {
    Comment::list_with_sentiment(filter, page, &deps.db_pool).await
}
