//! Collect a comment, then score it best-effort

use anyhow::{Context, Result};
use tracing::{error, info};

use crate::domains::comments::models::{Comment, CommentWithSentiment, NewComment};
use crate::domains::sentiment::activities::score_comment;
use crate::kernel::ServerDeps;

/// Insert a comment and score its sentiment.
///
/// The comment is kept even when the analysis cannot be stored; that
/// failure is logged and the comment returned without an analysis.
pub async fn collect_comment(input: NewComment, deps: &ServerDeps) -> Result<CommentWithSentiment> {
    input.validate()?;

    let comment = Comment::insert(&input, &deps.db_pool)
        .await
        .context("Failed to insert comment")?;

    info!(comment_id = %comment.id, platform = %comment.platform, "Collected comment");

    let sentiment_analysis = match score_comment(comment.id, &comment.content, deps).await {
        Ok((_, stored)) => Some(stored.into()),
        Err(e) => {
            error!(comment_id = %comment.id, error = %e, "Failed to save sentiment analysis");
            None
        }
    };

    Ok(CommentWithSentiment {
        comment,
        sentiment_analysis,
    })
}
