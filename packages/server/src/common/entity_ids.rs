//! Typed ID definitions for domain entities.

pub use super::id::Id;

/// Marker type for collected comments.
pub struct Comment;

/// Marker type for a comment's sentiment analysis.
pub struct SentimentAnalysis;

pub type CommentId = Id<Comment>;

pub type SentimentAnalysisId = Id<SentimentAnalysis>;
