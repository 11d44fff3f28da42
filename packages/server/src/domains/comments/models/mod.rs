pub mod comment;

pub use comment::{
    Comment, CommentFilter, CommentWithSentiment, EmbeddedAnalysis, NewComment,
    DEFAULT_LANGUAGE_CODE,
};
