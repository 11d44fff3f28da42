//! Comments domain - collected social media comments and their embedded
//! sentiment.

pub mod activities;
pub mod models;

pub use models::{Comment, CommentFilter, CommentWithSentiment, NewComment};
