//! Sentiment domain activities

mod analyze;

pub use analyze::{analyze_sentiment, analyze_sentiment_batch, score_comment};
