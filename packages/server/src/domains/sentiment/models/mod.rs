pub mod sentiment;
pub mod sentiment_analysis;

pub use sentiment::{Emotions, Sentiment, SentimentResult};
pub use sentiment_analysis::SentimentAnalysis;
