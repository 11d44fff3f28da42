//! Sentiment domain - scores comment text with the hosted model and stores
//! one analysis per comment.

pub mod activities;
pub mod models;

pub use models::{Emotions, Sentiment, SentimentAnalysis, SentimentResult};
