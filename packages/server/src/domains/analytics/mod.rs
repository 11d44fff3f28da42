//! Analytics domain - rolls stored sentiment analyses up into overall,
//! daily and per-platform counts, and ranks keywords.

pub mod activities;
pub mod aggregate;
pub mod keywords;
pub mod models;

pub use aggregate::{aggregate, AggregateSummary, BucketCounts, SentimentCounts};
pub use keywords::{rank_keywords, top_keywords};
pub use models::{SampledRecord, SentimentRecord};
