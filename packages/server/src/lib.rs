// Comment Sentiment Service - API Core
//
// Collects social media comments, scores their sentiment and translates
// them through hosted language models, and serves analytics plus a chat
// assistant grounded in those analytics.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
