// HTTP routes
pub mod analytics;
pub mod chat;
pub mod comments;
pub mod health;
pub mod sentiment;
pub mod translation;
pub mod youtube;

pub use analytics::analytics_handler;
pub use chat::chat_handler;
pub use comments::{create_comment_handler, list_comments_handler};
pub use health::health_handler;
pub use sentiment::analyze_sentiment_handler;
pub use translation::{languages_handler, translate_handler};
pub use youtube::youtube_comments_handler;
