// Business domains
pub mod analytics;
pub mod chat;
pub mod comments;
pub mod sentiment;
pub mod translation;
