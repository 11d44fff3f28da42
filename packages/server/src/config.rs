use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;
use std::time::Duration;

pub const DEFAULT_SENTIMENT_API_BASE_URL: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_SENTIMENT_MODEL: &str = "llama-3.1-70b-versatile";
pub const DEFAULT_TRANSLATION_API_BASE_URL: &str =
    "https://generativelanguage.googleapis.com/v1beta/openai";
pub const DEFAULT_TRANSLATION_MODEL: &str = "gemini-pro";

/// Hosted model endpoint settings.
#[derive(Debug, Clone)]
pub struct ModelEndpoint {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
}

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub database_max_connections: u32,
    pub port: u16,
    /// Sentiment scoring and chat (Groq, OpenAI-compatible)
    pub sentiment: ModelEndpoint,
    /// Translation and language detection (Gemini, OpenAI-compatible)
    pub translation: ModelEndpoint,
    pub llm_timeout: Duration,
    pub youtube_api_key: Option<String>,
    /// Empty means any origin is allowed
    pub allowed_origins: Vec<String>,
    /// Requests per second per client IP; `None` disables rate limiting
    pub rate_limit_per_second: Option<u64>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            database_url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            database_max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .context("DATABASE_MAX_CONNECTIONS must be a valid number")?,
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            sentiment: ModelEndpoint {
                api_key: env::var("GROQ_API_KEY").context("GROQ_API_KEY must be set")?,
                base_url: env_or("SENTIMENT_API_BASE_URL", DEFAULT_SENTIMENT_API_BASE_URL),
                model: env_or("SENTIMENT_MODEL", DEFAULT_SENTIMENT_MODEL),
            },
            translation: ModelEndpoint {
                api_key: env::var("GEMINI_API_KEY").context("GEMINI_API_KEY must be set")?,
                base_url: env_or("TRANSLATION_API_BASE_URL", DEFAULT_TRANSLATION_API_BASE_URL),
                model: env_or("TRANSLATION_MODEL", DEFAULT_TRANSLATION_MODEL),
            },
            llm_timeout: Duration::from_secs(
                env::var("LLM_TIMEOUT_SECS")
                    .unwrap_or_else(|_| "30".to_string())
                    .parse()
                    .context("LLM_TIMEOUT_SECS must be a valid number")?,
            ),
            youtube_api_key: env::var("YOUTUBE_API_KEY").ok().filter(|k| !k.is_empty()),
            allowed_origins: parse_list(&env::var("ALLOWED_ORIGINS").unwrap_or_default()),
            rate_limit_per_second: env::var("RATE_LIMIT_PER_SECOND")
                .ok()
                .map(|v| v.parse())
                .transpose()
                .context("RATE_LIMIT_PER_SECOND must be a valid number")?
                .filter(|rps| *rps > 0),
        })
    }
}

fn env_or(name: &str, default: &str) -> String {
    env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Split a comma-separated list, dropping blanks.
fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
