use thiserror::Error;

pub type Result<T> = std::result::Result<T, YoutubeError>;

#[derive(Debug, Error)]
pub enum YoutubeError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("YouTube API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Invalid video id: {0:?}")]
    InvalidVideoId(String),
}

impl YoutubeError {
    /// Upstream HTTP status, when the API answered with an error.
    pub fn status(&self) -> Option<u16> {
        match self {
            YoutubeError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}
