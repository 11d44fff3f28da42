use axum::extract::rejection::QueryRejection;
use axum::extract::{Extension, Query};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use youtube_client::YoutubeError;

use crate::server::app::AppState;
use crate::server::error::{ApiError, ApiResult};

pub const COMMENTS_PER_REQUEST: u32 = 50;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YoutubeCommentsQuery {
    pub video_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct YoutubeCommentsResponse {
    pub comments: Vec<String>,
}

/// GET /api/youtube-comments
pub async fn youtube_comments_handler(
    Extension(state): Extension<AppState>,
    query: Result<Query<YoutubeCommentsQuery>, QueryRejection>,
) -> ApiResult<Json<YoutubeCommentsResponse>> {
    let Query(query) = query?;

    let video_id = query
        .video_id
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| ApiError::bad_request("Missing videoId"))?;

    let source = state
        .deps
        .comment_source
        .as_ref()
        .ok_or_else(|| {
            ApiError::ServiceUnavailable("YouTube API key not configured".to_string())
        })?;

    let comments = source
        .fetch_comment_texts(&video_id, COMMENTS_PER_REQUEST)
        .await
        .map_err(map_fetch_error)?;

    Ok(Json(YoutubeCommentsResponse { comments }))
}

/// Upstream statuses pass through; anything else is a 500
fn map_fetch_error(error: anyhow::Error) -> ApiError {
    match error.downcast_ref::<YoutubeError>() {
        Some(YoutubeError::InvalidVideoId(id)) => {
            ApiError::bad_request(format!("Invalid videoId '{}'", id))
        }
        Some(youtube_error) => match youtube_error
            .status()
            .and_then(|code| StatusCode::from_u16(code).ok())
        {
            Some(status) => {
                tracing::warn!(status = %status, error = %youtube_error, "YouTube API error");
                ApiError::Upstream {
                    status,
                    message: "Failed to fetch comments".to_string(),
                }
            }
            None => ApiError::internal("Failed to fetch comments", &error),
        },
        None => ApiError::internal("Failed to fetch comments", &error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_status_passes_through() {
        let error = anyhow::Error::new(YoutubeError::Api {
            status: 403,
            message: "quotaExceeded".to_string(),
        });

        let api_error = map_fetch_error(error);

        assert_eq!(api_error.status(), StatusCode::FORBIDDEN);
        assert_eq!(api_error.to_string(), "Failed to fetch comments");
    }

    #[test]
    fn test_invalid_video_id_is_bad_request() {
        let error = anyhow::Error::new(YoutubeError::InvalidVideoId(" ".to_string()));
        assert_eq!(map_fetch_error(error).status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_unknown_errors_are_internal() {
        let error = anyhow::anyhow!("connection reset");
        assert_eq!(
            map_fetch_error(error).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
