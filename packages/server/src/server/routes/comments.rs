use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Extension, Query};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::common::{empty_string_as_none, Page, PaginationArgs};
use crate::domains::comments::activities::{collect_comment, list_comments};
use crate::domains::comments::{CommentFilter, CommentWithSentiment, NewComment};
use crate::domains::sentiment::Sentiment;
use crate::server::app::AppState;
use crate::server::error::{ApiError, ApiResult};

#[derive(Debug, Deserialize)]
pub struct ListCommentsQuery {
    pub platform: Option<String>,
    pub sentiment: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub limit: Option<i64>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub offset: Option<i64>,
}

impl ListCommentsQuery {
    /// Defaults and bounds applied
    pub fn page(&self) -> Page {
        PaginationArgs {
            limit: self.limit,
            offset: self.offset,
        }
        .validate()
    }
}

#[derive(Debug, Serialize)]
pub struct CommentsResponse {
    pub comments: Vec<CommentWithSentiment>,
}

#[derive(Debug, Serialize)]
pub struct CommentResponse {
    pub comment: CommentWithSentiment,
}

/// GET /api/comments
pub async fn list_comments_handler(
    Extension(state): Extension<AppState>,
    query: Result<Query<ListCommentsQuery>, QueryRejection>,
) -> ApiResult<Json<CommentsResponse>> {
    let Query(query) = query?;

    let sentiment = query
        .sentiment
        .as_deref()
        .filter(|s| !s.is_empty())
        .map(str::parse::<Sentiment>)
        .transpose()
        .map_err(|e| ApiError::bad_request(e.to_string()))?;

    let filter = CommentFilter {
        platform: query.platform.clone().filter(|p| !p.is_empty()),
        sentiment,
    };

    let page = query.page();

    let comments = list_comments(&filter, page, &state.deps)
        .await
        .map_err(|e| ApiError::internal("Failed to list comments", &e))?;

    Ok(Json(CommentsResponse { comments }))
}

/// POST /api/comments
pub async fn create_comment_handler(
    Extension(state): Extension<AppState>,
    payload: Result<Json<NewComment>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<CommentResponse>)> {
    let Json(input) = payload?;
    input
        .validate()
        .map_err(|e| ApiError::bad_request(e.to_string()))?;

    let comment = collect_comment(input, &state.deps)
        .await
        .map_err(|e| ApiError::internal("Failed to create comment", &e))?;

    Ok((StatusCode::CREATED, Json(CommentResponse { comment })))
}
