use axum::extract::rejection::JsonRejection;
use axum::extract::Extension;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::common::CommentId;
use crate::domains::comments::Comment;
use crate::domains::sentiment::activities::{
    analyze_sentiment, analyze_sentiment_batch, score_comment,
};
use crate::domains::sentiment::SentimentResult;
use crate::server::app::AppState;
use crate::server::error::{ApiError, ApiResult};

pub const MAX_BATCH_SIZE: usize = 100;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeSentimentRequest {
    pub text: Option<String>,
    pub texts: Option<Vec<String>>,
    pub comment_id: Option<CommentId>,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub result: SentimentResult,
}

#[derive(Debug, Serialize)]
pub struct BatchAnalyzeResponse {
    pub results: Vec<SentimentResult>,
}

/// POST /api/analyze-sentiment
///
/// `{texts: [...]}` scores a batch; `{text, commentId?}` scores one text and
/// stores the analysis when a comment id is given.
pub async fn analyze_sentiment_handler(
    Extension(state): Extension<AppState>,
    payload: Result<Json<AnalyzeSentimentRequest>, JsonRejection>,
) -> ApiResult<Response> {
    let Json(request) = payload?;
    let ai = state.deps.sentiment_ai.as_ref();

    if let Some(texts) = request.texts {
        if texts.len() > MAX_BATCH_SIZE {
            return Err(ApiError::bad_request(format!(
                "At most {} texts per batch",
                MAX_BATCH_SIZE
            )));
        }
        let results = analyze_sentiment_batch(&texts, ai).await;
        return Ok(Json(BatchAnalyzeResponse { results }).into_response());
    }

    let text = request
        .text
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| ApiError::bad_request("Text or texts array is required"))?;

    let result = match request.comment_id {
        Some(comment_id) => {
            let exists = Comment::find_by_id(comment_id, &state.db_pool)
                .await
                .map_err(|e| ApiError::internal("Failed to save analysis", &e))?
                .is_some();
            if !exists {
                return Err(ApiError::NotFound("Comment not found".to_string()));
            }

            let (result, _) = score_comment(comment_id, &text, &state.deps)
                .await
                .map_err(|e| ApiError::internal("Failed to save analysis", &e))?;
            result
        }
        None => analyze_sentiment(&text, ai).await,
    };

    Ok(Json(AnalyzeResponse { result }).into_response())
}
