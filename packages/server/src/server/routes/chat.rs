use axum::extract::rejection::JsonRejection;
use axum::extract::Extension;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use crate::domains::chat::activities::{respond, ChatError, ChatMessage, ChatReply};
use crate::server::app::AppState;
use crate::server::error::{ApiError, ApiResult};

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
}

/// POST /api/chat
pub async fn chat_handler(
    Extension(state): Extension<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> ApiResult<Json<ChatReply>> {
    let Json(request) = payload?;

    match respond(&request.messages, &state.deps).await {
        Ok(reply) => Ok(Json(reply)),
        Err(ChatError::Context(e)) => Err(ApiError::internal("Failed to load analytics", &e)),
        Err(ChatError::Model(_)) => Err(ApiError::Upstream {
            status: StatusCode::BAD_GATEWAY,
            message: "Failed to generate response".to_string(),
        }),
    }
}
