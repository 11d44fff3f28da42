use axum::extract::rejection::JsonRejection;
use axum::extract::Extension;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::common::CommentId;
use crate::domains::translation::activities::{
    detect_language, store_translation, translate_text,
};
use crate::domains::translation::{
    supported_languages, Language, LanguageDetection, TranslationResult,
};
use crate::server::app::AppState;
use crate::server::error::{ApiError, ApiResult};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TranslateAction {
    #[default]
    Translate,
    Detect,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslateRequest {
    pub text: Option<String>,
    pub target_language: Option<String>,
    pub comment_id: Option<CommentId>,
    #[serde(default)]
    pub action: TranslateAction,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum TranslateOutcome {
    Translation(TranslationResult),
    Detection(LanguageDetection),
}

#[derive(Debug, Serialize)]
pub struct TranslateResponse {
    pub result: TranslateOutcome,
}

#[derive(Debug, Serialize)]
pub struct LanguagesResponse {
    pub languages: Vec<Language>,
}

/// POST /api/translate
pub async fn translate_handler(
    Extension(state): Extension<AppState>,
    payload: Result<Json<TranslateRequest>, JsonRejection>,
) -> ApiResult<Json<TranslateResponse>> {
    let Json(request) = payload?;
    let ai = state.deps.translation_ai.as_ref();

    let text = request
        .text
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| ApiError::bad_request("Text is required"))?;

    if request.action == TranslateAction::Detect {
        let detection = detect_language(&text, ai).await;
        return Ok(Json(TranslateResponse {
            result: TranslateOutcome::Detection(detection),
        }));
    }

    let target = request
        .target_language
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| ApiError::bad_request("Target language is required for translation"))?;

    let result = translate_text(&text, &target, ai).await;

    if let Some(comment_id) = request.comment_id {
        let updated = store_translation(comment_id, &result, &state.deps)
            .await
            .map_err(|e| ApiError::internal("Failed to save translation", &e))?;
        if updated.is_none() {
            return Err(ApiError::NotFound("Comment not found".to_string()));
        }
    }

    Ok(Json(TranslateResponse {
        result: TranslateOutcome::Translation(result),
    }))
}

/// GET /api/languages
pub async fn languages_handler() -> Json<LanguagesResponse> {
    Json(LanguagesResponse {
        languages: supported_languages(),
    })
}
