//! Translation and language detection via the hosted model

use anyhow::{Context, Result};
use openai_client::{strip_code_blocks, StructuredOutput};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::common::{truncate_chars, CommentId};
use crate::domains::comments::Comment;
use crate::domains::translation::languages::target_language_name;
use crate::domains::translation::models::{LanguageDetection, TranslationResult};
use crate::kernel::{BaseAI, ServerDeps};

const TRANSLATE_SYSTEM_PROMPT: &str = "You translate social media comments. \
Preserve tone, slang and emoji. Also detect the original language and give your confidence.";

const DETECT_SYSTEM_PROMPT: &str = "You identify the language of social media comments.";

async fn request<T: StructuredOutput>(system: &str, user: &str, ai: &dyn BaseAI) -> Result<T> {
    let raw = ai
        .generate_structured(system, user, T::strict_schema())
        .await?;
    parse(&raw)
}

fn parse<T: DeserializeOwned>(raw: &str) -> Result<T> {
    serde_json::from_str(strip_code_blocks(raw))
        .context("Model response did not match the expected shape")
}

/// Translate `text` into the language with code `target_code`.
///
/// Unknown target codes translate to English. Failures return the input
/// text unchanged with language "unknown".
pub async fn translate_text(text: &str, target_code: &str, ai: &dyn BaseAI) -> TranslationResult {
    let target = target_language_name(target_code);
    let user = format!("Translate the following text to {}.\n\nText: \"{}\"", target, text);

    let outcome = request::<TranslationResult>(TRANSLATE_SYSTEM_PROMPT, &user, ai)
        .await
        .and_then(TranslationResult::validate);

    match outcome {
        Ok(result) => {
            debug!(
                target_language = target,
                detected = %result.detected_language,
                "Translated text"
            );
            result
        }
        Err(e) => {
            warn!(
                error = %e,
                target_language = target,
                text_preview = %truncate_chars(text, 80),
                "Translation failed, returning input text"
            );
            TranslationResult::fallback(text)
        }
    }
}

/// Detect the language of `text`, falling back to English at 0.5.
pub async fn detect_language(text: &str, ai: &dyn BaseAI) -> LanguageDetection {
    let user = format!("Detect the language of the following text.\n\nText: \"{}\"", text);

    let outcome = request::<LanguageDetection>(DETECT_SYSTEM_PROMPT, &user, ai)
        .await
        .and_then(LanguageDetection::validate);

    outcome.unwrap_or_else(|e| {
        warn!(error = %e, "Language detection failed, defaulting to English");
        LanguageDetection::fallback()
    })
}

/// Store a translation and its detected source language on a comment.
///
/// Returns None when the comment does not exist.
pub async fn store_translation(
    comment_id: CommentId,
    result: &TranslationResult,
    deps: &ServerDeps,
) -> Result<Option<Comment>> {
    Comment::update_translation(
        comment_id,
        &result.translated_text,
        &result.detected_language,
        &deps.db_pool,
    )
    .await
    .context("Failed to save translation")
}
