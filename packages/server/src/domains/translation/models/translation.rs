use anyhow::{bail, Result};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Model output for a translation request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TranslationResult {
    /// The text in the target language
    pub translated_text: String,
    /// Code of the source language, e.g. "en"
    pub detected_language: String,
    /// Certainty of the detection, 0 to 1
    pub confidence: f64,
}

impl TranslationResult {
    /// Returned when translation fails: the input text, language unknown
    pub fn fallback(text: &str) -> Self {
        Self {
            translated_text: text.to_string(),
            detected_language: "unknown".to_string(),
            confidence: 0.0,
        }
    }

    pub fn validate(self) -> Result<Self> {
        check_confidence(self.confidence)?;
        if self.detected_language.trim().is_empty() {
            bail!("detected language is empty");
        }
        Ok(self)
    }
}

/// Model output for a language detection request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct LanguageDetection {
    /// Language code, e.g. "en"
    pub language: String,
    /// Certainty of the detection, 0 to 1
    pub confidence: f64,
}

impl LanguageDetection {
    /// Returned when detection fails
    pub fn fallback() -> Self {
        Self {
            language: "en".to_string(),
            confidence: 0.5,
        }
    }

    pub fn validate(self) -> Result<Self> {
        check_confidence(self.confidence)?;
        if self.language.trim().is_empty() {
            bail!("language is empty");
        }
        Ok(self)
    }
}

fn check_confidence(confidence: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&confidence) {
        bail!("confidence {} outside [0, 1]", confidence);
    }
    Ok(())
}
