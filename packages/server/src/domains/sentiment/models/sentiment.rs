use anyhow::{bail, Result};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Sentiment label assigned to a comment
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, sqlx::Type,
)]
#[sqlx(type_name = "sentiment", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    pub const ALL: [Sentiment; 3] = [Sentiment::Positive, Sentiment::Negative, Sentiment::Neutral];

    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Negative => "negative",
            Sentiment::Neutral => "neutral",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sentiment {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "positive" => Ok(Sentiment::Positive),
            "negative" => Ok(Sentiment::Negative),
            "neutral" => Ok(Sentiment::Neutral),
            other => bail!("unknown sentiment '{}'", other),
        }
    }
}

/// Per-emotion intensity, each in [0, 1]
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Emotions {
    pub joy: f64,
    pub anger: f64,
    pub fear: f64,
    pub sadness: f64,
    pub surprise: f64,
    pub disgust: f64,
}

impl Emotions {
    fn named(&self) -> [(&'static str, f64); 6] {
        [
            ("joy", self.joy),
            ("anger", self.anger),
            ("fear", self.fear),
            ("sadness", self.sadness),
            ("surprise", self.surprise),
            ("disgust", self.disgust),
        ]
    }
}

/// Model output for one scored text
///
/// Also the structured-output schema sent to the model, so field names and
/// doc comments here are what the model sees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SentimentResult {
    /// Overall sentiment of the text
    pub sentiment: Sentiment,
    /// Certainty of the classification, 0 to 1
    pub confidence: f64,
    /// Emotion intensities, 0 to 1 each
    pub emotions: Emotions,
    /// Words or phrases that drove the classification
    pub keywords: Vec<String>,
    /// One or two sentences explaining the classification
    pub reasoning: String,
}

impl SentimentResult {
    /// Neutral result used whenever scoring fails
    pub fn fallback(reason: impl Into<String>) -> Self {
        Self {
            sentiment: Sentiment::Neutral,
            confidence: 0.5,
            emotions: Emotions::default(),
            keywords: Vec::new(),
            reasoning: reason.into(),
        }
    }

    /// Enforce the numeric bounds the schema cannot express in strict mode
    pub fn validate(self) -> Result<Self> {
        if !in_unit_range(self.confidence) {
            bail!("confidence {} outside [0, 1]", self.confidence);
        }
        for (name, value) in self.emotions.named() {
            if !in_unit_range(value) {
                bail!("emotion '{}' score {} outside [0, 1]", name, value);
            }
        }
        Ok(self)
    }
}

fn in_unit_range(value: f64) -> bool {
    (0.0..=1.0).contains(&value)
}
