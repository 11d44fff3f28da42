//! Languages offered for translation, keyed by ISO 639-1 style code.

use serde::Serialize;
use std::borrow::Cow;

pub const DEFAULT_TARGET_NAME: &str = "English";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Language {
    pub code: &'static str,
    pub name: &'static str,
}

const LANGUAGES: &[(&str, &str)] = &[
    ("en", "English"),
    ("es", "Spanish"),
    ("fr", "French"),
    ("de", "German"),
    ("it", "Italian"),
    ("pt", "Portuguese"),
    ("ru", "Russian"),
    ("ja", "Japanese"),
    ("ko", "Korean"),
    ("zh", "Chinese"),
    ("ar", "Arabic"),
    ("hi", "Hindi"),
    ("tr", "Turkish"),
    ("pl", "Polish"),
    ("nl", "Dutch"),
    ("sv", "Swedish"),
    ("da", "Danish"),
    ("no", "Norwegian"),
    ("fi", "Finnish"),
    ("cs", "Czech"),
    ("hu", "Hungarian"),
    ("ro", "Romanian"),
    ("bg", "Bulgarian"),
    ("hr", "Croatian"),
    ("sk", "Slovak"),
    ("sl", "Slovenian"),
    ("et", "Estonian"),
    ("lv", "Latvian"),
    ("lt", "Lithuanian"),
    ("mt", "Maltese"),
    ("el", "Greek"),
    ("cy", "Welsh"),
    ("ga", "Irish"),
    ("is", "Icelandic"),
    ("mk", "Macedonian"),
    ("sq", "Albanian"),
    ("sr", "Serbian"),
    ("bs", "Bosnian"),
    ("me", "Montenegrin"),
    ("uk", "Ukrainian"),
    ("be", "Belarusian"),
    ("hy", "Armenian"),
    ("az", "Azerbaijani"),
    ("kk", "Kazakh"),
    ("ky", "Kyrgyz"),
    ("uz", "Uzbek"),
    ("tg", "Tajik"),
    ("mn", "Mongolian"),
    ("am", "Amharic"),
    ("sw", "Swahili"),
    ("zu", "Zulu"),
    ("af", "Afrikaans"),
    ("th", "Thai"),
    ("vi", "Vietnamese"),
    ("id", "Indonesian"),
    ("ms", "Malay"),
    ("tl", "Filipino"),
    ("he", "Hebrew"),
    ("fa", "Persian"),
    ("ur", "Urdu"),
    ("bn", "Bengali"),
    ("ta", "Tamil"),
    ("te", "Telugu"),
    ("ml", "Malayalam"),
    ("kn", "Kannada"),
    ("gu", "Gujarati"),
    ("pa", "Punjabi"),
    ("or", "Odia"),
    ("as", "Assamese"),
    ("ne", "Nepali"),
    ("si", "Sinhala"),
    ("my", "Myanmar"),
    ("km", "Khmer"),
    ("lo", "Lao"),
];

/// Display name for a code; unknown codes come back uppercased
pub fn language_name(code: &str) -> Cow<'static, str> {
    match lookup(code) {
        Some(name) => Cow::Borrowed(name),
        None => Cow::Owned(code.to_uppercase()),
    }
}

/// Name to translate into; unknown codes translate to English
pub fn target_language_name(code: &str) -> &'static str {
    lookup(code).unwrap_or(DEFAULT_TARGET_NAME)
}

pub fn supported_languages() -> Vec<Language> {
    LANGUAGES
        .iter()
        .map(|&(code, name)| Language { code, name })
        .collect()
}

fn lookup(code: &str) -> Option<&'static str> {
    LANGUAGES
        .iter()
        .find(|(known, _)| *known == code)
        .map(|&(_, name)| name)
}
