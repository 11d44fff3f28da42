pub mod translation;

pub use translation::{LanguageDetection, TranslationResult};
