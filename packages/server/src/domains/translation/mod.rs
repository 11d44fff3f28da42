//! Translation domain - translating comments and detecting their language
//! with the hosted model.

pub mod activities;
pub mod languages;
pub mod models;

pub use languages::{language_name, supported_languages, Language};
pub use models::{LanguageDetection, TranslationResult};
