//! Translation domain activities

mod translate;

pub use translate::{detect_language, store_translation, translate_text};
