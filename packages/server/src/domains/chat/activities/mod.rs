//! Chat domain activities

mod respond;

pub use respond::{
    latest_question, respond, ChatError, ChatMessage, ChatReply, CONTEXT_RECORD_LIMIT,
    CONTEXT_WINDOW_DAYS, DEFAULT_QUESTION,
};
