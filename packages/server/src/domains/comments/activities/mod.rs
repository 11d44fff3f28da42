//! Comments domain activities

mod collect_comment;
mod queries;

pub use collect_comment::collect_comment;
pub use queries::list_comments;
