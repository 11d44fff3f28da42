// Common types and utilities shared across the application

pub mod entity_ids;
pub mod id;
pub mod pagination;
pub mod query;
pub mod text;

pub use entity_ids::*;
pub use id::Id;
pub use pagination::{Page, PaginationArgs};
pub use query::empty_string_as_none;
pub use text::*;
