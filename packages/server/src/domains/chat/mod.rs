//! Chat domain - an assistant that answers questions about recent sentiment,
//! grounded in a rendered analytics summary.

pub mod activities;
pub mod context;

pub use context::build_analytics_context;
