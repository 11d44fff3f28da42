//! Kernel module - server infrastructure and dependencies.

pub mod ai;
pub mod deps;
pub mod test_dependencies;
pub mod traits;

pub use ai::HostedModel;
pub use deps::{ServerDeps, YoutubeAdapter};
pub use test_dependencies::{MockAI, MockCommentSource, TestDependencies};
pub use traits::*;
