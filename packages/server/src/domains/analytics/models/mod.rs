pub mod record;

pub use record::{SampledRecord, SentimentRecord};
