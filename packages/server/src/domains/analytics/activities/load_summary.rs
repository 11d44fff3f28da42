use anyhow::{Context, Result};
use chrono::{Duration, Utc};
use std::num::NonZeroU32;
use tracing::debug;

use crate::domains::analytics::aggregate::{aggregate, AggregateSummary};
use crate::domains::analytics::models::SentimentRecord;
use crate::kernel::ServerDeps;

/// Aggregate every analysis from the trailing `window_days`, optionally for
/// one platform.
pub async fn load_summary(
    window_days: NonZeroU32,
    platform: Option<&str>,
    deps: &ServerDeps,
) -> Result<AggregateSummary> {
    let since = Utc::now() - Duration::days(i64::from(window_days.get()));

    let records = SentimentRecord::find_records_since(since, platform, &deps.db_pool)
        .await
        .context("Failed to load sentiment records")?;

    debug!(
        window_days = window_days.get(),
        platform = platform.unwrap_or("all"),
        records = records.len(),
        "Aggregating sentiment window"
    );

    Ok(aggregate(&records, window_days, platform))
}
