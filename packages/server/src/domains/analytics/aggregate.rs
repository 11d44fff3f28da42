//! Rollup of scored comments into overall, daily and per-platform counts.
//!
//! Pure and synchronous. Callers fetch records already restricted to the
//! window (the store query does that); this module never re-filters by time.

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;
use std::num::NonZeroU32;

use super::models::SentimentRecord;
use crate::domains::sentiment::Sentiment;

/// Count per sentiment label
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SentimentCounts {
    pub positive: u64,
    pub negative: u64,
    pub neutral: u64,
}

impl SentimentCounts {
    pub fn get(&self, sentiment: Sentiment) -> u64 {
        match sentiment {
            Sentiment::Positive => self.positive,
            Sentiment::Negative => self.negative,
            Sentiment::Neutral => self.neutral,
        }
    }

    pub fn sum(&self) -> u64 {
        self.positive + self.negative + self.neutral
    }

    fn increment(&mut self, sentiment: Sentiment) {
        match sentiment {
            Sentiment::Positive => self.positive += 1,
            Sentiment::Negative => self.negative += 1,
            Sentiment::Neutral => self.neutral += 1,
        }
    }
}

/// Per-day or per-platform bucket: label counts plus their total
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BucketCounts {
    #[serde(flatten)]
    pub counts: SentimentCounts,
    pub total: u64,
}

impl BucketCounts {
    fn record(&mut self, sentiment: Sentiment) {
        self.counts.increment(sentiment);
        self.total += 1;
    }
}

/// Derived view over one window of records. Rebuilt per request.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateSummary {
    pub window_days: NonZeroU32,
    pub total_count: u64,
    pub sentiment_counts: SentimentCounts,
    /// Mean confidence; 0.0 when there are no records
    pub average_confidence: f64,
    /// Keyed by UTC calendar day of `analyzed_at`, ascending
    pub daily_trend: BTreeMap<NaiveDate, BucketCounts>,
    pub platform_distribution: BTreeMap<String, BucketCounts>,
}

impl AggregateSummary {
    pub fn empty(window_days: NonZeroU32) -> Self {
        Self {
            window_days,
            total_count: 0,
            sentiment_counts: SentimentCounts::default(),
            average_confidence: 0.0,
            daily_trend: BTreeMap::new(),
            platform_distribution: BTreeMap::new(),
        }
    }

    /// Platforms ordered by bucket total, largest first.
    ///
    /// Equal totals keep name order, so the ranking does not depend on which
    /// records happened to be sampled first.
    pub fn platforms_by_volume(&self) -> Vec<(&str, u64)> {
        let mut platforms: Vec<(&str, u64)> = self
            .platform_distribution
            .iter()
            .map(|(name, bucket)| (name.as_str(), bucket.total))
            .collect();
        platforms.sort_by(|a, b| b.1.cmp(&a.1));
        platforms
    }
}

/// Fold `records` into an [`AggregateSummary`].
///
/// With `platform_filter`, records from other platforms are dropped before
/// counting, so the result equals aggregating a pre-filtered list.
pub fn aggregate(
    records: &[SentimentRecord],
    window_days: NonZeroU32,
    platform_filter: Option<&str>,
) -> AggregateSummary {
    let mut summary = AggregateSummary::empty(window_days);
    let mut confidence_sum = 0.0;

    let included = records
        .iter()
        .filter(|r| platform_filter.map_or(true, |p| r.platform == p));

    for record in included {
        summary.total_count += 1;
        summary.sentiment_counts.increment(record.sentiment);
        confidence_sum += record.confidence;

        summary
            .daily_trend
            .entry(record.analyzed_at.date_naive())
            .or_default()
            .record(record.sentiment);
        summary
            .platform_distribution
            .entry(record.platform.clone())
            .or_default()
            .record(record.sentiment);
    }

    if summary.total_count > 0 {
        summary.average_confidence = confidence_sum / summary.total_count as f64;
    }

    summary
}
