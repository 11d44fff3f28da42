use axum::extract::rejection::QueryRejection;
use axum::extract::{Extension, Query};
use axum::Json;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::num::NonZeroU32;

use crate::common::{empty_string_as_none, round2};
use crate::domains::analytics::activities::load_summary;
use crate::domains::analytics::{AggregateSummary, BucketCounts, SentimentCounts};
use crate::server::app::AppState;
use crate::server::error::{ApiError, ApiResult};

pub const DEFAULT_WINDOW_DAYS: i64 = 7;
pub const MAX_WINDOW_DAYS: i64 = 365;

#[derive(Debug, Deserialize)]
pub struct AnalyticsQuery {
    pub platform: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub days: Option<i64>,
}

impl AnalyticsQuery {
    /// Default 7, clamped to 1..=365
    pub fn window_days(&self) -> NonZeroU32 {
        let days = self
            .days
            .unwrap_or(DEFAULT_WINDOW_DAYS)
            .clamp(1, MAX_WINDOW_DAYS);
        NonZeroU32::new(days as u32).unwrap_or(NonZeroU32::MIN)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryView {
    pub total_comments: u64,
    pub sentiment_counts: SentimentCounts,
    pub avg_confidence: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsResponse {
    pub summary: SummaryView,
    pub daily_trends: BTreeMap<NaiveDate, BucketCounts>,
    pub platform_counts: BTreeMap<String, BucketCounts>,
}

impl From<AggregateSummary> for AnalyticsResponse {
    fn from(summary: AggregateSummary) -> Self {
        Self {
            summary: SummaryView {
                total_comments: summary.total_count,
                sentiment_counts: summary.sentiment_counts,
                avg_confidence: round2(summary.average_confidence),
            },
            daily_trends: summary.daily_trend,
            platform_counts: summary.platform_distribution,
        }
    }
}

/// GET /api/analytics
pub async fn analytics_handler(
    Extension(state): Extension<AppState>,
    query: Result<Query<AnalyticsQuery>, QueryRejection>,
) -> ApiResult<Json<AnalyticsResponse>> {
    let Query(query) = query?;
    let platform = query.platform.as_deref().filter(|p| !p.is_empty());

    let summary = load_summary(query.window_days(), platform, &state.deps)
        .await
        .map_err(|e| ApiError::internal("Failed to load analytics", &e))?;

    Ok(Json(summary.into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::analytics::{aggregate, SentimentRecord};
    use crate::domains::sentiment::Sentiment;
    use chrono::{TimeZone, Utc};

    fn query(days: Option<i64>) -> AnalyticsQuery {
        AnalyticsQuery {
            platform: None,
            days,
        }
    }

    #[test]
    fn test_window_days_default_and_clamp() {
        assert_eq!(query(None).window_days().get(), 7);
        assert_eq!(query(Some(30)).window_days().get(), 30);
        assert_eq!(query(Some(0)).window_days().get(), 1);
        assert_eq!(query(Some(-4)).window_days().get(), 1);
        assert_eq!(query(Some(10_000)).window_days().get(), 365);
    }

    fn parse(uri: &str) -> Result<AnalyticsQuery, QueryRejection> {
        let uri: axum::http::Uri = uri.parse().unwrap();
        Query::<AnalyticsQuery>::try_from_uri(&uri).map(|Query(query)| query)
    }

    #[test]
    fn test_blank_days_falls_back_to_default() {
        assert_eq!(parse("/api/analytics?days=").unwrap().window_days().get(), 7);
        assert_eq!(
            parse("/api/analytics?platform=&days=").unwrap().window_days().get(),
            7
        );
        assert_eq!(parse("/api/analytics?days=0").unwrap().window_days().get(), 1);
        assert!(parse("/api/analytics?days=soon").is_err());
    }

    #[test]
    fn test_envelope_shape() {
        let record = |sentiment, confidence, day| SentimentRecord {
            sentiment,
            confidence,
            analyzed_at: Utc.with_ymd_and_hms(2024, 1, day, 8, 30, 0).unwrap(),
            platform: "twitter".to_string(),
            keywords: vec![],
        };
        let records = vec![
            record(Sentiment::Positive, 0.9, 1),
            record(Sentiment::Negative, 0.4, 1),
            record(Sentiment::Neutral, 0.7, 2),
        ];
        let summary = aggregate(&records, NonZeroU32::new(7).unwrap(), None);

        let json = serde_json::to_value(AnalyticsResponse::from(summary)).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "summary": {
                    "totalComments": 3,
                    "sentimentCounts": {"positive": 1, "negative": 1, "neutral": 1},
                    "avgConfidence": 0.67
                },
                "dailyTrends": {
                    "2024-01-01": {"positive": 1, "negative": 1, "neutral": 0, "total": 2},
                    "2024-01-02": {"positive": 0, "negative": 0, "neutral": 1, "total": 1}
                },
                "platformCounts": {
                    "twitter": {"positive": 1, "negative": 1, "neutral": 1, "total": 3}
                }
            })
        );
    }
}
