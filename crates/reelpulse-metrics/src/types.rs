//! Wire types for the three dashboard endpoints.
//!
//! The dashboard API may send `null` for any field and floats for counts, so
//! flags and numbers go through the lenient [`wire`] deserializers.

use chrono::{DateTime, NaiveDate, Utc};
use reelpulse_core::wire;
use serde::{Deserialize, Deserializer, Serialize};

/// Reporting window selected in the dashboard tabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Day,
    Week,
    #[default]
    Month,
}

impl Period {
    pub const ALL: [Period; 3] = [Period::Day, Period::Week, Period::Month];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Period::Day => "day",
            Period::Week => "week",
            Period::Month => "month",
        }
    }

    /// How many days of history the historical endpoint is asked for.
    #[must_use]
    pub fn history_days(self) -> u32 {
        match self {
            Period::Day => 7,
            Period::Week => 30,
            Period::Month => 90,
        }
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Period {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "day" => Ok(Period::Day),
            "week" => Ok(Period::Week),
            "month" => Ok(Period::Month),
            other => Err(format!("unknown period '{other}'; expected day, week, or month")),
        }
    }
}

/// One platform account as returned by `GET /api/social-accounts`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountSnapshot {
    #[serde(default, deserialize_with = "wire::null_as_default")]
    pub platform: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default, deserialize_with = "wire::null_as_default")]
    pub is_connected: bool,
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default, alias = "followers", deserialize_with = "wire::optional_count")]
    pub followers_count: Option<u64>,
    #[serde(default)]
    pub avg_engagement: Option<f64>,
    #[serde(default, deserialize_with = "wire::optional_count")]
    pub total_reach: Option<u64>,
    #[serde(default, alias = "posts", deserialize_with = "wire::optional_count")]
    pub media_count: Option<u64>,
}

impl AccountSnapshot {
    /// An account is shown when it is flagged connected, has an audience, or
    /// holds a token.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.is_connected
            || self.followers_count.unwrap_or(0) > 0
            || self.access_token.as_deref().is_some_and(|t| !t.is_empty())
    }
}

/// Totals from `GET /api/dashboard/analytics`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsSummary {
    #[serde(default, deserialize_with = "wire::optional_count")]
    pub total_followers: Option<u64>,
    #[serde(default, deserialize_with = "wire::optional_count")]
    pub total_reach: Option<u64>,
    #[serde(default, deserialize_with = "wire::optional_count")]
    pub total_posts: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordedScore {
    #[serde(default)]
    pub score: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordMetrics {
    #[serde(default)]
    pub posts: Option<f64>,
    #[serde(default)]
    pub content_score: Option<RecordedScore>,
}

/// One past snapshot from `GET /api/analytics/historical`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalRecord {
    #[serde(deserialize_with = "deserialize_record_date")]
    pub date: DateTime<Utc>,
    #[serde(default, deserialize_with = "wire::null_as_default")]
    pub followers: f64,
    #[serde(default, deserialize_with = "wire::null_as_default")]
    pub engagement: f64,
    #[serde(default, deserialize_with = "wire::null_as_default")]
    pub reach: f64,
    #[serde(default)]
    pub metrics: Option<RecordMetrics>,
}

impl HistoricalRecord {
    #[must_use]
    pub fn posts(&self) -> Option<f64> {
        self.metrics.as_ref().and_then(|m| m.posts)
    }

    #[must_use]
    pub fn content_score(&self) -> Option<f64> {
        self.metrics
            .as_ref()
            .and_then(|m| m.content_score.as_ref())
            .and_then(|s| s.score)
    }
}

/// Current aggregate values the growth figures are measured against.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CurrentTotals {
    pub followers: u64,
    pub engagement: f64,
    pub reach: u64,
    pub posts: u64,
}

/// Accepts RFC 3339 timestamps and bare `YYYY-MM-DD` dates (midnight UTC).
fn deserialize_record_date<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_record_date(&raw).ok_or_else(|| {
        serde::de::Error::custom(format!("unrecognised historical record date '{raw}'"))
    })
}

pub(crate) fn parse_record_date(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn period_history_days() {
        assert_eq!(Period::Day.history_days(), 7);
        assert_eq!(Period::Week.history_days(), 30);
        assert_eq!(Period::Month.history_days(), 90);
    }

    #[test]
    fn period_parses_case_insensitively() {
        assert_eq!("WEEK".parse::<Period>(), Ok(Period::Week));
        assert!("year".parse::<Period>().is_err());
    }

    #[test]
    fn account_accepts_alias_fields() {
        let account: AccountSnapshot = serde_json::from_value(serde_json::json!({
            "platform": "youtube",
            "followers": 12,
            "posts": 4
        }))
        .expect("deserialize");
        assert_eq!(account.followers_count, Some(12));
        assert_eq!(account.media_count, Some(4));
        assert!(account.is_active());
    }

    #[test]
    fn account_tolerates_null_flag_and_float_counts() {
        let accounts: Vec<AccountSnapshot> = serde_json::from_value(serde_json::json!([
            {
                "platform": "instagram",
                "isConnected": null,
                "followersCount": 4,
                "totalReach": 135.0,
                "mediaCount": 2.4
            },
            { "platform": "tiktok", "isConnected": true, "followersCount": null }
        ]))
        .expect("deserialize");

        assert!(!accounts[0].is_connected);
        assert_eq!(accounts[0].total_reach, Some(135));
        assert_eq!(accounts[0].media_count, Some(2));
        assert!(accounts[0].is_active());
        assert_eq!(accounts[1].followers_count, None);
        assert!(accounts[1].is_active());
    }

    #[test]
    fn analytics_totals_accept_floats_and_nulls() {
        let summary: AnalyticsSummary = serde_json::from_value(serde_json::json!({
            "totalFollowers": 1200.0,
            "totalReach": null,
            "totalPosts": 7
        }))
        .expect("deserialize");
        assert_eq!(summary.total_followers, Some(1200));
        assert_eq!(summary.total_reach, None);
        assert_eq!(summary.total_posts, Some(7));
    }

    #[test]
    fn account_without_signals_is_inactive() {
        let account = AccountSnapshot {
            platform: "twitter".to_string(),
            access_token: Some(String::new()),
            ..AccountSnapshot::default()
        };
        assert!(!account.is_active());
    }

    #[test]
    fn record_date_accepts_plain_dates_and_timestamps() {
        let plain = parse_record_date("2025-03-01").expect("plain date");
        let stamped = parse_record_date("2025-03-01T00:00:00Z").expect("timestamp");
        assert_eq!(plain, stamped);
        assert!(parse_record_date("March 1st").is_none());
    }

    #[test]
    fn record_nested_metrics_are_optional() {
        let record: HistoricalRecord = serde_json::from_value(serde_json::json!({
            "date": "2025-03-01",
            "followers": 10,
            "engagement": 2.5,
            "reach": 40
        }))
        .expect("deserialize");
        assert_eq!(record.posts(), None);
        assert_eq!(record.content_score(), None);
    }

    #[test]
    fn record_null_values_read_as_zero() {
        let record: HistoricalRecord = serde_json::from_value(serde_json::json!({
            "date": "2025-03-01",
            "followers": null,
            "engagement": null,
            "reach": null
        }))
        .expect("deserialize");
        assert!(record.followers.abs() < f64::EPSILON);
        assert!(record.engagement.abs() < f64::EPSILON);
        assert!(record.reach.abs() < f64::EPSILON);
    }
}
