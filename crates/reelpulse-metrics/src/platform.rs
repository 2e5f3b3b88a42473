//! Connected-platform mapping and dashboard totals.

use serde::Serialize;

use crate::types::{AccountSnapshot, AnalyticsSummary, CurrentTotals};

/// Display data for one connected account.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConnectedPlatform {
    pub name: &'static str,
    pub logo: &'static str,
    pub username: Option<String>,
    pub followers: u64,
    /// Engagement rate in percent, rounded to one decimal.
    pub engagement: f64,
    pub reach: u64,
    pub posts: u64,
}

/// Display name and glyph for a platform key. Unknown keys render as Facebook.
#[must_use]
pub fn platform_branding(platform: &str) -> (&'static str, &'static str) {
    match platform {
        "instagram" => ("Instagram", "📷"),
        "youtube" => ("YouTube", "🎥"),
        "twitter" => ("Twitter", "🐦"),
        "linkedin" => ("LinkedIn", "💼"),
        _ => ("Facebook", "📘"),
    }
}

/// Filter accounts down to the active ones and map them for display.
#[must_use]
pub fn connected_platforms(accounts: &[AccountSnapshot]) -> Vec<ConnectedPlatform> {
    accounts
        .iter()
        .filter(|a| a.is_active())
        .map(|a| {
            let (name, logo) = platform_branding(&a.platform);
            ConnectedPlatform {
                name,
                logo,
                username: a.username.clone(),
                followers: a.followers_count.unwrap_or(0),
                engagement: a.avg_engagement.map_or(0.0, round_one_decimal),
                reach: a.total_reach.unwrap_or(0),
                posts: a.media_count.unwrap_or(0),
            }
        })
        .collect()
}

/// Aggregate the current totals shown on the dashboard.
///
/// Summary totals win when present and non-zero; otherwise the per-platform
/// values are summed. Engagement is the first platform's rate.
#[must_use]
pub fn dashboard_totals(
    summary: Option<&AnalyticsSummary>,
    platforms: &[ConnectedPlatform],
) -> CurrentTotals {
    let pick = |total: Option<u64>, fallback: fn(&ConnectedPlatform) -> u64| -> u64 {
        total
            .filter(|v| *v > 0)
            .unwrap_or_else(|| platforms.iter().map(fallback).sum())
    };

    CurrentTotals {
        followers: pick(summary.and_then(|s| s.total_followers), |p| p.followers),
        reach: pick(summary.and_then(|s| s.total_reach), |p| p.reach),
        posts: pick(summary.and_then(|s| s.total_posts), |p| p.posts),
        engagement: platforms.first().map_or(0.0, |p| p.engagement),
    }
}

fn round_one_decimal(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(platform: &str, followers: u64, engagement: f64, reach: u64, posts: u64) -> AccountSnapshot {
        AccountSnapshot {
            platform: platform.to_string(),
            is_connected: true,
            followers_count: Some(followers),
            avg_engagement: Some(engagement),
            total_reach: Some(reach),
            media_count: Some(posts),
            ..AccountSnapshot::default()
        }
    }

    #[test]
    fn unknown_platform_falls_back_to_facebook() {
        assert_eq!(platform_branding("myspace"), ("Facebook", "📘"));
        assert_eq!(platform_branding("youtube"), ("YouTube", "🎥"));
    }

    #[test]
    fn inactive_accounts_are_dropped() {
        let accounts = vec![
            account("instagram", 4, 566.66, 135, 15),
            AccountSnapshot {
                platform: "twitter".to_string(),
                ..AccountSnapshot::default()
            },
        ];
        let platforms = connected_platforms(&accounts);
        assert_eq!(platforms.len(), 1);
        assert_eq!(platforms[0].name, "Instagram");
        assert!((platforms[0].engagement - 566.7).abs() < 1e-9);
    }

    #[test]
    fn summary_totals_take_precedence() {
        let platforms = connected_platforms(&[account("instagram", 4, 2.0, 135, 15)]);
        let summary = AnalyticsSummary {
            total_followers: Some(1_000),
            total_reach: Some(0),
            total_posts: None,
        };
        let totals = dashboard_totals(Some(&summary), &platforms);
        assert_eq!(totals.followers, 1_000);
        // zero and missing totals fall back to platform sums
        assert_eq!(totals.reach, 135);
        assert_eq!(totals.posts, 15);
        assert!((totals.engagement - 2.0).abs() < 1e-9);
    }

    #[test]
    fn totals_sum_platforms_without_summary() {
        let platforms = connected_platforms(&[
            account("instagram", 4, 3.0, 100, 1),
            account("youtube", 6, 9.0, 50, 2),
        ]);
        let totals = dashboard_totals(None, &platforms);
        assert_eq!(totals.followers, 10);
        assert_eq!(totals.reach, 150);
        assert_eq!(totals.posts, 3);
        assert!((totals.engagement - 3.0).abs() < 1e-9);
    }

    #[test]
    fn no_platforms_means_zero_engagement() {
        let totals = dashboard_totals(None, &[]);
        assert_eq!(totals, CurrentTotals::default());
    }
}
