//! Renderable view of the performance panel.
//!
//! [`render`] is the whole rendering contract: given the interaction state and
//! the latest query results it decides between the loading skeleton, the
//! onboarding call-to-action and the metrics grid, and fills in every label
//! and figure a front end needs.

use std::time::Instant;

use serde::Serialize;

use crate::feed::DashboardData;
use crate::growth::{calculate_growth, GrowthMetric, GrowthReport};
use crate::platform::{connected_platforms, dashboard_totals, ConnectedPlatform};
use crate::presenter::{Insight, PresenterState};
use crate::score::{calculate_content_score, ContentScore, ScoreInputs};
use crate::types::{CurrentTotals, Period};

/// Route the onboarding button sends the user to.
pub const CONNECT_ROUTE: &str = "/integration";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum DashboardView {
    /// The analytics query has not resolved yet.
    Loading,
    /// No platform is connected.
    Onboarding(Box<OnboardingPanel>),
    Metrics(Box<MetricsPanel>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PeriodTab {
    pub period: Period,
    pub label: &'static str,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PanelHeader {
    pub title: &'static str,
    pub tabs: Vec<PeriodTab>,
    pub insight: Option<InsightPanel>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InsightPanel {
    pub key: u64,
    #[serde(flatten)]
    pub content: Insight,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OnboardingPanel {
    pub header: PanelHeader,
    pub message: &'static str,
    pub action_label: &'static str,
    pub action_route: &'static str,
    pub suggested_logos: [&'static str; 4],
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricCard {
    pub label: &'static str,
    pub value: String,
    pub growth: GrowthMetric,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContentScorePanel {
    pub score: f64,
    pub rating: &'static str,
    pub bar_percent: f64,
    pub growth: Option<GrowthMetric>,
    pub caption: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostingFrequency {
    pub label: &'static str,
    pub cadence: &'static str,
    pub posts: u64,
    pub growth: GrowthMetric,
    pub caption: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsPanel {
    pub header: PanelHeader,
    pub active_platforms: usize,
    pub cards: [MetricCard; 4],
    pub platforms: Vec<ConnectedPlatform>,
    pub best_platform: Option<ConnectedPlatform>,
    pub content_score: ContentScorePanel,
    pub posting: PostingFrequency,
}

/// Build the view for the current state and data.
#[must_use]
pub fn render(state: &PresenterState, data: &DashboardData, now: Instant) -> DashboardView {
    if data.analytics.is_pending() {
        return DashboardView::Loading;
    }

    let period = state.period();
    let header = PanelHeader {
        title: "Performance Overview",
        tabs: Period::ALL
            .iter()
            .map(|&p| PeriodTab {
                period: p,
                label: tab_label(p),
                selected: p == period,
            })
            .collect(),
        insight: state.visible_insight(now).map(|content| InsightPanel {
            key: state.insight_key(),
            content: *content,
        }),
    };

    let accounts = data.accounts.data().map_or(&[][..], Vec::as_slice);
    let platforms = connected_platforms(accounts);

    if platforms.is_empty() {
        return DashboardView::Onboarding(Box::new(OnboardingPanel {
            header,
            message: "Start tracking your social media performance by connecting your accounts. \
                      Get insights on followers, engagement, reach, and more across all your platforms.",
            action_label: "Connect Your First Platform",
            action_route: CONNECT_ROUTE,
            suggested_logos: ["📷", "🎥", "🐦", "💼"],
        }));
    }

    let totals = dashboard_totals(data.analytics.data(), &platforms);
    let score = calculate_content_score(&ScoreInputs {
        avg_engagement: totals.engagement,
        total_posts: totals.posts,
        total_followers: totals.followers,
        total_reach: totals.reach,
        platform_count: platforms.len(),
    });
    let history = data.history.data().map_or(&[][..], Vec::as_slice);
    let growth = calculate_growth(history, &totals, score.rating.map(|_| score.score));

    DashboardView::Metrics(Box::new(MetricsPanel {
        header,
        active_platforms: platforms.len(),
        cards: metric_cards(period, &totals, &growth),
        best_platform: platforms.first().cloned(),
        content_score: content_score_panel(period, &score, growth.content_score.clone()),
        posting: PostingFrequency {
            label: posts_label(period),
            cadence: cadence_label(period),
            posts: totals.posts,
            growth: growth.posts.clone(),
            caption: format!("Activity trends for {}", period_phrase(period)),
        },
        platforms,
    }))
}

fn metric_cards(period: Period, totals: &CurrentTotals, growth: &GrowthReport) -> [MetricCard; 4] {
    [
        MetricCard {
            label: "Total Followers",
            value: format_number(totals.followers),
            growth: growth.followers.clone(),
        },
        MetricCard {
            label: engagement_label(period),
            value: format!("{:.1}%", totals.engagement),
            growth: growth.engagement.clone(),
        },
        MetricCard {
            label: reach_label(period),
            value: format_number(totals.reach),
            growth: growth.reach.clone(),
        },
        MetricCard {
            label: posts_label(period),
            value: totals.posts.to_string(),
            growth: growth.posts.clone(),
        },
    ]
}

fn content_score_panel(
    period: Period,
    score: &ContentScore,
    growth: Option<GrowthMetric>,
) -> ContentScorePanel {
    ContentScorePanel {
        score: (score.score * 10.0).round() / 10.0,
        rating: score.label(),
        bar_percent: score.bar_percent(),
        growth,
        caption: format!("Performance over {}", period_phrase(period)),
    }
}

/// Compact count: `1.2M`, `3.4K`, or the plain number below a thousand.
#[must_use]
pub fn format_number(n: u64) -> String {
    #[allow(clippy::cast_precision_loss)]
    let v = n as f64;
    if n >= 1_000_000 {
        format!("{:.1}M", v / 1_000_000.0)
    } else if n >= 1_000 {
        format!("{:.1}K", v / 1_000.0)
    } else {
        n.to_string()
    }
}

#[must_use]
pub fn tab_label(period: Period) -> &'static str {
    match period {
        Period::Day => "Today",
        Period::Week => "This Week",
        Period::Month => "This Month",
    }
}

fn engagement_label(period: Period) -> &'static str {
    match period {
        Period::Day => "Today's Engagement",
        Period::Week => "Weekly Engagement",
        Period::Month => "Monthly Engagement",
    }
}

fn reach_label(period: Period) -> &'static str {
    match period {
        Period::Day => "Today's Reach",
        Period::Week => "Weekly Reach",
        Period::Month => "Monthly Reach",
    }
}

fn posts_label(period: Period) -> &'static str {
    match period {
        Period::Day => "Posts Today",
        Period::Week => "Posts This Week",
        Period::Month => "Posts This Month",
    }
}

fn cadence_label(period: Period) -> &'static str {
    match period {
        Period::Day => "Daily",
        Period::Week => "Weekly",
        Period::Month => "Monthly",
    }
}

fn period_phrase(period: Period) -> &'static str {
    match period {
        Period::Day => "today",
        Period::Week => "this week",
        Period::Month => "this month",
    }
}

#[cfg(test)]
#[path = "view_test.rs"]
mod tests;
