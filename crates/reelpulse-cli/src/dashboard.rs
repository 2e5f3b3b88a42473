//! `dashboard` command: poll the dashboard API and print the performance panel.

use std::sync::Arc;
use std::time::Instant;

use reelpulse_core::AppConfig;
use reelpulse_metrics::view::{MetricsPanel, OnboardingPanel, PanelHeader};
use reelpulse_metrics::{
    render, DashboardClient, DashboardData, DashboardFeed, DashboardView, Period, PresenterState,
    QueryState,
};

/// Print the panel each time any query publishes.
///
/// With `once`, waits for all three queries to settle (ready or failed),
/// prints a single frame, and returns.
///
/// # Errors
///
/// Returns an error if the dashboard client cannot be built or a frame
/// cannot be serialized as JSON.
pub(crate) async fn run_dashboard(
    config: &AppConfig,
    period: Period,
    once: bool,
    json: bool,
) -> anyhow::Result<()> {
    let client = Arc::new(DashboardClient::new(
        &config.dashboard_api_url,
        config.http_timeout_secs,
    )?);
    let mut feed = DashboardFeed::spawn(client, config.poll, period);
    let presenter = PresenterState::with_period(period, Instant::now());

    tracing::info!(url = %config.dashboard_api_url, %period, "watching dashboard");

    while feed.changed().await {
        let data = feed.snapshot();
        if once && !is_settled(&data) {
            continue;
        }

        let view = render(&presenter, &data, Instant::now());
        if json {
            println!("{}", serde_json::to_string_pretty(&view)?);
        } else {
            println!("{}", format_view(&view));
        }

        if once {
            log_failures(&data);
            return Ok(());
        }
    }

    tracing::warn!("dashboard pollers stopped");
    Ok(())
}

fn is_settled(data: &DashboardData) -> bool {
    !data.analytics.is_pending() && !data.accounts.is_pending() && !data.history.is_pending()
}

fn log_failures(data: &DashboardData) {
    for (query, reason) in [
        ("analytics", failure(&data.analytics)),
        ("social_accounts", failure(&data.accounts)),
        ("historical", failure(&data.history)),
    ] {
        if let Some(reason) = reason {
            tracing::warn!(query, reason, "query has not succeeded");
        }
    }
}

fn failure<T>(state: &QueryState<T>) -> Option<&str> {
    match state {
        QueryState::Failed(reason) => Some(reason),
        QueryState::Pending | QueryState::Ready(_) => None,
    }
}

/// Plain-text rendering of a dashboard frame.
pub(crate) fn format_view(view: &DashboardView) -> String {
    match view {
        DashboardView::Loading => "Loading performance data...".to_string(),
        DashboardView::Onboarding(panel) => format_onboarding(panel),
        DashboardView::Metrics(panel) => format_metrics(panel),
    }
}

fn format_header(header: &PanelHeader, lines: &mut Vec<String>) {
    let tabs: Vec<String> = header
        .tabs
        .iter()
        .map(|tab| {
            if tab.selected {
                format!("[{}]", tab.label)
            } else {
                tab.label.to_string()
            }
        })
        .collect();
    lines.push(format!("{}  {}", header.title, tabs.join(" | ")));

    if let Some(insight) = &header.insight {
        lines.push(format!("  {}: {}", insight.content.title, insight.content.description));
        for tip in insight.content.tips {
            lines.push(format!("    - {tip}"));
        }
    }
}

fn format_onboarding(panel: &OnboardingPanel) -> String {
    let mut lines = Vec::new();
    format_header(&panel.header, &mut lines);
    lines.push(String::new());
    lines.push(panel.message.to_string());
    lines.push(format!(
        "{} -> {}  {}",
        panel.action_label,
        panel.action_route,
        panel.suggested_logos.join(" ")
    ));
    lines.join("\n")
}

fn format_metrics(panel: &MetricsPanel) -> String {
    let mut lines = Vec::new();
    format_header(&panel.header, &mut lines);
    lines.push(format!("Active platforms: {}", panel.active_platforms));
    lines.push(String::new());

    for card in &panel.cards {
        lines.push(format!(
            "{:<22} {:>10}  {}",
            card.label,
            card.value,
            card.growth.value()
        ));
    }

    lines.push(String::new());
    for platform in &panel.platforms {
        let handle = platform
            .username
            .as_deref()
            .map(|u| format!(" @{u}"))
            .unwrap_or_default();
        lines.push(format!(
            "{} {}{handle}: {} followers, {:.1}% engagement",
            platform.logo, platform.name, platform.followers, platform.engagement
        ));
    }
    if let Some(best) = &panel.best_platform {
        lines.push(format!("Best platform: {}", best.name));
    }

    let score = &panel.content_score;
    let score_growth = score
        .growth
        .as_ref()
        .map(|g| format!("  {}", g.value()))
        .unwrap_or_default();
    lines.push(String::new());
    lines.push(format!(
        "Content score: {:.1}/10 ({}){score_growth}",
        score.score, score.rating
    ));
    lines.push(format!("  {}", score.caption));

    let posting = &panel.posting;
    lines.push(format!(
        "{}: {} {}  {}",
        posting.label,
        posting.posts,
        posting.cadence,
        posting.growth.value()
    ));
    lines.push(format!("  {}", posting.caption));

    lines.join("\n")
}
