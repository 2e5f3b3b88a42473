//! Period-over-period growth figures for the dashboard cards.

use serde::Serialize;

use crate::types::{CurrentTotals, HistoricalRecord};

/// Engagement and reach growth above this magnitude render as `999+%`.
const DISPLAY_CAP: f64 = 999.0;

/// Content score assumed for a baseline record that carries none.
const DEFAULT_BASELINE_SCORE: f64 = 5.0;

/// A signed growth figure ready for display.
///
/// Only constructible through the functions below, which derive
/// `is_positive` from the same value that produced the text, so the sign in
/// `value` always agrees with `is_positive`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GrowthMetric {
    value: String,
    is_positive: bool,
}

impl GrowthMetric {
    /// One-decimal percentage with an explicit sign, e.g. `+12.5%`.
    #[must_use]
    pub fn percent(growth: f64) -> Self {
        let growth = normalize_zero(growth);
        Self {
            value: format!("{}{growth:.1}%", sign_prefix(growth)),
            is_positive: growth >= 0.0,
        }
    }

    /// Like [`GrowthMetric::percent`], but magnitudes above 999 collapse to
    /// `+999+%`, or a bare `999+%` when negative. The flag still carries the
    /// direction.
    #[must_use]
    pub fn percent_capped(growth: f64) -> Self {
        let growth = normalize_zero(growth);
        if growth.abs() > DISPLAY_CAP {
            return Self {
                value: format!("{}999+%", sign_prefix(growth)),
                is_positive: growth >= 0.0,
            };
        }
        Self::percent(growth)
    }

    /// Raw count delta, e.g. `+3`.
    #[must_use]
    pub fn count(delta: u64) -> Self {
        Self {
            value: format!("+{delta}"),
            is_positive: true,
        }
    }

    /// Fixed `+100%` shown before any history exists.
    #[must_use]
    pub fn tracking_started() -> Self {
        Self {
            value: "+100%".to_string(),
            is_positive: true,
        }
    }

    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.is_positive
    }
}

/// Growth for every tracked dimension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GrowthReport {
    pub followers: GrowthMetric,
    pub engagement: GrowthMetric,
    pub reach: GrowthMetric,
    pub posts: GrowthMetric,
    /// `None` when there is no current content score to compare.
    pub content_score: Option<GrowthMetric>,
}

/// The two comparison points taken from a history series.
#[derive(Debug, Clone, PartialEq)]
pub struct Baselines {
    pub oldest: HistoricalRecord,
    pub previous: HistoricalRecord,
}

/// Sort `history` by date and pick the oldest and second-newest records.
///
/// With a single record both baselines are that record. Returns `None` for an
/// empty series.
#[must_use]
pub fn select_baselines(history: &[HistoricalRecord]) -> Option<Baselines> {
    let mut sorted = history.to_vec();
    sorted.sort_by_key(|r| r.date);

    let oldest = sorted.first()?.clone();
    let previous = sorted
        .len()
        .checked_sub(2)
        .and_then(|i| sorted.get(i))
        .cloned()
        .unwrap_or_else(|| oldest.clone());

    Some(Baselines { oldest, previous })
}

/// Compute growth of `current` against the history series.
///
/// Followers and posts compare against the oldest record; engagement and reach
/// against the second-newest. A zero or missing baseline yields `0%`.
/// Content score growth compares `current_content_score` against the oldest
/// record's stored score (5 when absent).
#[must_use]
pub fn calculate_growth(
    history: &[HistoricalRecord],
    current: &CurrentTotals,
    current_content_score: Option<f64>,
) -> GrowthReport {
    let Some(Baselines { oldest, previous }) = select_baselines(history) else {
        return GrowthReport {
            followers: GrowthMetric::percent(0.0),
            engagement: GrowthMetric::tracking_started(),
            reach: GrowthMetric::tracking_started(),
            posts: GrowthMetric::count(current.posts),
            content_score: Some(GrowthMetric::tracking_started()),
        };
    };

    #[allow(clippy::cast_precision_loss)]
    let (followers, reach, posts) = (
        current.followers as f64,
        current.reach as f64,
        current.posts as f64,
    );

    let follower_growth = pct_change(followers, oldest.followers);
    let engagement_growth = pct_change(current.engagement, previous.engagement);
    let reach_growth = pct_change(reach, previous.reach);
    let post_growth = oldest
        .posts()
        .map_or(0.0, |baseline| pct_change(posts, baseline));

    let content_score = current_content_score.map(|score| {
        let baseline = oldest
            .content_score()
            .filter(|s| *s != 0.0)
            .unwrap_or(DEFAULT_BASELINE_SCORE);
        GrowthMetric::percent(pct_change(score, baseline))
    });

    GrowthReport {
        followers: GrowthMetric::percent(follower_growth),
        engagement: GrowthMetric::percent_capped(engagement_growth),
        reach: GrowthMetric::percent_capped(reach_growth),
        posts: GrowthMetric::percent(post_growth),
        content_score,
    }
}

fn pct_change(current: f64, baseline: f64) -> f64 {
    if baseline == 0.0 {
        return 0.0;
    }
    (current - baseline) / baseline * 100.0
}

// -0.0 would otherwise print as "-0.0" next to a positive flag.
fn normalize_zero(v: f64) -> f64 {
    if v == 0.0 {
        0.0
    } else {
        v
    }
}

fn sign_prefix(v: f64) -> &'static str {
    if v >= 0.0 {
        "+"
    } else {
        ""
    }
}

#[cfg(test)]
#[path = "growth_test.rs"]
mod tests;
