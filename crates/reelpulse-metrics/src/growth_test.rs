use chrono::{TimeZone, Utc};

use super::*;
use crate::types::{RecordMetrics, RecordedScore};

fn record(day: u32, followers: f64, engagement: f64, reach: f64) -> HistoricalRecord {
    HistoricalRecord {
        date: Utc.with_ymd_and_hms(2025, 3, day, 0, 0, 0).unwrap(),
        followers,
        engagement,
        reach,
        metrics: None,
    }
}

fn with_metrics(mut r: HistoricalRecord, posts: Option<f64>, score: Option<f64>) -> HistoricalRecord {
    r.metrics = Some(RecordMetrics {
        posts,
        content_score: Some(RecordedScore { score }),
    });
    r
}

fn current(followers: u64, engagement: f64, reach: u64, posts: u64) -> CurrentTotals {
    CurrentTotals {
        followers,
        engagement,
        reach,
        posts,
    }
}

// -------------------------------------------------------------------------
// Empty history
// -------------------------------------------------------------------------

#[test]
fn empty_history_uses_placeholders() {
    let report = calculate_growth(&[], &current(100, 5.0, 500, 3), Some(6.0));

    assert_eq!(report.followers.value(), "+0.0%");
    assert!(report.followers.is_positive());
    assert_eq!(report.engagement.value(), "+100%");
    assert!(report.engagement.is_positive());
    assert_eq!(report.reach.value(), "+100%");
    assert_eq!(report.posts.value(), "+3");
    assert!(report.posts.is_positive());
    assert_eq!(report.content_score.as_ref().map(GrowthMetric::value), Some("+100%"));
}

// -------------------------------------------------------------------------
// Baseline selection
// -------------------------------------------------------------------------

#[test]
fn baselines_are_chosen_after_sorting() {
    let shuffled = vec![
        record(20, 3.0, 0.0, 0.0),
        record(1, 1.0, 0.0, 0.0),
        record(25, 4.0, 0.0, 0.0),
        record(10, 2.0, 0.0, 0.0),
    ];
    let b = select_baselines(&shuffled).expect("non-empty");
    assert_eq!(b.oldest.followers, 1.0);
    assert_eq!(b.previous.followers, 3.0);
}

#[test]
fn single_record_is_both_baselines() {
    let b = select_baselines(&[record(5, 7.0, 0.0, 0.0)]).expect("non-empty");
    assert_eq!(b.oldest, b.previous);
}

#[test]
fn two_records_previous_is_oldest() {
    let b = select_baselines(&[record(9, 2.0, 0.0, 0.0), record(3, 1.0, 0.0, 0.0)])
        .expect("non-empty");
    assert_eq!(b.oldest.followers, 1.0);
    assert_eq!(b.previous.followers, 1.0);
}

#[test]
fn empty_history_has_no_baselines() {
    assert!(select_baselines(&[]).is_none());
}

// -------------------------------------------------------------------------
// Growth arithmetic
// -------------------------------------------------------------------------

#[test]
fn followers_compare_against_oldest_and_engagement_against_previous() {
    let history = vec![
        record(1, 100.0, 10.0, 1_000.0),
        record(2, 110.0, 4.0, 200.0),
        record(3, 120.0, 99.0, 9_999.0),
    ];
    let report = calculate_growth(&history, &current(150, 5.0, 300, 0), None);

    assert_eq!(report.followers.value(), "+50.0%");
    assert_eq!(report.engagement.value(), "+25.0%");
    assert_eq!(report.reach.value(), "+50.0%");
}

#[test]
fn decline_is_negative() {
    let history = vec![record(1, 200.0, 10.0, 1_000.0)];
    let report = calculate_growth(&history, &current(150, 5.0, 500, 0), None);

    assert_eq!(report.followers.value(), "-25.0%");
    assert!(!report.followers.is_positive());
    assert_eq!(report.engagement.value(), "-50.0%");
    assert!(!report.engagement.is_positive());
}

#[test]
fn zero_baselines_yield_zero_percent() {
    let history = vec![with_metrics(record(1, 0.0, 0.0, 0.0), Some(0.0), None)];
    let report = calculate_growth(&history, &current(10, 5.0, 50, 4), None);

    assert_eq!(report.followers.value(), "+0.0%");
    assert_eq!(report.engagement.value(), "+0.0%");
    assert_eq!(report.reach.value(), "+0.0%");
    assert_eq!(report.posts.value(), "+0.0%");
}

#[test]
fn missing_post_baseline_yields_zero_percent() {
    let history = vec![record(1, 10.0, 1.0, 10.0)];
    let report = calculate_growth(&history, &current(10, 1.0, 10, 12), None);
    assert_eq!(report.posts.value(), "+0.0%");
}

#[test]
fn posts_compare_against_oldest_metrics() {
    let history = vec![
        with_metrics(record(1, 1.0, 1.0, 1.0), Some(4.0), None),
        with_metrics(record(2, 1.0, 1.0, 1.0), Some(100.0), None),
    ];
    let report = calculate_growth(&history, &current(1, 1.0, 1, 6), None);
    assert_eq!(report.posts.value(), "+50.0%");
}

#[test]
fn engagement_and_reach_clamp_above_999() {
    let history = vec![record(1, 1.0, 1.0, 1.0)];
    let report = calculate_growth(&history, &current(1, 11.0, 1_000, 0), None);

    // (11 - 1) / 1 * 100 = 1000 > 999
    assert_eq!(report.engagement.value(), "+999+%");
    assert!(report.engagement.is_positive());
    // (1000 - 1) / 1 * 100 = 99900
    assert_eq!(report.reach.value(), "+999+%");
}

#[test]
fn growth_below_cap_keeps_one_decimal() {
    let history = vec![record(1, 1.0, 0.5, 1.0)];
    let report = calculate_growth(&history, &current(1, 5.0, 1, 0), None);
    assert_eq!(report.engagement.value(), "+900.0%");
    assert_eq!(GrowthMetric::percent_capped(999.0).value(), "+999.0%");
}

#[test]
fn follower_growth_is_never_clamped() {
    let history = vec![record(1, 1.0, 1.0, 1.0)];
    let report = calculate_growth(&history, &current(100, 1.0, 1, 0), None);
    assert_eq!(report.followers.value(), "+9900.0%");
}

#[test]
fn capped_negative_drops_its_sign() {
    let m = GrowthMetric::percent_capped(-1_500.0);
    assert_eq!(m.value(), "999+%");
    assert!(!m.is_positive());
}

#[test]
fn negative_zero_renders_as_positive_zero() {
    let m = GrowthMetric::percent(-0.0);
    assert_eq!(m.value(), "+0.0%");
    assert!(m.is_positive());
}

#[test]
fn sign_always_matches_flag() {
    for g in [-2_000.0, -999.5, -12.34, -0.04, 0.0, 0.04, 7.77, 999.0, 5_000.0] {
        for m in [GrowthMetric::percent(g), GrowthMetric::percent_capped(g)] {
            assert_eq!(
                m.value().starts_with('+'),
                m.is_positive(),
                "sign mismatch for {g}: {m:?}"
            );
        }
    }
}

// -------------------------------------------------------------------------
// Content score growth
// -------------------------------------------------------------------------

#[test]
fn content_score_growth_uses_real_current_score() {
    let history = vec![with_metrics(record(1, 1.0, 1.0, 1.0), None, Some(4.0))];
    let report = calculate_growth(&history, &current(1, 1.0, 1, 0), Some(6.0));
    assert_eq!(
        report.content_score.as_ref().map(GrowthMetric::value),
        Some("+50.0%")
    );
}

#[test]
fn content_score_baseline_defaults_to_five() {
    let history = vec![record(1, 1.0, 1.0, 1.0)];
    let report = calculate_growth(&history, &current(1, 1.0, 1, 0), Some(7.5));
    assert_eq!(
        report.content_score.as_ref().map(GrowthMetric::value),
        Some("+50.0%")
    );
}

#[test]
fn content_score_growth_unavailable_without_current_score() {
    let history = vec![record(1, 1.0, 1.0, 1.0)];
    let report = calculate_growth(&history, &current(1, 1.0, 1, 0), None);
    assert!(report.content_score.is_none());
}
