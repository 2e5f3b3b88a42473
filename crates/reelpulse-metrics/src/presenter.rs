//! Interaction state for the performance panel.
//!
//! Time is passed in explicitly so the insight timeout can be driven by a UI
//! loop and tested without sleeping.

use std::time::{Duration, Instant};

use serde::Serialize;

use crate::types::Period;

/// How long the educational insight stays up after a period change.
pub const INSIGHT_DURATION: Duration = Duration::from_secs(8);

/// Educational copy shown when a period is selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Insight {
    pub title: &'static str,
    pub description: &'static str,
    pub tips: [&'static str; 3],
}

const DAY_INSIGHT: Insight = Insight {
    title: "Today's Performance",
    description: "Real-time data showing today's activity. Great for monitoring immediate \
                  response to content and timing optimal posts.",
    tips: [
        "Daily data shows immediate engagement patterns",
        "Best for tracking post timing effectiveness",
        "Monitor hourly engagement trends",
    ],
};

const WEEK_INSIGHT: Insight = Insight {
    title: "Weekly Trends",
    description: "7-day overview revealing weekly patterns and consistency. Ideal for \
                  understanding your audience's weekly behavior.",
    tips: [
        "Weekly data reveals audience weekly patterns",
        "Perfect for content scheduling strategies",
        "Shows consistency in your posting rhythm",
    ],
};

const MONTH_INSIGHT: Insight = Insight {
    title: "Monthly Growth",
    description: "30-day analysis showing long-term growth trends and content performance. \
                  Essential for strategic planning.",
    tips: [
        "Monthly view shows sustainable growth patterns",
        "Best for measuring content strategy success",
        "Tracks long-term follower and engagement trends",
    ],
};

#[must_use]
pub fn insight_for(period: Period) -> &'static Insight {
    match period {
        Period::Day => &DAY_INSIGHT,
        Period::Week => &WEEK_INSIGHT,
        Period::Month => &MONTH_INSIGHT,
    }
}

/// Selected period plus the transient insight panel.
#[derive(Debug, Clone)]
pub struct PresenterState {
    period: Period,
    insight_key: u64,
    insight_shown_at: Option<Instant>,
}

impl PresenterState {
    /// Initial state on mount: the default period with its insight showing.
    #[must_use]
    pub fn new(now: Instant) -> Self {
        Self::with_period(Period::default(), now)
    }

    #[must_use]
    pub fn with_period(period: Period, now: Instant) -> Self {
        Self {
            period,
            insight_key: 1,
            insight_shown_at: Some(now),
        }
    }

    #[must_use]
    pub fn period(&self) -> Period {
        self.period
    }

    /// Bumped every time the insight is re-shown, so a renderer can restart
    /// its entry animation.
    #[must_use]
    pub fn insight_key(&self) -> u64 {
        self.insight_key
    }

    /// Switch tabs. Choosing a different period re-shows its insight and
    /// restarts the timer; re-selecting the current one changes nothing.
    ///
    /// Returns whether the period changed.
    pub fn select_period(&mut self, period: Period, now: Instant) -> bool {
        if period == self.period {
            return false;
        }
        self.period = period;
        self.insight_key += 1;
        self.insight_shown_at = Some(now);
        true
    }

    pub fn dismiss_insight(&mut self) {
        self.insight_shown_at = None;
    }

    #[must_use]
    pub fn insight_visible(&self, now: Instant) -> bool {
        self.insight_shown_at
            .is_some_and(|shown| now.saturating_duration_since(shown) < INSIGHT_DURATION)
    }

    /// When the current insight will hide itself, if one is showing.
    #[must_use]
    pub fn insight_deadline(&self) -> Option<Instant> {
        self.insight_shown_at.map(|shown| shown + INSIGHT_DURATION)
    }

    #[must_use]
    pub fn visible_insight(&self, now: Instant) -> Option<&'static Insight> {
        self.insight_visible(now).then(|| insight_for(self.period))
    }
}
