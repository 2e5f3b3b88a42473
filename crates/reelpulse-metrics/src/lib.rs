//! Social media performance dashboard.
//!
//! Polls the internal dashboard API, derives growth and content-score figures
//! from the latest snapshot and its history, and renders the performance
//! panel for whichever period the user has selected.

pub mod client;
pub mod error;
pub mod feed;
pub mod growth;
pub mod platform;
pub mod presenter;
pub mod score;
pub mod types;
pub mod view;

pub use client::DashboardClient;
pub use error::MetricsError;
pub use feed::{DashboardData, DashboardFeed, QueryState};
pub use growth::{calculate_growth, select_baselines, GrowthMetric, GrowthReport};
pub use platform::{connected_platforms, dashboard_totals, ConnectedPlatform};
pub use presenter::{Insight, PresenterState, INSIGHT_DURATION};
pub use score::{calculate_content_score, ContentScore, Rating, ScoreInputs};
pub use types::{AccountSnapshot, AnalyticsSummary, CurrentTotals, HistoricalRecord, Period};
pub use view::{render, DashboardView};
