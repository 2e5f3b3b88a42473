//! Live dashboard data as a set of subscriptions.
//!
//! Each query runs in its own task on a fixed interval and publishes into a
//! `watch` channel, so readers always see the most recently resolved value and
//! a slow or failing query never holds up the other two.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use reelpulse_core::PollIntervals;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::client::DashboardClient;
use crate::error::MetricsError;
use crate::types::{AccountSnapshot, AnalyticsSummary, HistoricalRecord, Period};

/// Latest known result of one polled query.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum QueryState<T> {
    /// No response yet.
    #[default]
    Pending,
    Ready(T),
    /// Every attempt so far has failed. Once a query has succeeded, later
    /// failures keep the last good value instead.
    Failed(String),
}

impl<T> QueryState<T> {
    #[must_use]
    pub fn data(&self) -> Option<&T> {
        match self {
            QueryState::Ready(v) => Some(v),
            QueryState::Pending | QueryState::Failed(_) => None,
        }
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        matches!(self, QueryState::Pending)
    }
}

/// Point-in-time copy of all three queries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardData {
    pub analytics: QueryState<AnalyticsSummary>,
    pub accounts: QueryState<Vec<AccountSnapshot>>,
    pub history: QueryState<Vec<HistoricalRecord>>,
}

/// Handle to the running pollers. Dropping it stops them.
pub struct DashboardFeed {
    analytics: watch::Receiver<QueryState<AnalyticsSummary>>,
    accounts: watch::Receiver<QueryState<Vec<AccountSnapshot>>>,
    history: watch::Receiver<QueryState<Vec<HistoricalRecord>>>,
    period: watch::Sender<Period>,
    tasks: Vec<JoinHandle<()>>,
}

impl DashboardFeed {
    /// Start polling all three endpoints. Must be called inside a tokio runtime.
    #[must_use]
    pub fn spawn(client: Arc<DashboardClient>, intervals: PollIntervals, period: Period) -> Self {
        let (analytics_tx, analytics) = watch::channel(QueryState::Pending);
        let (accounts_tx, accounts) = watch::channel(QueryState::Pending);
        let (history_tx, history) = watch::channel(QueryState::Pending);
        let (period_tx, period_rx) = watch::channel(period);

        let analytics_client = Arc::clone(&client);
        let accounts_client = Arc::clone(&client);

        let tasks = vec![
            spawn_poll("analytics", intervals.analytics, analytics_tx, move || {
                let client = Arc::clone(&analytics_client);
                async move { client.analytics().await }
            }),
            spawn_poll("social_accounts", intervals.accounts, accounts_tx, move || {
                let client = Arc::clone(&accounts_client);
                async move { client.social_accounts().await }
            }),
            spawn_history_poll(client, intervals.history, history_tx, period_rx),
        ];

        tracing::debug!(
            analytics = ?intervals.analytics,
            accounts = ?intervals.accounts,
            history = ?intervals.history,
            %period,
            "dashboard feed started"
        );

        Self {
            analytics,
            accounts,
            history,
            period: period_tx,
            tasks,
        }
    }

    /// Change the history window. History is refetched immediately and reads
    /// `Pending` until the new window resolves.
    pub fn set_period(&self, period: Period) {
        self.period.send_if_modified(|current| {
            if *current == period {
                return false;
            }
            *current = period;
            true
        });
    }

    #[must_use]
    pub fn period(&self) -> Period {
        *self.period.borrow()
    }

    #[must_use]
    pub fn snapshot(&self) -> DashboardData {
        DashboardData {
            analytics: self.analytics.borrow().clone(),
            accounts: self.accounts.borrow().clone(),
            history: self.history.borrow().clone(),
        }
    }

    #[must_use]
    pub fn subscribe_analytics(&self) -> watch::Receiver<QueryState<AnalyticsSummary>> {
        self.analytics.clone()
    }

    #[must_use]
    pub fn subscribe_accounts(&self) -> watch::Receiver<QueryState<Vec<AccountSnapshot>>> {
        self.accounts.clone()
    }

    #[must_use]
    pub fn subscribe_history(&self) -> watch::Receiver<QueryState<Vec<HistoricalRecord>>> {
        self.history.clone()
    }

    /// Wait until any of the three queries publishes a new value.
    ///
    /// Returns `false` once the pollers have shut down.
    pub async fn changed(&mut self) -> bool {
        tokio::select! {
            r = self.analytics.changed() => r.is_ok(),
            r = self.accounts.changed() => r.is_ok(),
            r = self.history.changed() => r.is_ok(),
        }
    }
}

impl Drop for DashboardFeed {
    fn drop(&mut self) {
        for task in &self.tasks {
            task.abort();
        }
    }
}

fn spawn_poll<T, F, Fut>(
    query: &'static str,
    every: Duration,
    tx: watch::Sender<QueryState<T>>,
    mut fetch: F,
) -> JoinHandle<()>
where
    T: Send + Sync + 'static,
    F: FnMut() -> Fut + Send + 'static,
    Fut: Future<Output = Result<T, MetricsError>> + Send,
{
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            if tx.is_closed() {
                break;
            }
            publish(&tx, query, fetch().await);
        }
    })
}

fn spawn_history_poll(
    client: Arc<DashboardClient>,
    every: Duration,
    tx: watch::Sender<QueryState<Vec<HistoricalRecord>>>,
    mut period_rx: watch::Receiver<Period>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            tokio::select! {
                _ = ticker.tick() => {}
                changed = period_rx.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    tx.send_replace(QueryState::Pending);
                    ticker.reset();
                }
            }
            if tx.is_closed() {
                break;
            }

            let period = *period_rx.borrow_and_update();
            let result = client.historical(period).await;

            // A newer window was selected mid-flight; its fetch supersedes this one.
            if *period_rx.borrow() != period {
                continue;
            }
            publish(&tx, "historical", result);
        }
    })
}

fn publish<T>(tx: &watch::Sender<QueryState<T>>, query: &'static str, result: Result<T, MetricsError>) {
    match result {
        Ok(value) => {
            tx.send_replace(QueryState::Ready(value));
        }
        Err(e) => {
            tracing::warn!(query, error = %e, "dashboard refresh failed");
            tx.send_if_modified(|state| match state {
                QueryState::Ready(_) => false,
                QueryState::Pending | QueryState::Failed(_) => {
                    *state = QueryState::Failed(e.to_string());
                    true
                }
            });
        }
    }
}
