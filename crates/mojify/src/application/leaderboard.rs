//! Leaderboard View
//!
//! Read-only ranked snapshot of agents. Refreshed on demand, on a fixed
//! interval, and whenever the feed reports a confirmed vote.

use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{watch, RwLock};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::domain::{DomainError, LeaderboardEntry};
use crate::ports::MojifyApi;

/// How often the sidebar leaderboard re-polls
pub const LEADERBOARD_POLL_INTERVAL: Duration = Duration::from_secs(30);

#[derive(Debug, Default)]
struct LeaderboardState {
    entries: Vec<LeaderboardEntry>,
    error: Option<String>,
    refreshed_at: Option<DateTime<Utc>>,
}

pub struct LeaderboardView<A: MojifyApi> {
    api: Arc<A>,
    state: RwLock<LeaderboardState>,
}

impl<A: MojifyApi> LeaderboardView<A> {
    pub fn new(api: Arc<A>) -> Self {
        Self {
            api,
            state: RwLock::new(LeaderboardState::default()),
        }
    }

    /// Fetch a fresh ranking. A failed fetch empties the view.
    pub async fn refresh(&self) -> Result<usize, DomainError> {
        let result = self.api.leaderboard().await;
        let mut state = self.state.write().await;

        match result {
            Ok(entries) => {
                let count = entries.len();
                state.entries = entries;
                state.error = None;
                state.refreshed_at = Some(Utc::now());
                tracing::debug!(entries = count, "leaderboard refreshed");
                Ok(count)
            }
            Err(e) => {
                tracing::warn!(error = %e, "leaderboard refresh failed");
                state.entries.clear();
                state.error = Some(e.message().to_string());
                Err(e)
            }
        }
    }

    pub async fn entries(&self) -> Vec<LeaderboardEntry> {
        self.state.read().await.entries.clone()
    }

    pub async fn top(&self, n: usize) -> Vec<LeaderboardEntry> {
        self.state.read().await.entries.iter().take(n).cloned().collect()
    }

    pub async fn error(&self) -> Option<String> {
        self.state.read().await.error.clone()
    }

    pub async fn refreshed_at(&self) -> Option<DateTime<Utc>> {
        self.state.read().await.refreshed_at
    }
}

impl<A: MojifyApi + 'static> LeaderboardView<A> {
    /// Refresh immediately, then on every `every` tick and every time
    /// `votes` changes. Ends when `votes` closes or the handle is aborted.
    pub fn spawn_poller(
        self: Arc<Self>,
        every: Duration,
        mut votes: watch::Receiver<u64>,
    ) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = ticker.tick() => {}
                    changed = votes.changed() => {
                        if changed.is_err() {
                            tracing::debug!("vote channel closed; stopping leaderboard poller");
                            break;
                        }
                    }
                }

                // Errors are already recorded in the view
                let _ = self.refresh().await;
            }
        })
    }
}
