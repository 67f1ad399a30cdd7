//! Feed Synchronizer
//!
//! Owns the visible prompt feed and keeps it consistent with the server:
//!
//! - one active sort tab; switching tabs reloads the feed
//! - a load replaces the snapshot wholesale, or not at all
//! - votes are fire-and-refetch: a confirmed vote reloads the feed instead
//!   of bumping the tally locally
//! - at most one vote in flight per proposal

use futures::future::try_join_all;
use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::{watch, RwLock};

use crate::domain::{
    DomainError, PromptDetail, SortMode, VoteReceipt, VoteValue, VoterFingerprint,
};
use crate::ports::{MojifyApi, PromptQuery, VoteRequest};

/// Prompts shown per feed load
pub const DEFAULT_PAGE_SIZE: usize = 15;

#[derive(Debug, Clone)]
pub struct FeedConfig {
    pub page_size: usize,
    /// Drop results of a load that finished after a newer load started
    pub discard_stale_loads: bool,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            discard_stale_loads: true,
        }
    }
}

/// What a successful `load_feed` / `select_tab` did to the snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Snapshot replaced with this many prompts
    Replaced(usize),
    /// A newer load started meanwhile; result dropped
    Superseded,
    /// Tab was already active; nothing loaded
    Unchanged,
}

/// Result of a vote click. Vote failures are never surfaced as errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoteOutcome {
    /// Server accepted the vote; `reloaded` tells whether the refetch succeeded
    Recorded { receipt: VoteReceipt, reloaded: bool },
    /// Another vote on this proposal is still in flight; nothing sent
    AlreadyVoting,
    /// Server or network rejected the vote; feed untouched
    Failed { message: String },
}

#[derive(Debug, Default)]
struct FeedState {
    active_tab: SortMode,
    prompts: Vec<PromptDetail>,
    error: Option<String>,
}

/// Client-side owner of the prompt feed
pub struct FeedSynchronizer<A: MojifyApi> {
    api: Arc<A>,
    config: FeedConfig,
    state: RwLock<FeedState>,
    voting: Mutex<HashSet<String>>,
    loads_in_flight: AtomicUsize,
    generation: AtomicU64,
    votes_tx: watch::Sender<u64>,
}

impl<A: MojifyApi> FeedSynchronizer<A> {
    pub fn new(api: Arc<A>, config: FeedConfig) -> Self {
        Self::with_tab(api, config, SortMode::default())
    }

    /// Start on `tab` instead of the default. Does not load.
    pub fn with_tab(api: Arc<A>, config: FeedConfig, tab: SortMode) -> Self {
        let (votes_tx, _) = watch::channel(0);
        Self {
            api,
            config,
            state: RwLock::new(FeedState {
                active_tab: tab,
                ..FeedState::default()
            }),
            voting: Mutex::new(HashSet::new()),
            loads_in_flight: AtomicUsize::new(0),
            generation: AtomicU64::new(0),
            votes_tx,
        }
    }

    pub async fn active_tab(&self) -> SortMode {
        self.state.read().await.active_tab
    }

    /// Current prompt snapshot
    pub async fn snapshot(&self) -> Vec<PromptDetail> {
        self.state.read().await.prompts.clone()
    }

    /// Message of the last failed load, cleared when a load starts
    pub async fn error(&self) -> Option<String> {
        self.state.read().await.error.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.loads_in_flight.load(Ordering::SeqCst) > 0
    }

    pub fn is_voting(&self, proposal_id: &str) -> bool {
        self.voting
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(proposal_id)
    }

    /// Counter bumped after every vote the server accepted.
    /// Leaderboards subscribe to it to refresh.
    pub fn subscribe_votes(&self) -> watch::Receiver<u64> {
        self.votes_tx.subscribe()
    }

    /// Switch the active tab and reload under the new ordering.
    ///
    /// Selecting the tab that is already active does nothing.
    pub async fn select_tab(&self, sort: SortMode) -> Result<LoadOutcome, DomainError> {
        {
            let mut state = self.state.write().await;
            if state.active_tab == sort {
                return Ok(LoadOutcome::Unchanged);
            }
            state.active_tab = sort;
        }

        tracing::debug!(tab = %sort, "feed tab selected");
        self.load_feed().await
    }

    /// Fetch the active tab's prompt list and the detail of each listed
    /// prompt, then replace the snapshot.
    ///
    /// Any failure leaves the previous snapshot as it was and records the
    /// error message.
    pub async fn load_feed(&self) -> Result<LoadOutcome, DomainError> {
        let ticket = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let _loading = LoadingGuard::enter(&self.loads_in_flight);
        let sort = {
            let mut state = self.state.write().await;
            state.error = None;
            state.active_tab
        };

        let result = self.fetch_page(sort).await;

        let mut state = self.state.write().await;

        if self.config.discard_stale_loads && ticket != self.generation.load(Ordering::SeqCst) {
            tracing::debug!(tab = %sort, ticket, "discarding superseded feed load");
            return result.map(|_| LoadOutcome::Superseded);
        }

        match result {
            Ok(prompts) => {
                let count = prompts.len();
                for detail in prompts.iter().filter(|d| !d.count_matches()) {
                    tracing::debug!(
                        prompt_id = %detail.id(),
                        proposal_count = detail.prompt.proposal_count,
                        returned = detail.proposals.len(),
                        "proposal count disagrees with proposals returned"
                    );
                }
                state.prompts = prompts;
                tracing::info!(tab = %sort, prompts = count, "feed loaded");
                Ok(LoadOutcome::Replaced(count))
            }
            Err(e) => {
                tracing::warn!(tab = %sort, error = %e, "feed load failed");
                state.error = Some(e.message().to_string());
                Err(e)
            }
        }
    }

    async fn fetch_page(&self, sort: SortMode) -> Result<Vec<PromptDetail>, DomainError> {
        let listed = self.api.list_prompts(&PromptQuery::sorted(sort)).await?;

        try_join_all(
            listed
                .iter()
                .take(self.config.page_size)
                .map(|prompt| self.api.get_prompt(&prompt.id)),
        )
        .await
    }

    /// Cast a vote and, once the server confirms it, reload the feed.
    ///
    /// A proposal with a vote already in flight ignores further votes
    /// until that one resolves. Failures leave the feed untouched.
    pub async fn vote(
        &self,
        proposal_id: &str,
        value: VoteValue,
        fingerprint: &VoterFingerprint,
    ) -> VoteOutcome {
        let Some(_marker) = VotingMarker::claim(&self.voting, proposal_id) else {
            tracing::debug!(proposal_id, "vote already in flight; ignoring");
            return VoteOutcome::AlreadyVoting;
        };

        let request = VoteRequest {
            value,
            user_fingerprint: fingerprint.clone(),
        };

        let receipt = match self.api.vote(proposal_id, &request).await {
            Ok(receipt) => receipt,
            Err(e) => {
                tracing::warn!(proposal_id, error = %e, "vote failed; keeping current feed");
                return VoteOutcome::Failed {
                    message: e.message().to_string(),
                };
            }
        };

        tracing::info!(proposal_id, value = %value, net_votes = receipt.net_votes, "vote recorded");

        let reloaded = self.load_feed().await.is_ok();
        self.votes_tx.send_modify(|n| *n += 1);

        VoteOutcome::Recorded { receipt, reloaded }
    }
}

/// One load counted in flight; released on drop so a cancelled load
/// does not leave the feed marked as loading
struct LoadingGuard<'a>(&'a AtomicUsize);

impl<'a> LoadingGuard<'a> {
    fn enter(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(counter)
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Presence of a proposal id in the voting set, released on drop
struct VotingMarker<'a> {
    set: &'a Mutex<HashSet<String>>,
    proposal_id: String,
}

impl<'a> VotingMarker<'a> {
    fn claim(set: &'a Mutex<HashSet<String>>, proposal_id: &str) -> Option<Self> {
        let inserted = set
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(proposal_id.to_string());

        inserted.then(|| Self {
            set,
            proposal_id: proposal_id.to_string(),
        })
    }
}

impl Drop for VotingMarker<'_> {
    fn drop(&mut self) {
        self.set
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.proposal_id);
    }
}
