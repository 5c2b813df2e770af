//! State and the single action of the tweet generator view.
//!
//! The view owns two cells, the tweet list and the loading flag. Both are
//! only written from inside [`TweetView::fetch_tweets`]. The loading flag is
//! reset by a drop guard, so every exit path (success, failure, a cancelled
//! or panicking task) leaves the button enabled again.

use crate::feeds::{MarketSnapshot, SocialSignal, TweetBatch, TweetFetcher};
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::task::JoinHandle;

pub const IDLE_LABEL: &str = "Generate Tweets";
pub const WORKING_LABEL: &str = "Generating...";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewState {
    pub tweets: Vec<String>,
    pub loading: bool,
    pub market: Option<MarketSnapshot>,
    pub social: Option<SocialSignal>,
    /// Bumped on every successful fetch, including one that repeats the list.
    pub batches: u64,
}

impl ViewState {
    pub fn button_label(&self) -> &'static str {
        if self.loading {
            WORKING_LABEL
        } else {
            IDLE_LABEL
        }
    }

    pub fn button_enabled(&self) -> bool {
        !self.loading
    }

    /// Replaces the list wholesale; there is no incremental append.
    fn apply(&mut self, batch: TweetBatch) {
        self.tweets = batch.tweets;
        self.market = batch.market;
        self.social = batch.social;
        self.batches += 1;
    }
}

fn lock(state: &Mutex<ViewState>) -> MutexGuard<'_, ViewState> {
    state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Holds the loading flag up for as long as it lives.
struct LoadingGuard {
    state: Arc<Mutex<ViewState>>,
}

impl LoadingGuard {
    fn engage(state: Arc<Mutex<ViewState>>) -> Self {
        lock(&state).loading = true;
        Self { state }
    }
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        lock(&self.state).loading = false;
    }
}

#[derive(Clone)]
pub struct TweetView {
    state: Arc<Mutex<ViewState>>,
    fetcher: Arc<dyn TweetFetcher>,
}

impl TweetView {
    pub fn new(fetcher: Arc<dyn TweetFetcher>) -> Self {
        Self {
            state: Arc::new(Mutex::new(ViewState::default())),
            fetcher,
        }
    }

    pub fn snapshot(&self) -> ViewState {
        lock(&self.state).clone()
    }

    pub fn is_loading(&self) -> bool {
        lock(&self.state).loading
    }

    /// Runs one request/response cycle to completion.
    ///
    /// Calls are not serialized: overlapping invocations each issue their own
    /// request and whichever response settles last owns the list.
    pub async fn fetch_tweets(&self) {
        let guard = LoadingGuard::engage(Arc::clone(&self.state));
        self.settle(guard).await;
    }

    /// Button activation. A no-op while the button is disabled.
    ///
    /// The loading flag is raised before the task is spawned so the very next
    /// frame shows the working label.
    pub fn activate(&self) -> Option<JoinHandle<()>> {
        if self.is_loading() {
            tracing::debug!("Generate pressed while a request is in flight; ignoring");
            return None;
        }

        let guard = LoadingGuard::engage(Arc::clone(&self.state));
        let view = self.clone();
        Some(tokio::spawn(async move { view.settle(guard).await }))
    }

    async fn settle(&self, _loading: LoadingGuard) {
        match self.fetcher.fetch().await {
            Ok(batch) => {
                tracing::info!(count = batch.tweets.len(), "Loaded generated tweets");
                lock(&self.state).apply(batch);
            }
            Err(e) => {
                tracing::error!(error = %e, "Error fetching tweets");
            }
        }
    }
}
