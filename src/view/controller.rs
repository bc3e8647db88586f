use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

use tokio::sync::{watch, RwLock};
use tokio::task::JoinHandle;

use crate::{
    models::{FetchState, MovieQuery, SearchRecord, TrendingEntry, ViewSnapshot},
    services::{analytics::AnalyticsRecorder, providers::MovieProvider},
};

/// State owned by the view controller
#[derive(Debug)]
struct ViewState {
    debounced_term: String,
    fetch: FetchState,
    trending: Vec<SearchRecord>,
}

/// Drives fetch cycles from debounced search terms and holds what the page shows
///
/// Every fetch is tagged with a sequence number when it starts. Only the
/// resolution of the most recently started fetch is applied; responses for
/// superseded terms are dropped.
#[derive(Clone)]
pub struct ViewController {
    provider: Arc<dyn MovieProvider>,
    recorder: AnalyticsRecorder,
    state: Arc<RwLock<ViewState>>,
    latest_fetch: Arc<AtomicU64>,
    trending_limit: usize,
}

impl ViewController {
    pub fn new(
        provider: Arc<dyn MovieProvider>,
        recorder: AnalyticsRecorder,
        trending_limit: usize,
    ) -> Self {
        Self {
            provider,
            recorder,
            state: Arc::new(RwLock::new(ViewState {
                debounced_term: String::new(),
                fetch: FetchState::Loading,
                trending: Vec::new(),
            })),
            latest_fetch: Arc::new(AtomicU64::new(0)),
            trending_limit,
        }
    }

    /// Runs until the debounced input is closed
    ///
    /// Loads the trending list once, fetches for the initial term, then starts
    /// a fetch cycle for every debounced change.
    pub async fn run(self, mut debounced: watch::Receiver<String>) {
        let trending = self.clone();
        tokio::spawn(async move { trending.load_trending().await });

        let initial = debounced.borrow_and_update().clone();
        self.start_fetch(initial).await;

        while debounced.changed().await.is_ok() {
            let term = debounced.borrow_and_update().clone();
            self.start_fetch(term).await;
        }

        tracing::info!("Search input closed, view controller stopping");
    }

    /// Populates the trending list; failures leave it as it was
    pub async fn load_trending(&self) {
        match self.recorder.trending(self.trending_limit).await {
            Ok(records) => {
                tracing::info!(count = records.len(), "Trending searches loaded");
                self.state.write().await.trending = records;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load trending searches");
            }
        }
    }

    /// Enters Loading for `term` and spawns its fetch cycle
    pub async fn start_fetch(&self, term: String) -> JoinHandle<()> {
        let seq = self.latest_fetch.fetch_add(1, Ordering::SeqCst) + 1;

        {
            let mut state = self.state.write().await;
            state.debounced_term = term.clone();
            state.fetch = FetchState::Loading;
        }

        tracing::debug!(seq, term = %term, "Fetch cycle started");

        let controller = self.clone();
        tokio::spawn(async move { controller.fetch_cycle(seq, term).await })
    }

    async fn fetch_cycle(&self, seq: u64, term: String) {
        let query = MovieQuery::from_term(Some(&term));

        let next = match self.provider.fetch_movies(&query).await {
            Ok(movies) => {
                if query.search_term().is_some() {
                    if let Some(top_result) = movies.first() {
                        self.recorder.record_in_background(&term, top_result);
                    }
                }
                FetchState::Success(movies)
            }
            Err(e) => {
                tracing::error!(
                    error = %e,
                    seq,
                    provider = self.provider.name(),
                    "Error fetching movies"
                );
                FetchState::Error(e.user_message())
            }
        };

        self.apply(seq, next).await;
    }

    /// Applies a resolved fetch if it is still the latest one started
    async fn apply(&self, seq: u64, next: FetchState) -> bool {
        let mut state = self.state.write().await;

        // checked under the write lock so a newer start cannot interleave
        if self.latest_fetch.load(Ordering::SeqCst) != seq {
            tracing::debug!(seq, "Discarding stale fetch result");
            return false;
        }

        state.fetch = next;
        true
    }

    pub async fn fetch_state(&self) -> FetchState {
        self.state.read().await.fetch.clone()
    }

    pub async fn trending(&self) -> Vec<SearchRecord> {
        self.state.read().await.trending.clone()
    }

    /// Snapshot of everything the page renders; `search_term` is the live input
    pub async fn snapshot(&self, search_term: String) -> ViewSnapshot {
        let state = self.state.read().await;
        ViewSnapshot {
            search_term,
            debounced_term: state.debounced_term.clone(),
            status: state.fetch.status(),
            movies: state.fetch.movies().to_vec(),
            error: state.fetch.error().map(str::to_string),
            trending: TrendingEntry::ranked(&state.trending),
        }
    }
}
