//! crates/partner_deck_core/src/deck.rs
//!
//! The deck controller: the single read/command surface the discovery screen talks to.
//! It owns the candidate store, filters and quota for one session and delegates swipes
//! to the [`SwipeDecisionEngine`].

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::info;

use crate::candidates::CandidateStore;
use crate::domain::{Candidate, SwipeDirection, SwipeOutcome};
use crate::error::{DeckError, DeckResult};
use crate::filters::{apply_filters, FilterCriteria, FilterPatch};
use crate::loading::LoadOutcome;
use crate::ports::{CandidateSource, SwipeOracle};
use crate::quota::{DailyCounters, SwipeQuota, DEFAULT_DAILY_SWIPE_LIMIT};
use crate::registry::SharedRegistry;
use crate::swipe::SwipeDecisionEngine;

//=========================================================================================
// Settings and State
//=========================================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeckSettings {
    pub swipe_limit: u32,
    /// Default number of cards in the visible window.
    pub window_size: usize,
    /// `limit` passed to the candidate source.
    pub fetch_limit: usize,
}

impl Default for DeckSettings {
    fn default() -> Self {
        Self {
            swipe_limit: DEFAULT_DAILY_SWIPE_LIMIT,
            window_size: 3,
            fetch_limit: 20,
        }
    }
}

/// Mutable deck state for one session. Only the controller and the swipe engine write to it.
#[derive(Debug)]
pub struct DeckState {
    pub(crate) store: CandidateStore,
    pub(crate) filters: FilterCriteria,
    pub(crate) quota: SwipeQuota,
    pub(crate) last_match_id: Option<String>,
}

impl DeckState {
    pub fn new(settings: DeckSettings) -> Self {
        Self {
            store: CandidateStore::new(),
            filters: FilterCriteria::default(),
            quota: SwipeQuota::new(settings.swipe_limit),
            last_match_id: None,
        }
    }

    /// The filtered queue of candidates not yet consumed.
    pub fn visible(&self) -> Vec<&Candidate> {
        apply_filters(self.store.remaining(), &self.filters)
    }
}

//=========================================================================================
// DeckController
//=========================================================================================

/// Cheap to clone; every clone drives the same session state.
#[derive(Clone)]
pub struct DeckController {
    company_id: String,
    settings: DeckSettings,
    source: Arc<dyn CandidateSource>,
    state: Arc<Mutex<DeckState>>,
    engine: SwipeDecisionEngine,
}

impl DeckController {
    pub fn new(
        company_id: impl Into<String>,
        settings: DeckSettings,
        source: Arc<dyn CandidateSource>,
        oracle: Arc<dyn SwipeOracle>,
        registry: SharedRegistry,
    ) -> Self {
        let company_id = company_id.into();
        let state = Arc::new(Mutex::new(DeckState::new(settings)));
        let engine = SwipeDecisionEngine::new(company_id.clone(), state.clone(), registry, oracle);
        Self {
            company_id,
            settings,
            source,
            state,
            engine,
        }
    }

    pub fn company_id(&self) -> &str {
        &self.company_id
    }

    pub fn settings(&self) -> DeckSettings {
        self.settings
    }

    // --- Loading ---

    /// Loads candidates once per session. Repeated calls while a load is in flight or after it
    /// finished return [`LoadOutcome::Skipped`] without contacting the source.
    pub async fn load(&self) -> DeckResult<LoadOutcome> {
        let ticket = {
            let mut state = self.state.lock().await;
            match state.store.begin_load() {
                Some(ticket) => ticket,
                None => return Ok(LoadOutcome::Skipped),
            }
        };

        info!(
            company_id = %self.company_id,
            generation = ticket.generation(),
            "Loading candidates."
        );
        let response = self
            .source
            .fetch_candidates(&self.company_id, self.settings.fetch_limit)
            .await;

        let mut state = self.state.lock().await;
        state.store.complete_load(ticket, response)
    }

    /// Clears candidates and cursor, invalidating any in-flight load.
    pub async fn reset(&self) {
        self.state.lock().await.store.reset();
    }

    /// Resets the candidate store and loads again.
    pub async fn refresh(&self) -> DeckResult<LoadOutcome> {
        self.reset().await;
        self.load().await
    }

    pub async fn is_loading(&self) -> bool {
        self.state.lock().await.store.is_loading()
    }

    pub async fn error(&self) -> Option<DeckError> {
        self.state.lock().await.store.error().cloned()
    }

    // --- Reads ---

    /// The first `n` candidates of the filtered, unconsumed deck.
    pub async fn visible_window(&self, n: usize) -> Vec<Candidate> {
        let state = self.state.lock().await;
        state.visible().into_iter().take(n).cloned().collect()
    }

    /// [`Self::visible_window`] with the configured window size.
    pub async fn window(&self) -> Vec<Candidate> {
        self.visible_window(self.settings.window_size).await
    }

    pub async fn current_candidate(&self) -> Option<Candidate> {
        let state = self.state.lock().await;
        state.visible().first().map(|c| (*c).clone())
    }

    /// Count of unswiped candidates at or after the cursor, ignoring filters.
    pub async fn remaining_count(&self) -> usize {
        self.state.lock().await.store.remaining().len()
    }

    pub async fn cursor(&self) -> usize {
        self.state.lock().await.store.cursor()
    }

    pub async fn daily_counters(&self) -> DailyCounters {
        self.state.lock().await.quota.counters()
    }

    pub async fn has_reached_limit(&self) -> bool {
        self.state.lock().await.quota.has_reached_limit()
    }

    // --- Commands ---

    pub async fn submit_swipe(
        &self,
        direction: SwipeDirection,
        candidate: Option<&Candidate>,
    ) -> SwipeOutcome {
        self.engine.submit(direction, candidate).await
    }

    pub async fn reset_daily_count(&self) {
        self.state.lock().await.quota.reset();
    }

    pub async fn filters(&self) -> FilterCriteria {
        self.state.lock().await.filters.clone()
    }

    pub async fn set_filters(&self, criteria: FilterCriteria) {
        self.state.lock().await.filters = criteria;
    }

    pub async fn update_filters(&self, patch: FilterPatch) {
        self.state.lock().await.filters.merge(patch);
    }

    // --- Match signal ---

    /// The id of the most recent newly admitted match, if not yet consumed.
    pub async fn last_match_id(&self) -> Option<String> {
        self.state.lock().await.last_match_id.clone()
    }

    /// Consumes the match signal; later calls return `None` until another match is admitted.
    pub async fn take_last_match_id(&self) -> Option<String> {
        self.state.lock().await.last_match_id.take()
    }

    pub async fn clear_last_match_id(&self) {
        self.state.lock().await.last_match_id = None;
    }

    /// Drops all session state (logout).
    pub async fn clear(&self) {
        let mut state = self.state.lock().await;
        state.store.reset();
        state.quota.reset();
        state.filters.clear();
        state.last_match_id = None;
    }
}
