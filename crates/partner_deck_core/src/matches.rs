//! crates/partner_deck_core/src/matches.rs
//!
//! The match board: loads the session's existing matches into the shared registry and
//! exposes the list views and badge counts used by the matches tab.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::domain::{Match, MatchStatus};
use crate::error::{DeckError, DeckResult};
use crate::loading::{LoadGuard, LoadOutcome};
use crate::ports::MatchSource;
use crate::registry::SharedRegistry;

#[derive(Debug, Default)]
struct BoardState {
    guard: LoadGuard,
    selected: Option<String>,
}

#[derive(Clone)]
pub struct MatchBoard {
    company_id: String,
    source: Arc<dyn MatchSource>,
    registry: SharedRegistry,
    state: Arc<Mutex<BoardState>>,
}

impl MatchBoard {
    pub fn new(company_id: impl Into<String>, source: Arc<dyn MatchSource>, registry: SharedRegistry) -> Self {
        Self {
            company_id: company_id.into(),
            source,
            registry,
            state: Arc::new(Mutex::new(BoardState::default())),
        }
    }

    /// Loads matches once per session; each one goes through the registry's pair dedup.
    pub async fn load(&self) -> DeckResult<LoadOutcome> {
        let ticket = match self.state.lock().await.guard.begin() {
            Some(ticket) => ticket,
            None => return Ok(LoadOutcome::Skipped),
        };

        let response = self.source.fetch_matches(&self.company_id).await;

        let mut state = self.state.lock().await;
        if !state.guard.is_current(ticket) {
            info!(generation = ticket.generation(), "Discarding stale match list.");
            return Ok(LoadOutcome::Stale);
        }

        match response {
            Ok(matches) => {
                let mut registry = self.registry.lock().await;
                let fetched = matches.len();
                let mut admitted = 0;
                for m in matches {
                    if registry.append(m) {
                        admitted += 1;
                    }
                }
                info!(fetched, admitted, "Matches loaded.");
                state.guard.finish(ticket, Ok(()));
                Ok(LoadOutcome::Applied(registry.len()))
            }
            Err(e) => {
                warn!(error = %e, "Match source failed.");
                state.guard.finish(ticket, Err(DeckError::MatchesUnavailable));
                Err(DeckError::MatchesUnavailable)
            }
        }
    }

    /// Allows the next `load` to hit the source again. Locally created matches are kept.
    pub async fn refresh(&self) -> DeckResult<LoadOutcome> {
        self.state.lock().await.guard.reset();
        self.load().await
    }

    /// Moves a match to `status` locally, then mirrors it to the match source.
    /// A remote failure is logged and does not undo the local change.
    pub async fn update_status(&self, match_id: &str, status: MatchStatus) -> DeckResult<()> {
        if !self.registry.lock().await.update_status(match_id, status) {
            return Err(DeckError::UnknownMatch(match_id.to_string()));
        }
        info!(match_id, ?status, "Match status changed.");
        if let Err(e) = self.source.update_match_status(match_id, status).await {
            warn!(match_id, error = %e, "Could not sync match status.");
        }
        Ok(())
    }

    pub(crate) fn registry(&self) -> &SharedRegistry {
        &self.registry
    }

    pub async fn error(&self) -> Option<DeckError> {
        self.state.lock().await.guard.error().cloned()
    }

    pub async fn all(&self) -> Vec<Match> {
        self.registry.lock().await.list().to_vec()
    }

    /// Matches nobody has acted on yet.
    pub async fn new_matches(&self) -> Vec<Match> {
        self.by(|m| m.status == MatchStatus::New).await
    }

    pub async fn active_matches(&self) -> Vec<Match> {
        self.by(|m| m.status != MatchStatus::New).await
    }

    async fn by(&self, keep: impl Fn(&Match) -> bool) -> Vec<Match> {
        let registry = self.registry.lock().await;
        registry.list().iter().filter(|m| keep(m)).cloned().collect()
    }

    pub async fn get(&self, match_id: &str) -> Option<Match> {
        self.registry.lock().await.get(match_id).cloned()
    }

    /// Navigation badge count.
    pub async fn total_unread(&self) -> u32 {
        self.registry.lock().await.total_unread()
    }

    pub async fn unread_for(&self, match_id: &str) -> Option<u32> {
        self.registry.lock().await.unread_for(match_id)
    }

    pub async fn select(&self, match_id: Option<&str>) -> DeckResult<()> {
        if let Some(id) = match_id {
            if self.registry.lock().await.get(id).is_none() {
                return Err(DeckError::UnknownMatch(id.to_string()));
            }
        }
        self.state.lock().await.selected = match_id.map(str::to_string);
        Ok(())
    }

    pub async fn selected(&self) -> Option<Match> {
        let id = self.state.lock().await.selected.clone()?;
        self.get(&id).await
    }

    pub async fn clear(&self) {
        let mut state = self.state.lock().await;
        state.guard.reset();
        state.selected = None;
        self.registry.lock().await.clear();
    }
}
