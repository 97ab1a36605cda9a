//! crates/partner_deck_core/src/candidates.rs
//!
//! The candidate store: the fetched candidate list and the cursor into it.

use std::collections::HashSet;

use tracing::{debug, info, warn};

use crate::domain::Candidate;
use crate::error::{DeckError, DeckResult};
use crate::filters::FilterCriteria;
use crate::loading::{LoadGuard, LoadOutcome, LoadState, LoadTicket};
use crate::ports::PortResult;

/// Holds one session's candidates. Candidates are never mutated; the cursor only moves forward.
#[derive(Debug, Default)]
pub struct CandidateStore {
    candidates: Vec<Candidate>,
    cursor: usize,
    /// Ids swiped out of order, still ahead of the cursor.
    swiped_ahead: HashSet<String>,
    guard: LoadGuard,
}

impl CandidateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims the right to load. `None` means a load is in flight or already done this session.
    pub fn begin_load(&mut self) -> Option<LoadTicket> {
        let ticket = self.guard.begin();
        if ticket.is_none() {
            debug!(state = ?self.guard.state(), "Candidate load skipped.");
        }
        ticket
    }

    /// Applies a source response, unless the store was reset after `ticket` was issued.
    pub fn complete_load(
        &mut self,
        ticket: LoadTicket,
        response: PortResult<Vec<Candidate>>,
    ) -> DeckResult<LoadOutcome> {
        if !self.guard.is_current(ticket) {
            info!(
                generation = ticket.generation(),
                current = self.guard.generation(),
                "Discarding stale candidate response."
            );
            return Ok(LoadOutcome::Stale);
        }

        match response {
            Ok(candidates) => {
                info!(count = candidates.len(), "Candidates loaded.");
                self.candidates = candidates;
                self.cursor = 0;
                self.swiped_ahead.clear();
                self.guard.finish(ticket, Ok(()));
                Ok(LoadOutcome::Applied(self.candidates.len()))
            }
            Err(e) => {
                warn!(error = %e, "Candidate source failed.");
                self.guard.finish(ticket, Err(DeckError::CandidatesUnavailable));
                Err(DeckError::CandidatesUnavailable)
            }
        }
    }

    /// Clears the list and cursor and invalidates any in-flight load.
    pub fn reset(&mut self) {
        self.candidates.clear();
        self.cursor = 0;
        self.swiped_ahead.clear();
        self.guard.reset();
    }

    /// Candidates at or after the cursor that have not been swiped yet.
    pub fn remaining(&self) -> Vec<&Candidate> {
        self.ahead()
            .iter()
            .filter(|c| !self.swiped_ahead.contains(&c.company.id))
            .collect()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn is_exhausted(&self) -> bool {
        self.cursor >= self.candidates.len()
    }

    /// Records a swipe on the candidate with `company_id`.
    ///
    /// When every unswiped candidate before it is hidden by `filters`, the cursor moves past it
    /// and those hidden candidates are consumed with it. A candidate swiped while visible
    /// candidates are still ahead of it is set aside instead, so no unswiped visible card is
    /// ever dropped. An id not ahead of the cursor steps the cursor by one. The cursor never
    /// moves backwards and never passes the end of the list.
    pub fn advance_past(&mut self, company_id: &str, filters: &FilterCriteria) {
        let position = self
            .ahead()
            .iter()
            .position(|c| c.company.id == company_id && !self.swiped_ahead.contains(company_id));

        match position {
            Some(offset) => {
                let blocked = self.ahead()[..offset]
                    .iter()
                    .any(|c| filters.admits(c) && !self.swiped_ahead.contains(&c.company.id));
                if blocked {
                    self.swiped_ahead.insert(company_id.to_string());
                } else {
                    self.cursor += offset + 1;
                }
            }
            None => self.cursor = (self.cursor + 1).min(self.candidates.len()),
        }

        // Fold set-aside candidates that the cursor has reached.
        while let Some(next) = self.candidates.get(self.cursor) {
            if !self.swiped_ahead.remove(&next.company.id) {
                break;
            }
            self.cursor += 1;
        }
        self.swiped_ahead
            .retain(|id| self.candidates[self.cursor..].iter().any(|c| &c.company.id == id));
    }

    fn ahead(&self) -> &[Candidate] {
        &self.candidates[self.cursor.min(self.candidates.len())..]
    }

    pub fn load_state(&self) -> &LoadState {
        self.guard.state()
    }

    pub fn is_loading(&self) -> bool {
        self.guard.is_loading()
    }

    pub fn error(&self) -> Option<&DeckError> {
        self.guard.error()
    }
}
