//! crates/partner_deck_core/src/loading.rs
//!
//! Generation-guarded load bookkeeping shared by the candidate store and the match board.
//!
//! Every load captures a [`LoadTicket`] before it suspends on the collaborator. A `reset()`
//! bumps the generation, so a response that resolves afterwards no longer matches and is
//! dropped instead of resurrecting stale data.

use crate::error::DeckError;

/// Lifecycle of a guarded collection within one session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Loaded,
    Failed(DeckError),
}

/// Proof that a load was started under a particular generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
}

impl LoadTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// What happened to a load request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The response was applied; carries the number of items now held.
    Applied(usize),
    /// A load was already in flight or had already completed; nothing was started.
    Skipped,
    /// The store was reset while the request was in flight; its response was dropped.
    Stale,
}

#[derive(Debug, Default)]
pub struct LoadGuard {
    generation: u64,
    state: LoadState,
}

impl LoadGuard {
    /// Starts a load unless one is in flight or has already finished (successfully or not).
    pub fn begin(&mut self) -> Option<LoadTicket> {
        match self.state {
            LoadState::Idle => {
                self.state = LoadState::Loading;
                Some(LoadTicket {
                    generation: self.generation,
                })
            }
            LoadState::Loading | LoadState::Loaded | LoadState::Failed(_) => None,
        }
    }

    pub fn is_current(&self, ticket: LoadTicket) -> bool {
        ticket.generation == self.generation
    }

    /// Records the result of the load that owns `ticket`. Returns `false` if the ticket is stale,
    /// in which case the state is left untouched.
    pub fn finish(&mut self, ticket: LoadTicket, result: Result<(), DeckError>) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.state = match result {
            Ok(()) => LoadState::Loaded,
            Err(e) => LoadState::Failed(e),
        };
        true
    }

    pub fn reset(&mut self) {
        self.generation += 1;
        self.state = LoadState::Idle;
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_loading(&self) -> bool {
        self.state == LoadState::Loading
    }

    pub fn error(&self) -> Option<&DeckError> {
        match &self.state {
            LoadState::Failed(e) => Some(e),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_begin_is_refused_while_loading_and_after_completion() {
        let mut guard = LoadGuard::default();
        let ticket = guard.begin().unwrap();
        assert!(guard.begin().is_none());
        assert!(guard.finish(ticket, Ok(())));
        assert!(guard.begin().is_none());
        assert_eq!(guard.state(), &LoadState::Loaded);
    }

    #[test]
    fn failure_sticks_until_reset() {
        let mut guard = LoadGuard::default();
        let ticket = guard.begin().unwrap();
        guard.finish(ticket, Err(DeckError::CandidatesUnavailable));
        assert_eq!(guard.error(), Some(&DeckError::CandidatesUnavailable));
        assert!(guard.begin().is_none());

        guard.reset();
        assert!(guard.error().is_none());
        assert!(guard.begin().is_some());
    }

    #[test]
    fn reset_invalidates_in_flight_ticket() {
        let mut guard = LoadGuard::default();
        let old = guard.begin().unwrap();
        guard.reset();
        let fresh = guard.begin().unwrap();

        assert!(!guard.finish(old, Ok(())));
        assert!(guard.is_loading());
        assert!(guard.finish(fresh, Ok(())));
        assert_eq!(fresh.generation(), 1);
    }
}
