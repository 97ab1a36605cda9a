//! crates/partner_deck_core/src/swipe.rs
//!
//! The swipe decision engine.
//!
//! A swipe runs in two phases:
//!
//! 1. [`commit_swipe`] checks the quota guard, resolves the acting candidate and advances the
//!    cursor and quota. This happens synchronously and is never rolled back.
//! 2. [`reconcile_swipe`] turns the oracle's answer into a registered match. A failed oracle
//!    call degrades to "no match"; the deck has already moved on.
//!
//! [`SwipeDecisionEngine::submit`] wires the two phases around the oracle call.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::deck::DeckState;
use crate::domain::{Candidate, Match, OracleVerdict, SwipeDirection, SwipeOutcome, SwipeRecord};
use crate::ports::{PortResult, SwipeOracle};
use crate::registry::{MatchRegistry, SharedRegistry};

/// A swipe that has been committed locally and still awaits the oracle.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingSwipe {
    pub record: SwipeRecord,
    pub candidate: Candidate,
}

/// Result of reconciling an oracle answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciled {
    pub outcome: SwipeOutcome,
    /// True only when a new match entered the registry.
    pub admitted: bool,
}

/// Phase one: the tentative local commit.
///
/// Returns `None` without touching `state` when the quota is used up or there is no candidate
/// to act on. An explicitly supplied candidate wins over the head of the visible queue.
pub fn commit_swipe(
    state: &mut DeckState,
    swiper_company_id: &str,
    direction: SwipeDirection,
    explicit: Option<&Candidate>,
    now: DateTime<Utc>,
) -> Option<PendingSwipe> {
    if state.quota.has_reached_limit() {
        info!(count = state.quota.count(), "Daily swipe limit reached; swipe ignored.");
        return None;
    }

    let candidate = match explicit {
        Some(c) => c.clone(),
        None => state.visible().first().map(|c| (*c).clone())?,
    };

    state.store.advance_past(&candidate.company.id, &state.filters);
    state.quota.increment();
    debug!(
        target_id = %candidate.company.id,
        ?direction,
        cursor = state.store.cursor(),
        count = state.quota.count(),
        "Swipe committed."
    );

    Some(PendingSwipe {
        record: SwipeRecord {
            swiper_company_id: swiper_company_id.to_string(),
            target_company_id: candidate.company.id.clone(),
            direction,
            created_at: now,
        },
        candidate,
    })
}

/// Phase two: apply the oracle's verdict. No local state is rolled back on failure.
pub fn reconcile_swipe(
    swiper_company_id: &str,
    candidate: &Candidate,
    verdict: PortResult<OracleVerdict>,
    registry: &mut MatchRegistry,
    now: DateTime<Utc>,
) -> Reconciled {
    let verdict = match verdict {
        Ok(v) => v,
        Err(e) => {
            warn!(
                target_id = %candidate.company.id,
                error = %e,
                "Swipe submission failed; deck already advanced."
            );
            return Reconciled {
                outcome: SwipeOutcome::no_match(),
                admitted: false,
            };
        }
    };

    if !verdict.matched {
        return Reconciled {
            outcome: SwipeOutcome::no_match(),
            admitted: false,
        };
    }

    let match_id = verdict
        .match_id
        .unwrap_or_else(|| format!("match_{}", Uuid::new_v4()));
    let new_match = Match::from_candidate(match_id.clone(), swiper_company_id, candidate, now);

    if registry.add(new_match) {
        return Reconciled {
            outcome: SwipeOutcome {
                matched: true,
                match_id: Some(match_id),
            },
            admitted: true,
        };
    }

    // The pair already had a match; report the one that is on record.
    let existing = registry
        .find_pair(swiper_company_id, &candidate.company.id)
        .map(|m| m.id.clone());
    Reconciled {
        outcome: SwipeOutcome {
            matched: true,
            match_id: existing,
        },
        admitted: false,
    }
}

/// Runs swipes against the shared deck state, the oracle and the match registry.
#[derive(Clone)]
pub struct SwipeDecisionEngine {
    swiper_company_id: String,
    state: Arc<Mutex<DeckState>>,
    registry: SharedRegistry,
    oracle: Arc<dyn SwipeOracle>,
}

impl SwipeDecisionEngine {
    pub fn new(
        swiper_company_id: String,
        state: Arc<Mutex<DeckState>>,
        registry: SharedRegistry,
        oracle: Arc<dyn SwipeOracle>,
    ) -> Self {
        Self {
            swiper_company_id,
            state,
            registry,
            oracle,
        }
    }

    /// Records a swipe and reports whether it produced a match.
    ///
    /// Callers must not issue a second swipe until this one resolves; the engine does not queue.
    pub async fn submit(
        &self,
        direction: SwipeDirection,
        candidate: Option<&Candidate>,
    ) -> SwipeOutcome {
        let pending = {
            let mut state = self.state.lock().await;
            commit_swipe(
                &mut state,
                &self.swiper_company_id,
                direction,
                candidate,
                Utc::now(),
            )
        };
        let Some(PendingSwipe { record, candidate }) = pending else {
            return SwipeOutcome::no_match();
        };

        let verdict = self.oracle.submit(record).await;

        let reconciled = {
            let mut registry = self.registry.lock().await;
            reconcile_swipe(
                &self.swiper_company_id,
                &candidate,
                verdict,
                &mut registry,
                Utc::now(),
            )
        };

        if reconciled.admitted {
            let mut state = self.state.lock().await;
            state.last_match_id = reconciled.outcome.match_id.clone();
        }
        reconciled.outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::DeckSettings;
    use crate::ports::PortError;
    use crate::testing::{candidate, loaded_state};

    const ME: &str = "my_company";

    #[test]
    fn commit_advances_cursor_and_quota() {
        let mut state = loaded_state(&["a", "b", "c"], DeckSettings::default());
        let pending = commit_swipe(&mut state, ME, SwipeDirection::Right, None, Utc::now()).unwrap();
        assert_eq!(pending.record.target_company_id, "a");
        assert_eq!(pending.record.swiper_company_id, ME);
        assert_eq!(state.store.cursor(), 1);
        assert_eq!(state.quota.count(), 1);
    }

    #[test]
    fn commit_is_a_no_op_when_limit_reached() {
        let settings = DeckSettings {
            swipe_limit: 1,
            ..Default::default()
        };
        let mut state = loaded_state(&["a", "b"], settings);
        commit_swipe(&mut state, ME, SwipeDirection::Left, None, Utc::now()).unwrap();
        assert!(commit_swipe(&mut state, ME, SwipeDirection::Left, None, Utc::now()).is_none());
        assert_eq!(state.store.cursor(), 1);
        assert_eq!(state.quota.count(), 1);
    }

    #[test]
    fn commit_without_any_candidate_changes_nothing() {
        let mut state = loaded_state(&[], DeckSettings::default());
        assert!(commit_swipe(&mut state, ME, SwipeDirection::Right, None, Utc::now()).is_none());
        assert_eq!(state.quota.count(), 0);
    }

    #[test]
    fn explicit_candidate_takes_precedence_over_head() {
        let mut state = loaded_state(&["a", "b", "c"], DeckSettings::default());
        let detail = state.store.remaining()[1].clone();
        let pending =
            commit_swipe(&mut state, ME, SwipeDirection::Right, Some(&detail), Utc::now()).unwrap();
        assert_eq!(pending.record.target_company_id, "b");
        assert_eq!(state.store.cursor(), 0);
        let left: Vec<_> = state.visible().iter().map(|c| c.company.id.as_str()).collect();
        assert_eq!(left, ["a", "c"]);
    }

    #[test]
    fn failed_oracle_degrades_to_no_match() {
        let mut registry = MatchRegistry::new();
        let reconciled = reconcile_swipe(
            ME,
            &candidate("a", "Technology"),
            Err(PortError::Unavailable("offline".into())),
            &mut registry,
            Utc::now(),
        );
        assert_eq!(reconciled.outcome, SwipeOutcome::no_match());
        assert!(!reconciled.admitted);
        assert!(registry.is_empty());
    }

    #[test]
    fn match_without_oracle_id_gets_a_generated_one() {
        let mut registry = MatchRegistry::new();
        let reconciled = reconcile_swipe(
            ME,
            &candidate("a", "Technology"),
            Ok(OracleVerdict {
                matched: true,
                match_id: None,
            }),
            &mut registry,
            Utc::now(),
        );
        let id = reconciled.outcome.match_id.unwrap();
        assert!(id.starts_with("match_"));
        let stored = registry.get(&id).unwrap();
        assert_eq!(stored.company_a_id, ME);
        assert_eq!(stored.company_b_id, "a");
        assert_eq!(stored.matched_company.industry, "Technology");
    }

    #[test]
    fn duplicate_match_reports_the_existing_id() {
        let mut registry = MatchRegistry::new();
        let target = candidate("a", "Technology");
        let first = reconcile_swipe(
            ME,
            &target,
            Ok(OracleVerdict {
                matched: true,
                match_id: Some("m1".into()),
            }),
            &mut registry,
            Utc::now(),
        );
        assert!(first.admitted);
        let second = reconcile_swipe(
            ME,
            &target,
            Ok(OracleVerdict {
                matched: true,
                match_id: Some("m2".into()),
            }),
            &mut registry,
            Utc::now(),
        );
        assert!(!second.admitted);
        assert_eq!(second.outcome.match_id.as_deref(), Some("m1"));
        assert_eq!(registry.len(), 1);
    }
}
