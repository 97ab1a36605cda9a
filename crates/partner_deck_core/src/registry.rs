//! crates/partner_deck_core/src/registry.rs
//!
//! The match registry: at most one match per unordered company pair, plus unread counters.
//! Status changes are not validated here; callers drive the lifecycle.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::domain::{Match, MatchStatus};

/// Handle to the session's registry, shared by the deck, match board, chat and scheduler.
pub type SharedRegistry = Arc<Mutex<MatchRegistry>>;

/// Matches, newest first.
#[derive(Debug, Default)]
pub struct MatchRegistry {
    matches: Vec<Match>,
}

impl MatchRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> SharedRegistry {
        Arc::new(Mutex::new(Self::new()))
    }

    /// Inserts `candidate` at the front unless a match for the same company pair exists
    /// (first writer wins).
    pub fn add(&mut self, candidate: Match) -> bool {
        self.admit(candidate, 0)
    }

    /// Like [`Self::add`] but keeps list order, for matches loaded from the backend.
    pub fn append(&mut self, candidate: Match) -> bool {
        let end = self.matches.len();
        self.admit(candidate, end)
    }

    fn admit(&mut self, candidate: Match, at: usize) -> bool {
        if let Some(existing) = self.matches.iter().find(|m| m.same_pair(&candidate)) {
            info!(
                existing = %existing.id,
                rejected = %candidate.id,
                "Duplicate match for company pair ignored."
            );
            return false;
        }
        info!(match_id = %candidate.id, company = %candidate.matched_company.id, "Match admitted.");
        self.matches.insert(at.min(self.matches.len()), candidate);
        true
    }

    /// Sets the status of a match. Returns `false` if the id is unknown.
    pub fn update_status(&mut self, match_id: &str, status: MatchStatus) -> bool {
        match self.get_mut(match_id) {
            Some(m) => {
                debug!(match_id, from = ?m.status, to = ?status, "Match status updated.");
                m.status = status;
                m.updated_at = Utc::now();
                true
            }
            None => false,
        }
    }

    /// Zeroes the unread counter of exactly one match.
    pub fn mark_read(&mut self, match_id: &str) -> bool {
        match self.get_mut(match_id) {
            Some(m) => {
                m.unread_count = 0;
                true
            }
            None => false,
        }
    }

    /// Updates the last-message preview; incoming messages also bump the unread counter.
    pub fn record_message(
        &mut self,
        match_id: &str,
        preview: &str,
        at: DateTime<Utc>,
        incoming: bool,
    ) -> bool {
        match self.get_mut(match_id) {
            Some(m) => {
                m.last_message_preview = Some(preview.to_string());
                m.last_message_at = Some(at);
                m.updated_at = at;
                if incoming {
                    m.unread_count += 1;
                }
                true
            }
            None => false,
        }
    }

    pub fn total_unread(&self) -> u32 {
        self.matches.iter().map(|m| m.unread_count).sum()
    }

    pub fn unread_for(&self, match_id: &str) -> Option<u32> {
        self.get(match_id).map(|m| m.unread_count)
    }

    pub fn get(&self, match_id: &str) -> Option<&Match> {
        self.matches.iter().find(|m| m.id == match_id)
    }

    fn get_mut(&mut self, match_id: &str) -> Option<&mut Match> {
        self.matches.iter_mut().find(|m| m.id == match_id)
    }

    pub fn find_pair(&self, a: &str, b: &str) -> Option<&Match> {
        self.matches.iter().find(|m| m.joins(a, b))
    }

    pub fn list(&self) -> &[Match] {
        &self.matches
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    pub fn clear(&mut self) {
        self.matches.clear();
    }
}
