//! services/deck/src/adapters/matches.rs
//!
//! An in-process match list implementing the `MatchSource` port.

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use partner_deck_core::{Match, MatchSource, MatchStatus, PortError, PortResult};
use tokio::sync::Mutex;

pub struct InMemoryMatchSource {
    matches: Mutex<Vec<Match>>,
    latency: Duration,
}

impl InMemoryMatchSource {
    pub fn new(matches: Vec<Match>, latency: Duration) -> Self {
        Self {
            matches: Mutex::new(matches),
            latency,
        }
    }
}

#[async_trait]
impl MatchSource for InMemoryMatchSource {
    async fn fetch_matches(&self, company_id: &str) -> PortResult<Vec<Match>> {
        tokio::time::sleep(self.latency).await;
        Ok(self
            .matches
            .lock()
            .await
            .iter()
            .filter(|m| m.company_a_id == company_id || m.company_b_id == company_id)
            .cloned()
            .collect())
    }

    /// Known matches are updated in place; ids created client-side are accepted as-is.
    async fn update_match_status(&self, match_id: &str, status: MatchStatus) -> PortResult<()> {
        tokio::time::sleep(self.latency).await;
        if match_id.is_empty() {
            return Err(PortError::NotFound("empty match id".to_string()));
        }
        if let Some(m) = self.matches.lock().await.iter_mut().find(|m| m.id == match_id) {
            m.status = status;
            m.updated_at = Utc::now();
        }
        Ok(())
    }
}
