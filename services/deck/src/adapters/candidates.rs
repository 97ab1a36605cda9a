//! services/deck/src/adapters/candidates.rs
//!
//! A candidate source backed by a JSON fixture file.
//! It implements the `CandidateSource` port from the `core` crate.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use partner_deck_core::{Candidate, CandidateSource, PortResult};
use tracing::debug;

use crate::error::AppError;

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// Serves a fixed, ranked candidate list after a simulated network delay.
#[derive(Clone)]
pub struct FixtureCandidateSource {
    candidates: Vec<Candidate>,
    latency: Duration,
}

impl FixtureCandidateSource {
    pub fn new(candidates: Vec<Candidate>, latency: Duration) -> Self {
        Self { candidates, latency }
    }

    /// Reads the fixture once; the file is a JSON array of candidates.
    pub fn from_path(path: &Path, latency: Duration) -> Result<Self, AppError> {
        let raw = std::fs::read_to_string(path)?;
        let candidates: Vec<Candidate> = serde_json::from_str(&raw)?;
        debug!(path = %path.display(), count = candidates.len(), "Candidate fixture read.");
        Ok(Self::new(candidates, latency))
    }
}

//=========================================================================================
// `CandidateSource` Trait Implementation
//=========================================================================================

#[async_trait]
impl CandidateSource for FixtureCandidateSource {
    /// Returns up to `limit` candidates, never the requesting company itself.
    async fn fetch_candidates(&self, company_id: &str, limit: usize) -> PortResult<Vec<Candidate>> {
        tokio::time::sleep(self.latency).await;
        Ok(self
            .candidates
            .iter()
            .filter(|c| c.company.id != company_id)
            .take(limit)
            .cloned()
            .collect())
    }
}
