//! services/deck/src/adapters/oracle.rs
//!
//! Swipe oracle implementations. Neither is real matching: the probabilistic oracle stands in
//! for the ranking service, and the scripted one gives deterministic answers.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use partner_deck_core::{OracleVerdict, PortError, PortResult, SwipeOracle, SwipeRecord};
use tracing::debug;
use uuid::Uuid;

//=========================================================================================
// ProbabilisticOracle
//=========================================================================================

/// Matches interested swipes with a fixed probability.
pub struct ProbabilisticOracle {
    probability: f64,
    latency: Duration,
    rng: Mutex<fastrand::Rng>,
}

impl ProbabilisticOracle {
    pub fn new(probability: f64, latency: Duration, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => fastrand::Rng::with_seed(seed),
            None => fastrand::Rng::new(),
        };
        Self {
            probability: probability.clamp(0.0, 1.0),
            latency,
            rng: Mutex::new(rng),
        }
    }

    fn roll(&self) -> PortResult<f64> {
        let mut rng = self
            .rng
            .lock()
            .map_err(|_| PortError::Unexpected("oracle rng poisoned".to_string()))?;
        Ok(rng.f64())
    }
}

#[async_trait]
impl SwipeOracle for ProbabilisticOracle {
    async fn submit(&self, swipe: SwipeRecord) -> PortResult<OracleVerdict> {
        tokio::time::sleep(self.latency).await;

        if !swipe.direction.is_interested() {
            return Ok(OracleVerdict::default());
        }
        if self.roll()? >= self.probability {
            return Ok(OracleVerdict::default());
        }

        let match_id = format!("match_{}", Uuid::new_v4());
        debug!(target_id = %swipe.target_company_id, %match_id, "Oracle matched.");
        Ok(OracleVerdict {
            matched: true,
            match_id: Some(match_id),
        })
    }
}

//=========================================================================================
// ScriptedOracle
//=========================================================================================

/// Replays a queue of answers, then reports "no match" forever.
#[derive(Default)]
pub struct ScriptedOracle {
    verdicts: Mutex<VecDeque<PortResult<OracleVerdict>>>,
}

impl ScriptedOracle {
    pub fn new(verdicts: impl IntoIterator<Item = PortResult<OracleVerdict>>) -> Self {
        Self {
            verdicts: Mutex::new(verdicts.into_iter().collect()),
        }
    }

    /// Matches the first `n` swipes with ids `m1..=mn`.
    pub fn matching_first(n: usize) -> Self {
        Self::new((1..=n).map(|i| {
            Ok(OracleVerdict {
                matched: true,
                match_id: Some(format!("m{i}")),
            })
        }))
    }
}

#[async_trait]
impl SwipeOracle for ScriptedOracle {
    async fn submit(&self, _swipe: SwipeRecord) -> PortResult<OracleVerdict> {
        let mut verdicts = self
            .verdicts
            .lock()
            .map_err(|_| PortError::Unexpected("oracle script poisoned".to_string()))?;
        verdicts.pop_front().unwrap_or_else(|| Ok(OracleVerdict::default()))
    }
}
