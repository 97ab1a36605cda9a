//! services/deck/src/simulation.rs
//!
//! Drives a scripted discovery session: swipe through the deck, then follow up on every
//! match by chatting and proposing a meeting.

use std::sync::Arc;

use chrono::{Duration as ChronoDuration, Utc};
use futures::future::join_all;
use partner_deck_core::{
    DailyCounters, FilterCriteria, Match, Session, SessionPorts, SlotRequest, SwipeDirection,
};
use tracing::{info, warn};

use crate::adapters::{
    FixtureCandidateSource, InMemoryChat, InMemoryMatchSource, InMemoryScheduling,
    ProbabilisticOracle,
};
use crate::config::Config;
use crate::error::AppError;

/// How the simulated user behaves.
#[derive(Debug, Clone)]
pub struct SimulationPlan {
    /// Swipe right on candidates scoring at least this much.
    pub like_threshold: u8,
    pub filters: Option<FilterCriteria>,
    pub opener: String,
    /// How far ahead the proposed meeting starts.
    pub meeting_lead: ChronoDuration,
}

impl Default for SimulationPlan {
    fn default() -> Self {
        Self {
            like_threshold: 70,
            filters: None,
            opener: "Hi! Great to match - keen to explore a partnership.".to_string(),
            meeting_lead: ChronoDuration::days(2),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SimulationReport {
    pub counters: DailyCounters,
    pub swiped: usize,
    pub liked: usize,
    pub matches: Vec<Match>,
    pub meetings: usize,
    pub total_unread: u32,
}

/// Builds the in-process collaborators described by `config`.
pub fn ports_from_config(config: &Config) -> Result<SessionPorts, AppError> {
    let candidates =
        FixtureCandidateSource::from_path(&config.candidates_path, config.source_latency)?;
    let oracle = ProbabilisticOracle::new(
        config.match_probability,
        config.oracle_latency,
        config.oracle_seed,
    );
    Ok(SessionPorts {
        candidates: Arc::new(candidates),
        oracle: Arc::new(oracle),
        matches: Arc::new(InMemoryMatchSource::new(Vec::new(), config.service_latency)),
        chat: Arc::new(InMemoryChat::new(config.service_latency)),
        scheduling: Arc::new(InMemoryScheduling::new(config.service_latency)),
    })
}

pub async fn run(session: &Session, plan: &SimulationPlan) -> Result<SimulationReport, AppError> {
    // --- 1. Load the deck and existing matches ---
    session.deck.load().await?;
    session.board.load().await?;
    if let Some(filters) = &plan.filters {
        session.deck.set_filters(filters.clone()).await;
        info!(active = filters.active_count(), "Filters applied.");
    }

    // --- 2. Swipe until the deck or the quota runs out ---
    let mut swiped = 0;
    let mut liked = 0;
    loop {
        if session.deck.has_reached_limit().await {
            info!("Daily swipe limit reached.");
            break;
        }
        let Some(candidate) = session.deck.current_candidate().await else {
            info!("Deck exhausted.");
            break;
        };

        let direction = if candidate.match_score >= plan.like_threshold {
            liked += 1;
            SwipeDirection::Right
        } else {
            SwipeDirection::Left
        };
        let outcome = session.deck.submit_swipe(direction, None).await;
        swiped += 1;

        if let Some(match_id) = session.deck.take_last_match_id().await {
            info!(
                %match_id,
                company = %candidate.company.brand_name,
                score = candidate.match_score,
                "It's a match!"
            );
        } else if outcome.matched {
            info!(company = %candidate.company.brand_name, "Already matched with this company.");
        }
    }

    // --- 3. Follow up on every new match ---
    for m in session.board.new_matches().await {
        session.conversations.open(&m.id).await?;
        session.conversations.send(&m.id, &plan.opener).await?;

        let start = Utc::now() + plan.meeting_lead;
        let slot = SlotRequest {
            start_time_utc: start,
            end_time_utc: start + ChronoDuration::minutes(30),
            timezone: "UTC".to_string(),
        };
        if let Err(e) = session.scheduler.propose(&m.id, &[slot]).await {
            warn!(match_id = %m.id, error = %e, "Could not propose a meeting.");
        }
    }

    // --- 4. Summarize ---
    let matches = session.board.all().await;
    let meeting_lists = join_all(matches.iter().map(|m| session.scheduler.meetings(&m.id))).await;
    let meetings: usize = meeting_lists
        .into_iter()
        .filter_map(Result::ok)
        .map(|list| list.len())
        .sum();

    Ok(SimulationReport {
        counters: session.deck.daily_counters().await,
        swiped,
        liked,
        matches,
        meetings,
        total_unread: session.total_unread().await,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ScriptedOracle;
    use partner_deck_core::{Candidate, DeckSettings, Identity, MatchStatus};
    use std::time::Duration;

    fn fixture() -> Vec<Candidate> {
        serde_json::from_str(include_str!("../fixtures/candidates.json")).unwrap()
    }

    fn session(oracle: ScriptedOracle, settings: DeckSettings) -> Session {
        let ports = SessionPorts {
            candidates: Arc::new(FixtureCandidateSource::new(fixture(), Duration::ZERO)),
            oracle: Arc::new(oracle),
            matches: Arc::new(InMemoryMatchSource::new(Vec::new(), Duration::ZERO)),
            chat: Arc::new(InMemoryChat::new(Duration::ZERO)),
            scheduling: Arc::new(InMemoryScheduling::new(Duration::ZERO)),
        };
        let identity = Identity {
            user_id: "user_me".into(),
            company_id: "my_company".into(),
        };
        Session::start(identity, settings, ports)
    }

    #[tokio::test]
    async fn full_session_swipes_everything_and_follows_up() {
        let session = session(ScriptedOracle::matching_first(2), DeckSettings::default());
        let report = run(&session, &SimulationPlan::default()).await.unwrap();

        let total = fixture().len();
        assert_eq!(report.swiped, total);
        assert_eq!(report.counters.count as usize, total);
        assert_eq!(report.matches.len(), 2);
        assert!(report
            .matches
            .iter()
            .all(|m| m.status == MatchStatus::MeetingScheduled));
        assert_eq!(report.meetings, 2);
        assert_eq!(report.total_unread, 0);
    }

    #[tokio::test]
    async fn quota_stops_the_session_early() {
        let settings = DeckSettings {
            swipe_limit: 3,
            ..Default::default()
        };
        let session = session(ScriptedOracle::default(), settings);
        let report = run(&session, &SimulationPlan::default()).await.unwrap();
        assert_eq!(report.swiped, 3);
        assert!(report.matches.is_empty());
        assert_eq!(session.deck.remaining_count().await, fixture().len() - 3);
    }

    #[tokio::test]
    async fn filters_limit_what_gets_swiped() {
        let plan = SimulationPlan {
            filters: Some(FilterCriteria {
                industries: vec!["Technology".into()],
                ..Default::default()
            }),
            ..Default::default()
        };
        let session = session(ScriptedOracle::default(), DeckSettings::default());
        let report = run(&session, &plan).await.unwrap();
        let technology = fixture()
            .iter()
            .filter(|c| c.company.industry == "Technology")
            .count();
        assert_eq!(report.swiped, technology);
        assert_eq!(report.liked, technology);
    }
}
