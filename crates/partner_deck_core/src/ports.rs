//! crates/partner_deck_core/src/ports.rs
//!
//! Defines the service contracts (traits) the discovery core consumes.
//! These traits form the boundary of the hexagonal architecture: candidate fetching,
//! match decisions, match lists, chat and scheduling are all owned by outside adapters.

use async_trait::async_trait;

use crate::domain::{
    Candidate, Match, MatchStatus, MeetingSlot, MeetingStatus, Message, OracleVerdict,
    SlotRequest, SwipeRecord,
};

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
/// This abstracts away the specific errors from external services (e.g., network, backend).
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Service temporarily unavailable: {0}")]
    Unavailable(String),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

#[async_trait]
pub trait CandidateSource: Send + Sync {
    /// Fetches up to `limit` ranked candidates for the given company.
    async fn fetch_candidates(&self, company_id: &str, limit: usize) -> PortResult<Vec<Candidate>>;
}

/// Decides whether a swipe produces a match. Placeholder policies and real ranking
/// services both sit behind this trait.
#[async_trait]
pub trait SwipeOracle: Send + Sync {
    async fn submit(&self, swipe: SwipeRecord) -> PortResult<OracleVerdict>;
}

#[async_trait]
pub trait MatchSource: Send + Sync {
    async fn fetch_matches(&self, company_id: &str) -> PortResult<Vec<Match>>;

    async fn update_match_status(&self, match_id: &str, status: MatchStatus) -> PortResult<()>;
}

#[async_trait]
pub trait ChatService: Send + Sync {
    async fn get_messages(&self, match_id: &str) -> PortResult<Vec<Message>>;

    async fn send_message(
        &self,
        match_id: &str,
        sender_id: &str,
        sender_company_id: &str,
        content: &str,
    ) -> PortResult<Message>;

    /// Marks every message in the conversation as read for `user_id`.
    async fn mark_as_read(&self, match_id: &str, user_id: &str) -> PortResult<()>;
}

#[async_trait]
pub trait SchedulingService: Send + Sync {
    async fn propose_meeting(
        &self,
        match_id: &str,
        proposed_by: &str,
        slots: &[SlotRequest],
    ) -> PortResult<MeetingSlot>;

    async fn respond_to_meeting(
        &self,
        meeting_id: &str,
        status: MeetingStatus,
        selected_slot_id: Option<&str>,
    ) -> PortResult<()>;

    async fn get_meetings(&self, match_id: &str) -> PortResult<Vec<MeetingSlot>>;
}
