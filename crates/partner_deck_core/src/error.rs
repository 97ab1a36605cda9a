//! crates/partner_deck_core/src/error.rs
//!
//! The user-facing error taxonomy of the discovery core. Collaborator failures are
//! caught at the component that called them and converted into one of these.

use crate::domain::MatchStatus;

/// Errors the core surfaces to presentation code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DeckError {
    #[error("Failed to load candidates.")]
    CandidatesUnavailable,

    #[error("Failed to load matches.")]
    MatchesUnavailable,

    #[error("Failed to load messages.")]
    MessagesUnavailable,

    #[error("Failed to send message.")]
    SendFailed,

    #[error("Failed to update the meeting.")]
    SchedulingFailed,

    #[error("A meeting proposal needs at least one time slot.")]
    NoMeetingSlots,

    #[error("Unknown match: {0}")]
    UnknownMatch(String),

    #[error("Match {0} cannot change status from {1:?}.")]
    InvalidTransition(String, MatchStatus),
}

pub type DeckResult<T> = Result<T, DeckError>;
