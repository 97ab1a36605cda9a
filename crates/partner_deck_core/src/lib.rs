pub mod candidates;
pub mod conversation;
pub mod deck;
pub mod domain;
pub mod error;
pub mod filters;
pub mod loading;
pub mod matches;
pub mod ports;
pub mod quota;
pub mod registry;
pub mod scheduling;
pub mod session;
pub mod swipe;

#[cfg(test)]
pub(crate) mod testing;

pub use deck::{DeckController, DeckSettings};
pub use domain::{
    Candidate, CandidateCompany, Identity, Match, MatchReason, MatchStatus, MatchedCompanyPreview,
    MeetingSlot, MeetingStatus, Message, MessageType, OracleVerdict, ProposedSlot, SlotRequest,
    SwipeDirection, SwipeOutcome, SwipeRecord,
};
pub use error::{DeckError, DeckResult};
pub use filters::{apply_filters, FilterCriteria, FilterPatch, VerificationLevel};
pub use loading::{LoadOutcome, LoadState};
pub use ports::{
    CandidateSource, ChatService, MatchSource, PortError, PortResult, SchedulingService,
    SwipeOracle,
};
pub use quota::{DailyCounters, SwipeQuota};
pub use session::{Session, SessionPorts};
