//! crates/partner_deck_core/src/domain.rs
//!
//! Defines the pure, core data structures for partner discovery.
//! These structs carry no behavior beyond small helpers and are independent of any
//! transport or storage format; serde derives only fix the JSON shape used by fixtures.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

//=========================================================================================
// Identity
//=========================================================================================

/// The logged-in user and the company they act for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub user_id: String,
    pub company_id: String,
}

//=========================================================================================
// Candidates
//=========================================================================================

/// A company surfaced for swipe review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateCompany {
    pub id: String,
    pub brand_name: String,
    pub legal_name: String,
    #[serde(default)]
    pub logo_url: Option<String>,
    pub industry: String,
    pub hq_location: String,
    pub employee_range: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub offerings: Vec<String>,
    #[serde(default)]
    pub needs: Vec<String>,
    #[serde(default)]
    pub offering_summary: String,
    #[serde(default)]
    pub needs_summary: String,
    #[serde(default)]
    pub verification_badges: Vec<String>,
    #[serde(default)]
    pub response_speed: String,
    #[serde(default)]
    pub geographies: Vec<String>,
}

impl CandidateCompany {
    pub fn is_verified(&self) -> bool {
        !self.verification_badges.is_empty()
    }
}

/// One explanation of why a candidate was ranked for the swiper.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchReason {
    pub icon: String,
    pub label: String,
    pub description: String,
}

/// A read-only snapshot of a candidate: profile, ranked reasons and score (0-100).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub company: CandidateCompany,
    #[serde(default)]
    pub match_reasons: Vec<MatchReason>,
    pub match_score: u8,
}

//=========================================================================================
// Swipes
//=========================================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SwipeDirection {
    /// Pass.
    Left,
    /// Interested.
    Right,
    /// Reserved; treated as a stronger `Right`.
    SuperLike,
}

impl SwipeDirection {
    pub fn is_interested(self) -> bool {
        matches!(self, SwipeDirection::Right | SwipeDirection::SuperLike)
    }
}

/// A single swipe decision, handed by value to the swipe oracle.
/// The client keeps no history of these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwipeRecord {
    pub swiper_company_id: String,
    pub target_company_id: String,
    pub direction: SwipeDirection,
    pub created_at: DateTime<Utc>,
}

/// What the swipe oracle answered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OracleVerdict {
    pub matched: bool,
    #[serde(default)]
    pub match_id: Option<String>,
}

/// The result of `submit_swipe` as seen by the presentation layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SwipeOutcome {
    pub matched: bool,
    pub match_id: Option<String>,
}

impl SwipeOutcome {
    pub fn no_match() -> Self {
        Self::default()
    }
}

//=========================================================================================
// Matches
//=========================================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    New,
    Chatting,
    MeetingScheduled,
    Completed,
    Declined,
}

impl MatchStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, MatchStatus::Completed | MatchStatus::Declined)
    }
}

/// Denormalized view of the counterpart company stored on a match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchedCompanyPreview {
    pub id: String,
    pub brand_name: String,
    #[serde(default)]
    pub logo_url: Option<String>,
    pub industry: String,
    pub hq_location: String,
    pub offering_summary: String,
    pub needs_summary: String,
    #[serde(default)]
    pub verification_badges: Vec<String>,
}

impl From<&CandidateCompany> for MatchedCompanyPreview {
    fn from(company: &CandidateCompany) -> Self {
        Self {
            id: company.id.clone(),
            brand_name: company.brand_name.clone(),
            logo_url: company.logo_url.clone(),
            industry: company.industry.clone(),
            hq_location: company.hq_location.clone(),
            offering_summary: company.offering_summary.clone(),
            needs_summary: company.needs_summary.clone(),
            verification_badges: company.verification_badges.clone(),
        }
    }
}

/// A mutual-interest pairing between two companies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    pub id: String,
    pub company_a_id: String,
    pub company_b_id: String,
    pub matched_company: MatchedCompanyPreview,
    #[serde(default)]
    pub match_reasons: Vec<MatchReason>,
    pub match_score: u8,
    pub status: MatchStatus,
    #[serde(default)]
    pub last_message_preview: Option<String>,
    #[serde(default)]
    pub last_message_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub unread_count: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Match {
    /// Builds a fresh `new` match between the swiper and a candidate it just matched with.
    pub fn from_candidate(
        id: String,
        swiper_company_id: &str,
        candidate: &Candidate,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            company_a_id: swiper_company_id.to_string(),
            company_b_id: candidate.company.id.clone(),
            matched_company: MatchedCompanyPreview::from(&candidate.company),
            match_reasons: candidate.match_reasons.clone(),
            match_score: candidate.match_score,
            status: MatchStatus::New,
            last_message_preview: None,
            last_message_at: None,
            unread_count: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// True when both matches join the same two companies, in either order.
    pub fn same_pair(&self, other: &Match) -> bool {
        self.joins(&other.company_a_id, &other.company_b_id)
    }

    pub fn joins(&self, a: &str, b: &str) -> bool {
        (self.company_a_id == a && self.company_b_id == b)
            || (self.company_a_id == b && self.company_b_id == a)
    }
}

//=========================================================================================
// Messages
//=========================================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageType {
    Text,
    Attachment,
    RfqTemplate,
    CapabilityDeck,
    System,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: String,
    pub match_id: String,
    pub sender_id: String,
    pub sender_company_id: String,
    pub content: String,
    #[serde(rename = "type")]
    pub kind: MessageType,
    #[serde(default)]
    pub attachment_url: Option<String>,
    #[serde(default)]
    pub attachment_name: Option<String>,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

//=========================================================================================
// Meetings
//=========================================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeetingStatus {
    Proposed,
    Accepted,
    Rejected,
    Cancelled,
    Completed,
}

/// A time window offered for a meeting, before it gets an id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotRequest {
    pub start_time_utc: DateTime<Utc>,
    pub end_time_utc: DateTime<Utc>,
    pub timezone: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposedSlot {
    pub id: String,
    pub start_time_utc: DateTime<Utc>,
    pub end_time_utc: DateTime<Utc>,
    pub timezone: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeetingSlot {
    pub id: String,
    pub match_id: String,
    pub proposed_by: String,
    pub slots: Vec<ProposedSlot>,
    #[serde(default)]
    pub selected_slot_id: Option<String>,
    pub status: MeetingStatus,
    #[serde(default)]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
