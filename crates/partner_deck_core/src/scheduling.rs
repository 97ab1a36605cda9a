//! crates/partner_deck_core/src/scheduling.rs
//!
//! Meeting scheduling for a match, and the match status moves that go with it.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::{Identity, MatchStatus, MeetingSlot, MeetingStatus, SlotRequest};
use crate::error::{DeckError, DeckResult};
use crate::matches::MatchBoard;
use crate::ports::SchedulingService;

#[derive(Clone)]
pub struct Scheduler {
    identity: Identity,
    service: Arc<dyn SchedulingService>,
    board: MatchBoard,
}

impl Scheduler {
    pub fn new(identity: Identity, service: Arc<dyn SchedulingService>, board: MatchBoard) -> Self {
        Self {
            identity,
            service,
            board,
        }
    }

    async fn status_of(&self, match_id: &str) -> DeckResult<MatchStatus> {
        match self.board.get(match_id).await {
            Some(m) => Ok(m.status),
            None => Err(DeckError::UnknownMatch(match_id.to_string())),
        }
    }

    /// Completed and declined matches take no further meeting moves.
    async fn ensure_open(&self, match_id: &str) -> DeckResult<MatchStatus> {
        let status = self.status_of(match_id).await?;
        if status.is_terminal() {
            warn!(match_id, ?status, "Match is closed; meeting change refused.");
            return Err(DeckError::InvalidTransition(match_id.to_string(), status));
        }
        Ok(status)
    }

    /// Proposes one or more slots; on success the match becomes `meeting_scheduled`.
    pub async fn propose(&self, match_id: &str, slots: &[SlotRequest]) -> DeckResult<MeetingSlot> {
        if slots.is_empty() {
            return Err(DeckError::NoMeetingSlots);
        }
        self.ensure_open(match_id).await?;

        let meeting = self
            .service
            .propose_meeting(match_id, &self.identity.user_id, slots)
            .await
            .map_err(|e| {
                warn!(match_id, error = %e, "Meeting proposal failed.");
                DeckError::SchedulingFailed
            })?;

        info!(match_id, meeting_id = %meeting.id, slots = slots.len(), "Meeting proposed.");
        self.board
            .update_status(match_id, MatchStatus::MeetingScheduled)
            .await?;
        Ok(meeting)
    }

    /// Answers a proposal. Only a `completed` meeting moves the match itself.
    pub async fn respond(
        &self,
        match_id: &str,
        meeting_id: &str,
        status: MeetingStatus,
        selected_slot_id: Option<&str>,
    ) -> DeckResult<()> {
        if status == MeetingStatus::Completed {
            self.ensure_open(match_id).await?;
        } else {
            self.status_of(match_id).await?;
        }

        self.service
            .respond_to_meeting(meeting_id, status, selected_slot_id)
            .await
            .map_err(|e| {
                warn!(match_id, meeting_id, error = %e, "Meeting response failed.");
                DeckError::SchedulingFailed
            })?;

        if status == MeetingStatus::Completed {
            self.board.update_status(match_id, MatchStatus::Completed).await?;
        }
        Ok(())
    }

    pub async fn meetings(&self, match_id: &str) -> DeckResult<Vec<MeetingSlot>> {
        self.service.get_meetings(match_id).await.map_err(|e| {
            warn!(match_id, error = %e, "Could not load meetings.");
            DeckError::SchedulingFailed
        })
    }

    /// Only a `new` or `chatting` match can be declined.
    pub async fn decline(&self, match_id: &str) -> DeckResult<()> {
        let status = self.status_of(match_id).await?;
        if !matches!(status, MatchStatus::New | MatchStatus::Chatting) {
            return Err(DeckError::InvalidTransition(match_id.to_string(), status));
        }
        self.board.update_status(match_id, MatchStatus::Declined).await
    }
}
