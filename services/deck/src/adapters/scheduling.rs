//! services/deck/src/adapters/scheduling.rs
//!
//! An in-process meeting calendar implementing the `SchedulingService` port.

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use partner_deck_core::{
    MeetingSlot, MeetingStatus, PortError, PortResult, ProposedSlot, SchedulingService,
    SlotRequest,
};
use tokio::sync::Mutex;
use uuid::Uuid;

pub struct InMemoryScheduling {
    meetings: Mutex<Vec<MeetingSlot>>,
    latency: Duration,
}

impl InMemoryScheduling {
    pub fn new(latency: Duration) -> Self {
        Self {
            meetings: Mutex::new(Vec::new()),
            latency,
        }
    }
}

#[async_trait]
impl SchedulingService for InMemoryScheduling {
    async fn propose_meeting(
        &self,
        match_id: &str,
        proposed_by: &str,
        slots: &[SlotRequest],
    ) -> PortResult<MeetingSlot> {
        tokio::time::sleep(self.latency).await;
        let now = Utc::now();
        let meeting = MeetingSlot {
            id: format!("meeting_{}", Uuid::new_v4()),
            match_id: match_id.to_string(),
            proposed_by: proposed_by.to_string(),
            slots: slots
                .iter()
                .map(|s| ProposedSlot {
                    id: format!("slot_{}", Uuid::new_v4()),
                    start_time_utc: s.start_time_utc,
                    end_time_utc: s.end_time_utc,
                    timezone: s.timezone.clone(),
                })
                .collect(),
            selected_slot_id: None,
            status: MeetingStatus::Proposed,
            notes: None,
            created_at: now,
            updated_at: now,
        };
        self.meetings.lock().await.push(meeting.clone());
        Ok(meeting)
    }

    async fn respond_to_meeting(
        &self,
        meeting_id: &str,
        status: MeetingStatus,
        selected_slot_id: Option<&str>,
    ) -> PortResult<()> {
        tokio::time::sleep(self.latency).await;
        let mut meetings = self.meetings.lock().await;
        let meeting = meetings
            .iter_mut()
            .find(|m| m.id == meeting_id)
            .ok_or_else(|| PortError::NotFound(format!("meeting {meeting_id}")))?;

        if let Some(slot_id) = selected_slot_id {
            if !meeting.slots.iter().any(|s| s.id == slot_id) {
                return Err(PortError::NotFound(format!("slot {slot_id}")));
            }
            meeting.selected_slot_id = Some(slot_id.to_string());
        }
        meeting.status = status;
        meeting.updated_at = Utc::now();
        Ok(())
    }

    async fn get_meetings(&self, match_id: &str) -> PortResult<Vec<MeetingSlot>> {
        tokio::time::sleep(self.latency).await;
        Ok(self
            .meetings
            .lock()
            .await
            .iter()
            .filter(|m| m.match_id == match_id)
            .cloned()
            .collect())
    }
}
