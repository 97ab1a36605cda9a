//! crates/partner_deck_core/src/testing.rs
//!
//! Builders and in-memory doubles for the core's unit tests.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex as StdMutex;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::{Mutex, Notify};

use crate::deck::{DeckSettings, DeckState};
use crate::domain::{
    Candidate, CandidateCompany, Match, MatchReason, MatchStatus, MatchedCompanyPreview,
    MeetingSlot, MeetingStatus, Message, MessageType, OracleVerdict, ProposedSlot, SlotRequest,
    SwipeRecord,
};
use crate::ports::{
    CandidateSource, ChatService, MatchSource, PortError, PortResult, SchedulingService,
    SwipeOracle,
};

//=========================================================================================
// Builders
//=========================================================================================

pub fn candidate(id: &str, industry: &str) -> Candidate {
    Candidate {
        company: CandidateCompany {
            id: id.to_string(),
            brand_name: format!("{id} Brand"),
            legal_name: format!("{id} Ltd."),
            logo_url: None,
            industry: industry.to_string(),
            hq_location: "Amsterdam".to_string(),
            employee_range: "11-50".to_string(),
            description: String::new(),
            offerings: vec![],
            needs: vec![],
            offering_summary: "Cloud tooling".to_string(),
            needs_summary: "Distribution".to_string(),
            verification_badges: vec![],
            response_speed: "fast".to_string(),
            geographies: vec![],
        },
        match_reasons: vec![MatchReason {
            icon: "target".to_string(),
            label: "Complementary offering".to_string(),
            description: "Their needs overlap your offerings.".to_string(),
        }],
        match_score: 80,
    }
}

pub fn match_between(id: &str, a: &str, b: &str) -> Match {
    let now = Utc::now();
    Match {
        id: id.to_string(),
        company_a_id: a.to_string(),
        company_b_id: b.to_string(),
        matched_company: MatchedCompanyPreview {
            id: b.to_string(),
            brand_name: format!("{b} Brand"),
            logo_url: None,
            industry: "Technology".to_string(),
            hq_location: "Lisbon".to_string(),
            offering_summary: String::new(),
            needs_summary: String::new(),
            verification_badges: vec![],
        },
        match_reasons: vec![],
        match_score: 70,
        status: MatchStatus::New,
        last_message_preview: None,
        last_message_at: None,
        unread_count: 0,
        created_at: now,
        updated_at: now,
    }
}

pub fn loaded_state(ids: &[&str], settings: DeckSettings) -> DeckState {
    let mut state = DeckState::new(settings);
    let ticket = state.store.begin_load().expect("fresh store");
    let list = ids.iter().map(|id| candidate(id, "Technology")).collect();
    state.store.complete_load(ticket, Ok(list)).expect("load applies");
    state
}

pub fn message(id: &str, match_id: &str, sender_id: &str, content: &str) -> Message {
    Message {
        id: id.to_string(),
        match_id: match_id.to_string(),
        sender_id: sender_id.to_string(),
        sender_company_id: format!("{sender_id}_company"),
        content: content.to_string(),
        kind: MessageType::Text,
        attachment_url: None,
        attachment_name: None,
        is_read: false,
        created_at: Utc::now(),
    }
}

//=========================================================================================
// Candidate sources
//=========================================================================================

/// Returns the same candidates on every call; optionally fails the first call.
pub struct ScriptedSource {
    candidates: Vec<Candidate>,
    fail_first: bool,
    calls: AtomicUsize,
}

impl ScriptedSource {
    pub fn new(candidates: Vec<Candidate>) -> Self {
        Self {
            candidates,
            fail_first: false,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing_then(candidates: Vec<Candidate>) -> Self {
        Self {
            fail_first: true,
            ..Self::new(candidates)
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CandidateSource for ScriptedSource {
    async fn fetch_candidates(&self, _company_id: &str, limit: usize) -> PortResult<Vec<Candidate>> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_first && call == 0 {
            return Err(PortError::Unavailable("candidate service down".into()));
        }
        Ok(self.candidates.iter().take(limit).cloned().collect())
    }
}

/// First call blocks until [`GatedSource::release`] and returns `first`; later calls return
/// `rest` immediately.
pub struct GatedSource {
    first: Vec<Candidate>,
    rest: Vec<Candidate>,
    calls: AtomicUsize,
    entered: Notify,
    gate: Notify,
}

impl GatedSource {
    pub fn new(first: Vec<Candidate>, rest: Vec<Candidate>) -> Self {
        Self {
            first,
            rest,
            calls: AtomicUsize::new(0),
            entered: Notify::new(),
            gate: Notify::new(),
        }
    }

    /// Resolves once the first fetch is parked on the gate.
    pub async fn entered(&self) {
        self.entered.notified().await;
    }

    pub fn release(&self) {
        self.gate.notify_one();
    }
}

#[async_trait]
impl CandidateSource for GatedSource {
    async fn fetch_candidates(&self, _company_id: &str, _limit: usize) -> PortResult<Vec<Candidate>> {
        if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
            self.entered.notify_one();
            self.gate.notified().await;
            return Ok(self.first.clone());
        }
        Ok(self.rest.clone())
    }
}

//=========================================================================================
// Oracle
//=========================================================================================

/// Answers with queued verdicts, then "no match". Remembers every swipe it saw.
#[derive(Default)]
pub struct ScriptedOracle {
    verdicts: Mutex<VecDeque<PortResult<OracleVerdict>>>,
    seen: Mutex<Vec<SwipeRecord>>,
}

impl ScriptedOracle {
    pub fn new(verdicts: Vec<PortResult<OracleVerdict>>) -> Self {
        Self {
            verdicts: Mutex::new(verdicts.into()),
            seen: Mutex::new(Vec::new()),
        }
    }

    pub async fn submitted(&self) -> Vec<SwipeRecord> {
        self.seen.lock().await.clone()
    }
}

#[async_trait]
impl SwipeOracle for ScriptedOracle {
    async fn submit(&self, swipe: SwipeRecord) -> PortResult<OracleVerdict> {
        self.seen.lock().await.push(swipe);
        self.verdicts
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| Ok(OracleVerdict::default()))
    }
}

//=========================================================================================
// Match source
//=========================================================================================

pub struct StaticMatchSource {
    matches: Vec<Match>,
    fail: bool,
    pub status_updates: StdMutex<Vec<(String, MatchStatus)>>,
}

impl StaticMatchSource {
    pub fn new(matches: Vec<Match>) -> Self {
        Self {
            matches,
            fail: false,
            status_updates: StdMutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new(vec![])
        }
    }

    pub fn updates(&self) -> Vec<(String, MatchStatus)> {
        self.status_updates.lock().map(|u| u.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl MatchSource for StaticMatchSource {
    async fn fetch_matches(&self, _company_id: &str) -> PortResult<Vec<Match>> {
        if self.fail {
            return Err(PortError::Unavailable("match service down".into()));
        }
        Ok(self.matches.clone())
    }

    async fn update_match_status(&self, match_id: &str, status: MatchStatus) -> PortResult<()> {
        if self.fail {
            return Err(PortError::Unavailable("match service down".into()));
        }
        if let Ok(mut updates) = self.status_updates.lock() {
            updates.push((match_id.to_string(), status));
        }
        Ok(())
    }
}

//=========================================================================================
// Chat
//=========================================================================================

#[derive(Default)]
pub struct MemoryChat {
    threads: Mutex<HashMap<String, Vec<Message>>>,
    counter: AtomicUsize,
    pub fail: bool,
}

impl MemoryChat {
    pub async fn seed(&self, match_id: &str, messages: Vec<Message>) {
        self.threads.lock().await.insert(match_id.to_string(), messages);
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }
}

#[async_trait]
impl ChatService for MemoryChat {
    async fn get_messages(&self, match_id: &str) -> PortResult<Vec<Message>> {
        if self.fail {
            return Err(PortError::Unavailable("chat down".into()));
        }
        Ok(self
            .threads
            .lock()
            .await
            .get(match_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn send_message(
        &self,
        match_id: &str,
        sender_id: &str,
        sender_company_id: &str,
        content: &str,
    ) -> PortResult<Message> {
        if self.fail {
            return Err(PortError::Unavailable("chat down".into()));
        }
        let n = self.counter.fetch_add(1, Ordering::SeqCst);
        let mut sent = message(&format!("msg_{n}"), match_id, sender_id, content);
        sent.sender_company_id = sender_company_id.to_string();
        sent.is_read = true;
        self.threads
            .lock()
            .await
            .entry(match_id.to_string())
            .or_default()
            .push(sent.clone());
        Ok(sent)
    }

    async fn mark_as_read(&self, match_id: &str, _user_id: &str) -> PortResult<()> {
        if let Some(thread) = self.threads.lock().await.get_mut(match_id) {
            thread.iter_mut().for_each(|m| m.is_read = true);
        }
        Ok(())
    }
}

//=========================================================================================
// Scheduling
//=========================================================================================

#[derive(Default)]
pub struct MemoryScheduling {
    meetings: Mutex<Vec<MeetingSlot>>,
    pub fail: bool,
}

impl MemoryScheduling {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }
}

#[async_trait]
impl SchedulingService for MemoryScheduling {
    async fn propose_meeting(
        &self,
        match_id: &str,
        proposed_by: &str,
        slots: &[SlotRequest],
    ) -> PortResult<MeetingSlot> {
        if self.fail {
            return Err(PortError::Unavailable("calendar down".into()));
        }
        let mut meetings = self.meetings.lock().await;
        let now = Utc::now();
        let meeting = MeetingSlot {
            id: format!("meeting_{}", meetings.len()),
            match_id: match_id.to_string(),
            proposed_by: proposed_by.to_string(),
            slots: slots
                .iter()
                .enumerate()
                .map(|(i, s)| ProposedSlot {
                    id: format!("slot_{i}"),
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
        meetings.push(meeting.clone());
        Ok(meeting)
    }

    async fn respond_to_meeting(
        &self,
        meeting_id: &str,
        status: MeetingStatus,
        selected_slot_id: Option<&str>,
    ) -> PortResult<()> {
        if self.fail {
            return Err(PortError::Unavailable("calendar down".into()));
        }
        let mut meetings = self.meetings.lock().await;
        let meeting = meetings
            .iter_mut()
            .find(|m| m.id == meeting_id)
            .ok_or_else(|| PortError::NotFound(meeting_id.to_string()))?;
        meeting.status = status;
        meeting.selected_slot_id = selected_slot_id.map(str::to_string);
        Ok(())
    }

    async fn get_meetings(&self, match_id: &str) -> PortResult<Vec<MeetingSlot>> {
        if self.fail {
            return Err(PortError::Unavailable("calendar down".into()));
        }
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
