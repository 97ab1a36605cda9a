//! crates/partner_deck_core/src/conversation.rs
//!
//! Per-match conversations. Opening a conversation is what clears its unread counter;
//! the first message activity on a `new` match moves it to `chatting`.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::domain::{Identity, MatchStatus, Message};
use crate::error::{DeckError, DeckResult};
use crate::matches::MatchBoard;
use crate::ports::ChatService;

/// Messages held locally, keyed by match id.
#[derive(Debug, Default)]
pub struct ChatLog {
    threads: HashMap<String, Vec<Message>>,
    active: Option<String>,
}

impl ChatLog {
    pub fn set(&mut self, match_id: &str, messages: Vec<Message>) {
        self.threads.insert(match_id.to_string(), messages);
    }

    pub fn push(&mut self, message: Message) {
        self.threads
            .entry(message.match_id.clone())
            .or_default()
            .push(message);
    }

    pub fn messages(&self, match_id: &str) -> &[Message] {
        self.threads.get(match_id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn mark_read(&mut self, match_id: &str) {
        if let Some(thread) = self.threads.get_mut(match_id) {
            thread.iter_mut().for_each(|m| m.is_read = true);
        }
    }

    /// Unread messages written by someone other than `user_id`, across all threads.
    pub fn total_unread(&self, user_id: &str) -> usize {
        self.threads
            .values()
            .flatten()
            .filter(|m| !m.is_read && m.sender_id != user_id)
            .count()
    }

    pub fn clear(&mut self) {
        self.threads.clear();
        self.active = None;
    }
}

#[derive(Clone)]
pub struct Conversations {
    identity: Identity,
    chat: Arc<dyn ChatService>,
    board: MatchBoard,
    log: Arc<Mutex<ChatLog>>,
}

impl Conversations {
    pub fn new(identity: Identity, chat: Arc<dyn ChatService>, board: MatchBoard) -> Self {
        Self {
            identity,
            chat,
            board,
            log: Arc::new(Mutex::new(ChatLog::default())),
        }
    }

    async fn ensure_known(&self, match_id: &str) -> DeckResult<MatchStatus> {
        self.board
            .get(match_id)
            .await
            .map(|m| m.status)
            .ok_or_else(|| DeckError::UnknownMatch(match_id.to_string()))
    }

    /// Loads the thread for `match_id`, marks it read and zeroes that match's unread counter.
    pub async fn open(&self, match_id: &str) -> DeckResult<Vec<Message>> {
        self.ensure_known(match_id).await?;

        let messages = self.chat.get_messages(match_id).await.map_err(|e| {
            warn!(match_id, error = %e, "Could not load messages.");
            DeckError::MessagesUnavailable
        })?;

        if let Err(e) = self.chat.mark_as_read(match_id, &self.identity.user_id).await {
            warn!(match_id, error = %e, "Could not mark messages read remotely.");
        }

        let mut log = self.log.lock().await;
        log.set(match_id, messages);
        log.mark_read(match_id);
        log.active = Some(match_id.to_string());
        self.board.registry().lock().await.mark_read(match_id);
        debug!(match_id, "Conversation opened.");
        Ok(log.messages(match_id).to_vec())
    }

    /// Leaves the open conversation; later incoming messages count as unread again.
    pub async fn close(&self) {
        self.log.lock().await.active = None;
    }

    /// Sends a message. Blank content is ignored and yields `Ok(None)`.
    pub async fn send(&self, match_id: &str, content: &str) -> DeckResult<Option<Message>> {
        let content = content.trim();
        if content.is_empty() {
            return Ok(None);
        }
        let status = self.ensure_known(match_id).await?;

        let sent = self
            .chat
            .send_message(
                match_id,
                &self.identity.user_id,
                &self.identity.company_id,
                content,
            )
            .await
            .map_err(|e| {
                warn!(match_id, error = %e, "Could not send message.");
                DeckError::SendFailed
            })?;

        self.log.lock().await.push(sent.clone());
        self.board
            .registry()
            .lock()
            .await
            .record_message(match_id, &sent.content, sent.created_at, false);
        if status == MatchStatus::New {
            self.board.update_status(match_id, MatchStatus::Chatting).await?;
        }
        Ok(Some(sent))
    }

    /// Takes a message pushed by the backend for one of this session's matches.
    pub async fn receive(&self, message: Message) -> DeckResult<()> {
        let match_id = message.match_id.clone();
        let status = self.ensure_known(&match_id).await?;

        let mut message = message;
        let from_counterpart = message.sender_id != self.identity.user_id;
        let counts_as_unread = {
            let mut log = self.log.lock().await;
            let viewing = log.active.as_deref() == Some(match_id.as_str());
            if viewing {
                message.is_read = true;
            }
            let unread = from_counterpart && !message.is_read;
            log.push(message.clone());
            unread
        };

        self.board.registry().lock().await.record_message(
            &match_id,
            &message.content,
            message.created_at,
            counts_as_unread,
        );
        if status == MatchStatus::New {
            self.board.update_status(&match_id, MatchStatus::Chatting).await?;
        }
        Ok(())
    }

    pub async fn messages(&self, match_id: &str) -> Vec<Message> {
        self.log.lock().await.messages(match_id).to_vec()
    }

    /// Unread count of one conversation, as shown on its row in the messaging list.
    pub async fn unread_in(&self, match_id: &str) -> u32 {
        self.board.unread_for(match_id).await.unwrap_or(0)
    }

    pub async fn total_unread_messages(&self) -> usize {
        self.log.lock().await.total_unread(&self.identity.user_id)
    }

    pub async fn clear(&self) {
        self.log.lock().await.clear();
    }
}
