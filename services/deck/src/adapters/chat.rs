//! services/deck/src/adapters/chat.rs
//!
//! An in-process chat backend implementing the `ChatService` port.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use partner_deck_core::{ChatService, Message, MessageType, PortResult};
use tokio::sync::Mutex;
use uuid::Uuid;

/// Keeps every thread in memory and answers after a fixed delay.
pub struct InMemoryChat {
    threads: Mutex<HashMap<String, Vec<Message>>>,
    latency: Duration,
}

impl InMemoryChat {
    pub fn new(latency: Duration) -> Self {
        Self {
            threads: Mutex::new(HashMap::new()),
            latency,
        }
    }

    /// Stores a message as if the counterpart had written it; returns it for delivery.
    pub async fn inject(&self, match_id: &str, sender_id: &str, content: &str) -> Message {
        let message = Message {
            id: format!("msg_{}", Uuid::new_v4()),
            match_id: match_id.to_string(),
            sender_id: sender_id.to_string(),
            sender_company_id: format!("{sender_id}_company"),
            content: content.to_string(),
            kind: MessageType::Text,
            attachment_url: None,
            attachment_name: None,
            is_read: false,
            created_at: Utc::now(),
        };
        self.threads
            .lock()
            .await
            .entry(match_id.to_string())
            .or_default()
            .push(message.clone());
        message
    }
}

#[async_trait]
impl ChatService for InMemoryChat {
    async fn get_messages(&self, match_id: &str) -> PortResult<Vec<Message>> {
        tokio::time::sleep(self.latency).await;
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
        tokio::time::sleep(self.latency).await;
        let message = Message {
            id: format!("msg_{}", Uuid::new_v4()),
            match_id: match_id.to_string(),
            sender_id: sender_id.to_string(),
            sender_company_id: sender_company_id.to_string(),
            content: content.to_string(),
            kind: MessageType::Text,
            attachment_url: None,
            attachment_name: None,
            is_read: true,
            created_at: Utc::now(),
        };
        self.threads
            .lock()
            .await
            .entry(match_id.to_string())
            .or_default()
            .push(message.clone());
        Ok(message)
    }

    async fn mark_as_read(&self, match_id: &str, user_id: &str) -> PortResult<()> {
        tokio::time::sleep(self.latency).await;
        if let Some(thread) = self.threads.lock().await.get_mut(match_id) {
            thread
                .iter_mut()
                .filter(|m| m.sender_id != user_id)
                .for_each(|m| m.is_read = true);
        }
        Ok(())
    }
}
