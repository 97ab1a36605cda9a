//! crates/partner_deck_core/src/session.rs
//!
//! One logged-in company's discovery session: every store is built here, at login, and
//! torn down by [`Session::end`] at logout. Nothing in the core is a global.

use std::sync::Arc;

use tracing::info;

use crate::conversation::Conversations;
use crate::deck::{DeckController, DeckSettings};
use crate::domain::Identity;
use crate::matches::MatchBoard;
use crate::ports::{CandidateSource, ChatService, MatchSource, SchedulingService, SwipeOracle};
use crate::registry::{MatchRegistry, SharedRegistry};
use crate::scheduling::Scheduler;

/// The collaborators a session talks to.
#[derive(Clone)]
pub struct SessionPorts {
    pub candidates: Arc<dyn CandidateSource>,
    pub oracle: Arc<dyn SwipeOracle>,
    pub matches: Arc<dyn MatchSource>,
    pub chat: Arc<dyn ChatService>,
    pub scheduling: Arc<dyn SchedulingService>,
}

pub struct Session {
    identity: Identity,
    registry: SharedRegistry,
    pub deck: DeckController,
    pub board: MatchBoard,
    pub conversations: Conversations,
    pub scheduler: Scheduler,
}

impl Session {
    pub fn start(identity: Identity, settings: DeckSettings, ports: SessionPorts) -> Self {
        let registry = MatchRegistry::shared();
        let deck = DeckController::new(
            identity.company_id.clone(),
            settings,
            ports.candidates,
            ports.oracle,
            registry.clone(),
        );
        let board = MatchBoard::new(identity.company_id.clone(), ports.matches, registry.clone());
        let conversations = Conversations::new(identity.clone(), ports.chat, board.clone());
        let scheduler = Scheduler::new(identity.clone(), ports.scheduling, board.clone());

        info!(company_id = %identity.company_id, user_id = %identity.user_id, "Session started.");
        Self {
            identity,
            registry,
            deck,
            board,
            conversations,
            scheduler,
        }
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    /// Navigation badge: unread messages over all matches.
    pub async fn total_unread(&self) -> u32 {
        self.registry.lock().await.total_unread()
    }

    /// Clears every store owned by the session.
    pub async fn end(self) {
        self.deck.clear().await;
        self.conversations.clear().await;
        self.board.clear().await;
        info!(company_id = %self.identity.company_id, "Session ended.");
    }
}
