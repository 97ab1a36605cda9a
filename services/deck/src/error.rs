//! services/deck/src/error.rs
//!
//! Defines the primary error type for the deck service.

use crate::config::ConfigError;
use partner_deck_core::{DeckError, PortError};

/// The primary error type for the `deck` service.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Represents an error that occurred during configuration loading.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Represents an error surfaced by the discovery core.
    #[error("Deck error: {0}")]
    Deck(#[from] DeckError),

    /// Represents an error that propagated up from one of the core service ports.
    #[error("Service Port Error: {0}")]
    Port(#[from] PortError),

    /// The candidate fixture could not be parsed.
    #[error("Fixture error: {0}")]
    Fixture(#[from] serde_json::Error),

    /// Represents a standard Input/Output error (e.g., reading the fixture file).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
