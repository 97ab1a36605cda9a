//! services/deck/src/config.rs
//!
//! Defines the simulator's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup. The `.env`
//! file is used for local development.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use partner_deck_core::{DeckSettings, Identity};
use tracing::Level;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing the environment variable {0}")]
    MissingVar(String),
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub company_id: String,
    pub user_id: String,
    pub daily_swipe_limit: u32,
    pub visible_window: usize,
    pub candidate_fetch_limit: usize,
    pub match_probability: f64,
    pub oracle_seed: Option<u64>,
    pub source_latency: Duration,
    pub oracle_latency: Duration,
    /// Delay of the match, chat and scheduling services.
    pub service_latency: Duration,
    pub candidates_path: PathBuf,
    pub log_level: Level,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// It will look for a `.env` file in the current directory for development,
    /// but this is skipped in test environments to ensure tests are hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any key/value lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        // --- Identity ---
        let company_id = var("COMPANY_ID", "my_company");
        if company_id.trim().is_empty() {
            return Err(ConfigError::MissingVar("COMPANY_ID".to_string()));
        }
        let user_id = var("USER_ID", "user_me");

        // --- Deck Settings ---
        let daily_swipe_limit = parse("DAILY_SWIPE_LIMIT", &var("DAILY_SWIPE_LIMIT", "25"))?;
        let visible_window = parse("VISIBLE_WINDOW", &var("VISIBLE_WINDOW", "3"))?;
        let candidate_fetch_limit =
            parse("CANDIDATE_FETCH_LIMIT", &var("CANDIDATE_FETCH_LIMIT", "20"))?;

        // --- Oracle Settings ---
        let match_probability: f64 = parse("MATCH_PROBABILITY", &var("MATCH_PROBABILITY", "0.4"))?;
        if !(0.0..=1.0).contains(&match_probability) {
            return Err(ConfigError::InvalidValue(
                "MATCH_PROBABILITY".to_string(),
                format!("{} is outside 0.0..=1.0", match_probability),
            ));
        }
        let oracle_seed = lookup("ORACLE_SEED")
            .map(|raw| parse("ORACLE_SEED", &raw))
            .transpose()?;

        // --- Simulated Latency ---
        let source_latency =
            Duration::from_millis(parse("SOURCE_LATENCY_MS", &var("SOURCE_LATENCY_MS", "700"))?);
        let oracle_latency =
            Duration::from_millis(parse("ORACLE_LATENCY_MS", &var("ORACLE_LATENCY_MS", "400"))?);
        let service_latency =
            Duration::from_millis(parse("SERVICE_LATENCY_MS", &var("SERVICE_LATENCY_MS", "500"))?);

        let candidates_path = PathBuf::from(var("CANDIDATES_PATH", "./fixtures/candidates.json"));

        let log_level_str = var("RUST_LOG", "INFO");
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        Ok(Self {
            company_id,
            user_id,
            daily_swipe_limit,
            visible_window,
            candidate_fetch_limit,
            match_probability,
            oracle_seed,
            source_latency,
            oracle_latency,
            service_latency,
            candidates_path,
            log_level,
        })
    }

    pub fn identity(&self) -> Identity {
        Identity {
            user_id: self.user_id.clone(),
            company_id: self.company_id.clone(),
        }
    }

    pub fn deck_settings(&self) -> DeckSettings {
        DeckSettings {
            swipe_limit: self.daily_swipe_limit,
            window_size: self.visible_window,
            fetch_limit: self.candidate_fetch_limit,
        }
    }
}

fn parse<T>(key: &str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidValue(key.to_string(), e.to_string()))
}
