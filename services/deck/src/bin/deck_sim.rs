//! services/deck/src/bin/deck_sim.rs

use deck_lib::{
    config::Config,
    error::AppError,
    simulation::{self, SimulationPlan},
};
use partner_deck_core::Session;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Config::from_env()?;
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer())
        .init();
    info!("Configuration loaded. Starting discovery session...");

    // --- 2. Initialize Service Adapters ---
    let ports = simulation::ports_from_config(&config)?;

    // --- 3. Start the Session ---
    let session = Session::start(config.identity(), config.deck_settings(), ports);

    // --- 4. Run the Scripted Session ---
    let report = simulation::run(&session, &SimulationPlan::default()).await?;

    info!(
        swiped = report.swiped,
        liked = report.liked,
        count = report.counters.count,
        limit = report.counters.limit,
        "Swiping finished."
    );
    for m in &report.matches {
        info!(
            match_id = %m.id,
            company = %m.matched_company.brand_name,
            score = m.match_score,
            status = ?m.status,
            "Match."
        );
    }
    info!(
        matches = report.matches.len(),
        meetings = report.meetings,
        unread = report.total_unread,
        "Session summary."
    );

    // --- 5. Log Out ---
    session.end().await;
    Ok(())
}
