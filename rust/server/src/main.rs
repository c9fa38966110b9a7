use anyhow::{Context, Result};
use rand::prelude::*;
use reminder_server::{init_logging, run, AppState, ServerConfig};
use tracing::{info, Level};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let config = ServerConfig::from_env()?;
    init_logging(config.log_format, Level::INFO);

    let rng = &mut match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let (state, report) = AppState::trained(config.hyperparameters.clone(), rng)
        .context("Failed to build the reminder agent")?;

    info!(
        episodes = report.episodes,
        explored = report.explored,
        mean_reward = report.mean_reward(),
        "Initial training finished"
    );

    run(&config, state).await
}
