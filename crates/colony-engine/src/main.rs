//! Headless engine binary for the Roboticon Colony economy engine.
//!
//! Plays a complete game with the AI seats only and logs the result.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from the path given as the first argument, or
//!    from `colony-config.yaml` in the working directory when present
//! 2. Initialize structured logging (tracing); `RUST_LOG` overrides the
//!    configured level
//! 3. Build the game state (map, market, seats)
//! 4. Run the game loop until land runs out or the round limit is reached
//! 5. Log the final standings as JSON

mod error;

use std::path::{Path, PathBuf};

use colony_core::{GameConfig, GameState, TracingSink, run_game};
use colony_types::PlayerId;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::error::EngineError;

/// Config file looked up when no path is given.
const DEFAULT_CONFIG_PATH: &str = "colony-config.yaml";

/// Application entry point.
///
/// # Errors
///
/// Returns an error if the configuration is unreadable or invalid, or if
/// the game hits a contract violation.
fn main() -> Result<(), EngineError> {
    let explicit = std::env::args().nth(1).map(PathBuf::from);
    let config = load_config(explicit.as_deref())?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with_target(true)
        .init();

    info!(
        seed = config.game.seed,
        rows = config.grid.rows,
        cols = config.grid.cols,
        max_rounds = config.game.max_rounds,
        ai_players = config.players.ai_players,
        human_players = config.players.human_players,
        "colony-engine starting"
    );

    let mut state = GameState::new(config)?;
    let mut sink = TracingSink;
    let result = run_game(&mut state, &mut sink)?;

    let summary = serde_json::to_string_pretty(&result)?;
    info!(
        rounds = result.rounds_played,
        winner = %describe_winner(result.winner),
        "Game complete"
    );
    info!(summary = %summary, "Final standings");
    Ok(())
}

/// Load the game configuration.
///
/// An explicit path must exist. Without one, `colony-config.yaml` is used
/// if present and defaults otherwise.
fn load_config(explicit: Option<&Path>) -> Result<GameConfig, EngineError> {
    if let Some(path) = explicit {
        return Ok(GameConfig::from_file(path)?);
    }
    let default_path = Path::new(DEFAULT_CONFIG_PATH);
    if default_path.exists() {
        Ok(GameConfig::from_file(default_path)?)
    } else {
        let mut config = GameConfig::default();
        config.apply_env_overrides();
        Ok(config)
    }
}

fn describe_winner(winner: Option<PlayerId>) -> String {
    winner.map_or_else(|| "tie".to_owned(), |player| player.to_string())
}
