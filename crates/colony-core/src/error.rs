//! Error types for the colony-core crate.

use colony_agents::AgentError;
use colony_market::MarketError;
use colony_types::{FailureKind, PlayerId};
use colony_world::WorldError;

use crate::config::ConfigError;

/// Errors from the turn controller.
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    /// The configuration could not be loaded or is unplayable.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: ConfigError,
    },

    /// A grid operation failed.
    #[error("world error: {source}")]
    World {
        /// The underlying world error.
        #[from]
        source: WorldError,
    },

    /// A market operation failed.
    #[error("market error: {source}")]
    Market {
        /// The underlying market error.
        #[from]
        source: MarketError,
    },

    /// A player action failed.
    #[error("player action failed: {source}")]
    Agent {
        /// The underlying agent error.
        #[from]
        source: AgentError,
    },

    /// No seat has this id.
    #[error("unknown player {0}")]
    UnknownPlayer(PlayerId),

    /// An AI turn was requested for a human seat.
    #[error("player {0} is not computer-controlled")]
    NotAnAi(PlayerId),

    /// A human action was submitted for an AI seat.
    #[error("player {0} is not a human seat")]
    NotHuman(PlayerId),

    /// The round limit has been passed.
    #[error("the game is over")]
    GameOver,
}

impl GameError {
    /// Classify the failure.
    pub const fn kind(&self) -> FailureKind {
        match self {
            Self::Agent { source } => source.kind(),
            Self::World { source } => source.kind(),
            Self::Market { source } => source.kind(),
            Self::Config { .. }
            | Self::UnknownPlayer(_)
            | Self::NotAnAi(_)
            | Self::NotHuman(_)
            | Self::GameOver => FailureKind::ContractViolation,
        }
    }
}
