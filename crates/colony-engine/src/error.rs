//! Error types for the engine binary.
//!
//! [`EngineError`] is the top-level error type that wraps all possible
//! failure modes during startup and the game run.

/// Top-level error for the engine binary.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: colony_core::ConfigError,
    },

    /// Building or running the game failed.
    #[error("game error: {source}")]
    Game {
        /// The underlying game error.
        #[from]
        source: colony_core::GameError,
    },

    /// The final summary could not be serialised.
    #[error("summary serialisation failed: {source}")]
    Summary {
        /// The underlying JSON error.
        #[from]
        source: serde_json::Error,
    },
}
