//! Turn controller, configuration and event stream for the Roboticon Colony
//! economy engine.
//!
//! This crate owns a running game: it builds the map and market from
//! configuration, seats the players, sequences their turns, closes each
//! round with a production pass and scores the result.
//!
//! # Modules
//!
//! - [`config`] -- Configuration loading from `colony-config.yaml` into
//!   strongly-typed structs.
//! - [`error`] -- [`GameError`], wrapping every lower-level failure.
//! - [`events`] -- [`GameEvent`] and the [`EventSink`] notification channel.
//! - [`game`] -- [`GameState`]: turns, rounds, end of game and scoring.
//! - [`runner`] -- [`run_game`], the headless AI game loop.
//! - [`seat`] -- [`Seat`] and the turn-ordered [`Roster`].

pub mod config;
pub mod error;
pub mod events;
pub mod game;
pub mod runner;
pub mod seat;

pub use config::{ConfigError, GameConfig, GridLayout};
pub use error::GameError;
pub use events::{
    EventSink, GameEvent, GameEventKind, NullSink, PlayerProduction, RecordingSink, TracingSink,
};
pub use game::{
    GameEndReason, GameState, HumanAction, HumanTurnReport, RejectedAction, RoundSummary, Score,
    winner_of,
};
pub use runner::{GameResult, run_game};
pub use seat::{Roster, Seat};
