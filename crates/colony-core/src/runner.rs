//! Headless game loop.
//!
//! [`run_game`] plays rounds until [`GameState::is_over`]: every AI seat
//! takes a turn in seat order, then the round is closed. Human seats are
//! skipped; a UI drives them through [`GameState::take_human_turn`] and
//! its own loop.

use serde::{Deserialize, Serialize};
use tracing::info;

use colony_types::PlayerId;

use crate::error::GameError;
use crate::events::{EventSink, GameEventKind};
use crate::game::{GameEndReason, GameState, Score, winner_of};

/// Final outcome of a game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameResult {
    /// Why the game ended.
    pub end_reason: GameEndReason,
    /// Rounds fully played.
    pub rounds_played: u32,
    /// Every seat's final standing in seat order.
    pub scores: Vec<Score>,
    /// The unique top scorer, if any.
    pub winner: Option<PlayerId>,
}

/// Play `state` to the end with the AI seats and report the result.
///
/// # Errors
///
/// Returns the first contract violation raised by a turn or a round.
pub fn run_game(state: &mut GameState, sink: &mut dyn EventSink) -> Result<GameResult, GameError> {
    let ai_players = state.ai_players();
    info!(
        ai_players = ai_players.len(),
        max_rounds = state.config().game.max_rounds,
        "Starting headless game"
    );

    let end_reason = loop {
        if let Some(reason) = state.end_reason() {
            break reason;
        }
        for player in &ai_players {
            state.take_ai_turn(*player, sink)?;
        }
        state.end_round(sink)?;
    };

    let scores = state.scores()?;
    let winner = winner_of(&scores);
    let rounds_played = state.rounds_completed();
    state.emit(
        sink,
        GameEventKind::GameEnded {
            rounds: rounds_played,
            winner,
        },
    );
    info!(?end_reason, rounds_played, ?winner, "Game finished");

    Ok(GameResult {
        end_reason,
        rounds_played,
        scores,
        winner,
    })
}
