//! The turn controller: seats, rounds, production and scoring.
//!
//! A round is every seat taking one turn in seat order (AI seats first,
//! then humans), followed by [`GameState::end_round`]:
//!
//! 1. Production pass: every owned plot with a roboticon credits its owner.
//! 2. The market turns as much of its ore into roboticons as it can.
//! 3. The round counter advances.
//!
//! The game is over once every plot has an owner or the round limit has
//! been played.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use colony_agents::{
    AgentError, AiPlayer, HumanPlayer, Player, TurnReport, buy_resource, buy_roboticons,
    customise_roboticon, sell_resource,
};
use colony_ledger::{MarketLedger, PlayerLedger, QuantityStore, ResourceLedger};
use colony_market::Market;
use colony_types::{Customisation, PlayerId, Resource};
use colony_world::{PlotGrid, Position, create_plots, create_plots_seeded};

use crate::config::{GameConfig, GridLayout};
use crate::error::GameError;
use crate::events::{EventSink, GameEvent, GameEventKind, PlayerProduction};
use crate::seat::{Roster, Seat};

// ---------------------------------------------------------------------------
// Human input
// ---------------------------------------------------------------------------

/// One action chosen by a human seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum HumanAction {
    /// Buy resources from the market.
    BuyResource {
        /// What to buy.
        resource: Resource,
        /// How much.
        quantity: u32,
    },
    /// Sell resources to the market.
    SellResource {
        /// What to sell.
        resource: Resource,
        /// How much.
        quantity: u32,
    },
    /// Buy uncustomised roboticons.
    BuyRoboticons {
        /// How many.
        quantity: u32,
    },
    /// Customise one held uncustomised roboticon.
    CustomiseRoboticon {
        /// The new customisation.
        target: Customisation,
    },
    /// Acquire an unowned plot.
    AcquirePlot {
        /// The plot.
        position: Position,
    },
    /// Place a held customised roboticon on an owned plot.
    PlaceRoboticon {
        /// The plot.
        position: Position,
        /// Which roboticon.
        customisation: Customisation,
    },
}

/// A human action the game refused for a business reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedAction {
    /// The action as submitted.
    pub action: HumanAction,
    /// Why it was refused.
    pub error: AgentError,
}

/// Outcome of a batch of human actions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HumanTurnReport {
    /// Actions that took effect.
    pub applied: u32,
    /// Actions refused for lack of money, stock or holdings.
    pub rejected: Vec<RejectedAction>,
}

// ---------------------------------------------------------------------------
// Round and score summaries
// ---------------------------------------------------------------------------

/// What [`GameState::end_round`] did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundSummary {
    /// The round that ended.
    pub round: u32,
    /// Yield per plot owner.
    pub production: Vec<PlayerProduction>,
    /// Roboticons the market built from ore.
    pub roboticons_produced: u32,
}

/// A player's standing, valued at current market prices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    /// The player.
    pub player: PlayerId,
    /// Money held.
    pub money: u32,
    /// Held ore at the ore price.
    pub ore_value: u32,
    /// Held energy at the energy price.
    pub energy_value: u32,
    /// Held and placed roboticons at the roboticon price.
    pub roboticon_value: u32,
    /// Sum of the above.
    pub total: u64,
}

/// Why the game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameEndReason {
    /// Every plot has an owner.
    AllPlotsAcquired,
    /// The configured number of rounds has been played.
    RoundLimit,
}

// ---------------------------------------------------------------------------
// Game state
// ---------------------------------------------------------------------------

/// Everything a running game owns.
#[derive(Debug, Clone)]
pub struct GameState {
    config: GameConfig,
    grid: PlotGrid,
    market: Market,
    roster: Roster,
    /// One-based number of the round in progress.
    round: u32,
}

fn emit(sink: &mut dyn EventSink, round: u32, kind: GameEventKind) {
    sink.emit(&GameEvent::new(round, kind));
}

impl GameState {
    /// Build the map, open the market and seat every player.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Config`] for an unplayable configuration.
    pub fn new(config: GameConfig) -> Result<Self, GameError> {
        config.validate()?;

        let grid = match config.grid.layout {
            GridLayout::Checkerboard => create_plots(config.grid.rows, config.grid.cols)?,
            GridLayout::Seeded => {
                create_plots_seeded(config.grid.rows, config.grid.cols, config.game.seed)?
            }
        };
        let stock = &config.market_stock;
        let market = Market::new(
            config.market,
            MarketLedger::new(ResourceLedger::new(stock.ore, stock.energy), stock.roboticons),
        )?;

        let players = &config.players;
        let starting = PlayerLedger::new(
            players.starting_money,
            ResourceLedger::new(players.starting_ore, players.starting_energy),
        );
        let mut roster = Roster::default();
        for _ in 0..players.ai_players {
            roster.push(Seat::Ai(AiPlayer::new(starting)));
        }
        for _ in 0..players.human_players {
            roster.push(Seat::Human(HumanPlayer::new(starting)));
        }

        info!(
            rows = grid.rows(),
            cols = grid.cols(),
            seats = roster.len(),
            max_rounds = config.game.max_rounds,
            "Game created"
        );
        Ok(Self {
            config,
            grid,
            market,
            roster,
            round: 1,
        })
    }

    /// The configuration the game was built from.
    pub const fn config(&self) -> &GameConfig {
        &self.config
    }

    /// The map.
    pub const fn grid(&self) -> &PlotGrid {
        &self.grid
    }

    /// The market.
    pub const fn market(&self) -> &Market {
        &self.market
    }

    /// Mutable market access, e.g. to reseed its stock.
    pub const fn market_mut(&mut self) -> &mut Market {
        &mut self.market
    }

    /// Every seat in turn order.
    pub const fn roster(&self) -> &Roster {
        &self.roster
    }

    /// The seat for `player`.
    pub fn seat(&self, player: PlayerId) -> Option<&Seat> {
        self.roster.get(player)
    }

    /// Ids of computer-controlled seats in turn order.
    pub fn ai_players(&self) -> Vec<PlayerId> {
        self.roster
            .iter()
            .filter(|seat| seat.is_ai())
            .map(Player::id)
            .collect()
    }

    /// Ids of human seats in turn order.
    pub fn human_players(&self) -> Vec<PlayerId> {
        self.roster
            .iter()
            .filter(|seat| !seat.is_ai())
            .map(Player::id)
            .collect()
    }

    /// The round in progress, starting at 1.
    pub const fn round(&self) -> u32 {
        self.round
    }

    /// Rounds fully played so far.
    pub const fn rounds_completed(&self) -> u32 {
        self.round.saturating_sub(1)
    }

    const fn round_limit_reached(&self) -> bool {
        self.round > self.config.game.max_rounds
    }

    /// Whether every plot is owned or the round limit has been played.
    pub fn is_over(&self) -> bool {
        self.end_reason().is_some()
    }

    /// Why the game is over, or `None` while it is still running.
    pub fn end_reason(&self) -> Option<GameEndReason> {
        if self.grid.all_acquired() {
            Some(GameEndReason::AllPlotsAcquired)
        } else if self.round_limit_reached() {
            Some(GameEndReason::RoundLimit)
        } else {
            None
        }
    }

    pub(crate) fn emit(&self, sink: &mut dyn EventSink, kind: GameEventKind) {
        emit(sink, self.round, kind);
    }

    // -------------------------------------------------------------------
    // Turns
    // -------------------------------------------------------------------

    /// Run the greedy policy for one AI seat.
    ///
    /// # Errors
    ///
    /// [`GameError::UnknownPlayer`], [`GameError::NotAnAi`],
    /// [`GameError::GameOver`] after the round limit, or a contract
    /// violation from the turn itself.
    pub fn take_ai_turn(
        &mut self,
        player: PlayerId,
        sink: &mut dyn EventSink,
    ) -> Result<TurnReport, GameError> {
        if self.round_limit_reached() {
            return Err(GameError::GameOver);
        }
        let round = self.round;
        let Self {
            grid,
            market,
            roster,
            ..
        } = self;
        let seat = roster
            .get_mut(player)
            .ok_or(GameError::UnknownPlayer(player))?;
        let Seat::Ai(ai) = seat else {
            return Err(GameError::NotAnAi(player));
        };

        let mut watched: Vec<Position> = grid
            .plots_owned_by(player)
            .filter(|(_, plot)| plot.roboticon().is_none())
            .map(|(position, _)| position)
            .collect();
        let report = ai.take_turn(grid, market)?;

        if let Some(position) = report.acquired {
            emit(sink, round, GameEventKind::PlotAcquired { player, position });
            watched.push(position);
        }
        for position in watched {
            if let Some(customisation) = grid.get(position).and_then(|plot| plot.roboticon()) {
                emit(
                    sink,
                    round,
                    GameEventKind::RoboticonPlaced {
                        player,
                        position,
                        customisation,
                    },
                );
            }
        }
        emit(
            sink,
            round,
            GameEventKind::LedgerChanged {
                player,
                ledger: ai.ledger().snapshot(),
            },
        );
        emit(
            sink,
            round,
            GameEventKind::MarketChanged {
                market: market.snapshot(),
            },
        );
        Ok(report)
    }

    /// Apply a batch of human actions in order.
    ///
    /// Actions refused for lack of money, stock or holdings are reported
    /// and skipped. Any other failure stops the batch; actions already
    /// applied stay applied.
    ///
    /// # Errors
    ///
    /// [`GameError::UnknownPlayer`], [`GameError::NotHuman`],
    /// [`GameError::GameOver`], or the first contract violation.
    pub fn take_human_turn(
        &mut self,
        player: PlayerId,
        actions: &[HumanAction],
        sink: &mut dyn EventSink,
    ) -> Result<HumanTurnReport, GameError> {
        let mut report = HumanTurnReport::default();
        for action in actions {
            match self.apply_human_action(player, *action, sink) {
                Ok(()) => report.applied = report.applied.saturating_add(1),
                Err(GameError::Agent { source }) if source.kind().is_recoverable() => {
                    warn!(%player, ?action, error = %source, "Human action refused");
                    report.rejected.push(RejectedAction {
                        action: *action,
                        error: source,
                    });
                }
                Err(error) => return Err(error),
            }
        }
        info!(
            %player,
            applied = report.applied,
            rejected = report.rejected.len(),
            "Human turn complete"
        );
        Ok(report)
    }

    /// Apply one human action.
    ///
    /// # Errors
    ///
    /// As [`take_human_turn`](Self::take_human_turn), plus business
    /// outcomes wrapped in [`GameError::Agent`].
    pub fn apply_human_action(
        &mut self,
        player: PlayerId,
        action: HumanAction,
        sink: &mut dyn EventSink,
    ) -> Result<(), GameError> {
        if self.round_limit_reached() {
            return Err(GameError::GameOver);
        }
        let round = self.round;
        let Self {
            grid,
            market,
            roster,
            ..
        } = self;
        let seat = roster
            .get_mut(player)
            .ok_or(GameError::UnknownPlayer(player))?;
        let Seat::Human(human) = seat else {
            return Err(GameError::NotHuman(player));
        };

        let mut market_changed = false;
        match action {
            HumanAction::BuyResource { resource, quantity } => {
                buy_resource(human.ledger_mut(), market, resource, quantity)
                    .map_err(AgentError::from)?;
                market_changed = true;
            }
            HumanAction::SellResource { resource, quantity } => {
                sell_resource(human.ledger_mut(), market, resource, quantity)
                    .map_err(AgentError::from)?;
                market_changed = true;
            }
            HumanAction::BuyRoboticons { quantity } => {
                buy_roboticons(human.ledger_mut(), market, quantity).map_err(AgentError::from)?;
                market_changed = true;
            }
            HumanAction::CustomiseRoboticon { target } => {
                customise_roboticon(human.ledger_mut(), market, target)
                    .map_err(AgentError::from)?;
            }
            HumanAction::AcquirePlot { position } => {
                human.acquire_plot(grid, position)?;
                emit(sink, round, GameEventKind::PlotAcquired { player, position });
                return Ok(());
            }
            HumanAction::PlaceRoboticon {
                position,
                customisation,
            } => {
                human.place_roboticon(grid, position, customisation)?;
                emit(
                    sink,
                    round,
                    GameEventKind::RoboticonPlaced {
                        player,
                        position,
                        customisation,
                    },
                );
            }
        }

        emit(
            sink,
            round,
            GameEventKind::LedgerChanged {
                player,
                ledger: human.ledger().snapshot(),
            },
        );
        if market_changed {
            emit(
                sink,
                round,
                GameEventKind::MarketChanged {
                    market: market.snapshot(),
                },
            );
        }
        Ok(())
    }

    // -------------------------------------------------------------------
    // Rounds
    // -------------------------------------------------------------------

    /// Close the current round: production pass, market roboticon
    /// production, then advance the round counter.
    ///
    /// # Errors
    ///
    /// [`GameError::GameOver`] after the round limit, or a contract
    /// violation from the production pass. On error the round does not
    /// advance.
    pub fn end_round(&mut self, sink: &mut dyn EventSink) -> Result<RoundSummary, GameError> {
        if self.round_limit_reached() {
            return Err(GameError::GameOver);
        }
        let round = self.round;
        let totals = self.grid.produce_all(&mut self.roster)?;
        let roboticons_produced = self.market.produce_roboticons_from_stock();

        let production: Vec<PlayerProduction> = totals
            .iter()
            .map(|(player, production)| PlayerProduction {
                player: *player,
                production: *production,
            })
            .collect();
        emit(
            sink,
            round,
            GameEventKind::ProductionCompleted {
                production: production.clone(),
            },
        );
        for entry in production.iter().filter(|entry| !entry.production.is_empty()) {
            if let Some(seat) = self.roster.get(entry.player) {
                emit(
                    sink,
                    round,
                    GameEventKind::LedgerChanged {
                        player: entry.player,
                        ledger: seat.ledger().snapshot(),
                    },
                );
            }
        }
        emit(
            sink,
            round,
            GameEventKind::MarketChanged {
                market: self.market.snapshot(),
            },
        );
        emit(sink, round, GameEventKind::RoundEnded { roboticons_produced });

        self.round = round.saturating_add(1);
        info!(
            round,
            owners = production.len(),
            roboticons_produced,
            market_ore = self.market.inventory().ore(),
            "Round ended"
        );
        Ok(RoundSummary {
            round,
            production,
            roboticons_produced,
        })
    }

    // -------------------------------------------------------------------
    // Scoring
    // -------------------------------------------------------------------

    /// Every seat's standing in turn order.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Market`] if a valuation overflows.
    pub fn scores(&self) -> Result<Vec<Score>, GameError> {
        self.roster
            .iter()
            .map(|seat| -> Result<Score, GameError> {
                let player = seat.id();
                let ledger = seat.ledger();
                let placed = self
                    .grid
                    .plots_owned_by(player)
                    .filter(|(_, plot)| plot.roboticon().is_some())
                    .count();
                let roboticons = ledger
                    .total_roboticons()
                    .saturating_add(u32::try_from(placed).unwrap_or(u32::MAX));
                let ore_value = self.market.price_of(Resource::Ore, ledger.ore())?;
                let energy_value = self.market.price_of(Resource::Energy, ledger.energy())?;
                let roboticon_value = self.market.price_of_roboticons(roboticons)?;
                let total = u64::from(ledger.money())
                    .saturating_add(u64::from(ore_value))
                    .saturating_add(u64::from(energy_value))
                    .saturating_add(u64::from(roboticon_value));
                Ok(Score {
                    player,
                    money: ledger.money(),
                    ore_value,
                    energy_value,
                    roboticon_value,
                    total,
                })
            })
            .collect()
    }

    /// The player with the highest score, or `None` if the top score is
    /// shared.
    ///
    /// # Errors
    ///
    /// As [`scores`](Self::scores).
    pub fn winner(&self) -> Result<Option<PlayerId>, GameError> {
        Ok(winner_of(&self.scores()?))
    }
}

/// The unique top scorer among `scores`.
pub fn winner_of(scores: &[Score]) -> Option<PlayerId> {
    let best = scores.iter().map(|score| score.total).max()?;
    let mut leaders = scores.iter().filter(|score| score.total == best);
    let leader = leaders.next()?;
    if leaders.next().is_some() {
        return None;
    }
    Some(leader.player)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use crate::events::{NullSink, RecordingSink};

    use super::*;

    fn small_config(ai: u32, human: u32) -> GameConfig {
        let mut config = GameConfig::default();
        config.grid.rows = 2;
        config.grid.cols = 2;
        config.grid.layout = GridLayout::Checkerboard;
        config.players.ai_players = ai;
        config.players.human_players = human;
        config
    }

    #[test]
    fn new_game_seats_ai_first() {
        let state = GameState::new(small_config(1, 1)).unwrap();
        assert_eq!(state.roster().len(), 2);
        assert!(state.roster().iter().next().is_some_and(Seat::is_ai));
        assert_eq!(state.ai_players().len(), 1);
        assert_eq!(state.human_players().len(), 1);
        assert_eq!(state.round(), 1);
        assert_eq!(state.market().inventory().roboticon_stock(), 12);
        assert!(!state.is_over());
    }

    #[test]
    fn invalid_config_rejected() {
        let mut config = small_config(1, 0);
        config.grid.cols = 0;
        assert!(matches!(
            GameState::new(config),
            Err(GameError::Config { .. })
        ));
    }

    #[test]
    fn ai_turn_emits_events() {
        let mut state = GameState::new(small_config(1, 0)).unwrap();
        let ai = *state.ai_players().first().unwrap();
        let mut sink = RecordingSink::new();

        let report = state.take_ai_turn(ai, &mut sink).unwrap();
        assert_eq!(report.acquired, Some(Position::new(0, 0)));
        assert_eq!(sink.count("plot_acquired"), 1);
        assert_eq!(sink.count("roboticon_placed"), 1);
        assert_eq!(sink.count("ledger_changed"), 1);
        assert_eq!(sink.count("market_changed"), 1);
    }

    #[test]
    fn ai_turn_for_human_seat_rejected() {
        let mut state = GameState::new(small_config(0, 1)).unwrap();
        let human = *state.human_players().first().unwrap();
        assert!(matches!(
            state.take_ai_turn(human, &mut NullSink),
            Err(GameError::NotAnAi(_))
        ));
        assert!(matches!(
            state.take_ai_turn(PlayerId::new(), &mut NullSink),
            Err(GameError::UnknownPlayer(_))
        ));
    }

    #[test]
    fn human_actions_apply_and_refuse() {
        let mut state = GameState::new(small_config(0, 1)).unwrap();
        let human = *state.human_players().first().unwrap();
        let position = Position::new(0, 1);
        let actions = [
            HumanAction::AcquirePlot { position },
            HumanAction::BuyRoboticons { quantity: 1 },
            HumanAction::CustomiseRoboticon {
                target: Customisation::Energy,
            },
            HumanAction::PlaceRoboticon {
                position,
                customisation: Customisation::Energy,
            },
            HumanAction::BuyResource {
                resource: Resource::Ore,
                quantity: 100,
            },
        ];
        let mut sink = RecordingSink::new();

        let report = state.take_human_turn(human, &actions, &mut sink).unwrap();
        assert_eq!(report.applied, 4);
        assert_eq!(report.rejected.len(), 1);
        assert_eq!(
            state.grid().get(position).unwrap().roboticon(),
            Some(Customisation::Energy)
        );
        let ledger = state.seat(human).unwrap().ledger();
        assert_eq!(ledger.money(), 75);
        assert_eq!(ledger.total_roboticons(), 0);
        assert_eq!(sink.count("roboticon_placed"), 1);
    }

    #[test]
    fn human_contract_violation_stops_batch() {
        let mut state = GameState::new(small_config(0, 1)).unwrap();
        let human = *state.human_players().first().unwrap();
        let actions = [
            HumanAction::AcquirePlot {
                position: Position::new(9, 9),
            },
            HumanAction::BuyRoboticons { quantity: 1 },
        ];
        assert!(matches!(
            state.take_human_turn(human, &actions, &mut NullSink),
            Err(GameError::Agent { .. })
        ));
        assert_eq!(state.seat(human).unwrap().ledger().money(), 100);
    }

    #[test]
    fn end_round_produces_and_advances() {
        let mut state = GameState::new(small_config(1, 0)).unwrap();
        let ai = *state.ai_players().first().unwrap();
        state.take_ai_turn(ai, &mut NullSink).unwrap();
        let money_before = state.seat(ai).unwrap().ledger().money();
        let mut sink = RecordingSink::new();

        let summary = state.end_round(&mut sink).unwrap();
        assert_eq!(summary.round, 1);
        assert_eq!(state.round(), 2);
        // Plot (0,0) is an ore plot with a matching roboticon.
        assert_eq!(state.seat(ai).unwrap().ledger().ore(), 2);
        assert_eq!(state.seat(ai).unwrap().ledger().money(), money_before);
        assert_eq!(sink.count("production_completed"), 1);
        assert_eq!(sink.count("round_ended"), 1);
    }

    #[test]
    fn market_converts_ore_at_round_end() {
        let mut state = GameState::new(small_config(0, 1)).unwrap();
        // Default stock: 16 ore at rate 5 builds 3 roboticons.
        let summary = state.end_round(&mut NullSink).unwrap();
        assert_eq!(summary.roboticons_produced, 3);
        assert_eq!(state.market().inventory().ore(), 1);
        assert_eq!(state.market().inventory().roboticon_stock(), 15);
    }

    #[test]
    fn round_limit_ends_game() {
        let mut config = small_config(0, 1);
        config.game.max_rounds = 2;
        let mut state = GameState::new(config).unwrap();
        state.end_round(&mut NullSink).unwrap();
        assert!(!state.is_over());
        state.end_round(&mut NullSink).unwrap();
        assert_eq!(state.end_reason(), Some(GameEndReason::RoundLimit));
        assert!(matches!(
            state.end_round(&mut NullSink),
            Err(GameError::GameOver)
        ));
    }

    #[test]
    fn scores_value_holdings_at_market_prices() {
        let mut state = GameState::new(small_config(0, 1)).unwrap();
        let human = *state.human_players().first().unwrap();
        let actions = [
            HumanAction::BuyResource {
                resource: Resource::Energy,
                quantity: 2,
            },
            HumanAction::BuyRoboticons { quantity: 1 },
        ];
        state.take_human_turn(human, &actions, &mut NullSink).unwrap();

        let scores = state.scores().unwrap();
        let score = scores.first().unwrap();
        assert_eq!(score.money, 65);
        assert_eq!(score.energy_value, 20);
        assert_eq!(score.roboticon_value, 15);
        assert_eq!(score.total, 100);
        assert_eq!(state.winner().unwrap(), Some(human));
    }

    #[test]
    fn tied_scores_have_no_winner() {
        let state = GameState::new(small_config(2, 0)).unwrap();
        assert_eq!(state.winner().unwrap(), None);
    }
}
