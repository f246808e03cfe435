//! The greedy computer-controlled player.
//!
//! An AI turn runs five phases in a fixed order. Each phase is a no-op when
//! nothing is eligible, and running short of money or stock ends a phase
//! quietly instead of failing the turn.
//!
//! 1. [`AiPlayer::choose_plot`] -- take the first unowned plot, row-major.
//! 2. [`AiPlayer::buy_roboticons`] -- buy one uncustomised roboticon per
//!    empty owned plot not already covered, producing market stock from
//!    ore when the market has none.
//! 3. [`AiPlayer::customise_roboticons`] -- convert uncustomised roboticons
//!    to match the specialism of the empty plots they are meant for.
//! 4. [`AiPlayer::place_roboticons`] -- place matching roboticons on empty
//!    owned plots. A roboticon is never placed on a plot of the other
//!    specialism.
//! 5. [`AiPlayer::buy_and_sell_resources`] -- sell all held ore and energy.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use colony_ledger::{PlayerLedger, QuantityStore};
use colony_market::Market;
use colony_types::{Customisation, PlayerId, Resource};
use colony_world::{PlotGrid, Position, WorldError};

use crate::error::{AgentError, TradeError};
use crate::player::Player;
use crate::transaction;

/// What one AI turn did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TurnReport {
    /// Plot acquired in phase 1, if any.
    pub acquired: Option<Position>,
    /// Uncustomised roboticons bought.
    pub roboticons_bought: u32,
    /// Roboticons customised.
    pub roboticons_customised: u32,
    /// Roboticons placed on plots.
    pub roboticons_placed: u32,
    /// Ore sold to the market.
    pub ore_sold: u32,
    /// Energy sold to the market.
    pub energy_sold: u32,
    /// Money received from sales.
    pub revenue: u32,
}

/// Amounts sold in one [`AiPlayer::buy_and_sell_resources`] phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SaleSummary {
    /// Ore sold.
    pub ore: u32,
    /// Energy sold.
    pub energy: u32,
    /// Money received.
    pub revenue: u32,
}

/// A player whose turns are chosen by the greedy policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiPlayer {
    /// Seat identity.
    id: PlayerId,
    /// Holdings.
    ledger: PlayerLedger,
}

impl Player for AiPlayer {
    fn id(&self) -> PlayerId {
        self.id
    }

    fn ledger(&self) -> &PlayerLedger {
        &self.ledger
    }

    fn ledger_mut(&mut self) -> &mut PlayerLedger {
        &mut self.ledger
    }
}

/// Whether a trade failure ends the current phase rather than the turn.
fn is_shortage(error: &TradeError) -> bool {
    error.kind().is_recoverable()
}

impl AiPlayer {
    /// Seat an AI player with a starting ledger.
    pub fn new(ledger: PlayerLedger) -> Self {
        Self {
            id: PlayerId::new(),
            ledger,
        }
    }

    /// Run a full turn: phase 1 while unowned plots remain, then phases 2
    /// to 5.
    ///
    /// # Errors
    ///
    /// Only contract violations are returned. Shortages end the affected
    /// phase and the turn continues.
    pub fn take_turn(
        &mut self,
        grid: &mut PlotGrid,
        market: &mut Market,
    ) -> Result<TurnReport, AgentError> {
        let acquired = if grid.all_acquired() {
            None
        } else {
            Some(self.choose_plot(grid)?)
        };
        let roboticons_bought = self.buy_roboticons(grid, market)?;
        let roboticons_customised = self.customise_roboticons(grid, market)?;
        let roboticons_placed = self.place_roboticons(grid)?;
        let sale = self.buy_and_sell_resources(market)?;

        let report = TurnReport {
            acquired,
            roboticons_bought,
            roboticons_customised,
            roboticons_placed,
            ore_sold: sale.ore,
            energy_sold: sale.energy,
            revenue: sale.revenue,
        };
        info!(
            player = %self.id,
            bought = report.roboticons_bought,
            customised = report.roboticons_customised,
            placed = report.roboticons_placed,
            revenue = report.revenue,
            money = self.ledger.money(),
            "AI turn complete"
        );
        Ok(report)
    }

    // -------------------------------------------------------------------
    // Phase 1: land
    // -------------------------------------------------------------------

    /// Acquire the first unowned plot in row-major order.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::NoUnownedPlot`] (wrapped) when every plot is
    /// owned. [`take_turn`](Self::take_turn) never calls this in that case.
    pub fn choose_plot(&self, grid: &mut PlotGrid) -> Result<Position, AgentError> {
        let position = grid.first_unowned().ok_or(WorldError::NoUnownedPlot)?;
        self.acquire_plot(grid, position)?;
        debug!(player = %self.id, row = position.row, col = position.col, "AI chose plot");
        Ok(position)
    }

    // -------------------------------------------------------------------
    // Phase 2: roboticons
    // -------------------------------------------------------------------

    /// Buy one uncustomised roboticon for each empty owned plot beyond the
    /// uncustomised roboticons already held.
    ///
    /// Each iteration either buys one roboticon or, when the market has
    /// none, asks it to produce one from ore instead. A failed production
    /// stops buying. Buying also stops once money
    /// falls below the roboticon price plus the cheapest customisation fee,
    /// so every roboticon bought can still be customised.
    ///
    /// Returns the number bought.
    ///
    /// # Errors
    ///
    /// Only contract violations are returned.
    pub fn buy_roboticons(
        &mut self,
        grid: &PlotGrid,
        market: &mut Market,
    ) -> Result<u32, AgentError> {
        let empty = u32::try_from(grid.count_vacant_for(self.id)).unwrap_or(u32::MAX);
        let held = self.ledger.roboticons(Customisation::Uncustomised);
        let need = empty.saturating_sub(held);
        let threshold = market
            .config()
            .roboticon_price
            .saturating_add(market.cheapest_customisation_fee());

        let mut bought: u32 = 0;
        for _ in 0..need {
            if market.inventory().roboticon_stock() == 0 {
                if !market.attempt_to_produce_roboticon() {
                    debug!(player = %self.id, "Market cannot produce a roboticon");
                    break;
                }
                continue;
            }
            if self.ledger.money() < threshold {
                debug!(
                    player = %self.id,
                    money = self.ledger.money(),
                    threshold,
                    "AI cannot afford another roboticon"
                );
                break;
            }
            match transaction::buy_roboticons(&mut self.ledger, market, 1) {
                Ok(_) => bought = bought.saturating_add(1),
                Err(error) if is_shortage(&error) => {
                    warn!(player = %self.id, %error, "AI roboticon purchase stopped");
                    break;
                }
                Err(error) => return Err(error.into()),
            }
        }
        Ok(bought)
    }

    /// Customise held uncustomised roboticons for the empty owned plots
    /// that no held customised roboticon already covers, row-major.
    ///
    /// Returns the number customised.
    ///
    /// # Errors
    ///
    /// Only contract violations are returned.
    pub fn customise_roboticons(
        &mut self,
        grid: &PlotGrid,
        market: &Market,
    ) -> Result<u32, AgentError> {
        let mut spare_ore = self.ledger.roboticons(Customisation::Ore);
        let mut spare_energy = self.ledger.roboticons(Customisation::Energy);
        let targets: Vec<Customisation> = grid
            .plots_owned_by(self.id)
            .filter(|(_, plot)| plot.roboticon().is_none())
            .map(|(_, plot)| Customisation::from(plot.specialism()))
            .collect();

        let mut customised: u32 = 0;
        for target in targets {
            let spare = match target {
                Customisation::Ore => &mut spare_ore,
                Customisation::Energy => &mut spare_energy,
                Customisation::Uncustomised => continue,
            };
            if *spare > 0 {
                *spare = spare.saturating_sub(1);
                continue;
            }
            if self.ledger.roboticons(Customisation::Uncustomised) == 0 {
                break;
            }
            match transaction::customise_roboticon(&mut self.ledger, market, target) {
                Ok(_) => customised = customised.saturating_add(1),
                Err(error) if is_shortage(&error) => {
                    debug!(
                        player = %self.id,
                        customisation = target.as_str(),
                        %error,
                        "AI skipped customisation"
                    );
                }
                Err(error) => return Err(error.into()),
            }
        }
        Ok(customised)
    }

    /// Place a held customised roboticon on every empty owned plot whose
    /// specialism it matches, row-major.
    ///
    /// Returns the number placed.
    ///
    /// # Errors
    ///
    /// Only contract violations are returned.
    pub fn place_roboticons(&mut self, grid: &mut PlotGrid) -> Result<u32, AgentError> {
        let vacant: Vec<(Position, Customisation)> = grid
            .plots_owned_by(self.id)
            .filter(|(_, plot)| plot.roboticon().is_none())
            .map(|(position, plot)| (position, Customisation::from(plot.specialism())))
            .collect();

        let mut placed: u32 = 0;
        for (position, customisation) in vacant {
            if self.ledger.roboticons(customisation) == 0 {
                continue;
            }
            self.place_roboticon(grid, position, customisation)?;
            placed = placed.saturating_add(1);
        }
        Ok(placed)
    }

    // -------------------------------------------------------------------
    // Phase 5: resources
    // -------------------------------------------------------------------

    /// Sell every unit of held ore and, independently, every unit of held
    /// energy.
    ///
    /// # Errors
    ///
    /// Only contract violations are returned.
    pub fn buy_and_sell_resources(&mut self, market: &mut Market) -> Result<SaleSummary, AgentError> {
        let mut summary = SaleSummary::default();
        for resource in Resource::ALL {
            let quantity = self.ledger.quantity(resource);
            if quantity == 0 {
                continue;
            }
            let price = transaction::sell_resource(&mut self.ledger, market, resource, quantity)?;
            match resource {
                Resource::Ore => summary.ore = quantity,
                Resource::Energy => summary.energy = quantity,
            }
            summary.revenue = summary.revenue.saturating_add(price);
        }
        Ok(summary)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use colony_ledger::{MarketLedger, ResourceLedger};
    use colony_market::MarketConfig;
    use colony_types::Specialism;
    use colony_world::create_plots;

    use super::*;

    fn market_with(ore: u32, energy: u32, roboticons: u32) -> Market {
        Market::new(
            MarketConfig::default(),
            MarketLedger::new(ResourceLedger::new(ore, energy), roboticons),
        )
        .unwrap()
    }

    fn ai_with(money: u32, ore: u32, energy: u32) -> AiPlayer {
        AiPlayer::new(PlayerLedger::new(money, ResourceLedger::new(ore, energy)))
    }

    /// A 1x3 checkerboard: Ore, Energy, Ore. Every plot owned by `ai`.
    fn grid_owned_by(ai: &AiPlayer) -> PlotGrid {
        let mut grid = create_plots(1, 3).unwrap();
        for col in 0..3 {
            ai.acquire_plot(&mut grid, Position::new(0, col)).unwrap();
        }
        grid
    }

    #[test]
    fn choose_plot_takes_first_unowned() {
        let ai = ai_with(0, 0, 0);
        let mut grid = create_plots(2, 2).unwrap();
        assert_eq!(ai.choose_plot(&mut grid).unwrap(), Position::new(0, 0));
        assert_eq!(ai.choose_plot(&mut grid).unwrap(), Position::new(0, 1));
        assert!(grid.get(Position::new(0, 1)).unwrap().is_owned_by(ai.id()));
    }

    #[test]
    fn choose_plot_on_full_grid_is_contract_violation() {
        let ai = ai_with(0, 0, 0);
        let mut grid = create_plots(1, 1).unwrap();
        ai.choose_plot(&mut grid).unwrap();
        assert_eq!(
            ai.choose_plot(&mut grid),
            Err(AgentError::World {
                source: WorldError::NoUnownedPlot
            })
        );
    }

    #[test]
    fn buys_one_roboticon_per_empty_plot() {
        let mut ai = ai_with(1_000, 0, 0);
        let grid = grid_owned_by(&ai);
        let mut market = market_with(0, 0, 5);

        assert_eq!(ai.buy_roboticons(&grid, &mut market).unwrap(), 3);
        assert_eq!(ai.ledger().roboticons(Customisation::Uncustomised), 3);
        assert_eq!(market.inventory().roboticon_stock(), 2);
    }

    #[test]
    fn held_uncustomised_reduce_need() {
        let mut ai = ai_with(1_000, 0, 0);
        ai.ledger_mut()
            .increase_roboticons(Customisation::Uncustomised, 2)
            .unwrap();
        let grid = grid_owned_by(&ai);
        let mut market = market_with(0, 0, 5);

        assert_eq!(ai.buy_roboticons(&grid, &mut market).unwrap(), 1);
        assert_eq!(market.inventory().roboticon_stock(), 4);
    }

    #[test]
    fn production_uses_up_the_iteration() {
        let mut ai = ai_with(1_000, 0, 0);
        let mut grid = create_plots(1, 1).unwrap();
        ai.acquire_plot(&mut grid, Position::new(0, 0)).unwrap();
        let mut market = market_with(5, 0, 0);

        assert_eq!(ai.buy_roboticons(&grid, &mut market).unwrap(), 0);
        assert_eq!(market.inventory().roboticon_stock(), 1);
        assert_eq!(market.inventory().ore(), 0);
        assert_eq!(ai.ledger().money(), 1_000);
        assert_eq!(ai.ledger().roboticons(Customisation::Uncustomised), 0);
    }

    #[test]
    fn empty_market_alternates_production_and_purchase() {
        // Need 3: produce, buy, then production fails on 2 ore.
        let mut ai = ai_with(1_000, 0, 0);
        let grid = grid_owned_by(&ai);
        let mut market = market_with(7, 0, 0);

        assert_eq!(ai.buy_roboticons(&grid, &mut market).unwrap(), 1);
        assert_eq!(market.inventory().ore(), 2);
        assert_eq!(market.inventory().roboticon_stock(), 0);
    }

    #[test]
    fn buying_stops_below_affordability_threshold() {
        // Threshold is 15 + 10 = 25. After two purchases 24 remains.
        let mut ai = ai_with(54, 0, 0);
        let grid = grid_owned_by(&ai);
        let mut market = market_with(0, 0, 5);

        assert_eq!(ai.buy_roboticons(&grid, &mut market).unwrap(), 2);
        assert_eq!(ai.ledger().money(), 24);
        assert_eq!(market.inventory().roboticon_stock(), 3);
    }

    #[test]
    fn customises_for_uncovered_plots_only() {
        let mut ai = ai_with(1_000, 0, 0);
        ai.ledger_mut()
            .increase_roboticons(Customisation::Uncustomised, 3)
            .unwrap();
        ai.ledger_mut()
            .increase_roboticons(Customisation::Ore, 1)
            .unwrap();
        let grid = grid_owned_by(&ai);
        let market = market_with(0, 0, 0);

        assert_eq!(ai.customise_roboticons(&grid, &market).unwrap(), 2);
        assert_eq!(ai.ledger().roboticons(Customisation::Ore), 2);
        assert_eq!(ai.ledger().roboticons(Customisation::Energy), 1);
        assert_eq!(ai.ledger().roboticons(Customisation::Uncustomised), 1);
    }

    #[test]
    fn places_only_on_matching_plots() {
        let mut ai = ai_with(0, 0, 0);
        ai.ledger_mut()
            .increase_roboticons(Customisation::Energy, 3)
            .unwrap();
        let mut grid = grid_owned_by(&ai);

        assert_eq!(ai.place_roboticons(&mut grid).unwrap(), 1);
        for (_, plot) in grid.iter() {
            match plot.specialism() {
                Specialism::Energy => assert_eq!(plot.roboticon(), Some(Customisation::Energy)),
                Specialism::Ore => assert_eq!(plot.roboticon(), None),
            }
        }
        assert_eq!(ai.ledger().roboticons(Customisation::Energy), 2);
    }

    #[test]
    fn sells_only_what_is_held() {
        let mut ai = ai_with(0, 0, 7);
        let mut market = market_with(0, 0, 0);

        let sale = ai.buy_and_sell_resources(&mut market).unwrap();
        assert_eq!(sale.ore, 0);
        assert_eq!(sale.energy, 7);
        assert_eq!(sale.revenue, 70);
        assert_eq!(market.inventory().energy(), 7);
        assert_eq!(market.inventory().ore(), 0);
        assert_eq!(ai.ledger().energy(), 0);
        assert_eq!(ai.ledger().money(), 70);
    }

    #[test]
    fn full_turn_fills_new_plot() {
        let mut ai = ai_with(100, 3, 0);
        let mut grid = create_plots(2, 2).unwrap();
        let mut market = market_with(0, 0, 4);

        let report = ai.take_turn(&mut grid, &mut market).unwrap();
        assert_eq!(report.acquired, Some(Position::new(0, 0)));
        assert_eq!(report.roboticons_bought, 1);
        assert_eq!(report.roboticons_customised, 1);
        assert_eq!(report.roboticons_placed, 1);
        assert_eq!(report.ore_sold, 3);
        assert_eq!(
            grid.get(Position::new(0, 0)).unwrap().roboticon(),
            Some(Customisation::Ore)
        );
        // 100 - 15 - 10 + 30
        assert_eq!(ai.ledger().money(), 105);
    }

    #[test]
    fn turn_on_full_grid_skips_land_phase() {
        let mut ai = ai_with(0, 0, 0);
        let mut grid = create_plots(1, 1).unwrap();
        let other = ai_with(0, 0, 0);
        other.acquire_plot(&mut grid, Position::new(0, 0)).unwrap();
        let mut market = market_with(0, 0, 0);

        let report = ai.take_turn(&mut grid, &mut market).unwrap();
        assert_eq!(report, TurnReport::default());
    }

    #[test]
    fn broke_ai_turn_still_succeeds() {
        let mut ai = ai_with(0, 0, 0);
        let mut grid = create_plots(2, 2).unwrap();
        let mut market = market_with(0, 0, 10);

        let report = ai.take_turn(&mut grid, &mut market).unwrap();
        assert!(report.acquired.is_some());
        assert_eq!(report.roboticons_bought, 0);
        assert_eq!(market.inventory().roboticon_stock(), 10);
    }
}
