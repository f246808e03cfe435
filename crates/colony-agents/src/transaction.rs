//! Market transactions between one player and the market.
//!
//! Each function checks affordability and availability first, then mutates
//! the market and the player's ledger back-to-back. On any `Err` neither
//! side has changed: the player's ledger is updated on a copy that is only
//! written back once the market call has succeeded.
//!
//! | Transaction             | Player                           | Market              |
//! |-------------------------|----------------------------------|---------------------|
//! | [`buy_resource`]        | -money, +resource                | -resource           |
//! | [`sell_resource`]       | -resource, +money                | +resource           |
//! | [`buy_roboticons`]      | -money, +uncustomised            | -roboticon stock    |
//! | [`customise_roboticon`] | -fee, -uncustomised, +customised | unchanged           |

use tracing::debug;

use colony_ledger::{LedgerField, PlayerLedger, QuantityStore};
use colony_market::Market;
use colony_types::{Customisation, Resource};

use crate::error::TradeError;

// ---------------------------------------------------------------------------
// Pre-checks
// ---------------------------------------------------------------------------

const fn ensure_funds(ledger: &PlayerLedger, needed: u32) -> Result<(), TradeError> {
    let available = ledger.money();
    if available < needed {
        return Err(TradeError::InsufficientFunds { needed, available });
    }
    Ok(())
}

const fn ensure_stock(field: LedgerField, requested: u32, available: u32) -> Result<(), TradeError> {
    if available < requested {
        return Err(TradeError::MarketOutOfStock {
            field,
            requested,
            available,
        });
    }
    Ok(())
}

const fn ensure_holdings(
    field: LedgerField,
    requested: u32,
    available: u32,
) -> Result<(), TradeError> {
    if available < requested {
        return Err(TradeError::InsufficientHoldings {
            field,
            requested,
            available,
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Resources
// ---------------------------------------------------------------------------

/// Buy `quantity` of `resource` from the market at the market's unit price.
///
/// Returns the price paid.
///
/// # Errors
///
/// [`TradeError::InsufficientFunds`] or [`TradeError::MarketOutOfStock`]
/// as business outcomes; wrapped ledger or market errors otherwise.
pub fn buy_resource(
    ledger: &mut PlayerLedger,
    market: &mut Market,
    resource: Resource,
    quantity: u32,
) -> Result<u32, TradeError> {
    let price = market.price_of(resource, quantity)?;
    ensure_funds(ledger, price)?;
    ensure_stock(
        LedgerField::Resource(resource),
        quantity,
        market.inventory().quantity(resource),
    )?;

    let mut next = *ledger;
    next.decrease_money(i64::from(price))?;
    next.increase(resource, i64::from(quantity))?;
    market.buy(resource, quantity)?;
    *ledger = next;

    debug!(
        resource = resource.as_str(),
        quantity,
        price,
        money = ledger.money(),
        "Resource bought"
    );
    Ok(price)
}

/// Sell `quantity` of `resource` to the market at the market's unit price.
///
/// Returns the money received.
///
/// # Errors
///
/// [`TradeError::InsufficientHoldings`] as a business outcome; wrapped
/// ledger or market errors otherwise.
pub fn sell_resource(
    ledger: &mut PlayerLedger,
    market: &mut Market,
    resource: Resource,
    quantity: u32,
) -> Result<u32, TradeError> {
    ensure_holdings(
        LedgerField::Resource(resource),
        quantity,
        ledger.quantity(resource),
    )?;
    let price = market.price_of(resource, quantity)?;

    let mut next = *ledger;
    next.decrease(resource, i64::from(quantity))?;
    next.increase_money(i64::from(price))?;
    market.sell(resource, quantity)?;
    *ledger = next;

    debug!(
        resource = resource.as_str(),
        quantity,
        price,
        money = ledger.money(),
        "Resource sold"
    );
    Ok(price)
}

// ---------------------------------------------------------------------------
// Roboticons
// ---------------------------------------------------------------------------

/// Buy `quantity` uncustomised roboticons from the market's stock.
///
/// Returns the price paid.
///
/// # Errors
///
/// [`TradeError::InsufficientFunds`] or [`TradeError::MarketOutOfStock`]
/// as business outcomes; wrapped ledger or market errors otherwise.
pub fn buy_roboticons(
    ledger: &mut PlayerLedger,
    market: &mut Market,
    quantity: u32,
) -> Result<u32, TradeError> {
    let price = market.price_of_roboticons(quantity)?;
    ensure_funds(ledger, price)?;
    ensure_stock(
        LedgerField::RoboticonStock,
        quantity,
        market.inventory().roboticon_stock(),
    )?;

    let mut next = *ledger;
    next.decrease_money(i64::from(price))?;
    next.increase_roboticons(Customisation::Uncustomised, i64::from(quantity))?;
    market.buy_roboticons(quantity)?;
    *ledger = next;

    debug!(
        quantity,
        price,
        held = ledger.roboticons(Customisation::Uncustomised),
        "Roboticons bought"
    );
    Ok(price)
}

/// Pay the market's fee and convert one held uncustomised roboticon into
/// `target`.
///
/// Returns the fee paid.
///
/// # Errors
///
/// [`TradeError::InsufficientHoldings`] with no uncustomised roboticon
/// held, or [`TradeError::InsufficientFunds`], as business outcomes.
/// Customising into [`Customisation::Uncustomised`] is a contract
/// violation surfaced as a wrapped market error.
pub fn customise_roboticon(
    ledger: &mut PlayerLedger,
    market: &Market,
    target: Customisation,
) -> Result<u32, TradeError> {
    let fee = market.price_of_customisation(target)?;
    ensure_holdings(
        LedgerField::Roboticons(Customisation::Uncustomised),
        1,
        ledger.roboticons(Customisation::Uncustomised),
    )?;
    ensure_funds(ledger, fee)?;

    let mut next = *ledger;
    next.decrease_money(i64::from(fee))?;
    next.customise(target)?;
    *ledger = next;

    debug!(
        customisation = target.as_str(),
        fee,
        money = ledger.money(),
        "Roboticon customisation paid"
    );
    Ok(fee)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use colony_ledger::{LedgerError, MarketLedger, ResourceLedger};
    use colony_market::{MarketConfig, MarketError};
    use colony_types::FailureKind;

    use super::*;

    fn market_with(ore: u32, energy: u32, roboticons: u32) -> Market {
        Market::new(
            MarketConfig::default(),
            MarketLedger::new(ResourceLedger::new(ore, energy), roboticons),
        )
        .unwrap()
    }

    fn player_with(money: u32, ore: u32, energy: u32) -> PlayerLedger {
        PlayerLedger::new(money, ResourceLedger::new(ore, energy))
    }

    #[test]
    fn buy_resource_moves_goods_and_money() {
        let mut market = market_with(10, 0, 0);
        let mut ledger = player_with(100, 0, 0);
        assert_eq!(buy_resource(&mut ledger, &mut market, Resource::Ore, 3), Ok(30));
        assert_eq!(ledger.money(), 70);
        assert_eq!(ledger.ore(), 3);
        assert_eq!(market.inventory().ore(), 7);
    }

    #[test]
    fn buy_resource_without_funds_changes_nothing() {
        let mut market = market_with(10, 0, 0);
        let mut ledger = player_with(25, 0, 0);
        let result = buy_resource(&mut ledger, &mut market, Resource::Ore, 3);
        assert_eq!(
            result,
            Err(TradeError::InsufficientFunds {
                needed: 30,
                available: 25
            })
        );
        assert_eq!(result.unwrap_err().kind(), FailureKind::BusinessOutcome);
        assert_eq!(ledger, player_with(25, 0, 0));
        assert_eq!(market.inventory().ore(), 10);
    }

    #[test]
    fn buy_resource_beyond_stock_changes_nothing() {
        let mut market = market_with(0, 2, 0);
        let mut ledger = player_with(100, 0, 0);
        assert!(matches!(
            buy_resource(&mut ledger, &mut market, Resource::Energy, 3),
            Err(TradeError::MarketOutOfStock { requested: 3, available: 2, .. })
        ));
        assert_eq!(ledger.money(), 100);
        assert_eq!(market.inventory().energy(), 2);
    }

    #[test]
    fn sell_resource_moves_goods_and_money() {
        let mut market = market_with(0, 0, 0);
        let mut ledger = player_with(0, 0, 7);
        assert_eq!(
            sell_resource(&mut ledger, &mut market, Resource::Energy, 7),
            Ok(70)
        );
        assert_eq!(ledger.energy(), 0);
        assert_eq!(ledger.money(), 70);
        assert_eq!(market.inventory().energy(), 7);
    }

    #[test]
    fn sell_more_than_held_is_business_outcome() {
        let mut market = market_with(0, 0, 0);
        let mut ledger = player_with(0, 1, 0);
        let result = sell_resource(&mut ledger, &mut market, Resource::Ore, 2);
        assert!(matches!(
            result,
            Err(TradeError::InsufficientHoldings { .. })
        ));
        assert_eq!(ledger.ore(), 1);
        assert_eq!(market.inventory().ore(), 0);
    }

    #[test]
    fn market_overflow_on_sell_leaves_player_unchanged() {
        let mut market = Market::new(
            MarketConfig::default(),
            MarketLedger::new(ResourceLedger::new(u32::MAX, 0), 0),
        )
        .unwrap();
        let mut ledger = player_with(0, 1, 0);
        let result = sell_resource(&mut ledger, &mut market, Resource::Ore, 1);
        assert!(matches!(
            result,
            Err(TradeError::Market {
                source: MarketError::Ledger {
                    source: LedgerError::ArithmeticOverflow { .. }
                }
            })
        ));
        assert_eq!(ledger, player_with(0, 1, 0));
    }

    #[test]
    fn buy_roboticons_credits_uncustomised() {
        let mut market = market_with(0, 0, 5);
        let mut ledger = player_with(100, 0, 0);
        assert_eq!(buy_roboticons(&mut ledger, &mut market, 3), Ok(45));
        assert_eq!(ledger.roboticons(Customisation::Uncustomised), 3);
        assert_eq!(ledger.money(), 55);
        assert_eq!(market.inventory().roboticon_stock(), 2);
    }

    #[test]
    fn buy_roboticons_out_of_stock() {
        let mut market = market_with(0, 0, 0);
        let mut ledger = player_with(100, 0, 0);
        assert!(matches!(
            buy_roboticons(&mut ledger, &mut market, 1),
            Err(TradeError::MarketOutOfStock {
                field: LedgerField::RoboticonStock,
                ..
            })
        ));
        assert_eq!(ledger.money(), 100);
    }

    #[test]
    fn customise_pays_fee_and_converts() {
        let mut market = market_with(0, 0, 1);
        let mut ledger = player_with(100, 0, 0);
        buy_roboticons(&mut ledger, &mut market, 1).unwrap();
        assert_eq!(customise_roboticon(&mut ledger, &market, Customisation::Energy), Ok(10));
        assert_eq!(ledger.roboticons(Customisation::Uncustomised), 0);
        assert_eq!(ledger.roboticons(Customisation::Energy), 1);
        assert_eq!(ledger.money(), 75);
    }

    #[test]
    fn customise_without_uncustomised_is_business_outcome() {
        let market = market_with(0, 0, 0);
        let mut ledger = player_with(100, 0, 0);
        let result = customise_roboticon(&mut ledger, &market, Customisation::Ore);
        assert_eq!(result.unwrap_err().kind(), FailureKind::BusinessOutcome);
        assert_eq!(ledger.money(), 100);
    }

    #[test]
    fn customise_into_uncustomised_is_contract_violation() {
        let market = market_with(0, 0, 0);
        let mut ledger = player_with(100, 0, 0);
        let result = customise_roboticon(&mut ledger, &market, Customisation::Uncustomised);
        assert_eq!(result.unwrap_err().kind(), FailureKind::ContractViolation);
    }
}
