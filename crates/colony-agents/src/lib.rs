//! Players, transactions and the AI policy for the Roboticon Colony economy
//! engine.
//!
//! This crate is the logic layer for players. It sits between the ledger,
//! market and world crates (which hold state) and `colony-core` (which
//! sequences turns and rounds).
//!
//! # Modules
//!
//! - [`ai`] -- [`AiPlayer`]: the greedy five-phase turn policy and
//!   [`TurnReport`].
//! - [`error`] -- [`TradeError`] for single transactions, [`AgentError`] for
//!   whole actions.
//! - [`player`] -- The [`Player`] trait shared by every seat, and
//!   [`HumanPlayer`].
//! - [`transaction`] -- Buy, sell and customise against the market, each
//!   all-or-nothing.

pub mod ai;
pub mod error;
pub mod player;
pub mod transaction;

pub use ai::{AiPlayer, SaleSummary, TurnReport};
pub use error::{AgentError, TradeError};
pub use player::{HumanPlayer, Player};
pub use transaction::{buy_resource, buy_roboticons, customise_roboticon, sell_resource};
