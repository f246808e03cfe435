//! Land plots and the colony map for the Roboticon Colony economy engine.
//!
//! # Modules
//!
//! - [`error`] -- Error types for plot and grid operations.
//! - [`grid`] -- [`PlotGrid`]: the fixed board of plots, the
//!   [`create_plots`] factories, queries and the per-round production pass.
//! - [`plot`] -- [`Plot`]: ownership, specialism, roboticon placement and
//!   yield.
//! - [`production`] -- [`LedgerDirectory`]: how the production pass reaches
//!   each owner's ledger.

pub mod error;
pub mod grid;
pub mod plot;
pub mod production;

pub use error::WorldError;
pub use grid::{MAX_DIMENSION, PlotGrid, Position, create_plots, create_plots_seeded};
pub use plot::{MATCHED_YIELD, MISMATCHED_YIELD, Plot};
pub use production::LedgerDirectory;
