//! The plot grid: a fixed `rows x cols` board of [`Plot`]s.
//!
//! Plots are stored row-major in a flat `Vec`. Dimensions are fixed at
//! creation; no plot is ever added or removed afterwards.

use std::collections::BTreeMap;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use colony_types::{PlayerId, PlotView, Production, Specialism};

use crate::error::WorldError;
use crate::plot::{Plot, credited};
use crate::production::LedgerDirectory;

/// Largest supported number of rows or columns.
pub const MAX_DIMENSION: usize = 1024;

/// Zero-based grid coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    /// Row index.
    pub row: usize,
    /// Column index.
    pub col: usize,
}

impl Position {
    /// Build a position.
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// The colony map.
///
/// Only the factories below build a grid, so `rows * cols == plots.len()`
/// with both dimensions non-zero always holds. The grid serialises for
/// display but is never read back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlotGrid {
    /// Number of rows.
    rows: usize,
    /// Number of columns.
    cols: usize,
    /// Row-major storage, `rows * cols` entries.
    plots: Vec<Plot>,
}

/// Build a `rows x cols` grid with a checkerboard of specialisms.
///
/// The plot at `(row, col)` is [`Specialism::Ore`] when
/// `(row ^ col) & 1 == 0` and [`Specialism::Energy`] otherwise, so every
/// grid of two or more plots has both kinds. All plots start unowned and empty.
///
/// # Errors
///
/// Returns [`WorldError::InvalidDimensions`] if either dimension is zero or
/// exceeds [`MAX_DIMENSION`].
pub fn create_plots(rows: usize, cols: usize) -> Result<PlotGrid, WorldError> {
    PlotGrid::build(rows, cols, |position| {
        if (position.row ^ position.col) & 1 == 0 {
            Specialism::Ore
        } else {
            Specialism::Energy
        }
    })
}

/// Build a `rows x cols` grid with specialisms drawn from a seeded RNG.
///
/// The same seed always produces the same layout.
///
/// # Errors
///
/// Returns [`WorldError::InvalidDimensions`] if either dimension is zero or
/// exceeds [`MAX_DIMENSION`].
pub fn create_plots_seeded(rows: usize, cols: usize, seed: u64) -> Result<PlotGrid, WorldError> {
    let mut rng = StdRng::seed_from_u64(seed);
    PlotGrid::build(rows, cols, |_| {
        if rng.random_bool(0.5) {
            Specialism::Ore
        } else {
            Specialism::Energy
        }
    })
}

impl PlotGrid {
    fn build(
        rows: usize,
        cols: usize,
        mut specialism_at: impl FnMut(Position) -> Specialism,
    ) -> Result<Self, WorldError> {
        if rows == 0 || cols == 0 || rows > MAX_DIMENSION || cols > MAX_DIMENSION {
            return Err(WorldError::InvalidDimensions { rows, cols });
        }
        let total = rows
            .checked_mul(cols)
            .ok_or(WorldError::InvalidDimensions { rows, cols })?;
        let mut plots = Vec::with_capacity(total);
        for row in 0..rows {
            for col in 0..cols {
                plots.push(Plot::new(specialism_at(Position::new(row, col))));
            }
        }
        info!(rows, cols, "Plot grid created");
        Ok(Self { rows, cols, plots })
    }

    /// Number of rows.
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// Total number of plots.
    pub fn len(&self) -> usize {
        self.plots.len()
    }

    /// Always `false`; a grid has at least one plot.
    pub fn is_empty(&self) -> bool {
        self.plots.is_empty()
    }

    fn index_of(&self, position: Position) -> Option<usize> {
        if position.row >= self.rows || position.col >= self.cols {
            return None;
        }
        position
            .row
            .checked_mul(self.cols)
            .and_then(|base| base.checked_add(position.col))
    }

    // -------------------------------------------------------------------
    // Lookup
    // -------------------------------------------------------------------

    /// The plot at `position`, or `None` outside the grid.
    pub fn get(&self, position: Position) -> Option<&Plot> {
        self.index_of(position).and_then(|i| self.plots.get(i))
    }

    /// Mutable access to the plot at `position`.
    pub fn get_mut(&mut self, position: Position) -> Option<&mut Plot> {
        self.index_of(position).and_then(|i| self.plots.get_mut(i))
    }

    /// The plot at `position`, or an error outside the grid.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::OutOfBounds`] if `position` is off the grid.
    pub fn plot_mut(&mut self, position: Position) -> Result<&mut Plot, WorldError> {
        self.get_mut(position).ok_or(WorldError::OutOfBounds {
            row: position.row,
            col: position.col,
        })
    }

    /// Every plot with its position, row-major.
    pub fn iter(&self) -> impl Iterator<Item = (Position, &Plot)> {
        self.plots
            .chunks(self.cols)
            .enumerate()
            .flat_map(|(row, cells)| {
                cells
                    .iter()
                    .enumerate()
                    .map(move |(col, plot)| (Position::new(row, col), plot))
            })
    }

    /// Every position, row-major.
    pub fn positions(&self) -> impl Iterator<Item = Position> {
        self.iter().map(|(position, _)| position)
    }

    /// Whether `predicate` holds for every plot.
    pub fn for_all(&self, predicate: impl Fn(&Plot) -> bool) -> bool {
        self.plots.iter().all(predicate)
    }

    /// The first unowned plot in row-major order.
    pub fn first_unowned(&self) -> Option<Position> {
        self.iter()
            .find(|(_, plot)| !plot.is_owned())
            .map(|(position, _)| position)
    }

    /// Whether every plot has an owner.
    pub fn all_acquired(&self) -> bool {
        self.for_all(Plot::is_owned)
    }

    /// Plots owned by `player`, row-major.
    pub fn plots_owned_by(&self, player: PlayerId) -> impl Iterator<Item = (Position, &Plot)> {
        self.iter().filter(move |(_, plot)| plot.is_owned_by(player))
    }

    /// How many plots `player` owns.
    pub fn count_owned_by(&self, player: PlayerId) -> usize {
        self.plots_owned_by(player).count()
    }

    /// How many of `player`'s plots have no roboticon.
    pub fn count_vacant_for(&self, player: PlayerId) -> usize {
        self.plots
            .iter()
            .filter(|plot| plot.is_vacant_for(player))
            .count()
    }

    /// Give the plot at `position` to `owner`.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::OutOfBounds`] or [`WorldError::AlreadyOwned`].
    pub fn acquire(&mut self, position: Position, owner: PlayerId) -> Result<(), WorldError> {
        self.plot_mut(position)?.acquire(owner)?;
        debug!(row = position.row, col = position.col, "Grid plot acquired");
        Ok(())
    }

    /// Read-only rendering of every plot, row-major.
    pub fn view(&self) -> Vec<PlotView> {
        self.iter()
            .map(|(position, plot)| PlotView {
                row: u32::try_from(position.row).unwrap_or(u32::MAX),
                col: u32::try_from(position.col).unwrap_or(u32::MAX),
                owner: plot.owner(),
                specialism: plot.specialism(),
                roboticon: plot.roboticon(),
            })
            .collect()
    }

    // -------------------------------------------------------------------
    // Production
    // -------------------------------------------------------------------

    /// Yield of every owned plot summed per owner. Pure.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::ArithmeticOverflow`] if a total overflows.
    pub fn production_by_owner(&self) -> Result<BTreeMap<PlayerId, Production>, WorldError> {
        let mut totals: BTreeMap<PlayerId, Production> = BTreeMap::new();
        for plot in &self.plots {
            let Some(owner) = plot.owner() else {
                continue;
            };
            let entry = totals.entry(owner).or_insert(Production::NONE);
            *entry = entry
                .checked_add(plot.produce())
                .ok_or(WorldError::ArithmeticOverflow)?;
        }
        Ok(totals)
    }

    /// Run one production pass: credit every owner's ledger with the yield
    /// of their plots.
    ///
    /// Every owner's credit is computed on a copy before any ledger is
    /// written, so an unknown owner or an overflow leaves all ledgers
    /// untouched.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::UnknownOwner`] if an owner has no ledger in
    /// `directory`, or [`WorldError::Ledger`] if a credit overflows.
    pub fn produce_all(
        &self,
        directory: &mut impl LedgerDirectory,
    ) -> Result<BTreeMap<PlayerId, Production>, WorldError> {
        let totals = self.production_by_owner()?;
        if let Some(missing) = totals.keys().find(|owner| !directory.contains(**owner)) {
            return Err(WorldError::UnknownOwner(*missing));
        }
        let mut staged = Vec::with_capacity(totals.len());
        for (owner, production) in &totals {
            let ledger = directory
                .ledger_mut(*owner)
                .ok_or(WorldError::UnknownOwner(*owner))?;
            staged.push((*owner, *production, credited(*ledger, *production)?));
        }
        for (owner, production, next) in staged {
            let ledger = directory
                .ledger_mut(owner)
                .ok_or(WorldError::UnknownOwner(owner))?;
            *ledger = next;
            debug!(
                %owner,
                ore = production.ore,
                energy = production.energy,
                "Production credited"
            );
        }
        Ok(totals)
    }
}
