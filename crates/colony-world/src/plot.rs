//! A single land plot: ownership, specialism and a placed roboticon.
//!
//! Ownership and roboticon placement are one-shot transitions. Once set,
//! neither can be cleared or replaced for the rest of the game.
//!
//! # Yield
//!
//! | Roboticon | Ore plot | Energy plot |
//! |-----------|----------|-------------|
//! | Ore       | 2 ore    | 1 ore       |
//! | Energy    | 1 energy | 2 energy    |
//!
//! Unowned plots and plots without a roboticon yield nothing.

use serde::Serialize;
use tracing::debug;

use colony_ledger::{PlayerLedger, QuantityStore};
use colony_types::{Customisation, PlayerId, Production, Specialism};

use crate::error::WorldError;

/// Units produced when the roboticon matches the plot's specialism.
pub const MATCHED_YIELD: u32 = 2;

/// Units produced when the roboticon does not match the specialism.
pub const MISMATCHED_YIELD: u32 = 1;

/// One cell of the colony map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Plot {
    /// The player who acquired the plot.
    owner: Option<PlayerId>,
    /// Fixed at creation.
    specialism: Specialism,
    /// The placed roboticon. Never `Uncustomised`.
    roboticon: Option<Customisation>,
}

impl Plot {
    /// A fresh, unowned, empty plot.
    pub const fn new(specialism: Specialism) -> Self {
        Self {
            owner: None,
            specialism,
            roboticon: None,
        }
    }

    /// The owning player, if any.
    pub const fn owner(&self) -> Option<PlayerId> {
        self.owner
    }

    /// The plot's specialism.
    pub const fn specialism(&self) -> Specialism {
        self.specialism
    }

    /// The placed roboticon, if any.
    pub const fn roboticon(&self) -> Option<Customisation> {
        self.roboticon
    }

    /// Whether any player owns the plot.
    pub const fn is_owned(&self) -> bool {
        self.owner.is_some()
    }

    /// Whether `player` owns the plot.
    pub fn is_owned_by(&self, player: PlayerId) -> bool {
        self.owner == Some(player)
    }

    /// Whether `player` owns the plot and it has no roboticon yet.
    pub fn is_vacant_for(&self, player: PlayerId) -> bool {
        self.is_owned_by(player) && self.roboticon.is_none()
    }

    /// Give the plot to `owner`.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::AlreadyOwned`] if the plot has any owner,
    /// including `owner` itself.
    pub fn acquire(&mut self, owner: PlayerId) -> Result<(), WorldError> {
        if let Some(existing) = self.owner {
            return Err(WorldError::AlreadyOwned { owner: existing });
        }
        self.owner = Some(owner);
        debug!(%owner, specialism = ?self.specialism, "Plot acquired");
        Ok(())
    }

    /// Place a customised roboticon on the plot.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::UncustomisedPlacement`] for
    /// [`Customisation::Uncustomised`] whatever the plot's state, and
    /// [`WorldError::RoboticonAlreadyPlaced`] if a roboticon is present.
    pub fn place_roboticon(&mut self, customisation: Customisation) -> Result<(), WorldError> {
        if customisation == Customisation::Uncustomised {
            return Err(WorldError::UncustomisedPlacement);
        }
        if let Some(existing) = self.roboticon {
            return Err(WorldError::RoboticonAlreadyPlaced { existing });
        }
        self.roboticon = Some(customisation);
        debug!(
            customisation = customisation.as_str(),
            specialism = ?self.specialism,
            "Roboticon placed"
        );
        Ok(())
    }

    /// What this plot yields in one production pass.
    ///
    /// Pure function of the current state; calling it repeatedly yields
    /// the same result.
    pub const fn produce(&self) -> Production {
        if self.owner.is_none() {
            return Production::NONE;
        }
        let Some(roboticon) = self.roboticon else {
            return Production::NONE;
        };
        let Some(resource) = roboticon.resource() else {
            return Production::NONE;
        };
        let amount = if self.specialism.matches(roboticon) {
            MATCHED_YIELD
        } else {
            MISMATCHED_YIELD
        };
        Production::of(resource, amount)
    }

    /// Credit this plot's yield to `ledger` and return it.
    ///
    /// The ledger is expected to be the owner's; the production pass in
    /// [`PlotGrid::produce_all`](crate::PlotGrid::produce_all) guarantees
    /// that.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::Ledger`] if crediting overflows.
    pub fn produce_into(&self, ledger: &mut PlayerLedger) -> Result<Production, WorldError> {
        let production = self.produce();
        *ledger = credited(*ledger, production)?;
        Ok(production)
    }
}

/// A copy of `ledger` with a production yield added, all or nothing.
pub(crate) fn credited(
    mut ledger: PlayerLedger,
    production: Production,
) -> Result<PlayerLedger, WorldError> {
    ledger.increase_ore(i64::from(production.ore))?;
    ledger.increase_energy(i64::from(production.energy))?;
    Ok(ledger)
}

#[cfg(test)]
mod tests {
    use colony_ledger::ResourceLedger;
    use colony_types::Resource;

    use super::*;

    fn owned(specialism: Specialism, owner: PlayerId) -> Plot {
        let mut plot = Plot::new(specialism);
        assert!(plot.acquire(owner).is_ok());
        plot
    }

    #[test]
    fn new_plot_is_unowned_and_empty() {
        let plot = Plot::new(Specialism::Ore);
        assert!(!plot.is_owned());
        assert_eq!(plot.roboticon(), None);
        assert_eq!(plot.specialism(), Specialism::Ore);
    }

    #[test]
    fn acquire_is_one_shot() {
        let first = PlayerId::new();
        let second = PlayerId::new();
        let mut plot = owned(Specialism::Energy, first);

        assert_eq!(
            plot.acquire(second),
            Err(WorldError::AlreadyOwned { owner: first })
        );
        assert_eq!(plot.owner(), Some(first));
    }

    #[test]
    fn same_owner_cannot_reacquire() {
        let owner = PlayerId::new();
        let mut plot = owned(Specialism::Energy, owner);
        assert!(plot.acquire(owner).is_err());
        assert_eq!(plot.owner(), Some(owner));
    }

    #[test]
    fn place_roboticon_is_one_shot() {
        let mut plot = owned(Specialism::Ore, PlayerId::new());
        assert!(plot.place_roboticon(Customisation::Ore).is_ok());
        assert_eq!(
            plot.place_roboticon(Customisation::Energy),
            Err(WorldError::RoboticonAlreadyPlaced {
                existing: Customisation::Ore
            })
        );
        assert_eq!(plot.roboticon(), Some(Customisation::Ore));
    }

    #[test]
    fn uncustomised_placement_always_rejected() {
        let mut empty = Plot::new(Specialism::Ore);
        assert_eq!(
            empty.place_roboticon(Customisation::Uncustomised),
            Err(WorldError::UncustomisedPlacement)
        );
        assert_eq!(empty.roboticon(), None);

        let mut occupied = owned(Specialism::Ore, PlayerId::new());
        assert!(occupied.place_roboticon(Customisation::Energy).is_ok());
        assert_eq!(
            occupied.place_roboticon(Customisation::Uncustomised),
            Err(WorldError::UncustomisedPlacement)
        );
    }

    #[test]
    fn matched_roboticon_yields_two() {
        let mut ore_plot = owned(Specialism::Ore, PlayerId::new());
        assert!(ore_plot.place_roboticon(Customisation::Ore).is_ok());
        assert_eq!(ore_plot.produce(), Production { ore: 2, energy: 0 });

        let mut energy_plot = owned(Specialism::Energy, PlayerId::new());
        assert!(energy_plot.place_roboticon(Customisation::Energy).is_ok());
        assert_eq!(energy_plot.produce(), Production { ore: 0, energy: 2 });
    }

    #[test]
    fn mismatched_roboticon_yields_one() {
        let mut plot = owned(Specialism::Energy, PlayerId::new());
        assert!(plot.place_roboticon(Customisation::Ore).is_ok());
        assert_eq!(plot.produce(), Production::of(Resource::Ore, 1));
    }

    #[test]
    fn empty_or_unowned_plot_yields_nothing() {
        assert_eq!(Plot::new(Specialism::Ore).produce(), Production::NONE);
        assert_eq!(
            owned(Specialism::Ore, PlayerId::new()).produce(),
            Production::NONE
        );

        let mut unowned = Plot::new(Specialism::Ore);
        assert!(unowned.place_roboticon(Customisation::Ore).is_ok());
        assert_eq!(unowned.produce(), Production::NONE);
    }

    #[test]
    fn production_is_repeatable() {
        let mut plot = owned(Specialism::Ore, PlayerId::new());
        assert!(plot.place_roboticon(Customisation::Ore).is_ok());
        let mut ledger = PlayerLedger::new(0, ResourceLedger::new(0, 0));
        for _ in 0..3 {
            assert_eq!(plot.produce_into(&mut ledger), Ok(Production { ore: 2, energy: 0 }));
        }
        assert_eq!(ledger.ore(), 6);
        assert_eq!(ledger.energy(), 0);
    }

    #[test]
    fn produce_into_overflow_leaves_ledger_unchanged() {
        let mut plot = owned(Specialism::Energy, PlayerId::new());
        assert!(plot.place_roboticon(Customisation::Energy).is_ok());
        let mut ledger = PlayerLedger::new(0, ResourceLedger::new(0, u32::MAX));
        assert!(plot.produce_into(&mut ledger).is_err());
        assert_eq!(ledger.energy(), u32::MAX);
    }
}
