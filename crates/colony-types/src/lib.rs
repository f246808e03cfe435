//! Shared type definitions for the Roboticon Colony economy engine.
//!
//! This crate is the single source of truth for the enums, identifiers and
//! snapshot structs used across the workspace. Types defined here flow to
//! `TypeScript` via `ts-rs` for the rendering layer.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe UUID wrappers for players and events
//! - [`enums`] -- Resources, customisations, specialisms, failure kinds
//! - [`structs`] -- Production yields and UI-facing snapshots

pub mod enums;
pub mod ids;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::{Customisation, FailureKind, Resource, Specialism};
pub use ids::{EventId, PlayerId};
pub use structs::{LedgerSnapshot, MarketSnapshot, PlotView, Production};

#[cfg(test)]
mod tests {
    //! Integration tests for type exports and `TypeScript` binding generation.

    #[test]
    fn export_bindings() {
        // ts-rs writes the bindings into `bindings/` relative to the crate
        // root when `export_all` is called.
        use ts_rs::TS;

        // IDs
        let _ = crate::ids::PlayerId::export_all();
        let _ = crate::ids::EventId::export_all();

        // Enums
        let _ = crate::enums::Resource::export_all();
        let _ = crate::enums::Customisation::export_all();
        let _ = crate::enums::Specialism::export_all();
        let _ = crate::enums::FailureKind::export_all();

        // Structs
        let _ = crate::structs::Production::export_all();
        let _ = crate::structs::LedgerSnapshot::export_all();
        let _ = crate::structs::MarketSnapshot::export_all();
        let _ = crate::structs::PlotView::export_all();
    }
}
