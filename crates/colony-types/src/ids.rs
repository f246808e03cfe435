//! Type-safe identifier wrappers around [`Uuid`].
//!
//! Players and emitted events carry strongly-typed IDs so that a plot owner
//! can never be confused with an event reference at compile time. All IDs
//! use UUID v7 (time-ordered).

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// Generates a newtype wrapper around [`Uuid`] with standard derives.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
        #[ts(export, export_to = "bindings/")]
        pub struct $name(pub Uuid);

        impl $name {
            /// Create a new identifier using UUID v7 (time-ordered).
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            /// Return the inner [`Uuid`] value.
            pub const fn into_inner(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<Uuid> for $name {
            fn from(id: Uuid) -> Self {
                Self(id)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id! {
    /// Unique identifier for a player (human seat or AI opponent).
    PlayerId
}

define_id! {
    /// Unique identifier for a notification emitted to the UI sink.
    EventId
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_distinct_types() {
        let player = PlayerId::new();
        let event = EventId::new();
        assert_ne!(player.into_inner(), Uuid::nil());
        assert_ne!(event.into_inner(), Uuid::nil());
    }

    #[test]
    fn fresh_player_ids_differ() {
        assert_ne!(PlayerId::new(), PlayerId::new());
    }

    #[test]
    fn id_roundtrip_serde() {
        let original = PlayerId::new();
        let json = serde_json::to_string(&original).ok();
        assert!(json.is_some());
        let restored: Result<PlayerId, _> =
            serde_json::from_str(json.as_deref().unwrap_or(""));
        assert_eq!(restored.ok(), Some(original));
    }

    #[test]
    fn id_display_matches_uuid() {
        let id = PlayerId::new();
        assert_eq!(id.to_string(), id.into_inner().to_string());
    }
}
