//! Game events and the sinks that receive them.
//!
//! The turn controller emits a [`GameEvent`] whenever state a UI would show
//! has changed. Delivery is fire-and-forget: a sink cannot fail or slow the
//! game, and the controller never reads anything back.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use colony_types::{
    Customisation, EventId, LedgerSnapshot, MarketSnapshot, PlayerId, Production,
};
use colony_world::Position;

/// One player's yield from a production pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerProduction {
    /// The plot owner.
    pub player: PlayerId,
    /// What their plots produced.
    pub production: Production,
}

/// What happened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEventKind {
    /// A player acquired a plot.
    PlotAcquired {
        /// The new owner.
        player: PlayerId,
        /// The plot.
        position: Position,
    },
    /// A player placed a roboticon.
    RoboticonPlaced {
        /// The plot owner.
        player: PlayerId,
        /// The plot.
        position: Position,
        /// The roboticon placed.
        customisation: Customisation,
    },
    /// A player's holdings changed.
    LedgerChanged {
        /// The player.
        player: PlayerId,
        /// Holdings after the change.
        ledger: LedgerSnapshot,
    },
    /// The market's stock changed.
    MarketChanged {
        /// Stock after the change.
        market: MarketSnapshot,
    },
    /// A production pass credited plot owners.
    ProductionCompleted {
        /// Yield per owner.
        production: Vec<PlayerProduction>,
    },
    /// A round finished. The envelope's `round` is the round that ended.
    RoundEnded {
        /// Roboticons the market built from ore at round end.
        roboticons_produced: u32,
    },
    /// The game finished.
    GameEnded {
        /// Rounds completed.
        rounds: u32,
        /// The highest scorer, or `None` on a tie.
        winner: Option<PlayerId>,
    },
}

impl GameEventKind {
    /// Short name for logs.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::PlotAcquired { .. } => "plot_acquired",
            Self::RoboticonPlaced { .. } => "roboticon_placed",
            Self::LedgerChanged { .. } => "ledger_changed",
            Self::MarketChanged { .. } => "market_changed",
            Self::ProductionCompleted { .. } => "production_completed",
            Self::RoundEnded { .. } => "round_ended",
            Self::GameEnded { .. } => "game_ended",
        }
    }
}

/// Envelope around every emitted event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameEvent {
    /// Unique event identifier.
    pub id: EventId,
    /// Wall-clock time of emission.
    pub timestamp: DateTime<Utc>,
    /// Round in which the event happened.
    pub round: u32,
    /// The payload.
    #[serde(flatten)]
    pub kind: GameEventKind,
}

impl GameEvent {
    /// Wrap `kind` in a fresh envelope stamped with the current time.
    pub fn new(round: u32, kind: GameEventKind) -> Self {
        Self {
            id: EventId::new(),
            timestamp: Utc::now(),
            round,
            kind,
        }
    }
}

/// Receives game events.
pub trait EventSink {
    /// Called once per event, in emission order.
    fn emit(&mut self, event: &GameEvent);
}

/// Discards every event.
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&mut self, _event: &GameEvent) {}
}

/// Keeps every event in memory.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Vec<GameEvent>,
}

impl RecordingSink {
    /// An empty recorder.
    pub const fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Every event received so far.
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Event kinds received so far, in order.
    pub fn kinds(&self) -> impl Iterator<Item = &GameEventKind> {
        self.events.iter().map(|event| &event.kind)
    }

    /// How many events named `name` were received.
    pub fn count(&self, name: &str) -> usize {
        self.kinds().filter(|kind| kind.name() == name).count()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &GameEvent) {
        self.events.push(event.clone());
    }
}

/// Logs every event as JSON at `debug` level.
pub struct TracingSink;

impl EventSink for TracingSink {
    fn emit(&mut self, event: &GameEvent) {
        match serde_json::to_string(event) {
            Ok(json) => debug!(
                event = event.kind.name(),
                round = event.round,
                payload = %json,
                "Game event"
            ),
            Err(error) => warn!(event = event.kind.name(), %error, "Failed to serialise game event"),
        }
    }
}
