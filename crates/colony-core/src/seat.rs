//! Seats at the table and the roster that holds them in turn order.

use colony_agents::{AiPlayer, HumanPlayer, Player};
use colony_ledger::PlayerLedger;
use colony_types::PlayerId;
use colony_world::LedgerDirectory;

/// One seat: either the greedy AI or a human driven by UI input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Seat {
    /// Computer-controlled.
    Ai(AiPlayer),
    /// Human-controlled.
    Human(HumanPlayer),
}

impl Seat {
    /// Whether the seat is computer-controlled.
    pub const fn is_ai(&self) -> bool {
        matches!(self, Self::Ai(_))
    }

    fn as_player(&self) -> &dyn Player {
        match self {
            Self::Ai(ai) => ai,
            Self::Human(human) => human,
        }
    }

    fn as_player_mut(&mut self) -> &mut dyn Player {
        match self {
            Self::Ai(ai) => ai,
            Self::Human(human) => human,
        }
    }
}

impl Player for Seat {
    fn id(&self) -> PlayerId {
        self.as_player().id()
    }

    fn ledger(&self) -> &PlayerLedger {
        self.as_player().ledger()
    }

    fn ledger_mut(&mut self) -> &mut PlayerLedger {
        self.as_player_mut().ledger_mut()
    }
}

/// Every seat in turn order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    seats: Vec<Seat>,
}

impl Roster {
    /// Seat `seat` after everyone already seated.
    pub fn push(&mut self, seat: Seat) {
        self.seats.push(seat);
    }

    /// Seats in turn order.
    pub fn iter(&self) -> impl Iterator<Item = &Seat> {
        self.seats.iter()
    }

    /// Player ids in turn order.
    pub fn ids(&self) -> Vec<PlayerId> {
        self.seats.iter().map(Player::id).collect()
    }

    /// Number of seats.
    pub fn len(&self) -> usize {
        self.seats.len()
    }

    /// Whether nobody is seated.
    pub fn is_empty(&self) -> bool {
        self.seats.is_empty()
    }

    /// The seat for `player`.
    pub fn get(&self, player: PlayerId) -> Option<&Seat> {
        self.seats.iter().find(|seat| seat.id() == player)
    }

    /// Mutable access to the seat for `player`.
    pub fn get_mut(&mut self, player: PlayerId) -> Option<&mut Seat> {
        self.seats.iter_mut().find(|seat| seat.id() == player)
    }
}

impl LedgerDirectory for Roster {
    fn contains(&self, player: PlayerId) -> bool {
        self.get(player).is_some()
    }

    fn ledger_mut(&mut self, player: PlayerId) -> Option<&mut PlayerLedger> {
        self.get_mut(player).map(Player::ledger_mut)
    }
}
