#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Hunt the Wumpus engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Systems submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values describing what
//! actually happened. Presentation adapters consume the events and the
//! [`EndState`] of each round; they never touch simulation state directly.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod message;

/// Number of rooms carved into the cave.
pub const ROOM_COUNT: u8 = 20;

/// Number of tunnels leaving every room.
pub const TUNNELS_PER_ROOM: usize = 3;

/// Crooked arrows the player carries at the start of a game.
pub const MAX_ARROWS: u8 = 5;

/// Longest flight, in rooms, a single crooked arrow may be asked to travel.
pub const MAX_ARROW_HOPS: usize = 5;

/// Number of hazards placed in the cave: the wumpus, two pits and two bat colonies.
pub const HAZARD_COUNT: usize = 5;

/// Chance that an awake wumpus relocates during its update.
pub const WUMPUS_MOVE_PROBABILITY: f64 = 0.75;

/// Identifier of a single room in the cave.
///
/// Valid identifiers lie in `1..=ROOM_COUNT`. Construction is unchecked so
/// adapters can carry raw player input around; every world operation that
/// consumes a room validates it first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RoomId(u8);

impl RoomId {
    /// Creates a new room identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u8) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u8 {
        self.0
    }

    /// Reports whether the identifier names one of the cave's rooms.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.0 >= 1 && self.0 <= ROOM_COUNT
    }

    /// Zero-based offset of the room, if the identifier is valid.
    #[must_use]
    pub fn index(&self) -> Option<usize> {
        self.is_valid().then(|| usize::from(self.0 - 1))
    }

    /// Iterator over every room of the cave in ascending order.
    pub fn all() -> impl Iterator<Item = RoomId> {
        (1..=ROOM_COUNT).map(RoomId::new)
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}

/// Stable identifier of a hazard placed in the cave.
///
/// Hazards are always iterated in identifier order, which doubles as the
/// resolution order for deadly hazards: the wumpus first, then each pit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct HazardId(u8);

impl HazardId {
    /// The wumpus.
    pub const WUMPUS: HazardId = HazardId(0);
    /// The first bottomless pit.
    pub const PIT_A: HazardId = HazardId(1);
    /// The second bottomless pit.
    pub const PIT_B: HazardId = HazardId(2);
    /// The first super bat colony.
    pub const BATS_A: HazardId = HazardId(3);
    /// The second super bat colony.
    pub const BATS_B: HazardId = HazardId(4);

    /// Every hazard identifier in resolution order.
    pub const ALL: [HazardId; HAZARD_COUNT] = [
        Self::WUMPUS,
        Self::PIT_A,
        Self::PIT_B,
        Self::BATS_A,
        Self::BATS_B,
    ];

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u8 {
        self.0
    }

    /// Kind of hazard that always occupies this slot.
    #[must_use]
    pub const fn kind(&self) -> HazardKind {
        match self.get() {
            0 => HazardKind::Wumpus,
            1 | 2 => HazardKind::Pit,
            _ => HazardKind::Bats,
        }
    }
}

/// Closed set of hazards that inhabit the cave.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HazardKind {
    /// The wumpus: deadly once awake, wanders after waking.
    Wumpus,
    /// A bottomless pit: always deadly, never moves.
    Pit,
    /// A colony of super bats: carries intruders to a random room.
    Bats,
}

impl HazardKind {
    /// Reports whether entering the hazard's room can end the game.
    #[must_use]
    pub const fn is_deadly(self) -> bool {
        match self {
            Self::Wumpus | Self::Pit => true,
            Self::Bats => false,
        }
    }

    /// Warning the player senses from an adjacent room.
    #[must_use]
    pub const fn warning(self) -> Warning {
        match self {
            Self::Wumpus => Warning::WumpusSmell,
            Self::Pit => Warning::Draft,
            Self::Bats => Warning::BatsNearby,
        }
    }

    /// Human readable name used when revealing hazard locations.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Wumpus => "Wumpus",
            Self::Pit => "Bottomless pit",
            Self::Bats => "SuperBats",
        }
    }
}

/// Sensation reported to the player when a hazard lurks next door.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Warning {
    /// A bottomless pit is adjacent.
    Draft,
    /// The wumpus is adjacent.
    WumpusSmell,
    /// A super bat colony is adjacent.
    BatsNearby,
}

impl Warning {
    /// Canonical text presented for the warning.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::Draft => message::PIT_WARNING,
            Self::WumpusSmell => message::WUMPUS_WARNING,
            Self::BatsNearby => message::BAT_WARNING,
        }
    }
}

/// Reason a game ended in a loss.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LossCause {
    /// The player walked into the awake wumpus.
    Wumpus,
    /// The player fell into a bottomless pit.
    Pit,
    /// The player's own crooked arrow came back around.
    OwnArrow,
    /// The quiver ran dry after a miss.
    OutOfArrows,
}

impl LossCause {
    const fn headline(self) -> &'static str {
        match self {
            Self::Wumpus => message::WUMPUS_GOT_YOU,
            Self::Pit => message::FELL_IN_PIT,
            Self::OwnArrow => message::ARROW_GOT_YOU,
            Self::OutOfArrows => message::OUT_OF_ARROWS,
        }
    }
}

/// Terminal result of a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameOutcome {
    /// The player shot the wumpus.
    Won,
    /// The player died or ran out of arrows.
    Lost(LossCause),
}

/// Immutable verdict produced by each round of play.
///
/// The default value is the non-terminal state: play continues and there is
/// nothing to announce.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EndState {
    outcome: Option<GameOutcome>,
}

impl EndState {
    /// Non-terminal verdict: the game goes on.
    #[must_use]
    pub const fn ongoing() -> Self {
        Self { outcome: None }
    }

    /// Terminal verdict for a slain wumpus.
    #[must_use]
    pub const fn won() -> Self {
        Self {
            outcome: Some(GameOutcome::Won),
        }
    }

    /// Terminal verdict for a lost game.
    #[must_use]
    pub const fn lost(cause: LossCause) -> Self {
        Self {
            outcome: Some(GameOutcome::Lost(cause)),
        }
    }

    /// Reports whether the game is over.
    #[must_use]
    pub const fn is_game_over(&self) -> bool {
        self.outcome.is_some()
    }

    /// Terminal outcome, if the game is over.
    #[must_use]
    pub const fn outcome(&self) -> Option<GameOutcome> {
        self.outcome
    }

    /// Announcement for the end of the game, if the game is over.
    #[must_use]
    pub fn message(&self) -> Option<String> {
        self.outcome.map(|outcome| match outcome {
            GameOutcome::Won => message::WIN.to_owned(),
            GameOutcome::Lost(cause) => format!("{}\n{}", cause.headline(), message::LOSE),
        })
    }
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Walks the player through a tunnel into an adjacent room.
    MovePlayer {
        /// Room the player wants to enter.
        to: RoomId,
    },
    /// Fires one crooked arrow along an already planned flight.
    FireArrow {
        /// Rooms the arrow travels through, in order, excluding the player's room.
        flight: Vec<RoomId>,
    },
    /// Wakes the wumpus if it is still asleep.
    WakeWumpus {
        /// Whether the player stumbled into the wumpus' room.
        bumped: bool,
    },
    /// Moves the awake wumpus into another room.
    RelocateWumpus {
        /// Room the wumpus moves into.
        to: RoomId,
    },
    /// Restores every entity to the state it had when the cave was set up.
    Reset,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Confirms that the player walked between two rooms.
    PlayerMoved {
        /// Room the player left.
        from: RoomId,
        /// Room the player entered.
        to: RoomId,
    },
    /// Reports that a move request was refused.
    MoveRejected {
        /// Room the player occupies.
        from: RoomId,
        /// Reason the move was refused.
        reason: InvalidMove,
    },
    /// Announces that a bat colony carried the player elsewhere.
    PlayerSnatched {
        /// Colony that performed the snatch.
        bats: HazardId,
        /// Room the player was taken from.
        from: RoomId,
        /// Room the player was dropped into.
        to: RoomId,
    },
    /// Confirms that a crooked arrow left the quiver.
    ArrowFired {
        /// Rooms the arrow travelled through, in order.
        flight: Vec<RoomId>,
        /// Arrows left after the shot.
        remaining: u8,
    },
    /// Reports that the arrow hit nothing.
    ArrowMissed,
    /// Announces that the wumpus woke up.
    WumpusAwoke {
        /// Whether the player bumped into the sleeping wumpus.
        bumped: bool,
    },
    /// Confirms that the wumpus wandered into another room.
    WumpusMoved {
        /// Room the wumpus left.
        from: RoomId,
        /// Room the wumpus entered.
        to: RoomId,
    },
    /// Reports that a hazard became visible to the player.
    HazardDiscovered {
        /// Hazard that was revealed.
        hazard: HazardId,
        /// Room the hazard occupies.
        room: RoomId,
    },
    /// Announces a terminal verdict.
    GameEnded {
        /// Verdict that ended the game.
        end_state: EndState,
    },
    /// Confirms that every entity returned to its initial state.
    WorldReset,
}

/// Reasons a move request may be refused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error)]
pub enum InvalidMove {
    /// The requested room is not connected to the player's room.
    #[error("room {to} is not adjacent to room {from}")]
    NotAdjacent {
        /// Room the player occupies.
        from: RoomId,
        /// Room the player asked for.
        to: RoomId,
    },
    /// The requested room does not exist.
    #[error("room {0} does not exist")]
    RoomOutOfRange(RoomId),
}

/// Reasons an arrow path request may be refused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error)]
pub enum ArrowPathInvalid {
    /// More rooms were requested than an arrow can fly through.
    #[error("an arrow can fly through at most {max} rooms, {requested} requested")]
    TooManyHops {
        /// Number of rooms requested.
        requested: usize,
        /// Upper bound on the flight length.
        max: usize,
    },
    /// The requested room does not exist.
    #[error("room {0} does not exist")]
    RoomOutOfRange(RoomId),
    /// The requested room would make the arrow stay put or turn back.
    #[error("arrows aren't that crooked: room {room} at position {position}")]
    TooCrooked {
        /// One-based position of the offending room within the request.
        position: usize,
        /// Offending room.
        room: RoomId,
    },
}

/// Setup could not find enough distinct rooms for every entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error)]
#[error("cannot place entities: all {reserved} rooms are already taken")]
pub struct SetupExhausted {
    /// Number of rooms reserved when placement failed.
    pub reserved: usize,
}

/// Failures of the room graph queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error)]
pub enum CaveError {
    /// The queried room does not exist.
    #[error("room {0} does not exist")]
    RoomOutOfRange(RoomId),
    /// Every neighbour of the room hosts a static hazard.
    #[error("every room next to {0} hosts a pit or bats")]
    NoSafeRoom(RoomId),
}

#[cfg(test)]
mod tests {
    use super::{EndState, HazardId, HazardKind, LossCause, RoomId, Warning, ROOM_COUNT};

    #[test]
    fn room_validity_covers_one_through_twenty() {
        assert!(!RoomId::new(0).is_valid());
        assert!(RoomId::new(1).is_valid());
        assert!(RoomId::new(ROOM_COUNT).is_valid());
        assert!(!RoomId::new(ROOM_COUNT + 1).is_valid());
        assert_eq!(RoomId::all().count(), usize::from(ROOM_COUNT));
        assert_eq!(RoomId::new(20).index(), Some(19));
        assert_eq!(RoomId::new(21).index(), None);
        assert_eq!(RoomId::new(17).to_string(), "17");
    }

    #[test]
    fn hazard_slots_resolve_wumpus_before_pits() {
        let kinds: Vec<HazardKind> = HazardId::ALL.iter().map(HazardId::kind).collect();
        assert_eq!(
            kinds,
            vec![
                HazardKind::Wumpus,
                HazardKind::Pit,
                HazardKind::Pit,
                HazardKind::Bats,
                HazardKind::Bats,
            ]
        );
        assert!(HazardKind::Pit.is_deadly());
        assert!(!HazardKind::Bats.is_deadly());
    }

    #[test]
    fn warnings_use_canonical_text() {
        assert_eq!(HazardKind::Pit.warning(), Warning::Draft);
        assert_eq!(Warning::Draft.message(), "I feel a draft!");
        assert_eq!(Warning::WumpusSmell.message(), "I Smell a Wumpus.");
        assert_eq!(Warning::BatsNearby.message(), "Bats nearby!");
    }

    #[test]
    fn ongoing_end_state_has_no_message() {
        let end_state = EndState::default();
        assert_eq!(end_state, EndState::ongoing());
        assert!(!end_state.is_game_over());
        assert_eq!(end_state.message(), None);
    }

    #[test]
    fn loss_message_appends_lose_line() {
        let end_state = EndState::lost(LossCause::Pit);
        assert!(end_state.is_game_over());
        assert_eq!(
            end_state.message().as_deref(),
            Some("YYYIIIIEEEE... fell in a pit!\nHa ha ha - you lose!")
        );
    }

    #[test]
    fn win_message_taunts_the_next_game() {
        let message = EndState::won().message().expect("won games announce");
        assert!(message.starts_with("Aha! You got the Wumpus!"));
    }

    #[test]
    fn end_state_round_trips_through_bincode() {
        let end_state = EndState::lost(LossCause::OutOfArrows);
        let bytes = bincode::serialize(&end_state).expect("serialize");
        let restored: EndState = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(restored, end_state);
    }
}
