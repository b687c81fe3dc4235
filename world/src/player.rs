//! Player position and quiver bookkeeping.

use hunt_core::{RoomId, MAX_ARROWS};

/// The hunter wandering the cave.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Player {
    room: RoomId,
    initial_room: RoomId,
    arrows: u8,
}

impl Player {
    /// Creates a player standing in `room` with a full quiver.
    #[must_use]
    pub(crate) const fn new(room: RoomId) -> Self {
        Self {
            room,
            initial_room: room,
            arrows: MAX_ARROWS,
        }
    }

    /// Room the player currently occupies.
    #[must_use]
    pub const fn room(&self) -> RoomId {
        self.room
    }

    /// Room the player occupied when the cave was set up.
    #[must_use]
    pub const fn initial_room(&self) -> RoomId {
        self.initial_room
    }

    /// Crooked arrows left in the quiver.
    #[must_use]
    pub const fn arrows(&self) -> u8 {
        self.arrows
    }

    /// Crooked arrows fired since the game started.
    #[must_use]
    pub const fn arrows_used(&self) -> u8 {
        MAX_ARROWS - self.arrows
    }

    pub(crate) fn move_to(&mut self, room: RoomId) {
        self.room = room;
    }

    /// Removes one arrow from the quiver and reports how many remain.
    pub(crate) fn consume_arrow(&mut self) -> u8 {
        self.arrows = self.arrows.saturating_sub(1);
        self.arrows
    }

    pub(crate) fn reset(&mut self) {
        self.room = self.initial_room;
        self.arrows = MAX_ARROWS;
    }
}
