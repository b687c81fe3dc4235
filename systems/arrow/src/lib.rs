#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that plans the flight of a crooked arrow.
//!
//! A crooked arrow follows the rooms the player names for as long as each
//! named room is reachable from the arrow's current room. From the first
//! unreachable request onwards it wanders at random, never doubling back,
//! until it has flown as many rooms as were requested.

use hunt_core::{ArrowPathInvalid, Command, RoomId, MAX_ARROW_HOPS};
use hunt_world::Cave;
use rand::Rng;
use tracing::trace;

/// Realized path of a single arrow.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ArrowFlight {
    rooms: Vec<RoomId>,
    followed: usize,
}

impl ArrowFlight {
    /// Rooms the arrow flies through, in order, excluding the shooter's room.
    #[must_use]
    pub fn rooms(&self) -> &[RoomId] {
        &self.rooms
    }

    /// Number of leading rooms that were taken from the request.
    #[must_use]
    pub const fn followed(&self) -> usize {
        self.followed
    }

    /// Number of trailing rooms that were picked at random.
    #[must_use]
    pub fn wandered(&self) -> usize {
        self.rooms.len() - self.followed
    }

    /// Consumes the flight, yielding the realized rooms.
    #[must_use]
    pub fn into_rooms(self) -> Vec<RoomId> {
        self.rooms
    }
}

/// Checks a requested arrow path before any arrow leaves the quiver.
///
/// `origin` is the shooter's room and counts as position zero. A request is
/// refused when it names more than [`MAX_ARROW_HOPS`] rooms, names a room
/// outside the cave, or asks the arrow to stay where it is or turn straight
/// back, i.e. names the room one or two positions earlier.
pub fn validate_request(origin: RoomId, requested: &[RoomId]) -> Result<(), ArrowPathInvalid> {
    if requested.len() > MAX_ARROW_HOPS {
        return Err(ArrowPathInvalid::TooManyHops {
            requested: requested.len(),
            max: MAX_ARROW_HOPS,
        });
    }

    let mut previous = None;
    let mut current = origin;
    for (index, &room) in requested.iter().enumerate() {
        if !room.is_valid() {
            return Err(ArrowPathInvalid::RoomOutOfRange(room));
        }
        if room == current || Some(room) == previous {
            return Err(ArrowPathInvalid::TooCrooked {
                position: index + 1,
                room,
            });
        }
        previous = Some(current);
        current = room;
    }

    Ok(())
}

/// Arrow traversal system that turns path requests into fire commands.
#[derive(Debug, Default)]
pub struct ArrowTraversal {
    cave: Cave,
}

impl ArrowTraversal {
    /// Creates a traversal system walking the provided cave.
    #[must_use]
    pub const fn new(cave: Cave) -> Self {
        Self { cave }
    }

    /// Plans the realized flight for an arrow shot from `origin`.
    ///
    /// Requested rooms are followed while each is adjacent to the arrow's
    /// current room. The remaining hops are drawn uniformly from the current
    /// room's neighbours, excluding the room the arrow just left.
    pub fn plan<R>(
        &self,
        origin: RoomId,
        requested: &[RoomId],
        rng: &mut R,
    ) -> Result<ArrowFlight, ArrowPathInvalid>
    where
        R: Rng + ?Sized,
    {
        validate_request(origin, requested)?;
        if !origin.is_valid() {
            return Err(ArrowPathInvalid::RoomOutOfRange(origin));
        }

        let mut rooms = Vec::with_capacity(requested.len());
        let mut previous = None;
        let mut current = origin;

        for &room in requested {
            if !self.cave.is_adjacent(current, room) {
                trace!(%current, %room, "arrow cannot follow request");
                break;
            }
            rooms.push(room);
            previous = Some(current);
            current = room;
        }
        let followed = rooms.len();

        while rooms.len() < requested.len() {
            let next = self
                .cave
                .random_neighbor(current, previous, rng)
                .map_err(|_| ArrowPathInvalid::RoomOutOfRange(current))?;
            trace!(%current, %next, "arrow wanders");
            rooms.push(next);
            previous = Some(current);
            current = next;
        }

        Ok(ArrowFlight { rooms, followed })
    }

    /// Plans the flight and queues a `Command::FireArrow` for it.
    ///
    /// A zero-room request is a deliberate no-op: nothing is queued and no
    /// arrow leaves the quiver. The planned flight is returned so adapters
    /// can narrate it.
    pub fn handle<R>(
        &mut self,
        origin: RoomId,
        requested: &[RoomId],
        rng: &mut R,
        out: &mut Vec<Command>,
    ) -> Result<ArrowFlight, ArrowPathInvalid>
    where
        R: Rng + ?Sized,
    {
        let flight = self.plan(origin, requested, rng)?;
        if !flight.rooms.is_empty() {
            out.push(Command::FireArrow {
                flight: flight.rooms.clone(),
            });
        }
        Ok(flight)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rooms(values: &[u8]) -> Vec<RoomId> {
        values.iter().copied().map(RoomId::new).collect()
    }

    #[test]
    fn immediate_repeat_is_too_crooked() {
        assert_eq!(
            validate_request(RoomId::new(1), &rooms(&[2, 2])),
            Err(ArrowPathInvalid::TooCrooked {
                position: 2,
                room: RoomId::new(2),
            })
        );
    }

    #[test]
    fn u_turn_is_too_crooked() {
        assert_eq!(
            validate_request(RoomId::new(1), &rooms(&[2, 3, 2])),
            Err(ArrowPathInvalid::TooCrooked {
                position: 3,
                room: RoomId::new(2),
            })
        );
    }

    #[test]
    fn shooter_room_counts_as_position_zero() {
        assert_eq!(
            validate_request(RoomId::new(1), &rooms(&[1])),
            Err(ArrowPathInvalid::TooCrooked {
                position: 1,
                room: RoomId::new(1),
            })
        );
        assert_eq!(
            validate_request(RoomId::new(1), &rooms(&[2, 1])),
            Err(ArrowPathInvalid::TooCrooked {
                position: 2,
                room: RoomId::new(1),
            })
        );
        assert_eq!(validate_request(RoomId::new(1), &rooms(&[2, 3, 1])), Ok(()));
    }

    #[test]
    fn bounds_are_enforced() {
        assert_eq!(
            validate_request(RoomId::new(1), &rooms(&[2, 3, 4, 5, 6, 7])),
            Err(ArrowPathInvalid::TooManyHops {
                requested: 6,
                max: MAX_ARROW_HOPS,
            })
        );
        assert_eq!(
            validate_request(RoomId::new(1), &rooms(&[2, 0])),
            Err(ArrowPathInvalid::RoomOutOfRange(RoomId::new(0)))
        );
        assert_eq!(validate_request(RoomId::new(1), &[]), Ok(()));
    }
}
