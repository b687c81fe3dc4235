//! Static room graph of the dodecahedral cave.

use hunt_core::{CaveError, RoomId, SetupExhausted, ROOM_COUNT, TUNNELS_PER_ROOM};
use rand::{seq::SliceRandom, Rng};

/// Tunnels leaving each room, indexed by `room - 1`.
///
/// The table is the vertex adjacency of a dodecahedron: every room has three
/// neighbours, tunnels run both ways and the shortest cycle spans five rooms.
const TUNNELS: [[u8; TUNNELS_PER_ROOM]; ROOM_COUNT as usize] = [
    [2, 5, 8],
    [1, 3, 10],
    [2, 4, 12],
    [3, 5, 14],
    [1, 4, 6],
    [5, 7, 15],
    [6, 8, 17],
    [1, 7, 9],
    [8, 10, 18],
    [2, 9, 11],
    [10, 12, 19],
    [3, 11, 13],
    [12, 14, 20],
    [4, 13, 15],
    [6, 14, 16],
    [15, 17, 20],
    [7, 16, 18],
    [9, 17, 19],
    [11, 18, 20],
    [13, 16, 19],
];

/// Fixed room graph shared by every session.
///
/// The layout never changes, so the graph carries no state and is cheap to
/// copy into systems that need to walk it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Cave;

impl Cave {
    /// Creates a handle to the cave layout.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Rooms reachable through the tunnels leaving `room`.
    pub fn adjacent_rooms(&self, room: RoomId) -> Result<[RoomId; TUNNELS_PER_ROOM], CaveError> {
        let index = room.index().ok_or(CaveError::RoomOutOfRange(room))?;
        Ok(TUNNELS[index].map(RoomId::new))
    }

    /// Reports whether a tunnel connects the two rooms.
    ///
    /// Rooms outside the cave are never adjacent to anything.
    #[must_use]
    pub fn is_adjacent(&self, from: RoomId, to: RoomId) -> bool {
        self.adjacent_rooms(from)
            .map_or(false, |rooms| rooms.contains(&to))
    }

    /// Uniformly selects any room of the cave, hazards included.
    pub fn any_room<R>(&self, rng: &mut R) -> RoomId
    where
        R: Rng + ?Sized,
    {
        RoomId::new(rng.gen_range(1..=ROOM_COUNT))
    }

    /// Uniformly selects a room that is not listed in `excluding`.
    pub fn random_room<R>(&self, excluding: &[RoomId], rng: &mut R) -> Result<RoomId, SetupExhausted>
    where
        R: Rng + ?Sized,
    {
        let candidates: Vec<RoomId> = RoomId::all()
            .filter(|room| !excluding.contains(room))
            .collect();
        candidates
            .choose(rng)
            .copied()
            .ok_or(SetupExhausted {
                reserved: excluding.len(),
            })
    }

    /// Uniformly selects a neighbour of `room` free of pits and bats.
    ///
    /// `hazard_rooms` lists the rooms holding static hazards. When every
    /// neighbour is taken the call fails with [`CaveError::NoSafeRoom`]; the
    /// caller decides how to degrade.
    pub fn safe_room_adjacent_to<R>(
        &self,
        room: RoomId,
        hazard_rooms: &[RoomId],
        rng: &mut R,
    ) -> Result<RoomId, CaveError>
    where
        R: Rng + ?Sized,
    {
        let candidates: Vec<RoomId> = self
            .adjacent_rooms(room)?
            .into_iter()
            .filter(|neighbor| !hazard_rooms.contains(neighbor))
            .collect();
        candidates
            .choose(rng)
            .copied()
            .ok_or(CaveError::NoSafeRoom(room))
    }

    /// Uniformly selects a neighbour of `room`, never stepping back into `previous`.
    pub fn random_neighbor<R>(
        &self,
        room: RoomId,
        previous: Option<RoomId>,
        rng: &mut R,
    ) -> Result<RoomId, CaveError>
    where
        R: Rng + ?Sized,
    {
        let candidates: Vec<RoomId> = self
            .adjacent_rooms(room)?
            .into_iter()
            .filter(|neighbor| Some(*neighbor) != previous)
            .collect();
        candidates
            .choose(rng)
            .copied()
            .ok_or(CaveError::RoomOutOfRange(room))
    }
}
