#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative cave state management for Hunt the Wumpus.

mod cave;
mod hazards;
mod player;

use hunt_core::{
    Command, EndState, Event, HazardId, InvalidMove, LossCause, RoomId, SetupExhausted,
    HAZARD_COUNT, MAX_ARROW_HOPS,
};
use rand::Rng;
use thiserror::Error;
use tracing::{debug, warn};

pub use cave::Cave;
pub use hazards::{BottomlessPit, Hazard, SuperBats, Wumpus};
pub use player::Player;

/// Rooms assigned to every entity when a cave is set up.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Layout {
    /// Room the player starts in.
    pub player: RoomId,
    /// Room the wumpus sleeps in.
    pub wumpus: RoomId,
    /// Rooms holding the two bottomless pits.
    pub pits: [RoomId; 2],
    /// Rooms holding the two super bat colonies.
    pub bats: [RoomId; 2],
}

impl Layout {
    /// Draws six pairwise distinct rooms for the player and the hazards.
    pub fn random<R>(cave: &Cave, rng: &mut R) -> Result<Self, SetupExhausted>
    where
        R: Rng + ?Sized,
    {
        let mut reserved: Vec<RoomId> = Vec::with_capacity(HAZARD_COUNT + 1);
        for _ in 0..=HAZARD_COUNT {
            let room = cave.random_room(&reserved, rng)?;
            reserved.push(room);
        }

        Ok(Self {
            player: reserved[0],
            wumpus: reserved[1],
            pits: [reserved[2], reserved[3]],
            bats: [reserved[4], reserved[5]],
        })
    }

    /// Checks that every room exists and that no two entities share one.
    pub fn validate(&self) -> Result<(), LayoutError> {
        let rooms = self.rooms();
        for (index, room) in rooms.iter().enumerate() {
            if !room.is_valid() {
                return Err(LayoutError::RoomOutOfRange(*room));
            }
            if rooms[..index].contains(room) {
                return Err(LayoutError::SharedRoom(*room));
            }
        }
        Ok(())
    }

    fn rooms(&self) -> [RoomId; HAZARD_COUNT + 1] {
        [
            self.player,
            self.wumpus,
            self.pits[0],
            self.pits[1],
            self.bats[0],
            self.bats[1],
        ]
    }
}

/// Reasons a hand-made layout may be refused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// An entity was assigned a room that does not exist.
    #[error("room {0} does not exist")]
    RoomOutOfRange(RoomId),
    /// Two entities were assigned the same room.
    #[error("room {0} is assigned to more than one entity")]
    SharedRoom(RoomId),
}

/// Represents the authoritative Hunt the Wumpus session state.
#[derive(Clone, Debug)]
pub struct World {
    cave: Cave,
    player: Player,
    hazards: [Hazard; HAZARD_COUNT],
}

impl World {
    /// Sets up a fresh cave with every entity in its own random room.
    pub fn new<R>(rng: &mut R) -> Result<Self, SetupExhausted>
    where
        R: Rng + ?Sized,
    {
        let cave = Cave::new();
        let layout = Layout::random(&cave, rng)?;
        debug!(?layout, "cave set up");
        Ok(Self::from_layout(cave, layout))
    }

    /// Sets up a cave with entities placed exactly as described.
    pub fn with_layout(layout: Layout) -> Result<Self, LayoutError> {
        layout.validate()?;
        Ok(Self::from_layout(Cave::new(), layout))
    }

    fn from_layout(cave: Cave, layout: Layout) -> Self {
        Self {
            cave,
            player: Player::new(layout.player),
            hazards: [
                Hazard::Wumpus(Wumpus::new(layout.wumpus)),
                Hazard::Pit(BottomlessPit::new(layout.pits[0])),
                Hazard::Pit(BottomlessPit::new(layout.pits[1])),
                Hazard::Bats(SuperBats::new(layout.bats[0])),
                Hazard::Bats(SuperBats::new(layout.bats[1])),
            ],
        }
    }

    fn wumpus_mut(&mut self) -> Option<&mut Wumpus> {
        self.hazards.iter_mut().find_map(|hazard| match hazard {
            Hazard::Wumpus(wumpus) => Some(wumpus),
            _ => None,
        })
    }

    fn move_player<R>(&mut self, to: RoomId, rng: &mut R, out_events: &mut Vec<Event>)
    where
        R: Rng + ?Sized,
    {
        let from = self.player.room();
        if !to.is_valid() {
            out_events.push(Event::MoveRejected {
                from,
                reason: InvalidMove::RoomOutOfRange(to),
            });
            return;
        }
        if !self.cave.is_adjacent(from, to) {
            out_events.push(Event::MoveRejected {
                from,
                reason: InvalidMove::NotAdjacent { from, to },
            });
            return;
        }

        self.player.move_to(to);
        debug!(%from, %to, "player moved");
        out_events.push(Event::PlayerMoved { from, to });
        self.resolve_encounters(rng, out_events);
    }

    /// Resolves the player's arrival in a room until the game ends or the player settles.
    ///
    /// Deadly hazards are consulted in identifier order and the first verdict
    /// that ends the game wins. Otherwise each bat colony may snatch the
    /// player, and every snatch restarts the resolution in the drop room. The
    /// loop has no iteration cap: each pass either ends the game, lands the
    /// player somewhere safe, or performs another uniformly random drop.
    fn resolve_encounters<R>(&mut self, rng: &mut R, out_events: &mut Vec<Event>)
    where
        R: Rng + ?Sized,
    {
        loop {
            let player_room = self.player.room();
            for (id, hazard) in HazardId::ALL.into_iter().zip(self.hazards.iter_mut()) {
                let was_discovered = hazard.is_discovered();
                let Some(end_state) = hazard.determine_end_state(player_room) else {
                    continue;
                };
                if !end_state.is_game_over() {
                    continue;
                }

                if !was_discovered && hazard.is_discovered() {
                    out_events.push(Event::HazardDiscovered {
                        hazard: id,
                        room: hazard.room(),
                    });
                }
                debug!(room = %player_room, hazard = ?id, "player killed");
                out_events.push(Event::GameEnded { end_state });
                return;
            }

            let mut snatched = false;
            for (id, hazard) in HazardId::ALL.into_iter().zip(self.hazards.iter()) {
                let from = self.player.room();
                if let Some(to) = hazard.try_snatch(&mut self.player, &self.cave, rng) {
                    debug!(%from, %to, bats = ?id, "player snatched");
                    out_events.push(Event::PlayerSnatched { bats: id, from, to });
                    snatched = true;
                    break;
                }
            }

            if !snatched {
                return;
            }
        }
    }

    /// Scores an arrow flying through `flight`.
    ///
    /// The first room of the flight holding the player ends the game in a
    /// loss; the first holding the wumpus ends it in a win.
    fn fire_arrow(&mut self, flight: Vec<RoomId>, out_events: &mut Vec<Event>) {
        if flight.is_empty() {
            return;
        }
        if flight.len() > MAX_ARROW_HOPS || flight.iter().any(|room| !room.is_valid()) {
            warn!(?flight, "refusing malformed arrow flight");
            return;
        }

        let remaining = self.player.consume_arrow();
        let player_room = self.player.room();
        let wumpus_room = query::wumpus_room(self);
        debug!(?flight, remaining, "arrow fired");
        out_events.push(Event::ArrowFired {
            flight: flight.clone(),
            remaining,
        });

        for room in flight {
            if room == player_room {
                out_events.push(Event::GameEnded {
                    end_state: EndState::lost(LossCause::OwnArrow),
                });
                return;
            }

            if Some(room) == wumpus_room {
                if let Some(wumpus) = self.wumpus_mut() {
                    wumpus.discover();
                }
                out_events.push(Event::HazardDiscovered {
                    hazard: HazardId::WUMPUS,
                    room,
                });
                out_events.push(Event::GameEnded {
                    end_state: EndState::won(),
                });
                return;
            }
        }

        out_events.push(Event::ArrowMissed);
        if remaining == 0 {
            out_events.push(Event::GameEnded {
                end_state: EndState::lost(LossCause::OutOfArrows),
            });
        }
    }

    fn wake_wumpus(&mut self, bumped: bool, out_events: &mut Vec<Event>) {
        let Some(wumpus) = self.wumpus_mut() else {
            return;
        };
        if wumpus.wake() {
            debug!(bumped, "wumpus awoke");
            out_events.push(Event::WumpusAwoke { bumped });
        }
    }

    fn relocate_wumpus(&mut self, to: RoomId, out_events: &mut Vec<Event>) {
        let Some(from) = query::wumpus_room(self) else {
            return;
        };
        let Some(wumpus) = self.wumpus_mut() else {
            return;
        };
        if !wumpus.is_awake() || !to.is_valid() {
            warn!(%to, "refusing to relocate the wumpus");
            return;
        }

        wumpus.relocate(to);
        debug!(%from, %to, "wumpus moved");
        out_events.push(Event::WumpusMoved { from, to });
    }

    fn reset(&mut self, out_events: &mut Vec<Event>) {
        self.player.reset();
        for hazard in self.hazards.iter_mut() {
            hazard.reset();
        }
        debug!("world reset");
        out_events.push(Event::WorldReset);
    }
}

/// Applies the provided command to the world, mutating state deterministically.
///
/// All randomness is drawn from `rng`, so replaying the same commands with an
/// identically seeded generator reproduces the same events.
pub fn apply<R>(world: &mut World, command: Command, rng: &mut R, out_events: &mut Vec<Event>)
where
    R: Rng + ?Sized,
{
    match command {
        Command::MovePlayer { to } => world.move_player(to, rng, out_events),
        Command::FireArrow { flight } => world.fire_arrow(flight, out_events),
        Command::WakeWumpus { bumped } => world.wake_wumpus(bumped, out_events),
        Command::RelocateWumpus { to } => world.relocate_wumpus(to, out_events),
        Command::Reset => world.reset(out_events),
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use hunt_core::{HazardId, HazardKind, RoomId, Warning};

    use super::{Cave, Hazard, World};

    /// Provides read-only access to the cave layout.
    #[must_use]
    pub fn cave(world: &World) -> &Cave {
        &world.cave
    }

    /// Room the player currently occupies.
    #[must_use]
    pub fn player_room(world: &World) -> RoomId {
        world.player.room()
    }

    /// Crooked arrows left in the quiver.
    #[must_use]
    pub fn arrows_remaining(world: &World) -> u8 {
        world.player.arrows()
    }

    /// Crooked arrows fired since the game started.
    #[must_use]
    pub fn arrows_used(world: &World) -> u8 {
        world.player.arrows_used()
    }

    /// Captures a read-only view of every hazard.
    #[must_use]
    pub fn hazard_view(world: &World) -> Vec<HazardSnapshot> {
        HazardId::ALL
            .into_iter()
            .zip(world.hazards.iter())
            .map(|(id, hazard)| HazardSnapshot {
                id,
                kind: hazard.kind(),
                room: hazard.room(),
                discovered: hazard.is_discovered(),
            })
            .collect()
    }

    /// Room the wumpus currently occupies.
    #[must_use]
    pub fn wumpus_room(world: &World) -> Option<RoomId> {
        wumpus_view(world).map(|snapshot| snapshot.room)
    }

    /// Captures the wumpus' state.
    #[must_use]
    pub fn wumpus_view(world: &World) -> Option<WumpusSnapshot> {
        world.hazards.iter().find_map(|hazard| match hazard {
            Hazard::Wumpus(wumpus) => Some(WumpusSnapshot {
                room: hazard.room(),
                awake: wumpus.is_awake(),
                discovered: hazard.is_discovered(),
            }),
            _ => None,
        })
    }

    /// Rooms occupied by the hazards that never move: both pits and both bat colonies.
    #[must_use]
    pub fn static_hazard_rooms(world: &World) -> Vec<RoomId> {
        world
            .hazards
            .iter()
            .filter(|hazard| hazard.kind() != HazardKind::Wumpus)
            .map(Hazard::room)
            .collect()
    }

    /// Warnings sensed from the player's room, one per adjacent hazard.
    #[must_use]
    pub fn warnings(world: &World) -> Vec<Warning> {
        let player_room = world.player.room();
        world
            .hazards
            .iter()
            .filter(|hazard| world.cave.is_adjacent(player_room, hazard.room()))
            .map(|hazard| hazard.kind().warning())
            .collect()
    }

    /// Immutable representation of a single hazard used for queries.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct HazardSnapshot {
        /// Stable identifier of the hazard.
        pub id: HazardId,
        /// Kind of hazard.
        pub kind: HazardKind,
        /// Room the hazard occupies.
        pub room: RoomId,
        /// Whether the player has learned where the hazard is.
        pub discovered: bool,
    }

    /// Immutable representation of the wumpus used for queries.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct WumpusSnapshot {
        /// Room the wumpus occupies.
        pub room: RoomId,
        /// Whether the wumpus has been woken.
        pub awake: bool,
        /// Whether the player has learned where the wumpus is.
        pub discovered: bool,
    }
}
