#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that decides when the wumpus wakes and where it wanders.

use hunt_core::{Command, WUMPUS_MOVE_PROBABILITY};
use hunt_world::{query, Cave, World};
use rand::Rng;
use tracing::{trace, warn};

/// Wumpus behaviour system run once at the end of every surviving round.
#[derive(Debug)]
pub struct WumpusBehaviour {
    cave: Cave,
    move_probability: f64,
}

impl Default for WumpusBehaviour {
    fn default() -> Self {
        Self::new(Cave::new())
    }
}

impl WumpusBehaviour {
    /// Creates a behaviour system for the provided cave.
    #[must_use]
    pub const fn new(cave: Cave) -> Self {
        Self {
            cave,
            move_probability: WUMPUS_MOVE_PROBABILITY,
        }
    }

    /// Overrides the chance that an awake wumpus relocates, clamped to `0.0..=1.0`.
    #[must_use]
    pub fn with_move_probability(mut self, probability: f64) -> Self {
        self.move_probability = if probability.is_nan() {
            0.0
        } else {
            probability.clamp(0.0, 1.0)
        };
        self
    }

    /// Inspects the world and queues the wumpus' commands for this round.
    ///
    /// A sleeping wumpus wakes when the player stands in its room or once any
    /// arrow has been fired. An awake wumpus then moves to a neighbouring room
    /// free of pits and bats with the configured probability, otherwise it
    /// stays put. A sleeping wumpus never moves.
    pub fn handle<R>(&mut self, world: &World, rng: &mut R, out: &mut Vec<Command>)
    where
        R: Rng + ?Sized,
    {
        let Some(wumpus) = query::wumpus_view(world) else {
            return;
        };

        let mut awake = wumpus.awake;
        if !awake {
            let bumped = query::player_room(world) == wumpus.room;
            if bumped || query::arrows_used(world) > 0 {
                out.push(Command::WakeWumpus { bumped });
                awake = true;
            }
        }

        if !awake {
            return;
        }

        if !rng.gen_bool(self.move_probability) {
            trace!(room = %wumpus.room, "wumpus stays put");
            return;
        }

        let static_hazards = query::static_hazard_rooms(world);
        match self
            .cave
            .safe_room_adjacent_to(wumpus.room, &static_hazards, rng)
        {
            Ok(to) => out.push(Command::RelocateWumpus { to }),
            Err(error) => warn!(%error, "wumpus has nowhere safe to go"),
        }
    }
}
