#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Turn controller that drives one Hunt the Wumpus session.
//!
//! The controller owns the authoritative [`World`] together with the random
//! number generator and the pure systems. Each public action resolves a whole
//! round synchronously: the player's move or shot is applied, and unless the
//! game ended, the wumpus takes its turn before control returns to the caller.

use hunt_core::{
    ArrowPathInvalid, CaveError, Command, EndState, Event, InvalidMove, RoomId, SetupExhausted,
    Warning, TUNNELS_PER_ROOM,
};
use hunt_system_arrow::ArrowTraversal;
use hunt_system_wumpus::WumpusBehaviour;
use hunt_world::{
    query::{self, HazardSnapshot},
    Layout, LayoutError, World,
};
use rand::Rng;
use thiserror::Error;
use tracing::debug;

/// Runtime configuration chosen once when the process starts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Config {
    /// Reveals every hazard to the presentation layer without changing the rules.
    pub cheat_mode: bool,
}

/// Phase of the session's state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnState {
    /// The session waits for the player's next move, shot or quit.
    AwaitingAction,
    /// The game ended with the carried verdict.
    GameOver(EndState),
    /// The player walked away from the game.
    Quit,
}

/// Result of a resolved move.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveOutcome {
    /// Verdict of the round.
    pub end_state: EndState,
    /// Warnings sensed from the room the player ended up in.
    pub warnings: Vec<Warning>,
    /// Everything that happened during the round, in order.
    pub events: Vec<Event>,
}

/// Result of a resolved shot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShotOutcome {
    /// Verdict of the round.
    pub end_state: EndState,
    /// Rooms the arrow actually flew through.
    pub realized_path: Vec<RoomId>,
    /// Arrows left in the quiver.
    pub arrows_remaining: u8,
    /// Everything that happened during the round, in order.
    pub events: Vec<Event>,
}

/// Summary handed back when the player quits. Quitting is never announced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TerminalOutcome {
    /// Room the player stood in when leaving.
    pub room: RoomId,
    /// Arrows left in the quiver.
    pub arrows_remaining: u8,
}

/// Where the player stands, for the location report at the start of a round.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Status {
    /// Room the player occupies.
    pub room: RoomId,
    /// Rooms reachable through the tunnels.
    pub neighbors: [RoomId; TUNNELS_PER_ROOM],
    /// Arrows left in the quiver.
    pub arrows: u8,
}

/// Reasons an action may be refused. The session state is left untouched.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum TurnError {
    /// The requested move is not possible.
    #[error(transparent)]
    InvalidMove(#[from] InvalidMove),
    /// The requested arrow path is not acceptable.
    #[error(transparent)]
    ArrowPathInvalid(#[from] ArrowPathInvalid),
    /// The game is over or the player quit; reset or set up a new cave first.
    #[error("no action is expected in state {0:?}")]
    NotAwaitingAction(TurnState),
}

/// One game of Hunt the Wumpus, from setup to the final verdict.
#[derive(Debug)]
pub struct Session<R> {
    config: Config,
    world: World,
    rng: R,
    arrows: ArrowTraversal,
    wumpus: WumpusBehaviour,
    state: TurnState,
}

impl<R> Session<R>
where
    R: Rng,
{
    /// Sets up a random cave and waits for the first action.
    pub fn initialize(config: Config, mut rng: R) -> Result<Self, SetupExhausted> {
        let world = World::new(&mut rng)?;
        Ok(Self::from_world(config, world, rng))
    }

    /// Starts a session in a hand-placed cave.
    pub fn with_layout(config: Config, layout: Layout, rng: R) -> Result<Self, LayoutError> {
        let world = World::with_layout(layout)?;
        Ok(Self::from_world(config, world, rng))
    }

    fn from_world(config: Config, world: World, rng: R) -> Self {
        let cave = *query::cave(&world);
        Self {
            config,
            world,
            rng,
            arrows: ArrowTraversal::new(cave),
            wumpus: WumpusBehaviour::new(cave),
            state: TurnState::AwaitingAction,
        }
    }

    /// Replaces the wumpus system, e.g. to pin its move probability in tests.
    #[must_use]
    pub fn with_wumpus_behaviour(mut self, wumpus: WumpusBehaviour) -> Self {
        self.wumpus = wumpus;
        self
    }

    /// Reports whether hazards are revealed regardless of discovery.
    #[must_use]
    pub const fn is_cheat_mode(&self) -> bool {
        self.config.cheat_mode
    }

    /// Current phase of the state machine.
    #[must_use]
    pub const fn state(&self) -> TurnState {
        self.state
    }

    /// Read-only access to the world for presentation.
    #[must_use]
    pub const fn world(&self) -> &World {
        &self.world
    }

    /// Warnings sensed from the player's room, one per adjacent hazard.
    #[must_use]
    pub fn warnings(&self) -> Vec<Warning> {
        query::warnings(&self.world)
    }

    /// Location report for the start of a round.
    pub fn status(&self) -> Result<Status, CaveError> {
        let room = query::player_room(&self.world);
        Ok(Status {
            room,
            neighbors: query::cave(&self.world).adjacent_rooms(room)?,
            arrows: query::arrows_remaining(&self.world),
        })
    }

    /// Hazards the presentation layer may show.
    ///
    /// In cheat mode every hazard is listed; otherwise only the ones the
    /// player has discovered.
    #[must_use]
    pub fn visible_hazards(&self) -> Vec<HazardSnapshot> {
        query::hazard_view(&self.world)
            .into_iter()
            .filter(|hazard| self.config.cheat_mode || hazard.discovered)
            .collect()
    }

    /// Walks the player into an adjacent room and resolves the round.
    pub fn move_to(&mut self, to: RoomId) -> Result<MoveOutcome, TurnError> {
        self.ensure_awaiting_action()?;

        let mut events = Vec::new();
        hunt_world::apply(
            &mut self.world,
            Command::MovePlayer { to },
            &mut self.rng,
            &mut events,
        );
        let rejection = events.iter().find_map(|event| match event {
            Event::MoveRejected { reason, .. } => Some(*reason),
            _ => None,
        });
        if let Some(reason) = rejection {
            return Err(TurnError::InvalidMove(reason));
        }

        let end_state = self.finish_round(&mut events);
        Ok(MoveOutcome {
            end_state,
            warnings: self.warnings(),
            events,
        })
    }

    /// Fires a crooked arrow along `requested` and resolves the round.
    ///
    /// An empty request is the player changing their mind: no arrow is
    /// consumed, the wumpus does not act and the round ends uneventfully.
    pub fn shoot(&mut self, requested: &[RoomId]) -> Result<ShotOutcome, TurnError> {
        self.ensure_awaiting_action()?;

        let origin = query::player_room(&self.world);
        let mut commands = Vec::new();
        let flight = self
            .arrows
            .handle(origin, requested, &mut self.rng, &mut commands)?;

        let mut events = Vec::new();
        if commands.is_empty() {
            return Ok(ShotOutcome {
                end_state: EndState::ongoing(),
                realized_path: Vec::new(),
                arrows_remaining: query::arrows_remaining(&self.world),
                events,
            });
        }

        for command in commands {
            hunt_world::apply(&mut self.world, command, &mut self.rng, &mut events);
        }

        let end_state = self.finish_round(&mut events);
        Ok(ShotOutcome {
            end_state,
            realized_path: flight.into_rooms(),
            arrows_remaining: query::arrows_remaining(&self.world),
            events,
        })
    }

    /// Leaves the game without a verdict.
    ///
    /// Like any other action, quitting is only accepted while the session
    /// awaits one; a finished game keeps its verdict.
    pub fn quit(&mut self) -> Result<TerminalOutcome, TurnError> {
        self.ensure_awaiting_action()?;
        debug!("player quit");
        self.state = TurnState::Quit;
        Ok(TerminalOutcome {
            room: query::player_room(&self.world),
            arrows_remaining: query::arrows_remaining(&self.world),
        })
    }

    /// Replays the same cave: every entity returns to its initial state.
    pub fn reset(&mut self) -> Vec<Event> {
        let mut events = Vec::new();
        hunt_world::apply(&mut self.world, Command::Reset, &mut self.rng, &mut events);
        self.state = TurnState::AwaitingAction;
        events
    }

    /// Discards the cave and sets up a fresh one.
    pub fn new_setup(&mut self) -> Result<(), SetupExhausted> {
        self.world = World::new(&mut self.rng)?;
        self.state = TurnState::AwaitingAction;
        debug!("new cave set up");
        Ok(())
    }

    fn ensure_awaiting_action(&self) -> Result<(), TurnError> {
        match self.state {
            TurnState::AwaitingAction => Ok(()),
            state => Err(TurnError::NotAwaitingAction(state)),
        }
    }

    /// Records a terminal verdict or lets the wumpus take its turn.
    fn finish_round(&mut self, events: &mut Vec<Event>) -> EndState {
        let end_state = verdict(events);
        if end_state.is_game_over() {
            debug!(?end_state, "game over");
            self.state = TurnState::GameOver(end_state);
            return end_state;
        }

        let mut commands = Vec::new();
        self.wumpus.handle(&self.world, &mut self.rng, &mut commands);
        for command in commands {
            hunt_world::apply(&mut self.world, command, &mut self.rng, events);
        }
        end_state
    }
}

fn verdict(events: &[Event]) -> EndState {
    events
        .iter()
        .find_map(|event| match event {
            Event::GameEnded { end_state } => Some(*end_state),
            _ => None,
        })
        .unwrap_or_default()
}
