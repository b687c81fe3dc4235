//! Line-oriented game loop over any reader and writer.

use std::{
    fmt::Display,
    io::{BufRead, Write},
};

use anyhow::{Context, Result};
use hunt_core::{message, ArrowPathInvalid, Event, HazardId, RoomId};
use hunt_system_turn::{Session, TurnError, TurnState};
use hunt_world::query;
use rand::Rng;
use tracing::{debug, trace};

use crate::prompt::{self, Action, RoomListError};

/// Terminal wrapper pairing the player's input with the game's output.
pub(crate) struct Console<I, O> {
    input: I,
    output: O,
}

impl<I, O> Console<I, O>
where
    I: BufRead,
    O: Write,
{
    pub(crate) fn new(input: I, output: O) -> Self {
        Self { input, output }
    }

    fn say(&mut self, text: impl Display) -> Result<()> {
        writeln!(self.output, "{text}").context("failed to write to the terminal")
    }

    /// Shows `prompt` and reads one line, or `None` once input is exhausted.
    ///
    /// Prompts ending in a space keep the cursor on the prompt's line.
    fn ask(&mut self, prompt: &str) -> Result<Option<String>> {
        let written = if prompt.ends_with(' ') {
            write!(self.output, "{prompt}")
        } else {
            writeln!(self.output, "{prompt}")
        };
        written.context("failed to write to the terminal")?;
        self.output
            .flush()
            .context("failed to flush the terminal")?;

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("failed to read from the terminal")?;
        Ok((read > 0).then_some(line))
    }

    #[cfg(test)]
    fn into_output(self) -> O {
        self.output
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Ending {
    GameOver,
    Quit,
    InputClosed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    InputClosed,
}

/// Plays games until the player quits, declines another one, or input ends.
pub(crate) fn run<R, I, O>(session: &mut Session<R>, console: &mut Console<I, O>) -> Result<()>
where
    R: Rng,
    I: BufRead,
    O: Write,
{
    loop {
        reveal_hazards(session, console)?;
        let ending = play_game(session, console)?;
        debug!(?ending, "game finished");
        if ending != Ending::GameOver {
            return Ok(());
        }

        if ask_yes_no(console, message::PLAY_PROMPT)? != Some(true) {
            return Ok(());
        }
        match ask_yes_no(console, message::SETUP_PROMPT)? {
            Some(true) => {
                let _ = session.reset();
            }
            Some(false) => session
                .new_setup()
                .context("failed to set up a new cave")?,
            None => return Ok(()),
        }
    }
}

fn play_game<R, I, O>(session: &mut Session<R>, console: &mut Console<I, O>) -> Result<Ending>
where
    R: Rng,
    I: BufRead,
    O: Write,
{
    loop {
        report_location(session, console)?;

        let Some(action) = ask_action(console)? else {
            return Ok(Ending::InputClosed);
        };
        let flow = match action {
            Action::Quit => {
                let outcome = session.quit()?;
                debug!(?outcome, "player left the cave");
                return Ok(Ending::Quit);
            }
            Action::Move => move_round(session, console)?,
            Action::Shoot => shoot_round(session, console)?,
        };
        if flow == Flow::InputClosed {
            return Ok(Ending::InputClosed);
        }

        if let TurnState::GameOver(end_state) = session.state() {
            if let Some(announcement) = end_state.message() {
                console.say(announcement)?;
            }
            return Ok(Ending::GameOver);
        }
    }
}

fn reveal_hazards<R, I, O>(session: &Session<R>, console: &mut Console<I, O>) -> Result<()>
where
    R: Rng,
    I: BufRead,
    O: Write,
{
    if !session.is_cheat_mode() {
        return Ok(());
    }
    for hazard in session.visible_hazards() {
        console.say(format_args!("{} in room {}", hazard.kind.label(), hazard.room))?;
    }
    Ok(())
}

fn report_location<R, I, O>(session: &Session<R>, console: &mut Console<I, O>) -> Result<()>
where
    R: Rng,
    I: BufRead,
    O: Write,
{
    for warning in session.warnings() {
        console.say(warning.message())?;
    }

    let status = session.status().context("player stands outside the cave")?;
    let [first, second, third] = status.neighbors;
    console.say(format_args!("{} {}", message::YOU_ARE_IN_ROOM, status.room))?;
    console.say(format_args!(
        "{} {first} {second} {third}",
        message::TUNNELS_LEAD_TO
    ))
}

fn ask_action<I, O>(console: &mut Console<I, O>) -> Result<Option<Action>>
where
    I: BufRead,
    O: Write,
{
    loop {
        let Some(line) = console.ask(message::ACTION_PROMPT)? else {
            return Ok(None);
        };
        if let Some(action) = prompt::parse_action(&line) {
            return Ok(Some(action));
        }
    }
}

fn ask_yes_no<I, O>(console: &mut Console<I, O>, question: &str) -> Result<Option<bool>>
where
    I: BufRead,
    O: Write,
{
    loop {
        let Some(line) = console.ask(question)? else {
            return Ok(None);
        };
        if let Some(answer) = prompt::parse_yes_no(&line) {
            return Ok(Some(answer));
        }
    }
}

fn move_round<R, I, O>(session: &mut Session<R>, console: &mut Console<I, O>) -> Result<Flow>
where
    R: Rng,
    I: BufRead,
    O: Write,
{
    let mut question = message::MOVE_PROMPT;
    loop {
        let Some(line) = console.ask(question)? else {
            return Ok(Flow::InputClosed);
        };
        question = message::NOT_POSSIBLE;

        let Some(room) = prompt::parse_room(&line) else {
            continue;
        };
        match session.move_to(room) {
            Ok(outcome) => {
                narrate(session, &outcome.events, console)?;
                return Ok(Flow::Continue);
            }
            Err(TurnError::InvalidMove(error)) => debug!(%error, "move refused"),
            Err(error) => return Err(error.into()),
        }
    }
}

fn shoot_round<R, I, O>(session: &mut Session<R>, console: &mut Console<I, O>) -> Result<Flow>
where
    R: Rng,
    I: BufRead,
    O: Write,
{
    let count = loop {
        let Some(line) = console.ask(message::ROOM_COUNT_PROMPT)? else {
            return Ok(Flow::InputClosed);
        };
        if let Some(count) = prompt::parse_room_count(&line) {
            break count;
        }
    };

    if count == 0 {
        let _ = session.shoot(&[])?;
        console.say(message::SUIT_YOURSELF)?;
        return Ok(Flow::Continue);
    }

    loop {
        let Some(line) = console.ask(message::ROOM_LIST_PROMPT)? else {
            return Ok(Flow::InputClosed);
        };
        let rooms = match prompt::parse_room_list(&line, count) {
            Ok(rooms) => rooms,
            Err(RoomListError::WrongCount { expected }) => {
                console.say(format_args!("{} {expected}", message::WRONG_ROOM_COUNT))?;
                continue;
            }
            Err(RoomListError::BadNumber) => {
                console.say(message::BAD_NUMBER)?;
                continue;
            }
        };

        match session.shoot(&rooms) {
            Ok(outcome) => {
                narrate(session, &outcome.events, console)?;
                return Ok(Flow::Continue);
            }
            Err(TurnError::ArrowPathInvalid(ArrowPathInvalid::TooCrooked { .. })) => {
                console.say(message::TOO_CROOKED)?;
            }
            Err(TurnError::ArrowPathInvalid(error)) => {
                debug!(%error, "arrow path refused");
                console.say(message::BAD_NUMBER)?;
            }
            Err(error) => return Err(error.into()),
        }
    }
}

fn narrate<R, I, O>(session: &Session<R>, events: &[Event], console: &mut Console<I, O>) -> Result<()>
where
    R: Rng,
    I: BufRead,
    O: Write,
{
    let cheat_mode = session.is_cheat_mode();
    for event in events {
        trace!(?event, "narrating");
        match event {
            Event::PlayerSnatched { .. } => console.say(message::BAT_SNATCH)?,
            Event::WumpusAwoke { bumped: true } => console.say(message::WUMPUS_BUMP)?,
            Event::ArrowFired { flight, .. } => {
                let shooter = query::player_room(session.world());
                for room in echoed_flight(flight, shooter, wumpus_struck(events)) {
                    console.say(room)?;
                }
            }
            Event::ArrowMissed => console.say(message::MISSED)?,
            Event::WumpusMoved { to, .. } if cheat_mode => {
                console.say(format_args!("Wumpus moved to {to}"))?;
            }
            _ => {}
        }
    }
    Ok(())
}

/// Room the arrow killed the wumpus in, if it did.
fn wumpus_struck(events: &[Event]) -> Option<RoomId> {
    events.iter().find_map(|event| match event {
        Event::HazardDiscovered { hazard, room } if *hazard == HazardId::WUMPUS => Some(*room),
        _ => None,
    })
}

/// Leading part of the flight the arrow travels before it hits someone.
fn echoed_flight(flight: &[RoomId], shooter: RoomId, struck: Option<RoomId>) -> &[RoomId] {
    let end = flight
        .iter()
        .position(|room| *room == shooter || Some(*room) == struck)
        .map_or(flight.len(), |hit| hit + 1);
    &flight[..end]
}
