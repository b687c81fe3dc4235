//! Parsing of the answers typed at the game's prompts.

use hunt_core::{RoomId, MAX_ARROW_HOPS};

/// Action chosen at the start of a round.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Action {
    Shoot,
    Move,
    Quit,
}

/// Reasons a typed room list is sent back to the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum RoomListError {
    /// The list does not hold the announced number of rooms.
    WrongCount { expected: usize },
    /// An entry is not a room number.
    BadNumber,
}

/// Reads the first letter of the answer, ignoring case.
pub(crate) fn parse_action(line: &str) -> Option<Action> {
    match line.trim().chars().next()?.to_ascii_uppercase() {
        'S' => Some(Action::Shoot),
        'M' => Some(Action::Move),
        'Q' => Some(Action::Quit),
        _ => None,
    }
}

/// Reads a `Y` or `N` answer, ignoring case.
pub(crate) fn parse_yes_no(line: &str) -> Option<bool> {
    match line.trim().chars().next()?.to_ascii_uppercase() {
        'Y' => Some(true),
        'N' => Some(false),
        _ => None,
    }
}

/// Reads a single room number. Whether the room exists is left to the session.
pub(crate) fn parse_room(line: &str) -> Option<RoomId> {
    line.trim().parse::<u8>().ok().map(RoomId::new)
}

/// Reads how many rooms the arrow should fly through.
pub(crate) fn parse_room_count(line: &str) -> Option<usize> {
    line.trim()
        .parse::<usize>()
        .ok()
        .filter(|count| *count <= MAX_ARROW_HOPS)
}

/// Reads exactly `expected` whitespace separated room numbers.
pub(crate) fn parse_room_list(line: &str, expected: usize) -> Result<Vec<RoomId>, RoomListError> {
    let entries: Vec<&str> = line.split_whitespace().collect();
    if entries.len() != expected {
        return Err(RoomListError::WrongCount { expected });
    }

    entries
        .into_iter()
        .map(|entry| {
            entry
                .parse::<u8>()
                .map(RoomId::new)
                .map_err(|_| RoomListError::BadNumber)
        })
        .collect()
}
