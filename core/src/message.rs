//! Canonical narration shared by every presentation adapter.

/// Prompt asking for the next action.
pub const ACTION_PROMPT: &str = "Shoot, Move or Quit(S - M - Q)? ";
/// Prompt asking for the destination of a move.
pub const MOVE_PROMPT: &str = "Where to? ";
/// Reply to a move into a room that is not connected.
pub const NOT_POSSIBLE: &str = "Not Possible - Where to? ";
/// Prompt offered once a game ends.
pub const PLAY_PROMPT: &str = "Play again? (Y-N)";
/// Prompt deciding between a reset and a fresh setup.
pub const SETUP_PROMPT: &str = "Same Setup? (Y-N)";
/// Prompt asking how far the arrow should fly.
pub const ROOM_COUNT_PROMPT: &str = "No. or rooms (0-5 and Enter)?";
/// Prompt asking for the arrow's path.
pub const ROOM_LIST_PROMPT: &str = "Enter a space separated list of rooms (e.g. 1 2 3 4 5)";
/// Reply to a path that names a room which does not exist.
pub const BAD_NUMBER: &str = "Bad number - try again:";
/// Reply to a room list of the wrong length, followed by the expected count.
pub const WRONG_ROOM_COUNT: &str = "Incorrect number of rooms entered. Should be:";
/// Reply to a zero-room shot.
pub const SUIT_YOURSELF: &str = "OK, suit yourself...";

/// Lead-in for the player's room number.
pub const YOU_ARE_IN_ROOM: &str = "You are in room";
/// Lead-in for the rooms reachable from the player's room.
pub const TUNNELS_LEAD_TO: &str = "Tunnels lead to";

/// Warning for an adjacent pit.
pub const PIT_WARNING: &str = "I feel a draft!";
/// Warning for an adjacent wumpus.
pub const WUMPUS_WARNING: &str = "I Smell a Wumpus.";
/// Warning for an adjacent bat colony.
pub const BAT_WARNING: &str = "Bats nearby!";

/// Narration for a bat snatch.
pub const BAT_SNATCH: &str = "Zap--Super Bat snatch! Elsewhereville for you!";
/// Narration for waking the wumpus by walking into it.
pub const WUMPUS_BUMP: &str = "...Oops! Bumped a wumpus!";

/// Headline for an empty quiver.
pub const OUT_OF_ARROWS: &str = "You've run out of arrows!";
/// Headline for a self-inflicted arrow wound.
pub const ARROW_GOT_YOU: &str = "Ouch! Arrow got you!";
/// Narration for an arrow that hit nothing.
pub const MISSED: &str = "Missed!";
/// Reply to a path that stays put or turns back.
pub const TOO_CROOKED: &str = "Arrows aren't that crooked - try another room!";

/// Headline for a fall into a pit.
pub const FELL_IN_PIT: &str = "YYYIIIIEEEE... fell in a pit!";
/// Headline for meeting the awake wumpus.
pub const WUMPUS_GOT_YOU: &str = "Tsk tsk tsk - wumpus got you!";
/// Closing line of every loss.
pub const LOSE: &str = "Ha ha ha - you lose!";
/// Announcement of a slain wumpus.
pub const WIN: &str = "Aha! You got the Wumpus!\nHee hee hee - the Wumpus'll getcha next time!!";
