//! Hazards lurking in the cave and the rules they enforce on the player.

use hunt_core::{EndState, HazardKind, LossCause, RoomId};
use rand::Rng;

use crate::{cave::Cave, player::Player};

/// The wumpus: harmless while asleep, deadly and restless once awake.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Wumpus {
    room: RoomId,
    initial_room: RoomId,
    awake: bool,
    discovered: bool,
}

impl Wumpus {
    pub(crate) const fn new(room: RoomId) -> Self {
        Self {
            room,
            initial_room: room,
            awake: false,
            discovered: false,
        }
    }

    /// Reports whether the wumpus has been woken.
    #[must_use]
    pub const fn is_awake(&self) -> bool {
        self.awake
    }

    /// Wakes the wumpus, returning `true` when it was asleep.
    pub(crate) fn wake(&mut self) -> bool {
        let was_asleep = !self.awake;
        self.awake = true;
        was_asleep
    }

    pub(crate) fn relocate(&mut self, room: RoomId) {
        self.room = room;
    }

    pub(crate) fn discover(&mut self) {
        self.discovered = true;
    }

    /// The player dies only by sharing a room with the awake wumpus.
    pub(crate) fn determine_end_state(&mut self, player_room: RoomId) -> EndState {
        if self.awake && player_room == self.room {
            self.discovered = true;
            EndState::lost(LossCause::Wumpus)
        } else {
            EndState::ongoing()
        }
    }
}

/// A bottomless pit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BottomlessPit {
    room: RoomId,
    discovered: bool,
}

impl BottomlessPit {
    pub(crate) const fn new(room: RoomId) -> Self {
        Self {
            room,
            discovered: false,
        }
    }

    pub(crate) fn determine_end_state(&mut self, player_room: RoomId) -> EndState {
        if player_room == self.room {
            self.discovered = true;
            EndState::lost(LossCause::Pit)
        } else {
            EndState::ongoing()
        }
    }
}

/// A colony of super bats.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SuperBats {
    room: RoomId,
    discovered: bool,
}

impl SuperBats {
    pub(crate) const fn new(room: RoomId) -> Self {
        Self {
            room,
            discovered: false,
        }
    }

    /// Carries a player standing in the colony's room to any room of the cave.
    ///
    /// The drop room is drawn from all twenty rooms, hazards included.
    /// Returns the drop room, or `None` when the player is elsewhere.
    pub(crate) fn try_snatch<R>(&self, player: &mut Player, cave: &Cave, rng: &mut R) -> Option<RoomId>
    where
        R: Rng + ?Sized,
    {
        if player.room() != self.room {
            return None;
        }

        let destination = cave.any_room(rng);
        player.move_to(destination);
        Some(destination)
    }
}

/// Closed set of hazards placed in the cave.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Hazard {
    /// The wumpus.
    Wumpus(Wumpus),
    /// A bottomless pit.
    Pit(BottomlessPit),
    /// A colony of super bats.
    Bats(SuperBats),
}

impl Hazard {
    /// Kind of hazard.
    #[must_use]
    pub const fn kind(&self) -> HazardKind {
        match self {
            Self::Wumpus(_) => HazardKind::Wumpus,
            Self::Pit(_) => HazardKind::Pit,
            Self::Bats(_) => HazardKind::Bats,
        }
    }

    /// Room the hazard currently occupies.
    #[must_use]
    pub const fn room(&self) -> RoomId {
        match self {
            Self::Wumpus(wumpus) => wumpus.room,
            Self::Pit(pit) => pit.room,
            Self::Bats(bats) => bats.room,
        }
    }

    /// Reports whether the player has learned where the hazard is.
    #[must_use]
    pub const fn is_discovered(&self) -> bool {
        match self {
            Self::Wumpus(wumpus) => wumpus.discovered,
            Self::Pit(pit) => pit.discovered,
            Self::Bats(bats) => bats.discovered,
        }
    }

    /// Judges a player standing in `player_room`.
    ///
    /// Bats never end the game and always answer `None`; deadly hazards
    /// answer with their verdict, marking themselves discovered when they
    /// trigger.
    pub(crate) fn determine_end_state(&mut self, player_room: RoomId) -> Option<EndState> {
        match self {
            Self::Wumpus(wumpus) => Some(wumpus.determine_end_state(player_room)),
            Self::Pit(pit) => Some(pit.determine_end_state(player_room)),
            Self::Bats(_) => None,
        }
    }

    /// Lets a bat colony snatch the player; other hazards never do.
    pub(crate) fn try_snatch<R>(&self, player: &mut Player, cave: &Cave, rng: &mut R) -> Option<RoomId>
    where
        R: Rng + ?Sized,
    {
        match self {
            Self::Bats(bats) => bats.try_snatch(player, cave, rng),
            Self::Wumpus(_) | Self::Pit(_) => None,
        }
    }

    pub(crate) fn reset(&mut self) {
        match self {
            Self::Wumpus(wumpus) => *wumpus = Wumpus::new(wumpus.initial_room),
            Self::Pit(pit) => pit.discovered = false,
            Self::Bats(bats) => bats.discovered = false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn room(value: u8) -> RoomId {
        RoomId::new(value)
    }

    #[test]
    fn sleeping_wumpus_spares_the_player() {
        let mut wumpus = Wumpus::new(room(7));
        assert_eq!(wumpus.determine_end_state(room(7)), EndState::ongoing());
        assert!(!wumpus.discovered);
    }

    #[test]
    fn awake_wumpus_eats_the_player() {
        let mut wumpus = Wumpus::new(room(7));
        assert!(wumpus.wake());
        assert!(!wumpus.wake(), "second wake reports no transition");

        assert_eq!(wumpus.determine_end_state(room(6)), EndState::ongoing());
        assert_eq!(
            wumpus.determine_end_state(room(7)),
            EndState::lost(LossCause::Wumpus)
        );
        assert!(wumpus.discovered);
    }

    #[test]
    fn pit_swallows_the_player() {
        let mut pit = BottomlessPit::new(room(4));
        assert_eq!(pit.determine_end_state(room(3)), EndState::ongoing());
        assert!(!pit.discovered);
        assert_eq!(pit.determine_end_state(room(4)), EndState::lost(LossCause::Pit));
        assert!(pit.discovered);
    }

    #[test]
    fn bats_ignore_players_elsewhere() {
        let bats = SuperBats::new(room(9));
        let mut player = Player::new(room(8));
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        assert_eq!(bats.try_snatch(&mut player, &Cave::new(), &mut rng), None);
        assert_eq!(player.room(), room(8));
    }

    #[test]
    fn bats_drop_the_player_somewhere_in_the_cave() {
        let bats = SuperBats::new(room(9));
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        for _ in 0..32 {
            let mut player = Player::new(room(9));
            let destination = bats
                .try_snatch(&mut player, &Cave::new(), &mut rng)
                .expect("player shares the bats' room");
            assert!(destination.is_valid());
            assert_eq!(player.room(), destination);
        }
    }

    #[test]
    fn bats_are_never_deadly() {
        let mut hazard = Hazard::Bats(SuperBats::new(room(2)));
        assert_eq!(hazard.determine_end_state(room(2)), None);
    }

    #[test]
    fn reset_puts_the_wumpus_back_to_sleep() {
        let mut hazard = Hazard::Wumpus(Wumpus::new(room(12)));
        if let Hazard::Wumpus(wumpus) = &mut hazard {
            let _ = wumpus.wake();
            wumpus.relocate(room(11));
            wumpus.discover();
        }

        hazard.reset();

        assert_eq!(hazard.room(), room(12));
        assert!(!hazard.is_discovered());
        assert_eq!(hazard, Hazard::Wumpus(Wumpus::new(room(12))));
    }
}
