use hunt_core::{Command, EndState, Event, HazardId, LossCause, RoomId};
use hunt_world::{self as world, query, Layout, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn room(value: u8) -> RoomId {
    RoomId::new(value)
}

fn layout() -> Layout {
    Layout {
        player: room(1),
        wumpus: room(14),
        pits: [room(3), room(19)],
        bats: [room(8), room(17)],
    }
}

fn move_to(world: &mut World, to: u8, rng: &mut ChaCha8Rng) -> Vec<Event> {
    let mut events = Vec::new();
    world::apply(world, Command::MovePlayer { to: room(to) }, rng, &mut events);
    events
}

fn end_state(events: &[Event]) -> EndState {
    events
        .iter()
        .find_map(|event| match event {
            Event::GameEnded { end_state } => Some(*end_state),
            _ => None,
        })
        .unwrap_or_default()
}

#[test]
fn walking_into_a_pit_ends_the_game() {
    let mut world = World::with_layout(layout()).expect("valid layout");
    let mut rng = ChaCha8Rng::seed_from_u64(1);

    let _ = move_to(&mut world, 2, &mut rng);
    let events = move_to(&mut world, 3, &mut rng);

    assert_eq!(
        events,
        vec![
            Event::PlayerMoved {
                from: room(2),
                to: room(3),
            },
            Event::HazardDiscovered {
                hazard: HazardId::PIT_A,
                room: room(3),
            },
            Event::GameEnded {
                end_state: EndState::lost(LossCause::Pit),
            },
        ]
    );
    assert!(query::hazard_view(&world)[1].discovered);
}

#[test]
fn safe_move_settles_without_verdict() {
    let mut world = World::with_layout(layout()).expect("valid layout");
    let mut rng = ChaCha8Rng::seed_from_u64(1);

    let events = move_to(&mut world, 5, &mut rng);

    assert_eq!(
        events,
        vec![Event::PlayerMoved {
            from: room(1),
            to: room(5),
        }]
    );
    assert_eq!(query::player_room(&world), room(5));
}

#[test]
fn sleeping_wumpus_lets_the_player_in() {
    let mut world = World::with_layout(Layout {
        player: room(1),
        wumpus: room(2),
        pits: [room(3), room(19)],
        bats: [room(8), room(17)],
    })
    .expect("valid layout");
    let mut rng = ChaCha8Rng::seed_from_u64(1);

    let events = move_to(&mut world, 2, &mut rng);

    assert!(!end_state(&events).is_game_over());
    assert_eq!(query::player_room(&world), room(2));
}

#[test]
fn awake_wumpus_eats_the_player() {
    let mut world = World::with_layout(Layout {
        player: room(1),
        wumpus: room(2),
        pits: [room(3), room(19)],
        bats: [room(8), room(17)],
    })
    .expect("valid layout");
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let mut events = Vec::new();
    world::apply(
        &mut world,
        Command::WakeWumpus { bumped: false },
        &mut rng,
        &mut events,
    );
    assert_eq!(events, vec![Event::WumpusAwoke { bumped: false }]);

    let events = move_to(&mut world, 2, &mut rng);

    assert_eq!(end_state(&events), EndState::lost(LossCause::Wumpus));
    assert!(events.contains(&Event::HazardDiscovered {
        hazard: HazardId::WUMPUS,
        room: room(2),
    }));
}

#[test]
fn bat_snatches_resolve_until_the_player_settles() {
    let static_hazards = [room(3), room(19), room(8), room(17)];
    let mut chains = 0;
    let mut pit_deaths = 0;

    for seed in 0..200 {
        let mut world = World::with_layout(layout()).expect("valid layout");
        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        let events = move_to(&mut world, 8, &mut rng);

        let snatches: Vec<&Event> = events
            .iter()
            .filter(|event| matches!(event, Event::PlayerSnatched { .. }))
            .collect();
        assert!(!snatches.is_empty(), "seed {seed}: bats in room 8 must snatch");

        let final_room = query::player_room(&world);
        let verdict = end_state(&events);
        if snatches.len() > 1 {
            chains += 1;
        }
        match verdict.outcome() {
            Some(_) => {
                assert_eq!(verdict, EndState::lost(LossCause::Pit));
                pit_deaths += 1;
            }
            None => assert!(
                !static_hazards.contains(&final_room),
                "seed {seed}: settled in hazard room {final_room}",
            ),
        }

        if let Some(Event::PlayerSnatched { to, .. }) = snatches.last() {
            assert_eq!(*to, final_room, "seed {seed}: last drop is the final room");
        }
    }

    assert!(chains > 0, "no drop ever landed in a bat room");
    assert!(pit_deaths > 0, "no drop ever landed in a pit");
}

#[test]
fn bat_drops_cover_the_whole_cave() {
    let mut seen = [false; 20];

    for seed in 0..2_000 {
        let mut world = World::with_layout(layout()).expect("valid layout");
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let events = move_to(&mut world, 8, &mut rng);

        if let Some(Event::PlayerSnatched { to, .. }) = events
            .iter()
            .find(|event| matches!(event, Event::PlayerSnatched { .. }))
        {
            if let Some(index) = to.index() {
                seen[index] = true;
            }
        }
    }

    assert!(seen.iter().all(|hit| *hit), "every room is a possible drop: {seen:?}");
}

#[test]
fn reset_restores_the_initial_setup() {
    let mut world = World::with_layout(layout()).expect("valid layout");
    let mut rng = ChaCha8Rng::seed_from_u64(9);
    let mut events = Vec::new();

    world::apply(&mut world, Command::WakeWumpus { bumped: true }, &mut rng, &mut events);
    world::apply(&mut world, Command::RelocateWumpus { to: room(13) }, &mut rng, &mut events);
    world::apply(
        &mut world,
        Command::FireArrow {
            flight: vec![room(5)],
        },
        &mut rng,
        &mut events,
    );
    let _ = move_to(&mut world, 2, &mut rng);

    events.clear();
    world::apply(&mut world, Command::Reset, &mut rng, &mut events);

    assert_eq!(events, vec![Event::WorldReset]);
    assert_eq!(query::player_room(&world), room(1));
    assert_eq!(query::arrows_used(&world), 0);
    let wumpus = query::wumpus_view(&world).expect("wumpus present");
    assert_eq!(wumpus.room, room(14));
    assert!(!wumpus.awake);
    assert!(query::hazard_view(&world).iter().all(|hazard| !hazard.discovered));
}

#[test]
fn random_setup_places_every_entity_apart() {
    for seed in 0..100 {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let world = World::new(&mut rng).expect("twenty rooms suffice");

        let mut rooms: Vec<RoomId> = query::hazard_view(&world)
            .into_iter()
            .map(|hazard| hazard.room)
            .collect();
        rooms.push(query::player_room(&world));
        rooms.sort();
        rooms.dedup();
        assert_eq!(rooms.len(), 6, "seed {seed}: entities share a room");
    }
}
