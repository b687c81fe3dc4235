use hunt_core::{ArrowPathInvalid, Command, RoomId};
use hunt_system_arrow::ArrowTraversal;
use hunt_world::Cave;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn rooms(values: &[u8]) -> Vec<RoomId> {
    values.iter().copied().map(RoomId::new).collect()
}

#[test]
fn reachable_requests_are_followed_exactly() {
    let traversal = ArrowTraversal::new(Cave::new());
    let mut rng = ChaCha8Rng::seed_from_u64(1);

    let flight = traversal
        .plan(RoomId::new(1), &rooms(&[2, 3, 4, 5, 6]), &mut rng)
        .expect("valid request");

    assert_eq!(flight.rooms(), rooms(&[2, 3, 4, 5, 6]).as_slice());
    assert_eq!(flight.followed(), 5);
    assert_eq!(flight.wandered(), 0);
}

#[test]
fn arrow_wanders_after_first_unreachable_request() {
    let traversal = ArrowTraversal::new(Cave::new());

    for seed in 0..64 {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let flight = traversal
            .plan(RoomId::new(1), &rooms(&[2, 10, 14]), &mut rng)
            .expect("valid request");

        assert_eq!(flight.followed(), 2);
        assert_eq!(&flight.rooms()[..2], rooms(&[2, 10]).as_slice());
        let wandered = flight.rooms()[2];
        assert!(
            wandered == RoomId::new(9) || wandered == RoomId::new(11),
            "seed {seed}: room 10 leads to 9 or 11 without doubling back, got {wandered}",
        );
    }
}

#[test]
fn later_requests_are_ignored_once_the_arrow_wanders() {
    let traversal = ArrowTraversal::new(Cave::new());
    let mut rng = ChaCha8Rng::seed_from_u64(4);

    let flight = traversal
        .plan(RoomId::new(1), &rooms(&[14, 13, 12]), &mut rng)
        .expect("valid request");

    assert_eq!(flight.followed(), 0);
    assert_eq!(flight.rooms().len(), 3);
    assert!(Cave::new().is_adjacent(RoomId::new(1), flight.rooms()[0]));
}

#[test]
fn realized_flights_never_double_back() {
    let cave = Cave::new();
    let traversal = ArrowTraversal::new(cave);

    for seed in 0..500 {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let origin = RoomId::new((seed % 15) as u8 + 1);
        let flight = traversal
            .plan(origin, &rooms(&[20, 19, 18, 17, 16]), &mut rng)
            .expect("valid request");

        let mut path = vec![origin];
        path.extend_from_slice(flight.rooms());
        assert_eq!(path.len(), 6);
        for window in path.windows(2) {
            assert!(cave.is_adjacent(window[0], window[1]), "seed {seed}: {path:?}");
        }
        for window in path.windows(3) {
            assert_ne!(window[0], window[2], "seed {seed}: U-turn in {path:?}");
        }
    }
}

#[test]
fn crooked_requests_fire_nothing() {
    let mut traversal = ArrowTraversal::default();
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let mut commands = Vec::new();

    let result = traversal.handle(RoomId::new(1), &rooms(&[2, 1]), &mut rng, &mut commands);

    assert_eq!(
        result,
        Err(ArrowPathInvalid::TooCrooked {
            position: 2,
            room: RoomId::new(1),
        })
    );
    assert!(commands.is_empty());
}

#[test]
fn empty_request_fires_nothing() {
    let mut traversal = ArrowTraversal::default();
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let mut commands = Vec::new();

    let flight = traversal
        .handle(RoomId::new(1), &[], &mut rng, &mut commands)
        .expect("empty request is valid");

    assert!(flight.rooms().is_empty());
    assert!(commands.is_empty());
}

#[test]
fn planned_flight_is_queued_for_the_world() {
    let mut traversal = ArrowTraversal::default();
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let mut commands = Vec::new();

    let flight = traversal
        .handle(RoomId::new(1), &rooms(&[5, 6]), &mut rng, &mut commands)
        .expect("valid request");

    assert_eq!(
        commands,
        vec![Command::FireArrow {
            flight: flight.into_rooms(),
        }]
    );
}
