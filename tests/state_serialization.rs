use proptest::prelude::*;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use schiffe_versenken::{
    random_target, BoardState, Coord, Manifest, Match, MatchError, MatchState, Orientation,
    Phase, ShotError, Side,
};

#[test]
fn test_board_state_bincode_roundtrip() {
    let mut rng = SmallRng::seed_from_u64(11);
    let mut game = Match::new(10, Manifest::classic());
    game.place_fleet_randomly(Side::PlayerOne, &mut rng).unwrap();
    game.place_fleet_randomly(Side::PlayerTwo, &mut rng).unwrap();
    game.strike(Side::PlayerOne, Coord::new(4, 4)).unwrap();

    let state = BoardState::from(game.board(Side::PlayerTwo));
    let bytes = bincode::serialize(&state).unwrap();
    let decoded: BoardState = bincode::deserialize(&bytes).unwrap();
    assert_eq!(state, decoded);
}

#[test]
fn test_match_state_json_roundtrip_midgame() {
    let mut game = Match::new(10, Manifest::from_lengths(&[2]));
    game.place_ship(Side::PlayerOne, Coord::new(0, 0), Orientation::Horizontal)
        .unwrap();
    game.place_ship(Side::PlayerTwo, Coord::new(3, 3), Orientation::Vertical)
        .unwrap();
    game.strike(Side::PlayerOne, Coord::new(3, 3)).unwrap();

    let json = serde_json::to_string(&game.state()).unwrap();
    let decoded: MatchState = serde_json::from_str(&json).unwrap();
    let mut restored = Match::from_state(decoded);

    assert_eq!(
        restored.phase(),
        Phase::Combat {
            turn: Side::PlayerTwo
        }
    );
    // struck cells stay struck across the round trip
    assert_eq!(
        restored
            .strike(Side::PlayerTwo, Coord::new(0, 0))
            .map(|r| r.outcome)
            .unwrap(),
        schiffe_versenken::ShotOutcome::Hit
    );
    assert_eq!(
        restored.strike(Side::PlayerOne, Coord::new(3, 3)).unwrap_err(),
        MatchError::Shot(ShotError::AlreadyStruck)
    );
}

#[test]
fn test_restored_setup_match_keeps_planner_cursor() {
    let mut game = Match::new(10, Manifest::from_lengths(&[3, 2]));
    game.place_ship(Side::PlayerOne, Coord::new(0, 0), Orientation::Horizontal)
        .unwrap();

    let bytes = bincode::serialize(&game.state()).unwrap();
    let mut restored = Match::from_state(bincode::deserialize(&bytes).unwrap());

    assert_eq!(restored.phase(), Phase::Setup);
    assert!(!restored.is_fleet_placed(Side::PlayerOne));
    // next interactive placement continues with the length-2 ship
    restored
        .place_ship(Side::PlayerOne, Coord::new(5, 0), Orientation::Horizontal)
        .unwrap();
    assert!(restored.is_fleet_placed(Side::PlayerOne));
    assert_eq!(
        restored.board(Side::PlayerOne).occupied().count_ones(),
        5
    );
}

#[test]
fn test_finished_match_stays_finished_after_restore() {
    let mut game = Match::new(10, Manifest::from_lengths(&[2]));
    game.place_ship(Side::PlayerOne, Coord::new(0, 0), Orientation::Horizontal)
        .unwrap();
    game.place_ship(Side::PlayerTwo, Coord::new(0, 0), Orientation::Horizontal)
        .unwrap();
    game.strike(Side::PlayerOne, Coord::new(0, 0)).unwrap();
    game.strike(Side::PlayerTwo, Coord::new(5, 5)).unwrap();
    let report = game.strike(Side::PlayerOne, Coord::new(0, 1)).unwrap();
    assert_eq!(report.winner, Some(Side::PlayerOne));

    let bytes = bincode::serialize(&game.state()).unwrap();
    let mut restored = Match::from_state(bincode::deserialize(&bytes).unwrap());
    assert_eq!(restored.winner(), Some(Side::PlayerOne));
    assert_eq!(
        restored.strike(Side::PlayerTwo, Coord::new(9, 9)).unwrap_err(),
        MatchError::MatchAlreadyFinished
    );
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn match_state_roundtrip(seed in any::<u64>(), shots in 0usize..60) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut game = Match::new(10, Manifest::classic());
        game.place_fleet_randomly(Side::PlayerOne, &mut rng).unwrap();
        game.place_fleet_randomly(Side::PlayerTwo, &mut rng).unwrap();

        for _ in 0..shots {
            let side = match game.phase() {
                Phase::Combat { turn } => turn,
                _ => break,
            };
            let target = match random_target(&game.target_view(side), &mut rng) {
                Some(t) => t,
                None => break,
            };
            game.strike(side, target).unwrap();
        }

        let state1 = game.state();
        let bytes = bincode::serialize(&state1).unwrap();
        let decoded: MatchState = bincode::deserialize(&bytes).unwrap();
        let restored = Match::from_state(decoded);
        prop_assert_eq!(state1, restored.state());
        prop_assert_eq!(game.phase(), restored.phase());
    }
}
