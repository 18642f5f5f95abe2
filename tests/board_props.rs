use proptest::prelude::*;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use schiffe_versenken::{Board, BoardState, Manifest, Planner, ShotError};

const N: usize = 10;

fn random_board(seed: u64) -> Board {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut board = Board::new(N);
    let mut planner = Planner::new(Manifest::classic());
    planner.place_randomly(&mut board, &mut rng).unwrap();
    let strikes = rng.random_range(0..N * 2);
    for _ in 0..strikes {
        let r = rng.random_range(0..N);
        let c = rng.random_range(0..N);
        let _ = board.strike(schiffe_versenken::Coord::new(r, c));
    }
    board
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn board_state_roundtrip(seed in any::<u64>()) {
        let board = random_board(seed);
        let state1 = BoardState::from(&board);
        let board2: Board = state1.clone().into();
        let state2 = BoardState::from(&board2);
        prop_assert_eq!(state1, state2);
    }

    #[test]
    fn roundtrip_preserves_sunk_state(seed in any::<u64>()) {
        let board = random_board(seed);
        let board2: Board = BoardState::from(&board).into();
        for (a, b) in board.ships().iter().zip(board2.ships().iter()) {
            prop_assert_eq!(a.hit_count(), b.hit_count());
            prop_assert_eq!(a.is_sunk(), b.is_sunk());
        }
        prop_assert_eq!(board.is_fleet_sunk(), board2.is_fleet_sunk());
    }

    #[test]
    fn strike_idempotent(seed in any::<u64>(), row in 0..N, col in 0..N) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut board = Board::new(N);
        let mut planner = Planner::new(Manifest::classic());
        planner.place_randomly(&mut board, &mut rng).unwrap();

        let coord = schiffe_versenken::Coord::new(row, col);
        let state_before = BoardState::from(&board);
        board.strike(coord).unwrap();
        let state_after = BoardState::from(&board);
        let err = board.strike(coord).unwrap_err();
        prop_assert_eq!(err, ShotError::AlreadyStruck);
        prop_assert_eq!(BoardState::from(&board), state_after.clone());
        prop_assert_ne!(state_before, state_after);
    }

    #[test]
    fn random_fleet_never_overlaps(seed in any::<u64>()) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut board = Board::new(N);
        let manifest = Manifest::classic();
        let total = manifest.total_cells();
        let mut planner = Planner::new(manifest);
        planner.place_randomly(&mut board, &mut rng).unwrap();
        prop_assert_eq!(board.occupied().count_ones(), total);
    }
}
