use schiffe_versenken::{BitGrid, GridError};

#[test]
fn test_set_get_clear() {
    let mut grid = BitGrid::new(8);
    assert!(grid.is_empty());
    assert!(!grid.get(3, 4).unwrap());
    grid.set(3, 4).unwrap();
    assert!(grid.get(3, 4).unwrap());
    assert_eq!(grid.count_ones(), 1);
    grid.clear(3, 4).unwrap();
    assert!(grid.is_empty());
}

#[test]
fn test_out_of_bounds() {
    let mut grid = BitGrid::new(8);
    assert_eq!(
        grid.get(8, 0).unwrap_err(),
        GridError::IndexOutOfBounds { row: 8, col: 0 }
    );
    assert_eq!(
        grid.set(0, 8).unwrap_err(),
        GridError::IndexOutOfBounds { row: 0, col: 8 }
    );
}

#[test]
fn test_large_board_spans_words() {
    // 10x10 = 100 bits, two u64 words
    let mut grid = BitGrid::new(10);
    grid.set(9, 9).unwrap();
    grid.set(0, 0).unwrap();
    grid.set(6, 4).unwrap(); // bit 64, first bit of the second word
    assert_eq!(grid.count_ones(), 3);
    let set: Vec<_> = grid.iter_set_bits().collect();
    assert_eq!(set, vec![(0, 0), (6, 4), (9, 9)]);
}

#[test]
fn test_overlaps_and_ops() {
    let a = BitGrid::from_positions(5, [(0, 0), (0, 1), (0, 2)]).unwrap();
    let b = BitGrid::from_positions(5, [(0, 2), (1, 2)]).unwrap();
    let c = BitGrid::from_positions(5, [(4, 4)]).unwrap();
    assert!(a.overlaps(&b));
    assert!(!a.overlaps(&c));
    assert_eq!((&a & &b).count_ones(), 1);
    assert_eq!((&a | &b).count_ones(), 4);

    let mut acc = BitGrid::new(5);
    acc |= &a;
    acc |= &c;
    assert_eq!(acc.count_ones(), 4);
    acc &= &a;
    assert_eq!(acc.count_ones(), 3);
}

#[test]
fn test_display_renders_grid() {
    let grid = BitGrid::from_positions(2, [(0, 0), (1, 1)]).unwrap();
    assert_eq!(format!("{}", grid), "■ □ \n□ ■ ");
}
