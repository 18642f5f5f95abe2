//! Target selection for automated players.

use rand::Rng;

use crate::board::BoardView;
use crate::common::Coord;

/// Pick a uniformly random not-yet-struck coordinate from an opponent view.
/// Returns `None` when every cell has been struck.
pub fn random_target<R: Rng + ?Sized>(view: &BoardView, rng: &mut R) -> Option<Coord> {
    let open: Vec<Coord> = view.unstruck().collect();
    if open.is_empty() {
        None
    } else {
        Some(open[rng.random_range(0..open.len())])
    }
}
