//! Fleet placement: drives a board from empty to a fully populated fleet,
//! either one ship at a time under host control or automatically with a
//! seeded RNG.

use rand::Rng;

use crate::board::Board;
use crate::common::{Coord, PlacementError};
use crate::ship::{Manifest, Orientation, ShipSpec};

/// Random samples tried per ship before falling back to enumerating every
/// legal placement.
const SAMPLE_ATTEMPTS: usize = 64;

/// Full board restarts tried before giving up on a manifest that passed the
/// feasibility check but keeps deadlocking greedy placement.
const MAX_RESTARTS: usize = 256;

/// Walks a fleet manifest in order, committing one ship per step onto a
/// board. Complete once the cursor passes the end of the manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Planner {
    manifest: Manifest,
    cursor: usize,
}

impl Planner {
    pub fn new(manifest: Manifest) -> Self {
        Planner {
            manifest,
            cursor: 0,
        }
    }

    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    /// The next un-placed manifest entry, or `None` once complete.
    pub fn next_spec(&self) -> Option<&ShipSpec> {
        self.manifest.specs().get(self.cursor)
    }

    /// Number of manifest entries still to place.
    pub fn remaining(&self) -> usize {
        self.manifest.len() - self.cursor
    }

    /// True once every manifest entry has been placed.
    pub fn is_complete(&self) -> bool {
        self.cursor >= self.manifest.len()
    }

    /// Move the cursor to `placed` entries done, used when restoring a
    /// persisted match.
    pub(crate) fn advance_to(&mut self, placed: usize) {
        self.cursor = placed.min(self.manifest.len());
    }

    /// Place the next manifest ship at `origin`/`orientation`. Advances the
    /// cursor on success; fails with `ManifestExhausted` once complete and
    /// leaves both planner and board unchanged on any failure.
    pub fn place_next(
        &mut self,
        board: &mut Board,
        origin: Coord,
        orientation: Orientation,
    ) -> Result<(), PlacementError> {
        let spec = self
            .next_spec()
            .cloned()
            .ok_or(PlacementError::ManifestExhausted)?;
        board.place(spec, origin, orientation)?;
        self.cursor += 1;
        Ok(())
    }

    /// Place every remaining manifest ship at random positions.
    ///
    /// Feasibility is checked before any sampling; a manifest that cannot fit
    /// fails with `ManifestTooLarge` instead of retrying forever. Each ship
    /// gets a bounded number of random samples and then an exhaustive scan of
    /// legal placements, restarting from the incoming board when the greedy
    /// order paints itself into a corner. All-or-nothing: on failure the
    /// board and the cursor are untouched.
    pub fn place_randomly<R: Rng + ?Sized>(
        &mut self,
        board: &mut Board,
        rng: &mut R,
    ) -> Result<(), PlacementError> {
        let n = board.size();
        let remaining = &self.manifest.specs()[self.cursor..];
        let remaining_cells: usize = remaining.iter().map(|s| s.length()).sum();
        let infeasible = remaining
            .iter()
            .any(|s| s.length() == 0 || s.length() > n)
            || board.occupied().count_ones() + remaining_cells > n * n;
        if infeasible {
            return Err(PlacementError::ManifestTooLarge);
        }

        for _ in 0..MAX_RESTARTS {
            let mut scratch = board.clone();
            if try_place_all(&mut scratch, remaining, rng) {
                *board = scratch;
                self.cursor = self.manifest.len();
                return Ok(());
            }
        }
        Err(PlacementError::ManifestTooLarge)
    }
}

/// One greedy pass placing `specs` in order; false if some ship found no
/// legal position.
fn try_place_all<R: Rng + ?Sized>(board: &mut Board, specs: &[ShipSpec], rng: &mut R) -> bool {
    for spec in specs {
        match sample_placement(board, spec, rng) {
            Some((origin, orientation)) => {
                if board.place(spec.clone(), origin, orientation).is_err() {
                    return false;
                }
            }
            None => return false,
        }
    }
    true
}

/// Pick a legal position for `spec`: random samples first, then a uniform
/// choice over the full enumeration of legal placements.
fn sample_placement<R: Rng + ?Sized>(
    board: &Board,
    spec: &ShipSpec,
    rng: &mut R,
) -> Option<(Coord, Orientation)> {
    let n = board.size();
    let len = spec.length();

    for _ in 0..SAMPLE_ATTEMPTS {
        let orientation = if rng.random() {
            Orientation::Horizontal
        } else {
            Orientation::Vertical
        };
        let (max_r, max_c) = match orientation {
            Orientation::Horizontal => (n - 1, n - len),
            Orientation::Vertical => (n - len, n - 1),
        };
        let origin = Coord::new(rng.random_range(0..=max_r), rng.random_range(0..=max_c));
        if board.can_place(spec, origin, orientation) {
            return Some((origin, orientation));
        }
    }

    let mut legal = Vec::new();
    for orientation in [Orientation::Horizontal, Orientation::Vertical] {
        let (max_r, max_c) = match orientation {
            Orientation::Horizontal => (n - 1, n - len),
            Orientation::Vertical => (n - len, n - 1),
        };
        for r in 0..=max_r {
            for c in 0..=max_c {
                let origin = Coord::new(r, c);
                if board.can_place(spec, origin, orientation) {
                    legal.push((origin, orientation));
                }
            }
        }
    }
    if legal.is_empty() {
        None
    } else {
        Some(legal[rng.random_range(0..legal.len())])
    }
}
