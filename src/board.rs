//! Board state: ship placements, hit/miss tracking and shot resolution.
//!
//! A board owns its ships exclusively. Once the fleet is fully placed the
//! layout never changes again; the only state that moves afterwards is the
//! struck marks, and those only ever accumulate.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::common::{Coord, PlacementError, ShotError, ShotOutcome};
use crate::grid::BitGrid;
use crate::ship::{Orientation, Ship, ShipSpec};

/// Main board state: ships, occupancy and the struck record split into hits
/// and misses (their union is the struck set).
#[derive(Clone, PartialEq, Eq)]
pub struct Board {
    size: usize,
    ships: Vec<Ship>,
    occupied: BitGrid,
    hits: BitGrid,
    misses: BitGrid,
}

impl Board {
    /// Create an empty board of side length `size` (no ships placed).
    pub fn new(size: usize) -> Self {
        Board {
            size,
            ships: Vec::new(),
            occupied: BitGrid::new(size),
            hits: BitGrid::new(size),
            misses: BitGrid::new(size),
        }
    }

    /// Side length of the board.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Ships placed so far, in placement order.
    pub fn ships(&self) -> &[Ship] {
        &self.ships
    }

    /// Occupancy mask of all placed ships.
    pub fn occupied(&self) -> &BitGrid {
        &self.occupied
    }

    /// True iff a ship of `spec` at `origin`/`orientation` would be fully
    /// in bounds and would overlap no existing ship. Pure query.
    pub fn can_place(&self, spec: &ShipSpec, origin: Coord, orientation: Orientation) -> bool {
        match Ship::new(spec.clone(), orientation, origin, self.size) {
            Ok(candidate) => !self.occupied.overlaps(candidate.mask()),
            Err(_) => false,
        }
    }

    /// Place a ship of `spec` at `origin`/`orientation`. Fails with
    /// `OutOfBounds` or `Overlap` and leaves the board unchanged on failure.
    pub fn place(
        &mut self,
        spec: ShipSpec,
        origin: Coord,
        orientation: Orientation,
    ) -> Result<&Ship, PlacementError> {
        let ship = Ship::new(spec, orientation, origin, self.size)?;
        if self.occupied.overlaps(ship.mask()) {
            return Err(PlacementError::Overlap);
        }
        self.occupied |= ship.mask();
        self.ships.push(ship);
        let idx = self.ships.len() - 1;
        Ok(&self.ships[idx])
    }

    /// True if the cell at `coord` has been struck (hit or miss).
    pub fn is_struck(&self, coord: Coord) -> Result<bool, ShotError> {
        Ok(self.hits.get(coord.row, coord.col)? || self.misses.get(coord.row, coord.col)?)
    }

    /// Resolve a shot at `coord`, marking the cell struck and reporting the
    /// outcome. A repeated strike on the same cell fails with
    /// `AlreadyStruck` and changes nothing.
    ///
    /// Sunk detection is ship-local: the ship owning the struck cell is
    /// identified by explicit membership and only its own hit count is
    /// consulted. Adjacent ships sharing a line never affect each other.
    pub fn strike(&mut self, coord: Coord) -> Result<ShotOutcome, ShotError> {
        if self.is_struck(coord)? {
            return Err(ShotError::AlreadyStruck);
        }
        // ship membership is authoritative for hit detection, not the
        // occupancy mask and never a contiguous-run scan
        match self.ships.iter().position(|s| s.contains(coord)) {
            None => {
                self.misses.set(coord.row, coord.col)?;
                Ok(ShotOutcome::Miss)
            }
            Some(idx) => {
                self.hits.set(coord.row, coord.col)?;
                let ship = &mut self.ships[idx];
                ship.register_hit(coord);
                if ship.is_sunk() {
                    Ok(ShotOutcome::HitAndSunk(idx))
                } else {
                    Ok(ShotOutcome::Hit)
                }
            }
        }
    }

    /// True iff every placed ship is sunk. Vacuously true for a board with
    /// zero ships; callers gate win checks on setup completion first.
    pub fn is_fleet_sunk(&self) -> bool {
        self.ships.iter().all(|s| s.is_sunk())
    }

    /// Snapshot for the board's owner: ships, hits and misses all visible.
    pub fn owner_view(&self) -> BoardView {
        self.view(true)
    }

    /// Snapshot for the opponent: struck cells only. Unstruck ship positions
    /// are never revealed.
    pub fn opponent_view(&self) -> BoardView {
        self.view(false)
    }

    fn view(&self, reveal_ships: bool) -> BoardView {
        let n = self.size;
        let mut cells = vec![CellMark::Unknown; n * n];
        for (r, c) in self.misses.iter_set_bits() {
            cells[r * n + c] = CellMark::Miss;
        }
        for (r, c) in self.hits.iter_set_bits() {
            cells[r * n + c] = CellMark::Hit;
        }
        if reveal_ships {
            for (r, c) in self.occupied.iter_set_bits() {
                if cells[r * n + c] == CellMark::Unknown {
                    cells[r * n + c] = CellMark::Ship;
                }
            }
        }
        BoardView { size: n, cells }
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Board {{\n  occupied: {:?},\n  hits: {:?},\n  misses: {:?},\n  ships: {:?}\n}}",
            self.occupied, self.hits, self.misses, self.ships
        )
    }
}

/// What one audience may know about a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellMark {
    /// Not struck; nothing revealed (or open water on an owner view).
    Unknown,
    /// Struck, no ship there.
    Miss,
    /// Struck ship segment.
    Hit,
    /// Unstruck ship segment; present on owner views only.
    Ship,
}

/// Read-only snapshot of a board for one audience.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardView {
    size: usize,
    cells: Vec<CellMark>,
}

impl BoardView {
    pub fn size(&self) -> usize {
        self.size
    }

    /// Mark at `coord`, or `None` outside the board.
    pub fn get(&self, coord: Coord) -> Option<CellMark> {
        if coord.row >= self.size || coord.col >= self.size {
            return None;
        }
        Some(self.cells[coord.row * self.size + coord.col])
    }

    /// Coordinates not yet struck, row-major.
    pub fn unstruck(&self) -> impl Iterator<Item = Coord> + '_ {
        let n = self.size;
        self.cells.iter().enumerate().filter_map(move |(i, m)| {
            matches!(m, CellMark::Unknown | CellMark::Ship).then_some(Coord::new(i / n, i % n))
        })
    }
}

impl fmt::Display for BoardView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..self.size {
            for c in 0..self.size {
                let mark = match self.cells[r * self.size + c] {
                    CellMark::Unknown => '·',
                    CellMark::Miss => 'o',
                    CellMark::Hit => 'x',
                    CellMark::Ship => '■',
                };
                write!(f, "{} ", mark)?;
            }
            if r + 1 < self.size {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

/// Serializable board state for saving or syncing games. The occupancy and
/// hit masks are derived from the ship list on restore; only the misses need
/// carrying alongside.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardState {
    pub size: usize,
    pub ships: Vec<Ship>,
    pub misses: BitGrid,
}

impl From<&Board> for BoardState {
    fn from(b: &Board) -> Self {
        BoardState {
            size: b.size,
            ships: b.ships.clone(),
            misses: b.misses.clone(),
        }
    }
}

impl From<BoardState> for Board {
    fn from(state: BoardState) -> Self {
        let mut occupied = BitGrid::new(state.size);
        let mut hits = BitGrid::new(state.size);
        for ship in &state.ships {
            occupied |= ship.mask();
            hits |= ship.hits();
        }
        Board {
            size: state.size,
            ships: state.ships,
            occupied,
            hits,
            misses: state.misses,
        }
    }
}
