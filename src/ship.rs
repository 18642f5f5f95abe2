//! Ship definitions, fleet manifests and per-ship hit tracking.

use serde::{Deserialize, Serialize};

use crate::common::{Coord, PlacementError};
use crate::grid::BitGrid;

/// Orientation of a ship on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    /// Per-cell (row, col) step along the ship's run.
    pub fn step(self) -> (usize, usize) {
        match self {
            Orientation::Horizontal => (0, 1),
            Orientation::Vertical => (1, 0),
        }
    }
}

/// A ship class: display name and segment count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipSpec {
    name: String,
    length: usize,
}

impl ShipSpec {
    pub fn new(name: impl Into<String>, length: usize) -> Self {
        Self {
            name: name.into(),
            length,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn length(&self) -> usize {
        self.length
    }
}

/// Ordered list of ship classes a board's fleet must contain before setup
/// completes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    specs: Vec<ShipSpec>,
}

impl Manifest {
    pub fn new(specs: Vec<ShipSpec>) -> Self {
        Self { specs }
    }

    /// The traditional five-ship fleet.
    pub fn classic() -> Self {
        Self::new(vec![
            ShipSpec::new("Carrier", 5),
            ShipSpec::new("Battleship", 4),
            ShipSpec::new("Cruiser", 3),
            ShipSpec::new("Submarine", 3),
            ShipSpec::new("Destroyer", 2),
        ])
    }

    /// Build a manifest from bare lengths, with generated names.
    pub fn from_lengths(lengths: &[usize]) -> Self {
        Self::new(
            lengths
                .iter()
                .enumerate()
                .map(|(i, &len)| ShipSpec::new(format!("ship-{}", i + 1), len))
                .collect(),
        )
    }

    pub fn specs(&self) -> &[ShipSpec] {
        &self.specs
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// Total number of cells the fleet covers.
    pub fn total_cells(&self) -> usize {
        self.specs.iter().map(|s| s.length()).sum()
    }

    /// Cheap necessary conditions for the fleet to fit on an `n×n` board:
    /// every ship spans at least one cell and at most a full row or column,
    /// and the fleet does not cover more cells than the board has.
    pub fn fits(&self, board_size: usize) -> bool {
        self.specs
            .iter()
            .all(|s| s.length() >= 1 && s.length() <= board_size)
            && self.total_cells() <= board_size * board_size
    }
}

/// A ship placed on a board: a contiguous straight-line run of cells, with
/// hits tracked in its own bitgrid. Sunk state is derived from the hit mask,
/// never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ship {
    spec: ShipSpec,
    orientation: Orientation,
    origin: Coord,
    mask: BitGrid,
    hits: BitGrid,
}

impl Ship {
    /// Construct a ship of `spec` at `origin` with `orientation` on a board
    /// of side length `board_size`. Fails with `OutOfBounds` if any cell
    /// would fall outside the board.
    pub fn new(
        spec: ShipSpec,
        orientation: Orientation,
        origin: Coord,
        board_size: usize,
    ) -> Result<Self, PlacementError> {
        let len = spec.length();
        if len == 0 {
            return Err(PlacementError::OutOfBounds);
        }
        if origin.row >= board_size || origin.col >= board_size {
            return Err(PlacementError::OutOfBounds);
        }
        let (dr, dc) = orientation.step();
        let end_row = origin.row + dr * (len - 1);
        let end_col = origin.col + dc * (len - 1);
        if end_row >= board_size || end_col >= board_size {
            return Err(PlacementError::OutOfBounds);
        }

        let mask = BitGrid::from_positions(
            board_size,
            (0..len).map(|i| (origin.row + dr * i, origin.col + dc * i)),
        )
        .map_err(|_| PlacementError::OutOfBounds)?;

        Ok(Ship {
            spec,
            orientation,
            origin,
            mask,
            hits: BitGrid::new(board_size),
        })
    }

    /// Coordinates covered by the ship, from origin outward.
    pub fn cells(&self) -> impl Iterator<Item = Coord> + '_ {
        let (dr, dc) = self.orientation.step();
        (0..self.spec.length())
            .map(move |i| Coord::new(self.origin.row + dr * i, self.origin.col + dc * i))
    }

    /// True if the ship covers `coord`.
    pub fn contains(&self, coord: Coord) -> bool {
        self.mask.get(coord.row, coord.col).unwrap_or(false)
    }

    /// Record a hit at `coord` if the ship covers it. Returns whether the
    /// coordinate belongs to this ship.
    pub fn register_hit(&mut self, coord: Coord) -> bool {
        if self.contains(coord) {
            let _ = self.hits.set(coord.row, coord.col);
            true
        } else {
            false
        }
    }

    /// Number of distinct struck segments.
    pub fn hit_count(&self) -> usize {
        self.hits.count_ones()
    }

    /// True once every segment has been struck.
    pub fn is_sunk(&self) -> bool {
        self.hit_count() == self.spec.length()
    }

    pub fn spec(&self) -> &ShipSpec {
        &self.spec
    }

    pub fn origin(&self) -> Coord {
        self.origin
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Occupancy mask of the ship on the board.
    pub fn mask(&self) -> &BitGrid {
        &self.mask
    }

    /// Hit mask of the ship on the board.
    pub fn hits(&self) -> &BitGrid {
        &self.hits
    }
}
