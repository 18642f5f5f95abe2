//! Common engine types: coordinates, player sides, shot outcomes and the
//! error taxonomy shared by boards, planners and matches.
//!
//! Every error here is recoverable at the caller; a failed operation leaves
//! engine state exactly as it was.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::grid::GridError;

/// A (row, column) position on a board, both components in `[0, n)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    pub fn new(row: usize, col: usize) -> Self {
        Coord { row, col }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// One of the two seats in a match. Mapping seats to host-level player
/// identities is the host's responsibility; the engine never sees accounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    PlayerOne,
    PlayerTwo,
}

impl Side {
    /// The other seat.
    pub fn opponent(self) -> Side {
        match self {
            Side::PlayerOne => Side::PlayerTwo,
            Side::PlayerTwo => Side::PlayerOne,
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Side::PlayerOne => 0,
            Side::PlayerTwo => 1,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::PlayerOne => write!(f, "player one"),
            Side::PlayerTwo => write!(f, "player two"),
        }
    }
}

/// Result of a resolved shot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShotOutcome {
    /// Shot missed all ships.
    Miss,
    /// Shot hit a ship segment without sinking the ship.
    Hit,
    /// Shot hit the last intact segment of a ship, carrying the index of the
    /// sunk ship in the board's fleet.
    HitAndSunk(usize),
}

/// Errors returned by ship placement operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PlacementError {
    /// Some cell of the candidate lies outside `[0, n)×[0, n)`.
    #[error("ship placement is out of bounds")]
    OutOfBounds,
    /// Some cell of the candidate is already occupied by another ship.
    #[error("ship placement overlaps another ship")]
    Overlap,
    /// Every ship in the manifest has already been placed.
    #[error("fleet manifest is exhausted")]
    ManifestExhausted,
    /// The manifest cannot fit on a board of this size.
    #[error("fleet manifest does not fit on the board")]
    ManifestTooLarge,
    /// Referenced ship index is out of range for the fleet.
    #[error("ship index is out of range")]
    InvalidIndex,
}

/// Errors returned by shot resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ShotError {
    /// The cell was already struck; striking it again is a no-op. Hosts map
    /// duplicate deliveries of the same shot to this error, not to a new
    /// event.
    #[error("cell was already struck")]
    AlreadyStruck,
    /// Target lies outside the board.
    #[error("target is outside the board")]
    OutOfBounds,
}

impl From<GridError> for ShotError {
    fn from(_: GridError) -> Self {
        ShotError::OutOfBounds
    }
}

/// Errors returned by match-level operations. Caller-usage errors
/// (`NotYourTurn`, `InvalidPhase`, `MatchAlreadyFinished`) are distinct from
/// shot outcomes: a rejected call never changes the match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MatchError {
    /// The acting side does not own the current turn.
    #[error("it is not this player's turn")]
    NotYourTurn,
    /// The operation is not valid in the current phase.
    #[error("operation is not valid in the current phase")]
    InvalidPhase,
    /// The match has already finished; no further shots are accepted.
    #[error("match is already finished")]
    MatchAlreadyFinished,
    #[error(transparent)]
    Placement(#[from] PlacementError),
    #[error(transparent)]
    Shot(#[from] ShotError),
}
