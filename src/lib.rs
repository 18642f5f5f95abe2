//! Engine for the classic two-player naval combat game: board state, ship
//! placement validation, shot resolution, sunk-ship detection, turn
//! alternation and win-condition evaluation.
//!
//! Board side length and fleet manifest are runtime parameters. The engine
//! is a synchronous state machine; transports, persistence backends and
//! interfaces live in the host and talk to it through [`Match`],
//! [`StrikeReport`], [`BoardView`] and the serializable state types.

mod ai;
mod board;
mod common;
mod game;
mod grid;
mod logging;
mod planner;
mod ship;

pub use ai::random_target;
pub use board::{Board, BoardState, BoardView, CellMark};
pub use common::{Coord, MatchError, PlacementError, ShotError, ShotOutcome, Side};
pub use game::{Match, MatchState, Phase, StrikeReport};
pub use grid::{BitGrid, GridError};
pub use logging::init_logging;
pub use planner::Planner;
pub use ship::{Manifest, Orientation, Ship, ShipSpec};
