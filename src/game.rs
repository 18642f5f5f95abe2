//! Match orchestration: two boards, the setup/combat/finished phase machine,
//! turn ownership and win detection.
//!
//! A match is a plain synchronous state machine with no internal locking.
//! Hosts sequencing two remote players must funnel all mutating calls
//! through a single ordered caller (queue, lock or single-writer actor);
//! the engine assumes at most one call in flight per match.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::board::{Board, BoardState, BoardView};
use crate::common::{Coord, MatchError, ShotOutcome, Side};
use crate::planner::Planner;
use crate::ship::{Manifest, Orientation};

/// Match lifecycle. Transitions run strictly
/// `Setup → Combat → Finished` and never reverse; the turn owner exists only
/// during combat and the winner only once finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Boards are being populated.
    Setup,
    /// Shots are being exchanged; `turn` may fire the next one.
    Combat { turn: Side },
    /// One fleet is fully sunk.
    Finished { winner: Side },
}

/// Everything a host needs to relay after one shot: the outcome, the phase
/// the match moved to and the winner if the shot ended the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrikeReport {
    pub outcome: ShotOutcome,
    pub phase: Phase,
    pub winner: Option<Side>,
}

/// A two-player match: one board and one placement planner per seat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    boards: [Board; 2],
    planners: [Planner; 2],
    phase: Phase,
}

impl Match {
    /// Create a match in the setup phase: two empty boards of side length
    /// `size`, each owning the fleet described by `manifest`.
    pub fn new(size: usize, manifest: Manifest) -> Self {
        Match {
            boards: [Board::new(size), Board::new(size)],
            planners: [Planner::new(manifest.clone()), Planner::new(manifest)],
            phase: Phase::Setup,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Side that may fire next, defined only during combat.
    pub fn turn(&self) -> Option<Side> {
        match self.phase {
            Phase::Combat { turn } => Some(turn),
            _ => None,
        }
    }

    /// Winner, set only once the match has finished.
    pub fn winner(&self) -> Option<Side> {
        match self.phase {
            Phase::Finished { winner } => Some(winner),
            _ => None,
        }
    }

    /// Board owned by `side`. Full engine-side access; presentation layers
    /// use the view methods instead.
    pub fn board(&self, side: Side) -> &Board {
        &self.boards[side.index()]
    }

    /// True once `side` has placed its entire fleet.
    pub fn is_fleet_placed(&self, side: Side) -> bool {
        self.planners[side.index()].is_complete()
    }

    /// Place the next manifest ship for `side` during setup. Once both
    /// fleets are complete the match enters combat with player one to move
    /// (fixed, deterministic starting player).
    pub fn place_ship(
        &mut self,
        side: Side,
        origin: Coord,
        orientation: Orientation,
    ) -> Result<(), MatchError> {
        if self.phase != Phase::Setup {
            return Err(MatchError::InvalidPhase);
        }
        let i = side.index();
        self.planners[i].place_next(&mut self.boards[i], origin, orientation)?;
        self.maybe_begin_combat();
        Ok(())
    }

    /// Place all of `side`'s remaining ships at random during setup.
    pub fn place_fleet_randomly<R: Rng + ?Sized>(
        &mut self,
        side: Side,
        rng: &mut R,
    ) -> Result<(), MatchError> {
        if self.phase != Phase::Setup {
            return Err(MatchError::InvalidPhase);
        }
        let i = side.index();
        self.planners[i].place_randomly(&mut self.boards[i], rng)?;
        self.maybe_begin_combat();
        Ok(())
    }

    fn maybe_begin_combat(&mut self) {
        if self.planners.iter().all(|p| p.is_complete()) {
            self.phase = Phase::Combat {
                turn: Side::PlayerOne,
            };
            log::debug!("both fleets placed, combat begins with player one");
        }
    }

    /// Fire a shot by `side` at `target` on the opponent's board.
    ///
    /// Every shot, hit or miss, ends the acting player's turn. A shot that
    /// sinks the last opposing ship finishes the match with `side` as
    /// winner; all later calls fail with `MatchAlreadyFinished`.
    pub fn strike(&mut self, side: Side, target: Coord) -> Result<StrikeReport, MatchError> {
        let turn = match self.phase {
            Phase::Setup => return Err(MatchError::InvalidPhase),
            Phase::Finished { .. } => return Err(MatchError::MatchAlreadyFinished),
            Phase::Combat { turn } => turn,
        };
        if turn != side {
            return Err(MatchError::NotYourTurn);
        }

        let defender = side.opponent();
        let outcome = self.boards[defender.index()].strike(target)?;
        log::debug!("{} fires at {}: {:?}", side, target, outcome);

        if self.boards[defender.index()].is_fleet_sunk() {
            self.phase = Phase::Finished { winner: side };
            log::debug!("fleet of {} is sunk, {} wins", defender, side);
        } else {
            self.phase = Phase::Combat { turn: defender };
        }

        Ok(StrikeReport {
            outcome,
            phase: self.phase,
            winner: self.winner(),
        })
    }

    /// Snapshot of `side`'s own board (ships visible).
    pub fn owner_view(&self, side: Side) -> BoardView {
        self.boards[side.index()].owner_view()
    }

    /// Snapshot of the opponent's board as `side` may see it (struck cells
    /// only, no unstruck ship positions).
    pub fn target_view(&self, side: Side) -> BoardView {
        self.boards[side.opponent().index()].opponent_view()
    }

    /// Serializable snapshot for the host's persistence layer.
    pub fn state(&self) -> MatchState {
        MatchState {
            boards: [
                BoardState::from(&self.boards[0]),
                BoardState::from(&self.boards[1]),
            ],
            manifest: self.planners[0].manifest().clone(),
            placed: [
                self.planners[0].manifest().len() - self.planners[0].remaining(),
                self.planners[1].manifest().len() - self.planners[1].remaining(),
            ],
            phase: self.phase,
        }
    }

    /// Rebuild a match from a persisted snapshot. Derived board state is
    /// recomputed from the ship lists.
    pub fn from_state(state: MatchState) -> Self {
        let [b0, b1] = state.boards;
        let mut p0 = Planner::new(state.manifest.clone());
        let mut p1 = Planner::new(state.manifest);
        p0.advance_to(state.placed[0]);
        p1.advance_to(state.placed[1]);
        Match {
            boards: [Board::from(b0), Board::from(b1)],
            planners: [p0, p1],
            phase: state.phase,
        }
    }
}

/// Serializable match state: both boards, the shared manifest, how far each
/// planner has advanced and the phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchState {
    pub boards: [BoardState; 2],
    pub manifest: Manifest,
    pub placed: [usize; 2],
    pub phase: Phase,
}
