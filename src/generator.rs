//! Incremental recursive-division maze generation.
//!
//! Each [`MazeGenerator::step`] finds one room, splits it with a wall and
//! punches a single door through that wall. Walls only go on even
//! coordinates and doors only on odd ones, so every split lands on the same
//! lattice and the finished grid is a perfect maze. The host calls `step`
//! once per tick and may draw the grid between calls.

use rand::Rng;
use tracing::{debug, info, warn};

use crate::error::MazeError;
use crate::grid::{Grid, Pos};
use crate::room::{find_room, Room};

/// Border cell opened once carving is finished.
pub const ENTRANCE: Pos = Pos::new(0, 1);

/// Draws allowed before parity sampling falls back to a linear pick.
const MAX_PARITY_DRAWS: usize = 64;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GenState {
    Carving,
    Done,
}

/// The line a bisection step walled off.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Wall {
    /// Spans the room's full height at column `x`.
    Vertical { x: usize },
    /// Spans the room's full width at row `y`.
    Horizontal { y: usize },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bisection {
    pub room: Room,
    pub wall: Wall,
    pub door: Pos,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// A room was split.
    Carved(Bisection),
    /// No room was left; the entrance was opened.
    Finalized,
    /// Generation had already finished.
    Idle,
}

#[derive(Clone, Debug)]
pub struct MazeGenerator {
    state: GenState,
}

impl Default for MazeGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl MazeGenerator {
    pub fn new() -> Self {
        Self {
            state: GenState::Carving,
        }
    }

    pub fn state(&self) -> GenState {
        self.state
    }

    pub fn is_done(&self) -> bool {
        self.state == GenState::Done
    }

    /// Performs one state transition on `grid`.
    pub fn step(&mut self, grid: &mut Grid, rng: &mut impl Rng) -> Result<StepOutcome, MazeError> {
        if self.state == GenState::Done {
            return Ok(StepOutcome::Idle);
        }

        let Some(room) = find_room(grid) else {
            grid.set(ENTRANCE.x, ENTRANCE.y, false)?;
            self.state = GenState::Done;
            info!(x = ENTRANCE.x, y = ENTRANCE.y, "maze complete, entrance opened");
            return Ok(StepOutcome::Finalized);
        };

        let vertical = if room.width > room.height {
            true
        } else if room.height > room.width {
            false
        } else {
            rng.gen_bool(0.5)
        };

        let bisection = if vertical {
            let x = sample_parity(rng, room.x, room.width, true).ok_or(MazeError::DegenerateRoom(room))?;
            for y in room.y_range() {
                grid.set(x, y, true)?;
            }
            let y = sample_parity(rng, room.y, room.height, false).ok_or(MazeError::DegenerateRoom(room))?;
            grid.set(x, y, false)?;
            Bisection {
                room,
                wall: Wall::Vertical { x },
                door: Pos::new(x, y),
            }
        } else {
            let y = sample_parity(rng, room.y, room.height, true).ok_or(MazeError::DegenerateRoom(room))?;
            for x in room.x_range() {
                grid.set(x, y, true)?;
            }
            let x = sample_parity(rng, room.x, room.width, false).ok_or(MazeError::DegenerateRoom(room))?;
            grid.set(x, y, false)?;
            Bisection {
                room,
                wall: Wall::Horizontal { y },
                door: Pos::new(x, y),
            }
        };

        debug!(origin = ?room.origin(), width = room.width, height = room.height, wall = ?bisection.wall, door = ?bisection.door, "bisected room");
        Ok(StepOutcome::Carved(bisection))
    }

    /// Steps until generation is done and returns how many rooms were split.
    ///
    /// Every split walls at least one open cell for good, so the grid area
    /// bounds the loop.
    pub fn run_to_completion(&mut self, grid: &mut Grid, rng: &mut impl Rng) -> Result<usize, MazeError> {
        let (w, h) = grid.dimensions();
        let mut carved = 0;
        for _ in 0..=w * h {
            match self.step(grid, rng)? {
                StepOutcome::Carved(_) => carved += 1,
                StepOutcome::Finalized | StepOutcome::Idle => return Ok(carved),
            }
        }
        Ok(carved)
    }
}

/// Picks a coordinate in `start..start + len` that is even (`even == true`)
/// or odd.
///
/// Rejection sampling keeps the pick uniform. Any range of two or more
/// values holds both parities, so the draw budget is only a guard; once it
/// runs out the first matching coordinate is taken.
fn sample_parity(rng: &mut impl Rng, start: usize, len: usize, even: bool) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let range = start..start + len;
    for _ in 0..MAX_PARITY_DRAWS {
        let v = rng.gen_range(range.clone());
        if (v % 2 == 0) == even {
            return Some(v);
        }
    }
    warn!(start, len, even, "parity sampling budget exhausted");
    range.into_iter().find(|v| (v % 2 == 0) == even)
}
