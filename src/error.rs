use thiserror::Error;

use crate::room::Room;

/// Failures raised by the maze core.
///
/// Blocked movement and "nothing left to carve" are ordinary outcomes and
/// never show up here.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MazeError {
    /// Grid storage could not be reserved.
    #[error("could not allocate a {width}x{height} grid")]
    Allocation { width: usize, height: usize },

    /// Grids need a wall ring around at least one open cell, and hosts
    /// cap the side length.
    #[error("grid size {width}x{height} is out of range")]
    InvalidDimensions { width: usize, height: usize },

    /// A cell access landed outside the grid.
    #[error("cell ({x}, {y}) is outside the {width}x{height} grid")]
    OutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },

    /// A room reached the carving stage without a coordinate of the parity
    /// needed for its wall or door.
    #[error("room {0:?} cannot be bisected")]
    DegenerateRoom(Room),
}
