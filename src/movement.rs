use crate::grid::{Grid, Pos};

/// Facing of a grid-bound entity. Cycles Up, Right, Down, Left.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Direction::Up, Direction::Right, Direction::Down, Direction::Left];

    pub fn delta(self) -> (isize, isize) {
        match self {
            Direction::Up => (0, -1),
            Direction::Right => (1, 0),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
        }
    }

    pub fn next(self) -> Self {
        self.rotate(1)
    }

    pub fn prev(self) -> Self {
        self.rotate(-1)
    }

    /// Turns `steps` quarter turns clockwise (negative for counter-clockwise).
    pub fn rotate(self, steps: i32) -> Self {
        let idx = (self as i32 + steps).rem_euclid(4);
        Self::ALL[idx as usize]
    }
}

/// Where `pos` lands when moved one cell toward `dir`, or `None` off the grid.
pub fn neighbor(grid: &Grid, pos: Pos, dir: Direction) -> Option<Pos> {
    let (dx, dy) = dir.delta();
    let nx = pos.x.checked_add_signed(dx)?;
    let ny = pos.y.checked_add_signed(dy)?;
    grid.in_bounds(nx, ny).then_some(Pos { x: nx, y: ny })
}

/// Moves one cell toward `dir` unless that cell is a wall or off the grid,
/// in which case `current` comes back unchanged.
pub fn try_move(grid: &Grid, current: Pos, dir: Direction) -> Pos {
    match neighbor(grid, current, dir) {
        Some(next) if grid.is_open(next.x, next.y) => next,
        _ => current,
    }
}

/// A grid-bound walker: a cell plus a facing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Entity {
    pub pos: Pos,
    pub facing: Direction,
}

impl Entity {
    pub fn new(pos: Pos, facing: Direction) -> Self {
        Self { pos, facing }
    }

    pub fn rotate(&mut self, steps: i32) {
        self.facing = self.facing.rotate(steps);
    }

    /// Advances one cell along the current facing; returns whether it moved.
    pub fn advance(&mut self, grid: &Grid) -> bool {
        let next = try_move(grid, self.pos, self.facing);
        let moved = next != self.pos;
        self.pos = next;
        moved
    }
}
