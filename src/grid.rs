use crate::error::MazeError;

/// A cell coordinate on the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Pos {
    pub x: usize,
    pub y: usize,
}

impl Pos {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

/// Boolean occupancy grid, `true` for wall and `false` for open floor.
///
/// Cells live in a single row-major buffer. The grid owns that buffer for
/// its whole lifetime; dropping the grid releases it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    tiles: Vec<bool>,
}

impl Grid {
    /// Allocates a `width x height` grid with every cell open.
    pub fn new(width: usize, height: usize) -> Result<Self, MazeError> {
        if width < 3 || height < 3 {
            return Err(MazeError::InvalidDimensions { width, height });
        }
        let len = width
            .checked_mul(height)
            .ok_or(MazeError::Allocation { width, height })?;
        let mut tiles = Vec::new();
        tiles
            .try_reserve_exact(len)
            .map_err(|_| MazeError::Allocation { width, height })?;
        tiles.resize(len, false);
        Ok(Self {
            width,
            height,
            tiles,
        })
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn in_bounds(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }

    fn index(&self, x: usize, y: usize) -> Result<usize, MazeError> {
        if !self.in_bounds(x, y) {
            return Err(MazeError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(y * self.width + x)
    }

    /// Returns `true` if `(x, y)` is a wall.
    pub fn get(&self, x: usize, y: usize) -> Result<bool, MazeError> {
        let idx = self.index(x, y)?;
        Ok(self.tiles[idx])
    }

    pub fn set(&mut self, x: usize, y: usize, value: bool) -> Result<(), MazeError> {
        let idx = self.index(x, y)?;
        self.tiles[idx] = value;
        Ok(())
    }

    /// Open-floor test that treats anything off the grid as wall.
    pub fn is_open(&self, x: usize, y: usize) -> bool {
        matches!(self.get(x, y), Ok(false))
    }

    /// Clears the grid and walls the outer ring, leaving an open interior
    /// ready for carving.
    pub fn reset(&mut self) {
        let (w, h) = (self.width, self.height);
        for y in 0..h {
            for x in 0..w {
                self.tiles[y * w + x] = x == 0 || y == 0 || x == w - 1 || y == h - 1;
            }
        }
    }

    /// Iterates rows top to bottom, each as a slice of cells left to right.
    pub fn rows(&self) -> impl Iterator<Item = &[bool]> + '_ {
        self.tiles.chunks(self.width)
    }

    pub fn count_walls(&self) -> usize {
        self.tiles.iter().filter(|&&wall| wall).count()
    }

    /// Cells that are open, in row-major order.
    pub fn open_cells(&self) -> Vec<Pos> {
        let mut cells = Vec::new();
        for (y, row) in self.rows().enumerate() {
            for (x, &wall) in row.iter().enumerate() {
                if !wall {
                    cells.push(Pos { x, y });
                }
            }
        }
        cells
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_grid_is_open() {
        let grid = Grid::new(5, 4).unwrap();
        assert_eq!(grid.dimensions(), (5, 4));
        assert_eq!(grid.count_walls(), 0);
    }

    #[test]
    fn rejects_tiny_grids() {
        assert_eq!(
            Grid::new(2, 9),
            Err(MazeError::InvalidDimensions {
                width: 2,
                height: 9
            })
        );
        assert!(Grid::new(3, 3).is_ok());
    }

    #[test]
    fn oversized_grid_is_an_allocation_error() {
        let err = Grid::new(usize::MAX, 3).unwrap_err();
        assert_eq!(
            err,
            MazeError::Allocation {
                width: usize::MAX,
                height: 3
            }
        );
    }

    #[test]
    fn get_and_set_are_bounds_checked() {
        let mut grid = Grid::new(4, 3).unwrap();
        grid.set(3, 2, true).unwrap();
        assert_eq!(grid.get(3, 2), Ok(true));
        assert!(matches!(
            grid.get(4, 0),
            Err(MazeError::OutOfBounds { x: 4, y: 0, .. })
        ));
        assert!(matches!(
            grid.set(0, 3, true),
            Err(MazeError::OutOfBounds { x: 0, y: 3, .. })
        ));
        assert!(!grid.is_open(4, 0));
    }

    #[test]
    fn reset_walls_border_and_opens_interior() {
        let mut grid = Grid::new(9, 11).unwrap();
        grid.set(4, 4, true).unwrap();
        grid.reset();
        for y in 0..11 {
            for x in 0..9 {
                let border = x == 0 || y == 0 || x == 8 || y == 10;
                assert_eq!(grid.get(x, y), Ok(border), "cell ({x}, {y})");
            }
        }
        assert_eq!(grid.open_cells().len(), 7 * 9);
    }

    #[test]
    fn rows_match_get() {
        let mut grid = Grid::new(3, 4).unwrap();
        grid.set(1, 2, true).unwrap();
        let rows: Vec<&[bool]> = grid.rows().collect();
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[2], &[false, true, false]);
    }
}
