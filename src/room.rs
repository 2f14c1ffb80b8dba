//! Room scanning: finds the next open rectangle the generator should split.

use crate::grid::{Grid, Pos};

/// An open rectangle found by [`find_room`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Room {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

impl Room {
    pub fn origin(&self) -> Pos {
        Pos::new(self.x, self.y)
    }

    pub fn x_range(&self) -> std::ops::Range<usize> {
        self.x..self.x + self.width
    }

    pub fn y_range(&self) -> std::ops::Range<usize> {
        self.y..self.y + self.height
    }

    pub fn contains(&self, pos: Pos) -> bool {
        self.x_range().contains(&pos.x) && self.y_range().contains(&pos.y)
    }
}

/// True if the 2x2 block with its top-left corner at `(x, y)` is all open.
pub fn test_location(grid: &Grid, x: usize, y: usize) -> bool {
    grid.is_open(x, y) && grid.is_open(x + 1, y) && grid.is_open(x, y + 1) && grid.is_open(x + 1, y + 1)
}

/// Scans row-major for the first open 2x2 block and measures the room it
/// belongs to. Returns `None` once no 2x2 block is left.
///
/// Each extent follows the two-cell strip anchored at that block: the width
/// walks rows `y` and `y + 1`, the height walks columns `x` and `x + 1`, and
/// either stops at the first wall in its strip. A door on the room's first
/// row or column is a single open cell in a wall line, so it never carries
/// the scan into the neighbouring region.
pub fn find_room(grid: &Grid) -> Option<Room> {
    let (width, height) = grid.dimensions();
    for y in 0..height - 1 {
        for x in 0..width - 1 {
            if !test_location(grid, x, y) {
                continue;
            }
            let room_w = (x..width)
                .take_while(|&cx| grid.is_open(cx, y) && grid.is_open(cx, y + 1))
                .count();
            let room_h = (y..height)
                .take_while(|&cy| grid.is_open(x, cy) && grid.is_open(x + 1, cy))
                .count();
            return Some(Room {
                x,
                y,
                width: room_w,
                height: room_h,
            });
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn framed(width: usize, height: usize) -> Grid {
        let mut grid = Grid::new(width, height).unwrap();
        grid.reset();
        grid
    }

    #[test]
    fn fresh_grid_is_one_room() {
        let grid = framed(9, 11);
        assert_eq!(
            find_room(&grid),
            Some(Room {
                x: 1,
                y: 1,
                width: 7,
                height: 9
            })
        );
    }

    #[test]
    fn no_room_in_a_corridor() {
        // 3 wide leaves a single open column.
        let grid = framed(3, 7);
        assert_eq!(find_room(&grid), None);
    }

    #[test]
    fn scan_picks_the_first_block_in_row_major_order() {
        let mut grid = framed(9, 9);
        // Split into an upper and lower half; the upper half comes first.
        for x in 1..8 {
            grid.set(x, 4, true).unwrap();
        }
        let room = find_room(&grid).unwrap();
        assert_eq!(room.origin(), Pos::new(1, 1));
        assert_eq!((room.width, room.height), (7, 3));
    }

    #[test]
    fn extent_does_not_leak_through_a_door() {
        let mut grid = framed(9, 7);
        // Vertical wall at x = 4 with a door on the room's first row.
        for y in 1..6 {
            grid.set(4, y, true).unwrap();
        }
        grid.set(4, 1, false).unwrap();
        let room = find_room(&grid).unwrap();
        assert_eq!(
            room,
            Room {
                x: 1,
                y: 1,
                width: 3,
                height: 5
            }
        );
        for y in room.y_range() {
            for x in room.x_range() {
                assert!(grid.is_open(x, y));
            }
        }
    }

    #[test]
    fn test_location_rejects_blocks_touching_walls() {
        let grid = framed(5, 5);
        assert!(!test_location(&grid, 0, 0));
        assert!(test_location(&grid, 1, 1));
        assert!(test_location(&grid, 2, 2));
        assert!(!test_location(&grid, 3, 3));
    }
}
