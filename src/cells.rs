use serde_derive::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::units::{ColumnsCount, RowsCount};

/// A unit square of the grid, addressed by row (top to bottom) then column (left to right).
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd, Serialize, Deserialize)]
pub struct Cell {
    pub row: usize,
    pub column: usize,
}

pub type CellSmallVec = SmallVec<[Cell; 4]>;

impl Cell {
    pub fn new(row: usize, column: usize) -> Cell {
        Cell { row, column }
    }

    /// Convert a row major index in the range `0..rows*columns` into a cell.
    #[inline]
    pub fn from_row_major_index(index: usize, columns: ColumnsCount) -> Cell {
        Cell::new(index / columns.0, index % columns.0)
    }

    #[inline]
    pub fn row_major_index(&self, columns: ColumnsCount) -> usize {
        self.row * columns.0 + self.column
    }

    #[inline]
    pub fn is_within(&self, rows: RowsCount, columns: ColumnsCount) -> bool {
        self.row < rows.0 && self.column < columns.0
    }

    /// The cell one step away in `direction`, or None if that step leaves the grid.
    pub fn neighbour(&self,
                     direction: Direction,
                     rows: RowsCount,
                     columns: ColumnsCount)
                     -> Option<Cell> {

        let (row, column) = (self.row, self.column);
        let next = match direction {
            Direction::Up => {
                if row > 0 {
                    Some(Cell::new(row - 1, column))
                } else {
                    None
                }
            }
            Direction::Right => Some(Cell::new(row, column + 1)),
            Direction::Down => Some(Cell::new(row + 1, column)),
            Direction::Left => {
                if column > 0 {
                    Some(Cell::new(row, column - 1))
                } else {
                    None
                }
            }
        };

        next.filter(|cell| cell.is_within(rows, columns))
    }

    /// All in-grid cells sharing a wall with this one, whether open or closed.
    pub fn neighbours(&self, rows: RowsCount, columns: ColumnsCount) -> CellSmallVec {
        Direction::ALL
            .iter()
            .filter_map(|dir| self.neighbour(*dir, rows, columns))
            .collect()
    }
}

#[derive(Eq, PartialEq, Copy, Clone, Debug, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

/// The kind of wall separating a cell from its neighbour in some direction.
#[derive(Eq, PartialEq, Copy, Clone, Debug, Hash, Serialize, Deserialize)]
pub enum Orientation {
    /// Separates horizontally adjacent cells (left/right moves).
    Vertical,
    /// Separates vertically adjacent cells (up/down moves).
    Horizontal,
}

impl Direction {
    /// Candidate order before shuffling.
    pub const ALL: [Direction; 4] = [Direction::Up, Direction::Right, Direction::Down, Direction::Left];

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Right => Direction::Left,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
        }
    }

    pub fn wall_orientation(self) -> Orientation {
        match self {
            Direction::Left | Direction::Right => Orientation::Vertical,
            Direction::Up | Direction::Down => Orientation::Horizontal,
        }
    }

    /// Index into the vertical or horizontal wall grid of the wall crossed when stepping
    /// from `from` in this direction. The caller must have checked the step stays in the grid.
    pub fn wall_index(self, from: Cell) -> (usize, usize) {
        match self {
            Direction::Left => (from.row, from.column - 1),
            Direction::Right => (from.row, from.column),
            Direction::Up => (from.row - 1, from.column),
            Direction::Down => (from.row, from.column),
        }
    }
}

#[cfg(test)]
mod tests {

    use itertools::Itertools;

    use super::*;

    const ROWS: RowsCount = RowsCount(3);
    const COLUMNS: ColumnsCount = ColumnsCount(4);

    #[test]
    fn neighbour_cells() {
        let check_expected_neighbours = |cell: Cell, expected: &[Cell]| {
            let neighbours: Vec<Cell> = cell.neighbours(ROWS, COLUMNS).iter().cloned().sorted().collect();
            let expected: Vec<Cell> = expected.iter().cloned().sorted().collect();
            assert_eq!(neighbours, expected);
        };
        let c = |row, column| Cell::new(row, column);

        // corners
        check_expected_neighbours(c(0, 0), &[c(0, 1), c(1, 0)]);
        check_expected_neighbours(c(0, 3), &[c(0, 2), c(1, 3)]);
        check_expected_neighbours(c(2, 0), &[c(1, 0), c(2, 1)]);
        check_expected_neighbours(c(2, 3), &[c(1, 3), c(2, 2)]);

        // sides
        check_expected_neighbours(c(0, 1), &[c(0, 0), c(0, 2), c(1, 1)]);
        check_expected_neighbours(c(1, 3), &[c(0, 3), c(2, 3), c(1, 2)]);

        // inside
        check_expected_neighbours(c(1, 1), &[c(0, 1), c(1, 2), c(2, 1), c(1, 0)]);
    }

    #[test]
    fn neighbour_at_direction() {
        let c = |row, column| Cell::new(row, column);
        assert_eq!(c(0, 0).neighbour(Direction::Up, ROWS, COLUMNS), None);
        assert_eq!(c(0, 0).neighbour(Direction::Left, ROWS, COLUMNS), None);
        assert_eq!(c(0, 0).neighbour(Direction::Right, ROWS, COLUMNS), Some(c(0, 1)));
        assert_eq!(c(0, 0).neighbour(Direction::Down, ROWS, COLUMNS), Some(c(1, 0)));
        assert_eq!(c(2, 3).neighbour(Direction::Down, ROWS, COLUMNS), None);
        assert_eq!(c(2, 3).neighbour(Direction::Right, ROWS, COLUMNS), None);
    }

    #[test]
    fn wall_indices_follow_the_moving_cell() {
        let from = Cell::new(1, 2);
        assert_eq!(Direction::Left.wall_index(from), (1, 1));
        assert_eq!(Direction::Right.wall_index(from), (1, 2));
        assert_eq!(Direction::Up.wall_index(from), (0, 2));
        assert_eq!(Direction::Down.wall_index(from), (1, 2));
    }

    #[test]
    fn opposite_directions_share_a_wall() {
        for dir in Direction::ALL.iter().cloned() {
            let from = Cell::new(1, 1);
            let to = from.neighbour(dir, ROWS, COLUMNS).unwrap();
            assert_eq!(dir.wall_index(from), dir.opposite().wall_index(to));
            assert_eq!(dir.wall_orientation(), dir.opposite().wall_orientation());
        }
    }

    #[test]
    fn row_major_index_round_trip() {
        for index in 0..(ROWS.0 * COLUMNS.0) {
            let cell = Cell::from_row_major_index(index, COLUMNS);
            assert!(cell.is_within(ROWS, COLUMNS));
            assert_eq!(cell.row_major_index(COLUMNS), index);
        }
    }
}
