use std::convert::TryFrom;
use std::fmt;

use log::warn;
use serde_derive::{Deserialize, Serialize};

use crate::cells::{Cell, CellSmallVec, Direction, Orientation};
use crate::errors::*;
use crate::units::{ColumnsCount, RowsCount};
use crate::walls::WallGrid;

/// A finished maze: the open/closed state of every internal wall plus the carve origin
/// and the goal cell.
///
/// Serializes to JSON as
/// `{rows, columns, verticalOpen: bool[rows][columns-1], horizontalOpen: bool[rows-1][columns],
/// start: {row, column}, goal: {row, column}}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawMazeDescription")]
pub struct MazeDescription {
    rows: usize,
    columns: usize,
    vertical_open: WallGrid,
    horizontal_open: WallGrid,
    start: Cell,
    goal: Cell,
}

impl MazeDescription {
    /// Assemble a description, checking the wall grids and cells agree with the dimensions.
    pub fn new(rows: RowsCount,
               columns: ColumnsCount,
               vertical_open: WallGrid,
               horizontal_open: WallGrid,
               start: Cell,
               goal: Cell)
               -> Result<MazeDescription> {

        let (RowsCount(r), ColumnsCount(c)) = (rows, columns);
        if r < 1 || c < 1 || r.checked_mul(c).is_none() {
            return Err(ErrorKind::InvalidDimension(r, c).into());
        }
        if (vertical_open.rows(), vertical_open.columns()) != (r, c - 1) {
            return Err(malformed(format!("vertical walls are {}x{}, expected {}x{}",
                                         vertical_open.rows(),
                                         vertical_open.columns(),
                                         r,
                                         c - 1)));
        }
        if (horizontal_open.rows(), horizontal_open.columns()) != (r - 1, c) {
            return Err(malformed(format!("horizontal walls are {}x{}, expected {}x{}",
                                         horizontal_open.rows(),
                                         horizontal_open.columns(),
                                         r - 1,
                                         c)));
        }
        for (name, cell) in &[("start", start), ("goal", goal)] {
            if !cell.is_within(rows, columns) {
                return Err(malformed(format!("{} cell ({}, {}) lies outside the grid",
                                             name,
                                             cell.row,
                                             cell.column)));
            }
        }

        Ok(MazeDescription {
            rows: r,
            columns: c,
            vertical_open,
            horizontal_open,
            start,
            goal,
        })
    }

    /// Parse a JSON description, rejecting any whose shape does not match its dimensions.
    pub fn from_json(json: &str) -> Result<MazeDescription> {
        serde_json::from_str(json).map_err(|e| {
            warn!("Rejected maze description: {}", e);
            e.into()
        })
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    #[inline]
    pub fn rows(&self) -> RowsCount {
        RowsCount(self.rows)
    }

    #[inline]
    pub fn columns(&self) -> ColumnsCount {
        ColumnsCount(self.columns)
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.rows * self.columns
    }

    /// The cell the carve started from.
    #[inline]
    pub fn start(&self) -> Cell {
        self.start
    }

    #[inline]
    pub fn goal(&self) -> Cell {
        self.goal
    }

    /// Walls between `(row, column)` and `(row, column + 1)`.
    #[inline]
    pub fn vertical_open(&self) -> &WallGrid {
        &self.vertical_open
    }

    /// Walls between `(row, column)` and `(row + 1, column)`.
    #[inline]
    pub fn horizontal_open(&self) -> &WallGrid {
        &self.horizontal_open
    }

    pub fn open_walls_count(&self) -> usize {
        self.vertical_open.open_count() + self.horizontal_open.open_count()
    }

    pub fn contains(&self, cell: Cell) -> bool {
        cell.is_within(self.rows(), self.columns())
    }

    /// Can the maze be crossed from `cell` in `direction`?
    /// False at the outer boundary and for cells outside the grid.
    pub fn is_open(&self, cell: Cell, direction: Direction) -> bool {
        if !self.contains(cell) || cell.neighbour(direction, self.rows(), self.columns()).is_none() {
            return false;
        }
        let (row, column) = direction.wall_index(cell);
        match direction.wall_orientation() {
            Orientation::Vertical => self.vertical_open.is_open(row, column),
            Orientation::Horizontal => self.horizontal_open.is_open(row, column),
        }
    }

    /// Cells reachable in one step from `cell` through an open wall.
    pub fn passages(&self, cell: Cell) -> CellSmallVec {
        Direction::ALL
            .iter()
            .filter(|dir| self.is_open(cell, **dir))
            .filter_map(|dir| cell.neighbour(*dir, self.rows(), self.columns()))
            .collect()
    }

    /// Every cell in row major order.
    pub fn cells(&self) -> impl Iterator<Item = Cell> {
        let columns = self.columns();
        (0..self.size()).map(move |i| Cell::from_row_major_index(i, columns))
    }
}

fn malformed(reason: String) -> Error {
    ErrorKind::MalformedDescription(reason).into()
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawMazeDescription {
    rows: usize,
    columns: usize,
    vertical_open: Vec<Vec<bool>>,
    horizontal_open: Vec<Vec<bool>>,
    start: Cell,
    goal: Cell,
}

impl TryFrom<RawMazeDescription> for MazeDescription {
    type Error = Error;

    fn try_from(raw: RawMazeDescription) -> Result<MazeDescription> {
        if raw.rows < 1 || raw.columns < 1 || raw.rows.checked_mul(raw.columns).is_none() {
            return Err(ErrorKind::InvalidDimension(raw.rows, raw.columns).into());
        }
        let vertical = WallGrid::from_rows(raw.rows, raw.columns - 1, &raw.vertical_open)
            .chain_err(|| "vertical walls do not match the maze dimensions")?;
        let horizontal = WallGrid::from_rows(raw.rows - 1, raw.columns, &raw.horizontal_open)
            .chain_err(|| "horizontal walls do not match the maze dimensions")?;

        MazeDescription::new(RowsCount(raw.rows),
                             ColumnsCount(raw.columns),
                             vertical,
                             horizontal,
                             raw.start,
                             raw.goal)
    }
}

impl fmt::Display for MazeDescription {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {

        const CORNER: &str = "+";
        const WALL_LR_3: &str = "---";
        const OPEN_LR_3: &str = "   ";
        const WALL_UD: &str = "|";
        const OPEN_UD: &str = " ";

        // North most boundary, every other row draws its own southern walls.
        let mut output = String::from(CORNER);
        for _ in 0..self.columns {
            output.push_str(WALL_LR_3);
            output.push_str(CORNER);
        }
        output.push('\n');

        for row in 0..self.rows {
            let mut middle = String::from(WALL_UD);
            let mut bottom = String::from(CORNER);

            for column in 0..self.columns {
                let cell = Cell::new(row, column);
                let body = match (cell == self.start, cell == self.goal) {
                    (true, true) => " @ ",
                    (true, false) => " S ",
                    (false, true) => " G ",
                    (false, false) => "   ",
                };
                middle.push_str(body);
                middle.push_str(if self.is_open(cell, Direction::Right) { OPEN_UD } else { WALL_UD });

                bottom.push_str(if self.is_open(cell, Direction::Down) { OPEN_LR_3 } else { WALL_LR_3 });
                bottom.push_str(CORNER);
            }

            output.push_str(&middle);
            output.push('\n');
            output.push_str(&bottom);
            output.push('\n');
        }

        write!(f, "{}", output)
    }
}
