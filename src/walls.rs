use bit_set::BitSet;
use serde::ser::{Serialize, SerializeSeq, Serializer};

use crate::errors::*;

/// A fixed-shape grid of wall marks, `true` meaning open (a passage) and `false` closed.
///
/// Walls can be opened but never closed again. A grid may have zero rows or zero columns,
/// e.g. the vertical walls of a single column maze.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WallGrid {
    rows: usize,
    columns: usize,
    open: BitSet,
}

impl WallGrid {
    /// An all closed grid. Fails if `rows * columns` walls cannot be addressed.
    pub fn closed(rows: usize, columns: usize) -> Result<WallGrid> {
        let size = rows.checked_mul(columns)
                       .ok_or_else(|| Error::from(ErrorKind::InvalidDimension(rows, columns)))?;
        Ok(WallGrid {
            rows,
            columns,
            open: BitSet::with_capacity(size),
        })
    }

    /// Build a grid from nested rows of marks, checking the shape is exactly `rows` x `columns`.
    pub fn from_rows(rows: usize, columns: usize, marks: &[Vec<bool>]) -> Result<WallGrid> {
        if marks.len() != rows {
            return Err(ErrorKind::MalformedDescription(format!("expected {} wall rows, found {}",
                                                               rows,
                                                               marks.len()))
                           .into());
        }

        // Every row is checked before anything is allocated.
        if let Some((row, row_marks)) = marks.iter().enumerate().find(|(_, m)| m.len() != columns) {
            return Err(ErrorKind::MalformedDescription(format!("wall row {} has {} entries, expected {}",
                                                               row,
                                                               row_marks.len(),
                                                               columns))
                           .into());
        }

        let mut grid = WallGrid::closed(rows, columns)?;
        for (row, row_marks) in marks.iter().enumerate() {
            for (column, is_open) in row_marks.iter().enumerate() {
                if *is_open {
                    grid.open(row, column);
                }
            }
        }

        Ok(grid)
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Is the wall open? Walls outside the grid's shape read as closed.
    #[inline]
    pub fn is_open(&self, row: usize, column: usize) -> bool {
        self.index(row, column)
            .map_or(false, |i| self.open.contains(i))
    }

    /// Open a wall. Returns false if it was already open.
    ///
    /// Panics if the wall is outside the grid's shape.
    pub fn open(&mut self, row: usize, column: usize) -> bool {
        let i = self.index(row, column)
                    .unwrap_or_else(|| panic!("wall ({}, {}) outside {}x{} wall grid",
                                              row, column, self.rows, self.columns));
        self.open.insert(i)
    }

    pub fn open_count(&self) -> usize {
        self.open.len()
    }

    /// Nested rows of marks, the inverse of `from_rows`.
    pub fn to_rows(&self) -> Vec<Vec<bool>> {
        (0..self.rows)
            .map(|row| (0..self.columns).map(|column| self.is_open(row, column)).collect())
            .collect()
    }

    /// Coordinates of every wall that is still closed, row by row.
    pub fn iter_closed(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let columns = self.columns;
        (0..self.rows * columns)
            .filter(move |i| !self.open.contains(*i))
            .map(move |i| (i / columns, i % columns))
    }

    #[inline]
    fn index(&self, row: usize, column: usize) -> Option<usize> {
        if row < self.rows && column < self.columns {
            Some(row * self.columns + column)
        } else {
            None
        }
    }
}

impl Serialize for WallGrid {
    fn serialize<S: Serializer>(&self, serializer: S) -> ::std::result::Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.rows))?;
        for row in self.to_rows() {
            seq.serialize_element(&row)?;
        }
        seq.end()
    }
}
