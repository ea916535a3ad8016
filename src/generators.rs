use bit_set::BitSet;
use log::{debug, trace};

use crate::cells::{Cell, Direction, Orientation};
use crate::errors::*;
use crate::maze::MazeDescription;
use crate::random::RandomSource;
use crate::units::{ColumnsCount, RowsCount};
use crate::walls::WallGrid;

/// Shuffle `items` into a uniformly random permutation (Fisher-Yates).
///
/// For each index `i` from the last down to 1 the element at `i` is swapped with one drawn
/// uniformly from `0..=i`, so a slice of length n costs n-1 draws.
pub fn shuffle<T, R>(items: &mut [T], rng: &mut R) -> Result<()>
    where R: RandomSource + ?Sized
{
    for i in (1..items.len()).rev() {
        let j = rng.next_int(i + 1)?;
        items.swap(i, j);
    }
    Ok(())
}

/// Generate a perfect maze with the randomized depth-first carve (recursive backtracker).
///
/// The carve starts from a uniformly random cell, drawing the row then the column. From each
/// cell the four moves are shuffled and tried in turn; a move into an unvisited cell opens the
/// wall between the two cells and carves onwards from the new cell before the next move is
/// tried. The result has exactly `rows * columns - 1` open walls forming a spanning tree.
///
/// The goal is the bottom right cell. Errors from `rng` are returned unchanged.
pub fn generate<R>(rows: RowsCount, columns: ColumnsCount, rng: &mut R) -> Result<MazeDescription>
    where R: RandomSource + ?Sized
{
    check_dimensions(rows, columns)?;

    let start_row = rng.next_int(rows.0)?;
    let start_column = rng.next_int(columns.0)?;

    carve(rows, columns, Cell::new(start_row, start_column), rng)
}

/// As `generate` but carving from a given start cell rather than a random one.
pub fn generate_from<R>(rows: RowsCount,
                        columns: ColumnsCount,
                        start: Cell,
                        rng: &mut R)
                        -> Result<MazeDescription>
    where R: RandomSource + ?Sized
{
    check_dimensions(rows, columns)?;

    if !start.is_within(rows, columns) {
        return Err(ErrorKind::CellOutOfBounds(start.row, start.column).into());
    }

    carve(rows, columns, start, rng)
}

fn check_dimensions(rows: RowsCount, columns: ColumnsCount) -> Result<()> {
    if rows.0 < 1 || columns.0 < 1 || rows.0.checked_mul(columns.0).is_none() {
        return Err(ErrorKind::InvalidDimension(rows.0, columns.0).into());
    }
    Ok(())
}

fn carve<R>(rows: RowsCount, columns: ColumnsCount, start: Cell, rng: &mut R) -> Result<MazeDescription>
    where R: RandomSource + ?Sized
{
    debug!("Carving {}x{} maze from {:?}", rows.0, columns.0, start);

    let mut context = CarveContext::new(rows, columns)?;
    context.run(start, rng)?;

    debug_assert_eq!(context.visited.len(), rows.0 * columns.0);
    let CarveContext { vertical_open, horizontal_open, .. } = context;
    let maze = MazeDescription::new(rows,
                                    columns,
                                    vertical_open,
                                    horizontal_open,
                                    start,
                                    Cell::new(rows.0 - 1, columns.0 - 1))?;

    debug!("Carved {}x{} maze with {} open walls", rows.0, columns.0, maze.open_walls_count());
    Ok(maze)
}

/// The shuffled moves out of a cell and how many of them have been tried.
#[derive(Debug)]
struct Frame {
    cell: Cell,
    moves: [Direction; 4],
    next: usize,
}

/// All mutable state of one carve. Nothing outlives the call to `carve` except the wall grids.
struct CarveContext {
    rows: RowsCount,
    columns: ColumnsCount,
    visited: BitSet,
    vertical_open: WallGrid,
    horizontal_open: WallGrid,
}

impl CarveContext {
    fn new(rows: RowsCount, columns: ColumnsCount) -> Result<CarveContext> {
        let (RowsCount(r), ColumnsCount(c)) = (rows, columns);
        Ok(CarveContext {
            rows,
            columns,
            visited: BitSet::with_capacity(r * c),
            vertical_open: WallGrid::closed(r, c - 1)?,
            horizontal_open: WallGrid::closed(r - 1, c)?,
        })
    }

    /// Depth first traversal with an explicit stack.
    ///
    /// Each frame stands for one pending recursive `visit` call: the next untried move is taken
    /// from the top frame, and entering a neighbour pushes its frame before any sibling moves
    /// are tried. Visit order and random draws therefore match the recursive formulation.
    fn run<R>(&mut self, start: Cell, rng: &mut R) -> Result<()>
        where R: RandomSource + ?Sized
    {
        let mut stack: Vec<Frame> = Vec::new();
        if let Some(frame) = self.enter(start, rng)? {
            stack.push(frame);
        }

        while let Some(frame) = stack.last_mut() {
            if frame.next == frame.moves.len() {
                stack.pop();
                continue;
            }

            let cell = frame.cell;
            let direction = frame.moves[frame.next];
            frame.next += 1;

            let neighbour = match cell.neighbour(direction, self.rows, self.columns) {
                Some(neighbour) => neighbour,
                None => continue,
            };
            if self.is_visited(neighbour) {
                continue;
            }

            self.open_wall(cell, direction);
            if let Some(next_frame) = self.enter(neighbour, rng)? {
                stack.push(next_frame);
            }
        }

        Ok(())
    }

    /// Mark a cell visited and shuffle its moves. None if it was visited already.
    fn enter<R>(&mut self, cell: Cell, rng: &mut R) -> Result<Option<Frame>>
        where R: RandomSource + ?Sized
    {
        if !self.visited.insert(cell.row_major_index(self.columns)) {
            return Ok(None);
        }

        let mut moves = Direction::ALL;
        shuffle(&mut moves, rng)?;

        Ok(Some(Frame {
            cell,
            moves,
            next: 0,
        }))
    }

    #[inline]
    fn is_visited(&self, cell: Cell) -> bool {
        self.visited.contains(cell.row_major_index(self.columns))
    }

    fn open_wall(&mut self, from: Cell, direction: Direction) {
        let (row, column) = direction.wall_index(from);
        trace!("Opening {:?} wall ({}, {}) going {:?} from {:?}",
               direction.wall_orientation(),
               row,
               column,
               direction,
               from);
        match direction.wall_orientation() {
            Orientation::Vertical => self.vertical_open.open(row, column),
            Orientation::Horizontal => self.horizontal_open.open(row, column),
        };
    }
}
