// Flood fill distances over a maze's passages and the routes they imply.
//
// In a perfect maze there is exactly one route between any two cells, so the "shortest" path
// is simply the path. The same code still gives shortest routes on a hand built description
// with loops in it.

use smallvec::SmallVec;

use crate::cells::Cell;
use crate::maze::MazeDescription;
use crate::utils::{self, FnvHashMap};

#[derive(Debug, Clone)]
pub struct Distances {
    start: Cell,
    distances: FnvHashMap<Cell, usize>,
    max_distance: usize,
}

impl Distances {
    /// Steps from `start` to every cell reachable through open walls.
    /// None if `start` is outside the maze.
    pub fn new(maze: &MazeDescription, start: Cell) -> Option<Distances> {

        if !maze.contains(start) {
            return None;
        }

        let mut max = 0;
        let mut distances = utils::fnv_hashmap(maze.size());
        distances.insert(start, 0);

        // Every link is one step, so the first time a cell is reached is the shortest distance
        // to it and the map doubles as the visited set.
        let mut frontier = vec![start];
        while !frontier.is_empty() {

            let mut new_frontier = vec![];
            for cell in &frontier {
                let distance_to_cell = distances[cell];
                if distance_to_cell > max {
                    max = distance_to_cell;
                }

                for linked in maze.passages(*cell).iter() {
                    if !distances.contains_key(linked) {
                        distances.insert(*linked, distance_to_cell + 1);
                        new_frontier.push(*linked);
                    }
                }
            }
            frontier = new_frontier;
        }

        Some(Distances {
            start,
            distances,
            max_distance: max,
        })
    }

    #[inline(always)]
    pub fn start(&self) -> Cell {
        self.start
    }

    #[inline(always)]
    pub fn max(&self) -> usize {
        self.max_distance
    }

    #[inline(always)]
    pub fn distance_from_start_to(&self, cell: Cell) -> Option<usize> {
        self.distances.get(&cell).cloned()
    }

    /// How many cells, including the start, can be reached.
    #[inline]
    pub fn reachable_count(&self) -> usize {
        self.distances.len()
    }

    /// The cells at the maximum distance, in row major order.
    pub fn furthest_cells(&self) -> SmallVec<[Cell; 8]> {
        let mut furthest = self.distances
            .iter()
            .filter(|&(_, distance)| *distance == self.max_distance)
            .map(|(cell, _)| *cell)
            .collect::<SmallVec<[Cell; 8]>>();
        furthest.sort();
        furthest
    }
}

/// Route from the distances' start to `end`, both ends included.
/// None if `end` cannot be reached.
pub fn shortest_path(maze: &MazeDescription,
                     distances_from_start: &Distances,
                     end: Cell)
                     -> Option<Vec<Cell>> {

    let mut current_distance = distances_from_start.distance_from_start_to(end)?;
    let mut path = vec![end];
    let mut current = end;

    // Walk downhill to the start.
    while current != distances_from_start.start() {
        let closer = maze.passages(current)
            .iter()
            .cloned()
            .find(|linked| {
                distances_from_start.distance_from_start_to(*linked)
                                    .map_or(false, |d| d + 1 == current_distance)
            })?;

        current = closer;
        current_distance -= 1;
        path.push(current);
    }

    path.reverse();
    Some(path)
}

/// The route a token placed in the top left cell follows to the goal.
pub fn solution(maze: &MazeDescription) -> Option<Vec<Cell>> {
    let distances = Distances::new(maze, Cell::new(0, 0))?;
    shortest_path(maze, &distances, maze.goal())
}

/// The longest route through a perfect maze: the cell furthest from an arbitrary cell is one
/// end of it, and the cell furthest from that is the other.
pub fn longest_path(maze: &MazeDescription) -> Option<Vec<Cell>> {
    let first_distances = Distances::new(maze, Cell::new(0, 0))?;
    let path_start = *first_distances.furthest_cells().first()?;

    let distances_from_start = Distances::new(maze, path_start)?;
    let path_end = *distances_from_start.furthest_cells().first()?;

    shortest_path(maze, &distances_from_start, path_end)
}
