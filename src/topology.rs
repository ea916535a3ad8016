use petgraph::algo::{connected_components, is_cyclic_undirected};
use petgraph::graph::{NodeIndex, UnGraph};

use crate::cells::{Cell, Direction};
use crate::maze::MazeDescription;

/// The passage graph of a maze: one node per cell, indexed in row major order, and one edge
/// per open wall weighted with the direction from its upper or left cell.
pub fn passage_graph(maze: &MazeDescription) -> UnGraph<Cell, Direction> {

    let mut graph = UnGraph::with_capacity(maze.size(), maze.open_walls_count());
    for cell in maze.cells() {
        let _ = graph.add_node(cell);
    }

    let columns = maze.columns();
    let node = |cell: Cell| NodeIndex::new(cell.row_major_index(columns));

    for cell in maze.cells() {
        for &direction in &[Direction::Right, Direction::Down] {
            if maze.is_open(cell, direction) {
                if let Some(neighbour) = cell.neighbour(direction, maze.rows(), columns) {
                    let _ = graph.add_edge(node(cell), node(neighbour), direction);
                }
            }
        }
    }

    graph
}

/// Is the maze perfect: every cell reachable from every other by exactly one route?
pub fn is_perfect(maze: &MazeDescription) -> bool {
    let graph = passage_graph(maze);
    graph.edge_count() + 1 == graph.node_count() &&
    connected_components(&graph) == 1 &&
    !is_cyclic_undirected(&graph)
}
