//! **mazes** generates perfect mazes on a rectangular grid with a randomized depth-first carve
//! and derives obstacle geometry from them for a physics or rendering consumer.

pub mod cells;
pub mod errors;
pub mod exporter;
pub mod generators;
pub mod maze;
pub mod pathing;
pub mod random;
pub mod topology;
pub mod units;
pub mod walls;
mod utils;

pub use crate::errors::{Error, ErrorKind, Result};
pub use crate::maze::MazeDescription;
