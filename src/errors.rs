// Create the Error, ErrorKind, ResultExt, and Result types.
// Other modules `use crate::errors::*;` to get access to everything `error_chain!` creates.
use error_chain::*;

error_chain! {

    foreign_links {
        Entropy(::rand::Error);
        Json(::serde_json::Error);
        Io(::std::io::Error);
    }

    errors {
        InvalidDimension(rows: usize, columns: usize) {
            description("maze dimensions must be at least 1x1")
            display("invalid maze dimensions: {} rows by {} columns, both must be at least 1",
                    rows, columns)
        }

        CellOutOfBounds(row: usize, column: usize) {
            description("cell lies outside the grid")
            display("cell (row {}, column {}) lies outside the grid", row, column)
        }

        InvalidBound(bound: usize) {
            description("random draw requested with an empty range")
            display("cannot draw a random integer below {}", bound)
        }

        RandomSource(reason: String) {
            description("random source failed to produce a value")
            display("random source failed to produce a value: {}", reason)
        }

        InvalidCellSize(width: f64, height: f64) {
            description("cell size must be finite and positive")
            display("invalid cell size {} x {}: both sides must be finite and positive", width, height)
        }

        InvalidExportOption(name: String, value: f64) {
            description("export option must be finite and positive")
            display("invalid {} {}: must be finite and positive", name, value)
        }

        MalformedDescription(reason: String) {
            description("maze description is inconsistent")
            display("malformed maze description: {}", reason)
        }
    }
}
