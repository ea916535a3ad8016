use docopt::Docopt;
use log::info;
use serde_derive::Deserialize;
use mazes::{
    exporter::{self, CellSize, ExportOptionsBuilder},
    generators,
    pathing,
    random::{seeded_source, EntropySource},
    units::{ColumnsCount, RowsCount},
    MazeDescription,
};
use std::{
    fs::File,
    io::prelude::*,
};

const USAGE: &str = "Mazes

Usage:
    mazes_driver -h | --help
    mazes_driver [json | text | layout] [--rows=<n>] [--columns=<n>] [--seed=<s>] [--cell-width=<w>] [--cell-height=<h>] [--wall-thickness=<t>] [--out=<path>]

Commands:
    json                    Print the maze description as JSON.
    text                    Draw the maze as text (the default).
    layout                  Print the obstacle layout derived from the maze as JSON.

Options:
    -h --help               Show this screen.
    --rows=<n>              Number of grid rows [default: 13].
    --columns=<n>           Number of grid columns [default: 14].
    --seed=<s>              Seed for a reproducible maze. Without one the maze is drawn from OS entropy.
    --cell-width=<w>        Width of one cell in the layout [default: 40].
    --cell-height=<h>       Height of one cell in the layout [default: 40].
    --wall-thickness=<t>    Thickness of each wall obstacle in the layout [default: 10].
    --out=<path>            Write the output to a file instead of stdout.
";

#[derive(Debug, Deserialize)]
struct MazeArgs {
    cmd_json: bool,
    cmd_text: bool,
    cmd_layout: bool,
    flag_rows: usize,
    flag_columns: usize,
    flag_seed: Option<u64>,
    flag_cell_width: f64,
    flag_cell_height: f64,
    flag_wall_thickness: f64,
    flag_out: Option<String>,
}

mod errors {
    use error_chain::*;
    error_chain! {

        links {
            Maze(::mazes::Error, ::mazes::ErrorKind);
        }

        foreign_links {
            DocOptFailure(::docopt::Error);
            Io(::std::io::Error);
        }
    }
}
use crate::errors::*;

fn main() {
    env_logger::init();

    let args: MazeArgs = match Docopt::new(USAGE).and_then(|d| d.deserialize()) {
        Ok(args) => args,
        Err(e) => e.exit(),
    };

    if let Err(ref e) = run(&args) {
        eprintln!("error: {}", e);
        for cause in e.iter().skip(1) {
            eprintln!("caused by: {}", cause);
        }
        ::std::process::exit(1);
    }
}

fn run(args: &MazeArgs) -> Result<()> {

    let rows = RowsCount(args.flag_rows);
    let columns = ColumnsCount(args.flag_columns);

    let maze = match args.flag_seed {
        Some(seed) => {
            info!("Generating {}x{} maze from seed {}", rows.0, columns.0, seed);
            generators::generate(rows, columns, &mut seeded_source(seed))?
        }
        None => {
            info!("Generating {}x{} maze from OS entropy", rows.0, columns.0);
            generators::generate(rows, columns, &mut EntropySource)?
        }
    };

    if let Some(path) = pathing::solution(&maze) {
        info!("Goal is {} steps from the top left cell", path.len() - 1);
    }

    let output = if args.cmd_json {
        maze.to_json_pretty()?
    } else if args.cmd_layout {
        layout_json(&maze, args)?
    } else {
        format!("{}", maze)
    };

    match args.flag_out {
        Some(ref path) => {
            write_text_to_file(&output, path)
                .chain_err(|| format!("Failed to write maze to file {}", path))?;
        }
        None => println!("{}", output),
    }

    Ok(())
}

fn layout_json(maze: &MazeDescription, args: &MazeArgs) -> Result<String> {
    let cell_size = CellSize::new(args.flag_cell_width, args.flag_cell_height)?;
    let options = ExportOptionsBuilder::new(cell_size)
        .wall_thickness(args.flag_wall_thickness)
        .build();
    let layout = exporter::export(maze, &options)?;
    Ok(serde_json::to_string_pretty(&layout).chain_err(|| "Failed to serialize the maze layout")?)
}

fn write_text_to_file(data: &str, file_name: &str) -> ::std::io::Result<()> {
    let mut f = File::create(file_name)?;
    f.write_all(data.as_bytes())?;
    Ok(())
}
