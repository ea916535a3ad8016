//! Turns a maze description into obstacle geometry for a physics or rendering consumer.
//!
//! Rectangles are given by their centre and size, the convention of most 2D physics engines.
//! The origin is the top left corner of the maze, x grows to the right and y grows downwards.

use serde_derive::Serialize;

use crate::cells::{Cell, Orientation};
use crate::errors::*;
use crate::maze::MazeDescription;
use crate::units::{ColumnsCount, RowsCount};

pub const DEFAULT_WALL_THICKNESS: f64 = 10.0;
pub const DEFAULT_BOUNDARY_THICKNESS: f64 = 2.0;
pub const DEFAULT_GOAL_SCALE: f64 = 0.5;
pub const DEFAULT_TOKEN_SCALE: f64 = 0.5;

/// Physical size of one grid cell.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct CellSize {
    pub width: f64,
    pub height: f64,
}

impl CellSize {
    pub fn new(width: f64, height: f64) -> Result<CellSize> {
        let size = CellSize { width, height };
        size.validate()?;
        Ok(size)
    }

    /// Share a viewport evenly between the cells of a `rows` x `columns` grid.
    pub fn from_viewport(width: f64,
                         height: f64,
                         rows: RowsCount,
                         columns: ColumnsCount)
                         -> Result<CellSize> {
        if rows.0 < 1 || columns.0 < 1 {
            return Err(ErrorKind::InvalidDimension(rows.0, columns.0).into());
        }
        CellSize::new(width / columns.0 as f64, height / rows.0 as f64)
    }

    fn validate(&self) -> Result<()> {
        let valid = |side: f64| side.is_finite() && side > 0.0;
        if valid(self.width) && valid(self.height) {
            Ok(())
        } else {
            Err(ErrorKind::InvalidCellSize(self.width, self.height).into())
        }
    }
}

/// Which cell the movable token starts in.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub enum TokenPlacement {
    /// Always the top left cell, whatever cell the carve began from.
    TopLeft,
    /// The cell the carve began from.
    CarveOrigin,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExportOptions {
    cell_size: CellSize,
    wall_thickness: f64,
    boundary_thickness: Option<f64>,
    goal_scale: f64,
    token_scale: f64,
    token_placement: TokenPlacement,
}

impl ExportOptions {
    fn validate(&self) -> Result<()> {
        self.cell_size.validate()?;

        let mut measures = vec![("wall thickness", self.wall_thickness),
                                ("goal scale", self.goal_scale),
                                ("token scale", self.token_scale)];
        if let Some(t) = self.boundary_thickness {
            measures.push(("boundary thickness", t));
        }
        match measures.into_iter().find(|&(_, value)| !(value.is_finite() && value > 0.0)) {
            Some((name, value)) => Err(ErrorKind::InvalidExportOption(name.to_string(), value).into()),
            None => Ok(()),
        }
    }
}

pub struct ExportOptionsBuilder {
    options: ExportOptions,
}

impl ExportOptionsBuilder {
    pub fn new(cell_size: CellSize) -> ExportOptionsBuilder {
        ExportOptionsBuilder {
            options: ExportOptions {
                cell_size,
                wall_thickness: DEFAULT_WALL_THICKNESS,
                boundary_thickness: Some(DEFAULT_BOUNDARY_THICKNESS),
                goal_scale: DEFAULT_GOAL_SCALE,
                token_scale: DEFAULT_TOKEN_SCALE,
                token_placement: TokenPlacement::TopLeft,
            },
        }
    }

    pub fn wall_thickness(mut self, thickness: f64) -> ExportOptionsBuilder {
        self.options.wall_thickness = thickness;
        self
    }

    /// Frame the whole maze with four boundary walls of this thickness, or leave it open.
    pub fn boundary_thickness(mut self, thickness: Option<f64>) -> ExportOptionsBuilder {
        self.options.boundary_thickness = thickness;
        self
    }

    /// Goal marker size as a fraction of the cell size.
    pub fn goal_scale(mut self, scale: f64) -> ExportOptionsBuilder {
        self.options.goal_scale = scale;
        self
    }

    /// Start marker side as a fraction of the cell's shorter side.
    pub fn token_scale(mut self, scale: f64) -> ExportOptionsBuilder {
        self.options.token_scale = scale;
        self
    }

    pub fn token_placement(mut self, placement: TokenPlacement) -> ExportOptionsBuilder {
        self.options.token_placement = placement;
        self
    }

    pub fn build(self) -> ExportOptions {
        self.options
    }
}

/// An axis aligned rectangle given by its centre and size.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Rect {
        Rect { x, y, width, height }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub enum ObstacleKind {
    /// Part of the frame around the whole maze.
    Boundary,
    /// A closed wall between two cells.
    Wall,
}

#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct Obstacle {
    pub kind: ObstacleKind,
    pub orientation: Orientation,
    pub rect: Rect,
}

/// Static geometry for one maze plus where the token starts and where the goal zone is.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MazeLayout {
    pub width: f64,
    pub height: f64,
    pub obstacles: Vec<Obstacle>,
    pub start: Rect,
    pub goal: Rect,
}

impl MazeLayout {
    pub fn walls(&self) -> impl Iterator<Item = &Obstacle> {
        self.obstacles.iter().filter(|o| o.kind == ObstacleKind::Wall)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Lay out the closed walls of `maze` as obstacle rectangles.
pub fn export(maze: &MazeDescription, options: &ExportOptions) -> Result<MazeLayout> {
    options.validate()?;

    let CellSize { width: w, height: h } = options.cell_size;
    let total_width = maze.columns().0 as f64 * w;
    let total_height = maze.rows().0 as f64 * h;

    let mut obstacles = Vec::new();

    if let Some(t) = options.boundary_thickness {
        let frame = [(Orientation::Horizontal, Rect::new(total_width / 2.0, 0.0, total_width, t)),
                     (Orientation::Horizontal, Rect::new(total_width / 2.0, total_height, total_width, t)),
                     (Orientation::Vertical, Rect::new(0.0, total_height / 2.0, t, total_height)),
                     (Orientation::Vertical, Rect::new(total_width, total_height / 2.0, t, total_height))];
        obstacles.extend(frame.iter().map(|&(orientation, rect)| {
            Obstacle {
                kind: ObstacleKind::Boundary,
                orientation,
                rect,
            }
        }));
    }

    let thickness = options.wall_thickness;

    // A horizontal wall runs along the bottom edge of cell (row, column).
    obstacles.extend(maze.horizontal_open().iter_closed().map(|(row, column)| {
        Obstacle {
            kind: ObstacleKind::Wall,
            orientation: Orientation::Horizontal,
            rect: Rect::new(column as f64 * w + w / 2.0, row as f64 * h + h, w, thickness),
        }
    }));

    // A vertical wall runs along the right edge of cell (row, column).
    obstacles.extend(maze.vertical_open().iter_closed().map(|(row, column)| {
        Obstacle {
            kind: ObstacleKind::Wall,
            orientation: Orientation::Vertical,
            rect: Rect::new(column as f64 * w + w, row as f64 * h + h / 2.0, thickness, h),
        }
    }));

    let token_cell = match options.token_placement {
        TokenPlacement::TopLeft => Cell::new(0, 0),
        TokenPlacement::CarveOrigin => maze.start(),
    };
    let token_side = w.min(h) * options.token_scale;
    let goal = maze.goal();

    Ok(MazeLayout {
        width: total_width,
        height: total_height,
        obstacles,
        start: centred_in(token_cell, w, h, token_side, token_side),
        goal: centred_in(goal, w, h, w * options.goal_scale, h * options.goal_scale),
    })
}

fn centred_in(cell: Cell, w: f64, h: f64, width: f64, height: f64) -> Rect {
    Rect::new(cell.column as f64 * w + w / 2.0,
              cell.row as f64 * h + h / 2.0,
              width,
              height)
}

#[cfg(test)]
mod tests {

    use quickcheck::quickcheck;

    use super::*;
    use crate::generators::generate;
    use crate::random::seeded_source;
    use crate::walls::WallGrid;

    fn options(w: f64, h: f64) -> ExportOptions {
        ExportOptionsBuilder::new(CellSize::new(w, h).unwrap()).build()
    }

    // Carved from the bottom right; only the wall between (0, 0) and (0, 1) is closed.
    fn small_maze() -> MazeDescription {
        let vertical = WallGrid::from_rows(2, 1, &[vec![false], vec![true]]).unwrap();
        let horizontal = WallGrid::from_rows(1, 2, &[vec![true, true]]).unwrap();
        MazeDescription::new(RowsCount(2),
                             ColumnsCount(2),
                             vertical,
                             horizontal,
                             Cell::new(1, 1),
                             Cell::new(1, 1))
            .unwrap()
    }

    #[test]
    fn cell_size_must_be_positive_and_finite() {
        assert!(CellSize::new(1.0, 1.0).is_ok());
        assert!(CellSize::new(0.0, 1.0).is_err());
        assert!(CellSize::new(1.0, -2.0).is_err());
        assert!(CellSize::new(::std::f64::NAN, 1.0).is_err());
        assert!(CellSize::new(1.0, ::std::f64::INFINITY).is_err());
    }

    #[test]
    fn cell_size_from_viewport() {
        let size = CellSize::from_viewport(1400.0, 1300.0, RowsCount(13), ColumnsCount(14)).unwrap();
        assert_eq!(size, CellSize { width: 100.0, height: 100.0 });
        assert!(CellSize::from_viewport(100.0, 100.0, RowsCount(0), ColumnsCount(1)).is_err());
    }

    #[test]
    fn closed_walls_become_obstacles() {
        let layout = export(&small_maze(), &options(40.0, 30.0)).unwrap();

        assert_eq!((layout.width, layout.height), (80.0, 60.0));
        let walls: Vec<&Obstacle> = layout.walls().collect();
        assert_eq!(walls.len(), 1);
        assert_eq!(walls[0].orientation, Orientation::Vertical);
        assert_eq!(walls[0].rect, Rect::new(40.0, 15.0, DEFAULT_WALL_THICKNESS, 30.0));
    }

    #[test]
    fn horizontal_wall_geometry() {
        let vertical = WallGrid::from_rows(2, 1, &[vec![true], vec![true]]).unwrap();
        let horizontal = WallGrid::from_rows(1, 2, &[vec![true, false]]).unwrap();
        let maze = MazeDescription::new(RowsCount(2),
                                        ColumnsCount(2),
                                        vertical,
                                        horizontal,
                                        Cell::new(0, 0),
                                        Cell::new(1, 1))
            .unwrap();
        let layout = export(&maze, &options(40.0, 30.0)).unwrap();
        let walls: Vec<&Obstacle> = layout.walls().collect();
        assert_eq!(walls.len(), 1);
        assert_eq!(walls[0].orientation, Orientation::Horizontal);
        assert_eq!(walls[0].rect, Rect::new(60.0, 30.0, 40.0, DEFAULT_WALL_THICKNESS));
    }

    #[test]
    fn boundary_frames_the_maze() {
        let layout = export(&small_maze(), &options(40.0, 30.0)).unwrap();
        let frame: Vec<Rect> = layout.obstacles
            .iter()
            .filter(|o| o.kind == ObstacleKind::Boundary)
            .map(|o| o.rect)
            .collect();
        assert_eq!(frame,
                   vec![Rect::new(40.0, 0.0, 80.0, 2.0),
                        Rect::new(40.0, 60.0, 80.0, 2.0),
                        Rect::new(0.0, 30.0, 2.0, 60.0),
                        Rect::new(80.0, 30.0, 2.0, 60.0)]);

        let unframed = ExportOptionsBuilder::new(CellSize::new(40.0, 30.0).unwrap())
            .boundary_thickness(None)
            .build();
        let layout = export(&small_maze(), &unframed).unwrap();
        assert!(layout.obstacles.iter().all(|o| o.kind == ObstacleKind::Wall));
    }

    #[test]
    fn start_and_goal_markers() {
        let layout = export(&small_maze(), &options(40.0, 30.0)).unwrap();
        assert_eq!(layout.goal, Rect::new(60.0, 45.0, 20.0, 15.0));
        assert_eq!(layout.start, Rect::new(20.0, 15.0, 15.0, 15.0));

        let from_origin = ExportOptionsBuilder::new(CellSize::new(40.0, 30.0).unwrap())
            .token_placement(TokenPlacement::CarveOrigin)
            .token_scale(1.0)
            .goal_scale(1.0)
            .wall_thickness(4.0)
            .build();
        let layout = export(&small_maze(), &from_origin).unwrap();
        assert_eq!(layout.start, Rect::new(60.0, 45.0, 30.0, 30.0));
        assert_eq!(layout.goal, Rect::new(60.0, 45.0, 40.0, 30.0));
        assert_eq!(layout.walls().next().map(|o| o.rect.width), Some(4.0));
    }

    #[test]
    fn invalid_cell_size_is_rejected() {
        let mut opts = options(10.0, 10.0);
        opts.cell_size = CellSize { width: 0.0, height: 10.0 };
        match export(&small_maze(), &opts) {
            Err(e) => match *e.kind() {
                ErrorKind::InvalidCellSize(..) => {}
                ref other => panic!("unexpected error {:?}", other),
            },
            Ok(_) => panic!("zero width cells exported"),
        }
    }

    #[test]
    fn invalid_thickness_and_scales_are_rejected() {
        let cell_size = CellSize::new(10.0, 10.0).unwrap();
        let bad = [ExportOptionsBuilder::new(cell_size).wall_thickness(-1.0).build(),
                   ExportOptionsBuilder::new(cell_size).wall_thickness(::std::f64::NAN).build(),
                   ExportOptionsBuilder::new(cell_size).boundary_thickness(Some(0.0)).build(),
                   ExportOptionsBuilder::new(cell_size).goal_scale(::std::f64::INFINITY).build(),
                   ExportOptionsBuilder::new(cell_size).token_scale(-0.5).build()];
        for opts in &bad {
            match export(&small_maze(), opts) {
                Err(e) => match *e.kind() {
                    ErrorKind::InvalidExportOption(..) => {}
                    ref other => panic!("unexpected error {:?}", other),
                },
                Ok(_) => panic!("exported with {:?}", opts),
            }
        }

        let unframed = ExportOptionsBuilder::new(cell_size).boundary_thickness(None).build();
        assert!(export(&small_maze(), &unframed).is_ok());
    }

    #[test]
    fn layout_serializes() {
        let layout = export(&small_maze(), &options(40.0, 30.0)).unwrap();
        let json: serde_json::Value = serde_json::from_str(&layout.to_json().unwrap()).unwrap();
        assert_eq!(json["obstacles"].as_array().map(|a| a.len()), Some(5));
        assert_eq!(json["obstacles"][4]["kind"], "Wall");
        assert_eq!(json["goal"]["width"], 20.0);
    }

    #[test]
    fn one_obstacle_per_closed_wall() {
        fn p(rows: u8, columns: u8, seed: u64) -> bool {
            let (rows, columns) = (rows as usize % 20 + 1, columns as usize % 20 + 1);
            let maze = generate(RowsCount(rows), ColumnsCount(columns), &mut seeded_source(seed)).unwrap();
            let layout = export(&maze, &options(10.0, 10.0)).unwrap();
            let internal_walls = rows * (columns - 1) + (rows - 1) * columns;
            let closed = internal_walls - maze.open_walls_count();
            layout.walls().count() == closed && layout.obstacles.len() == closed + 4
        }
        quickcheck(p as fn(u8, u8, u64) -> bool);
    }
}
