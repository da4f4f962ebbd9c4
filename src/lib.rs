//! Lowest-score routes through the reindeer maze.
//!
//! ```
//! use reindeer_maze::{best_path_cells, min_cost, Maze};
//!
//! let maze: Maze = "#####\n#S.E#\n#####".parse().unwrap();
//! assert_eq!(min_cost(&maze), Some(2));
//! assert_eq!(best_path_cells(&maze).unwrap().len(), 3);
//! ```

pub mod error;
pub mod logging;
pub mod maze;
pub mod render;
pub mod search;

pub use error::MazeError;
pub use maze::{Cost, Dir, Maze, Move, Pos, State};
pub use search::{
    best_path, best_path_cells, best_path_cells_with, best_path_with, min_cost, min_cost_with,
    path_moves, solve, solve_with, walk_cost, GoalFacings, SearchOptions, Solution,
};
