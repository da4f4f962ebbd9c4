//! Text overlays of search results onto the maze.

use itertools::Itertools;
use rustc_hash::FxHashSet;

use crate::maze::{Maze, Pos, State};

fn join_rows(grid: Vec<Vec<u8>>) -> String {
    grid.into_iter().map(|row| String::from_utf8_lossy(&row).into_owned()).join("\n")
}

/// The maze with every cell in `cells` drawn as `O`.
pub fn render_cells(maze: &Maze, cells: &FxHashSet<Pos>) -> String {
    let mut grid = maze.to_grid();
    for pos in cells.iter().filter(|&&pos| maze.contains(pos)) {
        grid[pos.row][pos.col] = b'O';
    }
    join_rows(grid)
}

/// The maze with the route drawn as arrows. Each cell shows the facing the
/// reindeer had when it left; `S` and `E` are kept.
pub fn render_path(maze: &Maze, path: &[State]) -> String {
    let mut grid = maze.to_grid();
    for state in path {
        let pos = state.pos;
        if pos != maze.start() && pos != maze.end() && maze.contains(pos) {
            grid[pos.row][pos.col] = state.dir.arrow();
        }
    }
    join_rows(grid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::{best_path, best_path_cells};

    const CORNER: &str = "\
#######
#....E#
#.###.#
#S....#
#######";

    #[test]
    fn draws_best_cells() {
        let maze: Maze = CORNER.parse().unwrap();
        let cells = best_path_cells(&maze).unwrap();
        assert_eq!(
            render_cells(&maze, &cells),
            "\
#######
#....O#
#.###O#
#OOOOO#
#######"
        );
    }

    #[test]
    fn draws_route_arrows() {
        let maze: Maze = "\
######
#...E#
#.####
#S...#
######"
            .parse()
            .unwrap();
        let path = best_path(&maze).unwrap();
        assert_eq!(
            render_path(&maze, &path),
            "\
######
#>>>E#
#^####
#S...#
######"
        );
    }

    #[test]
    fn plain_maze_without_overlay() {
        let maze: Maze = CORNER.parse().unwrap();
        assert_eq!(render_cells(&maze, &FxHashSet::default()), CORNER);
        assert_eq!(render_path(&maze, &[]), CORNER);
    }
}
