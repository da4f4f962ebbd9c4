//! Grid model of the reindeer maze and its text parser.
//!
//! A maze is a rectangular grid of walls and floor with one start cell and
//! one end cell. The reindeer always starts facing [`Dir::East`] and may
//! finish facing any direction.

use std::fmt;
use std::str::FromStr;

use bitvec::prelude::*;
use itertools::Itertools;

use crate::error::MazeError;

pub type Cost = u64;

pub const STEP_COST: Cost = 1;
pub const TURN_COST: Cost = 1000;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Dir {
    North,
    East,
    South,
    West,
}

impl Dir {
    pub const ALL: [Dir; 4] = [Dir::North, Dir::East, Dir::South, Dir::West];

    pub const fn clockwise(self) -> Dir {
        match self {
            Dir::North => Dir::East,
            Dir::East => Dir::South,
            Dir::South => Dir::West,
            Dir::West => Dir::North,
        }
    }

    pub const fn counter_clockwise(self) -> Dir {
        match self {
            Dir::North => Dir::West,
            Dir::West => Dir::South,
            Dir::South => Dir::East,
            Dir::East => Dir::North,
        }
    }

    pub const fn arrow(self) -> u8 {
        match self {
            Dir::North => b'^',
            Dir::East => b'>',
            Dir::South => b'v',
            Dir::West => b'<',
        }
    }
}

/// A 0-indexed grid coordinate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pos {
    pub row: usize,
    pub col: usize,
}

impl Pos {
    pub const fn new(row: usize, col: usize) -> Self {
        Pos { row, col }
    }

    /// The neighbouring coordinate in `dir`, or `None` past row or column 0.
    pub fn step(self, dir: Dir) -> Option<Pos> {
        let Pos { row, col } = self;
        Some(match dir {
            Dir::North => Pos::new(row.checked_sub(1)?, col),
            Dir::East => Pos::new(row, col.checked_add(1)?),
            Dir::South => Pos::new(row.checked_add(1)?, col),
            Dir::West => Pos::new(row, col.checked_sub(1)?),
        })
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// An oriented position: the node type of the search graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct State {
    pub pos: Pos,
    pub dir: Dir,
}

impl State {
    pub const fn new(pos: Pos, dir: Dir) -> Self {
        State { pos, dir }
    }

    /// The state after `mv`, ignoring walls. `None` if a forward move
    /// would leave the non-negative quadrant.
    pub fn apply(self, mv: Move) -> Option<State> {
        match mv {
            Move::Forward => self.pos.step(self.dir).map(|pos| State::new(pos, self.dir)),
            Move::Clockwise => Some(State::new(self.pos, self.dir.clockwise())),
            Move::CounterClockwise => Some(State::new(self.pos, self.dir.counter_clockwise())),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Move {
    Forward,
    Clockwise,
    CounterClockwise,
}

impl Move {
    pub const ALL: [Move; 3] = [Move::Forward, Move::Clockwise, Move::CounterClockwise];

    pub const fn cost(self) -> Cost {
        match self {
            Move::Forward => STEP_COST,
            Move::Clockwise | Move::CounterClockwise => TURN_COST,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Maze {
    rows: usize,
    cols: usize,
    walls: BitVec,
    start: Pos,
    end: Pos,
}

impl Maze {
    pub const START_DIR: Dir = Dir::East;

    /// Builds a maze from its wall coordinates. `start` and `end` may coincide.
    pub fn new(
        rows: usize,
        cols: usize,
        walls: impl IntoIterator<Item = Pos>,
        start: Pos,
        end: Pos,
    ) -> Result<Self, MazeError> {
        if rows == 0 || cols == 0 {
            return Err(MazeError::Empty);
        }
        let mut maze = Maze { rows, cols, walls: bitvec![0; rows * cols], start, end };
        for pos in [start, end] {
            if !maze.contains(pos) {
                return Err(MazeError::OutOfBounds { pos });
            }
        }
        for pos in walls {
            maze.add_wall(pos)?;
        }
        Ok(maze)
    }

    /// A copy of this maze with one more wall.
    pub fn with_wall(&self, pos: Pos) -> Result<Maze, MazeError> {
        let mut maze = self.clone();
        maze.add_wall(pos)?;
        Ok(maze)
    }

    fn add_wall(&mut self, pos: Pos) -> Result<(), MazeError> {
        if !self.contains(pos) {
            return Err(MazeError::OutOfBounds { pos });
        }
        if pos == self.start || pos == self.end {
            return Err(MazeError::StartOrEndIsWall);
        }
        let index = self.index(pos);
        self.walls.set(index, true);
        Ok(())
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn start(&self) -> Pos {
        self.start
    }

    pub fn end(&self) -> Pos {
        self.end
    }

    pub fn start_state(&self) -> State {
        State::new(self.start, Self::START_DIR)
    }

    pub fn contains(&self, pos: Pos) -> bool {
        pos.row < self.rows && pos.col < self.cols
    }

    /// Cells outside the grid count as walls.
    pub fn is_wall(&self, pos: Pos) -> bool {
        !self.contains(pos) || self.walls[self.index(pos)]
    }

    pub fn open_cells(&self) -> impl Iterator<Item = Pos> + '_ {
        (0..self.rows)
            .cartesian_product(0..self.cols)
            .map(|(row, col)| Pos::new(row, col))
            .filter(|&pos| !self.is_wall(pos))
    }

    /// The maze as rows of `#`, `.`, `S` and `E` bytes.
    pub fn to_grid(&self) -> Vec<Vec<u8>> {
        let mut grid = (0..self.rows)
            .map(|row| {
                (0..self.cols)
                    .map(|col| if self.is_wall(Pos::new(row, col)) { b'#' } else { b'.' })
                    .collect::<Vec<_>>()
            })
            .collect::<Vec<_>>();
        grid[self.start.row][self.start.col] = b'S';
        grid[self.end.row][self.end.col] = b'E';
        grid
    }

    fn index(&self, pos: Pos) -> usize {
        pos.row * self.cols + pos.col
    }
}

impl FromStr for Maze {
    type Err = MazeError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let lines = input
            .trim()
            .lines()
            .map(|line| line.trim_end_matches('\r'))
            .collect::<Vec<_>>();
        let Some(first) = lines.first() else { return Err(MazeError::Empty) };
        let cols = first.chars().count();

        let mut walls = Vec::new();
        let mut starts = Vec::new();
        let mut ends = Vec::new();
        for (row, line) in lines.iter().enumerate() {
            let mut found = 0;
            for (col, cell) in line.chars().enumerate() {
                let pos = Pos::new(row, col);
                match cell {
                    '#' => walls.push(pos),
                    'S' => starts.push(pos),
                    'E' => ends.push(pos),
                    '.' => (),
                    _ => return Err(MazeError::UnexpectedCell { cell, row, col }),
                }
                found += 1;
            }
            if found != cols {
                return Err(MazeError::Ragged { row, expected: cols, found });
            }
        }

        let start = match starts[..] {
            [pos] => pos,
            [] => return Err(MazeError::MissingStart),
            _ => return Err(MazeError::DuplicateStart { count: starts.len() }),
        };
        let end = match ends[..] {
            [pos] => pos,
            [] => return Err(MazeError::MissingEnd),
            _ => return Err(MazeError::DuplicateEnd { count: ends.len() }),
        };
        Maze::new(lines.len(), cols, walls, start, end)
    }
}

impl fmt::Display for Maze {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.to_grid() {
            writeln!(f, "{}", String::from_utf8_lossy(&line))?;
        }
        Ok(())
    }
}
