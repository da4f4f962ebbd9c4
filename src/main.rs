use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;
use thiserror::Error;

use reindeer_maze::logging;
use reindeer_maze::render::{render_cells, render_path};
use reindeer_maze::{min_cost_with, solve_with, GoalFacings, Maze, MazeError, SearchOptions};

#[derive(Parser, Debug)]
#[command(author, version, about = "Scores the reindeer maze and counts the cells on its best routes.", long_about = None)]
struct Cli {
    /// Maze file: `#` wall, `.` floor, `S` start, `E` end
    input: PathBuf,

    /// Solve only part 1 (lowest score) or part 2 (cells on a best route)
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=2))]
    part: Option<u8>,

    /// Print the maze with each answer drawn on it
    #[arg(short, long)]
    render: bool,

    /// Skip turns that end facing a wall
    #[arg(long)]
    prune_rotations: bool,

    /// Only count best routes that reach the end facing North or East
    #[arg(long)]
    legacy_goal_facings: bool,

    /// Debug logging on stderr; overrides REINDEER_MAZE_LOG and RUST_LOG
    #[arg(short, long)]
    verbose: bool,

    /// Log level or filter directive; overrides --verbose, REINDEER_MAZE_LOG and RUST_LOG
    #[arg(long, env = "REINDEER_MAZE_LOG_LEVEL")]
    log_level: Option<String>,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,
}

#[derive(Error, Debug)]
enum AppError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Maze(#[from] MazeError),
}

impl Cli {
    fn search_options(&self) -> SearchOptions {
        SearchOptions {
            prune_rotations: self.prune_rotations,
            goal_facings: if self.legacy_goal_facings {
                GoalFacings::NorthEast
            } else {
                GoalFacings::AllOptimal
            },
        }
    }
}

fn run(cli: &Cli) -> Result<(), AppError> {
    let input = std::fs::read_to_string(&cli.input)
        .map_err(|source| AppError::Io { path: cli.input.clone(), source })?;
    let maze: Maze = input.parse()?;
    tracing::debug!(rows = maze.rows(), cols = maze.cols(), start = %maze.start(), end = %maze.end(), "parsed");
    let opts = cli.search_options();

    let time = Instant::now();
    let (part1, part2) = (cli.part != Some(2), cli.part != Some(1));

    // part 1 alone stops at the first goal; anything else needs the full search
    if part1 && !part2 && !cli.render {
        match min_cost_with(&maze, opts) {
            Some(cost) => println!("Part 1: {cost}"),
            None => println!("Part 1: unreachable"),
        }
        tracing::info!(elapsed = ?time.elapsed(), "solved");
        return Ok(());
    }

    let solution = match solve_with(&maze, opts) {
        Ok(solution) => solution,
        Err(MazeError::Unreachable) if part1 => {
            println!("Part 1: unreachable");
            if part2 {
                return Err(MazeError::Unreachable.into());
            }
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };
    tracing::info!(elapsed = ?time.elapsed(), "solved");

    if part1 {
        println!("Part 1: {}", solution.cost);
    }
    if part2 {
        println!("Part 2: {}", solution.cells.len());
    }
    if cli.render {
        if part1 {
            println!("{}", render_path(&maze, &solution.path));
        }
        if part2 {
            println!("{}", render_cells(&maze, &solution.cells));
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = logging::init_tracing(cli.verbose, cli.log_level.as_deref(), cli.log_json) {
        eprintln!("Warning: Failed to initialize logging: {e}");
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
