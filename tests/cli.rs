//! Integration tests for the reindeer-maze binary.

use std::path::PathBuf;

use assert_cmd::{cargo::cargo_bin_cmd, Command};
use predicates::prelude::*;
use tempfile::NamedTempFile;

fn reindeer_maze() -> Command {
    cargo_bin_cmd!("reindeer-maze")
}

fn data(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/data").join(name)
}

fn maze_file(contents: &str) -> NamedTempFile {
    let file = NamedTempFile::new().unwrap();
    std::fs::write(file.path(), contents).unwrap();
    file
}

#[test]
fn test_help_flag() {
    reindeer_maze()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage: reindeer-maze"))
        .stdout(predicate::str::contains("--part"));
}

#[test]
fn test_first_example() {
    reindeer_maze()
        .arg(data("example1.txt"))
        .assert()
        .success()
        .stdout("Part 1: 7036\nPart 2: 45\n");
}

#[test]
fn test_second_example() {
    reindeer_maze()
        .arg(data("example2.txt"))
        .assert()
        .success()
        .stdout("Part 1: 11048\nPart 2: 64\n");
}

#[test]
fn test_single_part() {
    reindeer_maze()
        .args(["--part", "2"])
        .arg(data("example1.txt"))
        .assert()
        .success()
        .stdout("Part 2: 45\n");
}

#[test]
fn test_part_out_of_range() {
    reindeer_maze()
        .args(["--part", "3"])
        .arg(data("example1.txt"))
        .assert()
        .code(2);
}

#[test]
fn test_legacy_options_match_on_examples() {
    reindeer_maze()
        .args(["--prune-rotations", "--legacy-goal-facings"])
        .arg(data("example2.txt"))
        .assert()
        .success()
        .stdout("Part 1: 11048\nPart 2: 64\n");
}

#[test]
fn test_render_draws_route_and_cells() {
    let output = reindeer_maze()
        .arg("--render")
        .arg(data("example1.txt"))
        .assert()
        .success()
        .stdout(predicate::str::contains("#O..#.....#OOO#"))
        .stdout(predicate::str::contains("#OOOOO#...#O#O#"))
        .get_output()
        .stdout
        .clone();
    let stdout = String::from_utf8(output).unwrap();
    let lines = stdout.lines().collect::<Vec<_>>();

    // answers first, then the route overlay, then the cell overlay
    assert_eq!(lines[..2], ["Part 1: 7036", "Part 2: 45"]);
    assert_eq!(lines.len(), 2 + 15 + 15);
    assert!(lines[2..17].iter().any(|line| line.contains('^')));
    assert!(lines[17..].iter().all(|line| !line.contains('^')));
    assert_eq!(lines[17 + 13], "#O..#.....#OOO#");
}

#[test]
fn test_render_single_part() {
    let output = reindeer_maze()
        .args(["--render", "--part", "2"])
        .arg(data("example2.txt"))
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let stdout = String::from_utf8(output).unwrap();
    let lines = stdout.lines().collect::<Vec<_>>();
    assert_eq!(lines[0], "Part 2: 64");
    assert_eq!(lines.len(), 1 + 17);
    assert_eq!(lines[1 + 15], "#O#OOO..........#");
}

#[test]
fn test_unreachable_goal() {
    let file = maze_file("#######\n#S.#.E#\n#######\n");
    reindeer_maze()
        .arg(file.path())
        .assert()
        .failure()
        .stdout(predicate::str::contains("Part 1: unreachable"))
        .stderr(predicate::str::contains("error: no path from start to end"));
}

#[test]
fn test_unreachable_part_one_only_succeeds() {
    let file = maze_file("#######\n#S.#.E#\n#######\n");
    reindeer_maze()
        .args(["--part", "1"])
        .arg(file.path())
        .assert()
        .success()
        .stdout("Part 1: unreachable\n");
}

#[test]
fn test_malformed_maze() {
    let file = maze_file("#####\n#S..#\n#####\n");
    reindeer_maze()
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("error: maze has no end cell 'E'"));
}

#[test]
fn test_missing_file() {
    reindeer_maze()
        .arg(data("does-not-exist.txt"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot read"));
}

#[test]
fn test_verbose_logs_to_stderr() {
    reindeer_maze()
        .args(["-v", "--part", "1"])
        .arg(data("example1.txt"))
        .assert()
        .success()
        .stdout("Part 1: 7036\n")
        .stderr(predicate::str::contains("min_cost"));
}

#[test]
fn test_log_json_lines_on_stderr() {
    let output = reindeer_maze()
        .args(["--log-json", "--log-level", "debug"])
        .arg(data("example1.txt"))
        .env_remove("RUST_LOG")
        .env_remove("REINDEER_MAZE_LOG")
        .assert()
        .success()
        .stdout("Part 1: 7036\nPart 2: 45\n")
        .get_output()
        .stderr
        .clone();
    let stderr = String::from_utf8(output).unwrap();
    let lines = stderr.lines().collect::<Vec<_>>();
    assert!(!lines.is_empty());
    assert!(lines.iter().all(|line| line.starts_with('{') && line.ends_with('}')));
    assert!(lines.iter().any(|line| line.contains("\"level\":\"DEBUG\"")));
    assert!(lines.iter().any(|line| line.contains("\"message\":\"solve\"")));
}

#[test]
fn test_log_level_filters_events() {
    reindeer_maze()
        .args(["--log-level", "error", "--part", "1"])
        .arg(data("example1.txt"))
        .env("RUST_LOG", "debug")
        .assert()
        .success()
        .stdout("Part 1: 7036\n")
        .stderr(predicate::str::is_empty());
}

#[test]
fn test_verbose_flag_beats_environment() {
    reindeer_maze()
        .args(["-v", "--part", "1"])
        .arg(data("example1.txt"))
        .env("RUST_LOG", "off")
        .env("REINDEER_MAZE_LOG", "off")
        .assert()
        .success()
        .stderr(predicate::str::contains("min_cost"));
}

#[test]
fn test_environment_applies_without_flags() {
    reindeer_maze()
        .args(["--part", "1"])
        .arg(data("example1.txt"))
        .env_remove("RUST_LOG")
        .env("REINDEER_MAZE_LOG", "reindeer_maze=debug")
        .assert()
        .success()
        .stderr(predicate::str::contains("min_cost"));
}
