//! Integration tests for CLI argument handling
//!
//! Runs the compiled binary for the paths that exit before any network call.

use std::process::Command;

/// Helper to run the CLI with given args and capture output
fn run_cli(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_pescador"))
        .args(args)
        .output()
        .expect("Failed to execute pescador")
}

#[test]
fn test_help_flag_exits_successfully() {
    let output = run_cli(&["--help"]);
    assert!(
        output.status.success(),
        "Expected --help to exit successfully"
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("pescador"), "Help should mention pescador");
    assert!(stdout.contains("--lat"), "Help should mention --lat");
    assert!(stdout.contains("--day"), "Help should mention --day");
}

#[test]
fn test_missing_coordinates_fails() {
    let output = run_cli(&[]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("--lat"), "Should name the missing argument: {}", stderr);
}

#[test]
fn test_invalid_day_prints_error_and_exits() {
    let output = run_cli(&["--lat", "-34.5", "--lon", "-58.4", "--day", "ayer"]);
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Invalid day"),
        "Should print error message about invalid day: {}",
        stderr
    );
}

#[test]
fn test_out_of_range_coordinates_exit_before_fetching() {
    let output = run_cli(&["--lat", "-134.5", "--lon", "-58.4"]);
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid coordinates"), "{}", stderr);
}

#[cfg(test)]
mod unit_tests {
    //! Unit tests for CLI parsing that don't require running the binary

    use clap::Parser;
    use pescador::cli::{parse_day_arg, Cli, StartupConfig};
    use pescador::day::DayOffset;
    use pescador::fishing::ScoringModel;

    #[test]
    fn test_parse_day_arg_tomorrow_aliases() {
        assert_eq!(parse_day_arg("manana").unwrap(), DayOffset::Tomorrow);
        assert_eq!(parse_day_arg("1").unwrap(), DayOffset::Tomorrow);
    }

    #[test]
    fn test_startup_config_from_cli_with_day() {
        let cli = Cli::parse_from(["pescador", "--lat", "-34.4", "--lon", "-58.5", "--day", "1"]);
        let config = StartupConfig::from_cli(&cli).unwrap();
        assert_eq!(config.day, DayOffset::Tomorrow);
        assert_eq!(config.scoring, ScoringModel::Standard);
        assert!((config.location.latitude - (-34.4)).abs() < 1e-9);
    }
}
