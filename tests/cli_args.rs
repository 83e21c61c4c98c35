//! Integration tests for CLI argument handling
//!
//! Runs the binary against an isolated config path and checks its output.

use std::process::Command;

use tempfile::TempDir;

/// Helper to run the CLI with given args and capture output
///
/// Points `--config` at a file inside `dir` so the user's real settings
/// never leak into a test.
fn run_cli(dir: &TempDir, args: &[&str]) -> std::process::Output {
    let config = dir.path().join("config.json");
    Command::new(env!("CARGO_BIN_EXE_ukforecast"))
        .arg("--config")
        .arg(&config)
        .args(args)
        .output()
        .expect("Failed to execute ukforecast")
}

fn temp_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp directory")
}

#[test]
fn test_help_flag_exits_successfully() {
    let output = run_cli(&temp_dir(), &["--help"]);
    assert!(output.status.success(), "Expected --help to exit successfully");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("ukforecast"), "Help should mention ukforecast");
    assert!(stdout.contains("max-size"), "Help should mention --max-size flag");
}

#[test]
fn test_default_queries_print_london_and_edinburgh() {
    let output = run_cli(&temp_dir(), &[]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("London Monday outlook:"));
    assert!(stdout.contains("London Monday temperature:"));
    assert!(stdout.contains("Edinburgh Monday outlook:"));
}

#[test]
fn test_repeated_query_prints_same_forecast() {
    let output = run_cli(&temp_dir(), &["wales/sun", "wales/sun", "--json"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], lines[1]);

    let value: serde_json::Value = serde_json::from_str(lines[0]).expect("valid JSON line");
    assert_eq!(value["region"], "Wales");
    assert_eq!(value["day"], "Sunday");
    assert!(value["summary"].is_string());
    assert!(value["temperature"].is_i64());
}

#[test]
fn test_invalid_region_prints_error_and_exits() {
    let output = run_cli(&temp_dir(), &["atlantis/monday"]);
    assert!(!output.status.success(), "Expected invalid region to fail");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Invalid region") && stderr.contains("atlantis"),
        "Should print error message about invalid region: {}",
        stderr
    );
}

#[test]
fn test_malformed_query_prints_error_and_exits() {
    let output = run_cli(&temp_dir(), &["london"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid query"), "stderr was: {}", stderr);
}

#[test]
fn test_zero_cache_size_is_rejected() {
    let output = run_cli(&temp_dir(), &["--max-size", "0"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("greater than zero"), "stderr was: {}", stderr);
}

#[test]
fn test_settings_file_is_honoured() {
    let dir = temp_dir();
    std::fs::write(dir.path().join("config.json"), r#"{ "max_size": 0 }"#)
        .expect("Failed to write config");
    let output = run_cli(&dir, &["london/monday"]);
    assert!(!output.status.success(), "max_size 0 from the file must be rejected");
}

#[test]
fn test_malformed_settings_file_is_reported() {
    let dir = temp_dir();
    std::fs::write(dir.path().join("config.json"), "not json").expect("Failed to write config");
    let output = run_cli(&dir, &[]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to parse config file"), "stderr was: {}", stderr);
}

#[cfg(test)]
mod unit_tests {
    //! Unit tests for CLI parsing that don't require running the binary

    use clap::Parser;
    use ukforecast::cli::{parse_query, Cli, StartupConfig};
    use ukforecast::config::Settings;
    use ukforecast::{Day, Region};

    #[test]
    fn test_cli_queries_are_positional() {
        let cli = Cli::parse_from(["ukforecast", "london/mon", "glasgow/tue"]);
        assert_eq!(cli.queries.len(), 2);
    }

    #[test]
    fn test_parse_query_returns_region_and_day() {
        assert_eq!(
            parse_query("edinburgh/friday").unwrap(),
            (Region::Edinburgh, Day::Friday)
        );
    }

    #[test]
    fn test_startup_config_keeps_query_order() {
        let cli = Cli::parse_from(["ukforecast", "wales/sun", "london/mon", "wales/sun"]);
        let config = StartupConfig::from_cli(&cli, Settings::default()).unwrap();
        assert_eq!(
            config.queries,
            vec![
                (Region::Wales, Day::Sunday),
                (Region::London, Day::Monday),
                (Region::Wales, Day::Sunday),
            ]
        );
    }
}
