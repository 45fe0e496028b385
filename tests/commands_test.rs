//! Integration tests for streamstat CLI commands
//!
//! These tests parse command lines the way `main` does, load an export
//! folder from disk and render every report through both formatters.

mod common;

use clap::Parser;
use common::{ENV_MUTEX, ExportBuilder, record};
use streamstat::{
    StreamstatError,
    cli::{Cli, Command},
    commands::render,
    data_loader::DataLoader,
    output::{TableFormatter, get_formatter},
    provider::HistorySource,
    timezone::TimezoneConfig,
};
use tempfile::TempDir;

fn export() -> TempDir {
    ExportBuilder::new()
        .page(vec![
            record("Archangel", "Burial", 238_000, "2024-01-31 23:30"),
            record("Roygbiv", "Boards of Canada", 151_000, "2024-01-10 09:00"),
            record("Roygbiv", "Boards of Canada", 151_000, "2024-01-11 09:00"),
        ])
        .page(vec![
            record("Teardrop", "Massive Attack", 330_000, "2024-02-02 18:00"),
            record("Archangel", "Burial", 100_000, "2024-02-03 18:00"),
        ])
        .build()
}

/// Run a command line against `dir` and return the rendered report
fn run(dir: &std::path::Path, args: &[&str]) -> streamstat::Result<String> {
    let mut argv = vec!["streamstat", "--dir", dir.to_str().unwrap()];
    argv.extend_from_slice(args);
    let cli = Cli::parse_from(argv);

    let tz_config = TimezoneConfig::from_cli(cli.timezone.as_deref(), cli.local)?;
    let loader = if cli.files.is_empty() {
        DataLoader::from_dir(&cli.dir, &cli.prefix)?
    } else {
        DataLoader::from_files(cli.files.clone())
    };
    let tracks = loader.load_tracks()?;

    let command = cli.command.clone().unwrap_or_default();
    let formatter = get_formatter(cli.json);
    render(&command, &tracks, &tz_config, formatter.as_ref())
}

fn run_json(dir: &std::path::Path, args: &[&str]) -> serde_json::Value {
    let mut with_json = vec!["--json"];
    with_json.extend_from_slice(args);
    serde_json::from_str(&run(dir, &with_json).unwrap()).unwrap()
}

#[test]
fn test_default_command_lists_artists_by_plays() {
    let export = export();
    let value = run_json(export.path(), &[]);

    let names: Vec<&str> = value["artists"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["name"].as_str().unwrap())
        .collect();
    // Burial and Boards of Canada both have two plays; first seen wins the tie
    assert_eq!(names, ["Burial", "Boards of Canada", "Massive Attack"]);
}

#[test]
fn test_tracks_by_time() {
    let export = export();
    let value = run_json(export.path(), &["tracks", "--top", "2"]);

    assert_eq!(value["tracks"][0]["title"], "Archangel");
    assert_eq!(value["tracks"][0]["total_ms_played"], 338_000);
    assert_eq!(value["tracks"][0]["listening_time"], "0h 5m 38s 0ms");
    assert_eq!(value["tracks"][1]["title"], "Teardrop");
    assert_eq!(value["tracks"].as_array().unwrap().len(), 2);
    assert_eq!(value["totals"]["total_ms_played"], 970_000);
}

#[test]
fn test_tracks_ascending_by_plays() {
    let export = export();
    let value = run_json(export.path(), &["tracks", "--sort", "plays", "--ascending"]);

    assert_eq!(value["tracks"][0]["title"], "Teardrop");
    assert_eq!(value["tracks"][2]["play_count"], 2);
}

#[test]
fn test_monthly_defaults_to_latest_months() {
    let export = export();
    let value = run_json(export.path(), &["monthly", "--months", "2"]);

    assert_eq!(value["monthly"][0]["month"], "2024-01");
    assert_eq!(value["monthly"][0]["title"], "Roygbiv");
    assert_eq!(value["monthly"][1]["month"], "2024-02");
    assert_eq!(value["monthly"][1]["title"], "Teardrop");
}

#[test]
fn test_monthly_timezone_moves_late_listens() {
    let export = export();
    // 2024-01-31 23:30 UTC is already February in Tokyo
    let value = run_json(
        export.path(),
        &["--timezone", "Asia/Tokyo", "monthly", "--from", "2024-02", "--months", "1"],
    );

    assert_eq!(value["monthly"][0]["title"], "Archangel");
    assert_eq!(value["monthly"][0]["ms_played"], 338_000);
}

#[test]
fn test_monthly_missing_month_fails() {
    let export = export();
    let result = run(export.path(), &["monthly", "--from", "2023-12", "--months", "2"]);
    assert!(matches!(result, Err(StreamstatError::MissingMonth(_))));

    let value = run_json(
        export.path(),
        &["monthly", "--from", "2023-12", "--months", "2", "--skip-missing"],
    );
    assert_eq!(value["monthly"].as_array().unwrap().len(), 1);
}

#[test]
fn test_invalid_timezone() {
    let export = export();
    let result = run(export.path(), &["--timezone", "Mars/Olympus", "tracks"]);
    assert!(matches!(result, Err(StreamstatError::InvalidTimezone(_))));
}

#[test]
fn test_explicit_files_skip_discovery() {
    let export = export();
    let first = export.path().join("StreamingHistory_music_0.json");
    let value = run_json(
        std::path::Path::new("does-not-exist"),
        &["--file", first.to_str().unwrap(), "tracks"],
    );
    assert_eq!(value["tracks"].as_array().unwrap().len(), 2);
}

#[test]
fn test_table_output_for_every_command() {
    let export = export();
    let loader = DataLoader::from_dir(export.path(), DataLoader::DEFAULT_PREFIX).unwrap();
    let tracks = loader.load_tracks().unwrap();
    let formatter = TableFormatter::new().with_color(false);
    let tz = TimezoneConfig::default();

    for (argv, expected) in [
        (vec!["streamstat", "tracks"], "Archangel"),
        (vec!["streamstat", "artists"], "Boards of Canada"),
        (vec!["streamstat", "monthly", "--months", "2"], "Teardrop"),
    ] {
        let cli = Cli::parse_from(argv);
        let output = render(&cli.command.unwrap(), &tracks, &tz, &formatter).unwrap();
        assert!(output.contains(expected), "missing {expected} in:\n{output}");
    }
}

#[test]
fn test_data_dir_from_environment() {
    let _guard = ENV_MUTEX.lock().unwrap();
    let export = export();

    unsafe {
        std::env::set_var("STREAMSTAT_DATA_DIR", export.path());
    }
    let cli = Cli::parse_from(["streamstat", "artists"]);
    unsafe {
        std::env::remove_var("STREAMSTAT_DATA_DIR");
    }

    assert_eq!(cli.dir, export.path());
    assert!(matches!(cli.command, Some(Command::Artists(_))));
}
