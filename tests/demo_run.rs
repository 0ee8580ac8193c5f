use crewlens::cli::demo::handle_demo_run_command;
use crewlens::settings::Settings;
use tempfile::tempdir;

/// An integration test for the `demo run` command.
///
/// Runs the whole analysis end to end: extraction, ingestion, pipeline and
/// output writing. Kept as the single handler-level test in this binary
/// because the logger can only be initialised once per process.
#[test]
fn test_handle_demo_run_command() {
    let dir = tempdir().unwrap();
    let output_dir = dir.path().join("results");

    handle_demo_run_command("simple", Some(output_dir.as_path()), Some(Settings::default()))
        .unwrap();

    assert!(output_dir.join("roster_analysis.csv").is_file());
    assert!(output_dir.join("report.md").is_file());

    let report = std::fs::read_to_string(output_dir.join("report.md")).unwrap();
    assert!(report.contains("## Recommendations"));
}
