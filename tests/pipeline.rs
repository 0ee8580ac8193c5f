use crewlens::employee::Status;
use crewlens::input::{RosterRow, read_roster};
use crewlens::pipeline::process;
use std::path::{Path, PathBuf};

/// Get the path to the bundled demo roster.
fn get_demo_roster_path() -> PathBuf {
    Path::new(file!())
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join("demos")
        .join("simple")
        .join("roster.csv")
}

fn make_row(employee_id: &str, name: &str, rate: &str, hours: &str, output: &str) -> RosterRow {
    RosterRow {
        employee_id: Some(employee_id.into()),
        name: Some(name.into()),
        role: Some("Engineer".into()),
        team: Some("X".into()),
        hourly_rate: Some(rate.into()),
        hours_worked: Some(hours.into()),
        output_score: Some(output.into()),
    }
}

/// An integration test which processes the bundled demo roster.
#[test]
fn test_process_demo_roster() {
    let rows = read_roster(&get_demo_roster_path()).unwrap();
    let data = process(rows);

    assert!(!data.employees.is_empty());
    assert!(!data.team_metrics.is_empty());

    // Team headcounts partition the employee list
    let team_total: usize = data.team_metrics.iter().map(|t| t.employee_count).sum();
    assert_eq!(team_total, data.employees.len());

    // Every employee carries a derived status and metrics
    for employee in &data.employees {
        if employee.hours_worked > 0.0 {
            assert!(employee.efficiency > 0.0 || employee.output_score == 0.0);
        }
    }

    // Exactly the employees at or below the quartile boundary are Inefficient
    let threshold =
        crewlens::classification::inefficiency_threshold(&data.employees).unwrap();
    for employee in &data.employees {
        assert_eq!(
            employee.status == Status::Inefficient,
            employee.cost_efficiency <= threshold,
            "status mismatch for {}",
            employee.name
        );
    }
}

/// The pipeline is deterministic, including ordering for equal-rank ties.
#[test]
fn test_pipeline_determinism() {
    let rows = read_roster(&get_demo_roster_path()).unwrap();
    let first = process(rows.clone());
    let second = process(rows);

    assert_eq!(first.recommendations, second.recommendations);
    assert_eq!(first.employees, second.employees);
    assert_eq!(first.team_metrics, second.team_metrics);
}

/// The worked two-employee example: derivations, aggregates and the quartile
/// override reclassifying the overworked employee.
#[test]
fn test_two_employee_end_to_end() {
    let data = process(vec![
        make_row("1", "A", "10", "40", "400"),
        make_row("2", "B", "10", "20", "300"),
    ]);

    assert_eq!(data.employees[0].efficiency, 10.0);
    assert_eq!(data.employees[1].efficiency, 15.0);
    assert_eq!(data.team_metrics[0].avg_efficiency, 12.5);
    assert_eq!(data.team_metrics[0].total_cost, 600.0);
    assert_eq!(data.team_metrics[0].total_output, 700.0);
    assert_eq!(data.employees[0].status, Status::Inefficient);
    assert_eq!(data.employees[1].status, Status::Normal);
}

/// Rows with missing identity fields are dropped before aggregation.
#[test]
fn test_identity_filtering() {
    let mut nameless = make_row("3", "", "99", "99", "9999");
    nameless.name = None;

    let data = process(vec![
        make_row("1", "A", "10", "40", "400"),
        nameless,
        make_row("", "Ghost", "99", "99", "9999"),
        make_row("2", "B", "10", "20", "300"),
    ]);

    assert_eq!(data.employees.len(), 2);
    assert_eq!(data.total_cost, 600.0);
    assert_eq!(data.total_output, 700.0);
}
