//! Fixtures for tests
use crate::employee::Employee;
use crate::input::RosterRow;
use crate::pipeline::{self, ProcessedData};

/// Build an employee with its derived metrics populated.
pub fn employee(
    employee_id: &str,
    name: &str,
    role: &str,
    team: &str,
    hourly_rate: f64,
    hours_worked: f64,
    output_score: f64,
) -> Employee {
    let mut employee = Employee {
        employee_id: employee_id.into(),
        name: name.into(),
        role: role.into(),
        team: team.into(),
        hourly_rate,
        hours_worked,
        output_score,
        efficiency: 0.0,
        cost_efficiency: 0.0,
        status: Default::default(),
    };
    employee.derive_metrics();
    employee
}

/// Build a raw roster row with numeric fields given as strings.
pub fn row(
    employee_id: &str,
    name: &str,
    team: &str,
    hourly_rate: &str,
    hours_worked: &str,
    output_score: &str,
) -> RosterRow {
    RosterRow {
        employee_id: Some(employee_id.into()),
        name: Some(name.into()),
        role: Some("Staff".into()),
        team: Some(team.into()),
        hourly_rate: Some(hourly_rate.into()),
        hours_worked: Some(hours_worked.into()),
        output_score: Some(output_score.into()),
    }
}

/// The two-employee roster used in several derivation tests.
pub fn two_person_team() -> Vec<Employee> {
    vec![
        employee("1", "A", "Dev", "X", 10.0, 40.0, 400.0),
        employee("2", "B", "Dev", "X", 10.0, 20.0, 300.0),
    ]
}

/// A small processed baseline spanning three teams.
pub fn processed() -> ProcessedData {
    pipeline::process(vec![
        row("1", "Ana", "Platform", "40", "38", "410"),
        row("2", "Ben", "Platform", "35", "45", "300"),
        row("3", "Cleo", "Platform", "30", "20", "310"),
        row("4", "Dee", "Design", "28", "36", "290"),
        row("5", "Eli", "Design", "26", "41", "180"),
        row("6", "Fay", "Helpdesk", "18", "33", "240"),
        row("7", "Gus", "Helpdesk", "18", "29", "150"),
    ])
}
