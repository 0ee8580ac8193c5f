//! Common routines for reading input data.
//!
//! Roster parsing is deliberately permissive: numeric fields may arrive as
//! arbitrary strings and degrade silently to zero, and rows missing either
//! identity field are dropped before they can reach the aggregation stage.
use crate::employee::Employee;
use anyhow::{Context, Result, ensure};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

/// Read a series of type `T`s from a CSV file into a `Vec<T>`.
///
/// # Arguments
///
/// * `file_path`: Path to the CSV file
pub fn read_csv<T: DeserializeOwned>(file_path: &Path) -> Result<Vec<T>> {
    let mut reader =
        csv::Reader::from_path(file_path).with_context(|| input_err_msg(file_path))?;

    let mut records = Vec::new();
    for result in reader.deserialize() {
        let record: T = result.with_context(|| input_err_msg(file_path))?;
        records.push(record);
    }

    Ok(records)
}

/// Parse a TOML file into the given type.
pub fn read_toml<T: DeserializeOwned>(file_path: &Path) -> Result<T> {
    let contents = fs::read_to_string(file_path).with_context(|| input_err_msg(file_path))?;
    toml::from_str(&contents).with_context(|| input_err_msg(file_path))
}

/// Format a standard error message for a problem with an input file.
pub fn input_err_msg<P: AsRef<Path>>(file_path: P) -> String {
    format!("Error reading {}", file_path.as_ref().to_string_lossy())
}

/// One row of a roster CSV, before coercion.
///
/// Every field is optional and loosely typed so that malformed rows are never
/// fatal; see [`RosterRow::into_employee`] for the coercion rules.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct RosterRow {
    /// Unique identifier for the employee
    #[serde(default)]
    pub employee_id: Option<String>,
    /// Display name
    #[serde(default)]
    pub name: Option<String>,
    /// Job role
    #[serde(default)]
    pub role: Option<String>,
    /// Team name
    #[serde(default)]
    pub team: Option<String>,
    /// Hourly pay rate (numeric, parsed permissively)
    #[serde(default)]
    pub hourly_rate: Option<String>,
    /// Weekly hours worked (numeric, parsed permissively)
    #[serde(default)]
    pub hours_worked: Option<String>,
    /// Output score (numeric, parsed permissively)
    #[serde(default)]
    pub output_score: Option<String>,
}

impl RosterRow {
    /// Coerce this row into an [`Employee`] with its derived metrics populated.
    ///
    /// Missing string fields default to empty and unparseable numeric fields to
    /// zero. Returns `None` when the row is missing either identity field.
    pub fn into_employee(self) -> Option<Employee> {
        let employee_id = self.employee_id.unwrap_or_default();
        let name = self.name.unwrap_or_default();
        if employee_id.is_empty() || name.is_empty() {
            return None;
        }

        let mut employee = Employee {
            employee_id,
            name,
            role: self.role.unwrap_or_default(),
            team: self.team.unwrap_or_default(),
            hourly_rate: parse_numeric(self.hourly_rate.as_deref()),
            hours_worked: parse_numeric(self.hours_worked.as_deref()),
            output_score: parse_numeric(self.output_score.as_deref()),
            efficiency: 0.0,
            cost_efficiency: 0.0,
            status: Default::default(),
        };
        employee.derive_metrics();
        Some(employee)
    }
}

/// Parse a numeric field, degrading silently to zero on failure.
fn parse_numeric(raw: Option<&str>) -> f64 {
    raw.and_then(|value| value.trim().parse().ok()).unwrap_or(0.0)
}

/// Read a roster CSV into raw rows.
///
/// # Arguments
///
/// * `file_path`: Path to the roster CSV file
pub fn read_roster(file_path: &Path) -> Result<Vec<RosterRow>> {
    let rows: Vec<RosterRow> = read_csv(file_path)?;
    ensure!(
        !rows.is_empty(),
        "Roster file cannot be empty: {}",
        file_path.to_string_lossy()
    );

    Ok(rows)
}
