//! The module responsible for writing output data to disk.
use crate::employee::{Employee, Status};
use crate::pipeline::ProcessedData;
use crate::summary::ExecutiveSummary;
use anyhow::{Context, Result};
use chrono::Local;
use serde::Serialize;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

/// The root folder in which roster-specific output folders will be created
const OUTPUT_DIRECTORY_ROOT: &str = "crewlens_results";

/// The output file name for the enriched roster
const ROSTER_ANALYSIS_FILE_NAME: &str = "roster_analysis.csv";

/// The output file name for the executive report
const REPORT_FILE_NAME: &str = "report.md";

/// Get the default output directory for the specified roster file
pub fn get_output_dir(roster_path: &Path) -> Result<PathBuf> {
    let roster_name = roster_path
        .file_stem()
        .context("Roster path has no file name")?
        .to_str()
        .context("Invalid chars in roster file name")?;

    Ok([OUTPUT_DIRECTORY_ROOT, roster_name].iter().collect())
}

/// Create the output directory, with parents, if it does not already exist.
pub fn create_output_directory(output_dir: &Path) -> Result<()> {
    if output_dir.is_dir() {
        // already exists
        return Ok(());
    }

    fs::create_dir_all(output_dir)?;

    Ok(())
}

/// Represents one employee in the enriched roster CSV file.
#[derive(Serialize, Debug, PartialEq)]
struct RosterAnalysisRow<'a> {
    employee_id: &'a str,
    name: &'a str,
    role: &'a str,
    team: &'a str,
    hourly_rate: f64,
    hours_worked: f64,
    output_score: f64,
    efficiency: String,
    cost_efficiency: String,
    status: Status,
}

impl<'a> RosterAnalysisRow<'a> {
    /// Create a new [`RosterAnalysisRow`], formatting derived metrics to 2 dp
    fn new(employee: &'a Employee) -> Self {
        Self {
            employee_id: &employee.employee_id,
            name: &employee.name,
            role: &employee.role,
            team: &employee.team,
            hourly_rate: employee.hourly_rate,
            hours_worked: employee.hours_worked,
            output_score: employee.output_score,
            efficiency: format!("{:.2}", employee.efficiency),
            cost_efficiency: format!("{:.2}", employee.cost_efficiency),
            status: employee.status,
        }
    }
}

/// Write the enriched roster to a CSV file in the output directory.
pub fn write_roster_analysis(output_dir: &Path, employees: &[Employee]) -> Result<PathBuf> {
    let file_path = output_dir.join(ROSTER_ANALYSIS_FILE_NAME);
    let mut writer = csv::Writer::from_path(&file_path)?;
    for employee in employees {
        writer.serialize(RosterAnalysisRow::new(employee))?;
    }
    writer.flush()?;

    Ok(file_path)
}

/// Render the executive report as Markdown.
fn render_report(data: &ProcessedData, summary: &ExecutiveSummary) -> String {
    let mut out = String::new();

    writeln!(out, "# Executive Workforce Report").unwrap();
    writeln!(out, "\nGenerated: {}", Local::now().format("%Y-%m-%d")).unwrap();

    writeln!(out, "\n## Company Health\n\n{}", summary.company_health).unwrap();

    writeln!(out, "\n## Top Employees\n").unwrap();
    writeln!(out, "| Name | Team | Efficiency |").unwrap();
    writeln!(out, "| --- | --- | --- |").unwrap();
    for employee in &summary.top_employees {
        writeln!(
            out,
            "| {} | {} | {:.2} |",
            employee.name, employee.team, employee.efficiency
        )
        .unwrap();
    }

    writeln!(out, "\n## Cost Drains\n").unwrap();
    writeln!(out, "| Name | Team | Cost | Output |").unwrap();
    writeln!(out, "| --- | --- | --- | --- |").unwrap();
    for employee in &summary.cost_drains {
        writeln!(
            out,
            "| {} | {} | ${:.0} | {} |",
            employee.name,
            employee.team,
            employee.weekly_cost(),
            employee.output_score
        )
        .unwrap();
    }

    writeln!(
        out,
        "\n## Most Inefficient Team\n\n{}",
        summary.most_inefficient_team
    )
    .unwrap();
    writeln!(
        out,
        "\n## Suggested Headcount Change\n\n{}",
        summary.suggested_headcount_change
    )
    .unwrap();

    writeln!(out, "\n## Key Metrics\n").unwrap();
    writeln!(out, "| Metric | Value |").unwrap();
    writeln!(out, "| --- | --- |").unwrap();
    writeln!(out, "| Total Cost | ${:.0} |", data.total_cost).unwrap();
    writeln!(out, "| Total Output | {:.0} |", data.total_output).unwrap();
    writeln!(out, "| Average Efficiency | {:.2} |", data.avg_efficiency).unwrap();
    writeln!(out, "| Total Employees | {} |", data.employees.len()).unwrap();

    writeln!(out, "\n## Recommendations\n").unwrap();
    for (position, recommendation) in data.recommendations.iter().enumerate() {
        writeln!(out, "{}. {recommendation}", position + 1).unwrap();
    }

    out
}

/// Write the executive report to the output directory.
pub fn write_report(
    output_dir: &Path,
    data: &ProcessedData,
    summary: &ExecutiveSummary,
) -> Result<PathBuf> {
    let file_path = output_dir.join(REPORT_FILE_NAME);
    fs::write(&file_path, render_report(data, summary))
        .with_context(|| format!("Failed to write {}", file_path.display()))?;

    Ok(file_path)
}
