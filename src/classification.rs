//! Employee classification.
//!
//! Two rules run in sequence. Workload status compares each employee against
//! its own team's average hours and efficiency. The inefficiency override then
//! reassigns every employee at or below the company-wide lower-quartile cost
//! efficiency, overwriting any workload status.
use crate::employee::{Employee, Status};
use crate::team::TeamAverages;
use indexmap::IndexMap;
use itertools::Itertools;

/// Assign a status to every employee.
///
/// The override pass must complete before anything downstream reads `status`.
pub fn classify(employees: &mut [Employee], averages: &IndexMap<String, TeamAverages>) {
    for employee in employees.iter_mut() {
        employee.status = match averages.get(&employee.team) {
            Some(team) => workload_status(employee, team),
            None => Status::Normal,
        };
    }

    if let Some(threshold) = inefficiency_threshold(employees) {
        for employee in employees.iter_mut() {
            if employee.cost_efficiency <= threshold {
                employee.status = Status::Inefficient;
            }
        }
    }
}

/// Workload status relative to the employee's own team averages.
fn workload_status(employee: &Employee, team: &TeamAverages) -> Status {
    if employee.hours_worked > team.avg_hours && employee.efficiency < team.avg_efficiency {
        Status::Overworked
    } else if employee.hours_worked < team.avg_hours && employee.efficiency > team.avg_efficiency {
        Status::Underused
    } else {
        Status::Normal
    }
}

/// The lower-quartile cost efficiency boundary.
///
/// This is a nearest-rank selection: the value at index `floor(0.25 * n)` of
/// the ascending sort, not an interpolated percentile. Ties at the boundary
/// value are all marked inefficient, which can mark more than a quarter.
pub fn inefficiency_threshold(employees: &[Employee]) -> Option<f64> {
    if employees.is_empty() {
        return None;
    }

    let sorted: Vec<f64> = employees
        .iter()
        .map(|employee| employee.cost_efficiency)
        .sorted_by(f64::total_cmp)
        .collect();
    let index = (sorted.len() as f64 * 0.25).floor() as usize;

    Some(sorted[index])
}
