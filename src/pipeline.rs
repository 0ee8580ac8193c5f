//! The end-to-end analytics pipeline.
//!
//! A pure, synchronous transformation of an in-memory record set: raw rows are
//! coerced and filtered, metrics derived, teams aggregated once, employees
//! classified and the recommendation battery evaluated. Each invocation takes
//! its input by value and returns a fresh [`ProcessedData`].
use crate::classification::classify;
use crate::employee::Employee;
use crate::input::RosterRow;
use crate::recommendation;
use crate::team::{TeamIndex, TeamMetrics, aggregate_teams, company_metrics, team_averages};
use ::log::debug;

/// The pipeline output consumed by presentation and export collaborators.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessedData {
    /// All surviving employees, input order preserved, fully enriched
    pub employees: Vec<Employee>,
    /// One entry per distinct team, first-seen order
    pub team_metrics: Vec<TeamMetrics>,
    /// Sum of weekly costs over all employees
    pub total_cost: f64,
    /// Sum of output scores over all employees
    pub total_output: f64,
    /// Unweighted mean of per-employee efficiency
    pub avg_efficiency: f64,
    /// Ranked recommendation strings, rule order
    pub recommendations: Vec<String>,
}

/// Run the full pipeline over raw roster rows.
///
/// Rows missing an identity field are dropped during coercion, before any
/// aggregate is computed, so they never influence totals or averages.
pub fn process<I>(rows: I) -> ProcessedData
where
    I: IntoIterator<Item = RosterRow>,
{
    let mut employees: Vec<Employee> = rows
        .into_iter()
        .filter_map(RosterRow::into_employee)
        .collect();

    let index = TeamIndex::build(&employees);
    let team_metrics = aggregate_teams(&employees, &index);
    let averages = team_averages(&employees, &index);
    let company = company_metrics(&employees);
    debug!(
        "Processing {} employees across {} teams",
        employees.len(),
        index.len()
    );

    // Classification must finish before any rule reads employee status
    classify(&mut employees, &averages);
    let recommendations =
        recommendation::generate(&employees, &team_metrics, &averages, &company);

    ProcessedData {
        employees,
        team_metrics,
        total_cost: company.total_cost,
        total_output: company.total_output,
        avg_efficiency: company.avg_efficiency,
        recommendations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::employee::Status;
    use crate::fixture::row;
    use float_cmp::assert_approx_eq;

    #[test]
    fn test_dropped_rows_never_reach_aggregates() {
        let rows = vec![
            row("1", "A", "X", "10", "40", "400"),
            row("", "Ghost", "X", "99", "99", "9999"),
            row("2", "B", "X", "10", "20", "300"),
        ];

        let data = process(rows);
        assert_eq!(data.employees.len(), 2);
        assert_approx_eq!(f64, data.total_cost, 600.0);
        assert_approx_eq!(f64, data.total_output, 700.0);
    }

    #[test]
    fn test_two_employee_example() {
        let data = process(vec![
            row("1", "A", "X", "10", "40", "400"),
            row("2", "B", "X", "10", "20", "300"),
        ]);

        assert_approx_eq!(f64, data.employees[0].efficiency, 10.0);
        assert_approx_eq!(f64, data.employees[1].efficiency, 15.0);
        assert_eq!(data.team_metrics.len(), 1);
        assert_approx_eq!(f64, data.team_metrics[0].avg_efficiency, 12.5);
        assert_approx_eq!(f64, data.team_metrics[0].total_cost, 600.0);
        assert_approx_eq!(f64, data.team_metrics[0].total_output, 700.0);

        // A would be Overworked, but with two records the quartile index is
        // floor(2 * 0.25) = 0 and A has the lower cost efficiency
        assert_eq!(data.employees[0].status, Status::Inefficient);
        assert_eq!(data.employees[1].status, Status::Normal);
    }

    #[test]
    fn test_empty_input() {
        let data = process(Vec::new());
        assert!(data.employees.is_empty());
        assert!(data.team_metrics.is_empty());
        assert!(data.recommendations.is_empty());
        assert_eq!(data.avg_efficiency, 0.0);
    }
}
