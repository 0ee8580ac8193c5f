//! Executive summary synthesis.
//!
//! Derives a company-health score, top and bottom performer lists, the worst
//! team and a headcount-rebalancing suggestion from the processed baseline.
use crate::employee::Employee;
use crate::metrics::{mean, safe_ratio};
use crate::pipeline::ProcessedData;
use crate::team::{TeamIndex, team_averages};
use itertools::Itertools;

/// The company-level digest shown to executives.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutiveSummary {
    /// One-line health statement embedding the efficiency ratio as a percent
    pub company_health: String,
    /// Top 3 employees by efficiency, descending
    pub top_employees: Vec<Employee>,
    /// Bottom 3 employees by output per dollar, ascending
    pub cost_drains: Vec<Employee>,
    /// The team with the lowest average efficiency, or `N/A`
    pub most_inefficient_team: String,
    /// A headcount-rebalancing suggestion, or a fixed no-change string
    pub suggested_headcount_change: String,
}

/// The health label for a given efficiency-to-ideal ratio.
fn health_label(ratio: f64) -> &'static str {
    if ratio >= 0.9 {
        "Excellent"
    } else if ratio >= 0.75 {
        "Good"
    } else if ratio >= 0.6 {
        "Fair"
    } else {
        "Needs Improvement"
    }
}

/// Mean efficiency of the top quarter of employees by efficiency.
///
/// The quartile size is ceiling-rounded with a minimum of one employee; an
/// empty roster yields zero.
fn ideal_efficiency(employees: &[Employee]) -> f64 {
    if employees.is_empty() {
        return 0.0;
    }

    let count = ((employees.len() as f64) * 0.25).ceil().max(1.0) as usize;
    mean(
        employees
            .iter()
            .map(|employee| employee.efficiency)
            .sorted_by(|a, b| b.total_cmp(a))
            .take(count),
    )
}

/// Output per dollar with the cost floored at one to avoid dividing by zero.
fn drain_key(employee: &Employee) -> f64 {
    employee.output_score / employee.weekly_cost().max(1.0)
}

/// Generate the executive summary for a processed baseline.
pub fn generate(data: &ProcessedData) -> ExecutiveSummary {
    let employees = &data.employees;

    let ratio = safe_ratio(data.avg_efficiency, ideal_efficiency(employees));
    let company_health = format!(
        "Overall efficiency is {:.1}% compared to ideal ({})",
        ratio * 100.0,
        health_label(ratio)
    );

    let top_employees = employees
        .iter()
        .sorted_by(|a, b| b.efficiency.total_cmp(&a.efficiency))
        .take(3)
        .cloned()
        .collect();

    let cost_drains = employees
        .iter()
        .sorted_by(|a, b| drain_key(a).total_cmp(&drain_key(b)))
        .take(3)
        .cloned()
        .collect();

    let most_inefficient_team = data
        .team_metrics
        .iter()
        .min_by(|a, b| a.avg_efficiency.total_cmp(&b.avg_efficiency))
        .map_or_else(|| "N/A".to_string(), |team| team.team.clone());

    ExecutiveSummary {
        company_health,
        top_employees,
        cost_drains,
        most_inefficient_team,
        suggested_headcount_change: suggest_headcount_change(data),
    }
}

/// Compare the teams with the lowest and highest average cost efficiency and
/// suggest shifting hours from the former to the latter.
fn suggest_headcount_change(data: &ProcessedData) -> String {
    const NO_CHANGE: &str = "No significant changes recommended";

    let index = TeamIndex::build(&data.employees);
    let averages = team_averages(&data.employees, &index);
    let ranked: Vec<(&str, f64, usize)> = data
        .team_metrics
        .iter()
        .map(|team| {
            let avg_cost_efficiency = averages
                .get(&team.team)
                .map_or(0.0, |a| a.avg_cost_efficiency);
            (team.team.as_str(), avg_cost_efficiency, team.employee_count)
        })
        .collect();

    let Some(first) = ranked.first() else {
        return NO_CHANGE.to_string();
    };

    // First-seen team wins ties on both ends
    let (mut worst, mut best) = (first, first);
    for entry in &ranked[1..] {
        if entry.1 < worst.1 {
            worst = entry;
        }
        if entry.1 > best.1 {
            best = entry;
        }
    }

    if worst.0 != best.0 {
        let reduction = (worst.2 as f64 * 0.1).floor().min(10.0) as i64;
        if reduction > 0 {
            return format!(
                "Reduce {} hours by {}%, reallocate to {}",
                worst.0,
                reduction * 5,
                best.0
            );
        }
    }

    NO_CHANGE.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::{employee, processed};
    use crate::pipeline;
    use float_cmp::assert_approx_eq;
    use rstest::rstest;

    #[rstest]
    #[case(0.95, "Excellent")]
    #[case(0.9, "Excellent")]
    #[case(0.75, "Good")]
    #[case(0.6, "Fair")]
    #[case(0.59, "Needs Improvement")]
    #[case(0.0, "Needs Improvement")]
    fn test_health_label(#[case] ratio: f64, #[case] expected: &str) {
        assert_eq!(health_label(ratio), expected);
    }

    #[test]
    fn test_ideal_efficiency() {
        // ceil(5 * 0.25) = 2: mean of the top two efficiencies
        let employees: Vec<Employee> = [10.0, 50.0, 20.0, 40.0, 30.0]
            .iter()
            .enumerate()
            .map(|(i, &eff)| {
                employee(&i.to_string(), "E", "Dev", "X", 1.0, 10.0, eff * 10.0)
            })
            .collect();
        assert_approx_eq!(f64, ideal_efficiency(&employees), 45.0);
        assert_eq!(ideal_efficiency(&[]), 0.0);
    }

    #[test]
    fn test_drain_key_floors_cost_at_one() {
        let zero_cost = employee("1", "A", "Dev", "X", 0.0, 40.0, 120.0);
        assert_approx_eq!(f64, drain_key(&zero_cost), 120.0);
    }

    #[test]
    fn test_generate_summary() {
        let summary = generate(&processed());
        assert_eq!(summary.top_employees.len(), 3);
        assert_eq!(summary.cost_drains.len(), 3);
        assert!(summary.company_health.contains("compared to ideal"));
        assert_ne!(summary.most_inefficient_team, "N/A");
    }

    #[test]
    fn test_empty_roster_degenerates_gracefully() {
        let summary = generate(&pipeline::process(Vec::new()));
        assert_eq!(summary.most_inefficient_team, "N/A");
        assert!(summary.top_employees.is_empty());
        assert_eq!(
            summary.suggested_headcount_change,
            "No significant changes recommended"
        );
        assert_eq!(
            summary.company_health,
            "Overall efficiency is 0.0% compared to ideal (Needs Improvement)"
        );
    }

    #[test]
    fn test_headcount_suggestion() {
        // Helpdesk is far less cost efficient than Platform and has enough
        // members for a nonzero reduction
        let mut rows = Vec::new();
        for i in 0..10 {
            rows.push(crate::fixture::row(
                &format!("h{i}"),
                "Helper",
                "Helpdesk",
                "40",
                "38",
                "100",
            ));
        }
        for i in 0..2 {
            rows.push(crate::fixture::row(
                &format!("p{i}"),
                "Platformer",
                "Platform",
                "10",
                "38",
                "500",
            ));
        }

        let summary = generate(&pipeline::process(rows));
        assert_eq!(
            summary.suggested_headcount_change,
            "Reduce Helpdesk hours by 5%, reallocate to Platform"
        );
    }

    #[test]
    fn test_headcount_suggestion_small_teams() {
        // floor(2 * 0.1) = 0: no reduction possible
        let rows = vec![
            crate::fixture::row("1", "A", "X", "40", "38", "100"),
            crate::fixture::row("2", "B", "X", "40", "38", "100"),
            crate::fixture::row("3", "C", "Y", "10", "38", "500"),
            crate::fixture::row("4", "D", "Y", "10", "38", "500"),
        ];
        let summary = generate(&pipeline::process(rows));
        assert_eq!(
            summary.suggested_headcount_change,
            "No significant changes recommended"
        );
    }
}
