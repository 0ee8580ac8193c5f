//! What-if scenario projection.
//!
//! Applies per-team hours and headcount multipliers to the processed baseline,
//! runs a nonlinear productivity model and recomputes every aggregate metric.
//! The baseline is never mutated; each run derives a fresh employee view.
use crate::employee::Employee;
use crate::input;
use crate::metrics::safe_ratio;
use crate::pipeline::ProcessedData;
use crate::team::{TeamIndex, company_metrics, team_averages};
use anyhow::Result;
use ::log::warn;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

/// Lower bound for both multipliers.
pub const MIN_MULTIPLIER: f64 = 0.5;
/// Upper bound for both multipliers.
pub const MAX_MULTIPLIER: f64 = 1.5;

/// Estimated one-time cost of onboarding a new hire.
const HIRING_COST: f64 = 5000.0;
/// Estimated one-time cost of a separation (severance, knowledge loss).
const SEPARATION_COST: f64 = 3000.0;

/// Headcount changes below this fraction are treated as noise.
const HEADCOUNT_CHANGE_EPSILON: f64 = 0.05;

/// Per-team multipliers for one simulator session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScenarioAdjustment {
    /// Multiplier applied to weekly hours, in `[0.5, 1.5]`
    pub hours_multiplier: f64,
    /// Capacity multiplier applied to output and hours, in `[0.5, 1.5]`
    pub headcount_multiplier: f64,
}

impl Default for ScenarioAdjustment {
    fn default() -> Self {
        Self {
            hours_multiplier: 1.0,
            headcount_multiplier: 1.0,
        }
    }
}

impl ScenarioAdjustment {
    /// Create an adjustment, clamping both multipliers into `[0.5, 1.5]`.
    pub fn new(hours_multiplier: f64, headcount_multiplier: f64) -> Self {
        Self {
            hours_multiplier: hours_multiplier.clamp(MIN_MULTIPLIER, MAX_MULTIPLIER),
            headcount_multiplier: headcount_multiplier.clamp(MIN_MULTIPLIER, MAX_MULTIPLIER),
        }
    }

    /// Whether this adjustment leaves the team unchanged.
    fn is_identity(self) -> bool {
        self.hours_multiplier == 1.0 && self.headcount_multiplier == 1.0
    }
}

/// A set of adjustments keyed by team name.
pub type ScenarioAdjustments = HashMap<String, ScenarioAdjustment>;

/// The projected outcome of applying a set of adjustments to the baseline.
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioAnalysis {
    /// Projected total cost, inclusive of one-time costs
    pub total_cost: f64,
    /// Projected total output
    pub total_output: f64,
    /// Projected company average efficiency
    pub avg_efficiency: f64,
    /// Baseline cost minus projected cost, net of one-time costs
    pub cost_savings: f64,
    /// Absolute output change against the baseline
    pub output_change: f64,
    /// Output change as a percent of baseline output (zero if baseline is zero)
    pub output_change_percent: f64,
    /// Average efficiency change as a percent of the baseline average
    pub efficiency_change: f64,
    /// Net benefit over investment, as a percent
    pub roi: f64,
    /// Categorical verdict on the scenario
    pub recommendation: String,
    /// Warnings about one-time costs, burnout and capacity
    pub warnings: Vec<String>,
}

/// Productivity multiplier for an adjusted weekly hours figure.
///
/// Overtime past 40 hours loses 5% per hour, floored at 0.7; short weeks under
/// 30 hours gain a 1% focus bonus per hour, capped at 1.1.
pub fn productivity_multiplier(hours: f64) -> f64 {
    if hours > 40.0 {
        (1.0 - (hours - 40.0) * 0.05).max(0.7)
    } else if hours < 30.0 {
        (1.0 + (30.0 - hours) * 0.01).min(1.1)
    } else {
        1.0
    }
}

/// Derive the adjusted view of one employee.
///
/// An identity adjustment passes the employee through untouched, so an
/// all-defaults scenario reproduces the baseline exactly.
fn project_employee(employee: &Employee, adjustment: ScenarioAdjustment) -> Employee {
    if adjustment.is_identity() {
        return employee.clone();
    }

    let new_hours = employee.hours_worked * adjustment.hours_multiplier;
    let multiplier = productivity_multiplier(new_hours);

    let mut projected = employee.clone();
    projected.output_score = employee.output_score * adjustment.headcount_multiplier * multiplier;
    projected.hours_worked = new_hours * adjustment.headcount_multiplier;
    projected.derive_metrics();

    projected
}

/// Run the scenario projection against a processed baseline.
///
/// Teams absent from `adjustments` are left unchanged. The analysis reports
/// projected totals, savings net of one-time hiring and separation costs, ROI
/// and a categorical verdict.
pub fn simulate(baseline: &ProcessedData, adjustments: &ScenarioAdjustments) -> ScenarioAnalysis {
    let index = TeamIndex::build(&baseline.employees);
    let averages = team_averages(&baseline.employees, &index);
    let adjustment_for = |team: &str| adjustments.get(team).copied().unwrap_or_default();

    // Parallel metric pass over the adjusted employee view
    let projected: Vec<Employee> = baseline
        .employees
        .iter()
        .map(|employee| project_employee(employee, adjustment_for(&employee.team)))
        .collect();
    let company = company_metrics(&projected);

    // One-time hiring and separation costs per team
    let mut one_time_costs = 0.0;
    for (team, members) in index.iter() {
        let change = adjustment_for(team).headcount_multiplier - 1.0;
        if change.abs() > HEADCOUNT_CHANGE_EPSILON {
            let change_count = (members.len() as f64 * change.abs()).round();
            one_time_costs += change_count
                * if change > 0.0 {
                    HIRING_COST
                } else {
                    SEPARATION_COST
                };
        }
    }

    let gross_savings = baseline.total_cost - company.total_cost;
    let cost_savings = gross_savings - one_time_costs;
    let output_change = company.total_output - baseline.total_output;
    let output_change_percent = safe_ratio(output_change, baseline.total_output) * 100.0;
    let efficiency_change =
        safe_ratio(company.avg_efficiency - baseline.avg_efficiency, baseline.avg_efficiency)
            * 100.0;

    let net_benefit = output_change - gross_savings.abs() - one_time_costs;
    let investment = gross_savings.abs() + one_time_costs;
    let roi = safe_ratio(net_benefit, investment) * 100.0;

    let mut warnings = Vec::new();
    if one_time_costs > 0.0 {
        warnings.push(format!("One-time costs: ${one_time_costs:.0} (hiring/firing)"));
    }
    for (team, _) in index.iter() {
        let adjustment = adjustment_for(team);
        let Some(team_avg) = averages.get(team) else {
            continue;
        };

        if team_avg.avg_hours * adjustment.hours_multiplier > 45.0 {
            warnings.push(format!(
                "{team}: High overtime may cause burnout and reduce long-term productivity"
            ));
        }
        if adjustment.headcount_multiplier < 0.8 {
            warnings.push(format!(
                "{team}: Significant headcount reduction may impact team capacity"
            ));
        }
    }

    let recommendation = verdict(roi, output_change_percent, cost_savings).to_string();

    ScenarioAnalysis {
        total_cost: company.total_cost + one_time_costs,
        total_output: company.total_output,
        avg_efficiency: company.avg_efficiency,
        cost_savings,
        output_change,
        output_change_percent,
        efficiency_change,
        roi,
        recommendation,
        warnings,
    }
}

/// The categorical verdict for a projection, in priority order.
fn verdict(roi: f64, output_change_percent: f64, cost_savings: f64) -> &'static str {
    if roi > 20.0 && output_change_percent > 0.0 {
        "High ROI - recommended"
    } else if roi > 0.0 && output_change_percent > 0.0 {
        "Positive ROI, review long-term impacts"
    } else if cost_savings > 0.0 && output_change_percent < -5.0 {
        "Cost savings but significant output loss - not recommended"
    } else if cost_savings < 0.0 && output_change_percent < 0.0 {
        "Increased cost, reduced output - not viable"
    } else {
        "Review additional factors"
    }
}

/// One team's entry in a scenario adjustments TOML file.
#[derive(Debug, Clone, Copy, Deserialize)]
struct AdjustmentEntry {
    #[serde(default = "default_multiplier")]
    hours: f64,
    #[serde(default = "default_multiplier")]
    headcount: f64,
}

fn default_multiplier() -> f64 {
    1.0
}

/// The contents of a scenario adjustments file.
#[derive(Debug, Deserialize)]
struct AdjustmentsFile {
    #[serde(default)]
    teams: HashMap<String, AdjustmentEntry>,
}

/// Read a scenario adjustments TOML file.
///
/// Each `[teams.<name>]` table may set `hours` and `headcount` multipliers;
/// values outside `[0.5, 1.5]` are clamped with a warning.
pub fn read_adjustments(file_path: &Path) -> Result<ScenarioAdjustments> {
    let file: AdjustmentsFile = input::read_toml(file_path)?;

    let mut adjustments = ScenarioAdjustments::new();
    for (team, entry) in file.teams {
        let range = MIN_MULTIPLIER..=MAX_MULTIPLIER;
        if !range.contains(&entry.hours) || !range.contains(&entry.headcount) {
            warn!("Multipliers for team {team} clamped to [{MIN_MULTIPLIER}, {MAX_MULTIPLIER}]");
        }
        adjustments.insert(team, ScenarioAdjustment::new(entry.hours, entry.headcount));
    }

    Ok(adjustments)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::processed;
    use float_cmp::assert_approx_eq;
    use rstest::rstest;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    #[rstest]
    #[case(35.0, 1.0)] // Standard week
    #[case(40.0, 1.0)] // Boundary
    #[case(42.0, 0.9)] // Two hours of overtime
    #[case(60.0, 0.7)] // Penalty floored
    #[case(30.0, 1.0)] // Boundary
    #[case(25.0, 1.05)] // Focus bonus
    #[case(5.0, 1.1)] // Bonus capped
    fn test_productivity_multiplier(#[case] hours: f64, #[case] expected: f64) {
        assert_approx_eq!(f64, productivity_multiplier(hours), expected, epsilon = 1e-12);
    }

    #[test]
    fn test_adjustment_clamped() {
        let adjustment = ScenarioAdjustment::new(2.0, 0.1);
        assert_approx_eq!(f64, adjustment.hours_multiplier, 1.5);
        assert_approx_eq!(f64, adjustment.headcount_multiplier, 0.5);
    }

    #[test]
    fn test_identity_scenario_reproduces_baseline() {
        let baseline = processed();
        let mut adjustments = ScenarioAdjustments::new();
        for team in &baseline.team_metrics {
            adjustments.insert(team.team.clone(), ScenarioAdjustment::new(1.0, 1.0));
        }

        let analysis = simulate(&baseline, &adjustments);
        assert_eq!(analysis.total_cost, baseline.total_cost);
        assert_eq!(analysis.total_output, baseline.total_output);
        assert_eq!(analysis.avg_efficiency, baseline.avg_efficiency);
        assert_eq!(analysis.cost_savings, 0.0);
        assert_eq!(analysis.roi, 0.0);
        assert_eq!(analysis.recommendation, "Review additional factors");
    }

    #[test]
    fn test_empty_adjustments_is_identity() {
        let baseline = processed();
        let analysis = simulate(&baseline, &ScenarioAdjustments::new());
        assert_eq!(analysis.total_cost, baseline.total_cost);
        assert_eq!(analysis.output_change, 0.0);
    }

    #[test]
    fn test_one_time_hiring_costs() {
        let baseline = processed();
        let team = baseline.team_metrics[0].team.clone();
        let original_size = baseline.team_metrics[0].employee_count;

        let mut adjustments = ScenarioAdjustments::new();
        adjustments.insert(team, ScenarioAdjustment::new(1.0, 1.5));
        let analysis = simulate(&baseline, &adjustments);

        let expected = (original_size as f64 * 0.5).round() * 5000.0;
        assert!(
            analysis
                .warnings
                .iter()
                .any(|w| w == &format!("One-time costs: ${expected:.0} (hiring/firing)")),
            "missing one-time cost warning in {:?}",
            analysis.warnings
        );
    }

    #[test]
    fn test_capacity_warning_on_deep_headcount_cut() {
        let baseline = processed();
        let team = baseline.team_metrics[0].team.clone();

        let mut adjustments = ScenarioAdjustments::new();
        adjustments.insert(team.clone(), ScenarioAdjustment::new(1.0, 0.5));
        let analysis = simulate(&baseline, &adjustments);

        assert!(
            analysis.warnings.iter().any(|w| w
                == &format!("{team}: Significant headcount reduction may impact team capacity")),
            "missing capacity warning in {:?}",
            analysis.warnings
        );
    }

    #[rstest]
    #[case(25.0, 5.0, 100.0, "High ROI - recommended")]
    #[case(10.0, 5.0, 100.0, "Positive ROI, review long-term impacts")]
    #[case(-10.0, -10.0, 100.0, "Cost savings but significant output loss - not recommended")]
    #[case(-10.0, -1.0, -100.0, "Increased cost, reduced output - not viable")]
    #[case(0.0, 0.0, 0.0, "Review additional factors")]
    fn test_verdict(
        #[case] roi: f64,
        #[case] output_change_percent: f64,
        #[case] cost_savings: f64,
        #[case] expected: &str,
    ) {
        assert_eq!(verdict(roi, output_change_percent, cost_savings), expected);
    }

    #[test]
    fn test_read_adjustments() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("adjustments.toml");
        {
            let mut file = File::create(&file_path).unwrap();
            writeln!(file, "[teams.Platform]").unwrap();
            writeln!(file, "hours = 1.2").unwrap();
            writeln!(file, "[teams.Helpdesk]").unwrap();
            writeln!(file, "headcount = 9.0").unwrap();
        }

        let adjustments = read_adjustments(&file_path).unwrap();
        let platform = adjustments.get("Platform").unwrap();
        assert_approx_eq!(f64, platform.hours_multiplier, 1.2);
        assert_approx_eq!(f64, platform.headcount_multiplier, 1.0);
        // Out-of-range values are clamped to the slider range
        let helpdesk = adjustments.get("Helpdesk").unwrap();
        assert_approx_eq!(f64, helpdesk.headcount_multiplier, 1.5);
    }
}
