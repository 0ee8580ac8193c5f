//! Rule-based recommendation generation.
//!
//! A fixed, ordered battery of independent heuristics, each appending zero or
//! more findings to the output. Every rule is always evaluated and the result
//! is the full concatenation in rule order; callers that want to show fewer
//! may truncate for presentation. All sorts are stable so that equal-rank ties
//! keep input order and repeated runs produce identical output.
use crate::employee::{Employee, Status};
use crate::metrics::{mean, safe_ratio};
use crate::team::{CompanyMetrics, TeamAverages, TeamMetrics};
use indexmap::IndexMap;
use itertools::Itertools;

/// Shared read-only aggregates for the rule battery.
struct Context<'a> {
    employees: &'a [Employee],
    team_metrics: &'a [TeamMetrics],
    team_averages: &'a IndexMap<String, TeamAverages>,
    company: &'a CompanyMetrics,
}

/// Generate the ranked recommendation list.
///
/// # Arguments
///
/// * `employees` - All employees, already classified
/// * `team_metrics` - Finalized per-team aggregates, first-seen order
/// * `team_averages` - Per-team averages keyed by team name
/// * `company` - Company-wide totals and averages
pub fn generate(
    employees: &[Employee],
    team_metrics: &[TeamMetrics],
    team_averages: &IndexMap<String, TeamAverages>,
    company: &CompanyMetrics,
) -> Vec<String> {
    if employees.is_empty() {
        return Vec::new();
    }

    let context = Context {
        employees,
        team_metrics,
        team_averages,
        company,
    };

    let mut recommendations = Vec::new();
    workload_rebalancing(&context, &mut recommendations);
    team_reviews(&context, &mut recommendations);
    top_performers(&context, &mut recommendations);
    inefficient_details(&context, &mut recommendations);
    role_reviews(&context, &mut recommendations);
    cost_optimisation(&context, &mut recommendations);
    best_value(&context, &mut recommendations);
    team_sizing(&context, &mut recommendations);
    cross_team(&context, &mut recommendations);
    company_wide(&context, &mut recommendations);

    recommendations
}

/// Round a value to the nearest integer for display as a percent or dollars.
fn round(value: f64) -> i64 {
    value.round() as i64
}

/// Rule 1: pair the most overworked with the most underused employees and
/// suggest shifting hours between them, same-team pairs phrased differently.
fn workload_rebalancing(context: &Context, out: &mut Vec<String>) {
    let overworked = context
        .employees
        .iter()
        .filter(|e| e.status == Status::Overworked)
        .sorted_by(|a, b| b.hours_worked.total_cmp(&a.hours_worked));
    let underused = context
        .employees
        .iter()
        .filter(|e| e.status == Status::Underused)
        .sorted_by(|a, b| a.hours_worked.total_cmp(&b.hours_worked));

    for (over, under) in overworked.zip(underused).take(3) {
        let team_avg_hours = context
            .team_averages
            .get(&over.team)
            .map_or(0.0, |team| team.avg_hours);
        let hours_to_shift =
            ((over.hours_worked - team_avg_hours) / 2.0).floor().clamp(1.0, 8.0) as i64;
        if hours_to_shift <= 0 {
            continue;
        }

        if over.team == under.team {
            out.push(format!(
                "Redistribute {hours_to_shift} hours from {} to {} (same team)",
                over.name, under.name
            ));
        } else {
            out.push(format!(
                "Consider transferring {hours_to_shift} hours from {} ({}) to {} ({})",
                over.name, over.team, under.name, under.team
            ));
        }
    }
}

/// Rule 2: per-team cost efficiency, efficiency and workload reviews.
fn team_reviews(context: &Context, out: &mut Vec<String>) {
    let company = context.company;
    for team in context.team_metrics {
        let Some(averages) = context.team_averages.get(&team.team) else {
            continue;
        };

        if averages.avg_cost_efficiency < company.avg_cost_efficiency * 0.75 {
            let savings =
                team.total_cost - team.total_output / company.avg_cost_efficiency;
            let below = (safe_ratio(
                company.avg_cost_efficiency,
                averages.avg_cost_efficiency,
            ) - 1.0) * 100.0;
            out.push(format!(
                "Team {}: {}% below avg cost efficiency - potential savings: ${}",
                team.team,
                round(below),
                round(savings)
            ));
        }

        if team.avg_efficiency < company.avg_efficiency * 0.85 {
            let percent_of_avg =
                safe_ratio(team.avg_efficiency, company.avg_efficiency) * 100.0;
            out.push(format!(
                "Team {} efficiency {}% below average - review processes or training needs",
                team.team,
                round(percent_of_avg)
            ));
        }

        if averages.avg_hours > company.avg_hours * 1.2 {
            let above = (safe_ratio(averages.avg_hours, company.avg_hours) - 1.0) * 100.0;
            out.push(format!(
                "Team {} averaging {:.1} hrs/week ({}% above average) - risk of burnout",
                team.team,
                averages.avg_hours,
                round(above)
            ));
        } else if averages.avg_hours < company.avg_hours * 0.8 {
            out.push(format!(
                "Team {} underutilized at {:.1} hrs/week - consider increasing capacity",
                team.team, averages.avg_hours
            ));
        }
    }
}

/// Rule 3: mentoring suggestions for top performers well above company average.
fn top_performers(context: &Context, out: &mut Vec<String>) {
    let top = context
        .employees
        .iter()
        .sorted_by(|a, b| b.efficiency.total_cmp(&a.efficiency))
        .take(3);

    for employee in top {
        if employee.efficiency > context.company.avg_efficiency * 1.3 {
            let percent_of_avg =
                safe_ratio(employee.efficiency, context.company.avg_efficiency) * 100.0;
            out.push(format!(
                "{} ({}) is a top performer ({}% above avg) - consider mentoring or leadership role",
                employee.name,
                employee.team,
                round(percent_of_avg)
            ));
        }
    }
}

/// Rule 4: cost and output detail for the worst inefficient employees.
fn inefficient_details(context: &Context, out: &mut Vec<String>) {
    let inefficient = context
        .employees
        .iter()
        .filter(|e| e.status == Status::Inefficient)
        .sorted_by(|a, b| a.cost_efficiency.total_cmp(&b.cost_efficiency))
        .take(5);

    for employee in inefficient {
        let percent_of_avg =
            safe_ratio(employee.cost_efficiency, context.company.avg_cost_efficiency) * 100.0;
        out.push(format!(
            "{} ({}): Cost efficiency {}% of average - costs ${}/week for {} output",
            employee.name,
            employee.team,
            round(percent_of_avg),
            round(employee.weekly_cost()),
            employee.output_score
        ));
    }
}

/// Rule 5: flag roles (with at least two members) performing below average.
fn role_reviews(context: &Context, out: &mut Vec<String>) {
    let mut roles: IndexMap<&str, Vec<&Employee>> = IndexMap::new();
    for employee in context.employees {
        roles.entry(employee.role.as_str()).or_default().push(employee);
    }

    for (role, members) in &roles {
        if members.len() < 2 {
            continue;
        }

        let role_avg_efficiency = mean(members.iter().map(|e| e.efficiency));
        if role_avg_efficiency < context.company.avg_efficiency * 0.9 {
            let percent_of_avg =
                safe_ratio(role_avg_efficiency, context.company.avg_efficiency) * 100.0;
            out.push(format!(
                "{role} role performing {}% below company average - review role expectations or training",
                round(percent_of_avg)
            ));
        }
    }
}

/// Rule 6: performance reviews for high-cost low-output employees.
fn cost_optimisation(context: &Context, out: &mut Vec<String>) {
    let headcount = context.employees.len() as f64;
    let avg_cost = context.company.total_cost / headcount;
    let avg_output = context.company.total_output / headcount;

    let flagged = context
        .employees
        .iter()
        .filter(|e| e.weekly_cost() > avg_cost * 1.2 && e.output_score < avg_output * 0.9)
        .sorted_by(|a, b| b.weekly_cost().total_cmp(&a.weekly_cost()))
        .take(3);

    for employee in flagged {
        let percent_of_avg = safe_ratio(employee.output_score, avg_output) * 100.0;
        out.push(format!(
            "{} costs ${}/week but output {}% of average - review role or performance",
            employee.name,
            round(employee.weekly_cost()),
            round(percent_of_avg)
        ));
    }
}

/// Rule 7: suggest scaling the roles of exceptionally cost-efficient employees.
fn best_value(context: &Context, out: &mut Vec<String>) {
    let best = context
        .employees
        .iter()
        .sorted_by(|a, b| b.cost_efficiency.total_cmp(&a.cost_efficiency))
        .take(3);

    for employee in best {
        if employee.cost_efficiency > context.company.avg_cost_efficiency * 1.2 {
            let percent_of_avg =
                safe_ratio(employee.cost_efficiency, context.company.avg_cost_efficiency) * 100.0;
            out.push(format!(
                "{} provides exceptional value ({}% above avg cost efficiency) - consider scaling similar roles",
                employee.name,
                round(percent_of_avg)
            ));
        }
    }
}

/// Rule 8: flag oversized teams and undersized teams with low efficiency.
fn team_sizing(context: &Context, out: &mut Vec<String>) {
    let avg_team_size = context.employees.len() as f64 / context.team_metrics.len() as f64;

    for team in context.team_metrics {
        let size = team.employee_count as f64;
        if size > avg_team_size * 1.5 {
            let above = (safe_ratio(size, avg_team_size) - 1.0) * 100.0;
            out.push(format!(
                "Team {} has {} members ({}% above avg) - consider if team size is optimal",
                team.team,
                team.employee_count,
                round(above)
            ));
        } else if size < avg_team_size * 0.7
            && team.avg_efficiency < context.company.avg_efficiency * 0.95
        {
            out.push(format!(
                "Team {} may be understaffed ({} members) with below-average efficiency - consider adding capacity",
                team.team, team.employee_count
            ));
        }
    }
}

/// Rule 9: cross-training between the most and least efficient teams.
fn cross_team(context: &Context, out: &mut Vec<String>) {
    let ranked: Vec<&TeamMetrics> = context
        .team_metrics
        .iter()
        .sorted_by(|a, b| b.avg_efficiency.total_cmp(&a.avg_efficiency))
        .collect();
    let (Some(most), Some(least)) = (ranked.first(), ranked.last()) else {
        return;
    };
    if most.team == least.team {
        return;
    }

    let gap = safe_ratio(most.avg_efficiency, least.avg_efficiency);
    if gap > 1.3 {
        out.push(format!(
            "Consider cross-training: {} ({}% more efficient) could mentor {}",
            most.team,
            round((gap - 1.0) * 100.0),
            least.team
        ));
    }
}

/// Rule 10: company-wide efficiency variance and output-per-dollar checks.
fn company_wide(context: &Context, out: &mut Vec<String>) {
    let company = context.company;
    let variation = mean(
        context
            .employees
            .iter()
            .map(|e| (e.efficiency - company.avg_efficiency).abs()),
    );

    if variation > company.avg_efficiency * 0.4 {
        let percent = safe_ratio(variation, company.avg_efficiency) * 100.0;
        out.push(format!(
            "High efficiency variance detected ({}% variation) - consider standardized processes or training programs",
            round(percent)
        ));
    }

    if safe_ratio(company.total_output, company.total_cost) < company.avg_efficiency * 0.8 {
        out.push(
            "Company-wide cost efficiency below optimal - focus on improving output per dollar spent through process optimization or skill development"
                .to_string(),
        );
    }
}
