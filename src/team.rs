//! Team grouping and aggregate metrics.
//!
//! Employees are grouped once into a team index which every downstream stage
//! reuses; teams are iterated in first-occurrence order of the `team` field.
use crate::employee::Employee;
use crate::metrics;
use indexmap::IndexMap;

/// Aggregate metrics for one team.
#[derive(Debug, Clone, PartialEq)]
pub struct TeamMetrics {
    /// Team name
    pub team: String,
    /// Sum of member output scores
    pub total_output: f64,
    /// Sum of member weekly costs
    pub total_cost: f64,
    /// Unweighted mean of member efficiency
    pub avg_efficiency: f64,
    /// Number of members
    pub employee_count: usize,
}

/// Per-team averages used by classification, recommendations and the scenario
/// simulator.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TeamAverages {
    /// Mean weekly hours across members
    pub avg_hours: f64,
    /// Mean efficiency across members
    pub avg_efficiency: f64,
    /// Mean cost efficiency across members
    pub avg_cost_efficiency: f64,
}

/// Company-wide totals and unweighted averages.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CompanyMetrics {
    /// Sum of weekly costs over all employees
    pub total_cost: f64,
    /// Sum of output scores over all employees
    pub total_output: f64,
    /// Unweighted mean of per-employee efficiency
    pub avg_efficiency: f64,
    /// Unweighted mean of per-employee cost efficiency
    pub avg_cost_efficiency: f64,
    /// Mean weekly hours per employee
    pub avg_hours: f64,
}

/// An index from team name to the positions of its members in the employee
/// sequence, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TeamIndex(IndexMap<String, Vec<usize>>);

impl TeamIndex {
    /// Build the index with a single grouping pass over the employees.
    pub fn build(employees: &[Employee]) -> Self {
        let mut index: IndexMap<String, Vec<usize>> = IndexMap::new();
        for (position, employee) in employees.iter().enumerate() {
            index.entry(employee.team.clone()).or_default().push(position);
        }

        Self(index)
    }

    /// The number of distinct teams.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no teams.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over teams in first-seen order with their member positions.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[usize])> {
        self.0
            .iter()
            .map(|(team, members)| (team.as_str(), members.as_slice()))
    }

    /// The member positions for a team, if it exists.
    pub fn members(&self, team: &str) -> Option<&[usize]> {
        self.0.get(team).map(Vec::as_slice)
    }
}

/// Fold the employees into finalized per-team metrics.
///
/// The result has one entry per distinct team, in first-seen order. Totals are
/// exact sums over members; `avg_efficiency` is the unweighted mean of the
/// members' derived efficiency.
pub fn aggregate_teams(employees: &[Employee], index: &TeamIndex) -> Vec<TeamMetrics> {
    index
        .iter()
        .map(|(team, members)| {
            let mut total_output = 0.0;
            let mut total_cost = 0.0;
            for &position in members {
                total_output += employees[position].output_score;
                total_cost += employees[position].weekly_cost();
            }

            TeamMetrics {
                team: team.to_string(),
                total_output,
                total_cost,
                avg_efficiency: metrics::mean(
                    members.iter().map(|&position| employees[position].efficiency),
                ),
                employee_count: members.len(),
            }
        })
        .collect()
}

/// Compute the per-team averages in first-seen order.
pub fn team_averages(employees: &[Employee], index: &TeamIndex) -> IndexMap<String, TeamAverages> {
    index
        .iter()
        .map(|(team, members)| {
            let member = |field: fn(&Employee) -> f64| {
                metrics::mean(members.iter().map(|&position| field(&employees[position])))
            };

            (
                team.to_string(),
                TeamAverages {
                    avg_hours: member(|employee| employee.hours_worked),
                    avg_efficiency: member(|employee| employee.efficiency),
                    avg_cost_efficiency: member(|employee| employee.cost_efficiency),
                },
            )
        })
        .collect()
}

/// Compute company-wide totals and unweighted averages.
pub fn company_metrics(employees: &[Employee]) -> CompanyMetrics {
    CompanyMetrics {
        total_cost: employees.iter().map(Employee::weekly_cost).sum(),
        total_output: employees.iter().map(|employee| employee.output_score).sum(),
        avg_efficiency: metrics::mean(employees.iter().map(|employee| employee.efficiency)),
        avg_cost_efficiency: metrics::mean(
            employees.iter().map(|employee| employee.cost_efficiency),
        ),
        avg_hours: metrics::mean(employees.iter().map(|employee| employee.hours_worked)),
    }
}
