//! Employee records and their derived performance metrics.
use crate::metrics;
use serde::Serialize;

/// Classification assigned to each employee once per pipeline run.
///
/// The workload statuses are relative to the employee's own team; `Inefficient`
/// is a company-wide override based on bottom-quartile cost efficiency and wins
/// wherever both rules apply.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, strum::Display)]
pub enum Status {
    /// More hours than the team average with below-average efficiency
    Overworked,
    /// Fewer hours than the team average with above-average efficiency
    Underused,
    /// Bottom-quartile cost efficiency across the whole company
    Inefficient,
    /// Neither workload rule applies
    #[default]
    Normal,
}

/// A single workforce record, enriched in place as it moves through the pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct Employee {
    /// Unique identifier (non-empty; rows without one are dropped at ingestion)
    pub employee_id: String,
    /// Display name (non-empty; rows without one are dropped at ingestion)
    pub name: String,
    /// Job role, used for role-level recommendations
    pub role: String,
    /// Team name; grouping is exact string equality
    pub team: String,
    /// Hourly pay rate
    pub hourly_rate: f64,
    /// Weekly hours worked
    pub hours_worked: f64,
    /// Output score for the period
    pub output_score: f64,
    /// Output per hour worked (derived)
    pub efficiency: f64,
    /// Output per currency unit spent (derived)
    pub cost_efficiency: f64,
    /// Classification assigned by the pipeline (derived)
    pub status: Status,
}

impl Employee {
    /// The weekly cost of this employee (rate times hours).
    pub fn weekly_cost(&self) -> f64 {
        self.hourly_rate * self.hours_worked
    }

    /// Recompute `efficiency` and `cost_efficiency` from the raw fields.
    pub fn derive_metrics(&mut self) {
        self.efficiency = metrics::efficiency(self.output_score, self.hours_worked);
        self.cost_efficiency =
            metrics::cost_efficiency(self.output_score, self.hourly_rate, self.hours_worked);
    }
}
