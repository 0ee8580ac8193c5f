//! The command line interface for the analyser.
use crate::input::read_roster;
use crate::log;
use crate::output::{create_output_directory, get_output_dir, write_report, write_roster_analysis};
use crate::pipeline;
use crate::scenario::{self, read_adjustments};
use crate::settings::Settings;
use crate::summary;
use ::log::info;
use anyhow::{Context, Result};
use clap::{Args, CommandFactory, Parser, Subcommand};
use std::path::{Path, PathBuf};

pub mod demo;
use demo::DemoSubcommands;

/// The command line interface for the analyser.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// The available commands.
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Options for commands that write analysis output
#[derive(Args)]
pub struct RunOpts {
    /// Directory for output files
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,
}

/// The available commands.
#[derive(Subcommand)]
enum Commands {
    /// Analyse a roster CSV and write the enriched roster and executive report.
    Analyze {
        /// Path to the roster CSV file.
        roster: PathBuf,
        /// Other run options
        #[command(flatten)]
        opts: RunOpts,
    },
    /// Print the executive summary for a roster CSV.
    Summary {
        /// Path to the roster CSV file.
        roster: PathBuf,
    },
    /// Project a what-if scenario from per-team adjustments.
    Scenario {
        /// Path to the roster CSV file.
        roster: PathBuf,
        /// Path to the TOML file with per-team multipliers.
        adjustments: PathBuf,
    },
    /// Manage the bundled demo rosters.
    Demo {
        /// The available subcommands for managing demo rosters.
        #[command(subcommand)]
        subcommand: DemoSubcommands,
    },
}

impl Commands {
    /// Execute the supplied CLI command
    fn execute(self) -> Result<()> {
        match self {
            Self::Analyze { roster, opts } => handle_analyze_command(&roster, &opts, None),
            Self::Summary { roster } => handle_summary_command(&roster, None),
            Self::Scenario {
                roster,
                adjustments,
            } => handle_scenario_command(&roster, &adjustments, None),
            Self::Demo { subcommand } => subcommand.execute(),
        }
    }
}

/// Parse CLI arguments and start crewlens
pub fn run_cli() -> Result<()> {
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        // Output program help
        let help_str = Cli::command().render_long_help().to_string();
        println!("{help_str}");
        return Ok(());
    };

    command.execute()
}

/// Handle the `analyze` command.
pub fn handle_analyze_command(
    roster_path: &Path,
    opts: &RunOpts,
    settings: Option<Settings>,
) -> Result<()> {
    // Load program settings, if not provided
    let settings = if let Some(settings) = settings {
        settings
    } else {
        Settings::load().context("Failed to load settings.")?
    };

    // Get path to output folder
    let pathbuf: PathBuf;
    let output_path = if let Some(path) = opts.output_dir.as_deref() {
        path
    } else {
        pathbuf = get_output_dir(roster_path)?;
        &pathbuf
    };

    create_output_directory(output_path).with_context(|| {
        format!(
            "Failed to create output directory: {}",
            output_path.display()
        )
    })?;

    // Initialise program logger
    log::init(&settings.log_level, Some(output_path))
        .context("Failed to initialise logging.")?;

    // Load and process the roster
    let rows = read_roster(roster_path).context("Failed to load roster.")?;
    info!("Loaded roster from {}", roster_path.display());
    let data = pipeline::process(rows);
    info!(
        "{} employees across {} teams; total cost ${:.0}, total output {:.0}, average efficiency {:.2}",
        data.employees.len(),
        data.team_metrics.len(),
        data.total_cost,
        data.total_output,
        data.avg_efficiency
    );
    info!("{} recommendations generated", data.recommendations.len());

    // Write the outputs
    let summary = summary::generate(&data);
    let roster_file = write_roster_analysis(output_path, &data.employees)?;
    info!("Wrote enriched roster to {}", roster_file.display());
    let report_file = write_report(output_path, &data, &summary)?;
    info!("Wrote executive report to {}", report_file.display());

    Ok(())
}

/// Handle the `summary` command.
pub fn handle_summary_command(roster_path: &Path, settings: Option<Settings>) -> Result<()> {
    let settings = if let Some(settings) = settings {
        settings
    } else {
        Settings::load().context("Failed to load settings.")?
    };

    // No log files for the summary command
    log::init(&settings.log_level, None).context("Failed to initialise logging.")?;

    let rows = read_roster(roster_path).context("Failed to load roster.")?;
    let data = pipeline::process(rows);
    let summary = summary::generate(&data);

    println!("Company health: {}", summary.company_health);
    println!("\nTop employees:");
    for employee in &summary.top_employees {
        println!(
            "  {} ({}) - efficiency {:.2}",
            employee.name, employee.team, employee.efficiency
        );
    }
    println!("\nCost drains:");
    for employee in &summary.cost_drains {
        println!(
            "  {} ({}) - ${:.0}/week for {} output",
            employee.name,
            employee.team,
            employee.weekly_cost(),
            employee.output_score
        );
    }
    println!("\nMost inefficient team: {}", summary.most_inefficient_team);
    println!("Suggested headcount change: {}", summary.suggested_headcount_change);

    Ok(())
}

/// Handle the `scenario` command.
pub fn handle_scenario_command(
    roster_path: &Path,
    adjustments_path: &Path,
    settings: Option<Settings>,
) -> Result<()> {
    let settings = if let Some(settings) = settings {
        settings
    } else {
        Settings::load().context("Failed to load settings.")?
    };

    log::init(&settings.log_level, None).context("Failed to initialise logging.")?;

    let rows = read_roster(roster_path).context("Failed to load roster.")?;
    let baseline = pipeline::process(rows);
    let adjustments =
        read_adjustments(adjustments_path).context("Failed to load adjustments.")?;
    let analysis = scenario::simulate(&baseline, &adjustments);

    println!("Projected impact:");
    println!("  Total cost:      ${:.0}", analysis.total_cost);
    println!("  Total output:    {:.0}", analysis.total_output);
    println!(
        "  Avg efficiency:  {:.2} ({:+.1}%)",
        analysis.avg_efficiency, analysis.efficiency_change
    );
    println!("  Output change:   {:+.1}%", analysis.output_change_percent);
    println!("  Net savings:     ${:+.0}", analysis.cost_savings);
    println!("  ROI:             {:+.1}%", analysis.roi);
    println!("\nVerdict: {}", analysis.recommendation);
    if !analysis.warnings.is_empty() {
        println!("\nWarnings:");
        for warning in &analysis.warnings {
            println!("  - {warning}");
        }
    }

    Ok(())
}
