//! Code related to the bundled demo rosters and the CLI commands for interacting with them.
use super::{RunOpts, handle_analyze_command};
use crate::settings::Settings;
use anyhow::{Context, Result, bail, ensure};
use clap::Subcommand;
use include_dir::{Dir, DirEntry, include_dir};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// The directory containing the demo rosters.
const DEMOS_DIR: Dir = include_dir!("demos");

/// The file name of the roster within each demo directory.
const DEMO_ROSTER_FILE_NAME: &str = "roster.csv";

/// The available subcommands for managing demo rosters.
#[derive(Subcommand)]
pub enum DemoSubcommands {
    /// List available demos.
    List,
    /// Extract a demo roster to a new directory.
    Extract {
        /// The name of the demo to extract.
        name: String,
        /// The destination folder for the demo.
        new_path: Option<PathBuf>,
    },
    /// Run the full analysis for a demo roster.
    Run {
        /// The name of the demo to run.
        name: String,
        /// Directory for output files
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },
}

impl DemoSubcommands {
    /// Execute the supplied demo subcommand
    pub fn execute(self) -> Result<()> {
        match self {
            Self::List => handle_demo_list_command(),
            Self::Extract {
                name,
                new_path: dest,
            } => handle_demo_extract_command(&name, dest.as_deref())?,
            Self::Run { name, output_dir } => {
                handle_demo_run_command(&name, output_dir.as_deref(), None)?;
            }
        }

        Ok(())
    }
}

/// Handle the `demo list` command.
fn handle_demo_list_command() {
    for entry in DEMOS_DIR.dirs() {
        println!("{}", entry.path().display());
    }
}

/// Copy the files of a demo into the specified directory.
fn extract_demo(name: &str, dest: &Path) -> Result<()> {
    let sub_dir = DEMOS_DIR
        .get_dir(name)
        .with_context(|| format!("Demo {name} not found"))?;

    for entry in sub_dir.entries() {
        match entry {
            DirEntry::File(file) => {
                let file_name = file.path().file_name().unwrap();
                fs::write(dest.join(file_name), file.contents())?;
            }
            DirEntry::Dir(_) => {
                bail!("Nested directories are not supported in demos");
            }
        }
    }

    Ok(())
}

/// Handle the `demo extract` command.
fn handle_demo_extract_command(name: &str, new_path: Option<&Path>) -> Result<()> {
    let new_path = new_path.unwrap_or(Path::new(name));
    ensure!(
        !new_path.exists(),
        "Destination {} already exists",
        new_path.display()
    );
    fs::create_dir_all(new_path)?;

    extract_demo(name, new_path)
}

/// Handle the `demo run` command.
///
/// The demo is extracted to a temporary directory and analysed from there.
pub fn handle_demo_run_command(
    name: &str,
    output_dir: Option<&Path>,
    settings: Option<Settings>,
) -> Result<()> {
    let temp_dir = TempDir::new().context("Failed to create temporary directory.")?;
    extract_demo(name, temp_dir.path())?;

    // Default the output folder to one named after the demo
    let pathbuf: PathBuf;
    let output_dir = if let Some(path) = output_dir {
        path
    } else {
        pathbuf = ["crewlens_results", name].iter().collect();
        &pathbuf
    };

    let opts = RunOpts {
        output_dir: Some(output_dir.to_path_buf()),
    };
    handle_analyze_command(&temp_dir.path().join(DEMO_ROSTER_FILE_NAME), &opts, settings)
}
