//! CLI command definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CourseForge - multi-agent course design orchestrator
#[derive(Parser)]
#[command(
    name = "cf",
    about = "Multi-agent course design orchestrator",
    version,
    after_help = "Logs are written to: ~/.local/share/courseforge/logs/courseforge.log"
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// CLI subcommands
#[derive(Subcommand)]
pub enum Command {
    /// Interactive refinement chat followed by the design pipeline
    Chat {
        /// Write collected stage outputs to this JSON file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Run non-interactively from a course request file
    Run {
        /// Course request draft (YAML)
        #[arg(value_name = "REQUEST")]
        request: PathBuf,

        /// Write collected stage outputs to this JSON file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}
