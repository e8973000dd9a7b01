//! CLI commands and argument parsing

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Projects API command-line client
#[derive(Parser, Debug)]
#[command(name = "projects")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Service configuration file (YAML); `PROJECT_*` variables are used when absent
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// List projects
    ListProjects {
        #[command(flatten)]
        page: PageArgs,
    },

    /// Show one project
    GetProject {
        #[arg(long)]
        id: String,
    },

    /// List the environments of a project
    ListEnvironments {
        #[arg(long)]
        project_id: String,

        #[command(flatten)]
        page: PageArgs,
    },

    /// List the configs of a project
    ListConfigs {
        #[arg(long)]
        project_id: String,

        #[command(flatten)]
        page: PageArgs,
    },

    /// Delete a project
    DeleteProject {
        #[arg(long)]
        id: String,
    },
}

/// Paging flags shared by the list commands
#[derive(Args, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageArgs {
    /// Page size
    #[arg(long)]
    pub limit: Option<i64>,

    /// Follow the cursor through every page
    #[arg(long)]
    pub all: bool,
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Compact JSON on one line
    Json,
    /// Indented JSON
    Pretty,
}
