//! Command-line interface over [`ProjectsClient`](crate::ProjectsClient)
//!
//!
//! - `list-projects` - List projects, one page or `--all`
//! - `get-project` - Show one project
//! - `list-environments` - List a project's environments
//! - `list-configs` - List a project's configs
//! - `delete-project` - Delete a project

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat, PageArgs};
pub use runner::Runner;
