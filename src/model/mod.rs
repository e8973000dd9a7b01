//! Request and response bodies of the Projects API
//!
//! Optional fields are `Option<T>` and are left out of serialized
//! requests when absent.

mod common;
mod environment;
mod project;
mod project_config;

pub use common::{
    Authorizations, DeleteResponse, NameDefinition, PaginationLink, ProjectReference,
};
pub use environment::{
    Environment, EnvironmentCollection, EnvironmentDefinition, EnvironmentPatchDefinition,
    EnvironmentPrototype,
};
pub use project::{
    Project, ProjectCollection, ProjectDefinition, ProjectEnvironmentSummary,
    ProjectPatchDefinition, ProjectPrototype, ProjectState, ProjectSummary,
    ProjectSummaryDefinition,
};
pub use project_config::{
    ConfigDefinition, ConfigPrototype, ConfigSummaryDefinition, ProjectConfig,
    ProjectConfigCollection, ProjectConfigSummary,
};

#[cfg(test)]
mod tests;
