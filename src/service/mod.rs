//! Projects service client
//!
//! [`ProjectsClient`] exposes one method per API endpoint and a pager
//! constructor for each list endpoint.

mod client;
mod options;
mod pagers;

pub use client::ProjectsClient;
pub use options::{
    CreateProjectEnvironmentOptions, CreateProjectOptions, DeleteConfigOptions,
    DeleteProjectEnvironmentOptions, DeleteProjectOptions, GetConfigOptions,
    GetProjectEnvironmentOptions, GetProjectOptions, ListConfigsOptions,
    ListProjectEnvironmentsOptions, ListProjectsOptions, UpdateProjectEnvironmentOptions,
    UpdateProjectOptions,
};
pub use pagers::{
    ConfigsFetcher, ConfigsPager, ProjectEnvironmentsFetcher, ProjectEnvironmentsPager,
    ProjectsFetcher, ProjectsPager,
};
