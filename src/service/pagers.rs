//! Pagers over the list endpoints
//!
//! Each fetcher turns one list call into a [`Page`]; the aliases bind them
//! to the generic [`Pager`].

use super::client::ProjectsClient;
use super::options::{ListConfigsOptions, ListProjectEnvironmentsOptions, ListProjectsOptions};
use crate::error::{Error, Result};
use crate::model::{Environment, ProjectConfigSummary, ProjectSummary};
use crate::pagination::{CallContext, Page, PageFetcher, PagedCollection, Pager};
use async_trait::async_trait;

/// Pager over all projects
pub type ProjectsPager = Pager<ProjectsFetcher>;

/// Pager over the environments of one project
pub type ProjectEnvironmentsPager = Pager<ProjectEnvironmentsFetcher>;

/// Pager over the configs of one project
pub type ConfigsPager = Pager<ConfigsFetcher>;

/// Fetches pages of `GET /v1/projects`
#[derive(Debug, Clone)]
pub struct ProjectsFetcher {
    client: ProjectsClient,
}

#[async_trait]
impl PageFetcher for ProjectsFetcher {
    type Options = ListProjectsOptions;
    type Item = ProjectSummary;

    async fn fetch_page(
        &self,
        options: &ListProjectsOptions,
        ctx: &CallContext,
    ) -> Result<Page<ProjectSummary>> {
        let collection = self.client.list_projects_with_context(options, ctx).await?;
        Ok(collection.into_page())
    }
}

/// Fetches pages of `GET /v1/projects/{project_id}/environments`
#[derive(Debug, Clone)]
pub struct ProjectEnvironmentsFetcher {
    client: ProjectsClient,
}

#[async_trait]
impl PageFetcher for ProjectEnvironmentsFetcher {
    type Options = ListProjectEnvironmentsOptions;
    type Item = Environment;

    async fn fetch_page(
        &self,
        options: &ListProjectEnvironmentsOptions,
        ctx: &CallContext,
    ) -> Result<Page<Environment>> {
        let collection = self
            .client
            .list_project_environments_with_context(options, ctx)
            .await?;
        Ok(collection.into_page())
    }
}

/// Fetches pages of `GET /v1/projects/{project_id}/configs`
#[derive(Debug, Clone)]
pub struct ConfigsFetcher {
    client: ProjectsClient,
}

#[async_trait]
impl PageFetcher for ConfigsFetcher {
    type Options = ListConfigsOptions;
    type Item = ProjectConfigSummary;

    async fn fetch_page(
        &self,
        options: &ListConfigsOptions,
        ctx: &CallContext,
    ) -> Result<Page<ProjectConfigSummary>> {
        let collection = self.client.list_configs_with_context(options, ctx).await?;
        Ok(collection.into_page())
    }
}

impl ProjectsClient {
    /// Pager over all projects.
    ///
    /// Fails with [`Error::StartAlreadySet`] if `options.start` is set.
    pub fn projects_pager(&self, options: &ListProjectsOptions) -> Result<ProjectsPager> {
        Pager::new(
            ProjectsFetcher {
                client: self.clone(),
            },
            options,
        )
    }

    /// Pager over the environments of `options.project_id`
    pub fn project_environments_pager(
        &self,
        options: &ListProjectEnvironmentsOptions,
    ) -> Result<ProjectEnvironmentsPager> {
        if options.project_id.is_empty() {
            return Err(Error::missing_parameter("project_id"));
        }
        Pager::new(
            ProjectEnvironmentsFetcher {
                client: self.clone(),
            },
            options,
        )
    }

    /// Pager over the configs of `options.project_id`
    pub fn configs_pager(&self, options: &ListConfigsOptions) -> Result<ConfigsPager> {
        if options.project_id.is_empty() {
            return Err(Error::missing_parameter("project_id"));
        }
        Pager::new(
            ConfigsFetcher {
                client: self.clone(),
            },
            options,
        )
    }
}
