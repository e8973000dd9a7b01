//! Projects API client
//!
//! One async method per endpoint, each with a `_with_context` variant that
//! forwards a [`CallContext`] to the HTTP runtime.

use super::options::{
    CreateProjectEnvironmentOptions, CreateProjectOptions, DeleteConfigOptions,
    DeleteProjectEnvironmentOptions, DeleteProjectOptions, GetConfigOptions,
    GetProjectEnvironmentOptions, GetProjectOptions, ListConfigsOptions,
    ListProjectEnvironmentsOptions, ListProjectsOptions, UpdateProjectEnvironmentOptions,
    UpdateProjectOptions,
};
use crate::config::{ServiceConfig, DEFAULT_SERVICE_NAME};
use crate::error::{Error, Result};
use crate::http::{HttpClient, RequestConfig};
use crate::model::{
    DeleteResponse, Environment, EnvironmentCollection, EnvironmentPrototype, Project,
    ProjectCollection, ProjectConfig, ProjectConfigCollection,
};
use crate::pagination::{CallContext, START_PARAM};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info};
use url::Url;

const LIMIT_PARAM: &str = "limit";

/// Client for the Projects API.
///
/// Cheap to clone; clones share the HTTP connection pool, rate limiter and
/// token cache.
#[derive(Debug, Clone)]
pub struct ProjectsClient {
    inner: Arc<ClientInner>,
}

#[derive(Debug)]
struct ClientInner {
    http: HttpClient,
    base_url: Url,
    service_name: String,
}

impl ProjectsClient {
    /// Build a client from an explicit configuration
    pub fn new(config: &ServiceConfig) -> Result<Self> {
        config.validate()?;

        let base_url = Url::parse(&config.service_url)?;
        let auth = config.auth.resolve();
        info!(
            service = %config.service_name,
            url = %base_url,
            auth = auth.kind(),
            "creating Projects client"
        );
        let http = HttpClient::with_auth(config.http_client_config(), auth)?;

        Ok(Self {
            inner: Arc::new(ClientInner {
                http,
                base_url,
                service_name: config.service_name.clone(),
            }),
        })
    }

    /// Build a client from `PROJECT_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::new(&ServiceConfig::from_env(DEFAULT_SERVICE_NAME)?)
    }

    /// Base URL requests are sent to
    pub fn service_url(&self) -> &str {
        self.inner.base_url.as_str()
    }

    /// Name the client was configured with
    pub fn service_name(&self) -> &str {
        &self.inner.service_name
    }

    // ------------------------------------------------------------------------
    // Projects
    // ------------------------------------------------------------------------

    /// Create a project
    pub async fn create_project(&self, options: &CreateProjectOptions) -> Result<Project> {
        self.create_project_with_context(options, &CallContext::default())
            .await
    }

    pub async fn create_project_with_context(
        &self,
        options: &CreateProjectOptions,
        ctx: &CallContext,
    ) -> Result<Project> {
        require("definition.name", &options.prototype.definition.name)?;
        require("location", &options.prototype.location)?;
        require("resource_group", &options.prototype.resource_group)?;

        let url = self.endpoint(&["v1", "projects"])?;
        let config = RequestConfig::new().json(to_body(&options.prototype)?);
        self.send(Method::POST, &url, config, ctx).await
    }

    /// List one page of projects
    pub async fn list_projects(&self, options: &ListProjectsOptions) -> Result<ProjectCollection> {
        self.list_projects_with_context(options, &CallContext::default())
            .await
    }

    pub async fn list_projects_with_context(
        &self,
        options: &ListProjectsOptions,
        ctx: &CallContext,
    ) -> Result<ProjectCollection> {
        let url = self.endpoint(&["v1", "projects"])?;
        let config = list_query(options.start.as_deref(), options.limit);
        self.send(Method::GET, &url, config, ctx).await
    }

    /// Get a project with its configs and environments
    pub async fn get_project(&self, options: &GetProjectOptions) -> Result<Project> {
        self.get_project_with_context(options, &CallContext::default())
            .await
    }

    pub async fn get_project_with_context(
        &self,
        options: &GetProjectOptions,
        ctx: &CallContext,
    ) -> Result<Project> {
        let id = require("id", &options.id)?;
        let url = self.endpoint(&["v1", "projects", id])?;
        self.send(Method::GET, &url, RequestConfig::new(), ctx)
            .await
    }

    /// Patch a project definition
    pub async fn update_project(&self, options: &UpdateProjectOptions) -> Result<Project> {
        self.update_project_with_context(options, &CallContext::default())
            .await
    }

    pub async fn update_project_with_context(
        &self,
        options: &UpdateProjectOptions,
        ctx: &CallContext,
    ) -> Result<Project> {
        let id = require("id", &options.id)?;
        let url = self.endpoint(&["v1", "projects", id])?;
        let body = serde_json::json!({ "definition": to_body(&options.definition)? });
        self.send(Method::PATCH, &url, RequestConfig::new().json(body), ctx)
            .await
    }

    /// Delete a project. The server answers with an empty body.
    pub async fn delete_project(&self, options: &DeleteProjectOptions) -> Result<()> {
        self.delete_project_with_context(options, &CallContext::default())
            .await
    }

    pub async fn delete_project_with_context(
        &self,
        options: &DeleteProjectOptions,
        ctx: &CallContext,
    ) -> Result<()> {
        let id = require("id", &options.id)?;
        let url = self.endpoint(&["v1", "projects", id])?;
        debug!(%url, "DELETE");
        self.inner
            .http
            .request(Method::DELETE, &url, prepare(RequestConfig::new(), ctx))
            .await?;
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Environments
    // ------------------------------------------------------------------------

    /// Create an environment in a project
    pub async fn create_project_environment(
        &self,
        options: &CreateProjectEnvironmentOptions,
    ) -> Result<Environment> {
        self.create_project_environment_with_context(options, &CallContext::default())
            .await
    }

    pub async fn create_project_environment_with_context(
        &self,
        options: &CreateProjectEnvironmentOptions,
        ctx: &CallContext,
    ) -> Result<Environment> {
        let project_id = require("project_id", &options.project_id)?;
        require("definition.name", &options.definition.name)?;

        let url = self.endpoint(&["v1", "projects", project_id, "environments"])?;
        let body = to_body(&EnvironmentPrototype {
            definition: options.definition.clone(),
        })?;
        self.send(Method::POST, &url, RequestConfig::new().json(body), ctx)
            .await
    }

    /// List one page of a project's environments
    pub async fn list_project_environments(
        &self,
        options: &ListProjectEnvironmentsOptions,
    ) -> Result<EnvironmentCollection> {
        self.list_project_environments_with_context(options, &CallContext::default())
            .await
    }

    pub async fn list_project_environments_with_context(
        &self,
        options: &ListProjectEnvironmentsOptions,
        ctx: &CallContext,
    ) -> Result<EnvironmentCollection> {
        let project_id = require("project_id", &options.project_id)?;
        let url = self.endpoint(&["v1", "projects", project_id, "environments"])?;
        let config = list_query(options.start.as_deref(), options.limit);
        self.send(Method::GET, &url, config, ctx).await
    }

    /// Get an environment
    pub async fn get_project_environment(
        &self,
        options: &GetProjectEnvironmentOptions,
    ) -> Result<Environment> {
        self.get_project_environment_with_context(options, &CallContext::default())
            .await
    }

    pub async fn get_project_environment_with_context(
        &self,
        options: &GetProjectEnvironmentOptions,
        ctx: &CallContext,
    ) -> Result<Environment> {
        let project_id = require("project_id", &options.project_id)?;
        let id = require("id", &options.id)?;
        let url = self.endpoint(&["v1", "projects", project_id, "environments", id])?;
        self.send(Method::GET, &url, RequestConfig::new(), ctx)
            .await
    }

    /// Patch an environment definition
    pub async fn update_project_environment(
        &self,
        options: &UpdateProjectEnvironmentOptions,
    ) -> Result<Environment> {
        self.update_project_environment_with_context(options, &CallContext::default())
            .await
    }

    pub async fn update_project_environment_with_context(
        &self,
        options: &UpdateProjectEnvironmentOptions,
        ctx: &CallContext,
    ) -> Result<Environment> {
        let project_id = require("project_id", &options.project_id)?;
        let id = require("id", &options.id)?;
        let url = self.endpoint(&["v1", "projects", project_id, "environments", id])?;
        let body = serde_json::json!({ "definition": to_body(&options.definition)? });
        self.send(Method::PATCH, &url, RequestConfig::new().json(body), ctx)
            .await
    }

    /// Delete an environment
    pub async fn delete_project_environment(
        &self,
        options: &DeleteProjectEnvironmentOptions,
    ) -> Result<DeleteResponse> {
        self.delete_project_environment_with_context(options, &CallContext::default())
            .await
    }

    pub async fn delete_project_environment_with_context(
        &self,
        options: &DeleteProjectEnvironmentOptions,
        ctx: &CallContext,
    ) -> Result<DeleteResponse> {
        let project_id = require("project_id", &options.project_id)?;
        let id = require("id", &options.id)?;
        let url = self.endpoint(&["v1", "projects", project_id, "environments", id])?;
        self.send(Method::DELETE, &url, RequestConfig::new(), ctx)
            .await
    }

    // ------------------------------------------------------------------------
    // Configs
    // ------------------------------------------------------------------------

    /// List one page of a project's configs
    pub async fn list_configs(
        &self,
        options: &ListConfigsOptions,
    ) -> Result<ProjectConfigCollection> {
        self.list_configs_with_context(options, &CallContext::default())
            .await
    }

    pub async fn list_configs_with_context(
        &self,
        options: &ListConfigsOptions,
        ctx: &CallContext,
    ) -> Result<ProjectConfigCollection> {
        let project_id = require("project_id", &options.project_id)?;
        let url = self.endpoint(&["v1", "projects", project_id, "configs"])?;
        let config = list_query(options.start.as_deref(), options.limit);
        self.send(Method::GET, &url, config, ctx).await
    }

    /// Get a config
    pub async fn get_config(&self, options: &GetConfigOptions) -> Result<ProjectConfig> {
        self.get_config_with_context(options, &CallContext::default())
            .await
    }

    pub async fn get_config_with_context(
        &self,
        options: &GetConfigOptions,
        ctx: &CallContext,
    ) -> Result<ProjectConfig> {
        let project_id = require("project_id", &options.project_id)?;
        let id = require("id", &options.id)?;
        let url = self.endpoint(&["v1", "projects", project_id, "configs", id])?;
        self.send(Method::GET, &url, RequestConfig::new(), ctx)
            .await
    }

    /// Delete a config
    pub async fn delete_config(&self, options: &DeleteConfigOptions) -> Result<DeleteResponse> {
        self.delete_config_with_context(options, &CallContext::default())
            .await
    }

    pub async fn delete_config_with_context(
        &self,
        options: &DeleteConfigOptions,
        ctx: &CallContext,
    ) -> Result<DeleteResponse> {
        let project_id = require("project_id", &options.project_id)?;
        let id = require("id", &options.id)?;
        let url = self.endpoint(&["v1", "projects", project_id, "configs", id])?;
        self.send(Method::DELETE, &url, RequestConfig::new(), ctx)
            .await
    }

    // ------------------------------------------------------------------------
    // Plumbing
    // ------------------------------------------------------------------------

    /// Absolute URL for the given path segments, each percent-encoded
    fn endpoint(&self, segments: &[&str]) -> Result<String> {
        let mut url = self.inner.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| Error::config(format!("'{}' cannot be a base URL", self.inner.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url.into())
    }

    async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        url: &str,
        config: RequestConfig,
        ctx: &CallContext,
    ) -> Result<T> {
        debug!(%method, %url, "sending request");
        self.inner
            .http
            .request_json(method, url, prepare(config, ctx))
            .await
    }
}

/// Fail with [`Error::MissingParameter`] if `value` is empty
fn require<'a>(name: &str, value: &'a str) -> Result<&'a str> {
    if value.is_empty() {
        return Err(Error::missing_parameter(name));
    }
    Ok(value)
}

fn to_body<T: Serialize>(value: &T) -> Result<serde_json::Value> {
    Ok(serde_json::to_value(value)?)
}

/// Ask for JSON and layer the caller's context on top
fn prepare(config: RequestConfig, ctx: &CallContext) -> RequestConfig {
    ctx.apply(config.header("Accept", "application/json"))
}

fn list_query(start: Option<&str>, limit: Option<i64>) -> RequestConfig {
    RequestConfig::new()
        .query_opt(START_PARAM, start.filter(|s| !s.is_empty()))
        .query_opt(LIMIT_PARAM, limit)
}
