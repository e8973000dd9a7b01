//! Executes a parsed command against the service

use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::config::{ServiceConfig, DEFAULT_SERVICE_NAME};
use crate::error::Result;
use crate::pagination::{PageFetcher, Pager};
use crate::service::{
    DeleteProjectOptions, GetProjectOptions, ListConfigsOptions, ListProjectEnvironmentsOptions,
    ListProjectsOptions, ProjectsClient,
};
use serde_json::{json, Value};
use tracing::info;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command and print its result
    pub async fn run(&self) -> Result<()> {
        let config = self.load_config()?;
        let client = ProjectsClient::new(&config)?;
        let value = self.execute(&client).await?;
        println!("{}", self.render(&value)?);
        Ok(())
    }

    /// Config file from `--config`, otherwise the environment
    fn load_config(&self) -> Result<ServiceConfig> {
        match &self.cli.config {
            Some(path) => ServiceConfig::from_file(path),
            None => ServiceConfig::from_env(DEFAULT_SERVICE_NAME),
        }
    }

    /// Execute the command against `client` and return the JSON to print
    pub async fn execute(&self, client: &ProjectsClient) -> Result<Value> {
        match &self.cli.command {
            Commands::ListProjects { page } => {
                let options = ListProjectsOptions {
                    limit: page.limit,
                    ..Default::default()
                };
                if page.all {
                    let items = drain(client.projects_pager(&options)?).await?;
                    Ok(json!({ "projects": items }))
                } else {
                    Ok(serde_json::to_value(client.list_projects(&options).await?)?)
                }
            }
            Commands::GetProject { id } => {
                let project = client.get_project(&GetProjectOptions::new(id)).await?;
                Ok(serde_json::to_value(project)?)
            }
            Commands::ListEnvironments { project_id, page } => {
                let options = ListProjectEnvironmentsOptions {
                    project_id: project_id.clone(),
                    limit: page.limit,
                    start: None,
                };
                if page.all {
                    let items = drain(client.project_environments_pager(&options)?).await?;
                    Ok(json!({ "environments": items }))
                } else {
                    let page = client.list_project_environments(&options).await?;
                    Ok(serde_json::to_value(page)?)
                }
            }
            Commands::ListConfigs { project_id, page } => {
                let options = ListConfigsOptions {
                    project_id: project_id.clone(),
                    limit: page.limit,
                    start: None,
                };
                if page.all {
                    let items = drain(client.configs_pager(&options)?).await?;
                    Ok(json!({ "configs": items }))
                } else {
                    Ok(serde_json::to_value(client.list_configs(&options).await?)?)
                }
            }
            Commands::DeleteProject { id } => {
                client.delete_project(&DeleteProjectOptions::new(id)).await?;
                Ok(json!({ "deleted": id }))
            }
        }
    }

    /// Format a result for stdout
    pub fn render(&self, value: &Value) -> Result<String> {
        let text = match self.cli.format {
            OutputFormat::Json => serde_json::to_string(value)?,
            OutputFormat::Pretty => serde_json::to_string_pretty(value)?,
        };
        Ok(text)
    }
}

/// Collect every page of a pager
async fn drain<F: PageFetcher>(mut pager: Pager<F>) -> Result<Vec<F::Item>> {
    let items = pager.get_all().await?;
    info!(count = items.len(), "fetched all pages");
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands::PageArgs;
    use crate::config::AuthConfigDef;
    use clap::Parser;
    use pretty_assertions::assert_eq;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn runner(args: &[&str]) -> Runner {
        Runner::new(Cli::try_parse_from(args).unwrap())
    }

    fn client(server: &MockServer) -> ProjectsClient {
        let mut config = ServiceConfig::new(server.uri(), AuthConfigDef::None);
        config.http.max_retries = 0;
        ProjectsClient::new(&config).unwrap()
    }

    #[test]
    fn test_parse_list_projects() {
        let cli =
            Cli::try_parse_from(["projects", "list-projects", "--limit", "10", "--all"]).unwrap();
        assert_eq!(
            cli.command,
            Commands::ListProjects {
                page: PageArgs {
                    limit: Some(10),
                    all: true
                }
            }
        );
        assert_eq!(cli.format, OutputFormat::Json);
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_parse_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "projects",
            "list-configs",
            "--project-id",
            "p1",
            "--format",
            "pretty",
            "--config",
            "svc.yaml",
        ])
        .unwrap();
        assert_eq!(cli.format, OutputFormat::Pretty);
        assert_eq!(cli.config.unwrap().to_str(), Some("svc.yaml"));
    }

    #[test]
    fn test_parse_requires_ids() {
        assert!(Cli::try_parse_from(["projects", "get-project"]).is_err());
        assert!(Cli::try_parse_from(["projects", "list-environments"]).is_err());
    }

    #[test]
    fn test_render_formats() {
        let value = json!({"a": 1});
        assert_eq!(
            runner(&["projects", "get-project", "--id", "x"])
                .render(&value)
                .unwrap(),
            "{\"a\":1}"
        );
        assert_eq!(
            runner(&["projects", "-f", "pretty", "get-project", "--id", "x"])
                .render(&value)
                .unwrap(),
            "{\n  \"a\": 1\n}"
        );
    }

    #[tokio::test]
    async fn test_execute_list_projects_all() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/projects"))
            .and(query_param("start", "t1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "projects": [{"id": "p2", "definition": {"name": "b"}}]
            })))
            .with_priority(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/v1/projects"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "next": {"href": "/v1/projects?start=t1", "start": "t1"},
                "projects": [{"id": "p1", "definition": {"name": "a"}}]
            })))
            .mount(&server)
            .await;

        let value = runner(&["projects", "list-projects", "--all"])
            .execute(&client(&server))
            .await
            .unwrap();

        let ids: Vec<&str> = value["projects"]
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["id"].as_str().unwrap())
            .collect();
        assert_eq!(ids, vec!["p1", "p2"]);
    }

    #[tokio::test]
    async fn test_execute_single_page_keeps_next_link() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/projects/p1/environments"))
            .and(query_param("limit", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "limit": 1,
                "next": {"href": "/v1/projects/p1/environments?limit=1&start=n"},
                "environments": [{"id": "e1", "definition": {"name": "dev"}}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let value = runner(&[
            "projects",
            "list-environments",
            "--project-id",
            "p1",
            "--limit",
            "1",
        ])
        .execute(&client(&server))
        .await
        .unwrap();

        assert_eq!(value["environments"][0]["id"], "e1");
        assert_eq!(
            value["next"]["href"],
            "/v1/projects/p1/environments?limit=1&start=n"
        );
    }

    #[tokio::test]
    async fn test_execute_delete_project() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/v1/projects/p9"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let value = runner(&["projects", "delete-project", "--id", "p9"])
            .execute(&client(&server))
            .await
            .unwrap();

        assert_eq!(value, json!({"deleted": "p9"}));
    }
}
