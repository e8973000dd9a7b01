//! Per-operation option structs
//!
//! One struct per endpoint, holding the path parameters, query parameters
//! and body of the call. List options implement [`PageOptions`] so a pager
//! can rewrite their `start` cursor.

use crate::model::{
    EnvironmentDefinition, EnvironmentPatchDefinition, ProjectDefinition, ProjectPatchDefinition,
    ProjectPrototype,
};
use crate::pagination::PageOptions;

// ============================================================================
// Projects
// ============================================================================

/// Options for `create_project`
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CreateProjectOptions {
    pub prototype: ProjectPrototype,
}

impl CreateProjectOptions {
    pub fn new(
        definition: ProjectDefinition,
        location: impl Into<String>,
        resource_group: impl Into<String>,
    ) -> Self {
        Self {
            prototype: ProjectPrototype {
                definition,
                location: location.into(),
                resource_group: resource_group.into(),
                ..Default::default()
            },
        }
    }
}

/// Options for `list_projects`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ListProjectsOptions {
    /// Cursor of the page to fetch; left unset when building a pager
    pub start: Option<String>,
    /// Page size
    pub limit: Option<i64>,
}

impl ListProjectsOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_start(mut self, start: impl Into<String>) -> Self {
        self.start = Some(start.into());
        self
    }

    #[must_use]
    pub fn with_limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }
}

impl PageOptions for ListProjectsOptions {
    fn start(&self) -> Option<&str> {
        self.start.as_deref()
    }

    fn set_start(&mut self, start: Option<String>) {
        self.start = start;
    }

    fn limit(&self) -> Option<i64> {
        self.limit
    }
}

/// Options for `get_project`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GetProjectOptions {
    pub id: String,
}

impl GetProjectOptions {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

/// Options for `update_project`
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UpdateProjectOptions {
    pub id: String,
    pub definition: ProjectPatchDefinition,
}

impl UpdateProjectOptions {
    pub fn new(id: impl Into<String>, definition: ProjectPatchDefinition) -> Self {
        Self {
            id: id.into(),
            definition,
        }
    }
}

/// Options for `delete_project`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DeleteProjectOptions {
    pub id: String,
}

impl DeleteProjectOptions {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

// ============================================================================
// Environments
// ============================================================================

/// Options for `create_project_environment`
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CreateProjectEnvironmentOptions {
    pub project_id: String,
    pub definition: EnvironmentDefinition,
}

impl CreateProjectEnvironmentOptions {
    pub fn new(project_id: impl Into<String>, definition: EnvironmentDefinition) -> Self {
        Self {
            project_id: project_id.into(),
            definition,
        }
    }
}

/// Options for `list_project_environments`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ListProjectEnvironmentsOptions {
    pub project_id: String,
    pub start: Option<String>,
    pub limit: Option<i64>,
}

impl ListProjectEnvironmentsOptions {
    pub fn new(project_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_start(mut self, start: impl Into<String>) -> Self {
        self.start = Some(start.into());
        self
    }

    #[must_use]
    pub fn with_limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }
}

impl PageOptions for ListProjectEnvironmentsOptions {
    fn start(&self) -> Option<&str> {
        self.start.as_deref()
    }

    fn set_start(&mut self, start: Option<String>) {
        self.start = start;
    }

    fn limit(&self) -> Option<i64> {
        self.limit
    }
}

/// Options for `get_project_environment`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GetProjectEnvironmentOptions {
    pub project_id: String,
    pub id: String,
}

impl GetProjectEnvironmentOptions {
    pub fn new(project_id: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            id: id.into(),
        }
    }
}

/// Options for `update_project_environment`
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UpdateProjectEnvironmentOptions {
    pub project_id: String,
    pub id: String,
    pub definition: EnvironmentPatchDefinition,
}

impl UpdateProjectEnvironmentOptions {
    pub fn new(
        project_id: impl Into<String>,
        id: impl Into<String>,
        definition: EnvironmentPatchDefinition,
    ) -> Self {
        Self {
            project_id: project_id.into(),
            id: id.into(),
            definition,
        }
    }
}

/// Options for `delete_project_environment`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DeleteProjectEnvironmentOptions {
    pub project_id: String,
    pub id: String,
}

impl DeleteProjectEnvironmentOptions {
    pub fn new(project_id: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            id: id.into(),
        }
    }
}

// ============================================================================
// Configs
// ============================================================================

/// Options for `list_configs`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ListConfigsOptions {
    pub project_id: String,
    pub start: Option<String>,
    pub limit: Option<i64>,
}

impl ListConfigsOptions {
    pub fn new(project_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_start(mut self, start: impl Into<String>) -> Self {
        self.start = Some(start.into());
        self
    }

    #[must_use]
    pub fn with_limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }
}

impl PageOptions for ListConfigsOptions {
    fn start(&self) -> Option<&str> {
        self.start.as_deref()
    }

    fn set_start(&mut self, start: Option<String>) {
        self.start = start;
    }

    fn limit(&self) -> Option<i64> {
        self.limit
    }
}

/// Options for `get_config`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GetConfigOptions {
    pub project_id: String,
    pub id: String,
}

impl GetConfigOptions {
    pub fn new(project_id: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            id: id.into(),
        }
    }
}

/// Options for `delete_config`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DeleteConfigOptions {
    pub project_id: String,
    pub id: String,
}

impl DeleteConfigOptions {
    pub fn new(project_id: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            id: id.into(),
        }
    }
}
