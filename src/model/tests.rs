//! Tests for the API models

use super::*;
use crate::pagination::PagedCollection;
use pretty_assertions::assert_eq;
use serde_json::json;

#[test]
fn test_project_collection_into_page() {
    let body = json!({
        "limit": 2,
        "first": {"href": "https://projects.example.com/v1/projects?limit=2"},
        "next": {
            "href": "https://projects.example.com/v1/projects?limit=2&start=tok1",
            "start": "tok1"
        },
        "projects": [
            {
                "id": "p1",
                "crn": "crn:v1:p1",
                "created_at": "2024-01-15T10:00:00Z",
                "location": "us-south",
                "resource_group_id": "rg1",
                "state": "ready",
                "definition": {"name": "alpha", "description": "first"}
            },
            {
                "id": "p2",
                "state": "deleting",
                "definition": {"name": "beta"}
            }
        ]
    });

    let collection: ProjectCollection = serde_json::from_value(body).unwrap();
    assert_eq!(collection.limit, Some(2));
    assert_eq!(collection.next_start(), Some("tok1".to_string()));

    let page = collection.into_page();
    assert_eq!(page.next.as_deref(), Some("tok1"));
    let names: Vec<&str> = page.items.iter().map(|p| p.definition.name.as_str()).collect();
    assert_eq!(names, vec!["alpha", "beta"]);
    assert_eq!(page.items[0].state, Some(ProjectState::Ready));
    assert_eq!(page.items[1].state, Some(ProjectState::Deleting));
}

#[test]
fn test_collection_cursor_from_href_only() {
    let body = json!({
        "next": {"href": "/v1/projects/p1/environments?limit=1&start=env-tok"},
        "environments": []
    });

    let collection: EnvironmentCollection = serde_json::from_value(body).unwrap();
    assert_eq!(collection.into_page().next.as_deref(), Some("env-tok"));
}

#[test]
fn test_collection_without_next_is_last_page() {
    let collection: ProjectConfigCollection =
        serde_json::from_value(json!({"configs": []})).unwrap();
    let page = collection.into_page();

    assert!(page.is_last());
    assert!(page.items.is_empty());
}

#[test]
fn test_unknown_project_state() {
    let state: ProjectState = serde_json::from_str("\"migrating\"").unwrap();
    assert_eq!(state, ProjectState::Unknown);

    let state: ProjectState = serde_json::from_str("\"deleting_failed\"").unwrap();
    assert_eq!(state, ProjectState::DeletingFailed);
}

#[test]
fn test_project_prototype_skips_absent_fields() {
    let prototype = ProjectPrototype {
        definition: ProjectDefinition::named("alpha"),
        location: "us-south".to_string(),
        resource_group: "Default".to_string(),
        ..Default::default()
    };

    let value = serde_json::to_value(&prototype).unwrap();
    assert_eq!(
        value,
        json!({
            "definition": {"name": "alpha"},
            "location": "us-south",
            "resource_group": "Default"
        })
    );
}

#[test]
fn test_patch_definition_only_sends_set_fields() {
    let patch = ProjectPatchDefinition {
        description: Some("updated".to_string()),
        auto_deploy: Some(true),
        ..Default::default()
    };

    assert_eq!(
        serde_json::to_value(&patch).unwrap(),
        json!({"description": "updated", "auto_deploy": true})
    );
}

#[test]
fn test_environment_deserialize() {
    let body = json!({
        "id": "env-1",
        "project": {"id": "p1", "href": "https://x/v1/projects/p1", "definition": {"name": "alpha"}},
        "created_at": "2024-02-01T08:30:00Z",
        "target_account": "acct",
        "definition": {
            "name": "dev",
            "authorizations": {"method": "api_key"},
            "inputs": {"region": "us-south", "replicas": 2}
        }
    });

    let env: Environment = serde_json::from_value(body).unwrap();
    assert_eq!(env.definition.name, "dev");
    assert_eq!(env.project.as_ref().unwrap().id, "p1");
    assert_eq!(
        env.definition.authorizations.unwrap().method.as_deref(),
        Some("api_key")
    );
    assert_eq!(env.definition.inputs.unwrap()["replicas"], json!(2));
}

#[test]
fn test_project_with_nested_resources() {
    let body = json!({
        "id": "p1",
        "href": "https://x/v1/projects/p1",
        "state": "ready",
        "configs": [
            {"id": "c1", "version": 3, "state": "approved", "definition": {"name": "vpc", "locator_id": "1082e7d2.abc"}}
        ],
        "environments": [
            {"id": "e1", "definition": {"name": "prod"}}
        ],
        "definition": {"name": "alpha", "destroy_on_delete": true}
    });

    let project: Project = serde_json::from_value(body).unwrap();
    assert_eq!(project.configs[0].version, Some(3));
    assert_eq!(
        project.configs[0].definition.locator_id.as_deref(),
        Some("1082e7d2.abc")
    );
    assert_eq!(project.environments[0].id, "e1");
    assert_eq!(project.definition.destroy_on_delete, Some(true));
}

#[test]
fn test_delete_response() {
    let resp: DeleteResponse =
        serde_json::from_value(json!({"id": "c1", "definition": {"name": "vpc"}})).unwrap();
    assert_eq!(resp.id, "c1");
    assert_eq!(resp.definition.unwrap().name, "vpc");
}
