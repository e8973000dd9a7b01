//! Shapes shared by several resources

use crate::pagination::next_start;
use serde::{Deserialize, Serialize};

/// Link to a page of a collection
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PaginationLink {
    /// URL of the page
    pub href: String,
    /// Cursor to send as `start`, when the server spells it out
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,
}

impl PaginationLink {
    /// Cursor for this link, from `start` or the `start` query of `href`
    pub fn cursor(&self) -> Option<String> {
        next_start(Some(&self.href), self.start.as_deref())
    }
}

/// Cursor of an optional `next` link
pub(crate) fn next_cursor(next: Option<&PaginationLink>) -> Option<String> {
    next.and_then(PaginationLink::cursor)
}

/// Name-only definition block
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NameDefinition {
    /// Resource name
    pub name: String,
}

/// Reference to the project that owns a resource
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProjectReference {
    /// Project id
    pub id: String,
    /// Project URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    /// Project CRN
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crn: Option<String>,
    /// Project name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub definition: Option<NameDefinition>,
}

/// Body returned by delete operations
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DeleteResponse {
    /// Id of the deleted resource
    pub id: String,
    /// Name of the deleted resource, when returned
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub definition: Option<NameDefinition>,
}

/// Credentials a project uses to act in a target account
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Authorizations {
    /// Trusted profile id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trusted_profile_id: Option<String>,
    /// `api_key` or `trusted_profile`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    /// API key, write only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}
