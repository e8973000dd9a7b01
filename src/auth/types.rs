//! Runtime credential types

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Default IAM token endpoint used to exchange an API key for an access token
pub const DEFAULT_IAM_TOKEN_URL: &str = "https://iam.cloud.ibm.com/identity/token";

/// Where an API key goes on the request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Location {
    #[default]
    Header,
    Query,
}

/// Resolved credentials for the HTTP runtime.
///
/// Built from [`AuthConfigDef`](crate::config::AuthConfigDef) once the
/// service configuration is loaded; secrets live here and nowhere else.
#[derive(Debug, Clone, Default)]
pub enum AuthConfig {
    #[default]
    None,

    /// Static key in a header or query parameter
    ApiKey {
        location: Location,
        /// Defaults to `Authorization`
        header_name: Option<String>,
        /// Defaults to `api_key`
        query_param: Option<String>,
        /// Prepended to `value`, e.g. `"ApiKey "`
        prefix: Option<String>,
        value: String,
    },

    Basic {
        username: String,
        password: String,
    },

    Bearer {
        token: String,
    },

    /// API key traded for short-lived bearer tokens at `token_url`.
    /// `client_id` and `client_secret` are only used when both are set.
    Iam {
        apikey: String,
        token_url: String,
        client_id: Option<String>,
        client_secret: Option<String>,
    },

    CustomHeaders {
        headers: HashMap<String, String>,
    },
}

impl AuthConfig {
    /// IAM auth against the default token endpoint
    pub fn iam(apikey: impl Into<String>) -> Self {
        Self::Iam {
            apikey: apikey.into(),
            token_url: DEFAULT_IAM_TOKEN_URL.to_string(),
            client_id: None,
            client_secret: None,
        }
    }

    /// Short name of the auth scheme, safe to log
    pub fn kind(&self) -> &'static str {
        match self {
            AuthConfig::None => "none",
            AuthConfig::ApiKey { .. } => "api_key",
            AuthConfig::Basic { .. } => "basic",
            AuthConfig::Bearer { .. } => "bearer",
            AuthConfig::Iam { .. } => "iam",
            AuthConfig::CustomHeaders { .. } => "custom_headers",
        }
    }
}
