//! Service configuration
//!
//! A [`ServiceConfig`] is passed explicitly to the client; nothing is read
//! from process-wide defaults. It can be written by hand, loaded from YAML,
//! or read from `<SERVICE_NAME>_*` environment variables.

use crate::auth::{AuthConfig, Location, DEFAULT_IAM_TOKEN_URL};
use crate::error::{Error, Result};
use crate::http::{HttpClientConfig, RateLimiterConfig};
use crate::types::{BackoffType, NonEmpty};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

/// Default service name, also the prefix for environment variables
pub const DEFAULT_SERVICE_NAME: &str = "project";

/// Default endpoint of the Projects API
pub const DEFAULT_SERVICE_URL: &str = "https://projects.api.cloud.ibm.com";

// ============================================================================
// Top-Level Service Config
// ============================================================================

/// Everything needed to build a `ProjectsClient`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Name used for logging and environment variable lookup
    pub service_name: String,

    /// Base URL for API requests
    pub service_url: String,

    /// Authentication configuration
    pub auth: AuthConfigDef,

    /// HTTP client configuration
    pub http: HttpSettings,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            service_name: DEFAULT_SERVICE_NAME.to_string(),
            service_url: DEFAULT_SERVICE_URL.to_string(),
            auth: AuthConfigDef::default(),
            http: HttpSettings::default(),
        }
    }
}

impl ServiceConfig {
    /// Config for `service_url` with the given auth
    pub fn new(service_url: impl Into<String>, auth: AuthConfigDef) -> Self {
        Self {
            service_url: service_url.into(),
            auth,
            ..Default::default()
        }
    }

    /// Parse a YAML document
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::FileNotFound {
                    path: path.display().to_string(),
                }
            } else {
                Error::Io(e)
            }
        })?;
        Self::from_yaml_str(&contents)
    }

    /// Read `<SERVICE_NAME>_*` variables from the process environment
    pub fn from_env(service_name: &str) -> Result<Self> {
        Self::from_env_lookup(service_name, |key| std::env::var(key).ok())
    }

    /// Build a config from `<SERVICE_NAME>_*` variables supplied by `lookup`.
    ///
    /// Recognised suffixes: `URL`, `AUTH_TYPE`, `APIKEY`, `AUTH_URL`,
    /// `CLIENT_ID`, `CLIENT_SECRET`, `BEARER_TOKEN`, `USERNAME`, `PASSWORD`.
    /// Without `AUTH_TYPE`, an `APIKEY` selects IAM and anything else means
    /// no auth.
    pub fn from_env_lookup<F>(service_name: &str, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let prefix = service_name.to_uppercase().replace('-', "_");
        let var = |suffix: &str| lookup(&format!("{prefix}_{suffix}")).non_empty();
        let required = |suffix: &str| {
            var(suffix).ok_or_else(|| Error::missing_field(format!("{prefix}_{suffix}")))
        };

        let auth_type = var("AUTH_TYPE")
            .map(|t| t.to_lowercase())
            .or_else(|| var("APIKEY").map(|_| "iam".to_string()));

        let auth = match auth_type.as_deref() {
            None | Some("noauth" | "none") => AuthConfigDef::None,
            Some("iam") => AuthConfigDef::Iam {
                apikey: required("APIKEY")?,
                url: var("AUTH_URL"),
                client_id: var("CLIENT_ID"),
                client_secret: var("CLIENT_SECRET"),
            },
            Some("bearertoken" | "bearer") => AuthConfigDef::Bearer {
                token: required("BEARER_TOKEN")?,
            },
            Some("basic") => AuthConfigDef::Basic {
                username: required("USERNAME")?,
                password: required("PASSWORD")?,
            },
            Some(other) => {
                return Err(Error::InvalidConfigValue {
                    field: format!("{prefix}_AUTH_TYPE"),
                    message: format!("unsupported auth type '{other}'"),
                })
            }
        };

        let config = Self {
            service_name: service_name.to_string(),
            service_url: var("URL").unwrap_or_else(|| DEFAULT_SERVICE_URL.to_string()),
            auth,
            http: HttpSettings::default(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Check the config for values the client cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.service_url.is_empty() {
            return Err(Error::missing_field("service_url"));
        }
        let url = url::Url::parse(&self.service_url)?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::InvalidConfigValue {
                field: "service_url".to_string(),
                message: format!("unsupported scheme '{}'", url.scheme()),
            });
        }
        if self.http.timeout_secs == 0 {
            return Err(Error::InvalidConfigValue {
                field: "http.timeout_secs".to_string(),
                message: "must be greater than zero".to_string(),
            });
        }
        self.auth.validate()
    }

    /// Runtime HTTP client settings
    pub fn http_client_config(&self) -> HttpClientConfig {
        self.http.to_client_config(&self.service_url)
    }
}

// ============================================================================
// Auth Config
// ============================================================================

/// Serializable auth settings, resolved into [`AuthConfig`]
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AuthConfigDef {
    /// No authentication
    #[default]
    None,

    /// IAM API key exchange
    Iam {
        apikey: String,
        /// Token endpoint; `/identity/token` is appended to bare hosts
        #[serde(default)]
        url: Option<String>,
        #[serde(default)]
        client_id: Option<String>,
        #[serde(default)]
        client_secret: Option<String>,
    },

    /// Static bearer token
    Bearer { token: String },

    /// HTTP basic auth
    Basic { username: String, password: String },

    /// API key in a header or query parameter
    ApiKey {
        value: String,
        #[serde(default)]
        location: Location,
        #[serde(default)]
        header_name: Option<String>,
        #[serde(default)]
        query_param: Option<String>,
        #[serde(default)]
        prefix: Option<String>,
    },

    /// Fixed headers on every request
    CustomHeaders { headers: HashMap<String, String> },
}

impl AuthConfigDef {
    fn validate(&self) -> Result<()> {
        let empty = match self {
            AuthConfigDef::Iam { apikey, .. } => apikey.is_empty().then_some("auth.apikey"),
            AuthConfigDef::Bearer { token } => token.is_empty().then_some("auth.token"),
            AuthConfigDef::Basic { username, .. } => {
                username.is_empty().then_some("auth.username")
            }
            AuthConfigDef::ApiKey { value, .. } => value.is_empty().then_some("auth.value"),
            AuthConfigDef::None | AuthConfigDef::CustomHeaders { .. } => None,
        };
        match empty {
            Some(field) => Err(Error::missing_field(field)),
            None => Ok(()),
        }
    }

    /// Resolve into the runtime auth configuration
    pub fn resolve(&self) -> AuthConfig {
        match self {
            AuthConfigDef::None => AuthConfig::None,
            AuthConfigDef::Iam {
                apikey,
                url,
                client_id,
                client_secret,
            } => AuthConfig::Iam {
                apikey: apikey.clone(),
                token_url: url
                    .as_deref()
                    .map_or_else(|| DEFAULT_IAM_TOKEN_URL.to_string(), iam_token_url),
                client_id: client_id.clone(),
                client_secret: client_secret.clone(),
            },
            AuthConfigDef::Bearer { token } => AuthConfig::Bearer {
                token: token.clone(),
            },
            AuthConfigDef::Basic { username, password } => AuthConfig::Basic {
                username: username.clone(),
                password: password.clone(),
            },
            AuthConfigDef::ApiKey {
                value,
                location,
                header_name,
                query_param,
                prefix,
            } => AuthConfig::ApiKey {
                location: *location,
                header_name: header_name.clone(),
                query_param: query_param.clone(),
                prefix: prefix.clone(),
                value: value.clone(),
            },
            AuthConfigDef::CustomHeaders { headers } => AuthConfig::CustomHeaders {
                headers: headers.clone(),
            },
        }
    }
}

/// Token endpoint for an IAM base URL
fn iam_token_url(url: &str) -> String {
    const TOKEN_PATH: &str = "/identity/token";
    let url = url.trim_end_matches('/');
    if url.ends_with(TOKEN_PATH) {
        url.to_string()
    } else {
        format!("{url}{TOKEN_PATH}")
    }
}

// ============================================================================
// HTTP Config
// ============================================================================

/// HTTP client settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpSettings {
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Maximum retries for retryable failures
    pub max_retries: u32,
    /// Backoff strategy between retries
    pub backoff: BackoffType,
    /// First backoff delay in milliseconds
    pub initial_backoff_ms: u64,
    /// Largest backoff delay in milliseconds
    pub max_backoff_ms: u64,
    /// Optional client-side rate limit
    pub rate_limit: Option<RateLimiterConfig>,
    /// Headers sent with every request
    pub headers: HashMap<String, String>,
    /// Override the user agent
    pub user_agent: Option<String>,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            max_retries: 3,
            backoff: BackoffType::Exponential,
            initial_backoff_ms: 100,
            max_backoff_ms: 30_000,
            rate_limit: None,
            headers: HashMap::new(),
            user_agent: None,
        }
    }
}

impl HttpSettings {
    fn to_client_config(&self, base_url: &str) -> HttpClientConfig {
        let mut builder = HttpClientConfig::builder()
            .base_url(base_url)
            .timeout(Duration::from_secs(self.timeout_secs))
            .max_retries(self.max_retries)
            .backoff(
                self.backoff,
                Duration::from_millis(self.initial_backoff_ms),
                Duration::from_millis(self.max_backoff_ms),
            );

        if let Some(ref limit) = self.rate_limit {
            builder = builder.rate_limit(limit.clone());
        }
        for (key, value) in &self.headers {
            builder = builder.header(key.as_str(), value.as_str());
        }
        if let Some(ref agent) = self.user_agent {
            builder = builder.user_agent(agent.as_str());
        }
        builder.build()
    }
}
