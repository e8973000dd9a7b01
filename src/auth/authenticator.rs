//! Authenticator implementation
//!
//! Decorates outgoing requests according to an [`AuthConfig`].

use super::iam::IamTokenManager;
use super::types::{AuthConfig, Location};
use crate::error::Result;
use reqwest::{Client, RequestBuilder};

const DEFAULT_API_KEY_HEADER: &str = "Authorization";
const DEFAULT_API_KEY_PARAM: &str = "api_key";

/// Applies credentials to HTTP requests
#[derive(Debug)]
pub struct Authenticator {
    config: AuthConfig,
    /// Present only for IAM auth
    iam: Option<IamTokenManager>,
}

impl Authenticator {
    /// Authenticator with its own HTTP client for token requests
    pub fn new(config: AuthConfig) -> Self {
        Self::with_client(config, Client::new())
    }

    /// Authenticator that reuses `client` for token requests
    pub fn with_client(config: AuthConfig, client: Client) -> Self {
        let iam = match &config {
            AuthConfig::Iam {
                apikey,
                token_url,
                client_id,
                client_secret,
            } => {
                let credentials = client_id.clone().zip(client_secret.clone());
                Some(IamTokenManager::new(
                    client,
                    apikey.as_str(),
                    token_url.as_str(),
                    credentials,
                ))
            }
            _ => None,
        };
        Self { config, iam }
    }

    /// Add credentials to a request
    pub async fn apply(&self, req: RequestBuilder) -> Result<RequestBuilder> {
        if let Some(ref iam) = self.iam {
            return Ok(req.bearer_auth(iam.token().await?));
        }

        let req = match &self.config {
            AuthConfig::None | AuthConfig::Iam { .. } => req,
            AuthConfig::Bearer { token } => req.bearer_auth(token),
            AuthConfig::Basic { username, password } => req.basic_auth(username, Some(password)),
            AuthConfig::ApiKey {
                location,
                header_name,
                query_param,
                prefix,
                value,
            } => {
                let value = match prefix {
                    Some(prefix) => format!("{prefix}{value}"),
                    None => value.clone(),
                };
                match location {
                    Location::Header => req.header(
                        header_name.as_deref().unwrap_or(DEFAULT_API_KEY_HEADER),
                        value,
                    ),
                    Location::Query => req.query(&[(
                        query_param.as_deref().unwrap_or(DEFAULT_API_KEY_PARAM),
                        value,
                    )]),
                }
            }
            AuthConfig::CustomHeaders { headers } => headers
                .iter()
                .fold(req, |req, (key, value)| req.header(key.as_str(), value.as_str())),
        };
        Ok(req)
    }

    /// Drop any cached access token so the next request fetches a new one
    pub async fn clear_cache(&self) {
        if let Some(ref iam) = self.iam {
            iam.invalidate().await;
        }
    }

    /// Auth configuration in use
    pub fn config(&self) -> &AuthConfig {
        &self.config
    }
}
