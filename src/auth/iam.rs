//! IAM API key exchange
//!
//! Trades a long-lived API key for a short-lived access token at the IAM
//! token endpoint and keeps the token until it is about to expire.

use crate::error::{Error, Result};
use chrono::{DateTime, TimeZone, Utc};
use reqwest::Client;
use serde::Deserialize;
use tokio::sync::RwLock;
use tracing::debug;

/// Grant type sent with an IAM API key exchange
pub const IAM_APIKEY_GRANT_TYPE: &str = "urn:ibm:params:oauth:grant-type:apikey";

/// Tokens this close to expiry are refreshed before use
const EXPIRY_MARGIN_SECS: i64 = 30;

/// Access token with its expiry
#[derive(Debug, Clone)]
pub struct AccessToken {
    pub token: String,
    /// `None` means the server gave no lifetime; the token is kept until cleared
    pub expires_at: Option<DateTime<Utc>>,
}

impl AccessToken {
    /// Token valid for `seconds` from now
    pub fn valid_for(token: impl Into<String>, seconds: i64) -> Self {
        Self {
            token: token.into(),
            expires_at: Some(Utc::now() + chrono::Duration::seconds(seconds)),
        }
    }

    /// True while the token has more than the expiry margin left
    pub fn is_usable(&self) -> bool {
        self.expires_at.map_or(true, |at| {
            Utc::now() + chrono::Duration::seconds(EXPIRY_MARGIN_SECS) < at
        })
    }
}

/// Body of a token endpoint response
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    /// Lifetime in seconds
    #[serde(default)]
    expires_in: Option<i64>,
    /// Absolute expiry as a unix timestamp
    #[serde(default)]
    expiration: Option<i64>,
}

impl From<TokenResponse> for AccessToken {
    fn from(resp: TokenResponse) -> Self {
        let expires_at = match (resp.expires_in, resp.expiration) {
            (Some(secs), _) => Some(Utc::now() + chrono::Duration::seconds(secs)),
            (None, Some(ts)) => Utc.timestamp_opt(ts, 0).single(),
            (None, None) => None,
        };
        Self {
            token: resp.access_token,
            expires_at,
        }
    }
}

/// Fetches and caches IAM access tokens.
///
/// Concurrent callers share one refresh: the first to take the write lock
/// fetches, the rest reuse its token.
#[derive(Debug)]
pub struct IamTokenManager {
    apikey: String,
    token_url: String,
    client_credentials: Option<(String, String)>,
    client: Client,
    token: RwLock<Option<AccessToken>>,
}

impl IamTokenManager {
    pub fn new(
        client: Client,
        apikey: impl Into<String>,
        token_url: impl Into<String>,
        client_credentials: Option<(String, String)>,
    ) -> Self {
        Self {
            apikey: apikey.into(),
            token_url: token_url.into(),
            client_credentials,
            client,
            token: RwLock::new(None),
        }
    }

    /// A usable access token, fetching a new one if needed
    pub async fn token(&self) -> Result<String> {
        if let Some(token) = self.token.read().await.as_ref().filter(|t| t.is_usable()) {
            return Ok(token.token.clone());
        }

        let mut slot = self.token.write().await;
        if let Some(token) = slot.as_ref().filter(|t| t.is_usable()) {
            return Ok(token.token.clone());
        }

        let fresh = self.request_token().await?;
        let value = fresh.token.clone();
        *slot = Some(fresh);
        Ok(value)
    }

    /// Forget the cached token
    pub async fn invalidate(&self) {
        self.token.write().await.take();
    }

    async fn request_token(&self) -> Result<AccessToken> {
        debug!(url = %self.token_url, "requesting IAM access token");

        let form = [
            ("grant_type", IAM_APIKEY_GRANT_TYPE),
            ("apikey", self.apikey.as_str()),
            ("response_type", "cloud_iam"),
        ];
        let mut req = self
            .client
            .post(&self.token_url)
            .header("Accept", "application/json")
            .form(&form);
        if let Some((id, secret)) = &self.client_credentials {
            req = req.basic_auth(id, Some(secret));
        }

        let response = req.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::TokenRequest {
                message: format!("IAM returned {}: {body}", status.as_u16()),
            });
        }

        let body: TokenResponse = response.json().await?;
        if body.access_token.is_empty() {
            return Err(Error::auth("IAM response carried an empty access token"));
        }
        Ok(body.into())
    }
}
