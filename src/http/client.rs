//! HTTP runtime shared by every service call
//!
//! Owns the `reqwest` client, applies credentials, retries transient
//! failures with backoff and throttles through the optional rate limiter.
//! Cancellation tokens cut through both in-flight requests and backoff
//! sleeps.

use super::rate_limit::{RateLimiter, RateLimiterConfig};
use crate::auth::{AuthConfig, Authenticator};
use crate::error::{Error, Result};
use crate::types::BackoffType;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;
use std::future::Future;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Client-wide transport settings
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Prefix for relative request paths
    pub base_url: Option<String>,
    pub timeout: Duration,
    /// Retries after the first attempt; 0 sends each request once
    pub max_retries: u32,
    pub initial_backoff: Duration,
    pub max_backoff: Duration,
    pub backoff_type: BackoffType,
    pub rate_limit: Option<RateLimiterConfig>,
    /// Sent with every request
    pub default_headers: HashMap<String, String>,
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout: Duration::from_secs(30),
            max_retries: 3,
            initial_backoff: Duration::from_millis(100),
            max_backoff: Duration::from_secs(30),
            backoff_type: BackoffType::default(),
            rate_limit: None,
            default_headers: HashMap::new(),
            user_agent: format!("projects-sdk-rust/{}", crate::VERSION),
        }
    }
}

impl HttpClientConfig {
    pub fn builder() -> HttpClientConfigBuilder {
        HttpClientConfigBuilder::default()
    }
}

#[derive(Debug, Default)]
pub struct HttpClientConfigBuilder {
    config: HttpClientConfig,
}

impl HttpClientConfigBuilder {
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = Some(url.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    pub fn max_retries(mut self, retries: u32) -> Self {
        self.config.max_retries = retries;
        self
    }

    /// Backoff strategy with its starting delay and cap
    pub fn backoff(mut self, backoff_type: BackoffType, initial: Duration, max: Duration) -> Self {
        self.config.backoff_type = backoff_type;
        self.config.initial_backoff = initial;
        self.config.max_backoff = max;
        self
    }

    pub fn rate_limit(mut self, limit: RateLimiterConfig) -> Self {
        self.config.rate_limit = Some(limit);
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.default_headers.insert(name.into(), value.into());
        self
    }

    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    pub fn build(self) -> HttpClientConfig {
        self.config
    }
}

/// Per-request additions and overrides
#[derive(Debug, Clone, Default)]
pub struct RequestConfig {
    pub query: HashMap<String, String>,
    pub headers: HashMap<String, String>,
    /// JSON body
    pub body: Option<Value>,
    /// Replaces the client timeout for this request
    pub timeout: Option<Duration>,
    /// Replaces the client retry budget for this request
    pub max_retries: Option<u32>,
    /// Aborts the request and any backoff sleep once cancelled
    pub cancel: Option<CancellationToken>,
}

impl RequestConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(name.into(), value.into());
        self
    }

    /// Like [`query`](Self::query), skipped when `value` is `None`
    #[must_use]
    pub fn query_opt<V: ToString>(self, name: impl Into<String>, value: Option<V>) -> Self {
        match value {
            Some(value) => self.query(name, value.to_string()),
            None => self,
        }
    }

    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    #[must_use]
    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    #[must_use]
    pub fn retries(mut self, retries: u32) -> Self {
        self.max_retries = Some(retries);
        self
    }

    #[must_use]
    pub fn cancel(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }
}

/// Retrying, rate-limited HTTP client
pub struct HttpClient {
    client: Client,
    config: HttpClientConfig,
    authenticator: Option<Authenticator>,
    rate_limiter: Option<RateLimiter>,
}

impl HttpClient {
    /// Client with default settings and no credentials
    pub fn new() -> Result<Self> {
        Self::with_config(HttpClientConfig::default())
    }

    pub fn with_config(config: HttpClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(Error::Http)?;

        let rate_limiter = config.rate_limit.as_ref().map(RateLimiter::new);

        Ok(Self {
            client,
            config,
            authenticator: None,
            rate_limiter,
        })
    }

    /// Client that signs every request with `auth_config`
    pub fn with_auth(config: HttpClientConfig, auth_config: AuthConfig) -> Result<Self> {
        let mut client = Self::with_config(config)?;
        client.set_authenticator(auth_config);
        Ok(client)
    }

    /// Replace the credentials; `AuthConfig::None` removes them
    pub fn set_authenticator(&mut self, auth_config: AuthConfig) {
        self.authenticator = match auth_config {
            AuthConfig::None => None,
            config => Some(Authenticator::with_client(config, self.client.clone())),
        };
    }

    pub fn config(&self) -> &HttpClientConfig {
        &self.config
    }

    pub async fn get(&self, url: &str) -> Result<Response> {
        self.request(Method::GET, url, RequestConfig::default())
            .await
    }

    /// POST a JSON body
    pub async fn post(&self, url: &str, body: Value) -> Result<Response> {
        self.request(Method::POST, url, RequestConfig::default().json(body))
            .await
    }

    /// Send a request, retrying transient failures.
    ///
    /// Connection errors, timeouts, 429 and 5xx gateway statuses are retried
    /// up to `max_retries` times. POSTs are only resent after a 429 or a
    /// failed connect, unless `RequestConfig::retries` is set. A
    /// `Retry-After` header on a 429 overrides the computed backoff. Signing
    /// (including any IAM token fetch) and every wait honour the request's
    /// timeout and cancellation token.
    pub async fn request(
        &self,
        method: Method,
        url: &str,
        config: RequestConfig,
    ) -> Result<Response> {
        let full_url = self.build_url(url);
        let max_retries = config.max_retries.unwrap_or(self.config.max_retries);
        let timeout = config.timeout.unwrap_or(self.config.timeout);
        let cancel = config.cancel.as_ref();
        // a POST that timed out or hit a gateway error may already have been
        // applied; resend it only when the caller set retries explicitly
        let replay_safe = method != Method::POST || config.max_retries.is_some();

        let mut attempt = 0;
        loop {
            if let Some(ref limiter) = self.rate_limiter {
                cancellable(cancel, limiter.wait()).await?;
            }

            // credentials may need an IAM round trip; bound it like the send
            let signing = tokio::time::timeout(
                timeout,
                self.build_request(&method, &full_url, &config, timeout),
            );
            let req = match cancellable(cancel, signing).await? {
                Ok(built) => built?,
                Err(_) => {
                    return Err(Error::Timeout {
                        timeout_ms: timeout.as_millis() as u64,
                    })
                }
            };
            let (error, delay) = match cancellable(cancel, req.send()).await? {
                Ok(response) if !is_error_status(response.status()) => {
                    debug!(
                        %method,
                        url = %full_url,
                        status = response.status().as_u16(),
                        "request succeeded"
                    );
                    return Ok(response);
                }
                Ok(response) => self.failed_response(response, attempt).await,
                Err(e) if e.is_timeout() => (
                    Error::Timeout {
                        timeout_ms: timeout.as_millis() as u64,
                    },
                    self.calculate_backoff(attempt),
                ),
                Err(e) => (Error::Http(e), self.calculate_backoff(attempt)),
            };

            let retryable = if replay_safe {
                error.is_retryable()
            } else {
                never_processed(&error)
            };
            if attempt >= max_retries || !retryable {
                return Err(error);
            }

            warn!(
                %method,
                url = %full_url,
                attempt = attempt + 1,
                of = max_retries + 1,
                ?delay,
                %error,
                "retrying request"
            );
            cancellable(cancel, tokio::time::sleep(delay)).await?;
            attempt += 1;
        }
    }

    /// Assemble one attempt: default headers, per-request headers, query,
    /// body, timeout and credentials
    async fn build_request(
        &self,
        method: &Method,
        url: &str,
        config: &RequestConfig,
        timeout: Duration,
    ) -> Result<RequestBuilder> {
        let mut req = self.client.request(method.clone(), url).timeout(timeout);

        for (key, value) in self.config.default_headers.iter().chain(&config.headers) {
            req = req.header(key.as_str(), value.as_str());
        }
        if !config.query.is_empty() {
            req = req.query(&config.query);
        }
        if let Some(ref body) = config.body {
            req = req.json(body);
        }

        match self.authenticator {
            Some(ref auth) => auth.apply(req).await,
            None => Ok(req),
        }
    }

    /// Turn a 4xx/5xx response into an error and the delay before a retry
    async fn failed_response(&self, response: Response, attempt: u32) -> (Error, Duration) {
        let status = response.status();
        let hinted = retry_after(&response);

        if status == StatusCode::TOO_MANY_REQUESTS {
            let delay = hinted.unwrap_or_else(|| self.calculate_backoff(attempt));
            return (
                Error::RateLimited {
                    retry_after_seconds: delay.as_secs(),
                },
                delay,
            );
        }

        let body = response.text().await.unwrap_or_default();
        (
            Error::http_status(status.as_u16(), error_message(&body)),
            self.calculate_backoff(attempt),
        )
    }

    /// Send a request and decode the JSON response body into `T`
    pub async fn request_json<T: DeserializeOwned>(
        &self,
        method: Method,
        url: &str,
        config: RequestConfig,
    ) -> Result<T> {
        let cancel = config.cancel.clone();
        let response = self.request(method, url, config).await?;
        let bytes = cancellable(cancel.as_ref(), response.bytes())
            .await?
            .map_err(Error::Http)?;
        serde_json::from_slice(&bytes).map_err(|e| Error::decode(e.to_string()))
    }

    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        self.request_json(Method::GET, url, RequestConfig::default())
            .await
    }

    pub fn has_rate_limiter(&self) -> bool {
        self.rate_limiter.is_some()
    }

    /// Absolute URLs pass through; anything else is joined to `base_url`
    fn build_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }

        match &self.config.base_url {
            Some(base) => {
                let base = base.trim_end_matches('/');
                let path = path.trim_start_matches('/');
                format!("{base}/{path}")
            }
            None => path.to_string(),
        }
    }

    /// Wait before retrying after failed attempt number `attempt`
    pub fn calculate_backoff(&self, attempt: u32) -> Duration {
        self.config.backoff_type.delay(
            attempt,
            self.config.initial_backoff,
            self.config.max_backoff,
        )
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("config", &self.config)
            .field("has_authenticator", &self.authenticator.is_some())
            .field("has_rate_limiter", &self.rate_limiter.is_some())
            .finish_non_exhaustive()
    }
}

/// Race a future against an optional cancellation token
async fn cancellable<F: Future>(cancel: Option<&CancellationToken>, fut: F) -> Result<F::Output> {
    match cancel {
        Some(token) => {
            tokio::select! {
                biased;
                () = token.cancelled() => Err(Error::Cancelled),
                out = fut => Ok(out),
            }
        }
        None => Ok(fut.await),
    }
}

/// Failures where the server cannot have acted on the request
fn never_processed(error: &Error) -> bool {
    match error {
        Error::RateLimited { .. } => true,
        Error::Http(e) => e.is_connect(),
        _ => false,
    }
}

fn is_error_status(status: StatusCode) -> bool {
    status.is_client_error() || status.is_server_error()
}

/// `Retry-After` in seconds, if the server sent one
fn retry_after(response: &Response) -> Option<Duration> {
    response
        .headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.parse().ok())
        .map(Duration::from_secs)
}

/// Pull a human readable message out of an error body.
///
/// Understands `{"errors":[{"message":..}]}`, `{"error":..}` and
/// `{"message":..}` shapes; anything else is returned verbatim.
pub(crate) fn error_message(body: &str) -> String {
    let Ok(value) = serde_json::from_str::<Value>(body) else {
        return body.to_string();
    };

    let message = value
        .get("errors")
        .and_then(|errors| errors.get(0))
        .and_then(|first| first.get("message"))
        .or_else(|| value.get("error"))
        .or_else(|| value.get("message"))
        .and_then(Value::as_str);

    match message {
        Some(message) => message.to_string(),
        None => body.to_string(),
    }
}
