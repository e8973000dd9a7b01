//! Pagination types and traits
//!
//! Defines the abstractions shared by the pager and the list operations
//! that feed it.

use crate::http::RequestConfig;
use std::collections::HashMap;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// One bounded batch of items returned by a single list call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    /// Items in the order the server returned them
    pub items: Vec<T>,
    /// Opaque cursor for the following page, `None` on the last page
    pub next: Option<String>,
}

impl<T> Page<T> {
    /// Create a page that is followed by another one
    pub fn new(items: Vec<T>, next: impl Into<String>) -> Self {
        Self {
            items,
            next: Some(next.into()),
        }
    }

    /// Create the final page of a collection
    pub fn last(items: Vec<T>) -> Self {
        Self { items, next: None }
    }

    /// True if the server reported no further pages
    pub fn is_last(&self) -> bool {
        self.next.as_deref().map_or(true, str::is_empty)
    }
}

/// List options that carry a `start` cursor and a page size.
///
/// The pager owns a clone of these and rewrites `start` between calls.
pub trait PageOptions: Clone + Send + Sync {
    /// Current cursor, if any
    fn start(&self) -> Option<&str>;

    /// Replace the cursor
    fn set_start(&mut self, start: Option<String>);

    /// Requested page size
    fn limit(&self) -> Option<i64>;
}

/// A response body that holds one page of a collection
pub trait PagedCollection {
    /// Element type of the collection
    type Item;

    /// Split the response into its items and the next cursor
    fn into_page(self) -> Page<Self::Item>;
}

/// Per-call settings passed unchanged from the caller to the transport.
///
/// The pager never inspects these; they only reach the HTTP request.
#[derive(Debug, Clone, Default)]
pub struct CallContext {
    /// Overall deadline for the request
    pub timeout: Option<Duration>,
    /// Cancels the in-flight request when triggered
    pub cancel: Option<CancellationToken>,
    /// Extra headers for this call only
    pub headers: HashMap<String, String>,
}

impl CallContext {
    /// Create an empty context
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set a cancellation token
    #[must_use]
    pub fn with_cancel(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Add a header
    #[must_use]
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Copy these settings onto a request
    pub fn apply(&self, mut config: RequestConfig) -> RequestConfig {
        if let Some(timeout) = self.timeout {
            config = config.timeout(timeout);
        }
        if let Some(ref token) = self.cancel {
            config = config.cancel(token.clone());
        }
        for (key, value) in &self.headers {
            config = config.header(key.as_str(), value.as_str());
        }
        config
    }
}
