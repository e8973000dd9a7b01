//! Stateful pager over a cursor-paginated collection

use super::types::{CallContext, Page, PageOptions};
use crate::error::{Error, Result};
use crate::types::NonEmpty;
use async_trait::async_trait;
use futures::stream::{self, Stream};
use std::collections::VecDeque;
use tracing::debug;

/// Fetches a single page of a collection.
///
/// Implementations issue exactly one request per call and keep no state
/// between calls. Errors are returned as-is; the pager does not interpret
/// or retry them.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Options describing the collection, page size and cursor
    type Options: PageOptions;
    /// Element type of the collection
    type Item: Send;

    /// Fetch the page selected by `options.start()`
    async fn fetch_page(&self, options: &Self::Options, ctx: &CallContext)
        -> Result<Page<Self::Item>>;
}

/// Walks a collection one page at a time.
///
/// A fresh pager always performs at least one fetch. Once the server
/// returns a page without a next cursor the pager is exhausted and every
/// further [`Pager::get_next`] fails with [`Error::NoMoreResults`] without
/// contacting the server. A failed fetch leaves the cursor untouched, so
/// calling `get_next` again retries the same page.
///
/// Not meant for concurrent use; `get_next` takes `&mut self`.
pub struct Pager<F: PageFetcher> {
    fetcher: F,
    options: F::Options,
    has_more: bool,
    cursor: Option<String>,
}

impl<F: PageFetcher> Pager<F> {
    /// Create a pager bound to `fetcher` and a private copy of `options`.
    ///
    /// Fails with [`Error::StartAlreadySet`] if `options` already carries a
    /// non-empty cursor.
    pub fn new(fetcher: F, options: &F::Options) -> Result<Self> {
        if options.start().is_some_and(|start| !start.is_empty()) {
            return Err(Error::StartAlreadySet);
        }

        let mut options = options.clone();
        options.set_start(None);

        Ok(Self {
            fetcher,
            options,
            has_more: true,
            cursor: None,
        })
    }

    /// True until the server reports the last page
    pub fn has_next(&self) -> bool {
        self.has_more
    }

    /// Cursor that the next fetch will send
    pub fn cursor(&self) -> Option<&str> {
        self.cursor.as_deref()
    }

    /// Options the pager was built with
    pub fn options(&self) -> &F::Options {
        &self.options
    }

    /// Fetch the next page and return its items
    pub async fn get_next(&mut self) -> Result<Vec<F::Item>> {
        self.get_next_with_context(&CallContext::default()).await
    }

    /// Fetch the next page, passing `ctx` through to the transport
    pub async fn get_next_with_context(&mut self, ctx: &CallContext) -> Result<Vec<F::Item>> {
        if !self.has_more {
            return Err(Error::NoMoreResults);
        }

        self.options.set_start(self.cursor.clone());
        debug!(
            start = ?self.cursor,
            limit = ?self.options.limit(),
            "fetching page"
        );
        let page = self.fetcher.fetch_page(&self.options, ctx).await?;

        match page.next.non_empty() {
            Some(next) => {
                debug!(items = page.items.len(), "page fetched, more available");
                self.cursor = Some(next);
            }
            None => {
                debug!(items = page.items.len(), "last page fetched");
                self.cursor = None;
                self.has_more = false;
            }
        }

        Ok(page.items)
    }

    /// Fetch every remaining page and concatenate the items in order.
    ///
    /// Stops at the first error and returns it; items gathered before the
    /// failure are dropped.
    pub async fn get_all(&mut self) -> Result<Vec<F::Item>> {
        self.get_all_with_context(&CallContext::default()).await
    }

    /// [`Pager::get_all`] with a context passed to every fetch
    pub async fn get_all_with_context(&mut self, ctx: &CallContext) -> Result<Vec<F::Item>> {
        if !self.has_more {
            return Err(Error::NoMoreResults);
        }

        let mut all = Vec::new();
        while self.has_next() {
            let items = self.get_next_with_context(ctx).await?;
            all.extend(items);
        }
        Ok(all)
    }

    /// Turn the pager into a stream of items.
    ///
    /// The stream ends after the last page, or right after yielding the
    /// first error.
    pub fn into_stream(self) -> impl Stream<Item = Result<F::Item>> {
        stream::unfold(
            (self, VecDeque::new(), false),
            |(mut pager, mut buffer, failed)| async move {
                loop {
                    if let Some(item) = buffer.pop_front() {
                        return Some((Ok(item), (pager, buffer, failed)));
                    }
                    if failed || !pager.has_next() {
                        return None;
                    }
                    match pager.get_next().await {
                        Ok(items) => buffer.extend(items),
                        Err(e) => return Some((Err(e), (pager, buffer, true))),
                    }
                }
            },
        )
    }
}

impl<F> std::fmt::Debug for Pager<F>
where
    F: PageFetcher,
    F::Options: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pager")
            .field("options", &self.options)
            .field("has_more", &self.has_more)
            .field("cursor", &self.cursor)
            .finish_non_exhaustive()
    }
}
