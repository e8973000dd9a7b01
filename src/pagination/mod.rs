//! Pagination module
//!
//! Turns a sequence of "fetch one page" calls into a resumable iteration
//! over a whole collection.
//!
//! # Overview
//!
//! A [`PageFetcher`] issues one list call for the cursor held in its
//! [`PageOptions`] and returns a [`Page`]. A [`Pager`] drives the fetcher,
//! feeding each page's `next` cursor verbatim into the following call until
//! the server stops returning one.

mod cursor;
mod pager;
mod types;

pub use cursor::{next_start, start_from_href, START_PARAM};
pub use pager::{PageFetcher, Pager};
pub use types::{CallContext, Page, PageOptions, PagedCollection};
