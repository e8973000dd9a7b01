#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::doc_markdown)]

//! # Projects SDK
//!
//! Client library for the Projects REST API.
//!
//! ## Features
//!
//! - **Typed endpoints**: one async method per operation on projects,
//!   environments and configs
//! - **Pagers**: cursor-following iteration over every list operation,
//!   page by page, all at once, or as a `Stream`
//! - **Auth**: IAM API key exchange with token caching, bearer, basic,
//!   API key and custom headers
//! - **HTTP runtime**: retries with backoff, optional rate limiting,
//!   per-call timeouts and cancellation
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use projects_sdk::{ListProjectsOptions, ProjectsClient, Result, ServiceConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = ServiceConfig::from_env("project")?;
//!     let client = ProjectsClient::new(&config)?;
//!
//!     let mut pager = client.projects_pager(&ListProjectsOptions::new().with_limit(50))?;
//!     while pager.has_next() {
//!         for project in pager.get_next().await? {
//!             println!("{} {}", project.id, project.definition.name);
//!         }
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │                     ProjectsClient                        │
//! │  create/list/get/update/delete   projects_pager() ...     │
//! └───────────────────────────────────────────────────────────┘
//!                │                              │
//! ┌──────────────┴──────────┐      ┌────────────┴────────────┐
//! │        HttpClient       │      │   Pager<PageFetcher>    │
//! ├──────────┬──────────────┤      ├─────────────────────────┤
//! │ Auth     │ Retry/Backoff│      │ has_next / get_next     │
//! │ IAM      │ Rate Limit   │      │ get_all / into_stream   │
//! │ Bearer   │ Cancellation │      │                         │
//! └──────────┴──────────────┘      └─────────────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;

pub mod types;

/// Credentials and IAM token exchange
pub mod auth;

pub mod http;

/// Cursor pagination
pub mod pagination;

/// API request and response bodies
pub mod model;

/// Service client for the Projects API
pub mod service;

/// Service configuration
pub mod config;

/// Command-line interface
pub mod cli;

pub use config::{AuthConfigDef, HttpSettings, ServiceConfig};
pub use error::{Error, Result};
pub use pagination::{CallContext, Page, PageFetcher, PageOptions, Pager};
pub use service::*;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const NAME: &str = env!("CARGO_PKG_NAME");
