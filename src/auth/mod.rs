//! Authentication module
//!
//! Supports: IAM API key exchange, Bearer, Basic, API Key, Custom Headers
//!
//! The `Authenticator` decorates each request; for IAM it asks the
//! `IamTokenManager` for an access token, which is cached until shortly
//! before it expires.

mod authenticator;
mod iam;
mod types;

pub use authenticator::Authenticator;
pub use iam::{AccessToken, IamTokenManager, IAM_APIKEY_GRANT_TYPE};
pub use types::{AuthConfig, Location, DEFAULT_IAM_TOKEN_URL};

#[cfg(test)]
mod tests;
