//! tokengate: OAuth2 implicit-grant client for request gating.
//!
//! Builds authorization URLs, picks access tokens off the redirect fragment,
//! keeps them in session storage and attaches them as bearer headers to
//! requests bound for protected content URLs. Expired tokens are refreshed
//! once for all concurrent callers; when that fails the host is sent back to
//! the authorization server.
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use tokengate::prelude::*;
//!
//! # async fn example() -> tokengate::error::Result<()> {
//! let options = ConfigOptions::load_path("tokengate.toml")?.merge(ConfigOptions::from_env());
//! let navigator = Arc::new(MemoryNavigator::new(Location::parse("https://app.example.com/")?));
//! let auth = Authenticator::builder(options, navigator)
//!     .with_storage(Arc::new(FileStorage::new_default()))
//!     .start()?;
//!
//! let client = reqwest::Client::new();
//! let request = client.get("https://api.example.com/things").build()?;
//! let response = auth.send(&client, request).await?;
//! println!("{}", response.status());
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod config;
pub mod error;
pub mod gate;
pub mod location;
pub mod prelude;
pub mod url_builder;

#[cfg(feature = "cli")]
pub mod cli;
