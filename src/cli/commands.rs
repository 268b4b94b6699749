//! CLI command handlers.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::debug;

use super::{CheckArgs, ConfigArgs, RefreshArgs, StripArgs, UrlArgs};
use crate::auth::{strip_token, Authenticator, FileStorage, MemoryNavigator};
use crate::config::{ConfigOptions, Settings};
use crate::error::Result;
use crate::gate::url_requires_auth;
use crate::location::Location;
use crate::url_builder::build_url;

/// Handle `tokengate url`.
pub fn handle_url(args: &UrlArgs) -> Result<()> {
    let settings = load_settings(&args.config)?;
    let location = Location::parse(&args.location)?;
    println!("{}", build_url(&settings, &location));
    Ok(())
}

/// Handle `tokengate strip`.
pub fn handle_strip(args: &StripArgs) -> Result<()> {
    let fields: BTreeMap<_, _> = strip_token(&args.url).into_iter().collect();
    println!("{}", serde_json::to_string_pretty(&fields)?);
    Ok(())
}

/// Handle `tokengate check`.
pub fn handle_check(args: &CheckArgs) -> Result<()> {
    let settings = load_settings(&args.config)?;
    if url_requires_auth(&args.url, &settings) {
        println!("protected: {}", args.url);
    } else {
        println!("public: {}", args.url);
    }
    Ok(())
}

/// Handle `tokengate refresh`.
///
/// Auto-auth is forced off: a command line cannot follow a redirect.
pub async fn handle_refresh(args: &RefreshArgs) -> Result<()> {
    let mut options = load_options(&args.config)?;
    options.auto_auth = Some(false);
    let storage = match &args.storage {
        Some(path) => FileStorage::new(path),
        None => FileStorage::new_default(),
    };
    debug!(path = %storage.path().display(), "using session file");
    let navigator = Arc::new(MemoryNavigator::new(Location::parse(&args.location)?));
    let auth = Authenticator::start(options, Arc::new(storage), navigator)?;

    let token = auth.update_token().await?;
    println!("{}", serde_json::to_string_pretty(&token)?);
    if let Some(expires) = token.expires_at_datetime() {
        eprintln!("expires at {}", expires.to_rfc3339());
    }
    Ok(())
}

/// File options first, then environment variables on top.
pub fn load_options(args: &ConfigArgs) -> Result<ConfigOptions> {
    let base = match &args.config {
        Some(path) => {
            debug!(path = %path.display(), "loading options file");
            ConfigOptions::load_path(path)?
        }
        None => ConfigOptions::new(),
    };
    Ok(base.merge(ConfigOptions::from_env()))
}

fn load_settings(args: &ConfigArgs) -> Result<Settings> {
    Settings::from_options(load_options(args)?)
}
