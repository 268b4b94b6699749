//! Configuration: layered options and the validated settings they produce.

pub mod options;

pub use options::{ConfigOptions, RedirectUri, StateSetting};

use indexmap::{IndexMap, IndexSet};
use serde::Serialize;

use crate::error::{GateError, Result};

/// Validated settings shared by the URL builder, the gate and the
/// authenticator.
///
/// Built from [`ConfigOptions`] with [`Settings::from_options`]; a missing
/// `clientId`, `redirectUri` or `oauth2Url` fails construction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Settings {
    pub client_id: String,
    pub oauth2_url: String,
    pub redirect_uri: RedirectUri,
    pub state: StateSetting,
    pub scope: IndexSet<String>,
    pub content_urls: IndexSet<String>,
    pub options: IndexMap<String, String>,
    pub auto_auth: bool,
    pub popup: bool,
}

impl Settings {
    pub fn from_options(options: ConfigOptions) -> Result<Self> {
        let client_id = options.client_id.filter(|value| !value.is_empty());
        let oauth2_url = options.oauth2_url.filter(|value| !value.is_empty());

        let mut missing = Vec::new();
        if client_id.is_none() {
            missing.push("clientId");
        }
        if options.redirect_uri.is_none() {
            missing.push("redirectUri");
        }
        if oauth2_url.is_none() {
            missing.push("oauth2Url");
        }
        let (Some(client_id), Some(redirect_uri), Some(oauth2_url)) =
            (client_id, options.redirect_uri, oauth2_url)
        else {
            return Err(GateError::Configuration(format!(
                "missing required setting(s): {}",
                missing.join(", ")
            )));
        };

        Ok(Self {
            client_id,
            oauth2_url,
            redirect_uri,
            state: options.state.unwrap_or_default(),
            scope: options.scope,
            content_urls: options.content_urls,
            options: options
                .options
                .into_iter()
                .map(|(key, value)| (key, option_value_to_string(value)))
                .collect(),
            auto_auth: options.auto_auth.unwrap_or(true),
            popup: options.popup.unwrap_or(false),
        })
    }

    /// Merge runtime options into a copy of these settings and re-validate.
    pub fn merged(&self, options: ConfigOptions) -> Result<Self> {
        Self::from_options(ConfigOptions::from(self).merge(options))
    }
}

impl From<&Settings> for ConfigOptions {
    fn from(settings: &Settings) -> Self {
        Self {
            client_id: Some(settings.client_id.clone()),
            redirect_uri: Some(settings.redirect_uri.clone()),
            oauth2_url: Some(settings.oauth2_url.clone()),
            state: Some(settings.state.clone()),
            scope: settings.scope.clone(),
            content_urls: settings.content_urls.clone(),
            options: settings
                .options
                .iter()
                .map(|(key, value)| (key.clone(), serde_json::Value::String(value.clone())))
                .collect(),
            auto_auth: Some(settings.auto_auth),
            popup: Some(settings.popup),
        }
    }
}

fn option_value_to_string(value: serde_json::Value) -> String {
    match value {
        serde_json::Value::String(text) => text,
        other => other.to_string(),
    }
}
