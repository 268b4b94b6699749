//! The configuration surface: partial, mergeable options.

use std::fs;
use std::path::Path;

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

use crate::error::{GateError, Result};

const ENV_PREFIX: &str = "TOKENGATE_";

/// A value that may be given either as a boolean flag or as a string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
enum FlagOrText {
    Flag(bool),
    Text(String),
}

/// How the `state` query parameter is produced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "FlagOrText", into = "FlagOrText")]
pub enum StateSetting {
    /// Omit the parameter.
    #[default]
    Unset,
    /// Use the current route of the host location.
    FromLocation,
    /// Use this value verbatim.
    Fixed(String),
}

impl From<FlagOrText> for StateSetting {
    fn from(raw: FlagOrText) -> Self {
        match raw {
            FlagOrText::Flag(true) => Self::FromLocation,
            FlagOrText::Flag(false) => Self::Unset,
            FlagOrText::Text(text) if text.is_empty() => Self::Unset,
            FlagOrText::Text(text) => Self::Fixed(text),
        }
    }
}

impl From<StateSetting> for FlagOrText {
    fn from(setting: StateSetting) -> Self {
        match setting {
            StateSetting::Unset => Self::Flag(false),
            StateSetting::FromLocation => Self::Flag(true),
            StateSetting::Fixed(text) => Self::Text(text),
        }
    }
}

/// Where the authorization server should send the browser back to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "FlagOrText", into = "FlagOrText")]
pub enum RedirectUri {
    /// The host's current absolute URL without its fragment.
    FromLocation,
    /// This URL verbatim.
    Fixed(String),
}

impl TryFrom<FlagOrText> for RedirectUri {
    type Error = String;

    fn try_from(raw: FlagOrText) -> std::result::Result<Self, Self::Error> {
        match raw {
            FlagOrText::Flag(true) => Ok(Self::FromLocation),
            FlagOrText::Text(text) if !text.is_empty() => Ok(Self::Fixed(text)),
            _ => Err("redirectUri must be a non-empty URL or `true`".to_string()),
        }
    }
}

impl From<RedirectUri> for FlagOrText {
    fn from(uri: RedirectUri) -> Self {
        match uri {
            RedirectUri::FromLocation => Self::Flag(true),
            RedirectUri::Fixed(text) => Self::Text(text),
        }
    }
}

/// Partial configuration as supplied by the host application.
///
/// Every field is optional so several sources can be layered with
/// [`ConfigOptions::merge`] before validation.
///
/// # Example
/// ```
/// use tokengate::config::ConfigOptions;
///
/// let options: ConfigOptions = serde_json::from_str(r#"{
///     "clientId": "12345",
///     "redirectUri": true,
///     "oauth2Url": "https://auth.example.com/oauth2/auth",
///     "scope": ["https://api.example.com/read"],
///     "contentUrls": ["https://api.example.com"]
/// }"#)?;
/// assert_eq!(options.client_id.as_deref(), Some("12345"));
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConfigOptions {
    pub client_id: Option<String>,
    pub redirect_uri: Option<RedirectUri>,
    pub oauth2_url: Option<String>,
    pub state: Option<StateSetting>,
    pub scope: IndexSet<String>,
    pub content_urls: IndexSet<String>,
    pub options: IndexMap<String, serde_json::Value>,
    pub auto_auth: Option<bool>,
    pub popup: Option<bool>,
}

impl ConfigOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Layer `other` on top of `self`.
    ///
    /// Scalars present in `other` win. Scopes and content URLs are appended
    /// without duplicates, extra query options are merged key by key.
    pub fn merge(mut self, other: ConfigOptions) -> Self {
        if other.client_id.is_some() {
            self.client_id = other.client_id;
        }
        if other.redirect_uri.is_some() {
            self.redirect_uri = other.redirect_uri;
        }
        if other.oauth2_url.is_some() {
            self.oauth2_url = other.oauth2_url;
        }
        if other.state.is_some() {
            self.state = other.state;
        }
        if other.auto_auth.is_some() {
            self.auto_auth = other.auto_auth;
        }
        if other.popup.is_some() {
            self.popup = other.popup;
        }
        self.scope.extend(other.scope);
        self.content_urls.extend(other.content_urls);
        self.options.extend(other.options);
        self
    }

    pub fn from_json_str(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn from_toml_str(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }

    /// Load options from a `.json` or `.toml` file.
    pub fn load_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json_str(&raw),
            Some("toml") => Self::from_toml_str(&raw),
            other => Err(GateError::Configuration(format!(
                "Unsupported configuration file type {other:?} at {}",
                path.display()
            ))),
        }
    }

    /// Load from `TOKENGATE_*` environment variables (after reading `.env`).
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv(); // load .env if present, ignore error
        Self::from_env_with(|name| std::env::var(name).ok())
    }

    /// Build options from an arbitrary variable lookup.
    ///
    /// Recognized names (with the `TOKENGATE_` prefix): `CLIENT_ID`,
    /// `REDIRECT_URI`, `OAUTH2_URL`, `STATE`, `SCOPE` (whitespace separated),
    /// `CONTENT_URLS` (comma separated), `AUTO_AUTH`, `POPUP`.
    pub fn from_env_with(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |name: &str| {
            lookup(&format!("{ENV_PREFIX}{name}"))
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let mut options = Self::new();
        options.client_id = var("CLIENT_ID");
        options.oauth2_url = var("OAUTH2_URL");
        options.redirect_uri = var("REDIRECT_URI").map(|value| match parse_flag(&value) {
            Some(true) => RedirectUri::FromLocation,
            _ => RedirectUri::Fixed(value),
        });
        options.state = var("STATE").map(|value| match parse_flag(&value) {
            Some(true) => StateSetting::FromLocation,
            Some(false) => StateSetting::Unset,
            None => StateSetting::Fixed(value),
        });
        if let Some(scope) = var("SCOPE") {
            options.scope = scope.split_whitespace().map(str::to_string).collect();
        }
        if let Some(urls) = var("CONTENT_URLS") {
            options.content_urls = urls
                .split(',')
                .map(str::trim)
                .filter(|url| !url.is_empty())
                .map(str::to_string)
                .collect();
        }
        options.auto_auth = var("AUTO_AUTH").and_then(|value| parse_flag(&value));
        options.popup = var("POPUP").and_then(|value| parse_flag(&value));
        options
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
