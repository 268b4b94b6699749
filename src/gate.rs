//! Which outgoing requests need a bearer token.

use crate::config::Settings;

/// True when `url` falls under a configured content prefix and is not a
/// request to the authorization endpoint itself.
///
/// Requests to the authorization server are never gated, otherwise a
/// redirect or refresh would need a token to fetch a token.
///
/// # Example
/// ```
/// use tokengate::config::{ConfigOptions, RedirectUri, Settings};
/// use tokengate::gate::url_requires_auth;
///
/// let settings = Settings::from_options(ConfigOptions {
///     client_id: Some("1".to_string()),
///     redirect_uri: Some(RedirectUri::FromLocation),
///     oauth2_url: Some("https://auth.example.com".to_string()),
///     content_urls: ["http://place.com".to_string()].into_iter().collect(),
///     ..ConfigOptions::default()
/// })?;
/// assert!(url_requires_auth("http://place.com/yohoo", &settings));
/// assert!(!url_requires_auth("http://noprobhere.com/api", &settings));
/// # Ok::<(), tokengate::error::GateError>(())
/// ```
pub fn url_requires_auth(url: &str, settings: &Settings) -> bool {
    if !settings.oauth2_url.is_empty() && url.starts_with(settings.oauth2_url.as_str()) {
        return false;
    }
    settings
        .content_urls
        .iter()
        .any(|prefix| !prefix.is_empty() && url.starts_with(prefix.as_str()))
}
