//! Authorization redirect URL construction.

use std::borrow::Cow;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::config::{RedirectUri, Settings, StateSetting};
use crate::location::Location;

/// Characters escaped when a value is encoded as a URI component.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Characters escaped when a value is encoded as a whole URI; reserved
/// delimiters are kept.
const URI: &AsciiSet = &COMPONENT
    .remove(b';')
    .remove(b',')
    .remove(b'/')
    .remove(b'?')
    .remove(b':')
    .remove(b'@')
    .remove(b'&')
    .remove(b'=')
    .remove(b'+')
    .remove(b'$')
    .remove(b'#');

/// Build the implicit-grant authorization URL.
///
/// Parameters are emitted in a fixed order: `client_id`, `scope`, `state`,
/// `response_type=token`, `redirect_uri`, then the extra options in
/// insertion order. Empty values are left out.
///
/// # Example
/// ```
/// use tokengate::config::{ConfigOptions, RedirectUri, Settings};
/// use tokengate::location::Location;
/// use tokengate::url_builder::build_url;
///
/// let settings = Settings::from_options(ConfigOptions {
///     client_id: Some("12345".to_string()),
///     redirect_uri: Some(RedirectUri::Fixed("http://me.com".to_string())),
///     oauth2_url: Some("https://auth.co".to_string()),
///     ..ConfigOptions::default()
/// })?;
/// let location = Location::parse("http://me.com/#/home")?;
///
/// assert_eq!(
///     build_url(&settings, &location),
///     "https://auth.co?client_id=12345&response_type=token&redirect_uri=http://me.com"
/// );
/// # Ok::<(), tokengate::error::GateError>(())
/// ```
pub fn build_url(settings: &Settings, location: &Location) -> String {
    let mut params: Vec<(&str, Cow<'_, str>)> = Vec::with_capacity(5 + settings.options.len());

    params.push(("client_id", Cow::Borrowed(settings.client_id.as_str())));

    if !settings.scope.is_empty() {
        let joined = settings
            .scope
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" ");
        params.push(("scope", Cow::Owned(utf8_percent_encode(&joined, URI).to_string())));
    }

    match &settings.state {
        StateSetting::Fixed(state) => params.push(("state", Cow::Borrowed(state.as_str()))),
        StateSetting::FromLocation => params.push((
            "state",
            Cow::Owned(utf8_percent_encode(location.route(), COMPONENT).to_string()),
        )),
        StateSetting::Unset => {}
    }

    params.push(("response_type", Cow::Borrowed("token")));

    match &settings.redirect_uri {
        RedirectUri::Fixed(uri) => params.push(("redirect_uri", Cow::Borrowed(uri.as_str()))),
        RedirectUri::FromLocation => {
            params.push(("redirect_uri", Cow::Owned(location.without_fragment())))
        }
    }

    for (key, value) in &settings.options {
        params.push((key.as_str(), Cow::Borrowed(value.as_str())));
    }

    let mut url = settings.oauth2_url.clone();
    url.push('?');
    let mut first = true;
    for (key, value) in params.iter().filter(|(_, value)| !value.is_empty()) {
        if !first {
            url.push('&');
        }
        first = false;
        url.push_str(key);
        url.push('=');
        url.push_str(value);
    }
    url
}
