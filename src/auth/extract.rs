//! Reading access tokens out of redirect fragments.

use std::collections::HashMap;

use super::token::{decode_state, Token};

/// Parse the `key=value` pairs of the last fragment of `url`.
///
/// A single leading `/` is ignored, so `#/access_token=…` and
/// `#access_token=…` read the same. Pieces without `=` are skipped; a URL
/// without a fragment yields an empty map.
///
/// # Example
/// ```
/// use tokengate::auth::strip_token;
///
/// let fields = strip_token("http://some.place/url#/access_token=12345&expires_in=3600");
/// assert_eq!(fields["access_token"], "12345");
/// assert_eq!(fields["expires_in"], "3600");
/// assert!(strip_token("http://some.place/url").is_empty());
/// ```
pub fn strip_token(url: &str) -> HashMap<String, String> {
    match url.rsplit_once('#') {
        Some((_, fragment)) => parse_pairs(fragment.strip_prefix('/').unwrap_or(fragment)),
        None => HashMap::new(),
    }
}

fn parse_pairs(block: &str) -> HashMap<String, String> {
    block
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .filter(|(key, _)| !key.is_empty())
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
}

/// Where the host should land once the token block is removed from its URL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RestoredRoute {
    /// The URL up to (not including) the fragment.
    pub base: String,
    /// Route taken from the decoded `state`.
    pub path: Option<String>,
    /// Query that followed the token block, without the `?`.
    pub query: Option<String>,
    /// Anchor that followed the token block, without the `#`.
    pub anchor: Option<String>,
}

impl RestoredRoute {
    /// The visible URL to show, in hash-route form.
    pub fn href(&self) -> String {
        if self.path.is_none() && self.query.is_none() && self.anchor.is_none() {
            return self.base.clone();
        }
        let mut href = format!("{}#{}", self.base, self.path.as_deref().unwrap_or("/"));
        if let Some(query) = &self.query {
            href.push('?');
            href.push_str(query);
        }
        if let Some(anchor) = &self.anchor {
            href.push('#');
            href.push_str(anchor);
        }
        href
    }
}

/// A token found on the host's URL together with the route to restore.
#[derive(Debug, Clone, PartialEq)]
pub struct RedirectFragment {
    pub token: Token,
    pub route: RestoredRoute,
}

impl RedirectFragment {
    /// Inspect an absolute URL for a token block returned by the
    /// authorization server.
    ///
    /// The block starts the first fragment and ends at the first `?` or `#`,
    /// so `#access_token=1&state=%2Fpath?query=1#anchor` keeps `query=1` and
    /// `anchor` for the host router.
    pub fn parse(href: &str) -> Option<Self> {
        let (base, fragment) = href.split_once('#')?;
        let body = fragment.strip_prefix('/').unwrap_or(fragment);
        let end = body.find(['?', '#']).unwrap_or(body.len());
        let (block, rest) = body.split_at(end);

        let fields = parse_pairs(block);
        let path = fields.get("state").and_then(|raw| decode_state(raw));
        let token = Token::from_fragment(fields)?;

        let (query, anchor) = match rest.strip_prefix('?') {
            Some(after) => match after.split_once('#') {
                Some((query, anchor)) => (Some(query), Some(anchor)),
                None => (Some(after), None),
            },
            None => (None, rest.strip_prefix('#')),
        };

        Some(Self {
            token,
            route: RestoredRoute {
                base: base.to_string(),
                path,
                query: query.filter(|q| !q.is_empty()).map(str::to_string),
                anchor: anchor.filter(|a| !a.is_empty()).map(str::to_string),
            },
        })
    }
}
