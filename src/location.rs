//! The host's current location.

use std::fmt;
use std::str::FromStr;

use url::Url;

use crate::error::{GateError, Result};

/// Absolute URL of the page the host is currently showing.
///
/// Single-page hosts usually route inside the fragment (`#/place/1`); the
/// helpers below expose that route next to the plain URL path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    url: Url,
}

impl Location {
    pub fn parse(href: &str) -> Result<Self> {
        let url = Url::parse(href)
            .map_err(|err| GateError::Configuration(format!("invalid location {href}: {err}")))?;
        Ok(Self { url })
    }

    pub fn href(&self) -> &str {
        self.url.as_str()
    }

    /// The URL path, e.g. `/stuff/`.
    pub fn path(&self) -> &str {
        self.url.path()
    }

    pub fn fragment(&self) -> Option<&str> {
        self.url.fragment()
    }

    /// The route held in the fragment, if the fragment is a route.
    ///
    /// `#/place/1/things?tab=2` yields `/place/1/things`.
    pub fn hash_route(&self) -> Option<&str> {
        let fragment = self.fragment()?;
        if !fragment.starts_with('/') {
            return None;
        }
        let end = fragment.find(['?', '#']).unwrap_or(fragment.len());
        Some(&fragment[..end])
    }

    /// The hash route when present, else the URL path.
    pub fn route(&self) -> &str {
        self.hash_route().unwrap_or_else(|| self.path())
    }

    /// The absolute URL with any fragment removed.
    pub fn without_fragment(&self) -> String {
        let mut url = self.url.clone();
        url.set_fragment(None);
        url.into()
    }
}

impl FromStr for Location {
    type Err = GateError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.href())
    }
}
