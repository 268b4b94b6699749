use std::collections::HashMap;

use chrono::{DateTime, Utc};
use percent_encoding::percent_decode_str;
use serde::{Deserialize, Serialize};

/// Token lifetime as sent by the authorization server.
///
/// Fragments always carry text; JSON refresh bodies may carry a number,
/// integral or not.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExpiresIn {
    Seconds(u64),
    Fractional(f64),
    Text(String),
}

impl ExpiresIn {
    /// Lifetime in whole seconds, if it is a number. Fractions are truncated
    /// and negative values read as zero.
    pub fn seconds(&self) -> Option<u64> {
        match self {
            Self::Seconds(secs) => Some(*secs),
            Self::Fractional(secs) => whole_seconds(*secs),
            Self::Text(text) => {
                let text = text.trim();
                text.parse()
                    .ok()
                    .or_else(|| text.parse::<f64>().ok().and_then(whole_seconds))
            }
        }
    }
}

fn whole_seconds(secs: f64) -> Option<u64> {
    // `as` saturates at the u64 bounds.
    secs.is_finite().then(|| secs.max(0.0) as u64)
}

/// Access token record kept in session storage.
///
/// Unknown fields from the authorization response are carried in `extra`
/// and written back unchanged.
///
/// # Example
/// ```
/// use tokengate::auth::{ExpiresIn, Token};
///
/// let token = Token::new("55555", ExpiresIn::Text("3600".to_string()));
/// assert_eq!(token.expires_in.as_ref().and_then(ExpiresIn::seconds), Some(3600));
/// assert!(token.expires_at.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_in: Option<ExpiresIn>,
    /// Absolute expiry in epoch milliseconds, stamped once on first save.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Token {
    pub fn new(access_token: impl Into<String>, expires_in: ExpiresIn) -> Self {
        Self {
            access_token: access_token.into(),
            token_type: None,
            expires_in: Some(expires_in),
            expires_at: None,
            refresh_token: None,
            state: None,
            extra: serde_json::Map::new(),
        }
    }

    /// Build a token from the fields of a redirect fragment.
    ///
    /// Returns `None` when no `access_token` is present. The `state` field is
    /// percent-decoded; a value that does not decode is dropped. An
    /// `expires_at` on the URL is ignored: expiry is stamped on first save.
    pub fn from_fragment(mut fields: HashMap<String, String>) -> Option<Self> {
        let access_token = fields.remove("access_token").filter(|t| !t.is_empty())?;
        let state = fields.remove("state").and_then(|raw| decode_state(&raw));
        fields.remove("expires_at");

        let mut token = Self {
            access_token,
            token_type: fields.remove("token_type"),
            expires_in: fields.remove("expires_in").map(ExpiresIn::Text),
            expires_at: None,
            refresh_token: fields.remove("refresh_token"),
            state,
            extra: serde_json::Map::new(),
        };
        let mut rest: Vec<_> = fields.into_iter().collect();
        rest.sort();
        for (key, value) in rest {
            token.extra.insert(key, serde_json::Value::String(value));
        }
        Some(token)
    }

    /// Lifetime in milliseconds; an absent or unreadable `expires_in` is zero.
    pub fn lifetime_millis(&self) -> i64 {
        self.expires_in
            .as_ref()
            .and_then(ExpiresIn::seconds)
            .map(|secs| i64::try_from(secs.saturating_mul(1000)).unwrap_or(i64::MAX))
            .unwrap_or(0)
    }

    pub fn is_valid_at(&self, now_millis: i64) -> bool {
        self.expires_at.is_some_and(|expires_at| expires_at > now_millis)
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid_at(Utc::now().timestamp_millis())
    }

    pub fn expires_at_datetime(&self) -> Option<DateTime<Utc>> {
        self.expires_at.and_then(DateTime::<Utc>::from_timestamp_millis)
    }
}

/// Percent-decode a `state` value; unreadable input counts as absent.
pub(crate) fn decode_state(raw: &str) -> Option<String> {
    let decoded = percent_decode_str(raw).decode_utf8().ok()?;
    if decoded.is_empty() {
        None
    } else {
        Some(decoded.into_owned())
    }
}
