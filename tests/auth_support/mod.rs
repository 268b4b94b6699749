#![allow(dead_code)]

use std::sync::Arc;

use chrono::Utc;
use tokengate::auth::{
    storage_key, ExpiresIn, MemoryNavigator, MemoryStorage, SessionStorage, Token,
};
use tokengate::config::{ConfigOptions, RedirectUri};
use tokengate::location::Location;

pub const CLIENT_ID: &str = "12345";
pub const HOME: &str = "http://my.cool.site.com/stuff/#/place/1/things";

/// Options pointing the authorization endpoint at `oauth2_url`, protecting
/// `content_url`.
pub fn options(oauth2_url: &str, content_url: &str) -> ConfigOptions {
    ConfigOptions {
        client_id: Some(CLIENT_ID.to_string()),
        redirect_uri: Some(RedirectUri::Fixed("http://stuff.com".to_string())),
        oauth2_url: Some(oauth2_url.to_string()),
        content_urls: [content_url.to_string()].into_iter().collect(),
        ..ConfigOptions::default()
    }
}

pub fn manual(mut options: ConfigOptions) -> ConfigOptions {
    options.auto_auth = Some(false);
    options
}

pub fn navigator(href: &str) -> Arc<MemoryNavigator> {
    Arc::new(MemoryNavigator::new(
        Location::parse(href).expect("test location parses"),
    ))
}

pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Write a token record straight into storage, bypassing expiry stamping.
pub fn seed_token(storage: &MemoryStorage, access_token: &str, expires_at: i64) {
    let mut token = Token::new(access_token, ExpiresIn::Text("3600".to_string()));
    token.expires_at = Some(expires_at);
    storage
        .set_item(
            &storage_key(CLIENT_ID),
            &serde_json::to_string(&token).expect("token serializes"),
        )
        .expect("seed token");
}

pub fn seed_valid(storage: &MemoryStorage, access_token: &str) {
    seed_token(storage, access_token, now_millis() + 3_600_000);
}

pub fn seed_expired(storage: &MemoryStorage, access_token: &str) {
    seed_token(storage, access_token, now_millis() - 1);
}
