use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use futures::future::{BoxFuture, FutureExt, Shared};
use reqwest::header::{HeaderValue, ACCEPT, AUTHORIZATION};
use tracing::{debug, info, warn};

use super::extract::RedirectFragment;
use super::navigator::Navigator;
use super::store::{MemoryStorage, SessionStorage, TokenStore};
use super::token::Token;
use crate::config::{ConfigOptions, Settings};
use crate::error::{GateError, RefreshFailure, Result};
use crate::gate::url_requires_auth;
use crate::url_builder::build_url;

/// Authentication state reported to [`AuthenticatorBuilder::on_auth_state_change`]
/// listeners.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    /// A valid token is available.
    Authenticated,
    /// A navigation to the authorization server was started.
    Redirecting,
    /// No usable token and no navigation under way.
    Unauthenticated,
}

type TokenCallback = Arc<dyn Fn(&Token) + Send + Sync>;
type StateCallback = Arc<dyn Fn(AuthState) + Send + Sync>;
type RefreshFuture = Shared<BoxFuture<'static, std::result::Result<Token, RefreshFailure>>>;

/// Builder for [`Authenticator`]; [`AuthenticatorBuilder::start`] validates
/// the settings and runs the startup sequence.
pub struct AuthenticatorBuilder {
    options: ConfigOptions,
    navigator: Arc<dyn Navigator>,
    storage: Option<Arc<dyn SessionStorage>>,
    client: Option<reqwest::Client>,
    token_callbacks: Vec<TokenCallback>,
    state_listeners: Vec<StateCallback>,
}

impl AuthenticatorBuilder {
    pub fn with_storage(mut self, storage: Arc<dyn SessionStorage>) -> Self {
        self.storage = Some(storage);
        self
    }

    /// HTTP client used for silent refresh calls.
    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.client = Some(client);
        self
    }

    /// Called with the token each time one is freshly found on a URL.
    pub fn on_token(mut self, callback: impl Fn(&Token) + Send + Sync + 'static) -> Self {
        self.token_callbacks.push(Arc::new(callback));
        self
    }

    pub fn on_auth_state_change(
        mut self,
        listener: impl Fn(AuthState) + Send + Sync + 'static,
    ) -> Self {
        self.state_listeners.push(Arc::new(listener));
        self
    }

    /// Validate the settings and run the startup sequence.
    ///
    /// Fails with [`GateError::Configuration`] when `clientId`, `redirectUri`
    /// or `oauth2Url` is missing.
    pub fn start(self) -> Result<Authenticator> {
        let settings = Settings::from_options(self.options)?;
        let authenticator = Authenticator {
            inner: Arc::new(Inner {
                settings: RwLock::new(Arc::new(settings)),
                storage: self
                    .storage
                    .unwrap_or_else(|| Arc::new(MemoryStorage::new())),
                navigator: self.navigator,
                client: self.client.unwrap_or_default(),
                redirecting: AtomicBool::new(false),
                discovered: Mutex::new(None),
                token_callbacks: Mutex::new(self.token_callbacks),
                state_listeners: Mutex::new(self.state_listeners),
                refresh: Mutex::new(None),
            }),
        };
        authenticator.startup();
        Ok(authenticator)
    }
}

/// Orchestrates the implicit-grant token lifecycle and gates outgoing
/// requests.
///
/// Cheap to clone; clones share state.
///
/// # Example
/// ```no_run
/// use std::sync::Arc;
/// use tokengate::auth::{Authenticator, MemoryNavigator};
/// use tokengate::config::ConfigOptions;
/// use tokengate::location::Location;
///
/// # async fn example() -> tokengate::error::Result<()> {
/// let options = ConfigOptions::from_json_str(r#"{
///     "clientId": "12345",
///     "redirectUri": true,
///     "oauth2Url": "https://auth.example.com/oauth2/auth",
///     "contentUrls": ["https://api.example.com"]
/// }"#)?;
/// let navigator = Arc::new(MemoryNavigator::new(Location::parse("https://app.example.com/#/home")?));
/// let auth = Authenticator::builder(options, navigator).start()?;
///
/// let client = reqwest::Client::new();
/// let request = client.get("https://api.example.com/things").build()?;
/// let response = auth.send(&client, request).await?;
/// # let _ = response;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Authenticator {
    inner: Arc<Inner>,
}

struct Inner {
    settings: RwLock<Arc<Settings>>,
    storage: Arc<dyn SessionStorage>,
    navigator: Arc<dyn Navigator>,
    client: reqwest::Client,
    redirecting: AtomicBool,
    discovered: Mutex<Option<Token>>,
    token_callbacks: Mutex<Vec<TokenCallback>>,
    state_listeners: Mutex<Vec<StateCallback>>,
    refresh: Mutex<Option<RefreshFuture>>,
}

impl std::fmt::Debug for Authenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Authenticator")
            .field("settings", &self.settings())
            .field("redirecting", &self.is_redirecting())
            .finish_non_exhaustive()
    }
}

impl Authenticator {
    pub fn builder(options: ConfigOptions, navigator: Arc<dyn Navigator>) -> AuthenticatorBuilder {
        AuthenticatorBuilder {
            options,
            navigator,
            storage: None,
            client: None,
            token_callbacks: Vec::new(),
            state_listeners: Vec::new(),
        }
    }

    /// Shorthand for a builder with the given storage and default client.
    pub fn start(
        options: ConfigOptions,
        storage: Arc<dyn SessionStorage>,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self> {
        Self::builder(options, navigator)
            .with_storage(storage)
            .start()
    }

    fn startup(&self) {
        let location = self.inner.navigator.location();
        if self.handle_redirect(location.href()).is_some() {
            return;
        }
        if self.store().valid_token().is_some() {
            debug!("already authenticated with a stored token");
            self.notify(AuthState::Authenticated);
            return;
        }
        if self.settings().auto_auth {
            self.authenticate();
        } else {
            self.notify(AuthState::Unauthenticated);
        }
    }

    /// Consume a token returned on `href`, e.g. the current page after the
    /// authorization server sent the browser back, or a popup's final URL.
    ///
    /// Saves the token, restores the host route, clears the redirecting flag
    /// and runs the token callbacks. Returns `None` when `href` carries no
    /// token.
    pub fn handle_redirect(&self, href: &str) -> Option<Token> {
        let found = RedirectFragment::parse(href)?;
        let token = match self.store().save(found.token) {
            Ok(token) => token,
            Err(err) => {
                warn!(error = %err, "could not persist token found on the URL");
                return None;
            }
        };
        info!(expires_at = ?token.expires_at, "access token received");
        self.inner.navigator.replace_route(&found.route);
        self.inner.redirecting.store(false, Ordering::SeqCst);
        *lock(&self.inner.discovered) = Some(token.clone());

        let callbacks = lock(&self.inner.token_callbacks).clone();
        for callback in callbacks {
            callback(&token);
        }
        self.notify(AuthState::Authenticated);
        Some(token)
    }

    /// Register a callback for freshly discovered tokens.
    ///
    /// When a token was already found on the URL during startup the callback
    /// runs immediately.
    pub fn register_callback(&self, callback: impl Fn(&Token) + Send + Sync + 'static) {
        let callback: TokenCallback = Arc::new(callback);
        lock(&self.inner.token_callbacks).push(callback.clone());
        let discovered = lock(&self.inner.discovered).clone();
        if let Some(token) = discovered {
            callback(&token);
        }
    }

    pub fn on_auth_state_change(&self, listener: impl Fn(AuthState) + Send + Sync + 'static) {
        lock(&self.inner.state_listeners).push(Arc::new(listener));
    }

    /// Send the host to the authorization server.
    ///
    /// Returns `false` without navigating when a redirect is already pending.
    pub fn authenticate(&self) -> bool {
        if self.inner.redirecting.swap(true, Ordering::SeqCst) {
            debug!("redirect already pending");
            return false;
        }
        let url = self.authorization_url();
        info!(url = %url, "redirecting to authorization server");
        self.notify(AuthState::Redirecting);
        if self.settings().popup {
            self.inner.navigator.open_popup(&url);
        } else {
            self.inner.navigator.redirect(&url);
        }
        true
    }

    /// The URL a redirect or refresh would use right now.
    pub fn authorization_url(&self) -> String {
        build_url(&self.settings(), &self.inner.navigator.location())
    }

    /// Silently fetch a new token from the authorization endpoint.
    ///
    /// Concurrent callers share one request. On failure a full
    /// re-authentication is started when auto-auth is enabled.
    pub async fn update_token(&self) -> std::result::Result<Token, RefreshFailure> {
        let refresh = {
            let mut slot = lock(&self.inner.refresh);
            match slot.as_ref() {
                Some(inflight) => inflight.clone(),
                None => {
                    let refresh = self.refresh_future();
                    *slot = Some(refresh.clone());
                    refresh
                }
            }
        };

        let outcome = refresh.clone().await;

        let mut slot = lock(&self.inner.refresh);
        if slot.as_ref().is_some_and(|inflight| inflight.ptr_eq(&refresh)) {
            *slot = None;
        }
        outcome
    }

    /// The refresh future lives in `inner.refresh`, so it holds only a weak
    /// handle while the request is in flight.
    fn refresh_future(&self) -> RefreshFuture {
        let url = self.authorization_url();
        let client = self.inner.client.clone();
        let inner = Arc::downgrade(&self.inner);
        async move {
            debug!(url = %url, "refreshing token");
            let fetched = fetch_token(&client, &url).await;
            let Some(inner) = inner.upgrade() else {
                return Err(RefreshFailure::Transport(
                    "authenticator dropped during refresh".to_string(),
                ));
            };
            Authenticator { inner }.finish_refresh(fetched)
        }
        .boxed()
        .shared()
    }

    fn finish_refresh(
        &self,
        fetched: std::result::Result<Token, RefreshFailure>,
    ) -> std::result::Result<Token, RefreshFailure> {
        let result = fetched.and_then(|token| {
            self.store()
                .save(token)
                .map_err(|err| RefreshFailure::Storage(err.to_string()))
        });
        match &result {
            Ok(token) => {
                info!(expires_at = ?token.expires_at, "token refreshed");
                self.notify(AuthState::Authenticated);
            }
            Err(failure) => {
                warn!(error = %failure, "token refresh failed");
                if self.settings().auto_auth {
                    self.authenticate();
                } else {
                    self.notify(AuthState::Unauthenticated);
                }
            }
        }
        result
    }

    /// Decide what an outgoing request to `url` needs.
    ///
    /// `Ok(None)` means pass through untouched; `Ok(Some(value))` is the
    /// `Authorization` header to attach. Requests are rejected with
    /// [`GateError::Redirecting`], [`GateError::AuthRequired`] or
    /// [`GateError::RefreshFailed`] when no token can be had.
    pub async fn authorization_for(&self, url: &str) -> Result<Option<HeaderValue>> {
        let settings = self.settings();
        if !url_requires_auth(url, &settings) {
            return Ok(None);
        }
        let token = match self.store().load() {
            Some(token) if token.is_valid() => token,
            Some(_) => {
                debug!(url, "stored token expired");
                self.update_token().await?
            }
            None if settings.auto_auth => {
                self.authenticate();
                return Err(GateError::Redirecting {
                    url: url.to_string(),
                });
            }
            None => {
                return Err(GateError::AuthRequired {
                    url: url.to_string(),
                })
            }
        };
        bearer_header(&token.access_token).map(Some)
    }

    /// Attach a bearer token to `request` when its URL is protected.
    pub async fn intercept(&self, mut request: reqwest::Request) -> Result<reqwest::Request> {
        let url = request.url().as_str().to_string();
        if let Some(value) = self.authorization_for(&url).await? {
            request.headers_mut().insert(AUTHORIZATION, value);
        }
        Ok(request)
    }

    /// Intercept `request` and execute it with `client`.
    pub async fn send(
        &self,
        client: &reqwest::Client,
        request: reqwest::Request,
    ) -> Result<reqwest::Response> {
        let request = self.intercept(request).await?;
        Ok(client.execute(request).await?)
    }

    /// The stored token, valid or expired.
    pub fn token(&self) -> Option<Token> {
        self.store().load()
    }

    pub fn is_authenticated(&self) -> bool {
        self.store().valid_token().is_some()
    }

    /// Whether a token was ever stored in this session, even if expired.
    pub fn was_authenticated(&self) -> bool {
        self.store().load().is_some()
    }

    pub fn is_redirecting(&self) -> bool {
        self.inner.redirecting.load(Ordering::SeqCst)
    }

    /// Snapshot of the active settings.
    pub fn config(&self) -> Settings {
        self.settings().as_ref().clone()
    }

    /// Merge options into the active settings at runtime.
    pub fn late_config(&self, options: ConfigOptions) -> Result<()> {
        let merged = self.settings().merged(options)?;
        *self
            .inner
            .settings
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Arc::new(merged);
        Ok(())
    }

    fn settings(&self) -> Arc<Settings> {
        self.inner
            .settings
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn store(&self) -> TokenStore {
        TokenStore::new(self.inner.storage.clone(), self.settings().client_id.clone())
    }

    fn notify(&self, state: AuthState) {
        let listeners = lock(&self.inner.state_listeners).clone();
        for listener in listeners {
            listener(state);
        }
    }
}

async fn fetch_token(
    client: &reqwest::Client,
    url: &str,
) -> std::result::Result<Token, RefreshFailure> {
    let resp = client
        .get(url)
        .header(ACCEPT, "application/json")
        .send()
        .await
        .map_err(|err| RefreshFailure::Transport(err.to_string()))?;
    if !resp.status().is_success() {
        return Err(RefreshFailure::Status(resp.status().as_u16()));
    }
    let body = resp
        .text()
        .await
        .map_err(|err| RefreshFailure::Transport(err.to_string()))?;
    let mut token: Token = serde_json::from_str(&body).map_err(|_| RefreshFailure::NotJson)?;
    token.expires_at = None;
    Ok(token)
}

fn bearer_header(access_token: &str) -> Result<HeaderValue> {
    let mut value = HeaderValue::from_str(&format!("Bearer {access_token}"))
        .map_err(|_| GateError::InvalidToken("access token is not a valid header value".into()))?;
    value.set_sensitive(true);
    Ok(value)
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::navigator::MemoryNavigator;
    use crate::auth::store::storage_key;
    use crate::auth::token::ExpiresIn;
    use crate::location::Location;
    use chrono::Utc;
    use std::sync::atomic::AtomicUsize;

    const HOME: &str = "http://my.cool.site.com/stuff/#/place/1/things";

    fn options() -> ConfigOptions {
        ConfigOptions::from_json_str(
            r#"{"clientId": "12345", "redirectUri": "http://stuff.com", "oauth2Url": "http://authy.com"}"#,
        )
        .unwrap()
    }

    fn navigator(href: &str) -> Arc<MemoryNavigator> {
        Arc::new(MemoryNavigator::new(Location::parse(href).unwrap()))
    }

    fn seed(storage: &MemoryStorage, expires_at: i64) {
        let mut token = Token::new("55555", ExpiresIn::Text("3600".to_string()));
        token.expires_at = Some(expires_at);
        storage
            .set_item(&storage_key("12345"), &serde_json::to_string(&token).unwrap())
            .unwrap();
    }

    #[test]
    fn redirects_automatically_without_a_token() {
        let nav = navigator(HOME);
        let auth = Authenticator::builder(options(), nav.clone()).start().unwrap();
        assert!(auth.is_redirecting());
        assert_eq!(
            nav.redirects(),
            vec!["http://authy.com?client_id=12345&response_type=token&redirect_uri=http://stuff.com"]
        );
    }

    #[test]
    fn stays_put_when_auto_auth_is_off() {
        let nav = navigator(HOME);
        let mut options = options();
        options.auto_auth = Some(false);
        let auth = Authenticator::builder(options, nav.clone()).start().unwrap();
        assert!(!auth.is_redirecting());
        assert!(nav.redirects().is_empty());
        assert_eq!(nav.location().href(), HOME);
    }

    #[test]
    fn popup_mode_opens_a_popup() {
        let nav = navigator(HOME);
        let mut options = options();
        options.popup = Some(true);
        Authenticator::builder(options, nav.clone()).start().unwrap();
        assert!(nav.redirects().is_empty());
        assert_eq!(nav.popups().len(), 1);
    }

    #[test]
    fn second_authenticate_is_ignored_while_redirecting() {
        let nav = navigator(HOME);
        let auth = Authenticator::builder(options(), nav.clone()).start().unwrap();
        assert!(!auth.authenticate());
        assert_eq!(nav.redirects().len(), 1);
    }

    #[test]
    fn missing_required_settings_fail_startup() {
        for field in ["clientId", "redirectUri", "oauth2Url"] {
            let mut value: serde_json::Value =
                serde_json::to_value(options()).unwrap();
            value.as_object_mut().unwrap().remove(field);
            let options: ConfigOptions = serde_json::from_value(value).unwrap();
            let err = Authenticator::builder(options, navigator(HOME))
                .start()
                .unwrap_err();
            assert!(matches!(err, GateError::Configuration(_)), "{field}: {err:?}");
        }
    }

    #[test]
    fn token_on_the_url_is_saved_and_the_route_restored() {
        let nav = navigator(
            "http://myurl.com/page/#access_token=55555&expires_in=3600&state=%2Fpath%2F1%2Fstuff",
        );
        let states = Arc::new(Mutex::new(Vec::new()));
        let seen = states.clone();
        let auth = Authenticator::builder(options(), nav.clone())
            .on_auth_state_change(move |state| seen.lock().unwrap().push(state))
            .start()
            .unwrap();

        let token = auth.token().unwrap();
        assert_eq!(token.access_token, "55555");
        assert_eq!(token.expires_in, Some(ExpiresIn::Text("3600".to_string())));
        assert_eq!(token.state.as_deref(), Some("/path/1/stuff"));
        assert!(auth.is_authenticated());
        assert!(!auth.is_redirecting());
        assert!(nav.redirects().is_empty());
        assert_eq!(nav.location().href(), "http://myurl.com/page/#/path/1/stuff");
        assert_eq!(*states.lock().unwrap(), vec![AuthState::Authenticated]);
    }

    #[test]
    fn late_callbacks_fire_for_a_discovered_token() {
        let nav = navigator("http://myurl.com/page#/access_token=55555&expires_in=3600&state=%F2goo");
        let auth = Authenticator::builder(options(), nav.clone()).start().unwrap();
        assert_eq!(nav.location().href(), "http://myurl.com/page");

        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        auth.register_callback(move |token| {
            assert_eq!(token.access_token, "55555");
            counter.fetch_add(1, Ordering::SeqCst);
        });
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn builder_callbacks_fire_during_startup() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        Authenticator::builder(
            options(),
            navigator("http://myurl.com/page#access_token=1&expires_in=60"),
        )
        .on_token(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        })
        .start()
        .unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn persisted_token_does_not_fire_callbacks() {
        let storage = Arc::new(MemoryStorage::new());
        seed(&storage, Utc::now().timestamp_millis() + 3_600_000);
        let nav = navigator(HOME);
        let auth = Authenticator::start(options(), storage, nav.clone()).unwrap();

        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        auth.register_callback(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert!(!auth.is_redirecting());
        assert_eq!(nav.location().href(), HOME);
    }

    #[test]
    fn expired_persisted_token_reauthenticates() {
        let storage = Arc::new(MemoryStorage::new());
        seed(&storage, Utc::now().timestamp_millis());
        let auth = Authenticator::start(options(), storage, navigator(HOME)).unwrap();
        assert!(auth.is_redirecting());
        assert!(auth.was_authenticated());
        assert!(!auth.is_authenticated());
    }

    #[test]
    fn late_config_extends_content_urls() {
        let mut options = options();
        options.auto_auth = Some(false);
        let auth = Authenticator::builder(options, navigator(HOME)).start().unwrap();
        auth.late_config(
            ConfigOptions::from_json_str(r#"{"contentUrls": ["https://api.com"]}"#).unwrap(),
        )
        .unwrap();
        let config = auth.config();
        assert_eq!(config.content_urls.len(), 1);
        assert_eq!(config.content_urls[0], "https://api.com");
        assert_eq!(config.client_id, "12345");
    }

    #[tokio::test]
    async fn unprotected_urls_pass_through() {
        let storage = Arc::new(MemoryStorage::new());
        seed(&storage, Utc::now().timestamp_millis() + 3_600_000);
        let mut options = options();
        options.content_urls.insert("http://secret.com".to_string());
        let auth = Authenticator::start(options, storage, navigator(HOME)).unwrap();

        assert!(auth
            .authorization_for("http://cool.com/api/stuff")
            .await
            .unwrap()
            .is_none());
        let header = auth
            .authorization_for("http://secret.com/api/stuff")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(header.to_str().unwrap(), "Bearer 55555");
        assert!(header.is_sensitive());
    }

    #[tokio::test]
    async fn rejects_protected_requests_without_auto_auth() {
        let mut options = options();
        options.auto_auth = Some(false);
        options.content_urls.insert("http://secret.com".to_string());
        let nav = navigator(HOME);
        let auth = Authenticator::builder(options, nav.clone()).start().unwrap();

        let err = auth
            .authorization_for("http://secret.com/api/stuff")
            .await
            .unwrap_err();
        assert!(matches!(err, GateError::AuthRequired { .. }));
        assert!(nav.redirects().is_empty());
    }

    #[tokio::test]
    async fn protected_request_without_token_redirects_once() {
        let mut options = options();
        options.content_urls.insert("http://secret.com".to_string());
        let nav = navigator(HOME);
        let auth = Authenticator::builder(options, nav.clone()).start().unwrap();

        for _ in 0..3 {
            let err = auth
                .authorization_for("http://secret.com/api/stuff")
                .await
                .unwrap_err();
            assert!(matches!(err, GateError::Redirecting { .. }));
        }
        assert_eq!(nav.redirects().len(), 1);
    }

    #[test]
    fn oversized_lifetime_on_the_url_is_accepted() {
        let nav = navigator("http://myurl.com/page/#access_token=1&expires_in=99999999999999999");
        let auth = Authenticator::builder(options(), nav).start().unwrap();
        assert_eq!(auth.token().unwrap().expires_at, Some(i64::MAX));
        assert!(auth.is_authenticated());
    }

    #[tokio::test]
    async fn abandoned_refresh_does_not_keep_the_authenticator_alive() {
        use std::time::Duration;
        use wiremock::matchers::method;
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"access_token": "late", "expires_in": 60}))
                    .set_delay(Duration::from_secs(5)),
            )
            .mount(&server)
            .await;

        let mut options = options();
        options.auto_auth = Some(false);
        options.oauth2_url = Some(format!("{}/oauth2/auth", server.uri()));
        let auth = Authenticator::builder(options, navigator(HOME)).start().unwrap();
        let weak = Arc::downgrade(&auth.inner);

        let abandoned = tokio::time::timeout(Duration::from_millis(50), auth.update_token()).await;
        assert!(abandoned.is_err());
        assert!(lock(&auth.inner.refresh).is_some());

        drop(auth);
        assert!(weak.upgrade().is_none());
    }

    #[test]
    fn invalid_tokens_are_not_turned_into_headers() {
        assert!(matches!(
            bearer_header("bad\ntoken"),
            Err(GateError::InvalidToken(_))
        ));
    }
}
