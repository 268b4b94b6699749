//! Implicit-grant token lifecycle: reading tokens off redirect URLs,
//! session persistence, and the request gate.

pub mod extract;
pub mod navigator;
pub mod service;
pub mod store;
pub mod token;

pub use extract::{strip_token, RedirectFragment, RestoredRoute};
pub use navigator::{MemoryNavigator, Navigator};
pub use service::{AuthState, Authenticator, AuthenticatorBuilder};
pub use store::{
    save_token, storage_key, FileStorage, MemoryStorage, SessionStorage, TokenStore,
    AUTH_SESSION_STORAGE_KEY,
};
pub use token::{ExpiresIn, Token};
