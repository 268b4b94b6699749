//! Convenience re-exports for common use.

pub use crate::auth::{
    AuthState, Authenticator, FileStorage, MemoryNavigator, MemoryStorage, Navigator,
    SessionStorage, Token,
};
pub use crate::config::{ConfigOptions, RedirectUri, Settings, StateSetting};
pub use crate::error::{GateError, RefreshFailure, Result};
pub use crate::location::Location;
