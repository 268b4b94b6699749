//! Error types for tokengate.

pub mod unified;

pub use unified::{ErrorCategory, RecoverySuggestion};

use thiserror::Error;

/// Why a silent refresh against the authorization endpoint failed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RefreshFailure {
    #[error("authorization endpoint answered with status {0}")]
    Status(u16),

    #[error("Token was not received as JSON")]
    NotJson,

    #[error("transport failure: {0}")]
    Transport(String),

    #[error("could not persist refreshed token: {0}")]
    Storage(String),
}

/// Primary error type for all tokengate operations.
#[derive(Error, Debug)]
pub enum GateError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Authentication required for {url}")]
    AuthRequired { url: String },

    #[error("Redirecting to the authorization server; request to {url} abandoned")]
    Redirecting { url: String },

    #[error("Token refresh failed: {0}")]
    RefreshFailed(#[from] RefreshFailure),

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<toml::de::Error> for GateError {
    fn from(error: toml::de::Error) -> Self {
        Self::Configuration(error.to_string())
    }
}

impl GateError {
    /// Classify this error into a category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Configuration(_) => ErrorCategory::Configuration,
            Self::AuthRequired { .. } | Self::Redirecting { .. } | Self::InvalidToken(_) => {
                ErrorCategory::Authentication
            }
            Self::RefreshFailed(_) => ErrorCategory::Refresh,
            Self::Network(_) => ErrorCategory::Network,
            Self::Storage(_) | Self::Io(_) => ErrorCategory::Storage,
            Self::Serialization(_) => ErrorCategory::Serialization,
        }
    }

    /// Whether the caller can recover without reloading the page context.
    ///
    /// A redirect discards the current context, and a configuration error
    /// means the authenticator never started.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::Configuration(_) | Self::Redirecting { .. })
    }

    /// Suggest a recovery action.
    pub fn recovery_suggestion(&self) -> RecoverySuggestion {
        match self {
            Self::Configuration(_) => RecoverySuggestion::CheckConfiguration,
            Self::AuthRequired { .. } | Self::InvalidToken(_) => RecoverySuggestion::Authenticate,
            Self::Redirecting { .. } => RecoverySuggestion::AwaitRedirect,
            Self::RefreshFailed(RefreshFailure::Transport(_)) | Self::Network(_) => {
                RecoverySuggestion::Retry
            }
            Self::RefreshFailed(_) => RecoverySuggestion::Authenticate,
            Self::Storage(_) | Self::Io(_) | Self::Serialization(_) => RecoverySuggestion::None,
        }
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, GateError>;
