//! Error classification and recovery hints.

/// Broad error category for routing recovery logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Authentication,
    Refresh,
    Network,
    Storage,
    Serialization,
}

/// Suggested recovery action for the caller of a rejected request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoverySuggestion {
    /// Fix the settings; the authenticator cannot start.
    CheckConfiguration,
    /// Call `authenticate()` (or enable auto-auth) and retry.
    Authenticate,
    /// A navigation to the authorization server is under way.
    AwaitRedirect,
    /// Transient failure; the request may be issued again.
    Retry,
    /// Nothing the caller can do locally.
    None,
}
