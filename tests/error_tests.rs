//! Tests for the error system.

use tokengate::error::unified::*;
use tokengate::error::*;

#[test]
fn error_helper_mappings_are_stable_for_major_variants() {
    struct Case {
        error: GateError,
        expected_category: ErrorCategory,
        expected_recoverable: bool,
        expected_recovery: RecoverySuggestion,
    }

    let network_error = reqwest::Client::new()
        .get("http://[::1")
        .build()
        .unwrap_err();
    let io_error = std::io::Error::new(std::io::ErrorKind::Other, "disk");
    let serde_error = serde_json::from_str::<serde_json::Value>("{not-json}").unwrap_err();

    let cases = vec![
        Case {
            error: GateError::Configuration("missing clientId".to_string()),
            expected_category: ErrorCategory::Configuration,
            expected_recoverable: false,
            expected_recovery: RecoverySuggestion::CheckConfiguration,
        },
        Case {
            error: GateError::AuthRequired {
                url: "http://secret.com".to_string(),
            },
            expected_category: ErrorCategory::Authentication,
            expected_recoverable: true,
            expected_recovery: RecoverySuggestion::Authenticate,
        },
        Case {
            error: GateError::Redirecting {
                url: "http://secret.com".to_string(),
            },
            expected_category: ErrorCategory::Authentication,
            expected_recoverable: false,
            expected_recovery: RecoverySuggestion::AwaitRedirect,
        },
        Case {
            error: RefreshFailure::Status(401).into(),
            expected_category: ErrorCategory::Refresh,
            expected_recoverable: true,
            expected_recovery: RecoverySuggestion::Authenticate,
        },
        Case {
            error: RefreshFailure::Transport("connection reset".to_string()).into(),
            expected_category: ErrorCategory::Refresh,
            expected_recoverable: true,
            expected_recovery: RecoverySuggestion::Retry,
        },
        Case {
            error: GateError::Network(network_error),
            expected_category: ErrorCategory::Network,
            expected_recoverable: true,
            expected_recovery: RecoverySuggestion::Retry,
        },
        Case {
            error: GateError::Io(io_error),
            expected_category: ErrorCategory::Storage,
            expected_recoverable: true,
            expected_recovery: RecoverySuggestion::None,
        },
        Case {
            error: GateError::Serialization(serde_error),
            expected_category: ErrorCategory::Serialization,
            expected_recoverable: true,
            expected_recovery: RecoverySuggestion::None,
        },
    ];

    for case in cases {
        assert_eq!(case.error.category(), case.expected_category, "{}", case.error);
        assert_eq!(
            case.error.is_recoverable(),
            case.expected_recoverable,
            "{}",
            case.error
        );
        assert_eq!(
            case.error.recovery_suggestion(),
            case.expected_recovery,
            "{}",
            case.error
        );
    }
}

#[test]
fn refresh_failure_messages() {
    assert_eq!(
        RefreshFailure::NotJson.to_string(),
        "Token was not received as JSON"
    );
    assert_eq!(
        GateError::from(RefreshFailure::Status(400)).to_string(),
        "Token refresh failed: authorization endpoint answered with status 400"
    );
}
