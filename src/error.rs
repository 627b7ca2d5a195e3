//! Error types for pushbell

use thiserror::Error;

/// Failures surfaced by [`crate::SubscriptionManager::enable`]
///
/// Every variant is terminal for the call that produced it; there are no
/// automatic retries. `KeyFetch` and `Submission` are safe to retry on the
/// next user-triggered call, `PermissionDenied` and `WorkerUnavailable` are
/// terminal for the origin until something outside this crate changes.
#[derive(Error, Debug)]
pub enum EnableError {
    /// User declined the prompt, or the platform has no notification support
    #[error("notification permission denied")]
    PermissionDenied,

    /// The platform has no background worker support
    #[error("background workers unavailable on this platform")]
    WorkerUnavailable,

    /// The key-source endpoint was unreachable or returned a malformed body
    #[error("failed to fetch server key: {0}")]
    KeyFetch(ApiError),

    /// The server-supplied key was not valid base64url
    #[error("invalid server key: {0}")]
    Decode(#[from] DecodeError),

    /// The push service rejected the subscribe call
    #[error("push service rejected subscription: {0}")]
    Platform(#[from] PlatformError),

    /// The submission endpoint rejected the subscription
    #[error("subscription rejected by server: {0}")]
    Submission(ApiError),
}

impl EnableError {
    /// One user-facing message per failure, for surfacing at the UI boundary
    pub fn user_message(&self) -> String {
        match self {
            Self::PermissionDenied => "Notifications are blocked for this site.".to_string(),
            Self::WorkerUnavailable => {
                "This browser does not support background notifications.".to_string()
            }
            Self::KeyFetch(_) => "Could not reach the notification server. Try again.".to_string(),
            Self::Decode(_) => "The notification server is misconfigured.".to_string(),
            Self::Platform(_) => "The push service refused the subscription.".to_string(),
            Self::Submission(ApiError::Rejected { message }) => {
                format!("Subscription was not accepted: {message}")
            }
            Self::Submission(_) => "Subscription was not accepted by the server.".to_string(),
        }
    }
}

/// Malformed base64url key material
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid base64url: {0}")]
pub struct DecodeError(pub(crate) String);

/// Errors from the collaborator HTTP endpoints
#[derive(Error, Debug)]
pub enum ApiError {
    /// Could not reach the endpoint at all
    #[error("request failed: {0}")]
    Transport(String),

    /// Endpoint answered with a non-success HTTP status
    #[error("unexpected status {status}")]
    Status { status: u16 },

    /// Body did not match the expected shape
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// Endpoint answered with a structured `ok: false`
    #[error("{message}")]
    Rejected { message: String },
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => ApiError::Status {
                status: status.as_u16(),
            },
            None => ApiError::Transport(err.to_string()),
        }
    }
}

/// Errors from the platform surfaces behind the [`crate::platform`] traits
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlatformError {
    /// The surface does not exist on this platform
    #[error("not supported on this platform")]
    Unsupported,

    /// The platform refused the call
    #[error("{0}")]
    Rejected(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enable_error_permission_denied_displays_correctly() {
        let error = EnableError::PermissionDenied;
        assert!(error.to_string().contains("permission denied"));
    }

    #[test]
    fn enable_error_submission_carries_server_reason() {
        let error = EnableError::Submission(ApiError::Rejected {
            message: "quota_exceeded".to_string(),
        });
        assert!(error.to_string().contains("quota_exceeded"));
    }

    #[test]
    fn enable_error_converts_from_decode_error() {
        let decode = DecodeError("bad input".to_string());
        let error: EnableError = decode.into();
        assert!(matches!(error, EnableError::Decode(_)));
        assert!(error.to_string().contains("bad input"));
    }

    #[test]
    fn enable_error_converts_from_platform_error() {
        let error: EnableError = PlatformError::Rejected("push service said no".to_string()).into();
        assert!(matches!(error, EnableError::Platform(_)));
    }

    #[test]
    fn api_error_rejected_displays_message_verbatim() {
        let error = ApiError::Rejected {
            message: "sender required".to_string(),
        };
        assert_eq!(error.to_string(), "sender required");
    }

    #[test]
    fn api_error_status_displays_code() {
        let error = ApiError::Status { status: 503 };
        assert!(error.to_string().contains("503"));
    }

    #[test]
    fn platform_error_unsupported_displays_correctly() {
        let error = PlatformError::Unsupported;
        assert!(error.to_string().contains("not supported"));
    }

    #[test]
    fn user_message_includes_rejection_reason() {
        let error = EnableError::Submission(ApiError::Rejected {
            message: "quota_exceeded".to_string(),
        });
        assert!(error.user_message().contains("quota_exceeded"));
    }

    #[test]
    fn user_message_for_terminal_errors_is_nonempty() {
        for error in [EnableError::PermissionDenied, EnableError::WorkerUnavailable] {
            assert!(!error.user_message().is_empty());
        }
    }
}
