//! Subscription value objects

use serde::{Deserialize, Serialize};

/// A push subscription as produced by the platform's subscribe call
///
/// Immutable value object: never mutated after creation, only replaced when
/// the platform invalidates it or the user revokes permission. The field
/// names match the browser's JSON serialization exactly, since this struct
/// travels verbatim to the submission endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PushSubscriptionRecord {
    /// Push service endpoint URL for this browser instance
    pub endpoint: String,
    /// Encryption keys generated by the browser
    pub keys: SubscriptionKeys,
}

/// Encryption keys of a push subscription
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionKeys {
    /// Browser's public key (base64url-encoded P-256 point)
    pub p256dh: String,
    /// Auth secret (base64url-encoded)
    pub auth: String,
}

/// What `enable()` reports on success
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriptionSummary {
    /// Push service endpoint of the active subscription
    pub endpoint: String,
    /// Identity the subscription was submitted under
    pub identity: String,
    /// True when an existing platform subscription was reused
    pub reused: bool,
}

/// Normalize a caller-supplied identity label.
///
/// Trims whitespace; blank or absent becomes `"anonymous"`.
pub fn normalize_identity(identity: Option<&str>) -> String {
    match identity.map(str::trim) {
        Some(trimmed) if !trimmed.is_empty() => trimmed.to_string(),
        _ => "anonymous".to_string(),
    }
}
