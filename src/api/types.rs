//! Wire shapes of the collaborator push API

use serde::{Deserialize, Serialize};

use crate::subscription::PushSubscriptionRecord;

/// Response of `GET /api/push/vapidPublicKey`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VapidKeyResponse {
    /// Missing flag counts as failure, never as success
    #[serde(default)]
    pub ok: bool,
    #[serde(rename = "publicKey", default, skip_serializing_if = "Option::is_none")]
    pub public_key: Option<String>,
}

/// Body of `POST /api/push/subscribe`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubscribeRequest {
    /// Opaque caller-supplied label, e.g. a device or sender name
    pub identity: String,
    /// The record exactly as the platform produced it
    pub subscription: PushSubscriptionRecord,
}

/// Body of `POST /api/push/test`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestPushRequest {
    pub identity: String,
}

/// Structured acknowledgement of the subscribe and test endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AckResponse {
    #[serde(default)]
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::subscription::SubscriptionKeys;

    #[test]
    fn vapid_response_missing_ok_is_failure() {
        let response: VapidKeyResponse =
            serde_json::from_str(r#"{"publicKey": "abc"}"#).unwrap();
        assert!(!response.ok);
    }

    #[test]
    fn vapid_response_parses_camel_case_key() {
        let response: VapidKeyResponse =
            serde_json::from_str(r#"{"ok": true, "publicKey": "BPk123"}"#).unwrap();
        assert!(response.ok);
        assert_eq!(response.public_key.as_deref(), Some("BPk123"));
    }

    #[test]
    fn subscribe_request_wire_shape() {
        let request = SubscribeRequest {
            identity: "kitchen-tablet".to_string(),
            subscription: PushSubscriptionRecord {
                endpoint: "https://push.example.com/r/1".to_string(),
                keys: SubscriptionKeys {
                    p256dh: "pk".to_string(),
                    auth: "as".to_string(),
                },
            },
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["identity"], "kitchen-tablet");
        assert_eq!(json["subscription"]["endpoint"], "https://push.example.com/r/1");
        assert_eq!(json["subscription"]["keys"]["auth"], "as");
    }

    #[test]
    fn ack_defaults_to_failure_on_empty_body() {
        let ack: AckResponse = serde_json::from_str("{}").unwrap();
        assert!(!ack.ok);
        assert!(ack.error.is_none());
    }

    #[test]
    fn ack_carries_error_text() {
        let ack: AckResponse =
            serde_json::from_str(r#"{"ok": false, "error": "quota_exceeded"}"#).unwrap();
        assert_eq!(ack.error.as_deref(), Some("quota_exceeded"));
    }
}
