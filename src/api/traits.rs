//! The two collaborator interfaces the client consumes
//!
//! Server-side fan-out and subscription persistence live behind these; the
//! client only ever fetches the application server key, submits a
//! subscription, and (diagnostically) asks for a synthetic push.

use async_trait::async_trait;

use crate::error::ApiError;
use crate::subscription::PushSubscriptionRecord;

/// Source of the application server (VAPID) public key
#[async_trait]
pub trait VapidKeySource: Send + Sync {
    /// The server's public key as base64url, ready for [`crate::keys::decode`]
    async fn vapid_public_key(&self) -> Result<String, ApiError>;
}

/// Sink for established subscriptions, plus the diagnostic test trigger
#[async_trait]
pub trait SubscriptionGateway: Send + Sync {
    /// Hand a subscription to the server under `identity`.
    ///
    /// A structured response without a success flag is a failure.
    async fn submit(
        &self,
        identity: &str,
        subscription: &PushSubscriptionRecord,
    ) -> Result<(), ApiError>;

    /// Ask the server to push a synthetic notification through the
    /// already-established subscription. Diagnostic only.
    async fn request_test_push(&self, identity: &str) -> Result<(), ApiError>;
}
