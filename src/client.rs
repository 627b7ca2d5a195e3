//! The enable/test capability surface
//!
//! One facade for whatever user-gesture-bound UI sits on top: a button
//! handler calls [`PushClient::enable`] or [`PushClient::send_test`] and
//! shows the returned summary or [`crate::EnableError::user_message`].

use std::sync::Arc;

use crate::api::{HttpPushApi, SubscriptionGateway, VapidKeySource};
use crate::config::PushConfig;
use crate::error::{ApiError, EnableError};
use crate::platform::{PermissionSource, WorkerRegistry};
use crate::subscription::{SubscriptionManager, SubscriptionSummary, normalize_identity};
use crate::worker::ActivationController;

/// Page-side push client owning the subscription manager and API handles
pub struct PushClient {
    manager: SubscriptionManager,
    gateway: Arc<dyn SubscriptionGateway>,
}

impl PushClient {
    /// Client with explicit collaborator implementations
    pub fn new(
        config: &PushConfig,
        permissions: Arc<dyn PermissionSource>,
        registry: Arc<dyn WorkerRegistry>,
        key_source: Arc<dyn VapidKeySource>,
        gateway: Arc<dyn SubscriptionGateway>,
    ) -> Self {
        let activation = ActivationController::new(registry, config);
        let manager = SubscriptionManager::new(
            permissions,
            activation,
            key_source,
            Arc::clone(&gateway),
        );
        Self { manager, gateway }
    }

    /// Client talking HTTP to the collaborator server in `config.api_base`
    pub fn over_http(
        config: &PushConfig,
        permissions: Arc<dyn PermissionSource>,
        registry: Arc<dyn WorkerRegistry>,
    ) -> Result<Self, ApiError> {
        let api = Arc::new(HttpPushApi::new(&config.api_base)?);
        Ok(Self::new(
            config,
            permissions,
            registry,
            Arc::clone(&api) as Arc<dyn VapidKeySource>,
            api as Arc<dyn SubscriptionGateway>,
        ))
    }

    /// Enable push notifications for this origin.
    ///
    /// Call from a user-gesture context; may prompt for permission once.
    pub async fn enable(&self, identity: Option<&str>) -> Result<SubscriptionSummary, EnableError> {
        self.manager.enable(identity).await
    }

    /// Ask the server to send a synthetic notification through the
    /// established subscription. Diagnostic; requires a prior `enable()`.
    pub async fn send_test(&self, identity: Option<&str>) -> Result<(), ApiError> {
        let identity = normalize_identity(identity);
        self.gateway.request_test_push(&identity).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockPushApi;
    use crate::platform::MockPlatform;

    fn client(platform: &MockPlatform, api: Arc<MockPushApi>) -> PushClient {
        PushClient::new(
            &PushConfig::default(),
            platform.permissions(),
            platform.registry(),
            Arc::clone(&api) as Arc<dyn VapidKeySource>,
            api as Arc<dyn SubscriptionGateway>,
        )
    }

    #[tokio::test]
    async fn enable_then_test_round_trip() {
        let platform = MockPlatform::new();
        let api = Arc::new(MockPushApi::new());
        let client = client(&platform, Arc::clone(&api));

        let summary = client.enable(Some("desk")).await.unwrap();
        assert_eq!(summary.identity, "desk");

        client.send_test(Some("desk")).await.unwrap();
        assert_eq!(api.test_requests(), vec!["desk".to_string()]);
    }

    #[tokio::test]
    async fn send_test_defaults_identity() {
        let platform = MockPlatform::new();
        let api = Arc::new(MockPushApi::new());
        let client = client(&platform, Arc::clone(&api));

        client.send_test(None).await.unwrap();
        assert_eq!(api.test_requests(), vec!["anonymous".to_string()]);
    }

    #[tokio::test]
    async fn send_test_surfaces_server_rejection() {
        let platform = MockPlatform::new();
        let api = Arc::new(MockPushApi::new().rejecting_test("no subscription for sender"));
        let client = client(&platform, api);

        let err = client.send_test(Some("desk")).await.unwrap_err();
        assert!(err.to_string().contains("no subscription for sender"));
    }

    #[tokio::test]
    async fn over_http_rejects_bad_base_url() {
        let platform = MockPlatform::new();
        let config = PushConfig::with_api_base("not a url");
        assert!(
            PushClient::over_http(&config, platform.permissions(), platform.registry()).is_err()
        );
    }
}
