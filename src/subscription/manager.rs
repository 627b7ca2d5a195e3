//! The enable() state machine

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use super::types::{SubscriptionSummary, normalize_identity};
use crate::api::{SubscriptionGateway, VapidKeySource};
use crate::error::EnableError;
use crate::keys;
use crate::platform::{PermissionSource, PermissionState, SubscribeOptions};
use crate::worker::ActivationController;

/// Owner of the subscribe-or-reuse flow for one origin
///
/// `enable()` is the only entry point and must be called from a user-gesture
/// context on strict platforms, since it may prompt for permission.
pub struct SubscriptionManager {
    permissions: Arc<dyn PermissionSource>,
    activation: ActivationController,
    key_source: Arc<dyn VapidKeySource>,
    gateway: Arc<dyn SubscriptionGateway>,
    /// Serializes the subscribe-or-reuse section so rapid repeated calls
    /// cannot race into a double platform subscription
    enable_lock: Mutex<()>,
}

impl SubscriptionManager {
    pub fn new(
        permissions: Arc<dyn PermissionSource>,
        activation: ActivationController,
        key_source: Arc<dyn VapidKeySource>,
        gateway: Arc<dyn SubscriptionGateway>,
    ) -> Self {
        Self {
            permissions,
            activation,
            key_source,
            gateway,
            enable_lock: Mutex::new(()),
        }
    }

    /// Acquire (or reuse) the origin's push subscription and submit it.
    ///
    /// Short-circuits on the first failure: permission, worker activation,
    /// key fetch, key decode, platform subscribe, server submission. Prompts
    /// the user at most once per call, and only when permission is still
    /// undecided. Idempotent across calls: an existing platform subscription
    /// is reused, never duplicated.
    pub async fn enable(&self, identity: Option<&str>) -> Result<SubscriptionSummary, EnableError> {
        if !self.permissions.supported() {
            warn!("platform has no notification support");
            return Err(EnableError::PermissionDenied);
        }

        let mut permission = self.permissions.current().await;
        if permission == PermissionState::Default {
            permission = self.permissions.request().await;
        }
        if permission != PermissionState::Granted {
            info!(?permission, "notification permission not granted");
            return Err(EnableError::PermissionDenied);
        }

        let registration = self.activation.ensure_ready().await?;

        let _serialized = self.enable_lock.lock().await;

        let (record, reused) = match registration.subscription().await {
            Some(existing) => {
                debug!(endpoint = %existing.endpoint, "reusing existing push subscription");
                (existing, true)
            }
            None => {
                let encoded_key = self
                    .key_source
                    .vapid_public_key()
                    .await
                    .map_err(EnableError::KeyFetch)?;
                let server_key = keys::decode(&encoded_key)?;
                let record = registration
                    .subscribe(SubscribeOptions::with_server_key(server_key))
                    .await?;
                info!(endpoint = %record.endpoint, "created push subscription");
                (record, false)
            }
        };

        let identity = normalize_identity(identity);
        self.gateway
            .submit(&identity, &record)
            .await
            .map_err(EnableError::Submission)?;
        info!(%identity, reused, "subscription submitted to server");

        Ok(SubscriptionSummary {
            endpoint: record.endpoint,
            identity,
            reused,
        })
    }
}
