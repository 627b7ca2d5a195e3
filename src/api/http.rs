//! reqwest-backed implementation of the collaborator API

use async_trait::async_trait;
use tracing::debug;
use url::Url;

use super::traits::{SubscriptionGateway, VapidKeySource};
use super::types::{AckResponse, SubscribeRequest, TestPushRequest, VapidKeyResponse};
use crate::error::ApiError;
use crate::subscription::PushSubscriptionRecord;

/// HTTP client for the push API of one collaborator server
pub struct HttpPushApi {
    base: Url,
    client: reqwest::Client,
}

impl HttpPushApi {
    /// Client rooted at `api_base`, e.g. `https://host` for
    /// `https://host/api/push/...`.
    pub fn new(api_base: &str) -> Result<Self, ApiError> {
        let base = Url::parse(api_base)
            .map_err(|e| ApiError::MalformedResponse(format!("invalid api base: {e}")))?;
        Ok(Self {
            base,
            client: reqwest::Client::new(),
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base
            .join(path)
            .map_err(|e| ApiError::MalformedResponse(format!("invalid endpoint path: {e}")))
    }

    async fn check_ack(response: reqwest::Response) -> Result<(), ApiError> {
        let ack: AckResponse = response
            .json()
            .await
            .map_err(|e| ApiError::MalformedResponse(e.to_string()))?;
        if ack.ok {
            Ok(())
        } else {
            Err(ApiError::Rejected {
                message: ack
                    .error
                    .unwrap_or_else(|| "server reported failure".to_string()),
            })
        }
    }
}

#[async_trait]
impl VapidKeySource for HttpPushApi {
    async fn vapid_public_key(&self) -> Result<String, ApiError> {
        let url = self.endpoint("/api/push/vapidPublicKey")?;
        debug!(%url, "fetching application server key");

        let response = self.client.get(url).send().await?;
        let body: VapidKeyResponse = response
            .json()
            .await
            .map_err(|e| ApiError::MalformedResponse(e.to_string()))?;

        if !body.ok {
            return Err(ApiError::Rejected {
                message: "key source reported failure".to_string(),
            });
        }
        body.public_key
            .filter(|key| !key.is_empty())
            .ok_or_else(|| ApiError::MalformedResponse("missing publicKey".to_string()))
    }
}

#[async_trait]
impl SubscriptionGateway for HttpPushApi {
    async fn submit(
        &self,
        identity: &str,
        subscription: &PushSubscriptionRecord,
    ) -> Result<(), ApiError> {
        let url = self.endpoint("/api/push/subscribe")?;
        debug!(%url, identity, endpoint = %subscription.endpoint, "submitting subscription");

        let response = self
            .client
            .post(url)
            .json(&SubscribeRequest {
                identity: identity.to_string(),
                subscription: subscription.clone(),
            })
            .send()
            .await?;
        Self::check_ack(response).await
    }

    async fn request_test_push(&self, identity: &str) -> Result<(), ApiError> {
        let url = self.endpoint("/api/push/test")?;
        debug!(%url, identity, "requesting test push");

        let response = self
            .client
            .post(url)
            .json(&TestPushRequest {
                identity: identity.to_string(),
            })
            .send()
            .await?;
        Self::check_ack(response).await
    }
}
