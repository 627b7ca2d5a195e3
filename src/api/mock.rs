//! Scriptable in-memory collaborator API for tests

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use super::traits::{SubscriptionGateway, VapidKeySource};
use crate::error::ApiError;
use crate::keys;
use crate::subscription::PushSubscriptionRecord;

/// Mock key source and subscription gateway in one
///
/// Defaults to a well-formed key and accepting endpoints; script failures
/// with the `rejecting_*`/`failing_*` constructors. Every submission and
/// test request is recorded.
pub struct MockPushApi {
    key: Mutex<Option<String>>,
    key_fetches: AtomicUsize,
    reject_submit: Mutex<Option<String>>,
    reject_test: Mutex<Option<String>>,
    submissions: Mutex<Vec<(String, PushSubscriptionRecord)>>,
    test_requests: Mutex<Vec<String>>,
}

impl MockPushApi {
    /// API serving a syntactically valid 65-byte application server key
    pub fn new() -> Self {
        Self::with_key(&keys::encode(&[0x04; 65]))
    }

    /// API serving a specific key string
    pub fn with_key(key: &str) -> Self {
        Self {
            key: Mutex::new(Some(key.to_string())),
            key_fetches: AtomicUsize::new(0),
            reject_submit: Mutex::new(None),
            reject_test: Mutex::new(None),
            submissions: Mutex::new(Vec::new()),
            test_requests: Mutex::new(Vec::new()),
        }
    }

    /// API whose key endpoint reports failure
    pub fn failing_key(self) -> Self {
        *self.key.lock().unwrap() = None;
        self
    }

    /// API rejecting submissions with `message`
    pub fn rejecting_submit(self, message: &str) -> Self {
        *self.reject_submit.lock().unwrap() = Some(message.to_string());
        self
    }

    /// API rejecting test pushes with `message`
    pub fn rejecting_test(self, message: &str) -> Self {
        *self.reject_test.lock().unwrap() = Some(message.to_string());
        self
    }

    /// Stop rejecting submissions
    pub fn accept_submissions(&self) {
        *self.reject_submit.lock().unwrap() = None;
    }

    pub fn key_fetch_count(&self) -> usize {
        self.key_fetches.load(Ordering::SeqCst)
    }

    /// Submissions received, in order
    pub fn submissions(&self) -> Vec<(String, PushSubscriptionRecord)> {
        self.submissions.lock().unwrap().clone()
    }

    /// Identities that requested a test push
    pub fn test_requests(&self) -> Vec<String> {
        self.test_requests.lock().unwrap().clone()
    }
}

impl Default for MockPushApi {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VapidKeySource for MockPushApi {
    async fn vapid_public_key(&self) -> Result<String, ApiError> {
        self.key_fetches.fetch_add(1, Ordering::SeqCst);
        self.key.lock().unwrap().clone().ok_or(ApiError::Rejected {
            message: "key source reported failure".to_string(),
        })
    }
}

#[async_trait]
impl SubscriptionGateway for MockPushApi {
    async fn submit(
        &self,
        identity: &str,
        subscription: &PushSubscriptionRecord,
    ) -> Result<(), ApiError> {
        if let Some(message) = self.reject_submit.lock().unwrap().clone() {
            return Err(ApiError::Rejected { message });
        }
        self.submissions
            .lock()
            .unwrap()
            .push((identity.to_string(), subscription.clone()));
        Ok(())
    }

    async fn request_test_push(&self, identity: &str) -> Result<(), ApiError> {
        if let Some(message) = self.reject_test.lock().unwrap().clone() {
            return Err(ApiError::Rejected { message });
        }
        self.test_requests.lock().unwrap().push(identity.to_string());
        Ok(())
    }
}
