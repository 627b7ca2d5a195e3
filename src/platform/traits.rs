//! Traits over the browser platform surfaces
//!
//! The page context and the worker context never call each other directly;
//! everything goes through these surfaces, which is also what makes the
//! whole state machine testable without a browser (see [`super::mock`]).

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::PlatformError;
use crate::subscription::PushSubscriptionRecord;

/// State of the origin's notification permission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionState {
    /// Not yet asked; a prompt is allowed
    Default,
    /// User granted notifications
    Granted,
    /// User declined; terminal for the origin until reset externally
    Denied,
}

/// The platform's notification permission store
#[async_trait]
pub trait PermissionSource: Send + Sync {
    /// Whether the platform has notification support at all
    fn supported(&self) -> bool;

    /// Current permission without prompting
    async fn current(&self) -> PermissionState;

    /// Prompt the user and return the resulting state.
    ///
    /// Strict platforms only show the prompt inside a user-gesture call
    /// stack; callers must invoke this from one.
    async fn request(&self) -> PermissionState;
}

/// Options for the platform subscribe call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscribeOptions {
    /// Every push must produce a visible notification (platform requirement)
    pub user_visible_only: bool,
    /// Decoded application server (VAPID) key
    pub application_server_key: Vec<u8>,
}

impl SubscribeOptions {
    /// Options with the mandatory `user_visible_only` flag set
    pub fn with_server_key(application_server_key: Vec<u8>) -> Self {
        Self {
            user_visible_only: true,
            application_server_key,
        }
    }
}

/// The push half of an active worker registration
///
/// The platform's subscription store behind this trait is the single source
/// of truth for the origin's one subscription; nothing in this crate caches
/// a record beyond a single `enable()` call.
#[async_trait]
pub trait PushRegistration: Send + Sync + std::fmt::Debug {
    /// The existing subscription for this origin, if any
    async fn subscription(&self) -> Option<PushSubscriptionRecord>;

    /// Create a new subscription on the push service
    async fn subscribe(
        &self,
        options: SubscribeOptions,
    ) -> Result<PushSubscriptionRecord, PlatformError>;
}

/// Page-side registry of background workers
#[async_trait]
pub trait WorkerRegistry: Send + Sync {
    /// Whether the platform supports background workers at all
    fn supported(&self) -> bool;

    /// Register `script` at `scope` and resolve once the registration is
    /// active (not merely installed).
    async fn register(
        &self,
        script: &str,
        scope: &str,
    ) -> Result<Arc<dyn PushRegistration>, PlatformError>;
}

/// Handle to a displayed notification
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NotificationId(pub u64);

/// Data attached to a displayed notification, read back on click
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationData {
    /// Deep link the click handler navigates to
    pub url: String,
}

/// Display request for one notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationOptions {
    pub body: String,
    pub icon: String,
    pub badge: String,
    /// Attached to the displayed notification, read back on click
    pub data: NotificationData,
}

/// The worker's global scope: lifecycle controls plus notification display
#[async_trait]
pub trait WorkerScope: Send + Sync {
    /// Skip the waiting phase so the new worker activates immediately
    async fn skip_waiting(&self);

    /// Take control of all open pages without waiting for a reload
    async fn claim_clients(&self);

    /// Display a notification; resolves once the platform confirms display
    async fn show_notification(
        &self,
        title: &str,
        options: NotificationOptions,
    ) -> Result<NotificationId, PlatformError>;

    /// Dismiss a displayed notification
    async fn close_notification(&self, id: &NotificationId);
}

/// Identifier of one open page instance
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WindowId(pub u64);

/// Snapshot of one open page instance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowClient {
    pub id: WindowId,
    /// URL the window is currently showing
    pub url: String,
    /// Whether this worker already controls the window
    pub controlled: bool,
}

/// The set of open page instances, queried fresh on every use
#[async_trait]
pub trait ClientWindows: Send + Sync {
    /// Enumerate open windows; `include_uncontrolled` also returns windows
    /// this worker does not govern yet (manually opened tabs).
    async fn matching(&self, include_uncontrolled: bool) -> Vec<WindowClient>;

    /// Bring a window to the foreground
    async fn focus(&self, id: &WindowId) -> Result<(), PlatformError>;

    /// Point an existing window at a new URL
    async fn navigate(&self, id: &WindowId, url: &str) -> Result<(), PlatformError>;

    /// Open a fresh window at `url`
    async fn open_window(&self, url: &str) -> Result<(), PlatformError>;
}
