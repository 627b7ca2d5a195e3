//! pushbell: a platform-abstracted Web Push client runtime
//!
//! Two execution contexts, no shared memory between them:
//!
//! - **Page context** — [`PushClient`] / [`SubscriptionManager`] negotiate
//!   the cryptographic subscription between browser, push service, and
//!   application server, then hand it to the server's subscribe endpoint.
//! - **Worker context** — [`BackgroundDeliveryAgent`] persists independently
//!   of any open page, turns inbound pushes into visible notifications, and
//!   routes notification clicks to an existing or new window.
//!
//! The browser surfaces (permission store, worker registry, push
//! registration, notification display, client windows) are the traits in
//! [`platform`]; [`platform::MockPlatform`] implements all of them for
//! tests. The application server is reached through the [`api`] traits,
//! implemented over HTTP by [`api::HttpPushApi`].
//!
//! # Quick start
//!
//! ```no_run
//! use std::sync::Arc;
//! use pushbell::{PushClient, PushConfig};
//! use pushbell::platform::MockPlatform;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let platform = MockPlatform::new(); // a real host wires its own surfaces
//! let config = PushConfig::with_api_base("https://notify.example.com");
//! let client = PushClient::over_http(&config, platform.permissions(), platform.registry())?;
//!
//! // from a user-gesture handler:
//! let summary = client.enable(Some("kitchen-tablet")).await?;
//! println!("subscribed at {}", summary.endpoint);
//! # Ok(())
//! # }
//! ```

pub mod api;
mod client;
mod config;
pub mod error;
pub mod keys;
pub mod platform;
pub mod subscription;
pub mod worker;

// Re-export key types for convenience
pub use api::{HttpPushApi, MockPushApi, SubscriptionGateway, VapidKeySource};
pub use client::PushClient;
pub use config::PushConfig;
pub use error::{ApiError, DecodeError, EnableError, PlatformError};
pub use platform::{MockPlatform, PermissionState};
pub use subscription::{
    PushSubscriptionRecord, SubscriptionKeys, SubscriptionManager, SubscriptionSummary,
};
pub use worker::{
    ActivationController, BackgroundDeliveryAgent, ClickedNotification, NotificationPayload,
    WorkerEvent, WorkerState,
};
