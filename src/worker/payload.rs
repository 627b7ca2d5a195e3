//! Push payload parsing and display defaults

use serde::Deserialize;
use tracing::debug;

use crate::config::PushConfig;
use crate::platform::{NotificationData, NotificationOptions};

/// Structured shape a push payload may carry; every field optional
#[derive(Debug, Clone, Default, Deserialize)]
struct RawPayload {
    title: Option<String>,
    body: Option<String>,
    icon: Option<String>,
    badge: Option<String>,
    url: Option<String>,
}

/// A fully-defaulted notification, ready for display
///
/// Transient: exists only while one push event is handled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationPayload {
    pub title: String,
    pub body: String,
    pub icon: String,
    pub badge: String,
    pub url: String,
}

impl NotificationPayload {
    /// Build a payload from a raw push body, never failing.
    ///
    /// A body that is not valid JSON is treated as plain text and wrapped
    /// under the configured default title; a missing body yields an empty
    /// one. A dropped push is a worse failure than a generic notification,
    /// so every input maps to something displayable.
    pub fn from_push(raw: Option<&[u8]>, config: &PushConfig) -> Self {
        let parsed = match raw {
            None => RawPayload::default(),
            Some(bytes) => match serde_json::from_slice::<RawPayload>(bytes) {
                Ok(payload) => payload,
                Err(err) => {
                    debug!("push payload is not structured data, using text fallback: {err}");
                    RawPayload {
                        body: Some(String::from_utf8_lossy(bytes).into_owned()),
                        ..RawPayload::default()
                    }
                }
            },
        };

        Self {
            title: parsed
                .title
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| config.default_title.clone()),
            body: parsed.body.unwrap_or_default(),
            icon: parsed.icon.unwrap_or_else(|| config.fallback_icon.clone()),
            badge: parsed.badge.unwrap_or_else(|| config.fallback_badge.clone()),
            url: parsed.url.unwrap_or_else(|| config.default_url.clone()),
        }
    }

    /// Split into the display request the platform expects
    pub fn into_display(self) -> (String, NotificationOptions) {
        (
            self.title,
            NotificationOptions {
                body: self.body,
                icon: self.icon,
                badge: self.badge,
                data: NotificationData { url: self.url },
            },
        )
    }
}
