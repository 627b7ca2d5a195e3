//! Configuration for the push client and background worker

use serde::{Deserialize, Serialize};

/// Configuration shared by the page-side client and the worker-side agent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PushConfig {
    /// Base URL of the collaborator server hosting the push API endpoints
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Worker script path, registered at the origin root
    #[serde(default = "default_worker_script")]
    pub worker_script: String,

    /// Registration scope; root so pushes are intercepted for every page path
    #[serde(default = "default_scope")]
    pub scope: String,

    /// Title used when a push payload carries none
    #[serde(default = "default_title")]
    pub default_title: String,

    /// Icon shown when a push payload carries none
    #[serde(default = "default_fallback_asset")]
    pub fallback_icon: String,

    /// Badge shown when a push payload carries none
    #[serde(default = "default_fallback_asset")]
    pub fallback_badge: String,

    /// Navigation target when a notification carries no URL
    #[serde(default = "default_url")]
    pub default_url: String,
}

fn default_api_base() -> String {
    "http://localhost:5000".to_string()
}

fn default_worker_script() -> String {
    "/service-worker.js".to_string()
}

fn default_scope() -> String {
    "/".to_string()
}

fn default_title() -> String {
    "Notification".to_string()
}

fn default_fallback_asset() -> String {
    "/static/favicon.ico".to_string()
}

fn default_url() -> String {
    "/".to_string()
}

impl Default for PushConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            worker_script: default_worker_script(),
            scope: default_scope(),
            default_title: default_title(),
            fallback_icon: default_fallback_asset(),
            fallback_badge: default_fallback_asset(),
            default_url: default_url(),
        }
    }
}

impl PushConfig {
    /// Config pointed at a specific collaborator server
    pub fn with_api_base(api_base: impl Into<String>) -> Self {
        Self {
            api_base: api_base.into(),
            ..Self::default()
        }
    }
}
