//! Worker-side push delivery and notification interaction

use std::sync::Arc;

use tracing::{debug, error, warn};

use super::lifecycle::{WorkerLifecycle, WorkerState};
use super::payload::NotificationPayload;
use crate::config::PushConfig;
use crate::platform::{ClientWindows, NotificationData, NotificationId, WorkerScope};

/// A notification the user clicked, as handed over by the platform
#[derive(Debug, Clone)]
pub struct ClickedNotification {
    pub id: NotificationId,
    /// Data attached at display time; absent for notifications this worker
    /// did not create
    pub data: Option<NotificationData>,
}

/// Events the platform dispatches to the worker context
#[derive(Debug, Clone)]
pub enum WorkerEvent {
    Install,
    Activate,
    /// Inbound push with its raw body, if any
    Push(Option<Vec<u8>>),
    NotificationClick(ClickedNotification),
}

/// The background worker: installed once per origin, persists independently
/// of any open page, reacts to pushes and notification clicks.
pub struct BackgroundDeliveryAgent {
    scope: Arc<dyn WorkerScope>,
    windows: Arc<dyn ClientWindows>,
    lifecycle: WorkerLifecycle,
    config: PushConfig,
}

impl BackgroundDeliveryAgent {
    pub fn new(scope: Arc<dyn WorkerScope>, windows: Arc<dyn ClientWindows>, config: PushConfig) -> Self {
        Self {
            scope,
            windows,
            lifecycle: WorkerLifecycle::new(),
            config,
        }
    }

    /// Current lifecycle state of this worker version
    pub fn state(&self) -> WorkerState {
        self.lifecycle.state()
    }

    /// Handle one platform event to completion.
    ///
    /// The host must await the returned future before acknowledging the
    /// event to the platform; the platform may suspend the worker the moment
    /// an event counts as handled, so nothing here is fire-and-forget.
    pub async fn dispatch(&self, event: WorkerEvent) {
        match event {
            WorkerEvent::Install => self.handle_install().await,
            WorkerEvent::Activate => self.handle_activate().await,
            WorkerEvent::Push(raw) => self.handle_push(raw.as_deref()).await,
            WorkerEvent::NotificationClick(clicked) => {
                self.handle_notification_click(clicked).await;
            }
        }
    }

    /// Skip the waiting phase: delivery must become authoritative
    /// immediately, not when the old worker's pages close.
    async fn handle_install(&self) {
        self.scope.skip_waiting().await;
        self.lifecycle.advance(WorkerState::Waiting);
    }

    /// Claim every open page so the new worker governs them without a reload.
    async fn handle_activate(&self) {
        self.scope.claim_clients().await;
        self.lifecycle.advance(WorkerState::Active);
    }

    /// Display exactly one notification for an inbound push.
    ///
    /// Malformed payloads degrade to a generic notification instead of
    /// failing; a display error is logged but never propagated, since there
    /// is nobody upstream to handle it.
    pub async fn handle_push(&self, raw: Option<&[u8]>) {
        let payload = NotificationPayload::from_push(raw, &self.config);
        let (title, options) = payload.into_display();
        match self.scope.show_notification(&title, options).await {
            Ok(id) => debug!(?id, %title, "push notification displayed"),
            Err(err) => error!("failed to display push notification: {err}"),
        }
    }

    /// Close the clicked notification, then bring its target URL to the
    /// foreground: focus a matching window, else repoint an existing one,
    /// else open a new one.
    pub async fn handle_notification_click(&self, clicked: ClickedNotification) {
        self.scope.close_notification(&clicked.id).await;

        let target = clicked
            .data
            .map(|data| data.url)
            .unwrap_or_else(|| self.config.default_url.clone());

        // queried fresh on every click; the window set changes between events
        let windows = self.windows.matching(true).await;

        if let Some(window) = windows.iter().find(|w| w.url.contains(&target)) {
            debug!(window = ?window.id, %target, "focusing window already at target");
            if let Err(err) = self.windows.focus(&window.id).await {
                warn!("failed to focus window: {err}");
            }
            return;
        }

        if let Some(window) = windows.first() {
            // repoint an open window instead of opening a duplicate tab
            debug!(window = ?window.id, %target, "navigating existing window to target");
            if let Err(err) = self.windows.focus(&window.id).await {
                warn!("failed to focus window: {err}");
            }
            if let Err(err) = self.windows.navigate(&window.id, &target).await {
                warn!("failed to navigate window: {err}");
            }
            return;
        }

        debug!(%target, "no open windows, opening a new one");
        if let Err(err) = self.windows.open_window(&target).await {
            warn!("failed to open window: {err}");
        }
    }
}
