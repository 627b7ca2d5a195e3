//! Scriptable mock platform for tests
//!
//! One [`MockPlatform`] stands in for every browser surface the runtime
//! touches. Behavior is scripted up front (permission outcome, existing
//! subscription, open windows) and every call is recorded so tests can
//! assert on counts and arguments.

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use super::traits::{
    ClientWindows, NotificationId, NotificationOptions, PermissionSource, PermissionState,
    PushRegistration, SubscribeOptions, WindowClient, WindowId, WorkerRegistry, WorkerScope,
};
use crate::error::PlatformError;
use crate::keys;
use crate::subscription::{PushSubscriptionRecord, SubscriptionKeys};

/// A notification the mock platform has displayed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayedNotification {
    pub id: NotificationId,
    pub title: String,
    pub options: NotificationOptions,
}

/// Mock permission store
pub struct MockPermissions {
    supported: AtomicBool,
    state: Mutex<PermissionState>,
    grant_on_request: AtomicBool,
    prompts: AtomicUsize,
}

#[async_trait]
impl PermissionSource for MockPermissions {
    fn supported(&self) -> bool {
        self.supported.load(Ordering::SeqCst)
    }

    async fn current(&self) -> PermissionState {
        *self.state.lock().unwrap()
    }

    async fn request(&self) -> PermissionState {
        self.prompts.fetch_add(1, Ordering::SeqCst);
        let mut state = self.state.lock().unwrap();
        if *state == PermissionState::Default {
            *state = if self.grant_on_request.load(Ordering::SeqCst) {
                PermissionState::Granted
            } else {
                PermissionState::Denied
            };
        }
        *state
    }
}

/// Mock push registration backed by an in-memory subscription slot
#[derive(Debug)]
pub struct MockRegistration {
    subscription: Mutex<Option<PushSubscriptionRecord>>,
    subscribes: AtomicUsize,
    fail_subscribe: Mutex<Option<String>>,
    subscribe_delay: Mutex<Option<Duration>>,
}

impl MockRegistration {
    /// Number of subscribe calls the push service has seen
    pub fn subscribe_count(&self) -> usize {
        self.subscribes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PushRegistration for MockRegistration {
    async fn subscription(&self) -> Option<PushSubscriptionRecord> {
        self.subscription.lock().unwrap().clone()
    }

    async fn subscribe(
        &self,
        options: SubscribeOptions,
    ) -> Result<PushSubscriptionRecord, PlatformError> {
        let delay = *self.subscribe_delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if !options.user_visible_only {
            return Err(PlatformError::Rejected(
                "subscriptions must be user visible".to_string(),
            ));
        }
        if options.application_server_key.is_empty() {
            return Err(PlatformError::Rejected(
                "missing application server key".to_string(),
            ));
        }
        if let Some(message) = self.fail_subscribe.lock().unwrap().clone() {
            return Err(PlatformError::Rejected(message));
        }

        let n = self.subscribes.fetch_add(1, Ordering::SeqCst) + 1;
        let record = PushSubscriptionRecord {
            endpoint: format!("https://push.mock.test/reg/{n}"),
            keys: SubscriptionKeys {
                p256dh: keys::encode(&[0x04; 65]),
                auth: keys::encode(&[0x07; 16]),
            },
        };
        *self.subscription.lock().unwrap() = Some(record.clone());
        Ok(record)
    }
}

/// Mock worker registry sharing a single registration
pub struct MockRegistry {
    supported: AtomicBool,
    registers: AtomicUsize,
    registration: Arc<MockRegistration>,
}

#[async_trait]
impl WorkerRegistry for MockRegistry {
    fn supported(&self) -> bool {
        self.supported.load(Ordering::SeqCst)
    }

    async fn register(
        &self,
        _script: &str,
        _scope: &str,
    ) -> Result<Arc<dyn PushRegistration>, PlatformError> {
        if !self.supported() {
            return Err(PlatformError::Unsupported);
        }
        self.registers.fetch_add(1, Ordering::SeqCst);
        Ok(Arc::clone(&self.registration) as Arc<dyn PushRegistration>)
    }
}

/// Mock worker global scope recording lifecycle calls and notifications
pub struct MockWorkerScope {
    skip_waiting_calls: AtomicUsize,
    claim_calls: AtomicUsize,
    next_id: AtomicU64,
    fail_show: AtomicBool,
    displayed: Mutex<Vec<DisplayedNotification>>,
    closed: Mutex<Vec<NotificationId>>,
}

#[async_trait]
impl WorkerScope for MockWorkerScope {
    async fn skip_waiting(&self) {
        self.skip_waiting_calls.fetch_add(1, Ordering::SeqCst);
    }

    async fn claim_clients(&self) {
        self.claim_calls.fetch_add(1, Ordering::SeqCst);
    }

    async fn show_notification(
        &self,
        title: &str,
        options: NotificationOptions,
    ) -> Result<NotificationId, PlatformError> {
        if self.fail_show.load(Ordering::SeqCst) {
            return Err(PlatformError::Rejected("display refused".to_string()));
        }
        let id = NotificationId(self.next_id.fetch_add(1, Ordering::SeqCst));
        self.displayed.lock().unwrap().push(DisplayedNotification {
            id: id.clone(),
            title: title.to_string(),
            options,
        });
        Ok(id)
    }

    async fn close_notification(&self, id: &NotificationId) {
        self.closed.lock().unwrap().push(id.clone());
    }
}

/// Mock window set
pub struct MockWindows {
    next_id: AtomicU64,
    windows: Mutex<Vec<WindowClient>>,
    focused: Mutex<Vec<WindowId>>,
    navigations: Mutex<Vec<(WindowId, String)>>,
    opened: Mutex<Vec<String>>,
}

#[async_trait]
impl ClientWindows for MockWindows {
    async fn matching(&self, include_uncontrolled: bool) -> Vec<WindowClient> {
        self.windows
            .lock()
            .unwrap()
            .iter()
            .filter(|w| include_uncontrolled || w.controlled)
            .cloned()
            .collect()
    }

    async fn focus(&self, id: &WindowId) -> Result<(), PlatformError> {
        let windows = self.windows.lock().unwrap();
        if !windows.iter().any(|w| &w.id == id) {
            return Err(PlatformError::Rejected("no such window".to_string()));
        }
        self.focused.lock().unwrap().push(id.clone());
        Ok(())
    }

    async fn navigate(&self, id: &WindowId, url: &str) -> Result<(), PlatformError> {
        let mut windows = self.windows.lock().unwrap();
        let window = windows
            .iter_mut()
            .find(|w| &w.id == id)
            .ok_or_else(|| PlatformError::Rejected("no such window".to_string()))?;
        window.url = url.to_string();
        self.navigations
            .lock()
            .unwrap()
            .push((id.clone(), url.to_string()));
        Ok(())
    }

    async fn open_window(&self, url: &str) -> Result<(), PlatformError> {
        let id = WindowId(self.next_id.fetch_add(1, Ordering::SeqCst));
        self.windows.lock().unwrap().push(WindowClient {
            id,
            url: url.to_string(),
            controlled: false,
        });
        self.opened.lock().unwrap().push(url.to_string());
        Ok(())
    }
}

/// All browser surfaces in one scriptable bundle
pub struct MockPlatform {
    permissions: Arc<MockPermissions>,
    registry: Arc<MockRegistry>,
    scope: Arc<MockWorkerScope>,
    windows: Arc<MockWindows>,
}

impl MockPlatform {
    /// A platform where everything works: notifications supported, prompt
    /// grants, workers available, no existing subscription, no open windows.
    pub fn new() -> Self {
        Self {
            permissions: Arc::new(MockPermissions {
                supported: AtomicBool::new(true),
                state: Mutex::new(PermissionState::Default),
                grant_on_request: AtomicBool::new(true),
                prompts: AtomicUsize::new(0),
            }),
            registry: Arc::new(MockRegistry {
                supported: AtomicBool::new(true),
                registers: AtomicUsize::new(0),
                registration: Arc::new(MockRegistration {
                    subscription: Mutex::new(None),
                    subscribes: AtomicUsize::new(0),
                    fail_subscribe: Mutex::new(None),
                    subscribe_delay: Mutex::new(None),
                }),
            }),
            scope: Arc::new(MockWorkerScope {
                skip_waiting_calls: AtomicUsize::new(0),
                claim_calls: AtomicUsize::new(0),
                next_id: AtomicU64::new(1),
                fail_show: AtomicBool::new(false),
                displayed: Mutex::new(Vec::new()),
                closed: Mutex::new(Vec::new()),
            }),
            windows: Arc::new(MockWindows {
                next_id: AtomicU64::new(1000),
                windows: Mutex::new(Vec::new()),
                focused: Mutex::new(Vec::new()),
                navigations: Mutex::new(Vec::new()),
                opened: Mutex::new(Vec::new()),
            }),
        }
    }

    // ---- scripting -------------------------------------------------------

    /// Platform without notification support at all
    pub fn without_notification_support(self) -> Self {
        self.permissions.supported.store(false, Ordering::SeqCst);
        self
    }

    /// Platform without background worker support
    pub fn without_worker_support(self) -> Self {
        self.registry.supported.store(false, Ordering::SeqCst);
        self
    }

    /// Start from a specific permission state
    pub fn with_permission(self, state: PermissionState) -> Self {
        *self.permissions.state.lock().unwrap() = state;
        self
    }

    /// Make the permission prompt resolve to denied
    pub fn denying_prompt(self) -> Self {
        self.permissions
            .grant_on_request
            .store(false, Ordering::SeqCst);
        self
    }

    /// Seed an existing platform subscription
    pub fn with_existing_subscription(self, record: PushSubscriptionRecord) -> Self {
        *self.registry.registration.subscription.lock().unwrap() = Some(record);
        self
    }

    /// Make the push service reject subscribe calls
    pub fn failing_subscribe(self, message: &str) -> Self {
        *self.registry.registration.fail_subscribe.lock().unwrap() = Some(message.to_string());
        self
    }

    /// Delay subscribe calls, to widen race windows in concurrency tests
    pub fn with_subscribe_delay(self, delay: Duration) -> Self {
        *self.registry.registration.subscribe_delay.lock().unwrap() = Some(delay);
        self
    }

    /// Make notification display fail
    pub fn failing_display(self) -> Self {
        self.scope.fail_show.store(true, Ordering::SeqCst);
        self
    }

    /// Add an open window, returning its id for later assertions
    pub fn add_window(&self, url: &str, controlled: bool) -> WindowId {
        let id = WindowId(self.windows.next_id.fetch_add(1, Ordering::SeqCst));
        self.windows.windows.lock().unwrap().push(WindowClient {
            id: id.clone(),
            url: url.to_string(),
            controlled,
        });
        id
    }

    // ---- trait handles ---------------------------------------------------

    pub fn permissions(&self) -> Arc<dyn PermissionSource> {
        Arc::clone(&self.permissions) as Arc<dyn PermissionSource>
    }

    pub fn registry(&self) -> Arc<dyn WorkerRegistry> {
        Arc::clone(&self.registry) as Arc<dyn WorkerRegistry>
    }

    pub fn scope(&self) -> Arc<dyn WorkerScope> {
        Arc::clone(&self.scope) as Arc<dyn WorkerScope>
    }

    pub fn windows(&self) -> Arc<dyn ClientWindows> {
        Arc::clone(&self.windows) as Arc<dyn ClientWindows>
    }

    // ---- introspection ---------------------------------------------------

    /// Times the permission prompt was shown
    pub fn prompt_count(&self) -> usize {
        self.permissions.prompts.load(Ordering::SeqCst)
    }

    /// Times a worker registration was attempted
    pub fn register_count(&self) -> usize {
        self.registry.registers.load(Ordering::SeqCst)
    }

    /// Times the push service was asked for a new subscription
    pub fn subscribe_count(&self) -> usize {
        self.registry.registration.subscribe_count()
    }

    /// The platform's current subscription, if any
    pub fn stored_subscription(&self) -> Option<PushSubscriptionRecord> {
        self.registry.registration.subscription.lock().unwrap().clone()
    }

    pub fn skip_waiting_count(&self) -> usize {
        self.scope.skip_waiting_calls.load(Ordering::SeqCst)
    }

    pub fn claim_count(&self) -> usize {
        self.scope.claim_calls.load(Ordering::SeqCst)
    }

    /// Notifications displayed so far, in display order
    pub fn displayed(&self) -> Vec<DisplayedNotification> {
        self.scope.displayed.lock().unwrap().clone()
    }

    /// Notification ids that were closed
    pub fn closed(&self) -> Vec<NotificationId> {
        self.scope.closed.lock().unwrap().clone()
    }

    /// Window ids focused, in call order
    pub fn focused(&self) -> Vec<WindowId> {
        self.windows.focused.lock().unwrap().clone()
    }

    /// Navigations performed on existing windows
    pub fn navigations(&self) -> Vec<(WindowId, String)> {
        self.windows.navigations.lock().unwrap().clone()
    }

    /// URLs opened in fresh windows
    pub fn opened_windows(&self) -> Vec<String> {
        self.windows.opened.lock().unwrap().clone()
    }
}

impl Default for MockPlatform {
    fn default() -> Self {
        Self::new()
    }
}
