//! Worker registration and activation handshake
//!
//! Two halves live here: [`ActivationController`], the page-side
//! register-once-and-wait-for-active handle, and [`WorkerLifecycle`], the
//! worker-side record of the `Installing → Waiting → Active` progression.

use std::sync::Arc;
use std::sync::Mutex;

use tokio::sync::OnceCell;
use tracing::{info, warn};

use crate::config::PushConfig;
use crate::error::EnableError;
use crate::platform::{PushRegistration, WorkerRegistry};

/// Lifecycle states of a background worker version
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerState {
    /// Install handler running
    Installing,
    /// Installed, waiting to take over
    Waiting,
    /// In control of the origin; terminal until superseded
    Active,
}

/// Worker-side state tracker
///
/// The platform dispatches install and activate in order; an out-of-order
/// advance is logged and refused rather than panicking the worker.
#[derive(Debug)]
pub struct WorkerLifecycle {
    state: Mutex<WorkerState>,
}

impl WorkerLifecycle {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(WorkerState::Installing),
        }
    }

    pub fn state(&self) -> WorkerState {
        *self.state.lock().expect("worker state lock poisoned")
    }

    /// Advance to `to` if that is the legal next state
    pub(crate) fn advance(&self, to: WorkerState) -> bool {
        let mut state = self.state.lock().expect("worker state lock poisoned");
        let legal = matches!(
            (*state, to),
            (WorkerState::Installing, WorkerState::Waiting)
                | (WorkerState::Waiting, WorkerState::Active)
        );
        if legal {
            info!(from = ?*state, to = ?to, "worker state advanced");
            *state = to;
        } else {
            warn!(from = ?*state, to = ?to, "refusing illegal worker state advance");
        }
        legal
    }
}

impl Default for WorkerLifecycle {
    fn default() -> Self {
        Self::new()
    }
}

/// Page-side owner of the worker registration handle
///
/// Replaces the bare mutable global of the usual page-script pattern with an
/// explicitly owned, lazily-initialized handle: the first `ensure_ready()`
/// registers, every later or concurrent call resolves to the same handle.
pub struct ActivationController {
    registry: Arc<dyn WorkerRegistry>,
    script: String,
    scope: String,
    handle: OnceCell<Arc<dyn PushRegistration>>,
}

impl ActivationController {
    pub fn new(registry: Arc<dyn WorkerRegistry>, config: &PushConfig) -> Self {
        Self {
            registry,
            script: config.worker_script.clone(),
            scope: config.scope.clone(),
            handle: OnceCell::new(),
        }
    }

    /// Register the worker if needed and wait until it is active.
    ///
    /// Idempotent and race-free: concurrent callers share one in-flight
    /// registration and all resolve to the same handle.
    pub async fn ensure_ready(&self) -> Result<Arc<dyn PushRegistration>, EnableError> {
        if !self.registry.supported() {
            return Err(EnableError::WorkerUnavailable);
        }

        let handle = self
            .handle
            .get_or_try_init(|| async {
                info!(script = %self.script, scope = %self.scope, "registering background worker");
                self.registry.register(&self.script, &self.scope).await
            })
            .await?;

        Ok(Arc::clone(handle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::MockPlatform;

    #[test]
    fn lifecycle_advances_in_order() {
        let lifecycle = WorkerLifecycle::new();
        assert_eq!(lifecycle.state(), WorkerState::Installing);
        assert!(lifecycle.advance(WorkerState::Waiting));
        assert!(lifecycle.advance(WorkerState::Active));
        assert_eq!(lifecycle.state(), WorkerState::Active);
    }

    #[test]
    fn lifecycle_refuses_skipping_waiting_phase() {
        let lifecycle = WorkerLifecycle::new();
        assert!(!lifecycle.advance(WorkerState::Active));
        assert_eq!(lifecycle.state(), WorkerState::Installing);
    }

    #[test]
    fn lifecycle_refuses_going_backwards() {
        let lifecycle = WorkerLifecycle::new();
        lifecycle.advance(WorkerState::Waiting);
        lifecycle.advance(WorkerState::Active);
        assert!(!lifecycle.advance(WorkerState::Waiting));
        assert_eq!(lifecycle.state(), WorkerState::Active);
    }

    #[tokio::test]
    async fn ensure_ready_registers_once() {
        let platform = MockPlatform::new();
        let controller = ActivationController::new(platform.registry(), &PushConfig::default());

        let first = controller.ensure_ready().await.unwrap();
        let second = controller.ensure_ready().await.unwrap();

        assert_eq!(platform.register_count(), 1);
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[tokio::test]
    async fn ensure_ready_concurrent_callers_share_one_registration() {
        let platform = MockPlatform::new();
        let controller = ActivationController::new(platform.registry(), &PushConfig::default());

        let (a, b) = tokio::join!(controller.ensure_ready(), controller.ensure_ready());
        assert!(Arc::ptr_eq(&a.unwrap(), &b.unwrap()));
        assert_eq!(platform.register_count(), 1);
    }

    #[tokio::test]
    async fn ensure_ready_fails_without_worker_support() {
        let platform = MockPlatform::new().without_worker_support();
        let controller = ActivationController::new(platform.registry(), &PushConfig::default());

        let err = controller.ensure_ready().await.unwrap_err();
        assert!(matches!(err, EnableError::WorkerUnavailable));
        assert_eq!(platform.register_count(), 0);
    }
}
