//! Background worker context: lifecycle, payloads, delivery

mod agent;
mod lifecycle;
mod payload;

pub use agent::{BackgroundDeliveryAgent, ClickedNotification, WorkerEvent};
pub use lifecycle::{ActivationController, WorkerLifecycle, WorkerState};
pub use payload::NotificationPayload;
