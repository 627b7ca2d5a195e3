//! Browser platform surfaces as traits, plus a scriptable mock

mod mock;
mod traits;

pub use mock::{DisplayedNotification, MockPlatform, MockRegistration};
pub use traits::{
    ClientWindows, NotificationData, NotificationId, NotificationOptions, PermissionSource, PermissionState,
    PushRegistration, SubscribeOptions, WindowClient, WindowId, WorkerRegistry, WorkerScope,
};
