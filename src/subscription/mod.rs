//! Page-side subscription lifecycle

mod manager;
mod types;

pub use manager::SubscriptionManager;
pub use types::{
    PushSubscriptionRecord, SubscriptionKeys, SubscriptionSummary, normalize_identity,
};
