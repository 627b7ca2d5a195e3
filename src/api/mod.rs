//! Collaborator push API: wire shapes, interfaces, HTTP and mock impls

mod http;
mod mock;
mod traits;
mod types;

pub use http::HttpPushApi;
pub use mock::MockPushApi;
pub use traits::{SubscriptionGateway, VapidKeySource};
pub use types::{AckResponse, SubscribeRequest, TestPushRequest, VapidKeyResponse};
