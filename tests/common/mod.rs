//! Shared test fixture: an in-process collaborator push server
//!
//! Serves the three endpoints of the push API with scriptable behavior and
//! records everything it receives, so integration tests can run the real
//! HTTP client against real wire traffic.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::extract::{Json, State};
use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;

use pushbell::api::{AckResponse, SubscribeRequest, TestPushRequest, VapidKeyResponse};
use pushbell::keys;

/// Scriptable state behind the collaborator endpoints
pub struct Collaborator {
    vapid_key: Mutex<Option<String>>,
    reject_subscribe: Mutex<Option<String>>,
    reject_test: Mutex<Option<String>>,
    received: Mutex<Vec<SubscribeRequest>>,
    test_requests: Mutex<Vec<TestPushRequest>>,
}

impl Collaborator {
    /// Collaborator serving a well-formed 65-byte application server key
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            vapid_key: Mutex::new(Some(keys::encode(&[0x04; 65]))),
            reject_subscribe: Mutex::new(None),
            reject_test: Mutex::new(None),
            received: Mutex::new(Vec::new()),
            test_requests: Mutex::new(Vec::new()),
        })
    }

    /// Make the key endpoint answer `ok: false`
    pub fn fail_vapid_key(&self) {
        *self.vapid_key.lock().unwrap() = None;
    }

    /// Make the subscribe endpoint reject with `message`
    pub fn reject_subscribe(&self, message: &str) {
        *self.reject_subscribe.lock().unwrap() = Some(message.to_string());
    }

    /// Make the test endpoint reject with `message`
    pub fn reject_test(&self, message: &str) {
        *self.reject_test.lock().unwrap() = Some(message.to_string());
    }

    /// Subscriptions received so far
    pub fn received(&self) -> Vec<SubscribeRequest> {
        self.received.lock().unwrap().clone()
    }

    /// Test push requests received so far
    pub fn test_requests(&self) -> Vec<TestPushRequest> {
        self.test_requests.lock().unwrap().clone()
    }
}

async fn vapid_key(State(state): State<Arc<Collaborator>>) -> Json<VapidKeyResponse> {
    let key = state.vapid_key.lock().unwrap().clone();
    Json(VapidKeyResponse {
        ok: key.is_some(),
        public_key: key,
    })
}

async fn subscribe(
    State(state): State<Arc<Collaborator>>,
    Json(request): Json<SubscribeRequest>,
) -> Json<AckResponse> {
    if let Some(message) = state.reject_subscribe.lock().unwrap().clone() {
        return Json(AckResponse {
            ok: false,
            error: Some(message),
        });
    }
    state.received.lock().unwrap().push(request);
    Json(AckResponse {
        ok: true,
        error: None,
    })
}

async fn test_push(
    State(state): State<Arc<Collaborator>>,
    Json(request): Json<TestPushRequest>,
) -> Json<AckResponse> {
    if let Some(message) = state.reject_test.lock().unwrap().clone() {
        return Json(AckResponse {
            ok: false,
            error: Some(message),
        });
    }
    state.test_requests.lock().unwrap().push(request);
    Json(AckResponse {
        ok: true,
        error: None,
    })
}

/// Spawns the collaborator in a background task, returns its bound address
pub async fn spawn_collaborator(state: Arc<Collaborator>) -> SocketAddr {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();

    let app = Router::new()
        .route("/api/push/vapidPublicKey", get(vapid_key))
        .route("/api/push/subscribe", post(subscribe))
        .route("/api/push/test", post(test_push))
        .with_state(state);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    // Brief delay to ensure the server is accepting connections
    tokio::time::sleep(std::time::Duration::from_millis(10)).await;

    addr
}
