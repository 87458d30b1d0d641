//! Test doubles for the transport, navigation and storage seams.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;

use crate::api::interceptor::Navigator;
use crate::api::{ApiError, ApiResponse, Gateway, Method, PreparedRequest, Transport};
use crate::config::ApiConfig;
use crate::routes::NamedRoute;

pub use futures::executor::block_on;

enum Reply {
    Respond(ApiResponse),
    Fail(String),
}

/// Transport answering from a table keyed by method and path (query ignored).
/// Unknown routes fail like an unreachable server.
#[derive(Default)]
pub struct MockTransport {
    replies: Mutex<HashMap<(Method, String), Reply>>,
    requests: Mutex<Vec<PreparedRequest>>,
}

impl MockTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn respond(&self, method: Method, path: &str, status: u16, body: Value) {
        self.replies.lock().insert(
            (method, path.to_string()),
            Reply::Respond(ApiResponse::new(status, body)),
        );
    }

    pub fn respond_with_header(
        &self,
        method: Method,
        path: &str,
        status: u16,
        header: &str,
        value: &str,
        body: Value,
    ) {
        self.replies.lock().insert(
            (method, path.to_string()),
            Reply::Respond(ApiResponse::new(status, body).with_header(header, value)),
        );
    }

    pub fn fail(&self, method: Method, path: &str, reason: &str) {
        self.replies
            .lock()
            .insert((method, path.to_string()), Reply::Fail(reason.to_string()));
    }

    pub fn requests(&self) -> Vec<PreparedRequest> {
        self.requests.lock().clone()
    }

    pub fn last_request(&self) -> Option<PreparedRequest> {
        self.requests.lock().last().cloned()
    }
}

#[async_trait(?Send)]
impl Transport for MockTransport {
    async fn send(&self, request: PreparedRequest) -> Result<ApiResponse, ApiError> {
        // a real fetch never completes synchronously
        YieldNow::default().await;

        let path = request
            .url
            .split('?')
            .next()
            .unwrap_or_default()
            .to_string();
        let key = (request.method, path);
        self.requests.lock().push(request);

        match self.replies.lock().get(&key) {
            Some(Reply::Respond(response)) => Ok(response.clone()),
            Some(Reply::Fail(reason)) => Err(ApiError::Network(reason.clone())),
            None => Err(ApiError::Network(format!("no reply for {} {}", key.0.as_str(), key.1))),
        }
    }

    fn name(&self) -> &str {
        "mock"
    }
}

/// Pending exactly once, so concurrent calls interleave like real requests.
#[derive(Default)]
struct YieldNow {
    yielded: bool,
}

impl Future for YieldNow {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        if self.yielded {
            Poll::Ready(())
        } else {
            self.yielded = true;
            cx.waker().wake_by_ref();
            Poll::Pending
        }
    }
}

/// Navigator remembering every redirect.
#[derive(Default)]
pub struct RecordingNavigator {
    visits: Mutex<Vec<NamedRoute>>,
}

impl RecordingNavigator {
    pub fn visits(&self) -> Vec<NamedRoute> {
        self.visits.lock().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, route: NamedRoute) {
        self.visits.lock().push(route);
    }
}

/// Gateway over the given doubles with the default relative `/api` config.
pub fn gateway(
    transport: &Arc<MockTransport>,
    navigator: &Arc<RecordingNavigator>,
) -> Arc<Gateway> {
    Arc::new(Gateway::new(
        &ApiConfig::default(),
        transport.clone(),
        navigator.clone(),
    ))
}
