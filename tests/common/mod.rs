//! Shared utilities for integration testing.

use std::fmt;
use std::sync::{Arc, Mutex};

use axum::{
    body::{to_bytes, Body, Bytes},
    handler::Handler,
    http::{HeaderMap, Request, StatusCode},
};
use mif::Logger;

/// Logger that records every message it receives.
#[derive(Clone, Default)]
pub struct TestLogger {
    messages: Arc<Mutex<Vec<String>>>,
}

impl TestLogger {
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }

    /// The single logged message, or "" when nothing was logged.
    #[allow(dead_code)]
    pub fn msg(&self) -> String {
        let messages = self.messages();
        assert!(messages.len() <= 1, "expected at most one log call, got {:?}", messages);
        messages.into_iter().next().unwrap_or_default()
    }
}

impl Logger for TestLogger {
    fn error(&self, message: &dyn fmt::Display) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}

/// What a client would observe.
#[derive(Debug, PartialEq)]
pub struct Recorded {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

/// Run `handler` once against `GET /`.
#[allow(dead_code)]
pub async fn serve<H>(handler: H) -> Recorded
where
    H: Handler<(), ()>,
{
    let request = Request::get("/").body(Body::empty()).unwrap();
    let response = handler.call(request, ()).await;

    let status = response.status();
    let headers = response.headers().clone();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    Recorded {
        status,
        headers,
        body,
    }
}
