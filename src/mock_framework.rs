//! # Mock Framework
//!
//! Utilities for testing services and controllers without a backend.
//!
//! Use [`create_mock_api`] to get an [`ApiClient`] and a receiver. Every
//! request the client sends arrives on the receiver as a [`MockExchange`];
//! the test inspects it and answers with [`MockExchange::respond`]. Tests
//! decide ordering, failures and delays deterministically, including
//! answering concurrent requests out of order.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::{mpsc, oneshot};

use crate::domain::Role;
use crate::error::ApiError;
use crate::http::{ApiClient, ApiRequest, ApiResponse, Method, Transport};
use crate::session::Session;

/// A captured request waiting for the test to answer it.
#[derive(Debug)]
pub struct MockExchange {
    pub request: ApiRequest,
    respond_to: oneshot::Sender<Result<ApiResponse, ApiError>>,
}

impl MockExchange {
    pub fn respond(self, status: u16, body: Value) {
        let _ = self.respond_to.send(Ok(ApiResponse::json(status, &body)));
    }

    pub fn fail(self, error: ApiError) {
        let _ = self.respond_to.send(Err(error));
    }

    pub fn is(&self, method: Method, path: &str) -> bool {
        self.request.method == method && self.request.path == path
    }
}

#[derive(Clone)]
pub struct MockTransport {
    sender: mpsc::Sender<MockExchange>,
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(MockExchange { request, respond_to })
            .await
            .map_err(|_| ApiError::Transport("mock backend closed".to_string()))?;
        response
            .await
            .map_err(|_| ApiError::Transport("mock backend dropped request".to_string()))?
    }
}

/// Creates a client whose requests are delivered to the returned receiver.
pub fn create_mock_api(session: Session, buffer_size: usize) -> (ApiClient, mpsc::Receiver<MockExchange>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    let api = ApiClient::new(Arc::new(MockTransport { sender }), session);
    (api, receiver)
}

pub fn admin_session() -> Session {
    Session::new("admin_token", Role::Admin)
}

/// Waits for the next request. `None` once every client is dropped.
pub async fn expect_request(receiver: &mut mpsc::Receiver<MockExchange>) -> Option<MockExchange> {
    receiver.recv().await
}

/// Waits for the next request and asserts its method and path.
pub async fn expect_call(receiver: &mut mpsc::Receiver<MockExchange>, method: Method, path: &str) -> MockExchange {
    let exchange = expect_request(receiver)
        .await
        .unwrap_or_else(|| panic!("expected {method} {path}, but no request arrived"));
    assert!(
        exchange.is(method, path),
        "expected {method} {path}, got {} {}",
        exchange.request.method,
        exchange.request.path
    );
    exchange
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::QueryBuilder;
    use serde_json::json;

    #[tokio::test]
    async fn test_mock_api() {
        let (api, mut backend) = create_mock_api(admin_session(), 10);

        let call = tokio::spawn(async move { api.get("/api/admin/tax", &QueryBuilder::new()).await });

        let exchange = expect_call(&mut backend, Method::Get, "/api/admin/tax").await;
        exchange.respond(200, json!({"taxRate": 7.5}));

        let result = call.await.unwrap();
        assert_eq!(result, Ok(json!({"taxRate": 7.5})));
    }

    #[tokio::test]
    async fn transport_failures_surface_as_errors() {
        let (api, mut backend) = create_mock_api(admin_session(), 10);
        let call = tokio::spawn(async move { api.get("/api/admin/tax", &QueryBuilder::new()).await });

        expect_request(&mut backend)
            .await
            .unwrap()
            .fail(ApiError::Transport("connection refused".into()));

        assert_eq!(call.await.unwrap(), Err(ApiError::Transport("connection refused".into())));
    }
}
