use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, instrument, warn};

use super::envelope::{decode_list, extract_message, ListPage};
use super::query::QueryBuilder;
use super::transport::{ApiRequest, ApiResponse, Method, Transport};
use crate::error::ApiError;
use crate::session::Session;

/// Authenticated access to the admin API.
///
/// Every call checks the injected session first and fails with
/// [`ApiError::Unauthenticated`] or [`ApiError::Forbidden`] before anything
/// reaches the transport. Responses are normalised here, once: non-2xx
/// statuses and 2xx bodies with `"success": false` both become
/// [`ApiError::Server`] carrying the backend's message.
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
    session: Session,
}

impl ApiClient {
    pub fn new(transport: Arc<dyn Transport>, session: Session) -> Self {
        Self { transport, session }
    }

    fn headers(&self) -> Result<Vec<(String, String)>, ApiError> {
        let token = self.session.require_admin()?;
        Ok(vec![
            ("Authorization".to_string(), format!("Bearer {token}")),
            ("Content-Type".to_string(), "application/json".to_string()),
        ])
    }

    #[instrument(skip(self, query, body), fields(method = %method, path = %path))]
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        query: &QueryBuilder,
        body: Option<Value>,
    ) -> Result<Value, ApiError> {
        let headers = self.headers().map_err(|e| {
            warn!(error = %e, "Rejected before sending");
            e
        })?;
        let request = ApiRequest {
            method,
            path: path.to_string(),
            query: query.build(),
            headers,
            body,
        };
        debug!("Sending request");
        let response = self.transport.send(request).await?;
        interpret(response)
    }

    pub async fn get(&self, path: &str, query: &QueryBuilder) -> Result<Value, ApiError> {
        self.request(Method::Get, path, query, None).await
    }

    pub async fn post<B: Serialize>(&self, path: &str, body: &B) -> Result<Value, ApiError> {
        let body = serde_json::to_value(body)?;
        self.request(Method::Post, path, &QueryBuilder::new(), Some(body)).await
    }

    pub async fn put<B: Serialize>(&self, path: &str, body: &B) -> Result<Value, ApiError> {
        let body = serde_json::to_value(body)?;
        self.request(Method::Put, path, &QueryBuilder::new(), Some(body)).await
    }

    pub async fn patch(&self, path: &str, body: Option<Value>) -> Result<Value, ApiError> {
        self.request(Method::Patch, path, &QueryBuilder::new(), body).await
    }

    pub async fn delete(&self, path: &str) -> Result<Value, ApiError> {
        self.request(Method::Delete, path, &QueryBuilder::new(), None).await
    }

    pub async fn get_list<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &QueryBuilder,
        collection_key: &str,
    ) -> Result<ListPage<T>, ApiError> {
        let body = self.get(path, query).await?;
        decode_list(body, collection_key)
    }
}

fn interpret(response: ApiResponse) -> Result<Value, ApiError> {
    let status = response.status;
    let parsed = if response.body.trim().is_empty() {
        Ok(Value::Null)
    } else {
        serde_json::from_str::<Value>(&response.body)
    };

    if !response.is_success() {
        let message = parsed
            .ok()
            .as_ref()
            .and_then(extract_message)
            .unwrap_or_else(|| format!("Request failed with status {status}"));
        warn!(status, message = %message, "Server rejected request");
        return Err(ApiError::Server { status, message });
    }

    let body = parsed.map_err(|e| ApiError::Decode(format!("response is not JSON: {e}")))?;
    if body.get("success").and_then(Value::as_bool) == Some(false) {
        let message = extract_message(&body).unwrap_or_else(|| "Request was not successful".to_string());
        warn!(status, message = %message, "Server reported failure");
        return Err(ApiError::Server { status, message });
    }
    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Role;
    use crate::mock_framework::{create_mock_api, expect_request};
    use serde_json::json;

    #[test]
    fn non_success_status_uses_server_message() {
        let err = interpret(ApiResponse::json(404, &json!({"message": "not found"}))).unwrap_err();
        assert_eq!(err, ApiError::Server { status: 404, message: "not found".into() });
    }

    #[test]
    fn non_json_error_falls_back_to_generic_message() {
        let err = interpret(ApiResponse::new(502, "<html>Bad Gateway</html>")).unwrap_err();
        assert_eq!(err.to_string(), "Request failed with status 502");
    }

    #[test]
    fn success_false_is_an_error_even_with_200() {
        let err = interpret(ApiResponse::json(200, &json!({"success": false, "message": "Fee exists"}))).unwrap_err();
        assert_eq!(err.to_string(), "Fee exists");
    }

    #[test]
    fn empty_success_body_is_null() {
        assert_eq!(interpret(ApiResponse::new(204, "")).unwrap(), Value::Null);
        assert!(matches!(interpret(ApiResponse::new(200, "ok")), Err(ApiError::Decode(_))));
    }

    #[tokio::test]
    async fn attaches_bearer_token_and_json_content_type() {
        let (api, mut backend) = create_mock_api(Session::new("tok_1", Role::Admin), 4);
        let task = tokio::spawn(async move {
            api.get("/api/admin/fees", &QueryBuilder::new().param("page", 1)).await
        });

        let exchange = expect_request(&mut backend).await.expect("request");
        assert_eq!(exchange.request.header("Authorization"), Some("Bearer tok_1"));
        assert_eq!(exchange.request.header("Content-Type"), Some("application/json"));
        assert_eq!(exchange.request.path_and_query(), "/api/admin/fees?page=1");
        exchange.respond(200, json!({"data": []}));

        assert_eq!(task.await.unwrap().unwrap(), json!({"data": []}));
    }

    #[tokio::test]
    async fn non_admin_session_never_reaches_transport() {
        let (api, mut backend) = create_mock_api(Session::new("tok", Role::Customer), 4);
        let err = api.delete("/api/admin/fees/f1").await.unwrap_err();
        assert_eq!(err, ApiError::Forbidden("CUSTOMER".into()));

        drop(api);
        assert!(expect_request(&mut backend).await.is_none());
    }
}
