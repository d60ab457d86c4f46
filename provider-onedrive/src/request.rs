//! Single authenticated exchange with the drive API.

use bridge_traits::http::{HttpMethod, HttpRequest, HttpResponse};
use bytes::Bytes;
use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::connection::Connection;
use crate::error::{OneDriveError, Result};
use crate::metadata::JsonObject;

/// One request against a connection. Sent once, never retried.
pub(crate) struct ApiRequest<'a> {
    connection: &'a Connection,
    request: HttpRequest,
}

impl<'a> ApiRequest<'a> {
    pub(crate) fn new(
        connection: &'a Connection,
        method: HttpMethod,
        url: impl Into<String>,
    ) -> Self {
        let request = HttpRequest::new(method, url)
            .bearer_token(connection.access_token())
            .header("Accept", "application/json")
            .timeout(connection.request_timeout());

        Self {
            connection,
            request,
        }
    }

    pub(crate) fn get(connection: &'a Connection, url: impl Into<String>) -> Self {
        Self::new(connection, HttpMethod::Get, url)
    }

    pub(crate) fn json_body(mut self, body: &Value) -> Result<Self> {
        self.request = self.request.json(body)?;
        Ok(self)
    }

    pub(crate) fn octet_body(mut self, body: Bytes) -> Self {
        self.request = self
            .request
            .header("Content-Type", "application/octet-stream")
            .body(body);
        self
    }

    /// Sends the request and returns the response when its status is 2xx
    #[instrument(skip(self), fields(method = %self.request.method, url = %self.request.url))]
    pub(crate) async fn send(self) -> Result<HttpResponse> {
        let response = self.connection.http_client().execute(self.request).await?;
        check_status(response)
    }

    /// Sends the request and decodes the body as a JSON object
    pub(crate) async fn send_json(self) -> Result<JsonObject> {
        let response = self.send().await?;
        decode_object(&response.body)
    }
}

fn check_status(response: HttpResponse) -> Result<HttpResponse> {
    if response.is_success() {
        debug!(status = response.status, "API request succeeded");
        return Ok(response);
    }

    let message = String::from_utf8_lossy(&response.body).to_string();
    warn!(status = response.status, "API request failed");

    if response.status == 429 {
        let retry_after_seconds = response
            .headers
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case("retry-after"))
            .and_then(|(_, value)| value.trim().parse().ok());
        return Err(OneDriveError::Throttled {
            retry_after_seconds,
            message,
        });
    }

    Err(OneDriveError::ApiError {
        status_code: response.status,
        message,
    })
}

/// Decodes a response body that must be a single JSON object
pub(crate) fn decode_object(body: &[u8]) -> Result<JsonObject> {
    let value: Value = serde_json::from_slice(body)
        .map_err(|e| OneDriveError::parse("<body>", format!("invalid JSON: {}", e)))?;

    match value {
        Value::Object(object) => Ok(object),
        other => Err(OneDriveError::parse(
            "<body>",
            format!("expected object, found {}", crate::metadata::value::type_name(&other)),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{response, with_mock, MockHttpClient};
    use std::collections::HashMap;

    #[tokio::test]
    async fn test_request_carries_bearer_token() {
        let mut mock = MockHttpClient::new();
        mock.expect_execute()
            .withf(|req| {
                req.headers.get("Authorization") == Some(&"Bearer test-token".to_string())
                    && req.method == HttpMethod::Get
            })
            .times(1)
            .returning(|_| Ok(response(200, r#"{"id":"1"}"#)));

        let connection = with_mock(mock);
        let object = ApiRequest::get(&connection, "https://host/x")
            .send_json()
            .await
            .unwrap();

        assert_eq!(object.get("id"), Some(&Value::from("1")));
    }

    #[tokio::test]
    async fn test_non_success_is_api_error_with_body() {
        let mut mock = MockHttpClient::new();
        mock.expect_execute()
            .times(1)
            .returning(|_| Ok(response(403, r#"{"error":{"code":"accessDenied"}}"#)));

        let connection = with_mock(mock);
        let error = ApiRequest::get(&connection, "https://host/x")
            .send()
            .await
            .unwrap_err();

        match error {
            OneDriveError::ApiError {
                status_code,
                message,
            } => {
                assert_eq!(status_code, 403);
                assert!(message.contains("accessDenied"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_throttled_reads_retry_after() {
        let mut mock = MockHttpClient::new();
        mock.expect_execute().times(1).returning(|_| {
            let mut headers = HashMap::new();
            headers.insert("Retry-After".to_string(), "7".to_string());
            Ok(HttpResponse {
                status: 429,
                headers,
                body: Bytes::new(),
            })
        });

        let connection = with_mock(mock);
        let error = ApiRequest::get(&connection, "https://host/x")
            .send()
            .await
            .unwrap_err();

        assert!(matches!(
            error,
            OneDriveError::Throttled {
                retry_after_seconds: Some(7),
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_transport_failure_is_not_retried() {
        let mut mock = MockHttpClient::new();
        mock.expect_execute().times(1).returning(|_| {
            Err(bridge_traits::BridgeError::Connection("refused".to_string()))
        });

        let connection = with_mock(mock);
        let error = ApiRequest::get(&connection, "https://host/x")
            .send()
            .await
            .unwrap_err();

        assert!(matches!(error, OneDriveError::Transport(_)));
    }

    #[test]
    fn test_decode_object_rejects_arrays() {
        let error = decode_object(b"[1,2]").unwrap_err();
        assert_eq!(error.kind(), crate::error::ErrorKind::Internal);
    }
}
