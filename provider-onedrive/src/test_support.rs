//! Shared fixtures for unit tests.

use async_trait::async_trait;
use bridge_traits::http::{HttpClient, HttpRequest, HttpResponse};
use bytes::Bytes;
use mockall::mock;
use std::collections::HashMap;
use std::sync::Arc;

use crate::connection::Connection;

mock! {
    pub HttpClient {}

    #[async_trait]
    impl HttpClient for HttpClient {
        async fn execute(&self, request: HttpRequest) -> bridge_traits::error::Result<HttpResponse>;
    }
}

pub(crate) const BASE: &str = "https://graph.microsoft.com/v1.0/me";

pub(crate) fn response(status: u16, body: &str) -> HttpResponse {
    HttpResponse {
        status,
        headers: HashMap::new(),
        body: Bytes::from(body.to_string()),
    }
}

/// Graph connection whose transport must never be called
pub(crate) fn connection() -> Arc<Connection> {
    Arc::new(Connection::graph("test-token", Arc::new(MockHttpClient::new())))
}

/// Graph connection whose transport answers 200 with the body routed by exact URL
pub(crate) fn serving(routes: &[(&str, &str)]) -> Arc<Connection> {
    let routes: HashMap<String, String> = routes
        .iter()
        .map(|(url, body)| (url.to_string(), body.to_string()))
        .collect();

    let mut mock = MockHttpClient::new();
    mock.expect_execute().returning(move |request| {
        match routes.get(&request.url) {
            Some(body) => Ok(response(200, body)),
            None => Ok(response(404, &format!("no route for {}", request.url))),
        }
    });

    Arc::new(Connection::graph("test-token", Arc::new(mock)))
}

/// Graph connection around a pre-programmed mock
pub(crate) fn with_mock(mock: MockHttpClient) -> Arc<Connection> {
    Arc::new(Connection::graph("test-token", Arc::new(mock)))
}
