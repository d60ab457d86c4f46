//! Scripted drive service shared by the integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use bridge_traits::http::{HttpClient, HttpRequest, HttpResponse};
use bytes::Bytes;
use mockall::mock;
use provider_onedrive::Connection;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

mock! {
    pub HttpClient {}

    #[async_trait]
    impl HttpClient for HttpClient {
        async fn execute(&self, request: HttpRequest) -> bridge_traits::error::Result<HttpResponse>;
    }
}

pub const BASE: &str = "https://graph.microsoft.com/v1.0/me";

/// Answers each URL with a fixed JSON body and records every request made
pub struct ScriptedDrive {
    pub connection: Arc<Connection>,
    requests: Arc<Mutex<Vec<String>>>,
}

impl ScriptedDrive {
    pub fn new(routes: &[(&str, &str)]) -> Self {
        let routes: HashMap<String, String> = routes
            .iter()
            .map(|(url, body)| (url.to_string(), body.to_string()))
            .collect();
        let requests = Arc::new(Mutex::new(Vec::new()));
        let log = Arc::clone(&requests);

        let mut mock = MockHttpClient::new();
        mock.expect_execute().returning(move |request| {
            log.lock().unwrap().push(request.url.clone());
            let (status, body) = match routes.get(&request.url) {
                Some(body) => (200, body.clone()),
                None => {
                    let error = r#"{"error":{"code":"itemNotFound"}}"#;
                    (404, error.to_string())
                }
            };
            Ok(HttpResponse {
                status,
                headers: HashMap::new(),
                body: Bytes::from(body),
            })
        });

        Self {
            connection: Arc::new(Connection::graph("integration-token", Arc::new(mock))),
            requests,
        }
    }

    /// URLs requested so far, in order
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}
