#![allow(dead_code)]

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use registry_service::config::RegistryConfig;
use registry_service::services::{InMemoryStore, RegistryStore};
use registry_service::startup::{build_router, AppState};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

/// Router over a fresh in-memory store. Each test gets its own instance.
pub struct TestApp {
    pub router: Router,
    pub store: Arc<dyn RegistryStore>,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: axum::http::HeaderMap,
    pub body: Value,
}

impl TestApp {
    pub fn spawn() -> Self {
        let store: Arc<dyn RegistryStore> = Arc::new(InMemoryStore::new());
        let state = AppState::new(RegistryConfig::for_memory_store(), store.clone());

        TestApp {
            router: build_router(state),
            store,
        }
    }

    pub async fn request(&self, method: Method, uri: &str, body: Option<Value>) -> TestResponse {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to execute request");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read body")
            .to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };

        TestResponse {
            status,
            headers,
            body,
        }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.request(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> TestResponse {
        self.request(Method::POST, uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> TestResponse {
        self.request(Method::DELETE, uri, None).await
    }

    /// Creates a program and returns its id.
    pub async fn create_program(&self, name: &str) -> String {
        let response = self
            .post(
                "/programs",
                json!({ "name": name, "description": format!("{} program", name) }),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED);
        response.body["id"]
            .as_str()
            .expect("Program id missing")
            .to_string()
    }

    /// Registers a client and returns its id.
    pub async fn register_client(&self, first_name: &str, email: &str) -> String {
        let response = self
            .post(
                "/clients",
                json!({ "first_name": first_name, "last_name": "Test", "email": email }),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED);
        response.body["id"]
            .as_str()
            .expect("Client id missing")
            .to_string()
    }

    /// Ids in the client's expanded profile, in response order.
    pub async fn enrolled_ids(&self, client_id: &str) -> Vec<String> {
        let response = self.get(&format!("/clients/{}", client_id)).await;
        assert_eq!(response.status, StatusCode::OK);
        response.body["enrolled_programs"]
            .as_array()
            .expect("enrolled_programs missing")
            .iter()
            .map(|p| p["id"].as_str().unwrap_or_default().to_string())
            .collect()
    }
}
