//! In-process HTTP client for integration testing.
//!
//! Drives the real router with `tower::ServiceExt::oneshot`; no socket.

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use sentiment_core::kernel::ServerDeps;
use sentiment_core::server::{build_app, HttpOptions};
use serde_json::Value;
use tower::ServiceExt;

pub struct ApiClient {
    router: Router,
}

/// Status plus parsed JSON body (Null when the body is empty)
#[derive(Debug)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl ApiResponse {
    /// The `error` message of an error envelope
    pub fn error(&self) -> &str {
        self.body["error"].as_str().unwrap_or_default()
    }
}

impl ApiClient {
    pub fn new(deps: ServerDeps) -> Self {
        Self::with_options(deps, &HttpOptions::default())
    }

    pub fn with_options(deps: ServerDeps, options: &HttpOptions) -> Self {
        Self {
            router: build_app(deps, options),
        }
    }

    pub async fn get(&self, uri: &str) -> ApiResponse {
        self.send(Method::GET, uri, &[], None).await
    }

    /// GET as a client behind a proxy that reports `ip`
    pub async fn get_from(&self, uri: &str, ip: &str) -> ApiResponse {
        self.send(Method::GET, uri, &[("x-forwarded-for", ip)], None)
            .await
    }

    pub async fn post(&self, uri: &str, body: Value) -> ApiResponse {
        self.send(Method::POST, uri, &[], Some(body.to_string())).await
    }

    /// POST a raw body, for malformed-JSON cases
    pub async fn post_raw(&self, uri: &str, body: &str) -> ApiResponse {
        self.send(Method::POST, uri, &[], Some(body.to_string())).await
    }

    async fn send(
        &self,
        method: Method,
        uri: &str,
        headers: &[(&str, &str)],
        body: Option<String>,
    ) -> ApiResponse {
        let mut request = Request::builder().method(method).uri(uri);
        for (name, value) in headers {
            request = request.header(*name, *value);
        }
        let body = match body {
            Some(json) => {
                request = request.header(header::CONTENT_TYPE, "application/json");
                Body::from(json)
            }
            None => Body::empty(),
        };

        let response = self
            .router
            .clone()
            .oneshot(request.body(body).expect("valid request"))
            .await
            .expect("router is infallible");

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("readable body");
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(&bytes).into_owned())
            })
        };

        ApiResponse { status, body }
    }
}
