//! Test HTTP client.
//!
//! Thin wrapper over reqwest that returns status and parsed JSON together.

use reqwest::{Method, StatusCode};
use serde_json::Value;

/// A test client bound to one server.
pub struct TestClient {
    http: reqwest::Client,
    base_url: String,
}

impl TestClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.to_string(),
        }
    }

    /// Send a request with an optional raw body and decode the JSON reply.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&str>,
    ) -> anyhow::Result<(StatusCode, Value)> {
        let mut req = self
            .http
            .request(method, format!("{}{}", self.base_url, path));
        if let Some(body) = body {
            req = req
                .header(reqwest::header::CONTENT_TYPE, "application/json")
                .body(body.to_string());
        }

        let response = req.send().await?;
        let status = response.status();
        let text = response.text().await?;
        let value = if text.is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text)?
        };
        Ok((status, value))
    }

    pub async fn get(&self, path: &str) -> anyhow::Result<(StatusCode, Value)> {
        self.request(Method::GET, path, None).await
    }

    pub async fn post(&self, path: &str, body: &str) -> anyhow::Result<(StatusCode, Value)> {
        self.request(Method::POST, path, Some(body)).await
    }

    pub async fn patch(&self, path: &str, body: &str) -> anyhow::Result<(StatusCode, Value)> {
        self.request(Method::PATCH, path, Some(body)).await
    }

    pub async fn delete(&self, path: &str) -> anyhow::Result<(StatusCode, Value)> {
        self.request(Method::DELETE, path, None).await
    }

    /// Create a message, asserting success, and return its JSON.
    pub async fn create(&self, body: &str, username: &str) -> anyhow::Result<Value> {
        let payload = serde_json::json!({ "body": body, "username": username }).to_string();
        let (status, value) = self.post("/messages", &payload).await?;
        anyhow::ensure!(status == StatusCode::CREATED, "create returned {status}");
        Ok(value)
    }

    /// Raw access for header assertions.
    #[allow(dead_code)]
    pub fn raw(&self) -> &reqwest::Client {
        &self.http
    }

    #[allow(dead_code)]
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}
