//! Base HTTP client for the chain's REST endpoints.
//!
//! Provides `get` / `post` / `put` JSON helpers with Basic auth,
//! configurable timeout, and bounded retry with exponential backoff on
//! transient failures.

use crate::error::RpcError;
use base64::Engine;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde_json::Value;
use std::time::Duration;

/// Configuration for an RPC client.
#[derive(Debug, Clone)]
pub struct RpcConfig {
    /// Base URL (e.g., `http://localhost:2826`).
    pub url: String,
    /// Optional username for Basic auth.
    pub username: Option<String>,
    /// Optional password for Basic auth.
    pub password: Option<String>,
    /// Request timeout.
    pub timeout: Duration,
    /// Number of retry attempts on transient failure.
    pub retries: u32,
    /// Initial delay between retries (doubles each attempt).
    pub retry_delay: Duration,
}

impl Default for RpcConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:2826".to_string(),
            username: None,
            password: None,
            timeout: Duration::from_secs(30),
            retries: 2,
            retry_delay: Duration::from_millis(500),
        }
    }
}

/// Async JSON HTTP client.
pub struct RpcClient {
    client: reqwest::Client,
    config: RpcConfig,
}

impl RpcClient {
    /// Create a new client with the given base URL.
    pub fn new(url: &str) -> Self {
        Self::with_config(RpcConfig {
            url: url.trim_end_matches('/').to_string(),
            ..Default::default()
        })
    }

    /// Create a new client with full configuration.
    pub fn with_config(config: RpcConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .pool_max_idle_per_host(4)
            .build()
            .unwrap_or_default();

        Self { client, config }
    }

    /// Get the configured base URL.
    pub fn url(&self) -> &str {
        &self.config.url
    }

    fn auth_header(&self) -> Option<HeaderValue> {
        match (&self.config.username, &self.config.password) {
            (Some(user), Some(pass)) => {
                let creds = format!("{}:{}", user, pass);
                let encoded = base64::engine::general_purpose::STANDARD.encode(creds);
                HeaderValue::from_str(&format!("Basic {}", encoded)).ok()
            }
            _ => None,
        }
    }

    fn build_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(auth) = self.auth_header() {
            headers.insert(AUTHORIZATION, auth);
        }
        headers
    }

    /// GET a JSON document, retrying transient failures.
    pub async fn get(&self, endpoint: &str) -> Result<Value, RpcError> {
        let attempts = self.config.retries + 1;
        let mut attempt = 0;
        loop {
            if attempt > 0 {
                let delay = self.config.retry_delay * 2u32.saturating_pow(attempt - 1);
                tokio::time::sleep(delay).await;
            }
            match self.do_get(endpoint).await {
                Ok(val) => return Ok(val),
                Err(e) => {
                    attempt += 1;
                    if !e.is_transient() || attempt >= attempts {
                        return Err(e);
                    }
                    log::debug!("transient RPC failure on {}, retrying: {}", endpoint, e);
                }
            }
        }
    }

    async fn do_get(&self, endpoint: &str) -> Result<Value, RpcError> {
        let url = format!("{}{}", self.config.url, endpoint);
        let resp = self
            .client
            .get(&url)
            .headers(self.build_headers())
            .send()
            .await
            .map_err(|e| RpcError::Http {
                endpoint: endpoint.to_string(),
                source: e,
            })?;
        Self::read_response(resp, endpoint).await
    }

    /// POST a JSON body, retrying transient failures.
    pub async fn post(&self, endpoint: &str, body: &Value) -> Result<Value, RpcError> {
        let attempts = self.config.retries + 1;
        let mut attempt = 0;
        loop {
            if attempt > 0 {
                let delay = self.config.retry_delay * 2u32.saturating_pow(attempt - 1);
                tokio::time::sleep(delay).await;
            }
            match self.do_post(endpoint, body).await {
                Ok(val) => return Ok(val),
                Err(e) => {
                    attempt += 1;
                    if !e.is_transient() || attempt >= attempts {
                        return Err(e);
                    }
                    log::debug!("transient RPC failure on {}, retrying: {}", endpoint, e);
                }
            }
        }
    }

    async fn do_post(&self, endpoint: &str, body: &Value) -> Result<Value, RpcError> {
        let url = format!("{}{}", self.config.url, endpoint);
        let resp = self
            .client
            .post(&url)
            .headers(self.build_headers())
            .json(body)
            .send()
            .await
            .map_err(|e| RpcError::Http {
                endpoint: endpoint.to_string(),
                source: e,
            })?;
        Self::read_response(resp, endpoint).await
    }

    /// PUT a JSON body. Not retried: PUT carries submissions, and replaying
    /// one after an ambiguous failure risks a double-spend report.
    pub async fn put(&self, endpoint: &str, body: &Value) -> Result<Value, RpcError> {
        let url = format!("{}{}", self.config.url, endpoint);
        let resp = self
            .client
            .put(&url)
            .headers(self.build_headers())
            .json(body)
            .send()
            .await
            .map_err(|e| RpcError::Http {
                endpoint: endpoint.to_string(),
                source: e,
            })?;
        Self::read_response(resp, endpoint).await
    }

    async fn read_response(resp: reqwest::Response, endpoint: &str) -> Result<Value, RpcError> {
        let status = resp.status().as_u16();

        if status == 401 {
            let url = resp.url().to_string();
            return Err(RpcError::AuthFailed { url });
        }
        if status == 404 {
            return Err(RpcError::NotFound {
                resource: endpoint.to_string(),
            });
        }
        if status >= 400 {
            let body = resp.text().await.unwrap_or_default();
            return Err(RpcError::HttpStatus {
                endpoint: endpoint.to_string(),
                status,
                body: body.chars().take(500).collect(),
            });
        }

        resp.json().await.map_err(|e| RpcError::Http {
            endpoint: endpoint.to_string(),
            source: e,
        })
    }
}
