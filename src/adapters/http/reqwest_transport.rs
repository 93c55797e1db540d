//! Reqwest Transport - Implementation of HttpTransport over reqwest.
//!
//! One configured client per transport: base URL from configuration, a
//! fixed request timeout, and a cookie store so cross-origin credentials
//! travel with every exchange. Each `send` issues exactly one network
//! exchange and classifies every failure into the normalized `ApiError`
//! before returning.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, StatusCode};
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::ApiConfig;
use crate::ports::{ApiError, ApiRequest, HttpMethod, HttpTransport};

/// Fixed per-exchange timeout. Not configurable per call; a hung request
/// becomes a network error after this long.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// HTTP transport backed by a single configured reqwest client.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    base_url: String,
    client: Client,
}

impl ReqwestTransport {
    /// Creates a transport for the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .cookie_store(true)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Creates a transport from the API configuration.
    pub fn from_config(config: &ApiConfig) -> Self {
        Self::new(config.base_url.clone())
    }

    /// Joins an endpoint path onto the base URL.
    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: ApiRequest) -> Result<Value, ApiError> {
        let url = self.url(&request.endpoint);
        debug!(method = request.method.as_str(), %url, "sending request");

        let mut builder = self.client.request(to_method(request.method), &url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|err| {
            warn!(%url, error = %err, "request failed before a response arrived");
            classify_send_error(&err)
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.json::<Value>().await.ok();
            let message = extract_error_message(body.as_ref(), status);
            warn!(%url, status = status.as_u16(), %message, "server returned an error");
            return Err(ApiError::server(status.as_u16(), message));
        }

        response.json().await.map_err(|err| {
            warn!(%url, error = %err, "failed to decode success body");
            ApiError::Unexpected
        })
    }
}

fn to_method(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
        HttpMethod::Put => Method::PUT,
        HttpMethod::Patch => Method::PATCH,
        HttpMethod::Delete => Method::DELETE,
    }
}

/// Classifies a failure where no response was received.
///
/// Builder faults (bad header, unparsable URL) never left the process;
/// everything else on the send path means the server was unreachable.
fn classify_send_error(err: &reqwest::Error) -> ApiError {
    if err.is_builder() {
        ApiError::Unexpected
    } else {
        ApiError::Network
    }
}

/// Extracts a human-readable message from an error response body.
///
/// Priority: a `message` field, then an `error` field, then the HTTP
/// status reason, and finally a fixed fallback.
fn extract_error_message(body: Option<&Value>, status: StatusCode) -> String {
    body.and_then(|b| b.get("message"))
        .and_then(Value::as_str)
        .or_else(|| body.and_then(|b| b.get("error")).and_then(Value::as_str))
        .or_else(|| status.canonical_reason())
        .unwrap_or("Unknown error")
        .to_string()
}
