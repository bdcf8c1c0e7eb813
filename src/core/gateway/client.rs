//! Authenticated HTTP client for the Hex API.
//!
//! [`HexGateway`] owns the configuration, refuses to send anything until
//! [`HexGateway::initialize`] has verified connectivity, and turns every
//! exchange into either an [`ApiResponse`] or a [`GatewayError`].

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, error, info, instrument, warn};

use super::error::{GatewayError, GatewayResult};
use super::response::{ApiErrorBody, ApiResponse, classify, decode};
use crate::core::config::HexConfig;

/// Cheap read-only endpoint used to verify the token at startup.
pub const PROBE_ENDPOINT: &str = "/projects";

const JSON_MIME: &str = "application/json";

/// HTTP methods the Hex API uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        };
        f.write_str(name)
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Delete => reqwest::Method::DELETE,
        }
    }
}

/// A request relative to the configured base URL.
///
/// Query parameters keep the order in which they were added.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: HttpMethod,
    pub endpoint: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn new(method: HttpMethod, endpoint: impl Into<String>) -> Self {
        Self {
            method,
            endpoint: endpoint.into(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn get(endpoint: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, endpoint)
    }

    pub fn post(endpoint: impl Into<String>, body: Value) -> Self {
        Self::new(HttpMethod::Post, endpoint).with_body(body)
    }

    pub fn put(endpoint: impl Into<String>, body: Value) -> Self {
        Self::new(HttpMethod::Put, endpoint).with_body(body)
    }

    pub fn delete(endpoint: impl Into<String>) -> Self {
        Self::new(HttpMethod::Delete, endpoint)
    }

    /// Append a query parameter.
    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    /// Append a query parameter only when a value is present.
    pub fn query_opt<V: ToString>(self, key: impl Into<String>, value: Option<V>) -> Self {
        match value {
            Some(value) => self.query(key, value),
            None => self,
        }
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// Anything that can send a request to the Hex API.
///
/// Tool handlers only see this trait, which keeps them testable without a
/// network.
#[async_trait]
pub trait ApiClient: Send + Sync {
    /// Send a request and classify the decoded body.
    async fn send(&self, request: ApiRequest) -> GatewayResult<ApiResponse<Value>>;
}

/// Send a request and decode the success payload into `T`.
pub async fn request_as<T: DeserializeOwned>(
    client: &dyn ApiClient,
    request: ApiRequest,
) -> GatewayResult<ApiResponse<T>> {
    decode(client.send(request).await?)
}

/// The authenticated Hex API gateway.
pub struct HexGateway {
    config: HexConfig,
    http: reqwest::Client,
    initialized: AtomicBool,
}

impl HexGateway {
    /// Create a gateway. No request can be sent until [`Self::initialize`] succeeds.
    pub fn new(config: HexConfig) -> GatewayResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| GatewayError::transport(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            config,
            http,
            initialized: AtomicBool::new(false),
        })
    }

    pub fn config(&self) -> &HexConfig {
        &self.config
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::Acquire)
    }

    /// Validate the configuration and probe the API.
    ///
    /// The flag only flips after a successful probe. A failed probe leaves
    /// the gateway uninitialized; retrying is up to the caller.
    #[instrument(skip(self), fields(base_url = %self.config.base_url))]
    pub async fn initialize(&self) -> GatewayResult<()> {
        if self.is_initialized() {
            debug!("Hex gateway already initialized");
            return Ok(());
        }

        self.config.validate()?;

        info!("Checking Hex API connectivity");
        let probe = ApiRequest::get(PROBE_ENDPOINT).query("limit", 1);

        match self.execute(probe).await.and_then(ApiResponse::into_result) {
            Ok(_) => {
                self.initialized.store(true, Ordering::Release);
                info!("Hex API connection verified");
                Ok(())
            }
            Err(e) => {
                error!(error = %e, "Hex API connectivity check failed");
                Err(GatewayError::initialization(e))
            }
        }
    }

    /// Join the base URL with `endpoint` and append `query` in order.
    pub fn build_url(&self, endpoint: &str, query: &[(String, String)]) -> GatewayResult<Url> {
        let base = self.config.base_url.trim_end_matches('/');
        let path = endpoint.trim_start_matches('/');

        let mut url = Url::parse(&format!("{}/{}", base, path)).map_err(|e| {
            GatewayError::config_invalid(format!("Cannot build URL for '{}': {}", endpoint, e))
        })?;

        if !query.is_empty() {
            let encoded = serde_urlencoded::to_string(query).map_err(|e| {
                GatewayError::transport(format!("Failed to encode query parameters: {}", e))
            })?;
            url.set_query(Some(&encoded));
        }

        Ok(url)
    }

    /// Perform the exchange without the initialization check.
    async fn execute(&self, request: ApiRequest) -> GatewayResult<ApiResponse<Value>> {
        let url = self.build_url(&request.endpoint, &request.query)?;
        let started = Instant::now();

        debug!(method = %request.method, url = %url, "Sending Hex API request");

        let mut builder = self
            .http
            .request(request.method.into(), url)
            .bearer_auth(&self.config.api_token)
            .header(ACCEPT, JSON_MIME)
            .header(CONTENT_TYPE, JSON_MIME);

        if request.method != HttpMethod::Get {
            if let Some(body) = &request.body {
                if self.config.debug {
                    debug!(body = %body, "Request body");
                }
                builder = builder.json(body);
            }
        }

        let response = builder
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;
        let status = response.status();

        debug!(
            status = status.as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Hex API responded"
        );

        if let Some(err) = status_error(status) {
            warn!(status = status.as_u16(), error = %err, "Hex API request failed");
            return Err(err);
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| self.transport_error(e))?;

        let value = match parse_body(&bytes) {
            Ok(value) => value,
            // An undecodable body on a non-2xx status (e.g. an HTML 404 page) is
            // reported as a synthesized HTTP_<status> ApiError, not a transport error.
            Err(_) if !status.is_success() => Value::Null,
            Err(e) => {
                return Err(GatewayError::transport(format!(
                    "Failed to decode response body (HTTP {}): {}",
                    status.as_u16(),
                    e
                )));
            }
        };

        if self.config.debug {
            debug!(body = %value, "Response body");
        }

        let classified = classify(value);
        if status.is_success() {
            return Ok(classified);
        }

        Ok(match classified {
            ApiResponse::Success(value) => ApiResponse::ApiError(ApiErrorBody {
                code: format!("HTTP_{}", status.as_u16()),
                message: status
                    .canonical_reason()
                    .unwrap_or("Request failed")
                    .to_string(),
                details: value.as_object().cloned(),
            }),
            error => error,
        })
    }

    fn transport_error(&self, e: reqwest::Error) -> GatewayError {
        if e.is_timeout() {
            GatewayError::Timeout {
                timeout_ms: self.config.timeout_ms,
            }
        } else if e.is_connect() {
            GatewayError::transport(format!("Connection to Hex API failed: {}", e))
        } else {
            GatewayError::transport(e.to_string())
        }
    }
}

#[async_trait]
impl ApiClient for HexGateway {
    async fn send(&self, request: ApiRequest) -> GatewayResult<ApiResponse<Value>> {
        if !self.is_initialized() {
            warn!(endpoint = %request.endpoint, "Request rejected: gateway not initialized");
            return Err(GatewayError::NotInitialized);
        }

        let method = request.method;
        let endpoint = request.endpoint.clone();
        let result = self.execute(request).await;

        match &result {
            Ok(ApiResponse::Success(_)) => {
                debug!(%method, %endpoint, "Hex API request succeeded");
            }
            Ok(ApiResponse::ApiError(body)) => {
                warn!(%method, %endpoint, code = %body.code, message = %body.message, "Hex API returned an error");
            }
            Err(e) => {
                error!(%method, %endpoint, error = %e, "Hex API request failed");
            }
        }

        result
    }
}

/// Statuses that become hard failures before the body is inspected.
fn status_error(status: StatusCode) -> Option<GatewayError> {
    match status.as_u16() {
        429 => Some(GatewayError::RateLimited),
        401 => Some(GatewayError::Unauthorized),
        code if code >= 500 => Some(GatewayError::ServerError { status: code }),
        _ => None,
    }
}

/// Decode a body; an empty body (e.g. `204 No Content`) is JSON `null`.
fn parse_body(bytes: &[u8]) -> serde_json::Result<Value> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        Ok(Value::Null)
    } else {
        serde_json::from_slice(bytes)
    }
}
