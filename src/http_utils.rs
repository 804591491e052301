//! HTTP utilities for the OpenDrive CLI client.
//!
//! This module owns the wire-level concerns: the base URL, default headers,
//! timeouts and the blocking reqwest client. The session manager talks to the
//! network only through the [`Transport`] trait so that request handling can
//! be exercised against an in-memory double.

use reqwest::blocking::{multipart, Client};
use serde_json::Value;
use std::{collections::HashMap, time::Duration};
use thiserror::Error;
use tracing::trace;
use url::Url;

use crate::configuration::Configuration;

pub const DEFAULT_BASE_URL: &str = "https://dev.opendrive.com/api/v1/";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_UPLOAD_TIMEOUT_SECS: u64 = 300;

/// Failure to obtain any HTTP response at all
#[derive(Debug, Error)]
#[error("{message}")]
pub struct TransportError {
    pub message: String,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            TransportError::new(format!("request timed out: {}", e))
        } else {
            TransportError::new(e.to_string())
        }
    }
}

/// Status and raw body of a completed HTTP exchange
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}

/// One chunk of file content plus the text fields sent alongside it
#[derive(Debug, Clone)]
pub struct ChunkUpload {
    pub fields: Vec<(String, String)>,
    pub file_name: String,
    pub data: Vec<u8>,
}

/// The network seam used by the session manager
pub trait Transport {
    /// POST `body` as JSON to `url`
    fn post_json(&self, url: &Url, body: &Value) -> Result<ApiResponse, TransportError>;

    /// POST a chunk as `multipart/form-data` to `url`
    fn post_multipart(&self, url: &Url, chunk: ChunkUpload) -> Result<ApiResponse, TransportError>;
}

/// Configuration for HTTP requests with common settings
#[derive(Debug, Clone)]
pub struct HttpRequestConfig {
    /// Base URL for the API, always ending in `/`
    pub base_url: Url,
    /// Default headers to include with all requests
    pub default_headers: HashMap<String, String>,
    /// Request timeout in seconds
    pub timeout: u64,
    /// Timeout for chunk uploads in seconds (defaults to timeout if not set)
    pub upload_timeout: Option<u64>,
}

fn default_headers() -> HashMap<String, String> {
    let mut default_headers = HashMap::new();
    default_headers.insert(
        "User-Agent".to_string(),
        format!("odcli/{}", env!("CARGO_PKG_VERSION")),
    );
    default_headers
}

/// Make sure `join` appends to the base path instead of replacing its last segment.
pub fn normalize_base_url(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

impl Default for HttpRequestConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid"),
            default_headers: default_headers(),
            timeout: DEFAULT_TIMEOUT_SECS,
            upload_timeout: Some(DEFAULT_UPLOAD_TIMEOUT_SECS),
        }
    }
}

impl HttpRequestConfig {
    pub fn from_configuration(configuration: &Configuration) -> Self {
        let mut config = Self::default();
        if let Some(api_url) = configuration.api_url() {
            config.base_url = normalize_base_url(api_url.clone());
        }
        config
    }
}

/// HTTP client wrapper around the blocking reqwest client
pub struct HttpClient {
    client: Client,
    config: HttpRequestConfig,
}

impl HttpClient {
    /// Create a new HTTP client with the given configuration
    pub fn new(config: HttpRequestConfig) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .build()?;

        Ok(Self { client, config })
    }

    /// Get a reference to the HTTP client configuration
    pub fn config(&self) -> &HttpRequestConfig {
        &self.config
    }

    fn with_default_headers(
        &self,
        mut request: reqwest::blocking::RequestBuilder,
    ) -> reqwest::blocking::RequestBuilder {
        for (key, value) in &self.config.default_headers {
            request = request.header(key, value);
        }
        request
    }

    fn execute(
        &self,
        request: reqwest::blocking::RequestBuilder,
    ) -> Result<ApiResponse, TransportError> {
        let response = self.with_default_headers(request).send()?;
        let status = response.status().as_u16();
        let body = response.text()?;
        trace!("Response status {} with body: {}", status, body);
        Ok(ApiResponse { status, body })
    }
}

impl Transport for HttpClient {
    fn post_json(&self, url: &Url, body: &Value) -> Result<ApiResponse, TransportError> {
        trace!("POST {}", url);
        // `json` also sets Content-Type: application/json
        self.execute(self.client.post(url.clone()).json(body))
    }

    fn post_multipart(&self, url: &Url, chunk: ChunkUpload) -> Result<ApiResponse, TransportError> {
        trace!("POST {} ({} bytes)", url, chunk.data.len());
        let mut form = multipart::Form::new();
        for (name, value) in chunk.fields {
            form = form.text(name, value);
        }
        let part = multipart::Part::bytes(chunk.data).file_name(chunk.file_name);
        form = form.part("file_data", part);

        let timeout = self.config.upload_timeout.unwrap_or(self.config.timeout);
        self.execute(
            self.client
                .post(url.clone())
                .timeout(Duration::from_secs(timeout))
                .multipart(form),
        )
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! In-memory transport used by the unit tests.

    use super::*;
    use std::{
        cell::RefCell,
        collections::{HashMap, VecDeque},
    };

    pub const MOCK_BASE_URL: &str = "https://mock.opendrive.test/api/v1/";

    #[derive(Debug, Clone, PartialEq)]
    pub struct RecordedRequest {
        pub endpoint: String,
        pub body: Value,
    }

    /// Replays canned responses per endpoint. The last queued response for an
    /// endpoint is repeated for every further call.
    #[derive(Default)]
    pub struct MockTransport {
        routes: RefCell<HashMap<String, VecDeque<Result<ApiResponse, String>>>>,
        requests: RefCell<Vec<RecordedRequest>>,
    }

    impl MockTransport {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn base_url() -> Url {
            Url::parse(MOCK_BASE_URL).unwrap()
        }

        pub fn respond(&self, endpoint: &str, status: u16, body: &str) -> &Self {
            self.push(
                endpoint,
                Ok(ApiResponse {
                    status,
                    body: body.to_string(),
                }),
            )
        }

        pub fn fail(&self, endpoint: &str, message: &str) -> &Self {
            self.push(endpoint, Err(message.to_string()))
        }

        fn push(&self, endpoint: &str, response: Result<ApiResponse, String>) -> &Self {
            self.routes
                .borrow_mut()
                .entry(endpoint.to_string())
                .or_default()
                .push_back(response);
            self
        }

        pub fn requests(&self) -> Vec<RecordedRequest> {
            self.requests.borrow().clone()
        }

        pub fn requests_to(&self, endpoint: &str) -> Vec<RecordedRequest> {
            self.requests()
                .into_iter()
                .filter(|r| r.endpoint == endpoint)
                .collect()
        }

        pub fn endpoints(&self) -> Vec<String> {
            self.requests().into_iter().map(|r| r.endpoint).collect()
        }

        fn reply(&self, url: &Url, body: Value) -> Result<ApiResponse, TransportError> {
            let endpoint = url
                .as_str()
                .strip_prefix(MOCK_BASE_URL)
                .unwrap_or(url.as_str())
                .to_string();
            self.requests.borrow_mut().push(RecordedRequest {
                endpoint: endpoint.clone(),
                body,
            });

            let mut routes = self.routes.borrow_mut();
            let response = match routes.get_mut(&endpoint) {
                Some(queue) if queue.len() > 1 => queue.pop_front(),
                Some(queue) => queue.front().cloned(),
                None => None,
            };
            match response {
                Some(Ok(response)) => Ok(response),
                Some(Err(message)) => Err(TransportError::new(message)),
                None => Ok(ApiResponse {
                    status: 404,
                    body: format!("no route for {}", endpoint),
                }),
            }
        }
    }

    impl Transport for MockTransport {
        fn post_json(&self, url: &Url, body: &Value) -> Result<ApiResponse, TransportError> {
            self.reply(url, body.clone())
        }

        fn post_multipart(
            &self,
            url: &Url,
            chunk: ChunkUpload,
        ) -> Result<ApiResponse, TransportError> {
            let mut fields: serde_json::Map<String, Value> = chunk
                .fields
                .into_iter()
                .map(|(k, v)| (k, Value::String(v)))
                .collect();
            fields.insert("file_data_len".to_string(), Value::from(chunk.data.len()));
            self.reply(url, Value::Object(fields))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_client_config_default() {
        let config = HttpRequestConfig::default();
        assert_eq!(config.base_url.as_str(), DEFAULT_BASE_URL);
        assert_eq!(config.timeout, DEFAULT_TIMEOUT_SECS);
        assert!(config.default_headers.contains_key("User-Agent"));
    }

    #[test]
    fn test_normalize_base_url_appends_slash() {
        let url = normalize_base_url(Url::parse("https://example.com/api/v1").unwrap());
        assert_eq!(url.as_str(), "https://example.com/api/v1/");
        assert_eq!(
            url.join("session/login.json").unwrap().as_str(),
            "https://example.com/api/v1/session/login.json"
        );
    }

    #[test]
    fn test_api_response_is_ok() {
        let ok = ApiResponse {
            status: 200,
            body: "{}".to_string(),
        };
        let created = ApiResponse {
            status: 201,
            body: String::new(),
        };
        assert!(ok.is_ok());
        assert!(!created.is_ok());
    }
}
