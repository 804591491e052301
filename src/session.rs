//! Session lifecycle for the OpenDrive API.
//!
//! [`SessionManager`] holds the credentials and at most one session token.
//! Every request goes through [`SessionManager::post`], which turns the three
//! possible outcomes of a round-trip (200, other status, no response) into a
//! single `Result`.

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tracing::{debug, error, warn};
use url::Url;

use crate::{
    configuration::Credentials,
    error::ApiError,
    file_ops::FileOperations,
    http_utils::{ChunkUpload, HttpClient, HttpRequestConfig, Transport, TransportError},
    model::{LoginRequest, LoginResponse, SessionExistsResponse, SessionRequest},
};

pub const ENDPOINT_LOGIN: &str = "session/login.json";
pub const ENDPOINT_LOGOUT: &str = "session/logout.json";
pub const ENDPOINT_SESSION_EXISTS: &str = "session/exists.json";

const SESSION_ID_FIELD: &str = "session_id";

pub struct SessionManager<T: Transport = HttpClient> {
    transport: T,
    base_url: Url,
    credentials: Credentials,
    session_id: Option<String>,
}

impl SessionManager<HttpClient> {
    /// Create a session manager talking to the service described by `config`
    pub fn new(config: HttpRequestConfig, credentials: Credentials) -> Result<Self, TransportError> {
        let base_url = config.base_url.clone();
        let transport = HttpClient::new(config)?;
        Ok(Self::with_transport(transport, base_url, credentials))
    }
}

impl<T: Transport> SessionManager<T> {
    pub fn with_transport(transport: T, base_url: Url, credentials: Credentials) -> Self {
        Self {
            transport,
            base_url,
            credentials,
            session_id: None,
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref()
    }

    /// File operations bound to this session
    pub fn files(&self) -> FileOperations<'_, T> {
        FileOperations::new(self)
    }

    /// Log in with the credentials given at construction
    pub fn login(&mut self) -> bool {
        let Credentials { username, password } = self.credentials.clone();
        self.login_with(&username, &password)
    }

    /// Log in with explicit credentials, replacing any session already held.
    pub fn login_with(&mut self, username: &str, password: &str) -> bool {
        if username.is_empty() || password.is_empty() {
            error!("Username or password not set");
            return false;
        }
        if self.session_id.is_some() {
            self.logout();
        }

        debug!("Logging in to OpenDrive with username {}", username);
        let request = LoginRequest {
            username,
            passwd: password,
        };
        match self.post_as::<LoginResponse, _>(ENDPOINT_LOGIN, &request) {
            Ok(response) => {
                debug!("Logged in, got a new session");
                self.session_id = Some(response.session_id);
                true
            }
            Err(e) => {
                error!("Error logging in to OpenDrive, {}", e);
                false
            }
        }
    }

    /// Close the session. The local token is dropped even if the call fails.
    pub fn logout(&mut self) {
        let Some(session_id) = self.session_id.take() else {
            return;
        };

        debug!("Logging out of OpenDrive");
        let request = SessionRequest {
            session_id: &session_id,
        };
        if let Err(e) = self.post_serialized(ENDPOINT_LOGOUT, &request) {
            warn!("Error logging out of OpenDrive, {}", e);
        }
    }

    /// Ask the service whether the held session is still valid
    pub fn is_logged_in(&self) -> bool {
        let Some(session_id) = self.session_id.as_deref() else {
            return false;
        };

        match self.post_as::<SessionExistsResponse, _>(
            ENDPOINT_SESSION_EXISTS,
            &SessionRequest { session_id },
        ) {
            Ok(response) => response.result,
            Err(e) => {
                error!("Error checking session, {}", e);
                false
            }
        }
    }

    /// POST `build()` with the session ID merged in, after a liveness check.
    ///
    /// The payload is only built once the session is known to be alive.
    pub fn authenticated_request<P, F>(&self, endpoint: &str, build: F) -> Result<Value, ApiError>
    where
        P: Serialize,
        F: FnOnce() -> P,
    {
        if !self.is_logged_in() {
            return Err(ApiError::NotLoggedIn);
        }
        let session_id = self.session_id.as_deref().ok_or(ApiError::NotLoggedIn)?;

        let mut payload = serde_json::to_value(build())?;
        if let Value::Object(fields) = &mut payload {
            fields.insert(
                SESSION_ID_FIELD.to_string(),
                Value::String(session_id.to_string()),
            );
        }
        self.post(endpoint, &payload)
    }

    /// Send one chunk of file content. Requires a held session but skips the
    /// liveness check, which the caller has already done for the upload.
    pub fn upload_chunk(&self, endpoint: &str, mut chunk: ChunkUpload) -> Result<Value, ApiError> {
        let session_id = self.session_id.as_deref().ok_or(ApiError::NotLoggedIn)?;
        chunk
            .fields
            .insert(0, (SESSION_ID_FIELD.to_string(), session_id.to_string()));

        let url = self.base_url.join(endpoint)?;
        let response = self.transport.post_multipart(&url, chunk)?;
        Self::decode(response)
    }

    fn post_serialized<P: Serialize>(&self, endpoint: &str, payload: &P) -> Result<Value, ApiError> {
        self.post(endpoint, &serde_json::to_value(payload)?)
    }

    fn post_as<R: DeserializeOwned, P: Serialize>(
        &self,
        endpoint: &str,
        payload: &P,
    ) -> Result<R, ApiError> {
        Ok(serde_json::from_value(self.post_serialized(endpoint, payload)?)?)
    }

    fn post(&self, endpoint: &str, payload: &Value) -> Result<Value, ApiError> {
        let url = self.base_url.join(endpoint)?;
        let response = self.transport.post_json(&url, payload)?;
        Self::decode(response)
    }

    fn decode(response: crate::http_utils::ApiResponse) -> Result<Value, ApiError> {
        if response.is_ok() {
            Ok(serde_json::from_str(&response.body)?)
        } else {
            Err(ApiError::UnexpectedStatus {
                status: response.status,
                body: response.body,
            })
        }
    }
}
