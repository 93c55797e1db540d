//! HTTP transport port and the normalized API error.
//!
//! The transport performs exactly one network exchange per call and maps
//! every failure to one `ApiError` before it crosses this boundary. No
//! raw transport error, status line, or stack trace is ever exposed to
//! callers; they receive a classified error with a human-readable message.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::domain::foundation::SchemaError;
use crate::domain::session::SessionError;

/// Fixed message for failures where no response reached the client.
pub const NETWORK_UNREACHABLE_MESSAGE: &str =
    "Unable to reach the server. Please check your connection and try again.";

/// Fixed message for failures the client cannot classify.
pub const UNEXPECTED_ERROR_MESSAGE: &str = "Something went wrong. Please try again.";

/// HTTP status indicating the access credential was rejected.
pub const STATUS_UNAUTHORIZED: u16 = 401;

/// HTTP method for an API request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    /// Returns the wire representation of the method.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

/// A single API request as seen by the transport.
///
/// Endpoints are paths relative to the configured base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub endpoint: String,
    pub method: HttpMethod,
    pub body: Option<Value>,
    pub headers: Vec<(String, String)>,
}

impl ApiRequest {
    /// Creates a request with no body and no extra headers.
    pub fn new(method: HttpMethod, endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            method,
            body: None,
            headers: Vec::new(),
        }
    }

    /// Creates a GET request.
    pub fn get(endpoint: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, endpoint)
    }

    /// Creates a POST request.
    pub fn post(endpoint: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, endpoint)
    }

    /// Sets the JSON body.
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Appends a header.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

/// Classification of a normalized API error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    /// A response was received with a non-success status.
    Server,
    /// The request was sent but no response was received.
    Network,
    /// Any other failure.
    Unexpected,
    /// Input or payload rejected before or after the exchange.
    Validation,
}

/// The uniform error callers receive from the transport and the client.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ApiError {
    /// Non-success HTTP response with a best-effort message extracted
    /// from the body.
    #[error("{message}")]
    Server { status: u16, message: String },

    /// The server could not be reached (connect failure, DNS, timeout).
    #[error("{}", NETWORK_UNREACHABLE_MESSAGE)]
    Network,

    /// A failure outside the request/response exchange.
    #[error("{}", UNEXPECTED_ERROR_MESSAGE)]
    Unexpected,

    /// Schema rejection of tokens, profile, or form input.
    #[error("{0}")]
    Validation(SchemaError),
}

impl ApiError {
    /// Creates a server error from a status and message.
    pub fn server(status: u16, message: impl Into<String>) -> Self {
        Self::Server {
            status,
            message: message.into(),
        }
    }

    /// Returns the error classification.
    pub fn kind(&self) -> ApiErrorKind {
        match self {
            Self::Server { .. } => ApiErrorKind::Server,
            Self::Network => ApiErrorKind::Network,
            Self::Unexpected => ApiErrorKind::Unexpected,
            Self::Validation(_) => ApiErrorKind::Validation,
        }
    }

    /// Returns the HTTP status for server errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Server { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns true if this is a 401-class server error, the trigger
    /// for the single refresh-and-replay attempt.
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(STATUS_UNAUTHORIZED)
    }
}

impl From<SchemaError> for ApiError {
    fn from(err: SchemaError) -> Self {
        Self::Validation(err)
    }
}

impl From<SessionError> for ApiError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::InvalidProfile(inner) | SessionError::InvalidTokens(inner) => {
                Self::Validation(inner)
            }
        }
    }
}

/// Port for issuing a single HTTP exchange.
///
/// # Contract
///
/// Implementations must:
/// - Issue exactly one network exchange per call; never retry.
/// - Map every failure to one `ApiError` variant; never let a raw
///   transport error escape.
/// - Return the parsed JSON body of a success response.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Sends the request and returns the parsed success body.
    async fn send(&self, request: ApiRequest) -> Result<Value, ApiError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_error_displays_extracted_message() {
        let err = ApiError::server(500, "Database exploded");
        assert_eq!(err.to_string(), "Database exploded");
        assert_eq!(err.kind(), ApiErrorKind::Server);
        assert_eq!(err.status(), Some(500));
    }

    #[test]
    fn network_error_uses_fixed_message() {
        assert_eq!(ApiError::Network.to_string(), NETWORK_UNREACHABLE_MESSAGE);
        assert_eq!(ApiError::Network.kind(), ApiErrorKind::Network);
        assert_eq!(ApiError::Network.status(), None);
    }

    #[test]
    fn unexpected_error_uses_fixed_message() {
        assert_eq!(ApiError::Unexpected.to_string(), UNEXPECTED_ERROR_MESSAGE);
    }

    #[test]
    fn unauthorized_detection_is_status_based() {
        assert!(ApiError::server(401, "Unauthorized").is_unauthorized());
        assert!(!ApiError::server(403, "Forbidden").is_unauthorized());
        assert!(!ApiError::Network.is_unauthorized());
    }

    #[test]
    fn session_error_converts_to_validation() {
        let err: ApiError = SessionError::InvalidProfile(SchemaError::missing("email")).into();
        assert_eq!(err.kind(), ApiErrorKind::Validation);
        assert_eq!(err.to_string(), "Missing required field: email");
    }

    #[test]
    fn request_builders_compose() {
        let request = ApiRequest::post("/auth/login")
            .with_body(serde_json::json!({"a": 1}))
            .with_header("X-Test", "yes");
        assert_eq!(request.method, HttpMethod::Post);
        assert_eq!(request.endpoint, "/auth/login");
        assert!(request.body.is_some());
        assert_eq!(request.headers.len(), 1);
    }

    #[test]
    fn method_as_str_matches_wire_format() {
        assert_eq!(HttpMethod::Get.as_str(), "GET");
        assert_eq!(HttpMethod::Delete.as_str(), "DELETE");
    }
}
