//! Ports - interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the application core and the outside world. Adapters implement them.

mod http_transport;

pub use http_transport::{
    ApiError, ApiErrorKind, ApiRequest, HttpMethod, HttpTransport, NETWORK_UNREACHABLE_MESSAGE,
    STATUS_UNAUTHORIZED, UNEXPECTED_ERROR_MESSAGE,
};
