//! Integration tests for transport failure classification.
//!
//! A failure where no response reaches the client must classify as a
//! network error with the fixed unreachable-server message, never as a
//! server error.

use campus_portal::adapters::http::ReqwestTransport;
use campus_portal::ports::{
    ApiErrorKind, ApiRequest, HttpTransport, NETWORK_UNREACHABLE_MESSAGE,
};

/// Finds a local port with nothing listening on it.
fn closed_port() -> u16 {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("cannot bind localhost");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}

#[tokio::test]
async fn connection_refused_classifies_as_network_error() {
    let transport = ReqwestTransport::new(format!("http://127.0.0.1:{}", closed_port()));

    let err = transport
        .send(ApiRequest::get("/academic-terms"))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ApiErrorKind::Network);
    assert_eq!(err.to_string(), NETWORK_UNREACHABLE_MESSAGE);
    assert_eq!(err.status(), None);
}

#[tokio::test]
async fn unresolvable_host_classifies_as_network_error() {
    let transport = ReqwestTransport::new("http://campus-portal.invalid");

    let err = transport.send(ApiRequest::get("/health")).await.unwrap_err();

    assert_eq!(err.kind(), ApiErrorKind::Network);
}
