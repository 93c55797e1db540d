//! Authenticated API client.
//!
//! Wraps the HTTP transport with the session-aware behavior callers rely
//! on: the access credential is attached to every authenticated request,
//! a 401 triggers exactly one refresh followed by exactly one replay, and
//! a failed refresh forces a local logout. Unauthenticated requests
//! (login, signup, installation) bypass both credential injection and the
//! 401 interception.
//!
//! Success bodies follow the portal's `{ message?, status_code?, data? }`
//! envelope; `data` is unwrapped when present.
//!
//! Concurrent requests that each receive a 401 will each refresh
//! independently; refreshes are not coalesced across callers.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use crate::application::auth;
use crate::domain::session::SessionStore;
use crate::ports::{ApiError, ApiRequest, HttpTransport};

/// Session-aware API client.
///
/// Constructed at the composition root with the transport and the session
/// store it shares with the rest of the application.
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn HttpTransport>,
    store: Arc<SessionStore>,
}

impl ApiClient {
    /// Creates a client over the given transport and session store.
    pub fn new(transport: Arc<dyn HttpTransport>, store: Arc<SessionStore>) -> Self {
        Self { transport, store }
    }

    /// Returns the session store this client mutates.
    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// Sends an authenticated request and deserializes the unwrapped
    /// response data.
    ///
    /// Attaches the current access credential. On a 401, refreshes the
    /// session once and replays the request once with the new credential.
    ///
    /// # Errors
    ///
    /// Returns the normalized `ApiError`. A refresh failure, or a second
    /// 401 on the replay, clears the session store before the error is
    /// returned so presentation code can redirect to login.
    pub async fn request<T: DeserializeOwned>(
        &self,
        request: ApiRequest,
    ) -> Result<T, ApiError> {
        let body = self.send_with_refresh(request).await?;
        unwrap_data(body)
    }

    /// Sends a request with no credential injection and no 401
    /// interception. Used by login, signup, installation, and the refresh
    /// flow itself, which must not recurse into the interception path.
    pub async fn request_unauthenticated<T: DeserializeOwned>(
        &self,
        request: ApiRequest,
    ) -> Result<T, ApiError> {
        let body = self.transport.send(request).await?;
        unwrap_data(body)
    }

    /// One authenticated exchange, one optional refresh, one optional
    /// replay, strictly in that order.
    async fn send_with_refresh(&self, request: ApiRequest) -> Result<Value, ApiError> {
        let err = match self.send_once(&request).await {
            Ok(body) => return Ok(body),
            Err(err) => err,
        };
        if !err.is_unauthorized() {
            return Err(err);
        }

        debug!(endpoint = %request.endpoint, "credential rejected, refreshing session");
        let payload = match auth::refresh_portal_session(self).await {
            Ok(payload) => payload,
            Err(refresh_err) => {
                warn!(error = %refresh_err, "session refresh failed, forcing logout");
                self.store.clear_auth();
                return Err(refresh_err);
            }
        };

        if let Err(session_err) = self
            .store
            .set_auth_session(&payload.profile, payload.tokens.as_ref())
        {
            warn!(error = %session_err, "refresh returned an invalid session, forcing logout");
            self.store.clear_auth();
            return Err(session_err.into());
        }

        match self.send_once(&request).await {
            Err(replay_err) if replay_err.is_unauthorized() => {
                // Second rejection is not recovered further.
                warn!(endpoint = %request.endpoint, "replay rejected, forcing logout");
                self.store.clear_auth();
                Err(replay_err)
            }
            other => other,
        }
    }

    /// Issues exactly one exchange with the current credential attached.
    async fn send_once(&self, request: &ApiRequest) -> Result<Value, ApiError> {
        let mut authorized = request.clone();
        if let Some(token) = self.store.access_token() {
            authorized = authorized.with_header("Authorization", format!("Bearer {token}"));
        }
        self.transport.send(authorized).await
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("store", &self.store)
            .finish_non_exhaustive()
    }
}

/// Unwraps the response envelope: `data` when present, otherwise the
/// whole body.
fn unwrap_data<T: DeserializeOwned>(body: Value) -> Result<T, ApiError> {
    let payload = match body {
        Value::Object(mut obj) => match obj.remove("data") {
            Some(data) if !data.is_null() => data,
            _ => Value::Object(obj),
        },
        other => other,
    };

    serde_json::from_value(payload).map_err(|err| {
        debug!(error = %err, "response did not match the expected shape");
        ApiError::Unexpected
    })
}
