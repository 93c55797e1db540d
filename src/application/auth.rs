//! Auth flows - login, refresh, and activation.
//!
//! Flows translate caller input into unauthenticated API calls and hand
//! back the raw auth payload. They do not mutate the session store;
//! feeding the payload into `SessionStore::set_auth_session` is the
//! caller's responsibility, which keeps each flow composable and
//! testable independent of store side effects. The one exception is the
//! client's internal 401 path, which applies the refresh payload itself
//! before replaying.

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::application::{endpoints, ApiClient};
use crate::domain::foundation::SchemaError;
use crate::ports::{ApiError, ApiRequest};

/// Minimum password length accepted by the activation form.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Raw auth payload returned by the login and refresh endpoints.
///
/// Profile and tokens stay as raw JSON here; validation happens when the
/// payload is fed into the session store.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthPayload {
    /// Raw user profile as issued by the server.
    pub profile: Value,
    /// Raw tokens, absent for cookie-only sessions.
    #[serde(default)]
    pub tokens: Option<Value>,
}

/// Login form input.
#[derive(Debug)]
pub struct LoginCredentials {
    /// The student/staff registration number; trimmed before sending.
    pub registration_number: String,
    /// The account password, only exposed at the serialization boundary.
    pub password: Secret<String>,
}

impl LoginCredentials {
    /// Creates credentials from raw form input.
    pub fn new(registration_number: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            registration_number: registration_number.into(),
            password: Secret::new(password.into()),
        }
    }
}

/// Logs in against the portal login endpoint.
///
/// The registration number is trimmed before the request is sent. Returns
/// the raw auth payload; the caller decides whether to commit it to the
/// session store.
///
/// # Errors
///
/// Returns the normalized `ApiError` from the exchange.
pub async fn login_with_portal(
    client: &ApiClient,
    credentials: &LoginCredentials,
) -> Result<AuthPayload, ApiError> {
    let body = json!({
        "registrationNumber": credentials.registration_number.trim(),
        "password": credentials.password.expose_secret(),
    });

    client
        .request_unauthenticated(ApiRequest::post(endpoints::PORTAL_LOGIN).with_body(body))
        .await
}

/// Logs in against the superadmin login endpoint.
///
/// Superadmins authenticate with an email rather than a registration
/// number; otherwise the contract matches the portal login.
///
/// # Errors
///
/// Returns the normalized `ApiError` from the exchange.
pub async fn login_superadmin(
    client: &ApiClient,
    email: &str,
    password: &Secret<String>,
) -> Result<AuthPayload, ApiError> {
    let body = json!({
        "email": email.trim(),
        "password": password.expose_secret(),
    });

    client
        .request_unauthenticated(ApiRequest::post(endpoints::SUPERADMIN_LOGIN).with_body(body))
        .await
}

/// Refreshes the session by exchanging the refresh credential for new
/// tokens.
///
/// Sent unauthenticated so a rejected refresh can never recurse into the
/// client's 401 interception. The stored refresh credential rides in the
/// body when one exists; the session cookie travels either way.
///
/// # Errors
///
/// Returns the normalized `ApiError` from the exchange.
pub async fn refresh_portal_session(client: &ApiClient) -> Result<AuthPayload, ApiError> {
    let mut request = ApiRequest::post(endpoints::SESSION_REFRESH);
    if let Some(refresh) = client
        .store()
        .tokens()
        .as_ref()
        .and_then(|t| t.refresh_token().map(str::to_string))
    {
        request = request.with_body(json!({ "refreshToken": refresh }));
    }

    client.request_unauthenticated(request).await
}

/// Activation form input.
#[derive(Debug)]
pub struct ActivationInput {
    pub email: String,
    pub password: Secret<String>,
}

impl ActivationInput {
    /// Creates activation input from raw form values.
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: Secret::new(password.into()),
        }
    }

    /// Validates the form input.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError` for a malformed email or a password shorter
    /// than [`MIN_PASSWORD_LENGTH`].
    pub fn validate(&self) -> Result<(), SchemaError> {
        if self.email.is_empty() {
            return Err(SchemaError::empty("email"));
        }
        if !self.email.contains('@') {
            return Err(SchemaError::invalid_format("email", "email address"));
        }
        if self.password.expose_secret().chars().count() < MIN_PASSWORD_LENGTH {
            return Err(SchemaError::invalid_format(
                "password",
                "at least 8 characters",
            ));
        }
        Ok(())
    }
}

/// Activates an account.
///
/// Input is validated before any network call; a validation failure is
/// surfaced as `ApiError::Validation` and no request is sent.
///
/// # Errors
///
/// Returns `ApiError::Validation` for bad input, otherwise the normalized
/// error from the exchange.
pub async fn activate_account(
    client: &ApiClient,
    input: &ActivationInput,
) -> Result<Value, ApiError> {
    input.validate()?;

    let body = json!({
        "email": input.email,
        "password": input.password.expose_secret(),
    });

    client
        .request_unauthenticated(ApiRequest::post(endpoints::ACCOUNT_ACTIVATE).with_body(body))
        .await
}
