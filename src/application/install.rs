//! Installation flows - first-run provisioning of the portal.
//!
//! Superadmin signup and school installation run before any session
//! exists, so they go out unauthenticated. Database provisioning happens
//! from the signed-in superadmin dashboard and uses the authenticated
//! path.

use secrecy::{ExposeSecret, Secret};
use serde_json::{json, Value};

use crate::application::{endpoints, ApiClient};
use crate::domain::foundation::SchemaError;
use crate::ports::{ApiError, ApiRequest};

use super::auth::MIN_PASSWORD_LENGTH;

/// Superadmin signup form input.
#[derive(Debug)]
pub struct SuperadminSignup {
    pub name: String,
    pub email: String,
    pub password: Secret<String>,
}

impl SuperadminSignup {
    /// Creates signup input from raw form values.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password: Secret::new(password.into()),
        }
    }

    /// Validates the form input before any network call.
    pub fn validate(&self) -> Result<(), SchemaError> {
        if self.name.trim().is_empty() {
            return Err(SchemaError::empty("name"));
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

/// Creates the first superadmin account.
///
/// # Errors
///
/// Returns `ApiError::Validation` for bad input before any request is
/// sent, otherwise the normalized error from the exchange.
pub async fn create_superadmin(
    client: &ApiClient,
    signup: &SuperadminSignup,
) -> Result<Value, ApiError> {
    signup.validate()?;

    let body = json!({
        "name": signup.name.trim(),
        "email": signup.email,
        "password": signup.password.expose_secret(),
    });

    client
        .request_unauthenticated(ApiRequest::post(endpoints::SUPERADMIN_CREATE).with_body(body))
        .await
}

/// School installation form input.
#[derive(Debug, Clone)]
pub struct SchoolInstallation {
    pub name: String,
    pub address: String,
}

impl SchoolInstallation {
    /// Creates installation input from raw form values.
    pub fn new(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
        }
    }

    /// Validates the form input before any network call.
    pub fn validate(&self) -> Result<(), SchemaError> {
        if self.name.trim().is_empty() {
            return Err(SchemaError::empty("name"));
        }
        Ok(())
    }
}

/// Registers the school during first-run installation.
///
/// # Errors
///
/// Returns `ApiError::Validation` for bad input before any request is
/// sent, otherwise the normalized error from the exchange.
pub async fn install_school(
    client: &ApiClient,
    installation: &SchoolInstallation,
) -> Result<Value, ApiError> {
    installation.validate()?;

    let body = json!({
        "name": installation.name.trim(),
        "address": installation.address,
    });

    client
        .request_unauthenticated(ApiRequest::post(endpoints::SCHOOL_INSTALL).with_body(body))
        .await
}

/// Provisions the tenant database. Requires a signed-in superadmin, so
/// this rides the authenticated path with refresh-and-replay.
///
/// # Errors
///
/// Returns the normalized `ApiError` from the exchange.
pub async fn create_database(client: &ApiClient, name: &str) -> Result<Value, ApiError> {
    client
        .request(ApiRequest::post(endpoints::DATABASE_CREATE).with_body(json!({ "name": name })))
        .await
}
