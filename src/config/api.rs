//! API configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Remote API configuration.
///
/// Only the base URL is configurable; the request timeout and the
/// cross-origin credential policy are fixed constants in the transport.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the portal API (e.g. `https://api.school.example`)
    pub base_url: String,
}

impl ApiConfig {
    /// Validate API configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.base_url.is_empty() {
            return Err(ValidationError::MissingRequired("API__BASE_URL"));
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ValidationError::InvalidBaseUrl);
        }
        Ok(())
    }
}
