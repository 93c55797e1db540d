//! Session token value object.
//!
//! Tokens are opaque strings issued by the server. The only shape
//! requirement is a present, non-empty access token; the refresh token
//! is optional. Tokens are replaced wholesale on refresh, never patched.

use serde_json::{Map, Value};

use crate::domain::foundation::SchemaError;

/// Validated session credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionTokens {
    access_token: String,
    refresh_token: Option<String>,
}

impl SessionTokens {
    /// Validates a raw payload and constructs tokens from it.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError` if the payload is not an object, the access
    /// token is missing, empty, or not a string, or the refresh token is
    /// present but not a string.
    pub fn parse(value: &Value) -> Result<Self, SchemaError> {
        let obj = value
            .as_object()
            .ok_or_else(|| SchemaError::not_an_object("tokens"))?;

        let access_token = require_token(obj, "access_token")?;

        let refresh_token = match obj.get("refresh_token") {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) if s.is_empty() => {
                return Err(SchemaError::empty("refresh_token"))
            }
            Some(Value::String(s)) => Some(s.clone()),
            Some(_) => return Err(SchemaError::invalid_type("refresh_token", "string")),
        };

        Ok(Self {
            access_token,
            refresh_token,
        })
    }

    /// Returns the access credential.
    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    /// Returns the refresh credential if one was issued.
    pub fn refresh_token(&self) -> Option<&str> {
        self.refresh_token.as_deref()
    }

    /// Serializes the tokens back to their canonical JSON object.
    pub fn to_value(&self) -> Value {
        let mut obj = Map::new();
        obj.insert(
            "access_token".to_string(),
            Value::String(self.access_token.clone()),
        );
        if let Some(refresh) = &self.refresh_token {
            obj.insert("refresh_token".to_string(), Value::String(refresh.clone()));
        }
        Value::Object(obj)
    }
}

fn require_token(obj: &Map<String, Value>, field: &str) -> Result<String, SchemaError> {
    match obj.get(field) {
        None | Some(Value::Null) => Err(SchemaError::missing(field)),
        Some(Value::String(s)) if s.is_empty() => Err(SchemaError::empty(field)),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(SchemaError::invalid_type(field, "string")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parse_accepts_access_and_refresh() {
        let tokens =
            SessionTokens::parse(&json!({"access_token": "at-1", "refresh_token": "rt-1"}))
                .unwrap();
        assert_eq!(tokens.access_token(), "at-1");
        assert_eq!(tokens.refresh_token(), Some("rt-1"));
    }

    #[test]
    fn parse_accepts_missing_refresh_token() {
        let tokens = SessionTokens::parse(&json!({"access_token": "at-1"})).unwrap();
        assert_eq!(tokens.refresh_token(), None);
    }

    #[test]
    fn parse_rejects_missing_access_token() {
        assert_eq!(
            SessionTokens::parse(&json!({"refresh_token": "rt-1"})),
            Err(SchemaError::missing("access_token"))
        );
    }

    #[test]
    fn parse_rejects_empty_access_token() {
        assert_eq!(
            SessionTokens::parse(&json!({"access_token": ""})),
            Err(SchemaError::empty("access_token"))
        );
    }

    #[test]
    fn parse_rejects_numeric_access_token() {
        assert_eq!(
            SessionTokens::parse(&json!({"access_token": 7})),
            Err(SchemaError::invalid_type("access_token", "string"))
        );
    }

    #[test]
    fn parse_rejects_non_object_payload() {
        assert_eq!(
            SessionTokens::parse(&json!(["at-1"])),
            Err(SchemaError::not_an_object("tokens"))
        );
    }

    #[test]
    fn to_value_omits_absent_refresh_token() {
        let tokens = SessionTokens::parse(&json!({"access_token": "at-1"})).unwrap();
        assert_eq!(tokens.to_value(), json!({"access_token": "at-1"}));
    }
}
