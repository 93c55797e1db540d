//! Schema validation errors.
//!
//! Every payload that crosses into the session layer (server responses,
//! rehydrated storage, form input) is validated before construction. A
//! rejection names the offending field so callers can render a useful
//! message without ever seeing the raw payload.

use thiserror::Error;

/// Errors produced when a raw payload fails shape validation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SchemaError {
    /// A required field is absent.
    #[error("Missing required field: {field}")]
    MissingRequired { field: String },

    /// A field is present but has the wrong JSON type.
    #[error("Invalid type for field {field}: expected {expected}")]
    InvalidType { field: String, expected: String },

    /// A required string field is present but empty.
    #[error("Field {field} must not be empty")]
    EmptyField { field: String },

    /// A field does not match its expected format.
    #[error("Invalid format for field {field}: expected {format}")]
    InvalidFormat { field: String, format: String },

    /// A field holds a value outside its known set.
    #[error("Unknown value for field {field}: {value}")]
    UnknownValue { field: String, value: String },

    /// The payload root is not a JSON object.
    #[error("Expected a JSON object for {context}")]
    NotAnObject { context: String },
}

impl SchemaError {
    /// A required field is missing.
    pub fn missing(field: impl Into<String>) -> Self {
        Self::MissingRequired {
            field: field.into(),
        }
    }

    /// A field has the wrong JSON type.
    pub fn invalid_type(field: impl Into<String>, expected: impl Into<String>) -> Self {
        Self::InvalidType {
            field: field.into(),
            expected: expected.into(),
        }
    }

    /// A required string field is empty.
    pub fn empty(field: impl Into<String>) -> Self {
        Self::EmptyField {
            field: field.into(),
        }
    }

    /// A field fails a format check.
    pub fn invalid_format(field: impl Into<String>, format: impl Into<String>) -> Self {
        Self::InvalidFormat {
            field: field.into(),
            format: format.into(),
        }
    }

    /// A field holds an unrecognized value.
    pub fn unknown_value(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::UnknownValue {
            field: field.into(),
            value: value.into(),
        }
    }

    /// The payload root is not an object.
    pub fn not_an_object(context: impl Into<String>) -> Self {
        Self::NotAnObject {
            context: context.into(),
        }
    }
}
