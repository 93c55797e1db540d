//! Session store errors.

use thiserror::Error;

use crate::domain::foundation::SchemaError;

/// Errors returned by session store mutations.
///
/// A mutation that fails never leaves partial state behind; the prior
/// state is retained unchanged.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SessionError {
    /// The profile payload failed shape validation.
    #[error("Invalid profile payload: {0}")]
    InvalidProfile(SchemaError),

    /// The token payload failed shape validation.
    #[error("Invalid token payload: {0}")]
    InvalidTokens(SchemaError),
}
