//! Foundation types shared across the domain.

mod errors;
mod ids;

pub use errors::SchemaError;
pub use ids::UserId;
