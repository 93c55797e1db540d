//! Domain layer - session state and the value objects it is built from.

pub mod foundation;
pub mod session;
