//! Application layer - the authenticated client and the flows built on it.

pub mod auth;
pub mod client;
pub mod endpoints;
pub mod install;

pub use auth::{
    activate_account, login_superadmin, login_with_portal, refresh_portal_session,
    ActivationInput, AuthPayload, LoginCredentials,
};
pub use client::ApiClient;
