//! Campus Portal - Session & Authenticated API Access Layer
//!
//! This crate implements the session-aware API access layer for the campus
//! management portal: schema-validated session state, a normalized HTTP
//! transport, and an authenticated client with refresh-and-replay.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
