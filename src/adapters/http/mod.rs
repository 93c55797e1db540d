//! HTTP adapters - the reqwest transport and a scripted mock for tests.

mod mock;
mod reqwest_transport;

pub use mock::MockTransport;
pub use reqwest_transport::{ReqwestTransport, REQUEST_TIMEOUT};
