//! Session aggregate - validated profile, tokens, and the store that owns them.

mod errors;
mod persistence;
mod profile;
mod store;
mod tokens;

pub use errors::SessionError;
pub use persistence::{PersistenceError, SessionPersistence};
pub use profile::{UserProfile, UserRole};
pub use store::{SessionState, SessionStore};
pub use tokens::SessionTokens;
