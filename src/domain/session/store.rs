//! Session store - the single writer for client-side session state.
//!
//! The store owns the `{profile, tokens, pending_email}` aggregate for the
//! running process. It is an explicit, injectable object constructed at the
//! composition root and passed by reference to the API client and to
//! presentation code; there is no ambient singleton, so tests construct
//! isolated instances.
//!
//! All mutations are synchronous and atomic from the caller's perspective:
//! a reader never observes a partially-applied update. Raw payloads are
//! validated before they are committed; a payload that fails validation
//! leaves the prior state untouched.

use std::sync::{Arc, RwLock};

use serde_json::{Map, Value};
use tracing::{debug, warn};

use super::{SessionError, SessionPersistence, SessionTokens, UserProfile};

/// A point-in-time snapshot of the session aggregate.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    /// The validated profile of the signed-in user, if any.
    pub profile: Option<UserProfile>,
    /// The credentials associated with the session, if any.
    pub tokens: Option<SessionTokens>,
    /// An email address awaiting verification, independent of the profile.
    pub pending_email: Option<String>,
}

/// Process-wide session state with validated mutations.
pub struct SessionStore {
    state: RwLock<SessionState>,
    persistence: Option<Arc<dyn SessionPersistence>>,
}

impl SessionStore {
    /// Creates an empty store with no persistence.
    pub fn new() -> Self {
        Self {
            state: RwLock::new(SessionState::default()),
            persistence: None,
        }
    }

    /// Creates a store backed by the given persistence and rehydrates
    /// from it.
    ///
    /// A persisted snapshot is untrusted input: it is passed back through
    /// shape validation, and a snapshot that fails validation is discarded
    /// (and removed from storage) rather than crashing or being accepted.
    pub fn with_persistence(persistence: Arc<dyn SessionPersistence>) -> Self {
        let store = Self {
            state: RwLock::new(SessionState::default()),
            persistence: Some(persistence),
        };
        store.rehydrate();
        store
    }

    /// Replaces the session with a validated profile and, optionally,
    /// validated tokens.
    ///
    /// Omitted tokens clear any existing tokens: a login response without
    /// credentials is treated as a session without credentials.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if either payload fails validation; the
    /// store is not updated in that case.
    pub fn set_auth_session(
        &self,
        profile: &Value,
        tokens: Option<&Value>,
    ) -> Result<(), SessionError> {
        let profile = UserProfile::parse(profile).map_err(SessionError::InvalidProfile)?;
        let tokens = tokens
            .map(SessionTokens::parse)
            .transpose()
            .map_err(SessionError::InvalidTokens)?;

        let mut state = self.write_lock();
        debug!(user_id = %profile.id(), "session established");
        state.profile = Some(profile);
        state.tokens = tokens;
        self.persist(&state);
        Ok(())
    }

    /// Merges a partial update onto the current profile.
    ///
    /// Deliberately a no-op, not an error, when there is no current
    /// profile or when the merged result fails validation (for example,
    /// an update that nulls out the email). Partial updates can race with
    /// logout; the defensive default keeps the store consistent.
    pub fn update_profile(&self, partial: &Value) {
        let mut state = self.write_lock();
        let Some(current) = &state.profile else {
            debug!("profile update ignored: no current profile");
            return;
        };
        match current.merged_with(partial) {
            Ok(merged) => {
                state.profile = Some(merged);
                self.persist(&state);
            }
            Err(reason) => {
                debug!(%reason, "profile update ignored: merged result invalid");
            }
        }
    }

    /// Sets or clears the email awaiting verification.
    pub fn set_pending_email(&self, email: Option<String>) {
        self.write_lock().pending_email = email;
    }

    /// Clears profile, tokens, and pending email in one step, and removes
    /// the persisted snapshot.
    pub fn clear_auth(&self) {
        let mut state = self.write_lock();
        *state = SessionState::default();
        if let Some(persistence) = &self.persistence {
            if let Err(reason) = persistence.clear() {
                warn!(%reason, "failed to clear persisted session");
            }
        }
    }

    /// Returns a snapshot of the whole aggregate.
    pub fn snapshot(&self) -> SessionState {
        self.read_lock().clone()
    }

    /// Returns the current profile, if any.
    pub fn profile(&self) -> Option<UserProfile> {
        self.read_lock().profile.clone()
    }

    /// Returns the current tokens, if any.
    pub fn tokens(&self) -> Option<SessionTokens> {
        self.read_lock().tokens.clone()
    }

    /// Returns the current access credential, if any.
    pub fn access_token(&self) -> Option<String> {
        self.read_lock()
            .tokens
            .as_ref()
            .map(|t| t.access_token().to_string())
    }

    /// Returns the email awaiting verification, if any.
    pub fn pending_email(&self) -> Option<String> {
        self.read_lock().pending_email.clone()
    }

    /// Returns true if a profile is present.
    pub fn is_authenticated(&self) -> bool {
        self.read_lock().profile.is_some()
    }

    /// Loads and validates the persisted snapshot, discarding it when
    /// malformed.
    fn rehydrate(&self) {
        let Some(persistence) = &self.persistence else {
            return;
        };

        let snapshot = match persistence.load() {
            Ok(Some(snapshot)) => snapshot,
            Ok(None) => return,
            Err(reason) => {
                warn!(%reason, "failed to load persisted session");
                return;
            }
        };

        match Self::parse_snapshot(&snapshot) {
            Ok((profile, tokens)) => {
                let mut state = self.write_lock();
                debug!(user_id = %profile.id(), "session rehydrated");
                state.profile = Some(profile);
                state.tokens = tokens;
            }
            Err(reason) => {
                warn!(%reason, "discarding invalid persisted session");
                if let Err(reason) = persistence.clear() {
                    warn!(%reason, "failed to clear persisted session");
                }
            }
        }
    }

    /// Validates a persisted `{profile, tokens?}` snapshot.
    fn parse_snapshot(
        snapshot: &Value,
    ) -> Result<(UserProfile, Option<SessionTokens>), SessionError> {
        let profile = snapshot.get("profile").unwrap_or(&Value::Null);
        let profile = UserProfile::parse(profile).map_err(SessionError::InvalidProfile)?;
        let tokens = match snapshot.get("tokens") {
            None | Some(Value::Null) => None,
            Some(tokens) => {
                Some(SessionTokens::parse(tokens).map_err(SessionError::InvalidTokens)?)
            }
        };
        Ok((profile, tokens))
    }

    /// Writes the persisted subset (profile and tokens, never the pending
    /// email). Persistence failures are logged, not surfaced: a failed
    /// write must not fail the mutation.
    fn persist(&self, state: &SessionState) {
        let Some(persistence) = &self.persistence else {
            return;
        };

        let mut snapshot = Map::new();
        if let Some(profile) = &state.profile {
            snapshot.insert("profile".to_string(), profile.to_value());
        }
        if let Some(tokens) = &state.tokens {
            snapshot.insert("tokens".to_string(), tokens.to_value());
        }

        if let Err(reason) = persistence.save(&Value::Object(snapshot)) {
            warn!(%reason, "failed to persist session");
        }
    }

    fn read_lock(&self) -> std::sync::RwLockReadGuard<'_, SessionState> {
        self.state.read().expect("session store lock poisoned")
    }

    fn write_lock(&self) -> std::sync::RwLockWriteGuard<'_, SessionState> {
        self.state.write().expect("session store lock poisoned")
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.read_lock();
        f.debug_struct("SessionStore")
            .field("authenticated", &state.profile.is_some())
            .field("has_tokens", &state.tokens.is_some())
            .field("pending_email", &state.pending_email)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn profile_payload() -> Value {
        json!({
            "id": "usr-1",
            "email": "amina@school.example",
            "role": "student",
            "registrationNumber": "A123"
        })
    }

    fn token_payload() -> Value {
        json!({"access_token": "at-1", "refresh_token": "rt-1"})
    }

    #[test]
    fn set_auth_session_stores_validated_profile_and_tokens() {
        let store = SessionStore::new();
        store
            .set_auth_session(&profile_payload(), Some(&token_payload()))
            .unwrap();

        let profile = store.profile().unwrap();
        assert_eq!(profile.email(), "amina@school.example");
        assert_eq!(store.access_token().as_deref(), Some("at-1"));
        assert!(store.is_authenticated());
    }

    #[test]
    fn set_auth_session_without_tokens_clears_existing_tokens() {
        let store = SessionStore::new();
        store
            .set_auth_session(&profile_payload(), Some(&token_payload()))
            .unwrap();

        store.set_auth_session(&profile_payload(), None).unwrap();
        assert!(store.tokens().is_none());
        assert!(store.is_authenticated());
    }

    #[test]
    fn set_auth_session_rejects_invalid_profile_and_keeps_prior_state() {
        let store = SessionStore::new();
        store
            .set_auth_session(&profile_payload(), Some(&token_payload()))
            .unwrap();

        let result = store.set_auth_session(&json!({"id": "usr-2"}), None);
        assert!(matches!(result, Err(SessionError::InvalidProfile(_))));

        // Prior session untouched.
        assert_eq!(store.profile().unwrap().id().as_str(), "usr-1");
        assert_eq!(store.access_token().as_deref(), Some("at-1"));
    }

    #[test]
    fn set_auth_session_rejects_invalid_tokens_and_keeps_prior_state() {
        let store = SessionStore::new();
        let result =
            store.set_auth_session(&profile_payload(), Some(&json!({"access_token": 9})));
        assert!(matches!(result, Err(SessionError::InvalidTokens(_))));
        assert!(!store.is_authenticated());
    }

    #[test]
    fn update_profile_without_current_profile_is_noop() {
        let store = SessionStore::new();
        store.update_profile(&json!({"name": "X"}));
        assert!(store.profile().is_none());
    }

    #[test]
    fn update_profile_merges_and_keeps_extras() {
        let store = SessionStore::new();
        store.set_auth_session(&profile_payload(), None).unwrap();

        store.update_profile(&json!({"name": "Amina B."}));
        let profile = store.profile().unwrap();
        assert_eq!(profile.name(), Some("Amina B."));
        assert_eq!(
            profile.extra_field("registrationNumber"),
            Some(&json!("A123"))
        );
    }

    #[test]
    fn update_profile_removing_email_is_noop() {
        let store = SessionStore::new();
        store.set_auth_session(&profile_payload(), None).unwrap();

        store.update_profile(&json!({"name": "X", "email": null}));
        let profile = store.profile().unwrap();
        assert_eq!(profile.email(), "amina@school.example");
        assert_eq!(profile.name(), None);
    }

    #[test]
    fn set_pending_email_is_independent_of_profile() {
        let store = SessionStore::new();
        store.set_pending_email(Some("new@school.example".to_string()));
        assert_eq!(
            store.pending_email().as_deref(),
            Some("new@school.example")
        );
        store.set_pending_email(None);
        assert!(store.pending_email().is_none());
    }

    #[test]
    fn clear_auth_resets_everything() {
        let store = SessionStore::new();
        store
            .set_auth_session(&profile_payload(), Some(&token_payload()))
            .unwrap();
        store.set_pending_email(Some("new@school.example".to_string()));

        store.clear_auth();

        let state = store.snapshot();
        assert!(state.profile.is_none());
        assert!(state.tokens.is_none());
        assert!(state.pending_email.is_none());
    }

    #[test]
    fn clear_auth_on_empty_store_is_fine() {
        let store = SessionStore::new();
        store.clear_auth();
        assert!(!store.is_authenticated());
    }
}
