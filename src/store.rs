//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity. Holds the login
//! session; every change is written through to [`SessionStore`].

use leptos::prelude::*;
use reactive_stores::Store;

use crate::models::{AuthSession, AuthUser, AuthUserPatch, UserType};
use crate::storage::{KeyValueStore, SessionStore};

/// Global application state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// Logged-in user and token, `None` when logged out
    pub session: Option<AuthSession>,
}

impl AppState {
    /// Restore from persisted storage
    pub fn restore<S: KeyValueStore>(persist: &SessionStore<S>) -> Self {
        Self { session: persist.load() }
    }

    pub fn login<S: KeyValueStore>(&mut self, token: String, user: AuthUser, persist: &SessionStore<S>) {
        let session = AuthSession { token, user };
        if let Err(e) = persist.save(&session) {
            log::warn!("session not persisted: {}", e);
        }
        self.session = Some(session);
    }

    pub fn logout<S: KeyValueStore>(&mut self, persist: &SessionStore<S>) {
        persist.clear();
        self.session = None;
    }

    /// Apply a profile edit to the stored user; no-op when logged out
    pub fn update_user<S: KeyValueStore>(&mut self, patch: AuthUserPatch, persist: &SessionStore<S>) {
        if let Some(session) = self.session.as_mut() {
            session.user.apply(patch);
            if let Err(e) = persist.save(session) {
                log::warn!("session not persisted: {}", e);
            }
        }
    }

    pub fn is_logged_in(&self) -> bool {
        self.session.is_some()
    }

    pub fn user_type(&self) -> Option<UserType> {
        self.session.as_ref().map(|s| s.user.user_type)
    }

    pub fn user(&self) -> Option<&AuthUser> {
        self.session.as_ref().map(|s| &s.user)
    }
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

// ========================
// Store Helper Functions
// ========================

/// Run a state transition against a detached copy, then publish it
fn store_transition(store: &AppStore, f: impl FnOnce(&mut AppState)) {
    let mut state = AppState { session: store.session().get_untracked() };
    f(&mut state);
    *store.session().write() = state.session;
}

/// Log in and persist to localStorage
pub fn store_login(store: &AppStore, token: String, user: AuthUser) {
    match SessionStore::local() {
        Ok(persist) => store_transition(store, |state| state.login(token, user, &persist)),
        Err(e) => {
            log::warn!("localStorage unavailable, session kept in memory: {}", e);
            *store.session().write() = Some(AuthSession { token, user });
        }
    }
}

/// Log out and clear localStorage
pub fn store_logout(store: &AppStore) {
    match SessionStore::local() {
        Ok(persist) => store_transition(store, |state| state.logout(&persist)),
        Err(_) => *store.session().write() = None,
    }
}

/// Update the logged-in user after a profile edit
pub fn store_update_user(store: &AppStore, patch: AuthUserPatch) {
    match SessionStore::local() {
        Ok(persist) => store_transition(store, |state| state.update_user(patch, &persist)),
        Err(_) => {
            if let Some(session) = store.session().write().as_mut() {
                session.user.apply(patch);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn user(user_type: UserType) -> AuthUser {
        AuthUser {
            user_id: 1,
            email: "admin@example.com".to_string(),
            user_name: "관리자".to_string(),
            user_type,
            phone: None,
            profile_image_url: None,
        }
    }

    #[test]
    fn test_login_persists_and_restores() {
        let persist = SessionStore::new(MemoryStore::new());
        let mut state = AppState::restore(&persist);
        assert!(!state.is_logged_in());

        state.login("t1".to_string(), user(UserType::Admin), &persist);
        assert_eq!(state.user_type(), Some(UserType::Admin));

        let restored = AppState::restore(&persist);
        assert!(restored.is_logged_in());
        assert_eq!(restored.session.unwrap().token, "t1");
    }

    #[test]
    fn test_logout_clears_storage() {
        let persist = SessionStore::new(MemoryStore::new());
        let mut state = AppState::default();
        state.login("t1".to_string(), user(UserType::Individual), &persist);
        state.logout(&persist);

        assert!(!state.is_logged_in());
        assert_eq!(state.user_type(), None);
        assert!(!AppState::restore(&persist).is_logged_in());
    }

    #[test]
    fn test_update_user_written_through() {
        let persist = SessionStore::new(MemoryStore::new());
        let mut state = AppState::default();
        state.update_user(AuthUserPatch { user_name: Some("무시됨".to_string()), ..Default::default() }, &persist);
        assert!(!state.is_logged_in());

        state.login("t1".to_string(), user(UserType::Individual), &persist);
        state.update_user(AuthUserPatch { user_name: Some("새이름".to_string()), ..Default::default() }, &persist);
        assert_eq!(state.user().unwrap().user_name, "새이름");
        assert_eq!(AppState::restore(&persist).user().unwrap().user_name, "새이름");
    }
}
