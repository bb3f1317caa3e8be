//! Persistent Key-Value Storage
//!
//! Login state survives reloads through browser `localStorage`. The session
//! is stored as JSON under `auth-storage`; the bare token is mirrored under
//! `authToken` for request signing.

use std::cell::RefCell;
use std::collections::HashMap;

use crate::error::{ApiError, ApiResult};
use crate::models::AuthSession;

pub const SESSION_KEY: &str = "auth-storage";
pub const TOKEN_KEY: &str = "authToken";

/// Minimal string store
pub trait KeyValueStore {
    fn get(&self, key: &str) -> ApiResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> ApiResult<()>;
    fn remove(&self, key: &str) -> ApiResult<()>;
}

/// `window.localStorage`
pub struct LocalStorage {
    storage: web_sys::Storage,
}

impl LocalStorage {
    pub fn new() -> ApiResult<Self> {
        let window = web_sys::window().ok_or_else(|| ApiError::Storage("no window".to_string()))?;
        let storage = window
            .local_storage()
            .map_err(|e| ApiError::Storage(format!("{:?}", e)))?
            .ok_or_else(|| ApiError::Storage("localStorage unavailable".to_string()))?;
        Ok(Self { storage })
    }
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> ApiResult<Option<String>> {
        self.storage
            .get_item(key)
            .map_err(|e| ApiError::Storage(format!("{:?}", e)))
    }

    fn set(&self, key: &str, value: &str) -> ApiResult<()> {
        self.storage
            .set_item(key, value)
            .map_err(|e| ApiError::Storage(format!("{:?}", e)))
    }

    fn remove(&self, key: &str) -> ApiResult<()> {
        self.storage
            .remove_item(key)
            .map_err(|e| ApiError::Storage(format!("{:?}", e)))
    }
}

/// In-memory store for tests and storage-less environments
#[derive(Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> ApiResult<Option<String>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> ApiResult<()> {
        self.entries.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> ApiResult<()> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

/// Reads and writes the persisted login session
pub struct SessionStore<S: KeyValueStore> {
    backend: S,
}

impl SessionStore<LocalStorage> {
    /// Session store over `localStorage`
    pub fn local() -> ApiResult<Self> {
        Ok(Self::new(LocalStorage::new()?))
    }
}

impl<S: KeyValueStore> SessionStore<S> {
    pub fn new(backend: S) -> Self {
        Self { backend }
    }

    /// Load the saved session. Anything unreadable counts as logged out and
    /// is removed.
    pub fn load(&self) -> Option<AuthSession> {
        let raw = match self.backend.get(SESSION_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                log::warn!("session read failed: {}", e);
                return None;
            }
        };
        match serde_json::from_str::<AuthSession>(&raw) {
            Ok(session) if !session.token.is_empty() => Some(session),
            Ok(_) => {
                self.clear();
                None
            }
            Err(e) => {
                log::warn!("discarding corrupt session: {}", e);
                self.clear();
                None
            }
        }
    }

    pub fn save(&self, session: &AuthSession) -> ApiResult<()> {
        let json = serde_json::to_string(session)?;
        self.backend.set(SESSION_KEY, &json)?;
        self.backend.set(TOKEN_KEY, &session.token)
    }

    /// Remove both keys; failures are logged only
    pub fn clear(&self) {
        for key in [SESSION_KEY, TOKEN_KEY] {
            if let Err(e) = self.backend.remove(key) {
                log::warn!("failed to remove {}: {}", key, e);
            }
        }
    }

    /// Bearer token for outgoing requests
    pub fn token(&self) -> Option<String> {
        self.backend
            .get(TOKEN_KEY)
            .ok()
            .flatten()
            .filter(|t| !t.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AuthUser, UserType};

    fn session() -> AuthSession {
        AuthSession {
            token: "jwt-token".to_string(),
            user: AuthUser {
                user_id: 5,
                email: "org@example.com".to_string(),
                user_name: "희망재단".to_string(),
                user_type: UserType::Organization,
                phone: None,
                profile_image_url: None,
            },
        }
    }

    #[test]
    fn test_save_and_load() {
        let store = SessionStore::new(MemoryStore::new());
        assert_eq!(store.load(), None);

        store.save(&session()).unwrap();
        assert_eq!(store.load(), Some(session()));
        assert_eq!(store.token().as_deref(), Some("jwt-token"));
    }

    #[test]
    fn test_clear_removes_both_keys() {
        let store = SessionStore::new(MemoryStore::new());
        store.save(&session()).unwrap();
        store.clear();
        assert_eq!(store.load(), None);
        assert_eq!(store.token(), None);
    }

    #[test]
    fn test_corrupt_value_is_logged_out() {
        let backend = MemoryStore::new();
        backend.set(SESSION_KEY, "{not json").unwrap();
        backend.set(TOKEN_KEY, "stale").unwrap();

        let store = SessionStore::new(backend);
        assert_eq!(store.load(), None);
        assert_eq!(store.backend.get(SESSION_KEY).unwrap(), None);
        assert_eq!(store.token(), None);
    }

    #[test]
    fn test_empty_token_is_logged_out() {
        let backend = MemoryStore::new();
        let mut s = session();
        s.token = String::new();
        backend.set(SESSION_KEY, &serde_json::to_string(&s).unwrap()).unwrap();

        let store = SessionStore::new(backend);
        assert_eq!(store.load(), None);
    }
}
