//! Durable client-side storage for the session credentials.
//!
//! Two keys are persisted: the bearer token and the active role. In the
//! browser they live in `localStorage`; elsewhere (SSR, tests) an in-memory
//! map stands in.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::role::Role;

/// Storage key for the bearer token
pub const TOKEN_KEY: &str = "token";

/// Storage key for the active role
pub const ROLE_KEY: &str = "currentRole";

/// Minimal string key/value store.
pub trait SessionStorage: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// Shared handle used by the API client and the session store
pub type SharedStorage = Arc<dyn SessionStorage>;

/// Typed accessors over the two persisted keys.
pub trait CredentialStore {
    fn token(&self) -> Option<String>;
    fn active_role(&self) -> Option<Role>;
    fn save_token(&self, token: &str);
    fn save_role(&self, role: Role);
    /// Erase both keys
    fn wipe(&self);
}

impl<S: SessionStorage + ?Sized> CredentialStore for S {
    fn token(&self) -> Option<String> {
        self.get(TOKEN_KEY).filter(|t| !t.is_empty())
    }

    fn active_role(&self) -> Option<Role> {
        self.get(ROLE_KEY).and_then(|r| Role::parse(&r))
    }

    fn save_token(&self, token: &str) {
        self.set(TOKEN_KEY, token);
    }

    fn save_role(&self, role: Role) {
        self.set(ROLE_KEY, role.as_str());
    }

    fn wipe(&self) {
        self.remove(TOKEN_KEY);
        self.remove(ROLE_KEY);
    }
}

/// In-memory storage (SSR and tests)
#[derive(Debug, Default)]
pub struct MemoryStorage {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }
}

impl SessionStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.values
            .lock()
            .ok()
            .and_then(|values| values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) {
        if let Ok(mut values) = self.values.lock() {
            values.insert(key.to_string(), value.to_string());
        }
    }

    fn remove(&self, key: &str) {
        if let Ok(mut values) = self.values.lock() {
            values.remove(key);
        }
    }
}

/// Browser `localStorage`.
///
/// Holds no handle: the window is looked up on every call, so the type stays
/// `Send + Sync` even though `web_sys::Storage` is not.
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalStorage;

#[cfg(target_arch = "wasm32")]
impl LocalStorage {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window().and_then(|w| w.local_storage().ok().flatten())
    }
}

#[cfg(target_arch = "wasm32")]
impl SessionStorage for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage().and_then(|s| s.get_item(key).ok().flatten())
    }

    fn set(&self, key: &str, value: &str) {
        if let Some(storage) = Self::storage() {
            if storage.set_item(key, value).is_err() {
                tracing::warn!("localStorage rejected write for {}", key);
            }
        }
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = Self::storage() {
            let _ = storage.remove_item(key);
        }
    }
}

/// Platform default storage: `localStorage` in the browser, memory elsewhere.
pub fn default_storage() -> SharedStorage {
    #[cfg(target_arch = "wasm32")]
    {
        Arc::new(LocalStorage)
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        Arc::new(MemoryStorage::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wipe_removes_both_keys() {
        let storage = MemoryStorage::new();
        storage.save_token("t1");
        storage.save_role(Role::Medecin);
        storage.wipe();
        assert_eq!(storage.token(), None);
        assert_eq!(storage.active_role(), None);
        assert_eq!(storage.get(ROLE_KEY), None);
    }

    #[test]
    fn unknown_persisted_role_reads_as_absent() {
        let storage = MemoryStorage::new();
        storage.set(ROLE_KEY, "directeur");
        assert_eq!(storage.active_role(), None);
    }

    #[test]
    fn empty_token_reads_as_absent() {
        let storage = MemoryStorage::new();
        storage.set(TOKEN_KEY, "");
        assert_eq!(storage.token(), None);
    }

    #[test]
    fn roles_persist_under_wire_identifier() {
        let storage = MemoryStorage::new();
        storage.save_role(Role::Secretaire);
        assert_eq!(storage.get(ROLE_KEY).as_deref(), Some("secretaire"));
    }
}
