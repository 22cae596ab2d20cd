//! Session context shared by every page.
//!
//! Holds the reactive [`Session`] and the [`SessionStore`] that mutates it.
//! Rehydration only runs in the browser; server renders always see a loading
//! session and therefore the loading chrome.

use dioxus::prelude::*;

use crate::auth::client::default_navigator;
use crate::auth::storage::default_storage;
use crate::auth::{ApiClient, ApiError, LoginError, Role, Session, SessionStore, User};
use crate::config::AppConfig;

/// Global auth state shared via context
#[derive(Clone, Copy)]
pub struct AuthContext {
    pub session: Signal<Session>,
    store: Signal<SessionStore>,
}

impl AuthContext {
    /// Client for page data requests
    pub fn api(&self) -> ApiClient {
        self.store.peek().backend().clone()
    }

    pub fn user(&self) -> Option<User> {
        self.session.read().user().cloned()
    }

    pub fn active_role(&self) -> Option<Role> {
        self.session.read().active_role()
    }

    /// Log in against the backend. The session is swapped in only once the
    /// request completes, so readers never observe a half-applied login.
    pub async fn login(&self, email: String, password: String) -> Result<User, LoginError> {
        let store = self.store.peek().clone();
        let mut draft = self.session.peek().clone();
        let result = store.login(&mut draft, &email, &password).await;
        if result.is_ok() {
            let mut session = self.session;
            session.set(draft);
        }
        result
    }

    /// Reload the user from `GET /user/profile` after an edit.
    pub async fn refresh_profile(&self) -> Result<(), ApiError> {
        let store = self.store.peek().clone();
        let mut draft = self.session.peek().clone();
        store.refresh_profile(&mut draft).await?;
        let mut session = self.session;
        session.set(draft);
        Ok(())
    }

    pub fn logout(&self) {
        let store = self.store.peek().clone();
        let mut session = self.session;
        store.logout(&mut session.write());
    }

    /// Follow a forced logout that happened underneath the session.
    pub fn reconcile(&self) {
        let store = self.store.peek().clone();
        let mut draft = self.session.peek().clone();
        if store.reconcile(&mut draft) {
            let mut session = self.session;
            session.set(draft);
        }
    }

    pub fn switch_role(&self, role: Role) -> bool {
        let store = self.store.peek().clone();
        let mut session = self.session;
        let switched = store.switch_role(&mut session.write(), role);
        switched
    }
}

/// Initialize auth context provider - call once at app root
pub fn use_auth_provider() {
    let store = use_signal(|| {
        let storage = default_storage();
        let client = ApiClient::new(&AppConfig::current(), storage.clone(), default_navigator());
        SessionStore::new(client, storage)
    });
    let session = use_signal(Session::new);

    let ctx = AuthContext { session, store };
    use_context_provider(|| ctx);

    // Client-side only: rehydrate from localStorage once
    #[cfg(target_arch = "wasm32")]
    {
        use_effect(move || {
            spawn(async move {
                let store = store.peek().clone();
                let mut draft = session.peek().clone();
                store.initialize(&mut draft).await;
                let mut session = session;
                session.set(draft);
            });
        });
    }
}

/// Get auth context - use in any component
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>()
}

/// Shorthand for the API client of the auth context
pub fn use_api() -> ApiClient {
    use_auth().api()
}
