//! Session entity and the operations that mutate it.
//!
//! [`Session`] is a plain value: the UI keeps one inside a signal and hands
//! it to [`SessionStore`] by `&mut` for each operation. The store owns the
//! backend and the persisted storage so that memory and storage never
//! disagree after an operation returns.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::client::{ApiClient, ApiError};
use super::role::{lenient_roles, Role};
use super::storage::{CredentialStore, SessionStorage, SharedStorage, ROLE_KEY};

/// Fallback shown when the server gives no reason for a failed login
pub const LOGIN_FALLBACK_MESSAGE: &str = "Erreur de connexion";

/// Authenticated staff member
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(alias = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub fullname: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(rename = "role", deserialize_with = "lenient_roles", default)]
    pub roles: Vec<Role>,
    #[serde(rename = "isActive", default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl User {
    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    pub fn primary_role(&self) -> Option<Role> {
        self.roles.first().copied()
    }
}

/// `POST /login` success body
#[derive(Clone, Debug, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
}

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum LoginError {
    /// Rehydration has not finished yet
    #[error("Chargement de la session en cours, veuillez patienter")]
    Busy,
    #[error("{0}")]
    Rejected(String),
}

/// Process-wide authentication state.
///
/// Fields are private: `active_role` is only ever set to a member of
/// `user.roles`, and `token`/`user` are set and cleared together.
#[derive(Clone, Debug, PartialEq)]
pub struct Session {
    token: Option<String>,
    user: Option<User>,
    active_role: Option<Role>,
    loading: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Empty session awaiting rehydration
    pub fn new() -> Self {
        Self {
            token: None,
            user: None,
            active_role: None,
            loading: true,
        }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn active_role(&self) -> Option<Role> {
        self.active_role
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// Roles held by the current user (empty when logged out)
    pub fn roles(&self) -> &[Role] {
        self.user.as_ref().map(|u| u.roles.as_slice()).unwrap_or(&[])
    }

    /// Install credentials. The active role becomes `preferred` when the user
    /// holds it, else the user's first role.
    fn establish(&mut self, token: String, user: User, preferred: Option<Role>) {
        self.active_role = preferred
            .filter(|role| user.has_role(*role))
            .or_else(|| user.primary_role());
        self.token = Some(token);
        self.user = Some(user);
    }

    fn clear(&mut self) {
        self.token = None;
        self.user = None;
        self.active_role = None;
    }

    fn finish_loading(&mut self) {
        self.loading = false;
    }
}

/// Remote operations the session depends on.
#[async_trait(?Send)]
pub trait AuthBackend {
    /// `POST /login`
    async fn authenticate(&self, email: &str, password: &str) -> Result<LoginResponse, ApiError>;
    /// `GET /user/profile` with the persisted token
    async fn fetch_profile(&self) -> Result<User, ApiError>;
}

#[async_trait(?Send)]
impl AuthBackend for ApiClient {
    async fn authenticate(&self, email: &str, password: &str) -> Result<LoginResponse, ApiError> {
        self.post("/login", &LoginRequest { email, password }).await
    }

    async fn fetch_profile(&self) -> Result<User, ApiError> {
        self.get_within("/user/profile", self.profile_timeout()).await
    }
}

/// Owns the backend and persisted storage; applies operations to a [`Session`].
#[derive(Clone)]
pub struct SessionStore<B = ApiClient> {
    backend: B,
    storage: SharedStorage,
}

impl<B: AuthBackend> SessionStore<B> {
    pub fn new(backend: B, storage: SharedStorage) -> Self {
        Self { backend, storage }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Rehydrate from persisted storage. Runs once: `loading` is cleared on
    /// every outcome and later calls are ignored.
    pub async fn initialize(&self, session: &mut Session) {
        if !session.is_loading() {
            tracing::debug!("Session already initialized, skipping rehydration");
            return;
        }

        let Some(token) = self.storage.token() else {
            tracing::debug!("No persisted token, starting logged out");
            session.finish_loading();
            return;
        };

        tracing::debug!("Rehydrating session from persisted token");
        match self.backend.fetch_profile().await {
            Ok(user) => {
                let preferred = self.storage.active_role();
                session.establish(token, user, preferred);
                self.persist_role(session.active_role());
                tracing::info!(
                    "Session restored for {} (role: {})",
                    session.user().map(|u| u.email.as_str()).unwrap_or_default(),
                    session.active_role().map(|r| r.as_str()).unwrap_or("none")
                );
            }
            Err(e) => {
                tracing::warn!("Profile fetch failed, clearing session: {}", e);
                self.logout(session);
            }
        }
        session.finish_loading();
    }

    /// Authenticate and install the returned credentials. The session is
    /// untouched on failure.
    pub async fn login(
        &self,
        session: &mut Session,
        email: &str,
        password: &str,
    ) -> Result<User, LoginError> {
        if session.is_loading() {
            return Err(LoginError::Busy);
        }

        let response = self.backend.authenticate(email, password).await.map_err(|e| {
            tracing::warn!("Login failed for {}: {}", email, e);
            LoginError::Rejected(e.user_message(LOGIN_FALLBACK_MESSAGE))
        })?;

        if response.token.is_empty() {
            tracing::warn!("Login for {} returned an empty token", email);
            return Err(LoginError::Rejected(LOGIN_FALLBACK_MESSAGE.to_string()));
        }

        let user = response.user.clone();
        self.storage.save_token(&response.token);
        session.establish(response.token, response.user, None);
        self.persist_role(session.active_role());

        tracing::info!(
            "Logged in as {} (role: {})",
            email,
            session.active_role().map(|r| r.as_str()).unwrap_or("none")
        );
        Ok(user)
    }

    /// Clear memory and storage. Idempotent.
    pub fn logout(&self, session: &mut Session) {
        if session.is_authenticated() {
            tracing::info!("Logging out");
        }
        session.clear();
        self.storage.wipe();
    }

    /// Drop in-memory credentials the 401 handler already wiped from storage.
    /// Returns whether the session was cleared.
    pub fn reconcile(&self, session: &mut Session) -> bool {
        if !session.is_authenticated() || self.storage.token().is_some() {
            return false;
        }
        tracing::info!("Persisted token gone, dropping in-memory session");
        session.clear();
        self.storage.wipe();
        true
    }

    /// Re-read the profile after the user edited it. The active role is kept
    /// when still held. Failures leave the session as it was.
    pub async fn refresh_profile(&self, session: &mut Session) -> Result<(), ApiError> {
        let Some(token) = session.token.clone() else {
            return Ok(());
        };
        let user = self.backend.fetch_profile().await?;
        let preferred = session.active_role();
        session.establish(token, user, preferred);
        self.persist_role(session.active_role());
        Ok(())
    }

    /// Make `role` active if the user holds it. Returns whether the switch happened.
    pub fn switch_role(&self, session: &mut Session, role: Role) -> bool {
        let held = session.user().is_some_and(|u| u.has_role(role));
        if !held {
            tracing::debug!("Rejected switch to role {} not held by user", role);
            return false;
        }
        session.active_role = Some(role);
        self.storage.save_role(role);
        tracing::info!("Active role switched to {}", role);
        true
    }

    fn persist_role(&self, role: Option<Role>) {
        match role {
            Some(role) => self.storage.save_role(role),
            None => self.storage.remove(ROLE_KEY),
        }
    }
}
