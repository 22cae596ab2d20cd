//! Authentication core: API client, persisted session and role gating.
//!
//! Data flows one way: [`SessionStore`] rehydrates a [`Session`] through the
//! [`ApiClient`], and the [`access`] table reads the session to decide what
//! the dashboard shows. Pages only ever talk to the backend through
//! [`ApiClient`].

pub mod access;
pub mod client;
pub mod role;
pub mod session;
pub mod storage;

pub use access::{allows, gate, is_active, is_dashboard_path, menu_for, GateDecision, MenuEntry};
pub use client::{ApiClient, ApiError, Navigator};
pub use role::Role;
pub use session::{AuthBackend, LoginError, Session, SessionStore, User};
pub use storage::{CredentialStore, MemoryStorage, SessionStorage, SharedStorage};
