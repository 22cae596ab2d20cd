//! Session and API client integration tests
//!
//! Runs the real [`ApiClient`] and [`SessionStore`] against a mock clinic
//! backend over HTTP. These tests verify:
//! - Credentials headers on every outbound call
//! - Forced logout and redirect on HTTP 401
//! - Login, rehydration and role switching end to end

mod mock_servers;

use std::sync::{Arc, Mutex};

use cmc_portal::auth::storage::{ROLE_KEY, TOKEN_KEY};
use cmc_portal::auth::{
    gate, ApiClient, ApiError, CredentialStore, GateDecision, LoginError, MemoryStorage, Navigator,
    Role, Session, SessionStorage, SessionStore, SharedStorage,
};
use cmc_portal::clinic::Patient;
use cmc_portal::config::AppConfig;
use mock_servers::MockClinicApi;
use serde_json::json;

// =============================================================================
// Test utilities
// =============================================================================

/// Navigator that remembers every redirect
#[derive(Default)]
struct RecordingNavigator {
    redirects: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    fn redirects(&self) -> Vec<String> {
        self.redirects.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn redirect(&self, path: &str) {
        self.redirects.lock().unwrap().push(path.to_string());
    }
}

struct Harness {
    server: MockClinicApi,
    storage: Arc<MemoryStorage>,
    navigator: Arc<RecordingNavigator>,
    store: SessionStore,
}

impl Harness {
    async fn start() -> Self {
        let server = MockClinicApi::start().await;
        let storage = MemoryStorage::shared();
        let navigator = Arc::new(RecordingNavigator::default());
        let config = AppConfig {
            api_base_url: server.base_url(),
            ..AppConfig::default()
        };
        let shared: SharedStorage = storage.clone();
        let client = ApiClient::new(&config, shared.clone(), navigator.clone());
        let store = SessionStore::new(client, shared);
        Self {
            server,
            storage,
            navigator,
            store,
        }
    }

    fn api(&self) -> &ApiClient {
        self.store.backend()
    }

    /// Session past rehydration with nothing persisted
    async fn fresh_session(&self) -> Session {
        let mut session = Session::new();
        self.store.initialize(&mut session).await;
        session
    }
}

// =============================================================================
// API client
// =============================================================================

mod api_client {
    use super::*;

    #[tokio::test]
    async fn attaches_token_and_role_headers() {
        let h = Harness::start().await;
        h.storage.save_token(&h.server.valid_token().await);
        h.storage.save_role(Role::Secretaire);

        let patients: Vec<Patient> = h.api().list("/patients").await.unwrap();
        assert_eq!(patients.len(), 1);
        assert_eq!(patients[0].id, "p1");

        let requests = h.server.requests().await;
        let last = requests.last().unwrap();
        assert_eq!(last.path, "/api/patients");
        assert_eq!(last.authorization.as_deref(), Some("Bearer t1"));
        assert_eq!(last.current_role.as_deref(), Some("secretaire"));

        h.server.stop().await;
    }

    #[tokio::test]
    async fn sends_no_credentials_when_nothing_is_stored() {
        let h = Harness::start().await;

        let err = h.api().list::<Patient>("/patients").await.unwrap_err();
        assert!(err.is_auth_expired());

        let requests = h.server.requests().await;
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].authorization, None);
        assert_eq!(requests[0].current_role, None);

        h.server.stop().await;
    }

    #[tokio::test]
    async fn unauthorized_wipes_storage_and_redirects_home() {
        let h = Harness::start().await;
        h.storage.save_token("stale");
        h.storage.save_role(Role::Medecin);

        let err = h.api().list::<Patient>("/patients").await.unwrap_err();

        assert_eq!(
            err,
            ApiError::AuthExpired {
                message: Some("Token invalide ou expiré".into())
            }
        );
        assert_eq!(h.storage.get(TOKEN_KEY), None);
        assert_eq!(h.storage.get(ROLE_KEY), None);
        assert_eq!(h.navigator.redirects(), vec!["/".to_string()]);

        h.server.stop().await;
    }

    #[tokio::test]
    async fn other_errors_keep_credentials_and_carry_server_message() {
        let h = Harness::start().await;
        h.storage.save_token("t1");

        let err = h.api().get::<serde_json::Value>("/broken").await.unwrap_err();

        assert_eq!(err.status(), Some(500));
        assert_eq!(err.user_message("Erreur"), "Erreur serveur");
        assert_eq!(h.storage.token().as_deref(), Some("t1"));
        assert!(h.navigator.redirects().is_empty());

        h.server.stop().await;
    }

    #[tokio::test]
    async fn missing_endpoint_uses_fallback_message() {
        let h = Harness::start().await;

        let err = h.api().get::<serde_json::Value>("/nowhere").await.unwrap_err();

        assert_eq!(err.status(), Some(404));
        assert_eq!(err.user_message("Erreur lors du chargement"), "Erreur lors du chargement");

        h.server.stop().await;
    }
}

// =============================================================================
// Session lifecycle
// =============================================================================

mod session_lifecycle {
    use super::*;

    #[tokio::test]
    async fn login_selects_first_role_and_persists_it() {
        let h = Harness::start().await;
        let mut session = h.fresh_session().await;

        let user = h
            .store
            .login(&mut session, "doc@x.com", "secret")
            .await
            .unwrap();

        assert_eq!(user.roles, vec![Role::Medecin, Role::Secretaire]);
        assert_eq!(session.active_role(), Some(Role::Medecin));
        assert_eq!(session.token(), Some("t1"));
        assert_eq!(h.storage.get(TOKEN_KEY).as_deref(), Some("t1"));
        assert_eq!(h.storage.get(ROLE_KEY).as_deref(), Some("medecin"));

        h.server.stop().await;
    }

    #[tokio::test]
    async fn rejected_login_reports_server_message_and_leaves_session() {
        let h = Harness::start().await;
        let mut session = h.fresh_session().await;

        let err = h
            .store
            .login(&mut session, "doc@x.com", "wrong")
            .await
            .unwrap_err();

        assert_eq!(
            err,
            LoginError::Rejected("Email ou mot de passe incorrect".into())
        );
        assert!(!session.is_authenticated());
        assert_eq!(h.storage.token(), None);

        h.server.stop().await;
    }

    #[tokio::test]
    async fn rehydration_with_expired_token_ends_logged_out() {
        let h = Harness::start().await;
        h.storage.save_token("expired");
        h.storage.save_role(Role::Medecin);

        let mut session = Session::new();
        h.store.initialize(&mut session).await;

        assert!(!session.is_loading());
        assert_eq!(session.user(), None);
        assert_eq!(session.token(), None);
        assert_eq!(h.storage.token(), None);

        h.server.stop().await;
    }

    #[tokio::test]
    async fn rehydration_restores_saved_role() {
        let h = Harness::start().await;
        h.storage.save_token("t1");
        h.storage.save_role(Role::Secretaire);

        let mut session = Session::new();
        h.store.initialize(&mut session).await;

        assert!(session.is_authenticated());
        assert_eq!(session.active_role(), Some(Role::Secretaire));

        let profile_call = h.server.requests().await.pop().unwrap();
        assert_eq!(profile_call.path, "/api/user/profile");
        assert_eq!(profile_call.authorization.as_deref(), Some("Bearer t1"));

        h.server.stop().await;
    }

    #[tokio::test]
    async fn switching_to_a_role_not_held_is_refused() {
        let h = Harness::start().await;
        let mut session = h.fresh_session().await;
        h.store
            .login(&mut session, "doc@x.com", "secret")
            .await
            .unwrap();

        assert!(!h.store.switch_role(&mut session, Role::Comptable));
        assert_eq!(session.active_role(), Some(Role::Medecin));

        assert!(h.store.switch_role(&mut session, Role::Secretaire));
        assert_eq!(h.storage.get(ROLE_KEY).as_deref(), Some("secretaire"));

        h.server.stop().await;
    }

    #[tokio::test]
    async fn profile_refresh_picks_up_edits() {
        let h = Harness::start().await;
        let mut session = h.fresh_session().await;
        h.store
            .login(&mut session, "doc@x.com", "secret")
            .await
            .unwrap();
        h.store.switch_role(&mut session, Role::Secretaire);

        h.server
            .set_profile(json!({
                "_id": "u1",
                "fullname": "Dr Ali Mze",
                "email": "doc@x.com",
                "role": ["medecin", "secretaire"]
            }))
            .await;
        h.store.refresh_profile(&mut session).await.unwrap();

        assert_eq!(session.user().unwrap().fullname, "Dr Ali Mze");
        assert_eq!(session.active_role(), Some(Role::Secretaire));

        h.server.stop().await;
    }

    #[tokio::test]
    async fn server_side_expiry_forces_logout_on_next_call() {
        let h = Harness::start().await;
        let mut session = h.fresh_session().await;
        h.store
            .login(&mut session, "doc@x.com", "secret")
            .await
            .unwrap();

        h.server.expire_tokens().await;
        let err = h.api().list::<Patient>("/patients").await.unwrap_err();

        assert!(err.is_auth_expired());
        assert_eq!(h.storage.token(), None);
        assert_eq!(h.navigator.redirects(), vec!["/".to_string()]);

        h.server.stop().await;
    }

    #[tokio::test]
    async fn forced_logout_reaches_the_in_memory_session() {
        let h = Harness::start().await;
        let mut session = h.fresh_session().await;
        h.store
            .login(&mut session, "doc@x.com", "secret")
            .await
            .unwrap();

        h.server.expire_tokens().await;
        h.api().list::<Patient>("/patients").await.unwrap_err();
        assert!(session.is_authenticated());

        assert!(h.store.reconcile(&mut session));
        assert!(!session.is_authenticated());
        assert_eq!(session.token(), None);
        assert_eq!(session.active_role(), None);
        assert_eq!(gate(&session, "/dashboard"), GateDecision::Redirect("/"));

        assert!(!h.store.reconcile(&mut session));

        h.server.stop().await;
    }

    #[tokio::test]
    async fn reconcile_keeps_a_live_session() {
        let h = Harness::start().await;
        let mut session = h.fresh_session().await;
        h.store
            .login(&mut session, "doc@x.com", "secret")
            .await
            .unwrap();

        assert!(!h.store.reconcile(&mut session));
        assert_eq!(session.active_role(), Some(Role::Medecin));

        h.server.stop().await;
    }
}

// =============================================================================
// Dashboard gate
// =============================================================================

mod dashboard_gate {
    use super::*;

    #[test]
    fn dashboard_waits_while_session_loads() {
        let session = Session::new();
        assert_eq!(gate(&session, "/dashboard/patients"), GateDecision::Loading);
    }

    #[tokio::test]
    async fn anonymous_visitor_is_sent_home() {
        let h = Harness::start().await;
        let session = h.fresh_session().await;

        assert_eq!(gate(&session, "/dashboard"), GateDecision::Redirect("/"));

        h.server.stop().await;
    }

    #[tokio::test]
    async fn logged_in_user_reaches_their_pages_only() {
        let h = Harness::start().await;
        let mut session = h.fresh_session().await;
        h.store
            .login(&mut session, "doc@x.com", "secret")
            .await
            .unwrap();

        assert_eq!(gate(&session, "/dashboard"), GateDecision::Render);
        assert_eq!(gate(&session, "/dashboard/users"), GateDecision::Forbidden);

        h.server.stop().await;
    }
}
