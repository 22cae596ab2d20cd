//! Mock clinic backend for testing
//!
//! Serves the handful of endpoints the session layer depends on and records
//! the credentials headers of every request it receives.

use axum::{
    extract::State,
    http::{HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

/// Password accepted by `POST /login`
pub const VALID_PASSWORD: &str = "secret";

/// Credentials headers seen on one request
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub authorization: Option<String>,
    pub current_role: Option<String>,
}

struct MockClinicState {
    /// Token issued by login and accepted by protected routes
    valid_token: String,
    /// Profile returned on login and by `GET /user/profile`
    profile: Value,
    patients: Vec<Value>,
    requests: Vec<RecordedRequest>,
}

/// Mock clinic API server
pub struct MockClinicApi {
    addr: SocketAddr,
    state: Arc<RwLock<MockClinicState>>,
    handle: JoinHandle<()>,
}

impl MockClinicApi {
    /// Start a mock backend on a random port
    pub async fn start() -> Self {
        let state = Arc::new(RwLock::new(MockClinicState {
            valid_token: "t1".to_string(),
            profile: json!({
                "_id": "u1",
                "fullname": "Dr Ali",
                "email": "doc@x.com",
                "role": ["medecin", "secretaire"],
                "isActive": true
            }),
            patients: vec![json!({"_id": "p1", "fullname": "Said Ali", "status": "actif"})],
            requests: Vec::new(),
        }));

        let app = Router::new()
            .route("/api/login", post(handle_login))
            .route("/api/user/profile", get(handle_profile))
            .route("/api/patients", get(handle_patients))
            .route("/api/broken", get(handle_broken))
            .fallback(handle_unknown)
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            addr,
            state,
            handle,
        }
    }

    /// Base URL the API client should be configured with
    pub fn base_url(&self) -> String {
        format!("http://{}/api", self.addr)
    }

    /// Token the backend currently accepts
    pub async fn valid_token(&self) -> String {
        self.state.read().await.valid_token.clone()
    }

    /// Invalidate every issued token (as a server-side expiry would)
    pub async fn expire_tokens(&self) {
        self.state.write().await.valid_token = "rotated".to_string();
    }

    /// Replace the profile returned to the logged-in user
    pub async fn set_profile(&self, profile: Value) {
        self.state.write().await.profile = profile;
    }

    /// Requests received so far, in order
    pub async fn requests(&self) -> Vec<RecordedRequest> {
        self.state.read().await.requests.clone()
    }

    /// Stop the mock server
    pub async fn stop(self) {
        self.handle.abort();
    }
}

type Shared = Arc<RwLock<MockClinicState>>;

async fn record(state: &Shared, method: &Method, uri: &Uri, headers: &HeaderMap) {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    state.write().await.requests.push(RecordedRequest {
        method: method.to_string(),
        path: uri.path().to_string(),
        authorization: header("authorization"),
        current_role: header("x-current-role"),
    });
}

async fn authorized(state: &Shared, headers: &HeaderMap) -> bool {
    let expected = format!("Bearer {}", state.read().await.valid_token);
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == expected)
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({"message": "Token invalide ou expiré"})),
    )
        .into_response()
}

async fn handle_login(
    State(state): State<Shared>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    record(&state, &method, &uri, &headers).await;

    if body["password"] != VALID_PASSWORD {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"message": "Email ou mot de passe incorrect"})),
        )
            .into_response();
    }

    let state = state.read().await;
    Json(json!({
        "token": state.valid_token,
        "user": state.profile,
    }))
    .into_response()
}

async fn handle_profile(
    State(state): State<Shared>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    record(&state, &method, &uri, &headers).await;
    if !authorized(&state, &headers).await {
        return unauthorized();
    }
    Json(state.read().await.profile.clone()).into_response()
}

async fn handle_patients(
    State(state): State<Shared>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    record(&state, &method, &uri, &headers).await;
    if !authorized(&state, &headers).await {
        return unauthorized();
    }
    Json(json!({"data": state.read().await.patients})).into_response()
}

async fn handle_broken(
    State(state): State<Shared>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    record(&state, &method, &uri, &headers).await;
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({"message": "Erreur serveur"})),
    )
        .into_response()
}

async fn handle_unknown(
    State(state): State<Shared>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    record(&state, &method, &uri, &headers).await;
    (StatusCode::NOT_FOUND, "not found").into_response()
}
