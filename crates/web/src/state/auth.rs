// =============================================================================
// Storedesk Web - Auth Store
// =============================================================================
// Table of Contents:
// 1. Session Types
// 2. Auth Store
// 3. Auth Actions
// =============================================================================

use std::sync::Arc;

use leptos::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::storage::{read_json, write_json, KeyValueStore};
use crate::api::{user, ApiError, Envelope, Gateway, Outcome};

/// Storage key of the persisted session.
pub const SESSION_STORAGE_KEY: &str = "login";

const LOGIN_FAILED: &str = "로그인에 실패했습니다.";

// -----------------------------------------------------------------------------
// 1. Session Types
// -----------------------------------------------------------------------------

/// Profile fields kept for the logged-in user.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserInfo {
    pub name: String,
    pub email: String,
    pub nickname: String,
    #[serde(rename = "userType")]
    pub user_type: String,
}

/// The persisted session record.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionState {
    #[serde(rename = "loginOrNot")]
    pub logged_in: bool,
    #[serde(rename = "uInfo")]
    pub user_info: UserInfo,
    #[serde(rename = "storeId")]
    pub store_id: String,
}

/// Profile as the backend sends it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserProfile {
    pub name: String,
    pub email: String,
    pub nickname: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl From<UserProfile> for UserInfo {
    fn from(profile: UserProfile) -> Self {
        Self {
            name: profile.name,
            email: profile.email,
            nickname: profile.nickname,
            user_type: profile.kind,
        }
    }
}

#[derive(Debug, Deserialize)]
struct LoginPayload {
    #[serde(flatten)]
    profile: UserProfile,
    #[serde(rename = "storeId", default)]
    store_id: Option<Value>,
}

/// Store ids arrive as numbers or strings; the session keeps a string.
fn store_id_text(value: Option<Value>) -> String {
    match value {
        Some(Value::String(id)) => id,
        Some(Value::Number(id)) => id.to_string(),
        _ => String::new(),
    }
}

// -----------------------------------------------------------------------------
// 2. Auth Store
// -----------------------------------------------------------------------------

/// Login state, persisted under [`SESSION_STORAGE_KEY`] on every change.
#[derive(Clone)]
pub struct AuthStore {
    session: RwSignal<SessionState>,
    storage: Arc<dyn KeyValueStore>,
    gateway: Arc<Gateway>,
}

impl AuthStore {
    /// Create the store, restoring any persisted session.
    pub fn new(gateway: Arc<Gateway>, storage: Arc<dyn KeyValueStore>) -> Self {
        let store = Self {
            session: RwSignal::new(SessionState::default()),
            storage,
            gateway,
        };
        store.restore();
        store
    }

    /// Reload the session from storage. A missing or malformed record
    /// leaves a logged-out session.
    pub fn restore(&self) {
        let restored =
            read_json::<SessionState>(self.storage.as_ref(), SESSION_STORAGE_KEY).unwrap_or_default();
        self.session.set(restored);
    }

    /// Reactive handle for views.
    pub fn session(&self) -> RwSignal<SessionState> {
        self.session
    }

    pub fn snapshot(&self) -> SessionState {
        self.session.get_untracked()
    }

    pub fn is_logged_in(&self) -> bool {
        self.session.with(|s| s.logged_in)
    }

    pub fn name(&self) -> String {
        self.session.with(|s| s.user_info.name.clone())
    }

    pub fn email(&self) -> String {
        self.session.with(|s| s.user_info.email.clone())
    }

    pub fn user_type(&self) -> String {
        self.session.with(|s| s.user_info.user_type.clone())
    }

    pub fn store_id(&self) -> String {
        self.session.with(|s| s.store_id.clone())
    }

    pub fn set_info(&self, profile: UserProfile) {
        self.session.update(|s| s.user_info = profile.into());
        self.persist();
    }

    pub fn set_login(&self, value: bool) {
        self.session.update(|s| s.logged_in = value);
        self.persist();
    }

    pub fn set_store_id(&self, id: impl Into<String>) {
        let id = id.into();
        self.session.update(|s| s.store_id = id);
        self.persist();
    }

    /// Enter the logged-in state in one step.
    pub fn establish(&self, profile: UserProfile, store_id: impl Into<String>) {
        let store_id = store_id.into();
        self.session.update(|s| {
            s.logged_in = true;
            s.user_info = profile.into();
            s.store_id = store_id;
        });
        self.persist();
    }

    /// Leave the logged-in state in one step.
    pub fn clear(&self) {
        self.session.set(SessionState::default());
        self.storage.remove(SESSION_STORAGE_KEY);
    }

    fn persist(&self) {
        let snapshot = self.session.get_untracked();
        if let Err(e) = write_json(self.storage.as_ref(), SESSION_STORAGE_KEY, &snapshot) {
            log::error!("Failed to persist session to {}: {}", self.storage.name(), e);
        }
    }
}

// -----------------------------------------------------------------------------
// 3. Auth Actions
// -----------------------------------------------------------------------------

impl AuthStore {
    /// Log in and enter the logged-in state on success.
    pub async fn login(&self, email: &str, password: &str) -> Outcome<UserProfile> {
        let request = user::LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let body = match user::login(&self.gateway.user, &request).await {
            Ok(body) => body,
            Err(e) => return Outcome::failure(failure_message(&e)),
        };

        match Envelope::<LoginPayload>::from_value(body) {
            Ok(Envelope {
                code,
                data: Some(payload),
                ..
            }) if code == crate::api::envelope::SUCCESS_CODE => {
                log::info!("Logged in as {}", payload.profile.email);
                let profile = payload.profile;
                self.establish(profile.clone(), store_id_text(payload.store_id));
                Outcome::Success(Some(profile))
            }
            Ok(envelope) => Outcome::failure(envelope.message().unwrap_or(LOGIN_FAILED)),
            Err(e) => {
                log::error!("Unreadable login response: {}", e);
                Outcome::failure(LOGIN_FAILED)
            }
        }
    }

    /// Log out on the server, then clear local state whatever the server said.
    pub async fn logout(&self) {
        if let Err(e) = user::logout(&self.gateway.user).await {
            log::warn!("Server logout failed: {}", e);
        }
        self.clear();
    }

    /// Confirm a restored session with the server.
    ///
    /// A 401/403 drops the local session so the next start is logged out.
    /// Network failures keep it.
    pub async fn verify_session(&self) -> bool {
        if !self.is_logged_in() {
            return false;
        }
        match user::check_session(&self.gateway.user).await {
            Ok(body) if !is_rejection_code(body.get("code").and_then(Value::as_i64)) => true,
            Ok(_) => {
                log::info!("Stored session rejected; clearing it");
                self.clear();
                false
            }
            Err(e) if matches!(e.status(), Some(401 | 403)) => {
                log::info!("Stored session expired ({}); clearing it", e);
                self.clear();
                false
            }
            Err(e) => {
                log::warn!("Session check failed: {}", e);
                true
            }
        }
    }

    /// Refresh the stored profile from the server.
    pub async fn refresh_profile(&self) -> bool {
        let profile = user::get_user_info(&self.gateway.user)
            .await
            .and_then(|envelope| envelope.data)
            .and_then(|data| serde_json::from_value::<UserProfile>(data).ok());
        match profile {
            Some(profile) => {
                self.set_info(profile);
                true
            }
            None => false,
        }
    }
}

fn is_rejection_code(code: Option<i64>) -> bool {
    matches!(code, Some(401 | 403))
}

fn failure_message(error: &ApiError) -> String {
    error
        .response_message()
        .unwrap_or_else(|| LOGIN_FAILED.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Method;
    use crate::routes::NamedRoute;
    use crate::state::storage::MemoryStorage;
    use crate::test_support::{block_on, gateway, MockTransport, RecordingNavigator};
    use serde_json::json;

    fn profile() -> UserProfile {
        UserProfile {
            name: "Kim".into(),
            email: "kim@example.com".into(),
            nickname: "kimbap".into(),
            kind: "OWNER".into(),
        }
    }

    fn store(transport: &Arc<MockTransport>, storage: &Arc<MemoryStorage>) -> AuthStore {
        let navigator = Arc::new(RecordingNavigator::default());
        AuthStore::new(gateway(transport, &navigator), storage.clone())
    }

    #[test]
    fn session_round_trips_through_storage() {
        let transport = MockTransport::new();
        let storage = Arc::new(MemoryStorage::new());

        let first = store(&transport, &storage);
        first.establish(profile(), "12");
        let saved = first.snapshot();

        let second = store(&transport, &storage);
        assert_eq!(second.snapshot(), saved);
        assert!(second.is_logged_in());
        assert_eq!(second.user_type(), "OWNER");
        assert_eq!(second.store_id(), "12");
    }

    #[test]
    fn persisted_record_uses_wire_names() {
        let transport = MockTransport::new();
        let storage = Arc::new(MemoryStorage::new());

        store(&transport, &storage).establish(profile(), "12");

        assert_eq!(
            storage.read(SESSION_STORAGE_KEY),
            Some(json!({
                "loginOrNot": true,
                "uInfo": {
                    "name": "Kim",
                    "email": "kim@example.com",
                    "nickname": "kimbap",
                    "userType": "OWNER"
                },
                "storeId": "12"
            }))
        );
    }

    #[test]
    fn malformed_record_restores_logged_out() {
        let transport = MockTransport::new();
        let storage = Arc::new(MemoryStorage::new());
        storage.write(SESSION_STORAGE_KEY, &json!(["not", "a", "session"])).unwrap();

        assert_eq!(store(&transport, &storage).snapshot(), SessionState::default());
    }

    #[test]
    fn login_establishes_session() {
        let transport = MockTransport::new();
        transport.respond(
            Method::Post,
            "/api/user/login",
            200,
            json!({
                "code": 200,
                "data": {
                    "name": "Kim",
                    "email": "kim@example.com",
                    "nickname": "kimbap",
                    "type": "OWNER",
                    "storeId": 12
                }
            }),
        );
        let storage = Arc::new(MemoryStorage::new());
        let auth = store(&transport, &storage);

        let outcome = block_on(auth.login("kim@example.com", "pw"));

        assert_eq!(outcome, Outcome::Success(Some(profile())));
        assert!(auth.is_logged_in());
        assert_eq!(auth.store_id(), "12");
        assert_eq!(auth.name(), "Kim");
    }

    #[test]
    fn rejected_login_keeps_session_cleared() {
        let transport = MockTransport::new();
        transport.respond(
            Method::Post,
            "/api/user/login",
            200,
            json!({ "code": 1001, "message": "비밀번호가 일치하지 않습니다." }),
        );
        let storage = Arc::new(MemoryStorage::new());
        let auth = store(&transport, &storage);

        let outcome = block_on(auth.login("kim@example.com", "wrong"));

        assert_eq!(outcome.message(), Some("비밀번호가 일치하지 않습니다."));
        assert!(!auth.is_logged_in());
        assert_eq!(storage.read(SESSION_STORAGE_KEY), None);
    }

    #[test]
    fn expired_session_is_dropped_once_on_startup() {
        let transport = MockTransport::new();
        transport.respond(Method::Get, "/api/user/isLogin", 401, json!({ "code": 401 }));
        let storage = Arc::new(MemoryStorage::new());
        store(&transport, &storage).establish(profile(), "12");

        let navigator = Arc::new(RecordingNavigator::default());
        for _ in 0..3 {
            // each start restores from storage, like a page load
            let auth = AuthStore::new(gateway(&transport, &navigator), storage.clone());
            block_on(auth.verify_session());
            assert!(!auth.is_logged_in());
        }

        assert_eq!(navigator.visits(), vec![NamedRoute::Login]);
        assert_eq!(storage.read(SESSION_STORAGE_KEY), None);
        assert_eq!(transport.requests().len(), 1);
    }

    #[test]
    fn session_survives_an_unreachable_server() {
        let transport = MockTransport::new();
        transport.fail(Method::Get, "/api/user/isLogin", "offline");
        let storage = Arc::new(MemoryStorage::new());
        let auth = store(&transport, &storage);
        auth.establish(profile(), "12");

        assert!(block_on(auth.verify_session()));
        assert!(auth.is_logged_in());
        assert!(storage.read(SESSION_STORAGE_KEY).is_some());
    }

    #[test]
    fn logout_clears_even_when_server_fails() {
        let transport = MockTransport::new();
        transport.fail(Method::Post, "/api/user/logout", "offline");
        let storage = Arc::new(MemoryStorage::new());
        let auth = store(&transport, &storage);
        auth.establish(profile(), "12");

        block_on(auth.logout());

        assert_eq!(auth.snapshot(), SessionState::default());
        assert_eq!(storage.read(SESSION_STORAGE_KEY), None);
    }
}
