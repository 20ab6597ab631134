use crate::application::models::response::{ApiResponse, EmptyBody};
use crate::application::models::user::{LoginResponse, User};
use crate::config::Config;
use crate::constants::{
    ACCESS_TOKEN_KEY, AUTH_DEV_LOGIN_ENDPOINT, AUTH_KAKAO_CALLBACK_ENDPOINT,
    AUTH_LOGOUT_ENDPOINT, REFRESH_TOKEN_KEY, USERS_ME_ENDPOINT, USER_KEY,
};
use crate::error::{ApiError, AuthError};
use crate::session::interface::SessionHandle;
use crate::storage::CredentialStorage;
use crate::transport::ApiClient;
use reqwest::{header, Client, StatusCode};
use std::sync::{Arc, RwLock};
use tracing::{debug, error, instrument, warn};

/// In-memory session state. `is_authenticated` implies both tokens and
/// `current_user` are present once `initialize` has settled; it is briefly
/// false while verification is in flight.
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub current_user: Option<User>,
    pub is_authenticated: bool,
    pub is_loading: bool,
}

/// Single source of truth for "who is logged in".
///
/// Constructed once at process start and shared as an `Arc`; the transport
/// reaches it through the [`SessionHandle`] trait. Construction loads the
/// persisted credential record; `initialize` then verifies it against the
/// backend.
pub struct SessionStore {
    config: Arc<Config>,
    storage: Arc<dyn CredentialStorage>,
    state: RwLock<Session>,
    /// Bare client for the calls that bypass the authenticated pipeline:
    /// the logout notification and the authorization-code exchange.
    side_client: Client,
}

impl SessionStore {
    pub fn new(config: Arc<Config>, storage: Arc<dyn CredentialStorage>) -> Self {
        let access_token = storage.get(ACCESS_TOKEN_KEY).filter(|t| !t.is_empty());
        let refresh_token = storage.get(REFRESH_TOKEN_KEY).filter(|t| !t.is_empty());
        // the persisted user is advisory until /users/me confirms it
        let current_user = storage
            .get(USER_KEY)
            .and_then(|raw| serde_json::from_str(&raw).ok());

        let state = Session {
            access_token,
            refresh_token,
            current_user,
            is_authenticated: false,
            is_loading: false,
        };

        Self {
            config,
            storage,
            state: RwLock::new(state),
            side_client: Client::new(),
        }
    }

    /// Verifies the persisted session against `/users/me`, once at process
    /// start. With no stored token this makes no network call. Any failure,
    /// including a failed refresh cascade, resolves to "not authenticated";
    /// it never propagates an error. Stored tokens are left in place on a
    /// plain verification failure so the next start can retry; only the
    /// refresh-failure path inside the transport clears them.
    #[instrument(skip_all)]
    pub async fn initialize<C: ApiClient>(&self, api: &C) {
        let has_token = {
            let state = self.read_state();
            state.access_token.as_deref().is_some_and(|t| !t.is_empty())
        };
        if !has_token {
            debug!("No persisted access token, starting logged out");
            self.write_state(|state| state.is_authenticated = false);
            return;
        }

        self.write_state(|state| state.is_loading = true);
        debug!("Verifying persisted session");

        match api.get::<User>(USERS_ME_ENDPOINT).await {
            Ok(envelope) => {
                let user = envelope.data;
                self.persist_user(&user);
                self.write_state(|state| {
                    state.current_user = Some(user.clone());
                    state.is_authenticated = true;
                    state.is_loading = false;
                });
                debug!("Session verified");
            }
            Err(e) => {
                debug!("Session verification failed: {e}");
                self.write_state(|state| {
                    state.is_authenticated = false;
                    state.current_user = None;
                    state.is_loading = false;
                });
            }
        }
    }

    /// Records a completed external authentication: persists both tokens and
    /// the user, and marks the session authenticated. No network call.
    pub fn login(&self, access_token: &str, refresh_token: &str, user: User) {
        self.storage.set(ACCESS_TOKEN_KEY, access_token);
        self.storage.set(REFRESH_TOKEN_KEY, refresh_token);
        self.persist_user(&user);
        self.write_state(|state| {
            state.access_token = Some(access_token.to_string());
            state.refresh_token = Some(refresh_token.to_string());
            state.current_user = Some(user.clone());
            state.is_authenticated = true;
        });
    }

    /// Clears the session unconditionally, after a best-effort logout
    /// notification to the server (not awaited, failures ignored). Safe to
    /// call repeatedly and from any error handler.
    pub fn logout(&self) {
        self.notify_server_logout();
        self.storage.remove(ACCESS_TOKEN_KEY);
        self.storage.remove(REFRESH_TOKEN_KEY);
        self.storage.remove(USER_KEY);
        self.write_state(|state| *state = Session::default());
    }

    /// Replaces the current user record and re-persists it. Tokens and the
    /// authenticated flag are untouched.
    pub fn update_user(&self, user: User) {
        self.persist_user(&user);
        self.write_state(|state| state.current_user = Some(user.clone()));
    }

    /// Exchanges a third-party authorization code for a login payload. Does
    /// not mutate session state; the caller decides whether to `login` with
    /// the result. Runs outside the refresh protocol.
    #[instrument(skip_all)]
    pub async fn exchange_authorization_code(
        &self,
        code: &str,
    ) -> Result<LoginResponse, AuthError> {
        let url = format!(
            "{}{}?code={}",
            self.config.rest_api.base_url,
            AUTH_KAKAO_CALLBACK_ENDPOINT,
            urlencoding::encode(code)
        );
        debug!("Exchanging authorization code");

        let response = self
            .side_client
            .get(&url)
            .header(header::CONTENT_TYPE, "application/json")
            .send()
            .await?;
        let status = response.status();
        let body_text = response.text().await?;

        match status {
            StatusCode::NOT_FOUND => {
                warn!("Authorization callback endpoint missing on backend");
                Err(AuthError::EndpointMissing(
                    "the backend does not expose the authorization callback endpoint"
                        .to_string(),
                ))
            }
            StatusCode::BAD_REQUEST => Err(AuthError::InvalidCode(
                "the authorization code was rejected, it may be expired or already used"
                    .to_string(),
            )),
            s if !s.is_success() => Err(AuthError::Unexpected(s)),
            _ => {
                let envelope: ApiResponse<LoginResponse> = serde_json::from_str(&body_text)?;
                if envelope.success {
                    Ok(envelope.data)
                } else {
                    Err(AuthError::Rejected(envelope.message))
                }
            }
        }
    }

    /// Test-only backend bypass returning a login payload. Goes through the
    /// ordinary pipeline so it behaves like any other call.
    pub async fn dev_login<C: ApiClient>(&self, api: &C) -> Result<LoginResponse, ApiError> {
        let envelope: ApiResponse<LoginResponse> = api
            .post(AUTH_DEV_LOGIN_ENDPOINT, &EmptyBody::default())
            .await?;
        Ok(envelope.data)
    }

    pub fn is_authenticated(&self) -> bool {
        self.read_state().is_authenticated
    }

    pub fn is_loading(&self) -> bool {
        self.read_state().is_loading
    }

    pub fn current_user(&self) -> Option<User> {
        self.read_state().current_user.clone()
    }

    /// Consistent copy of the whole session state.
    pub fn snapshot(&self) -> Session {
        self.read_state().clone()
    }

    fn persist_user(&self, user: &User) {
        match serde_json::to_string(user) {
            Ok(raw) => self.storage.set(USER_KEY, &raw),
            Err(e) => error!("Failed to serialize user record: {e}"),
        }
    }

    fn notify_server_logout(&self) {
        let token = {
            let state = self.read_state();
            state.access_token.clone()
        };
        let Some(token) = token else { return };

        let url = format!(
            "{}{}",
            self.config.rest_api.base_url, AUTH_LOGOUT_ENDPOINT
        );
        let client = self.side_client.clone();
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move {
                    let result = client
                        .post(&url)
                        .bearer_auth(token)
                        .header(header::CONTENT_TYPE, "application/json")
                        .json(&EmptyBody::default())
                        .send()
                        .await;
                    if let Err(e) = result {
                        debug!("Logout notification failed: {e}");
                    }
                });
            }
            Err(_) => debug!("No async runtime, skipping logout notification"),
        }
    }

    fn read_state(&self) -> std::sync::RwLockReadGuard<'_, Session> {
        self.state.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write_state<F: FnOnce(&mut Session)>(&self, mutate: F) {
        let mut state = self.state.write().unwrap_or_else(|e| e.into_inner());
        mutate(&mut state);
    }
}

impl SessionHandle for SessionStore {
    fn access_token(&self) -> Option<String> {
        self.read_state().access_token.clone()
    }

    fn refresh_token(&self) -> Option<String> {
        self.read_state().refresh_token.clone()
    }

    fn store_tokens(&self, access_token: &str, refresh_token: &str) {
        self.storage.set(ACCESS_TOKEN_KEY, access_token);
        self.storage.set(REFRESH_TOKEN_KEY, refresh_token);
        self.write_state(|state| {
            state.access_token = Some(access_token.to_string());
            state.refresh_token = Some(refresh_token.to_string());
        });
    }

    fn logout(&self) {
        SessionStore::logout(self)
    }
}
