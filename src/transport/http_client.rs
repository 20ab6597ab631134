use crate::application::models::response::{ApiResponse, EmptyResponse};
use crate::application::models::user::LoginResponse;
use crate::config::Config;
use crate::constants::AUTH_REFRESH_ENDPOINT;
use crate::error::ApiError;
use crate::session::interface::SessionHandle;
use async_trait::async_trait;
use reqwest::{header, Client, Method, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, instrument, warn};

/// Uniform request execution against the backend.
///
/// One method carries the whole contract; the verb-specific wrappers are
/// provided so the domain services read like the endpoints they call.
#[async_trait]
pub trait ApiClient: Send + Sync {
    /// Executes one logical call: builds the URL from the configured base,
    /// injects the bearer token when one is held, and on a 401 (when
    /// `allow_refresh_retry` is set) exchanges the refresh token and replays
    /// the original request exactly once. A failed replay clears the session
    /// and surfaces as `Unauthorized`, like a failed refresh.
    async fn request<B, T>(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&B>,
        allow_refresh_retry: bool,
    ) -> Result<ApiResponse<T>, ApiError>
    where
        B: Serialize + Sync,
        T: DeserializeOwned + Send;

    async fn get<T>(&self, endpoint: &str) -> Result<ApiResponse<T>, ApiError>
    where
        T: DeserializeOwned + Send,
    {
        self.request::<(), T>(Method::GET, endpoint, None, true).await
    }

    async fn post<B, T>(&self, endpoint: &str, body: &B) -> Result<ApiResponse<T>, ApiError>
    where
        B: Serialize + Sync,
        T: DeserializeOwned + Send,
    {
        self.request(Method::POST, endpoint, Some(body), true).await
    }

    async fn put<B, T>(&self, endpoint: &str, body: &B) -> Result<ApiResponse<T>, ApiError>
    where
        B: Serialize + Sync,
        T: DeserializeOwned + Send,
    {
        self.request(Method::PUT, endpoint, Some(body), true).await
    }

    async fn delete<T>(&self, endpoint: &str) -> Result<ApiResponse<T>, ApiError>
    where
        T: DeserializeOwned + Send,
    {
        self.request::<(), T>(Method::DELETE, endpoint, None, true).await
    }

    /// Delete for callers that discard the response body.
    async fn delete_void(&self, endpoint: &str) -> Result<(), ApiError> {
        self.delete::<EmptyResponse>(endpoint).await.map(|_| ())
    }
}

#[derive(Serialize)]
struct RefreshRequest<'a> {
    #[serde(rename = "refreshToken")]
    refresh_token: &'a str,
}

/// HTTP implementation of [`ApiClient`].
///
/// Stateless apart from read access to the session's tokens; the only side
/// effect it performs outside its own scope is triggering a logout when the
/// refresh exchange fails or the replayed request fails after a refresh.
pub struct HttpApiClient {
    client: Client,
    base_url: String,
    session: Arc<dyn SessionHandle>,
}

impl HttpApiClient {
    pub fn new(config: &Config, session: Arc<dyn SessionHandle>) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.rest_api.timeout))
            .build()
            .map_err(ApiError::Network)?;

        Ok(Self {
            client,
            base_url: config.rest_api.base_url.clone(),
            session,
        })
    }

    /// One attempt of the request. When `refresh_eligible_401` is set a 401
    /// surfaces as `Unauthorized` so the caller can enter the refresh
    /// branch; otherwise it is an ordinary `Server(401)`.
    async fn send_once<B, T>(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&B>,
        refresh_eligible_401: bool,
    ) -> Result<ApiResponse<T>, ApiError>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let url = Url::parse(&format!("{}{}", self.base_url, endpoint))
            .map_err(|_| ApiError::InvalidUrl)?;
        debug!("Sending {} request to {}", method, url);

        let mut request = self
            .client
            .request(method, url)
            .header(header::CONTENT_TYPE, "application/json");

        if let Some(token) = self.session.access_token() {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(ApiError::Network)?;
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED && refresh_eligible_401 {
            debug!("401 from {}, entering refresh branch", endpoint);
            return Err(ApiError::Unauthorized);
        }
        if !status.is_success() {
            error!("Request to {} failed with http {}", endpoint, status);
            return Err(ApiError::Server(status.as_u16()));
        }

        let body_text = response.text().await.map_err(ApiError::Network)?;
        if body_text.is_empty() {
            return Err(ApiError::NoData);
        }
        serde_json::from_str(&body_text).map_err(ApiError::Decoding)
    }

    /// Exchanges the refresh token and writes the new pair to the session.
    /// Any failure here is irrecoverable for the call: the session is
    /// cleared and the original request fails with `Unauthorized`.
    async fn refresh_tokens(&self) -> Result<(), ApiError> {
        let Some(refresh_token) = self.session.refresh_token() else {
            warn!("Access token rejected and no refresh token held");
            return Err(ApiError::Unauthorized);
        };

        match self.exchange_refresh_token(&refresh_token).await {
            Ok(login) => {
                self.session
                    .store_tokens(&login.access_token, &login.refresh_token);
                Ok(())
            }
            Err(e) => {
                warn!("Token refresh failed, clearing session: {e}");
                self.session.logout();
                Err(ApiError::Unauthorized)
            }
        }
    }

    async fn exchange_refresh_token(
        &self,
        refresh_token: &str,
    ) -> Result<LoginResponse, ApiError> {
        let url = Url::parse(&format!("{}{}", self.base_url, AUTH_REFRESH_ENDPOINT))
            .map_err(|_| ApiError::InvalidUrl)?;
        debug!("Exchanging refresh token");

        // the refresh call itself is unauthenticated
        let response = self
            .client
            .post(url)
            .header(header::CONTENT_TYPE, "application/json")
            .json(&RefreshRequest { refresh_token })
            .send()
            .await
            .map_err(ApiError::Network)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Server(status.as_u16()));
        }

        let body_text = response.text().await.map_err(ApiError::Network)?;
        if body_text.is_empty() {
            return Err(ApiError::NoData);
        }
        let envelope: ApiResponse<LoginResponse> =
            serde_json::from_str(&body_text).map_err(ApiError::Decoding)?;
        Ok(envelope.data)
    }
}

#[async_trait]
impl ApiClient for HttpApiClient {
    #[instrument(skip(self, body))]
    async fn request<B, T>(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&B>,
        allow_refresh_retry: bool,
    ) -> Result<ApiResponse<T>, ApiError>
    where
        B: Serialize + Sync,
        T: DeserializeOwned + Send,
    {
        let first = self
            .send_once(method.clone(), endpoint, body, allow_refresh_retry)
            .await;

        match first {
            Err(ApiError::Unauthorized) if allow_refresh_retry => {
                self.refresh_tokens().await?;
                debug!("Replaying {} {} with refreshed token", method, endpoint);
                // allow_refresh_retry is off for the replay, so a second 401
                // cannot loop back into another refresh
                match self.send_once(method, endpoint, body, false).await {
                    Ok(response) => Ok(response),
                    Err(e) => {
                        warn!("Replay after refresh failed, clearing session: {e}");
                        self.session.logout();
                        Err(ApiError::Unauthorized)
                    }
                }
            }
            other => other,
        }
    }
}

#[cfg(test)]
mod tests_http_client {
    use super::*;
    use crate::application::models::user::User;
    use crate::config::Config;
    use crate::constants::{ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY};
    use crate::session::store::SessionStore;
    use crate::storage::{CredentialStorage, MemoryCredentialStorage};
    use crate::utils::logger::setup_logger;
    use mockito::{Matcher, Server};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn make_store(server_url: &str) -> (Arc<SessionStore>, Arc<MemoryCredentialStorage>) {
        let config = Arc::new(Config::with_base_url(server_url));
        let storage = Arc::new(MemoryCredentialStorage::new());
        let store = Arc::new(SessionStore::new(config, storage.clone()));
        (store, storage)
    }

    fn make_client(server_url: &str, store: Arc<SessionStore>) -> HttpApiClient {
        HttpApiClient::new(&Config::with_base_url(server_url), store).unwrap()
    }

    fn login_envelope(access: &str, refresh: &str) -> String {
        json!({
            "success": true,
            "data": {
                "accessToken": access,
                "refreshToken": refresh,
                "user": {
                    "id": 1,
                    "nickname": "jieun",
                    "profileImage": null,
                    "createdAt": "2025-01-01T00:00:00.000000"
                },
                "expiresAt": "2025-01-01T01:00:00.000000"
            },
            "message": "ok",
            "timestamp": "2025-01-01T00:00:00.000000"
        })
        .to_string()
    }

    fn user_envelope() -> String {
        json!({
            "success": true,
            "data": {
                "id": 1,
                "nickname": "jieun",
                "profileImage": null,
                "createdAt": "2025-01-01T00:00:00.000000"
            },
            "message": "ok",
            "timestamp": "2025-01-01T00:00:00.000000"
        })
        .to_string()
    }

    #[tokio::test]
    async fn test_unauthenticated_request_has_no_auth_header() {
        setup_logger();
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/users/me")
            .match_header("authorization", Matcher::Missing)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(user_envelope())
            .create_async()
            .await;

        let (store, _) = make_store(&server.url());
        let client = make_client(&server.url(), store);

        let result: ApiResponse<User> = client.get("/users/me").await.unwrap();
        assert_eq!(result.data.nickname, "jieun");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_bearer_token_is_attached() {
        setup_logger();
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/users/me")
            .match_header("authorization", "Bearer valid-token")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(user_envelope())
            .create_async()
            .await;

        let storage = Arc::new(MemoryCredentialStorage::new());
        storage.set(ACCESS_TOKEN_KEY, "valid-token");
        let store = Arc::new(SessionStore::new(
            Arc::new(Config::with_base_url(&server.url())),
            storage,
        ));
        let client = make_client(&server.url(), store);

        let result: Result<ApiResponse<User>, _> = client.get("/users/me").await;
        assert!(result.is_ok());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_401_refreshes_and_replays_once() {
        setup_logger();
        let mut server = Server::new_async().await;

        let stale = server
            .mock("GET", "/users/me")
            .match_header("authorization", "Bearer stale")
            .with_status(401)
            .create_async()
            .await;
        let refresh = server
            .mock("POST", "/auth/refresh")
            .match_body(Matcher::Json(json!({"refreshToken": "refresh-1"})))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(login_envelope("fresh", "refresh-2"))
            .create_async()
            .await;
        let replay = server
            .mock("GET", "/users/me")
            .match_header("authorization", "Bearer fresh")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(user_envelope())
            .create_async()
            .await;

        let storage = Arc::new(MemoryCredentialStorage::new());
        storage.set(ACCESS_TOKEN_KEY, "stale");
        storage.set(REFRESH_TOKEN_KEY, "refresh-1");
        let store = Arc::new(SessionStore::new(
            Arc::new(Config::with_base_url(&server.url())),
            storage.clone(),
        ));
        let client = make_client(&server.url(), store.clone());

        let result: ApiResponse<User> = client.get("/users/me").await.unwrap();
        assert_eq!(result.data.id, 1);

        stale.assert_async().await;
        refresh.assert_async().await;
        replay.assert_async().await;

        // both tokens were rotated, in memory and in storage
        assert_eq!(store.access_token(), Some("fresh".to_string()));
        assert_eq!(store.refresh_token(), Some("refresh-2".to_string()));
        assert_eq!(storage.get(ACCESS_TOKEN_KEY), Some("fresh".to_string()));
    }

    #[tokio::test]
    async fn test_401_without_retry_is_server_error() {
        setup_logger();
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/books")
            .with_status(401)
            .create_async()
            .await;
        let refresh = server
            .mock("POST", "/auth/refresh")
            .expect(0)
            .create_async()
            .await;

        let storage = Arc::new(MemoryCredentialStorage::new());
        storage.set(ACCESS_TOKEN_KEY, "stale");
        storage.set(REFRESH_TOKEN_KEY, "refresh-1");
        let store = Arc::new(SessionStore::new(
            Arc::new(Config::with_base_url(&server.url())),
            storage,
        ));
        let client = make_client(&server.url(), store);

        let result: Result<ApiResponse<User>, ApiError> = client
            .request::<(), User>(Method::GET, "/books", None, false)
            .await;

        assert!(matches!(result, Err(ApiError::Server(401))));
        mock.assert_async().await;
        refresh.assert_async().await;
    }

    #[tokio::test]
    async fn test_refresh_failure_logs_out_and_fails_unauthorized() {
        setup_logger();
        let mut server = Server::new_async().await;
        let _stale = server
            .mock("GET", "/users/me")
            .with_status(401)
            .create_async()
            .await;
        let refresh = server
            .mock("POST", "/auth/refresh")
            .with_status(500)
            .create_async()
            .await;

        let storage = Arc::new(MemoryCredentialStorage::new());
        storage.set(ACCESS_TOKEN_KEY, "stale");
        storage.set(REFRESH_TOKEN_KEY, "refresh-1");
        let store = Arc::new(SessionStore::new(
            Arc::new(Config::with_base_url(&server.url())),
            storage.clone(),
        ));
        let client = make_client(&server.url(), store.clone());

        let result: Result<ApiResponse<User>, ApiError> = client.get("/users/me").await;

        assert!(matches!(result, Err(ApiError::Unauthorized)));
        refresh.assert_async().await;

        // session cleared, persisted record included
        assert!(!store.is_authenticated());
        assert_eq!(store.access_token(), None);
        assert_eq!(storage.get(ACCESS_TOKEN_KEY), None);
        assert_eq!(storage.get(REFRESH_TOKEN_KEY), None);
    }

    #[tokio::test]
    async fn test_replay_failure_logs_out_and_fails_unauthorized() {
        setup_logger();
        let mut server = Server::new_async().await;
        let stale = server
            .mock("GET", "/users/me")
            .match_header("authorization", "Bearer stale")
            .with_status(401)
            .create_async()
            .await;
        let refresh = server
            .mock("POST", "/auth/refresh")
            .match_body(Matcher::Json(json!({"refreshToken": "refresh-1"})))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(login_envelope("fresh", "refresh-2"))
            .create_async()
            .await;
        // the backend rejects even the refreshed token
        let replay = server
            .mock("GET", "/users/me")
            .match_header("authorization", "Bearer fresh")
            .with_status(401)
            .create_async()
            .await;

        let storage = Arc::new(MemoryCredentialStorage::new());
        storage.set(ACCESS_TOKEN_KEY, "stale");
        storage.set(REFRESH_TOKEN_KEY, "refresh-1");
        let store = Arc::new(SessionStore::new(
            Arc::new(Config::with_base_url(&server.url())),
            storage.clone(),
        ));
        let client = make_client(&server.url(), store.clone());

        let result: Result<ApiResponse<User>, ApiError> = client.get("/users/me").await;

        assert!(matches!(result, Err(ApiError::Unauthorized)));
        stale.assert_async().await;
        refresh.assert_async().await;
        replay.assert_async().await;

        // replay failure clears the session like a failed refresh does
        assert!(!store.is_authenticated());
        assert_eq!(store.access_token(), None);
        assert_eq!(store.refresh_token(), None);
        assert_eq!(storage.get(ACCESS_TOKEN_KEY), None);
        assert_eq!(storage.get(REFRESH_TOKEN_KEY), None);
    }

    #[tokio::test]
    async fn test_401_without_refresh_token_fails_unauthorized() {
        setup_logger();
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/users/me")
            .with_status(401)
            .create_async()
            .await;
        let refresh = server
            .mock("POST", "/auth/refresh")
            .expect(0)
            .create_async()
            .await;

        let storage = Arc::new(MemoryCredentialStorage::new());
        storage.set(ACCESS_TOKEN_KEY, "stale");
        let store = Arc::new(SessionStore::new(
            Arc::new(Config::with_base_url(&server.url())),
            storage,
        ));
        let client = make_client(&server.url(), store);

        let result: Result<ApiResponse<User>, ApiError> = client.get("/users/me").await;

        assert!(matches!(result, Err(ApiError::Unauthorized)));
        refresh.assert_async().await;
    }

    #[tokio::test]
    async fn test_non_2xx_is_server_error() {
        setup_logger();
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/books")
            .with_status(503)
            .create_async()
            .await;

        let (store, _) = make_store(&server.url());
        let client = make_client(&server.url(), store);

        let result: Result<ApiResponse<User>, ApiError> = client.get("/books").await;
        assert!(matches!(result, Err(ApiError::Server(503))));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_malformed_body_is_decoding_error() {
        setup_logger();
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/books")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"unexpected": "shape"}"#)
            .create_async()
            .await;

        let (store, _) = make_store(&server.url());
        let client = make_client(&server.url(), store);

        let result: Result<ApiResponse<User>, ApiError> = client.get("/books").await;
        assert!(matches!(result, Err(ApiError::Decoding(_))));
    }

    #[tokio::test]
    async fn test_empty_body_is_no_data() {
        setup_logger();
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/books")
            .with_status(200)
            .with_body("")
            .create_async()
            .await;

        let (store, _) = make_store(&server.url());
        let client = make_client(&server.url(), store);

        let result: Result<ApiResponse<User>, ApiError> = client.get("/books").await;
        assert!(matches!(result, Err(ApiError::NoData)));
    }

    #[tokio::test]
    async fn test_malformed_url_is_invalid_url() {
        setup_logger();
        let (store, _) = make_store("not a url");
        let client = make_client("not a url", store);

        let result: Result<ApiResponse<User>, ApiError> = client.get("/books").await;
        assert!(matches!(result, Err(ApiError::InvalidUrl)));
    }

    #[tokio::test]
    async fn test_delete_void_discards_body() {
        setup_logger();
        let mut server = Server::new_async().await;
        let mock = server
            .mock("DELETE", "/books/9")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"success": true, "data": null, "message": "deleted", "timestamp": "t"}"#,
            )
            .create_async()
            .await;

        let (store, _) = make_store(&server.url());
        let client = make_client(&server.url(), store);

        client.delete_void("/books/9").await.unwrap();
        mock.assert_async().await;
    }
}
