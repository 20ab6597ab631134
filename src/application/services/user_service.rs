use async_trait::async_trait;
use std::sync::Arc;

use crate::application::models::response::ApiResponse;
use crate::application::models::user::{UpdateUserRequest, User, UserProfile, UserStatistics};
use crate::constants::USERS_ME_ENDPOINT;
use crate::error::ApiError;
use crate::transport::ApiClient;

/// Account and profile endpoints (`/users`).
#[async_trait]
pub trait UserService: Send + Sync {
    async fn get_my_info(&self) -> Result<User, ApiError>;

    async fn update_my_info(&self, request: &UpdateUserRequest) -> Result<User, ApiError>;

    /// Shelf and post counters for the caller.
    async fn get_my_statistics(&self) -> Result<UserStatistics, ApiError>;

    /// Another user's public profile with their statistics, current reads
    /// and recent public posts.
    async fn get_user_profile(&self, user_id: i64) -> Result<UserProfile, ApiError>;
}

pub struct UserServiceImpl<T: ApiClient> {
    client: Arc<T>,
}

impl<T: ApiClient> UserServiceImpl<T> {
    pub fn new(client: Arc<T>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl<T: ApiClient + 'static> UserService for UserServiceImpl<T> {
    async fn get_my_info(&self) -> Result<User, ApiError> {
        let envelope: ApiResponse<User> = self.client.get(USERS_ME_ENDPOINT).await?;
        Ok(envelope.data)
    }

    async fn update_my_info(&self, request: &UpdateUserRequest) -> Result<User, ApiError> {
        let envelope: ApiResponse<User> = self.client.put(USERS_ME_ENDPOINT, request).await?;
        Ok(envelope.data)
    }

    async fn get_my_statistics(&self) -> Result<UserStatistics, ApiError> {
        let envelope: ApiResponse<UserStatistics> =
            self.client.get("/users/me/statistics").await?;
        Ok(envelope.data)
    }

    async fn get_user_profile(&self, user_id: i64) -> Result<UserProfile, ApiError> {
        let envelope: ApiResponse<UserProfile> = self
            .client
            .get(&format!("/users/{user_id}/profile"))
            .await?;
        Ok(envelope.data)
    }
}

#[cfg(test)]
mod tests_user_service {
    use super::*;
    use crate::config::Config;
    use crate::session::store::SessionStore;
    use crate::storage::MemoryCredentialStorage;
    use crate::transport::HttpApiClient;
    use crate::utils::logger::setup_logger;
    use mockito::{Matcher, Server};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn make_service(server_url: &str) -> UserServiceImpl<HttpApiClient> {
        let config = Arc::new(Config::with_base_url(server_url));
        let store = Arc::new(SessionStore::new(
            config.clone(),
            Arc::new(MemoryCredentialStorage::new()),
        ));
        let client = Arc::new(HttpApiClient::new(&config, store).unwrap());
        UserServiceImpl::new(client)
    }

    #[tokio::test]
    async fn test_update_my_info_sends_camel_case_body() {
        setup_logger();
        let mut server = Server::new_async().await;
        let mock = server
            .mock("PUT", "/users/me")
            .match_body(Matcher::Json(json!({
                "nickname": "새닉네임",
                "profileImage": null
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "success": true,
                    "data": {
                        "id": 1,
                        "nickname": "새닉네임",
                        "profileImage": null,
                        "createdAt": "2025-01-01T00:00:00.000000"
                    },
                    "message": "ok",
                    "timestamp": "t"
                })
                .to_string(),
            )
            .create_async()
            .await;

        let service = make_service(&server.url());
        let user = service
            .update_my_info(&UpdateUserRequest {
                nickname: Some("새닉네임".to_string()),
                profile_image: None,
            })
            .await
            .unwrap();

        assert_eq!(user.nickname, "새닉네임");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_get_my_statistics() {
        setup_logger();
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/users/me/statistics")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "success": true,
                    "data": {
                        "totalBooks": 52,
                        "currentlyReadingCount": 3,
                        "wishlistCount": 12,
                        "droppedBooksCount": 2,
                        "totalPosts": 17,
                        "thisMonthPosts": 4,
                        "thisMonthBooks": 5,
                        "thisMonthDroppedBooks": 0
                    },
                    "message": "ok",
                    "timestamp": "t"
                })
                .to_string(),
            )
            .create_async()
            .await;

        let service = make_service(&server.url());
        let stats = service.get_my_statistics().await.unwrap();
        assert_eq!(stats.total_books, 52);
        assert_eq!(stats.this_month_books, 5);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_get_user_profile() {
        setup_logger();
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/users/9/profile")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "success": true,
                    "data": {
                        "id": 9,
                        "nickname": "민지",
                        "profileImage": null,
                        "createdAt": "2025-02-01T00:00:00.000000",
                        "updatedAt": "2025-02-01T00:00:00.000000",
                        "statistics": {
                            "totalBooks": 3,
                            "currentlyReadingCount": 1,
                            "wishlistCount": 0,
                            "droppedBooksCount": 0,
                            "totalPosts": 2,
                            "thisMonthPosts": 1,
                            "thisMonthBooks": 0,
                            "thisMonthDroppedBooks": 0
                        },
                        "currentlyReading": [],
                        "recentPublicPosts": []
                    },
                    "message": "ok",
                    "timestamp": "t"
                })
                .to_string(),
            )
            .create_async()
            .await;

        let service = make_service(&server.url());
        let profile = service.get_user_profile(9).await.unwrap();
        assert_eq!(profile.nickname, "민지");
        assert_eq!(profile.statistics.total_books, 3);
        mock.assert_async().await;
    }
}
