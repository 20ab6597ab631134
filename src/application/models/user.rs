use serde::{Deserialize, Serialize};

use super::book::CurrentlyReading;
use super::post::Post;

/// Authenticated user record as returned by `/users/me`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub nickname: String,
    pub profile_image: Option<String>,
    pub created_at: String,
}

/// Login payload returned by the refresh, code-exchange and dev-login
/// endpoints.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub user: User,
    pub expires_at: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStatistics {
    pub total_books: u32,
    pub currently_reading_count: u32,
    pub wishlist_count: u32,
    pub dropped_books_count: u32,
    pub total_posts: u32,
    pub this_month_posts: u32,
    pub this_month_books: u32,
    pub this_month_dropped_books: u32,
}

/// Public profile of another user, including their aggregated statistics.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: i64,
    pub nickname: String,
    pub profile_image: Option<String>,
    pub created_at: String,
    pub updated_at: String,
    pub statistics: UserStatistics,
    pub currently_reading: Vec<CurrentlyReading>,
    pub recent_public_posts: Vec<Post>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    pub nickname: Option<String>,
    pub profile_image: Option<String>,
}

#[cfg(test)]
mod tests_user {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_user_roundtrip() {
        let raw = json!({
            "id": 12,
            "nickname": "독서가",
            "profileImage": null,
            "createdAt": "2025-06-01T09:30:00.000000"
        });
        let user: User = serde_json::from_value(raw).unwrap();
        assert_eq!(user.id, 12);
        assert_eq!(user.profile_image, None);

        let encoded = serde_json::to_value(&user).unwrap();
        assert_eq!(encoded["nickname"], "독서가");
        assert_eq!(encoded["createdAt"], "2025-06-01T09:30:00.000000");
    }

    #[test]
    fn test_login_response_decode() {
        let raw = json!({
            "accessToken": "at",
            "refreshToken": "rt",
            "user": {
                "id": 1,
                "nickname": "jieun",
                "profileImage": "https://cdn.example/p.png",
                "createdAt": "2025-01-01T00:00:00.000000"
            },
            "expiresAt": "2025-01-01T01:00:00.000000"
        });
        let login: LoginResponse = serde_json::from_value(raw).unwrap();
        assert_eq!(login.access_token, "at");
        assert_eq!(login.user.nickname, "jieun");
    }
}
