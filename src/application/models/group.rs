use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadingGroup {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub is_public: bool,
    /// Only present for members of the group.
    pub invite_code: Option<String>,
    pub member_count: Option<u32>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupMember {
    pub id: i64,
    pub user_id: i64,
    pub nickname: String,
    pub profile_image: Option<String>,
    pub introduction: Option<String>,
    pub joined_at: String,
    pub is_leader: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReadingGroupRequest {
    pub name: String,
    pub description: Option<String>,
    pub is_public: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateReadingGroupRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub is_public: Option<bool>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinGroupRequest {
    pub introduction: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinByCodeRequest {
    pub invite_code: String,
    pub introduction: Option<String>,
}

/// The book a group reads in a given month.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyBook {
    pub id: i64,
    pub group: Option<MonthlyBookGroup>,
    pub title: String,
    pub author: String,
    pub publisher: String,
    pub cover_image: Option<String>,
    pub description: Option<String>,
    pub year: i32,
    pub month: u8,
    pub status: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyBookGroup {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyBookSelectRequest {
    pub title: String,
    pub author: String,
    pub publisher: String,
    pub cover_image: Option<String>,
    pub description: Option<String>,
    pub year: i32,
    pub month: u8,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupReview {
    pub id: i64,
    pub user: GroupReviewUser,
    pub reading_group: Option<GroupReviewGroup>,
    pub rating: u8,
    pub title: String,
    pub content: String,
    pub favorite_quote: Option<String>,
    pub recommendation: Option<String>,
    pub is_public: bool,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupReviewUser {
    pub id: i64,
    pub nickname: String,
    pub profile_image: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupReviewGroup {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupReviewCreateRequest {
    pub reading_group_id: i64,
    pub rating: u8,
    pub title: String,
    pub content: String,
    pub favorite_quote: Option<String>,
    pub recommendation: Option<String>,
    pub is_public: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupReviewUpdateRequest {
    pub rating: Option<u8>,
    pub title: Option<String>,
    pub content: Option<String>,
    pub favorite_quote: Option<String>,
    pub recommendation: Option<String>,
    pub is_public: Option<bool>,
}
