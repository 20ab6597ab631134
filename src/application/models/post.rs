use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PostType {
    Review,
    Recommendation,
    Quote,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PostVisibility {
    Public,
    Private,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecommendationType {
    Recommend,
    NotRecommend,
}

/// Catalogue record of the book a post is about.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookInfo {
    pub isbn: String,
    pub title: String,
    pub author: String,
    pub publisher: String,
    pub cover: String,
    pub pub_date: String,
    pub description: Option<String>,
}

/// A collected quote. The backend serves `page` as either a JSON string or
/// a number, so decoding normalises both to a string.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Quote {
    #[serde(default, deserialize_with = "page_as_string")]
    pub page: String,
    pub text: String,
}

fn page_as_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawPage {
        Text(String),
        Number(i64),
    }

    Ok(match Option::<RawPage>::deserialize(deserializer)? {
        Some(RawPage::Text(s)) => s,
        Some(RawPage::Number(n)) => n.to_string(),
        None => String::new(),
    })
}

/// A post about a book: review, recommendation or quote collection. The
/// type-specific fields are optional and populated according to `post_type`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: i64,
    pub user_id: i64,
    pub user_name: String,
    pub user_profile_image: Option<String>,
    pub post_type: PostType,
    pub visibility: String,
    pub book_info: BookInfo,
    pub created_at: String,
    pub updated_at: String,
    pub comment_count: Option<u32>,

    // review fields
    pub title: Option<String>,
    pub content: Option<String>,

    // recommendation fields
    pub recommendation_type: Option<String>,
    pub reason: Option<String>,

    // quote-collection fields
    pub quotes: Option<Vec<Quote>>,
    pub quote: Option<String>,
    pub page_number: Option<i32>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostRequest {
    pub book_info: BookInfo,
    pub post_type: PostType,
    pub visibility: PostVisibility,
    pub title: Option<String>,
    pub content: Option<String>,
    pub recommendation_type: Option<RecommendationType>,
    pub reason: Option<String>,
    pub quotes: Option<Vec<Quote>>,
    pub quote: Option<String>,
    pub page_number: Option<i32>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostListResponse {
    pub posts: Vec<Post>,
    pub total_count: u64,
    pub current_page: u32,
    pub total_pages: u32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentUser {
    pub id: i64,
    pub nickname: String,
    pub profile_image: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: i64,
    pub content: String,
    pub is_deleted: bool,
    pub is_reply: bool,
    pub parent_id: Option<i64>,
    pub reply_count: u32,
    pub can_delete: bool,
    pub created_at: String,
    pub updated_at: String,
    pub user: CommentUser,
    pub replies: Option<Vec<Comment>>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentCreateRequest {
    pub content: String,
    /// Present when the comment is a reply to another comment.
    pub parent_id: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentPageResponse {
    pub content: Vec<Comment>,
    pub total_elements: u64,
    pub total_pages: u32,
    pub number: u32,
    pub size: u32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentListResponse {
    pub comments: CommentPageResponse,
    pub total_comments: u64,
    pub active_comments: u64,
}
