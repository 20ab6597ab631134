use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

use crate::application::models::post::{
    CreatePostRequest, Post, PostListResponse, PostType, PostVisibility,
};
use crate::application::models::response::{ApiResponse, PageResponse};
use crate::error::ApiError;
use crate::transport::ApiClient;

/// Filters for the post feeds.
#[derive(Debug, Clone)]
pub struct PostListQuery {
    pub post_type: Option<PostType>,
    pub visibility: Option<PostVisibility>,
    pub page: u32,
    pub size: u32,
}

impl Default for PostListQuery {
    fn default() -> Self {
        Self {
            post_type: None,
            visibility: None,
            page: 0,
            size: 20,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PostSearchQuery {
    pub keyword: Option<String>,
    pub book_title: Option<String>,
    pub post_type: Option<PostType>,
    pub page: u32,
    pub size: u32,
}

fn post_type_param(post_type: PostType) -> &'static str {
    match post_type {
        PostType::Review => "REVIEW",
        PostType::Recommendation => "RECOMMENDATION",
        PostType::Quote => "QUOTE",
    }
}

fn visibility_param(visibility: PostVisibility) -> &'static str {
    match visibility {
        PostVisibility::Public => "PUBLIC",
        PostVisibility::Private => "PRIVATE",
    }
}

fn feed_params(query: &PostListQuery, with_visibility: bool) -> String {
    let mut params = format!("page={}&size={}", query.page, query.size);
    if let Some(post_type) = query.post_type {
        params.push_str(&format!("&postType={}", post_type_param(post_type)));
    }
    if with_visibility {
        if let Some(visibility) = query.visibility {
            params.push_str(&format!("&visibility={}", visibility_param(visibility)));
        }
    }
    params
}

/// Posts about books (`/posts`): reviews, recommendations and quote
/// collections.
#[async_trait]
pub trait PostService: Send + Sync {
    /// The caller's own posts.
    async fn get_posts(&self, query: &PostListQuery) -> Result<PostListResponse, ApiError>;

    /// Combined feed: everyone's public posts plus all of the caller's own.
    async fn get_all_posts(&self, query: &PostListQuery) -> Result<PostListResponse, ApiError>;

    /// Keyword/book-title search. The backend serves this endpoint in two
    /// shapes; both are accepted.
    async fn search_posts(&self, query: &PostSearchQuery)
        -> Result<PostListResponse, ApiError>;

    async fn get_post(&self, id: i64) -> Result<Post, ApiError>;

    async fn create_post(&self, post: &CreatePostRequest) -> Result<Post, ApiError>;

    async fn update_post(&self, id: i64, post: &CreatePostRequest) -> Result<Post, ApiError>;

    async fn delete_post(&self, id: i64) -> Result<(), ApiError>;

    async fn get_my_posts(&self, query: &PostListQuery) -> Result<PostListResponse, ApiError>;

    async fn get_user_posts(
        &self,
        user_id: i64,
        query: &PostListQuery,
    ) -> Result<PostListResponse, ApiError>;
}

pub struct PostServiceImpl<T: ApiClient> {
    client: Arc<T>,
}

impl<T: ApiClient> PostServiceImpl<T> {
    pub fn new(client: Arc<T>) -> Self {
        Self { client }
    }

    async fn fetch_list(&self, endpoint: &str) -> Result<PostListResponse, ApiError> {
        let envelope: ApiResponse<PostListResponse> = self.client.get(endpoint).await?;
        Ok(envelope.data)
    }
}

#[async_trait]
impl<T: ApiClient + 'static> PostService for PostServiceImpl<T> {
    async fn get_posts(&self, query: &PostListQuery) -> Result<PostListResponse, ApiError> {
        self.fetch_list(&format!("/posts?{}", feed_params(query, true)))
            .await
    }

    async fn get_all_posts(&self, query: &PostListQuery) -> Result<PostListResponse, ApiError> {
        self.fetch_list(&format!("/posts/all?{}", feed_params(query, false)))
            .await
    }

    async fn search_posts(
        &self,
        query: &PostSearchQuery,
    ) -> Result<PostListResponse, ApiError> {
        let mut params: Vec<String> = Vec::new();
        if let Some(keyword) = query.keyword.as_deref().filter(|k| !k.is_empty()) {
            params.push(format!("keyword={}", urlencoding::encode(keyword)));
        }
        if let Some(book_title) = query.book_title.as_deref().filter(|t| !t.is_empty()) {
            params.push(format!("bookTitle={}", urlencoding::encode(book_title)));
        }
        if let Some(post_type) = query.post_type {
            params.push(format!("postType={}", post_type_param(post_type)));
        }
        params.push(format!("page={}", query.page));
        params.push(format!("size={}", query.size));
        let endpoint = format!("/posts/search?{}", params.join("&"));

        // the search endpoint answers with a page payload on some backend
        // versions and a plain list payload on others
        match self.client.get::<PageResponse<Post>>(&endpoint).await {
            Ok(envelope) => {
                let page = envelope.data;
                Ok(PostListResponse {
                    posts: page.content,
                    total_count: page.total_elements,
                    current_page: page.page_number,
                    total_pages: page.total_pages,
                })
            }
            Err(ApiError::Decoding(_)) => {
                debug!("Search payload is not page-shaped, retrying as plain list");
                self.fetch_list(&endpoint).await
            }
            Err(e) => Err(e),
        }
    }

    async fn get_post(&self, id: i64) -> Result<Post, ApiError> {
        let envelope: ApiResponse<Post> = self.client.get(&format!("/posts/{id}")).await?;
        Ok(envelope.data)
    }

    async fn create_post(&self, post: &CreatePostRequest) -> Result<Post, ApiError> {
        let envelope: ApiResponse<Post> = self.client.post("/posts", post).await?;
        Ok(envelope.data)
    }

    async fn update_post(&self, id: i64, post: &CreatePostRequest) -> Result<Post, ApiError> {
        let envelope: ApiResponse<Post> =
            self.client.put(&format!("/posts/{id}"), post).await?;
        Ok(envelope.data)
    }

    async fn delete_post(&self, id: i64) -> Result<(), ApiError> {
        self.client.delete_void(&format!("/posts/{id}")).await
    }

    async fn get_my_posts(&self, query: &PostListQuery) -> Result<PostListResponse, ApiError> {
        self.fetch_list(&format!("/posts/my?{}", feed_params(query, true)))
            .await
    }

    async fn get_user_posts(
        &self,
        user_id: i64,
        query: &PostListQuery,
    ) -> Result<PostListResponse, ApiError> {
        self.fetch_list(&format!(
            "/posts/user/{user_id}?{}",
            feed_params(query, true)
        ))
        .await
    }
}
