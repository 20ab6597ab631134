use async_trait::async_trait;
use std::sync::Arc;

use crate::application::models::post::{Comment, CommentCreateRequest, CommentListResponse};
use crate::application::models::response::ApiResponse;
use crate::error::ApiError;
use crate::transport::ApiClient;

/// Comments on posts (`/comments`).
#[async_trait]
pub trait CommentService: Send + Sync {
    /// Top-level comments of a post, paged, with reply/active counters.
    async fn get_comments(
        &self,
        post_id: i64,
        page: u32,
        size: u32,
    ) -> Result<CommentListResponse, ApiError>;

    /// Creates a comment; pass `parent_id` in the request to reply.
    async fn create_comment(
        &self,
        post_id: i64,
        comment: &CommentCreateRequest,
    ) -> Result<Comment, ApiError>;

    async fn delete_comment(&self, comment_id: i64) -> Result<(), ApiError>;

    async fn get_replies(&self, comment_id: i64) -> Result<Vec<Comment>, ApiError>;
}

pub struct CommentServiceImpl<T: ApiClient> {
    client: Arc<T>,
}

impl<T: ApiClient> CommentServiceImpl<T> {
    pub fn new(client: Arc<T>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl<T: ApiClient + 'static> CommentService for CommentServiceImpl<T> {
    async fn get_comments(
        &self,
        post_id: i64,
        page: u32,
        size: u32,
    ) -> Result<CommentListResponse, ApiError> {
        let envelope: ApiResponse<CommentListResponse> = self
            .client
            .get(&format!("/comments/posts/{post_id}?page={page}&size={size}"))
            .await?;
        Ok(envelope.data)
    }

    async fn create_comment(
        &self,
        post_id: i64,
        comment: &CommentCreateRequest,
    ) -> Result<Comment, ApiError> {
        let envelope: ApiResponse<Comment> = self
            .client
            .post(&format!("/comments/posts/{post_id}"), comment)
            .await?;
        Ok(envelope.data)
    }

    async fn delete_comment(&self, comment_id: i64) -> Result<(), ApiError> {
        self.client
            .delete_void(&format!("/comments/{comment_id}"))
            .await
    }

    async fn get_replies(&self, comment_id: i64) -> Result<Vec<Comment>, ApiError> {
        let envelope: ApiResponse<Vec<Comment>> = self
            .client
            .get(&format!("/comments/{comment_id}/replies"))
            .await?;
        Ok(envelope.data)
    }
}
