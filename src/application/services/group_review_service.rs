use async_trait::async_trait;
use std::sync::Arc;

use crate::application::models::group::{
    GroupReview, GroupReviewCreateRequest, GroupReviewUpdateRequest,
};
use crate::application::models::response::ApiResponse;
use crate::error::ApiError;
use crate::transport::ApiClient;

/// Member reviews of a reading group (`/group-reviews`).
#[async_trait]
pub trait GroupReviewService: Send + Sync {
    async fn create_review(
        &self,
        review: &GroupReviewCreateRequest,
    ) -> Result<GroupReview, ApiError>;

    /// Public reviews of a group plus the caller's own.
    async fn get_group_reviews(&self, group_id: i64) -> Result<Vec<GroupReview>, ApiError>;

    /// The caller's review of the group, if they wrote one.
    async fn get_my_review(&self, group_id: i64) -> Result<Option<GroupReview>, ApiError>;

    async fn update_review(
        &self,
        review_id: i64,
        review: &GroupReviewUpdateRequest,
    ) -> Result<GroupReview, ApiError>;

    async fn delete_review(&self, review_id: i64) -> Result<(), ApiError>;
}

pub struct GroupReviewServiceImpl<T: ApiClient> {
    client: Arc<T>,
}

impl<T: ApiClient> GroupReviewServiceImpl<T> {
    pub fn new(client: Arc<T>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl<T: ApiClient + 'static> GroupReviewService for GroupReviewServiceImpl<T> {
    async fn create_review(
        &self,
        review: &GroupReviewCreateRequest,
    ) -> Result<GroupReview, ApiError> {
        let envelope: ApiResponse<GroupReview> =
            self.client.post("/group-reviews", review).await?;
        Ok(envelope.data)
    }

    async fn get_group_reviews(&self, group_id: i64) -> Result<Vec<GroupReview>, ApiError> {
        let envelope: ApiResponse<Vec<GroupReview>> = self
            .client
            .get(&format!("/group-reviews/group/{group_id}"))
            .await?;
        Ok(envelope.data)
    }

    async fn get_my_review(&self, group_id: i64) -> Result<Option<GroupReview>, ApiError> {
        let result: Result<ApiResponse<GroupReview>, ApiError> = self
            .client
            .get(&format!("/group-reviews/my-review/{group_id}"))
            .await;
        match result {
            Ok(envelope) => Ok(Some(envelope.data)),
            // the caller has not reviewed this group
            Err(ApiError::Server(404)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn update_review(
        &self,
        review_id: i64,
        review: &GroupReviewUpdateRequest,
    ) -> Result<GroupReview, ApiError> {
        let envelope: ApiResponse<GroupReview> = self
            .client
            .put(&format!("/group-reviews/{review_id}"), review)
            .await?;
        Ok(envelope.data)
    }

    async fn delete_review(&self, review_id: i64) -> Result<(), ApiError> {
        self.client
            .delete_void(&format!("/group-reviews/{review_id}"))
            .await
    }
}
