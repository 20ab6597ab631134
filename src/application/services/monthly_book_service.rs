use async_trait::async_trait;
use std::sync::Arc;

use crate::application::models::group::{MonthlyBook, MonthlyBookSelectRequest};
use crate::application::models::response::{ApiResponse, EmptyBody};
use crate::error::ApiError;
use crate::transport::ApiClient;

/// Monthly book picks of a reading group
/// (`/reading-groups/{id}/monthly-books`).
#[async_trait]
pub trait MonthlyBookService: Send + Sync {
    /// The pick for the current month, if one was selected.
    async fn get_current_monthly_book(
        &self,
        group_id: i64,
    ) -> Result<Option<MonthlyBook>, ApiError>;

    /// All picks of the group, newest first.
    async fn get_monthly_books(&self, group_id: i64) -> Result<Vec<MonthlyBook>, ApiError>;

    async fn select_monthly_book(
        &self,
        group_id: i64,
        request: &MonthlyBookSelectRequest,
    ) -> Result<MonthlyBook, ApiError>;

    /// Moves a pick through its lifecycle (`UPCOMING`, `READING`, `COMPLETED`).
    async fn update_status(
        &self,
        group_id: i64,
        monthly_book_id: i64,
        status: &str,
    ) -> Result<MonthlyBook, ApiError>;
}

pub struct MonthlyBookServiceImpl<T: ApiClient> {
    client: Arc<T>,
}

impl<T: ApiClient> MonthlyBookServiceImpl<T> {
    pub fn new(client: Arc<T>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl<T: ApiClient + 'static> MonthlyBookService for MonthlyBookServiceImpl<T> {
    async fn get_current_monthly_book(
        &self,
        group_id: i64,
    ) -> Result<Option<MonthlyBook>, ApiError> {
        let result: Result<ApiResponse<MonthlyBook>, ApiError> = self
            .client
            .get(&format!("/reading-groups/{group_id}/monthly-books/current"))
            .await;
        match result {
            Ok(envelope) => Ok(Some(envelope.data)),
            // no pick for this month yet
            Err(ApiError::Server(404)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn get_monthly_books(&self, group_id: i64) -> Result<Vec<MonthlyBook>, ApiError> {
        let envelope: ApiResponse<Vec<MonthlyBook>> = self
            .client
            .get(&format!("/reading-groups/{group_id}/monthly-books"))
            .await?;
        Ok(envelope.data)
    }

    async fn select_monthly_book(
        &self,
        group_id: i64,
        request: &MonthlyBookSelectRequest,
    ) -> Result<MonthlyBook, ApiError> {
        let envelope: ApiResponse<MonthlyBook> = self
            .client
            .post(
                &format!("/reading-groups/{group_id}/monthly-books"),
                request,
            )
            .await?;
        Ok(envelope.data)
    }

    async fn update_status(
        &self,
        group_id: i64,
        monthly_book_id: i64,
        status: &str,
    ) -> Result<MonthlyBook, ApiError> {
        let endpoint = format!(
            "/reading-groups/{group_id}/monthly-books/{monthly_book_id}/status?status={}",
            urlencoding::encode(status)
        );
        let envelope: ApiResponse<MonthlyBook> =
            self.client.put(&endpoint, &EmptyBody {}).await?;
        Ok(envelope.data)
    }
}
