use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

use crate::application::models::book::{
    BookSearchResult, CurrentlyReading, CurrentlyReadingCreateRequest,
    CurrentlyReadingDuplicateCheckResponse, CurrentlyReadingUpdateRequest,
    ProgressUpdateRequest,
};
use crate::application::models::response::{ApiResponse, PageResponse};
use crate::error::ApiError;
use crate::transport::ApiClient;

/// Currently-reading shelf (`/currently-reading`).
#[async_trait]
pub trait CurrentlyReadingService: Send + Sync {
    async fn get_currently_reading(
        &self,
        page: u32,
        size: u32,
        search: Option<&str>,
    ) -> Result<PageResponse<CurrentlyReading>, ApiError>;

    async fn get_currently_reading_by_id(&self, id: i64) -> Result<CurrentlyReading, ApiError>;

    async fn add_currently_reading(
        &self,
        book: &CurrentlyReadingCreateRequest,
    ) -> Result<CurrentlyReading, ApiError>;

    async fn update_currently_reading(
        &self,
        id: i64,
        book: &CurrentlyReadingUpdateRequest,
    ) -> Result<CurrentlyReading, ApiError>;

    /// Updates only the reading progress and memo.
    async fn update_progress(
        &self,
        id: i64,
        progress: &ProgressUpdateRequest,
    ) -> Result<CurrentlyReading, ApiError>;

    async fn delete_currently_reading(&self, id: i64) -> Result<(), ApiError>;

    async fn search_books(
        &self,
        query: &str,
        max_results: u32,
    ) -> Result<Vec<BookSearchResult>, ApiError>;

    async fn check_duplicate(
        &self,
        title: &str,
        author: Option<&str>,
    ) -> Result<CurrentlyReadingDuplicateCheckResponse, ApiError>;

    /// Library rentals past their due date.
    async fn get_overdue_books(&self) -> Result<Vec<CurrentlyReading>, ApiError>;
}

pub struct CurrentlyReadingServiceImpl<T: ApiClient> {
    client: Arc<T>,
}

impl<T: ApiClient> CurrentlyReadingServiceImpl<T> {
    pub fn new(client: Arc<T>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl<T: ApiClient + 'static> CurrentlyReadingService for CurrentlyReadingServiceImpl<T> {
    async fn get_currently_reading(
        &self,
        page: u32,
        size: u32,
        search: Option<&str>,
    ) -> Result<PageResponse<CurrentlyReading>, ApiError> {
        let mut params = format!("page={page}&size={size}");
        if let Some(search) = search.filter(|s| !s.is_empty()) {
            params.push_str(&format!("&search={}", urlencoding::encode(search)));
        }
        let envelope: ApiResponse<PageResponse<CurrentlyReading>> = self
            .client
            .get(&format!("/currently-reading?{params}"))
            .await?;
        debug!(
            "Fetched {} currently-reading entries",
            envelope.data.content.len()
        );
        Ok(envelope.data)
    }

    async fn get_currently_reading_by_id(&self, id: i64) -> Result<CurrentlyReading, ApiError> {
        let envelope: ApiResponse<CurrentlyReading> =
            self.client.get(&format!("/currently-reading/{id}")).await?;
        Ok(envelope.data)
    }

    async fn add_currently_reading(
        &self,
        book: &CurrentlyReadingCreateRequest,
    ) -> Result<CurrentlyReading, ApiError> {
        let envelope: ApiResponse<CurrentlyReading> =
            self.client.post("/currently-reading", book).await?;
        Ok(envelope.data)
    }

    async fn update_currently_reading(
        &self,
        id: i64,
        book: &CurrentlyReadingUpdateRequest,
    ) -> Result<CurrentlyReading, ApiError> {
        let envelope: ApiResponse<CurrentlyReading> = self
            .client
            .put(&format!("/currently-reading/{id}"), book)
            .await?;
        Ok(envelope.data)
    }

    async fn update_progress(
        &self,
        id: i64,
        progress: &ProgressUpdateRequest,
    ) -> Result<CurrentlyReading, ApiError> {
        let envelope: ApiResponse<CurrentlyReading> = self
            .client
            .put(&format!("/currently-reading/{id}/progress"), progress)
            .await?;
        Ok(envelope.data)
    }

    async fn delete_currently_reading(&self, id: i64) -> Result<(), ApiError> {
        self.client
            .delete_void(&format!("/currently-reading/{id}"))
            .await
    }

    async fn search_books(
        &self,
        query: &str,
        max_results: u32,
    ) -> Result<Vec<BookSearchResult>, ApiError> {
        let endpoint = format!(
            "/currently-reading/search?query={}&maxResults={max_results}",
            urlencoding::encode(query)
        );
        let envelope: ApiResponse<Vec<BookSearchResult>> = self.client.get(&endpoint).await?;
        Ok(envelope.data)
    }

    async fn check_duplicate(
        &self,
        title: &str,
        author: Option<&str>,
    ) -> Result<CurrentlyReadingDuplicateCheckResponse, ApiError> {
        let mut params = format!("title={}", urlencoding::encode(title));
        if let Some(author) = author {
            params.push_str(&format!("&author={}", urlencoding::encode(author)));
        }
        let envelope: ApiResponse<CurrentlyReadingDuplicateCheckResponse> = self
            .client
            .get(&format!("/currently-reading/check-duplicate?{params}"))
            .await?;
        Ok(envelope.data)
    }

    async fn get_overdue_books(&self) -> Result<Vec<CurrentlyReading>, ApiError> {
        let envelope: ApiResponse<Vec<CurrentlyReading>> =
            self.client.get("/currently-reading/overdue").await?;
        Ok(envelope.data)
    }
}
