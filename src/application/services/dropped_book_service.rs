use async_trait::async_trait;
use std::sync::Arc;

use crate::application::models::book::{
    DroppedBook, DroppedBookCreateRequest, DroppedBookDuplicateCheckResponse,
    DroppedBookUpdateRequest,
};
use crate::application::models::response::{ApiResponse, PageResponse};
use crate::error::ApiError;
use crate::transport::ApiClient;

/// Dropped-books shelf (`/dropped-books`).
#[async_trait]
pub trait DroppedBookService: Send + Sync {
    async fn get_dropped_books(
        &self,
        page: u32,
        size: u32,
        search: Option<&str>,
    ) -> Result<PageResponse<DroppedBook>, ApiError>;

    async fn get_dropped_book(&self, id: i64) -> Result<DroppedBook, ApiError>;

    async fn add_dropped_book(
        &self,
        book: &DroppedBookCreateRequest,
    ) -> Result<DroppedBook, ApiError>;

    async fn update_dropped_book(
        &self,
        id: i64,
        book: &DroppedBookUpdateRequest,
    ) -> Result<DroppedBook, ApiError>;

    async fn delete_dropped_book(&self, id: i64) -> Result<(), ApiError>;

    async fn check_duplicate(
        &self,
        title: &str,
        author: Option<&str>,
    ) -> Result<DroppedBookDuplicateCheckResponse, ApiError>;
}

pub struct DroppedBookServiceImpl<T: ApiClient> {
    client: Arc<T>,
}

impl<T: ApiClient> DroppedBookServiceImpl<T> {
    pub fn new(client: Arc<T>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl<T: ApiClient + 'static> DroppedBookService for DroppedBookServiceImpl<T> {
    async fn get_dropped_books(
        &self,
        page: u32,
        size: u32,
        search: Option<&str>,
    ) -> Result<PageResponse<DroppedBook>, ApiError> {
        let mut params = format!("page={page}&size={size}");
        if let Some(search) = search.filter(|s| !s.is_empty()) {
            params.push_str(&format!("&search={}", urlencoding::encode(search)));
        }
        let envelope: ApiResponse<PageResponse<DroppedBook>> =
            self.client.get(&format!("/dropped-books?{params}")).await?;
        Ok(envelope.data)
    }

    async fn get_dropped_book(&self, id: i64) -> Result<DroppedBook, ApiError> {
        let envelope: ApiResponse<DroppedBook> =
            self.client.get(&format!("/dropped-books/{id}")).await?;
        Ok(envelope.data)
    }

    async fn add_dropped_book(
        &self,
        book: &DroppedBookCreateRequest,
    ) -> Result<DroppedBook, ApiError> {
        let envelope: ApiResponse<DroppedBook> =
            self.client.post("/dropped-books", book).await?;
        Ok(envelope.data)
    }

    async fn update_dropped_book(
        &self,
        id: i64,
        book: &DroppedBookUpdateRequest,
    ) -> Result<DroppedBook, ApiError> {
        let envelope: ApiResponse<DroppedBook> = self
            .client
            .put(&format!("/dropped-books/{id}"), book)
            .await?;
        Ok(envelope.data)
    }

    async fn delete_dropped_book(&self, id: i64) -> Result<(), ApiError> {
        self.client
            .delete_void(&format!("/dropped-books/{id}"))
            .await
    }

    async fn check_duplicate(
        &self,
        title: &str,
        author: Option<&str>,
    ) -> Result<DroppedBookDuplicateCheckResponse, ApiError> {
        let mut params = format!("title={}", urlencoding::encode(title));
        if let Some(author) = author {
            params.push_str(&format!("&author={}", urlencoding::encode(author)));
        }
        let envelope: ApiResponse<DroppedBookDuplicateCheckResponse> = self
            .client
            .get(&format!("/dropped-books/check-duplicate?{params}"))
            .await?;
        Ok(envelope.data)
    }
}
