use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

use crate::application::models::book::{
    Book, BookCreateRequest, BookSearchResult, BookUpdateRequest, DuplicateCheckResponse,
    MonthlyStats,
};
use crate::application::models::response::{ApiResponse, PageResponse};
use crate::error::ApiError;
use crate::transport::ApiClient;

/// Filters for the completed-books list.
#[derive(Debug, Clone)]
pub struct BookListQuery {
    pub page: u32,
    pub size: u32,
    pub year: Option<i32>,
    pub month: Option<u8>,
    pub rating: Option<u8>,
    pub search: Option<String>,
}

impl Default for BookListQuery {
    fn default() -> Self {
        Self {
            page: 0,
            size: 100,
            year: None,
            month: None,
            rating: None,
            search: None,
        }
    }
}

/// Completed-books resource (`/books`).
#[async_trait]
pub trait BookService: Send + Sync {
    async fn get_books(&self, query: &BookListQuery) -> Result<PageResponse<Book>, ApiError>;

    async fn get_book(&self, id: i64) -> Result<Book, ApiError>;

    async fn add_book(&self, book: &BookCreateRequest) -> Result<Book, ApiError>;

    async fn update_book(&self, id: i64, book: &BookUpdateRequest) -> Result<Book, ApiError>;

    async fn delete_book(&self, id: i64) -> Result<(), ApiError>;

    /// External catalogue search, server-side ranking.
    async fn search_books(
        &self,
        query: &str,
        max_results: u32,
    ) -> Result<Vec<BookSearchResult>, ApiError>;

    /// Server-side duplicate detection by title and optional author.
    async fn check_duplicate(
        &self,
        title: &str,
        author: Option<&str>,
    ) -> Result<DuplicateCheckResponse, ApiError>;

    async fn get_monthly_statistics(&self) -> Result<Vec<MonthlyStats>, ApiError>;
}

pub struct BookServiceImpl<T: ApiClient> {
    client: Arc<T>,
}

impl<T: ApiClient> BookServiceImpl<T> {
    pub fn new(client: Arc<T>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl<T: ApiClient + 'static> BookService for BookServiceImpl<T> {
    async fn get_books(&self, query: &BookListQuery) -> Result<PageResponse<Book>, ApiError> {
        let mut params = format!("page={}&size={}", query.page, query.size);
        if let Some(year) = query.year {
            params.push_str(&format!("&year={year}"));
        }
        if let Some(month) = query.month {
            params.push_str(&format!("&month={month}"));
        }
        if let Some(rating) = query.rating {
            params.push_str(&format!("&rating={rating}"));
        }
        if let Some(search) = query.search.as_deref().filter(|s| !s.is_empty()) {
            params.push_str(&format!("&search={}", urlencoding::encode(search)));
        }

        let envelope: ApiResponse<PageResponse<Book>> =
            self.client.get(&format!("/books?{params}")).await?;
        debug!("Fetched {} books", envelope.data.content.len());
        Ok(envelope.data)
    }

    async fn get_book(&self, id: i64) -> Result<Book, ApiError> {
        let envelope: ApiResponse<Book> = self.client.get(&format!("/books/{id}")).await?;
        Ok(envelope.data)
    }

    async fn add_book(&self, book: &BookCreateRequest) -> Result<Book, ApiError> {
        let envelope: ApiResponse<Book> = self.client.post("/books", book).await?;
        Ok(envelope.data)
    }

    async fn update_book(&self, id: i64, book: &BookUpdateRequest) -> Result<Book, ApiError> {
        let envelope: ApiResponse<Book> =
            self.client.put(&format!("/books/{id}"), book).await?;
        Ok(envelope.data)
    }

    async fn delete_book(&self, id: i64) -> Result<(), ApiError> {
        self.client.delete_void(&format!("/books/{id}")).await
    }

    async fn search_books(
        &self,
        query: &str,
        max_results: u32,
    ) -> Result<Vec<BookSearchResult>, ApiError> {
        let endpoint = format!(
            "/books/search?query={}&maxResults={max_results}",
            urlencoding::encode(query)
        );
        let envelope: ApiResponse<Vec<BookSearchResult>> = self.client.get(&endpoint).await?;
        Ok(envelope.data)
    }

    async fn check_duplicate(
        &self,
        title: &str,
        author: Option<&str>,
    ) -> Result<DuplicateCheckResponse, ApiError> {
        let mut params = format!("title={}", urlencoding::encode(title));
        if let Some(author) = author {
            params.push_str(&format!("&author={}", urlencoding::encode(author)));
        }
        let envelope: ApiResponse<DuplicateCheckResponse> = self
            .client
            .get(&format!("/books/check-duplicate?{params}"))
            .await?;
        Ok(envelope.data)
    }

    async fn get_monthly_statistics(&self) -> Result<Vec<MonthlyStats>, ApiError> {
        let envelope: ApiResponse<Vec<MonthlyStats>> =
            self.client.get("/books/statistics/monthly").await?;
        Ok(envelope.data)
    }
}
