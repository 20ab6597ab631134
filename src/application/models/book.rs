use serde::{Deserialize, Serialize};

use super::user::User;

/// Shelf a book lives on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookStatus {
    Completed,
    CurrentlyReading,
    Dropped,
    Wishlist,
}

/// A completed book in the user's library.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub author: Option<String>,
    pub cover_image: Option<String>,
    pub rating: u8,
    pub review: Option<String>,
    pub finished_date: String,
    pub created_at: String,
    pub updated_at: String,
    pub status: Option<BookStatus>,
    pub user: Option<User>,
}

/// Hit from the external catalogue search.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookSearchResult {
    pub title: String,
    pub author: Option<String>,
    pub publisher: Option<String>,
    pub pub_date: Option<String>,
    pub description: Option<String>,
    pub cover: Option<String>,
    pub isbn: Option<String>,
    pub category_name: Option<String>,
    pub price_standard: Option<i64>,
}

/// How a currently-reading book is being read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReadingType {
    PaperBook,
    LibraryRental,
    Millie,
    EBook,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentlyReading {
    pub id: i64,
    pub title: String,
    pub author: Option<String>,
    pub cover_image: Option<String>,
    pub publisher: Option<String>,
    pub published_date: Option<String>,
    pub description: Option<String>,
    pub reading_type: String,
    pub reading_type_display: Option<String>,
    pub due_date: Option<String>,
    pub progress_percentage: u8,
    pub memo: Option<String>,
    pub is_overdue: Option<bool>,
    pub created_at: String,
    pub updated_at: String,
    pub user: Option<User>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DroppedBook {
    pub id: i64,
    pub title: String,
    pub author: Option<String>,
    pub cover_image: Option<String>,
    pub publisher: Option<String>,
    pub published_date: Option<String>,
    pub description: Option<String>,
    pub drop_reason: Option<String>,
    pub progress_percentage: u8,
    pub created_at: String,
    pub updated_at: String,
    pub user: Option<User>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wishlist {
    pub id: i64,
    pub title: String,
    pub author: Option<String>,
    pub cover_image: Option<String>,
    pub publisher: Option<String>,
    pub published_date: Option<String>,
    pub description: Option<String>,
    pub memo: Option<String>,
    pub created_at: String,
    pub updated_at: String,
    pub user: Option<User>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookCreateRequest {
    pub title: String,
    pub author: Option<String>,
    pub cover_image: Option<String>,
    pub rating: u8,
    pub review: Option<String>,
    pub finished_date: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookUpdateRequest {
    pub title: String,
    pub author: Option<String>,
    pub cover_image: Option<String>,
    pub rating: u8,
    pub review: Option<String>,
    pub finished_date: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentlyReadingCreateRequest {
    pub title: String,
    pub author: Option<String>,
    pub cover_image: Option<String>,
    pub publisher: Option<String>,
    pub published_date: Option<String>,
    pub description: Option<String>,
    pub reading_type: ReadingType,
    pub due_date: Option<String>,
    pub progress_percentage: u8,
    pub memo: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentlyReadingUpdateRequest {
    pub title: String,
    pub author: Option<String>,
    pub cover_image: Option<String>,
    pub publisher: Option<String>,
    pub published_date: Option<String>,
    pub description: Option<String>,
    pub reading_type: ReadingType,
    pub due_date: Option<String>,
    pub progress_percentage: u8,
    pub memo: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressUpdateRequest {
    pub progress_percentage: u8,
    pub memo: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DroppedBookCreateRequest {
    pub title: String,
    pub author: Option<String>,
    pub isbn: Option<String>,
    pub cover_image: Option<String>,
    pub publisher: Option<String>,
    pub published_date: Option<String>,
    pub description: Option<String>,
    pub reading_type: Option<String>,
    pub progress_percentage: u8,
    pub drop_reason: Option<String>,
    pub started_date: Option<String>,
    pub dropped_date: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DroppedBookUpdateRequest {
    pub drop_reason: Option<String>,
    pub progress_percentage: u8,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistCreateRequest {
    pub title: String,
    pub author: Option<String>,
    pub cover_image: Option<String>,
    pub publisher: Option<String>,
    pub published_date: Option<String>,
    pub description: Option<String>,
    pub memo: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistUpdateRequest {
    pub memo: Option<String>,
}

/// Per-month completion counts for the statistics screen.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyStats {
    pub year: i32,
    pub month: u8,
    pub count: u32,
    pub average_rating: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DuplicateCheckResponse {
    pub duplicate: bool,
    pub duplicate_books: Option<Vec<Book>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentlyReadingDuplicateCheckResponse {
    pub duplicate: bool,
    pub duplicate_books: Option<Vec<CurrentlyReading>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DroppedBookDuplicateCheckResponse {
    pub duplicate: bool,
    pub existing_book: Option<DroppedBook>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistDuplicateCheckResponse {
    pub duplicate: bool,
    pub duplicate_wishlists: Option<Vec<Wishlist>>,
}
