use async_trait::async_trait;
use std::sync::Arc;

use crate::application::models::book::{
    Wishlist, WishlistCreateRequest, WishlistDuplicateCheckResponse, WishlistUpdateRequest,
};
use crate::application::models::response::{ApiResponse, PageResponse};
use crate::error::ApiError;
use crate::transport::ApiClient;

/// Wishlist shelf (`/wishlists`).
#[async_trait]
pub trait WishlistService: Send + Sync {
    async fn get_wishlists(
        &self,
        page: u32,
        size: u32,
        search: Option<&str>,
    ) -> Result<PageResponse<Wishlist>, ApiError>;

    async fn get_wishlist(&self, id: i64) -> Result<Wishlist, ApiError>;

    async fn add_wishlist(&self, wishlist: &WishlistCreateRequest) -> Result<Wishlist, ApiError>;

    async fn update_wishlist(
        &self,
        id: i64,
        wishlist: &WishlistUpdateRequest,
    ) -> Result<Wishlist, ApiError>;

    async fn delete_wishlist(&self, id: i64) -> Result<(), ApiError>;

    async fn check_duplicate(
        &self,
        title: &str,
        author: Option<&str>,
    ) -> Result<WishlistDuplicateCheckResponse, ApiError>;
}

pub struct WishlistServiceImpl<T: ApiClient> {
    client: Arc<T>,
}

impl<T: ApiClient> WishlistServiceImpl<T> {
    pub fn new(client: Arc<T>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl<T: ApiClient + 'static> WishlistService for WishlistServiceImpl<T> {
    async fn get_wishlists(
        &self,
        page: u32,
        size: u32,
        search: Option<&str>,
    ) -> Result<PageResponse<Wishlist>, ApiError> {
        let mut params = format!("page={page}&size={size}");
        if let Some(search) = search.filter(|s| !s.is_empty()) {
            params.push_str(&format!("&search={}", urlencoding::encode(search)));
        }
        let envelope: ApiResponse<PageResponse<Wishlist>> =
            self.client.get(&format!("/wishlists?{params}")).await?;
        Ok(envelope.data)
    }

    async fn get_wishlist(&self, id: i64) -> Result<Wishlist, ApiError> {
        let envelope: ApiResponse<Wishlist> =
            self.client.get(&format!("/wishlists/{id}")).await?;
        Ok(envelope.data)
    }

    async fn add_wishlist(&self, wishlist: &WishlistCreateRequest) -> Result<Wishlist, ApiError> {
        let envelope: ApiResponse<Wishlist> = self.client.post("/wishlists", wishlist).await?;
        Ok(envelope.data)
    }

    async fn update_wishlist(
        &self,
        id: i64,
        wishlist: &WishlistUpdateRequest,
    ) -> Result<Wishlist, ApiError> {
        let envelope: ApiResponse<Wishlist> = self
            .client
            .put(&format!("/wishlists/{id}"), wishlist)
            .await?;
        Ok(envelope.data)
    }

    async fn delete_wishlist(&self, id: i64) -> Result<(), ApiError> {
        self.client.delete_void(&format!("/wishlists/{id}")).await
    }

    async fn check_duplicate(
        &self,
        title: &str,
        author: Option<&str>,
    ) -> Result<WishlistDuplicateCheckResponse, ApiError> {
        let mut params = format!("title={}", urlencoding::encode(title));
        if let Some(author) = author {
            params.push_str(&format!("&author={}", urlencoding::encode(author)));
        }
        let envelope: ApiResponse<WishlistDuplicateCheckResponse> = self
            .client
            .get(&format!("/wishlists/check-duplicate?{params}"))
            .await?;
        Ok(envelope.data)
    }
}
