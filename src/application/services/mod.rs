pub mod book_service;
pub mod comment_service;
pub mod currently_reading_service;
pub mod dropped_book_service;
pub mod group_review_service;
pub mod monthly_book_service;
pub mod post_service;
pub mod reading_group_service;
pub mod user_service;
pub mod wishlist_service;
