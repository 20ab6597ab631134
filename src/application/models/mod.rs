pub mod book;
pub mod group;
pub mod post;
pub mod response;
pub mod user;
