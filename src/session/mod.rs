pub mod interface;
pub mod store;

pub use interface::SessionHandle;
pub use store::{Session, SessionStore};
