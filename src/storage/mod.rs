pub mod credentials;

pub use credentials::{CredentialStorage, FileCredentialStorage, MemoryCredentialStorage};
