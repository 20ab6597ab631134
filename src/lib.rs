//! Async client for the ReadingWithMe REST API.
//!
//! The crate is organised around two collaborating pieces: the
//! [`session::SessionStore`], which owns the authenticated session and its
//! persisted credentials, and the [`transport::HttpApiClient`], which executes
//! requests, injects the bearer token and runs the refresh-and-retry protocol
//! on 401 responses. Everything under [`application::services`] is a thin
//! typed wrapper over the transport, one per backend resource.

pub mod config;

pub mod constants;

pub mod error;

pub mod application;

pub mod session;

pub mod storage;

pub mod transport;

pub mod utils;
