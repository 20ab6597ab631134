use reqwest::StatusCode;
use std::fmt;
use std::fmt::{Display, Formatter};

/// Errors surfaced by the transport layer and the domain services.
///
/// All variants are terminal for the call that produced them; the only retry
/// the client ever performs is the implicit 401 -> refresh -> replay path,
/// which happens before an error is surfaced.
#[derive(Debug)]
pub enum ApiError {
    /// The base URL plus endpoint did not form a valid URL. Programmer error
    /// at the call site, not user-facing.
    InvalidUrl,
    /// A 2xx response arrived with an empty body where an envelope was
    /// expected.
    NoData,
    /// The response body did not match the expected envelope shape.
    Decoding(serde_json::Error),
    /// Non-2xx, non-recoverable status, carrying the numeric code. A 401 on
    /// a call with refresh-retry disallowed also lands here.
    Server(u16),
    /// A 401 that could not be resolved via refresh, or a failure of the
    /// refresh endpoint itself. The session has been cleared by the time
    /// this surfaces.
    Unauthorized,
    /// Transport-level failure: timeout, DNS, connection reset.
    Network(reqwest::Error),
}

impl Display for ApiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::InvalidUrl => write!(f, "invalid request url"),
            ApiError::NoData => write!(f, "empty response body"),
            ApiError::Decoding(e) => write!(f, "decoding error: {e}"),
            ApiError::Server(code) => write!(f, "server error: http {code}"),
            ApiError::Unauthorized => write!(f, "unauthorized"),
            ApiError::Network(e) => write!(f, "network error: {e}"),
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApiError::Decoding(e) => Some(e),
            ApiError::Network(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Network(err)
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decoding(err)
    }
}

/// Errors from the authorization-code exchange, classified so the caller can
/// show a meaningful message. This path does not participate in the refresh
/// protocol.
#[derive(Debug)]
pub enum AuthError {
    Network(reqwest::Error),
    Json(serde_json::Error),
    /// 404 from the callback endpoint: the backend does not expose it.
    EndpointMissing(String),
    /// 400 from the callback endpoint: the authorization code was rejected.
    InvalidCode(String),
    /// The envelope arrived with `success == false`.
    Rejected(String),
    Unexpected(StatusCode),
}

impl Display for AuthError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::Network(e) => write!(f, "network error: {e}"),
            AuthError::Json(e) => write!(f, "json error: {e}"),
            AuthError::EndpointMissing(msg) => write!(f, "endpoint missing: {msg}"),
            AuthError::InvalidCode(msg) => write!(f, "invalid authorization code: {msg}"),
            AuthError::Rejected(msg) => write!(f, "login rejected: {msg}"),
            AuthError::Unexpected(s) => write!(f, "unexpected http status: {s}"),
        }
    }
}

impl std::error::Error for AuthError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AuthError::Network(e) => Some(e),
            AuthError::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for AuthError {
    fn from(err: reqwest::Error) -> Self {
        AuthError::Network(err)
    }
}

impl From<serde_json::Error> for AuthError {
    fn from(err: serde_json::Error) -> Self {
        AuthError::Json(err)
    }
}
