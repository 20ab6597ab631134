//! Fixed endpoint paths, storage keys and defaults shared across the crate.

/// Production API host, overridable through `API_BASE_URL`.
pub const DEFAULT_BASE_URL: &str = "https://api.readingwithme.xyz/api";

/// Per-request timeout in seconds, overridable through `API_TIMEOUT`.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

pub(crate) const AUTH_REFRESH_ENDPOINT: &str = "/auth/refresh";
pub(crate) const AUTH_LOGOUT_ENDPOINT: &str = "/auth/logout";
pub(crate) const AUTH_DEV_LOGIN_ENDPOINT: &str = "/auth/dev-login";
pub(crate) const AUTH_KAKAO_CALLBACK_ENDPOINT: &str = "/auth/kakao/callback";
pub(crate) const USERS_ME_ENDPOINT: &str = "/users/me";

/// Storage key for the persisted access token.
pub const ACCESS_TOKEN_KEY: &str = "accessToken";
/// Storage key for the persisted refresh token.
pub const REFRESH_TOKEN_KEY: &str = "refreshToken";
/// Storage key for the serialized current-user record.
pub const USER_KEY: &str = "user";
