/// The transport layer's declared contract with the session state.
///
/// Ordinary requests only read the current tokens; the refresh protocol
/// writes the newly issued pair, and an irrecoverable refresh failure
/// triggers `logout`. Keeping this a small trait (rather than handing the
/// transport the whole store) makes the dependency explicit and lets tests
/// substitute a double.
pub trait SessionHandle: Send + Sync {
    /// Current access token, if one is held.
    fn access_token(&self) -> Option<String>;

    /// Current refresh token, if one is held.
    fn refresh_token(&self) -> Option<String>;

    /// Replaces both tokens after a successful refresh exchange, in memory
    /// and in persisted storage, as one step.
    fn store_tokens(&self, access_token: &str, refresh_token: &str);

    /// Clears the session. Best-effort server notification, never blocks
    /// the caller and never fails.
    fn logout(&self);
}
