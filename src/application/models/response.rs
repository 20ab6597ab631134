use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};

/// Envelope wrapped around every successful API response.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
    pub message: String,
    pub timestamp: String,
}

/// Flat paging payload used by every list endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse<T> {
    pub content: Vec<T>,
    pub page_number: u32,
    pub page_size: u32,
    pub total_pages: u32,
    pub total_elements: u64,
    pub is_first: bool,
    pub is_last: bool,
    pub number_of_elements_on_page: u32,
    pub is_empty: bool,
}

impl<T> PageResponse<T> {
    /// Page number to request next, derived from the server-reported
    /// `page_number` rather than a locally incremented counter, so follow-up
    /// requests cannot drift from server state.
    pub fn next_page(&self) -> Option<u32> {
        if self.is_last {
            None
        } else {
            Some(self.page_number + 1)
        }
    }
}

/// Request body placeholder for endpoints that take an empty JSON object.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct EmptyBody {}

/// Response payload for callers that discard the body. Decodes from any
/// JSON value, including `null`.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyResponse;

impl<'de> Deserialize<'de> for EmptyResponse {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        IgnoredAny::deserialize(deserializer)?;
        Ok(EmptyResponse)
    }
}
