//! Shared query parameter types for API handlers.

use serde::Deserialize;

/// `?search=` on every admin list endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub search: Option<String>,
}

impl SearchParams {
    /// The search term, empty when absent.
    pub fn term(&self) -> &str {
        self.search.as_deref().unwrap_or("")
    }
}

/// `?search=&status=` on the message list. `status` is `all`, `pending`
/// or `contacted`.
#[derive(Debug, Default, Deserialize)]
pub struct MessageListParams {
    pub search: Option<String>,
    pub status: Option<String>,
}
