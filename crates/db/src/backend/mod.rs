//! The managed backend seam.
//!
//! - [`http::HttpBackend`] -- talks to the hosted table, storage and auth
//!   REST APIs with [`reqwest`].
//! - [`memory::MemoryBackend`] -- keeps everything in process; used by the
//!   test suites.
//!
//! Every call is a single round trip. Table and storage calls take an
//! optional bearer token: with one, the backend applies the signed-in
//! admin's row policies; without one, only the public key is sent.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub mod config;
pub mod http;
pub mod memory;

pub use config::BackendConfig;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors from any backend call.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The backend answered with a non-2xx status.
    #[error("Backend API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// A row or response body did not have the expected shape.
    #[error("Failed to decode backend response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Password sign-in or token refresh was refused.
    #[error("Invalid login credentials")]
    InvalidCredentials,

    /// The bearer token is missing, malformed or expired.
    #[error("Session is missing or expired")]
    Unauthorized,
}

// ---------------------------------------------------------------------------
// Table API
// ---------------------------------------------------------------------------

/// Sort clause of a select.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub column: String,
    pub ascending: bool,
}

/// Row selector: equality filters, optional ordering and limit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pub filters: Vec<(String, String)>,
    pub order: Option<Order>,
    pub limit: Option<usize>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a `column = value` filter.
    pub fn eq(mut self, column: &str, value: impl ToString) -> Self {
        self.filters.push((column.to_string(), value.to_string()));
        self
    }

    pub fn order_by(mut self, column: &str, ascending: bool) -> Self {
        self.order = Some(Order {
            column: column.to_string(),
            ascending,
        });
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

// ---------------------------------------------------------------------------
// Storage API
// ---------------------------------------------------------------------------

/// A file to place in a bucket.
#[derive(Debug, Clone)]
pub struct Upload {
    pub bucket: String,
    pub name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
    /// Overwrite an existing object with the same name instead of failing.
    pub upsert: bool,
}

// ---------------------------------------------------------------------------
// Auth API
// ---------------------------------------------------------------------------

/// Account as reported by the auth API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Tokens returned by a successful sign-in or refresh.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: BackendUser,
}

/// Audience the backend puts in every signed-in user's access token.
pub const AUTHENTICATED_AUDIENCE: &str = "authenticated";

/// Claims carried by the backend's HS256 access tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessClaims {
    /// The account id.
    pub sub: String,
    #[serde(default)]
    pub email: Option<String>,
    pub role: String,
    pub aud: String,
    pub exp: i64,
    pub iat: i64,
    #[serde(default)]
    pub session_id: Option<String>,
}

// ---------------------------------------------------------------------------
// The trait
// ---------------------------------------------------------------------------

#[async_trait]
pub trait Backend: Send + Sync {
    /// Cheap liveness probe.
    async fn health(&self) -> Result<(), BackendError>;

    async fn select(
        &self,
        table: &str,
        query: &Query,
        bearer: Option<&str>,
    ) -> Result<Vec<Value>, BackendError>;

    /// Insert one row and return it as stored.
    async fn insert(
        &self,
        table: &str,
        row: Value,
        bearer: Option<&str>,
    ) -> Result<Vec<Value>, BackendError>;

    /// Apply `patch` to every row matched by `query`, returning the updated rows.
    async fn update(
        &self,
        table: &str,
        query: &Query,
        patch: Value,
        bearer: Option<&str>,
    ) -> Result<Vec<Value>, BackendError>;

    /// Delete every row matched by `query`, returning the removed rows.
    async fn delete(
        &self,
        table: &str,
        query: &Query,
        bearer: Option<&str>,
    ) -> Result<Vec<Value>, BackendError>;

    async fn upload(&self, upload: Upload, bearer: Option<&str>) -> Result<(), BackendError>;

    async fn remove(
        &self,
        bucket: &str,
        names: &[String],
        bearer: Option<&str>,
    ) -> Result<(), BackendError>;

    /// Public URL of an object. Computed locally, no round trip.
    fn public_url(&self, bucket: &str, name: &str) -> String;

    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Session, BackendError>;

    async fn refresh_session(&self, refresh_token: &str) -> Result<Session, BackendError>;

    async fn get_user(&self, bearer: &str) -> Result<BackendUser, BackendError>;

    async fn update_password(
        &self,
        bearer: &str,
        new_password: &str,
    ) -> Result<BackendUser, BackendError>;

    /// Ask the backend to email a password-reset link pointing at `redirect_to`.
    async fn reset_password_for_email(
        &self,
        email: &str,
        redirect_to: &str,
    ) -> Result<(), BackendError>;

    async fn sign_out(&self, bearer: &str) -> Result<(), BackendError>;
}

// ---------------------------------------------------------------------------
// Connection handle
// ---------------------------------------------------------------------------

/// A backend plus the caller's token, passed to every repository call the
/// way a pool would be.
#[derive(Clone, Copy)]
pub struct Conn<'a> {
    pub backend: &'a dyn Backend,
    pub bearer: Option<&'a str>,
}

impl<'a> Conn<'a> {
    /// Public-key access, as the marketing site uses.
    pub fn anonymous(backend: &'a dyn Backend) -> Self {
        Self {
            backend,
            bearer: None,
        }
    }

    /// Access on behalf of a signed-in admin.
    pub fn authenticated(backend: &'a dyn Backend, token: &'a str) -> Self {
        Self {
            backend,
            bearer: Some(token),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_builder_collects_clauses() {
        let query = Query::new()
            .eq("type", "contact")
            .eq("id", 7)
            .order_by("display_order", true)
            .limit(1);
        assert_eq!(
            query.filters,
            vec![
                ("type".to_string(), "contact".to_string()),
                ("id".to_string(), "7".to_string()),
            ]
        );
        assert_eq!(
            query.order,
            Some(Order {
                column: "display_order".into(),
                ascending: true,
            })
        );
        assert_eq!(query.limit, Some(1));
    }
}
