use std::sync::Arc;

use sustaineco_db::{Conn, SharedBackend};

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Managed backend client (HTTP in production, in-memory in tests).
    pub backend: SharedBackend,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// Public-key backend handle for the marketing site.
    pub fn public_conn(&self) -> Conn<'_> {
        Conn::anonymous(self.backend.as_ref())
    }

    /// Bucket that receives every uploaded image.
    pub fn bucket(&self) -> &str {
        &self.config.backend.bucket
    }
}
