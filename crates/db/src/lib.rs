//! Access layer for the managed backend.
//!
//! The backend hosts the content tables, the public image bucket and the
//! admin accounts. [`backend::Backend`] is the seam over its three APIs;
//! [`repositories`] issue one call per admin or site operation on top of it.

use std::sync::Arc;

pub mod backend;
pub mod models;
pub mod repositories;

pub use backend::{Backend, BackendConfig, BackendError, Conn};

/// Shared handle to whichever backend implementation the server runs with.
pub type SharedBackend = Arc<dyn Backend>;

/// Check that the backend answers.
pub async fn health_check(backend: &dyn Backend) -> Result<(), BackendError> {
    backend.health().await
}
