//! Route definitions for the `/admin/messages` resource.

use axum::routing::{get, patch};
use axum::Router;

use crate::handlers::message;
use crate::state::AppState;

/// Routes mounted at `/admin/messages`.
///
/// ```text
/// GET    /             -> list
/// GET    /{id}         -> get_by_id
/// DELETE /{id}         -> delete
/// PATCH  /{id}/status  -> update_status
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(message::list))
        .route("/{id}", get(message::get_by_id).delete(message::delete))
        .route("/{id}/status", patch(message::update_status))
}
