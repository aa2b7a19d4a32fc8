//! Route definitions for the `/admin/about` singleton.

use axum::routing::get;
use axum::Router;

use crate::handlers::about;
use crate::state::AppState;

/// ```text
/// GET /  -> get
/// PUT /  -> save
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(about::get).put(about::save))
}
