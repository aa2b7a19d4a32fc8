//! Route definitions for the `/admin/hero` singleton.

use axum::routing::get;
use axum::Router;

use crate::handlers::hero;
use crate::state::AppState;

/// ```text
/// GET /  -> get
/// PUT /  -> save (multipart)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(hero::get).put(hero::save))
}
