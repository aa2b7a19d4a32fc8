//! Route definitions for the public `/site` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::site;
use crate::state::AppState;

/// Routes mounted at `/site`.
///
/// ```text
/// GET  /          -> content
/// GET  /hero      -> hero
/// GET  /projects  -> projects
/// GET  /clients   -> clients
/// GET  /contact   -> contact
/// GET  /about     -> about
/// POST /messages  -> submit_message
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(site::content))
        .route("/hero", get(site::hero))
        .route("/projects", get(site::projects))
        .route("/clients", get(site::clients))
        .route("/contact", get(site::contact))
        .route("/about", get(site::about))
        .route("/messages", post(site::submit_message))
}
