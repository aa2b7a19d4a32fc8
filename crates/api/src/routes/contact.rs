//! Route definitions for the `/admin/contact` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::contact;
use crate::state::AppState;

/// Routes mounted at `/admin/contact`.
///
/// ```text
/// GET    /             -> overview
/// PUT    /section      -> save_section
/// GET    /items        -> list_items
/// POST   /items        -> create_item
/// GET    /items/{id}   -> get_item
/// PUT    /items/{id}   -> update_item
/// DELETE /items/{id}   -> delete_item
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(contact::overview))
        .route("/section", put(contact::save_section))
        .route("/items", get(contact::list_items).post(contact::create_item))
        .route(
            "/items/{id}",
            get(contact::get_item)
                .put(contact::update_item)
                .delete(contact::delete_item),
        )
}
