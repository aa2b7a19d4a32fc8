pub mod about;
pub mod auth;
pub mod client;
pub mod contact;
pub mod dashboard;
pub mod health;
pub mod hero;
pub mod message;
pub mod project;
pub mod site;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/sign-in                        sign in (public)
/// /auth/refresh                        refresh session (public)
/// /auth/forgot-password                send reset email (public)
/// /auth/session                        current user (requires auth)
/// /auth/sign-out                       sign out (requires auth)
/// /auth/change-password                change password (requires auth)
/// /auth/reset-password                 set password from reset link (recovery session)
///
/// /admin/dashboard                     record counts
/// /admin/hero                          get, save (multipart)
/// /admin/projects                      list (?search), create (multipart)
/// /admin/projects/{id}                 get, update (multipart), delete
/// /admin/clients                       list (?search), create (multipart)
/// /admin/clients/{id}                  get, update (multipart), delete
/// /admin/contact                       section + items
/// /admin/contact/section               save section heading (PUT)
/// /admin/contact/items                 list (?search), create
/// /admin/contact/items/{id}            get, update, delete
/// /admin/about                         get, save
/// /admin/messages                      list (?search, status) with counts
/// /admin/messages/{id}                 get, delete
/// /admin/messages/{id}/status          update status (PATCH)
///
/// /site                                whole landing page (public)
/// /site/hero                           hero section
/// /site/projects                       projects, newest first
/// /site/clients                        clients, newest first
/// /site/contact                        heading + contact items
/// /site/about                          about us text
/// /site/messages                       contact form submission (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    let admin = Router::new()
        .nest("/dashboard", dashboard::router())
        .nest("/hero", hero::router())
        .nest("/projects", project::router())
        .nest("/clients", client::router())
        .nest("/contact", contact::router())
        .nest("/about", about::router())
        .nest("/messages", message::router());

    Router::new()
        .nest("/auth", auth::router())
        .nest("/admin", admin)
        .nest("/site", site::router())
}
