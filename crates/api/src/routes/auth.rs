//! Route definitions for the `/auth` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Routes mounted at `/auth`.
///
/// ```text
/// POST /sign-in          -> sign_in
/// POST /refresh          -> refresh
/// GET  /session          -> session (requires auth)
/// POST /sign-out         -> sign_out (requires auth)
/// POST /change-password  -> change_password (requires auth)
/// POST /forgot-password  -> forgot_password
/// POST /reset-password   -> reset_password (recovery session)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/sign-in", post(auth::sign_in))
        .route("/refresh", post(auth::refresh))
        .route("/session", get(auth::session))
        .route("/sign-out", post(auth::sign_out))
        .route("/change-password", post(auth::change_password))
        .route("/forgot-password", post(auth::forgot_password))
        .route("/reset-password", post(auth::reset_password))
}
