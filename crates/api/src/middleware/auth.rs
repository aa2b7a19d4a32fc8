//! JWT-based authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use sustaineco_core::error::CoreError;
use sustaineco_db::Conn;

use crate::auth::jwt::validate_access_token;
use crate::error::AppError;
use crate::state::AppState;

/// Signed-in admin extracted from a JWT Bearer token in the `Authorization`
/// header.
///
/// The raw token is kept so backend calls run as this user:
///
/// ```ignore
/// async fn my_handler(State(state): State<AppState>, user: AuthUser) -> AppResult<Json<()>> {
///     let conn = user.conn(&state);
///     tracing::info!(user_id = %user.user_id, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// Account id (`claims.sub`).
    pub user_id: String,
    pub email: Option<String>,
    /// The access token as presented.
    pub token: String,
}

impl AuthUser {
    /// Backend handle acting on behalf of this user.
    pub fn conn<'a>(&'a self, state: &'a AppState) -> Conn<'a> {
        Conn::authenticated(state.backend.as_ref(), &self.token)
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Missing Authorization header".into(),
                ))
            })?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid Authorization format. Expected: Bearer <token>".into(),
            ))
        })?;

        let claims = validate_access_token(token, &state.config.backend.jwt_secret)
            .map_err(|_| {
                AppError::Core(CoreError::Unauthorized("Invalid or expired token".into()))
            })?;

        Ok(AuthUser {
            user_id: claims.sub,
            email: claims.email,
            token: token.to_string(),
        })
    }
}
