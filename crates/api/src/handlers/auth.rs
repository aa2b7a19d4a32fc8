//! Handlers for the `/auth` resource.
//!
//! Accounts and sessions belong to the managed backend; these handlers
//! validate input, forward the call and translate the outcome.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use sustaineco_core::error::CoreError;
use sustaineco_core::password::{validate_new_password, PasswordFlow};
use sustaineco_db::backend::{BackendUser, Session};
use sustaineco_db::BackendError;
use validator::Validate;

use crate::error::{AppError, AppResult, BackendContext};
use crate::middleware::auth::AuthUser;
use crate::response::{DataResponse, MessageResponse};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/sign-in`.
#[derive(Debug, Deserialize, Validate)]
pub struct SignInRequest {
    #[validate(email(message = "Please enter a valid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Request body for `POST /auth/refresh`.
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Request body for `POST /auth/change-password`.
#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    pub old_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

/// Request body for `POST /auth/forgot-password`.
#[derive(Debug, Deserialize, Validate)]
pub struct ForgotPasswordRequest {
    #[validate(email(message = "Please enter a valid email address"))]
    pub email: String,
}

/// Request body for `POST /auth/reset-password`.
#[derive(Debug, Deserialize)]
pub struct ResetPasswordRequest {
    pub new_password: String,
    pub confirm_password: String,
}

fn unauthorized(message: &str) -> AppError {
    AppError::Core(CoreError::Unauthorized(message.to_string()))
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/sign-in
///
/// Password sign-in. Returns the backend session (access and refresh
/// tokens, lifetime, user).
pub async fn sign_in(
    State(state): State<AppState>,
    Json(mut input): Json<SignInRequest>,
) -> AppResult<Json<Session>> {
    input.email = input.email.trim().to_string();
    input.validate()?;

    let session = state
        .backend
        .sign_in_with_password(&input.email, &input.password)
        .await
        .map_err(|e| match e {
            BackendError::InvalidCredentials => unauthorized("Invalid email or password"),
            other => AppError::BackendFailed {
                message: "Sign in failed",
                source: other,
            },
        })?;

    tracing::info!(user_id = %session.user.id, "Admin signed in");
    Ok(Json(session))
}

/// POST /api/v1/auth/refresh
///
/// Exchange a refresh token for a new session.
pub async fn refresh(
    State(state): State<AppState>,
    Json(input): Json<RefreshRequest>,
) -> AppResult<Json<Session>> {
    let session = state
        .backend
        .refresh_session(&input.refresh_token)
        .await
        .map_err(|e| match e {
            BackendError::InvalidCredentials => unauthorized("Invalid or expired refresh token"),
            other => AppError::BackendFailed {
                message: "Session refresh failed",
                source: other,
            },
        })?;
    Ok(Json(session))
}

/// GET /api/v1/auth/session
///
/// The account behind the presented access token.
pub async fn session(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DataResponse<BackendUser>>> {
    let account = state
        .backend
        .get_user(&user.token)
        .await
        .or_fail("Failed to load session")?;
    Ok(Json(DataResponse { data: account }))
}

/// POST /api/v1/auth/sign-out
///
/// Revoke the user's refresh tokens. Returns 204 No Content.
pub async fn sign_out(State(state): State<AppState>, user: AuthUser) -> AppResult<StatusCode> {
    state
        .backend
        .sign_out(&user.token)
        .await
        .or_fail("Sign out failed")?;
    tracing::info!(user_id = %user.user_id, "Admin signed out");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/auth/change-password
///
/// Re-authenticates with the old password before setting the new one.
pub async fn change_password(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<ChangePasswordRequest>,
) -> AppResult<Json<MessageResponse>> {
    validate_new_password(
        PasswordFlow::Change,
        &input.new_password,
        &input.confirm_password,
    )?;

    let email = match user.email.clone() {
        Some(email) => email,
        None => state
            .backend
            .get_user(&user.token)
            .await
            .or_fail("Failed to update password")?
            .email
            .ok_or_else(|| unauthorized("User not found."))?,
    };

    match state
        .backend
        .sign_in_with_password(&email, &input.old_password)
        .await
    {
        Ok(_) => {}
        Err(BackendError::InvalidCredentials) => {
            return Err(AppError::Core(CoreError::Validation(
                "Old password is incorrect.".into(),
            )));
        }
        Err(other) => {
            return Err(AppError::BackendFailed {
                message: "Failed to update password",
                source: other,
            });
        }
    }

    state
        .backend
        .update_password(&user.token, &input.new_password)
        .await
        .or_fail("Failed to update password")?;

    tracing::info!(user_id = %user.user_id, "Password changed");
    Ok(Json(MessageResponse::new("Password updated successfully!")))
}

/// POST /api/v1/auth/forgot-password
///
/// Ask the backend to email a reset link that opens the reset page.
pub async fn forgot_password(
    State(state): State<AppState>,
    Json(mut input): Json<ForgotPasswordRequest>,
) -> AppResult<Json<MessageResponse>> {
    input.email = input.email.trim().to_string();
    input.validate()?;

    state
        .backend
        .reset_password_for_email(&input.email, &state.config.password_reset_redirect)
        .await
        .or_fail("Failed to send password reset email")?;

    Ok(Json(MessageResponse::new(
        "Password reset email sent! Check your inbox.",
    )))
}

/// POST /api/v1/auth/reset-password
///
/// Called with the recovery session opened by the reset link.
pub async fn reset_password(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<ResetPasswordRequest>,
) -> AppResult<Json<MessageResponse>> {
    validate_new_password(
        PasswordFlow::Reset,
        &input.new_password,
        &input.confirm_password,
    )?;

    state
        .backend
        .update_password(&user.token, &input.new_password)
        .await
        .or_fail("Failed to reset password")?;

    tracing::info!(user_id = %user.user_id, "Password reset");
    Ok(Json(MessageResponse::new(
        "Password reset successful! You can now log in.",
    )))
}
