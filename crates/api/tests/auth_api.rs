//! HTTP-level integration tests for the auth endpoints.
//!
//! Tests cover sign-in, refresh, session lookup, sign-out, password change
//! and the forgot/reset password flow.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, get, get_auth, post_json, post_json_auth, sign_in, ADMIN_EMAIL, ADMIN_PASSWORD,
    RESET_REDIRECT,
};
use serde_json::json;

// ---------------------------------------------------------------------------
// Sign-in and sessions
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_sign_in_success() {
    let app = common::build_test_app(common::test_backend());

    let body = json!({ "email": ADMIN_EMAIL, "password": ADMIN_PASSWORD });
    let response = post_json(app, "/api/v1/auth/sign-in", body).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert!(json["access_token"].is_string());
    assert!(json["refresh_token"].is_string());
    assert_eq!(json["expires_in"], 3600);
    assert_eq!(json["user"]["email"], ADMIN_EMAIL);
}

#[tokio::test]
async fn test_sign_in_trims_email() {
    let app = common::build_test_app(common::test_backend());

    let padded = format!("  {ADMIN_EMAIL} ");
    let body = json!({ "email": padded, "password": ADMIN_PASSWORD });
    let response = post_json(app, "/api/v1/auth/sign-in", body).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["user"]["email"], ADMIN_EMAIL);
}

#[tokio::test]
async fn test_sign_in_wrong_password() {
    let app = common::build_test_app(common::test_backend());

    let body = json!({ "email": ADMIN_EMAIL, "password": "not-the-password" });
    let response = post_json(app, "/api/v1/auth/sign-in", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let json = body_json(response).await;
    assert_eq!(json["error"], "Invalid email or password");
}

#[tokio::test]
async fn test_sign_in_rejects_malformed_email() {
    let app = common::build_test_app(common::test_backend());

    let body = json!({ "email": "not-an-email", "password": "whatever" });
    let response = post_json(app, "/api/v1/auth/sign-in", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"], "Please enter a valid email address");
}

#[tokio::test]
async fn test_refresh_rotates_tokens() {
    let app = common::build_test_app(common::test_backend());

    let body = json!({ "email": ADMIN_EMAIL, "password": ADMIN_PASSWORD });
    let session = body_json(post_json(app.clone(), "/api/v1/auth/sign-in", body).await).await;
    let refresh_token = session["refresh_token"].as_str().unwrap();

    let response = post_json(
        app.clone(),
        "/api/v1/auth/refresh",
        json!({ "refresh_token": refresh_token }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let refreshed = body_json(response).await;
    assert_ne!(refreshed["refresh_token"], session["refresh_token"]);

    // The old refresh token was consumed.
    let response = post_json(
        app,
        "/api/v1/auth/refresh",
        json!({ "refresh_token": refresh_token }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Invalid or expired refresh token");
}

#[tokio::test]
async fn test_session_requires_bearer_token() {
    let app = common::build_test_app(common::test_backend());

    let response = get(app.clone(), "/api/v1/auth/session").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Missing Authorization header");

    let response = get_auth(app, "/api/v1/auth/session", "not-a-jwt").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Invalid or expired token");
}

#[tokio::test]
async fn test_session_returns_current_user() {
    let app = common::build_test_app(common::test_backend());
    let token = sign_in(app.clone()).await;

    let response = get_auth(app, "/api/v1/auth/session", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["email"], ADMIN_EMAIL);
    assert!(json["data"]["id"].is_string());
}

#[tokio::test]
async fn test_sign_out_revokes_refresh_tokens() {
    let app = common::build_test_app(common::test_backend());

    let body = json!({ "email": ADMIN_EMAIL, "password": ADMIN_PASSWORD });
    let session = body_json(post_json(app.clone(), "/api/v1/auth/sign-in", body).await).await;
    let token = session["access_token"].as_str().unwrap();

    let response = post_json_auth(app.clone(), "/api/v1/auth/sign-out", token, json!({})).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = post_json(
        app,
        "/api/v1/auth/refresh",
        json!({ "refresh_token": session["refresh_token"] }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Password change
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_change_password_then_sign_in_with_new_password() {
    let app = common::build_test_app(common::test_backend());
    let token = sign_in(app.clone()).await;

    let body = json!({
        "old_password": ADMIN_PASSWORD,
        "new_password": "brand-new-secret",
        "confirm_password": "brand-new-secret",
    });
    let response = post_json_auth(app.clone(), "/api/v1/auth/change-password", &token, body).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Password updated successfully!");

    let old = json!({ "email": ADMIN_EMAIL, "password": ADMIN_PASSWORD });
    let response = post_json(app.clone(), "/api/v1/auth/sign-in", old).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let new = json!({ "email": ADMIN_EMAIL, "password": "brand-new-secret" });
    let response = post_json(app, "/api/v1/auth/sign-in", new).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_change_password_rejects_wrong_old_password() {
    let app = common::build_test_app(common::test_backend());
    let token = sign_in(app.clone()).await;

    let body = json!({
        "old_password": "wrong",
        "new_password": "brand-new-secret",
        "confirm_password": "brand-new-secret",
    });
    let response = post_json_auth(app, "/api/v1/auth/change-password", &token, body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Old password is incorrect.");
}

#[tokio::test]
async fn test_change_password_rejects_mismatch() {
    let app = common::build_test_app(common::test_backend());
    let token = sign_in(app.clone()).await;

    let body = json!({
        "old_password": ADMIN_PASSWORD,
        "new_password": "one",
        "confirm_password": "two",
    });
    let response = post_json_auth(app, "/api/v1/auth/change-password", &token, body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "New passwords do not match.");
}

// ---------------------------------------------------------------------------
// Forgot / reset password
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_forgot_password_sends_reset_email_with_redirect() {
    let backend = common::test_backend();
    let app = common::build_test_app(backend.clone());

    let response = post_json(
        app,
        "/api/v1/auth/forgot-password",
        json!({ "email": format!(" {ADMIN_EMAIL}") }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Password reset email sent! Check your inbox.");

    let emails = backend.reset_emails().await;
    assert_eq!(emails.len(), 1);
    assert_eq!(emails[0].email, ADMIN_EMAIL);
    assert_eq!(emails[0].redirect_to, RESET_REDIRECT);
}

#[tokio::test]
async fn test_reset_password_with_recovery_session() {
    let backend = common::test_backend();
    let app = common::build_test_app(backend.clone());
    let recovery = backend.recovery_token(ADMIN_EMAIL).await.unwrap();

    let mismatch = json!({ "new_password": "a-new-one", "confirm_password": "another" });
    let response =
        post_json_auth(app.clone(), "/api/v1/auth/reset-password", &recovery, mismatch).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Passwords do not match!");

    let body = json!({ "new_password": "a-new-one", "confirm_password": "a-new-one" });
    let response = post_json_auth(app.clone(), "/api/v1/auth/reset-password", &recovery, body).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = post_json(
        app,
        "/api/v1/auth/sign-in",
        json!({ "email": ADMIN_EMAIL, "password": "a-new-one" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}
