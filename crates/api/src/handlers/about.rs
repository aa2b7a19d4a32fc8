//! Handlers for the `/admin/about` singleton.

use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use sustaineco_core::about::validate_about;
use sustaineco_db::models::about::{AboutUs, SaveAboutUs};
use sustaineco_db::repositories::AboutRepo;

use crate::error::{AppResult, BackendContext};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `PUT /admin/about`. `description` is editor HTML.
#[derive(Debug, Deserialize)]
pub struct AboutRequest {
    pub title: String,
    pub description: String,
}

/// GET /api/v1/admin/about
pub async fn get(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DataResponse<Option<AboutUs>>>> {
    let about = AboutRepo::find(&user.conn(&state))
        .await
        .or_fail("Failed to fetch about us content")?;
    Ok(Json(DataResponse { data: about }))
}

/// PUT /api/v1/admin/about
pub async fn save(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<AboutRequest>,
) -> AppResult<Json<DataResponse<AboutUs>>> {
    validate_about(&input.title, &input.description)?;

    let row = SaveAboutUs {
        title: input.title.trim().to_string(),
        description: input.description,
        updated_at: chrono::Utc::now(),
    };
    let about = AboutRepo::save(&user.conn(&state), &row)
        .await
        .or_fail("Failed to save about us content")?;

    tracing::info!(about_id = %about.id, "About us content saved");
    Ok(Json(DataResponse { data: about }))
}
