//! Handlers for the `/admin/hero` singleton.

use axum::extract::{Multipart, State};
use axum::Json;
use sustaineco_db::models::hero::{HeroSection, SaveHero};
use sustaineco_db::repositories::HeroRepo;

use super::{resolve_image, ObjectNaming};
use crate::error::{AppResult, BackendContext};
use crate::forms::ContentForm;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/admin/hero
///
/// `data` is `null` until the hero has been saved once.
pub async fn get(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DataResponse<Option<HeroSection>>>> {
    let hero = HeroRepo::find(&user.conn(&state))
        .await
        .or_fail("Failed to fetch hero section")?;
    Ok(Json(DataResponse { data: hero }))
}

/// PUT /api/v1/admin/hero
///
/// Multipart form: `title`, `subtitle`, `description`, and optionally an
/// `image` file or `image_url`. Without either, the saved image is kept.
pub async fn save(
    State(state): State<AppState>,
    user: AuthUser,
    multipart: Multipart,
) -> AppResult<Json<DataResponse<HeroSection>>> {
    let mut form = ContentForm::read(multipart).await?;
    let title = form.text("title").unwrap_or_default().trim().to_string();
    let subtitle = form.text("subtitle").unwrap_or_default().trim().to_string();
    let description = form.text("description").unwrap_or_default().trim().to_string();
    let source = form.image_source("image", "image_url")?;

    let conn = user.conn(&state);
    let image_url = match source {
        Some(source) => Some(resolve_image(&state, &conn, source, ObjectNaming::Hero).await?),
        None => HeroRepo::find(&conn)
            .await
            .or_fail("Failed to save hero section")?
            .and_then(|hero| hero.image_url),
    };

    let input = SaveHero {
        title,
        subtitle,
        description,
        image_url,
    };
    let hero = HeroRepo::save(&conn, &input)
        .await
        .or_fail("Failed to save hero section")?;

    tracing::info!(hero_id = %hero.id, "Hero section saved");
    Ok(Json(DataResponse { data: hero }))
}
