//! Handlers for the `/admin/projects` resource.

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use sustaineco_core::error::CoreError;
use sustaineco_core::search::matches_term;
use sustaineco_core::types::RecordId;
use sustaineco_db::models::project::{CreateProject, Project, UpdateProject};
use sustaineco_db::repositories::ProjectRepo;

use super::{discard_image, resolve_image, ObjectNaming};
use crate::error::{AppError, AppResult, BackendContext};
use crate::forms::ContentForm;
use crate::middleware::auth::AuthUser;
use crate::query::SearchParams;
use crate::response::DataResponse;
use crate::state::AppState;

fn not_found(id: RecordId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Project",
        id,
    })
}

/// GET /api/v1/admin/projects
///
/// Newest first, optionally filtered by `?search=` over title and description.
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<DataResponse<Vec<Project>>>> {
    let projects = ProjectRepo::list(&user.conn(&state))
        .await
        .or_fail("Failed to fetch projects")?;
    let data = projects
        .into_iter()
        .filter(|p| matches_term(params.term(), &[p.title.as_str(), p.description.as_str()]))
        .collect();
    Ok(Json(DataResponse { data }))
}

/// GET /api/v1/admin/projects/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> AppResult<Json<DataResponse<Project>>> {
    let id = RecordId::parse(&id);
    let project = ProjectRepo::find_by_id(&user.conn(&state), &id)
        .await
        .or_fail("Failed to fetch project")?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: project }))
}

/// POST /api/v1/admin/projects
///
/// Multipart form: `title`, `description`, and either an `image` file or an
/// `image_url`.
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<DataResponse<Project>>)> {
    let mut form = ContentForm::read(multipart).await?;
    let title = form.required("title", "Title is required")?;
    let description = form.required("description", "Description is required")?;
    let source = form
        .image_source("image", "image_url")?
        .ok_or_else(|| AppError::Core(CoreError::Validation("Please select an image".into())))?;

    let conn = user.conn(&state);
    let image = resolve_image(&state, &conn, source, ObjectNaming::Unique).await?;

    let input = CreateProject {
        title,
        description,
        image,
    };
    let project = ProjectRepo::create(&conn, &input)
        .await
        .or_fail("Failed to add project")?;

    tracing::info!(project_id = %project.id, "Project added");
    Ok((StatusCode::CREATED, Json(DataResponse { data: project })))
}

/// PUT /api/v1/admin/projects/{id}
///
/// Same fields as create, all optional. Without a new image the current
/// one is kept.
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
    multipart: Multipart,
) -> AppResult<Json<DataResponse<Project>>> {
    let id = RecordId::parse(&id);
    let mut form = ContentForm::read(multipart).await?;
    let title = form.optional("title", "Title is required")?;
    let description = form.optional("description", "Description is required")?;
    let source = form.image_source("image", "image_url")?;

    let conn = user.conn(&state);
    ProjectRepo::find_by_id(&conn, &id)
        .await
        .or_fail("Failed to update project")?
        .ok_or_else(|| not_found(id.clone()))?;

    let image = match source {
        Some(source) => Some(resolve_image(&state, &conn, source, ObjectNaming::Unique).await?),
        None => None,
    };

    let input = UpdateProject {
        title,
        description,
        image,
    };
    let project = ProjectRepo::update(&conn, &id, &input)
        .await
        .or_fail("Failed to update project")?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(project_id = %project.id, "Project updated");
    Ok(Json(DataResponse { data: project }))
}

/// DELETE /api/v1/admin/projects/{id}
///
/// Removes the row, then its image from the bucket.
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    let id = RecordId::parse(&id);
    let conn = user.conn(&state);
    let removed = ProjectRepo::delete(&conn, &id)
        .await
        .or_fail("Failed to delete project")?
        .ok_or_else(|| not_found(id.clone()))?;

    discard_image(&state, &conn, removed.image.as_deref()).await;
    tracing::info!(project_id = %id, "Project deleted");
    Ok(StatusCode::NO_CONTENT)
}
