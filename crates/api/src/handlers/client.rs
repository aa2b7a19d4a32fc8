//! Handlers for the `/admin/clients` resource.

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use sustaineco_core::error::CoreError;
use sustaineco_core::search::matches_term;
use sustaineco_core::types::RecordId;
use sustaineco_db::models::client::{Client, CreateClient, UpdateClient};
use sustaineco_db::repositories::ClientRepo;

use super::{discard_image, resolve_image, ObjectNaming};
use crate::error::{AppError, AppResult, BackendContext};
use crate::forms::ContentForm;
use crate::middleware::auth::AuthUser;
use crate::query::SearchParams;
use crate::response::DataResponse;
use crate::state::AppState;

fn not_found(id: RecordId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Client",
        id,
    })
}

/// GET /api/v1/admin/clients
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<DataResponse<Vec<Client>>>> {
    let clients = ClientRepo::list(&user.conn(&state))
        .await
        .or_fail("Failed to fetch clients")?;
    let data = clients
        .into_iter()
        .filter(|c| matches_term(params.term(), &[c.name.as_str()]))
        .collect();
    Ok(Json(DataResponse { data }))
}

/// GET /api/v1/admin/clients/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> AppResult<Json<DataResponse<Client>>> {
    let id = RecordId::parse(&id);
    let client = ClientRepo::find_by_id(&user.conn(&state), &id)
        .await
        .or_fail("Failed to fetch client")?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: client }))
}

/// POST /api/v1/admin/clients
///
/// Multipart form: `name` and either a `logo` file or a `logo_url`.
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<DataResponse<Client>>)> {
    let mut form = ContentForm::read(multipart).await?;
    let name = form.required("name", "Client name is required")?;
    let source = form
        .image_source("logo", "logo_url")?
        .ok_or_else(|| AppError::Core(CoreError::Validation("Please select a logo".into())))?;

    let conn = user.conn(&state);
    let logo = resolve_image(&state, &conn, source, ObjectNaming::Unique).await?;

    let client = ClientRepo::create(&conn, &CreateClient { name, logo })
        .await
        .or_fail("Failed to add client")?;

    tracing::info!(client_id = %client.id, "Client added");
    Ok((StatusCode::CREATED, Json(DataResponse { data: client })))
}

/// PUT /api/v1/admin/clients/{id}
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
    multipart: Multipart,
) -> AppResult<Json<DataResponse<Client>>> {
    let id = RecordId::parse(&id);
    let mut form = ContentForm::read(multipart).await?;
    let name = form.optional("name", "Client name is required")?;
    let source = form.image_source("logo", "logo_url")?;

    let conn = user.conn(&state);
    ClientRepo::find_by_id(&conn, &id)
        .await
        .or_fail("Failed to update client")?
        .ok_or_else(|| not_found(id.clone()))?;

    let logo = match source {
        Some(source) => Some(resolve_image(&state, &conn, source, ObjectNaming::Unique).await?),
        None => None,
    };

    let client = ClientRepo::update(&conn, &id, &UpdateClient { name, logo })
        .await
        .or_fail("Failed to update client")?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(client_id = %client.id, "Client updated");
    Ok(Json(DataResponse { data: client }))
}

/// DELETE /api/v1/admin/clients/{id}
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    let id = RecordId::parse(&id);
    let conn = user.conn(&state);
    let removed = ClientRepo::delete(&conn, &id)
        .await
        .or_fail("Failed to delete client")?
        .ok_or_else(|| not_found(id.clone()))?;

    discard_image(&state, &conn, removed.logo.as_deref()).await;
    tracing::info!(client_id = %id, "Client deleted");
    Ok(StatusCode::NO_CONTENT)
}
