//! Handlers for the `/admin/messages` resource (customer queries).

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use sustaineco_core::error::CoreError;
use sustaineco_core::message::{
    truncate_message, MessageStatus, StatusCounts, StatusFilter, PREVIEW_LEN,
};
use sustaineco_core::search::matches_term;
use sustaineco_core::types::RecordId;
use sustaineco_db::models::message::Message;
use sustaineco_db::repositories::MessageRepo;

use crate::error::{AppError, AppResult, BackendContext};
use crate::middleware::auth::AuthUser;
use crate::query::MessageListParams;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// A message as listed: the full row plus a short preview of its body.
#[derive(Debug, Serialize)]
pub struct MessageSummary {
    #[serde(flatten)]
    pub message: Message,
    pub preview: String,
}

/// Response of `GET /admin/messages`. `counts` covers every message,
/// regardless of the filters.
#[derive(Debug, Serialize)]
pub struct MessageList {
    pub data: Vec<MessageSummary>,
    pub counts: StatusCounts,
}

/// Request body for `PATCH /admin/messages/{id}/status`.
#[derive(Debug, Deserialize)]
pub struct StatusRequest {
    pub status: String,
}

fn not_found(id: RecordId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Message",
        id,
    })
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/messages
///
/// Newest first. `?search=` matches name, email and message text;
/// `?status=` is `all` (default), `pending` or `contacted`.
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
    Query(params): Query<MessageListParams>,
) -> AppResult<Json<MessageList>> {
    let filter: StatusFilter = params.status.as_deref().unwrap_or("all").parse()?;
    let term = params.search.as_deref().unwrap_or("");

    let messages = MessageRepo::list(&user.conn(&state))
        .await
        .or_fail("Failed to fetch customer queries")?;
    let counts = StatusCounts::tally(messages.iter().map(|m| m.status));

    let data = messages
        .into_iter()
        .filter(|m| filter.matches(m.status))
        .filter(|m| matches_term(term, &[m.name.as_str(), m.email.as_str(), m.message.as_str()]))
        .map(|message| MessageSummary {
            preview: truncate_message(&message.message, PREVIEW_LEN),
            message,
        })
        .collect();

    Ok(Json(MessageList { data, counts }))
}

/// GET /api/v1/admin/messages/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> AppResult<Json<DataResponse<Message>>> {
    let id = RecordId::parse(&id);
    let message = MessageRepo::find_by_id(&user.conn(&state), &id)
        .await
        .or_fail("Failed to fetch customer query")?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: message }))
}

/// PATCH /api/v1/admin/messages/{id}/status
pub async fn update_status(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
    Json(input): Json<StatusRequest>,
) -> AppResult<Json<DataResponse<Message>>> {
    let id = RecordId::parse(&id);
    let status: MessageStatus = input.status.parse()?;

    let message = MessageRepo::update_status(&user.conn(&state), &id, status)
        .await
        .or_fail("Failed to update status")?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(message_id = %message.id, status = status.as_str(), "Message status updated");
    Ok(Json(DataResponse { data: message }))
}

/// DELETE /api/v1/admin/messages/{id}
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    let id = RecordId::parse(&id);
    let deleted = MessageRepo::delete(&user.conn(&state), &id)
        .await
        .or_fail("Failed to delete customer query")?;
    if deleted {
        tracing::info!(message_id = %id, "Message deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}
