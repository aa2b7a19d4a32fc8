//! Handler for the admin dashboard summary.

use axum::extract::State;
use axum::Json;
use serde::Serialize;
use sustaineco_core::message::StatusCounts;
use sustaineco_db::repositories::{ClientRepo, ContactRepo, MessageRepo, ProjectRepo};

use crate::error::{AppResult, BackendContext};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Record counts shown on the dashboard cards.
#[derive(Debug, Serialize)]
pub struct DashboardSummary {
    pub projects: usize,
    pub clients: usize,
    pub contact_items: usize,
    pub messages: usize,
    pub pending_messages: usize,
    pub contacted_messages: usize,
}

/// GET /api/v1/admin/dashboard
pub async fn summary(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DataResponse<DashboardSummary>>> {
    let conn = user.conn(&state);
    let failed = "Failed to load dashboard";

    let projects = ProjectRepo::list(&conn).await.or_fail(failed)?.len();
    let clients = ClientRepo::list(&conn).await.or_fail(failed)?.len();
    let contact_items = ContactRepo::list_items(&conn).await.or_fail(failed)?.len();
    let messages = MessageRepo::list(&conn).await.or_fail(failed)?;
    let counts = StatusCounts::tally(messages.iter().map(|m| m.status));

    Ok(Json(DataResponse {
        data: DashboardSummary {
            projects,
            clients,
            contact_items,
            messages: messages.len(),
            pending_messages: counts.pending,
            contacted_messages: counts.contacted,
        },
    }))
}
