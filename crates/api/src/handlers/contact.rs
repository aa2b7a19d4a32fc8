//! Handlers for the `/admin/contact` resource: the section heading plus
//! the ordered contact items.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use sustaineco_core::contact::{next_display_order, ContactIcon, RecordKind};
use sustaineco_core::error::CoreError;
use sustaineco_core::search::matches_term;
use sustaineco_core::types::RecordId;
use sustaineco_db::models::contact::{ContactItem, ContactSection, SaveContactItem};
use sustaineco_db::repositories::ContactRepo;
use validator::Validate;

use crate::error::{AppError, AppResult, BackendContext};
use crate::middleware::auth::AuthUser;
use crate::query::SearchParams;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for creating or updating a contact item.
#[derive(Debug, Deserialize, Validate)]
pub struct ContactItemRequest {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "Detail is required"))]
    pub detail: String,
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
    #[serde(default)]
    pub icon: ContactIcon,
    /// Defaults to one past the current highest order on create, and to
    /// the item's current order on update.
    pub display_order: Option<i32>,
}

impl ContactItemRequest {
    /// Trim the text fields and check them.
    fn validated(mut self) -> AppResult<Self> {
        self.title = self.title.trim().to_string();
        self.detail = self.detail.trim().to_string();
        self.description = self.description.trim().to_string();
        self.validate()?;
        Ok(self)
    }

    fn into_row(self, display_order: i32) -> SaveContactItem {
        SaveContactItem {
            kind: RecordKind::Contact,
            title: self.title,
            detail: self.detail,
            description: self.description,
            icon: self.icon,
            display_order,
        }
    }
}

/// Request body for `PUT /admin/contact/section`.
#[derive(Debug, Deserialize, Validate)]
pub struct ContactSectionRequest {
    #[validate(length(min = 1, message = "Section title is required"))]
    pub title: String,
    #[serde(default)]
    pub detail: String,
}

impl ContactSectionRequest {
    fn validated(mut self) -> AppResult<Self> {
        self.title = self.title.trim().to_string();
        self.detail = self.detail.trim().to_string();
        self.validate()?;
        Ok(self)
    }
}

/// The whole contact block as the admin screen shows it.
#[derive(Debug, Serialize)]
pub struct ContactOverview {
    pub section: Option<ContactSection>,
    pub items: Vec<ContactItem>,
}

fn not_found(id: RecordId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Contact item",
        id,
    })
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/contact
pub async fn overview(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DataResponse<ContactOverview>>> {
    let conn = user.conn(&state);
    let section = ContactRepo::find_section(&conn)
        .await
        .or_fail("Failed to fetch section data")?;
    let items = ContactRepo::list_items(&conn)
        .await
        .or_fail("Failed to fetch contact information")?;
    Ok(Json(DataResponse {
        data: ContactOverview { section, items },
    }))
}

/// PUT /api/v1/admin/contact/section
pub async fn save_section(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<ContactSectionRequest>,
) -> AppResult<Json<DataResponse<ContactSection>>> {
    let input = input.validated()?;

    let section = ContactRepo::save_section(&user.conn(&state), &input.title, &input.detail)
        .await
        .or_fail("Failed to update section data")?;

    tracing::info!(section_id = %section.id, "Contact section saved");
    Ok(Json(DataResponse { data: section }))
}

/// GET /api/v1/admin/contact/items
///
/// Display order, optionally filtered by `?search=` over title, detail and
/// description.
pub async fn list_items(
    State(state): State<AppState>,
    user: AuthUser,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<DataResponse<Vec<ContactItem>>>> {
    let items = ContactRepo::list_items(&user.conn(&state))
        .await
        .or_fail("Failed to fetch contact information")?;
    let data = items
        .into_iter()
        .filter(|i| {
            matches_term(
                params.term(),
                &[i.title.as_str(), i.detail.as_str(), i.description.as_str()],
            )
        })
        .collect();
    Ok(Json(DataResponse { data }))
}

/// GET /api/v1/admin/contact/items/{id}
pub async fn get_item(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> AppResult<Json<DataResponse<ContactItem>>> {
    let id = RecordId::parse(&id);
    let item = ContactRepo::find_item(&user.conn(&state), &id)
        .await
        .or_fail("Failed to fetch contact information")?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: item }))
}

/// POST /api/v1/admin/contact/items
pub async fn create_item(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<ContactItemRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<ContactItem>>)> {
    let input = input.validated()?;
    let conn = user.conn(&state);

    let display_order = match input.display_order {
        Some(order) => order,
        None => {
            let existing = ContactRepo::list_items(&conn)
                .await
                .or_fail("Failed to add contact information")?;
            next_display_order(existing.iter().map(|i| i.display_order))
        }
    };

    let item = ContactRepo::create_item(&conn, &input.into_row(display_order))
        .await
        .or_fail("Failed to add contact information")?;

    tracing::info!(item_id = %item.id, display_order, "Contact item added");
    Ok((StatusCode::CREATED, Json(DataResponse { data: item })))
}

/// PUT /api/v1/admin/contact/items/{id}
pub async fn update_item(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
    Json(input): Json<ContactItemRequest>,
) -> AppResult<Json<DataResponse<ContactItem>>> {
    let input = input.validated()?;
    let id = RecordId::parse(&id);
    let conn = user.conn(&state);

    let current = ContactRepo::find_item(&conn, &id)
        .await
        .or_fail("Failed to update contact information")?
        .ok_or_else(|| not_found(id.clone()))?;
    let display_order = input.display_order.unwrap_or(current.display_order);

    let item = ContactRepo::update_item(&conn, &id, &input.into_row(display_order))
        .await
        .or_fail("Failed to update contact information")?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(item_id = %item.id, "Contact item updated");
    Ok(Json(DataResponse { data: item }))
}

/// DELETE /api/v1/admin/contact/items/{id}
pub async fn delete_item(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    let id = RecordId::parse(&id);
    let deleted = ContactRepo::delete_item(&user.conn(&state), &id)
        .await
        .or_fail("Failed to delete contact information")?;
    if deleted {
        tracing::info!(item_id = %id, "Contact item deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}
