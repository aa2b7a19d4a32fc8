//! Handlers for the public `/site` resource.
//!
//! Everything here runs with the public key only, as the marketing pages
//! do. Missing singletons render as `null`; without a saved contact
//! section the default heading and subheading are shown.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use sustaineco_core::contact::{DEFAULT_SECTION_HEADING, DEFAULT_SECTION_SUBHEADING};
use sustaineco_core::message::{submission_stamp, MessageStatus};
use sustaineco_db::models::about::AboutUs;
use sustaineco_db::models::client::Client;
use sustaineco_db::models::contact::ContactItem;
use sustaineco_db::models::hero::HeroSection;
use sustaineco_db::models::message::CreateMessage;
use sustaineco_db::models::project::Project;
use sustaineco_db::repositories::{
    AboutRepo, ClientRepo, ContactRepo, HeroRepo, MessageRepo, ProjectRepo,
};
use sustaineco_db::Conn;
use validator::Validate;

use crate::error::{AppResult, BackendContext};
use crate::response::{DataResponse, MessageResponse};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Response / request types
// ---------------------------------------------------------------------------

/// The contact block of the public site.
#[derive(Debug, Serialize)]
pub struct PublicContact {
    pub heading: String,
    pub subheading: String,
    pub items: Vec<ContactItem>,
}

/// Every section of the landing page in one response.
#[derive(Debug, Serialize)]
pub struct SiteContent {
    pub hero: Option<HeroSection>,
    pub projects: Vec<Project>,
    pub clients: Vec<Client>,
    pub contact: PublicContact,
    pub about: Option<AboutUs>,
}

/// Request body for `POST /site/messages`.
#[derive(Debug, Deserialize, Validate)]
pub struct SubmitMessageRequest {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(email(message = "Please enter a valid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "Message is required"))]
    pub message: String,
}

// ---------------------------------------------------------------------------
// Loaders shared by the aggregate and the per-section routes
// ---------------------------------------------------------------------------

async fn load_contact(conn: &Conn<'_>) -> AppResult<PublicContact> {
    let section = ContactRepo::find_section(conn)
        .await
        .or_fail("Failed to fetch contact information")?;
    let items = ContactRepo::list_items(conn)
        .await
        .or_fail("Failed to fetch contact information")?;

    let (heading, subheading) = match section {
        Some(section) => (section.title, section.detail),
        None => (
            DEFAULT_SECTION_HEADING.to_string(),
            DEFAULT_SECTION_SUBHEADING.to_string(),
        ),
    };
    Ok(PublicContact {
        heading,
        subheading,
        items,
    })
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/site
pub async fn content(State(state): State<AppState>) -> AppResult<Json<DataResponse<SiteContent>>> {
    let conn = state.public_conn();

    let hero = HeroRepo::find(&conn)
        .await
        .or_fail("Failed to fetch hero section")?;
    let projects = ProjectRepo::list(&conn)
        .await
        .or_fail("Failed to fetch projects")?;
    let clients = ClientRepo::list(&conn)
        .await
        .or_fail("Failed to fetch clients")?;
    let contact = load_contact(&conn).await?;
    let about = AboutRepo::find(&conn)
        .await
        .or_fail("Failed to fetch about us content")?;

    Ok(Json(DataResponse {
        data: SiteContent {
            hero,
            projects,
            clients,
            contact,
            about,
        },
    }))
}

/// GET /api/v1/site/hero
pub async fn hero(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Option<HeroSection>>>> {
    let hero = HeroRepo::find(&state.public_conn())
        .await
        .or_fail("Failed to fetch hero section")?;
    Ok(Json(DataResponse { data: hero }))
}

/// GET /api/v1/site/projects
pub async fn projects(State(state): State<AppState>) -> AppResult<Json<DataResponse<Vec<Project>>>> {
    let projects = ProjectRepo::list(&state.public_conn())
        .await
        .or_fail("Failed to fetch projects")?;
    Ok(Json(DataResponse { data: projects }))
}

/// GET /api/v1/site/clients
pub async fn clients(State(state): State<AppState>) -> AppResult<Json<DataResponse<Vec<Client>>>> {
    let clients = ClientRepo::list(&state.public_conn())
        .await
        .or_fail("Failed to fetch clients")?;
    Ok(Json(DataResponse { data: clients }))
}

/// GET /api/v1/site/contact
pub async fn contact(State(state): State<AppState>) -> AppResult<Json<DataResponse<PublicContact>>> {
    let contact = load_contact(&state.public_conn()).await?;
    Ok(Json(DataResponse { data: contact }))
}

/// GET /api/v1/site/about
pub async fn about(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Option<AboutUs>>>> {
    let about = AboutRepo::find(&state.public_conn())
        .await
        .or_fail("Failed to fetch about us content")?;
    Ok(Json(DataResponse { data: about }))
}

/// POST /api/v1/site/messages
///
/// Contact-form submission. Stored as `pending`, stamped with the current
/// date and time.
pub async fn submit_message(
    State(state): State<AppState>,
    Json(mut input): Json<SubmitMessageRequest>,
) -> AppResult<(StatusCode, Json<MessageResponse>)> {
    input.name = input.name.trim().to_string();
    input.email = input.email.trim().to_string();
    input.message = input.message.trim().to_string();
    input.validate()?;

    let (date, time) = submission_stamp(chrono::Utc::now());
    let row = CreateMessage {
        name: input.name,
        email: input.email,
        message: input.message,
        status: MessageStatus::Pending,
        date,
        time,
    };
    let stored = MessageRepo::create(&state.public_conn(), &row)
        .await
        .or_fail("Failed to send message")?;

    tracing::info!(message_id = %stored.id, "Contact form message received");
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("Message sent successfully!")),
    ))
}
