//! Project entity model and DTOs.

use serde::{Deserialize, Serialize};
use sustaineco_core::types::{RecordId, Timestamp};

/// A row from the `projects` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: RecordId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Public URL of the project image.
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
}

/// DTO for creating a new project.
#[derive(Debug, Clone, Serialize)]
pub struct CreateProject {
    pub title: String,
    pub description: String,
    pub image: String,
}

/// DTO for updating an existing project. `None` leaves the column as is.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateProject {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}
