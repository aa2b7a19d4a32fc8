//! About-us model and DTO.

use serde::{Deserialize, Serialize};
use sustaineco_core::types::{RecordId, Timestamp};

/// The single row of the `about_us` table. `description` holds HTML.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AboutUs {
    pub id: RecordId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub updated_at: Option<Timestamp>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SaveAboutUs {
    pub title: String,
    pub description: String,
    pub updated_at: Timestamp,
}
