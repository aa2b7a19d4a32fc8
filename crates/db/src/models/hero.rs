//! Hero banner model and DTOs.

use serde::{Deserialize, Serialize};
use sustaineco_core::types::{RecordId, Timestamp};

/// The single row of the `hero_section` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeroSection {
    pub id: RecordId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
}

/// DTO written on both insert and update of the hero row.
#[derive(Debug, Clone, Serialize)]
pub struct SaveHero {
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub image_url: Option<String>,
}
