//! Contact section models.
//!
//! Both the section heading and the contact items live in the
//! `contact_management` table, discriminated by the `type` column.

use serde::{Deserialize, Serialize};
use sustaineco_core::contact::{ContactIcon, RecordKind};
use sustaineco_core::types::{RecordId, Timestamp};

/// A `type = 'contact'` row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactItem {
    pub id: RecordId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub detail: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: ContactIcon,
    #[serde(default)]
    pub display_order: i32,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
}

/// The `type = 'section'` row: heading and subheading of the contact block.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactSection {
    pub id: RecordId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub detail: String,
}

/// DTO for inserting or fully rewriting a contact item.
#[derive(Debug, Clone, Serialize)]
pub struct SaveContactItem {
    #[serde(rename = "type")]
    pub kind: RecordKind,
    pub title: String,
    pub detail: String,
    pub description: String,
    pub icon: ContactIcon,
    pub display_order: i32,
}

/// DTO for the section row.
#[derive(Debug, Clone, Serialize)]
pub struct SaveContactSection {
    #[serde(rename = "type")]
    pub kind: RecordKind,
    pub title: String,
    pub detail: String,
}
