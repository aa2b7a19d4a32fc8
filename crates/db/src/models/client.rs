//! Client (partner logo) model and DTOs.

use serde::{Deserialize, Serialize};
use sustaineco_core::types::{RecordId, Timestamp};

/// A row from the `clients` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Client {
    pub id: RecordId,
    #[serde(default)]
    pub name: String,
    /// Public URL of the client logo.
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateClient {
    pub name: String,
    pub logo: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateClient {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
}
