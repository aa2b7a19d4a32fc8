//! Customer message model and DTOs.

use serde::{Deserialize, Serialize};
use sustaineco_core::message::MessageStatus;
use sustaineco_core::types::{RecordId, Timestamp};

/// A row from the `messages` table.
///
/// The message body is stored in the `msg` column and exposed as `message`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: RecordId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, alias = "msg")]
    pub message: String,
    #[serde(default)]
    pub status: MessageStatus,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
}

/// DTO for a contact-form submission.
#[derive(Debug, Clone, Serialize)]
pub struct CreateMessage {
    pub name: String,
    pub email: String,
    #[serde(rename = "msg")]
    pub message: String,
    pub status: MessageStatus,
    pub date: String,
    pub time: String,
}
