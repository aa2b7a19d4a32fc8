//! Repository for the `messages` table.

use serde_json::json;
use sustaineco_core::message::MessageStatus;
use sustaineco_core::types::RecordId;

use super::{decode_rows, first_row, insert_one, to_row};
use crate::backend::{BackendError, Conn, Query};
use crate::models::message::{CreateMessage, Message};

const TABLE: &str = "messages";

pub struct MessageRepo;

impl MessageRepo {
    pub async fn create(conn: &Conn<'_>, input: &CreateMessage) -> Result<Message, BackendError> {
        insert_one(conn, TABLE, to_row(input)?).await
    }

    /// All messages, newest first.
    pub async fn list(conn: &Conn<'_>) -> Result<Vec<Message>, BackendError> {
        let query = Query::new().order_by("created_at", false);
        let rows = conn.backend.select(TABLE, &query, conn.bearer).await?;
        decode_rows(rows)
    }

    pub async fn find_by_id(
        conn: &Conn<'_>,
        id: &RecordId,
    ) -> Result<Option<Message>, BackendError> {
        let query = Query::new().eq("id", id).limit(1);
        let rows = conn.backend.select(TABLE, &query, conn.bearer).await?;
        first_row(rows)
    }

    /// Set the follow-up status. `None` if no row with `id` exists.
    pub async fn update_status(
        conn: &Conn<'_>,
        id: &RecordId,
        status: MessageStatus,
    ) -> Result<Option<Message>, BackendError> {
        let query = Query::new().eq("id", id);
        let patch = json!({ "status": status.as_str() });
        let rows = conn.backend.update(TABLE, &query, patch, conn.bearer).await?;
        first_row(rows)
    }

    /// Returns `true` if a row was removed.
    pub async fn delete(conn: &Conn<'_>, id: &RecordId) -> Result<bool, BackendError> {
        let query = Query::new().eq("id", id);
        let rows = conn.backend.delete(TABLE, &query, conn.bearer).await?;
        Ok(!rows.is_empty())
    }
}
