//! Repository for the `contact_management` table.
//!
//! Every query is scoped by the `type` column so section and item rows never
//! leak into each other.

use serde_json::json;
use sustaineco_core::contact::RecordKind;
use sustaineco_core::types::RecordId;

use super::{decode_rows, first_row, insert_one, to_row};
use crate::backend::{BackendError, Conn, Query};
use crate::models::contact::{ContactItem, ContactSection, SaveContactItem, SaveContactSection};

const TABLE: &str = "contact_management";

pub struct ContactRepo;

impl ContactRepo {
    fn items() -> Query {
        Query::new().eq("type", RecordKind::Contact.as_str())
    }

    fn section() -> Query {
        Query::new().eq("type", RecordKind::Section.as_str())
    }

    // -- Section --

    pub async fn find_section(conn: &Conn<'_>) -> Result<Option<ContactSection>, BackendError> {
        let rows = conn
            .backend
            .select(TABLE, &Self::section().limit(1), conn.bearer)
            .await?;
        first_row(rows)
    }

    /// Update the heading row if it exists, insert it otherwise.
    pub async fn save_section(
        conn: &Conn<'_>,
        title: &str,
        detail: &str,
    ) -> Result<ContactSection, BackendError> {
        if let Some(existing) = Self::find_section(conn).await? {
            let query = Self::section().eq("id", &existing.id);
            let patch = json!({ "title": title, "detail": detail });
            let rows = conn.backend.update(TABLE, &query, patch, conn.bearer).await?;
            if let Some(updated) = first_row(rows)? {
                return Ok(updated);
            }
        }
        let input = SaveContactSection {
            kind: RecordKind::Section,
            title: title.to_string(),
            detail: detail.to_string(),
        };
        insert_one(conn, TABLE, to_row(&input)?).await
    }

    // -- Items --

    /// All contact items in display order.
    pub async fn list_items(conn: &Conn<'_>) -> Result<Vec<ContactItem>, BackendError> {
        let query = Self::items().order_by("display_order", true);
        let rows = conn.backend.select(TABLE, &query, conn.bearer).await?;
        decode_rows(rows)
    }

    pub async fn find_item(
        conn: &Conn<'_>,
        id: &RecordId,
    ) -> Result<Option<ContactItem>, BackendError> {
        let query = Self::items().eq("id", id).limit(1);
        let rows = conn.backend.select(TABLE, &query, conn.bearer).await?;
        first_row(rows)
    }

    pub async fn create_item(
        conn: &Conn<'_>,
        input: &SaveContactItem,
    ) -> Result<ContactItem, BackendError> {
        insert_one(conn, TABLE, to_row(input)?).await
    }

    pub async fn update_item(
        conn: &Conn<'_>,
        id: &RecordId,
        input: &SaveContactItem,
    ) -> Result<Option<ContactItem>, BackendError> {
        let query = Self::items().eq("id", id);
        let rows = conn
            .backend
            .update(TABLE, &query, to_row(input)?, conn.bearer)
            .await?;
        first_row(rows)
    }

    /// Returns `true` if a row was removed.
    pub async fn delete_item(conn: &Conn<'_>, id: &RecordId) -> Result<bool, BackendError> {
        let query = Self::items().eq("id", id);
        let rows = conn.backend.delete(TABLE, &query, conn.bearer).await?;
        Ok(!rows.is_empty())
    }
}
