//! Repository for the `clients` table.

use sustaineco_core::types::RecordId;

use super::{decode_rows, first_row, insert_one, to_row};
use crate::backend::{BackendError, Conn, Query};
use crate::models::client::{Client, CreateClient, UpdateClient};

const TABLE: &str = "clients";

/// Provides CRUD operations for clients.
pub struct ClientRepo;

impl ClientRepo {
    pub async fn create(conn: &Conn<'_>, input: &CreateClient) -> Result<Client, BackendError> {
        insert_one(conn, TABLE, to_row(input)?).await
    }

    pub async fn find_by_id(
        conn: &Conn<'_>,
        id: &RecordId,
    ) -> Result<Option<Client>, BackendError> {
        let query = Query::new().eq("id", id).limit(1);
        let rows = conn.backend.select(TABLE, &query, conn.bearer).await?;
        first_row(rows)
    }

    /// List all clients, newest first.
    pub async fn list(conn: &Conn<'_>) -> Result<Vec<Client>, BackendError> {
        let query = Query::new().order_by("created_at", false);
        let rows = conn.backend.select(TABLE, &query, conn.bearer).await?;
        decode_rows(rows)
    }

    pub async fn update(
        conn: &Conn<'_>,
        id: &RecordId,
        input: &UpdateClient,
    ) -> Result<Option<Client>, BackendError> {
        let query = Query::new().eq("id", id);
        let rows = conn
            .backend
            .update(TABLE, &query, to_row(input)?, conn.bearer)
            .await?;
        first_row(rows)
    }

    /// Delete a client, returning the removed row.
    pub async fn delete(conn: &Conn<'_>, id: &RecordId) -> Result<Option<Client>, BackendError> {
        let query = Query::new().eq("id", id);
        let rows = conn.backend.delete(TABLE, &query, conn.bearer).await?;
        first_row(rows)
    }
}
