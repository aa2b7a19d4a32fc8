//! Repository for the singleton `about_us` table.

use super::{first_row, insert_one, to_row};
use crate::backend::{BackendError, Conn, Query};
use crate::models::about::{AboutUs, SaveAboutUs};

const TABLE: &str = "about_us";

pub struct AboutRepo;

impl AboutRepo {
    pub async fn find(conn: &Conn<'_>) -> Result<Option<AboutUs>, BackendError> {
        let query = Query::new().limit(1);
        let rows = conn.backend.select(TABLE, &query, conn.bearer).await?;
        first_row(rows)
    }

    /// Update the existing row, or insert the first one.
    pub async fn save(conn: &Conn<'_>, input: &SaveAboutUs) -> Result<AboutUs, BackendError> {
        if let Some(existing) = Self::find(conn).await? {
            let query = Query::new().eq("id", &existing.id);
            let rows = conn
                .backend
                .update(TABLE, &query, to_row(input)?, conn.bearer)
                .await?;
            if let Some(updated) = first_row(rows)? {
                return Ok(updated);
            }
        }
        insert_one(conn, TABLE, to_row(input)?).await
    }
}
