//! Repository for the `projects` table.

use sustaineco_core::types::RecordId;

use super::{decode_rows, first_row, insert_one, to_row};
use crate::backend::{BackendError, Conn, Query};
use crate::models::project::{CreateProject, Project, UpdateProject};

const TABLE: &str = "projects";

/// Provides CRUD operations for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project, returning the created row.
    pub async fn create(conn: &Conn<'_>, input: &CreateProject) -> Result<Project, BackendError> {
        insert_one(conn, TABLE, to_row(input)?).await
    }

    pub async fn find_by_id(
        conn: &Conn<'_>,
        id: &RecordId,
    ) -> Result<Option<Project>, BackendError> {
        let query = Query::new().eq("id", id).limit(1);
        let rows = conn.backend.select(TABLE, &query, conn.bearer).await?;
        first_row(rows)
    }

    /// List all projects ordered by most recently created first.
    pub async fn list(conn: &Conn<'_>) -> Result<Vec<Project>, BackendError> {
        let query = Query::new().order_by("created_at", false);
        let rows = conn.backend.select(TABLE, &query, conn.bearer).await?;
        decode_rows(rows)
    }

    /// Update a project. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        conn: &Conn<'_>,
        id: &RecordId,
        input: &UpdateProject,
    ) -> Result<Option<Project>, BackendError> {
        let query = Query::new().eq("id", id);
        let rows = conn
            .backend
            .update(TABLE, &query, to_row(input)?, conn.bearer)
            .await?;
        first_row(rows)
    }

    /// Delete a project, returning the removed row so its image can be
    /// cleaned up. `None` if nothing matched.
    pub async fn delete(
        conn: &Conn<'_>,
        id: &RecordId,
    ) -> Result<Option<Project>, BackendError> {
        let query = Query::new().eq("id", id);
        let rows = conn.backend.delete(TABLE, &query, conn.bearer).await?;
        first_row(rows)
    }
}
