//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept a [`Conn`] as the first argument.

pub mod about_repo;
pub mod client_repo;
pub mod contact_repo;
pub mod hero_repo;
pub mod image_store;
pub mod message_repo;
pub mod project_repo;

pub use about_repo::AboutRepo;
pub use client_repo::ClientRepo;
pub use contact_repo::ContactRepo;
pub use hero_repo::HeroRepo;
pub use image_store::ImageStore;
pub use message_repo::MessageRepo;
pub use project_repo::ProjectRepo;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::backend::{BackendError, Conn};

/// Decode every returned row into `T`.
pub(crate) fn decode_rows<T: DeserializeOwned>(rows: Vec<Value>) -> Result<Vec<T>, BackendError> {
    rows.into_iter()
        .map(|row| serde_json::from_value(row).map_err(BackendError::from))
        .collect()
}

/// Decode the first returned row, if any.
pub(crate) fn first_row<T: DeserializeOwned>(rows: Vec<Value>) -> Result<Option<T>, BackendError> {
    rows.into_iter()
        .next()
        .map(serde_json::from_value)
        .transpose()
        .map_err(BackendError::from)
}

/// Serialize a DTO into the JSON object the table API expects.
pub(crate) fn to_row<T: Serialize>(input: &T) -> Result<Value, BackendError> {
    Ok(serde_json::to_value(input)?)
}

/// Insert and decode the stored row. The table API always echoes the
/// inserted row, so an empty answer is reported as an API error.
pub(crate) async fn insert_one<T: DeserializeOwned>(
    conn: &Conn<'_>,
    table: &str,
    row: Value,
) -> Result<T, BackendError> {
    let rows = conn.backend.insert(table, row, conn.bearer).await?;
    first_row(rows)?.ok_or_else(|| BackendError::Api {
        status: 500,
        body: format!("insert into {table} returned no row"),
    })
}
