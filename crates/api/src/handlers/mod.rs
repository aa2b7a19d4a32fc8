pub mod about;
pub mod auth;
pub mod client;
pub mod contact;
pub mod dashboard;
pub mod hero;
pub mod message;
pub mod project;
pub mod site;

use sustaineco_core::media::{hero_object_name, unique_object_name};
use sustaineco_db::backend::Upload;
use sustaineco_db::repositories::ImageStore;
use sustaineco_db::Conn;

use crate::error::{AppResult, BackendContext};
use crate::forms::ImageSource;
use crate::state::AppState;

/// How an uploaded image is named in the bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ObjectNaming {
    /// `hero-{millis}.{ext}`, overwriting on collision.
    Hero,
    /// `{millis}-{random}.{ext}`, never overwriting.
    Unique,
}

/// Turn an [`ImageSource`] into the public URL stored on the record,
/// uploading the file first when one was sent.
pub(crate) async fn resolve_image(
    state: &AppState,
    conn: &Conn<'_>,
    source: ImageSource,
    naming: ObjectNaming,
) -> AppResult<String> {
    let file = match source {
        ImageSource::Url(url) => return Ok(url),
        ImageSource::Upload(file) => file,
    };

    let now = chrono::Utc::now();
    let name = match naming {
        ObjectNaming::Hero => hero_object_name(&file.filename, now),
        ObjectNaming::Unique => unique_object_name(&file.filename, now),
    };
    let upload = Upload {
        bucket: state.bucket().to_string(),
        name,
        content_type: file.content_type,
        bytes: file.bytes,
        upsert: naming == ObjectNaming::Hero,
    };

    let url = ImageStore::upload(conn, upload)
        .await
        .or_fail("Failed to upload image")?;
    tracing::debug!(%url, "Image uploaded");
    Ok(url)
}

/// Remove the stored object behind a deleted record's image. Failures are
/// logged only: the record itself is already gone.
pub(crate) async fn discard_image(state: &AppState, conn: &Conn<'_>, url: Option<&str>) {
    let Some(url) = url else { return };
    if let Err(e) = ImageStore::remove_by_url(conn, state.bucket(), url).await {
        tracing::warn!(error = %e, %url, "Failed to remove stored image");
    }
}
