//! Image uploads into the public bucket.

use sustaineco_core::media::stored_object_name;

use crate::backend::{BackendError, Conn, Upload};

pub struct ImageStore;

impl ImageStore {
    /// Store the file and return its public URL.
    pub async fn upload(conn: &Conn<'_>, upload: Upload) -> Result<String, BackendError> {
        let bucket = upload.bucket.clone();
        let name = upload.name.clone();
        conn.backend.upload(upload, conn.bearer).await?;
        Ok(conn.backend.public_url(&bucket, &name))
    }

    /// Remove the object a public URL points at. URLs outside the bucket's
    /// public prefix are left alone.
    pub async fn remove_by_url(
        conn: &Conn<'_>,
        bucket: &str,
        url: &str,
    ) -> Result<(), BackendError> {
        let prefix = conn.backend.public_url(bucket, "");
        let Some(name) = stored_object_name(url, &prefix) else {
            tracing::debug!(%url, bucket, "Image URL is not a stored object, nothing to remove");
            return Ok(());
        };
        conn.backend
            .remove(bucket, &[name.to_string()], conn.bearer)
            .await
    }
}
