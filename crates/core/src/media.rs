//! Image upload rules shared by the hero, project and client screens.
//!
//! Uploaded files land in a single public bucket. Object names are derived
//! from the upload time so that two uploads never collide, and the public
//! URL handed back by the backend is stored on the record itself.

use rand::Rng;

use crate::error::CoreError;
use crate::types::Timestamp;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Largest accepted image upload (5 MiB).
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// `Cache-Control` max-age applied to uploaded objects.
pub const IMAGE_CACHE_SECS: u32 = 3600;

/// Message for an image over [`MAX_IMAGE_BYTES`].
pub const IMAGE_TOO_LARGE: &str = "Image size should be less than 5MB";

/// Default bucket for every uploaded image.
pub const DEFAULT_IMAGE_BUCKET: &str = "hero-images";

/// Length of the random suffix in [`unique_object_name`].
const SUFFIX_LEN: usize = 7;

const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Reject anything that is not an `image/*` upload of at most
/// [`MAX_IMAGE_BYTES`].
pub fn validate_image(content_type: &str, size: usize) -> Result<(), CoreError> {
    if !content_type.starts_with("image/") {
        return Err(CoreError::Validation(
            "Please select a valid image file".into(),
        ));
    }
    if size > MAX_IMAGE_BYTES {
        return Err(CoreError::Validation(IMAGE_TOO_LARGE.into()));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Object naming
// ---------------------------------------------------------------------------

/// Text after the last `.` of a file name. A name without a dot is
/// returned whole.
pub fn file_extension(filename: &str) -> &str {
    filename.rsplit('.').next().unwrap_or(filename)
}

/// `{unix_millis}-{7 base36 chars}.{ext}`, used for project images and
/// client logos.
pub fn unique_object_name(filename: &str, now: Timestamp) -> String {
    let mut rng = rand::rng();
    let suffix: String = (0..SUFFIX_LEN)
        .map(|_| BASE36[rng.random_range(0..BASE36.len())] as char)
        .collect();
    format!(
        "{}-{suffix}.{}",
        now.timestamp_millis(),
        file_extension(filename)
    )
}

/// `hero-{unix_millis}.{ext}`. Hero uploads overwrite on collision.
pub fn hero_object_name(filename: &str, now: Timestamp) -> String {
    format!("hero-{}.{}", now.timestamp_millis(), file_extension(filename))
}

/// Object name behind a public URL, if the URL lies directly under
/// `bucket_prefix` (the bucket's public URL with an empty object name).
/// External links and URLs into other buckets yield `None`.
pub fn stored_object_name<'a>(url: &'a str, bucket_prefix: &str) -> Option<&'a str> {
    url.strip_prefix(bucket_prefix)
        .filter(|name| !name.is_empty() && !name.contains('/'))
}
