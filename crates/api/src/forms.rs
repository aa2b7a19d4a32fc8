//! Multipart form reading for the content screens that carry an image.

use std::collections::HashMap;

use axum::extract::multipart::MultipartError;
use axum::extract::Multipart;
use axum::http::StatusCode;
use sustaineco_core::error::CoreError;
use sustaineco_core::media::{validate_image, IMAGE_TOO_LARGE};

use crate::error::{AppError, AppResult};

/// A file part of a multipart form.
#[derive(Debug, Clone)]
pub struct UploadedImage {
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl UploadedImage {
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_image(&self.content_type, self.bytes.len())
    }
}

/// Where a record's image comes from on create or update.
#[derive(Debug, Clone)]
pub enum ImageSource {
    /// A newly uploaded file.
    Upload(UploadedImage),
    /// A URL the client already has (e.g. the current one, unchanged).
    Url(String),
}

/// Text fields and files of one multipart submission.
#[derive(Debug, Default)]
pub struct ContentForm {
    fields: HashMap<String, String>,
    files: HashMap<String, UploadedImage>,
}

impl ContentForm {
    /// Drain the multipart stream. Parts with a file name are files, the
    /// rest are text. An empty file part (no file chosen) is dropped.
    pub async fn read(mut multipart: Multipart) -> AppResult<Self> {
        let mut form = Self::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(form_error)?
        {
            let name = field.name().unwrap_or("").to_string();
            match field.file_name().map(str::to_string) {
                Some(filename) => {
                    let content_type = field
                        .content_type()
                        .unwrap_or("application/octet-stream")
                        .to_string();
                    let data = field
                        .bytes()
                        .await
                        .map_err(form_error)?;
                    if filename.is_empty() && data.is_empty() {
                        continue;
                    }
                    form.files.insert(
                        name,
                        UploadedImage {
                            filename,
                            content_type,
                            bytes: data.to_vec(),
                        },
                    );
                }
                None => {
                    let text = field
                        .text()
                        .await
                        .map_err(form_error)?;
                    form.fields.insert(name, text);
                }
            }
        }

        Ok(form)
    }

    /// A text field as sent.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// A text field that must be present and non-blank.
    pub fn required(&self, name: &str, message: &str) -> AppResult<String> {
        optional_nonblank(self.text(name), message)?
            .ok_or_else(|| AppError::Core(CoreError::Validation(message.to_string())))
    }

    /// A text field that may be absent, but not blank when present.
    pub fn optional(&self, name: &str, message: &str) -> AppResult<Option<String>> {
        optional_nonblank(self.text(name), message)
    }

    /// The uploaded file under `file_field`, or else a non-empty URL under
    /// `url_field`. Uploaded files are validated here.
    pub fn image_source(
        &mut self,
        file_field: &str,
        url_field: &str,
    ) -> AppResult<Option<ImageSource>> {
        if let Some(file) = self.files.remove(file_field) {
            file.validate()?;
            return Ok(Some(ImageSource::Upload(file)));
        }
        Ok(self
            .text(url_field)
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .map(|url| ImageSource::Url(url.to_string())))
    }
}

/// A body cut off by the upload limit can only be an oversized image;
/// other read failures keep the status axum assigns them.
fn form_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::Core(CoreError::Validation(IMAGE_TOO_LARGE.to_string()))
    } else {
        AppError::Multipart(err)
    }
}

fn optional_nonblank(value: Option<&str>, message: &str) -> AppResult<Option<String>> {
    match value {
        None => Ok(None),
        Some(v) if v.trim().is_empty() => {
            Err(AppError::Core(CoreError::Validation(message.to_string())))
        }
        Some(v) => Ok(Some(v.trim().to_string())),
    }
}
