//! About-us text rules.

use crate::error::CoreError;

/// What the rich-text editor submits when the document is empty.
pub const EMPTY_EDITOR_DOCUMENT: &str = "<p></p>";

/// Both the title and the HTML body are required.
pub fn validate_about(title: &str, description: &str) -> Result<(), CoreError> {
    if title.trim().is_empty() {
        return Err(CoreError::Validation("Title is required".into()));
    }
    let body = description.trim();
    if body.is_empty() || body == EMPTY_EDITOR_DOCUMENT {
        return Err(CoreError::Validation("Description is required".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requires_title() {
        let err = validate_about("   ", "<p>Hello</p>").unwrap_err();
        assert_eq!(err.to_string(), "Validation failed: Title is required");
    }

    #[test]
    fn rejects_empty_editor_document() {
        assert!(validate_about("About", "<p></p>").is_err());
        assert!(validate_about("About", "").is_err());
        assert!(validate_about("About", "<p>We are S3.</p>").is_ok());
    }
}
