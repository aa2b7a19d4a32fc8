//! Password form checks done before the managed backend is asked to change
//! anything. Strength rules belong to the backend.

use crate::error::CoreError;

/// Which form submitted the new password. The two forms word the mismatch
/// differently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordFlow {
    /// Signed-in admin changing their password from settings.
    Change,
    /// Password set from the emailed reset link.
    Reset,
}

impl PasswordFlow {
    fn mismatch_message(self) -> &'static str {
        match self {
            PasswordFlow::Change => "New passwords do not match.",
            PasswordFlow::Reset => "Passwords do not match!",
        }
    }
}

pub fn validate_new_password(
    flow: PasswordFlow,
    new_password: &str,
    confirm_password: &str,
) -> Result<(), CoreError> {
    if new_password != confirm_password {
        return Err(CoreError::Validation(flow.mismatch_message().into()));
    }
    if new_password.is_empty() {
        return Err(CoreError::Validation("Password must not be empty".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mismatch_wording_depends_on_flow() {
        let err = validate_new_password(PasswordFlow::Change, "a", "b").unwrap_err();
        assert_eq!(err.to_string(), "Validation failed: New passwords do not match.");
        let err = validate_new_password(PasswordFlow::Reset, "a", "b").unwrap_err();
        assert_eq!(err.to_string(), "Validation failed: Passwords do not match!");
    }

    #[test]
    fn empty_password_is_rejected() {
        assert!(validate_new_password(PasswordFlow::Reset, "", "").is_err());
        assert!(validate_new_password(PasswordFlow::Reset, "s3cret!", "s3cret!").is_ok());
    }
}
