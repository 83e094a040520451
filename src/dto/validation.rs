//! Validation helpers for DTOs.

use validator::ValidationError;

/// Validates that a display name contains something other than whitespace
/// and no control characters.
///
/// # Examples
///
/// ```ignore
/// validate_user_name("Ada")      // Ok
/// validate_user_name("   ")      // Err - blank
/// validate_user_name("Ada\n")    // Err - control character
/// ```
pub fn validate_user_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        let mut err = ValidationError::new("user_name_blank");
        err.message = Some("User name must not be blank".into());
        return Err(err);
    }

    if name.chars().any(char::is_control) {
        let mut err = ValidationError::new("user_name_format");
        err.message = Some("User name must not contain control characters".into());
        return Err(err);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_user_name_valid() {
        assert!(validate_user_name("Ada").is_ok());
        assert!(validate_user_name("Grace Hopper").is_ok());
        assert!(validate_user_name(" padded ").is_ok());
    }

    #[test]
    fn test_validate_user_name_blank() {
        assert!(validate_user_name("").is_err());
        assert!(validate_user_name("   ").is_err());
        assert!(validate_user_name("\t").is_err());
    }

    #[test]
    fn test_validate_user_name_control_characters() {
        assert!(validate_user_name("Ada\n").is_err());
        assert!(validate_user_name("A\u{0007}da").is_err());
    }
}
