//! Validation helpers for DTOs.

use validator::ValidationError;

/// Longest display name accepted at registration time.
const MAX_DISPLAY_NAME_CHARS: usize = 128;

/// Validates that a display name is non-blank and at most 128 characters.
pub fn validate_display_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        let mut err = ValidationError::new("display_name_blank");
        err.message = Some("Display name must not be blank".into());
        return Err(err);
    }

    let chars = name.chars().count();
    if chars > MAX_DISPLAY_NAME_CHARS {
        let mut err = ValidationError::new("display_name_length");
        err.message = Some(
            format!("Display name must be at most {MAX_DISPLAY_NAME_CHARS} characters (got {chars})")
                .into(),
        );
        return Err(err);
    }

    Ok(())
}
