//! Field-level checks shared by the entity modules.
//!
//! Lengths are counted in characters, not bytes.

use crate::errors::ModelError;

/// Require `1..=max` characters in `value`.
pub fn validate_len(field: &str, value: &str, max: usize) -> Result<(), ModelError> {
    let len = value.chars().count();
    if len == 0 {
        return Err(ModelError::Validation(format!("{field} must not be empty")));
    }
    if len > max {
        return Err(ModelError::Validation(format!(
            "{field} must be at most {max} characters (got {len})"
        )));
    }
    Ok(())
}
