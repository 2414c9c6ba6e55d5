//! Category naming rules and the default catalog.
//!
//! The default names must match what the `init-categorias` seed binary
//! inserts; they are shared globally across users.

use crate::error::CoreError;

/// Categories created by the seed operation, in insertion order.
pub const DEFAULT_CATEGORY_NAMES: &[&str] =
    &["Trabajo", "Estudio", "Casa", "Familia", "Diversión"];

/// Maximum category name length in characters.
pub const MAX_CATEGORY_NAME_LENGTH: usize = 100;

/// Validate a category name: non-blank and at most
/// [`MAX_CATEGORY_NAME_LENGTH`] characters. Callers trim surrounding
/// whitespace before validating.
pub fn validate_category_name(name: &str) -> Result<(), CoreError> {
    if name.is_empty() {
        return Err(CoreError::Validation("name must not be empty".to_string()));
    }
    let length = name.chars().count();
    if length > MAX_CATEGORY_NAME_LENGTH {
        return Err(CoreError::Validation(format!(
            "name must be at most {MAX_CATEGORY_NAME_LENGTH} characters, got {length}"
        )));
    }
    Ok(())
}
