//! Task color generation and validation.
//!
//! Every task carries a `#rrggbb` color, generated at creation time and kept
//! distinct across a single owner's tasks. Uniqueness is enforced by the
//! repository (retry on collision); this module only knows how to draw a
//! candidate and how to recognize a well-formed value.

use rand::Rng;

use crate::error::CoreError;

/// Length of a color string including the leading `#`.
pub const COLOR_LENGTH: usize = 7;

/// Draw a random color, lowercase hex, uniformly over the 24-bit RGB space.
pub fn random_color() -> String {
    let value: u32 = rand::rng().random_range(0..=0xFF_FFFF);
    format!("#{value:06x}")
}

/// Validate that a color string matches the `#rrggbb` lowercase hex format.
///
/// Colors are compared for per-owner uniqueness by plain string equality, so
/// the lowercase canonical form is the only accepted spelling.
pub fn validate_color(color: &str) -> Result<(), CoreError> {
    if color.len() != COLOR_LENGTH {
        return Err(CoreError::Validation(format!(
            "Invalid color '{color}'. Must be in #rrggbb hex format"
        )));
    }

    if !color.starts_with('#') {
        return Err(CoreError::Validation(format!(
            "Invalid color '{color}'. Must start with '#'"
        )));
    }

    let hex_part = &color[1..];
    if !hex_part
        .chars()
        .all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase())
    {
        return Err(CoreError::Validation(format!(
            "Invalid color '{color}'. Must contain only lowercase hex digits after '#'"
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_color_is_well_formed() {
        for _ in 0..100 {
            let color = random_color();
            validate_color(&color).expect("generated color must validate");
        }
    }

    #[test]
    fn random_color_pads_small_values() {
        // Every draw is exactly 7 characters, even tiny ones like #00000a.
        for _ in 0..100 {
            assert_eq!(random_color().len(), COLOR_LENGTH);
        }
    }

    #[test]
    fn accepts_canonical_colors() {
        for color in ["#000000", "#ffffff", "#a1b2c3", "#0f0f0f"] {
            assert!(validate_color(color).is_ok(), "{color} should be valid");
        }
    }

    #[test]
    fn rejects_malformed_colors() {
        for color in [
            "",
            "#",
            "fff",
            "#fff",
            "#gggggg",
            "#FFFFFF",
            "#1234567",
            "123456#",
            "#12 456",
        ] {
            assert!(validate_color(color).is_err(), "{color} should be rejected");
        }
    }
}
