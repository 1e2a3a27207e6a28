//! Color sanitization for widget payloads
//!
//! The widget understands CSS color names and `#RRGGBB` hex strings but not
//! an alpha channel, so `#RRGGBBAA` inputs are cut down to `#RRGGBB`.
//! Named colors pass through unchanged; the browser resolves them.

use serde::{Deserialize, Serialize};

use crate::error::{ScatterError, ScatterResult};

/// Length of a `#RRGGBB` string
const HEX_RGB_LEN: usize = 7;

/// Sanitize a single color string
pub fn sanitize_color(color: &str) -> ScatterResult<String> {
    if color.trim().is_empty() {
        return Err(ScatterError::validation("color must not be empty"));
    }

    let Some(digits) = color.strip_prefix('#') else {
        return Ok(color.to_string());
    };

    // CSS hex lengths only; `#1234567` is rejected rather than truncated
    if !matches!(digits.len(), 3 | 4 | 6 | 8) || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ScatterError::validation(format!(
            "invalid hex color '{color}'"
        )));
    }

    if color.len() > HEX_RGB_LEN {
        Ok(color[..HEX_RGB_LEN].to_string())
    } else {
        Ok(color.to_string())
    }
}

/// A uniform color or one color per point
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColorSpec {
    Uniform(String),
    PerPoint(Vec<String>),
}

impl ColorSpec {
    /// Sanitize every color
    pub fn sanitized(&self) -> ScatterResult<Self> {
        match self {
            ColorSpec::Uniform(c) => Ok(ColorSpec::Uniform(sanitize_color(c)?)),
            ColorSpec::PerPoint(colors) => colors
                .iter()
                .map(|c| sanitize_color(c))
                .collect::<ScatterResult<Vec<_>>>()
                .map(ColorSpec::PerPoint),
        }
    }

    /// Number of per-point entries, `None` for a uniform color
    pub fn per_point_len(&self) -> Option<usize> {
        match self {
            ColorSpec::Uniform(_) => None,
            ColorSpec::PerPoint(colors) => Some(colors.len()),
        }
    }
}

impl Default for ColorSpec {
    fn default() -> Self {
        ColorSpec::Uniform("steelblue".to_string())
    }
}

impl From<&str> for ColorSpec {
    fn from(color: &str) -> Self {
        ColorSpec::Uniform(color.to_string())
    }
}

impl From<Vec<String>> for ColorSpec {
    fn from(colors: Vec<String>) -> Self {
        ColorSpec::PerPoint(colors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alpha_channel_is_stripped() {
        assert_eq!(sanitize_color("#11223344").unwrap(), "#112233");
    }

    #[test]
    fn test_named_colors_pass_through() {
        assert_eq!(sanitize_color("steelblue").unwrap(), "steelblue");
        assert_eq!(sanitize_color("DarkOrange").unwrap(), "DarkOrange");
        assert_eq!(sanitize_color(" red").unwrap(), " red");
    }

    #[test]
    fn test_short_hex_kept() {
        assert_eq!(sanitize_color("#abc").unwrap(), "#abc");
        assert_eq!(sanitize_color("#A1B2C3").unwrap(), "#A1B2C3");
    }

    #[test]
    fn test_malformed_hex_rejected() {
        assert!(sanitize_color("#12345").is_err());
        assert!(sanitize_color("#gg0000").is_err());
        assert!(sanitize_color("").is_err());
        assert!(sanitize_color("   ").is_err());
    }

    #[test]
    fn test_seven_digit_hex_rejected() {
        let err = sanitize_color("#1234567").unwrap_err();
        assert!(err.to_string().contains("#1234567"));
    }

    #[test]
    fn test_per_point_sanitized() {
        let spec = ColorSpec::PerPoint(vec!["#ff000080".to_string(), "red".to_string()]);
        assert_eq!(
            spec.sanitized().unwrap(),
            ColorSpec::PerPoint(vec!["#ff0000".to_string(), "red".to_string()])
        );
        assert_eq!(spec.per_point_len(), Some(2));
        assert_eq!(ColorSpec::default().per_point_len(), None);
    }

    #[test]
    fn test_deserialize_untagged() {
        let uniform: ColorSpec = serde_json::from_str("\"red\"").unwrap();
        assert_eq!(uniform, ColorSpec::Uniform("red".to_string()));
        let per_point: ColorSpec = serde_json::from_str("[\"red\", \"blue\"]").unwrap();
        assert_eq!(per_point.per_point_len(), Some(2));
    }
}
