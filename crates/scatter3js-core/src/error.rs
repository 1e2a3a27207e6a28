//! Error types for scatter3js-core
//!
//! Every failure is raised before a payload is constructed, so a host never
//! sees partial data:
//! - Validation of coordinates, options and per-point attributes
//! - Degenerate axis ranges that would divide by zero during rescaling
//! - Option document parsing
//! - Serialization and I/O in widget hosts

use thiserror::Error;

use crate::axis::AxisId;

/// Main error type for scatterplot payload building
#[derive(Error, Debug)]
pub enum ScatterError {
    /// Malformed input (shapes, lengths, coercion, colors)
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// An axis whose range has zero or negative span
    #[error("Degenerate range on {axis} axis: min {min} must be below max {max}")]
    DegenerateRange { axis: AxisId, min: f64, max: f64 },

    /// Option document could not be parsed
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Payload serialization errors
    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ScatterError {
    /// Shorthand for a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        ScatterError::Validation {
            message: message.into(),
        }
    }
}

/// Result type alias for scatterplot operations
pub type ScatterResult<T> = Result<T, ScatterError>;

/// Validation utilities
pub mod validation {
    use super::*;

    /// Validate that a per-point sequence matches the point count
    pub fn validate_point_count(what: &str, len: usize, points: usize) -> ScatterResult<()> {
        if len != points {
            return Err(ScatterError::validation(format!(
                "{what} has length {len} but there are {points} points"
            )));
        }
        Ok(())
    }

    /// Validate that an option carries exactly one entry per axis
    pub fn validate_axis_count(what: &str, len: usize) -> ScatterResult<()> {
        if len != 3 {
            return Err(ScatterError::validation(format!(
                "{what} must have length 3, got {len}"
            )));
        }
        Ok(())
    }

    /// Validate a requested tick count against its upper bound
    pub fn validate_tick_count(axis: AxisId, count: usize, max: usize) -> ScatterResult<()> {
        if count > max {
            return Err(ScatterError::validation(format!(
                "{axis} tick count {count} exceeds the maximum of {max}"
            )));
        }
        Ok(())
    }

    /// Validate a tick label override against the generated tick count
    pub fn validate_tick_labels(axis: AxisId, len: usize, ticks: usize) -> ScatterResult<()> {
        if len != ticks {
            return Err(ScatterError::validation(format!(
                "{axis} tick labels have length {len} but {ticks} ticks were generated"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_display() {
        let err = ScatterError::validation("test error");
        assert!(err.to_string().contains("test error"));
    }

    #[test]
    fn test_degenerate_range_display() {
        let err = ScatterError::DegenerateRange {
            axis: AxisId::Z,
            min: 2.0,
            max: 2.0,
        };
        let text = err.to_string();
        assert!(text.contains("z axis"));
        assert!(text.contains('2'));
    }

    #[test]
    fn test_validate_point_count() {
        assert!(validation::validate_point_count("labels", 3, 3).is_ok());
        assert!(validation::validate_point_count("labels", 2, 3).is_err());
    }

    #[test]
    fn test_validate_axis_count() {
        assert!(validation::validate_axis_count("numTicks", 3).is_ok());
        assert!(validation::validate_axis_count("numTicks", 2).is_err());
        assert!(validation::validate_axis_count("numTicks", 4).is_err());
    }

    #[test]
    fn test_validate_tick_labels() {
        assert!(validation::validate_tick_labels(AxisId::X, 6, 6).is_ok());
        let err = validation::validate_tick_labels(AxisId::Y, 2, 6).unwrap_err();
        assert!(err.to_string().contains("y tick labels"));
    }
}
