//! Range checks for configuration values.

use thiserror::Error;

/// Validation error types.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    /// Numeric setting outside its accepted range.
    #[error("'{field}' value {value} out of range [{min}, {max}]")]
    OutOfRange {
        /// Dotted name of the setting, e.g. `kick.note`.
        field: &'static str,
        /// The rejected value.
        value: f64,
        /// Minimum allowed value.
        min: f64,
        /// Maximum allowed value.
        max: f64,
    },

    /// Waveform name that is neither sine nor saw.
    #[error("unknown waveform '{0}' (expected 'sine' or 'saw')")]
    UnknownWaveform(String),
}

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Check that `value` lies in `min..=max`.
pub fn check_range(
    field: &'static str,
    value: impl Into<f64>,
    min: impl Into<f64>,
    max: impl Into<f64>,
) -> ValidationResult<()> {
    let (value, min, max) = (value.into(), min.into(), max.into());
    if value.is_finite() && (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ValidationError::OutOfRange {
            field,
            value,
            min,
            max,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_range() {
        assert!(check_range("octave", 4, 1, 6).is_ok());
        assert!(check_range("octave", 1, 1, 6).is_ok());
        assert!(check_range("octave", 6, 1, 6).is_ok());
    }

    #[test]
    fn test_out_of_range() {
        let err = check_range("octave", 7, 1, 6).unwrap_err();
        assert_eq!(err.to_string(), "'octave' value 7 out of range [1, 6]");
    }

    #[test]
    fn test_nan_rejected() {
        assert!(check_range("kick.hold_seconds", f32::NAN, 0.0, 10.0).is_err());
    }
}
