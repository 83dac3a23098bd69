//! Validation System - Reject At The Setter
//!
//! Out-of-range configuration fails where it is set, naming the field.
//! Nothing is clamped.

use thiserror::Error;

pub const MIN_SIZE: u32 = 8;
pub const MAX_SIZE: u32 = 2048;

/// Upper bounds for the count options. Each count sizes an allocation.
pub const MAX_PIXELS: u32 = 64;
pub const MAX_COLORS: u32 = 64;
pub const MAX_SHAPES: u32 = 64;
pub const MAX_COLOR_STOPS: u32 = 64;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Invalid size '{size}'. Size must be between {min} and {max} pixels.")]
    InvalidSize { size: u32, min: u32, max: u32 },

    #[error("Invalid {field} value '{value}'. Must be between 0.0 and 1.0.")]
    InvalidLightness { field: &'static str, value: f64 },

    #[error("Invalid {field} value '{value}'. Must be greater than 0.")]
    NotPositive { field: &'static str, value: i64 },

    #[error("Invalid {field} value '{value}'. Must be at most {max}.")]
    TooLarge {
        field: &'static str,
        value: u32,
        max: u32,
    },

    #[error("Invalid {field} value '{value}'. Must be greater than or equal to 0.")]
    Negative { field: &'static str, value: i64 },

    #[error("Invalid {field} value '{value}'. Expected one of: {expected}.")]
    UnknownVariant {
        field: &'static str,
        value: String,
        expected: &'static str,
    },
}

impl ValidationError {
    /// Name of the offending field.
    pub fn field(&self) -> &'static str {
        match self {
            Self::InvalidSize { .. } => "size",
            Self::InvalidLightness { field, .. }
            | Self::NotPositive { field, .. }
            | Self::TooLarge { field, .. }
            | Self::Negative { field, .. }
            | Self::UnknownVariant { field, .. } => field,
        }
    }
}

pub fn size(size: u32) -> Result<u32, ValidationError> {
    if (MIN_SIZE..=MAX_SIZE).contains(&size) {
        Ok(size)
    } else {
        Err(ValidationError::InvalidSize {
            size,
            min: MIN_SIZE,
            max: MAX_SIZE,
        })
    }
}

pub fn lightness(field: &'static str, value: f64) -> Result<f64, ValidationError> {
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(ValidationError::InvalidLightness { field, value })
    }
}

pub fn positive(field: &'static str, value: u32) -> Result<u32, ValidationError> {
    if value > 0 {
        Ok(value)
    } else {
        Err(ValidationError::NotPositive {
            field,
            value: i64::from(value),
        })
    }
}

/// A count between 1 and `max`, inclusive.
pub fn count(field: &'static str, value: u32, max: u32) -> Result<u32, ValidationError> {
    let value = positive(field, value)?;
    if value <= max {
        Ok(value)
    } else {
        Err(ValidationError::TooLarge { field, value, max })
    }
}

pub fn non_negative(field: &'static str, value: i32) -> Result<i32, ValidationError> {
    if value >= 0 {
        Ok(value)
    } else {
        Err(ValidationError::Negative {
            field,
            value: i64::from(value),
        })
    }
}
