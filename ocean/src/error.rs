use thiserror::Error;

/// Rejected configuration, raised when a wave field or floating body is built.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("wave component {index}: wavelength must be positive and finite, got {value}")]
    InvalidWavelength { index: usize, value: f32 },

    #[error("wave component {index}: amplitude must be finite and non-negative, got {value}")]
    InvalidAmplitude { index: usize, value: f32 },

    #[error("wave component {index}: speed must be finite, got {value}")]
    InvalidSpeed { index: usize, value: f32 },

    #[error("wave component {index}: direction must be a finite, non-zero vector")]
    InvalidDirection { index: usize },

    #[error("{name} must be finite, got {value}")]
    NonFinite { name: &'static str, value: f32 },

    #[error("{name} must be greater than zero, got {value}")]
    NotPositive { name: &'static str, value: f32 },

    #[error("{name} must not be negative, got {value}")]
    Negative { name: &'static str, value: f32 },

    #[error("{name} must lie within [0, 1], got {value}")]
    OutOfUnitRange { name: &'static str, value: f32 },

    #[error("a floating body needs at least one sample point")]
    NoSamplePoints,

    #[error("sample point {index} has a non-finite offset")]
    InvalidSamplePoint { index: usize },
}

pub(crate) fn finite(name: &'static str, value: f32) -> Result<f32, ConfigError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ConfigError::NonFinite { name, value })
    }
}

pub(crate) fn positive(name: &'static str, value: f32) -> Result<f32, ConfigError> {
    finite(name, value)?;
    if value > 0.0 {
        Ok(value)
    } else {
        Err(ConfigError::NotPositive { name, value })
    }
}

pub(crate) fn non_negative(name: &'static str, value: f32) -> Result<f32, ConfigError> {
    finite(name, value)?;
    if value >= 0.0 {
        Ok(value)
    } else {
        Err(ConfigError::Negative { name, value })
    }
}

pub(crate) fn unit_range(name: &'static str, value: f32) -> Result<f32, ConfigError> {
    finite(name, value)?;
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(ConfigError::OutOfUnitRange { name, value })
    }
}
