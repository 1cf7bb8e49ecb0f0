//! Error taxonomy for spectrum computations
//!
//! Every failure is raised at the point of detection; no partial spectra
//! are ever returned.

use thiserror::Error;

/// Result type for all fallible spectrum operations
pub type Result<T> = std::result::Result<T, FdsError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FdsError {
    /// A field required for the requested computation was not supplied
    #[error("Missing parameter: {0}")]
    MissingParameter(String),

    /// A value lies outside its accepted domain or has the wrong shape
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A value would break the underlying mathematics (Q <= 0, b <= 0, ...)
    #[error("Numeric domain error: {0}")]
    NumericDomain(String),
}

impl FdsError {
    pub(crate) fn missing(what: impl Into<String>) -> Self {
        FdsError::MissingParameter(what.into())
    }

    pub(crate) fn invalid(what: impl Into<String>) -> Self {
        FdsError::InvalidArgument(what.into())
    }

    pub(crate) fn domain(what: impl Into<String>) -> Self {
        FdsError::NumericDomain(what.into())
    }
}

/// Ensure a scalar is finite and strictly positive
pub(crate) fn require_positive(name: &str, value: f64) -> Result<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(FdsError::domain(format!(
            "`{}` must be a finite positive number (got {})",
            name, value
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = FdsError::missing("`t_total`");
        assert_eq!(err.to_string(), "Missing parameter: `t_total`");

        let err = FdsError::invalid("unknown sweep type `cubic`");
        assert!(err.to_string().contains("cubic"));
    }

    #[test]
    fn test_require_positive() {
        assert_eq!(require_positive("Q", 10.0), Ok(10.0));
        assert!(matches!(require_positive("Q", 0.0), Err(FdsError::NumericDomain(_))));
        assert!(require_positive("b", f64::NAN).is_err());
        assert!(require_positive("b", -3.0).is_err());
    }
}
