use thiserror::Error;

/// A result type for GP regression algorithm
pub type Result<T> = std::result::Result<T, GpError>;

/// An error when using [`GaussianProcessModel`](crate::GaussianProcessModel)
#[derive(Error, Debug)]
pub enum GpError {
    /// When prediction or likelihood is requested before any successful fit
    #[error("Gaussian process is not fitted")]
    NotFittedError,
    /// When covariance matrix factorization or likelihood computation fails
    #[error("Numerical error: {0}")]
    NumericalError(String),
    /// When linear algebra computation fails
    #[error(transparent)]
    LinalgError(#[from] linfa_linalg::LinalgError),
    /// When model configuration is invalid (noise, kernel parameters, tuning bounds)
    #[error("Invalid configuration: {0}")]
    InvalidConfigError(String),
    /// When error due to a bad value
    #[error("InvalidValue error: {0}")]
    InvalidValueError(String),
    /// When a linfa error occurs
    #[error(transparent)]
    LinfaError(#[from] linfa::error::Error),
}

impl GpError {
    /// Whether the error comes from a numerical failure of the covariance matrix
    /// (not positive-definite, non finite likelihood)
    pub fn is_numerical(&self) -> bool {
        matches!(self, GpError::NumericalError(_) | GpError::LinalgError(_))
    }
}
