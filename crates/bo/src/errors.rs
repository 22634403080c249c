use thiserror::Error;

/// A result type for bayesian optimization errors
pub type Result<T> = std::result::Result<T, BoError>;

/// An error for bayesian optimization algorithm
#[derive(Error, Debug)]
pub enum BoError {
    /// When configuration is invalid (bounds, log scale, loop parameters)
    #[error("Invalid configuration: {0}")]
    InvalidConfigError(String),
    /// When an invalid value is encountered
    #[error("Value error: {0}")]
    InvalidValueError(String),
    /// When the GP surrogate fails
    #[error("GP error: {0}")]
    GpError(#[from] bayesbox_gp::GpError),
    /// When the objective function fails or returns a non finite value
    #[error("Objective error: {0:#}")]
    ObjectiveError(#[from] anyhow::Error),
}
