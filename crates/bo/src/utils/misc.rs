use crate::errors::{BoError, Result};
use libm::erfc;
use ndarray::{ArrayBase, Data, Ix2};

const SQRT_2PI: f64 = 2.5066282746310007;

/// Cumulative distribution function of Standard Normal at x
pub fn norm_cdf(x: f64) -> f64 {
    0.5 * erfc(-x / std::f64::consts::SQRT_2)
}

/// Probability density function of Standard Normal at x
pub fn norm_pdf(x: f64) -> f64 {
    (-0.5 * x * x).exp() / SQRT_2PI
}

/// Check `xlimits` is a non empty (nx, 2) matrix of finite `[lower, upper]` rows
/// with `lower < upper`
pub fn check_xlimits(xlimits: &ArrayBase<impl Data<Elem = f64>, Ix2>) -> Result<()> {
    if xlimits.nrows() == 0 || xlimits.ncols() != 2 {
        return Err(BoError::InvalidConfigError(format!(
            "bounds should be given as a non empty (nx, 2) matrix, got {:?}",
            xlimits.dim()
        )));
    }
    for (i, row) in xlimits.rows().into_iter().enumerate() {
        let (lower, upper) = (row[0], row[1]);
        if !(lower.is_finite() && upper.is_finite()) {
            return Err(BoError::InvalidConfigError(format!(
                "bounds of dimension {i} should be finite, got [{lower}, {upper}]"
            )));
        }
        if upper <= lower {
            return Err(BoError::InvalidConfigError(format!(
                "upper bound should be greater than lower bound for dimension {i}, got [{lower}, {upper}]"
            )));
        }
    }
    Ok(())
}
