use crate::utils::{norm_cdf, norm_pdf};
use bayesbox_gp::GaussianProcessModel;
use ndarray::ArrayView1;

/// Expected Improvement name
pub const EI: &str = "EI";
/// Probability of Improvement name
pub const POI: &str = "PoI";

/// Compute EI at given `x` point using the `gp` surrogate and the current maximum `ymax`:
/// `(mean - ymax) Φ(z) + sigma φ(z)` with `z = (mean - ymax) / sigma`
pub fn expected_improvement(x: &[f64], gp: &GaussianProcessModel, ymax: f64) -> f64 {
    match gp.sample_predict(&ArrayView1::from(x)) {
        Ok((mean, var)) => {
            if var < f64::EPSILON {
                0.0
            } else {
                let sigma = var.sqrt();
                let z = (mean - ymax) / sigma;
                (mean - ymax) * norm_cdf(z) + sigma * norm_pdf(z)
            }
        }
        _ => 0.0,
    }
}

/// Compute PoI at given `x` point using the `gp` surrogate and the current maximum `ymax`:
/// `Φ((mean - ymax) / sigma)`
pub fn probability_of_improvement(x: &[f64], gp: &GaussianProcessModel, ymax: f64) -> f64 {
    match gp.sample_predict(&ArrayView1::from(x)) {
        Ok((mean, var)) => {
            if var < f64::EPSILON {
                0.0
            } else {
                norm_cdf((mean - ymax) / var.sqrt())
            }
        }
        _ => 0.0,
    }
}
