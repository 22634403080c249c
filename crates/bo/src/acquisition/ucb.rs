use bayesbox_gp::GaussianProcessModel;
use ndarray::ArrayView1;

/// Upper Confidence Bound name
pub const UCB: &str = "UCB";
/// Default exploration weight of UCB
pub const DEFAULT_KAPPA: f64 = 1.0;

/// Compute UCB at given `x` point using the `gp` surrogate: `mean + kappa * sigma`
pub fn upper_confidence_bound(x: &[f64], gp: &GaussianProcessModel, kappa: f64) -> f64 {
    match gp.sample_predict(&ArrayView1::from(x)) {
        Ok((mean, var)) => mean + kappa * var.sqrt(),
        _ => f64::NEG_INFINITY,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use bayesbox_gp::{HyperTuning, Kernel};
    use ndarray::array;

    #[test]
    fn test_ucb() {
        let xt = array![[0.], [1.], [2.]];
        let yt = array![1., 2., 0.5];
        let mut gp = GaussianProcessModel::new(1e-6)
            .expect("valid noise")
            .hyper_tuning(HyperTuning::Fixed);
        gp.fit(&xt, &yt, &Kernel::squared_exponential(1., 1.))
            .expect("GP fit error");

        let (mean, var) = gp.sample_predict(&array![0.5]).expect("GP prediction");
        assert_abs_diff_eq!(
            upper_confidence_bound(&[0.5], &gp, 2.),
            mean + 2. * var.sqrt(),
            epsilon = 1e-12
        );
        assert_abs_diff_eq!(upper_confidence_bound(&[0.5], &gp, 0.), mean);
    }
}
