//! Bayesian optimization of expensive black-box functions with a Gaussian Process surrogate.
//!
//! This crate gathers:
//! * [gp]: Gaussian Process regression (Cholesky based fit, posterior prediction,
//!   hyperparameters tuning by log marginal likelihood maximization),
//! * [bo]: the bayesian optimization loop maximizing a function within a box domain
//!   (acquisition functions, multistart acquisition search, log scale search).
//!
//! ```no_run
//! use bayesbox::bo::{Acquisition, BayesOptBuilder};
//! use ndarray::{array, ArrayView1};
//!
//! let f = |x: &ArrayView1<f64>| -> anyhow::Result<f64> {
//!     Ok(-(x[0] - 1.).powi(2) - (x[1] - 2.).powi(2))
//! };
//! let res = BayesOptBuilder::optimize(f)
//!     .configure(|config| config.acquisition(Acquisition::ucb(2.576)).max_iters(20))
//!     .max_within(&array![[-5., 5.], [-5., 5.]])
//!     .expect("valid bounds")
//!     .maximize()
//!     .expect("maximization");
//! println!("max f(x) = {} at x = {}", res.y_opt, res.x_opt);
//! ```
#![warn(missing_docs)]

pub use bayesbox_bo as bo;
pub use bayesbox_gp as gp;

#[cfg(test)]
mod tests {
    use super::bo::{Acquisition, BayesOptBuilder};
    use super::gp::{GaussianProcessModel, Kernel};
    use approx::assert_abs_diff_eq;
    use ndarray::{array, ArrayView1};

    #[test]
    fn test_custom_acquisition() {
        // Pure exploitation: the surrogate mean
        let mean = Acquisition::custom(|x: &[f64], gp: &GaussianProcessModel, _ymax: f64| {
            gp.sample_predict(&ArrayView1::from(x))
                .map(|(m, _)| m)
                .unwrap_or(f64::NEG_INFINITY)
        });
        let f = |x: &ArrayView1<f64>| -> anyhow::Result<f64> { Ok(-(x[0] - 3.).powi(2)) };
        let mut bo = BayesOptBuilder::optimize(f)
            .configure(|config| config.max_iters(10).seed(42))
            .max_within(&array![[0., 6.]])
            .expect("valid bounds");
        bo.set_acquisition(mean)
            .set_kernel(Kernel::ard_matern(1., 1.));
        bo.initialize(&array![[0.5], [5.5]]).expect("seeding");
        let res = bo.maximize().expect("maximization");
        assert_eq!(res.n_iters, 10);
        assert_abs_diff_eq!(res.x_opt[0], 3., epsilon = 0.5);
    }
}
