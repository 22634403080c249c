//! This library implements [Gaussian Process](https://en.wikipedia.org/wiki/Gaussian_process) regression
//! used as a surrogate model of expensive black-box functions.
//!
//! The model is fitted through the Cholesky factorization of the regularized
//! covariance matrix `K + noise.I` which gives:
//! * the weights `a` solving `(K + noise.I) a = y` by two triangular solves,
//! * the log marginal likelihood `-½ yᵗa - Σ ln(diag(L)) - n/2 ln(2π)`.
//!
//! Kernel hyperparameters (amplitude and length scales) can be tuned by maximizing
//! the log marginal likelihood with a bounded quasi-Newton optimizer (SLSQP),
//! see [GaussianProcessModel::best_fit].
//!
//! GP models are implemented by [GaussianProcessModel], optionally parameterized by [GpParams]
//! to be fitted linfa-style on a `Dataset`.
//!
//! ```
//! use bayesbox_gp::{GaussianProcessModel, Kernel};
//! use linfa::prelude::{Dataset, Fit};
//! use ndarray::array;
//!
//! let xt = array![[0.], [1.], [2.], [3.], [4.]];
//! let yt = array![0., 1.5, 0.9, 1., 3.];
//!
//! let gp = GaussianProcessModel::params(Kernel::squared_exponential(1., 1.))
//!     .noise(1e-6)
//!     .fit(&Dataset::new(xt, yt))
//!     .expect("GP fitted");
//!
//! let (mean, var) = gp.fast_predict(&array![[0.5], [2.5]]).expect("GP prediction");
//! println!("mean = {mean}, variance = {var}");
//! ```
#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]
mod algorithm;
pub mod covariance;
mod errors;
pub mod kernels;
mod optimization;
mod parameters;
mod utils;

pub use algorithm::*;
pub use errors::*;
pub use kernels::{CustomKernel, Kernel, KernelKind, KernelParams};
pub use parameters::*;
