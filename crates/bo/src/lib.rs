//! This library implements Bayesian optimization of expensive black-box functions
//! R^nx -> R within a box domain, driven by a [Gaussian Process](bayesbox_gp) surrogate.
//!
//! The optimizer iterates:
//! * fit the GP surrogate on evaluated points, hyperparameters being tuned by likelihood maximization,
//! * maximize an acquisition function (Expected Improvement by default) from several random starts,
//! * evaluate the objective at the acquisition maximum.
//!
//! It stops when the acquisition maximum falls under a threshold (after a minimum number
//! of iterations) or when the iteration budget is exhausted.
//!
//! ```no_run
//! use bayesbox_bo::{Acquisition, BayesOptBuilder};
//! use ndarray::{array, ArrayView1};
//!
//! fn xsinx(x: &ArrayView1<f64>) -> anyhow::Result<f64> {
//!     Ok(-(x[0] - 3.5) * ((x[0] - 3.5) / std::f64::consts::PI).sin())
//! }
//!
//! let mut bo = BayesOptBuilder::optimize(xsinx)
//!     .configure(|config| config.max_iters(20).acquisition(Acquisition::ExpectedImprovement))
//!     .max_within(&array![[0., 25.]])
//!     .expect("optimizer configured");
//! bo.initialize(&array![[1.], [20.]]).expect("seeded points");
//! let res = bo.maximize().expect("maximization of xsinx");
//! println!("Maximum xsinx(x) = {} at x = {}", res.y_opt, res.x_opt);
//! ```
//!
//! Progress is reported through the `log` facade and can be followed programmatically
//! by registering a [BoObserver].
#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]

pub mod acquisition;

mod bayesopt;
mod config;
mod errors;
mod observer;
mod types;

pub use crate::acquisition::Acquisition;
pub use crate::bayesopt::*;
pub use crate::config::*;
pub use crate::errors::*;
pub use crate::observer::*;
pub use crate::optimizers::INFILL_MAX_EVAL_DEFAULT;
pub use crate::types::*;
pub use crate::utils::{norm_cdf, norm_pdf, random_sample, LogScale};

mod optimizers;
mod utils;
