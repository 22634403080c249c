//! Available acquisition functions used to select the next point to evaluate.
//!
//! An acquisition function scores a candidate `x` from the GP posterior at `x`
//! and the current best observed value `ymax`: the higher, the more promising.
mod ei;
mod ucb;

pub use ei::{expected_improvement, probability_of_improvement, EI, POI};
pub use ucb::{upper_confidence_bound, DEFAULT_KAPPA, UCB};

use bayesbox_gp::GaussianProcessModel;
use std::fmt;
use std::sync::Arc;

/// Signature of a user-supplied acquisition function `acq(x, gp, ymax)`
pub type AcquisitionFn = dyn Fn(&[f64], &GaussianProcessModel, f64) -> f64 + Send + Sync;

/// Acquisition function choice
#[derive(Clone, Default)]
pub enum Acquisition {
    /// Expected Improvement
    #[default]
    ExpectedImprovement,
    /// Probability of Improvement
    ProbabilityOfImprovement,
    /// Upper Confidence Bound `mean + kappa * sigma`
    UpperConfidenceBound {
        /// Exploration weight
        kappa: f64,
    },
    /// User defined acquisition function
    Custom(Arc<AcquisitionFn>),
}

impl Acquisition {
    /// Upper Confidence Bound with the given exploration weight
    /// (see [DEFAULT_KAPPA])
    pub fn ucb(kappa: f64) -> Self {
        Acquisition::UpperConfidenceBound { kappa }
    }

    /// User defined acquisition function
    pub fn custom<F>(acq: F) -> Self
    where
        F: Fn(&[f64], &GaussianProcessModel, f64) -> f64 + Send + Sync + 'static,
    {
        Acquisition::Custom(Arc::new(acq))
    }

    /// Name of the acquisition function
    pub fn name(&self) -> &'static str {
        match self {
            Acquisition::ExpectedImprovement => EI,
            Acquisition::ProbabilityOfImprovement => POI,
            Acquisition::UpperConfidenceBound { .. } => UCB,
            Acquisition::Custom(_) => "Custom",
        }
    }

    /// Acquisition value at given point `x` with regard to the `gp` surrogate
    /// and the current maximum `ymax` of the objective function.
    pub fn value(&self, x: &[f64], gp: &GaussianProcessModel, ymax: f64) -> f64 {
        match self {
            Acquisition::ExpectedImprovement => expected_improvement(x, gp, ymax),
            Acquisition::ProbabilityOfImprovement => probability_of_improvement(x, gp, ymax),
            Acquisition::UpperConfidenceBound { kappa } => upper_confidence_bound(x, gp, *kappa),
            Acquisition::Custom(acq) => acq(x, gp, ymax),
        }
    }
}

impl fmt::Debug for Acquisition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Acquisition::UpperConfidenceBound { kappa } => write!(f, "{}(kappa={kappa})", UCB),
            _ => write!(f, "{}", self.name()),
        }
    }
}
