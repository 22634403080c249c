//! Bayesian optimizer configuration.
use crate::acquisition::Acquisition;
use crate::errors::{BoError, Result};
use crate::optimizers::INFILL_MAX_EVAL_DEFAULT;
use bayesbox_gp::{HyperTuning, Kernel, DEFAULT_NOISE};

/// Bayesian optimizer configuration
#[derive(Clone, Debug)]
pub struct BoConfig {
    /// Number of random points evaluated at the start of each run,
    /// in addition to the points seeded with `initialize`
    pub(crate) init_points: usize,
    /// Number of local searches (from random starts) of the acquisition maximum
    pub(crate) restarts: usize,
    /// Number of iterations to exceed before the acquisition threshold can stop the run
    pub(crate) min_iters: usize,
    /// Max number of iterations (aka iteration budget)
    /// Note: the number of objective evaluations is at most (seeded + init_points + max_iters)
    pub(crate) max_iters: usize,
    /// The run stops when the acquisition maximum falls under this threshold
    /// (once `min_iters` is exceeded)
    pub(crate) ei_threshold: f64,
    /// Kernel of the GP surrogate, hyperparameters are the starting point of the tuning
    pub(crate) kernel: Kernel,
    /// Criterion to select next point to evaluate
    pub(crate) acquisition: Acquisition,
    /// Noise jitter of the GP surrogate
    pub(crate) noise: f64,
    /// Hyperparameters tuning of the GP surrogate
    pub(crate) hyper_tuning: HyperTuning,
    /// Max number of acquisition evaluations for one local search
    pub(crate) infill_max_eval: usize,
    /// Whether the result holds every evaluation
    pub(crate) full_history: bool,
    /// A random generator seed used to get reproducible results.
    pub(crate) seed: Option<u64>,
}

impl Default for BoConfig {
    fn default() -> Self {
        BoConfig {
            init_points: 3,
            restarts: 10,
            min_iters: 10,
            max_iters: 25,
            ei_threshold: 0.01,
            kernel: Kernel::squared_exponential(2., 1.),
            acquisition: Acquisition::ExpectedImprovement,
            noise: DEFAULT_NOISE,
            hyper_tuning: HyperTuning::default(),
            infill_max_eval: INFILL_MAX_EVAL_DEFAULT,
            full_history: false,
            seed: None,
        }
    }
}

impl BoConfig {
    /// Sets the number of random points evaluated at the start of each run
    pub fn init_points(mut self, init_points: usize) -> Self {
        self.init_points = init_points;
        self
    }

    /// Sets the number of local searches of the acquisition maximum per iteration
    pub fn restarts(mut self, restarts: usize) -> Self {
        self.restarts = restarts;
        self
    }

    /// Sets the number of iterations to exceed before the threshold stop applies
    pub fn min_iters(mut self, min_iters: usize) -> Self {
        self.min_iters = min_iters;
        self
    }

    /// Sets max number of iterations
    pub fn max_iters(mut self, max_iters: usize) -> Self {
        self.max_iters = max_iters;
        self
    }

    /// Sets the acquisition threshold under which the run stops
    pub fn ei_threshold(mut self, ei_threshold: f64) -> Self {
        self.ei_threshold = ei_threshold;
        self
    }

    /// Sets the GP kernel
    pub fn kernel(mut self, kernel: Kernel) -> Self {
        self.kernel = kernel;
        self
    }

    /// Sets the acquisition function
    pub fn acquisition(mut self, acquisition: Acquisition) -> Self {
        self.acquisition = acquisition;
        self
    }

    /// Sets the GP noise jitter
    pub fn noise(mut self, noise: f64) -> Self {
        self.noise = noise;
        self
    }

    /// Sets the GP hyperparameters tuning
    pub fn hyper_tuning(mut self, hyper_tuning: HyperTuning) -> Self {
        self.hyper_tuning = hyper_tuning;
        self
    }

    /// Sets max number of acquisition evaluations for one local search
    pub fn infill_max_eval(mut self, infill_max_eval: usize) -> Self {
        self.infill_max_eval = infill_max_eval;
        self
    }

    /// Whether evaluated points are returned in the result
    pub fn full_history(mut self, full_history: bool) -> Self {
        self.full_history = full_history;
        self
    }

    /// Allow to specify a seed for random number generator to allow
    /// reproducible runs.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check the configuration is consistent
    pub fn check(self) -> Result<Self> {
        if self.restarts == 0 {
            return Err(BoError::InvalidConfigError(
                "`restarts` should be at least 1".to_string(),
            ));
        }
        if self.infill_max_eval == 0 {
            return Err(BoError::InvalidConfigError(
                "`infill_max_eval` should be at least 1".to_string(),
            ));
        }
        if !self.ei_threshold.is_finite() {
            return Err(BoError::InvalidConfigError(format!(
                "`ei_threshold` should be finite, got {}",
                self.ei_threshold
            )));
        }
        if !self.noise.is_finite() || self.noise < 0. {
            return Err(BoError::InvalidConfigError(format!(
                "`noise` should be a non negative value, got {}",
                self.noise
            )));
        }
        self.hyper_tuning.check()?;
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = BoConfig::default().check().expect("valid config");
        assert_eq!(config.init_points, 3);
        assert_eq!(config.restarts, 10);
        assert_eq!(config.min_iters, 10);
        assert_eq!(config.max_iters, 25);
        assert_eq!(config.ei_threshold, 0.01);
        assert_eq!(config.kernel.params().theta, 2.);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_invalid_config() {
        assert!(BoConfig::default().restarts(0).check().is_err());
        assert!(BoConfig::default().noise(-1.).check().is_err());
        assert!(BoConfig::default().ei_threshold(f64::NAN).check().is_err());
        assert!(BoConfig::default()
            .hyper_tuning(HyperTuning::Full {
                theta_bounds: (0., 1.),
                length_scale_bounds: (0.01, 2.),
            })
            .check()
            .is_err());
    }
}
