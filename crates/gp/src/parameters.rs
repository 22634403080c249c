use crate::errors::{GpError, Result};
use crate::kernels::Kernel;
use linfa::ParamGuard;

/// Default noise jitter added to the covariance matrix diagonal
pub const DEFAULT_NOISE: f64 = 1e-6;
/// Default bounds of the kernel amplitude search
pub const DEFAULT_THETA_BOUNDS: (f64, f64) = (0.01, 5.);
/// Default bounds of the kernel length scales search
pub const DEFAULT_LENGTH_SCALE_BOUNDS: (f64, f64) = (0.01, 2.);
/// Default starting point `(theta, l)` of the hyperparameters search
pub const DEFAULT_HYPER_INIT: (f64, f64) = (1., 1.);
/// Maximum number of likelihood evaluations for one SLSQP run
pub const GP_OPTIM_MAX_EVAL: usize = 200;

/// Kernel hyperparameters tuning strategy
#[derive(Clone, Debug, PartialEq)]
pub enum HyperTuning {
    /// Hyperparameters are used as given
    Fixed,
    /// Hyperparameters are optimized within the given bounds (lower, upper)
    /// by log-marginal-likelihood maximization
    Full {
        /// Bounds for the kernel amplitude
        theta_bounds: (f64, f64),
        /// Bounds for every length scale
        length_scale_bounds: (f64, f64),
    },
}

impl Default for HyperTuning {
    fn default() -> Self {
        HyperTuning::Full {
            theta_bounds: DEFAULT_THETA_BOUNDS,
            length_scale_bounds: DEFAULT_LENGTH_SCALE_BOUNDS,
        }
    }
}

impl HyperTuning {
    /// Check bounds are valid intervals of strictly positive values
    pub fn check(&self) -> Result<()> {
        if let HyperTuning::Full {
            theta_bounds,
            length_scale_bounds,
        } = self
        {
            for (name, (lo, up)) in [("theta", theta_bounds), ("length scale", length_scale_bounds)]
            {
                if !(lo.is_finite() && up.is_finite() && *lo > 0. && lo < up) {
                    return Err(GpError::InvalidConfigError(format!(
                        "{name} bounds should satisfy 0 < lower < upper, got ({lo}, {up})"
                    )));
                }
            }
        }
        Ok(())
    }
}

/// A set of validated GP parameters.
#[derive(Clone, Debug)]
pub struct GpValidParams {
    /// Noise jitter added to the covariance matrix diagonal
    pub(crate) noise: f64,
    /// Kernel used for the fit (starting point when tuned)
    pub(crate) kernel: Kernel,
    /// Hyperparameters tuning
    pub(crate) tuning: HyperTuning,
    /// Max number of likelihood evaluations during hyperparameters optimization
    pub(crate) max_eval: usize,
    /// Whether training data is standardized before the fit
    pub(crate) normalize: bool,
}

impl Default for GpValidParams {
    fn default() -> GpValidParams {
        GpValidParams {
            noise: DEFAULT_NOISE,
            kernel: Kernel::default(),
            tuning: HyperTuning::default(),
            max_eval: GP_OPTIM_MAX_EVAL,
            normalize: false,
        }
    }
}

impl GpValidParams {
    /// Get noise jitter
    pub fn noise(&self) -> f64 {
        self.noise
    }

    /// Get kernel
    pub fn kernel(&self) -> &Kernel {
        &self.kernel
    }

    /// Get hyperparameters tuning strategy
    pub fn hyper_tuning(&self) -> &HyperTuning {
        &self.tuning
    }

    /// Get max number of likelihood evaluations
    pub fn max_eval(&self) -> usize {
        self.max_eval
    }

    /// Whether training data is standardized before the fit
    pub fn normalize(&self) -> bool {
        self.normalize
    }
}

#[derive(Clone, Debug)]
/// The set of hyperparameters that can be specified for the execution of
/// the [GP algorithm](crate::GaussianProcessModel).
pub struct GpParams(GpValidParams);

impl GpParams {
    /// A constructor for GP parameters given a kernel
    pub fn new(kernel: Kernel) -> GpParams {
        Self(GpValidParams {
            kernel,
            ..GpValidParams::default()
        })
    }

    /// Set noise jitter.
    ///
    /// Small value added to the diagonal of the covariance matrix
    /// to improve numerical stability
    pub fn noise(mut self, noise: f64) -> Self {
        self.0.noise = noise;
        self
    }

    /// Set kernel
    pub fn kernel(mut self, kernel: Kernel) -> Self {
        self.0.kernel = kernel;
        self
    }

    /// Set hyperparameters tuning strategy
    pub fn hyper_tuning(mut self, tuning: HyperTuning) -> Self {
        self.0.tuning = tuning;
        self
    }

    /// Set max number of likelihood evaluations during hyperparameters optimization
    pub fn max_eval(mut self, max_eval: usize) -> Self {
        self.0.max_eval = max_eval;
        self
    }

    /// Set whether inputs and outputs are standardized before the fit.
    ///
    /// Off by default: the kernel then applies to training data as given.
    pub fn normalize(mut self, normalize: bool) -> Self {
        self.0.normalize = normalize;
        self
    }
}

impl ParamGuard for GpParams {
    type Checked = GpValidParams;
    type Error = GpError;

    fn check_ref(&self) -> Result<&Self::Checked> {
        check_noise(self.0.noise)?;
        self.0.tuning.check()?;
        if self.0.max_eval == 0 {
            return Err(GpError::InvalidConfigError(
                "`max_eval` cannot be 0!".to_string(),
            ));
        }
        Ok(&self.0)
    }

    fn check(self) -> Result<Self::Checked> {
        self.check_ref()?;
        Ok(self.0)
    }
}

/// Noise jitter should be a finite non negative value
pub(crate) fn check_noise(noise: f64) -> Result<()> {
    if !noise.is_finite() || noise < 0. {
        return Err(GpError::InvalidConfigError(format!(
            "noise should be a non negative value, got {noise}"
        )));
    }
    if noise == 0. {
        log::warn!("Non zero noise helps with numerical stability and is strongly advised");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_params_are_valid() {
        let params = GpParams::new(Kernel::default()).check().expect("valid params");
        assert_eq!(params.noise(), DEFAULT_NOISE);
        assert_eq!(params.hyper_tuning(), &HyperTuning::default());
    }

    #[test]
    fn test_negative_noise() {
        let res = GpParams::new(Kernel::default()).noise(-1e-3).check();
        assert!(matches!(res, Err(GpError::InvalidConfigError(_))));
    }

    #[test]
    fn test_invalid_tuning_bounds() {
        let res = GpParams::new(Kernel::default())
            .hyper_tuning(HyperTuning::Full {
                theta_bounds: (1., 0.1),
                length_scale_bounds: DEFAULT_LENGTH_SCALE_BOUNDS,
            })
            .check();
        assert!(matches!(res, Err(GpError::InvalidConfigError(_))));
    }
}
