//! A module for covariance functions (aka kernels) used by the GP model.
//!
//! The following kernels are implemented:
//! * squared exponential,
//! * ARD Matérn 5/2 (one length scale per input dimension),
//! * trivial (parameter free squared exponential),
//! * custom, a caller-supplied function.
//!
//! A kernel is an immutable value: hyperparameter search builds new kernels
//! with [`Kernel::with_hyperparameters`] rather than patching an existing one.

use crate::errors::{GpError, Result};
use ndarray::{Array1, ArrayBase, ArrayView1, Data, Ix1};
use std::fmt;
use std::sync::Arc;

const SQRT_5: f64 = 2.23606797749979;

/// Hyperparameters of a kernel
#[derive(Clone, Debug, PartialEq)]
pub struct KernelParams {
    /// Amplitude (signal variance)
    pub theta: f64,
    /// Length scales, either one value broadcast to every dimension
    /// or one value per input dimension
    pub length_scales: Array1<f64>,
}

impl KernelParams {
    /// Constructor with a single length scale
    pub fn new(theta: f64, length_scale: f64) -> Self {
        KernelParams {
            theta,
            length_scales: Array1::from_elem(1, length_scale),
        }
    }

    /// Length scale of the `i`-th dimension
    pub fn length_scale(&self, i: usize) -> f64 {
        if self.length_scales.len() == 1 {
            self.length_scales[0]
        } else {
            self.length_scales[i]
        }
    }
}

impl Default for KernelParams {
    fn default() -> Self {
        KernelParams::new(2., 1.)
    }
}

/// Signature of a user-supplied kernel function
pub type CustomKernelFn =
    dyn Fn(&ArrayView1<f64>, &ArrayView1<f64>, &KernelParams) -> f64 + Send + Sync;

/// A caller-supplied kernel `k(x, x', params)`.
///
/// The function is expected to be symmetric and to produce
/// positive semi-definite Gram matrices.
#[derive(Clone)]
pub struct CustomKernel {
    name: String,
    func: Arc<CustomKernelFn>,
    tunable: bool,
}

impl CustomKernel {
    /// Wraps `func` under the given `name`. When `tunable` is true, hyperparameter
    /// search is allowed to vary the [`KernelParams`] passed to `func`.
    pub fn new<F>(name: &str, tunable: bool, func: F) -> Self
    where
        F: Fn(&ArrayView1<f64>, &ArrayView1<f64>, &KernelParams) -> f64 + Send + Sync + 'static,
    {
        CustomKernel {
            name: name.to_string(),
            func: Arc::new(func),
            tunable,
        }
    }
}

impl fmt::Debug for CustomKernel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("CustomKernel")
            .field("name", &self.name)
            .field("tunable", &self.tunable)
            .finish()
    }
}

/// Available kernel variants
#[derive(Clone, Debug)]
pub enum KernelKind {
    /// `theta * exp(-r²/2)` with `r² = Σ ((x_k - x'_k) / l_k)²`
    SquaredExponential,
    /// Matérn 5/2 with per-dimension length scales:
    /// `theta * (1 + √5 r + 5 r²/3) * exp(-√5 r)`
    ArdMatern,
    /// `exp(-|x - x'|²/2)`, ignores hyperparameters
    Trivial,
    /// User defined kernel
    Custom(CustomKernel),
}

/// A covariance function: a variant and its hyperparameters
#[derive(Clone, Debug)]
pub struct Kernel {
    kind: KernelKind,
    params: KernelParams,
}

impl Default for Kernel {
    fn default() -> Self {
        Kernel::squared_exponential(2., 1.)
    }
}

impl Kernel {
    /// Squared exponential kernel with amplitude `theta` and length scale `l`
    pub fn squared_exponential(theta: f64, l: f64) -> Self {
        Kernel {
            kind: KernelKind::SquaredExponential,
            params: KernelParams::new(theta, l),
        }
    }

    /// ARD Matérn 5/2 kernel with amplitude `theta` and length scale `l`
    /// initially shared by all dimensions
    pub fn ard_matern(theta: f64, l: f64) -> Self {
        Kernel {
            kind: KernelKind::ArdMatern,
            params: KernelParams::new(theta, l),
        }
    }

    /// Parameter free kernel
    pub fn trivial() -> Self {
        Kernel {
            kind: KernelKind::Trivial,
            params: KernelParams::new(1., 1.),
        }
    }

    /// User defined kernel with its initial hyperparameters
    pub fn custom(custom: CustomKernel, theta: f64, l: f64) -> Self {
        Kernel {
            kind: KernelKind::Custom(custom),
            params: KernelParams::new(theta, l),
        }
    }

    /// Sets per-dimension length scales
    pub fn length_scales(mut self, length_scales: Array1<f64>) -> Self {
        self.params.length_scales = length_scales;
        self
    }

    /// Kernel variant
    pub fn kind(&self) -> &KernelKind {
        &self.kind
    }

    /// Kernel hyperparameters
    pub fn params(&self) -> &KernelParams {
        &self.params
    }

    /// Whether hyperparameters can be tuned by likelihood maximization
    pub fn is_tunable(&self) -> bool {
        match &self.kind {
            KernelKind::Trivial => false,
            KernelKind::Custom(custom) => custom.tunable,
            _ => true,
        }
    }

    /// Check hyperparameters consistency with regard to input dimension `dim`
    pub fn check(&self, dim: usize) -> Result<()> {
        let KernelParams {
            theta,
            length_scales,
        } = &self.params;
        if !(theta.is_finite() && *theta > 0.) {
            return Err(GpError::InvalidConfigError(format!(
                "kernel amplitude should be strictly positive, got {theta}"
            )));
        }
        if length_scales.len() != 1 && length_scales.len() != dim {
            return Err(GpError::InvalidConfigError(format!(
                "kernel length scales should be either 1-dim or {dim}-dim, got {}",
                length_scales.len()
            )));
        }
        if length_scales.iter().any(|l| !(l.is_finite() && *l > 0.)) {
            return Err(GpError::InvalidConfigError(format!(
                "kernel length scales should be strictly positive, got {length_scales}"
            )));
        }
        Ok(())
    }

    /// Continuous hyperparameters as a flat vector `[theta, l_1, ..., l_p]`.
    /// ARD Matérn length scales are expanded to `dim` values.
    pub fn hyperparameters(&self, dim: usize) -> Vec<f64> {
        let mut hyper = vec![self.params.theta];
        match self.kind {
            KernelKind::ArdMatern => {
                hyper.extend((0..dim).map(|i| self.params.length_scale(i)));
            }
            _ => hyper.extend(self.params.length_scales.iter()),
        }
        hyper
    }

    /// Builds a new kernel of the same variant with hyperparameters
    /// given as `[theta, l_1, ..., l_p]`
    pub fn with_hyperparameters(&self, hyper: &[f64]) -> Kernel {
        Kernel {
            kind: self.kind.clone(),
            params: KernelParams {
                theta: hyper[0],
                length_scales: Array1::from_vec(hyper[1..].to_vec()),
            },
        }
    }

    /// Kernel value `k(x, x')`
    pub fn value(
        &self,
        x: &ArrayBase<impl Data<Elem = f64>, Ix1>,
        xp: &ArrayBase<impl Data<Elem = f64>, Ix1>,
    ) -> f64 {
        match &self.kind {
            KernelKind::SquaredExponential => {
                self.params.theta * (-0.5 * scaled_sq_dist(x, xp, &self.params)).exp()
            }
            KernelKind::ArdMatern => {
                let r2 = scaled_sq_dist(x, xp, &self.params);
                let r = r2.sqrt();
                self.params.theta * (1. + SQRT_5 * r + 5. / 3. * r2) * (-SQRT_5 * r).exp()
            }
            KernelKind::Trivial => {
                let d2: f64 = x
                    .iter()
                    .zip(xp.iter())
                    .map(|(a, b)| (a - b) * (a - b))
                    .sum();
                (-0.5 * d2).exp()
            }
            KernelKind::Custom(custom) => (custom.func)(&x.view(), &xp.view(), &self.params),
        }
    }
}

impl fmt::Display for Kernel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match &self.kind {
            KernelKind::SquaredExponential => "SquaredExponential",
            KernelKind::ArdMatern => "ArdMatern",
            KernelKind::Trivial => return write!(f, "Trivial"),
            KernelKind::Custom(custom) => custom.name.as_str(),
        };
        write!(
            f,
            "{}(theta={}, l={})",
            name, self.params.theta, self.params.length_scales
        )
    }
}

/// `Σ ((x_k - x'_k) / l_k)²`
fn scaled_sq_dist(
    x: &ArrayBase<impl Data<Elem = f64>, Ix1>,
    xp: &ArrayBase<impl Data<Elem = f64>, Ix1>,
    params: &KernelParams,
) -> f64 {
    x.iter()
        .zip(xp.iter())
        .enumerate()
        .map(|(i, (a, b))| {
            let d = (a - b) / params.length_scale(i);
            d * d
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    #[test]
    fn test_squared_exponential() {
        let k = Kernel::squared_exponential(2., 1.);
        assert_abs_diff_eq!(k.value(&array![1., 2.], &array![1., 2.]), 2.);
        let expected = 2. * (-0.5 * 2.0f64).exp();
        assert_abs_diff_eq!(
            k.value(&array![0., 0.], &array![1., 1.]),
            expected,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_ard_matern_uses_per_dimension_length_scales() {
        let k = Kernel::ard_matern(1., 1.).length_scales(array![1., 2.]);
        // r² = (1/1)² + (2/2)² = 2
        let r = 2.0f64.sqrt();
        let expected = (1. + SQRT_5 * r + 5. / 3. * 2.) * (-SQRT_5 * r).exp();
        assert_abs_diff_eq!(
            k.value(&array![0., 0.], &array![1., 2.]),
            expected,
            epsilon = 1e-12
        );
        assert_abs_diff_eq!(k.value(&array![3., 4.], &array![3., 4.]), 1.);
    }

    #[test]
    fn test_trivial_ignores_params() {
        let k = Kernel::trivial();
        assert!(!k.is_tunable());
        assert_abs_diff_eq!(
            k.value(&array![0.], &array![2.]),
            (-2.0f64).exp(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_kernel_symmetry() {
        let x = array![0.3, -1.2, 4.];
        let xp = array![1.5, 0.2, 3.3];
        for k in [
            Kernel::squared_exponential(1.5, 0.7),
            Kernel::ard_matern(0.8, 1.3),
            Kernel::trivial(),
        ] {
            assert_abs_diff_eq!(k.value(&x, &xp), k.value(&xp, &x));
        }
    }

    #[test]
    fn test_custom_kernel() {
        let linear = CustomKernel::new("Linear", false, |x, xp, p: &KernelParams| {
            p.theta * x.dot(xp)
        });
        let k = Kernel::custom(linear, 3., 1.);
        assert!(!k.is_tunable());
        assert_abs_diff_eq!(k.value(&array![1., 2.], &array![3., 4.]), 33.);
        assert_eq!(format!("{k}"), "Linear(theta=3, l=[1])");
    }

    #[test]
    fn test_hyperparameters() {
        let k = Kernel::ard_matern(1., 0.5);
        assert_eq!(k.hyperparameters(3), vec![1., 0.5, 0.5, 0.5]);
        let k2 = k.with_hyperparameters(&[2., 0.1, 0.2, 0.3]);
        assert_eq!(k2.params().length_scales, array![0.1, 0.2, 0.3]);
        assert_eq!(k2.params().theta, 2.);

        let se = Kernel::squared_exponential(2., 1.);
        assert_eq!(se.hyperparameters(3), vec![2., 1.]);
    }

    #[test]
    fn test_check() {
        assert!(Kernel::squared_exponential(0., 1.).check(1).is_err());
        assert!(Kernel::squared_exponential(1., -1.).check(1).is_err());
        assert!(Kernel::ard_matern(1., 1.)
            .length_scales(array![1., 2.])
            .check(3)
            .is_err());
        assert!(Kernel::ard_matern(1., 1.)
            .length_scales(array![1., 2., 3.])
            .check(3)
            .is_ok());
    }
}
