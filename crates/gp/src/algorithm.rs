use crate::covariance::{covariance, sample_covariance};
use crate::errors::{GpError, Result};
use crate::kernels::Kernel;
use crate::optimization::{optimize_params, prepare_multistart, SlsqpParams};
use crate::parameters::{
    check_noise, GpParams, GpValidParams, HyperTuning, DEFAULT_HYPER_INIT, GP_OPTIM_MAX_EVAL,
};
use crate::utils::NormalizedData;

use linfa::prelude::{DatasetBase, Fit};
use linfa_linalg::{cholesky::*, triangular::*};
use ndarray::{Array1, Array2, ArrayBase, Axis, Data, Ix1, Ix2};

use log::{debug, warn};
use rayon::prelude::*;
use std::fmt;
use std::time::Instant;

/// ln(2π)
const LN_2PI: f64 = 1.8378770664093453;

/// Outcome of a [`GaussianProcessModel::best_fit`] call
#[derive(Clone, Debug, PartialEq)]
pub enum FitOutcome {
    /// Kernel hyperparameters used as given (fixed tuning or parameter free kernel)
    Fixed,
    /// Kernel hyperparameters optimized by likelihood maximization
    Tuned,
    /// Hyperparameters search failed, the model is fitted with the given kernel
    Fallback {
        /// Why the search failed
        reason: String,
    },
}

/// Internal parameters computed during training
/// used later on in prediction computations
#[derive(Clone, Debug)]
pub(crate) struct GpInnerParams {
    /// Kernel used to build the covariance matrix
    kernel: Kernel,
    /// Cholesky decomposition of the regularized covariance matrix \[K + noise.I\]
    l_chol: Array2<f64>,
    /// Solution of \[K + noise.I\] a = y
    alpha: Array2<f64>,
    /// Log marginal likelihood of fitted outputs
    log_likelihood: f64,
}

/// Training state of a fitted GP
#[derive(Clone, Debug)]
struct FittedState {
    inner: GpInnerParams,
    /// Training inputs, normalized when requested
    xt_norm: NormalizedData,
    /// Output mean (0 without normalization)
    y_mean: f64,
    /// Output standard deviation (1 without normalization)
    y_std: f64,
}

/// Gaussian Process regression model
///
/// The model is fitted on the whole training set at each `fit` call (no incremental update)
/// using the Cholesky factorization of the regularized covariance matrix
/// `K + noise.I` where `K[i, j] = k(x_i, x_j)`, with a zero prior mean.
/// Inputs and outputs can optionally be standardized before the fit (see
/// [GaussianProcessModel::normalize]), predictions being then expressed back in original units.
///
/// ```
/// use bayesbox_gp::{GaussianProcessModel, HyperTuning, Kernel};
/// use ndarray::array;
///
/// let xt = array![[0.], [1.], [2.], [3.], [4.]];
/// let yt = xt.column(0).mapv(|v: f64| v * v.sin());
///
/// let mut gp = GaussianProcessModel::new(1e-6)
///     .expect("valid noise")
///     .hyper_tuning(HyperTuning::Fixed);
/// gp.fit(&xt, &yt, &Kernel::squared_exponential(1., 0.5)).expect("GP fitted");
///
/// let (mean, cov) = gp.predict(&array![[1.5], [2.5]]).expect("GP prediction");
/// assert_eq!(mean.len(), 2);
/// assert_eq!(cov.dim(), (2, 2));
/// ```
#[derive(Clone, Debug)]
pub struct GaussianProcessModel {
    /// Noise jitter added to the covariance matrix diagonal
    noise: f64,
    /// Hyperparameters tuning used by `best_fit`
    tuning: HyperTuning,
    /// Max number of likelihood evaluations per optimization
    max_eval: usize,
    /// Whether training data is standardized before the fit
    normalize: bool,
    /// None until a successful fit
    state: Option<FittedState>,
}

impl GaussianProcessModel {
    /// Constructor with the given noise jitter, fails when `noise` is negative
    pub fn new(noise: f64) -> Result<Self> {
        check_noise(noise)?;
        Ok(GaussianProcessModel {
            noise,
            tuning: HyperTuning::default(),
            max_eval: GP_OPTIM_MAX_EVAL,
            normalize: false,
            state: None,
        })
    }

    /// Gp parameters for linfa-style fitting with the given kernel
    pub fn params(kernel: Kernel) -> GpParams {
        GpParams::new(kernel)
    }

    /// Sets the hyperparameters tuning strategy used by `best_fit`
    pub fn hyper_tuning(mut self, tuning: HyperTuning) -> Self {
        self.tuning = tuning;
        self
    }

    /// Sets the max number of likelihood evaluations per hyperparameters optimization
    pub fn max_eval(mut self, max_eval: usize) -> Self {
        self.max_eval = max_eval.max(1);
        self
    }

    /// Sets whether inputs and outputs are standardized (column mean and standard
    /// deviation) before the fit. Off by default: kernel hyperparameters and the
    /// log likelihood then refer to training data as given.
    pub fn normalize(mut self, normalize: bool) -> Self {
        self.normalize = normalize;
        self
    }

    /// Noise jitter
    pub fn noise(&self) -> f64 {
        self.noise
    }

    /// Whether the model was successfully fitted
    pub fn is_fitted(&self) -> bool {
        self.state.is_some()
    }

    /// Kernel of the last successful fit
    pub fn kernel(&self) -> Result<&Kernel> {
        Ok(&self.fitted()?.inner.kernel)
    }

    /// Number of training points
    pub fn n_training(&self) -> Result<usize> {
        Ok(self.fitted()?.xt_norm.data.nrows())
    }

    /// Input dimension
    pub fn dim(&self) -> Result<usize> {
        Ok(self.fitted()?.xt_norm.ncols())
    }

    /// Cached log marginal likelihood
    pub fn log_like(&self) -> Result<f64> {
        Ok(self.fitted()?.inner.log_likelihood)
    }

    fn fitted(&self) -> Result<&FittedState> {
        self.state.as_ref().ok_or(GpError::NotFittedError)
    }

    /// Fits the model on (x, y) training data with the given kernel.
    ///
    /// Fails with a numerical error when the covariance matrix is not positive definite.
    /// On failure a previous fitted state is left unchanged.
    pub fn fit(
        &mut self,
        x: &ArrayBase<impl Data<Elem = f64>, Ix2>,
        y: &ArrayBase<impl Data<Elem = f64>, Ix1>,
        kernel: &Kernel,
    ) -> Result<()> {
        check_training_data(x, y)?;
        kernel.check(x.ncols())?;
        let (xt_norm, yt_norm) = normalize_training(x, y, self.normalize);
        self.fit_normalized(xt_norm, yt_norm, kernel)
    }

    /// Fits the model after maximizing the log marginal likelihood with regard to
    /// the kernel hyperparameters, starting from the given kernel ones and from defaults.
    ///
    /// When the search fails, or when the tuned kernel leads to a numerical failure,
    /// the model is fitted with the given kernel and the returned outcome tells why.
    /// Invalid data, invalid tuning bounds and a failure of this fallback fit
    /// are reported as errors.
    pub fn best_fit(
        &mut self,
        x: &ArrayBase<impl Data<Elem = f64>, Ix2>,
        y: &ArrayBase<impl Data<Elem = f64>, Ix1>,
        kernel: &Kernel,
    ) -> Result<FitOutcome> {
        check_training_data(x, y)?;
        kernel.check(x.ncols())?;
        self.tuning.check()?;
        let (xt_norm, yt_norm) = normalize_training(x, y, self.normalize);

        let bounds = match self.tuning {
            HyperTuning::Full {
                theta_bounds,
                length_scale_bounds,
            } if kernel.is_tunable() => Some((theta_bounds, length_scale_bounds)),
            _ => None,
        };
        let Some(bounds) = bounds else {
            self.fit_normalized(xt_norm, yt_norm, kernel)?;
            return Ok(FitOutcome::Fixed);
        };

        match self.optimize_hyperparameters(&xt_norm.data, &yt_norm.data, kernel, bounds) {
            Ok(tuned) => {
                match self.fit_normalized(xt_norm.clone(), yt_norm.clone(), &tuned) {
                    Ok(()) => Ok(FitOutcome::Tuned),
                    Err(err) if err.is_numerical() => {
                        let reason = format!("fit with tuned kernel {tuned} failed: {err}");
                        self.fallback_fit(xt_norm, yt_norm, kernel, reason)
                    }
                    Err(err) => Err(err),
                }
            }
            Err(reason) => self.fallback_fit(xt_norm, yt_norm, kernel, reason),
        }
    }

    fn fallback_fit(
        &mut self,
        xt_norm: NormalizedData,
        yt_norm: NormalizedData,
        kernel: &Kernel,
        reason: String,
    ) -> Result<FitOutcome> {
        warn!("Hyperparameters optimization failed ({reason}), fit with {kernel}");
        self.fit_normalized(xt_norm, yt_norm, kernel)?;
        Ok(FitOutcome::Fallback { reason })
    }

    fn fit_normalized(
        &mut self,
        xt_norm: NormalizedData,
        yt_norm: NormalizedData,
        kernel: &Kernel,
    ) -> Result<()> {
        let inner = reduced_likelihood(&xt_norm.data, &yt_norm.data, kernel, self.noise)?;
        debug!(
            "GP fitted with {} (log likelihood = {})",
            inner.kernel, inner.log_likelihood
        );
        self.state = Some(FittedState {
            inner,
            xt_norm,
            y_mean: yt_norm.mean[0],
            y_std: yt_norm.std[0],
        });
        Ok(())
    }

    /// Maximizes the log likelihood over log10 hyperparameters with SLSQP
    /// from the current and default hyperparameters.
    fn optimize_hyperparameters(
        &self,
        x: &Array2<f64>,
        y: &Array2<f64>,
        kernel: &Kernel,
        (theta_bounds, length_scale_bounds): ((f64, f64), (f64, f64)),
    ) -> std::result::Result<Kernel, String> {
        let current = kernel.hyperparameters(x.ncols());
        let n_hyper = current.len();
        let mut default = vec![DEFAULT_HYPER_INIT.1; n_hyper];
        default[0] = DEFAULT_HYPER_INIT.0;
        let mut bounds = vec![length_scale_bounds; n_hyper];
        bounds[0] = theta_bounds;

        let (starts, bounds) = prepare_multistart(&current, &default, &bounds);

        let base: f64 = 10.;
        let noise = self.noise;
        let max_eval = self.max_eval;
        let objfn = |p: &[f64]| -> f64 {
            let hyper = p.iter().map(|v| base.powf(*v)).collect::<Vec<_>>();
            match reduced_likelihood(x, y, &kernel.with_hyperparameters(&hyper), noise) {
                Ok(inner) => -inner.log_likelihood,
                Err(_) => f64::INFINITY,
            }
        };

        debug!("Optimize hyperparameters with multistart {starts:?} and bounds {bounds:?}");
        let now = Instant::now();
        let (fmin, pmin) = starts
            .par_iter()
            .map(|start| {
                optimize_params(
                    &objfn,
                    start,
                    &bounds,
                    SlsqpParams {
                        max_eval,
                        ..SlsqpParams::default()
                    },
                )
            })
            .reduce(
                || (f64::INFINITY, vec![]),
                |a, b| if b.0 < a.0 { b } else { a },
            );
        debug!("elapsed optim = {:?}", now.elapsed().as_millis());

        if !fmin.is_finite() {
            return Err(format!(
                "no finite likelihood found from {} starting point(s)",
                starts.len()
            ));
        }
        let hyper = pmin
            .iter()
            .zip(bounds.iter())
            .map(|(v, (lo, up))| base.powf(v.clamp(*lo, *up)))
            .collect::<Vec<_>>();
        Ok(kernel.with_hyperparameters(&hyper))
    }

    /// Predicts mean values and covariance matrix at `x` points given as a (m, nx) matrix.
    ///
    /// Returns the mean vector (m,) and the full posterior covariance (m, m)
    /// which diagonal is clamped to non negative values.
    pub fn predict(
        &self,
        x: &ArrayBase<impl Data<Elem = f64>, Ix2>,
    ) -> Result<(Array1<f64>, Array2<f64>)> {
        let state = self.fitted()?;
        let xnorm = state.check_and_transform(x)?;
        let kernel = &state.inner.kernel;

        let ks = covariance(&state.xt_norm.data, &xnorm, kernel, false);
        let kss = covariance(&xnorm, &xnorm, kernel, false);
        let v = state.inner.l_chol.solve_triangular(&ks, UPLO::Lower)?;

        let mean = state.denormalize_mean(&ks);
        let cov = kss - v.t().dot(&v);
        let mut cov = (&cov + &cov.t()) * (0.5 * state.y_std * state.y_std);
        cov.diag_mut().mapv_inplace(|v| if v < 0. { 0. } else { v });
        Ok((mean, cov))
    }

    /// Predicts mean values and marginal variances at `x` points given as a (m, nx) matrix.
    pub fn fast_predict(
        &self,
        x: &ArrayBase<impl Data<Elem = f64>, Ix2>,
    ) -> Result<(Array1<f64>, Array1<f64>)> {
        let state = self.fitted()?;
        let xnorm = state.check_and_transform(x)?;
        let kernel = &state.inner.kernel;

        let ks = covariance(&state.xt_norm.data, &xnorm, kernel, false);
        let kss = covariance(&xnorm, &xnorm, kernel, true);
        let v = state.inner.l_chol.solve_triangular(&ks, UPLO::Lower)?;

        let mean = state.denormalize_mean(&ks);
        let var = (kss.diag().to_owned() - v.mapv(|v| v * v).sum_axis(Axis(0)))
            .mapv(|v| if v < 0. { 0. } else { v * state.y_std * state.y_std });
        Ok((mean, var))
    }

    /// Predicts mean value and variance at a single point `x`
    pub fn sample_predict(&self, x: &ArrayBase<impl Data<Elem = f64>, Ix1>) -> Result<(f64, f64)> {
        let state = self.fitted()?;
        let xnorm = state.check_and_transform(&x.view().insert_axis(Axis(0)))?;
        let xnorm = xnorm.row(0);
        let kernel = &state.inner.kernel;

        let ks = sample_covariance(&state.xt_norm.data, &xnorm, kernel).insert_axis(Axis(1));
        let v = state.inner.l_chol.solve_triangular(&ks, UPLO::Lower)?;

        let mean = ks.column(0).dot(&state.inner.alpha.column(0)) * state.y_std + state.y_mean;
        let var = kernel.value(&xnorm, &xnorm) - v.column(0).dot(&v.column(0));
        let var = if var < 0. { 0. } else { var * state.y_std * state.y_std };
        Ok((mean, var))
    }
}

impl FittedState {
    fn check_and_transform(&self, x: &ArrayBase<impl Data<Elem = f64>, Ix2>) -> Result<Array2<f64>> {
        if x.ncols() != self.xt_norm.ncols() {
            return Err(GpError::InvalidValueError(format!(
                "query points dimension {} does not match training dimension {}",
                x.ncols(),
                self.xt_norm.ncols()
            )));
        }
        if x.iter().any(|v| !v.is_finite()) {
            return Err(GpError::InvalidValueError(
                "query points should be finite".to_string(),
            ));
        }
        Ok(self.xt_norm.transform(x))
    }

    /// `Ksᵗ a` in original output units
    fn denormalize_mean(&self, ks: &Array2<f64>) -> Array1<f64> {
        ks.t()
            .dot(&self.inner.alpha)
            .column(0)
            .mapv(|v| v * self.y_std + self.y_mean)
    }
}

impl fmt::Display for GaussianProcessModel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.state {
            Some(state) => write!(
                f,
                "GP(kernel={}, noise={}, log_likelihood={})",
                state.inner.kernel, self.noise, state.inner.log_likelihood
            ),
            None => write!(f, "GP(noise={}, not fitted)", self.noise),
        }
    }
}

impl<D: Data<Elem = f64>> Fit<ArrayBase<D, Ix2>, ArrayBase<D, Ix1>, GpError> for GpValidParams {
    type Object = GaussianProcessModel;

    /// Fit GP hyperparameters using maximum likelihood
    fn fit(
        &self,
        dataset: &DatasetBase<ArrayBase<D, Ix2>, ArrayBase<D, Ix1>>,
    ) -> Result<Self::Object> {
        let mut gp = GaussianProcessModel {
            noise: self.noise(),
            tuning: self.hyper_tuning().clone(),
            max_eval: self.max_eval(),
            normalize: self.normalize(),
            state: None,
        };
        let outcome = gp.best_fit(dataset.records(), dataset.targets(), self.kernel())?;
        debug!("GP fit outcome: {outcome:?}");
        Ok(gp)
    }
}

fn check_training_data(
    x: &ArrayBase<impl Data<Elem = f64>, Ix2>,
    y: &ArrayBase<impl Data<Elem = f64>, Ix1>,
) -> Result<()> {
    if x.nrows() == 0 || x.ncols() == 0 {
        return Err(GpError::InvalidValueError(
            "training data should not be empty".to_string(),
        ));
    }
    if x.nrows() != y.len() {
        return Err(GpError::InvalidValueError(format!(
            "training inputs ({}) and outputs ({}) should have the same number of rows",
            x.nrows(),
            y.len()
        )));
    }
    if x.iter().chain(y.iter()).any(|v| !v.is_finite()) {
        return Err(GpError::InvalidValueError(
            "training data should be finite".to_string(),
        ));
    }
    Ok(())
}

fn normalize_training(
    x: &ArrayBase<impl Data<Elem = f64>, Ix2>,
    y: &ArrayBase<impl Data<Elem = f64>, Ix1>,
    normalize: bool,
) -> (NormalizedData, NormalizedData) {
    let y = y.view().insert_axis(Axis(1));
    if normalize {
        (NormalizedData::new(x), NormalizedData::new(&y))
    } else {
        (NormalizedData::identity(x), NormalizedData::identity(&y))
    }
}

/// Computes the Cholesky factor, the weights and the log marginal likelihood
/// `-½ yᵗa - Σ ln(diag(L)) - n/2 ln(2π)` of (possibly normalized) training data
fn reduced_likelihood(
    x: &Array2<f64>,
    y: &Array2<f64>,
    kernel: &Kernel,
    noise: f64,
) -> Result<GpInnerParams> {
    let n = x.nrows();
    let mut k = covariance(x, x, kernel, false);
    k.diag_mut().mapv_inplace(|v| v + noise);

    let l_chol = k.cholesky().map_err(|err| {
        GpError::NumericalError(format!("covariance matrix is not positive definite ({err})"))
    })?;
    let yt = l_chol.solve_triangular(y, UPLO::Lower)?;
    let alpha = l_chol.t().solve_triangular_into(yt, UPLO::Upper)?;

    let log_likelihood = -0.5 * (y * &alpha).sum()
        - l_chol.diag().mapv(f64::ln).sum()
        - 0.5 * n as f64 * LN_2PI;
    if !log_likelihood.is_finite() {
        return Err(GpError::NumericalError(format!(
            "log likelihood is not finite with {kernel}"
        )));
    }
    Ok(GpInnerParams {
        kernel: kernel.clone(),
        l_chol,
        alpha,
        log_likelihood,
    })
}
