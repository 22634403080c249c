//! Bayesian optimizer maximizing a black-box function within a box domain.
//!
//! Each run evaluates the seeded points plus `init_points` random points, fits
//! a GP surrogate on them, then iterates: evaluate the point maximizing the
//! acquisition function, refit the surrogate (hyperparameters being tuned
//! starting from the previous ones) and search the next point.
//!
//! ```no_run
//! use bayesbox_bo::BayesOptBuilder;
//! use ndarray::{array, ArrayView1};
//!
//! // Maximum f = 0 at x = 3
//! let f = |x: &ArrayView1<f64>| -> anyhow::Result<f64> { Ok(-(x[0] - 3.).powi(2)) };
//! let res = BayesOptBuilder::optimize(f)
//!     .configure(|config| config.init_points(3).max_iters(15).seed(42))
//!     .max_within(&array![[0., 6.]])
//!     .expect("valid bounds")
//!     .maximize()
//!     .expect("maximization");
//! println!("max f(x) = {} at x = {}", res.y_opt, res.x_opt);
//! ```
//!
//! When bounds span several orders of magnitude, [BayesianOptimizer::log_maximize]
//! searches a log10 reparameterization of the domain instead.
use crate::config::BoConfig;
use crate::errors::{BoError, Result};
use crate::observer::BoObserver;
use crate::optimizers::Optimizer;
use crate::types::{History, ObjFn, OptimResult};
use crate::utils::{check_xlimits, random_sample, LogScale};
use crate::Acquisition;

use anyhow::Context;
use bayesbox_gp::{FitOutcome, GaussianProcessModel, Kernel};
use log::{debug, info, warn};
use ndarray::{Array1, Array2, ArrayBase, ArrayView1, ArrayView2, Data, Ix1, Ix2};
use ndarray_rand::rand::SeedableRng;
use rand_xoshiro::Xoshiro256Plus;
use rayon::prelude::*;

/// Bounds ratio above which a log scale search is advised
const LOG_SCALE_ADVISED_RATIO: f64 = 1e4;

/// Bayesian optimizer builder allowing to specify the function to be maximized
pub struct BayesOptBuilder<O: ObjFn> {
    fobj: O,
    config: BoConfig,
}

impl<O: ObjFn> BayesOptBuilder<O> {
    /// Function to be maximized, taking one point `x` and returning its value
    pub fn optimize(fobj: O) -> Self {
        BayesOptBuilder {
            fobj,
            config: BoConfig::default(),
        }
    }

    /// Set configuration of the optimizer
    pub fn configure<F: FnOnce(BoConfig) -> BoConfig>(mut self, init: F) -> Self {
        self.config = init(self.config);
        self
    }

    /// Build a bayesian optimizer to maximize the function within
    /// the `xlimits` specified as [[lower, upper], ...] array where the
    /// number of rows gives the dimension of the inputs
    /// and the ith row is the interval of the ith component of the input x.
    pub fn max_within(
        self,
        xlimits: &ArrayBase<impl Data<Elem = f64>, Ix2>,
    ) -> Result<BayesianOptimizer<O>> {
        check_xlimits(xlimits)?;
        let config = self.config.check()?;
        if xlimits
            .rows()
            .into_iter()
            .any(|row| row[0] > 0. && row[1] / row[0] > LOG_SCALE_ADVISED_RATIO)
        {
            warn!("Bounds span several orders of magnitude, you may benefit from using log_maximize");
        }
        let rng = if let Some(seed) = config.seed {
            Xoshiro256Plus::seed_from_u64(seed)
        } else {
            Xoshiro256Plus::from_entropy()
        };
        let nx = xlimits.nrows();
        Ok(BayesianOptimizer {
            fobj: self.fobj,
            xlimits: xlimits.to_owned(),
            config,
            x_seeded: Array2::zeros((0, nx)),
            y_seeded: vec![],
            rng,
            observers: vec![],
        })
    }
}

/// Bayesian optimizer holding the objective, the search domain
/// and the observations seeded by the user.
pub struct BayesianOptimizer<O: ObjFn> {
    fobj: O,
    xlimits: Array2<f64>,
    config: BoConfig,
    /// Seeded points in native units
    x_seeded: Array2<f64>,
    y_seeded: Vec<f64>,
    rng: Xoshiro256Plus,
    observers: Vec<Box<dyn BoObserver>>,
}

impl<O: ObjFn> BayesianOptimizer<O> {
    /// Dimension of the inputs
    pub fn dim(&self) -> usize {
        self.xlimits.nrows()
    }

    /// Search domain as a (nx, 2) matrix
    pub fn xlimits(&self) -> ArrayView2<f64> {
        self.xlimits.view()
    }

    /// Current configuration
    pub fn config(&self) -> &BoConfig {
        &self.config
    }

    /// Points seeded with [BayesianOptimizer::initialize] and their values
    pub fn observations(&self) -> (ArrayView2<f64>, ArrayView1<f64>) {
        (self.x_seeded.view(), ArrayView1::from(&self.y_seeded[..]))
    }

    /// Evaluates the objective at given points (as rows, in native units)
    /// which are then part of the training data of every subsequent run.
    ///
    /// Calling it several times accumulates the points. When the objective fails
    /// on one of the points, none of them is kept.
    pub fn initialize(&mut self, points: &ArrayBase<impl Data<Elem = f64>, Ix2>) -> Result<()> {
        if points.ncols() != self.dim() {
            return Err(BoError::InvalidValueError(format!(
                "seeded points should have {} components, got {}",
                self.dim(),
                points.ncols()
            )));
        }
        let ys = points
            .rows()
            .into_iter()
            .map(|x| self.eval(&x))
            .collect::<Result<Vec<_>>>()?;
        for x in points.rows() {
            push_row(&mut self.x_seeded, &x)?;
        }
        self.y_seeded.extend(ys);
        if let Some((x, y)) = argmax(&self.y_seeded).map(|i| (self.x_seeded.row(i), self.y_seeded[i]))
        {
            info!("Seeded {} points, current maximum {y} at x = {x}", self.y_seeded.len());
        }
        Ok(())
    }

    /// Sets the kernel of the GP surrogate, its hyperparameters being
    /// the starting point of the tuning
    pub fn set_kernel(&mut self, kernel: Kernel) -> &mut Self {
        self.config.kernel = kernel;
        self
    }

    /// Sets the acquisition function
    pub fn set_acquisition(&mut self, acquisition: Acquisition) -> &mut Self {
        self.config.acquisition = acquisition;
        self
    }

    /// Registers an observer notified at each step of the subsequent runs
    pub fn observe(&mut self, observer: Box<dyn BoObserver>) -> &mut Self {
        self.observers.push(observer);
        self
    }

    /// Runs the maximization within the box domain
    pub fn maximize(&mut self) -> Result<OptimResult> {
        self.run(None)
    }

    /// Runs the maximization searching the log10 reparameterization of the
    /// domain, bounds being rescaled to the unit hypercube.
    ///
    /// Lower bounds (and seeded points) have to be strictly positive.
    pub fn log_maximize(&mut self) -> Result<OptimResult> {
        let scale = LogScale::new(&self.xlimits)?;
        if self.x_seeded.iter().any(|v| *v <= 0.) {
            return Err(BoError::InvalidValueError(
                "log scale requires strictly positive seeded points".to_string(),
            ));
        }
        self.run(Some(&scale))
    }

    fn run(&mut self, scale: Option<&LogScale>) -> Result<OptimResult> {
        let config = self.config.clone().check()?;
        info!("{:?}", config);
        let (search_xlimits, x_seeded) = match scale {
            Some(scale) => (scale.unit_xlimits(), scale.rows_to_unit(&self.x_seeded)),
            None => (self.xlimits.clone(), self.x_seeded.clone()),
        };
        let to_native = |u: &ArrayView1<f64>| -> Array1<f64> {
            match scale {
                Some(scale) => scale.to_native(u),
                None => u.to_owned(),
            }
        };

        info!(
            "Optimization procedure is initializing at {} random points",
            config.init_points
        );
        let x_init = random_sample(&search_xlimits, config.init_points, &mut self.rng);
        // Training data in search coordinates, evaluated points in native units
        let mut xtrain = x_seeded;
        let mut x_doe = self.x_seeded.clone();
        let mut ytrain = self.y_seeded.clone();
        for u in x_init.rows() {
            let x = to_native(&u);
            ytrain.push(self.eval(&x)?);
            push_row(&mut xtrain, &u)?;
            push_row(&mut x_doe, &x.view())?;
        }
        let Some(mut ymax) = max_value(&ytrain) else {
            return Err(BoError::InvalidConfigError(
                "no point to fit the surrogate: set `init_points` or seed points with `initialize`"
                    .to_string(),
            ));
        };
        for observer in self.observers.iter_mut() {
            observer.on_init(ytrain.len(), ymax);
        }

        let mut gp = GaussianProcessModel::new(config.noise)?
            .hyper_tuning(config.hyper_tuning.clone());
        let mut kernel = config.kernel.clone();
        self.fit_surrogate(&mut gp, &mut kernel, &xtrain, &ytrain, 0)?;

        let (mut x_max, mut acq_max) =
            search_acquisition(&gp, &search_xlimits, ymax, &config, &mut self.rng);

        let mut count = 0;
        while !(acq_max < config.ei_threshold && count > config.min_iters)
            && count < config.max_iters
        {
            let x = to_native(&x_max.view());
            let y = self.eval(&x)?;
            push_row(&mut xtrain, &x_max.view())?;
            push_row(&mut x_doe, &x.view())?;
            ytrain.push(y);
            ymax = ymax.max(y);

            count += 1;
            self.fit_surrogate(&mut gp, &mut kernel, &xtrain, &ytrain, count)?;
            (x_max, acq_max) =
                search_acquisition(&gp, &search_xlimits, ymax, &config, &mut self.rng);

            let candidate = to_native(&x_max.view());
            for observer in self.observers.iter_mut() {
                observer.on_iteration_complete(count, acq_max, &candidate.view(), ymax);
            }
        }

        // ytrain is not empty at this point
        let best = argmax(&ytrain).unwrap_or(0);
        let (x_opt, y_opt) = (x_doe.row(best).to_owned(), ytrain[best]);
        let res = OptimResult {
            y_opt,
            x_opt,
            n_iters: count,
            acq_max,
            history: config.full_history.then(|| History {
                x_doe,
                y_doe: Array1::from(ytrain),
            }),
        };
        info!(
            "Optim Result: max f(x)={} at x={} after {} iterations",
            res.y_opt, res.x_opt, res.n_iters
        );
        Ok(res)
    }

    /// Fits the surrogate with hyperparameters tuned starting from `kernel`
    /// which is updated with the resulting hyperparameters.
    fn fit_surrogate(
        &mut self,
        gp: &mut GaussianProcessModel,
        kernel: &mut Kernel,
        xtrain: &Array2<f64>,
        ytrain: &[f64],
        iteration: usize,
    ) -> Result<()> {
        let yt = ArrayView1::from(ytrain);
        if let FitOutcome::Fallback { reason } = gp.best_fit(xtrain, &yt, kernel)? {
            warn!("Iteration {iteration}: GP hyperparameters not optimized ({reason})");
            for observer in self.observers.iter_mut() {
                observer.on_hyperparameter_fallback(iteration, &reason);
            }
        }
        *kernel = gp.kernel()?.clone();
        debug!("Iteration {iteration}: {gp}");
        Ok(())
    }

    /// Evaluates the objective at `x` given in native units
    fn eval(&self, x: &ArrayBase<impl Data<Elem = f64>, Ix1>) -> Result<f64> {
        let y = (self.fobj)(&x.view())
            .with_context(|| format!("objective evaluation failed at x = {x}"))?;
        if !y.is_finite() {
            return Err(BoError::ObjectiveError(anyhow::anyhow!(
                "objective returned a non finite value {y} at x = {x}"
            )));
        }
        Ok(y)
    }
}

/// Maximizes the acquisition function with local searches started
/// from `restarts` random points within `xlimits`.
///
/// Returns the best location found and its acquisition value. On ties the
/// latest start wins.
fn search_acquisition(
    gp: &GaussianProcessModel,
    xlimits: &Array2<f64>,
    ymax: f64,
    config: &BoConfig,
    rng: &mut Xoshiro256Plus,
) -> (Array1<f64>, f64) {
    let starts = random_sample(xlimits, config.restarts, rng);
    let acquisition = &config.acquisition;
    let obj = |x: &[f64]| -> f64 { -acquisition.value(x, gp, ymax) };

    let results: Vec<(f64, Array1<f64>)> = (0..starts.nrows())
        .into_par_iter()
        .map(|i| {
            let (fmin, x) = Optimizer::new(&obj, xlimits)
                .xinit(&starts.row(i))
                .max_eval(config.infill_max_eval)
                .ftol_rel(1e-8)
                .ftol_abs(1e-10)
                .minimize();
            if fmin.is_finite() {
                (-fmin, x)
            } else {
                // Local search failure: keep the start point
                let x = starts.row(i).to_owned();
                (acquisition.value(&x.to_vec(), gp, ymax), x)
            }
        })
        .collect();

    let mut best: Option<(f64, Array1<f64>)> = None;
    for (i, (value, x)) in results.into_iter().enumerate() {
        let value = if value.is_nan() {
            f64::NEG_INFINITY
        } else {
            value
        };
        debug!("Restart {i}: {} = {value} at {x}", acquisition.name());
        match &best {
            Some((best_value, _)) if value < *best_value => (),
            _ => best = Some((value, x)),
        }
    }
    match best {
        Some((value, x)) => (x, value),
        // restarts >= 1 is checked by config
        None => (xlimits.column(0).to_owned(), f64::NEG_INFINITY),
    }
}

fn push_row(x: &mut Array2<f64>, row: &ArrayView1<f64>) -> Result<()> {
    x.push_row(*row)
        .map_err(|err| BoError::InvalidValueError(err.to_string()))
}

/// Index of the first maximum value
fn argmax(values: &[f64]) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (i, v) in values.iter().enumerate() {
        match best {
            Some(b) if *v <= values[b] => (),
            _ => best = Some(i),
        }
    }
    best
}

fn max_value(values: &[f64]) -> Option<f64> {
    argmax(values).map(|i| values[i])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observer::LogObserver;
    use approx::assert_abs_diff_eq;
    use bayesbox_gp::{CustomKernel, HyperTuning, KernelParams};
    use ndarray::array;
    use std::sync::{Arc, Mutex};

    fn quadratic(x: &ArrayView1<f64>) -> anyhow::Result<f64> {
        Ok(-(x[0] - 3.).powi(2))
    }

    fn paraboloid(x: &ArrayView1<f64>) -> anyhow::Result<f64> {
        Ok(-(x[0] - 2.).powi(2) - (x[1] - 5.).powi(2))
    }

    #[derive(Default)]
    struct Counts {
        init: usize,
        iterations: usize,
        fallbacks: usize,
    }

    struct CountObserver(Arc<Mutex<Counts>>);

    impl BoObserver for CountObserver {
        fn on_init(&mut self, _n_points: usize, _ymax: f64) {
            self.0.lock().expect("lock").init += 1;
        }
        fn on_iteration_complete(&mut self, _: usize, _: f64, _: &ArrayView1<f64>, _: f64) {
            self.0.lock().expect("lock").iterations += 1;
        }
        fn on_hyperparameter_fallback(&mut self, _: usize, _: &str) {
            self.0.lock().expect("lock").fallbacks += 1;
        }
    }

    #[test]
    fn test_maximize_quadratic_1d() {
        let res = BayesOptBuilder::optimize(quadratic)
            .configure(|config| config.init_points(3).restarts(5).max_iters(15).seed(42))
            .max_within(&array![[0., 6.]])
            .expect("valid bounds")
            .maximize()
            .expect("maximization");
        assert!(res.n_iters <= 15);
        assert_abs_diff_eq!(res.x_opt[0], 3., epsilon = 0.3);
        assert_abs_diff_eq!(res.y_opt, 0., epsilon = 0.05);
    }

    #[test]
    fn test_maximize_paraboloid_2d() {
        let res = BayesOptBuilder::optimize(paraboloid)
            .configure(|config| config.max_iters(20).seed(42).full_history(true))
            .max_within(&array![[0., 10.], [0., 10.]])
            .expect("valid bounds")
            .maximize()
            .expect("maximization");
        let dist = ((res.x_opt[0] - 2.).powi(2) + (res.x_opt[1] - 5.).powi(2)).sqrt();
        assert!(dist < 0.5, "x_opt = {}", res.x_opt);

        let history = res.history.expect("full history");
        // no seeded points: init points plus one evaluation per iteration
        assert_eq!(history.y_doe.len(), 3 + res.n_iters);
        assert_eq!(history.x_doe.dim(), (3 + res.n_iters, 2));
        assert_eq!(
            history.y_doe.iter().cloned().fold(f64::NEG_INFINITY, f64::max),
            res.y_opt
        );
    }

    #[test]
    fn test_log_maximize_requires_positive_bounds() {
        let mut bo = BayesOptBuilder::optimize(quadratic)
            .max_within(&array![[-1., 10.]])
            .expect("valid bounds");
        assert!(matches!(
            bo.log_maximize(),
            Err(BoError::InvalidConfigError(_))
        ));
    }

    #[test]
    fn test_log_maximize() {
        // Maximum at x = 1e-2 on [1e-4, 1e2]
        let f = |x: &ArrayView1<f64>| -> anyhow::Result<f64> { Ok(-(x[0].log10() + 2.).powi(2)) };
        let res = BayesOptBuilder::optimize(f)
            .configure(|config| config.max_iters(15).seed(0).full_history(true))
            .max_within(&array![[1e-4, 1e2]])
            .expect("valid bounds")
            .log_maximize()
            .expect("maximization");
        let history = res.history.expect("full history");
        assert!(history
            .x_doe
            .iter()
            .all(|x| (1e-4 * (1. - 1e-12)..=1e2 * (1. + 1e-12)).contains(x)));
        assert_abs_diff_eq!(res.x_opt[0].log10(), -2., epsilon = 0.3);
    }

    #[test]
    fn test_invalid_bounds() {
        for xlimits in [array![[1., 1.]], array![[2., 1.]], array![[0., f64::INFINITY]]] {
            assert!(matches!(
                BayesOptBuilder::optimize(quadratic).max_within(&xlimits),
                Err(BoError::InvalidConfigError(_))
            ));
        }
        assert!(BayesOptBuilder::optimize(quadratic)
            .max_within(&Array2::<f64>::zeros((0, 2)))
            .is_err());
    }

    #[test]
    fn test_initialize_accumulates() {
        let mut bo = BayesOptBuilder::optimize(quadratic)
            .configure(|config| config.init_points(0).max_iters(2).seed(1).full_history(true))
            .max_within(&array![[0., 6.]])
            .expect("valid bounds");
        bo.initialize(&array![[1.], [5.]]).expect("seeding");
        bo.initialize(&array![[2.]]).expect("seeding");
        let (x, y) = bo.observations();
        assert_eq!(x, array![[1.], [5.], [2.]]);
        assert_eq!(y, array![-4., -4., -1.]);

        assert!(matches!(
            bo.initialize(&array![[1., 2.]]),
            Err(BoError::InvalidValueError(_))
        ));

        let res = bo.maximize().expect("maximization");
        let history = res.history.expect("full history");
        assert_eq!(
            history.x_doe.slice(ndarray::s![..3, ..]),
            array![[1.], [5.], [2.]]
        );
        assert_eq!(history.y_doe.len(), 3 + res.n_iters);
        assert!(res.y_opt >= -1.);
    }

    #[test]
    fn test_initialize_failure_keeps_no_point() {
        let f = |x: &ArrayView1<f64>| -> anyhow::Result<f64> {
            if x[0] > 4. {
                anyhow::bail!("out of validity domain")
            }
            Ok(-(x[0] - 3.).powi(2))
        };
        let mut bo = BayesOptBuilder::optimize(f)
            .max_within(&array![[0., 6.]])
            .expect("valid bounds");
        bo.initialize(&array![[1.]]).expect("seeding");
        assert!(matches!(
            bo.initialize(&array![[2.], [5.]]),
            Err(BoError::ObjectiveError(_))
        ));
        let (x, y) = bo.observations();
        assert_eq!(x, array![[1.]]);
        assert_eq!(y, array![-4.]);
    }

    #[test]
    fn test_threshold_stop_after_min_iters() {
        // Any acquisition maximum is under the threshold: the run stops
        // as soon as the iteration count exceeds min_iters
        let res = BayesOptBuilder::optimize(quadratic)
            .configure(|config| config.ei_threshold(1e9).min_iters(2).max_iters(10).seed(42))
            .max_within(&array![[0., 6.]])
            .expect("valid bounds")
            .maximize()
            .expect("maximization");
        assert_eq!(res.n_iters, 3);
    }

    #[test]
    fn test_search_acquisition_latest_equal_restart_wins() {
        let xlimits = array![[0., 6.], [-1., 1.]];
        let config = BoConfig::default()
            .acquisition(Acquisition::custom(|_x: &[f64], _gp: &GaussianProcessModel, _ymax: f64| 1.0))
            .restarts(5);
        let gp = GaussianProcessModel::new(1e-6).expect("valid noise");

        let mut rng = Xoshiro256Plus::seed_from_u64(42);
        let (x, value) = search_acquisition(&gp, &xlimits, 0., &config, &mut rng);

        let starts = random_sample(&xlimits, 5, &mut Xoshiro256Plus::seed_from_u64(42));
        assert_eq!(value, 1.0);
        assert_abs_diff_eq!(x, starts.row(4), epsilon = 1e-10);
    }

    #[test]
    fn test_no_training_point() {
        let mut bo = BayesOptBuilder::optimize(quadratic)
            .configure(|config| config.init_points(0))
            .max_within(&array![[0., 6.]])
            .expect("valid bounds");
        assert!(matches!(bo.maximize(), Err(BoError::InvalidConfigError(_))));
    }

    #[test]
    fn test_objective_errors() {
        let failing = |_x: &ArrayView1<f64>| -> anyhow::Result<f64> { anyhow::bail!("simulation crashed") };
        let res = BayesOptBuilder::optimize(failing)
            .configure(|config| config.seed(42))
            .max_within(&array![[0., 6.]])
            .expect("valid bounds")
            .maximize();
        match res {
            Err(BoError::ObjectiveError(err)) => {
                assert!(format!("{err:#}").contains("simulation crashed"))
            }
            _ => panic!("objective error expected"),
        }

        let nan = |_x: &ArrayView1<f64>| -> anyhow::Result<f64> { Ok(f64::NAN) };
        let mut bo = BayesOptBuilder::optimize(nan)
            .max_within(&array![[0., 6.]])
            .expect("valid bounds");
        assert!(matches!(
            bo.initialize(&array![[1.]]),
            Err(BoError::ObjectiveError(_))
        ));
    }

    #[test]
    fn test_observers() {
        let counts = Arc::new(Mutex::new(Counts::default()));
        let mut bo = BayesOptBuilder::optimize(quadratic)
            .configure(|config| config.max_iters(5).min_iters(10).seed(42))
            .max_within(&array![[0., 6.]])
            .expect("valid bounds");
        bo.observe(Box::new(CountObserver(counts.clone())))
            .observe(Box::new(LogObserver));
        let res = bo.maximize().expect("maximization");
        assert_eq!(res.n_iters, 5);
        let counts = counts.lock().expect("lock");
        assert_eq!(counts.init, 1);
        assert_eq!(counts.iterations, 5);
    }

    #[test]
    fn test_hyperparameter_fallback_is_notified() {
        // Kernel valid only for amplitudes greater than 6, out of default tuning bounds
        let picky = CustomKernel::new("Picky", true, |x, xp, p: &KernelParams| {
            if p.theta > 6. {
                let d = x - xp;
                p.theta * (-0.5 * d.dot(&d)).exp()
            } else {
                -1.
            }
        });
        let counts = Arc::new(Mutex::new(Counts::default()));
        let mut bo = BayesOptBuilder::optimize(quadratic)
            .configure(|config| {
                config
                    .kernel(Kernel::custom(picky, 10., 1.))
                    .max_iters(2)
                    .seed(3)
            })
            .max_within(&array![[0., 6.]])
            .expect("valid bounds");
        bo.observe(Box::new(CountObserver(counts.clone())));
        let res = bo.maximize().expect("maximization");
        assert_eq!(res.n_iters, 2);
        // initial fit then one per iteration
        assert_eq!(counts.lock().expect("lock").fallbacks, 3);
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let run = || {
            BayesOptBuilder::optimize(paraboloid)
                .configure(|config| {
                    config
                        .max_iters(4)
                        .acquisition(Acquisition::ucb(2.))
                        .hyper_tuning(HyperTuning::Fixed)
                        .seed(7)
                })
                .max_within(&array![[0., 10.], [0., 10.]])
                .expect("valid bounds")
                .maximize()
                .expect("maximization")
        };
        let (res1, res2) = (run(), run());
        assert_eq!(res1.x_opt, res2.x_opt);
        assert_eq!(res1.y_opt, res2.y_opt);
        assert_eq!(res1.n_iters, 4);
    }

    #[test]
    fn test_argmax_first_maximum() {
        assert_eq!(argmax(&[1., 3., 3., 2.]), Some(1));
        assert_eq!(argmax(&[]), None);
        assert_eq!(max_value(&[-1., -4.]), Some(-1.));
    }
}
